//! The drawing contract a rendering surface satisfies, and the frame
//! composition built on top of it.

use nocturne_core::{Point, RenderError, Rgb};

use crate::particles::{AmbientStar, BandStar, ParticleStore, ShootingStar};
use crate::pointer::PointerTracker;
use crate::viewport::BandGeometry;

/// Amplitude of the sinusoidal flicker applied to star opacity.
const FLICKER_AMPLITUDE: f64 = 0.15;

/// Minimum opacity a flickering star dims to.
const MIN_STAR_OPACITY: f64 = 0.3;

/// Halo size and strength for stars with the glow flag.
const GLOW_RADIUS_SCALE: f64 = 3.0;
const GLOW_ALPHA_SCALE: f64 = 0.2;

/// A color stop along a gradient, offset in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub alpha: f64,
}

impl GradientStop {
    pub const fn new(offset: f64, alpha: f64) -> Self {
        Self { offset, alpha }
    }
}

/// Interpolate the alpha of sorted `stops` at `t`.
pub(crate) fn gradient_alpha(stops: &[GradientStop], t: f64) -> f64 {
    let Some(first) = stops.first() else {
        return 0.0;
    };
    if t <= first.offset {
        return first.alpha;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            if span <= 0.0 {
                return b.alpha;
            }
            return a.alpha + (b.alpha - a.alpha) * (t - a.offset) / span;
        }
    }
    stops[stops.len() - 1].alpha
}

/// The soft glow behind the galactic band: a rotated ellipse filled with a
/// radial gradient measured in screen space from `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct BandGlow {
    pub center: Point,
    /// Gradient start radius.
    pub inner_radius: f64,
    /// Gradient end radius.
    pub outer_radius: f64,
    /// Ellipse semi-axis along the band.
    pub semi_major: f64,
    /// Ellipse semi-axis across the band.
    pub semi_minor: f64,
    pub angle: f64,
    pub color: Rgb,
    pub stops: [GradientStop; 2],
}

impl BandGlow {
    pub fn from_band(band: &BandGeometry) -> Self {
        Self {
            center: band.center,
            inner_radius: band.width / 4.0,
            outer_radius: band.width,
            semi_major: band.length / 2.0,
            semi_minor: band.width,
            angle: band.angle,
            color: Rgb::WHITE,
            stops: [GradientStop::new(0.0, 0.25), GradientStop::new(1.0, 0.0)],
        }
    }

    /// Whether `point` lies inside the rotated ellipse.
    pub fn contains(&self, point: Point) -> bool {
        if self.semi_major <= 0.0 || self.semi_minor <= 0.0 {
            return false;
        }
        let (sin, cos) = self.angle.sin_cos();
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        let along = dx * cos + dy * sin;
        let across = -dx * sin + dy * cos;
        (along / self.semi_major).powi(2) + (across / self.semi_minor).powi(2) <= 1.0
    }

    /// Gradient alpha at `point`, zero outside the ellipse.
    pub fn alpha_at(&self, point: Point) -> f64 {
        if !self.contains(point) {
            return 0.0;
        }
        let distance = point.distance_sq(self.center).sqrt();
        let span = self.outer_radius - self.inner_radius;
        let t = if span > 0.0 {
            ((distance - self.inner_radius) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };
        gradient_alpha(&self.stops, t)
    }
}

/// A tapered shooting star trail, widest at the head.
#[derive(Debug, Clone, PartialEq)]
pub struct Streak {
    pub head: Point,
    /// Direction of travel; the tail extends opposite to it.
    pub angle: f64,
    pub length: f64,
    pub head_half_width: f64,
    pub tail_half_width: f64,
    pub color: Rgb,
    /// Alpha stops from head (0.0) to tail (1.0).
    pub stops: [GradientStop; 3],
}

impl Streak {
    pub fn from_shooting_star(star: &ShootingStar) -> Self {
        Self {
            head: Point::new(star.x, star.y),
            angle: star.angle,
            length: star.length,
            head_half_width: 2.0,
            tail_half_width: 0.5,
            color: star.color,
            stops: [
                GradientStop::new(0.0, 0.7),
                GradientStop::new(0.7, 0.4),
                GradientStop::new(1.0, 0.0),
            ],
        }
    }

    /// Point on the trail axis at `t` (0.0 head, 1.0 tail end).
    pub fn point_at(&self, t: f64) -> Point {
        let (sin, cos) = self.angle.sin_cos();
        Point::new(
            self.head.x - cos * self.length * t,
            self.head.y - sin * self.length * t,
        )
    }

    pub fn alpha_at(&self, t: f64) -> f64 {
        gradient_alpha(&self.stops, t)
    }
}

/// A drawing target for one frame of the starfield.
pub trait Surface {
    /// Current dimensions in pixels.
    fn size(&self) -> (f64, f64);

    /// Erase the whole surface.
    fn clear(&mut self) -> Result<(), RenderError>;

    /// Fill a circle with `color` at `alpha`.
    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: Rgb,
        alpha: f64,
    ) -> Result<(), RenderError>;

    /// Fill the band glow ellipse with its radial gradient.
    fn fill_radial_ellipse(&mut self, glow: &BandGlow) -> Result<(), RenderError>;

    /// Fill a tapered gradient streak.
    fn fill_streak(&mut self, streak: &Streak) -> Result<(), RenderError>;
}

/// Opacity of a star after flicker and pointer hover fade.
pub(crate) fn star_opacity(
    base_opacity: f64,
    flicker_phase: f64,
    position: Point,
    pointer: Point,
    hover_radius_sq: f64,
) -> f64 {
    let flicker = (base_opacity + flicker_phase.sin() * FLICKER_AMPLITUDE)
        .clamp(MIN_STAR_OPACITY, 1.0);
    let distance_sq = position.distance_sq(pointer);
    let fade = if distance_sq < hover_radius_sq {
        0.2 + (distance_sq / hover_radius_sq) * 0.8
    } else {
        1.0
    };
    flicker * fade
}

/// The per-star fields drawing needs, shared by ambient and band stars.
struct StarSprite {
    position: Point,
    radius: f64,
    base_opacity: f64,
    flicker_phase: f64,
    color: Rgb,
    glow: bool,
}

impl From<&AmbientStar> for StarSprite {
    fn from(star: &AmbientStar) -> Self {
        Self {
            position: Point::new(star.x, star.y),
            radius: star.radius,
            base_opacity: star.base_opacity,
            flicker_phase: star.flicker_phase,
            color: star.color,
            glow: star.glow,
        }
    }
}

impl From<&BandStar> for StarSprite {
    fn from(star: &BandStar) -> Self {
        Self {
            position: Point::new(star.x, star.y),
            radius: star.radius,
            base_opacity: star.base_opacity,
            flicker_phase: star.flicker_phase,
            color: star.color,
            glow: star.glow,
        }
    }
}

/// Pointer-derived state shared by every star in a frame.
struct FrameContext {
    parallax: Point,
    pointer: Point,
    hover_radius_sq: f64,
}

impl FrameContext {
    fn draw_star<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        sprite: StarSprite,
        depth: f64,
    ) -> Result<(), RenderError> {
        let center = Point::new(
            sprite.position.x + self.parallax.x * sprite.radius * depth,
            sprite.position.y + self.parallax.y * sprite.radius * depth,
        );
        let alpha = star_opacity(
            sprite.base_opacity,
            sprite.flicker_phase,
            center,
            self.pointer,
            self.hover_radius_sq,
        );
        if sprite.glow {
            surface.fill_circle(
                center,
                sprite.radius * GLOW_RADIUS_SCALE,
                sprite.color,
                alpha * GLOW_ALPHA_SCALE,
            )?;
        }
        surface.fill_circle(center, sprite.radius, sprite.color, alpha)
    }
}

/// Draw one frame: band glow, ambient stars, band stars, shooting stars.
pub fn draw_frame<S: Surface + ?Sized>(
    surface: &mut S,
    store: &ParticleStore,
    band: &BandGeometry,
    pointer: &PointerTracker,
) -> Result<(), RenderError> {
    let params = store.params();
    let viewport = store.viewport();
    let ctx = FrameContext {
        parallax: pointer.offset(),
        pointer: pointer.canvas_position(viewport.width(), viewport.height()),
        hover_radius_sq: params.hover_radius * params.hover_radius,
    };

    surface.fill_radial_ellipse(&BandGlow::from_band(band))?;

    for star in store.ambient_stars() {
        ctx.draw_star(surface, star.into(), params.ambient_depth)?;
    }
    for star in store.band_stars() {
        ctx.draw_star(surface, star.into(), params.band_depth)?;
    }
    for star in store.shooting_stars() {
        surface.fill_streak(&Streak::from_shooting_star(star))?;
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use nocturne_core::{SkyParams, Viewport};
    use rand::{SeedableRng, rngs::StdRng};

    /// Records draw calls and optionally fails after a number of them.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSurface {
        pub width: f64,
        pub height: f64,
        pub clears: usize,
        pub circles: Vec<(Point, f64, Rgb, f64)>,
        pub glows: usize,
        pub streaks: Vec<Streak>,
        pub fail_after: Option<usize>,
        calls: usize,
    }

    impl RecordingSurface {
        pub fn new(width: f64, height: f64) -> Self {
            Self {
                width,
                height,
                ..Self::default()
            }
        }

        fn record(&mut self) -> Result<(), RenderError> {
            self.calls += 1;
            match self.fail_after {
                Some(limit) if self.calls > limit => {
                    Err(RenderError::SurfaceLost("scripted failure".into()))
                }
                _ => Ok(()),
            }
        }
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> (f64, f64) {
            (self.width, self.height)
        }

        fn clear(&mut self) -> Result<(), RenderError> {
            self.clears += 1;
            self.circles.clear();
            self.streaks.clear();
            self.glows = 0;
            Ok(())
        }

        fn fill_circle(
            &mut self,
            center: Point,
            radius: f64,
            color: Rgb,
            alpha: f64,
        ) -> Result<(), RenderError> {
            self.record()?;
            self.circles.push((center, radius, color, alpha));
            Ok(())
        }

        fn fill_radial_ellipse(&mut self, _glow: &BandGlow) -> Result<(), RenderError> {
            self.record()?;
            self.glows += 1;
            Ok(())
        }

        fn fill_streak(&mut self, streak: &Streak) -> Result<(), RenderError> {
            self.record()?;
            self.streaks.push(streak.clone());
            Ok(())
        }
    }

    #[test]
    fn test_gradient_alpha_interpolates() {
        let stops = [
            GradientStop::new(0.0, 0.7),
            GradientStop::new(0.7, 0.4),
            GradientStop::new(1.0, 0.0),
        ];
        assert_eq!(gradient_alpha(&stops, -1.0), 0.7);
        assert_eq!(gradient_alpha(&stops, 0.0), 0.7);
        assert!((gradient_alpha(&stops, 0.35) - 0.55).abs() < 1e-12);
        assert!((gradient_alpha(&stops, 0.7) - 0.4).abs() < 1e-12);
        assert!((gradient_alpha(&stops, 0.85) - 0.2).abs() < 1e-12);
        assert_eq!(gradient_alpha(&stops, 2.0), 0.0);
        assert_eq!(gradient_alpha(&[], 0.5), 0.0);
    }

    #[test]
    fn test_star_opacity_flicker_is_clamped() {
        let far = Point::new(1e6, 1e6);
        let origin = Point::default();
        let hover = 150.0 * 150.0;
        let peak = star_opacity(1.0, std::f64::consts::FRAC_PI_2, origin, far, hover);
        assert_eq!(peak, 1.0);
        let trough = star_opacity(0.3, -std::f64::consts::FRAC_PI_2, origin, far, hover);
        assert_eq!(trough, 0.3);
    }

    #[test]
    fn test_star_opacity_fades_near_pointer() {
        let hover = 150.0 * 150.0;
        let star = Point::new(100.0, 100.0);
        let under_pointer = star_opacity(0.5, 0.0, star, star, hover);
        assert!((under_pointer - 0.5 * 0.2).abs() < 1e-12);
        let halfway = star_opacity(0.5, 0.0, star, Point::new(175.0, 100.0), hover);
        assert!((halfway - 0.5 * (0.2 + 0.25 * 0.8)).abs() < 1e-12);
        let outside = star_opacity(0.5, 0.0, star, Point::new(400.0, 100.0), hover);
        assert_eq!(outside, 0.5);
    }

    #[test]
    fn test_band_glow_alpha() {
        let viewport = Viewport::new(800.0, 600.0).unwrap();
        let glow = BandGlow::from_band(&BandGeometry::from_viewport(&viewport));
        assert_eq!(glow.alpha_at(glow.center), 0.25);
        let edge = Point::new(glow.center.x + glow.outer_radius, glow.center.y);
        assert!(glow.alpha_at(edge).abs() < 1e-9);
        assert_eq!(glow.alpha_at(Point::new(-1000.0, -1000.0)), 0.0);
    }

    #[test]
    fn test_streak_tail_points_backwards() {
        let star = ShootingStar {
            id: 0,
            x: 100.0,
            y: 50.0,
            speed: 30.0,
            angle: 0.0,
            length: 20.0,
            life: 0,
            max_life: 60.0,
            color: Rgb::new(180, 230, 255),
        };
        let streak = Streak::from_shooting_star(&star);
        assert_eq!(streak.point_at(0.0), Point::new(100.0, 50.0));
        assert_eq!(streak.point_at(1.0), Point::new(80.0, 50.0));
        assert_eq!(streak.alpha_at(0.0), 0.7);
    }

    #[test]
    fn test_draw_frame_draws_every_particle() {
        let params = SkyParams {
            ambient_count: 20,
            band_count: 10,
            spawn_probability: 0.0,
            ..SkyParams::default()
        };
        let viewport = Viewport::new(800.0, 600.0).unwrap();
        let band = BandGeometry::from_viewport(&viewport);
        let mut store = ParticleStore::new(params, StdRng::seed_from_u64(1), &viewport, &band);
        store.push_shooting_star(ShootingStar {
            id: 0,
            x: 10.0,
            y: 10.0,
            speed: 30.0,
            angle: 0.0,
            length: 12.0,
            life: 0,
            max_life: 60.0,
            color: Rgb::new(180, 230, 255),
        });
        let glowing = store.ambient_stars().iter().filter(|s| s.glow).count()
            + store.band_stars().iter().filter(|s| s.glow).count();

        let pointer = PointerTracker::new(50.0, 30.0, 0.05);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        draw_frame(&mut surface, &store, &band, &pointer).unwrap();

        assert_eq!(surface.glows, 1);
        assert_eq!(surface.circles.len(), 30 + glowing);
        assert_eq!(surface.streaks.len(), 1);
    }

    #[test]
    fn test_draw_frame_applies_parallax_by_depth() {
        let params = SkyParams {
            ambient_count: 1,
            band_count: 0,
            spawn_probability: 0.0,
            ..SkyParams::default()
        };
        let viewport = Viewport::new(800.0, 600.0).unwrap();
        let band = BandGeometry::from_viewport(&viewport);
        let store = ParticleStore::new(params, StdRng::seed_from_u64(2), &viewport, &band);
        let star = store.ambient_stars()[0].clone();

        let mut pointer = PointerTracker::new(50.0, 30.0, 1.0);
        pointer.update_pointer(800.0, 600.0, 800.0, 600.0);
        pointer.step();

        let mut surface = RecordingSurface::new(800.0, 600.0);
        draw_frame(&mut surface, &store, &band, &pointer).unwrap();
        let (center, radius, _, _) = surface.circles.last().copied().unwrap();
        assert_eq!(radius, star.radius);
        assert!((center.x - (star.x + 50.0 * star.radius * 0.3)).abs() < 1e-9);
        assert!((center.y - (star.y + 30.0 * star.radius * 0.3)).abs() < 1e-9);
    }

    #[test]
    fn test_draw_frame_propagates_surface_errors() {
        let viewport = Viewport::new(800.0, 600.0).unwrap();
        let band = BandGeometry::from_viewport(&viewport);
        let store = ParticleStore::new(
            SkyParams::default(),
            StdRng::seed_from_u64(3),
            &viewport,
            &band,
        );
        let pointer = PointerTracker::new(50.0, 30.0, 0.05);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        surface.fail_after = Some(5);
        assert!(draw_frame(&mut surface, &store, &band, &pointer).is_err());
    }
}
