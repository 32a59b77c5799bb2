//! Glyphs used to draw the sky on terminal cells.

/// Star glyphs from faintest to brightest.
pub const STAR_GLYPHS: &[char] = &['.', '·', '+', '*', '✦'];

/// Apparent brightness (alpha × radius) at which each glyph after the first
/// takes over.
pub const STAR_GLYPH_THRESHOLDS: &[f64] = &[0.15, 0.35, 0.6, 0.9];

/// Head of a shooting star.
pub const STREAK_HEAD: char = '✧';

/// Trail glyphs for mostly horizontal, falling and rising streaks.
pub const STREAK_FLAT: char = '─';
pub const STREAK_FALLING: char = '╲';
pub const STREAK_RISING: char = '╱';

/// Pick a star glyph for an apparent brightness.
pub fn star_glyph(brightness: f64) -> char {
    let level = STAR_GLYPH_THRESHOLDS
        .iter()
        .take_while(|threshold| brightness >= **threshold)
        .count();
    STAR_GLYPHS[level]
}

/// Pick a trail glyph for a streak travelling at `angle`.
pub fn streak_glyph(angle: f64) -> char {
    let (sin, cos) = angle.sin_cos();
    if sin.abs() < 0.38 {
        STREAK_FLAT
    } else if sin * cos > 0.0 {
        STREAK_FALLING
    } else {
        STREAK_RISING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_glyph_levels() {
        assert_eq!(star_glyph(0.0), '.');
        assert_eq!(star_glyph(0.2), '·');
        assert_eq!(star_glyph(0.5), '+');
        assert_eq!(star_glyph(0.6), '*');
        assert_eq!(star_glyph(5.0), '✦');
    }

    #[test]
    fn test_streak_glyph_direction() {
        assert_eq!(streak_glyph(0.0), STREAK_FLAT);
        assert_eq!(streak_glyph(std::f64::consts::PI), STREAK_FLAT);
        // Screen y grows downward: positive angles fall to the right.
        assert_eq!(streak_glyph(0.8), STREAK_FALLING);
        assert_eq!(streak_glyph(std::f64::consts::PI - 0.8), STREAK_RISING);
    }
}
