//! A [`Surface`] backed by a grid of terminal cells.

use nocturne_core::{Point, RenderError, Rgb};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::chars::{STREAK_HEAD, star_glyph, streak_glyph};
use crate::render::{BandGlow, Streak, Surface};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    fg: Rgb,
    bg: Rgb,
    /// Accumulated apparent brightness of everything drawn here.
    brightness: f64,
    /// Brightness of the strongest single contribution, which owns `fg`.
    peak: f64,
}

impl Cell {
    const EMPTY: Cell = Cell {
        glyph: ' ',
        fg: Rgb::BLACK,
        bg: Rgb::BLACK,
        brightness: 0.0,
        peak: 0.0,
    };
}

/// Terminal cell grid mapped onto a virtual pixel plane.
///
/// Each cell covers `cell_width × cell_height` pixels, so the sky keeps
/// working in pixel units while drawing at cell resolution.
#[derive(Debug, Clone)]
pub struct CellCanvas {
    columns: u16,
    rows: u16,
    cell_width: f64,
    cell_height: f64,
    cells: Vec<Cell>,
}

impl CellCanvas {
    pub fn new(columns: u16, rows: u16, cell_width: f64, cell_height: f64) -> Self {
        Self {
            columns,
            rows,
            cell_width,
            cell_height,
            cells: vec![Cell::EMPTY; columns as usize * rows as usize],
        }
    }

    /// Change the grid size, discarding its contents.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
        self.cells = vec![Cell::EMPTY; columns as usize * rows as usize];
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Center of a cell in pixels.
    pub fn cell_center(&self, column: u16, row: u16) -> Point {
        Point::new(
            (column as f64 + 0.5) * self.cell_width,
            (row as f64 + 0.5) * self.cell_height,
        )
    }

    /// Glyph drawn at a cell, if the cell exists.
    pub fn glyph_at(&self, column: u16, row: u16) -> Option<char> {
        self.cell(column, row).map(|cell| cell.glyph)
    }

    /// Foreground and background colors of a cell, if it exists.
    pub fn colors_at(&self, column: u16, row: u16) -> Option<(Rgb, Rgb)> {
        self.cell(column, row).map(|cell| (cell.fg, cell.bg))
    }

    fn cell(&self, column: u16, row: u16) -> Option<&Cell> {
        if column < self.columns && row < self.rows {
            self.cells
                .get(row as usize * self.columns as usize + column as usize)
        } else {
            None
        }
    }

    /// Index of the cell containing `point`, or `None` off-canvas.
    fn index_of(&self, point: Point) -> Option<usize> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let column = (point.x / self.cell_width) as usize;
        let row = (point.y / self.cell_height) as usize;
        (column < self.columns as usize && row < self.rows as usize)
            .then(|| row * self.columns as usize + column)
    }

    /// Convert the grid to styled lines for a `Paragraph`.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        if self.columns == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.columns as usize)
            .map(|row| {
                let spans: Vec<Span> = row.iter().map(render_cell).collect();
                Line::from(spans)
            })
            .collect()
    }
}

fn render_cell(cell: &Cell) -> Span<'static> {
    if cell.glyph == ' ' && cell.bg == Rgb::BLACK {
        return Span::raw(" ");
    }
    let mut style = Style::new().fg(cell.fg.into());
    if cell.bg != Rgb::BLACK {
        style = style.bg(cell.bg.into());
    }
    Span::styled(cell.glyph.to_string(), style)
}

impl Surface for CellCanvas {
    fn size(&self) -> (f64, f64) {
        (
            self.columns as f64 * self.cell_width,
            self.rows as f64 * self.cell_height,
        )
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        self.cells.fill(Cell::EMPTY);
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: Rgb,
        alpha: f64,
    ) -> Result<(), RenderError> {
        if !center.is_finite() || !radius.is_finite() || !alpha.is_finite() {
            return Err(RenderError::NonFinite);
        }
        let Some(index) = self.index_of(center) else {
            return Ok(());
        };
        let apparent = alpha.clamp(0.0, 1.0) * radius.max(0.0);
        let cell = &mut self.cells[index];
        cell.brightness += apparent;
        if apparent > cell.peak {
            cell.peak = apparent;
            cell.fg = color.over(cell.bg, alpha);
        }
        cell.glyph = star_glyph(cell.brightness);
        Ok(())
    }

    fn fill_radial_ellipse(&mut self, glow: &BandGlow) -> Result<(), RenderError> {
        if !glow.center.is_finite() || !glow.angle.is_finite() {
            return Err(RenderError::NonFinite);
        }
        for row in 0..self.rows {
            for column in 0..self.columns {
                let alpha = glow.alpha_at(self.cell_center(column, row));
                if alpha > 0.0 {
                    let index = row as usize * self.columns as usize + column as usize;
                    let cell = &mut self.cells[index];
                    cell.bg = glow.color.over(cell.bg, alpha);
                }
            }
        }
        Ok(())
    }

    fn fill_streak(&mut self, streak: &Streak) -> Result<(), RenderError> {
        if !streak.head.is_finite() || !streak.angle.is_finite() || !streak.length.is_finite() {
            return Err(RenderError::NonFinite);
        }
        let step = self.cell_width.min(self.cell_height) / 2.0;
        let samples = (streak.length / step).ceil().max(1.0) as usize;
        let trail = streak_glyph(streak.angle);

        // Tail first so the head owns its cell.
        for i in (0..=samples).rev() {
            let t = i as f64 / samples as f64;
            let Some(index) = self.index_of(streak.point_at(t)) else {
                continue;
            };
            let alpha = streak.alpha_at(t);
            if alpha <= 0.0 {
                continue;
            }
            let cell = &mut self.cells[index];
            cell.glyph = if i == 0 { STREAK_HEAD } else { trail };
            cell.fg = streak.color.over(cell.bg, alpha);
            cell.peak = cell.peak.max(alpha);
            cell.brightness = cell.brightness.max(alpha);
        }
        Ok(())
    }
}
