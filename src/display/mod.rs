//! Rendering layer. All terminal I/O lives here.
//!
//! `Canvas` rasterises the game's drawing primitives onto a grid of terminal
//! cells; `render` wraps that grid in a border and HUD and writes the whole
//! frame with crossterm.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color as TermColor, Print},
    terminal,
    QueueableCommand,
};

use crate::game::{Game, GameStatus};
use crate::surface::{Color, Surface, Transform};
use crate::vector::Vector2;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: TermColor = TermColor::DarkBlue;
const C_HUD_SCORE: TermColor = TermColor::Yellow;
const C_HUD_LEVEL: TermColor = TermColor::Cyan;
const C_HUD_LIVES: TermColor = TermColor::Red;
const C_HINT: TermColor = TermColor::DarkGrey;

fn term_color(color: Color) -> TermColor {
    match color {
        Color::White => TermColor::White,
        Color::Grey => TermColor::Grey,
        Color::Green => TermColor::Green,
        Color::Yellow => TermColor::Yellow,
        Color::Red => TermColor::Red,
        Color::Orange => TermColor::DarkYellow,
    }
}

// ── Glyphs ────────────────────────────────────────────────────────────────────

const G_LINE: char = '*';
const G_OUTLINE: char = 'o';
const G_FILL: char = '@';
const G_RECT: char = '=';

/// Samples taken around a full ellipse.
const OVAL_SAMPLES: usize = 24;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

// ── Canvas ────────────────────────────────────────────────────────────────────

/// Terminal-cell raster of the square world.
///
/// Layout (rows): 0 = HUD, 1 = top border, `2 .. rows-2` = play area,
/// `rows-2` = bottom border, `rows-1` = controls hint.  Columns 0 and
/// `cols-1` are the side walls.
pub struct Canvas {
    cols: u16,
    rows: u16,
    world_size: f64,
    cells: Vec<Option<Cell>>,
    color: Color,
    transform: Transform,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16, world_size: f64) -> Self {
        let mut canvas = Self {
            cols,
            rows,
            world_size,
            cells: Vec::new(),
            color: Color::White,
            transform: Transform::IDENTITY,
        };
        canvas.resize(cols, rows);
        canvas
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![None; self.area_width() as usize * self.area_height() as usize];
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
        self.color = Color::White;
        self.transform = Transform::IDENTITY;
    }

    fn area_width(&self) -> u16 {
        self.cols.saturating_sub(2)
    }

    fn area_height(&self) -> u16 {
        self.rows.saturating_sub(4)
    }

    /// World point → (column, row) inside the play area, wrapping the world.
    fn to_cell(&self, world: Vector2) -> Option<(u16, u16)> {
        let (w, h) = (self.area_width(), self.area_height());
        if w == 0 || h == 0 || !world.x.is_finite() || !world.y.is_finite() {
            return None;
        }
        let mut p = world;
        p.wrap(self.world_size);
        let cx = ((p.x / self.world_size) * w as f64) as u16;
        let cy = ((p.y / self.world_size) * h as f64) as u16;
        Some((cx.min(w - 1), cy.min(h - 1)))
    }

    /// World units covered by one cell, horizontally and vertically.
    fn cell_span(&self) -> (f64, f64) {
        let w = self.area_width().max(1) as f64;
        let h = self.area_height().max(1) as f64;
        (self.world_size / w, self.world_size / h)
    }

    fn plot(&mut self, local: Vector2, glyph: char) {
        let world = self.transform.apply(local);
        if let Some((cx, cy)) = self.to_cell(world) {
            let idx = cy as usize * self.area_width() as usize + cx as usize;
            self.cells[idx] = Some(Cell {
                glyph,
                color: self.color,
            });
        }
    }

    fn plot_segment(&mut self, from: Vector2, to: Vector2, glyph: char) {
        let (span_x, span_y) = self.cell_span();
        let delta = to - from;
        let steps = (delta.x.abs() / span_x).max(delta.y.abs() / span_y).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.plot(from + delta.scale(t), glyph);
        }
    }

    /// Points on the ellipse inscribed in `(x, y, w, h)`, `start_deg` and
    /// `extent_deg` measured counter-clockwise from three o'clock.
    fn ellipse_points(x: f64, y: f64, w: f64, h: f64, start_deg: f64, extent_deg: f64) -> Vec<Vector2> {
        let (rx, ry) = (w / 2.0, h / 2.0);
        let center = Vector2::new(x + rx, y + ry);
        let samples = ((OVAL_SAMPLES as f64 * extent_deg.abs() / 360.0).ceil() as usize).max(2);
        (0..=samples)
            .map(|i| {
                let theta = (start_deg + extent_deg * i as f64 / samples as f64).to_radians();
                Vector2::new(center.x + rx * theta.cos(), center.y - ry * theta.sin())
            })
            .collect()
    }

    /// Queue every lit cell.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let w = self.area_width() as usize;
        for (idx, cell) in self.cells.iter().enumerate() {
            if let Some(cell) = cell {
                let col = (idx % w) as u16 + 1;
                let row = (idx / w) as u16 + 2;
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(style::SetForegroundColor(term_color(cell.color)))?;
                out.queue(Print(cell.glyph))?;
            }
        }
        Ok(())
    }
}

impl Surface for Canvas {
    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let from = self.transform.apply(Vector2::new(x1, y1));
        let to = self.transform.apply(Vector2::new(x2, y2));
        // Segments are sampled in world space, so plot with no transform.
        let saved = std::mem::replace(&mut self.transform, Transform::IDENTITY);
        self.plot_segment(from, to, G_LINE);
        self.transform = saved;
    }

    fn draw_oval(&mut self, x: f64, y: f64, width: f64, height: f64) {
        for p in Self::ellipse_points(x, y, width, height, 0.0, 360.0) {
            self.plot(p, G_OUTLINE);
        }
    }

    fn fill_oval(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.plot(Vector2::new(x + width / 2.0, y + height / 2.0), G_FILL);
        for p in Self::ellipse_points(x, y, width, height, 0.0, 360.0) {
            self.plot(p, G_FILL);
        }
    }

    fn draw_arc(&mut self, x: f64, y: f64, width: f64, height: f64, start_deg: f64, extent_deg: f64) {
        for p in Self::ellipse_points(x, y, width, height, start_deg, extent_deg) {
            self.plot(p, G_OUTLINE);
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        for (fx, fy) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.5, 0.5)] {
            self.plot(Vector2::new(x + width * fx, y + height * fy), G_RECT);
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, game: &Game, canvas: &mut Canvas) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    canvas.clear();
    game.render(canvas);

    draw_border(out, canvas)?;
    draw_hud(out, game, canvas.cols)?;
    canvas.present(out)?;
    draw_controls_hint(out, canvas)?;

    if game.status() == GameStatus::GameOver {
        draw_game_over(out, game, canvas)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, canvas.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    let w = canvas.cols as usize;
    let h = canvas.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(canvas.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, game: &Game, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>8}", game.score())))?;

    let level_str = format!("[ LEVEL {} ]", game.level());
    let lx = (width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    let hearts: String = "♥".repeat(game.lives() as usize);
    let lives_text = format!("Lives: {}", hearts);
    let rx = width.saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, canvas.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Turn   ↑ / W : Thrust   SPACE : Fire   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, game: &Game, canvas: &Canvas) -> std::io::Result<()> {
    let cx = canvas.cols / 2;
    let cy = canvas.rows / 2;

    let score_line = format!("Final score: {}", game.score());
    let lines = [
        ("  G A M E   O V E R  ", TermColor::Red),
        (score_line.as_str(), TermColor::Yellow),
        ("R : Restart    Q : Quit", TermColor::White),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        let x = cx.saturating_sub(text.chars().count() as u16 / 2);
        let y = (cy + i as u16).saturating_sub(1);
        out.queue(cursor::MoveTo(x, y))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*text))?;
    }
    Ok(())
}
