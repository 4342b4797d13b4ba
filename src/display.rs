//! Rendering layer — all terminal I/O lives here.
//!
//! The playfield is scaled onto whatever terminal we have.  No game logic is
//! performed; this module only translates a `GameState` snapshot into
//! terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use invaders::entities::{GameState, GameStatus};
use invaders::geometry::Rect;
use invaders::Render;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_ENEMIES: Color = Color::Green;
const C_SHIP: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

const CONTROLS_HINT: &str = "← → / A D : Move   SPACE : Shoot   Q : Quit";

/// Rows taken by the HUD + top border, and by the bottom border + hint.
const TOP_ROWS: u16 = 2;
const BOTTOM_ROWS: u16 = 2;

/// A terminal-backed renderer.  `cols`/`rows` track the terminal size.
pub struct TerminalView<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        TerminalView { out, cols, rows }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    fn inner_width(&self) -> u16 {
        self.cols.saturating_sub(2)
    }

    fn inner_height(&self) -> u16 {
        self.rows.saturating_sub(TOP_ROWS + BOTTOM_ROWS)
    }

    /// Map a playfield rectangle onto terminal cells (column, row, width, height).
    /// Every visible entity covers at least one cell.
    fn to_cells(&self, state: &GameState, rect: Rect) -> Option<(u16, u16, u16, u16)> {
        let inner_w = self.inner_width() as f64;
        let inner_h = self.inner_height() as f64;
        if inner_w < 1.0 || inner_h < 1.0 {
            return None;
        }
        let sx = inner_w / state.width;
        let sy = inner_h / state.height;

        let span = |start: f64, end: f64, limit: f64| -> Option<(u16, u16)> {
            let lo = start.floor().max(0.0);
            let hi = end.ceil().max(lo + 1.0).min(limit);
            if lo >= limit || hi <= lo {
                None
            } else {
                Some((lo as u16, (hi - lo) as u16))
            }
        };

        let (col, w) = span(rect.x * sx, rect.right() * sx, inner_w)?;
        let (row, h) = span(rect.y * sy, rect.bottom() * sy, inner_h)?;
        Some((col + 1, row + TOP_ROWS, w, h))
    }

    fn fill(&mut self, cells: (u16, u16, u16, u16), glyph: &str) -> std::io::Result<()> {
        let (col, row, w, h) = cells;
        let line = glyph.repeat(w as usize);
        for r in row..row + h {
            self.out.queue(cursor::MoveTo(col, r))?;
            self.out.queue(Print(&line))?;
        }
        Ok(())
    }

    // ── Border ────────────────────────────────────────────────────────────────

    fn draw_border(&mut self) -> std::io::Result<()> {
        let w = self.cols as usize;
        let bottom = self.rows.saturating_sub(BOTTOM_ROWS);

        self.out.queue(style::SetForegroundColor(C_BORDER))?;

        self.out.queue(cursor::MoveTo(0, 1))?;
        self.out
            .queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        self.out.queue(cursor::MoveTo(0, bottom))?;
        self.out
            .queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in TOP_ROWS..bottom {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(self.cols.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }

        Ok(())
    }

    // ── HUD (row 0) ───────────────────────────────────────────────────────────

    fn draw_hud(&mut self, state: &GameState) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        self.out.queue(Print(format!("Score: {}", state.score)))?;

        let enemies = format!(
            "Enemies: {}/{}",
            state.enemies.alive_count(),
            state.enemies.len()
        );
        let rx = self
            .cols
            .saturating_sub(enemies.chars().count() as u16 + 1);
        self.out.queue(cursor::MoveTo(rx, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_ENEMIES))?;
        self.out.queue(Print(&enemies))?;
        Ok(())
    }

    // ── Entities ──────────────────────────────────────────────────────────────

    fn draw_entities(&mut self, state: &GameState) -> std::io::Result<()> {
        self.out.queue(style::SetForegroundColor(C_ENEMY))?;
        for enemy in state.live_enemies() {
            if let Some(cells) = self.to_cells(state, enemy.rect()) {
                self.fill(cells, "▼")?;
            }
        }

        self.out.queue(style::SetForegroundColor(C_BULLET))?;
        for bullet in &state.bullets {
            if let Some(cells) = self.to_cells(state, bullet.rect()) {
                self.fill(cells, "║")?;
            }
        }

        self.out.queue(style::SetForegroundColor(C_SHIP))?;
        if let Some(cells) = self.to_cells(state, state.ship.rect()) {
            self.fill(cells, "█")?;
        }
        Ok(())
    }

    // ── Controls hint (last row) ──────────────────────────────────────────────

    fn draw_controls_hint(&mut self) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(1, self.rows.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(CONTROLS_HINT))?;
        Ok(())
    }

    // ── Game-over overlay ─────────────────────────────────────────────────────

    fn draw_game_over(&mut self, state: &GameState) -> std::io::Result<()> {
        let cleared = state.score == state.winning_score();
        let banner: &[(&str, Color)] = &[
            ("╔════════════════════╗", Color::Red),
            ("║    GAME  OVER      ║", Color::Red),
            ("╚════════════════════╝", Color::Red),
        ];
        let score_line = format!("Final Score: {}", state.score);
        let outcome_line = if cleared {
            "All enemies destroyed!"
        } else {
            "The invaders got you."
        };
        let trailer: [(&str, Color); 3] = [
            (score_line.as_str(), Color::Yellow),
            (outcome_line, if cleared { Color::Green } else { Color::DarkGrey }),
            ("R - Play Again  Q - Quit", Color::White),
        ];

        let cx = self.cols / 2;
        let total_rows = (banner.len() + trailer.len()) as u16;
        let start_row = (self.rows / 2).saturating_sub(total_rows / 2);

        for (i, (msg, color)) in banner.iter().chain(trailer.iter()).enumerate() {
            let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
            self.out.queue(cursor::MoveTo(col, start_row + i as u16))?;
            self.out.queue(style::SetForegroundColor(*color))?;
            self.out.queue(Print(*msg))?;
        }

        Ok(())
    }
}

impl<W: Write> Render for TerminalView<W> {
    /// Render one complete frame.
    fn render(&mut self, state: &GameState) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        self.draw_border()?;
        self.draw_hud(state)?;
        self.draw_entities(state)?;
        self.draw_controls_hint()?;

        if state.status == GameStatus::GameOver {
            self.draw_game_over(state)?;
        }

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}
