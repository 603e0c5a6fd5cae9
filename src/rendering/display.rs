//! # Display Management
//!
//! Screen management and 2D rendering using macroquad: the tile map, a stats
//! panel, the message log, and short-lived hit highlights. The highlight
//! timers are wall-clock state owned here; the core only reports that a hit
//! happened.

use crate::game::{Entity, FlashKind, HitEvent, MessageTone, Phase, Position, Session};
use macroquad::prelude::*;

/// How long a hit highlight stays on screen, in seconds.
const FLASH_DURATION: f64 = 0.12;

/// Number of log lines shown under the map.
const LOG_LINES: usize = 3;

/// Enemy roster rows shown in the side panel before truncating.
const ROSTER_ROWS: usize = 5;

/// A hit highlight currently on screen.
#[derive(Debug, Clone, Copy)]
struct ActiveFlash {
    position: Position,
    expires_at: f64,
}

/// Macroquad display manager for the game.
///
/// Reads the session snapshot each frame; the only session interaction that
/// isn't a read is draining hit events via [`Session::take_hit_events`],
/// which the game loop feeds into [`MacroquadDisplay::add_flashes`].
pub struct MacroquadDisplay {
    /// Tile size in pixels
    pub tile_size: f32,
    /// Left/top margin of the map in pixels
    pub margin: f32,
    /// Side panel width in pixels
    pub panel_width: f32,
    /// Live hit highlights with their expiry times
    flashes: Vec<ActiveFlash>,
}

impl Default for MacroquadDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroquadDisplay {
    /// Creates a new display manager.
    pub fn new() -> Self {
        Self {
            tile_size: 24.0,
            margin: 16.0,
            panel_width: 300.0,
            flashes: Vec::new(),
        }
    }

    /// Registers freshly drained hit events as timed highlights.
    pub fn add_flashes(&mut self, events: Vec<HitEvent>) {
        let expires_at = get_time() + FLASH_DURATION;
        for event in events {
            match event.kind {
                FlashKind::Hit => self.flashes.push(ActiveFlash {
                    position: event.position,
                    expires_at,
                }),
            }
        }
    }

    /// Renders the complete frame: map, side panel, log, and any overlay.
    pub fn render(&mut self, session: &Session) {
        let now = get_time();
        self.flashes.retain(|f| f.expires_at > now);

        clear_background(BLACK);
        self.render_map(session);
        self.render_panel(session);
        self.render_log(session);

        if session.phase == Phase::GameOver {
            self.render_center_banner("You died. Press R to restart or Q to quit.", RED);
        }
    }

    fn is_flashed(&self, pos: Position) -> bool {
        self.flashes.iter().any(|f| f.position == pos)
    }

    fn render_map(&self, session: &Session) {
        let grid = &session.grid;
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let pos = Position::new(x, y);
                let (glyph, color) = self.cell_appearance(session, pos);

                let px = self.margin + x as f32 * self.tile_size;
                let py = self.margin + y as f32 * self.tile_size;
                draw_text(
                    &glyph.to_string(),
                    px + 6.0,
                    py + self.tile_size - 6.0,
                    self.tile_size,
                    color,
                );
            }
        }
    }

    /// Glyph and color for one map cell: entities over tiles, hit flashes
    /// over everything.
    fn cell_appearance(&self, session: &Session, pos: Position) -> (char, Color) {
        let flashed = self.is_flashed(pos);

        if session.player.position() == pos {
            let color = if flashed { RED } else { GREEN };
            return ('@', color);
        }

        if let Some(enemy) = session.enemy_at(pos) {
            let base = match enemy.kind.glyph() {
                'G' => RED,
                _ => YELLOW,
            };
            let color = if flashed { MAGENTA } else { base };
            return (enemy.kind.glyph(), color);
        }

        let tile = session.tile_at(pos);
        let color = if tile.is_passable() { DARKGRAY } else { GRAY };
        (tile.glyph(), color)
    }

    fn render_panel(&self, session: &Session) {
        let x = self.margin + session.grid.width() as f32 * self.tile_size + 24.0;
        let mut y = self.margin + 20.0;
        let line = 22.0;

        draw_text(&format!("Level: {}", session.level), x, y, 24.0, SKYBLUE);
        y += line * 1.5;

        // HP bar
        let player = &session.player;
        draw_text(
            &format!("HP: {}/{}", player.hp.max(0), player.max_hp),
            x,
            y,
            22.0,
            WHITE,
        );
        y += 10.0;
        let bar_width = self.panel_width - 60.0;
        let ratio = (player.hp.max(0) as f32 / player.max_hp as f32).clamp(0.0, 1.0);
        draw_rectangle(x, y, bar_width, 12.0, DARKGRAY);
        draw_rectangle(x, y, bar_width * ratio, 12.0, GREEN);
        y += line * 1.5;

        draw_text(&format!("Attack: {}", player.attack), x, y, 22.0, WHITE);
        y += line;
        draw_text(&format!("Gold: {}", player.gold), x, y, 22.0, WHITE);
        y += line * 1.5;

        draw_text("Enemies:", x, y, 22.0, WHITE);
        y += line;
        if session.enemies.is_empty() {
            draw_text("(none)", x, y, 20.0, GRAY);
            y += line;
        } else {
            for enemy in session.enemies.iter().take(ROSTER_ROWS) {
                let color = if enemy.kind.glyph() == 'G' { RED } else { YELLOW };
                draw_text(
                    &format!(
                        "{} {} ({}/{})",
                        enemy.kind.glyph(),
                        enemy.name(),
                        enemy.hp,
                        enemy.max_hp
                    ),
                    x,
                    y,
                    20.0,
                    color,
                );
                y += line;
            }
            if session.enemies.len() > ROSTER_ROWS {
                draw_text(
                    &format!("+ {} more...", session.enemies.len() - ROSTER_ROWS),
                    x,
                    y,
                    20.0,
                    GRAY,
                );
                y += line;
            }
        }
        y += line;

        draw_text("Move: arrows / WASD / HJKL", x, y, 18.0, GRAY);
        y += line;
        draw_text("Next level: N (when clear)", x, y, 18.0, GRAY);
        y += line;
        draw_text("Quit: Q / Esc", x, y, 18.0, GRAY);
    }

    fn render_log(&self, session: &Session) {
        let x = self.margin;
        let mut y = self.margin + session.grid.height() as f32 * self.tile_size + 32.0;

        if session.log.is_empty() {
            draw_text("The dungeon is quiet...", x, y, 20.0, GRAY);
            return;
        }

        for entry in session.log.recent(LOG_LINES) {
            draw_text(&entry.text, x, y, 20.0, tone_color(entry.tone));
            y += 22.0;
        }
    }

    fn render_center_banner(&self, text: &str, color: Color) {
        let size = 30.0;
        let dims = measure_text(text, None, size as u16, 1.0);
        let x = (screen_width() - dims.width) / 2.0;
        let y = screen_height() / 2.0;
        draw_rectangle(
            x - 12.0,
            y - dims.height - 12.0,
            dims.width + 24.0,
            dims.height + 28.0,
            Color::new(0.0, 0.0, 0.0, 0.85),
        );
        draw_text(text, x, y, size, color);
    }
}

fn tone_color(tone: MessageTone) -> Color {
    match tone {
        MessageTone::Info => GRAY,
        MessageTone::Good => GREEN,
        MessageTone::Bad => RED,
        MessageTone::Notice => SKYBLUE,
    }
}
