//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only translates
//! state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use unicode_width::UnicodeWidthStr;

use pixel_maze::entities::{EnemyKind, GameState, Mode, PowerKind, Pos, MENU_OPTIONS};

/// Terminal columns per maze cell.
const CELL_W: usize = 2;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Cyan;
const C_WALL: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_EXIT: Color = Color::Blue;
const C_SELECTED: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_GAME_OVER: Color = Color::Red;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for the current mode.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.mode {
        Mode::Menu => draw_menu(out, state)?,
        Mode::Instructions => draw_instructions(out)?,
        Mode::Playing => draw_game(out, state)?,
        Mode::GameOver => draw_game_over(out, state)?,
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}

// ── Menu & instructions ───────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(4, 2))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print("★  PIXEL MAZE  ★"))?;

    out.queue(cursor::MoveTo(4, 4))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(format!("Progress: level {}", state.current_level)))?;

    for (idx, option) in MENU_OPTIONS.iter().enumerate() {
        out.queue(cursor::MoveTo(4, 6 + idx as u16))?;
        if idx == state.selected_option {
            out.queue(style::SetForegroundColor(C_SELECTED))?;
            out.queue(Print(format!("> {option}")))?;
        } else {
            out.queue(style::SetForegroundColor(Color::White))?;
            out.queue(Print(format!("  {option}")))?;
        }
    }

    out.queue(cursor::MoveTo(4, 10))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑/↓ select   ENTER confirm   Q quit"))?;
    Ok(())
}

fn draw_instructions<W: Write>(out: &mut W) -> std::io::Result<()> {
    let lines = [
        "INSTRUCTIONS",
        "",
        "Arrow keys : move through the maze",
        "I          : invisibility for 3s (enemies can't catch you)",
        "P          : pause / resume",
        "R          : restart from level 1",
        "",
        "Collect gems (+10), grab powerups, reach the exit",
        "before the clock runs out. Enemies end the run on touch.",
        "",
        "B : back to menu",
    ];
    for (idx, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(4, 2 + idx as u16))?;
        let color = if idx == 0 { C_TITLE } else { Color::White };
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

// ── The playing field ─────────────────────────────────────────────────────────

fn draw_game<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    draw_hud(out, state)?;

    for y in 0..state.grid.rows {
        for x in 0..state.grid.cols {
            let pos = Pos::new(x, y);
            let (glyph, color) = glyph_for(state, pos);
            draw_cell(out, x, y, glyph, color)?;
        }
    }

    if state.paused {
        let row = 1 + state.grid.rows as u16 / 2;
        let col = (state.grid.cols * CELL_W / 2).saturating_sub(4) as u16;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(" PAUSED "))?;
    }

    out.queue(cursor::MoveTo(0, 1 + state.grid.rows as u16))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("arrows move  I invisibility  P pause  R restart  Q quit"))?;
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    let mut hud = format!(
        "Score: {}  Time: {:>2}s  Level: {}",
        state.score,
        state.level_time.ceil() as i64,
        state.current_level
    );
    if state.player.invisible {
        hud.push_str("  [invisible]");
    }
    if state.player.speed_boost {
        hud.push_str("  [boost]");
    }
    out.queue(Print(hud))?;
    Ok(())
}

/// Pick what to show in one cell, entities first, terrain last.
fn glyph_for(state: &GameState, pos: Pos) -> (&'static str, Color) {
    if state.player.pos == pos {
        return if state.player.invisible {
            ("😇", Color::Yellow)
        } else {
            ("😃", Color::Green)
        };
    }
    for enemy in &state.enemies {
        if enemy.pos == pos {
            return match enemy.kind {
                EnemyKind::Wanderer => ("👻", Color::Red),
                EnemyKind::Chaser => ("👹", Color::Magenta),
                EnemyKind::Patrol => ("🤖", Color::Cyan),
            };
        }
    }
    if state.exit == pos {
        return ("🚪", C_EXIT);
    }
    for gem in &state.collectibles {
        if !gem.collected && gem.pos == pos {
            return ("💎", Color::Yellow);
        }
    }
    for power in &state.powerups {
        if !power.collected && power.pos == pos {
            return match power.kind {
                PowerKind::Speed => ("⚡", Color::Cyan),
                PowerKind::Invincibility => ("✨", Color::Yellow),
            };
        }
    }
    if state.grid.is_wall(pos) {
        ("██", C_WALL)
    } else {
        ("  ", Color::Reset)
    }
}

fn draw_cell<W: Write>(
    out: &mut W,
    x: usize,
    y: usize,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo((x * CELL_W) as u16, 1 + y as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    // Emoji widths vary by terminal; pad to the fixed cell width.
    let width = UnicodeWidthStr::width(glyph);
    for _ in width..CELL_W {
        out.queue(Print(' '))?;
    }
    Ok(())
}

// ── Game over ─────────────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(4, 2))?;
    out.queue(style::SetForegroundColor(C_GAME_OVER))?;
    out.queue(Print("GAME OVER"))?;

    out.queue(cursor::MoveTo(4, 4))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(format!("Final score: {}", state.score)))?;
    out.queue(cursor::MoveTo(4, 5))?;
    out.queue(Print(format!("Reached level: {}", state.current_level)))?;

    out.queue(cursor::MoveTo(4, 7))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("R restart   Q quit"))?;
    Ok(())
}
