//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! world or menu.  No game logic is performed; this module only translates
//! state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use street_puncher::compute::pulse::PulseAndTilt;
use street_puncher::compute::World;
use street_puncher::entities::{Enemy, Facing, GameStatus};
use street_puncher::menu::{MenuScreen, StartMenu};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_FIST: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_ENEMY: [Color; 3] = [Color::Green, Color::Red, Color::Magenta];

/// Backdrop tint and fill glyph per background slot.
const BACKDROPS: [(Color, char); 4] = [
    (Color::DarkGrey, '▓'),
    (Color::DarkCyan, '≈'),
    (Color::DarkYellow, '▒'),
    (Color::DarkMagenta, '░'),
];

// ── Screen geometry ───────────────────────────────────────────────────────────

/// Maps world x to terminal columns so the spawn edges sit near the walls.
struct Viewport {
    centre: f32,
    cols_per_unit: f32,
    width: u16,
    ground: u16,
}

impl Viewport {
    fn new(world: &World, width: u16, height: u16) -> Self {
        let half = (width as f32 / 2.0 - 3.0).max(1.0);
        Viewport {
            centre: width as f32 / 2.0,
            cols_per_unit: half / (world.config.spawn_offset + 1.0),
            width,
            ground: height.saturating_sub(4),
        }
    }

    /// Terminal column for `x`, or `None` when it falls outside the walls.
    fn column(&self, x: f32) -> Option<u16> {
        let col = (self.centre + x * self.cols_per_unit).round();
        if col >= 1.0 && col < self.width as f32 - 1.0 {
            Some(col as u16)
        } else {
            None
        }
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete game frame.
pub fn render<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(world, width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_backdrop(out, world, &view, height)?;
    draw_border(out, width, height)?;
    draw_hud(out, world, width)?;

    for enemy in world.enemies() {
        draw_enemy(out, enemy, &view)?;
    }
    draw_player(out, world, &view)?;
    draw_controls_hint(out, height)?;

    if world.status == GameStatus::GameOver {
        draw_game_over(out, world, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Render the start menu.  `t` drives the title animation.
pub fn render_menu<W: Write>(
    out: &mut W,
    menu: &StartMenu,
    pulse: &PulseAndTilt,
    high_score: u32,
    t: f32,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    // Title: tilt shifts it sideways, pulse pads it with stars.
    let stars = ((pulse.scale(t) - 1.0) * 30.0).round().max(0.0) as usize + 1;
    let title = format!("{0}  STREET  PUNCHER  {0}", "★".repeat(stars));
    let shift = (pulse.tilt(t) / pulse.tilt_amount.max(f32::EPSILON) * 2.0).round() as i32;
    let col = (cx as i32 - title.chars().count() as i32 / 2 + shift).max(0) as u16;
    out.queue(cursor::MoveTo(col, cy.saturating_sub(6)))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(&title))?;

    if high_score > 0 {
        let hs_str = format!("High Score: {}", high_score);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(hs_str.chars().count() as u16 / 2),
            cy.saturating_sub(4),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&hs_str))?;
    }

    let options: &[(&str, &str, Color)] = match menu.screen() {
        MenuScreen::Main => &[
            ("ENTER", "Start", Color::Green),
            ("S", "Settings", Color::Yellow),
            ("Q", "Quit", Color::Red),
        ],
        MenuScreen::Settings => &[
            ("← →", "Volume", Color::Yellow),
            ("B", "Back", Color::Green),
        ],
    };
    for (i, (key, label, color)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(10), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{:^5}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*label))?;
    }

    if menu.screen() == MenuScreen::Settings {
        let filled = (menu.volume() * 10.0).round() as usize;
        let bar = format!(
            "[{}{}] {:>3.0}%  {:>6.1} dB",
            "█".repeat(filled),
            " ".repeat(10 - filled.min(10)),
            menu.volume() * 100.0,
            menu.decibels()
        );
        out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 2))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(bar))?;
    } else {
        out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 3))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print("← / A : Punch left    → / D : Punch right"))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Backdrop ──────────────────────────────────────────────────────────────────

fn draw_backdrop<W: Write>(
    out: &mut W,
    world: &World,
    view: &Viewport,
    height: u16,
) -> std::io::Result<()> {
    let Some(bg) = world.background() else {
        return Ok(());
    };
    if bg.backgrounds.is_empty() {
        return Ok(());
    }
    let (color, fill) = BACKDROPS[bg.index % BACKDROPS.len()];
    out.queue(style::SetForegroundColor(color))?;

    // A jagged skyline that differs per background.
    let top = 3u16;
    let bottom = view.ground.saturating_sub(2);
    for col in 1..view.width.saturating_sub(1) {
        let tall = ((col as usize * 7 + bg.index * 13) % 5) as u16;
        let start = (top + 4).saturating_sub(tall).max(top);
        for row in start..bottom {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(fill))?;
        }
    }

    // Street line under everyone's feet
    let street = view.ground + 1;
    if street < height.saturating_sub(2) {
        out.queue(cursor::MoveTo(1, street))?;
        out.queue(Print("═".repeat(view.width.saturating_sub(2) as usize)))?;
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World, width: u16) -> std::io::Result<()> {
    // Score and high score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>5}  High Score:{:>5}",
        world.score.current(),
        world.score.high_score()
    )))?;

    // Stage, centre
    if let Some(name) = world.background().and_then(|bg| bg.current()) {
        let stage = format!("[ {} ]", name.to_uppercase());
        let sx = (width / 2).saturating_sub(stage.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(sx, 0))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(&stage))?;
    }

    // Hearts on the right; lost hearts are drawn hollow
    let hurtbox = &world.player.hurtbox;
    let lost = hurtbox.max_health.saturating_sub(hurtbox.health) as usize;
    let hearts = format!(
        "Lives:{}{}",
        "♥".repeat(hurtbox.health as usize),
        "♡".repeat(lost)
    );
    let rx = width.saturating_sub(hearts.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&hearts))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols), fist extends toward `facing` while punching:
    //    O        ← row ground-1
    //   /|\──●    ← row ground
    let Some(col) = view.column(0.0) else {
        return Ok(());
    };
    let punch = &world.player.punch;

    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(col, view.ground.saturating_sub(1)))?;
    out.queue(Print("O"))?;

    let body = match (punch.is_active(), punch.facing) {
        (false, Facing::Right) => "/|>",
        (false, Facing::Left) => "<|\\",
        (true, _) => "/|\\",
    };
    out.queue(cursor::MoveTo(col.saturating_sub(1), view.ground))?;
    out.queue(Print(body))?;

    if let Some((from, to)) = punch.hitbox(world.config.punch_reach) {
        let (arm, anchor) = match punch.facing {
            Facing::Right => ("──●", view.column(from).map(|c| c + 2)),
            Facing::Left => ("●──", view.column(to).map(|c| c.saturating_sub(4))),
        };
        if let Some(c) = anchor {
            out.queue(cursor::MoveTo(c, view.ground))?;
            out.queue(style::SetForegroundColor(C_FIST))?;
            out.queue(Print(arm))?;
        }
    }

    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, view: &Viewport) -> std::io::Result<()> {
    let Some(col) = view.column(enemy.x) else {
        return Ok(());
    };
    // Arrow marks the walking direction
    let sprite = if enemy.velocity < 0.0 {
        format!("<{}", enemy.glyph)
    } else {
        format!("{}>", enemy.glyph)
    };
    let lx = col.saturating_sub(sprite.chars().count() as u16 / 2).max(1);

    out.queue(style::SetForegroundColor(C_ENEMY[enemy.variant % C_ENEMY.len()]))?;
    out.queue(cursor::MoveTo(lx, view.ground))?;
    out.queue(Print(sprite))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← / A : Punch left   → / D : Punch right   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    world: &World,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let score = world.score.current();
    let best = world.score.high_score();
    let new_best = score >= best && score > 0;

    let score_line = format!("Final Score: {:>5}", score);
    let best_line = if new_best {
        format!("★ NEW BEST: {:>5} ★", best)
    } else {
        format!("High Score:  {:>5}", best)
    };

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║     KNOCKED OUT    ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };

    let cx = width / 2;
    let total_rows = lines.len() + 3; // 3 box lines + score + best + hint
    let start_row = (height / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let best_row = score_row + 1;
    let col = cx.saturating_sub(best_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, best_row))?;
    out.queue(style::SetForegroundColor(best_color))?;
    out.queue(Print(&best_line))?;

    let hint = "R - Restart  M - Menu  Q - Quit";
    let hint_row = best_row + 1;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
