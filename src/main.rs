mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use pixel_maze::compute::{init_state, step};
use pixel_maze::entities::{Command, Config, Dir, Mode};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

// ── Progress persistence ──────────────────────────────────────────────────────

fn progress_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".pixel_maze_level")
}

/// A missing or unreadable file means "no progress yet" — never an error.
fn load_progress() -> u32 {
    std::fs::read_to_string(progress_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|&level| level >= 1)
        .unwrap_or(1)
}

fn save_progress(level: u32) {
    let _ = std::fs::write(progress_path(), level.to_string());
}

// ── Key bindings ──────────────────────────────────────────────────────────────

/// Translate a key press into a command for the current mode.
fn command_for(mode: Mode, code: KeyCode) -> Option<Command> {
    match mode {
        Mode::Menu => match code {
            KeyCode::Up => Some(Command::MenuUp),
            KeyCode::Down => Some(Command::MenuDown),
            KeyCode::Enter => Some(Command::MenuSelect),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
            _ => None,
        },
        Mode::Instructions => match code {
            KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Esc => Some(Command::Back),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
            _ => None,
        },
        Mode::Playing => match code {
            KeyCode::Up => Some(Command::Move(Dir::Up)),
            KeyCode::Down => Some(Command::Move(Dir::Down)),
            KeyCode::Left => Some(Command::Move(Dir::Left)),
            KeyCode::Right => Some(Command::Move(Dir::Right)),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
            KeyCode::Char('i') | KeyCode::Char('I') => Some(Command::Invisibility),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
            _ => None,
        },
        Mode::GameOver => match code {
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('e') | KeyCode::Esc => {
                Some(Command::Quit)
            }
            _ => None,
        },
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let started = Instant::now();

    let mut highest = load_progress();
    let mut state = init_state(Config::default(), highest, 0.0, &mut rng);

    loop {
        let frame_start = Instant::now();

        // Drain all pending input events (non-blocking) into commands.
        let mut commands = Vec::new();
        while let Ok(Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        })) = rx.try_recv()
        {
            if !matches!(kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                continue;
            }
            if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                commands.push(Command::Quit);
                continue;
            }
            // Key repeat only auto-fires movement, not one-shot actions.
            if kind == KeyEventKind::Repeat
                && !matches!(
                    code,
                    KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right
                )
            {
                continue;
            }
            if let Some(command) = command_for(state.mode, code) {
                commands.push(command);
            }
        }

        let now = started.elapsed().as_secs_f64();
        state = step(&state, now, &commands, &mut rng);

        // Persist progress only when the level counter goes up.
        if state.current_level > highest {
            highest = state.current_level;
            save_progress(highest);
        }

        display::render(out, &state)?;

        if state.quitting {
            return Ok(());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}
