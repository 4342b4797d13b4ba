mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use display::TerminalView;
use invaders::input::Key;
use invaders::{Flow, GameConfig, GameLoop, KeyTracker};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A steering key counts as released if no press/repeat event for it arrived
/// within this many frames.  Only used on terminals that don't emit
/// key-release events: OS key-repeat runs at ≥ 15 Hz, so a held key refreshes
/// well inside the window (8 frames @ 60 FPS ≈ 133 ms).
const HOLD_WINDOW: u64 = 8;

/// Log file override; defaults to `<temp dir>/invaders.log`.
const LOG_ENV: &str = "INVADERS_LOG";

// ── Logging ───────────────────────────────────────────────────────────────────

/// The screen belongs to the game, so logs go to a file.
fn init_logging() {
    let path = std::env::var_os(LOG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("invaders.log"));

    match File::create(&path) {
        Ok(file) => {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or("info"),
            )
            .target(env_logger::Target::Pipe(Box::new(file)))
            .try_init();
            log::info!("Invaders starting, logging to {}", path.display());
        }
        // Still on the normal screen here, so this stays visible.
        Err(e) => eprintln!(
            "invaders: cannot open log file {}: {e}; logging disabled",
            path.display()
        ),
    }
}

// ── Input mapping ─────────────────────────────────────────────────────────────

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drive the game until the player quits.
///
/// Input model: key events go through a [`KeyTracker`].  With
/// `release_events` (keyboard-enhancement terminals) releases are real and
/// nothing expires; otherwise the steering key expires after `HOLD_WINDOW`
/// frames of silence and every Fire press shoots.  Everything runs on this
/// one thread: events are drained without blocking before each frame.
fn run<W: Write>(
    view: &mut TerminalView<W>,
    config: GameConfig,
    release_events: bool,
) -> std::io::Result<()> {
    let mut game = GameLoop::new(config);
    let mut keys = KeyTracker::new(HOLD_WINDOW, release_events);
    let mut flow = Flow::Continue;
    let mut redraw = true;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => {
                    if kind == KeyEventKind::Press && is_quit(code, modifiers) {
                        log::info!("Quit at frame {}", game.state().frame);
                        return Ok(());
                    }
                    if flow == Flow::Terminal {
                        if kind == KeyEventKind::Press
                            && matches!(code, KeyCode::Char('r') | KeyCode::Char('R'))
                        {
                            log::info!("Restarting");
                            game.restart();
                            keys.clear();
                            flow = Flow::Continue;
                        }
                        continue;
                    }
                    // Unrecognised keys are ignored.
                    let Some(key) = map_key(code) else {
                        continue;
                    };
                    match kind {
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            keys.press(&mut game, key, frame);
                        }
                        KeyEventKind::Release => keys.release(&mut game, key),
                    }
                }
                Event::Resize(cols, rows) => {
                    view.resize(cols, rows);
                    redraw = true;
                }
                _ => {}
            }
        }

        keys.expire(&mut game, frame);

        // A finished game is only redrawn when the terminal changes.
        if flow == Flow::Continue || redraw {
            flow = game.frame(view)?;
            redraw = false;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> invaders::Result<()> {
    init_logging();

    let config = GameConfig::from_env().map_err(|e| {
        log::error!("{e}");
        e
    })?;

    let mut out = stdout();
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = terminal::size().and_then(|(cols, rows)| {
        let mut view = TerminalView::new(BufWriter::new(stdout()), cols, rows);
        run(&mut view, config, keyboard_enhanced)
    });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("terminal I/O failed: {e}");
    }
    Ok(result?)
}
