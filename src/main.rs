//! Terminal quiz runner (default binary).
//!
//! Owns the game state and the fixed-tick loop: renders via the framebuffer
//! renderer, maps key events to core operations, and drains remote adapter
//! commands so there is exactly one writer of core state.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use nerve_sort::adapter::{apply_command, Adapter, OutboundMessage};
use nerve_sort::core::{entropy_seed, GameState};
use nerve_sort::engine;
use nerve_sort::input::{handle_key_event, should_quit};
use nerve_sort::term::{Flash, QuizView, Screen, TerminalRenderer, Viewport};
use nerve_sort::types::{GamePhase, QuizAction, FEEDBACK_FLASH_MS, RESULTS_DELAY_MS, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Transient UI timers owned by the loop, not the core.
#[derive(Default)]
struct UiTimers {
    flash: Option<Flash>,
    flash_ms: u32,
    results_hold_ms: u32,
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut game_state = GameState::new(entropy_seed());
    let view = QuizView::default();
    let mut adapter = Adapter::start_from_env();
    let mut timers = UiTimers::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render. The board stays up briefly after the last placement so the
        // final feedback is visible before the results screen.
        let screen = match game_state.phase() {
            GamePhase::Complete if timers.results_hold_ms > 0 => Screen::Board,
            phase => Screen::for_phase(phase),
        };
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render_screen(
            &game_state,
            Viewport::new(w, h),
            timers.flash.as_ref(),
            screen,
        );
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        apply_action(&mut game_state, action, &mut timers);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            if let Some(adapter) = adapter.as_mut() {
                while let Some(cmd) = adapter.try_recv() {
                    let reply = apply_command(&mut game_state, &cmd);
                    if let Ok(line) = serde_json::to_string(&reply) {
                        adapter.send(OutboundMessage::ToClient {
                            client_id: cmd.client_id,
                            line,
                        });
                    }
                }
            }

            if timers.flash_ms > 0 {
                timers.flash_ms = timers.flash_ms.saturating_sub(TICK_MS);
                if timers.flash_ms == 0 {
                    timers.flash = None;
                }
            }
            if timers.results_hold_ms > 0 {
                timers.results_hold_ms = timers.results_hold_ms.saturating_sub(TICK_MS);
            }
        }
    }
}

fn apply_action(state: &mut GameState, action: QuizAction, timers: &mut UiTimers) {
    match (state.phase(), action) {
        (GamePhase::NotStarted | GamePhase::Complete, QuizAction::Start) => {
            state.start();
            *timers = UiTimers::default();
        }
        (GamePhase::InProgress, QuizAction::SelectNext) => {
            engine::select_next(state);
        }
        (GamePhase::InProgress, QuizAction::SelectPrev) => {
            engine::select_prev(state);
        }
        (GamePhase::InProgress, QuizAction::ClearSelection) => {
            state.select(None);
        }
        (GamePhase::InProgress, QuizAction::Place(nerve)) => {
            let Some(selected) = state.selected_muscle().copied() else {
                return;
            };
            if let Ok(outcome) = engine::place_selected(state, nerve) {
                timers.flash = Some(Flash {
                    muscle_id: selected.id,
                    name: selected.name,
                    correct: outcome.correct,
                    nerve: outcome.nerve,
                    subdivision: outcome.subdivision,
                });
                timers.flash_ms = FEEDBACK_FLASH_MS;
                if state.phase() == GamePhase::Complete {
                    timers.results_hold_ms = RESULTS_DELAY_MS;
                }
            }
        }
        // Stale or out-of-phase gestures are ignored.
        _ => {}
    }
}
