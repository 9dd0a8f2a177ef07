//! QuizView: maps `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{score, share_line, GameState, NERVE_INFO};
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GamePhase, Nerve, Subdivision};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Transient placement feedback. Owned and timed by the runner; the core
/// only reports the outcome once, synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    pub muscle_id: &'static str,
    pub name: &'static str,
    pub correct: bool,
    pub nerve: Nerve,
    pub subdivision: Option<Subdivision>,
}

const ACCENT: Rgb = Rgb::new(20, 184, 166);
const TEXT_DIM: Rgb = Rgb::new(148, 163, 184);
const CORRECT: Rgb = Rgb::new(34, 197, 94);
const INCORRECT: Rgb = Rgb::new(239, 68, 68);

fn nerve_color(nerve: Nerve) -> Rgb {
    match nerve {
        Nerve::Median => Rgb::new(34, 211, 238),
        Nerve::Ulnar => Rgb::new(167, 139, 250),
        Nerve::Radial => Rgb::new(245, 158, 11),
    }
}

/// Which screen to draw. Normally derived from the phase; the runner keeps
/// the board visible briefly after the last placement before switching to
/// the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Intro,
    Board,
    Results,
}

impl Screen {
    pub fn for_phase(phase: GamePhase) -> Self {
        match phase {
            GamePhase::NotStarted => Screen::Intro,
            GamePhase::InProgress => Screen::Board,
            GamePhase::Complete => Screen::Results,
        }
    }
}

/// A lightweight terminal renderer for the quiz.
pub struct QuizView {
    /// Columns between nerve columns.
    column_gap: u16,
}

impl Default for QuizView {
    fn default() -> Self {
        Self { column_gap: 2 }
    }
}

impl QuizView {
    pub fn new(column_gap: u16) -> Self {
        Self { column_gap }
    }

    /// Render the current game state into a framebuffer.
    pub fn render(&self, state: &GameState, viewport: Viewport, flash: Option<&Flash>) -> FrameBuffer {
        self.render_screen(state, viewport, flash, Screen::for_phase(state.phase()))
    }

    /// Render a specific screen regardless of the phase.
    pub fn render_screen(
        &self,
        state: &GameState,
        viewport: Viewport,
        flash: Option<&Flash>,
        screen: Screen,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        match screen {
            Screen::Intro => self.draw_intro(&mut fb),
            Screen::Board => self.draw_board(&mut fb, state, flash),
            Screen::Results => self.draw_results(&mut fb, state),
        }

        fb
    }

    fn draw_intro(&self, fb: &mut FrameBuffer) {
        let w = fb.width();
        let mut y = fb.height() / 4;

        let title = CellStyle::fg(ACCENT).bold();
        let text = CellStyle::default();
        let dim = CellStyle::fg(TEXT_DIM);

        fb.put_str_centered(0, y, w, "HAND NERD DETECTOR", title);
        y += 2;
        fb.put_str_centered(
            0,
            y,
            w,
            "Do you know the innervation of every muscle of the hand?",
            text,
        );
        y += 1;
        fb.put_str_centered(0, y, w, "Here's a lil test to find out.", text);
        y += 2;

        fb.put_str_centered(0, y, w, "How to Play", CellStyle::fg(ACCENT));
        y += 1;
        fb.put_str_centered(
            0,
            y,
            w,
            "Pick a muscle card with Left/Right, then press a column key:",
            dim,
        );
        y += 1;
        fb.put_str_centered(0, y, w, "1 Median    2 Ulnar    3 Radial", dim);
        y += 1;
        fb.put_str_centered(
            0,
            y,
            w,
            "You'll get immediate feedback on each placement",
            dim,
        );
        y += 2;

        fb.put_str_centered(0, y, w, "Press Enter to scrub in", title);
        y += 1;
        fb.put_str_centered(0, y, w, "q quits", dim);
    }

    fn draw_board(&self, fb: &mut FrameBuffer, state: &GameState, flash: Option<&Flash>) {
        let w = fb.width();
        let h = fb.height();
        let dim = CellStyle::fg(TEXT_DIM);

        fb.put_str(1, 0, "Hand Nerd Detector", CellStyle::fg(ACCENT).bold());
        let remaining = format!("{} remaining", state.pending().len());
        let rx = w.saturating_sub(remaining.chars().count() as u16 + 1);
        fb.put_str(rx, 0, &remaining, dim);

        // Three nerve columns.
        let gaps = self.column_gap * 2;
        let col_w = w.saturating_sub(gaps).max(3) / 3;
        let col_top: u16 = 2;
        let col_bottom = h.saturating_sub(5);

        for (i, info) in NERVE_INFO.iter().enumerate() {
            let x = (i as u16) * (col_w + self.column_gap);
            self.draw_column(fb, state, flash, info.nerve, x, col_top, col_w, col_bottom);
        }

        // Bottom strip: deck, selection and feedback.
        let strip = h.saturating_sub(4);
        fb.hline(0, strip, w, '─', dim);

        match state.selected_muscle() {
            Some(m) => {
                let card = format!("▶ {}", m.name);
                fb.put_str(1, strip + 1, &card, CellStyle::fg(ACCENT).bold());
            }
            None => {
                fb.put_str(
                    1,
                    strip + 1,
                    "(no card selected — press Left/Right)",
                    dim,
                );
            }
        }

        if let Some(flash) = flash {
            let (line, style) = if flash.correct {
                ("✓ Correct!".to_string(), CellStyle::fg(CORRECT).bold())
            } else {
                let sub = flash
                    .subdivision
                    .map(|s| format!(" ({})", s.as_str()))
                    .unwrap_or_default();
                (
                    format!("✗ {} is {}{}", flash.name, flash.nerve.label(), sub),
                    CellStyle::fg(INCORRECT).bold(),
                )
            };
            fb.put_str(1, strip + 2, &line, style);
        }

        fb.put_str(
            1,
            h.saturating_sub(1),
            "←/→ select · 1 median · 2 ulnar · 3 radial · Esc clear · q quit",
            dim,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_column(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        flash: Option<&Flash>,
        nerve: Nerve,
        x: u16,
        top: u16,
        w: u16,
        bottom: u16,
    ) {
        let info = crate::core::nerve_info(nerve);
        let color = nerve_color(nerve);
        let header = CellStyle::fg(color).bold();
        let rule = CellStyle::fg(color).dim();

        let placed: Vec<_> = state
            .placements()
            .iter()
            .filter(|p| p.placed_in == nerve)
            .collect();

        fb.put_str(x, top, info.label, header);
        let badge = format!("{}/{}", placed.len(), info.expected);
        let bx = x + w.saturating_sub(badge.chars().count() as u16);
        fb.put_str(bx, top, &badge, CellStyle::fg(color));
        fb.hline(x, top + 1, w, '─', rule);

        let mut y = top + 2;

        // Main trunk first, then the branch sub-bucket.
        for p in placed.iter().filter(|p| p.muscle.subdivision.is_none()) {
            if y >= bottom {
                return;
            }
            self.draw_placed_item(fb, x, y, w, p, flash);
            y += 1;
        }

        if let Some(sub) = info.subdivision {
            if y + 1 < bottom {
                let tag = format!("─ {} ─", sub.as_str());
                fb.put_str_centered(x, y, w, &tag, rule);
                y += 1;
                fb.put_str_centered(x, y, w, sub.full_name(), CellStyle::fg(color).dim());
                y += 1;
            }
            for p in placed.iter().filter(|p| p.muscle.subdivision.is_some()) {
                if y >= bottom {
                    return;
                }
                self.draw_placed_item(fb, x, y, w, p, flash);
                y += 1;
            }
        }

        if placed.is_empty() && y < bottom {
            fb.put_str_centered(x, y, w, "drop muscles here", CellStyle::fg(TEXT_DIM).dim());
        }
    }

    fn draw_placed_item(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        w: u16,
        p: &crate::core::Placement,
        flash: Option<&Flash>,
    ) {
        let flashing = flash.map(|f| f.muscle_id == p.muscle.id).unwrap_or(false);
        let style = if p.correct {
            CellStyle::fg(CORRECT)
        } else {
            CellStyle::fg(INCORRECT)
        };
        let style = if flashing { style.bold() } else { style };

        let line = if p.correct {
            format!("✓ {}", p.muscle.name)
        } else {
            let sub = p
                .muscle
                .subdivision
                .map(|s| format!(" ({})", s.as_str()))
                .unwrap_or_default();
            format!("✗ {} → {}{}", p.muscle.name, p.muscle.nerve.label(), sub)
        };

        // Clip to the column.
        let clipped: String = line.chars().take(w as usize).collect();
        fb.put_str(x, y, &clipped, style);
    }

    fn draw_results(&self, fb: &mut FrameBuffer, state: &GameState) {
        let w = fb.width();
        let h = fb.height();
        let summary = score(state.placements());
        let dim = CellStyle::fg(TEXT_DIM);

        let mut y: u16 = 1;
        fb.put_str_centered(0, y, w, "HAND NERD DETECTOR", CellStyle::fg(ACCENT).bold());
        y += 2;

        let big = format!("{}%", summary.percent);
        fb.put_str_centered(0, y, w, &big, CellStyle::fg(ACCENT).bold());
        y += 1;
        let frac = format!("{}/{}", summary.correct, summary.total);
        fb.put_str_centered(0, y, w, &frac, dim);
        y += 2;

        let tier = format!("\u{201c}{}\u{201d}", summary.tier.label);
        fb.put_str_centered(0, y, w, &tier, CellStyle::fg(nerve_color(Nerve::Median)).bold());
        y += 1;
        fb.put_str_centered(0, y, w, summary.tier.subtitle, dim);
        y += 2;

        fb.put_str_centered(0, y, w, &share_line(&summary), CellStyle::fg(TEXT_DIM).dim());
        y += 2;

        let incorrect: Vec<_> = state.placements().iter().filter(|p| !p.correct).collect();
        if !incorrect.is_empty() {
            let head = format!("Incorrect ({})", incorrect.len());
            fb.put_str(2, y, &head, CellStyle::fg(INCORRECT).bold());
            y += 1;
            for p in incorrect {
                if y >= h.saturating_sub(2) {
                    break;
                }
                let note = p
                    .muscle
                    .note
                    .map(|n| format!(" ({})", n))
                    .unwrap_or_default();
                let sub = p
                    .muscle
                    .subdivision
                    .map(|s| format!(" ({})", s.as_str()))
                    .unwrap_or_default();
                let line = format!(
                    "• {}{} — {} → {}{}",
                    p.muscle.name,
                    note,
                    p.placed_in.as_str(),
                    p.muscle.nerve.as_str(),
                    sub
                );
                let clipped: String = line.chars().take(w.saturating_sub(4) as usize).collect();
                fb.put_str(4, y, &clipped, CellStyle::fg(INCORRECT));
                y += 1;
            }
            y += 1;
        }

        let correct: Vec<_> = state.placements().iter().filter(|p| p.correct).collect();
        if !correct.is_empty() && y < h.saturating_sub(2) {
            let head = format!("Correct ({})", correct.len());
            fb.put_str(2, y, &head, CellStyle::fg(CORRECT).bold());
            y += 1;

            // Flow names into lines that fit the viewport.
            let max = w.saturating_sub(6) as usize;
            let mut line = String::new();
            for p in correct {
                let name = p.muscle.name;
                if !line.is_empty() && line.chars().count() + name.chars().count() + 3 > max {
                    fb.put_str(4, y, &line, CellStyle::fg(CORRECT));
                    y += 1;
                    line.clear();
                    if y >= h.saturating_sub(2) {
                        break;
                    }
                }
                if !line.is_empty() {
                    line.push_str(" · ");
                }
                line.push_str(name);
            }
            if !line.is_empty() && y < h.saturating_sub(2) {
                fb.put_str(4, y, &line, CellStyle::fg(CORRECT));
            }
        }

        fb.put_str_centered(
            0,
            h.saturating_sub(1),
            w,
            "Enter to play again · q to quit",
            dim,
        );
    }
}
