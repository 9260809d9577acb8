//! Matrix-style text reveal.
//!
//! Each character of the target string gets a display cell. Cells start
//! glitching on a staggered schedule, cycle random symbols from the
//! {'0', '1'} alphabet, and settle on their final character after a
//! fixed glitch duration. The whole animation runs on virtual time: the
//! caller advances it with `tick(now_ms)` and applies the cell states to
//! the DOM (or any other surface) afterwards.

use crate::core::Rng32;
use crate::domain::config::MatrixConfig;

/// Spaces render as a non-breaking blank and never glitch.
pub const BLANK: char = '\u{00A0}';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellPhase {
    /// Waiting for its staggered start time
    Pending,
    Glitching,
    Settled,
}

#[derive(Clone, Debug)]
pub struct MatrixCell {
    target: char,
    display: char,
    phase: CellPhase,
    starts_at: f64,
    settles_at: f64,
    next_glitch_at: f64,
    highlight: bool,
}

impl MatrixCell {
    /// Character currently shown in this cell.
    pub fn display(&self) -> char {
        self.display
    }

    /// Whether the glitch highlight color is active.
    pub fn highlighted(&self) -> bool {
        self.highlight
    }

    pub fn settled(&self) -> bool {
        self.phase == CellPhase::Settled
    }
}

pub struct MatrixReveal {
    cells: Vec<MatrixCell>,
    config: MatrixConfig,
    completion_fired: bool,
}

impl MatrixReveal {
    pub fn new(config: MatrixConfig) -> Self {
        Self {
            cells: Vec::new(),
            config,
            completion_fired: false,
        }
    }

    /// Start revealing `text` at `now_ms`. Any in-flight reveal is
    /// cancelled: its cells (and their pending glitch schedule) are
    /// replaced wholesale.
    pub fn begin(&mut self, text: &str, now_ms: f64) {
        self.completion_fired = false;
        self.cells.clear();

        for (index, target) in text.chars().enumerate() {
            // 1-based stagger: even the first letter holds for one beat
            // before its glitch phase kicks in.
            let starts_at = now_ms + (index as f64 + 1.0) * self.config.letter_interval_ms;
            if target == ' ' {
                // blanks are born settled
                self.cells.push(MatrixCell {
                    target,
                    display: BLANK,
                    phase: CellPhase::Settled,
                    starts_at,
                    settles_at: starts_at,
                    next_glitch_at: f64::INFINITY,
                    highlight: false,
                });
            } else {
                self.cells.push(MatrixCell {
                    target,
                    display: target,
                    phase: CellPhase::Pending,
                    starts_at,
                    settles_at: starts_at + self.config.glitch_duration_ms,
                    next_glitch_at: starts_at,
                    highlight: false,
                });
            }
        }
    }

    pub fn cells(&self) -> &[MatrixCell] {
        &self.cells
    }

    pub fn is_active(&self) -> bool {
        !self.cells.is_empty() && !self.cells.iter().all(MatrixCell::settled)
    }

    /// Advance every cell to `now_ms`. Returns `true` on the single
    /// tick where the last cell has settled (the completion signal).
    pub fn tick(&mut self, now_ms: f64, rng: &mut Rng32) -> bool {
        if self.cells.is_empty() {
            return false;
        }

        for cell in &mut self.cells {
            match cell.phase {
                CellPhase::Settled => {}
                CellPhase::Pending | CellPhase::Glitching => {
                    if now_ms >= cell.settles_at {
                        cell.phase = CellPhase::Settled;
                        cell.display = cell.target;
                        cell.highlight = false;
                    } else if now_ms >= cell.starts_at {
                        cell.phase = CellPhase::Glitching;
                        cell.highlight = true;
                        if now_ms >= cell.next_glitch_at {
                            cell.display = if rng.coin() { '1' } else { '0' };
                            cell.next_glitch_at = now_ms + self.config.glitch_tick_ms;
                        }
                    }
                }
            }
        }

        if !self.completion_fired && self.cells.iter().all(MatrixCell::settled) {
            self.completion_fired = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reveal() -> (MatrixReveal, Rng32) {
        (MatrixReveal::new(MatrixConfig::default()), Rng32::new(99))
    }

    #[test]
    fn cells_glitch_then_settle_in_index_order() {
        let (mut reveal, mut rng) = reveal();
        reveal.begin("OK", 0.0);

        // before the first beat both cells hold their targets
        assert!(!reveal.tick(50.0, &mut rng));
        assert!(!reveal.cells()[0].highlighted());
        assert_eq!(reveal.cells()[0].display(), 'O');

        // cell 0 glitches from 100ms, cell 1 from 200ms
        assert!(!reveal.tick(150.0, &mut rng));
        assert!(reveal.cells()[0].highlighted());
        assert!(matches!(reveal.cells()[0].display(), '0' | '1'));
        assert!(!reveal.cells()[1].highlighted());

        // cell 0 settles at 600ms; cell 1 still glitching
        assert!(!reveal.tick(650.0, &mut rng));
        assert!(reveal.cells()[0].settled());
        assert_eq!(reveal.cells()[0].display(), 'O');
        assert!(!reveal.cells()[1].settled());

        // cell 1 settles at 700ms and fires completion
        assert!(reveal.tick(700.0, &mut rng));
        assert_eq!(reveal.cells()[1].display(), 'K');
        assert!(!reveal.is_active());
    }

    #[test]
    fn completion_fires_exactly_once() {
        let (mut reveal, mut rng) = reveal();
        reveal.begin("OK", 0.0);

        assert!(reveal.tick(1000.0, &mut rng));
        assert!(!reveal.tick(1050.0, &mut rng));
        assert!(!reveal.tick(2000.0, &mut rng));
    }

    #[test]
    fn completion_never_fires_before_last_cell_settles() {
        let (mut reveal, mut rng) = reveal();
        reveal.begin("OK", 0.0);

        let mut t = 0.0;
        while t < 699.0 {
            assert!(!reveal.tick(t, &mut rng));
            t += 16.0;
        }
    }

    #[test]
    fn spaces_are_blank_and_never_glitch() {
        let (mut reveal, mut rng) = reveal();
        reveal.begin("A B", 0.0);

        reveal.tick(150.0, &mut rng);
        let space = &reveal.cells()[1];
        assert_eq!(space.display(), BLANK);
        assert!(space.settled());
        assert!(!space.highlighted());
    }

    #[test]
    fn glitch_symbols_come_from_the_binary_alphabet() {
        let (mut reveal, mut rng) = reveal();
        reveal.begin("X", 0.0);

        let mut t = 100.0;
        while t < 599.0 {
            reveal.tick(t, &mut rng);
            assert!(matches!(reveal.cells()[0].display(), '0' | '1'));
            t += 50.0;
        }
    }

    #[test]
    fn restart_cancels_the_previous_run() {
        let (mut reveal, mut rng) = reveal();
        reveal.begin("LONG TEXT", 0.0);
        reveal.tick(200.0, &mut rng);

        reveal.begin("OK", 1000.0);
        assert_eq!(reveal.cells().len(), 2);
        // old schedule is gone; completion comes from the new run only
        assert!(!reveal.tick(1200.0, &mut rng));
        assert!(reveal.tick(1700.0, &mut rng));
    }

    #[test]
    fn trailing_space_still_completes() {
        let (mut reveal, mut rng) = reveal();
        reveal.begin("A ", 0.0);

        assert!(reveal.tick(600.0, &mut rng));
    }
}
