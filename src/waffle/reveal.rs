//! Reveal animation sequencing.
//!
//! A click fixes the guess. The cells between the guess and the true answer
//! are then recolored one at a time, walking outwards from the guess, and the
//! caption number counts along until it settles on the answer.

use log::debug;
use serde::Serialize;

use crate::config::TimingConfig;

/// One recolor step of a reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevealStep {
    /// Cell being recolored
    pub cell: usize,
    /// True if the cell turns to the highlight color, false for base
    pub highlight: bool,
    /// Absolute start time of the transition
    pub starts_at_ms: u64,
    /// Absolute end time of the transition; the caption updates here
    pub ends_at_ms: u64,
    /// Highlighted-cell count shown once this step ends
    pub caption: usize,
}

/// Direction of a reveal relative to the guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealDirection {
    /// Guessed too many: highlighted cells are taken back
    Shrink,
    /// Guessed too few: more cells are highlighted
    Grow,
    /// Guessed right: nothing moves
    Exact,
}

/// Planned reveal for one panel, advanced by the caller's clock.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealAnimation {
    pub guess: usize,
    pub answer: usize,
    pub started_at_ms: u64,
    steps: Vec<RevealStep>,
    applied: usize,
}

impl RevealAnimation {
    /// Plan the reveal from a 0-based `guess` cell to `answer` highlighted
    /// cells, starting at `started_at_ms`.
    ///
    /// With a guess of cell `g` the preview highlights `g + 1` cells. For an
    /// over-guess cells `g, g-1, .., answer` return to base; for an
    /// under-guess cells `g+1, .., answer-1` are highlighted. A step `d` cells
    /// away from the guess starts `d * interval` after the click.
    pub fn plan(guess: usize, answer: usize, timing: &TimingConfig, started_at_ms: u64) -> Self {
        let interval = timing.step_interval_ms;
        let duration = timing.step_duration_ms;
        let shown = guess + 1;

        let step = |cell: usize, distance: usize, highlight: bool, caption: usize| {
            // Saturate so that clocks near u64::MAX keep steps in order.
            let starts_at_ms = started_at_ms.saturating_add(interval.saturating_mul(distance as u64));
            RevealStep {
                cell,
                highlight,
                starts_at_ms,
                ends_at_ms: starts_at_ms.saturating_add(duration),
                caption,
            }
        };

        let steps: Vec<RevealStep> = if shown > answer {
            (answer..=guess)
                .rev()
                .map(|cell| step(cell, guess - cell, false, cell))
                .collect()
        } else if shown < answer {
            (shown..answer)
                .map(|cell| step(cell, cell - guess, true, cell + 1))
                .collect()
        } else {
            Vec::new()
        };

        debug!(
            "planned reveal guess={} answer={} steps={}",
            shown,
            answer,
            steps.len()
        );

        RevealAnimation {
            guess,
            answer,
            started_at_ms,
            steps,
            applied: 0,
        }
    }

    pub fn direction(&self) -> RevealDirection {
        let shown = self.guess + 1;
        if shown > self.answer {
            RevealDirection::Shrink
        } else if shown < self.answer {
            RevealDirection::Grow
        } else {
            RevealDirection::Exact
        }
    }

    pub fn steps(&self) -> &[RevealStep] {
        &self.steps
    }

    /// Steps that have completed by `now_ms` and were not returned before,
    /// in order. Each step is returned exactly once.
    pub fn due(&mut self, now_ms: u64) -> &[RevealStep] {
        let start = self.applied;
        let end = start
            + self.steps[start..]
                .iter()
                .take_while(|s| s.ends_at_ms <= now_ms)
                .count();
        self.applied = end;
        &self.steps[start..end]
    }

    pub fn is_finished(&self) -> bool {
        self.applied == self.steps.len()
    }

    /// Time at which the last step completes.
    pub fn finish_time_ms(&self) -> u64 {
        self.steps
            .last()
            .map(|s| s.ends_at_ms)
            .unwrap_or(self.started_at_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> TimingConfig {
        TimingConfig::default()
    }

    #[test]
    fn test_over_guess_walks_down_to_answer() {
        // Guessed 15 people (cell 14), answer is 11.
        let anim = RevealAnimation::plan(14, 11, &timing(), 0);
        assert_eq!(anim.direction(), RevealDirection::Shrink);
        let cells: Vec<usize> = anim.steps().iter().map(|s| s.cell).collect();
        assert_eq!(cells, vec![14, 13, 12, 11]);
        assert!(anim.steps().iter().all(|s| !s.highlight));
        assert_eq!(anim.steps()[0].starts_at_ms, 0);
        assert_eq!(anim.steps()[3].starts_at_ms, 150);
        assert_eq!(anim.steps().last().unwrap().caption, 11);
        assert_eq!(anim.finish_time_ms(), 200);
    }

    #[test]
    fn test_under_guess_walks_up_to_answer() {
        // Guessed 3 people (cell 2), answer is 6.
        let anim = RevealAnimation::plan(2, 6, &timing(), 1000);
        assert_eq!(anim.direction(), RevealDirection::Grow);
        let cells: Vec<usize> = anim.steps().iter().map(|s| s.cell).collect();
        assert_eq!(cells, vec![3, 4, 5]);
        assert!(anim.steps().iter().all(|s| s.highlight));
        assert_eq!(anim.steps()[0].starts_at_ms, 1050);
        let captions: Vec<usize> = anim.steps().iter().map(|s| s.caption).collect();
        assert_eq!(captions, vec![4, 5, 6]);
    }

    #[test]
    fn test_exact_guess_has_no_steps() {
        let anim = RevealAnimation::plan(10, 11, &timing(), 40);
        assert_eq!(anim.direction(), RevealDirection::Exact);
        assert!(anim.steps().is_empty());
        assert!(anim.is_finished());
        assert_eq!(anim.finish_time_ms(), 40);
    }

    #[test]
    fn test_zero_answer_clears_everything() {
        let anim = RevealAnimation::plan(2, 0, &timing(), 0);
        let cells: Vec<usize> = anim.steps().iter().map(|s| s.cell).collect();
        assert_eq!(cells, vec![2, 1, 0]);
        assert_eq!(anim.steps().last().unwrap().caption, 0);
    }

    #[test]
    fn test_last_cell_is_animated() {
        // Full-grid answer: the final cell must be part of the reveal.
        let anim = RevealAnimation::plan(0, 100, &timing(), 0);
        assert_eq!(anim.steps().last().unwrap().cell, 99);
        assert_eq!(anim.steps().last().unwrap().caption, 100);
    }

    #[test]
    fn test_due_returns_each_step_once() {
        let mut anim = RevealAnimation::plan(14, 11, &timing(), 0);
        assert!(anim.due(49).is_empty());
        assert_eq!(anim.due(100).len(), 2);
        assert!(anim.due(100).is_empty());
        assert!(!anim.is_finished());
        assert_eq!(anim.due(10_000).len(), 2);
        assert!(anim.is_finished());
    }

    #[test]
    fn test_step_times_saturate_at_clock_end() {
        let start = u64::MAX - 10;
        let mut anim = RevealAnimation::plan(50, 11, &timing(), start);
        assert_eq!(anim.steps().len(), 40);
        assert_eq!(anim.steps()[0].ends_at_ms, u64::MAX);
        assert!(anim.steps().windows(2).all(|w| w[0].starts_at_ms <= w[1].starts_at_ms));
        assert_eq!(anim.finish_time_ms(), u64::MAX);
        assert!(anim.due(u64::MAX - 1).is_empty());
        assert_eq!(anim.due(u64::MAX).len(), 40);
    }

    #[test]
    fn test_huge_interval_does_not_wrap() {
        let timing = TimingConfig {
            step_interval_ms: u64::MAX / 2,
            step_duration_ms: 50,
        };
        let mut anim = RevealAnimation::plan(50, 11, &timing, 0);
        assert_eq!(anim.steps()[0].ends_at_ms, 50);
        assert_eq!(anim.steps().last().unwrap().starts_at_ms, u64::MAX);
        // Only the first step is due early; the rest wait for the clock.
        assert_eq!(anim.due(1_000).len(), 1);
    }
}
