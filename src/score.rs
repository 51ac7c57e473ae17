//! Cumulative score and per-clear line history.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    lines: Vec<u32>,
    last_bonus: u32,
    total: u32,
}

/// Most recent clear and the running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    pub total: u32,
    pub last_bonus: u32,
    pub last_lines: u32,
}

/// Total and cumulative cleared lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalSummary {
    pub total: u32,
    pub lines: u32,
}

/// Bonus for clearing `lines` rows with one lock: the square of the count.
pub fn bonus_for(lines: u32) -> u32 {
    lines.saturating_mul(lines)
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_lines(&mut self, lines: u32) {
        self.lines.push(lines);
        self.last_bonus = bonus_for(lines);
        self.total = self.total.saturating_add(self.last_bonus);
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn history(&self) -> &[u32] {
        &self.lines
    }

    pub fn total_lines(&self) -> u32 {
        self.lines.iter().sum()
    }

    pub fn current_summary(&self) -> ScoreSummary {
        ScoreSummary {
            total: self.total,
            last_bonus: self.last_bonus,
            last_lines: self.lines.last().copied().unwrap_or(0),
        }
    }

    pub fn final_summary(&self) -> FinalSummary {
        FinalSummary {
            total: self.total,
            lines: self.total_lines(),
        }
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

impl fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score: {} (+{} point{} for {} line{})",
            self.total,
            self.last_bonus,
            plural(self.last_bonus),
            self.last_lines,
            plural(self.last_lines)
        )
    }
}

impl fmt::Display for FinalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Final score: {} ({} resolved line{})",
            self.total,
            self.lines,
            plural(self.lines)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_four_lines_beat_four_singles() {
        let mut tetris = Score::new();
        tetris.add_lines(4);
        let mut singles = Score::new();
        for _ in 0..4 {
            singles.add_lines(1);
        }
        assert_eq!(tetris.total(), 16);
        assert_eq!(singles.total(), 4);
        assert_eq!(singles.total_lines(), tetris.total_lines());
    }

    #[test]
    fn test_summary_text() {
        let mut score = Score::new();
        assert_eq!(
            score.current_summary().to_string(),
            "Score: 0 (+0 points for 0 lines)"
        );
        score.add_lines(1);
        assert_eq!(
            score.current_summary().to_string(),
            "Score: 1 (+1 point for 1 line)"
        );
        score.add_lines(2);
        assert_eq!(
            score.current_summary().to_string(),
            "Score: 5 (+4 points for 2 lines)"
        );
        assert_eq!(
            score.final_summary().to_string(),
            "Final score: 5 (3 resolved lines)"
        );
    }

    proptest! {
        #[test]
        fn total_is_sum_of_squares(clears in prop::collection::vec(1u32..5, 0..40)) {
            let mut score = Score::new();
            for &n in &clears {
                score.add_lines(n);
            }
            prop_assert_eq!(score.total(), clears.iter().map(|n| n * n).sum::<u32>());
            prop_assert_eq!(score.history(), clears.as_slice());
        }
    }
}
