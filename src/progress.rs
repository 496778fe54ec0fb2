//! Cumulative learning progress: every answered round bumps the attempt
//! counter, correct ones also bump the hit counter. Both only ever grow;
//! the success rate is derived, never stored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub total_correct: u64,
    pub total_attempts: u64,
}

impl Progress {
    pub fn record(&mut self, correct: bool) {
        self.total_attempts += 1;
        if correct {
            self.total_correct += 1;
        }
    }

    /// Percentage of correct answers, rounded; 0 before any attempt.
    pub fn success_rate(&self) -> u32 {
        if self.total_attempts == 0 {
            return 0;
        }
        ((self.total_correct as f64 / self.total_attempts as f64) * 100.0).round() as u32
    }
}

/// Label shown for a learning level in the family panel.
pub fn level_label(level: u8) -> &'static str {
    match level {
        2 => "Intermedio",
        3 => "Avanzado",
        _ => "Principiante",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_only_grow() {
        let mut progress = Progress::default();
        progress.record(true);
        progress.record(false);
        progress.record(true);
        assert_eq!(progress.total_attempts, 3);
        assert_eq!(progress.total_correct, 2);
    }

    #[test]
    fn success_rate_rounds_and_handles_zero() {
        assert_eq!(Progress::default().success_rate(), 0);
        let progress = Progress { total_correct: 2, total_attempts: 3 };
        assert_eq!(progress.success_rate(), 67);
    }

    #[test]
    fn level_labels() {
        assert_eq!(level_label(1), "Principiante");
        assert_eq!(level_label(2), "Intermedio");
        assert_eq!(level_label(3), "Avanzado");
        assert_eq!(level_label(9), "Principiante");
    }
}
