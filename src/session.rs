//! Per-environment session history
//!
//! Outlives individual episodes and records each finished episode's total
//! reward. Kept in memory only, for inspection and logging.

use serde::Serialize;

/// Episode counter plus the totals of all completed episodes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    episodes: u64,
    rewards: Vec<f64>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new episode, closing out the previous one if there was one
    ///
    /// Returns the total that was appended to the history, if any.
    pub fn begin_episode(&mut self, previous_total: Option<f64>) -> Option<f64> {
        let appended = if self.episodes > 0 { previous_total } else { None };
        if let Some(total) = appended {
            self.rewards.push(total);
        }
        self.episodes += 1;
        appended
    }

    /// Number of episodes started
    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    /// Totals of completed episodes, oldest first
    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// Number of completed episodes
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    /// Most recently completed episode's total
    pub fn last(&self) -> Option<f64> {
        self.rewards.last().copied()
    }

    /// Highest completed episode total
    pub fn best(&self) -> Option<f64> {
        self.rewards.iter().copied().reduce(f64::max)
    }

    /// Mean completed episode total
    pub fn mean(&self) -> Option<f64> {
        if self.rewards.is_empty() {
            return None;
        }
        Some(self.rewards.iter().sum::<f64>() / self.rewards.len() as f64)
    }
}
