//! Engine evaluation metrics

use serde::{Deserialize, Serialize};

/// Counters for snapshot evaluations and policy changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metrics {
    /// Snapshots assembled
    snapshots_evaluated: usize,

    /// Forecast hours processed across all snapshots
    hours_processed: usize,

    /// Accepted policy recalibrations
    recalibrations: usize,

    /// Sum of evaluation latencies (for average)
    total_eval_latency_us: u64,

    min_eval_latency_us: u64,

    max_eval_latency_us: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            snapshots_evaluated: 0,
            hours_processed: 0,
            recalibrations: 0,
            total_eval_latency_us: 0,
            min_eval_latency_us: u64::MAX,
            max_eval_latency_us: 0,
        }
    }

    /// Record one snapshot evaluation
    pub fn record_evaluation(&mut self, hours: usize, latency_us: u64) {
        self.snapshots_evaluated += 1;
        self.hours_processed += hours;
        self.total_eval_latency_us += latency_us;
        self.min_eval_latency_us = self.min_eval_latency_us.min(latency_us);
        self.max_eval_latency_us = self.max_eval_latency_us.max(latency_us);
    }

    pub fn record_recalibration(&mut self) {
        self.recalibrations += 1;
    }

    pub fn snapshots_evaluated(&self) -> usize {
        self.snapshots_evaluated
    }

    pub fn hours_processed(&self) -> usize {
        self.hours_processed
    }

    pub fn recalibrations(&self) -> usize {
        self.recalibrations
    }

    /// Average evaluation latency (microseconds)
    pub fn avg_eval_latency_us(&self) -> u64 {
        if self.snapshots_evaluated == 0 {
            0
        } else {
            self.total_eval_latency_us / self.snapshots_evaluated as u64
        }
    }

    pub fn min_eval_latency_us(&self) -> u64 {
        if self.min_eval_latency_us == u64::MAX {
            // No data recorded yet
            0
        } else {
            self.min_eval_latency_us
        }
    }

    pub fn max_eval_latency_us(&self) -> u64 {
        self.max_eval_latency_us
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            snapshots_evaluated: self.snapshots_evaluated,
            hours_processed: self.hours_processed,
            recalibrations: self.recalibrations,
            avg_latency_us: self.avg_eval_latency_us(),
            min_latency_us: self.min_eval_latency_us(),
            max_latency_us: self.max_eval_latency_us(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Metrics summary for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub snapshots_evaluated: usize,
    pub hours_processed: usize,
    pub recalibrations: usize,
    pub avg_latency_us: u64,
    pub min_latency_us: u64,
    pub max_latency_us: u64,
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Engine Metrics:")?;
        writeln!(f, "  Snapshots Evaluated: {}", self.snapshots_evaluated)?;
        writeln!(f, "  Hours Processed:     {}", self.hours_processed)?;
        writeln!(f, "  Recalibrations:      {}", self.recalibrations)?;
        writeln!(f, "\nEvaluation Latency:")?;
        writeln!(f, "  Average:  {} μs", self.avg_latency_us)?;
        writeln!(f, "  Minimum:  {} μs", self.min_latency_us)?;
        writeln!(f, "  Maximum:  {} μs", self.max_latency_us)?;
        Ok(())
    }
}
