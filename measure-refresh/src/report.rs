//! Timing samples and their summary.

use serde::Serialize;
use std::time::Duration;

/// Durations of the successful refresh runs, in execution order.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingReport {
    resource_type: String,
    samples: Vec<Duration>,
}

/// Serialized form of a [`TimingReport`], all durations in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingSummary {
    pub resource_type: String,
    pub runs: usize,
    pub samples_ms: Vec<f64>,
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

impl TimingReport {
    pub fn new(resource_type: impl Into<String>, samples: Vec<Duration>) -> Self {
        Self {
            resource_type: resource_type.into(),
            samples,
        }
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn samples(&self) -> &[Duration] {
        &self.samples
    }

    pub fn runs(&self) -> usize {
        self.samples.len()
    }

    /// Arithmetic mean; zero when there are no samples.
    pub fn mean(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.samples.iter().sum();
        total / self.samples.len() as u32
    }

    pub fn mean_millis(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().copied().map(millis).sum::<f64>() / self.samples.len() as f64
    }

    pub fn min(&self) -> Duration {
        self.samples.iter().min().copied().unwrap_or_default()
    }

    pub fn max(&self) -> Duration {
        self.samples.iter().max().copied().unwrap_or_default()
    }

    pub fn summary(&self) -> TimingSummary {
        TimingSummary {
            resource_type: self.resource_type.clone(),
            runs: self.runs(),
            samples_ms: self.samples().iter().copied().map(millis).collect(),
            mean_ms: self.mean_millis(),
            min_ms: millis(self.min()),
            max_ms: millis(self.max()),
        }
    }
}

/// Seconds with millisecond precision, e.g. `12.345`.
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.3}", duration.as_secs_f64())
}
