//! Progress reporting for streaming runs.
//!
//! Progress is sampled with a bitmask: row `i` of `n` reports when
//! `i & step == 0`, carrying `i * (step / n)`. With the default step
//! (`0x2FF`) that fires on row 0 and then in bursts aligned to 256-row
//! boundaries, not at an even cadence. The rule is kept as is; callers wanting
//! a final "done" notification emit it themselves.

use rk_common::Result;
use rk_config::DEFAULT_SAMPLING_STEP;
use tracing::info;

/// Receives progress labels such as `"0.0%"`. Called inline; errors abort the run.
pub trait ProgressReporter {
    fn report(&mut self, label: &str) -> Result<()>;
}

impl<R: ProgressReporter + ?Sized> ProgressReporter for &mut R {
    fn report(&mut self, label: &str) -> Result<()> {
        (**self).report(label)
    }
}

/// Bitmask sampling rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSampler {
    step: u64,
}

impl ProgressSampler {
    pub fn new(step: u64) -> Self {
        Self { step }
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn fires(&self, index: usize) -> bool {
        (index as u64) & self.step == 0
    }

    /// `step / total`; the per-row factor of the reported value.
    pub fn coefficient(&self, total: usize) -> f64 {
        self.step as f64 / total as f64
    }

    /// Reported value for row `index` of `total`, if that row reports.
    pub fn sample(&self, index: usize, total: usize) -> Option<f64> {
        if total == 0 || index >= total || !self.fires(index) {
            return None;
        }
        Some(index as f64 * self.coefficient(total))
    }

    /// Indices in `0..total` that report, in increasing order.
    pub fn notification_indices(&self, total: usize) -> impl Iterator<Item = usize> + '_ {
        (0..total).filter(move |&i| self.fires(i))
    }
}

impl Default for ProgressSampler {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLING_STEP)
    }
}

/// Format a progress value as a percentage label.
///
/// Integral values keep one decimal (`0.0%`); others print in full (`383.5%`).
pub fn format_label(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}%", value)
    } else {
        format!("{}%", value)
    }
}

/// Emits each label as an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn report(&mut self, label: &str) -> Result<()> {
        info!(progress = label, "progress");
        Ok(())
    }
}

/// Drops every label.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn report(&mut self, _label: &str) -> Result<()> {
        Ok(())
    }
}

/// Keeps every label it receives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingReporter {
    labels: Vec<String>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Labels parsed back to numbers.
    pub fn values(&self) -> Vec<f64> {
        self.labels
            .iter()
            .filter_map(|l| l.trim_end_matches('%').parse().ok())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&mut self, label: &str) -> Result<()> {
        self.labels.push(label.to_string());
        Ok(())
    }
}
