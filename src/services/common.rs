//! Shared indicator vocabulary
//!
//! Severity levels, status labels, now-vs-baseline comparison and the
//! best-effort field extraction every normalizer builds on.

use crate::error::SourceError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Ordered classification shared by every indicator and the whole snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Normal,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }

    /// CSS badge class used by the dashboard
    pub fn badge(&self) -> &'static str {
        match self {
            Severity::Normal => "status-normal",
            Severity::Warning => "status-warning",
            Severity::Danger => "status-danger",
        }
    }

    /// Most severe level of the set, `Normal` for an empty set
    pub fn escalate<I>(levels: I) -> Severity
    where
        I: IntoIterator<Item = Severity>,
    {
        levels.into_iter().max().unwrap_or_default()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity paired with its display text and badge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorStatus {
    #[serde(rename = "status")]
    pub severity: Severity,
    #[serde(rename = "status_text")]
    pub text: String,
    #[serde(rename = "status_badge")]
    pub badge: String,
}

impl IndicatorStatus {
    pub fn new(severity: Severity, text: &str) -> Self {
        Self {
            severity,
            text: text.to_string(),
            badge: severity.badge().to_string(),
        }
    }
}

/// Direction of a value relative to its baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    #[serde(rename = "dyn-up")]
    Up,
    #[serde(rename = "dyn-down")]
    Down,
    #[serde(rename = "dyn-flat")]
    Flat,
}

/// Now-vs-baseline figures for the comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonStats {
    pub current: f64,
    pub average: f64,
    pub delta: f64,
    pub percent: i64,
    pub trend_symbol: String,
    pub trend_class: Trend,
}

impl ComparisonStats {
    /// Compare `current` against a fixed `average`.
    ///
    /// The delta is rounded to one decimal before the percentage is taken.
    /// A zero (or non-finite) baseline yields a flat trend.
    pub fn compute(current: f64, average: f64) -> Self {
        let delta = round_to(current - average, 1);

        let (percent, trend) = if average == 0.0 || !average.is_finite() || !delta.is_finite() {
            (0, Trend::Flat)
        } else {
            let percent = (delta / average * 100.0).round() as i64;
            let trend = if delta > 0.0 {
                Trend::Up
            } else if delta < 0.0 {
                Trend::Down
            } else {
                Trend::Flat
            };
            (percent, trend)
        };

        let trend_symbol = match trend {
            Trend::Up => format!("▲ +{}%", percent),
            Trend::Down => format!("▼ {}%", percent),
            Trend::Flat => "◆ 0%".to_string(),
        };

        Self {
            current,
            average,
            delta,
            percent,
            trend_symbol,
            trend_class: trend,
        }
    }
}

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Text form of a measured value, always carrying a fractional part
/// (`5` renders as `5.0`, `4.12` stays `4.12`)
pub fn float_text(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

/// Most recent sample of an upstream series
pub(crate) fn latest(samples: Option<&[Value]>) -> Option<&Value> {
    samples.and_then(|s| s.last())
}

/// The trailing `window` samples of a series
pub(crate) fn recent(samples: &[Value], window: usize) -> &[Value] {
    &samples[samples.len().saturating_sub(window)..]
}

/// Numeric field of a sample.
///
/// Accepts JSON numbers and numeric strings. Absent, null or unparseable
/// fields are logged at debug level and yield `None`.
pub(crate) fn number(sample: &Value, field: &'static str, source: &'static str) -> Option<f64> {
    let parsed = match sample.get(field) {
        None | Some(Value::Null) => Err(SourceError::FieldMissing(field)),
        Some(value) => coerce_f64(value)
            .ok_or_else(|| SourceError::Decode(format!("{} is not numeric: {}", field, value))),
    };

    match parsed {
        Ok(n) => Some(n),
        Err(e) => {
            debug!(source, "{}: {}", source, e);
            None
        }
    }
}

/// Numeric field of a sample without diagnostics, for bulk history extraction
pub(crate) fn number_quiet(sample: &Value, field: &str) -> Option<f64> {
    sample.get(field).and_then(coerce_f64)
}

/// Text field of a sample
pub(crate) fn text<'a>(sample: &'a Value, field: &'static str, source: &'static str) -> Option<&'a str> {
    match sample.get(field).and_then(Value::as_str) {
        Some(s) => Some(s),
        None => {
            debug!(source, "{}: {}", source, SourceError::FieldMissing(field));
            None
        }
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|n: &f64| n.is_finite())
}
