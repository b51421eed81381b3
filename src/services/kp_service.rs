//! Kp Index Service
//!
//! Planetary geomagnetic index: current value, short forecast and the
//! recent history window.

use crate::services::common::{self, ComparisonStats, IndicatorStatus, Severity};
use crate::sources::{Endpoint, SourceClient};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

const SOURCE: &str = "Kp index";
const FIELD: &str = "kp_index";

const DEFAULT_CURRENT: f64 = 3.3;
const FORECAST_STEP: f64 = 0.2;
const HISTORY_WINDOW: usize = 24;

/// Fixed baseline the current index is compared against
pub const KP_BASELINE: f64 = 3.2;

pub const KP_WARNING: f64 = 5.0;
pub const KP_DANGER: f64 = 7.0;

/// Normalized geomagnetic index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpIndex {
    pub current: f64,
    pub forecast: f64,
    #[serde(flatten)]
    pub status: IndicatorStatus,
    pub history: Vec<f64>,
    pub comparison: ComparisonStats,
}

impl Default for KpIndex {
    fn default() -> Self {
        Self {
            current: DEFAULT_CURRENT,
            forecast: common::round_to(DEFAULT_CURRENT + FORECAST_STEP, 1),
            status: KpService::classify(DEFAULT_CURRENT),
            history: Vec::new(),
            comparison: ComparisonStats::compute(DEFAULT_CURRENT, KP_BASELINE),
        }
    }
}

/// Kp index service
pub struct KpService;

impl KpService {
    /// Fetch and normalize the Kp index feed
    pub async fn collect(client: &SourceClient) -> KpIndex {
        let samples = client.fetch_samples(Endpoint::KpIndex).await;
        Self::normalize(samples.as_deref())
    }

    /// Build a complete result from whatever the feed returned
    pub fn normalize(samples: Option<&[Value]>) -> KpIndex {
        let mut result = KpIndex::default();

        let (Some(all), Some(latest)) = (samples, common::latest(samples)) else {
            return result;
        };

        let current = common::number(latest, FIELD, SOURCE).unwrap_or(DEFAULT_CURRENT);

        result.current = current;
        result.history = common::recent(all, HISTORY_WINDOW)
            .iter()
            .map(|s| common::number_quiet(s, FIELD).unwrap_or(0.0))
            .collect();
        result.forecast = common::round_to(current + FORECAST_STEP, 1);
        result.status = Self::classify(current);
        result.comparison = ComparisonStats::compute(current, KP_BASELINE);

        info!("✅ {}: {} ({})", SOURCE, current, result.status.severity);

        result
    }

    /// Storm classification by index value
    pub fn classify(kp: f64) -> IndicatorStatus {
        if kp >= KP_DANGER {
            IndicatorStatus::new(Severity::Danger, "Сильная буря")
        } else if kp >= KP_WARNING {
            IndicatorStatus::new(Severity::Warning, "Магнитная буря")
        } else {
            IndicatorStatus::new(Severity::Normal, "Спокойно")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn series(values: &[f64]) -> Vec<Value> {
        values
            .iter()
            .map(|v| json!({"time_tag": "2026-10-18T12:00:00", "kp_index": v}))
            .collect()
    }

    #[test]
    fn test_defaults_without_data() {
        let result = KpService::normalize(None);
        assert_eq!(result.current, 3.3);
        assert_eq!(result.forecast, 3.5);
        assert_eq!(result.status.severity, Severity::Normal);
        assert!(result.history.is_empty());

        let empty: Vec<Value> = Vec::new();
        assert_eq!(KpService::normalize(Some(empty.as_slice())), KpIndex::default());
    }

    #[test]
    fn test_severity_boundaries() {
        assert_eq!(KpService::classify(4.9).severity, Severity::Normal);
        assert_eq!(KpService::classify(5.0).severity, Severity::Warning);
        assert_eq!(KpService::classify(6.9).severity, Severity::Warning);
        assert_eq!(KpService::classify(7.0).severity, Severity::Danger);
        assert_eq!(KpService::classify(7.0).text, "Сильная буря");
    }

    #[test]
    fn test_latest_sample_and_forecast() {
        let samples = series(&[2.0, 3.67, 5.33]);
        let result = KpService::normalize(Some(samples.as_slice()));

        assert_eq!(result.current, 5.33);
        assert_eq!(result.forecast, 5.5);
        assert_eq!(result.history, vec![2.0, 3.67, 5.33]);
        assert_eq!(result.status.severity, Severity::Warning);
        assert_eq!(result.status.badge, "status-warning");
    }

    #[test]
    fn test_history_keeps_last_window() {
        let values: Vec<f64> = (0..30).map(|i| i as f64 / 10.0).collect();
        let samples = series(&values);
        let result = KpService::normalize(Some(samples.as_slice()));

        assert_eq!(result.history.len(), 24);
        assert_eq!(result.history[0], 0.6);
        assert_eq!(result.history[23], 2.9);
    }

    #[test]
    fn test_missing_field_falls_back() {
        let samples = vec![json!({"kp_index": 4.0}), json!({"time_tag": "2026-10-18"})];
        let result = KpService::normalize(Some(samples.as_slice()));

        assert_eq!(result.current, 3.3);
        assert_eq!(result.history, vec![4.0, 0.0]);
    }
}
