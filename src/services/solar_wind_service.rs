//! Solar Wind Service
//!
//! Real-time solar wind plasma: proton speed, density and temperature.

use crate::services::common::{self, ComparisonStats, IndicatorStatus, Severity};
use crate::sources::{Endpoint, SourceClient};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

const SOURCE: &str = "Solar wind";

const DEFAULT_SPEED: f64 = 410.0;
const DEFAULT_DENSITY: f64 = 4.8;
const DEFAULT_TEMPERATURE: f64 = 80000.0;

/// Typical speed the current reading is compared against, km/s
pub const SPEED_BASELINE: f64 = 420.0;
pub const SPEED_HIGH: f64 = 500.0;
pub const SPEED_LOW: f64 = 300.0;

/// Normalized solar wind plasma reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarWind {
    /// km/s
    pub speed: f64,
    /// protons/cm³
    pub density: f64,
    /// K
    pub temperature: f64,
    #[serde(flatten)]
    pub status: IndicatorStatus,
    pub comparison: ComparisonStats,
}

impl Default for SolarWind {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            density: DEFAULT_DENSITY,
            temperature: DEFAULT_TEMPERATURE,
            status: SolarWindService::classify(DEFAULT_SPEED),
            comparison: ComparisonStats::compute(DEFAULT_SPEED, SPEED_BASELINE),
        }
    }
}

/// Solar wind service
pub struct SolarWindService;

impl SolarWindService {
    pub async fn collect(client: &SourceClient) -> SolarWind {
        let samples = client.fetch_samples(Endpoint::SolarWind).await;
        Self::normalize(samples.as_deref())
    }

    pub fn normalize(samples: Option<&[Value]>) -> SolarWind {
        let mut result = SolarWind::default();

        let Some(latest) = common::latest(samples) else {
            return result;
        };

        let speed = common::number(latest, "proton_speed", SOURCE).unwrap_or(DEFAULT_SPEED);
        let density = common::number(latest, "proton_density", SOURCE).unwrap_or(DEFAULT_DENSITY);
        let temperature =
            common::number(latest, "proton_temperature", SOURCE).unwrap_or(DEFAULT_TEMPERATURE);

        result.speed = common::round_to(speed, 1);
        result.density = common::round_to(density, 2);
        result.temperature = common::round_to(temperature, 0);
        result.status = Self::classify(speed);
        result.comparison = ComparisonStats::compute(result.speed, SPEED_BASELINE);

        info!("✅ {}: {} km/s", SOURCE, result.speed);

        result
    }

    /// Both unusually fast and unusually slow wind are warnings; there is no
    /// danger tier for this indicator
    pub fn classify(speed: f64) -> IndicatorStatus {
        if speed > SPEED_HIGH {
            IndicatorStatus::new(Severity::Warning, "Повышенная скорость")
        } else if speed < SPEED_LOW {
            IndicatorStatus::new(Severity::Warning, "Пониженная скорость")
        } else {
            IndicatorStatus::new(Severity::Normal, "В пределах нормы")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::common::Trend;
    use serde_json::json;

    #[test]
    fn test_speed_boundaries() {
        assert_eq!(SolarWindService::classify(300.0).severity, Severity::Normal);
        assert_eq!(SolarWindService::classify(299.9).severity, Severity::Warning);
        assert_eq!(SolarWindService::classify(500.0).severity, Severity::Normal);
        assert_eq!(SolarWindService::classify(501.0).severity, Severity::Warning);
        assert_eq!(SolarWindService::classify(501.0).text, "Повышенная скорость");
        assert_eq!(SolarWindService::classify(299.9).text, "Пониженная скорость");
    }

    #[test]
    fn test_defaults_without_data() {
        let result = SolarWindService::normalize(None);
        assert_eq!(result.speed, 410.0);
        assert_eq!(result.density, 4.8);
        assert_eq!(result.temperature, 80000.0);
        assert_eq!(result.status.severity, Severity::Normal);
    }

    #[test]
    fn test_latest_sample_rounded() {
        let samples = vec![
            json!({"proton_speed": 390.0, "proton_density": 3.0, "proton_temperature": 50000.0}),
            json!({"proton_speed": 612.345, "proton_density": 7.456, "proton_temperature": 123456.7}),
        ];
        let result = SolarWindService::normalize(Some(samples.as_slice()));

        assert_eq!(result.speed, 612.3);
        assert_eq!(result.density, 7.46);
        assert_eq!(result.temperature, 123457.0);
        assert_eq!(result.status.severity, Severity::Warning);
        assert_eq!(result.comparison.trend_class, Trend::Up);
        assert_eq!(result.comparison.trend_symbol, "▲ +46%");
    }

    #[test]
    fn test_null_fields_degrade_individually() {
        let samples = vec![json!({"proton_speed": null, "proton_density": 2.5, "proton_temperature": null})];
        let result = SolarWindService::normalize(Some(samples.as_slice()));

        assert_eq!(result.speed, 410.0);
        assert_eq!(result.density, 2.5);
        assert_eq!(result.temperature, 80000.0);
    }
}
