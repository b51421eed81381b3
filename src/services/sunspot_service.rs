//! Sunspot Service

use crate::services::common::{self, IndicatorStatus, Severity};
use crate::sources::{Endpoint, SourceClient};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

const SOURCE: &str = "Sunspots";

const DEFAULT_SUNSPOTS: f64 = 85.0;
const DEFAULT_ACTIVE_REGIONS: u32 = 5;
const SOLAR_CYCLE: u32 = 25;
const CYCLE_PHASE: &str = "рост";

pub const SUNSPOTS_LOW: f64 = 50.0;
pub const SUNSPOTS_HIGH: f64 = 150.0;

/// Normalized sunspot activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunspotActivity {
    pub sunspot_number: f64,
    pub active_regions: u32,
    pub cycle: u32,
    pub phase: String,
    pub display: String,
    #[serde(flatten)]
    pub status: IndicatorStatus,
}

impl SunspotActivity {
    fn with_count(sunspot_number: f64, display: String) -> Self {
        Self {
            sunspot_number,
            active_regions: DEFAULT_ACTIVE_REGIONS,
            cycle: SOLAR_CYCLE,
            phase: CYCLE_PHASE.to_string(),
            display,
            status: SunspotService::classify(sunspot_number),
        }
    }
}

impl Default for SunspotActivity {
    fn default() -> Self {
        // The reference count is a whole number and is shown as one
        Self::with_count(DEFAULT_SUNSPOTS, format!("{} пятен", DEFAULT_SUNSPOTS))
    }
}

/// Sunspot service
pub struct SunspotService;

impl SunspotService {
    pub async fn collect(client: &SourceClient) -> SunspotActivity {
        let samples = client.fetch_samples(Endpoint::Sunspots).await;
        Self::normalize(samples.as_deref())
    }

    pub fn normalize(samples: Option<&[Value]>) -> SunspotActivity {
        let Some(latest) = common::latest(samples) else {
            return SunspotActivity::default();
        };

        let spots = common::number(latest, "ssn", SOURCE).unwrap_or(DEFAULT_SUNSPOTS);
        let spots = common::round_to(spots, 1);
        let result = SunspotActivity::with_count(spots, format!("{} пятен", common::float_text(spots)));

        info!("✅ {}: {}", SOURCE, result.sunspot_number);

        result
    }

    /// Both a quiet and a very active sun are flagged; only the active side is
    /// dangerous
    pub fn classify(sunspots: f64) -> IndicatorStatus {
        if sunspots < SUNSPOTS_LOW {
            IndicatorStatus::new(Severity::Warning, "Низкая активность")
        } else if sunspots > SUNSPOTS_HIGH {
            IndicatorStatus::new(Severity::Danger, "Высокая активность")
        } else {
            IndicatorStatus::new(Severity::Normal, "В пределах нормы")
        }
    }
}
