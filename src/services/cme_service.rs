//! CME Service
//!
//! Coronal mass ejection tracking from the WSA-Enlil cloud time series.
//!
//! Only the in-transit flag and message are driven by upstream data. Event
//! count, peak speed and the recent-event list are reference values, and
//! the severity is pinned at warning whatever the cloud reading says.
//! Whether that pin should become a real threshold is still undecided, so
//! it is kept as observed.

use crate::services::common::{self, ComparisonStats, IndicatorStatus, Severity};
use crate::sources::{Endpoint, SourceClient};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

const SOURCE: &str = "CME cloud";

const DEFAULT_COUNT: u32 = 3;
const DEFAULT_MAX_SPEED: f64 = 850.0;
/// (days before the run, speed in km/s)
const REFERENCE_EVENTS: [(u64, f64); 3] = [(1, 420.0), (2, 380.0), (3, 850.0)];

/// Typical number of CMEs the current count is compared against
pub const CME_BASELINE: f64 = 2.5;

const MSG_IN_TRANSIT: &str = "Обнаружен CME в пути";
const MSG_NONE: &str = "Нет CME в пути";

/// One CME event entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmeEvent {
    pub date: String,
    pub speed: f64,
}

/// Normalized CME activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmeCloud {
    pub cloud: f64,
    pub in_transit: bool,
    pub message: String,
    pub count: u32,
    pub max_speed: f64,
    #[serde(flatten)]
    pub status: IndicatorStatus,
    pub events: Vec<CmeEvent>,
    pub comparison: ComparisonStats,
}

impl CmeCloud {
    /// Reference result for a run performed on `today`
    pub fn baseline(today: NaiveDate) -> Self {
        let events = REFERENCE_EVENTS
            .iter()
            .map(|(days_ago, speed)| CmeEvent {
                date: today
                    .checked_sub_days(Days::new(*days_ago))
                    .unwrap_or(today)
                    .format("%Y-%m-%d")
                    .to_string(),
                speed: *speed,
            })
            .collect();

        Self {
            cloud: 0.0,
            in_transit: false,
            message: MSG_NONE.to_string(),
            count: DEFAULT_COUNT,
            max_speed: DEFAULT_MAX_SPEED,
            status: CmeService::classify(0.0),
            events,
            comparison: ComparisonStats::compute(DEFAULT_COUNT as f64, CME_BASELINE),
        }
    }
}

/// CME service
pub struct CmeService;

impl CmeService {
    pub async fn collect(client: &SourceClient, today: NaiveDate) -> CmeCloud {
        let samples = client.fetch_samples(Endpoint::CmeCloud).await;
        Self::normalize(samples.as_deref(), today)
    }

    pub fn normalize(samples: Option<&[Value]>, today: NaiveDate) -> CmeCloud {
        let mut result = CmeCloud::baseline(today);

        let Some(cloud) = common::latest(samples).and_then(|s| common::number(s, "cloud", SOURCE))
        else {
            return result;
        };

        result.cloud = cloud;
        result.in_transit = cloud > 0.0;
        result.message = if result.in_transit { MSG_IN_TRANSIT } else { MSG_NONE }.to_string();
        result.status = Self::classify(cloud);

        info!("✅ {}: {}", SOURCE, result.message);

        result
    }

    /// Always a warning; the reading does not participate yet
    pub fn classify(_cloud: f64) -> IndicatorStatus {
        IndicatorStatus::new(Severity::Warning, "Превышение нормы")
    }
}
