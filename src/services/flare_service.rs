//! Flare Service
//!
//! Classifies GOES X-ray flux samples into C/M/X flare classes, counts them
//! and keeps the most recent events for the detail view.

use crate::services::common::{self, ComparisonStats, IndicatorStatus, Severity};
use crate::sources::{Endpoint, SourceClient};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

const SOURCE: &str = "NOAA Flares";

/// Samples at or below this flux are background, not flares
const FLARE_THRESHOLD: f64 = 1e-6;
const RECENT_EVENTS: usize = 5;

/// Share of the current count used as the comparison average
const AVERAGE_FACTOR: f64 = 0.9;
/// Comparison average used when no flares were observed
const BASELINE_AVERAGE: f64 = 5.3;

/// GOES flare class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FlareClass {
    C,
    M,
    X,
}

impl FlareClass {
    /// Class of a peak flux in W/m²
    pub fn from_flux(flux: f64) -> Self {
        if flux >= FlareClass::X.floor() {
            FlareClass::X
        } else if flux >= FlareClass::M.floor() {
            FlareClass::M
        } else {
            FlareClass::C
        }
    }

    /// Lower flux bound of the class
    pub fn floor(&self) -> f64 {
        match self {
            FlareClass::C => 1e-6,
            FlareClass::M => 1e-5,
            FlareClass::X => 1e-4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlareClass::C => "C",
            FlareClass::M => "M",
            FlareClass::X => "X",
        }
    }

    /// Full designation such as `X5.0`
    pub fn designation(flux: f64) -> String {
        let class = Self::from_flux(flux);
        format!("{}{:.1}", class.as_str(), flux / class.floor())
    }
}

/// One classified flare sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlareEvent {
    pub date: String,
    pub class: FlareClass,
    pub class_full: String,
    pub flux: f64,
}

impl FlareEvent {
    fn from_sample(flux: f64, sample: &Value) -> Self {
        let date = common::text(sample, "time_tag", SOURCE)
            .map(|t| t.chars().take(10).collect())
            .unwrap_or_default();

        Self {
            date,
            class: FlareClass::from_flux(flux),
            class_full: FlareClass::designation(flux),
            flux,
        }
    }
}

/// Normalized flare activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlareActivity {
    pub count: usize,
    pub c_count: usize,
    pub m_count: usize,
    pub x_count: usize,
    pub strongest_class: String,
    pub strongest_class_display: FlareClass,
    #[serde(flatten)]
    pub status: IndicatorStatus,
    /// Most recent flares, oldest first
    pub events: Vec<FlareEvent>,
    /// Estimated X-flare probability in percent
    pub probability: u8,
    pub comparison: ComparisonStats,
}

impl Default for FlareActivity {
    fn default() -> Self {
        Self {
            count: 0,
            c_count: 0,
            m_count: 0,
            x_count: 0,
            strongest_class: "C0.0".to_string(),
            strongest_class_display: FlareClass::C,
            status: FlareService::classify(0, 0),
            events: Vec::new(),
            probability: FlareService::probability(Severity::Normal),
            comparison: ComparisonStats::compute(0.0, BASELINE_AVERAGE),
        }
    }
}

/// Flare service
pub struct FlareService;

impl FlareService {
    /// Fetch and normalize the 7-day X-ray flux feed
    pub async fn collect(client: &SourceClient) -> FlareActivity {
        let samples = client.fetch_samples(Endpoint::XrayFlux7Day).await;
        Self::normalize(samples.as_deref())
    }

    pub fn normalize(samples: Option<&[Value]>) -> FlareActivity {
        let mut result = FlareActivity::default();

        let Some(samples) = samples.filter(|s| !s.is_empty()) else {
            return result;
        };

        // Samples without a usable flux never count as flares
        let flares: Vec<(f64, &Value)> = samples
            .iter()
            .filter_map(|s| common::number_quiet(s, "flux").map(|flux| (flux, s)))
            .filter(|(flux, _)| *flux > FLARE_THRESHOLD)
            .collect();

        if flares.is_empty() {
            return result;
        }

        for (flux, _) in &flares {
            match FlareClass::from_flux(*flux) {
                FlareClass::X => result.x_count += 1,
                FlareClass::M => result.m_count += 1,
                FlareClass::C => result.c_count += 1,
            }
        }
        result.count = flares.len();

        let strongest = flares
            .iter()
            .map(|(flux, _)| *flux)
            .fold(f64::MIN, f64::max);
        result.strongest_class = FlareClass::designation(strongest);
        result.strongest_class_display = FlareClass::from_flux(strongest);

        result.status = Self::classify(result.m_count, result.x_count);
        result.probability = Self::probability(result.status.severity);

        let start = flares.len().saturating_sub(RECENT_EVENTS);
        result.events = flares[start..]
            .iter()
            .map(|(flux, sample)| FlareEvent::from_sample(*flux, sample))
            .collect();

        let average = common::round_to(result.count as f64 * AVERAGE_FACTOR, 1);
        result.comparison = ComparisonStats::compute(result.count as f64, average);

        info!(
            "✅ {}: {} events (M: {}, X: {})",
            SOURCE, result.count, result.m_count, result.x_count
        );

        result
    }

    /// Any X flare is dangerous, any M flare is a warning
    pub fn classify(m_count: usize, x_count: usize) -> IndicatorStatus {
        if x_count > 0 {
            IndicatorStatus::new(Severity::Danger, "Высокая активность")
        } else if m_count > 0 {
            IndicatorStatus::new(Severity::Warning, "Повышенная активность")
        } else {
            IndicatorStatus::new(Severity::Normal, "В пределах нормы")
        }
    }

    /// X-flare probability estimate for a severity level
    pub fn probability(severity: Severity) -> u8 {
        match severity {
            Severity::Danger => 30,
            Severity::Warning | Severity::Normal => 15,
        }
    }
}
