//! Snapshot document
//!
//! The immutable result of one pipeline run. All derived fields are computed
//! in [`Snapshot::assemble`] from fully completed indicator results.

use crate::services::aurora_service::{AuroraService, AURORA_IMAGE_KEY};
use crate::services::cme_service::CmeCloud;
use crate::services::common::{float_text, ComparisonStats, Severity, Trend};
use crate::services::flare_service::{FlareActivity, FlareClass};
use crate::services::kp_service::KpIndex;
use crate::services::magnetic_field_service::MagneticField;
use crate::services::solar_wind_service::SolarWind;
use crate::services::sunspot_service::SunspotActivity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display format of `last_update`
pub const LAST_UPDATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Per-indicator results of one run, before merging
#[derive(Debug, Clone, PartialEq)]
pub struct Indicators {
    pub kp: KpIndex,
    pub flares: FlareActivity,
    pub solar_wind: SolarWind,
    pub sun: SunspotActivity,
    pub geomagnetic: MagneticField,
    pub cme: CmeCloud,
    pub aurora_image: Option<String>,
}

/// One row of the now-vs-average table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub now: String,
    pub avg: String,
    pub diff: String,
    #[serde(rename = "dyn")]
    pub dynamics: String,
    pub dyn_class: Trend,
    pub badge: String,
}

impl ComparisonRow {
    /// Row for a measured value
    fn measured(stats: &ComparisonStats, severity: Severity) -> Self {
        Self::with_now(stats, severity, float_text(stats.current))
    }

    /// Row for an event count, shown without a fraction
    fn counted(stats: &ComparisonStats, severity: Severity) -> Self {
        Self::with_now(stats, severity, format!("{}", stats.current.round() as i64))
    }

    fn with_now(stats: &ComparisonStats, severity: Severity, now: String) -> Self {
        Self {
            now,
            avg: float_text(stats.average),
            diff: float_text(stats.delta),
            dynamics: stats.trend_symbol.clone(),
            dyn_class: stats.trend_class,
            badge: severity.badge().to_string(),
        }
    }
}

/// Now-vs-average table shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub cme: ComparisonRow,
    pub flares: ComparisonRow,
    pub kp: ComparisonRow,
    pub wind: ComparisonRow,
}

/// Flat projections read directly by the dashboard
///
/// Status fields here carry badge classes (`status-warning`), not bare
/// severities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryFields {
    /// The CME result again, under the name older dashboards read
    pub cme_cloud: CmeCloud,

    #[serde(rename = "kpIndex")]
    pub kp_index: f64,
    #[serde(rename = "kpStatus")]
    pub kp_status: String,
    #[serde(rename = "kpStatusBadge")]
    pub kp_status_badge: String,

    #[serde(rename = "cmeCount")]
    pub cme_count: u32,
    #[serde(rename = "cmeStatus")]
    pub cme_status: String,

    #[serde(rename = "flareCount")]
    pub flare_count: usize,
    #[serde(rename = "flareClass")]
    pub flare_class: FlareClass,
    #[serde(rename = "flaresStatus")]
    pub flares_status: String,

    #[serde(rename = "windStatus")]
    pub wind_status: String,

    #[serde(rename = "sunspotNumber")]
    pub sunspot_number: String,
    #[serde(rename = "sunStatus")]
    pub sun_status: String,

    /// Flare count plus CME count
    #[serde(rename = "eventsCount")]
    pub events_count: u64,
    /// Same count, under its long name
    pub total_events: u64,
    /// Badge of the more severe of flare and CME activity
    #[serde(rename = "eventsStatus")]
    pub events_status: String,
    #[serde(rename = "flareProb")]
    pub flare_probability: String,
    #[serde(rename = "kpForecast")]
    pub kp_forecast: String,
    #[serde(rename = "auroraProb")]
    pub aurora_probability: String,
    #[serde(rename = "cmeSpeed")]
    pub cme_speed: String,
    #[serde(rename = "windSpeed")]
    pub wind_speed: String,
    #[serde(rename = "windDensity")]
    pub wind_density: String,
    pub comparison: ComparisonTable,
}

impl SummaryFields {
    fn derive(ind: &Indicators) -> Self {
        let events = ind.flares.count as u64 + u64::from(ind.cme.count);
        let events_severity = Severity::escalate([ind.flares.status.severity, ind.cme.status.severity]);

        Self {
            cme_cloud: ind.cme.clone(),
            kp_index: ind.kp.current,
            kp_status: ind.kp.status.text.clone(),
            kp_status_badge: ind.kp.status.badge.clone(),
            cme_count: ind.cme.count,
            cme_status: ind.cme.status.badge.clone(),
            flare_count: ind.flares.count,
            flare_class: ind.flares.strongest_class_display,
            flares_status: ind.flares.status.badge.clone(),
            wind_status: ind.solar_wind.status.badge.clone(),
            sunspot_number: ind.sun.display.clone(),
            sun_status: ind.sun.status.badge.clone(),
            events_count: events,
            total_events: events,
            events_status: events_severity.badge().to_string(),
            flare_probability: format!("{}%", ind.flares.probability),
            kp_forecast: float_text(ind.kp.forecast),
            aurora_probability: format!("{}%", AuroraService::visibility_probability(ind.kp.current)),
            cme_speed: format!("{} км/с", ind.cme.max_speed),
            wind_speed: format!("{} км/с", float_text(ind.solar_wind.speed)),
            wind_density: format!("{} p/см³", float_text(ind.solar_wind.density)),
            comparison: ComparisonTable {
                cme: ComparisonRow::counted(&ind.cme.comparison, ind.cme.status.severity),
                flares: ComparisonRow::counted(&ind.flares.comparison, ind.flares.status.severity),
                kp: ComparisonRow::measured(&ind.kp.comparison, ind.kp.status.severity),
                wind: ComparisonRow::measured(&ind.solar_wind.comparison, ind.solar_wind.status.severity),
            },
        }
    }
}

/// Aggregated space weather snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub kp: KpIndex,
    pub flares: FlareActivity,
    pub solar_wind: SolarWind,
    pub sun: SunspotActivity,
    pub geomagnetic: MagneticField,
    pub cme: CmeCloud,
    /// Embedded images keyed by name; absent images are omitted
    pub images: BTreeMap<String, String>,
    #[serde(flatten)]
    pub summary: SummaryFields,
    pub overall_status: Severity,
    pub generated_at: DateTime<Utc>,
    pub last_update: String,
}

impl Snapshot {
    /// Merge completed indicator results into a snapshot.
    ///
    /// Overall severity covers the geomagnetic index, flare activity and CME
    /// activity; the remaining indicators only feed the summary fields.
    pub fn assemble(indicators: Indicators, generated_at: DateTime<Utc>) -> Self {
        let summary = SummaryFields::derive(&indicators);
        let overall_status = Severity::escalate([
            indicators.kp.status.severity,
            indicators.flares.status.severity,
            indicators.cme.status.severity,
        ]);

        let Indicators {
            kp,
            flares,
            solar_wind,
            sun,
            geomagnetic,
            cme,
            aurora_image,
        } = indicators;

        let mut images = BTreeMap::new();
        if let Some(image) = aurora_image {
            images.insert(AURORA_IMAGE_KEY.to_string(), image);
        }

        Self {
            kp,
            flares,
            solar_wind,
            sun,
            geomagnetic,
            cme,
            images,
            summary,
            overall_status,
            generated_at,
            last_update: generated_at.format(LAST_UPDATE_FORMAT).to_string(),
        }
    }
}
