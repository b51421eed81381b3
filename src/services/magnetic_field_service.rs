//! Magnetic Field Service
//!
//! Interplanetary magnetic field (Bt, Bz in GSM) and the Dst storm index.
//! The two feeds degrade independently; severity follows Bz alone.

use crate::services::common::{self, IndicatorStatus, Severity};
use crate::sources::{Endpoint, SourceClient};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

const DST_SOURCE: &str = "Dst";
const MAG_SOURCE: &str = "Bz";

const DEFAULT_DST: f64 = -10.0;
const DEFAULT_BT: f64 = 5.0;
const DEFAULT_BZ: f64 = 0.0;

pub const BZ_WARNING: f64 = -5.0;
pub const BZ_DANGER: f64 = -10.0;

/// Normalized magnetic field reading, all values in nT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagneticField {
    pub dst: f64,
    pub bt: f64,
    pub bz: f64,
    #[serde(flatten)]
    pub status: IndicatorStatus,
}

impl Default for MagneticField {
    fn default() -> Self {
        Self {
            dst: DEFAULT_DST,
            bt: DEFAULT_BT,
            bz: DEFAULT_BZ,
            status: MagneticFieldService::classify(DEFAULT_BZ),
        }
    }
}

/// Magnetic field service
pub struct MagneticFieldService;

impl MagneticFieldService {
    /// Fetch the Dst and IMF feeds concurrently and merge them
    pub async fn collect(client: &SourceClient) -> MagneticField {
        let (dst, mag) = tokio::join!(
            client.fetch_samples(Endpoint::Dst),
            client.fetch_samples(Endpoint::MagneticField),
        );
        Self::normalize(dst.as_deref(), mag.as_deref())
    }

    pub fn normalize(dst_samples: Option<&[Value]>, mag_samples: Option<&[Value]>) -> MagneticField {
        let mut result = MagneticField::default();

        if let Some(latest) = common::latest(dst_samples) {
            let dst = common::number(latest, "dst", DST_SOURCE).unwrap_or(DEFAULT_DST);
            result.dst = common::round_to(dst, 2);
            info!("✅ {}: {} nT", DST_SOURCE, result.dst);
        }

        if let Some(latest) = common::latest(mag_samples) {
            let bt = common::number(latest, "bt", MAG_SOURCE).unwrap_or(DEFAULT_BT);
            let bz = common::number(latest, "bz_gsm", MAG_SOURCE).unwrap_or(DEFAULT_BZ);
            result.bt = common::round_to(bt, 2);
            result.bz = common::round_to(bz, 2);
            info!("✅ {}: {} nT", MAG_SOURCE, result.bz);
        }

        result.status = Self::classify(result.bz);

        result
    }

    /// Southward (negative) Bz drives the classification; Dst is carried
    /// through unclassified
    pub fn classify(bz: f64) -> IndicatorStatus {
        if bz < BZ_DANGER {
            IndicatorStatus::new(Severity::Danger, "Опасное южное направление")
        } else if bz < BZ_WARNING {
            IndicatorStatus::new(Severity::Warning, "Южное направление")
        } else {
            IndicatorStatus::new(Severity::Normal, "Спокойно")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing_support::*;
    use crate::sources::testing::{client_with, StaticTransport};
    use serde_json::json;

    #[test]
    fn test_bz_thresholds() {
        assert_eq!(MagneticFieldService::classify(-5.0).severity, Severity::Normal);
        assert_eq!(MagneticFieldService::classify(-5.01).severity, Severity::Warning);
        assert_eq!(MagneticFieldService::classify(-10.0).severity, Severity::Warning);
        assert_eq!(MagneticFieldService::classify(-10.5).severity, Severity::Danger);
        assert_eq!(MagneticFieldService::classify(12.0).severity, Severity::Normal);
    }

    #[test]
    fn test_defaults_without_data() {
        let result = MagneticFieldService::normalize(None, None);
        assert_eq!(result, MagneticField::default());
        assert_eq!(result.dst, -10.0);
        assert_eq!(result.bt, 5.0);
        assert_eq!(result.bz, 0.0);
    }

    #[test]
    fn test_feeds_degrade_independently() {
        let mag = vec![json!({"bt": 14.236, "bz_gsm": -12.114})];
        let result = MagneticFieldService::normalize(None, Some(mag.as_slice()));

        assert_eq!(result.dst, -10.0);
        assert_eq!(result.bt, 14.24);
        assert_eq!(result.bz, -12.11);
        assert_eq!(result.status.severity, Severity::Danger);

        let dst = vec![json!({"time_tag": "2026-10-18T11:00:00", "dst": -87.0})];
        let result = MagneticFieldService::normalize(Some(dst.as_slice()), None);
        assert_eq!(result.dst, -87.0);
        assert_eq!(result.bz, 0.0);
        assert_eq!(result.status.severity, Severity::Normal);
    }

    #[tokio::test]
    async fn test_collect_merges_both_feeds() {
        let transport = StaticTransport::new()
            .json(Endpoint::Dst, DST_FEED)
            .json(Endpoint::MagneticField, MAG_FEED);
        let result = MagneticFieldService::collect(&client_with(transport)).await;

        assert_eq!(result.dst, -42.0);
        assert_eq!(result.bz, -6.5);
        assert_eq!(result.status.severity, Severity::Warning);
    }
}
