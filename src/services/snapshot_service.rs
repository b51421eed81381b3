//! Snapshot Service
//!
//! Runs every indicator normalizer concurrently, waits for all of them and
//! merges the results into a fresh [`Snapshot`].

use crate::services::aurora_service::AuroraService;
use crate::services::cme_service::CmeService;
use crate::services::flare_service::FlareService;
use crate::services::kp_service::KpService;
use crate::services::magnetic_field_service::MagneticFieldService;
use crate::services::snapshot::{Indicators, Snapshot};
use crate::services::solar_wind_service::SolarWindService;
use crate::services::sunspot_service::SunspotService;
use crate::sources::SourceClient;
use chrono::Utc;
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Fetch-normalize-aggregate pipeline
pub struct SnapshotService {
    client: SourceClient,
}

impl SnapshotService {
    pub fn new(client: SourceClient) -> Self {
        Self { client }
    }

    /// Run the pipeline once.
    ///
    /// Never fails: every normalizer degrades to its defaults when its
    /// source is unavailable, so the worst case is an all-default snapshot.
    /// The run takes as long as the slowest source call, which is bounded by
    /// the client timeout.
    pub async fn run_once(&self) -> Snapshot {
        let run_id = Uuid::new_v4();
        self.collect()
            .instrument(info_span!("snapshot_run", %run_id))
            .await
    }

    async fn collect(&self) -> Snapshot {
        let started = Instant::now();
        let client = &self.client;
        let today = Utc::now().date_naive();

        info!("🚀 Collecting NOAA data...");

        let (kp, flares, solar_wind, sun, geomagnetic, cme, aurora_image) = tokio::join!(
            KpService::collect(client),
            FlareService::collect(client),
            SolarWindService::collect(client),
            SunspotService::collect(client),
            MagneticFieldService::collect(client),
            CmeService::collect(client, today),
            AuroraService::collect(client),
        );

        let snapshot = Snapshot::assemble(
            Indicators {
                kp,
                flares,
                solar_wind,
                sun,
                geomagnetic,
                cme,
                aurora_image,
            },
            Utc::now(),
        );

        info!(
            overall = %snapshot.overall_status,
            events = snapshot.summary.events_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "📊 Snapshot ready: Kp {} ({}), flares {}, wind {} km/s, sunspots {}",
            snapshot.kp.current,
            snapshot.kp.status.text,
            snapshot.flares.count,
            snapshot.solar_wind.speed,
            snapshot.sun.sunspot_number,
        );

        snapshot
    }
}
