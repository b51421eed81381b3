//! Services Layer
//!
//! One normalizer per space weather indicator plus the snapshot pipeline that
//! runs them together.
//!
//! # Architecture
//!
//! ```text
//!                    ┌──> KpService ─────────────┐
//!                    ├──> FlareService ──────────┤
//!                    ├──> SolarWindService ──────┤
//! SnapshotService ───┼──> SunspotService ────────┼──> Snapshot::assemble
//!                    ├──> MagneticFieldService ──┤
//!                    ├──> CmeService ────────────┤
//!                    └──> AuroraService ─────────┘
//! ```
//!
//! Every normalizer is total: upstream outages and malformed payloads degrade
//! to documented default values instead of errors.

pub mod common;
pub mod aurora_service;
pub mod cme_service;
pub mod flare_service;
pub mod kp_service;
pub mod magnetic_field_service;
pub mod snapshot;
pub mod snapshot_service;
pub mod solar_wind_service;
pub mod sunspot_service;

#[cfg(test)]
pub(crate) mod testing_support;

pub use aurora_service::AuroraService;
pub use cme_service::{CmeCloud, CmeEvent, CmeService};
pub use common::{ComparisonStats, IndicatorStatus, Severity, Trend};
pub use flare_service::{FlareActivity, FlareClass, FlareEvent, FlareService};
pub use kp_service::{KpIndex, KpService};
pub use magnetic_field_service::{MagneticField, MagneticFieldService};
pub use snapshot::{ComparisonRow, ComparisonTable, Indicators, Snapshot, SummaryFields};
pub use snapshot_service::SnapshotService;
pub use solar_wind_service::{SolarWind, SolarWindService};
pub use sunspot_service::{SunspotActivity, SunspotService};
