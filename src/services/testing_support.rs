//! Canned NOAA payloads shared by service tests

use crate::sources::testing::StaticTransport;
use crate::sources::Endpoint;

pub(crate) const KP_FEED: &str = r#"[
    {"time_tag": "2026-10-18T11:58:00", "kp_index": 4.0, "estimated_kp": 4.0, "kp": "4Z"},
    {"time_tag": "2026-10-18T11:59:00", "kp_index": 5.33, "estimated_kp": 5.33, "kp": "5P"}
]"#;

pub(crate) const XRAY_FEED: &str = r#"[
    {"time_tag": "2026-10-15T08:00:00Z", "satellite": 18, "flux": 4.2e-7, "energy": "0.1-0.8nm"},
    {"time_tag": "2026-10-16T09:12:00Z", "satellite": 18, "flux": 2.0e-6, "energy": "0.1-0.8nm"},
    {"time_tag": "2026-10-17T14:40:00Z", "satellite": 18, "flux": 3.0e-5, "energy": "0.1-0.8nm"},
    {"time_tag": "2026-10-18T03:05:00Z", "satellite": 18, "flux": 5.0e-4, "energy": "0.1-0.8nm"}
]"#;

pub(crate) const WIND_FEED: &str = r#"[
    {"time_tag": "2026-10-18T11:58:00", "proton_speed": 498.0, "proton_density": 3.9, "proton_temperature": 150000},
    {"time_tag": "2026-10-18T11:59:00", "proton_speed": 512.44, "proton_density": 4.123, "proton_temperature": 171234.4}
]"#;

pub(crate) const SUNSPOT_FEED: &str = r#"[
    {"time-tag": "2026-08", "ssn": 131.2},
    {"time-tag": "2026-09", "ssn": 140.0}
]"#;

pub(crate) const DST_FEED: &str = r#"[
    {"time_tag": "2026-10-18T10:00:00", "dst": -37},
    {"time_tag": "2026-10-18T11:00:00", "dst": -42}
]"#;

pub(crate) const MAG_FEED: &str = r#"[
    {"time_tag": "2026-10-18T11:59:00", "bt": 8.104, "bx_gsm": 1.2, "by_gsm": -3.4, "bz_gsm": -6.5}
]"#;

pub(crate) const CME_FEED: &str = r#"[
    {"time_tag": "2026-10-18T00:00:00", "cloud": 0},
    {"time_tag": "2026-10-18T06:00:00", "cloud": 1}
]"#;

pub(crate) fn full_transport() -> StaticTransport {
    StaticTransport::new()
        .json(Endpoint::KpIndex, KP_FEED)
        .json(Endpoint::XrayFlux7Day, XRAY_FEED)
        .json(Endpoint::SolarWind, WIND_FEED)
        .json(Endpoint::Sunspots, SUNSPOT_FEED)
        .json(Endpoint::Dst, DST_FEED)
        .json(Endpoint::MagneticField, MAG_FEED)
        .json(Endpoint::CmeCloud, CME_FEED)
        .bytes(Endpoint::AuroraForecast, vec![0xff, 0xd8, 0xff, 0xe0])
}
