//! Upstream endpoint table

/// NOAA SWPC resources consumed by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    KpIndex,
    Dst,
    XrayFlux7Day,
    SolarWind,
    MagneticField,
    CmeCloud,
    Sunspots,
    AuroraForecast,
}

impl Endpoint {
    pub const ALL: [Endpoint; 8] = [
        Endpoint::KpIndex,
        Endpoint::Dst,
        Endpoint::XrayFlux7Day,
        Endpoint::SolarWind,
        Endpoint::MagneticField,
        Endpoint::CmeCloud,
        Endpoint::Sunspots,
        Endpoint::AuroraForecast,
    ];

    /// Name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::KpIndex => "Kp index",
            Endpoint::Dst => "Dst",
            Endpoint::XrayFlux7Day => "NOAA Flares",
            Endpoint::SolarWind => "Solar wind",
            Endpoint::MagneticField => "Bz",
            Endpoint::CmeCloud => "CME cloud",
            Endpoint::Sunspots => "Sunspots",
            Endpoint::AuroraForecast => "Aurora",
        }
    }

    /// Path relative to the configured base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::KpIndex => "json/planetary_k_index_1m.json",
            Endpoint::Dst => "json/geospace/geospace_dst_1_hour.json",
            Endpoint::XrayFlux7Day => "json/goes/primary/xrays-7-day.json",
            Endpoint::SolarWind => "json/rtsw/rtsw_wind_1m.json",
            Endpoint::MagneticField => "json/rtsw/rtsw_mag_1m.json",
            Endpoint::CmeCloud => "json/enlil_time_series.json",
            Endpoint::Sunspots => "json/solar-cycle/sunspots.json",
            Endpoint::AuroraForecast => "images/aurora-forecast-northern-hemisphere.jpg",
        }
    }
}
