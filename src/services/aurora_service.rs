//! Aurora Service
//!
//! Northern-hemisphere aurora forecast image, embedded as base64. No image is
//! synthesized when the fetch fails; the entry is simply left out.

use crate::sources::{Endpoint, SourceClient};
use tracing::info;

/// Key of the forecast image in the snapshot's image map
pub const AURORA_IMAGE_KEY: &str = "aurora_forecast";

/// Aurora service
pub struct AuroraService;

impl AuroraService {
    pub async fn collect(client: &SourceClient) -> Option<String> {
        let image = client.fetch_base64(Endpoint::AuroraForecast).await?;
        info!("✅ {}: {} bytes encoded", Endpoint::AuroraForecast.name(), image.len());
        Some(image)
    }

    /// Chance of visible aurora at mid latitudes for a Kp value, in percent
    pub fn visibility_probability(kp: f64) -> u8 {
        if kp < 5.0 {
            15
        } else if kp < 7.0 {
            40
        } else {
            70
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::testing::{client_with, StaticTransport};

    #[test]
    fn test_visibility_buckets() {
        assert_eq!(AuroraService::visibility_probability(3.3), 15);
        assert_eq!(AuroraService::visibility_probability(5.0), 40);
        assert_eq!(AuroraService::visibility_probability(6.99), 40);
        assert_eq!(AuroraService::visibility_probability(7.0), 70);
    }

    #[tokio::test]
    async fn test_missing_image_is_none() {
        let transport = StaticTransport::new().status(Endpoint::AuroraForecast, 404);
        assert!(AuroraService::collect(&client_with(transport)).await.is_none());
    }

    #[tokio::test]
    async fn test_image_is_encoded() {
        let transport = StaticTransport::new().bytes(Endpoint::AuroraForecast, b"JPEG".to_vec());
        let image = AuroraService::collect(&client_with(transport)).await;
        assert_eq!(image.as_deref(), Some("SlBFRw=="));
    }
}
