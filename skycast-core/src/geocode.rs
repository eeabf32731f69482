//! Reverse geocoding: coordinates to a human-readable place name.
//!
//! Uses Nominatim (OpenStreetMap), which requires an identifying
//! User-Agent but no API key. Lookups are strictly best-effort: every
//! failure path yields `None` and the caller falls back to a generic
//! location label.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::model::Coordinates;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReverseGeocoder {
    base_url: String,
    http: Client,
}

impl ReverseGeocoder {
    pub fn new() -> Self {
        Self::with_base_url(NOMINATIM_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// `"City, Country"` for the coordinates, preferring city over
    /// town over village. `None` on any failure.
    pub async fn lookup(&self, coordinates: Coordinates) -> Option<String> {
        let request = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
                ("format", "json".to_string()),
            ])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(REQUEST_TIMEOUT);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("reverse geocode request failed: {e}");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("reverse geocode returned status {}", response.status());
            return None;
        }

        let body: NominatimResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("reverse geocode parse error: {e}");
                return None;
            }
        };

        let address = body.address?;
        let place = address.city.or(address.town).or(address.village)?;

        let name = match address.country {
            Some(country) if !country.is_empty() => format!("{place}, {country}"),
            _ => place,
        };

        tracing::info!("reverse geocoded to {name}");
        Some(name)
    }
}

impl Default for ReverseGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn rome() -> Coordinates {
        Coordinates {
            latitude: 41.89193,
            longitude: 12.51133,
        }
    }

    #[tokio::test]
    async fn resolves_city_and_country() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "address": { "city": "Rome", "country": "Italy" }
            })))
            .mount(&server)
            .await;

        let geocoder = ReverseGeocoder::with_base_url(server.uri());
        assert_eq!(geocoder.lookup(rome()).await.as_deref(), Some("Rome, Italy"));
    }

    #[tokio::test]
    async fn falls_back_to_town_and_village() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "address": { "village": "Calcata", "country": "Italy" }
            })))
            .mount(&server)
            .await;

        let geocoder = ReverseGeocoder::with_base_url(server.uri());
        assert_eq!(
            geocoder.lookup(rome()).await.as_deref(),
            Some("Calcata, Italy")
        );
    }

    #[tokio::test]
    async fn failure_is_swallowed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let geocoder = ReverseGeocoder::with_base_url(server.uri());
        assert_eq!(geocoder.lookup(rome()).await, None);
    }

    #[tokio::test]
    async fn missing_address_is_swallowed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let geocoder = ReverseGeocoder::with_base_url(server.uri());
        assert_eq!(geocoder.lookup(rome()).await, None);
    }
}
