//! Waiting for a geolocation fix.
//!
//! A platform integration publishes fixes through a [`FixSource`]; the
//! dashboard side waits on the paired [`FixReceiver`] with a bounded
//! timeout. The wait is event-driven (no readiness polling) and every
//! exit path drops its timer with the cancelled future.

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::timeout;

use crate::{error::WeatherError, geocode::ReverseGeocoder, model::{Coordinates, Location}};

/// How long to wait for a fix before giving up.
pub const FIX_TIMEOUT: Duration = Duration::from_secs(5);

/// Shown when reverse geocoding cannot name the fix.
pub const FALLBACK_LOCATION_NAME: &str = "My Location";

/// Publishing half, held by whatever produces location fixes.
#[derive(Debug, Clone)]
pub struct FixSource {
    tx: watch::Sender<Option<Coordinates>>,
}

impl FixSource {
    pub fn channel() -> (FixSource, FixReceiver) {
        let (tx, rx) = watch::channel(None);
        (FixSource { tx }, FixReceiver { rx })
    }

    pub fn publish(&self, fix: Coordinates) {
        // Send only fails when the receiver is gone; nothing to do then.
        let _ = self.tx.send(Some(fix));
    }
}

/// Waiting half, owned by the dashboard.
#[derive(Debug, Clone)]
pub struct FixReceiver {
    rx: watch::Receiver<Option<Coordinates>>,
}

/// Resolve the next geolocation fix, bounded by `limit`.
///
/// A fix that arrived before the call resolves immediately. A source
/// dropped without ever producing a fix means geolocation is not
/// available here at all.
pub async fn wait_for_fix(
    receiver: &mut FixReceiver,
    limit: Duration,
) -> Result<Coordinates, WeatherError> {
    let wait = async {
        loop {
            let current = *receiver.rx.borrow_and_update();
            if let Some(fix) = current {
                return Ok(fix);
            }
            if receiver.rx.changed().await.is_err() {
                return Err(WeatherError::GeolocationUnsupported);
            }
        }
    };

    match timeout(limit, wait).await {
        Ok(result) => result,
        Err(_) => Err(WeatherError::GeolocationTimeout),
    }
}

/// Full "use my location" flow: wait for a fix, then try to name it.
/// Reverse-geocode failures are swallowed; the fix itself is usable
/// without a name.
pub async fn locate(
    receiver: &mut FixReceiver,
    geocoder: &ReverseGeocoder,
) -> Result<Location, WeatherError> {
    let fix = wait_for_fix(receiver, FIX_TIMEOUT).await?;

    let name = geocoder
        .lookup(fix)
        .await
        .unwrap_or_else(|| FALLBACK_LOCATION_NAME.to_string());

    Ok(Location {
        latitude: fix.latitude,
        longitude: fix.longitude,
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Instant, advance, sleep};

    fn fix() -> Coordinates {
        Coordinates {
            latitude: 48.2,
            longitude: 16.37,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn resolves_when_a_fix_arrives() {
        let (source, mut receiver) = FixSource::channel();

        let waiter = tokio::spawn(async move {
            wait_for_fix(&mut receiver, FIX_TIMEOUT).await
        });

        sleep(Duration::from_millis(500)).await;
        source.publish(fix());

        let resolved = waiter.await.unwrap().unwrap();
        assert_eq!(resolved, fix());
    }

    #[tokio::test(start_paused = true)]
    async fn resolves_immediately_for_an_existing_fix() {
        let (source, mut receiver) = FixSource::channel();
        source.publish(fix());

        let started = Instant::now();
        let resolved = wait_for_fix(&mut receiver, FIX_TIMEOUT).await.unwrap();
        assert_eq!(resolved, fix());
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_after_five_seconds_without_a_fix() {
        let (_source, mut receiver) = FixSource::channel();

        let started = Instant::now();
        let result = wait_for_fix(&mut receiver, FIX_TIMEOUT).await;

        assert!(matches!(result, Err(WeatherError::GeolocationTimeout)));
        assert_eq!(started.elapsed(), FIX_TIMEOUT);

        // The timer went down with the future: advancing well past the
        // deadline finds nothing left to fire.
        advance(Duration::from_secs(60)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_source_means_unsupported() {
        let (source, mut receiver) = FixSource::channel();
        drop(source);

        let result = wait_for_fix(&mut receiver, FIX_TIMEOUT).await;
        assert!(matches!(result, Err(WeatherError::GeolocationUnsupported)));
    }

    #[tokio::test(start_paused = true)]
    async fn a_fix_published_just_before_the_source_drops_still_counts() {
        let (source, mut receiver) = FixSource::channel();
        source.publish(fix());
        drop(source);

        let resolved = wait_for_fix(&mut receiver, FIX_TIMEOUT).await.unwrap();
        assert_eq!(resolved, fix());
    }

    mod locate_flow {
        use super::*;
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        #[tokio::test]
        async fn names_the_fix_through_reverse_geocoding() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "address": { "city": "Vienna", "country": "Austria" }
                })))
                .mount(&server)
                .await;

            let (source, mut receiver) = FixSource::channel();
            source.publish(fix());

            let geocoder = ReverseGeocoder::with_base_url(server.uri());
            let location = locate(&mut receiver, &geocoder).await.unwrap();

            assert_eq!(location.latitude, fix().latitude);
            assert_eq!(location.name, "Vienna, Austria");
        }

        #[tokio::test]
        async fn geocode_failure_falls_back_to_a_generic_label() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(500))
                .mount(&server)
                .await;

            let (source, mut receiver) = FixSource::channel();
            source.publish(fix());

            let geocoder = ReverseGeocoder::with_base_url(server.uri());
            let location = locate(&mut receiver, &geocoder).await.unwrap();

            assert_eq!(location.name, FALLBACK_LOCATION_NAME);
        }
    }
}
