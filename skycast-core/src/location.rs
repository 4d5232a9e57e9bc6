//! Where is the caller?
//!
//! Lookups are tried in order and the first success wins. When every
//! lookup fails the resolver still returns [`Location::fallback`], so
//! resolution itself never fails.

use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::{FetchError, Location, provider::Service};

pub mod ipapi;
pub mod ipinfo;

pub use ipapi::IpApiProvider;
pub use ipinfo::IpInfoProvider;

#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    fn service(&self) -> Service;

    async fn locate(&self) -> Result<Location, FetchError>;
}

/// Outcome of [`LocationResolver::resolve`]: the location plus every
/// lookup that failed on the way.
#[derive(Debug)]
pub struct Resolved {
    pub location: Location,
    pub failures: Vec<FetchError>,
}

#[derive(Debug)]
pub struct LocationResolver {
    providers: Vec<Box<dyn LocationProvider>>,
}

impl LocationResolver {
    pub fn new(providers: Vec<Box<dyn LocationProvider>>) -> Self {
        Self { providers }
    }

    /// ipinfo.io first, ip-api.com second.
    pub fn with_default_providers(http: Client) -> Self {
        Self::new(vec![
            Box::new(IpInfoProvider::new(http.clone())),
            Box::new(IpApiProvider::new(http)),
        ])
    }

    pub async fn resolve(&self) -> Resolved {
        let mut failures = Vec::new();

        for provider in &self.providers {
            match provider.locate().await {
                Ok(location) => {
                    debug!(service = %provider.service(), ?location, "location resolved");
                    return Resolved { location, failures };
                }
                Err(e) => {
                    warn!(service = %provider.service(), error = %e, "location lookup failed");
                    failures.push(e);
                }
            }
        }

        warn!("all location lookups failed, using {}", Location::DEFAULT_CITY);
        Resolved { location: Location::fallback(), failures }
    }
}

/// Apply `--lat`/`--lon`. Both must be present to take effect.
pub fn override_coordinates(location: Location, lat: Option<f64>, lon: Option<f64>) -> Location {
    match (lat, lon) {
        (Some(lat), Some(lon)) => location.with_coordinates(lat, lon),
        (None, None) => location,
        _ => {
            warn!("both --lat and --lon are required to override the location; ignoring");
            location
        }
    }
}

/// Parse ipinfo's `"lat,lon"` form.
pub(crate) fn parse_lat_lon(raw: &str) -> Option<(f64, f64)> {
    let (lat, lon) = raw.split_once(',')?;
    let lat = lat.trim().parse::<f64>().ok()?;
    let lon = lon.trim().parse::<f64>().ok()?;

    ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)).then_some((lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocationSource;
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    #[derive(Debug)]
    struct Failing(Service);

    #[async_trait]
    impl LocationProvider for Failing {
        fn service(&self) -> Service {
            self.0
        }

        async fn locate(&self) -> Result<Location, FetchError> {
            Err(FetchError::invalid(self.0, "lookup refused"))
        }
    }

    #[derive(Debug)]
    struct Fixed {
        city: &'static str,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl LocationProvider for Fixed {
        fn service(&self) -> Service {
            Service::IpApi
        }

        async fn locate(&self) -> Result<Location, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Location {
                city: self.city.to_string(),
                country: "NL".to_string(),
                latitude: 52.37,
                longitude: 4.89,
                source: LocationSource::IpApi,
            })
        }
    }

    #[tokio::test]
    async fn falls_back_to_default_when_all_lookups_fail() {
        let resolver = LocationResolver::new(vec![
            Box::new(Failing(Service::IpInfo)),
            Box::new(Failing(Service::IpApi)),
        ]);

        let resolved = resolver.resolve().await;

        assert_eq!(resolved.location, Location::fallback());
        assert_eq!(resolved.location.city, "Singapore");
        assert_eq!(resolved.location.latitude, 1.29);
        assert_eq!(resolved.location.longitude, 103.85);
        assert_eq!(resolved.failures.len(), 2);
        assert_eq!(resolved.failures[0].service(), Service::IpInfo);
    }

    #[tokio::test]
    async fn secondary_is_used_when_primary_fails() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = LocationResolver::new(vec![
            Box::new(Failing(Service::IpInfo)),
            Box::new(Fixed { city: "Amsterdam", calls: calls.clone() }),
        ]);

        let resolved = resolver.resolve().await;

        assert_eq!(resolved.location.city, "Amsterdam");
        assert_eq!(resolved.failures.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn first_success_stops_the_chain() {
        let second = Arc::new(AtomicUsize::new(0));
        let resolver = LocationResolver::new(vec![
            Box::new(Fixed { city: "Utrecht", calls: Arc::new(AtomicUsize::new(0)) }),
            Box::new(Fixed { city: "Amsterdam", calls: second.clone() }),
        ]);

        let resolved = resolver.resolve().await;

        assert_eq!(resolved.location.city, "Utrecht");
        assert!(resolved.failures.is_empty());
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unreachable_services_fall_back_to_default() {
        let http = crate::http::client(Duration::from_secs(2)).unwrap();
        let resolver = LocationResolver::new(vec![
            Box::new(IpInfoProvider::new(http.clone()).with_url("http://127.0.0.1:9/json")),
            Box::new(IpApiProvider::new(http).with_url("http://127.0.0.1:9/json")),
        ]);

        let resolved = resolver.resolve().await;

        assert_eq!(resolved.location.source, LocationSource::Default);
        assert_eq!(resolved.failures.len(), 2);
    }

    #[test]
    fn override_requires_both_coordinates() {
        let only_lat = override_coordinates(Location::fallback(), Some(10.0), None);
        assert_eq!(only_lat, Location::fallback());

        let only_lon = override_coordinates(Location::fallback(), None, Some(10.0));
        assert_eq!(only_lon, Location::fallback());
    }

    #[test]
    fn override_replaces_coordinates_exactly() {
        let loc = override_coordinates(Location::fallback(), Some(-33.8688), Some(151.2093));

        assert_eq!(loc.latitude, -33.8688);
        assert_eq!(loc.longitude, 151.2093);
        assert_eq!(loc.source, LocationSource::Manual);
    }

    #[test]
    fn parse_lat_lon_accepts_ipinfo_format() {
        assert_eq!(parse_lat_lon("1.2897,103.8501"), Some((1.2897, 103.8501)));
        assert_eq!(parse_lat_lon(" -33.87 , 151.21 "), Some((-33.87, 151.21)));
    }

    #[test]
    fn parse_lat_lon_rejects_garbage() {
        assert_eq!(parse_lat_lon(""), None);
        assert_eq!(parse_lat_lon("1.29"), None);
        assert_eq!(parse_lat_lon("north,east"), None);
        assert_eq!(parse_lat_lon("91.0,10.0"), None);
    }
}
