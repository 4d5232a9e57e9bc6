use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    FetchError, Location, LocationSource,
    http::get_json,
    location::{LocationProvider, parse_lat_lon},
    provider::Service,
};

pub const IPINFO_URL: &str = "https://ipinfo.io/json";

#[derive(Debug, Clone)]
pub struct IpInfoProvider {
    http: Client,
    url: String,
}

impl IpInfoProvider {
    pub fn new(http: Client) -> Self {
        Self { http, url: IPINFO_URL.to_string() }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    city: Option<String>,
    country: Option<String>,
    loc: Option<String>,
}

impl TryFrom<IpInfoResponse> for Location {
    type Error = FetchError;

    /// Missing fields take the fallback location's values; a `loc` that is
    /// present but unparsable is an error.
    fn try_from(res: IpInfoResponse) -> Result<Self, Self::Error> {
        let fallback = Location::fallback();

        let (latitude, longitude) = match res.loc.as_deref() {
            None => (fallback.latitude, fallback.longitude),
            Some(raw) => parse_lat_lon(raw).ok_or_else(|| {
                FetchError::invalid(Service::IpInfo, format!("unparsable loc '{raw}'"))
            })?,
        };

        Ok(Location {
            city: res.city.filter(|c| !c.is_empty()).unwrap_or(fallback.city),
            country: res.country.filter(|c| !c.is_empty()).unwrap_or(fallback.country),
            latitude,
            longitude,
            source: LocationSource::IpInfo,
        })
    }
}

#[async_trait]
impl LocationProvider for IpInfoProvider {
    fn service(&self) -> Service {
        Service::IpInfo
    }

    async fn locate(&self) -> Result<Location, FetchError> {
        let parsed: IpInfoResponse = get_json(Service::IpInfo, self.http.get(self.url.as_str())).await?;
        Location::try_from(parsed)
    }
}
