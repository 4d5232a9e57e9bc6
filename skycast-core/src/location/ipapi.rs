use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    FetchError, Location, LocationSource, http::get_json, location::LocationProvider,
    provider::Service,
};

/// The free tier is plain HTTP only.
pub const IPAPI_URL: &str = "http://ip-api.com/json";

#[derive(Debug, Clone)]
pub struct IpApiProvider {
    http: Client,
    url: String,
}

impl IpApiProvider {
    pub fn new(http: Client) -> Self {
        Self { http, url: IPAPI_URL.to_string() }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    city: Option<String>,
    country_code: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl TryFrom<IpApiResponse> for Location {
    type Error = FetchError;

    fn try_from(res: IpApiResponse) -> Result<Self, Self::Error> {
        if res.status != "success" {
            let reason = res.message.unwrap_or_else(|| format!("status '{}'", res.status));
            return Err(FetchError::invalid(Service::IpApi, reason));
        }

        let (Some(latitude), Some(longitude)) = (res.lat, res.lon) else {
            return Err(FetchError::invalid(Service::IpApi, "response has no coordinates"));
        };

        Ok(Location {
            city: res.city.filter(|c| !c.is_empty()).unwrap_or_else(|| Location::DEFAULT_CITY.into()),
            country: res
                .country_code
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| Location::DEFAULT_COUNTRY.into()),
            latitude,
            longitude,
            source: LocationSource::IpApi,
        })
    }
}

#[async_trait]
impl LocationProvider for IpApiProvider {
    fn service(&self) -> Service {
        Service::IpApi
    }

    async fn locate(&self) -> Result<Location, FetchError> {
        let parsed: IpApiResponse = get_json(Service::IpApi, self.http.get(self.url.as_str())).await?;
        Location::try_from(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_response() {
        let json = r#"{
            "status": "success",
            "country": "Japan",
            "countryCode": "JP",
            "city": "Tokyo",
            "lat": 35.6895,
            "lon": 139.6917,
            "query": "203.0.113.7"
        }"#;
        let res: IpApiResponse = serde_json::from_str(json).unwrap();
        let loc = Location::try_from(res).unwrap();

        assert_eq!(loc.city, "Tokyo");
        assert_eq!(loc.country, "JP");
        assert_eq!(loc.latitude, 35.6895);
        assert_eq!(loc.longitude, 139.6917);
        assert_eq!(loc.source, LocationSource::IpApi);
    }

    #[test]
    fn fail_status_carries_message() {
        let json = r#"{"status": "fail", "message": "private range", "query": "10.0.0.1"}"#;
        let res: IpApiResponse = serde_json::from_str(json).unwrap();
        let err = Location::try_from(res).unwrap_err();

        assert!(err.to_string().contains("private range"));
    }

    #[test]
    fn missing_coordinates_is_invalid_data() {
        let res: IpApiResponse =
            serde_json::from_str(r#"{"status": "success", "city": "Tokyo"}"#).unwrap();

        assert!(Location::try_from(res).is_err());
    }
}
