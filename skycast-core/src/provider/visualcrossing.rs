use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    FetchError, Location, MoonPhase,
    http::get_json,
    provider::{MoonProvider, Service},
};

pub const VISUAL_CROSSING_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";

/// Moon phase lookups through the Visual Crossing timeline API.
#[derive(Debug, Clone)]
pub struct VisualCrossingProvider {
    api_key: String,
    http: Client,
    base_url: String,
}

impl VisualCrossingProvider {
    pub fn new(api_key: String, http: Client) -> Self {
        Self { api_key, http, base_url: VISUAL_CROSSING_URL.to_string() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn timeline_url(&self, location: &Location, date: NaiveDate) -> String {
        format!(
            "{}/{},{}/{date}/{date}",
            self.base_url.trim_end_matches('/'),
            location.latitude,
            location.longitude,
        )
    }
}

#[derive(Debug, Deserialize)]
struct VcDay {
    moonphase: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct VcTimelineResponse {
    days: Vec<VcDay>,
}

impl VcTimelineResponse {
    fn moon_phase(&self) -> Result<MoonPhase, FetchError> {
        let raw = self
            .days
            .first()
            .ok_or_else(|| FetchError::invalid(Service::VisualCrossing, "response contained no days"))?
            .moonphase
            .ok_or_else(|| FetchError::invalid(Service::VisualCrossing, "day has no moonphase"))?;

        MoonPhase::new(raw).ok_or_else(|| {
            FetchError::invalid(Service::VisualCrossing, format!("moonphase {raw} outside 0..=1"))
        })
    }
}

#[async_trait]
impl MoonProvider for VisualCrossingProvider {
    async fn moon_phase(
        &self,
        location: &Location,
        date: NaiveDate,
    ) -> Result<MoonPhase, FetchError> {
        let url = self.timeline_url(location, date);
        debug!(%url, "fetching moon phase");

        let request = self.http.get(url.as_str()).query(&[
            ("key", self.api_key.as_str()),
            ("unitGroup", "metric"),
            ("include", "days"),
            ("elements", "datetime,moonphase"),
        ]);

        let parsed: VcTimelineResponse = get_json(Service::VisualCrossing, request).await?;
        parsed.moon_phase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn provider() -> VisualCrossingProvider {
        let http = crate::http::client(Duration::from_secs(2)).unwrap();
        VisualCrossingProvider::new("SECRET".into(), http)
    }

    #[test]
    fn timeline_url_uses_coordinates_and_single_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let url = provider().timeline_url(&Location::fallback(), date);

        assert_eq!(
            url,
            format!("{VISUAL_CROSSING_URL}/1.29,103.85/2025-03-01/2025-03-01")
        );
    }

    #[test]
    fn parses_moonphase_of_first_day() {
        let json = r#"{"address": "1.29,103.85", "days": [{"datetime": "2025-03-01", "moonphase": 0.04}]}"#;
        let parsed: VcTimelineResponse = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.moon_phase().unwrap().fraction(), 0.04);
    }

    #[test]
    fn empty_days_is_invalid_data() {
        let parsed: VcTimelineResponse = serde_json::from_str(r#"{"days": []}"#).unwrap();
        let err = parsed.moon_phase().unwrap_err();

        assert!(matches!(err, FetchError::InvalidData { service: Service::VisualCrossing, .. }));
    }

    #[test]
    fn out_of_range_phase_is_invalid_data() {
        let parsed: VcTimelineResponse =
            serde_json::from_str(r#"{"days": [{"moonphase": 1.7}]}"#).unwrap();
        let err = parsed.moon_phase().unwrap_err();

        assert!(err.to_string().contains("outside 0..=1"));
    }

    #[tokio::test]
    async fn transport_errors_do_not_leak_api_key() {
        let provider = provider().with_base_url("http://127.0.0.1:9/timeline");
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let err = provider.moon_phase(&Location::fallback(), date).await.unwrap_err();

        assert_eq!(err.service(), Service::VisualCrossing);
        assert!(!err.to_string().contains("SECRET"));
    }
}
