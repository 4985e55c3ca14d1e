use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use lis_on_time::config::AeroApiConfig;
use lis_on_time::fetch::auth::ApiKey;
use lis_on_time::fetch::{BasicClient, HttpClient, fetch_json_bytes};
use lis_on_time::parser::parse_flights;
use lis_on_time::record::Direction;
use reqwest::Url;
use tracing::debug;

use crate::services::flight_api::{DailyFlights, FlightApi};

/// AeroAPI returns every page in one response up to this many pages.
const MAX_PAGES: &str = "1000";

pub struct AeroApiClient<C> {
    http: C,
    base_url: String,
}

impl AeroApiClient<ApiKey<BasicClient>> {
    /// Authenticated client for the configured endpoint.
    pub fn from_config(config: &AeroApiConfig) -> Result<Self> {
        let http = ApiKey::aeroapi(BasicClient::new()?, &config.api_key)?;
        Ok(Self::new(http, &config.base_url))
    }
}

impl<C> AeroApiClient<C> {
    pub fn new(http: C, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{base}/airports/{airport}/flights/{arrivals|departures}` covering
    /// the whole UTC day of `date`.
    fn flights_url(&self, airport: &str, direction: Direction, date: NaiveDate) -> Result<Url> {
        let day = date.format("%Y-%m-%d");
        let start = format!("{day}T00:00:00Z");
        let end = format!("{day}T23:59:59Z");

        Url::parse_with_params(
            &format!(
                "{}/airports/{}/flights/{}",
                self.base_url,
                airport,
                direction.plural()
            ),
            &[
                ("start", start.as_str()),
                ("end", end.as_str()),
                ("max_pages", MAX_PAGES),
            ],
        )
        .with_context(|| format!("invalid AeroAPI base URL '{}'", self.base_url))
    }
}

#[async_trait]
impl<C: HttpClient> FlightApi for AeroApiClient<C> {
    #[tracing::instrument(skip(self, direction, date), fields(%direction, %date))]
    async fn daily_flights(
        &self,
        airport: &str,
        direction: Direction,
        date: NaiveDate,
    ) -> Result<DailyFlights> {
        let url = self.flights_url(airport, direction, date)?;
        debug!(%url, "Requesting flights");

        let raw_body = fetch_json_bytes(&self.http, url)
            .await
            .with_context(|| format!("fetching {direction} for {airport} on {date}"))?;
        let flights = parse_flights(&raw_body, direction)?;
        debug!(flights = flights.len(), bytes = raw_body.len(), "Flights received");

        Ok(DailyFlights { raw_body, flights })
    }
}
