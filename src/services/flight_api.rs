//! Trait and types for sources of daily airport flight listings.

use anyhow::Result;
use chrono::NaiveDate;
use lis_on_time::parser::RawFlight;
use lis_on_time::record::Direction;

/// One day of one direction's flights at an airport.
pub struct DailyFlights {
    /// Response body exactly as received, kept for optional archiving.
    pub raw_body: Vec<u8>,
    pub flights: Vec<RawFlight>,
}

/// Abstraction over a flight data provider (e.g., FlightAware AeroAPI).
#[async_trait::async_trait]
pub trait FlightApi: Send + Sync {
    /// Returns every flight of `direction` at `airport` scheduled on `date`
    /// (UTC day bounds).
    async fn daily_flights(
        &self,
        airport: &str,
        direction: Direction,
        date: NaiveDate,
    ) -> Result<DailyFlights>;
}
