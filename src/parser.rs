//! JSON parser for AeroAPI airport flight listings.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::record::Direction;

/// Origin or destination airport as nested in a raw flight entry.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawAirport {
    #[serde(default, deserialize_with = "lenient::text")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub city: Option<String>,
}

/// One flight entry exactly as the API returns it.
///
/// Every field is optional; AeroAPI omits or nulls fields freely. Scalars
/// of an unexpected JSON type are coerced or dropped instead of failing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawFlight {
    #[serde(default, deserialize_with = "lenient::text")]
    pub ident: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub operator: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub flight_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub cancelled: Option<bool>,
    #[serde(default)]
    pub origin: Option<RawAirport>,
    #[serde(default)]
    pub destination: Option<RawAirport>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub scheduled_in: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub actual_in: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub scheduled_off: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub actual_off: Option<String>,
}

impl RawFlight {
    /// Scheduled timestamp string for `direction` (gate-in for arrivals,
    /// wheels-off for departures).
    pub fn scheduled_for(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Arrival => self.scheduled_in.as_deref(),
            Direction::Departure => self.scheduled_off.as_deref(),
        }
    }

    /// Actual timestamp string for `direction`.
    pub fn actual_for(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Arrival => self.actual_in.as_deref(),
            Direction::Departure => self.actual_off.as_deref(),
        }
    }

    /// City at the other end of the flight: where an arrival came from, or
    /// where a departure is going.
    pub fn counterpart_city(&self, direction: Direction) -> Option<&str> {
        let airport = match direction {
            Direction::Arrival => self.origin.as_ref(),
            Direction::Departure => self.destination.as_ref(),
        };
        airport.and_then(|a| a.city.as_deref())
    }
}

/// Decodes the flight list for `direction` from an AeroAPI response body.
///
/// The body is an object keyed by `arrivals` / `departures` (plus paging
/// metadata, which is ignored). A missing or null list yields no flights.
/// Entries that are not flight objects are logged and skipped.
///
/// # Errors
///
/// Returns an error if the body is not JSON, or if the list is present but
/// not an array.
pub fn parse_flights(bytes: &[u8], direction: Direction) -> Result<Vec<RawFlight>> {
    let mut body: Value = serde_json::from_slice(bytes).context("response body is not JSON")?;

    let entries = match body.get_mut(direction.plural()).map(Value::take) {
        Some(Value::Null) | None => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(other) => bail!(
            "malformed `{}` list: expected an array, got {other}",
            direction.plural()
        ),
    };

    let flights = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(flight) => Some(flight),
            Err(e) => {
                warn!(%direction, index, error = %e, "Skipping undecodable flight entry");
                None
            }
        })
        .collect();

    Ok(flights)
}

/// Tolerant decoders for scalar fields.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Strings as-is, numbers and booleans in their JSON spelling.
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => Some(b),
            _ => None,
        })
    }
}
