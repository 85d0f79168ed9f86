//! Fare record value objects
//!
//! Everything here is produced by one extraction run over one rendered page
//! and never mutated afterwards. Absence of data is a value ("N/A" / empty
//! string), not an error.

use serde::{Deserialize, Serialize};

/// Sentinel for any field that could not be resolved from the page.
pub const NOT_AVAILABLE: &str = "N/A";

/// A price as shown on the page: the numeric text and whatever currency
/// marker surrounded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal string as parsed, or "N/A" when the text held no numeric run.
    pub amount: String,
    /// Currency marker ("Ft", "€", ...); empty when the page showed none.
    pub currency_symbol: String,
}

impl Money {
    pub fn new(amount: impl Into<String>, currency_symbol: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_symbol: currency_symbol.into(),
        }
    }

    /// The unresolved price.
    pub fn not_available() -> Self {
        Self {
            amount: NOT_AVAILABLE.to_string(),
            currency_symbol: String::new(),
        }
    }
}

/// One calendar date's summarized lowest fare, as shown in the date-strip
/// widget above the flight list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateFarePoint {
    /// Day-plus-month text as rendered ("12 Aug").
    pub calendar_label: String,
    pub weekday: String,
    pub price: Money,
    /// Structurally marked as the currently selected date. At most one item
    /// per strip should carry this; more than one is a markup anomaly.
    pub is_selected_date: bool,
}

/// One concrete priced flight option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightOffer {
    pub flight_number: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub price: Money,
    pub duration: String,
    /// Carried from the query unless page-level extraction supplied a route.
    pub origin_code: String,
    pub destination_code: String,
}

/// Result of one extraction run against one DOM snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FareResult {
    pub offers: Vec<FlightOffer>,
    pub nearby_dates: Vec<DateFarePoint>,
}
