//! Fare query value objects
//!
//! The immutable input driving one scrape. Validated once at the
//! orchestration boundary and passed by reference into the pipeline; the
//! core never reads ambient defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("'{0}' is not a three-letter IATA airport code")]
    BadAirportCode(String),

    #[error("party must include at least one adult or teen")]
    NoLeadTraveller,

    #[error("{infants} infants exceed {adults} adults (one lap infant per adult)")]
    TooManyInfants { infants: u8, adults: u8 },
}

/// Travellers by fare age band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyComposition {
    pub adults: u8,
    pub teens: u8,
    pub children: u8,
    pub infants: u8,
}

impl PartyComposition {
    pub fn total(&self) -> u16 {
        self.adults as u16 + self.teens as u16 + self.children as u16 + self.infants as u16
    }
}

/// One validated fare search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareQuery {
    pub origin_code: String,
    pub destination_code: String,
    pub date: NaiveDate,
    pub party: PartyComposition,
}

impl FareQuery {
    /// Validate and normalize the query. Airport codes are uppercased;
    /// bad codes and impossible party compositions are rejected here so the
    /// pipeline can assume a well-formed query.
    pub fn new(
        origin_code: &str,
        destination_code: &str,
        date: NaiveDate,
        party: PartyComposition,
    ) -> Result<Self, QueryError> {
        if party.adults == 0 && party.teens == 0 {
            return Err(QueryError::NoLeadTraveller);
        }
        if party.infants > party.adults {
            return Err(QueryError::TooManyInfants {
                infants: party.infants,
                adults: party.adults,
            });
        }
        Ok(Self {
            origin_code: Self::validate_code(origin_code)?,
            destination_code: Self::validate_code(destination_code)?,
            date,
            party,
        })
    }

    fn validate_code(code: &str) -> Result<String, QueryError> {
        let trimmed = code.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(QueryError::BadAirportCode(code.to_string()));
        }
        Ok(trimmed.to_ascii_uppercase())
    }
}
