//! Extraction configuration
//!
//! Every logical field the pipeline extracts is located by an ordered
//! selector cascade, most specific first (structured test attribute →
//! semantic class → substring-matched class). The cascades live here as
//! data so a markup change is a configuration edit, not a code change.
//! A JSON override file may replace any subset of the sections.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ExtractionError, ExtractionResult};

/// Selector cascades for all page regions, keyed by logical field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub date_strip: DateStripSelectors,
    pub flight_cards: FlightCardSelectors,
    pub page_summary: PageSummarySelectors,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            date_strip: DateStripSelectors::default(),
            flight_cards: FlightCardSelectors::default(),
            page_summary: PageSummarySelectors::default(),
        }
    }
}

impl ExtractionConfig {
    /// Load a (possibly partial) selector configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> ExtractionResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ExtractionError::configuration(format!(
                "cannot read selector file {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            ExtractionError::configuration(format!(
                "invalid selector file {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// Selectors for the nearby-dates strip above the flight list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DateStripSelectors {
    pub item: Vec<String>,
    pub day_label: Vec<String>,
    pub weekday: Vec<String>,
    pub price: Vec<String>,
    /// Class-attribute tokens marking the currently selected date item.
    pub selected_class_tokens: Vec<String>,
}

impl Default for DateStripSelectors {
    fn default() -> Self {
        Self {
            item: vec![
                "[data-ref='price-carousel-item']".to_string(),
                ".carousel-datepicker__item".to_string(),
                "li[class*='carousel-item']".to_string(),
            ],
            day_label: vec![
                "[data-ref='carousel-item-date']".to_string(),
                ".carousel-item__date".to_string(),
                "div[class*='date']".to_string(),
            ],
            weekday: vec![
                "[data-ref='carousel-item-weekday']".to_string(),
                ".carousel-item__weekday".to_string(),
                "div[class*='weekday']".to_string(),
            ],
            price: vec![
                "[data-ref='carousel-item-price']".to_string(),
                ".carousel-item__price".to_string(),
                "span[class*='price']".to_string(),
            ],
            selected_class_tokens: vec![
                "carousel-item--selected".to_string(),
                "selected".to_string(),
                "current".to_string(),
            ],
        }
    }
}

/// Selectors for the per-offer flight cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightCardSelectors {
    /// Card container candidates; the first matching strategy supplies the
    /// card list.
    pub card: Vec<String>,
    pub departure_time: Vec<String>,
    pub arrival_time: Vec<String>,
    /// Markup variants that render both times as siblings of one shape;
    /// matched as a collection and taken positionally.
    pub paired_times: Vec<String>,
    pub flight_number: Vec<String>,
    pub price: Vec<String>,
    pub duration: Vec<String>,
    /// Class-attribute tokens that make an element a candidate for the
    /// heuristic card scan when no card selector matches.
    pub heuristic_class_tokens: Vec<String>,
}

impl Default for FlightCardSelectors {
    fn default() -> Self {
        Self {
            card: vec![
                "[data-ref='flight-card']".to_string(),
                ".flight-card".to_string(),
                "div[class*='flight-card']".to_string(),
                "article[class*='journey-card']".to_string(),
            ],
            departure_time: vec![
                "[data-ref='flight-segment.departure-time']".to_string(),
                ".departure-time".to_string(),
                "div[class*='depart'] span[class*='time']".to_string(),
            ],
            arrival_time: vec![
                "[data-ref='flight-segment.arrival-time']".to_string(),
                ".arrival-time".to_string(),
                "div[class*='arriv'] span[class*='time']".to_string(),
            ],
            paired_times: vec![
                "[data-ref='flight-segment-time']".to_string(),
                ".flight-time".to_string(),
                "span[class*='time']".to_string(),
            ],
            flight_number: vec![
                "[data-ref='flight-number']".to_string(),
                ".card-flight-num".to_string(),
                "span[class*='flight-num']".to_string(),
            ],
            price: vec![
                "[data-ref='flight-price.amount']".to_string(),
                ".flight-card__price".to_string(),
                "span[class*='price']".to_string(),
            ],
            duration: vec![
                "[data-ref='flight-duration']".to_string(),
                ".flight-duration".to_string(),
                "span[class*='duration']".to_string(),
            ],
            heuristic_class_tokens: vec![
                "flight".to_string(),
                "card".to_string(),
                "journey".to_string(),
                "trip".to_string(),
            ],
        }
    }
}

/// Selectors for the page-level fallback summary and timetable slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSummarySelectors {
    pub route: Vec<String>,
    pub date: Vec<String>,
    pub passenger_summary: Vec<String>,
    pub min_price: Vec<String>,
    pub time_slot: Vec<String>,
    /// Price cascade evaluated inside each time-slot element.
    pub time_slot_price: Vec<String>,
}

impl Default for PageSummarySelectors {
    fn default() -> Self {
        Self {
            route: vec![
                "[data-ref='route-summary']".to_string(),
                ".route-header__title".to_string(),
                "h1[class*='route']".to_string(),
                "h1".to_string(),
            ],
            date: vec![
                "[data-ref='travel-date']".to_string(),
                ".travel-date".to_string(),
                "div[class*='selected-date']".to_string(),
            ],
            passenger_summary: vec![
                "[data-ref='pax-summary']".to_string(),
                ".passenger-summary".to_string(),
                "div[class*='passenger']".to_string(),
            ],
            min_price: vec![
                "[data-ref='fare-summary.price']".to_string(),
                ".fare-summary__price".to_string(),
                "div[class*='summary'] span[class*='price']".to_string(),
            ],
            time_slot: vec![
                "[data-ref='timetable-slot']".to_string(),
                ".timetable__slot".to_string(),
                "li[class*='time-slot']".to_string(),
            ],
            time_slot_price: vec![
                "[data-ref='slot-price']".to_string(),
                ".timetable__slot-price".to_string(),
                "span[class*='price']".to_string(),
            ],
        }
    }
}
