//! Page-level fallback extraction
//!
//! Last-resort, single-element resolutions for pages that render no offer
//! cards at all: a route/date/passenger summary with the page-wide minimum
//! price, and the timetable slots the reconciler turns into offers when
//! even the date strip gives nothing usable.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use tracing::debug;

use super::cascade::SelectorCascade;
use super::config::PageSummarySelectors;
use super::context::ExtractContext;
use super::error::ExtractionResult;
use super::text;
use crate::domain::fare::{FlightOffer, Money, NOT_AVAILABLE};

/// IATA pair in a route heading ("Budapest (BUD) to London (LTN)").
static ROUTE_CODES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z]{3})\b.*?\b([A-Z]{3})\b").unwrap());

/// Page-wide summary used when no per-offer extraction succeeded.
#[derive(Debug, Clone)]
pub struct PageSummary {
    pub route: String,
    pub date: String,
    pub passenger_summary: String,
    pub min_price: Money,
}

pub struct PageSummaryParser {
    route: SelectorCascade,
    date: SelectorCascade,
    passenger_summary: SelectorCascade,
    min_price: SelectorCascade,
    time_slot: SelectorCascade,
    time_slot_price: SelectorCascade,
}

impl PageSummaryParser {
    pub fn new(selectors: &PageSummarySelectors) -> ExtractionResult<Self> {
        Ok(Self {
            route: SelectorCascade::compile("page_summary.route", &selectors.route)?,
            date: SelectorCascade::compile("page_summary.date", &selectors.date)?,
            passenger_summary: SelectorCascade::compile(
                "page_summary.passenger_summary",
                &selectors.passenger_summary,
            )?,
            min_price: SelectorCascade::compile("page_summary.min_price", &selectors.min_price)?,
            time_slot: SelectorCascade::compile("page_summary.time_slot", &selectors.time_slot)?,
            time_slot_price: SelectorCascade::compile(
                "page_summary.time_slot_price",
                &selectors.time_slot_price,
            )?,
        })
    }

    pub fn parse(&self, scope: ElementRef<'_>) -> PageSummary {
        let min_price_text = self.min_price.resolve_text(scope, "");
        let min_price = if min_price_text.is_empty() {
            Money::not_available()
        } else {
            text::parse_money(&min_price_text)
        };
        let summary = PageSummary {
            route: self.route.resolve_text(scope, NOT_AVAILABLE),
            date: self.date.resolve_text(scope, NOT_AVAILABLE),
            passenger_summary: self.passenger_summary.resolve_text(scope, NOT_AVAILABLE),
            min_price,
        };
        debug!(
            "Page summary: route '{}', min price {} {}",
            summary.route, summary.min_price.amount, summary.min_price.currency_symbol
        );
        summary
    }

    /// IATA pair from the route heading, when the page shows one.
    pub fn route_codes(summary: &PageSummary) -> Option<(String, String)> {
        ROUTE_CODES
            .captures(&summary.route)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
    }

    /// One offer per page-level timetable slot. A slot without its own
    /// price carries the page minimum; route codes come from the page when
    /// it shows them, otherwise from the query.
    pub fn time_slot_offers(
        &self,
        scope: ElementRef<'_>,
        summary: &PageSummary,
        ctx: &ExtractContext<'_>,
    ) -> Vec<FlightOffer> {
        let (origin, destination) = Self::route_codes(summary).unwrap_or_else(|| {
            (
                ctx.query.origin_code.clone(),
                ctx.query.destination_code.clone(),
            )
        });
        self.time_slot
            .resolve_all(scope)
            .into_iter()
            .map(|slot| {
                let slot_text = slot.text().collect::<String>();
                let departure = text::first_time(&slot_text)
                    .map(str::to_string)
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string());
                let price_text = self.time_slot_price.resolve_text(slot, "");
                let price = if price_text.is_empty() {
                    summary.min_price.clone()
                } else {
                    text::parse_money(&price_text)
                };
                FlightOffer {
                    flight_number: NOT_AVAILABLE.to_string(),
                    departure_time: departure,
                    arrival_time: NOT_AVAILABLE.to_string(),
                    price,
                    duration: NOT_AVAILABLE.to_string(),
                    origin_code: origin.clone(),
                    destination_code: destination.clone(),
                }
            })
            .collect()
    }
}
