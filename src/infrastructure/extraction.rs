//! HTML extraction pipeline
//!
//! One parameterized pipeline replaces per-markup-variant extraction
//! scripts: selector cascades are configuration data, parsers are compiled
//! once, and a run is a pure function from a parsed DOM snapshot to a
//! `FareResult`.

pub mod cascade;
pub mod config;
pub mod context;
pub mod date_strip;
pub mod error;
pub mod flight_cards;
pub mod page_summary;
pub mod reconcile;
pub mod text;

pub use cascade::SelectorCascade;
pub use config::ExtractionConfig;
pub use context::ExtractContext;
pub use error::{ExtractionError, ExtractionResult};

use scraper::Html;
use tracing::debug;

use crate::domain::fare::FareResult;
use crate::domain::query::FareQuery;

/// The extraction pipeline: compiled parsers for every page region.
pub struct FareExtractionPipeline {
    date_strip: date_strip::DateStripParser,
    flight_cards: flight_cards::FlightCardParser,
    page_summary: page_summary::PageSummaryParser,
}

impl FareExtractionPipeline {
    pub fn new(config: &ExtractionConfig) -> ExtractionResult<Self> {
        Ok(Self {
            date_strip: date_strip::DateStripParser::new(&config.date_strip)?,
            flight_cards: flight_cards::FlightCardParser::new(&config.flight_cards)?,
            page_summary: page_summary::PageSummaryParser::new(&config.page_summary)?,
        })
    }

    /// Run one extraction pass over a parsed DOM snapshot. Never fails:
    /// a page with nothing extractable yields an empty result.
    pub fn extract(&self, snapshot: &Html, query: &FareQuery) -> FareResult {
        let scope = snapshot.root_element();
        let ctx = ExtractContext::new(query);

        let nearby_dates = self.date_strip.parse(scope);
        let primary = self.flight_cards.parse(scope, &ctx);

        // Fallback sources are consulted only when the card extractor came
        // back empty.
        let slot_offers = if primary.is_empty() {
            let summary = self.page_summary.parse(scope);
            self.page_summary.time_slot_offers(scope, &summary, &ctx)
        } else {
            Vec::new()
        };

        let offers = reconcile::reconcile(primary, &nearby_dates, slot_offers, query);
        debug!(
            "Extraction run produced {} offers and {} date fare points",
            offers.len(),
            nearby_dates.len()
        );
        FareResult {
            offers,
            nearby_dates,
        }
    }
}
