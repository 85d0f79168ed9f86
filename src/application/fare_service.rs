//! Fare scraping service
//!
//! Coordinates one query end to end: assemble the search URL, acquire the
//! rendered page, run the extraction pipeline, report the outcome.

use scraper::Html;
use tracing::info;
use url::Url;

use crate::domain::fare::FareResult;
use crate::domain::query::FareQuery;
use crate::infrastructure::extraction::{
    reconcile, ExtractionConfig, ExtractionResult, FareExtractionPipeline,
};
use crate::infrastructure::page_source::{build_search_url, PageSource};

pub struct FareScrapeService {
    pipeline: FareExtractionPipeline,
    source: Box<dyn PageSource>,
    base_url: Url,
}

impl FareScrapeService {
    /// Build the service; compiles every selector cascade up front so a
    /// broken configuration fails here, not mid-run.
    pub fn new(
        config: &ExtractionConfig,
        source: Box<dyn PageSource>,
        base_url: Url,
    ) -> ExtractionResult<Self> {
        Ok(Self {
            pipeline: FareExtractionPipeline::new(config)?,
            source,
            base_url,
        })
    }

    /// Run one fare scrape for `query`.
    pub async fn run(&self, query: &FareQuery) -> ExtractionResult<FareResult> {
        let url = build_search_url(&self.base_url, query);
        info!(
            "Scraping fares {} -> {} on {}",
            query.origin_code, query.destination_code, query.date
        );

        let body = self.source.fetch(&url).await?;
        let snapshot = Html::parse_document(&body);
        let result = self.pipeline.extract(&snapshot, query);

        match reconcile::select_cheapest(&result.offers) {
            Some(offer) => info!(
                "Extracted {} offers, {} nearby dates; cheapest {} {}",
                result.offers.len(),
                result.nearby_dates.len(),
                offer.price.amount,
                offer.price.currency_symbol
            ),
            None => info!(
                "Extraction produced no offers ({} nearby dates)",
                result.nearby_dates.len()
            ),
        }
        Ok(result)
    }
}
