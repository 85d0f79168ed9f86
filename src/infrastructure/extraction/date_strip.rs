//! Date-strip extraction
//!
//! The results page shows a strip of nearby dates, each with its lowest
//! fare. One `DateFarePoint` per visible item, in strip order. Selected
//! state is structural (class membership), never derived from text.

use scraper::ElementRef;
use tracing::{debug, warn};

use super::cascade::SelectorCascade;
use super::config::DateStripSelectors;
use super::error::ExtractionResult;
use super::text;
use crate::domain::fare::{DateFarePoint, Money, NOT_AVAILABLE};

pub struct DateStripParser {
    items: SelectorCascade,
    day_label: SelectorCascade,
    weekday: SelectorCascade,
    price: SelectorCascade,
    selected_class_tokens: Vec<String>,
}

impl DateStripParser {
    pub fn new(selectors: &DateStripSelectors) -> ExtractionResult<Self> {
        Ok(Self {
            items: SelectorCascade::compile("date_strip.item", &selectors.item)?,
            day_label: SelectorCascade::compile("date_strip.day_label", &selectors.day_label)?,
            weekday: SelectorCascade::compile("date_strip.weekday", &selectors.weekday)?,
            price: SelectorCascade::compile("date_strip.price", &selectors.price)?,
            selected_class_tokens: selectors.selected_class_tokens.clone(),
        })
    }

    /// Extract every visible date fare point, in strip order. An empty
    /// strip yields an empty list, never a fault.
    pub fn parse(&self, scope: ElementRef<'_>) -> Vec<DateFarePoint> {
        let items = self.items.resolve_all(scope);
        let mut points = Vec::with_capacity(items.len());
        for item in items {
            let price_text = self.price.resolve_text(item, "");
            let price = if price_text.is_empty() {
                Money::not_available()
            } else {
                text::parse_money(&price_text)
            };
            points.push(DateFarePoint {
                calendar_label: self.day_label.resolve_text(item, NOT_AVAILABLE),
                weekday: self.weekday.resolve_text(item, NOT_AVAILABLE),
                price,
                is_selected_date: self.is_selected(item),
            });
        }

        let selected = points.iter().filter(|p| p.is_selected_date).count();
        if selected > 1 {
            warn!(
                "Date strip marks {} items as selected; keeping all flags as extracted",
                selected
            );
        }
        debug!("Extracted {} date fare points", points.len());
        points
    }

    fn is_selected(&self, item: ElementRef<'_>) -> bool {
        let class_attr = item.value().attr("class").unwrap_or("");
        self.selected_class_tokens
            .iter()
            .any(|token| class_attr.contains(token.as_str()))
    }
}
