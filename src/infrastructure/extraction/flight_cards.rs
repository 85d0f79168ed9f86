//! Flight-card extraction
//!
//! Primary extractor for per-offer cards: the card cascade supplies the
//! card list, then every field resolves through its own cascade scoped to
//! that card. When no card selector matches at all, a heuristic scan
//! classifies elements as cards by class token plus a two-feature presence
//! test (a time-like and a price-like fragment), which keeps page chrome
//! out of the results.

use scraper::{ElementRef, Selector};
use tracing::{debug, info};

use super::cascade::SelectorCascade;
use super::config::FlightCardSelectors;
use super::context::ExtractContext;
use super::error::{ExtractionError, ExtractionResult};
use super::text;
use crate::domain::fare::{FlightOffer, NOT_AVAILABLE};

pub struct FlightCardParser {
    cards: SelectorCascade,
    departure_time: SelectorCascade,
    arrival_time: SelectorCascade,
    paired_times: SelectorCascade,
    flight_number: SelectorCascade,
    price: SelectorCascade,
    duration: SelectorCascade,
    heuristic_class_tokens: Vec<String>,
    any_classed: Selector,
}

impl FlightCardParser {
    pub fn new(selectors: &FlightCardSelectors) -> ExtractionResult<Self> {
        let any_classed = Selector::parse("[class]")
            .map_err(|e| ExtractionError::invalid_selector("heuristic.scan", "[class]", &e.to_string()))?;
        Ok(Self {
            cards: SelectorCascade::compile("flight_card.card", &selectors.card)?,
            departure_time: SelectorCascade::compile(
                "flight_card.departure_time",
                &selectors.departure_time,
            )?,
            arrival_time: SelectorCascade::compile(
                "flight_card.arrival_time",
                &selectors.arrival_time,
            )?,
            paired_times: SelectorCascade::compile(
                "flight_card.paired_times",
                &selectors.paired_times,
            )?,
            flight_number: SelectorCascade::compile(
                "flight_card.flight_number",
                &selectors.flight_number,
            )?,
            price: SelectorCascade::compile("flight_card.price", &selectors.price)?,
            duration: SelectorCascade::compile("flight_card.duration", &selectors.duration)?,
            heuristic_class_tokens: selectors
                .heuristic_class_tokens
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
            any_classed,
        })
    }

    /// Extract one offer per card found under `scope`. Zero cards from the
    /// configured cascade triggers the heuristic scan; zero from both is an
    /// empty result, never a fault.
    pub fn parse(&self, scope: ElementRef<'_>, ctx: &ExtractContext<'_>) -> Vec<FlightOffer> {
        let cards = self.cards.resolve_all(scope);
        if !cards.is_empty() {
            debug!("Found {} flight cards via configured cascade", cards.len());
            return cards
                .into_iter()
                .map(|card| self.extract_offer(card, ctx))
                .collect();
        }

        let candidates = self.heuristic_candidates(scope);
        if candidates.is_empty() {
            debug!("No flight cards found on page");
            return Vec::new();
        }
        info!(
            "Card cascade matched nothing; heuristic scan classified {} card-like elements",
            candidates.len()
        );
        candidates
            .into_iter()
            .map(|card| self.heuristic_offer(card, ctx))
            .collect()
    }

    /// Heuristic cards carry markup the field cascades may not recognize,
    /// but classification already proved a time and a price are present;
    /// fill whatever the cascades missed from the card's raw text.
    fn heuristic_offer(&self, card: ElementRef<'_>, ctx: &ExtractContext<'_>) -> FlightOffer {
        let mut offer = self.extract_offer(card, ctx);
        let content = card.text().collect::<String>();
        let times = text::times_in(&content);
        if offer.departure_time == NOT_AVAILABLE {
            if let Some(t) = times.first() {
                offer.departure_time = t.clone();
            }
        }
        if offer.arrival_time == NOT_AVAILABLE {
            if let Some(t) = times.get(1) {
                offer.arrival_time = t.clone();
            }
        }
        if offer.price.amount == NOT_AVAILABLE {
            offer.price = text::parse_money(&content);
        }
        offer
    }

    fn extract_offer(&self, card: ElementRef<'_>, ctx: &ExtractContext<'_>) -> FlightOffer {
        let mut departure = self.departure_time.resolve_text(card, NOT_AVAILABLE);
        let mut arrival = self.arrival_time.resolve_text(card, NOT_AVAILABLE);
        if departure == NOT_AVAILABLE || arrival == NOT_AVAILABLE {
            self.backfill_times(card, &mut departure, &mut arrival);
        }
        let price_text = self.price.resolve_text(card, NOT_AVAILABLE);
        FlightOffer {
            flight_number: self.flight_number.resolve_text(card, NOT_AVAILABLE),
            departure_time: departure,
            arrival_time: arrival,
            price: text::parse_money(&price_text),
            duration: self.duration.resolve_text(card, NOT_AVAILABLE),
            origin_code: ctx.query.origin_code.clone(),
            destination_code: ctx.query.destination_code.clone(),
        }
    }

    /// Some markup variants render departure and arrival as two siblings of
    /// one shape; match them as a collection and take them positionally.
    fn backfill_times(&self, card: ElementRef<'_>, departure: &mut String, arrival: &mut String) {
        let times: Vec<String> = self
            .paired_times
            .resolve_all(card)
            .into_iter()
            .filter_map(|el| {
                let content = el.text().collect::<String>();
                text::first_time(&content).map(str::to_string)
            })
            .collect();
        if *departure == NOT_AVAILABLE {
            if let Some(t) = times.first() {
                *departure = t.clone();
            }
        }
        if *arrival == NOT_AVAILABLE {
            if let Some(t) = times.get(1) {
                *arrival = t.clone();
            }
        }
    }

    /// Scan every classed element for a card-like class token, then apply
    /// the two-feature presence test. A wrapper around a real card passes
    /// the same tests, so only innermost matches survive.
    fn heuristic_candidates<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        let all: Vec<ElementRef<'a>> = scope
            .select(&self.any_classed)
            .filter(|el| self.has_card_token(el) && Self::has_time_and_price(*el))
            .collect();
        all.iter()
            .copied()
            .filter(|el| {
                !all.iter().any(|other| {
                    other.id() != el.id() && other.ancestors().any(|anc| anc.id() == el.id())
                })
            })
            .collect()
    }

    fn has_card_token(&self, el: &ElementRef<'_>) -> bool {
        let class_attr = el
            .value()
            .attr("class")
            .map(str::to_lowercase)
            .unwrap_or_default();
        self.heuristic_class_tokens
            .iter()
            .any(|token| class_attr.contains(token.as_str()))
    }

    fn has_time_and_price(el: ElementRef<'_>) -> bool {
        let content = el.text().collect::<String>();
        text::looks_like_time(&content) && text::looks_like_price(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::{FareQuery, PartyComposition};
    use chrono::NaiveDate;
    use scraper::Html;

    fn query() -> FareQuery {
        FareQuery::new(
            "BUD",
            "LTN",
            NaiveDate::from_ymd_opt(2025, 8, 12).unwrap(),
            PartyComposition {
                adults: 1,
                teens: 0,
                children: 0,
                infants: 0,
            },
        )
        .unwrap()
    }

    fn parser() -> FlightCardParser {
        FlightCardParser::new(&FlightCardSelectors::default()).unwrap()
    }

    #[test]
    fn extracts_every_field_from_a_card() {
        let html = Html::parse_document(
            r#"<div class="flight-card">
                 <span class="card-flight-num">FR 2134</span>
                 <span class="departure-time">06:25</span>
                 <span class="arrival-time">08:40</span>
                 <span class="flight-duration">2h 15m</span>
                 <span class="flight-card__price">12,990 Ft</span>
               </div>"#,
        );
        let query = query();
        let offers = parser().parse(html.root_element(), &ExtractContext::new(&query));
        assert_eq!(offers.len(), 1);
        let offer = &offers[0];
        assert_eq!(offer.flight_number, "FR 2134");
        assert_eq!(offer.departure_time, "06:25");
        assert_eq!(offer.arrival_time, "08:40");
        assert_eq!(offer.duration, "2h 15m");
        assert_eq!(offer.price.amount, "12,990");
        assert_eq!(offer.price.currency_symbol, "Ft");
        assert_eq!(offer.origin_code, "BUD");
        assert_eq!(offer.destination_code, "LTN");
    }

    #[test]
    fn paired_time_nodes_backfill_missing_times() {
        let html = Html::parse_document(
            r#"<div class="flight-card">
                 <span class="flight-time">06:25</span>
                 <span class="flight-time">08:40</span>
                 <span class="flight-card__price">45 Ft</span>
               </div>"#,
        );
        let query = query();
        let offers = parser().parse(html.root_element(), &ExtractContext::new(&query));
        assert_eq!(offers[0].departure_time, "06:25");
        assert_eq!(offers[0].arrival_time, "08:40");
    }

    #[test]
    fn heuristic_scan_requires_both_time_and_price() {
        let html = Html::parse_document(
            r#"<div>
                 <div class="trip-banner">Flights from €19.99</div>
                 <div class="journey-row">
                   <span class="time">06:25</span>
                   <span class="time">08:40</span>
                   <span class="price">€29.99</span>
                 </div>
               </div>"#,
        );
        let query = query();
        let offers = parser().parse(html.root_element(), &ExtractContext::new(&query));
        // The banner has a price but no time, so only the row qualifies.
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].departure_time, "06:25");
        assert_eq!(offers[0].arrival_time, "08:40");
        assert_eq!(offers[0].price.amount, "29.99");
        assert_eq!(offers[0].price.currency_symbol, "€");
    }

    #[test]
    fn heuristic_scan_keeps_the_innermost_candidate() {
        let html = Html::parse_document(
            r#"<div class="flight-list-wrapper">
                 <div class="journey-row">
                   <span class="time">06:25</span>
                   <span class="price">€29.99</span>
                 </div>
               </div>"#,
        );
        let query = query();
        let offers = parser().parse(html.root_element(), &ExtractContext::new(&query));
        assert_eq!(offers.len(), 1);
    }

    #[test]
    fn empty_scope_yields_no_offers() {
        let html = Html::parse_document("<div></div>");
        let query = query();
        assert!(parser()
            .parse(html.root_element(), &ExtractContext::new(&query))
            .is_empty());
    }
}
