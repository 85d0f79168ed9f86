//! End-to-end pipeline scenarios over embedded page snapshots.

use chrono::NaiveDate;
use scraper::Html;

use fare_scout::domain::fare::NOT_AVAILABLE;
use fare_scout::domain::query::{FareQuery, PartyComposition};
use fare_scout::infrastructure::extraction::{reconcile, ExtractionConfig, FareExtractionPipeline};

fn pipeline() -> FareExtractionPipeline {
    FareExtractionPipeline::new(&ExtractionConfig::default()).unwrap()
}

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

const RESULTS_PAGE: &str = r#"
<html><body>
  <h1 class="route-header__title">Budapest (BUD) to London (LTN)</h1>
  <ul class="carousel">
    <li class="carousel-item">
      <div class="carousel-item__date">11 Aug</div>
      <div class="carousel-item__weekday">Mon</div>
      <span class="carousel-item__price">7,845 Ft</span>
    </li>
    <li class="carousel-item carousel-item--selected">
      <div class="carousel-item__date">12 Aug</div>
      <div class="carousel-item__weekday">Tue</div>
      <span class="carousel-item__price">8,495 Ft</span>
    </li>
  </ul>
  <div class="flight-card">
    <span class="card-flight-num">FR 2134</span>
    <span class="departure-time">06:25</span>
    <span class="arrival-time">08:40</span>
    <span class="flight-duration">2h 15m</span>
    <span class="flight-card__price">12,990 Ft</span>
  </div>
  <div class="flight-card">
    <span class="card-flight-num">FR 8406</span>
    <span class="departure-time">18:05</span>
    <span class="arrival-time">20:20</span>
    <span class="flight-duration">2h 15m</span>
    <span class="flight-card__price">8,495 Ft</span>
  </div>
</body></html>"#;

#[test]
fn full_results_page_extracts_offers_and_date_strip() {
    let snapshot = Html::parse_document(RESULTS_PAGE);
    let query = query();
    let result = pipeline().extract(&snapshot, &query);

    assert_eq!(result.offers.len(), 2);
    assert_eq!(result.offers[0].flight_number, "FR 2134");
    assert_eq!(result.offers[0].departure_time, "06:25");
    assert_eq!(result.offers[1].price.amount, "8,495");
    assert_eq!(result.offers[1].price.currency_symbol, "Ft");

    assert_eq!(result.nearby_dates.len(), 2);
    let selected: Vec<_> = result
        .nearby_dates
        .iter()
        .filter(|p| p.is_selected_date)
        .collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].calendar_label, "12 Aug");
}

#[test]
fn cheapest_offer_wins_by_numeric_price() {
    let snapshot = Html::parse_document(RESULTS_PAGE);
    let query = query();
    let result = pipeline().extract(&snapshot, &query);
    let cheapest = reconcile::select_cheapest(&result.offers).unwrap();
    assert_eq!(cheapest.flight_number, "FR 8406");
}

#[test]
fn strip_only_page_synthesizes_the_selected_date_offer() {
    let snapshot = Html::parse_document(
        r#"<html><body>
             <ul class="carousel">
               <li class="carousel-item carousel-item--selected">
                 <div class="carousel-item__date">12 Aug</div>
                 <div class="carousel-item__weekday">Tue</div>
                 <span class="carousel-item__price">45 Ft</span>
               </li>
             </ul>
           </body></html>"#,
    );
    let query = query();
    let result = pipeline().extract(&snapshot, &query);

    assert_eq!(result.offers.len(), 1);
    let offer = &result.offers[0];
    assert_eq!(offer.price.amount, "45");
    assert_eq!(offer.price.currency_symbol, "Ft");
    assert_eq!(offer.departure_time, NOT_AVAILABLE);
    assert_eq!(offer.arrival_time, NOT_AVAILABLE);
    assert_eq!(offer.duration, NOT_AVAILABLE);
    assert_eq!(offer.origin_code, "BUD");
    assert_eq!(offer.destination_code, "LTN");
}

#[test]
fn timetable_slots_displace_the_synthetic_offer() {
    let snapshot = Html::parse_document(
        r#"<html><body>
             <ul class="carousel">
               <li class="carousel-item carousel-item--selected">
                 <div class="carousel-item__date">12 Aug</div>
                 <span class="carousel-item__price">45 Ft</span>
               </li>
             </ul>
             <div class="fare-summary"><span class="price">6,990 Ft</span></div>
             <ul class="timetable">
               <li class="timetable__slot"><span class="slot-hour">06:25</span></li>
               <li class="timetable__slot"><span class="slot-hour">18:45</span>
                   <span class="timetable__slot-price">9,990 Ft</span></li>
             </ul>
           </body></html>"#,
    );
    let query = query();
    let result = pipeline().extract(&snapshot, &query);

    assert_eq!(result.offers.len(), 2);
    assert_eq!(result.offers[0].departure_time, "06:25");
    assert_eq!(result.offers[0].price.amount, "6,990");
    assert_eq!(result.offers[1].departure_time, "18:45");
    assert_eq!(result.offers[1].price.amount, "9,990");
    // The date strip is still reported alongside the fallback offers.
    assert_eq!(result.nearby_dates.len(), 1);
}

#[test]
fn empty_document_yields_an_empty_result() {
    let snapshot = Html::parse_document("<html><body></body></html>");
    let query = query();
    let result = pipeline().extract(&snapshot, &query);
    assert!(result.offers.is_empty());
    assert!(result.nearby_dates.is_empty());
}

#[test]
fn heuristic_cards_rescue_unrecognized_markup() {
    let snapshot = Html::parse_document(
        r#"<html><body>
             <div class="promo-banner">Fly from 5,990 Ft</div>
             <div class="journey-option">
               <span class="hour">06:25</span>
               <span class="hour">08:40</span>
               <span class="cost">12,990 Ft</span>
             </div>
           </body></html>"#,
    );
    let query = query();
    let result = pipeline().extract(&snapshot, &query);

    assert_eq!(result.offers.len(), 1);
    assert_eq!(result.offers[0].departure_time, "06:25");
    assert_eq!(result.offers[0].price.amount, "12,990");
}
