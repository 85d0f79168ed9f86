//! Result reconciliation
//!
//! Merges the extractor outputs into the final offer list. Three tiers,
//! best fidelity first; a tier applies only when the one above produced
//! zero offers:
//!
//! 1. offers from the flight-card extractor;
//! 2. one synthetic offer carrying the selected date-strip fare, with
//!    unresolved time and duration;
//! 3. page-level timetable slots, which displace the tier-2 synthetic when
//!    they exist.

use tracing::{debug, info};

use super::text;
use crate::domain::fare::{DateFarePoint, FlightOffer, NOT_AVAILABLE};
use crate::domain::query::FareQuery;

pub fn reconcile(
    primary: Vec<FlightOffer>,
    nearby_dates: &[DateFarePoint],
    slot_offers: Vec<FlightOffer>,
    query: &FareQuery,
) -> Vec<FlightOffer> {
    if !primary.is_empty() {
        return primary;
    }
    if !slot_offers.is_empty() {
        info!(
            "No flight cards; producing {} offers from page-level time slots",
            slot_offers.len()
        );
        return slot_offers;
    }
    match nearby_dates.iter().find(|p| p.is_selected_date) {
        Some(point) => {
            info!("No flight cards; synthesizing one offer from the selected date fare");
            vec![FlightOffer {
                flight_number: NOT_AVAILABLE.to_string(),
                departure_time: NOT_AVAILABLE.to_string(),
                arrival_time: NOT_AVAILABLE.to_string(),
                price: point.price.clone(),
                duration: NOT_AVAILABLE.to_string(),
                origin_code: query.origin_code.clone(),
                destination_code: query.destination_code.clone(),
            }]
        }
        None => {
            debug!("No fallback source produced offers");
            Vec::new()
        }
    }
}

/// Cheapest offer by numeric price. Stable left fold: ties keep the
/// first-encountered offer; unresolved prices compare as infinity and can
/// only win when every price is unresolved.
pub fn select_cheapest(offers: &[FlightOffer]) -> Option<&FlightOffer> {
    let mut best: Option<(&FlightOffer, f64)> = None;
    for offer in offers {
        let value = text::to_numeric(&offer.price);
        match best {
            Some((_, lowest)) if value >= lowest => {}
            _ => best = Some((offer, value)),
        }
    }
    best.map(|(offer, _)| offer)
}
