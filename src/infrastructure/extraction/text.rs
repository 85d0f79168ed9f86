//! Free-text field parsing
//!
//! Pulls typed values out of the text fragments the cascades resolve.
//! Nothing here returns an error: text that cannot be parsed becomes the
//! "N/A" sentinel, and "N/A" prices compare as positive infinity so they
//! never win a cheapest-offer scan.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::fare::{Money, NOT_AVAILABLE};

/// Longest run of digits and numeric separators becomes the amount.
static AMOUNT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9.,]+").unwrap());

/// Longest run of characters that are not digits, spaces or numeric
/// separators becomes the currency marker.
static SYMBOL_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9\s.,]+").unwrap());

/// HH:MM shaped fragment, as departure/arrival times are rendered.
static TIME_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{1,2}:\d{2}\b").unwrap());

/// Price shaped fragment: a numeric run adjoining a known currency marker.
static PRICE_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:[€$£¥]|\b(?:Ft|HUF|EUR|USD|GBP|PLN|RON|CZK)\b)\s*[0-9][0-9.,]*|[0-9][0-9.,]*\s*(?:[€$£¥]|\b(?:Ft|HUF|EUR|USD|GBP|PLN|RON|CZK)\b)",
    )
    .unwrap()
});

/// First match wins length ties, so equal-length runs resolve stably.
fn longest_run<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str())
        .fold(None, |best: Option<&str>, candidate| match best {
            Some(kept) if kept.len() >= candidate.len() => Some(kept),
            _ => Some(candidate),
        })
}

/// Split a price blob into its numeric run and its currency marker.
/// The two scans are independent; either side may be absent.
pub fn parse_money(text: &str) -> Money {
    if text.trim() == NOT_AVAILABLE {
        return Money::not_available();
    }
    let amount = longest_run(&AMOUNT_RUN, text).unwrap_or(NOT_AVAILABLE);
    let symbol = longest_run(&SYMBOL_RUN, text).unwrap_or("");
    Money::new(amount, symbol)
}

/// Numeric value of a parsed price. Unresolvable amounts become positive
/// infinity, which keeps minimum-price comparisons total.
pub fn to_numeric(money: &Money) -> f64 {
    if money.amount == NOT_AVAILABLE {
        return f64::INFINITY;
    }
    money
        .amount
        .replace(',', "")
        .parse::<f64>()
        .unwrap_or(f64::INFINITY)
}

pub fn looks_like_time(text: &str) -> bool {
    TIME_RUN.is_match(text)
}

pub fn looks_like_price(text: &str) -> bool {
    PRICE_RUN.is_match(text)
}

/// First HH:MM fragment in the text, if any.
pub fn first_time(text: &str) -> Option<&str> {
    TIME_RUN.find(text).map(|m| m.as_str())
}

/// Every HH:MM fragment in the text, in order of appearance.
pub fn times_in(text: &str) -> Vec<String> {
    TIME_RUN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
