//! Amount and category extraction
//!
//! Two independent passes over the same utterance: a currency-tolerant
//! number parser and a keyword-based category scan.

use crate::models::Category;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Category keyword sets, scanned in this order; first match wins.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &[
            "food", "restaurant", "meal", "dinner", "lunch", "breakfast", "snack", "coffee",
            "tea", "drink",
        ],
    ),
    (
        Category::Shopping,
        &["shopping", "buy", "purchase", "gift", "present"],
    ),
    (
        Category::Grocery,
        &[
            "vegetable", "fruit", "grocery", "groceries", "pulse", "grains", "oil", "salt",
            "sugar", "rice", "wheat", "flour",
        ],
    ),
    (
        Category::Rent,
        &["rent", "house", "flat", "apartment", "property", "rental"],
    ),
    (
        Category::Travel,
        &["travel", "holiday", "trip", "vacation", "flight", "hotel"],
    ),
];

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Currency markers are allowed around the number but never required.
    PATTERN.get_or_init(|| {
        Regex::new(r"\.?\d+(?:\.\d+)?").expect("amount regex is valid")
    })
}

/// Extract the first monetary magnitude from the text.
///
/// Thousands separators are stripped first, so "1,500" reads as 1500.
/// Symbols and currency words (`$`, `₹`, `Rs.`, `INR`, `USD`) are skipped over.
pub fn extract_amount(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");

    amount_pattern()
        .find_iter(&cleaned)
        .map(|m| {
            let digits = m.as_str();
            // A dot right after a word ("Rs.450") is an abbreviation, not a decimal point.
            let after_word = cleaned[..m.start()]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphabetic());
            match digits.strip_prefix('.') {
                Some(rest) if after_word => rest,
                _ => digits,
            }
        })
        .find_map(|digits| digits.parse::<f64>().ok())
        .filter(|amount| amount.is_finite())
}

/// Classify the spending category by keyword; `General` if nothing matches.
pub fn categorize(text: &str) -> Category {
    let lowered = text.to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}

/// Parse both amount and category from one utterance.
pub fn parse_amount_and_category(text: &str) -> (Option<f64>, Category) {
    let amount = extract_amount(text);
    let category = categorize(text);

    debug!(?amount, %category, "Parsed expense details");
    (amount, category)
}

/// Render an amount the way a person would type it: no trailing ".0".
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{:.0}", amount)
    } else {
        format!("{}", amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_decimal_amounts() {
        assert_eq!(extract_amount("I spent 1500 on food"), Some(1500.0));
        assert_eq!(extract_amount("coffee was 4.75 today"), Some(4.75));
        assert_eq!(extract_amount("no numbers here"), None);
        assert_eq!(extract_amount(""), None);
    }

    #[test]
    fn test_thousands_separators_and_currency() {
        assert_eq!(extract_amount("rent of 12,500 this month"), Some(12500.0));
        assert_eq!(extract_amount("paid $1,299.99 for a flight"), Some(1299.99));
        assert_eq!(extract_amount("Rs.450 for groceries"), Some(450.0));
        assert_eq!(extract_amount("₹300 lunch"), Some(300.0));
        assert_eq!(extract_amount("INR 2000 hotel"), Some(2000.0));
        assert_eq!(extract_amount("20 USD gift"), Some(20.0));
        assert_eq!(extract_amount("rs.99.5 for salt"), Some(99.5));
    }

    #[test]
    fn test_leading_decimal_point() {
        assert_eq!(extract_amount("spent .75 on tea"), Some(0.75));
        assert_eq!(extract_amount("add $.50 for candy"), Some(0.5));
        assert_eq!(extract_amount("₹.25 tip"), Some(0.25));
    }

    #[test]
    fn test_first_number_wins() {
        assert_eq!(extract_amount("spent 200 on 3 coffees"), Some(200.0));
    }

    #[test]
    fn test_category_declared_order() {
        // shopping is scanned before grocery
        assert_eq!(categorize("I spent 1500 for grocery shopping"), Category::Shopping);
        // grocery is scanned before rent
        assert_eq!(categorize("I bought rice and paid rent"), Category::Grocery);
        // food is scanned before everything else
        assert_eq!(categorize("dinner at the hotel"), Category::Food);
        assert_eq!(categorize("Flight to Goa"), Category::Travel);
        assert_eq!(categorize("1000 for house rent"), Category::Rent);
        assert_eq!(categorize("paid 300 to a plumber"), Category::General);
    }

    #[test]
    fn test_category_independent_of_amount() {
        assert_eq!(parse_amount_and_category("some lunch"), (None, Category::Food));
        assert_eq!(
            parse_amount_and_category("500 for a trip"),
            (Some(500.0), Category::Travel)
        );
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1500.0), "1500");
        assert_eq!(format_amount(12.5), "12.5");
        assert_eq!(format_amount(0.0), "0");
    }
}
