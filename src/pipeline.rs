// File: ./src/pipeline.rs
// Normalize / filter / sort pipeline for fetched listings.
//
// The whole pipeline is a pure synchronous transformation: it is re-run
// from scratch after every fetch and every filter-control change, and
// nothing in here caches across runs.
use crate::model::{Listing, Metric, RawListing, RawNumber};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::EnumIter;

/// Normalizes one loosely-typed numeric field.
///
/// Numbers pass through when finite. Strings (and anything else, coerced
/// to text) are cleaned of "£", "," and whitespace before standard f64
/// parsing. Everything that does not end up finite is missing. Total:
/// never panics, never errors.
pub fn parse_metric(raw: Option<&RawNumber>) -> Metric {
    match raw {
        None => Metric::missing(),
        Some(RawNumber::Number(n)) => Metric::from_f64(*n),
        Some(RawNumber::Text(s)) => parse_cleaned(s),
        // A JSON bool/array/object coerced to its text form; parsing will
        // reject it unless it happens to render as a bare numeral.
        Some(RawNumber::Other(v)) => parse_cleaned(&v.to_string()),
    }
}

fn parse_cleaned(s: &str) -> Metric {
    let cleaned: String = s
        .chars()
        .filter(|c| *c != '£' && *c != ',' && !c.is_whitespace())
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) => Metric::from_f64(v),
        Err(_) => Metric::missing(),
    }
}

/// Derives the six numeric fields from a raw record. Pure; a given raw
/// listing always produces the same normalized listing.
pub fn normalize(raw: RawListing) -> Listing {
    let price = parse_metric(raw.price.as_ref());
    let area_sqm = parse_metric(raw.area_sqm.as_ref());
    let area_sq_ft = parse_metric(raw.area_sq_ft.as_ref());
    let price_per_sqm = parse_metric(raw.price_per_sqm.as_ref());
    let price_per_sq_ft = parse_metric(raw.price_per_sq_ft.as_ref());
    let undervalue_pct = parse_metric(raw.undervalue_pct.as_ref());
    Listing {
        raw,
        price,
        area_sqm,
        area_sq_ft,
        price_per_sqm,
        price_per_sq_ft,
        undervalue_pct,
    }
}

pub fn normalize_all(raw: Vec<RawListing>) -> Vec<Listing> {
    raw.into_iter().map(normalize).collect()
}

pub const DEFAULT_MIN_UNDERVALUE_PCT: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Minimum undervalue percentage. Non-finite inputs are coerced to 0.
    pub min_undervalue_pct: f64,
    /// Require a usable (finite, strictly positive) floor area in sqm.
    pub require_area: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            min_undervalue_pct: DEFAULT_MIN_UNDERVALUE_PCT,
            require_area: false,
        }
    }
}

impl FilterOptions {
    /// The effective threshold after coercion.
    pub fn threshold(&self) -> f64 {
        if self.min_undervalue_pct.is_finite() {
            self.min_undervalue_pct
        } else {
            0.0
        }
    }

    /// A listing with no undervalue figure never passes, whatever the
    /// threshold sign. That matches the upstream data source; see
    /// DESIGN.md for the negative-threshold discussion.
    pub fn keeps(&self, listing: &Listing) -> bool {
        if !listing.undervalue_pct.at_least(self.threshold()) {
            return false;
        }
        if self.require_area && !listing.area_sqm.is_positive() {
            return false;
        }
        true
    }
}

/// Order-stable filter over the normalized collection.
pub fn filter<'a>(listings: &'a [Listing], opts: &FilterOptions) -> Vec<&'a Listing> {
    listings.iter().filter(|l| opts.keeps(l)).collect()
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize, EnumIter)]
pub enum SortKey {
    /// Most undervalued first; listings without the figure last.
    #[default]
    Undervalue,
    /// Cheapest first; listings without a parsed price last.
    Price,
    /// Cheapest per square meter first; missing last.
    PricePerSqm,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Undervalue => "undervalue %",
            SortKey::Price => "price",
            SortKey::PricePerSqm => "£/sqm",
        }
    }

    pub fn compare(&self, a: &Listing, b: &Listing) -> Ordering {
        match self {
            SortKey::Undervalue => a.undervalue_pct.cmp_descending(&b.undervalue_pct),
            SortKey::Price => a.price.cmp_ascending(&b.price),
            SortKey::PricePerSqm => a.price_per_sqm.cmp_ascending(&b.price_per_sqm),
        }
    }
}

/// Filter then sort. `sort_by` is stable, so ties keep input order.
pub fn select<'a>(listings: &'a [Listing], opts: &FilterOptions, key: SortKey) -> Vec<&'a Listing> {
    let mut visible = filter(listings, opts);
    visible.sort_by(|a, b| key.compare(a, b));
    visible
}
