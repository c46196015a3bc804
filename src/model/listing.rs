// File: ./src/model/listing.rs
// Raw (untrusted) and normalized listing records.
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A numeric-looking field as it arrives from the backend: the scrapers
/// emit real numbers, currency-formatted strings ("£1,250,000"), or
/// whatever the portal happened to render. Anything else is kept opaque
/// and treated as unparseable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// A listing record exactly as the backend returned it. Every field is
/// optional; numeric fields may additionally be null, a number, or a
/// formatted string. Nothing here is trusted beyond `normalize`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawListing {
    pub source: Option<String>,
    pub title: Option<String>,
    pub address: Option<String>,
    pub price: Option<RawNumber>,
    pub bedrooms: Option<RawNumber>,
    pub area_sqm: Option<RawNumber>,
    pub area_sq_ft: Option<RawNumber>,
    pub price_per_sqm: Option<RawNumber>,
    pub price_per_sq_ft: Option<RawNumber>,
    pub undervalue_pct: Option<RawNumber>,
    pub url: Option<String>,
}

/// A derived numeric field: either a finite number or explicitly missing.
///
/// The original data source leans on sentinel values (-999, +infinity)
/// when sorting records without a usable number. Here the absence is a
/// first-class state with a documented ordering policy instead:
/// in both `cmp_ascending` and `cmp_descending`, missing values sort
/// after every finite value, and two missing values compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metric(Option<f64>);

impl Metric {
    pub fn missing() -> Self {
        Metric(None)
    }

    /// Present only if `v` is finite; NaN and infinities collapse to missing.
    pub fn from_f64(v: f64) -> Self {
        if v.is_finite() { Metric(Some(v)) } else { Metric(None) }
    }

    pub fn get(&self) -> Option<f64> {
        self.0
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// True if present and `>= threshold`.
    pub fn at_least(&self, threshold: f64) -> bool {
        matches!(self.0, Some(v) if v >= threshold)
    }

    /// True if present and strictly positive.
    pub fn is_positive(&self) -> bool {
        matches!(self.0, Some(v) if v > 0.0)
    }

    /// Ascending order, missing last. Finite values never compare as NaN,
    /// so `partial_cmp` cannot fail here.
    pub fn cmp_ascending(&self, other: &Metric) -> Ordering {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Descending order, missing still last.
    pub fn cmp_descending(&self, other: &Metric) -> Ordering {
        match (self.0, other.0) {
            (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Display helper: formatted with `precision` decimals, or a dash.
    pub fn display(&self, precision: usize) -> String {
        match self.0 {
            Some(v) => format!("{:.*}", precision, v),
            None => "-".to_string(),
        }
    }
}

/// A raw listing plus its derived numeric fields. Built once by
/// `pipeline::normalize`; the derived metrics never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub raw: RawListing,
    pub price: Metric,
    pub area_sqm: Metric,
    pub area_sq_ft: Metric,
    pub price_per_sqm: Metric,
    pub price_per_sq_ft: Metric,
    pub undervalue_pct: Metric,
}

impl Listing {
    pub fn source(&self) -> &str {
        self.raw.source.as_deref().unwrap_or("?")
    }

    pub fn title(&self) -> &str {
        self.raw.title.as_deref().unwrap_or("(untitled)")
    }

    pub fn address(&self) -> &str {
        self.raw.address.as_deref().unwrap_or("")
    }

    pub fn url(&self) -> Option<&str> {
        self.raw.url.as_deref()
    }

    /// Bedrooms arrive as a count or a descriptor ("3 bed"); show either.
    pub fn bedrooms_display(&self) -> String {
        match &self.raw.bedrooms {
            Some(RawNumber::Number(n)) => format!("{}", n),
            Some(RawNumber::Text(s)) => s.clone(),
            Some(RawNumber::Other(_)) | None => "-".to_string(),
        }
    }
}
