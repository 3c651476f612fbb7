//! Coupon-date override feed.
//!
//! The reference table supplies `(security_id, category, value)` triples.
//! Absent overrides are never an error: the schedule builder falls back to
//! derived dates.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use ladder_core::types::Date;

use crate::error::BondError;
use crate::terms::BondTerms;

/// Category of an override record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideCategory {
    /// First coupon date of the bond.
    FirstCouponDate,
    /// Last coupon date before the workout date.
    PenultimateCouponDate,
}

impl FromStr for OverrideCategory {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "first_coupon_date" => Ok(Self::FirstCouponDate),
            "penultimate_coupon_date" => Ok(Self::PenultimateCouponDate),
            other => Err(BondError::invalid_override(
                "",
                format!("unknown category '{other}'"),
            )),
        }
    }
}

/// Raw record of the override feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRecord {
    /// Security identifier.
    pub security_id: String,
    /// Category name.
    pub category: String,
    /// Override date.
    pub value: Date,
}

/// Override dates for one security.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponDateOverrides {
    /// First coupon date.
    pub first_coupon_date: Option<Date>,
    /// Penultimate coupon date.
    pub penultimate_coupon_date: Option<Date>,
}

impl CouponDateOverrides {
    fn record(&mut self, category: OverrideCategory, value: Date) {
        let slot = match category {
            OverrideCategory::FirstCouponDate => &mut self.first_coupon_date,
            OverrideCategory::PenultimateCouponDate => &mut self.penultimate_coupon_date,
        };
        // Repeated values keep the latest date.
        *slot = Some(slot.map_or(value, |current| current.max(value)));
    }
}

/// Override dates indexed by security identifier.
#[derive(Debug, Clone, Default)]
pub struct CouponDateBook {
    by_security: HashMap<String, CouponDateOverrides>,
}

impl CouponDateBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups feed records by security. Records with an unknown category
    /// are ignored.
    #[must_use]
    pub fn from_records(records: &[OverrideRecord]) -> Self {
        let mut book = Self::new();
        for record in records {
            match record.category.parse::<OverrideCategory>() {
                Ok(category) => book.insert(&record.security_id, category, record.value),
                Err(_) => tracing::debug!(
                    security_id = %record.security_id,
                    category = %record.category,
                    "ignoring coupon date override with unknown category"
                ),
            }
        }
        book
    }

    /// Adds one override.
    pub fn insert(&mut self, security_id: &str, category: OverrideCategory, value: Date) {
        self.by_security
            .entry(security_id.to_string())
            .or_default()
            .record(category, value);
    }

    /// Returns the overrides of a security (empty when absent).
    #[must_use]
    pub fn get(&self, security_id: &str) -> CouponDateOverrides {
        self.by_security.get(security_id).copied().unwrap_or_default()
    }

    /// Number of securities with at least one override.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_security.len()
    }

    /// Returns true if the book holds no overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_security.is_empty()
    }

    /// Copies the security's overrides onto the terms.
    ///
    /// Dates already present on the terms win over the book.
    #[must_use]
    pub fn apply(&self, mut terms: BondTerms) -> BondTerms {
        let Some(security_id) = terms.security_id.as_deref() else {
            return terms;
        };
        let overrides = self.get(security_id);
        if terms.first_coupon_date.is_none() {
            terms.first_coupon_date = overrides.first_coupon_date;
        }
        if terms.penultimate_coupon_date.is_none() {
            terms.penultimate_coupon_date = overrides.penultimate_coupon_date;
        }
        terms
    }
}
