//! Position exclusion rules applied before projection.

use serde::{Deserialize, Serialize};

use ladder_bonds::BondTerms;

/// Excludes positions that carry no projectable bond cash flow.
///
/// Defaults drop repo liabilities, bond options, listed equity and
/// liability hedges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionFilter {
    /// Market-data asset types to drop.
    pub excluded_bbg_asset_types: Vec<String>,
    /// Reporting asset types to drop.
    pub excluded_asset_types: Vec<String>,
    /// Security names to drop.
    pub excluded_securities: Vec<String>,
    /// When non-empty, only these funds are kept.
    pub funds: Vec<String>,
}

impl Default for PositionFilter {
    fn default() -> Self {
        Self {
            excluded_bbg_asset_types: vec!["Repo Liability".to_string(), "Bond Option".to_string()],
            excluded_asset_types: vec![
                "Listed Equity - Local".to_string(),
                "Listed Equity - International".to_string(),
                "Liability hedging assets".to_string(),
            ],
            excluded_securities: Vec::new(),
            funds: Vec::new(),
        }
    }
}

impl PositionFilter {
    /// A filter that keeps every position.
    #[must_use]
    pub fn allow_all() -> Self {
        Self {
            excluded_bbg_asset_types: Vec::new(),
            excluded_asset_types: Vec::new(),
            excluded_securities: Vec::new(),
            funds: Vec::new(),
        }
    }

    /// Restricts to the given funds.
    #[must_use]
    pub fn with_funds<I, S>(mut self, funds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.funds = funds.into_iter().map(Into::into).collect();
        self
    }

    /// Adds security names to drop.
    #[must_use]
    pub fn with_excluded_securities<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_securities
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Returns true if the position should be projected.
    #[must_use]
    pub fn accepts(&self, terms: &BondTerms) -> bool {
        let listed = |list: &[String], value: Option<&str>| {
            value.is_some_and(|v| list.iter().any(|item| item == v))
        };

        if !self.funds.is_empty() && !self.funds.iter().any(|f| *f == terms.fund_code) {
            return false;
        }

        !(listed(&self.excluded_bbg_asset_types, terms.bbg_asset_type.as_deref())
            || listed(&self.excluded_asset_types, terms.asset_type.as_deref())
            || listed(&self.excluded_securities, Some(terms.security_name.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_bonds::terms::BondTermsBuilder;
    use ladder_core::types::Date;

    fn position() -> BondTermsBuilder {
        BondTerms::builder()
            .position_id("P-1")
            .fund_code("F100")
            .security_name("ACME 4 12/31/27")
            .closing_date(Date::from_ymd(2024, 12, 31).unwrap())
            .maturity_date(Date::from_ymd(2027, 12, 31).unwrap())
    }

    #[test]
    fn test_default_excludes() {
        let filter = PositionFilter::default();

        assert!(filter.accepts(&position().bbg_asset_type("Corporate Bond").build().unwrap()));
        assert!(!filter.accepts(&position().bbg_asset_type("Repo Liability").build().unwrap()));
        assert!(!filter.accepts(
            &position()
                .asset_type("Liability hedging assets")
                .build()
                .unwrap()
        ));
    }

    #[test]
    fn test_fund_restriction() {
        let filter = PositionFilter::allow_all().with_funds(["F200"]);
        assert!(!filter.accepts(&position().build().unwrap()));
        assert!(filter.accepts(&position().fund_code("F200").build().unwrap()));
    }

    #[test]
    fn test_security_exclusion() {
        let filter = PositionFilter::default().with_excluded_securities([".APPIS 0 01/30/2125 8999"]);
        assert!(!filter.accepts(
            &position()
                .security_name(".APPIS 0 01/30/2125 8999")
                .build()
                .unwrap()
        ));
        assert!(filter.accepts(&position().build().unwrap()));
    }
}
