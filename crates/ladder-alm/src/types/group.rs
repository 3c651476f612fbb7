//! Reporting dimensions and group keys.

use serde::{Deserialize, Serialize};
use std::fmt;

use ladder_bonds::BondTerms;

/// A reporting dimension positions can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupDimension {
    /// Fund code.
    Fund,
    /// Reporting asset-type label.
    AssetType,
    /// Portfolio manager.
    Manager,
    /// Account code.
    Account,
    /// Position currency.
    Currency,
    /// Security description.
    Security,
}

impl GroupDimension {
    /// Reads the dimension's value from position terms.
    #[must_use]
    pub fn value_of(self, terms: &BondTerms) -> String {
        match self {
            GroupDimension::Fund => terms.fund_code.clone(),
            GroupDimension::AssetType => terms.asset_type.clone().unwrap_or_default(),
            GroupDimension::Manager => terms.manager.clone().unwrap_or_default(),
            GroupDimension::Account => terms.account_code.clone().unwrap_or_default(),
            GroupDimension::Currency => terms.currency.clone(),
            GroupDimension::Security => terms.security_name.clone(),
        }
    }
}

impl fmt::Display for GroupDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupDimension::Fund => "Fund",
            GroupDimension::AssetType => "Asset Type",
            GroupDimension::Manager => "Manager",
            GroupDimension::Account => "Account",
            GroupDimension::Currency => "Currency",
            GroupDimension::Security => "Security",
        };
        write!(f, "{name}")
    }
}

/// Tuple of reporting dimension values identifying a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey(Vec<String>);

impl GroupKey {
    /// Creates a key from its components.
    #[must_use]
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// Builds the key of a position for the given dimensions.
    #[must_use]
    pub fn for_terms(terms: &BondTerms, dimensions: &[GroupDimension]) -> Self {
        Self(dimensions.iter().map(|d| d.value_of(terms)).collect())
    }

    /// Returns the key components.
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" / "))
    }
}
