//! Configuration for a projection request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ladder_bonds::cashflows::ScheduleConfig;

use super::{GroupDimension, PositionFilter};

/// Relative time unit of the period axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketMode {
    /// Whole years from the reference date, first future year is 1.
    #[default]
    Year,
    /// Whole months from the reference date, no offset.
    Month,
}

impl std::fmt::Display for BucketMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BucketMode::Year => write!(f, "year"),
            BucketMode::Month => write!(f, "month"),
        }
    }
}

/// Unit asset values are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportingUnit {
    /// Currency units.
    #[default]
    Units,
    /// Thousands.
    Thousands,
    /// Millions.
    Millions,
}

impl ReportingUnit {
    /// Divisor applied to currency amounts.
    #[must_use]
    pub fn divisor(self) -> Decimal {
        match self {
            ReportingUnit::Units => Decimal::ONE,
            ReportingUnit::Thousands => Decimal::ONE_THOUSAND,
            ReportingUnit::Millions => Decimal::from(1_000_000),
        }
    }
}

/// Configuration for projecting and aggregating a portfolio.
///
/// Controls parallelism, schedule rules, filtering and grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum position count to trigger parallel processing.
    pub parallel_threshold: usize,

    /// Period axis unit.
    pub bucket_mode: BucketMode,

    /// Schedule construction rules.
    pub schedule: ScheduleConfig,

    /// Positions excluded before projection.
    pub filter: PositionFilter,

    /// Reporting dimensions of the group key.
    pub grouping: Vec<GroupDimension>,

    /// Cap on the number of positions processed per request.
    pub max_positions: Option<usize>,

    /// Series name of the asset side in a ladder.
    pub asset_series_name: String,

    /// Unit asset values are reported in.
    pub reporting_unit: ReportingUnit,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 100,
            bucket_mode: BucketMode::Year,
            schedule: ScheduleConfig::default(),
            filter: PositionFilter::default(),
            grouping: vec![GroupDimension::Fund, GroupDimension::AssetType],
            max_positions: None,
            asset_series_name: "Asset Cashflows".to_string(),
            reporting_unit: ReportingUnit::Units,
        }
    }
}

impl ProjectionConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Sets the period axis unit.
    #[must_use]
    pub fn with_bucket_mode(mut self, mode: BucketMode) -> Self {
        self.bucket_mode = mode;
        self
    }

    /// Sets the schedule rules.
    #[must_use]
    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = schedule;
        self
    }

    /// Sets the position filter.
    #[must_use]
    pub fn with_filter(mut self, filter: PositionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the grouping dimensions.
    #[must_use]
    pub fn with_grouping(mut self, grouping: Vec<GroupDimension>) -> Self {
        self.grouping = grouping;
        self
    }

    /// Caps the number of positions processed.
    #[must_use]
    pub fn with_max_positions(mut self, max: usize) -> Self {
        self.max_positions = Some(max);
        self
    }

    /// Sets the reporting unit.
    #[must_use]
    pub fn with_reporting_unit(mut self, unit: ReportingUnit) -> Self {
        self.reporting_unit = unit;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_bonds::cashflows::FirstCouponPolicy;

    #[test]
    fn test_default() {
        let config = ProjectionConfig::default();
        assert!(config.parallel);
        assert_eq!(config.parallel_threshold, 100);
        assert_eq!(config.bucket_mode, BucketMode::Year);
        assert!(config.schedule.to_next_call);
        assert_eq!(
            config.grouping,
            vec![GroupDimension::Fund, GroupDimension::AssetType]
        );
        assert_eq!(config.asset_series_name, "Asset Cashflows");
        assert!(config.max_positions.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ProjectionConfig::sequential()
            .with_threshold(50)
            .with_bucket_mode(BucketMode::Month)
            .with_max_positions(10)
            .with_reporting_unit(ReportingUnit::Millions);

        assert!(!config.parallel);
        assert_eq!(config.parallel_threshold, 50);
        assert_eq!(config.bucket_mode, BucketMode::Month);
        assert_eq!(config.max_positions, Some(10));
        assert_eq!(config.reporting_unit.divisor(), Decimal::from(1_000_000));
    }

    #[test]
    fn test_should_parallelize() {
        let config = ProjectionConfig::new().with_threshold(100);

        #[cfg(feature = "parallel")]
        {
            assert!(!config.should_parallelize(50));
            assert!(config.should_parallelize(100));
        }

        #[cfg(not(feature = "parallel"))]
        {
            assert!(!config.should_parallelize(50));
            assert!(!config.should_parallelize(100));
        }

        assert!(!ProjectionConfig::sequential().should_parallelize(10_000));
    }

    #[test]
    fn test_toml_partial_config() {
        let text = r#"
            bucket_mode = "month"
            reporting_unit = "millions"
            grouping = ["fund"]

            [schedule]
            to_next_call = false
            first_coupon_policy = "accrual_anchor"
        "#;
        let config: ProjectionConfig = toml::from_str(text).unwrap();

        assert_eq!(config.bucket_mode, BucketMode::Month);
        assert_eq!(config.reporting_unit, ReportingUnit::Millions);
        assert_eq!(config.grouping, vec![GroupDimension::Fund]);
        assert!(!config.schedule.to_next_call);
        assert_eq!(
            config.schedule.first_coupon_policy,
            FirstCouponPolicy::AccrualAnchor
        );
        assert_eq!(config.parallel_threshold, 100);
    }

    #[test]
    fn test_serde() {
        let config = ProjectionConfig::new().with_threshold(75);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ProjectionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
