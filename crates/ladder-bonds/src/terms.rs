//! Static terms of a portfolio position.
//!
//! `BondTerms` is the plain in-memory record supplied by the position feed:
//! one row per position per valuation date. Zero-valued factors and
//! redemption values mean "unset" and are defaulted where they are used,
//! never here.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use ladder_core::types::Date;

use crate::error::{BondError, BondResult};

/// Asset type label for agency mortgage pools.
pub const MORTGAGE_BACKED_SECURITY: &str = "Mortgage Backed Security";

/// Annual coupon assumed for mortgage pools reporting a zero coupon.
pub const DEFAULT_MBS_COUPON_RATE: Decimal = dec!(6);

/// Static terms and holding size of one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondTerms {
    /// Position identifier.
    pub position_id: String,
    /// Security identifier used to look up coupon-date overrides.
    #[serde(default)]
    pub security_id: Option<String>,
    /// Security description.
    #[serde(default)]
    pub security_name: String,
    /// Fund code holding the position.
    #[serde(default)]
    pub fund_code: String,
    /// Account code within the fund.
    #[serde(default)]
    pub account_code: Option<String>,
    /// Reporting asset-type label.
    #[serde(default)]
    pub asset_type: Option<String>,
    /// Market-data asset type (e.g. "Mortgage Backed Security").
    #[serde(default)]
    pub bbg_asset_type: Option<String>,
    /// Portfolio manager.
    #[serde(default)]
    pub manager: Option<String>,
    /// Valuation date.
    pub closing_date: Date,
    /// Stated maturity date.
    pub maturity_date: Date,
    /// Workout date computed independently by the feed.
    #[serde(default)]
    pub effective_maturity: Option<Date>,
    /// Next call date.
    #[serde(default)]
    pub call_date: Option<Date>,
    /// Price paid on the next call.
    #[serde(default)]
    pub call_price: Option<Decimal>,
    /// Redemption at maturity in percent of par (0 = unset).
    #[serde(default)]
    pub redemption_value: Decimal,
    /// Annual coupon in percent.
    #[serde(default)]
    pub coupon_rate: Decimal,
    /// Coupons per year (0 = zero coupon).
    #[serde(default)]
    pub coupon_frequency: i32,
    /// Price multiplier per unit of quantity.
    #[serde(default = "one")]
    pub unit_price: Decimal,
    /// Quantity held.
    #[serde(default)]
    pub position_quantity: Decimal,
    /// Mortgage paydown factor (0 = unset).
    #[serde(default)]
    pub mortgage_factor: Decimal,
    /// Principal paydown factor (0 = unset).
    #[serde(default)]
    pub principal_factor: Decimal,
    /// Conversion rate into the reporting currency.
    #[serde(default = "one")]
    pub fx_rate: Decimal,
    /// Position currency.
    #[serde(default)]
    pub currency: String,
    /// Reference net market value in the reporting currency.
    #[serde(default)]
    pub net_market_value: Option<Decimal>,
    /// First coupon date override.
    #[serde(default)]
    pub first_coupon_date: Option<Date>,
    /// Penultimate coupon date override.
    #[serde(default)]
    pub penultimate_coupon_date: Option<Date>,
}

fn one() -> Decimal {
    Decimal::ONE
}

impl BondTerms {
    /// Returns a builder for position terms.
    #[must_use]
    pub fn builder() -> BondTermsBuilder {
        BondTermsBuilder::default()
    }

    /// Redemption value with the zero-means-unset rule applied.
    #[must_use]
    pub fn effective_redemption_value(&self) -> Decimal {
        if self.redemption_value.is_zero() {
            Decimal::ONE_HUNDRED
        } else {
            self.redemption_value
        }
    }

    /// Mortgage factor with the zero-means-unset rule applied.
    #[must_use]
    pub fn effective_mortgage_factor(&self) -> Decimal {
        non_zero_or_one(self.mortgage_factor)
    }

    /// Principal factor with the zero-means-unset rule applied.
    #[must_use]
    pub fn effective_principal_factor(&self) -> Decimal {
        non_zero_or_one(self.principal_factor)
    }

    /// Returns true for mortgage pools.
    #[must_use]
    pub fn is_mortgage_backed(&self) -> bool {
        self.bbg_asset_type.as_deref() == Some(MORTGAGE_BACKED_SECURITY)
    }

    /// Substitutes `fallback_rate` for the coupon of a mortgage pool that
    /// reports a zero coupon. Other positions are returned unchanged.
    #[must_use]
    pub fn with_mbs_coupon_fallback(mut self, fallback_rate: Decimal) -> Self {
        if self.is_mortgage_backed() && self.coupon_rate.is_zero() {
            tracing::debug!(
                position_id = %self.position_id,
                rate = %fallback_rate,
                "mortgage pool without coupon, using fallback rate"
            );
            self.coupon_rate = fallback_rate;
        }
        self
    }
}

fn non_zero_or_one(value: Decimal) -> Decimal {
    if value.is_zero() {
        Decimal::ONE
    } else {
        value
    }
}

/// Builder for [`BondTerms`].
#[derive(Debug, Clone, Default)]
pub struct BondTermsBuilder {
    position_id: Option<String>,
    security_id: Option<String>,
    security_name: Option<String>,
    fund_code: Option<String>,
    account_code: Option<String>,
    asset_type: Option<String>,
    bbg_asset_type: Option<String>,
    manager: Option<String>,
    closing_date: Option<Date>,
    maturity_date: Option<Date>,
    effective_maturity: Option<Date>,
    call_date: Option<Date>,
    call_price: Option<Decimal>,
    redemption_value: Option<Decimal>,
    coupon_rate: Option<Decimal>,
    coupon_frequency: Option<i32>,
    unit_price: Option<Decimal>,
    position_quantity: Option<Decimal>,
    mortgage_factor: Option<Decimal>,
    principal_factor: Option<Decimal>,
    fx_rate: Option<Decimal>,
    currency: Option<String>,
    net_market_value: Option<Decimal>,
    first_coupon_date: Option<Date>,
    penultimate_coupon_date: Option<Date>,
}

impl BondTermsBuilder {
    /// Sets the position identifier.
    #[must_use]
    pub fn position_id(mut self, id: impl Into<String>) -> Self {
        self.position_id = Some(id.into());
        self
    }

    /// Sets the security identifier.
    #[must_use]
    pub fn security_id(mut self, id: impl Into<String>) -> Self {
        self.security_id = Some(id.into());
        self
    }

    /// Sets the security description.
    #[must_use]
    pub fn security_name(mut self, name: impl Into<String>) -> Self {
        self.security_name = Some(name.into());
        self
    }

    /// Sets the fund code.
    #[must_use]
    pub fn fund_code(mut self, code: impl Into<String>) -> Self {
        self.fund_code = Some(code.into());
        self
    }

    /// Sets the accounting code.
    #[must_use]
    pub fn account_code(mut self, code: impl Into<String>) -> Self {
        self.account_code = Some(code.into());
        self
    }

    /// Sets the reporting asset type.
    #[must_use]
    pub fn asset_type(mut self, label: impl Into<String>) -> Self {
        self.asset_type = Some(label.into());
        self
    }

    /// Sets the market-data asset type.
    #[must_use]
    pub fn bbg_asset_type(mut self, label: impl Into<String>) -> Self {
        self.bbg_asset_type = Some(label.into());
        self
    }

    /// Sets the portfolio manager.
    #[must_use]
    pub fn manager(mut self, manager: impl Into<String>) -> Self {
        self.manager = Some(manager.into());
        self
    }

    /// Sets the valuation date.
    #[must_use]
    pub fn closing_date(mut self, date: Date) -> Self {
        self.closing_date = Some(date);
        self
    }

    /// Sets the stated maturity.
    #[must_use]
    pub fn maturity_date(mut self, date: Date) -> Self {
        self.maturity_date = Some(date);
        self
    }

    /// Sets the feed's effective maturity.
    #[must_use]
    pub fn effective_maturity(mut self, date: Date) -> Self {
        self.effective_maturity = Some(date);
        self
    }

    /// Sets the next call date and price.
    #[must_use]
    pub fn call(mut self, date: Date, price: Decimal) -> Self {
        self.call_date = Some(date);
        self.call_price = Some(price);
        self
    }

    /// Sets the redemption value.
    #[must_use]
    pub fn redemption_value(mut self, value: Decimal) -> Self {
        self.redemption_value = Some(value);
        self
    }

    /// Sets the annual coupon rate in percent.
    #[must_use]
    pub fn coupon_rate(mut self, rate: Decimal) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the number of coupons per year.
    #[must_use]
    pub fn coupon_frequency(mut self, frequency: i32) -> Self {
        self.coupon_frequency = Some(frequency);
        self
    }

    /// Sets the unit price.
    #[must_use]
    pub fn unit_price(mut self, price: Decimal) -> Self {
        self.unit_price = Some(price);
        self
    }

    /// Sets the quantity held.
    #[must_use]
    pub fn position_quantity(mut self, quantity: Decimal) -> Self {
        self.position_quantity = Some(quantity);
        self
    }

    /// Sets the mortgage and principal paydown factors.
    #[must_use]
    pub fn factors(mut self, mortgage: Decimal, principal: Decimal) -> Self {
        self.mortgage_factor = Some(mortgage);
        self.principal_factor = Some(principal);
        self
    }

    /// Sets the FX rate.
    #[must_use]
    pub fn fx_rate(mut self, rate: Decimal) -> Self {
        self.fx_rate = Some(rate);
        self
    }

    /// Sets the currency.
    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Sets the reference net market value.
    #[must_use]
    pub fn net_market_value(mut self, value: Decimal) -> Self {
        self.net_market_value = Some(value);
        self
    }

    /// Sets the first coupon date override.
    #[must_use]
    pub fn first_coupon_date(mut self, date: Date) -> Self {
        self.first_coupon_date = Some(date);
        self
    }

    /// Sets the penultimate coupon date override.
    #[must_use]
    pub fn penultimate_coupon_date(mut self, date: Date) -> Self {
        self.penultimate_coupon_date = Some(date);
        self
    }

    /// Builds the terms.
    ///
    /// # Errors
    ///
    /// Returns `BondError::MissingField` if the position id, closing date
    /// or maturity date is missing.
    pub fn build(self) -> BondResult<BondTerms> {
        let position_id = self
            .position_id
            .ok_or_else(|| BondError::missing_field("position_id"))?;
        let closing_date = self
            .closing_date
            .ok_or_else(|| BondError::missing_field("closing_date"))?;
        let maturity_date = self
            .maturity_date
            .ok_or_else(|| BondError::missing_field("maturity_date"))?;

        Ok(BondTerms {
            position_id,
            security_id: self.security_id,
            security_name: self.security_name.unwrap_or_default(),
            fund_code: self.fund_code.unwrap_or_default(),
            account_code: self.account_code,
            asset_type: self.asset_type,
            bbg_asset_type: self.bbg_asset_type,
            manager: self.manager,
            closing_date,
            maturity_date,
            effective_maturity: self.effective_maturity,
            call_date: self.call_date,
            call_price: self.call_price,
            redemption_value: self.redemption_value.unwrap_or(Decimal::ONE_HUNDRED),
            coupon_rate: self.coupon_rate.unwrap_or_default(),
            coupon_frequency: self.coupon_frequency.unwrap_or_default(),
            unit_price: self.unit_price.unwrap_or(Decimal::ONE),
            position_quantity: self.position_quantity.unwrap_or_default(),
            mortgage_factor: self.mortgage_factor.unwrap_or(Decimal::ONE),
            principal_factor: self.principal_factor.unwrap_or(Decimal::ONE),
            fx_rate: self.fx_rate.unwrap_or(Decimal::ONE),
            currency: self.currency.unwrap_or_else(|| "USD".to_string()),
            net_market_value: self.net_market_value,
            first_coupon_date: self.first_coupon_date,
            penultimate_coupon_date: self.penultimate_coupon_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn base() -> BondTermsBuilder {
        BondTerms::builder()
            .position_id("P-1")
            .closing_date(d(2024, 12, 31))
            .maturity_date(d(2027, 12, 31))
    }

    #[test]
    fn test_builder_requires_position_id() {
        let err = BondTerms::builder()
            .closing_date(d(2024, 12, 31))
            .maturity_date(d(2027, 12, 31))
            .build()
            .unwrap_err();
        assert_eq!(err, BondError::missing_field("position_id"));
    }

    #[test]
    fn test_zero_means_unset() {
        let terms = base()
            .redemption_value(Decimal::ZERO)
            .factors(Decimal::ZERO, Decimal::ZERO)
            .build()
            .unwrap();

        assert_eq!(terms.effective_redemption_value(), dec!(100));
        assert_eq!(terms.effective_mortgage_factor(), Decimal::ONE);
        assert_eq!(terms.effective_principal_factor(), Decimal::ONE);
    }

    #[test]
    fn test_mbs_fallback_only_for_zero_coupon_pools() {
        let pool = base()
            .bbg_asset_type(MORTGAGE_BACKED_SECURITY)
            .coupon_frequency(12)
            .build()
            .unwrap()
            .with_mbs_coupon_fallback(DEFAULT_MBS_COUPON_RATE);
        assert_eq!(pool.coupon_rate, dec!(6));

        let paying_pool = base()
            .bbg_asset_type(MORTGAGE_BACKED_SECURITY)
            .coupon_rate(dec!(3.5))
            .build()
            .unwrap()
            .with_mbs_coupon_fallback(DEFAULT_MBS_COUPON_RATE);
        assert_eq!(paying_pool.coupon_rate, dec!(3.5));

        let zero = base()
            .bbg_asset_type("Corporate Bond")
            .build()
            .unwrap()
            .with_mbs_coupon_fallback(DEFAULT_MBS_COUPON_RATE);
        assert_eq!(zero.coupon_rate, Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "position_id": "P-9",
            "closing_date": "2024-12-31",
            "maturity_date": "2030-06-30",
            "coupon_rate": 5,
            "coupon_frequency": 2,
            "position_quantity": 250000
        }"#;
        let terms: BondTerms = serde_json::from_str(json).unwrap();
        assert_eq!(terms.fx_rate, Decimal::ONE);
        assert_eq!(terms.unit_price, Decimal::ONE);
        assert_eq!(terms.effective_redemption_value(), dec!(100));
        assert!(terms.call_date.is_none());
        assert!(terms.net_market_value.is_none());
    }
}
