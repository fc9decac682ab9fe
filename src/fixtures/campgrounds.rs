//! Campground Fixtures

use std::collections::BTreeMap;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, CAD, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    campgrounds::{AccommodationType, Campground},
    fixtures::FixtureError,
};

/// Wrapper for campgrounds in YAML
#[derive(Debug, Deserialize)]
pub struct CampgroundsFixture {
    /// Map of campground id -> campground fixture
    pub campgrounds: FxHashMap<String, CampgroundFixture>,
}

/// Campground Fixture
#[derive(Debug, Deserialize)]
pub struct CampgroundFixture {
    /// Display name
    pub name: String,

    /// Location key the campground serves
    pub location: String,

    /// Nightly rates (e.g., `tent: "35.00 USD"`)
    pub rates: BTreeMap<AccommodationType, String>,
}

impl CampgroundFixture {
    /// Convert into a [`Campground`] with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if a rate cannot be parsed.
    pub fn try_into_campground<'a>(self, id: String) -> Result<Campground<'a>, FixtureError> {
        let mut campground = Campground::new(id, self.name, self.location);

        for (kind, rate) in &self.rates {
            let (minor_units, currency) = parse_price(rate)?;

            campground = campground.with_rate(*kind, Money::from_minor(minor_units, currency));
        }

        Ok(campground)
    }
}

/// Parse price string (e.g., "35.00 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "USD" => USD,
        "CAD" => CAD,
        "EUR" => EUR,
        "GBP" => GBP,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}
