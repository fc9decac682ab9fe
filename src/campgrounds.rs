//! Campgrounds

use std::fmt;

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use slotmap::new_key_type;

new_key_type! {
    /// Campground Key
    pub struct CampgroundKey;
}

/// Kind of site booked at a campground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationType {
    /// Tent site
    Tent,

    /// RV site
    Rv,

    /// Cabin, yurt or other lodging
    Lodging,
}

impl AccommodationType {
    /// Lowercase identifier, as used in fixtures and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AccommodationType::Tent => "tent",
            AccommodationType::Rv => "rv",
            AccommodationType::Lodging => "lodging",
        }
    }
}

impl fmt::Display for AccommodationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for AccommodationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tent" => Ok(AccommodationType::Tent),
            "rv" => Ok(AccommodationType::Rv),
            "lodging" => Ok(AccommodationType::Lodging),
            other => Err(format!("unknown accommodation type: {other}")),
        }
    }
}

/// A bookable campground at one itinerary location.
#[derive(Debug, Clone, PartialEq)]
pub struct Campground<'a> {
    /// Stable identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Location key of the stop this campground serves
    pub location_key: String,

    /// Nightly rate per accommodation type offered
    pub rates: FxHashMap<AccommodationType, Money<'a, Currency>>,
}

impl<'a> Campground<'a> {
    /// Create a campground offering no accommodation types yet.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location_key: location_key.into(),
            rates: FxHashMap::default(),
        }
    }

    /// Offer an accommodation type at a nightly rate.
    #[must_use]
    pub fn with_rate(mut self, kind: AccommodationType, rate: Money<'a, Currency>) -> Self {
        self.rates.insert(kind, rate);
        self
    }

    /// Nightly rate for an accommodation type, if offered.
    pub fn nightly_rate(&self, kind: AccommodationType) -> Option<Money<'a, Currency>> {
        self.rates.get(&kind).copied()
    }

    /// Whether the campground serves the given location.
    #[must_use]
    pub fn serves(&self, location_key: &str) -> bool {
        self.location_key == location_key
    }

    /// Offered accommodation types, in a stable order.
    pub fn accommodation_types(&self) -> Vec<AccommodationType> {
        let mut kinds: Vec<_> = self.rates.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;

    use super::*;

    #[test]
    fn rates_are_per_accommodation_type() {
        let campground = Campground::new("tc-state-park", "Traverse City State Park", "traverse-city")
            .with_rate(AccommodationType::Tent, Money::from_minor(3500, USD))
            .with_rate(AccommodationType::Rv, Money::from_minor(5200, USD));

        assert_eq!(
            campground.nightly_rate(AccommodationType::Tent),
            Some(Money::from_minor(3500, USD))
        );
        assert_eq!(campground.nightly_rate(AccommodationType::Lodging), None);
        assert_eq!(
            campground.accommodation_types(),
            vec![AccommodationType::Tent, AccommodationType::Rv]
        );
        assert!(campground.serves("traverse-city"));
        assert!(!campground.serves("mackinac-city"));
    }

    #[test]
    fn accommodation_type_parses_case_insensitively() {
        assert_eq!("RV".parse::<AccommodationType>(), Ok(AccommodationType::Rv));
        assert_eq!(
            "lodging".parse::<AccommodationType>(),
            Ok(AccommodationType::Lodging)
        );
        assert!("hammock".parse::<AccommodationType>().is_err());
        assert_eq!(AccommodationType::Tent.to_string(), "tent");
    }
}
