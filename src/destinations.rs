//! Destinations

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

new_key_type! {
    /// Destination Key
    pub struct DestinationKey;
}

/// Errors found while validating stop templates at load time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two destinations share the same identifier.
    #[error("destination {0} is defined more than once")]
    DuplicateDestination(String),

    /// A template is keyed by zero nights.
    #[error("destination {0} has a template keyed by zero nights")]
    ZeroNightKey(String),

    /// A template has no stops.
    #[error("destination {destination} has an empty template for {nights} nights")]
    EmptyTemplate {
        /// Destination identifier
        destination: String,

        /// Night-count key of the template
        nights: u32,
    },

    /// A stop in a template has no nights.
    #[error("destination {destination} template for {nights} nights has a zero-night stop at {location}")]
    ZeroNightStop {
        /// Destination identifier
        destination: String,

        /// Night-count key of the template
        nights: u32,

        /// Location of the offending stop
        location: String,
    },

    /// A template's stop nights do not add up to its key.
    #[error("destination {destination} template for {nights} nights sums to {sum} nights")]
    NightsMismatch {
        /// Destination identifier
        destination: String,

        /// Night-count key of the template
        nights: u32,

        /// Actual sum of stop nights
        sum: u32,
    },

    /// A template's stop nights add up past the largest night count.
    #[error("destination {destination} template for {nights} nights overflows its night count")]
    NightsOverflow {
        /// Destination identifier
        destination: String,

        /// Night-count key of the template
        nights: u32,
    },

    /// A template references a location with no location key.
    #[error("destination {destination} has no location key for {location}")]
    UnknownLocation {
        /// Destination identifier
        destination: String,

        /// Location name missing from the key table
        location: String,
    },
}

/// One stop of a stop template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateStop {
    /// Display name of the location
    pub location_name: String,

    /// Nights spent at the location
    pub nights_at_location: u32,
}

impl TemplateStop {
    /// Create a template stop.
    pub fn new(location_name: impl Into<String>, nights_at_location: u32) -> Self {
        Self {
            location_name: location_name.into(),
            nights_at_location,
        }
    }
}

/// A destination and its stop templates, keyed by total night count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Destination identifier, e.g. `northern-michigan`
    pub id: String,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Stop templates keyed by total night count
    pub stops: BTreeMap<u32, Vec<TemplateStop>>,

    /// Location name -> location key used by availability lookups
    pub location_keys: FxHashMap<String, String>,
}

impl Destination {
    /// Create a destination with no templates.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            stops: BTreeMap::new(),
            location_keys: FxHashMap::default(),
        }
    }

    /// Add a location and its lookup key.
    #[must_use]
    pub fn with_location(mut self, name: impl Into<String>, key: impl Into<String>) -> Self {
        self.location_keys.insert(name.into(), key.into());
        self
    }

    /// Add a stop template for a total night count.
    #[must_use]
    pub fn with_template(mut self, nights: u32, stops: impl Into<Vec<TemplateStop>>) -> Self {
        self.stops.insert(nights, stops.into());
        self
    }

    /// Stop template for a total night count, if one exists.
    pub fn template(&self, nights: u32) -> Option<&[TemplateStop]> {
        self.stops.get(&nights).map(Vec::as_slice)
    }

    /// Lookup key for a location name.
    pub fn location_key(&self, location_name: &str) -> Option<&str> {
        self.location_keys.get(location_name).map(String::as_str)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for (&nights, template) in &self.stops {
            if nights == 0 {
                return Err(CatalogError::ZeroNightKey(self.id.clone()));
            }

            if template.is_empty() {
                return Err(CatalogError::EmptyTemplate {
                    destination: self.id.clone(),
                    nights,
                });
            }

            let mut sum = 0u32;

            for stop in template {
                if stop.nights_at_location == 0 {
                    return Err(CatalogError::ZeroNightStop {
                        destination: self.id.clone(),
                        nights,
                        location: stop.location_name.clone(),
                    });
                }

                if self.location_key(&stop.location_name).is_none() {
                    return Err(CatalogError::UnknownLocation {
                        destination: self.id.clone(),
                        location: stop.location_name.clone(),
                    });
                }

                sum = sum.checked_add(stop.nights_at_location).ok_or_else(|| {
                    CatalogError::NightsOverflow {
                        destination: self.id.clone(),
                        nights,
                    }
                })?;
            }

            if sum != nights {
                return Err(CatalogError::NightsMismatch {
                    destination: self.id.clone(),
                    nights,
                    sum,
                });
            }
        }

        Ok(())
    }
}

/// Validated, read-only table of destinations and their stop templates.
#[derive(Debug, Clone, Default)]
pub struct DestinationCatalog {
    destinations: SlotMap<DestinationKey, Destination>,
    keys: FxHashMap<String, DestinationKey>,
}

impl DestinationCatalog {
    /// Build a catalog, validating every stop template.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if a template is malformed or a destination is duplicated.
    pub fn new(destinations: impl IntoIterator<Item = Destination>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for destination in destinations {
            destination.validate()?;

            if catalog.keys.contains_key(&destination.id) {
                return Err(CatalogError::DuplicateDestination(destination.id));
            }

            let id = destination.id.clone();
            let key = catalog.destinations.insert(destination);

            catalog.keys.insert(id, key);
        }

        tracing::debug!(destinations = catalog.len(), "destination catalog loaded");

        Ok(catalog)
    }

    /// Look up a destination by identifier.
    pub fn get(&self, id: &str) -> Option<&Destination> {
        self.keys
            .get(id)
            .and_then(|key| self.destinations.get(*key))
    }

    /// Look up a destination by key.
    pub fn get_by_key(&self, key: DestinationKey) -> Option<&Destination> {
        self.destinations.get(key)
    }

    /// Key for a destination identifier.
    pub fn key(&self, id: &str) -> Option<DestinationKey> {
        self.keys.get(id).copied()
    }

    /// Night counts with a stop template for the destination, ascending.
    pub fn supported_nights(&self, id: &str) -> Vec<u32> {
        self.get(id)
            .map(|destination| destination.stops.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Iterate over all destinations.
    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.destinations.values()
    }

    /// Number of destinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    /// Whether the catalog has no destinations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn michigan() -> Destination {
        Destination::new("northern-michigan", "Northern Michigan")
            .with_location("Traverse City", "traverse-city")
            .with_location("Mackinac", "mackinac-city")
            .with_template(2, [TemplateStop::new("Traverse City", 2)])
            .with_template(
                3,
                [
                    TemplateStop::new("Traverse City", 2),
                    TemplateStop::new("Mackinac", 1),
                ],
            )
    }

    #[test]
    fn catalog_accepts_valid_templates() -> TestResult {
        let catalog = DestinationCatalog::new([michigan()])?;

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.supported_nights("northern-michigan"), vec![2, 3]);
        assert!(catalog.get("northern-michigan").is_some());
        assert!(catalog.get("atlantis").is_none());

        let key = catalog.key("northern-michigan").ok_or("missing key")?;

        assert_eq!(
            catalog.get_by_key(key).map(|destination| destination.name.as_str()),
            Some("Northern Michigan")
        );

        Ok(())
    }

    #[test]
    fn catalog_rejects_nights_mismatch() {
        let broken = michigan().with_template(4, [TemplateStop::new("Traverse City", 3)]);

        let result = DestinationCatalog::new([broken]);

        assert_eq!(
            result.err(),
            Some(CatalogError::NightsMismatch {
                destination: "northern-michigan".to_string(),
                nights: 4,
                sum: 3,
            })
        );
    }

    #[test]
    fn catalog_rejects_template_summing_past_max_nights() {
        let broken = Destination::new("x", "X")
            .with_location("A", "a")
            .with_template(
                u32::MAX,
                [TemplateStop::new("A", 5), TemplateStop::new("A", u32::MAX)],
            );

        assert_eq!(
            DestinationCatalog::new([broken]).err(),
            Some(CatalogError::NightsOverflow {
                destination: "x".to_string(),
                nights: u32::MAX,
            })
        );
    }

    #[test]
    fn catalog_rejects_zero_night_stop() {
        let broken = michigan().with_template(
            2,
            [
                TemplateStop::new("Traverse City", 2),
                TemplateStop::new("Mackinac", 0),
            ],
        );

        let result = DestinationCatalog::new([broken]);

        assert!(matches!(result, Err(CatalogError::ZeroNightStop { .. })));
    }

    #[test]
    fn catalog_rejects_empty_template_and_zero_key() {
        let empty = michigan().with_template(5, Vec::new());
        let zero = michigan().with_template(0, [TemplateStop::new("Mackinac", 1)]);

        assert!(matches!(
            DestinationCatalog::new([empty]),
            Err(CatalogError::EmptyTemplate { nights: 5, .. })
        ));
        assert!(matches!(
            DestinationCatalog::new([zero]),
            Err(CatalogError::ZeroNightKey(_))
        ));
    }

    #[test]
    fn catalog_rejects_unknown_location() {
        let broken = michigan().with_template(1, [TemplateStop::new("Pictured Rocks", 1)]);

        assert!(matches!(
            DestinationCatalog::new([broken]),
            Err(CatalogError::UnknownLocation { location, .. }) if location == "Pictured Rocks"
        ));
    }

    #[test]
    fn catalog_rejects_duplicate_destination() {
        let result = DestinationCatalog::new([michigan(), michigan()]);

        assert_eq!(
            result.err(),
            Some(CatalogError::DuplicateDestination(
                "northern-michigan".to_string()
            ))
        );
    }

    #[test]
    fn destination_without_templates_is_allowed() -> TestResult {
        let catalog = DestinationCatalog::new([Destination::new("arizona", "Arizona")])?;

        assert!(catalog.supported_nights("arizona").is_empty());

        Ok(())
    }
}
