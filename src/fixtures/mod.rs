//! Fixtures
//!
//! YAML reference data: destinations with their stop templates, and campgrounds
//! with nightly rates.

use std::{fs, path::PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    campgrounds::{Campground, CampgroundKey},
    destinations::{CatalogError, Destination, DestinationCatalog},
    fixtures::{campgrounds::CampgroundsFixture, destinations::DestinationsFixture},
};

pub mod campgrounds;
pub mod destinations;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between campgrounds
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Campground not found
    #[error("Campground not found: {0}")]
    CampgroundNotFound(String),

    /// Campground defined more than once
    #[error("Campground defined more than once: {0}")]
    DuplicateCampground(String),

    /// Campground serves a location no destination visits
    #[error("Campground {campground} serves unknown location: {location}")]
    UnknownLocation {
        /// Campground id
        campground: String,

        /// Location key from the fixture
        location: String,
    },

    /// Stop templates failed validation
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Destinations loaded so far, in load order
    destinations: Vec<Destination>,

    /// Validated catalog of `destinations`
    catalog: DestinationCatalog,

    /// `SlotMap` storing campgrounds with generated keys
    campgrounds: SlotMap<CampgroundKey, Campground<'a>>,

    /// Campground id -> `SlotMap` key
    campground_keys: FxHashMap<String, CampgroundKey>,

    /// Currency for the fixture set
    currency: Option<&'static rusty_money::iso::Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            destinations: Vec::new(),
            catalog: DestinationCatalog::default(),
            campgrounds: SlotMap::with_key(),
            campground_keys: FxHashMap::default(),
            currency: None,
        }
    }

    /// Load destinations and their stop templates from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a template is invalid.
    pub fn load_destinations(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("destinations")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let fixture: DestinationsFixture = serde_norway::from_str(&contents)?;

        let mut loaded: Vec<Destination> = fixture
            .destinations
            .into_iter()
            .map(|(id, destination)| destination.into_destination(id))
            .collect();

        loaded.sort_by(|a, b| a.id.cmp(&b.id));

        let mut destinations = self.destinations.clone();
        destinations.extend(loaded);

        self.catalog = DestinationCatalog::new(destinations.iter().cloned())?;
        self.destinations = destinations;

        tracing::debug!(
            fixture = name,
            destinations = self.catalog.len(),
            "destination fixture loaded"
        );

        Ok(self)
    }

    /// Load campgrounds from a YAML fixture file
    ///
    /// Once destinations are loaded, every campground must serve one of their
    /// locations. A file that fails to load leaves the fixture unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a rate is malformed,
    /// a campground is duplicated or serves an unknown location, or currencies differ.
    pub fn load_campgrounds(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("campgrounds")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let fixture: CampgroundsFixture = serde_norway::from_str(&contents)?;

        let mut entries: Vec<_> = fixture.campgrounds.into_iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        let known_locations: FxHashSet<&str> = self
            .catalog
            .iter()
            .flat_map(|destination| destination.location_keys.values().map(String::as_str))
            .collect();

        // Nothing is inserted until the whole file has been checked
        let mut currency = self.currency;
        let mut parsed = Vec::with_capacity(entries.len());

        for (id, campground_fixture) in entries {
            if self.campground_keys.contains_key(&id) {
                return Err(FixtureError::DuplicateCampground(id));
            }

            if !known_locations.is_empty()
                && !known_locations.contains(campground_fixture.location.as_str())
            {
                return Err(FixtureError::UnknownLocation {
                    campground: id,
                    location: campground_fixture.location,
                });
            }

            // Validate currency consistency
            for rate in campground_fixture.rates.values() {
                let (_minor_units, rate_currency) = campgrounds::parse_price(rate)?;

                match currency {
                    Some(existing) if existing != rate_currency => {
                        return Err(FixtureError::CurrencyMismatch(
                            existing.iso_alpha_code.to_string(),
                            rate_currency.iso_alpha_code.to_string(),
                        ));
                    }
                    Some(_) => {}
                    None => currency = Some(rate_currency),
                }
            }

            let campground = campground_fixture.try_into_campground(id.clone())?;

            parsed.push((id, campground));
        }

        for (id, campground) in parsed {
            let key = self.campgrounds.insert(campground);

            self.campground_keys.insert(id, key);
        }

        self.currency = currency;

        tracing::debug!(
            fixture = name,
            campgrounds = self.campgrounds.len(),
            "campground fixture loaded"
        );

        Ok(self)
    }

    /// Load a complete fixture set (destinations and campgrounds with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_destinations(name)?.load_campgrounds(name)?;

        Ok(fixture)
    }

    /// Validated destination catalog
    pub fn catalog(&self) -> &DestinationCatalog {
        &self.catalog
    }

    /// All campgrounds keyed by `CampgroundKey`
    pub fn campgrounds(&self) -> &SlotMap<CampgroundKey, Campground<'a>> {
        &self.campgrounds
    }

    /// Get a campground key by its string id
    ///
    /// # Errors
    ///
    /// Returns an error if the campground is not found.
    pub fn campground_key(&self, id: &str) -> Result<CampgroundKey, FixtureError> {
        self.campground_keys
            .get(id)
            .copied()
            .ok_or_else(|| FixtureError::CampgroundNotFound(id.to_string()))
    }

    /// Get a campground by its string id
    ///
    /// # Errors
    ///
    /// Returns an error if the campground is not found.
    pub fn campground(&self, id: &str) -> Result<&Campground<'a>, FixtureError> {
        let key = self.campground_key(id)?;

        self.campgrounds
            .get(key)
            .ok_or_else(|| FixtureError::CampgroundNotFound(id.to_string()))
    }

    /// Keys of campgrounds serving a location, ordered by id
    pub fn campgrounds_at(&self, location_key: &str) -> Vec<CampgroundKey> {
        let mut found: Vec<_> = self
            .campgrounds
            .iter()
            .filter(|(_, campground)| campground.serves(location_key))
            .collect();

        found.sort_by(|(_, a), (_, b)| a.id.cmp(&b.id));

        found.into_iter().map(|(key, _)| key).collect()
    }

    /// Currency of the loaded campground rates
    pub fn currency(&self) -> Option<&'static rusty_money::iso::Currency> {
        self.currency
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rusty_money::{Money, iso::USD};
    use tempfile::TempDir;
    use testresult::TestResult;

    use crate::campgrounds::AccommodationType;

    use super::*;

    const DESTINATIONS: &str = r"
destinations:
  northern-michigan:
    name: Northern Michigan
    description: Explore the scenic beauty of Northern Michigan
    locations:
      Traverse City: traverse-city
      Mackinac: mackinac-city
    stops:
      2:
        - location: Traverse City
          nights: 2
      3:
        - location: Traverse City
          nights: 2
        - location: Mackinac
          nights: 1
";

    const CAMPGROUNDS: &str = r#"
campgrounds:
  lakeside:
    name: Lakeside Pines
    location: traverse-city
    rates:
      tent: "35.00 USD"
      rv: "52.50 USD"
  harbor:
    name: Harbor View
    location: mackinac-city
    rates:
      tent: "40 USD"
"#;

    fn write_set(dir: &TempDir, name: &str, destinations: &str, campgrounds: &str) -> TestResult {
        fs::create_dir_all(dir.path().join("destinations"))?;
        fs::create_dir_all(dir.path().join("campgrounds"))?;
        fs::write(
            dir.path().join("destinations").join(format!("{name}.yml")),
            destinations,
        )?;
        fs::write(
            dir.path().join("campgrounds").join(format!("{name}.yml")),
            campgrounds,
        )?;

        Ok(())
    }

    #[test]
    fn loads_destinations_and_campgrounds() -> TestResult {
        let dir = TempDir::new()?;
        write_set(&dir, "small", DESTINATIONS, CAMPGROUNDS)?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_destinations("small")?.load_campgrounds("small")?;

        assert_eq!(fixture.catalog().supported_nights("northern-michigan"), vec![2, 3]);
        assert_eq!(fixture.campgrounds().len(), 2);
        assert_eq!(fixture.currency(), Some(USD));

        let lakeside = fixture.campground("lakeside")?;

        assert_eq!(
            lakeside.nightly_rate(AccommodationType::Rv),
            Some(Money::from_minor(5250, USD))
        );
        assert_eq!(fixture.campgrounds_at("mackinac-city").len(), 1);
        assert!(fixture.campgrounds_at("pictured-rocks").is_empty());

        Ok(())
    }

    #[test]
    fn invalid_template_fails_to_load() -> TestResult {
        let dir = TempDir::new()?;
        let broken = DESTINATIONS.replace("nights: 1", "nights: 2");
        write_set(&dir, "broken", &broken, CAMPGROUNDS)?;

        let result = Fixture::with_base_path(dir.path())
            .load_destinations("broken")
            .map(|_| ());

        assert!(matches!(
            result,
            Err(FixtureError::Catalog(CatalogError::NightsMismatch { nights: 3, sum: 4, .. }))
        ));

        Ok(())
    }

    #[test]
    fn mixed_currencies_fail_to_load() -> TestResult {
        let dir = TempDir::new()?;
        let mixed = CAMPGROUNDS.replace("40 USD", "40 EUR");
        write_set(&dir, "mixed", DESTINATIONS, &mixed)?;

        let result = Fixture::with_base_path(dir.path())
            .load_campgrounds("mixed")
            .map(|_| ());

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn misspelled_location_fails_to_load() -> TestResult {
        let dir = TempDir::new()?;
        let misspelled = CAMPGROUNDS.replace("location: mackinac-city", "location: mackinaw-city");
        write_set(&dir, "misspelled", DESTINATIONS, &misspelled)?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_destinations("misspelled")?;

        let result = fixture.load_campgrounds("misspelled").map(|_| ());

        assert!(matches!(
            result,
            Err(FixtureError::UnknownLocation { campground, location })
                if campground == "harbor" && location == "mackinaw-city"
        ));

        Ok(())
    }

    #[test]
    fn failed_campground_load_leaves_fixture_unchanged() -> TestResult {
        let dir = TempDir::new()?;
        // `harbor` sorts first and is valid; `lakeside` has a malformed rate
        let broken = CAMPGROUNDS.replace("52.50 USD", "52.50USD");
        write_set(&dir, "broken", DESTINATIONS, &broken)?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_destinations("broken")?;

        let result = fixture.load_campgrounds("broken").map(|_| ());

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
        assert!(fixture.campgrounds().is_empty());
        assert!(fixture.campground_key("harbor").is_err());
        assert_eq!(fixture.currency(), None);

        Ok(())
    }

    #[test]
    fn unknown_campground_is_an_error() {
        let fixture = Fixture::with_base_path("./does-not-exist");

        assert!(matches!(
            fixture.campground_key("nowhere"),
            Err(FixtureError::CampgroundNotFound(id)) if id == "nowhere"
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Fixture::with_base_path("./does-not-exist")
            .load_destinations("default")
            .map(|_| ());

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }
}
