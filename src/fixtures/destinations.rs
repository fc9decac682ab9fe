//! Destination Fixtures

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::destinations::{Destination, TemplateStop};

/// Wrapper for destinations in YAML
#[derive(Debug, Deserialize)]
pub struct DestinationsFixture {
    /// Map of destination id -> destination fixture
    pub destinations: FxHashMap<String, DestinationFixture>,
}

/// Destination Fixture
#[derive(Debug, Deserialize)]
pub struct DestinationFixture {
    /// Display name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Location name -> location key
    #[serde(default)]
    pub locations: BTreeMap<String, String>,

    /// Stop templates keyed by total night count
    #[serde(default)]
    pub stops: BTreeMap<u32, Vec<TemplateStopFixture>>,
}

/// One stop of a template (e.g. `{ location: Mackinac, nights: 1 }`)
#[derive(Debug, Deserialize)]
pub struct TemplateStopFixture {
    /// Location display name
    pub location: String,

    /// Nights spent at the location
    pub nights: u32,
}

impl DestinationFixture {
    /// Convert into a [`Destination`] with the given id.
    ///
    /// Templates are validated when the catalog is built, not here.
    pub fn into_destination(self, id: String) -> Destination {
        let mut destination = Destination::new(id, self.name);
        destination.description = self.description;

        for (name, key) in self.locations {
            destination = destination.with_location(name, key);
        }

        for (nights, stops) in self.stops {
            let template: Vec<TemplateStop> = stops
                .into_iter()
                .map(|stop| TemplateStop::new(stop.location, stop.nights))
                .collect();

            destination = destination.with_template(nights, template);
        }

        destination
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn stop_lists_keep_their_order() -> TestResult {
        let fixture: DestinationFixture = serde_norway::from_str(
            r"
name: Arizona
locations:
  Grand Canyon: grand-canyon
  Sedona: sedona
stops:
  3:
    - location: Sedona
      nights: 1
    - location: Grand Canyon
      nights: 2
",
        )?;

        let destination = fixture.into_destination("arizona".to_string());
        let template = destination.template(3).ok_or("missing template")?;

        assert_eq!(
            template,
            [TemplateStop::new("Sedona", 1), TemplateStop::new("Grand Canyon", 2)]
        );
        assert_eq!(destination.location_key("Sedona"), Some("sedona"));
        assert!(destination.description.is_empty());

        Ok(())
    }
}
