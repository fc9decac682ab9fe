//! Planner configuration module

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use jiff::civil::Date;
use trailhead::campgrounds::AccommodationType;

use crate::config::logging::LoggingConfig;

pub(crate) mod logging;

/// Trailhead trip planner configuration
#[derive(Debug, Parser)]
#[command(name = "trailhead", about = "Plan a multi-stop camping road trip", long_about = None)]
pub struct PlannerConfig {
    /// Destination identifier (e.g. `northern-michigan`)
    #[arg(short, long, env = "TRAILHEAD_DESTINATION", default_value = "northern-michigan")]
    pub destination: String,

    /// Total nights of the trip
    #[arg(short, long, env = "TRAILHEAD_NIGHTS", default_value_t = 5)]
    pub nights: u32,

    /// Date of the first night (YYYY-MM-DD); not needed with `--list`
    #[arg(
        short,
        long,
        env = "TRAILHEAD_START_DATE",
        required_unless_present = "list"
    )]
    pub start_date: Option<Date>,

    /// Number of adults
    #[arg(long, env = "TRAILHEAD_ADULTS", default_value_t = 2)]
    pub adults: u8,

    /// Number of kids
    #[arg(long, env = "TRAILHEAD_KIDS", default_value_t = 0)]
    pub kids: u8,

    /// Campground for the next stay, in travel order (`campground-id:type`)
    #[arg(short, long = "pick")]
    pub picks: Vec<Pick>,

    /// List destinations and their supported trip lengths, then exit
    #[arg(long, default_value_t = false)]
    pub list: bool,

    /// Reference data settings.
    #[command(flatten)]
    pub fixtures: FixtureConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

/// Reference data settings.
#[derive(Debug, clap::Args)]
pub struct FixtureConfig {
    /// Directory holding `destinations/` and `campgrounds/` YAML files
    #[arg(long = "fixtures", env = "TRAILHEAD_FIXTURES", default_value = "./fixtures")]
    pub path: PathBuf,

    /// Fixture set name
    #[arg(long = "fixture-set", env = "TRAILHEAD_FIXTURE_SET", default_value = "default")]
    pub set: String,
}

/// A campground booked for one stay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    /// Campground identifier from the fixture set
    pub campground: String,

    /// Accommodation type booked
    pub accommodation_type: AccommodationType,
}

impl FromStr for Pick {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((campground, kind)) = s.rsplit_once(':') else {
            return Ok(Self {
                campground: s.to_string(),
                accommodation_type: AccommodationType::Tent,
            });
        };

        if campground.is_empty() {
            return Err(format!("missing campground in pick: {s}"));
        }

        Ok(Self {
            campground: campground.to_string(),
            accommodation_type: kind.parse()?,
        })
    }
}

impl PlannerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
