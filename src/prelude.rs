//! Trailhead prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    availability::{
        AvailabilityProvider, AvailabilityRequest, CampgroundAvailability, StaticAvailability,
        availability_requests,
    },
    campgrounds::{AccommodationType, Campground, CampgroundKey},
    destinations::{CatalogError, Destination, DestinationCatalog, DestinationKey, TemplateStop},
    fixtures::{Fixture, FixtureError},
    gate::{SelectionError, first_open_stay, is_stay_selectable, select_campground},
    itinerary::{Itinerary, ItineraryError, Party, Stop, TripRequest, build_itinerary},
    selections::{NightSelection, NightSelections},
    session::{PlanningSession, SessionError, TripSnapshot},
    stays::{
        InvariantViolation, Stay, compute_stays, next_stay_after, stay_index_for_night,
        stays_or_empty,
    },
    summary::{SummaryError, SummaryLine, TripSummary},
};
