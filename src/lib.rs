//! Trailhead
//!
//! Trailhead is the planning core of a multi-stop camping road trip: it expands a
//! destination and trip length into a dated itinerary, groups per-night campground
//! picks into stays, and enforces that stays are booked in travel order.

pub mod availability;
pub mod campgrounds;
pub mod destinations;
pub mod fixtures;
pub mod gate;
pub mod itinerary;
pub mod prelude;
pub mod selections;
pub mod session;
pub mod stays;
pub mod summary;
