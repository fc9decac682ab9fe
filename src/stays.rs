//! Stays
//!
//! A stay is the night range of exactly one itinerary stop, joined with the
//! campground chosen for it. Boundaries always come from the stops, so two
//! adjacent stops booked at the same campground remain two stays.

use jiff::civil::Date;
use thiserror::Error;

use crate::{
    campgrounds::{AccommodationType, CampgroundKey},
    itinerary::Itinerary,
    selections::{NightSelection, NightSelections},
};

/// Internal consistency failures between an itinerary and its selections.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The selection array does not have one slot per trip night.
    #[error("expected {expected} night selections, found {actual}")]
    SelectionLength {
        /// Nights in the itinerary
        expected: usize,

        /// Slots in the selection array
        actual: usize,
    },

    /// Nights within one stop hold different selections.
    #[error("night {night} at {location} differs from the rest of its stay")]
    NonUniformStay {
        /// Location of the stop
        location: String,

        /// First night found to disagree
        night: u32,
    },
}

/// Read-only view of one stop's nights and its chosen campground.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stay {
    /// Display name of the location
    pub location_name: String,

    /// Lookup key of the location
    pub location_key: String,

    /// First night (1-based)
    pub start_night: u32,

    /// Last night (1-based, inclusive)
    pub end_night: u32,

    /// Check-in date
    pub check_in: Date,

    /// Check-out date
    pub check_out: Date,

    /// Chosen campground
    pub campground: Option<CampgroundKey>,

    /// Accommodation type booked, when a campground is chosen
    pub accommodation_type: Option<AccommodationType>,
}

impl Stay {
    /// Number of nights in the stay.
    #[must_use]
    pub fn nights(&self) -> u32 {
        self.end_night - self.start_night + 1
    }

    /// Whether a campground has been chosen.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.campground.is_some()
    }

    /// Whether the 1-based night belongs to this stay.
    #[must_use]
    pub fn contains_night(&self, night: u32) -> bool {
        (self.start_night..=self.end_night).contains(&night)
    }
}

/// Derive stays from an itinerary and its per-night selections.
///
/// # Errors
///
/// - [`InvariantViolation::SelectionLength`]: the selections do not cover the trip exactly.
/// - [`InvariantViolation::NonUniformStay`]: a stop's nights hold different selections.
pub fn compute_stays(
    itinerary: &Itinerary,
    selections: &NightSelections,
) -> Result<Vec<Stay>, InvariantViolation> {
    let expected = itinerary.total_nights() as usize;

    if selections.len() != expected {
        return Err(InvariantViolation::SelectionLength {
            expected,
            actual: selections.len(),
        });
    }

    itinerary
        .stops()
        .iter()
        .map(|stop| {
            let first = uniform_selection(
                selections,
                stop.first_night,
                stop.last_night(),
                &stop.location_name,
            )?;

            Ok(Stay {
                location_name: stop.location_name.clone(),
                location_key: stop.location_key.clone(),
                start_night: stop.first_night,
                end_night: stop.last_night(),
                check_in: stop.start_date,
                check_out: stop.end_date,
                campground: first.campground,
                accommodation_type: first.campground.map(|_| first.accommodation_type),
            })
        })
        .collect()
}

fn uniform_selection(
    selections: &NightSelections,
    first_night: u32,
    last_night: u32,
    location: &str,
) -> Result<NightSelection, InvariantViolation> {
    let non_uniform = |night| InvariantViolation::NonUniformStay {
        location: location.to_string(),
        night,
    };

    let first = *selections.night(first_night).ok_or_else(|| non_uniform(first_night))?;

    for night in first_night + 1..=last_night {
        let selection = selections.night(night).ok_or_else(|| non_uniform(night))?;

        let same = match (first.campground, selection.campground) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b && first.accommodation_type == selection.accommodation_type,
            _ => false,
        };

        if !same {
            return Err(non_uniform(night));
        }
    }

    Ok(first)
}

/// Stays for display, or none if the inputs are inconsistent.
///
/// Invariant violations are logged at error level rather than propagated.
pub fn stays_or_empty(itinerary: &Itinerary, selections: &NightSelections) -> Vec<Stay> {
    match compute_stays(itinerary, selections) {
        Ok(stays) => stays,
        Err(err) => {
            tracing::error!(
                destination = itinerary.destination_id(),
                error = %err,
                "inconsistent night selections, showing no stays"
            );

            Vec::new()
        }
    }
}

/// Index of the stay containing a 1-based night.
pub fn stay_index_for_night(stays: &[Stay], night: u32) -> Option<usize> {
    stays.iter().position(|stay| stay.contains_night(night))
}

/// Index of the stay following `index`, if any.
pub fn next_stay_after(stays: &[Stay], index: usize) -> Option<usize> {
    let next = index.checked_add(1)?;

    (next < stays.len()).then_some(next)
}
