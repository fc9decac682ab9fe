//! Selection Gate
//!
//! Stays are booked in chronological order: a stay may only be picked or cleared
//! once every stay before it has a campground.

use thiserror::Error;

use crate::{
    campgrounds::{AccommodationType, CampgroundKey},
    selections::{NightSelection, NightSelections},
    stays::{InvariantViolation, Stay},
};

/// Errors that can occur while changing a stay's campground.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// An earlier stay has no campground yet.
    #[error("stay {stay_index} cannot be changed until stay {blocking_stay} has a campground")]
    StaySequence {
        /// Stay the caller tried to change
        stay_index: usize,

        /// Earlier stay still without a campground
        blocking_stay: usize,
    },

    /// No stay exists at the index.
    #[error("no stay at index {0}")]
    StayNotFound(usize),

    /// Stays and selections are out of step.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// Whether the stay at `stay_index` can currently be picked.
///
/// The first stay is always selectable; any later stay requires every stay before
/// it to have a campground in `selections`. Out-of-range indexes are not selectable.
pub fn is_stay_selectable(stays: &[Stay], stay_index: usize, selections: &NightSelections) -> bool {
    stay_index < stays.len() && blocking_stay(stays, stay_index, selections).is_none()
}

/// Earliest stay before `stay_index` still without a campground.
fn blocking_stay(stays: &[Stay], stay_index: usize, selections: &NightSelections) -> Option<usize> {
    stays
        .iter()
        .take(stay_index)
        .position(|stay| selections.campground(stay.start_night).is_none())
}

/// Index of the first stay without a campground.
pub fn first_open_stay(stays: &[Stay]) -> Option<usize> {
    stays.iter().position(|stay| !stay.is_selected())
}

/// Write a campground into every night of a stay, or clear it with `None`.
///
/// Returns a new selection array; `selections` is left untouched.
///
/// # Errors
///
/// - [`SelectionError::StayNotFound`]: `stay_index` is out of range.
/// - [`SelectionError::Invariant`]: `selections` does not match the stays' night count.
/// - [`SelectionError::StaySequence`]: an earlier stay has no campground.
pub fn select_campground(
    stays: &[Stay],
    stay_index: usize,
    campground: Option<CampgroundKey>,
    accommodation_type: AccommodationType,
    selections: &NightSelections,
) -> Result<NightSelections, SelectionError> {
    let stay = stays
        .get(stay_index)
        .ok_or(SelectionError::StayNotFound(stay_index))?;

    let expected = stays.last().map_or(0, |last| last.end_night as usize);

    if selections.len() != expected {
        return Err(InvariantViolation::SelectionLength {
            expected,
            actual: selections.len(),
        }
        .into());
    }

    if let Some(blocking_stay) = blocking_stay(stays, stay_index, selections) {
        tracing::warn!(stay_index, blocking_stay, "stay selected out of order");

        return Err(SelectionError::StaySequence {
            stay_index,
            blocking_stay,
        });
    }

    let selection = match campground {
        Some(key) => NightSelection::booked(key, accommodation_type),
        None => NightSelection::empty(),
    };

    tracing::debug!(
        stay_index,
        location = %stay.location_name,
        start_night = stay.start_night,
        end_night = stay.end_night,
        cleared = campground.is_none(),
        "stay selection written"
    );

    Ok(selections.with_range(stay.start_night, stay.end_night, selection))
}
