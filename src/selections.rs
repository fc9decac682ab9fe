//! Night Selections
//!
//! One slot per night of the trip, holding the campground booked for that night.

use crate::{
    campgrounds::{AccommodationType, CampgroundKey},
    itinerary::Itinerary,
};

/// Campground chosen for one night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NightSelection {
    /// Chosen campground, `None` when the night is still open
    pub campground: Option<CampgroundKey>,

    /// Accommodation type booked at the campground
    pub accommodation_type: AccommodationType,
}

impl NightSelection {
    /// An open night.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            campground: None,
            accommodation_type: AccommodationType::Tent,
        }
    }

    /// A night booked at a campground.
    #[must_use]
    pub const fn booked(campground: CampgroundKey, accommodation_type: AccommodationType) -> Self {
        Self {
            campground: Some(campground),
            accommodation_type,
        }
    }

    /// Whether a campground has been chosen.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.campground.is_some()
    }
}

impl Default for NightSelection {
    fn default() -> Self {
        Self::empty()
    }
}

/// Per-night selections for a trip, indexed by night number minus one.
///
/// Values are replaced, never mutated in place: every change produces a new
/// `NightSelections`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NightSelections {
    nights: Vec<NightSelection>,
}

impl NightSelections {
    /// All nights open.
    #[must_use]
    pub fn new(total_nights: u32) -> Self {
        Self {
            nights: vec![NightSelection::empty(); total_nights as usize],
        }
    }

    /// Build from explicit per-night values.
    pub fn from_nights(nights: impl Into<Vec<NightSelection>>) -> Self {
        Self {
            nights: nights.into(),
        }
    }

    /// Selection for a 1-based night.
    pub fn night(&self, night: u32) -> Option<&NightSelection> {
        let idx = usize::try_from(night).ok()?.checked_sub(1)?;

        self.nights.get(idx)
    }

    /// Campground chosen for a 1-based night.
    pub fn campground(&self, night: u32) -> Option<CampgroundKey> {
        self.night(night).and_then(|selection| selection.campground)
    }

    /// Per-night values in night order.
    pub fn as_slice(&self) -> &[NightSelection] {
        &self.nights
    }

    /// Iterate over per-night values in night order.
    pub fn iter(&self) -> impl Iterator<Item = &NightSelection> {
        self.nights.iter()
    }

    /// Number of nights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nights.len()
    }

    /// Whether there are no nights.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nights.is_empty()
    }

    /// Number of nights with a campground.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.nights.iter().filter(|night| night.is_selected()).count()
    }

    /// Whether every night has a campground.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.nights.is_empty() && self.nights.iter().all(NightSelection::is_selected)
    }

    /// Copy with the 1-based night range `first..=last` set to `selection`.
    ///
    /// Nights outside the array are ignored.
    #[must_use]
    pub(crate) fn with_range(&self, first: u32, last: u32, selection: NightSelection) -> Self {
        let mut nights = self.nights.clone();

        for night in first..=last {
            let slot = usize::try_from(night)
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| nights.get_mut(idx));

            if let Some(slot) = slot {
                *slot = selection;
            }
        }

        Self { nights }
    }

    /// Carry selections over from `previous` to `next`.
    ///
    /// The result always has `next.total_nights()` slots. Selections are kept up to
    /// the first night whose date or enclosing stop differs between the two
    /// itineraries; that night and every later one start open. Changing destination
    /// or start date therefore clears everything.
    #[must_use]
    pub fn resized_for(&self, previous: &Itinerary, next: &Itinerary) -> Self {
        let first_changed = first_changed_night(previous, next);
        let mut resized = Self::new(next.total_nights());

        let kept = first_changed.saturating_sub(1) as usize;

        for (slot, selection) in resized.nights.iter_mut().zip(&self.nights).take(kept) {
            *slot = *selection;
        }

        tracing::debug!(
            first_changed,
            kept,
            total = next.total_nights(),
            "night selections resized"
        );

        resized
    }
}

/// First 1-based night whose date or stop differs, or `next.total_nights() + 1`.
fn first_changed_night(previous: &Itinerary, next: &Itinerary) -> u32 {
    if previous.destination_id() != next.destination_id()
        || previous.trip_start_date() != next.trip_start_date()
    {
        return 1;
    }

    (1..=next.total_nights())
        .find(|&night| {
            let before = previous.stop_for_night(night);
            let after = next.stop_for_night(night);

            match (before, after) {
                (Some(before), Some(after)) => {
                    before.location_key != after.location_key
                        || before.first_night != after.first_night
                        || before.nights_at_location != after.nights_at_location
                }
                _ => true,
            }
        })
        .unwrap_or_else(|| next.total_nights().saturating_add(1))
}
