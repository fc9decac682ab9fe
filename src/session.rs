//! Planning Session
//!
//! Holds the current `(Itinerary, NightSelections)` pair as one snapshot that is
//! replaced wholesale on every change, so readers never pair a stale itinerary
//! with fresh selections.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    campgrounds::{AccommodationType, CampgroundKey},
    destinations::DestinationCatalog,
    gate::{SelectionError, first_open_stay, is_stay_selectable, select_campground},
    itinerary::{Itinerary, ItineraryError, TripRequest, build_itinerary},
    selections::NightSelections,
    stays::{InvariantViolation, Stay, compute_stays, next_stay_after, stays_or_empty},
};

/// Errors raised by a planning session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The requested trip cannot be planned.
    #[error(transparent)]
    Itinerary(#[from] ItineraryError),

    /// A stay could not be changed.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// The snapshot is internally inconsistent.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// A consistent view of the trip being planned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSnapshot {
    request: TripRequest,
    itinerary: Itinerary,
    selections: NightSelections,
}

impl TripSnapshot {
    /// Trip parameters
    pub fn request(&self) -> &TripRequest {
        &self.request
    }

    /// Itinerary built from the request
    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    /// Per-night selections
    pub fn selections(&self) -> &NightSelections {
        &self.selections
    }

    /// Stays derived from this snapshot.
    ///
    /// # Errors
    ///
    /// Returns an [`InvariantViolation`] if the selections do not fit the itinerary.
    pub fn stays(&self) -> Result<Vec<Stay>, InvariantViolation> {
        compute_stays(&self.itinerary, &self.selections)
    }
}

/// One user's trip-planning state.
#[derive(Debug, Clone)]
pub struct PlanningSession {
    current: Arc<TripSnapshot>,
}

impl PlanningSession {
    /// Start planning a trip with every night open.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError::Itinerary`] if the itinerary cannot be built.
    pub fn start(catalog: &DestinationCatalog, request: TripRequest) -> Result<Self, SessionError> {
        let itinerary = build_itinerary(catalog, &request)?;
        let selections = NightSelections::new(itinerary.total_nights());

        Ok(Self {
            current: Arc::new(TripSnapshot {
                request,
                itinerary,
                selections,
            }),
        })
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<TripSnapshot> {
        Arc::clone(&self.current)
    }

    /// Current itinerary.
    pub fn itinerary(&self) -> &Itinerary {
        &self.current.itinerary
    }

    /// Current selections.
    pub fn selections(&self) -> &NightSelections {
        &self.current.selections
    }

    /// Stays for the current snapshot; empty if it is inconsistent.
    pub fn stays(&self) -> Vec<Stay> {
        stays_or_empty(&self.current.itinerary, &self.current.selections)
    }

    /// Whether the stay can currently be picked.
    pub fn is_selectable(&self, stay_index: usize) -> bool {
        is_stay_selectable(&self.stays(), stay_index, &self.current.selections)
    }

    /// The stay the user should pick next, if any remain.
    pub fn next_open_stay(&self) -> Option<usize> {
        first_open_stay(&self.stays())
    }

    /// Whether every night has a campground.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current.selections.is_complete()
    }

    /// Book a campground for every night of a stay.
    ///
    /// Returns the index of the following stay, or `None` after the last one.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the stay is out of order or does not exist.
    pub fn pick(
        &mut self,
        stay_index: usize,
        campground: CampgroundKey,
        accommodation_type: AccommodationType,
    ) -> Result<Option<usize>, SessionError> {
        let stays = self.replace_selections(stay_index, Some(campground), accommodation_type)?;

        Ok(next_stay_after(&stays, stay_index))
    }

    /// Clear a stay's campground.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the stay is out of order or does not exist.
    pub fn clear(&mut self, stay_index: usize) -> Result<(), SessionError> {
        self.replace_selections(stay_index, None, AccommodationType::Tent)?;

        Ok(())
    }

    /// Change the trip parameters.
    ///
    /// The itinerary is rebuilt; selections are kept up to the first night that
    /// changed. On error the current snapshot is left as it was.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError::Itinerary`] if the new itinerary cannot be built.
    pub fn update_request(
        &mut self,
        catalog: &DestinationCatalog,
        request: TripRequest,
    ) -> Result<(), SessionError> {
        let itinerary = build_itinerary(catalog, &request)?;
        let selections = self
            .current
            .selections
            .resized_for(&self.current.itinerary, &itinerary);

        self.current = Arc::new(TripSnapshot {
            request,
            itinerary,
            selections,
        });

        Ok(())
    }

    fn replace_selections(
        &mut self,
        stay_index: usize,
        campground: Option<CampgroundKey>,
        accommodation_type: AccommodationType,
    ) -> Result<Vec<Stay>, SessionError> {
        let snapshot = self.snapshot();
        let stays = snapshot.stays()?;

        let selections = select_campground(
            &stays,
            stay_index,
            campground,
            accommodation_type,
            &snapshot.selections,
        )?;

        self.current = Arc::new(TripSnapshot {
            request: snapshot.request.clone(),
            itinerary: snapshot.itinerary.clone(),
            selections,
        });

        Ok(stays)
    }
}
