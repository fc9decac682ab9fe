//! Availability
//!
//! Boundary to the availability and pricing service. The planner derives one
//! request per itinerary stop and treats the answers as opaque input.

use std::convert::Infallible;

use jiff::civil::Date;
use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;

use crate::{
    campgrounds::{AccommodationType, Campground, CampgroundKey},
    itinerary::Itinerary,
};

/// Availability query for one stop.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvailabilityRequest {
    /// Location key of the stop
    pub location_key: String,

    /// Check-in date
    pub start_date: Date,

    /// Check-out date
    pub end_date: Date,

    /// Number of adults
    pub adults: u8,

    /// Number of kids
    pub kids: u8,

    /// Nights at the stop
    pub nights: u32,
}

impl AvailabilityRequest {
    /// Check-in and check-out dates formatted `MM/DD/YY`.
    pub fn api_dates(&self) -> (String, String) {
        (
            self.start_date.strftime("%m/%d/%y").to_string(),
            self.end_date.strftime("%m/%d/%y").to_string(),
        )
    }
}

/// One campground's answer for one accommodation type.
#[derive(Debug, Clone, PartialEq)]
pub struct CampgroundAvailability<'a> {
    /// Campground the answer is for
    pub campground: CampgroundKey,

    /// Accommodation type the answer is for
    pub accommodation_type: AccommodationType,

    /// Whether the whole date range can be booked
    pub available: bool,

    /// Nightly price quoted
    pub nightly_price: Money<'a, Currency>,
}

/// A source of campground availability for a stop.
pub trait AvailabilityProvider<'a> {
    /// Error returned when availability cannot be fetched.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Availability of every campground serving the request's location.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot answer.
    fn availability(
        &self,
        request: &AvailabilityRequest,
    ) -> Result<Vec<CampgroundAvailability<'a>>, Self::Error>;
}

/// One request per stop, in itinerary order.
pub fn availability_requests(itinerary: &Itinerary) -> Vec<AvailabilityRequest> {
    let party = itinerary.party();

    itinerary
        .stops()
        .iter()
        .map(|stop| AvailabilityRequest {
            location_key: stop.location_key.clone(),
            start_date: stop.start_date,
            end_date: stop.end_date,
            adults: party.adults,
            kids: party.kids,
            nights: stop.nights_at_location,
        })
        .collect()
}

/// Serves every listed rate as available.
#[derive(Debug, Clone, Copy)]
pub struct StaticAvailability<'c, 'a> {
    campgrounds: &'c SlotMap<CampgroundKey, Campground<'a>>,
}

impl<'c, 'a> StaticAvailability<'c, 'a> {
    /// Answer from a campground table.
    #[must_use]
    pub fn new(campgrounds: &'c SlotMap<CampgroundKey, Campground<'a>>) -> Self {
        Self { campgrounds }
    }
}

impl<'a> AvailabilityProvider<'a> for StaticAvailability<'_, 'a> {
    type Error = Infallible;

    fn availability(
        &self,
        request: &AvailabilityRequest,
    ) -> Result<Vec<CampgroundAvailability<'a>>, Self::Error> {
        let mut answers: Vec<_> = self
            .campgrounds
            .iter()
            .filter(|(_, campground)| campground.serves(&request.location_key))
            .flat_map(|(key, campground)| {
                campground
                    .accommodation_types()
                    .into_iter()
                    .filter_map(move |kind| {
                        campground
                            .nightly_rate(kind)
                            .map(|nightly_price| CampgroundAvailability {
                                campground: key,
                                accommodation_type: kind,
                                available: true,
                                nightly_price,
                            })
                    })
            })
            .collect();

        answers.sort_by_key(|answer| {
            (
                self.campgrounds
                    .get(answer.campground)
                    .map(|campground| campground.id.clone()),
                answer.accommodation_type,
            )
        });

        Ok(answers)
    }
}
