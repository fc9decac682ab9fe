//! Itinerary
//!
//! Expands a destination's stop template into dated, contiguous stops.

use jiff::{Span, civil::Date};
use smallvec::SmallVec;
use thiserror::Error;

use crate::destinations::DestinationCatalog;

/// Errors that can occur while building an itinerary.
#[derive(Debug, Error)]
pub enum ItineraryError {
    /// No stop template exists for the requested destination and night count.
    #[error("no itinerary is available for {destination} over {nights} nights")]
    UnsupportedItinerary {
        /// Requested destination identifier
        destination: String,

        /// Requested night count
        nights: u32,
    },

    /// A trip must be at least one night long.
    #[error("a trip must last at least one night")]
    ZeroNights,

    /// A party must include at least one adult.
    #[error("a party must include at least one adult")]
    NoAdults,

    /// Stop dates fall outside the supported calendar range.
    #[error("stop dates are out of range: {0}")]
    DateOutOfRange(#[from] jiff::Error),
}

/// Who is travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Party {
    /// Number of adults
    pub adults: u8,

    /// Number of kids
    pub kids: u8,
}

impl Party {
    /// Create a party.
    #[must_use]
    pub const fn new(adults: u8, kids: u8) -> Self {
        Self { adults, kids }
    }

    /// Total number of guests.
    #[must_use]
    pub fn guest_count(&self) -> u16 {
        u16::from(self.adults) + u16::from(self.kids)
    }
}

impl Default for Party {
    fn default() -> Self {
        Self::new(2, 0)
    }
}

/// Trip parameters chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    /// Destination identifier
    pub destination: String,

    /// Total nights
    pub nights: u32,

    /// First night's date
    pub start_date: Date,

    /// Party size
    pub party: Party,
}

impl TripRequest {
    /// Create a trip request.
    pub fn new(destination: impl Into<String>, nights: u32, start_date: Date, party: Party) -> Self {
        Self {
            destination: destination.into(),
            nights,
            start_date,
            party,
        }
    }
}

/// A location within an itinerary and its date range.
///
/// `end_date` is the check-out date, which is also the next stop's `start_date`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stop {
    /// Display name of the location
    pub location_name: String,

    /// Lookup key of the location
    pub location_key: String,

    /// Check-in date
    pub start_date: Date,

    /// Check-out date
    pub end_date: Date,

    /// Nights spent at the location
    pub nights_at_location: u32,

    /// First night of the trip spent here (1-based)
    pub first_night: u32,
}

impl Stop {
    /// Last night of the trip spent here (1-based, inclusive).
    #[must_use]
    pub fn last_night(&self) -> u32 {
        self.first_night + self.nights_at_location - 1
    }

    /// Whether the 1-based trip night falls within this stop.
    #[must_use]
    pub fn contains_night(&self, night: u32) -> bool {
        (self.first_night..=self.last_night()).contains(&night)
    }
}

/// Dated, ordered stops for one trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    destination_id: String,
    total_nights: u32,
    trip_start_date: Date,
    party: Party,
    stops: SmallVec<[Stop; 4]>,
}

impl Itinerary {
    /// Destination identifier
    pub fn destination_id(&self) -> &str {
        &self.destination_id
    }

    /// Total nights
    #[must_use]
    pub fn total_nights(&self) -> u32 {
        self.total_nights
    }

    /// First night's date
    #[must_use]
    pub fn trip_start_date(&self) -> Date {
        self.trip_start_date
    }

    /// Check-out date of the final stop.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.stops
            .last()
            .map_or(self.trip_start_date, |stop| stop.end_date)
    }

    /// Party size
    #[must_use]
    pub fn party(&self) -> Party {
        self.party
    }

    /// Total number of guests.
    #[must_use]
    pub fn guest_count(&self) -> u16 {
        self.party.guest_count()
    }

    /// Ordered stops
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// The stop covering a 1-based night.
    pub fn stop_for_night(&self, night: u32) -> Option<&Stop> {
        self.stops.iter().find(|stop| stop.contains_night(night))
    }

    /// Calendar date of a 1-based night.
    pub fn night_date(&self, night: u32) -> Option<Date> {
        if night == 0 || night > self.total_nights {
            return None;
        }

        let offset = Span::new().try_days(i64::from(night - 1)).ok()?;

        self.trip_start_date.checked_add(offset).ok()
    }
}

/// Build an itinerary from the catalog's stop template for the request.
///
/// # Errors
///
/// - [`ItineraryError::ZeroNights`]: the request has no nights.
/// - [`ItineraryError::NoAdults`]: the party has no adults.
/// - [`ItineraryError::UnsupportedItinerary`]: no template for the destination and nights.
/// - [`ItineraryError::DateOutOfRange`]: a stop date cannot be represented.
pub fn build_itinerary(
    catalog: &DestinationCatalog,
    request: &TripRequest,
) -> Result<Itinerary, ItineraryError> {
    if request.nights == 0 {
        return Err(ItineraryError::ZeroNights);
    }

    if request.party.adults == 0 {
        return Err(ItineraryError::NoAdults);
    }

    let unsupported = || ItineraryError::UnsupportedItinerary {
        destination: request.destination.clone(),
        nights: request.nights,
    };

    let destination = catalog.get(&request.destination).ok_or_else(unsupported)?;
    let template = destination
        .template(request.nights)
        .ok_or_else(unsupported)?;

    let mut stops = SmallVec::with_capacity(template.len());
    let mut current = request.start_date;
    let mut first_night = 1u32;

    for template_stop in template {
        // Keys are checked when the catalog is built.
        let location_key = destination
            .location_key(&template_stop.location_name)
            .ok_or_else(unsupported)?;

        let stay = Span::new().try_days(i64::from(template_stop.nights_at_location))?;
        let end_date = current.checked_add(stay)?;

        stops.push(Stop {
            location_name: template_stop.location_name.clone(),
            location_key: location_key.to_string(),
            start_date: current,
            end_date,
            nights_at_location: template_stop.nights_at_location,
            first_night,
        });

        current = end_date;
        first_night += template_stop.nights_at_location;
    }

    tracing::debug!(
        destination = %request.destination,
        nights = request.nights,
        start = %request.start_date,
        stops = stops.len(),
        "itinerary built"
    );

    Ok(Itinerary {
        destination_id: request.destination.clone(),
        total_nights: request.nights,
        trip_start_date: request.start_date,
        party: request.party,
        stops,
    })
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::destinations::{Destination, TemplateStop};

    use super::*;

    fn catalog() -> Result<DestinationCatalog, crate::destinations::CatalogError> {
        DestinationCatalog::new([
            Destination::new("northern-michigan", "Northern Michigan")
                .with_location("Traverse City", "traverse-city")
                .with_location("Mackinac", "mackinac-city")
                .with_location("Pictured Rocks", "pictured-rocks")
                .with_template(1, [TemplateStop::new("Traverse City", 1)])
                .with_template(
                    5,
                    [
                        TemplateStop::new("Traverse City", 2),
                        TemplateStop::new("Mackinac", 1),
                        TemplateStop::new("Pictured Rocks", 2),
                    ],
                ),
            Destination::new("arizona", "Arizona Adventure"),
        ])
    }

    fn request(destination: &str, nights: u32) -> TripRequest {
        TripRequest::new(destination, nights, date(2025, 6, 1), Party::default())
    }

    #[test]
    fn builds_dated_contiguous_stops() -> TestResult {
        let itinerary = build_itinerary(&catalog()?, &request("northern-michigan", 5))?;

        let stops = itinerary.stops();
        let ranges: Vec<_> = stops
            .iter()
            .map(|stop| (stop.location_name.as_str(), stop.start_date, stop.end_date))
            .collect();

        assert_eq!(
            ranges,
            vec![
                ("Traverse City", date(2025, 6, 1), date(2025, 6, 3)),
                ("Mackinac", date(2025, 6, 3), date(2025, 6, 4)),
                ("Pictured Rocks", date(2025, 6, 4), date(2025, 6, 6)),
            ]
        );

        assert_eq!(itinerary.end_date(), date(2025, 6, 6));
        assert_eq!(itinerary.total_nights(), 5);
        assert_eq!(itinerary.guest_count(), 2);

        Ok(())
    }

    #[test]
    fn stop_nights_cover_the_trip() -> TestResult {
        let itinerary = build_itinerary(&catalog()?, &request("northern-michigan", 5))?;

        let total: u32 = itinerary
            .stops()
            .iter()
            .map(|stop| stop.nights_at_location)
            .sum();

        assert_eq!(total, itinerary.total_nights());
        assert_eq!(
            itinerary.stops().first().map(|stop| stop.start_date),
            Some(itinerary.trip_start_date())
        );

        for pair in itinerary.stops().windows(2) {
            if let [current, next] = pair {
                assert_eq!(current.end_date, next.start_date);
                assert_eq!(current.last_night() + 1, next.first_night);
            }
        }

        Ok(())
    }

    #[test]
    fn stops_carry_location_keys_and_night_ranges() -> TestResult {
        let itinerary = build_itinerary(&catalog()?, &request("northern-michigan", 5))?;

        let mackinac = itinerary.stop_for_night(3);

        assert_eq!(mackinac.map(|stop| stop.location_key.as_str()), Some("mackinac-city"));
        assert_eq!(mackinac.map(Stop::last_night), Some(3));
        assert!(itinerary.stop_for_night(6).is_none());
        assert!(itinerary.stop_for_night(0).is_none());

        Ok(())
    }

    #[test]
    fn night_dates_are_offsets_from_the_start() -> TestResult {
        let itinerary = build_itinerary(&catalog()?, &request("northern-michigan", 5))?;

        assert_eq!(itinerary.night_date(1), Some(date(2025, 6, 1)));
        assert_eq!(itinerary.night_date(5), Some(date(2025, 6, 5)));
        assert_eq!(itinerary.night_date(0), None);
        assert_eq!(itinerary.night_date(6), None);

        Ok(())
    }

    #[test]
    fn unknown_night_count_is_unsupported() -> TestResult {
        let result = build_itinerary(&catalog()?, &request("northern-michigan", 4));

        assert!(matches!(
            result,
            Err(ItineraryError::UnsupportedItinerary { nights: 4, .. })
        ));

        Ok(())
    }

    #[test]
    fn destination_without_templates_is_unsupported() -> TestResult {
        let catalog = catalog()?;

        assert!(matches!(
            build_itinerary(&catalog, &request("arizona", 3)),
            Err(ItineraryError::UnsupportedItinerary { .. })
        ));
        assert!(matches!(
            build_itinerary(&catalog, &request("atlantis", 3)),
            Err(ItineraryError::UnsupportedItinerary { destination, .. }) if destination == "atlantis"
        ));

        Ok(())
    }

    #[test]
    fn zero_nights_and_empty_party_are_rejected() -> TestResult {
        let catalog = catalog()?;

        assert!(matches!(
            build_itinerary(&catalog, &request("northern-michigan", 0)),
            Err(ItineraryError::ZeroNights)
        ));

        let kids_only = TripRequest::new("northern-michigan", 1, date(2025, 6, 1), Party::new(0, 2));

        assert!(matches!(
            build_itinerary(&catalog, &kids_only),
            Err(ItineraryError::NoAdults)
        ));

        Ok(())
    }

    #[test]
    fn dates_past_the_calendar_range_are_rejected() -> TestResult {
        let late = TripRequest::new("northern-michigan", 5, date(9999, 12, 30), Party::default());

        assert!(matches!(
            build_itinerary(&catalog()?, &late),
            Err(ItineraryError::DateOutOfRange(_))
        ));

        Ok(())
    }
}
