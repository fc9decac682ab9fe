//! Trip Summary
//!
//! Per-stay costs and the trip total for a fully booked itinerary.

use std::io;

use jiff::civil::Date;
use rusty_money::{Money, MoneyError, iso::Currency};
use slotmap::SlotMap;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    campgrounds::{AccommodationType, Campground, CampgroundKey},
    itinerary::Itinerary,
    selections::NightSelections,
    stays::{InvariantViolation, compute_stays},
};

/// Errors that can occur when building or writing a trip summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// A stay has no campground yet.
    #[error("stay {stay_index} has no campground")]
    Incomplete {
        /// Index of the open stay
        stay_index: usize,
    },

    /// A selected campground is not in the campground table.
    #[error("Missing campground")]
    MissingCampground(CampgroundKey),

    /// A selected campground does not serve the stay's location.
    #[error("campground {campground} does not serve {location}")]
    WrongLocation {
        /// Campground identifier
        campground: String,

        /// Location key of the stay
        location: String,
    },

    /// A selected campground does not offer the booked accommodation type.
    #[error("campground {campground} has no {accommodation_type} rate")]
    RateUnavailable {
        /// Campground identifier
        campground: String,

        /// Accommodation type booked
        accommodation_type: AccommodationType,
    },

    /// Stay cost does not fit in minor units.
    #[error("stay {stay_index} cost overflows")]
    CostOverflow {
        /// Index of the stay
        stay_index: usize,
    },

    /// Stays and selections are out of step.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One booked stay and its cost.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine<'a> {
    /// Location name
    pub location_name: String,

    /// First night (1-based)
    pub start_night: u32,

    /// Last night (1-based, inclusive)
    pub end_night: u32,

    /// Check-in date
    pub check_in: Date,

    /// Check-out date
    pub check_out: Date,

    /// Campground name
    pub campground_name: String,

    /// Accommodation type booked
    pub accommodation_type: AccommodationType,

    /// Nightly rate
    pub nightly_rate: Money<'a, Currency>,

    /// Nightly rate times nights
    pub subtotal: Money<'a, Currency>,
}

impl SummaryLine<'_> {
    /// Number of nights.
    #[must_use]
    pub fn nights(&self) -> u32 {
        self.end_night - self.start_night + 1
    }

    fn nights_label(&self) -> String {
        if self.start_night == self.end_night {
            format!("Night {}", self.start_night)
        } else {
            format!("Nights {}-{}", self.start_night, self.end_night)
        }
    }
}

/// Cost breakdown of a booked trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSummary<'a> {
    destination_id: String,
    lines: Vec<SummaryLine<'a>>,
    total: Money<'a, Currency>,
}

impl<'a> TripSummary<'a> {
    /// Build the summary from stays, so each stop is costed separately.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if a stay is open, a campground is unknown, does not
    /// serve its stay or lacks the booked rate, or money arithmetic fails.
    pub fn build(
        itinerary: &Itinerary,
        selections: &NightSelections,
        campgrounds: &SlotMap<CampgroundKey, Campground<'a>>,
    ) -> Result<Self, SummaryError> {
        let stays = compute_stays(itinerary, selections)?;
        let mut lines = Vec::with_capacity(stays.len());

        for (stay_index, stay) in stays.iter().enumerate() {
            let (Some(key), Some(accommodation_type)) = (stay.campground, stay.accommodation_type)
            else {
                return Err(SummaryError::Incomplete { stay_index });
            };

            let campground = campgrounds
                .get(key)
                .ok_or(SummaryError::MissingCampground(key))?;

            if !campground.serves(&stay.location_key) {
                return Err(SummaryError::WrongLocation {
                    campground: campground.id.clone(),
                    location: stay.location_key.clone(),
                });
            }

            let nightly_rate = campground.nightly_rate(accommodation_type).ok_or_else(|| {
                SummaryError::RateUnavailable {
                    campground: campground.id.clone(),
                    accommodation_type,
                }
            })?;

            let subtotal_minor = nightly_rate
                .to_minor_units()
                .checked_mul(i64::from(stay.nights()))
                .ok_or(SummaryError::CostOverflow { stay_index })?;

            lines.push(SummaryLine {
                location_name: stay.location_name.clone(),
                start_night: stay.start_night,
                end_night: stay.end_night,
                check_in: stay.check_in,
                check_out: stay.check_out,
                campground_name: campground.name.clone(),
                accommodation_type,
                nightly_rate,
                subtotal: Money::from_minor(subtotal_minor, nightly_rate.currency()),
            });
        }

        let first = lines.first().ok_or(SummaryError::Incomplete { stay_index: 0 })?;

        let total = lines.iter().try_fold(
            Money::from_minor(0, first.subtotal.currency()),
            |acc, line| acc.add(line.subtotal),
        )?;

        Ok(Self {
            destination_id: itinerary.destination_id().to_string(),
            lines,
            total,
        })
    }

    /// Destination identifier
    pub fn destination_id(&self) -> &str {
        &self.destination_id
    }

    /// Per-stay lines in trip order
    pub fn lines(&self) -> &[SummaryLine<'a>] {
        &self.lines
    }

    /// Cost of the whole trip
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Writes the summary as a table followed by the total.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::IO`] if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record([
            "Nights",
            "Location",
            "Dates",
            "Campground",
            "Type",
            "Nightly",
            "Subtotal",
        ]);

        for line in &self.lines {
            builder.push_record([
                line.nights_label(),
                line.location_name.clone(),
                format!(
                    "{} - {}",
                    line.check_in.strftime("%b %-d"),
                    line.check_out.strftime("%b %-d")
                ),
                line.campground_name.clone(),
                line.accommodation_type.to_string(),
                format!("{}", line.nightly_rate),
                format!("{}", line.subtotal),
            ]);
        }

        let mut table = builder.build();

        table.with(Theme::from(Style::modern_rounded()));
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(5..7), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)?;
        writeln!(out, " \x1b[1mTotal:\x1b[0m {}\n", self.total).map_err(|_err| SummaryError::IO)
    }
}
