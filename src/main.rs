//! Trailhead CLI
//!
//! Builds an itinerary for a destination, books the stays given with `--pick` in
//! travel order, and prints either the options for the next open stay or the
//! finished trip summary.

use std::io;

use anyhow::{Result, bail};
use tracing::{debug, info};

use trailhead::{
    availability::{AvailabilityProvider, StaticAvailability, availability_requests},
    fixtures::Fixture,
    itinerary::{Party, TripRequest},
    session::PlanningSession,
    summary::TripSummary,
};

use crate::config::PlannerConfig;

mod config;
mod observability;

/// Trailhead CLI entry point
pub fn main() -> Result<()> {
    // Load configuration from .env and CLI arguments
    let config = PlannerConfig::load().unwrap_or_else(|e| e.exit());

    observability::init_subscriber(&config.logging)?;

    run(&config)
}

fn run(config: &PlannerConfig) -> Result<()> {
    let mut fixture = Fixture::with_base_path(&config.fixtures.path);

    fixture
        .load_destinations(&config.fixtures.set)?
        .load_campgrounds(&config.fixtures.set)?;

    if config.list {
        list_destinations(&fixture);

        return Ok(());
    }

    let Some(start_date) = config.start_date else {
        bail!("--start-date is required to plan a trip");
    };

    let request = TripRequest::new(
        config.destination.clone(),
        config.nights,
        start_date,
        Party::new(config.adults, config.kids),
    );

    info!(
        destination = %request.destination,
        nights = request.nights,
        start_date = %request.start_date,
        "planning trip"
    );

    let mut session = PlanningSession::start(fixture.catalog(), request)?;

    for (stay_index, pick) in config.picks.iter().enumerate() {
        let stays = session.stays();

        let Some(stay) = stays.get(stay_index) else {
            bail!("more picks than stays: the trip has {} stays", stays.len());
        };

        let campground = fixture.campground(&pick.campground)?;

        if !campground.serves(&stay.location_key) {
            bail!(
                "campground {} is not near {} (stay {})",
                pick.campground,
                stay.location_name,
                stay_index + 1
            );
        }

        let key = fixture.campground_key(&pick.campground)?;

        session.pick(stay_index, key, pick.accommodation_type)?;

        debug!(stay_index, campground = %pick.campground, "stay booked");
    }

    print_itinerary(&session);

    if session.is_complete() {
        let summary = TripSummary::build(
            session.itinerary(),
            session.selections(),
            fixture.campgrounds(),
        )?;

        let stdout = io::stdout();
        let mut handle = stdout.lock();

        summary.write_to(&mut handle)?;
    } else {
        print_next_options(&session, &fixture)?;
    }

    Ok(())
}

#[expect(clippy::print_stdout, reason = "CLI output to user")]
fn list_destinations(fixture: &Fixture<'_>) {
    let mut destinations: Vec<_> = fixture.catalog().iter().collect();
    destinations.sort_by(|a, b| a.id.cmp(&b.id));

    for destination in destinations {
        let nights: Vec<String> = destination.stops.keys().map(ToString::to_string).collect();

        println!(
            "{:<18} {:<26} nights: {}",
            destination.id,
            destination.name,
            if nights.is_empty() {
                "-".to_string()
            } else {
                nights.join(", ")
            }
        );
    }
}

#[expect(clippy::print_stdout, reason = "CLI output to user")]
fn print_itinerary(session: &PlanningSession) {
    let itinerary = session.itinerary();

    println!(
        "\n{} nights in {} for {} guests, {} to {}\n",
        itinerary.total_nights(),
        itinerary.destination_id(),
        itinerary.guest_count(),
        itinerary.trip_start_date(),
        itinerary.end_date()
    );

    for (index, stay) in session.stays().iter().enumerate() {
        let status = if stay.is_selected() {
            "booked"
        } else if session.is_selectable(index) {
            "open"
        } else {
            "locked"
        };

        println!(
            " {}. {:<16} {} - {}  ({} nights, {status})",
            index + 1,
            stay.location_name,
            stay.check_in.strftime("%b %-d"),
            stay.check_out.strftime("%b %-d"),
            stay.nights()
        );
    }
}

#[expect(clippy::print_stdout, reason = "CLI output to user")]
fn print_next_options(session: &PlanningSession, fixture: &Fixture<'_>) -> Result<()> {
    let Some(next) = session.next_open_stay() else {
        return Ok(());
    };

    let requests = availability_requests(session.itinerary());
    let stays = session.stays();

    let Some(stay) = stays.get(next) else {
        return Ok(());
    };

    // One stay per stop, so stay and request indices line up
    let Some(request) = requests.get(next) else {
        return Ok(());
    };

    let (check_in, check_out) = request.api_dates();

    println!(
        "\nOptions for stay {} at {} ({check_in} - {check_out}):",
        next + 1,
        stay.location_name
    );

    let provider = StaticAvailability::new(fixture.campgrounds());

    for answer in provider.availability(request)? {
        let Some(campground) = fixture.campgrounds().get(answer.campground) else {
            continue;
        };

        println!(
            "   --pick {}:{:<8} {:<32} {}/night",
            campground.id, answer.accommodation_type, campground.name, answer.nightly_price
        );
    }

    Ok(())
}
