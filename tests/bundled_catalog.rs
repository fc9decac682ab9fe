//! The bundled destination catalog and campground table.

use jiff::civil::date;
use testresult::TestResult;

use trailhead::prelude::*;

#[test]
fn every_destination_has_its_trip_lengths() -> TestResult {
    let fixture = Fixture::from_set("default")?;
    let catalog = fixture.catalog();

    assert_eq!(catalog.len(), 5);
    assert_eq!(
        catalog.supported_nights("northern-michigan"),
        (1..=9).collect::<Vec<_>>()
    );

    for id in ["arizona", "washington", "utah", "smoky-mountains"] {
        assert_eq!(catalog.supported_nights(id), vec![3, 5, 7], "{id}");
    }

    Ok(())
}

#[test]
fn every_template_builds_a_contiguous_itinerary() -> TestResult {
    let fixture = Fixture::from_set("default")?;
    let catalog = fixture.catalog();
    let start = date(2025, 6, 1);

    for destination in catalog.iter() {
        for nights in catalog.supported_nights(&destination.id) {
            let request = TripRequest::new(destination.id.clone(), nights, start, Party::default());
            let itinerary = build_itinerary(catalog, &request)?;
            let stops = itinerary.stops();

            let total: u32 = stops.iter().map(|stop| stop.nights_at_location).sum();

            assert_eq!(total, nights, "{} {nights}", destination.id);
            assert_eq!(
                stops.first().map(|stop| stop.start_date),
                Some(start),
                "{} {nights}",
                destination.id
            );

            for pair in stops.windows(2) {
                if let [previous, next] = pair {
                    assert_eq!(previous.end_date, next.start_date, "{} {nights}", destination.id);
                }
            }
        }
    }

    Ok(())
}

#[test]
fn every_stop_has_a_campground() -> TestResult {
    let fixture = Fixture::from_set("default")?;

    for destination in fixture.catalog().iter() {
        for key in destination.location_keys.values() {
            assert!(
                !fixture.campgrounds_at(key).is_empty(),
                "no campground near {key}"
            );
        }
    }

    Ok(())
}
