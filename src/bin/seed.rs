//! Load the bundled trip snapshot into the database. Safe to re-run:
//! existing cities and hotels are overwritten, selections are untouched.

use log::{error, info};

use stayvote::trip;
use stayvote::web::db;

fn main() {
    log4rs::init_file("log4rs.yaml", Default::default())
        .expect("Failed to initialise logging");

    let snapshot = trip::bundled_snapshot();
    info!(
        "Seeding {} cities from the bundled snapshot",
        snapshot.cities.len()
    );

    let result = db::connect().and_then(|mut conn| db::seed_trip(&mut conn, snapshot));
    match result {
        Ok(()) => {
            let hotels: usize = snapshot.cities.iter().map(|c| c.hotels.len()).sum();
            info!("Seed complete: {} cities, {hotels} hotels", snapshot.cities.len());
        }
        Err(err) => {
            error!("Seed failed: {err}");
            std::process::exit(1);
        }
    }
}
