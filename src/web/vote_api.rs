use log::info;
use warp::reply::Response;

use crate::trip::tally;
use super::db;
use super::models::{self, CastVoteRequest, ResetRequest, ResetView, SelectionView};

/// Aggregate view: city -> hotel -> {count, selections}, every catalog pair
/// present even at zero. Recomputed per request; clients poll this.
pub fn aggregate() -> Response {
    let result = db::connect().and_then(|mut conn| {
        let trip = db::list_trip(&mut conn)?;
        let selections = db::list_active_selections(&mut conn)?;
        Ok(tally::tally(&trip.cities, &selections))
    });
    match result {
        Ok(tallies) => models::ok(tallies),
        Err(err) => models::error_reply(err),
    }
}

/// Cast or change a choice. The same identity re-posting for a city
/// replaces the earlier row; two tabs racing still end up with one row.
pub fn cast(body: CastVoteRequest) -> Response {
    let result = body.into_parts().and_then(|vote| {
        let mut conn = db::connect()?;
        db::upsert_selection(
            &mut conn,
            &vote.city_id,
            &vote.hotel_id,
            &vote.voter,
            vote.occupancy,
            vote.notes.as_deref(),
        )
    });
    match result {
        Ok(selection) => models::ok(SelectionView::from(selection)),
        Err(err) => models::error_reply(err),
    }
}

pub fn reset(body: ResetRequest) -> Response {
    let result = body.into_identity().and_then(|voter| {
        let mut conn = db::connect()?;
        let deleted_count = db::clear_selections(&mut conn, &voter)?;
        info!("cleared {deleted_count} selections for {voter}");
        Ok(deleted_count)
    });
    match result {
        Ok(deleted_count) => models::ok(ResetView { deleted_count }),
        Err(err) => models::error_reply(err),
    }
}
