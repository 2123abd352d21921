use log::warn;
use warp::reply::Response;

use crate::trip;
use super::db;
use super::models::{self, CreateHotelRequest, DeleteHotelQuery, UpdateHotelRequest};

/// The one read path with an availability fallback: if the store cannot be
/// reached the bundled snapshot is served instead, read-only.
pub fn list() -> Response {
    let loaded = db::connect().and_then(|mut conn| db::list_trip(&mut conn));
    match loaded {
        Ok(trip) => models::ok(trip),
        Err(err) => {
            warn!("catalog read failed, serving bundled snapshot: {err}");
            models::ok(trip::bundled_snapshot())
        }
    }
}

pub fn create(body: CreateHotelRequest) -> Response {
    let result = body.into_parts().and_then(|(city_id, fields)| {
        let mut conn = db::connect()?;
        db::create_hotel(&mut conn, &city_id, fields)
    });
    match result {
        Ok(hotel) => models::ok(hotel),
        Err(err) => models::error_reply(err),
    }
}

pub fn update(body: UpdateHotelRequest) -> Response {
    let result = body.into_parts().and_then(|(city_id, hotel_id, fields)| {
        let mut conn = db::connect()?;
        db::update_hotel(&mut conn, &city_id, &hotel_id, fields)
    });
    match result {
        Ok(hotel) => models::ok(hotel),
        Err(err) => models::error_reply(err),
    }
}

pub fn delete(query: DeleteHotelQuery) -> Response {
    let result = query.into_parts().and_then(|(city_id, hotel_id)| {
        let mut conn = db::connect()?;
        db::delete_hotel(&mut conn, &city_id, &hotel_id)
    });
    match result {
        Ok(removed) => models::ok(removed),
        Err(err) => models::error_reply(err),
    }
}
