pub mod db;
mod hotel_api;
mod models;
mod vote_api;

use std::convert::Infallible;

use log::{error, info};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::config;

pub async fn setup() {
    let list_hotels = warp::get()
        .and(warp::path!("hotels"))
        .map(hotel_api::list);
    let create_hotel = warp::post()
        .and(warp::path!("hotels"))
        .and(warp::body::json())
        .map(hotel_api::create);
    let update_hotel = warp::put()
        .and(warp::path!("hotels"))
        .and(warp::body::json())
        .map(hotel_api::update);
    let delete_hotel = warp::delete()
        .and(warp::path!("hotels"))
        .and(warp::query::<models::DeleteHotelQuery>())
        .map(hotel_api::delete);

    let get_votes = warp::get().and(warp::path!("votes")).map(vote_api::aggregate);
    let cast_vote = warp::post()
        .and(warp::path!("votes"))
        .and(warp::body::json())
        .map(vote_api::cast);
    let reset_votes = warp::post()
        .and(warp::path!("votes" / "reset"))
        .and(warp::body::json())
        .map(vote_api::reset);

    let routes = list_hotels
        .or(create_hotel)
        .or(update_hotel)
        .or(delete_hotel)
        .or(get_votes)
        .or(reset_votes)
        .or(cast_vote)
        .recover(handle_rejection)
        .with(warp::log("stayvote"));

    let port = config::port();
    info!("Serving on 0.0.0.0:{port}");
    warp::serve(routes).run(([0, 0, 0, 0], port)).await;
}

/// Warp's own rejections (bad JSON body, unknown route, wrong method) still
/// have to come back in the `{success, error}` envelope.
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, String::from("Route not found"))
    } else if let Some(body_err) = err.find::<warp::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, body_err.to_string())
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        (
            StatusCode::BAD_REQUEST,
            String::from("Missing required parameters"),
        )
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            String::from("Request body must be JSON"),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            String::from("Method not allowed"),
        )
    } else {
        error!("Unhandled rejection: {err:?}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            String::from("Internal server error"),
        )
    };
    Ok(models::error_response(code, message))
}
