use diesel::result::{ConnectionError, Error as DbError};
use thiserror::Error;
use warp::http::StatusCode;

/// Everything a request handler can fail with. Every variant maps to one
/// HTTP status; no failure is fatal to the process.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("DATABASE_URL is not set")]
    Unconfigured,
    #[error("store unreachable: {0}")]
    Unavailable(#[from] ConnectionError),
    #[error("store operation failed: {0}")]
    Store(#[from] DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unconfigured | ApiError::Unavailable(_) | ApiError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub fn missing_fields(fields: &[&str]) -> ApiError {
    ApiError::Validation(format!("Missing required fields: {}", fields.join(", ")))
}

pub fn missing_params(params: &[&str]) -> ApiError {
    ApiError::Validation(format!("Missing required parameters: {}", params.join(", ")))
}

pub fn name_required() -> ApiError {
    ApiError::Validation(String::from("Name is required"))
}

pub fn occupancy_invalid(value: i32) -> ApiError {
    ApiError::Validation(format!("occupancy must be 2 or 3, got {value}"))
}

pub fn city_not_found(city_id: &str) -> ApiError {
    ApiError::NotFound(format!("City not found: {city_id}"))
}

pub fn hotel_not_found(city_id: &str, hotel_id: &str) -> ApiError {
    ApiError::NotFound(format!("Hotel not found: {hotel_id} in city {city_id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_map_to_their_statuses() {
        assert_eq!(missing_fields(&["name"]).status(), StatusCode::BAD_REQUEST);
        assert_eq!(occupancy_invalid(5).status(), StatusCode::BAD_REQUEST);
        assert_eq!(city_not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Store(DbError::NotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Unconfigured.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_name_the_missing_fields() {
        let err = missing_fields(&["cityId", "hotel.name"]);
        assert_eq!(
            err.to_string(),
            "Missing required fields: cityId, hotel.name"
        );
    }
}
