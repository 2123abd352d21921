use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::reply::{self, Reply, Response};

use crate::error::{self, ApiError};
use crate::trip;

/// Every response is `{success, data?, error?}`; errors ride a non-2xx
/// status with a human-readable string.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn ok<T: Serialize>(data: T) -> Response {
    reply::json(&Envelope {
        success: true,
        data: Some(data),
        error: None,
    })
    .into_response()
}

pub fn error_response(code: StatusCode, message: String) -> Response {
    let body = Envelope::<()> {
        success: false,
        data: None,
        error: Some(message),
    };
    reply::with_status(reply::json(&body), code).into_response()
}

pub fn error_reply(err: ApiError) -> Response {
    let code = err.status();
    if code == StatusCode::INTERNAL_SERVER_ERROR {
        log::error!("{err}");
    }
    error_response(code, err.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Default, Deserialize)]
pub struct HotelPayload {
    pub name: Option<String>,
    pub price2: Option<i32>,
    pub price3: Option<i32>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub notes: Option<String>,
}

impl HotelPayload {
    fn into_fields(self, name: String) -> trip::HotelFields {
        trip::HotelFields {
            name,
            price2: self.price2,
            price3: self.price3,
            image: non_empty(self.image),
            link: non_empty(self.link),
            notes: non_empty(self.notes),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotelRequest {
    pub city_id: Option<String>,
    pub hotel: Option<HotelPayload>,
}

impl CreateHotelRequest {
    pub fn into_parts(self) -> Result<(String, trip::HotelFields), ApiError> {
        let payload = self.hotel.unwrap_or_default();
        let city_id = non_empty(self.city_id);
        let name = non_empty(payload.name.clone());

        let mut missing = vec![];
        if city_id.is_none() {
            missing.push("cityId");
        }
        if name.is_none() {
            missing.push("hotel.name");
        }
        match (city_id, name) {
            (Some(city_id), Some(name)) => Ok((city_id, payload.into_fields(name))),
            _ => Err(error::missing_fields(&missing)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHotelRequest {
    pub city_id: Option<String>,
    pub hotel_id: Option<String>,
    pub updates: Option<HotelPayload>,
}

impl UpdateHotelRequest {
    pub fn into_parts(self) -> Result<(String, String, trip::HotelFields), ApiError> {
        let payload = self.updates.unwrap_or_default();
        let city_id = non_empty(self.city_id);
        let hotel_id = non_empty(self.hotel_id);
        let name = non_empty(payload.name.clone());

        let mut missing = vec![];
        if city_id.is_none() {
            missing.push("cityId");
        }
        if hotel_id.is_none() {
            missing.push("hotelId");
        }
        if name.is_none() {
            missing.push("updates.name");
        }
        match (city_id, hotel_id, name) {
            (Some(city_id), Some(hotel_id), Some(name)) => {
                Ok((city_id, hotel_id, payload.into_fields(name)))
            }
            _ => Err(error::missing_fields(&missing)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteHotelQuery {
    pub city_id: Option<String>,
    pub hotel_id: Option<String>,
}

impl DeleteHotelQuery {
    pub fn into_parts(self) -> Result<(String, String), ApiError> {
        let city_id = non_empty(self.city_id);
        let hotel_id = non_empty(self.hotel_id);

        let mut missing = vec![];
        if city_id.is_none() {
            missing.push("cityId");
        }
        if hotel_id.is_none() {
            missing.push("hotelId");
        }
        match (city_id, hotel_id) {
            (Some(city_id), Some(hotel_id)) => Ok((city_id, hotel_id)),
            _ => Err(error::missing_params(&missing)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    pub name: Option<String>,
    pub city_id: Option<String>,
    pub hotel_id: Option<String>,
    pub occupancy: Option<i32>,
    pub notes: Option<String>,
    pub device_id: Option<String>,
}

#[derive(Debug)]
pub struct CastVote {
    pub city_id: String,
    pub hotel_id: String,
    pub voter: trip::VoterIdentity,
    pub occupancy: i32,
    pub notes: Option<String>,
}

impl CastVoteRequest {
    pub fn into_parts(self) -> Result<CastVote, ApiError> {
        let name = non_empty(self.name);
        let city_id = non_empty(self.city_id);
        let hotel_id = non_empty(self.hotel_id);

        let mut missing = vec![];
        if name.is_none() {
            missing.push("name");
        }
        if city_id.is_none() {
            missing.push("cityId");
        }
        if hotel_id.is_none() {
            missing.push("hotelId");
        }
        if self.occupancy.is_none() {
            missing.push("occupancy");
        }
        let (name, city_id, hotel_id, occupancy) =
            match (name, city_id, hotel_id, self.occupancy) {
                (Some(name), Some(city_id), Some(hotel_id), Some(occupancy)) => {
                    (name, city_id, hotel_id, occupancy)
                }
                _ => return Err(error::missing_fields(&missing)),
            };
        if !trip::occupancy_is_valid(occupancy) {
            return Err(error::occupancy_invalid(occupancy));
        }

        Ok(CastVote {
            city_id,
            hotel_id,
            voter: trip::VoterIdentity::new(name, non_empty(self.device_id)),
            occupancy,
            notes: non_empty(self.notes),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    pub name: Option<String>,
    pub device_id: Option<String>,
}

impl ResetRequest {
    pub fn into_identity(self) -> Result<trip::VoterIdentity, ApiError> {
        match non_empty(self.name) {
            Some(name) => Ok(trip::VoterIdentity::new(name, non_empty(self.device_id))),
            None => Err(error::name_required()),
        }
    }
}

/// The public fields of a stored selection; the device token stays private.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionView {
    pub name: String,
    pub city_id: String,
    pub hotel_id: String,
    pub occupancy: i32,
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<trip::Selection> for SelectionView {
    fn from(selection: trip::Selection) -> SelectionView {
        SelectionView {
            name: selection.voter.name,
            city_id: selection.city_id,
            hotel_id: selection.hotel_id,
            occupancy: selection.occupancy,
            notes: selection.notes,
            timestamp: selection.updated_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetView {
    pub deleted_count: usize,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn success_envelope_omits_error() {
        let body = Envelope {
            success: true,
            data: Some(json!({"n": 1})),
            error: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, json!({"success": true, "data": {"n": 1}}));
    }

    #[test]
    fn error_envelope_omits_data() {
        let body = Envelope::<()> {
            success: false,
            data: None,
            error: Some(String::from("City not found: x")),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({"success": false, "error": "City not found: x"})
        );
    }

    #[test]
    fn create_request_reports_every_missing_field() {
        let request = CreateHotelRequest {
            city_id: None,
            hotel: Some(HotelPayload::default()),
        };
        let err = request.into_parts().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: cityId, hotel.name"
        );
    }

    #[test]
    fn create_request_treats_blank_name_as_missing() {
        let request = CreateHotelRequest {
            city_id: Some(String::from("jaipur1")),
            hotel: Some(HotelPayload {
                name: Some(String::from("   ")),
                ..HotelPayload::default()
            }),
        };
        assert!(request.into_parts().is_err());
    }

    #[test]
    fn vote_request_rejects_out_of_range_occupancy() {
        let request = CastVoteRequest {
            name: Some(String::from("Alice")),
            city_id: Some(String::from("jaipur1")),
            hotel_id: Some(String::from("h1")),
            occupancy: Some(4),
            notes: None,
            device_id: None,
        };
        let err = request.into_parts().unwrap_err();
        assert_eq!(err.to_string(), "occupancy must be 2 or 3, got 4");
    }

    #[test]
    fn vote_request_normalizes_missing_device_token() {
        let request = CastVoteRequest {
            name: Some(String::from("Alice")),
            city_id: Some(String::from("jaipur1")),
            hotel_id: Some(String::from("h1")),
            occupancy: Some(2),
            notes: Some(String::from("")),
            device_id: None,
        };
        let vote = request.into_parts().unwrap();
        assert_eq!(vote.voter.device, "");
        assert_eq!(vote.notes, None);
    }

    #[test]
    fn reset_request_requires_a_name() {
        let request = ResetRequest {
            name: None,
            device_id: Some(String::from("dev1")),
        };
        let err = request.into_identity().unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn selection_view_serializes_public_camel_case_fields() {
        let view = SelectionView::from(trip::Selection {
            city_id: String::from("jaipur1"),
            hotel_id: String::from("h1"),
            voter: trip::VoterIdentity::new("Alice", Some(String::from("dev1"))),
            occupancy: 2,
            notes: None,
            updated_at: Utc.with_ymd_and_hms(2025, 12, 1, 9, 30, 0).unwrap(),
        });
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["cityId"], "jaipur1");
        assert_eq!(value["hotelId"], "h1");
        assert_eq!(value["timestamp"], "2025-12-01T09:30:00Z");
        assert!(value.get("deviceId").is_none());
        assert_eq!(value["notes"], serde_json::Value::Null);
    }
}
