use std::sync::OnceLock;

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};

/// Trip-wide display settings shown above the catalog. Stored as a single
/// JSON row; the defaults here back both a missing and a malformed row.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripHeader {
    pub trip_title: String,
    pub cta_note: String,
    pub currency: String,
}

impl Default for TripHeader {
    fn default() -> TripHeader {
        TripHeader {
            trip_title: String::from("Rajasthan Trip — Dec 14–21, 2025"),
            cta_note: String::from(
                "Rate or rank stays per city. Copy the link to share your picks with the group, or export CSV.",
            ),
            currency: String::from("₹"),
        }
    }
}

/// A lodging option belonging to one city. Prices are per night, keyed by
/// occupancy; either may be absent while a hotel is still being researched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub price2: Option<i32>,
    pub price3: Option<i32>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub notes: Option<String>,
}

/// One leg of the trip, with its date-range label and hotel options.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub dates: String,
    pub hotels: Vec<Hotel>,
}

/// The full catalog as served by `GET /hotels` and as stored in the bundled
/// snapshot: header fields flattened next to the city list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trip {
    #[serde(flatten)]
    pub header: TripHeader,
    pub cities: Vec<City>,
}

/// Caller-supplied hotel fields for create and update. An update replaces
/// the whole record with these fields; absent optionals become NULL.
#[derive(Clone, Debug)]
pub struct HotelFields {
    pub name: String,
    pub price2: Option<i32>,
    pub price3: Option<i32>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub notes: Option<String>,
}

/// Generate a fresh hotel identifier: `hotel_<unix millis>_<9 random chars>`.
pub fn new_hotel_id() -> String {
    let suffix: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!(
        "hotel_{}_{}",
        Utc::now().timestamp_millis(),
        suffix.to_lowercase()
    )
}

static SNAPSHOT: &str = include_str!("../../data/trip_snapshot.json");

/// The compiled-in catalog snapshot. Read-only fallback for when the store
/// is unreachable, and the input for the seed tool.
pub fn bundled_snapshot() -> &'static Trip {
    static PARSED: OnceLock<Trip> = OnceLock::new();
    PARSED.get_or_init(|| serde_json::from_str(SNAPSHOT).expect("bundled trip snapshot is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotel_ids_carry_prefix_and_random_suffix() {
        let id = new_hotel_id();
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "hotel");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn hotel_ids_are_distinct() {
        assert_ne!(new_hotel_id(), new_hotel_id());
    }

    #[test]
    fn snapshot_parses_with_cities_and_hotels() {
        let trip = bundled_snapshot();
        assert!(!trip.cities.is_empty());
        assert!(trip.cities.iter().any(|c| c.id == "jaipur1"));
        assert!(trip.cities.iter().any(|c| !c.hotels.is_empty()));
    }

    #[test]
    fn header_defaults_match_served_shape() {
        let json = serde_json::to_value(TripHeader::default()).unwrap();
        assert!(json.get("tripTitle").is_some());
        assert!(json.get("ctaNote").is_some());
        assert_eq!(json["currency"], "₹");
    }
}
