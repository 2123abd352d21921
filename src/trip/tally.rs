use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::catalog::City;
use super::selection::Selection;

/// Per-hotel slice of the aggregate: how many voters currently pick this
/// hotel, and who they are.
#[derive(Clone, Debug, Default, Serialize)]
pub struct HotelTally {
    pub count: usize,
    pub selections: Vec<TallyEntry>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TallyEntry {
    pub name: String,
    pub occupancy: i32,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
}

/// city id -> hotel id -> tally, covering every catalog pair.
pub type TripTally = BTreeMap<String, BTreeMap<String, HotelTally>>;

/// Derive the aggregate view from a catalog snapshot and the active
/// selections. Every (city, hotel) pair in the catalog appears, zero-filled
/// when nobody picked it. Per-hotel voter lists keep the input order, so
/// callers pass selections most recent first. Selections pointing at ids
/// missing from the catalog are skipped.
pub fn tally(cities: &[City], selections: &[Selection]) -> TripTally {
    let mut tallies: TripTally = BTreeMap::new();
    for city in cities {
        let hotels = tallies.entry(city.id.clone()).or_default();
        for hotel in &city.hotels {
            hotels.insert(hotel.id.clone(), HotelTally::default());
        }
    }

    for selection in selections {
        let slot = tallies
            .get_mut(&selection.city_id)
            .and_then(|hotels| hotels.get_mut(&selection.hotel_id));
        if let Some(slot) = slot {
            slot.count += 1;
            slot.selections.push(TallyEntry {
                name: selection.voter.name.clone(),
                occupancy: selection.occupancy,
                timestamp: selection.updated_at,
                notes: selection.notes.clone(),
            });
        }
    }

    tallies
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::trip::{Hotel, VoterIdentity};

    fn city(id: &str, hotel_ids: &[&str]) -> City {
        City {
            id: id.to_string(),
            name: id.to_string(),
            dates: String::from("Dec 15–Dec 16"),
            hotels: hotel_ids
                .iter()
                .map(|hotel_id| Hotel {
                    id: hotel_id.to_string(),
                    name: hotel_id.to_string(),
                    price2: Some(4000),
                    price3: None,
                    image: None,
                    link: None,
                    notes: None,
                })
                .collect(),
        }
    }

    fn selection(city: &str, hotel: &str, name: &str, device: &str, at: i64) -> Selection {
        Selection {
            city_id: city.to_string(),
            hotel_id: hotel.to_string(),
            voter: VoterIdentity::new(name, Some(device.to_string())),
            occupancy: 2,
            notes: None,
            updated_at: Utc.timestamp_opt(at, 0).unwrap(),
        }
    }

    #[test]
    fn unselected_hotels_appear_zero_filled() {
        let cities = [city("jaipur1", &["h1", "h2"]), city("jodhpur1", &["h3"])];
        let tallies = tally(&cities, &[]);

        assert_eq!(tallies.len(), 2);
        for hotels in tallies.values() {
            for slot in hotels.values() {
                assert_eq!(slot.count, 0);
                assert!(slot.selections.is_empty());
            }
        }
        assert!(tallies["jaipur1"].contains_key("h2"));
    }

    #[test]
    fn distinct_identities_on_one_hotel_each_count_once() {
        let cities = [city("jaipur1", &["h1", "h2"])];
        let selections = [
            selection("jaipur1", "h1", "Alice", "dev1", 30),
            selection("jaipur1", "h1", "Bob", "dev2", 20),
            selection("jaipur1", "h1", "Alice", "dev3", 10),
        ];
        let tallies = tally(&cities, &selections);

        assert_eq!(tallies["jaipur1"]["h1"].count, 3);
        assert_eq!(tallies["jaipur1"]["h2"].count, 0);
    }

    #[test]
    fn a_replaced_choice_moves_the_count_instead_of_doubling_it() {
        // After Alice re-picks h2 the store holds a single row pointing at
        // h2, so the aggregate flips rather than counting both hotels.
        let cities = [city("jaipur1", &["h1", "h2"])];
        let after_switch = [selection("jaipur1", "h2", "Alice", "dev1", 40)];
        let tallies = tally(&cities, &after_switch);

        assert_eq!(tallies["jaipur1"]["h1"].count, 0);
        assert_eq!(tallies["jaipur1"]["h2"].count, 1);
        assert_eq!(tallies["jaipur1"]["h2"].selections[0].name, "Alice");
    }

    #[test]
    fn voter_lists_keep_most_recent_first_input_order() {
        let cities = [city("jaipur1", &["h1"])];
        let selections = [
            selection("jaipur1", "h1", "Carol", "dev3", 300),
            selection("jaipur1", "h1", "Bob", "dev2", 200),
            selection("jaipur1", "h1", "Alice", "dev1", 100),
        ];
        let tallies = tally(&cities, &selections);

        let names: Vec<&str> = tallies["jaipur1"]["h1"]
            .selections
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, ["Carol", "Bob", "Alice"]);
    }

    #[test]
    fn selections_outside_the_catalog_are_skipped() {
        let cities = [city("jaipur1", &["h1"])];
        let selections = [
            selection("jaipur1", "gone-hotel", "Alice", "dev1", 10),
            selection("gone-city", "h1", "Bob", "dev2", 20),
        ];
        let tallies = tally(&cities, &selections);

        assert_eq!(tallies.len(), 1);
        assert_eq!(tallies["jaipur1"]["h1"].count, 0);
    }
}
