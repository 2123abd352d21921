use chrono::{DateTime, Utc};

use super::identity::VoterIdentity;

/// A voter identity's current hotel choice for one city. The store holds at
/// most one of these per (city, identity); a later choice for the same city
/// overwrites this one in place rather than adding a second.
#[derive(Clone, Debug)]
pub struct Selection {
    pub city_id: String,
    pub hotel_id: String,
    pub voter: VoterIdentity,
    pub occupancy: i32,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Rooms are priced for two or three people; nothing else is bookable.
pub fn occupancy_is_valid(value: i32) -> bool {
    matches!(value, 2 | 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_two_or_three_occupants_are_valid() {
        assert!(occupancy_is_valid(2));
        assert!(occupancy_is_valid(3));
        for bad in [0, 1, 4, -2] {
            assert!(!occupancy_is_valid(bad));
        }
    }
}
