mod catalog;
mod identity;
mod selection;
pub mod tally;

pub use catalog::{bundled_snapshot, new_hotel_id, City, Hotel, HotelFields, Trip, TripHeader};
pub use identity::VoterIdentity;
pub use selection::{occupancy_is_valid, Selection};
