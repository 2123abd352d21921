use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde_json::Value as Json;

use crate::trip;
use super::schema;

#[derive(Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::cities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct City {
    pub id: String,
    pub name: String,
    pub dates: String,
}

#[derive(Associations, Identifiable, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::hotels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(belongs_to(City))]
pub struct Hotel {
    pub id: String,
    pub city_id: String,
    pub name: String,
    pub price2: Option<i32>,
    pub price3: Option<i32>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub notes: Option<String>,
}

impl Hotel {
    pub fn from_fields(id: String, city_id: String, fields: trip::HotelFields) -> Hotel {
        Hotel {
            id,
            city_id,
            name: fields.name,
            price2: fields.price2,
            price3: fields.price3,
            image: fields.image,
            link: fields.link,
            notes: fields.notes,
        }
    }
}

impl From<Hotel> for trip::Hotel {
    fn from(row: Hotel) -> trip::Hotel {
        trip::Hotel {
            id: row.id,
            name: row.name,
            price2: row.price2,
            price3: row.price3,
            image: row.image,
            link: row.link,
            notes: row.notes,
        }
    }
}

/// Whole-record replace of the caller-editable hotel columns; fields left
/// out of the update request become NULL rather than surviving unchanged.
#[derive(AsChangeset)]
#[diesel(table_name = schema::hotels)]
#[diesel(treat_none_as_null = true)]
pub struct HotelChangeset {
    pub name: String,
    pub price2: Option<i32>,
    pub price3: Option<i32>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub notes: Option<String>,
}

impl From<trip::HotelFields> for HotelChangeset {
    fn from(fields: trip::HotelFields) -> HotelChangeset {
        HotelChangeset {
            name: fields.name,
            price2: fields.price2,
            price3: fields.price3,
            image: fields.image,
            link: fields.link,
            notes: fields.notes,
        }
    }
}

#[derive(Associations, Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::selections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(belongs_to(Hotel))]
pub struct Selection {
    pub id: i32,
    pub city_id: String,
    pub hotel_id: String,
    pub voter_name: String,
    pub device_id: String,
    pub occupancy: i32,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<Selection> for trip::Selection {
    fn from(row: Selection) -> trip::Selection {
        trip::Selection {
            city_id: row.city_id,
            hotel_id: row.hotel_id,
            voter: trip::VoterIdentity {
                name: row.voter_name,
                device: row.device_id,
            },
            occupancy: row.occupancy,
            notes: row.notes,
            updated_at: row.updated_at.and_utc(),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = schema::selections)]
pub struct NewSelection<'a> {
    pub city_id: &'a str,
    pub hotel_id: &'a str,
    pub voter_name: &'a str,
    pub device_id: &'a str,
    pub occupancy: i32,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::app_config)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ConfigRow {
    pub key: String,
    pub value: Json,
}
