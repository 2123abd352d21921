pub mod models;
pub mod schema;

use std::env;

use chrono::Utc;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DbError};
use diesel::upsert::excluded;
use diesel::PgConnection;
use dotenvy::dotenv;
use log::warn;

use crate::error::{self, ApiError};
use crate::trip;

/// One connection per request; the database is the only shared state.
pub fn connect() -> Result<PgConnection, ApiError> {
    dotenv().ok();

    let db_url = env::var("DATABASE_URL").map_err(|_| ApiError::Unconfigured)?;
    Ok(PgConnection::establish(&db_url)?)
}

/// The whole catalog: header plus cities ordered by id, each with its
/// hotels ordered by id. The catalog stays at tens of rows, so no
/// pagination.
pub fn list_trip(conn: &mut PgConnection) -> Result<trip::Trip, ApiError> {
    let cities: Vec<models::City> = schema::cities::table
        .order(schema::cities::id.asc())
        .select(models::City::as_select())
        .load(conn)?;
    let hotels: Vec<models::Hotel> = models::Hotel::belonging_to(&cities)
        .order(schema::hotels::id.asc())
        .select(models::Hotel::as_select())
        .load(conn)?;

    let header = load_header(conn)?;
    let cities = hotels
        .grouped_by(&cities)
        .into_iter()
        .zip(cities)
        .map(|(hotels, city)| trip::City {
            id: city.id,
            name: city.name,
            dates: city.dates,
            hotels: hotels.into_iter().map(Into::into).collect(),
        })
        .collect();

    Ok(trip::Trip { header, cities })
}

fn load_header(conn: &mut PgConnection) -> Result<trip::TripHeader, ApiError> {
    let row: Option<models::ConfigRow> = schema::app_config::table
        .find("config")
        .select(models::ConfigRow::as_select())
        .first(conn)
        .optional()?;

    Ok(match row {
        Some(row) => serde_json::from_value(row.value).unwrap_or_else(|err| {
            warn!("app_config row is malformed, using defaults: {err}");
            trip::TripHeader::default()
        }),
        None => trip::TripHeader::default(),
    })
}

pub fn create_hotel(
    conn: &mut PgConnection,
    city_id: &str,
    fields: trip::HotelFields,
) -> Result<trip::Hotel, ApiError> {
    let city_known: bool =
        diesel::select(exists(schema::cities::table.find(city_id))).get_result(conn)?;
    if !city_known {
        return Err(error::city_not_found(city_id));
    }

    let hotel = models::Hotel::from_fields(trip::new_hotel_id(), city_id.to_owned(), fields);
    diesel::insert_into(schema::hotels::table)
        .values(&hotel)
        .execute(conn)?;
    Ok(hotel.into())
}

pub fn update_hotel(
    conn: &mut PgConnection,
    city_id: &str,
    hotel_id: &str,
    fields: trip::HotelFields,
) -> Result<trip::Hotel, ApiError> {
    let target = schema::hotels::table.filter(
        schema::hotels::id
            .eq(hotel_id)
            .and(schema::hotels::city_id.eq(city_id)),
    );
    let updated: Option<models::Hotel> = diesel::update(target)
        .set(models::HotelChangeset::from(fields))
        .returning(models::Hotel::as_returning())
        .get_result(conn)
        .optional()?;

    updated
        .map(Into::into)
        .ok_or_else(|| error::hotel_not_found(city_id, hotel_id))
}

/// Removes the hotel and every selection that points at it, in one
/// transaction so nothing observes a selection for a vanished hotel.
pub fn delete_hotel(
    conn: &mut PgConnection,
    city_id: &str,
    hotel_id: &str,
) -> Result<trip::Hotel, ApiError> {
    conn.transaction::<_, ApiError, _>(|conn| {
        diesel::delete(
            schema::selections::table.filter(
                schema::selections::city_id
                    .eq(city_id)
                    .and(schema::selections::hotel_id.eq(hotel_id)),
            ),
        )
        .execute(conn)?;

        let removed: Option<models::Hotel> = diesel::delete(
            schema::hotels::table.filter(
                schema::hotels::id
                    .eq(hotel_id)
                    .and(schema::hotels::city_id.eq(city_id)),
            ),
        )
        .returning(models::Hotel::as_returning())
        .get_result(conn)
        .optional()?;

        removed
            .map(Into::into)
            .ok_or_else(|| error::hotel_not_found(city_id, hotel_id))
    })
}

/// Insert-or-overwrite of the voter's choice for one city, atomic at the
/// storage layer: the unique index over (city_id, voter_name, device_id)
/// plus ON CONFLICT DO UPDATE guarantees at most one row per identity per
/// city even when two submissions race. Last write wins.
pub fn upsert_selection(
    conn: &mut PgConnection,
    city_id: &str,
    hotel_id: &str,
    voter: &trip::VoterIdentity,
    occupancy: i32,
    notes: Option<&str>,
) -> Result<trip::Selection, ApiError> {
    let hotel_in_city: bool = diesel::select(exists(
        schema::hotels::table.filter(
            schema::hotels::id
                .eq(hotel_id)
                .and(schema::hotels::city_id.eq(city_id)),
        ),
    ))
    .get_result(conn)?;
    if !hotel_in_city {
        return Err(error::hotel_not_found(city_id, hotel_id));
    }

    let row = models::NewSelection {
        city_id,
        hotel_id,
        voter_name: &voter.name,
        device_id: &voter.device,
        occupancy,
        notes,
        updated_at: Utc::now().naive_utc(),
    };
    let stored: models::Selection = diesel::insert_into(schema::selections::table)
        .values(&row)
        .on_conflict((
            schema::selections::city_id,
            schema::selections::voter_name,
            schema::selections::device_id,
        ))
        .do_update()
        .set((
            schema::selections::hotel_id.eq(excluded(schema::selections::hotel_id)),
            schema::selections::occupancy.eq(excluded(schema::selections::occupancy)),
            schema::selections::notes.eq(excluded(schema::selections::notes)),
            schema::selections::updated_at.eq(excluded(schema::selections::updated_at)),
        ))
        .returning(models::Selection::as_returning())
        .get_result(conn)
        .map_err(|err| match err {
            // The hotel can vanish between the existence check and the
            // write; surface that as the same not-found the check gives.
            DbError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                error::hotel_not_found(city_id, hotel_id)
            }
            other => ApiError::from(other),
        })?;

    Ok(stored.into())
}

/// Drops every selection the identity holds, across all cities. Deleting
/// nothing is not an error; the count goes back to the caller.
pub fn clear_selections(
    conn: &mut PgConnection,
    voter: &trip::VoterIdentity,
) -> Result<usize, ApiError> {
    let deleted = diesel::delete(
        schema::selections::table.filter(
            schema::selections::voter_name
                .eq(&voter.name)
                .and(schema::selections::device_id.eq(&voter.device)),
        ),
    )
    .execute(conn)?;
    Ok(deleted)
}

/// All active selections, most recently updated first. The aggregator
/// relies on that ordering for its per-hotel voter lists.
pub fn list_active_selections(conn: &mut PgConnection) -> Result<Vec<trip::Selection>, ApiError> {
    let rows: Vec<models::Selection> = schema::selections::table
        .order(schema::selections::updated_at.desc())
        .select(models::Selection::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Upsert the snapshot's header, cities, and hotels. Used by the seed tool;
/// existing rows are overwritten, selections are left alone.
pub fn seed_trip(conn: &mut PgConnection, trip: &trip::Trip) -> Result<(), ApiError> {
    let header = serde_json::to_value(&trip.header).expect("trip header serializes");

    conn.transaction::<_, ApiError, _>(|conn| {
        diesel::insert_into(schema::app_config::table)
            .values((
                schema::app_config::key.eq("config"),
                schema::app_config::value.eq(header.clone()),
            ))
            .on_conflict(schema::app_config::key)
            .do_update()
            .set(schema::app_config::value.eq(header.clone()))
            .execute(conn)?;

        for city in &trip.cities {
            diesel::insert_into(schema::cities::table)
                .values((
                    schema::cities::id.eq(&city.id),
                    schema::cities::name.eq(&city.name),
                    schema::cities::dates.eq(&city.dates),
                ))
                .on_conflict(schema::cities::id)
                .do_update()
                .set((
                    schema::cities::name.eq(&city.name),
                    schema::cities::dates.eq(&city.dates),
                ))
                .execute(conn)?;

            for hotel in &city.hotels {
                diesel::insert_into(schema::hotels::table)
                    .values((
                        schema::hotels::id.eq(&hotel.id),
                        schema::hotels::city_id.eq(&city.id),
                        schema::hotels::name.eq(&hotel.name),
                        schema::hotels::price2.eq(hotel.price2),
                        schema::hotels::price3.eq(hotel.price3),
                        schema::hotels::image.eq(hotel.image.as_deref()),
                        schema::hotels::link.eq(hotel.link.as_deref()),
                        schema::hotels::notes.eq(hotel.notes.as_deref()),
                    ))
                    .on_conflict(schema::hotels::id)
                    .do_update()
                    .set((
                        schema::hotels::name.eq(&hotel.name),
                        schema::hotels::price2.eq(hotel.price2),
                        schema::hotels::price3.eq(hotel.price3),
                        schema::hotels::image.eq(hotel.image.as_deref()),
                        schema::hotels::link.eq(hotel.link.as_deref()),
                        schema::hotels::notes.eq(hotel.notes.as_deref()),
                    ))
                    .execute(conn)?;
            }
        }

        Ok(())
    })
}
