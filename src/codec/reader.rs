use std::str::FromStr;

use chrono::{Local, NaiveDate};
use log::warn;

use super::tags::{extract_blocks, extract_tag};
use super::writer::unescape_xml;
use crate::core::{Result, StoreError};
use crate::model::{Coordinates, FuelType, Vehicle, VehicleDraft, VehicleId, VehicleType};

/// Parse every `<vehicle>` block, in document order.
///
/// All or nothing: the first malformed block aborts the parse with its
/// 1-based position.
pub fn parse_document(xml: &str) -> Result<Vec<Vehicle>> {
    extract_blocks(xml, "vehicle")
        .into_iter()
        .enumerate()
        .map(|(idx, block)| {
            parse_vehicle(block).map_err(|err| StoreError::Vehicle {
                index: idx + 1,
                source: Box::new(err),
            })
        })
        .collect()
}

pub fn parse_vehicle(xml: &str) -> Result<Vehicle> {
    let id: VehicleId = parse_number(required(xml, "id")?, "id")?;
    if id == 0 {
        return Err(StoreError::parse("id", "0", "must be greater than 0"));
    }

    let name = required(xml, "name")?;
    if name.is_empty() {
        return Err(StoreError::parse("name", name, "must not be empty"));
    }
    let name = unescape_xml(name);

    let coordinates = parse_coordinates(required(xml, "coordinates")?)?;

    let creation_date = match extract_tag(xml, "creationDate") {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| StoreError::parse("creationDate", raw, e.to_string()))?,
        None => Local::now().date_naive(),
    };

    let engine_power: f64 = parse_number(required(xml, "enginePower")?, "enginePower")?;
    let capacity: f64 = parse_number(required(xml, "capacity")?, "capacity")?;

    let type_raw = required(xml, "type")?;
    let vehicle_type = VehicleType::from_str(type_raw)
        .map_err(|e| StoreError::parse("type", type_raw, e.reason))?;

    let fuel_type = match extract_tag(xml, "fuelType") {
        Some(raw) => FuelType::parse_optional(raw).unwrap_or_else(|_| {
            warn!("unknown fuelType '{}' for vehicle id={}, treating as absent", raw, id);
            None
        }),
        None => None,
    };

    let draft = VehicleDraft {
        name,
        coordinates,
        engine_power,
        capacity,
        vehicle_type,
        fuel_type,
    };

    Vehicle::restore(id, creation_date, draft).map_err(|e| {
        let fragment = fragment_for(xml, e.field);
        StoreError::parse(e.field, fragment, e.reason)
    })
}

fn parse_coordinates(xml: &str) -> Result<Coordinates> {
    let x_raw = required(xml, "x")?;
    let x: f64 = parse_number(x_raw, "x")?;

    // A missing <y> keeps the zero default
    let y: i32 = match extract_tag(xml, "y") {
        Some(raw) => parse_number(raw, "y")?,
        None => 0,
    };

    Coordinates::new(x, y).map_err(|e| StoreError::parse("x", x_raw, e.reason))
}

fn required<'a>(xml: &'a str, tag: &'static str) -> Result<&'a str> {
    extract_tag(xml, tag).ok_or_else(|| StoreError::parse(tag, "", "required tag is missing"))
}

fn parse_number<T>(raw: &str, field: &'static str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| StoreError::parse(field, raw, format!("invalid number: {}", e)))
}

fn fragment_for(xml: &str, field: &str) -> String {
    extract_tag(xml, field).unwrap_or_default().to_string()
}
