// Copyright 2018 The GeoRust Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Conversion between GeoJSON coordinate arrays and [`Position`] values.
//!
//! A position is always written `[longitude, latitude]` or
//! `[longitude, latitude, altitude]`. Whether a member holds a single position
//! or a sequence of them is known from the geometry kind, so each shape has its
//! own decode and encode entry point.

use log::warn;

use crate::json::{Deserialize, Deserializer, JsonValue, Serialize, Serializer};
use crate::{DecodeOptions, Error, Result};

/// A longitude/latitude pair with an optional altitude.
///
/// [GeoJSON Format Specification § 3.1.1](https://tools.ietf.org/html/rfc7946#section-3.1.1)
///
/// A zero altitude is stored as no altitude: both are written as a two element
/// array, so they cannot be told apart once encoded. Every component is finite;
/// the constructors reject NaN and infinities, which JSON cannot represent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    longitude: f64,
    latitude: f64,
    altitude: Option<f64>,
}

impl Position {
    pub fn new(longitude: f64, latitude: f64) -> Result<Self> {
        if !(longitude.is_finite() && latitude.is_finite()) {
            return Err(Error::NonFiniteCoordinate(format!(
                "[{:?},{:?}]",
                longitude, latitude
            )));
        }
        Ok(Position {
            longitude,
            latitude,
            altitude: None,
        })
    }

    pub fn with_altitude(longitude: f64, latitude: f64, altitude: f64) -> Result<Self> {
        if !(longitude.is_finite() && latitude.is_finite() && altitude.is_finite()) {
            return Err(Error::NonFiniteCoordinate(format!(
                "[{:?},{:?},{:?}]",
                longitude, latitude, altitude
            )));
        }
        Ok(Position {
            longitude,
            latitude,
            altitude: if altitude == 0. { None } else { Some(altitude) },
        })
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }
}

impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        encode_position(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Position, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as SerdeError;

        let val = JsonValue::deserialize(deserializer)?;

        decode_position(&val).map_err(|e| D::Error::custom(e.to_string()))
    }
}

fn expect_coordinate(value: &JsonValue, array: &JsonValue) -> Result<f64> {
    match value.as_f64() {
        Some(v) => Ok(v),
        None => Err(Error::NonNumericCoordinate(array.to_string())),
    }
}

fn expect_coordinate_array(json: &JsonValue) -> Result<&Vec<JsonValue>> {
    match json.as_array() {
        Some(a) => Ok(a),
        None => Err(Error::CoordinatesUnparsable(json.to_string())),
    }
}

/// Decode a flat `[lon, lat]` or `[lon, lat, alt]` array.
///
/// Elements past the altitude are ignored.
pub fn decode_position(json: &JsonValue) -> Result<Position> {
    let coords = expect_coordinate_array(json)?;
    if coords.len() < 2 {
        return Err(Error::CoordinatesUnparsable(json.to_string()));
    }
    let longitude = expect_coordinate(&coords[0], json)?;
    let latitude = expect_coordinate(&coords[1], json)?;
    match coords.get(2) {
        Some(alt) => Position::with_altitude(longitude, latitude, expect_coordinate(alt, json)?),
        None => Position::new(longitude, latitude),
    }
}

/// Decode an array of flat position arrays, preserving order.
///
/// In lenient mode an element that does not decode is dropped and the rest of
/// the sequence is kept; in strict mode its error is returned.
pub fn decode_position_sequence(json: &JsonValue, options: &DecodeOptions) -> Result<Vec<Position>> {
    let items = expect_coordinate_array(json)?;
    let mut positions = Vec::with_capacity(items.len());
    for (ix, item) in items.iter().enumerate() {
        match decode_position(item) {
            Ok(position) => positions.push(position),
            Err(e) if options.is_lenient() => {
                warn!("skipping position {} of sequence: {}", ix, e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(positions)
}

/// Decode an array of position sequences (polygon rings, multi line strings).
pub fn decode_position_rings(json: &JsonValue, options: &DecodeOptions) -> Result<Vec<Vec<Position>>> {
    let items = expect_coordinate_array(json)?;
    let mut rings = Vec::with_capacity(items.len());
    for item in items {
        rings.push(decode_position_sequence(item, options)?);
    }
    Ok(rings)
}

/// Decode an array of arrays of position sequences (multi polygons).
pub fn decode_position_polygons(
    json: &JsonValue,
    options: &DecodeOptions,
) -> Result<Vec<Vec<Vec<Position>>>> {
    let items = expect_coordinate_array(json)?;
    let mut polygons = Vec::with_capacity(items.len());
    for item in items {
        polygons.push(decode_position_rings(item, options)?);
    }
    Ok(polygons)
}

/// Encode a single position as a flat array. The altitude is written only
/// when it is present.
pub fn encode_position(position: &Position) -> JsonValue {
    let mut coords = Vec::with_capacity(3);
    coords.push(JsonValue::from(position.longitude));
    coords.push(JsonValue::from(position.latitude));
    if let Some(alt) = position.altitude {
        coords.push(JsonValue::from(alt));
    }
    JsonValue::Array(coords)
}

/// Encode a sequence of positions as an array of flat arrays, in order.
pub fn encode_position_sequence(positions: &[Position]) -> JsonValue {
    JsonValue::Array(positions.iter().map(encode_position).collect())
}

pub fn encode_position_rings(rings: &[Vec<Position>]) -> JsonValue {
    JsonValue::Array(rings.iter().map(|r| encode_position_sequence(r)).collect())
}

pub fn encode_position_polygons(polygons: &[Vec<Vec<Position>>]) -> JsonValue {
    JsonValue::Array(polygons.iter().map(|p| encode_position_rings(p)).collect())
}
