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

use crate::json::{JsonObject, JsonValue};
use crate::position::{self, Position};
use crate::{DecodeOptions, Error, Geometry, GeometryDispatcher, Result};

/// Remove a member, matching its name exactly first and then ignoring ASCII case.
pub fn take_property(obj: &mut JsonObject, name: &str) -> Option<JsonValue> {
    if let Some(v) = obj.remove(name) {
        return Some(v);
    }
    let key = obj.keys().find(|k| k.eq_ignore_ascii_case(name))?.to_owned();
    obj.remove(&key)
}

fn expect_property(obj: &mut JsonObject, name: &'static str) -> Result<JsonValue> {
    match take_property(obj, name) {
        Some(v) => Ok(v),
        None => Err(Error::ExpectedProperty(name.to_string())),
    }
}

pub fn expect_type(value: &mut JsonObject) -> Result<String> {
    let prop = expect_property(value, "type")?;
    expect_string(prop)
}

fn expect_string(value: JsonValue) -> Result<String> {
    match value {
        JsonValue::String(s) => Ok(s),
        _ => Err(Error::ExpectedStringValue),
    }
}

pub fn expect_owned_array(value: JsonValue) -> Result<Vec<JsonValue>> {
    match value {
        JsonValue::Array(v) => Ok(v),
        _ => Err(Error::ExpectedArrayValue),
    }
}

pub fn expect_owned_object(value: JsonValue) -> Result<JsonObject> {
    match value {
        JsonValue::Object(o) => Ok(o),
        _ => Err(Error::ExpectedObjectValue),
    }
}

/// A missing 'coordinates' member decodes as `null`, which the position codec rejects.
fn get_coords_value(object: &mut JsonObject) -> JsonValue {
    take_property(object, "coordinates").unwrap_or(JsonValue::Null)
}

/// Retrieve a single Position from the value of the "coordinates" key.
///
/// Used by Point
pub fn get_coords_one_pos(object: &mut JsonObject, _options: &DecodeOptions) -> Result<Position> {
    let coords_json = get_coords_value(object);
    position::decode_position(&coords_json)
}

/// Retrieve a one dimensional Vec of Positions from the value of the "coordinates" key.
///
/// Used by MultiPoint and LineString
pub fn get_coords_1d_pos(object: &mut JsonObject, options: &DecodeOptions) -> Result<Vec<Position>> {
    let coords_json = get_coords_value(object);
    position::decode_position_sequence(&coords_json, options)
}

/// Used by MultiLineString and Polygon
pub fn get_coords_2d_pos(
    object: &mut JsonObject,
    options: &DecodeOptions,
) -> Result<Vec<Vec<Position>>> {
    let coords_json = get_coords_value(object);
    position::decode_position_rings(&coords_json, options)
}

/// Used by MultiPolygon
pub fn get_coords_3d_pos(
    object: &mut JsonObject,
    options: &DecodeOptions,
) -> Result<Vec<Vec<Vec<Position>>>> {
    let coords_json = get_coords_value(object);
    position::decode_position_polygons(&coords_json, options)
}

/// Retrieve the geometries contained in the 'geometries' member of a GeometryCollection.
///
/// Each member goes back through the dispatcher, so only registered kinds are accepted.
pub fn get_geometries(object: &mut JsonObject, dispatcher: &GeometryDispatcher) -> Result<Vec<Geometry>> {
    let geometries_json = expect_property(object, "geometries")?;
    let geometries_array = expect_owned_array(geometries_json)?;
    let mut geometries = Vec::with_capacity(geometries_array.len());
    for json in geometries_array {
        geometries.push(dispatcher.decode(json)?);
    }
    Ok(geometries)
}
