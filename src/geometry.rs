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

use std::fmt;
use std::str::FromStr;

use crate::json::{Deserialize, Deserializer, JsonObject, JsonValue, Serialize, Serializer};
use crate::position::{self, Position};
use crate::{util, Error, GeometryDispatcher, GeometryKind, Result};

/// Anything that can be written as a GeoJSON geometry object.
pub trait GeometryObject {
    fn kind(&self) -> GeometryKind;

    /// Value of the 'coordinates' (or 'geometries') member.
    fn payload(&self) -> JsonValue;

    fn to_json_object(&self) -> JsonObject {
        let kind = self.kind();
        let mut map = JsonObject::new();
        map.insert(String::from("type"), JsonValue::from(kind.as_str()));
        map.insert(String::from(kind.payload_member()), self.payload());
        map
    }
}

macro_rules! coordinate_geometry {
    ($(#[$meta:meta])* $name:ident, $coords:ty, $decode:path, $encode:path) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name {
            pub coordinates: $coords,
        }

        impl $name {
            pub fn new(coordinates: $coords) -> Self {
                $name { coordinates }
            }

            pub fn from_json_object(mut object: JsonObject, dispatcher: &GeometryDispatcher) -> Result<Self> {
                Ok($name {
                    coordinates: $decode(&mut object, dispatcher.options())?,
                })
            }
        }

        impl GeometryObject for $name {
            fn kind(&self) -> GeometryKind {
                GeometryKind::$name
            }

            fn payload(&self) -> JsonValue {
                $encode(&self.coordinates)
            }
        }

        impl From<$name> for Geometry {
            fn from(geometry: $name) -> Self {
                Geometry::$name(geometry)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                self.to_json_object().serialize(serializer)
            }
        }
    };
}

coordinate_geometry!(
    /// [GeoJSON Format Specification § 3.1.2](https://tools.ietf.org/html/rfc7946#section-3.1.2)
    Point,
    Position,
    util::get_coords_one_pos,
    position::encode_position
);

coordinate_geometry!(
    /// [GeoJSON Format Specification § 3.1.3](https://tools.ietf.org/html/rfc7946#section-3.1.3)
    MultiPoint,
    Vec<Position>,
    util::get_coords_1d_pos,
    position::encode_position_sequence
);

coordinate_geometry!(
    /// [GeoJSON Format Specification § 3.1.4](https://tools.ietf.org/html/rfc7946#section-3.1.4)
    LineString,
    Vec<Position>,
    util::get_coords_1d_pos,
    position::encode_position_sequence
);

coordinate_geometry!(
    /// [GeoJSON Format Specification § 3.1.5](https://tools.ietf.org/html/rfc7946#section-3.1.5)
    MultiLineString,
    Vec<Vec<Position>>,
    util::get_coords_2d_pos,
    position::encode_position_rings
);

coordinate_geometry!(
    /// Exterior ring first, then holes. Ring closure is not checked.
    ///
    /// [GeoJSON Format Specification § 3.1.6](https://tools.ietf.org/html/rfc7946#section-3.1.6)
    Polygon,
    Vec<Vec<Position>>,
    util::get_coords_2d_pos,
    position::encode_position_rings
);

coordinate_geometry!(
    /// [GeoJSON Format Specification § 3.1.7](https://tools.ietf.org/html/rfc7946#section-3.1.7)
    MultiPolygon,
    Vec<Vec<Vec<Position>>>,
    util::get_coords_3d_pos,
    position::encode_position_polygons
);

/// [GeoJSON Format Specification § 3.1.8](https://tools.ietf.org/html/rfc7946#section-3.1.8)
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryCollection {
    pub geometries: Vec<Geometry>,
}

impl GeometryCollection {
    pub fn new(geometries: Vec<Geometry>) -> Self {
        GeometryCollection { geometries }
    }

    pub fn from_json_object(mut object: JsonObject, dispatcher: &GeometryDispatcher) -> Result<Self> {
        Ok(GeometryCollection {
            geometries: util::get_geometries(&mut object, dispatcher)?,
        })
    }
}

impl GeometryObject for GeometryCollection {
    fn kind(&self) -> GeometryKind {
        GeometryKind::GeometryCollection
    }

    fn payload(&self) -> JsonValue {
        JsonValue::Array(
            self.geometries
                .iter()
                .map(|g| JsonValue::Object(g.to_json_object()))
                .collect(),
        )
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(geometry: GeometryCollection) -> Self {
        Geometry::GeometryCollection(geometry)
    }
}

/// Any GeoJSON geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Point),
    MultiPoint(MultiPoint),
    LineString(LineString),
    MultiLineString(MultiLineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    fn as_object(&self) -> &dyn GeometryObject {
        match *self {
            Geometry::Point(ref g) => g,
            Geometry::MultiPoint(ref g) => g,
            Geometry::LineString(ref g) => g,
            Geometry::MultiLineString(ref g) => g,
            Geometry::Polygon(ref g) => g,
            Geometry::MultiPolygon(ref g) => g,
            Geometry::GeometryCollection(ref g) => g,
        }
    }

    /// Decode with [`GeometryDispatcher::shared`]: every kind registered,
    /// lenient decoding. Build a dispatcher with strict [`DecodeOptions`] to
    /// reject bad positions instead.
    ///
    /// [`DecodeOptions`]: crate::DecodeOptions
    pub fn from_json_object(object: JsonObject) -> Result<Self> {
        GeometryDispatcher::shared().decode_object(object)
    }
}

impl GeometryObject for Geometry {
    fn kind(&self) -> GeometryKind {
        self.as_object().kind()
    }

    fn payload(&self) -> JsonValue {
        self.as_object().payload()
    }
}

impl Serialize for Geometry {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json_object().serialize(serializer)
    }
}

impl Serialize for GeometryCollection {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json_object().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Geometry, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as SerdeError;

        let val = JsonObject::deserialize(deserializer)?;

        Geometry::from_json_object(val).map_err(|e| D::Error::custom(e.to_string()))
    }
}

impl FromStr for Geometry {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        GeometryDispatcher::shared().decode_str(s)
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        ::serde_json::to_string(self)
            .map_err(|_| fmt::Error)
            .and_then(|s| f.write_str(&s))
    }
}
