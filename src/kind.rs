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

/// The value of a geometry's 'type' member.
///
/// [GeoJSON Format Specification § 3.1](https://tools.ietf.org/html/rfc7946#section-3.1)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 7] = [
        GeometryKind::Point,
        GeometryKind::MultiPoint,
        GeometryKind::LineString,
        GeometryKind::MultiLineString,
        GeometryKind::Polygon,
        GeometryKind::MultiPolygon,
        GeometryKind::GeometryCollection,
    ];

    /// Matches a discriminator regardless of ASCII case. Non-ASCII characters
    /// are not case-folded.
    pub fn from_discriminator(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "point" => Some(GeometryKind::Point),
            "multipoint" => Some(GeometryKind::MultiPoint),
            "linestring" => Some(GeometryKind::LineString),
            "multilinestring" => Some(GeometryKind::MultiLineString),
            "polygon" => Some(GeometryKind::Polygon),
            "multipolygon" => Some(GeometryKind::MultiPolygon),
            "geometrycollection" => Some(GeometryKind::GeometryCollection),
            _ => None,
        }
    }

    /// Spelling written on encode.
    pub fn as_str(&self) -> &'static str {
        match *self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        }
    }

    /// Name of the member holding the kind's payload.
    pub fn payload_member(&self) -> &'static str {
        match *self {
            GeometryKind::GeometryCollection => "geometries",
            _ => "coordinates",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::GeometryKind;

    #[test]
    fn discriminator_is_case_insensitive() {
        for s in ["POLYGON", "Polygon", "polygon", "pOlYgOn"] {
            assert_eq!(GeometryKind::from_discriminator(s), Some(GeometryKind::Polygon));
        }
        assert_eq!(
            GeometryKind::from_discriminator("geometryCollection"),
            Some(GeometryKind::GeometryCollection)
        );
        assert_eq!(GeometryKind::from_discriminator("Feature"), None);
        assert_eq!(GeometryKind::from_discriminator(""), None);
    }

    #[test]
    fn canonical_spelling_parses_back() {
        for kind in GeometryKind::ALL {
            assert_eq!(GeometryKind::from_discriminator(kind.as_str()), Some(kind));
        }
    }
}
