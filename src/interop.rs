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

use geojson::{Geometry as GeoJsonGeometry, Value as GeoJsonGeomValue};

use crate::geometry::{
    GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use crate::{Error, Geometry, Position, Result};

fn make_pt(pos: &Position) -> Vec<f64> {
    match pos.altitude() {
        Some(alt) => vec![pos.longitude(), pos.latitude(), alt],
        None => vec![pos.longitude(), pos.latitude()],
    }
}

fn make_line(positions: &[Position]) -> Vec<Vec<f64>> {
    positions.iter().map(make_pt).collect()
}

fn make_rings(rings: &[Vec<Position>]) -> Vec<Vec<Vec<f64>>> {
    rings.iter().map(|r| make_line(r)).collect()
}

fn read_pt(pos: &[f64]) -> Result<Position> {
    match *pos {
        [lon, lat] => Position::new(lon, lat),
        [lon, lat, alt, ..] => Position::with_altitude(lon, lat, alt),
        _ => Err(Error::GeoJsonConversion(format!(
            "position {:?} has fewer than 2 components",
            pos
        ))),
    }
}

fn read_line(positions: &[Vec<f64>]) -> Result<Vec<Position>> {
    positions.iter().map(|p| read_pt(p)).collect()
}

fn read_rings(rings: &[Vec<Vec<f64>>]) -> Result<Vec<Vec<Position>>> {
    rings.iter().map(|r| read_line(r)).collect()
}

impl<'a> From<&'a Geometry> for GeoJsonGeometry {
    fn from(geometry: &'a Geometry) -> GeoJsonGeometry {
        let value = match *geometry {
            Geometry::Point(ref g) => GeoJsonGeomValue::Point(make_pt(&g.coordinates)),
            Geometry::MultiPoint(ref g) => GeoJsonGeomValue::MultiPoint(make_line(&g.coordinates)),
            Geometry::LineString(ref g) => GeoJsonGeomValue::LineString(make_line(&g.coordinates)),
            Geometry::MultiLineString(ref g) => {
                GeoJsonGeomValue::MultiLineString(make_rings(&g.coordinates))
            }
            Geometry::Polygon(ref g) => GeoJsonGeomValue::Polygon(make_rings(&g.coordinates)),
            Geometry::MultiPolygon(ref g) => GeoJsonGeomValue::MultiPolygon(
                g.coordinates.iter().map(|p| make_rings(p)).collect(),
            ),
            Geometry::GeometryCollection(ref g) => GeoJsonGeomValue::GeometryCollection(
                g.geometries.iter().map(GeoJsonGeometry::from).collect(),
            ),
        };
        GeoJsonGeometry::new(value)
    }
}

impl<'a> TryFrom<&'a GeoJsonGeometry> for Geometry {
    type Error = Error;

    fn try_from(geometry: &'a GeoJsonGeometry) -> Result<Geometry> {
        #[allow(unreachable_patterns)]
        let geometry: Geometry = match geometry.value {
            GeoJsonGeomValue::Point(ref pos) => Point::new(read_pt(pos)?).into(),
            GeoJsonGeomValue::MultiPoint(ref line) => MultiPoint::new(read_line(line)?).into(),
            GeoJsonGeomValue::LineString(ref line) => LineString::new(read_line(line)?).into(),
            GeoJsonGeomValue::MultiLineString(ref rings) => {
                MultiLineString::new(read_rings(rings)?).into()
            }
            GeoJsonGeomValue::Polygon(ref rings) => Polygon::new(read_rings(rings)?).into(),
            GeoJsonGeomValue::MultiPolygon(ref polygons) => MultiPolygon::new(
                polygons
                    .iter()
                    .map(|p| read_rings(p))
                    .collect::<Result<Vec<_>>>()?,
            )
            .into(),
            GeoJsonGeomValue::GeometryCollection(ref geometries) => GeometryCollection::new(
                geometries
                    .iter()
                    .map(Geometry::try_from)
                    .collect::<Result<Vec<_>>>()?,
            )
            .into(),
            _ => {
                return Err(Error::GeoJsonConversion(
                    "unsupported geojson geometry value".to_owned(),
                ))
            }
        };
        Ok(geometry)
    }
}
