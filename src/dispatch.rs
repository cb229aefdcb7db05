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

//! Routing of untyped GeoJSON geometry objects to the parser of their kind.

use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use log::{debug, trace};

use crate::geometry::{
    GeometryCollection, GeometryObject, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use crate::json::{JsonObject, JsonValue};
use crate::{util, DecodeOptions, Error, Geometry, GeometryKind, Result};

/// Turns a geometry object, with its 'type' member already removed, into a [`Geometry`].
pub type ParseFn = fn(JsonObject, &GeometryDispatcher) -> Result<Geometry>;

fn parse_point(object: JsonObject, dispatcher: &GeometryDispatcher) -> Result<Geometry> {
    Point::from_json_object(object, dispatcher).map(Geometry::Point)
}

fn parse_multi_point(object: JsonObject, dispatcher: &GeometryDispatcher) -> Result<Geometry> {
    MultiPoint::from_json_object(object, dispatcher).map(Geometry::MultiPoint)
}

fn parse_line_string(object: JsonObject, dispatcher: &GeometryDispatcher) -> Result<Geometry> {
    LineString::from_json_object(object, dispatcher).map(Geometry::LineString)
}

fn parse_multi_line_string(object: JsonObject, dispatcher: &GeometryDispatcher) -> Result<Geometry> {
    MultiLineString::from_json_object(object, dispatcher).map(Geometry::MultiLineString)
}

fn parse_polygon(object: JsonObject, dispatcher: &GeometryDispatcher) -> Result<Geometry> {
    Polygon::from_json_object(object, dispatcher).map(Geometry::Polygon)
}

fn parse_multi_polygon(object: JsonObject, dispatcher: &GeometryDispatcher) -> Result<Geometry> {
    MultiPolygon::from_json_object(object, dispatcher).map(Geometry::MultiPolygon)
}

fn parse_geometry_collection(object: JsonObject, dispatcher: &GeometryDispatcher) -> Result<Geometry> {
    GeometryCollection::from_json_object(object, dispatcher).map(Geometry::GeometryCollection)
}

/// The parser this crate ships for `kind`.
pub fn builtin_parser(kind: GeometryKind) -> ParseFn {
    match kind {
        GeometryKind::Point => parse_point,
        GeometryKind::MultiPoint => parse_multi_point,
        GeometryKind::LineString => parse_line_string,
        GeometryKind::MultiLineString => parse_multi_line_string,
        GeometryKind::Polygon => parse_polygon,
        GeometryKind::MultiPolygon => parse_multi_polygon,
        GeometryKind::GeometryCollection => parse_geometry_collection,
    }
}

/// Decodes geometry objects by their 'type' member and encodes any geometry.
///
/// The table of parsers is owned by the dispatcher and only changes through
/// `&mut self`, so a built dispatcher can be shared between threads freely.
#[derive(Clone)]
pub struct GeometryDispatcher {
    parsers: BTreeMap<GeometryKind, ParseFn>,
    options: DecodeOptions,
}

impl fmt::Debug for GeometryDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GeometryDispatcher")
            .field("kinds", &self.parsers.keys().collect::<Vec<_>>())
            .field("options", &self.options)
            .finish()
    }
}

impl Default for GeometryDispatcher {
    /// Only Polygon is registered.
    fn default() -> Self {
        GeometryDispatcher::polygon_only(DecodeOptions::default())
    }
}

impl GeometryDispatcher {
    /// A dispatcher with no registered kinds.
    pub fn new(options: DecodeOptions) -> Self {
        GeometryDispatcher {
            parsers: BTreeMap::new(),
            options,
        }
    }

    pub fn polygon_only(options: DecodeOptions) -> Self {
        GeometryDispatcher::new(options).with_parser(
            GeometryKind::Polygon,
            builtin_parser(GeometryKind::Polygon),
        )
    }

    pub fn all_kinds(options: DecodeOptions) -> Self {
        let mut dispatcher = GeometryDispatcher::new(options);
        for kind in GeometryKind::ALL {
            dispatcher.register(kind, builtin_parser(kind));
        }
        dispatcher
    }

    /// Every kind registered, lenient decoding. Built on first use and never
    /// modified afterwards.
    pub fn shared() -> &'static GeometryDispatcher {
        static SHARED: OnceLock<GeometryDispatcher> = OnceLock::new();
        SHARED.get_or_init(|| GeometryDispatcher::all_kinds(DecodeOptions::default()))
    }

    /// Register (or replace) the parser for `kind`.
    pub fn register(&mut self, kind: GeometryKind, parser: ParseFn) -> &mut Self {
        self.parsers.insert(kind, parser);
        self
    }

    pub fn with_parser(mut self, kind: GeometryKind, parser: ParseFn) -> Self {
        self.register(kind, parser);
        self
    }

    pub fn is_registered(&self, kind: GeometryKind) -> bool {
        self.parsers.contains_key(&kind)
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Whether `T` is a geometry this dispatcher can encode: the
    /// [`GeometryObject`] trait object itself, [`Geometry`], or one of the
    /// concrete geometry types.
    pub fn can_handle<T: ?Sized + 'static>(&self) -> bool {
        let id = TypeId::of::<T>();
        [
            TypeId::of::<dyn GeometryObject>(),
            TypeId::of::<Geometry>(),
            TypeId::of::<Point>(),
            TypeId::of::<MultiPoint>(),
            TypeId::of::<LineString>(),
            TypeId::of::<MultiLineString>(),
            TypeId::of::<Polygon>(),
            TypeId::of::<MultiPolygon>(),
            TypeId::of::<GeometryCollection>(),
        ]
        .contains(&id)
    }

    pub fn encode<G: GeometryObject + ?Sized>(&self, geometry: &G) -> JsonObject {
        trace!("encoding {} geometry", geometry.kind());
        geometry.to_json_object()
    }

    /// Encode a value whose type is only known at runtime.
    ///
    /// Fails with [`Error::UnsupportedGeometryType`] if it is not a geometry.
    pub fn encode_any(&self, value: &dyn Any) -> Result<JsonObject> {
        match downcast_geometry(value) {
            Some(geometry) => Ok(self.encode(geometry)),
            None => Err(Error::UnsupportedGeometryType),
        }
    }

    /// Decode a geometry object by dispatching on its 'type' member.
    ///
    /// The discriminator is matched ignoring ASCII case only; non-ASCII letters
    /// are compared as-is. A value that is not a geometry kind gives
    /// [`Error::UnknownGeometryKind`]; a kind with no registered parser gives
    /// [`Error::UnregisteredGeometryKind`]. Both carry the lower-cased
    /// discriminator.
    pub fn decode_object(&self, mut object: JsonObject) -> Result<Geometry> {
        let discriminator = util::expect_type(&mut object)?.to_ascii_lowercase();
        let kind = match GeometryKind::from_discriminator(&discriminator) {
            Some(kind) => kind,
            None => {
                debug!("no geometry kind named '{}'", discriminator);
                return Err(Error::UnknownGeometryKind(discriminator));
            }
        };
        let parser = match self.parsers.get(&kind) {
            Some(parser) => *parser,
            None => {
                debug!("geometry kind {} has no registered parser", kind);
                return Err(Error::UnregisteredGeometryKind(discriminator));
            }
        };
        debug!("dispatching {} geometry", kind);
        parser(object, self)
    }

    pub fn decode(&self, value: JsonValue) -> Result<Geometry> {
        let object = util::expect_owned_object(value)?;
        self.decode_object(object)
    }

    pub fn decode_str(&self, s: &str) -> Result<Geometry> {
        let object = get_object(s)?;
        self.decode_object(object)
    }
}

fn get_object(s: &str) -> Result<JsonObject> {
    ::serde_json::from_str(s)
        .ok()
        .and_then(json_value_into_json_object)
        .ok_or(Error::MalformedJson)
}

fn json_value_into_json_object(json_value: JsonValue) -> Option<JsonObject> {
    if let JsonValue::Object(geo) = json_value {
        Some(geo)
    } else {
        None
    }
}

fn downcast_geometry(value: &dyn Any) -> Option<&dyn GeometryObject> {
    macro_rules! try_downcast {
        ($($ty:ty),*) => {
            $(
                if let Some(g) = value.downcast_ref::<$ty>() {
                    return Some(g);
                }
            )*
        };
    }

    if let Some(g) = value.downcast_ref::<Box<dyn GeometryObject>>() {
        return Some(g.as_ref());
    }
    try_downcast!(
        Geometry,
        Point,
        MultiPoint,
        LineString,
        MultiLineString,
        Polygon,
        MultiPolygon,
        GeometryCollection
    );
    None
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::Position;

    const POLYGON: &str = "{\"type\":\"Polygon\",\"coordinates\":[[[0,0],[1,0],[1,1],[0,0]]]}";

    fn first_ring(geometry: &Geometry) -> &Vec<Position> {
        match geometry {
            Geometry::Polygon(polygon) => &polygon.coordinates[0],
            other => panic!("expected a polygon, got {:?}", other),
        }
    }

    #[test]
    fn dispatch_polygon() {
        let geometry = GeometryDispatcher::default().decode_str(POLYGON).unwrap();
        let ring = first_ring(&geometry);
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0].longitude(), 0.);
        assert_eq!(ring[0].latitude(), 0.);
    }

    #[test]
    fn default_dispatcher_rejects_point() {
        let result = GeometryDispatcher::default().decode_str("{\"type\":\"Point\",\"coordinates\":[1,2]}");
        assert_eq!(result, Err(Error::UnregisteredGeometryKind("point".to_owned())));
    }

    #[test]
    fn unknown_kind_is_distinct_from_unregistered() {
        let dispatcher = GeometryDispatcher::default();
        assert_eq!(
            dispatcher.decode_str("{\"type\":\"Feature\",\"geometry\":null}"),
            Err(Error::UnknownGeometryKind("feature".to_owned()))
        );
        assert_eq!(
            dispatcher.decode_str("{\"coordinates\":[1,2]}"),
            Err(Error::ExpectedProperty("type".to_owned()))
        );
        assert_eq!(
            dispatcher.decode_str("{\"type\":[\"Polygon\"]}"),
            Err(Error::ExpectedStringValue)
        );
    }

    #[test]
    fn whitespace_does_not_matter() {
        let pretty = "{\n  \"type\" : \"Polygon\",\n  \"coordinates\" : [\n    [ [0, 0], [1, 0],\r\n      [1, 1], [0, 0] ]\n  ]\n}";
        let dispatcher = GeometryDispatcher::default();
        assert_eq!(
            dispatcher.decode_str(pretty).unwrap(),
            dispatcher.decode_str(POLYGON).unwrap()
        );
    }

    #[test]
    fn discriminator_case_does_not_matter() {
        let dispatcher = GeometryDispatcher::default();
        let expected = dispatcher.decode_str(POLYGON).unwrap();
        for kind in ["POLYGON", "Polygon", "polygon"] {
            let doc = json!({"type": kind, "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]});
            assert_eq!(dispatcher.decode(doc).unwrap(), expected);
        }
    }

    #[test]
    fn type_value_is_read_by_key() {
        // A 'type' appearing inside another member must not be mistaken for the discriminator.
        let doc = json!({
            "properties": {"type": "point"},
            "type": "Polygon",
            "coordinates": [[[0, 0], [1, 0], [0, 0]]]
        });
        let geometry = GeometryDispatcher::default().decode(doc).unwrap();
        assert_eq!(geometry.kind(), GeometryKind::Polygon);
    }

    #[test]
    fn bad_payload_surfaces_codec_error() {
        let result = GeometryDispatcher::polygon_only(DecodeOptions::strict())
            .decode_str("{\"type\":\"Polygon\",\"coordinates\":[[[0,0],[1]]]}");
        assert_eq!(result, Err(Error::CoordinatesUnparsable("[1]".to_owned())));

        let geometry = GeometryDispatcher::polygon_only(DecodeOptions::lenient())
            .decode_str("{\"type\":\"Polygon\",\"coordinates\":[[[0,0],[1]]]}")
            .unwrap();
        assert_eq!(first_ring(&geometry), &vec![Position::new(0., 0.).unwrap()]);
    }

    #[test]
    fn register_extends_the_table() {
        let mut dispatcher = GeometryDispatcher::default();
        assert!(!dispatcher.is_registered(GeometryKind::Point));
        dispatcher.register(GeometryKind::Point, builtin_parser(GeometryKind::Point));

        let geometry = dispatcher
            .decode_str("{\"type\":\"point\",\"coordinates\":[1,2,10]}")
            .unwrap();
        assert_eq!(
            geometry,
            Geometry::Point(Point::new(Position::with_altitude(1., 2., 10.).unwrap()))
        );
    }

    #[test]
    fn collection_members_go_through_the_table() {
        let doc = "{\"type\":\"GeometryCollection\",\"geometries\":[{\"type\":\"Point\",\"coordinates\":[1,2]}]}";

        let partial = GeometryDispatcher::new(DecodeOptions::default()).with_parser(
            GeometryKind::GeometryCollection,
            builtin_parser(GeometryKind::GeometryCollection),
        );
        assert_eq!(
            partial.decode_str(doc),
            Err(Error::UnregisteredGeometryKind("point".to_owned()))
        );

        let full = GeometryDispatcher::all_kinds(DecodeOptions::default());
        assert_eq!(
            full.decode_str(doc).unwrap(),
            Geometry::from(GeometryCollection::new(vec![Geometry::from(Point::new(
                Position::new(1., 2.).unwrap()
            ))]))
        );
    }

    #[test]
    fn can_handle_geometry_types_only() {
        let dispatcher = GeometryDispatcher::default();
        assert!(dispatcher.can_handle::<dyn GeometryObject>());
        assert!(dispatcher.can_handle::<Geometry>());
        assert!(dispatcher.can_handle::<Point>());
        assert!(dispatcher.can_handle::<GeometryCollection>());
        assert!(!dispatcher.can_handle::<Position>());
        assert!(!dispatcher.can_handle::<String>());
    }

    #[test]
    fn encode_any_rejects_non_geometry() {
        let dispatcher = GeometryDispatcher::default();
        assert_eq!(
            dispatcher.encode_any(&String::from("Point")),
            Err(Error::UnsupportedGeometryType)
        );
        assert_eq!(
            dispatcher.encode_any(&Position::new(1., 2.).unwrap()),
            Err(Error::UnsupportedGeometryType)
        );
    }

    #[test]
    fn encode_any_accepts_geometries() {
        let dispatcher = GeometryDispatcher::default();
        let point = Point::new(Position::new(1., 2.).unwrap());
        let expected = dispatcher.encode(&point);
        assert_eq!(
            JsonValue::Object(expected.clone()),
            json!({"type": "Point", "coordinates": [1.0, 2.0]})
        );

        assert_eq!(dispatcher.encode_any(&point), Ok(expected.clone()));
        assert_eq!(dispatcher.encode_any(&Geometry::from(point.clone())), Ok(expected.clone()));

        let boxed: Box<dyn GeometryObject> = Box::new(point);
        assert_eq!(dispatcher.encode_any(&boxed), Ok(expected));
    }

    #[test]
    fn shared_dispatcher_is_built_once() {
        let first = GeometryDispatcher::shared();
        assert!(std::ptr::eq(first, GeometryDispatcher::shared()));
        assert!(GeometryKind::ALL.iter().all(|k| first.is_registered(*k)));
        assert!(first.options().is_lenient());
    }

    #[test]
    fn non_ascii_discriminator_is_unknown() {
        // U+0130 has a Unicode lower case but no ASCII one.
        assert_eq!(
            GeometryDispatcher::shared()
                .decode_str("{\"type\":\"PO\u{130}NT\",\"coordinates\":[1,2]}"),
            Err(Error::UnknownGeometryKind("po\u{130}nt".to_owned()))
        );
    }

    #[test]
    fn shared_between_threads() {
        let dispatcher = GeometryDispatcher::all_kinds(DecodeOptions::default());
        std::thread::scope(|s| {
            for i in 0..4 {
                let dispatcher = &dispatcher;
                s.spawn(move || {
                    let doc = json!({"type": "Point", "coordinates": [i, i]});
                    let geometry = dispatcher.decode(doc).unwrap();
                    assert_eq!(
                        geometry,
                        Geometry::from(Point::new(Position::new(i as f64, i as f64).unwrap()))
                    );
                });
            }
        });
    }
}
