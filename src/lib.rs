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

//! # Introduction
//!
//! Encoding and decoding of [GeoJSON](https://tools.ietf.org/html/rfc7946)
//! geometries: a codec for positions and position arrays, and a dispatcher
//! that turns an untyped geometry object into the matching geometry type.
//!
//! # Examples
//!
//! ```
//! use geojson_codec::{DecodeOptions, Geometry, GeometryDispatcher, GeometryKind, GeometryObject};
//!
//! let dispatcher = GeometryDispatcher::all_kinds(DecodeOptions::strict());
//! let geometry = dispatcher
//!     .decode_str(r#"{"type": "polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}"#)
//!     .unwrap();
//! assert_eq!(geometry.kind(), GeometryKind::Polygon);
//!
//! let json = serde_json::to_string(&geometry).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"coordinates":[[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,0.0]]],"type":"Polygon"}"#
//! );
//! ```

mod config;
mod dispatch;
mod error;
mod geometry;
mod interop;
mod json;
mod kind;
pub mod position;
mod util;

pub use crate::config::{DecodeMode, DecodeOptions};
pub use crate::dispatch::{builtin_parser, GeometryDispatcher, ParseFn};
pub use crate::error::{Error, Result};
pub use crate::geometry::{
    Geometry, GeometryCollection, GeometryObject, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
pub use crate::json::{JsonObject, JsonValue};
pub use crate::kind::GeometryKind;
pub use crate::position::Position;
