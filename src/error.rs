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

/// Error when reading or writing GeoJSON geometries
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The coordinate array was absent, not an array, or had fewer than two
    /// elements. Carries the offending JSON fragment.
    CoordinatesUnparsable(String),
    /// A longitude, latitude or altitude element was not a number.
    /// Carries the offending JSON fragment.
    NonNumericCoordinate(String),
    /// A position component was NaN or infinite. Carries the rejected components.
    NonFiniteCoordinate(String),
    /// An encode was requested for a value that is not a geometry.
    UnsupportedGeometryType,
    /// The 'type' member does not name any GeoJSON geometry kind.
    UnknownGeometryKind(String),
    /// The 'type' member names a geometry kind that has no parser registered.
    UnregisteredGeometryKind(String),
    MalformedJson,
    ExpectedProperty(String),
    ExpectedStringValue,
    ExpectedArrayValue,
    ExpectedObjectValue,
    /// Conversion from a `geojson` crate value failed.
    GeoJsonConversion(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::CoordinatesUnparsable(ref raw) => write!(
                f,
                "Geometry coordinates could not be parsed. Expected something like \
                 '[-122.428938,37.766713]' ([lon,lat]), received: {}",
                raw
            ),
            Error::NonNumericCoordinate(ref raw) => write!(
                f,
                "Encountered non-numeric value within coordinate array: {}",
                raw
            ),
            Error::NonFiniteCoordinate(ref raw) => write!(
                f,
                "Encountered non-finite value within position: {}",
                raw
            ),
            Error::UnsupportedGeometryType => write!(f, "Unsupported geometry type."),
            Error::UnknownGeometryKind(ref kind) => {
                write!(f, "Unknown geometry kind '{}'.", kind)
            }
            Error::UnregisteredGeometryKind(ref kind) => write!(
                f,
                "Geometry kind '{}' is recognized but has no registered parser.",
                kind
            ),
            Error::MalformedJson => write!(f, "Encountered malformed JSON."),
            Error::ExpectedProperty(ref prop_name) => {
                write!(f, "Expected GeoJSON property '{}'.", prop_name)
            }
            Error::ExpectedStringValue => write!(f, "Expected a string value."),
            Error::ExpectedArrayValue => write!(f, "Expected an array."),
            Error::ExpectedObjectValue => write!(f, "Expected an object."),
            Error::GeoJsonConversion(ref reason) => {
                write!(f, "Could not convert geojson value: {}", reason)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn parse_errors_carry_raw_fragment() {
        let msg = Error::CoordinatesUnparsable("[1.0]".to_owned()).to_string();
        assert!(msg.ends_with("received: [1.0]"));

        let msg = Error::NonNumericCoordinate("\"abc\"".to_owned()).to_string();
        assert!(msg.contains("\"abc\""));
    }

    #[test]
    fn kind_errors_are_distinct() {
        let unknown = Error::UnknownGeometryKind("blob".to_owned());
        let unregistered = Error::UnregisteredGeometryKind("point".to_owned());
        assert_ne!(unknown.to_string(), unregistered.to_string());
        assert_eq!(unknown.to_string(), "Unknown geometry kind 'blob'.");
    }
}
