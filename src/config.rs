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

use serde::{Deserialize, Serialize};

/// How a sequence of positions reacts to an element that does not decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeMode {
    /// Fail the whole sequence on the first bad element.
    Strict,
    /// Skip bad elements and keep the rest, in order.
    #[default]
    Lenient,
}

/// Options applied while decoding geometries.
///
/// Can be embedded in a host configuration file, e.g. `{"mode": "strict"}`.
/// Missing members fall back to their defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub mode: DecodeMode,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        DecodeOptions {
            mode: DecodeMode::Strict,
        }
    }

    pub fn lenient() -> Self {
        DecodeOptions {
            mode: DecodeMode::Lenient,
        }
    }

    pub fn is_lenient(&self) -> bool {
        self.mode == DecodeMode::Lenient
    }
}
