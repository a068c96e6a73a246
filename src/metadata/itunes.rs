// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Value of an `itunes:explicit` element
///
/// Descriptors write it as a JSON boolean or as one of the words podcast
/// directories know (`yes`, `no`, `clean`, `true`, `false`). Words are kept
/// as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExplicitFlag {
    Bool(bool),
    Text(String),
}

impl From<bool> for ExplicitFlag {
    fn from(value: bool) -> Self {
        ExplicitFlag::Bool(value)
    }
}

impl fmt::Display for ExplicitFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplicitFlag::Bool(value) => write!(f, "{value}"),
            ExplicitFlag::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u32),
    Text(String),
}

/// Accept `itunes:season` as a JSON number or a numeric string
pub(crate) fn deserialize_season<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(season)) => Ok(Some(season)),
        Some(NumberOrText::Text(text)) => text.trim().parse().map(Some).map_err(|_| {
            serde::de::Error::custom(format!("invalid season '{text}', expected a number"))
        }),
    }
}
