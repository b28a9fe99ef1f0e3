//! Lenient boolean flags on the wire.
//!
//! The mobile client sends `pinned`/`archived` as `0`/`1`, other callers send
//! JSON booleans. Both decode to `bool`; responses always emit booleans.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(other) => Err(de::Error::custom(format!(
            "expected a boolean or 0/1, got {}",
            other
        ))),
    }
}
