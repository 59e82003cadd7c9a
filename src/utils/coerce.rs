//! Loose-value coercion
//!
//! Scanner output and hand-written configuration both spell booleans as
//! strings. Every conversion goes through [`parse_flag`] so the accepted
//! spellings live in one place.

use serde::{Deserialize, Deserializer};

/// Interpret a textual flag.
///
/// Accepts `true/false`, `yes/no`, `on/off` and `1/0` in any case, with
/// surrounding whitespace ignored. Anything else yields `None`.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" | "" => Some(false),
        _ => None,
    }
}

/// Like [`parse_flag`] but unrecognised text counts as false.
pub fn flag_or_false(value: &str) -> bool {
    parse_flag(value).unwrap_or(false)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseBool {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Serde helper for configuration booleans written as `true` or `"true"`.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match LooseBool::deserialize(deserializer)? {
        LooseBool::Bool(b) => Ok(b),
        LooseBool::Int(i) => Ok(i != 0),
        LooseBool::Text(s) => parse_flag(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("expected a boolean flag, found {:?}", s))
        }),
    }
}
