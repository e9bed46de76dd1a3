use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Result, TerralignError};

/// Geographic bounding box in degrees.
///
/// Callers are responsible for `north > south` and `east > west`; the
/// bounds are not validated here.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct AreaOfInterest {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl FromStr for AreaOfInterest {
    type Err = TerralignError;

    /// Parse the flattened form, e.g.
    /// `"north=37.85;south=37.75;east=-122.35;west=-122.45"`.
    ///
    /// Keys may appear in any order; whitespace around keys, values and
    /// separators is ignored. Every bound must appear exactly once.
    fn from_str(s: &str) -> Result<Self> {
        let mut north = None;
        let mut south = None;
        let mut east = None;
        let mut west = None;

        for part in s.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (key, value) = part.split_once('=').ok_or_else(|| {
                TerralignError::InvalidAoi(format!("expected key=value, got {part:?}"))
            })?;
            let key = key.trim();
            let value: f64 = value.trim().parse().map_err(|_| {
                TerralignError::InvalidAoi(format!("invalid value for {key:?}: {value:?}"))
            })?;

            let slot = match key {
                "north" => &mut north,
                "south" => &mut south,
                "east" => &mut east,
                "west" => &mut west,
                other => {
                    return Err(TerralignError::InvalidAoi(format!(
                        "unknown bound {other:?}"
                    )))
                }
            };
            if slot.replace(value).is_some() {
                return Err(TerralignError::InvalidAoi(format!(
                    "duplicate bound {key:?}"
                )));
            }
        }

        Ok(Self {
            north: north.ok_or_else(|| missing_bound("north"))?,
            south: south.ok_or_else(|| missing_bound("south"))?,
            east: east.ok_or_else(|| missing_bound("east"))?,
            west: west.ok_or_else(|| missing_bound("west"))?,
        })
    }
}

fn missing_bound(key: &str) -> TerralignError {
    TerralignError::InvalidAoi(format!("missing bound {key:?}"))
}
