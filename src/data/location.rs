// location.rs - Location hierarchy strings ("continent/country/state/city/district")

use crate::data::sequences::SequenceSet;
use log::{debug, warn};
use serde::Serialize;

pub const LOCATION_DEPTH: usize = 5;
pub const LOCATION_PAD: &str = "*";

/// Parsed location with one entry per hierarchy level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub levels: Vec<String>,
}

impl Location {
    /// Every level set to the pad value
    pub fn unknown(depth: usize) -> Self {
        Location {
            levels: vec![LOCATION_PAD.to_string(); depth],
        }
    }

    pub fn continent(&self) -> &str {
        self.level(0)
    }

    pub fn country(&self) -> &str {
        self.level(1)
    }

    pub fn state(&self) -> &str {
        self.level(2)
    }

    pub fn city(&self) -> &str {
        self.level(3)
    }

    pub fn district(&self) -> &str {
        self.level(4)
    }

    fn level(&self, i: usize) -> &str {
        self.levels.get(i).map(String::as_str).unwrap_or(LOCATION_PAD)
    }

    /// Levels rejoined with `/`, padding included
    pub fn normalized(&self) -> String {
        self.levels.join("/")
    }
}

/// Split on `/`, trim each level, pad with `*` up to `depth` levels.
/// Levels past `depth` are kept.
pub fn split_location(location: &str, depth: usize) -> Location {
    let mut levels: Vec<String> = location.split('/').map(|l| l.trim().to_string()).collect();
    while levels.len() < depth {
        levels.push(LOCATION_PAD.to_string());
    }
    Location { levels }
}

/// A record id with the location parsed from one of its header fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationRow {
    pub id: String,
    /// Field with each level trimmed and rejoined, without padding
    pub location: String,
    pub parsed: Location,
}

/// Parse header field `field` of every record in set order.
/// A record without that field gets location `*` and an all-`*` hierarchy.
pub fn location_table(set: &SequenceSet, field: usize) -> Vec<LocationRow> {
    let mut missing = 0;
    let mut rows = Vec::with_capacity(set.len());
    for record in set.records() {
        let row = match record.fields.get(field) {
            Some(raw) => {
                let parsed = split_location(raw, LOCATION_DEPTH);
                let location = raw
                    .split('/')
                    .map(str::trim)
                    .collect::<Vec<_>>()
                    .join("/");
                LocationRow {
                    id: record.id.clone(),
                    location,
                    parsed,
                }
            }
            None => {
                debug!("'{}' has no header field {}", record.id, field);
                missing += 1;
                LocationRow {
                    id: record.id.clone(),
                    location: LOCATION_PAD.to_string(),
                    parsed: Location::unknown(LOCATION_DEPTH),
                }
            }
        };
        rows.push(row);
    }
    if missing > 0 {
        warn!(
            "{} of {} records have no header field {}; location set to '{}'",
            missing,
            set.len(),
            field,
            LOCATION_PAD
        );
    }
    rows
}
