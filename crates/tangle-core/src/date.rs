//! Date recognition on rehydrate

use crate::error::Error;
use crate::plugin::Plugin;
use chrono::DateTime;
use regex::Regex;
use tangle_graph::{assign, resolve, GraphValue, NodePath};

/// Anchored RFC 3339 shape: date, `T`, time, optional fraction, `Z` or offset
const DATE_PATTERN: &str =
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})$";

/// Turns date-shaped strings back into date values
///
/// Serialization needs no pass of its own — `Date` leaves take their
/// RFC 3339 text form in the encode step. On rehydrate, any string matching
/// the strict pattern is reinterpreted as a date regardless of original
/// intent; that ambiguity is part of the wire format. Strings that match
/// the shape but not the calendar (month 13) are left untouched.
pub struct DatePlugin {
    pattern: Regex,
}

impl DatePlugin {
    /// Create a plugin with the compiled recognition pattern
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(DATE_PATTERN).expect("date pattern is valid"),
        }
    }
}

impl Default for DatePlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for DatePlugin {
    fn map(
        &mut self,
        _input: &GraphValue,
        _output: &GraphValue,
        _path: &NodePath,
    ) -> Result<bool, Error> {
        Ok(false)
    }

    fn unmap(&mut self, doc: &GraphValue, path: &NodePath) -> Result<bool, Error> {
        let node = resolve(doc, path)?;
        let GraphValue::String(text) = &node else {
            return Ok(false);
        };
        if !self.pattern.is_match(text) {
            return Ok(false);
        }
        let Ok(parsed) = DateTime::parse_from_rfc3339(text) else {
            return Ok(false);
        };
        assign(doc, path, GraphValue::Date(parsed))?;
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangle_graph::ROOT_KEY;

    fn unmap_one(value: GraphValue) -> GraphValue {
        let doc = GraphValue::map_of([(ROOT_KEY, value)]);
        let handled = DatePlugin::new()
            .unmap(&doc, &NodePath::from("#"))
            .unwrap();
        assert!(!handled);
        resolve(&doc, &NodePath::from("#")).unwrap()
    }

    #[test]
    fn utc_and_offset_forms_parse() {
        for text in [
            "2020-05-01T12:00:00Z",
            "2020-05-01T12:00:00.250Z",
            "2020-05-01T12:00:00+02:00",
            "2020-05-01T12:00:00.5-07:00",
        ] {
            let restored = unmap_one(text.into());
            let GraphValue::Date(parsed) = restored else {
                panic!("expected '{text}' to become a date");
            };
            assert_eq!(parsed, DateTime::parse_from_rfc3339(text).unwrap());
        }
    }

    #[test]
    fn near_misses_stay_strings() {
        for text in [
            "2020-05-01",
            "2020-05-01 12:00:00Z",
            "2020-05-01T12:00:00",
            "2020-05-01T12:00:00+0200",
            "not a date",
            "x2020-05-01T12:00:00Z",
        ] {
            assert_eq!(unmap_one(text.into()), GraphValue::from(text));
        }
    }

    #[test]
    fn shape_match_with_bad_calendar_stays_a_string() {
        let text = "2020-13-41T25:61:61Z";
        assert_eq!(unmap_one(text.into()), GraphValue::from(text));
    }

    #[test]
    fn non_strings_are_ignored() {
        assert_eq!(unmap_one(42i64.into()), GraphValue::from(42i64));
    }

    #[test]
    fn map_is_a_no_op() {
        let input = GraphValue::map_of([(ROOT_KEY, GraphValue::map())]);
        let output = GraphValue::map();
        let handled = DatePlugin::new()
            .map(&input, &output, &NodePath::from("#"))
            .unwrap();
        assert!(!handled);
        assert_eq!(output, GraphValue::map());
    }
}
