//! Extraction of points and dimensions from raw server replies.
//!
//! A reply to `data get entity <player> Pos` looks like
//! `CleMooling has the following entity data: [-524.5d, 71.0d, -66.5d]`, and a reply to
//! `data get entity <player> Dimension` like
//! `CleMooling has the following entity data: "minecraft:overworld"`.
//!
//! Both extractors return `None` ("no data") when the reply is not usable but is not
//! malformed either, e.g. when it is about another player.

use crate::{
    errors::{ExtractionError, ExtractionResult},
    geometry::Point3D,
};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Reply sent by the server when the requested entity does not exist.
pub const NOT_FOUND_MARKER: &str = "No entity was found";

/// Three comma separated, optionally signed decimal numbers inside brackets, each with an
/// optional exponent and an optional `d` (double) suffix.
pub const DEFAULT_POINT_PATTERN: &str = r"\[\s*([-+]?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?)d?\s*,\s*([-+]?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?)d?\s*,\s*([-+]?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?)d?\s*\]";

/// A `minecraft:` namespaced identifier. The first group is the name without its namespace.
pub const DEFAULT_DIMENSION_PATTERN: &str = r"minecraft:(\w+)";

static DEFAULT_POINT_REGEX: OnceLock<Regex> = OnceLock::new();
static DEFAULT_DIMENSION_REGEX: OnceLock<Regex> = OnceLock::new();

#[must_use]
pub fn default_point_regex() -> &'static Regex {
    DEFAULT_POINT_REGEX.get_or_init(|| Regex::new(DEFAULT_POINT_PATTERN).unwrap())
}

#[must_use]
pub fn default_dimension_regex() -> &'static Regex {
    DEFAULT_DIMENSION_REGEX.get_or_init(|| Regex::new(DEFAULT_DIMENSION_PATTERN).unwrap())
}

/// Extract a point from a position reply, using `pattern` or [`DEFAULT_POINT_PATTERN`].
///
/// Returns `Ok(None)` if the entity was not found, or if `expected_player` is given and the
/// reply does not mention it. Fails if no point can be located or the matched values
/// aren't numbers. The first match in the reply wins.
pub fn extract_point(
    text: &str,
    expected_player: Option<&str>,
    pattern: Option<&Regex>,
) -> ExtractionResult<Option<Point3D>> {
    ReplyParser::extract_point_with(text, expected_player, pattern, NOT_FOUND_MARKER)
}

/// Extract a dimension name from a dimension reply, using `pattern` or
/// [`DEFAULT_DIMENSION_PATTERN`].
///
/// Unlike [`extract_point`], a reply without any dimension is "no data" rather than an
/// error.
#[must_use]
pub fn extract_dimension(
    text: &str,
    expected_player: Option<&str>,
    pattern: Option<&Regex>,
) -> Option<String> {
    if expected_player.is_some_and(|player| !text.contains(player)) {
        trace!("Dimension reply is not about {expected_player:?}");
        return None;
    }

    let pattern = pattern.unwrap_or_else(|| default_dimension_regex());
    let captures = pattern.captures(text)?;

    // Without a capture group, the whole match is the identifier.
    captures
        .get(1)
        .or_else(|| captures.get(0))
        .map(|m| m.as_str().to_owned())
}

/// Reply extraction with a fixed set of patterns, for servers that format their replies
/// differently.
#[derive(Debug, Clone)]
pub struct ReplyParser {
    point_pattern: Regex,
    dimension_pattern: Regex,
    not_found_marker: String,
}

impl Default for ReplyParser {
    fn default() -> Self {
        Self {
            point_pattern: default_point_regex().clone(),
            dimension_pattern: default_dimension_regex().clone(),
            not_found_marker: NOT_FOUND_MARKER.to_owned(),
        }
    }
}

impl ReplyParser {
    #[must_use]
    pub fn new(point_pattern: Regex, dimension_pattern: Regex, not_found_marker: String) -> Self {
        Self {
            point_pattern,
            dimension_pattern,
            not_found_marker,
        }
    }

    #[must_use]
    pub const fn point_pattern(&self) -> &Regex {
        &self.point_pattern
    }

    #[must_use]
    pub const fn dimension_pattern(&self) -> &Regex {
        &self.dimension_pattern
    }

    pub fn extract_point(
        &self,
        text: &str,
        expected_player: Option<&str>,
    ) -> ExtractionResult<Option<Point3D>> {
        Self::extract_point_with(
            text,
            expected_player,
            Some(&self.point_pattern),
            &self.not_found_marker,
        )
    }

    #[must_use]
    pub fn extract_dimension(&self, text: &str, expected_player: Option<&str>) -> Option<String> {
        extract_dimension(text, expected_player, Some(&self.dimension_pattern))
    }

    fn extract_point_with(
        text: &str,
        expected_player: Option<&str>,
        pattern: Option<&Regex>,
        not_found_marker: &str,
    ) -> ExtractionResult<Option<Point3D>> {
        if text.contains(not_found_marker) {
            debug!("Server reported that the entity was not found");
            return Ok(None);
        }

        let pattern = pattern.unwrap_or_else(|| default_point_regex());
        let captures = pattern
            .captures(text)
            .ok_or_else(|| ExtractionError::PointNotFound {
                text: text.to_owned(),
            })?;

        let groups: Vec<&str> = (1..=3)
            .map(|i| captures.get(i).map_or("", |m| m.as_str()))
            .collect();

        let parsed = groups
            .iter()
            .map(|group| group.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| ExtractionError::InvalidNumbers {
                groups: groups.iter().map(|g| (*g).to_owned()).collect(),
                source,
            })?;

        if expected_player.is_some_and(|player| !text.contains(player)) {
            trace!("Position reply is not about {expected_player:?}");
            return Ok(None);
        }

        Ok(Some(Point3D::new(parsed[0], parsed[1], parsed[2])))
    }
}
