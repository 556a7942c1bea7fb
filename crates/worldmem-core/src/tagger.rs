//! World tagging.
//!
//! The engine consumes a flat text stream and has no native multi-tenancy,
//! so every fact and every query is prefixed with a canonical world marker
//! (`[WORLD:<world_id>] `) before it reaches the engine, and the marker is
//! stripped from results on the way back out.
//!
//! Tagging is applied exactly once, at the service entry points; it is not
//! idempotent-safe against double application.

use crate::error::{Error, Result};

/// Maximum accepted world_id length.
const MAX_WORLD_ID_LEN: usize = 128;

/// The canonical marker for a world_id, including the trailing space.
pub fn world_marker(world_id: &str) -> String {
    format!("[WORLD:{world_id}] ")
}

/// Prefix `text` with the canonical marker for `world_id`.
///
/// Pure text transform; the caller is responsible for passing a validated
/// world_id and untagged text.
pub fn tag(text: &str, world_id: &str) -> String {
    format!("[WORLD:{world_id}] {text}")
}

/// Strip one leading occurrence of the world marker, if present.
///
/// Engine results are not guaranteed to carry the marker verbatim, so a
/// missing marker is not an error; the input is returned unchanged.
pub fn untag<'a>(text: &'a str, world_id: &str) -> &'a str {
    let marker = world_marker(world_id);
    text.strip_prefix(marker.as_str()).unwrap_or(text)
}

/// Validate a world identifier.
///
/// World_ids containing the marker delimiters would make untagging
/// ambiguous, so they are rejected here instead of quoted.
pub fn validate_world_id(world_id: &str) -> Result<()> {
    if world_id.is_empty() {
        return Err(Error::validation("world_id must not be empty"));
    }
    if world_id.len() > MAX_WORLD_ID_LEN {
        return Err(Error::validation(format!(
            "world_id must be {MAX_WORLD_ID_LEN} characters or less"
        )));
    }
    if world_id.contains(['[', ']']) {
        return Err(Error::validation(
            "world_id must not contain '[' or ']'",
        ));
    }
    Ok(())
}

/// Validate a single fact string.
pub fn validate_fact(fact: &str) -> Result<()> {
    if fact.trim().is_empty() {
        return Err(Error::validation("facts must be non-empty strings"));
    }
    Ok(())
}

/// Validate a recall query string.
pub fn validate_query(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(Error::validation("query must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_prepends_marker() {
        assert_eq!(
            tag("diamonds at (-120, 12, 340)", "survival_world_001"),
            "[WORLD:survival_world_001] diamonds at (-120, 12, 340)"
        );
    }

    #[test]
    fn test_untag_round_trip() {
        let worlds = ["w1", "survival_world_001", "a b", "nether.7"];
        let facts = ["found iron", "died near the village", "[not a marker]"];

        for world in worlds {
            for fact in facts {
                assert_eq!(untag(&tag(fact, world), world), fact);
            }
        }
    }

    #[test]
    fn test_untag_without_marker_is_identity() {
        assert_eq!(untag("plain text", "w1"), "plain text");
    }

    #[test]
    fn test_untag_other_world_marker_untouched() {
        let tagged = tag("fact", "w1");
        assert_eq!(untag(&tagged, "w2"), tagged);
    }

    #[test]
    fn test_untag_strips_single_leading_occurrence() {
        let doubled = tag(&tag("fact", "w1"), "w1");
        assert_eq!(untag(&doubled, "w1"), tag("fact", "w1"));
    }

    #[test]
    fn test_validate_world_id_valid() {
        assert!(validate_world_id("survival_world_001").is_ok());
        assert!(validate_world_id("w1").is_ok());
        assert!(validate_world_id("the overworld").is_ok());
    }

    #[test]
    fn test_validate_world_id_invalid() {
        assert!(validate_world_id("").is_err());
        assert!(validate_world_id("bad[world").is_err());
        assert!(validate_world_id("bad]world").is_err());
        assert!(validate_world_id("[WORLD:x]").is_err());
        assert!(validate_world_id(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_fact() {
        assert!(validate_fact("iron ore is common at Y-level 16").is_ok());
        assert!(validate_fact("").is_err());
        assert!(validate_fact("   ").is_err());
    }

    #[test]
    fn test_validate_query() {
        assert!(validate_query("where are diamonds?").is_ok());
        assert!(validate_query("").is_err());
    }
}
