//! Person name heuristic.
//!
//! - `"Bach, Johann Sebastian"` → given `Johann Sebastian`, family `Bach`
//! - `"Ludwig van Beethoven"` → given `Ludwig`, family `van Beethoven`
//! - `"Sting"` → given empty, family `Sting`
//!
//! A single bare token is a family name, never a given name. Existing
//! records in the remote store were created with this rule, so changing it
//! would stop them from matching.

use crate::models::PersonName;

/// Parse a raw name. Returns `None` for blank input.
pub fn parse_person_name(raw: &str) -> Option<PersonName> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some((family, given)) = raw.split_once(',') {
        // Only the first segment after the comma counts.
        let given = given.split(',').next().unwrap_or("");
        return Some(PersonName::new(given.trim(), family.trim()));
    }

    let mut tokens = raw.split_whitespace();
    let first = tokens.next()?;
    let rest: Vec<&str> = tokens.collect();
    if rest.is_empty() {
        Some(PersonName::new("", first))
    } else {
        Some(PersonName::new(first, rest.join(" ")))
    }
}
