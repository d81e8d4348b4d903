//! # Habit Reconciler
//!
//! Matches spoken habit mentions against the user's stored habits. Matching is
//! a deliberately loose, case-insensitive substring test in either direction
//! ("water" matches "Drink water", "morning meditation" matches "Meditation").

use crate::types::{HabitCatalogEntry, HabitId, ParsedHabitMention};
use std::collections::HashSet;
use tracing::debug;

/// Whether a mention and a catalog name match in either direction, ignoring case.
pub fn habit_names_match(mention: &str, catalog_name: &str) -> bool {
    let mention = mention.trim().to_lowercase();
    let catalog_name = catalog_name.trim().to_lowercase();
    if mention.is_empty() || catalog_name.is_empty() {
        return false;
    }
    catalog_name.contains(&mention) || mention.contains(&catalog_name)
}

/// Resolves completed mentions to catalog ids.
///
/// Only mentions with `completed == true` are considered, and only active
/// catalog entries can match. Each mention takes the first matching entry in
/// catalog order; unmatched mentions are dropped. The result holds each id at
/// most once, in first-match order.
pub fn reconcile_habits(
    parsed: &[ParsedHabitMention],
    catalog: &[HabitCatalogEntry],
) -> Vec<HabitId> {
    let mut seen = HashSet::new();
    let mut matched = Vec::new();

    for mention in parsed.iter().filter(|m| m.completed) {
        let Some(entry) = catalog
            .iter()
            .filter(|entry| entry.active)
            .find(|entry| habit_names_match(&mention.name, &entry.name))
        else {
            debug!(mention = %mention.name, "No catalog habit matches mention");
            continue;
        };

        if seen.insert(entry.id.as_str()) {
            matched.push(entry.id.clone());
        }
    }

    matched
}
