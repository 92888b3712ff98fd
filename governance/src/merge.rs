//! Overlaying an edit proposal onto the document it edits.

use docgov_types::{ContentGroup, ContentGroups};

use crate::labels;

/// Proposal groups that describe the proposal itself and never reach the merged document.
const EXCLUDED_GROUPS: [&str; 3] = [labels::SYSTEM, labels::BALLOT, labels::BALLOT_OPTIONS];

/// `details` items that only make sense on the proposal.
const EXCLUDED_DETAILS: [&str; 3] = [
    labels::ORIGINAL_DOCUMENT,
    labels::BALLOT_TITLE,
    labels::BALLOT_DESCRIPTION,
];

/// The proposal's groups as they should be applied to the original.
fn overlay(proposal: &[ContentGroup]) -> ContentGroups {
    proposal
        .iter()
        .filter(|g| !g.label().is_some_and(|l| EXCLUDED_GROUPS.contains(&l)))
        .map(|g| {
            if g.label() != Some(labels::DETAILS) {
                return g.clone();
            }
            let mut details = g.clone();
            for item in EXCLUDED_DETAILS {
                while details.remove(item).is_some() {}
            }
            details
        })
        .collect()
}

/// Merge `proposal` onto `original` without touching either.
///
/// Groups are matched by label. For a group in both, each proposal item replaces
/// the original's item of the same label in place, or is appended. Original groups
/// the proposal does not mention are kept as they are, and proposal groups the
/// original lacks are appended in proposal order.
pub fn merge_content(original: &[ContentGroup], proposal: &[ContentGroup]) -> ContentGroups {
    let mut merged: ContentGroups = original.to_vec();
    for group in overlay(proposal) {
        let target = group
            .label()
            .and_then(|label| merged.iter_mut().find(|g| g.label() == Some(label)));
        match target {
            Some(existing) => {
                for item in group.items() {
                    existing.insert_or_replace(item.clone());
                }
            }
            None => merged.push(group),
        }
    }
    merged
}
