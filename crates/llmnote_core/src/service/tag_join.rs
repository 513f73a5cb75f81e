//! In-memory join of notes against the `note_tags` junction.
//!
//! # Responsibility
//! - Attach each note's tag set, resolved against the tag catalog.
//!
//! # Invariants
//! - Junction rows are indexed once; the join is linear in notes plus rows.
//! - Output tags follow catalog order, which is name order.
//! - Duplicate junction rows never duplicate a tag.
//! - Rows pointing at a tag id missing from the catalog are skipped.

use crate::model::catalog::{NoteTag, Tag, TagId};
use crate::model::note::{NoteId, NoteWithRefs, TaggedNote};
use log::debug;
use std::collections::{BTreeSet, HashMap};

/// Attaches tags to every note. Untagged notes get an empty list.
pub fn attach_tags(
    notes: Vec<NoteWithRefs>,
    note_tags: &[NoteTag],
    catalog: &[Tag],
) -> Vec<TaggedNote> {
    let catalog_positions: HashMap<TagId, usize> = catalog
        .iter()
        .enumerate()
        .map(|(position, tag)| (tag.id, position))
        .collect();

    // Catalog positions rather than ids, so iterating the set yields name order.
    let mut positions_by_note: HashMap<NoteId, BTreeSet<usize>> = HashMap::new();
    let mut dangling_links = 0usize;
    for link in note_tags {
        match catalog_positions.get(&link.tag_id) {
            Some(&position) => {
                positions_by_note
                    .entry(link.note_id)
                    .or_default()
                    .insert(position);
            }
            None => dangling_links += 1,
        }
    }

    if dangling_links > 0 {
        debug!(
            "event=tag_join module=service status=ok dangling_links={} links={}",
            dangling_links,
            note_tags.len()
        );
    }

    notes
        .into_iter()
        .map(|note| {
            let tags = positions_by_note
                .get(&note.id())
                .map(|positions| {
                    positions
                        .iter()
                        .map(|&position| catalog[position].clone())
                        .collect()
                })
                .unwrap_or_default();
            TaggedNote { note, tags }
        })
        .collect()
}
