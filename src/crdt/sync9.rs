// model = "claude-opus-4-5"
// created = 2026-02-03
// modified = 2026-02-04
// driver = "Isaac Clayton"

//! The Sync9 placement rule: a tree of splittable spans.
//!
//! Every item attaches to its `origin_left` span, either at its end
//! (`insert_after`) or at its start. Start attachment may require a
//! *split*: if the span still carries its content at the attachment
//! point, a content-less copy is spliced in directly before it and
//! becomes the span's left sentinel. Both halves share one id (lookups
//! with `at_end` resolve to the content-bearing half, lookups without it
//! to the sentinel), so children slot in between and the flat array
//! remains a preorder walk of the tree.
//!
//! Sentinels are structural, not garbage: they are what later start
//! attachments anchor to, and the visible extraction simply filters them
//! out. They are never transmitted; the merge driver ships only
//! content-bearing items and splits re-materialise on the destination as
//! children arrive.
//!
//! Siblings on the same attachment point order by ascending agent, and a
//! child's subtree sits contiguously behind it, mirroring the scan
//! structure of the counter-ordered rule next door.

use super::doc::Doc;
use super::doc::Item;
use super::error::Error;
use super::primitives::Id;

pub(crate) fn integrate<T>(
    doc: &mut Doc<T>,
    item: Item<T>,
    idx_hint: Option<usize>,
) -> Result<(), Error> {
    doc.check_seq(&item)?;
    let parent = match &item.origin_left {
        Some(id) => {
            // A hint can only vouch for the content-bearing half of a
            // span, which is unique per id. Start attachments resolve to
            // the leftmost (sentinel) half, so they take the full scan.
            let hint = match item.insert_after {
                true => idx_hint.and_then(|slot| slot.checked_sub(1)),
                false => None,
            };
            doc.find_item_by_id_hinted(id, item.insert_after, hint)? as isize
        }
        None => -1,
    };

    if !item.insert_after && parent >= 0 && doc.content[parent as usize].content.is_some() {
        // First start-attachment on an unsplit span: peel off a
        // content-less sentinel so the child can sit inside the span.
        let original = &doc.content[parent as usize];
        let sentinel = Item {
            id: original.id.clone(),
            content: None,
            origin_left: original.origin_left.clone(),
            origin_right: original.origin_right.clone(),
            is_deleted: original.is_deleted,
            seq: original.seq,
            insert_after: original.insert_after,
            left_depth: 0,
            right_parent: None,
            right_depth: 0,
            parent: None,
            parent_is_left: true,
            depth: 0,
        };
        doc.content.insert(parent as usize, sentinel);
    }

    let mut dest = (parent + 1) as usize;
    while dest < doc.content.len() {
        let other = &doc.content[dest];
        let o_parent = match &other.origin_left {
            Some(id) => doc.find_item_by_id(id, other.insert_after)? as isize,
            None => -1,
        };
        if o_parent < parent {
            break;
        }
        if o_parent == parent && item.id.agent < other.id.agent {
            break;
        }
        dest += 1;
    }

    doc.splice_in(dest, item);
    return Ok(());
}

/// Local insertion: derive the attachment point from a visible position.
///
/// The position finder sticks to the first slot after the preceding
/// visible item, so the physical neighborhood may open with tombstoned
/// subtrees or span sentinels. The new item normally attaches *before*
/// the next content-bearing item (splitting its span on integration if
/// needed): that keeps a later insertion at the same visible position to
/// the left of an earlier one, and keeps it from leapfrogging deleted
/// subtrees that still order before the next visible character. The
/// exception is a span that opened further left than the slot, whose
/// start-children land in front of the whole neighborhood; in that
/// case the item hangs off the end of the preceding visible item
/// instead, as it also does at the very end of the document.
pub(crate) fn local_insert<T>(
    doc: &mut Doc<T>,
    agent: &str,
    pos: usize,
    content: T,
) -> Result<(), Error> {
    let slot = doc.find_item_at_pos(pos, true)?;

    let (origin_left, insert_after, idx_hint) = if doc.content.is_empty() {
        (None, true, None)
    } else if slot == doc.content.len() {
        // The final item always carries content: a sentinel's content
        // half lies to its right, so a sentinel can never be last.
        (Some(doc.content[slot - 1].id.clone()), true, Some(slot))
    } else {
        let mut target = slot;
        while doc.content[target].content.is_none() {
            target += 1;
        }
        let span_start = doc.find_item_by_id(&doc.content[target].id, false)?;
        if span_start >= slot {
            (Some(doc.content[target].id.clone()), false, None)
        } else {
            (Some(doc.content[slot - 1].id.clone()), true, Some(slot))
        }
    };

    let id = Id::new(agent, doc.version.next_seq(agent));
    let item = Item::new(id, Some(content), origin_left, None)
        .with_seq(doc.max_seq + 1)
        .with_insert_after(insert_after);
    return integrate(doc, item, idx_hint);
}
