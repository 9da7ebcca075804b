// model = "claude-opus-4-5"
// created = 2026-02-03
// modified = 2026-02-04
// driver = "Isaac Clayton"

//! The scanning placement rules: YjsActual and YjsMod.
//!
//! Both walk rightward from the new item's left origin, deciding at each
//! occupied slot whether to commit the current destination, keep
//! walking, or enter a "scanning" state where the destination is pinned
//! while the walk looks ahead for a decisive slot. The scan always
//! terminates at the right origin or the end of the document.
//!
//! The two rules differ in one place: YjsActual breaks agent ties before
//! looking at the competitor's right origin, YjsMod compares right
//! origins first and only falls back to the agent order when they match.
//! That reordering is what lets YjsMod keep concurrent runs of
//! insertions contiguous in cases where YjsActual interleaves them.
//!
//! A third entry point reuses the YjsMod scan with every non-sibling
//! right origin masked to null: a right origin only counts if its
//! referent hangs off the same left origin as its bearer. Placement then
//! depends solely on parent-and-direction information, which is exactly
//! the unified-tree ordering, reached without leaving the scan.

use super::doc::Doc;
use super::doc::Item;
use super::error::Error;
use super::primitives::Id;

/// Resolve the new item's own origins, trying the hinted slot first.
///
/// Returns `(left, right)` as physical indices, with -1 for the start
/// boundary and one past the end for the end boundary.
pub(crate) fn resolve_origins<T>(
    doc: &mut Doc<T>,
    item: &Item<T>,
    idx_hint: Option<usize>,
) -> Result<(isize, usize), Error> {
    let left = match &item.origin_left {
        Some(id) => {
            let hint = idx_hint.and_then(|slot| slot.checked_sub(1));
            doc.find_item_by_id_hinted(id, false, hint)? as isize
        }
        None => -1,
    };
    let right = match &item.origin_right {
        Some(id) => doc.find_item_by_id_hinted(id, false, idx_hint)?,
        None => doc.content.len(),
    };
    return Ok((left, right));
}

/// An item's right-origin index with non-siblings masked to the end
/// boundary: the reference only counts when its referent shares the
/// bearer's left origin.
fn sibling_right_idx<T>(
    doc: &Doc<T>,
    origin_left: &Option<Id>,
    origin_right: &Option<Id>,
) -> Result<usize, Error> {
    if let Some(id) = origin_right {
        let idx = doc.find_item_by_id(id, false)?;
        if doc.content[idx].origin_left == *origin_left {
            return Ok(idx);
        }
    }
    return Ok(doc.content.len());
}

/// YjsActual: the scan as yjs ships it.
pub(crate) fn integrate_yjs<T>(
    doc: &mut Doc<T>,
    item: Item<T>,
    idx_hint: Option<usize>,
) -> Result<(), Error> {
    doc.check_seq(&item)?;
    let (left, right) = resolve_origins(doc, &item, idx_hint)?;

    let mut dest = (left + 1) as usize;
    let mut scanning = false;
    let mut i = dest;
    loop {
        if !scanning {
            dest = i;
        }
        if i == doc.content.len() || i == right {
            break;
        }
        let other = &doc.content[i];
        let o_left = doc.left_origin_idx(&other.origin_left)?;

        if o_left < left {
            break;
        } else if o_left == left {
            if item.id.agent > other.id.agent {
                scanning = false;
            } else if doc.right_origin_idx(&other.origin_right)? == right {
                break;
            } else {
                scanning = true;
            }
        }
        i += 1;
    }

    doc.splice_in(dest, item);
    return Ok(());
}

/// YjsMod: right origins consulted before the agent tiebreak.
pub(crate) fn integrate_yjs_mod<T>(
    doc: &mut Doc<T>,
    item: Item<T>,
    idx_hint: Option<usize>,
) -> Result<(), Error> {
    return integrate_revised_scan(doc, item, idx_hint, false);
}

/// The YjsMod scan over sibling-only right origins.
pub(crate) fn integrate_sibling_masked<T>(
    doc: &mut Doc<T>,
    item: Item<T>,
    idx_hint: Option<usize>,
) -> Result<(), Error> {
    return integrate_revised_scan(doc, item, idx_hint, true);
}

fn integrate_revised_scan<T>(
    doc: &mut Doc<T>,
    item: Item<T>,
    idx_hint: Option<usize>,
    mask_non_siblings: bool,
) -> Result<(), Error> {
    doc.check_seq(&item)?;
    let (left, mut right) = resolve_origins(doc, &item, idx_hint)?;
    if mask_non_siblings
        && right < doc.content.len()
        && doc.content[right].origin_left != item.origin_left
    {
        right = doc.content.len();
    }

    let mut dest = (left + 1) as usize;
    let mut scanning = false;
    let mut i = dest;
    loop {
        if !scanning {
            dest = i;
        }
        if i == doc.content.len() || i == right {
            break;
        }
        let other = &doc.content[i];
        let o_left = doc.left_origin_idx(&other.origin_left)?;

        if o_left < left {
            break;
        } else if o_left == left {
            let o_right = match mask_non_siblings {
                true => sibling_right_idx(doc, &other.origin_left, &other.origin_right)?,
                false => doc.right_origin_idx(&other.origin_right)?,
            };
            if o_right < right {
                scanning = true;
            } else if o_right == right {
                if item.id.agent < other.id.agent {
                    break;
                }
                scanning = false;
            } else {
                scanning = false;
            }
        }
        i += 1;
    }

    doc.splice_in(dest, item);
    return Ok(());
}
