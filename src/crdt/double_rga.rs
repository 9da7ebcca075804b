// model = "claude-opus-4-5"
// created = 2026-02-04
// modified = 2026-02-04
// driver = "Isaac Clayton"

//! The DoubleRGA placement rules: tree comparators over cached links.
//!
//! Both variants treat the document as a tree hung off the origins and
//! order items by walking that tree, rather than by scanning with a
//! state flag. Each stored item caches the links and depths the walks
//! need; the caches are recomputed at integration time from the origins,
//! so they carry no information of their own.
//!
//! The *paired-trees* form keeps two trees. The primary tree hangs every
//! item off its left origin; depth-equalising walks decide
//! ancestor/descendant (a descendant through left links comes after its
//! ancestor) and reduce any two items to siblings under a common left
//! parent. Siblings are then ordered by a secondary tree built from
//! right origins, restricted to references between left-siblings: there,
//! deeper means "placed before" (the sense reverses, because naming a
//! right origin puts you in front of it) and unrelated nodes fall back
//! to the agent order.
//!
//! The *unified-tree* form collapses both into one parent pointer plus a
//! direction bit. An item's parent defaults to its left origin, but when
//! the right origin hangs off the same left origin the item becomes a
//! right-side child of it instead. One comparator then handles
//! everything: descendants through a left link sort after the shallower
//! item, descendants through a right link before it, right-side children
//! sort before left-side children of the same parent, and same-side
//! siblings order by agent.
//!
//! Items are kept sorted under the active comparator at all times, so
//! placement is just "insert before the first greater occupant" within
//! the origin window. The paired-trees form exploits the sortedness
//! with a binary scan; the unified form keeps the linear walk for easy
//! comparison with the scanning rules.
//!
//! Parent links are stored as ids and resolved through the store on each
//! step. Physical indices will not do as handles: every splice shifts
//! the tail of the array, while ids stay put.

use std::cmp::Ordering;

use super::doc::Doc;
use super::doc::Item;
use super::error::Error;
use super::primitives::Id;
use super::yjs::resolve_origins;

fn linked_item<'a, T>(doc: &'a Doc<T>, id: &Id) -> &'a Item<T> {
    let idx = doc
        .find_item_by_id(id, false)
        .expect("cached tree link names an integrated item");
    return &doc.content[idx];
}

fn left_parent<'a, T>(doc: &'a Doc<T>, item: &Item<T>) -> &'a Item<T> {
    let id = item
        .origin_left
        .as_ref()
        .expect("walked past the left-tree root");
    return linked_item(doc, id);
}

fn right_parent<'a, T>(doc: &'a Doc<T>, item: &Item<T>) -> &'a Item<T> {
    let id = item
        .right_parent
        .as_ref()
        .expect("walked past the right-tree root");
    return linked_item(doc, id);
}

fn unified_parent<'a, T>(doc: &'a Doc<T>, item: &Item<T>) -> &'a Item<T> {
    let id = item
        .parent
        .as_ref()
        .expect("walked past the unified-tree root");
    return linked_item(doc, id);
}

/// Total order of the paired-trees form.
///
/// Walk the left tree to equal depth; a node that lands on the other is
/// its descendant through left links and sorts after it. Otherwise walk
/// both up in lockstep to siblings under a common left parent and defer
/// to the right-sibling order.
fn cmp_paired<'a, T>(doc: &'a Doc<T>, mut a: &'a Item<T>, mut b: &'a Item<T>) -> Ordering {
    if a.left_depth > b.left_depth {
        for _ in 0..(a.left_depth - b.left_depth) {
            a = left_parent(doc, a);
        }
        if a.id == b.id {
            return Ordering::Greater;
        }
    } else if b.left_depth > a.left_depth {
        for _ in 0..(b.left_depth - a.left_depth) {
            b = left_parent(doc, b);
        }
        if a.id == b.id {
            return Ordering::Less;
        }
    }
    while a.origin_left != b.origin_left {
        a = left_parent(doc, a);
        b = left_parent(doc, b);
    }
    return cmp_right_siblings(doc, a, b);
}

/// Secondary order between left-siblings, over the right-origin tree.
///
/// Deeper-right sorts *first*: an item whose right-origin chain reaches
/// another was placed in front of it. Unrelated nodes order by agent.
fn cmp_right_siblings<'a, T>(doc: &'a Doc<T>, mut a: &'a Item<T>, mut b: &'a Item<T>) -> Ordering {
    if a.right_depth > b.right_depth {
        for _ in 0..(a.right_depth - b.right_depth) {
            a = right_parent(doc, a);
        }
        if a.id == b.id {
            return Ordering::Less;
        }
    } else if b.right_depth > a.right_depth {
        for _ in 0..(b.right_depth - a.right_depth) {
            b = right_parent(doc, b);
        }
        if a.id == b.id {
            return Ordering::Greater;
        }
    }
    while a.right_parent != b.right_parent {
        a = right_parent(doc, a);
        b = right_parent(doc, b);
    }
    return match a.id.agent.cmp(&b.id.agent) {
        Ordering::Equal => b.id.seq.cmp(&a.id.seq),
        ordering => ordering,
    };
}

/// Total order of the unified-tree form.
fn cmp_unified<'a, T>(doc: &'a Doc<T>, mut a: &'a Item<T>, mut b: &'a Item<T>) -> Ordering {
    if a.depth > b.depth {
        let mut last_step_left = true;
        for _ in 0..(a.depth - b.depth) {
            last_step_left = a.parent_is_left;
            a = unified_parent(doc, a);
        }
        if a.id == b.id {
            // a descends from b: after it through a left link, before it
            // through a right link.
            return match last_step_left {
                true => Ordering::Greater,
                false => Ordering::Less,
            };
        }
    } else if b.depth > a.depth {
        let mut last_step_left = true;
        for _ in 0..(b.depth - a.depth) {
            last_step_left = b.parent_is_left;
            b = unified_parent(doc, b);
        }
        if a.id == b.id {
            return match last_step_left {
                true => Ordering::Less,
                false => Ordering::Greater,
            };
        }
    }
    while a.parent != b.parent {
        a = unified_parent(doc, a);
        b = unified_parent(doc, b);
    }
    return match (a.parent_is_left, b.parent_is_left) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        _ => match a.id.agent.cmp(&b.id.agent) {
            Ordering::Equal => b.id.seq.cmp(&a.id.seq),
            ordering => ordering,
        },
    };
}

pub(crate) fn integrate_paired_trees<T>(
    doc: &mut Doc<T>,
    mut item: Item<T>,
    idx_hint: Option<usize>,
) -> Result<(), Error> {
    doc.check_seq(&item)?;
    let (left, right) = resolve_origins(doc, &item, idx_hint)?;

    item.left_depth = match left {
        -1 => 0,
        _ => doc.content[left as usize].left_depth + 1,
    };
    item.right_parent = None;
    item.right_depth = 0;
    if let Some(id) = &item.origin_right {
        // The secondary tree only links left-siblings.
        let referent = &doc.content[right];
        if referent.origin_left == item.origin_left {
            item.right_depth = referent.right_depth + 1;
            item.right_parent = Some(id.clone());
        }
    }

    let lo = (left + 1) as usize;
    let dest = {
        let snapshot: &Doc<T> = doc;
        let window = &snapshot.content[lo..right];
        lo + window.partition_point(|other| cmp_paired(snapshot, other, &item) != Ordering::Greater)
    };
    doc.splice_in(dest, item);
    return Ok(());
}

pub(crate) fn integrate_unified_tree<T>(
    doc: &mut Doc<T>,
    mut item: Item<T>,
    idx_hint: Option<usize>,
) -> Result<(), Error> {
    doc.check_seq(&item)?;
    let (left, right) = resolve_origins(doc, &item, idx_hint)?;

    item.parent = None;
    item.parent_is_left = true;
    item.depth = 0;
    let right_is_sibling = match &item.origin_right {
        Some(_) => doc.content[right].origin_left == item.origin_left,
        None => false,
    };
    if right_is_sibling {
        // The right origin hangs off our own left origin, so it sits
        // between us and the left origin: adopt it as a right-side
        // parent.
        item.parent = item.origin_right.clone();
        item.parent_is_left = false;
        item.depth = doc.content[right].depth + 1;
    } else if let Some(id) = &item.origin_left {
        item.parent = Some(id.clone());
        item.depth = doc.content[left as usize].depth + 1;
    }

    let lo = (left + 1) as usize;
    let mut dest = right;
    for i in lo..right {
        if cmp_unified(&*doc, &doc.content[i], &item) == Ordering::Greater {
            dest = i;
            break;
        }
    }
    doc.splice_in(dest, item);
    return Ok(());
}
