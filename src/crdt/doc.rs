// model = "claude-opus-4-5"
// created = 2026-02-03
// modified = 2026-02-04
// driver = "Isaac Clayton"

//! The shared document store underneath every integration algorithm.
//!
//! A document is an ordered `Vec` of items plus a version vector. Items
//! are tombstone records: deletion flips a flag, nothing is ever removed,
//! so remote operations can always resolve the origins they reference.
//!
//! Items carry dual origins: the ids of the items immediately left and
//! right of the insertion point at creation time. The origins are
//! immutable; they are what lets a remote replica re-derive the intended
//! position no matter how much the document has changed since.
//!
//! Storage is a flat `Vec` of items. This is O(n) for lookups and
//! splices, which is the priority trade-off here: the store exists to
//! make the placement rules easy to read and compare, not to win
//! benchmarks. The one concession to performance is a one-slot hint
//! cache on id lookup. The caller passes the index it most recently
//! touched, and a hit skips the linear scan. Hits and misses are
//! counted so the effect is measurable.

use std::fmt;

use super::error::Error;
use super::primitives::Id;
use super::primitives::Version;
use super::Algorithm;

/// One logical element of the list.
///
/// `content` is `None` for Sync9 span sentinels: structural markers left
/// behind when a splittable span is split to admit a child on its left.
/// They are invisible but load-bearing; both halves of a split span share
/// one id, and lookups distinguish them by whether content is present.
///
/// The trailing cache fields are recomputed during integration by the
/// algorithms that use them; they are derivable from the origins and
/// carry no semantic weight of their own.
#[derive(Clone, Debug, PartialEq)]
pub struct Item<T> {
    /// Unique identifier, assigned by the creating agent.
    pub id: Id,
    /// The payload, or `None` for a span sentinel.
    pub content: Option<T>,
    /// Id of the item immediately left at creation time (`None` = start).
    pub origin_left: Option<Id>,
    /// Id of the item immediately right at creation time (`None` = end).
    pub origin_right: Option<Id>,
    /// Tombstone flag. Flips false -> true at most once.
    pub is_deleted: bool,
    /// Ordering counter: strictly greater than every seq the creating
    /// replica had seen locally. Consulted by the Automerge rule.
    pub seq: u64,
    /// Sync9: whether this insertion attaches to the end of
    /// `origin_left`'s span rather than its start.
    pub insert_after: bool,

    // Cached tree links for the DoubleRGA comparators.
    pub(crate) left_depth: u32,
    pub(crate) right_parent: Option<Id>,
    pub(crate) right_depth: u32,
    pub(crate) parent: Option<Id>,
    pub(crate) parent_is_left: bool,
    pub(crate) depth: u32,
}

impl<T> Item<T> {
    /// Create an item with no ordering counter and start-attachment.
    pub fn new(
        id: Id,
        content: Option<T>,
        origin_left: Option<Id>,
        origin_right: Option<Id>,
    ) -> Item<T> {
        return Item {
            id,
            content,
            origin_left,
            origin_right,
            is_deleted: false,
            seq: 0,
            insert_after: false,
            left_depth: 0,
            right_parent: None,
            right_depth: 0,
            parent: None,
            parent_is_left: true,
            depth: 0,
        };
    }

    /// Set the Automerge ordering counter.
    pub fn with_seq(mut self, seq: u64) -> Item<T> {
        self.seq = seq;
        return self;
    }

    /// Set the Sync9 attachment side.
    pub fn with_insert_after(mut self, insert_after: bool) -> Item<T> {
        self.insert_after = insert_after;
        return self;
    }

    /// Whether this item contributes to the visible sequence.
    #[inline]
    pub fn is_visible(&self) -> bool {
        return self.content.is_some() && !self.is_deleted;
    }
}

impl<T: Clone> Item<T> {
    /// A fresh, un-integrated copy of this item's creation data.
    ///
    /// Tombstone state and cached tree links are local artifacts, not
    /// part of the operation, so they are reset. This is what the merge
    /// driver feeds to `integrate` on the destination.
    pub fn to_op(&self) -> Item<T> {
        return Item::new(
            self.id.clone(),
            self.content.clone(),
            self.origin_left.clone(),
            self.origin_right.clone(),
        )
        .with_seq(self.seq)
        .with_insert_after(self.insert_after);
    }
}

/// A replicated list document.
///
/// The integration algorithm is fixed at construction; every local edit
/// and merge dispatches through it. Two documents can only merge if they
/// were built with the same algorithm.
#[derive(Clone, Debug)]
pub struct Doc<T> {
    pub(crate) algorithm: Algorithm,
    pub(crate) content: Vec<Item<T>>,
    pub(crate) version: Version,
    /// Largest ordering counter observed (local or remote).
    pub(crate) max_seq: u64,
    /// Count of visible items; kept in sync by integrate and delete.
    pub(crate) len: usize,
    pub(crate) hint_hits: u64,
    pub(crate) hint_misses: u64,
}

impl<T> Doc<T> {
    /// Create an empty document driven by the given algorithm.
    pub fn new(algorithm: Algorithm) -> Doc<T> {
        return Doc {
            algorithm,
            content: Vec::new(),
            version: Version::new(),
            max_seq: 0,
            len: 0,
            hint_hits: 0,
            hint_misses: 0,
        };
    }

    /// The algorithm this document was built with.
    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        return self.algorithm;
    }

    /// The visible length: items with content present and not deleted.
    #[inline]
    pub fn len(&self) -> usize {
        return self.len;
    }

    /// Check if the visible sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// Every stored item, tombstones and sentinels included.
    #[inline]
    pub fn items(&self) -> &[Item<T>] {
        return &self.content;
    }

    /// The document's version vector.
    #[inline]
    pub fn version(&self) -> &Version {
        return &self.version;
    }

    /// Hint-cache `(hits, misses)` counters for the id finder.
    #[inline]
    pub fn hint_stats(&self) -> (u64, u64) {
        return (self.hint_hits, self.hint_misses);
    }

    /// Find the physical index where the `pos`-th visible item sits.
    ///
    /// Walks left to right, counting down `pos` on every visible item.
    /// With `stick_end` the walk returns as soon as the count reaches
    /// zero, regardless of what occupies that slot. Sync9 uses this so
    /// an insertion can resolve into a split span rather than skipping
    /// over its sentinels. Without it, invisible items are skipped first.
    ///
    /// `pos` equal to the visible length resolves to one past the end.
    pub fn find_item_at_pos(&self, pos: usize, stick_end: bool) -> Result<usize, Error> {
        let mut remaining = pos;
        for (idx, item) in self.content.iter().enumerate() {
            if stick_end && remaining == 0 {
                return Ok(idx);
            }
            if !item.is_visible() {
                continue;
            }
            if remaining == 0 {
                return Ok(idx);
            }
            remaining -= 1;
        }
        if remaining == 0 {
            return Ok(self.content.len());
        }
        return Err(Error::OutOfRange { pos, len: self.len });
    }

    /// Find the physical index of the item with the given id.
    ///
    /// With `at_end`, the match must currently carry content: a split
    /// span's halves share an id, and `at_end` resolves to the
    /// content-bearing end rather than the empty prefix.
    pub fn find_item_by_id(&self, id: &Id, at_end: bool) -> Result<usize, Error> {
        for (idx, item) in self.content.iter().enumerate() {
            if item.id == *id && (!at_end || item.content.is_some()) {
                return Ok(idx);
            }
        }
        return Err(Error::NotFound { id: id.clone() });
    }

    /// Id lookup with a one-slot speculative hint, tried before the scan.
    pub(crate) fn find_item_by_id_hinted(
        &mut self,
        id: &Id,
        at_end: bool,
        hint: Option<usize>,
    ) -> Result<usize, Error> {
        if let Some(guess) = hint {
            if let Some(item) = self.content.get(guess) {
                if item.id == *id && (!at_end || item.content.is_some()) {
                    self.hint_hits += 1;
                    return Ok(guess);
                }
            }
        }
        self.hint_misses += 1;
        return self.find_item_by_id(id, at_end);
    }

    /// Physical index of an `origin_left` reference: -1 for the start
    /// boundary.
    pub(crate) fn left_origin_idx(&self, origin: &Option<Id>) -> Result<isize, Error> {
        return match origin {
            Some(id) => Ok(self.find_item_by_id(id, false)? as isize),
            None => Ok(-1),
        };
    }

    /// Physical index of an `origin_right` reference: one past the end
    /// for the end boundary.
    pub(crate) fn right_origin_idx(&self, origin: &Option<Id>) -> Result<usize, Error> {
        return match origin {
            Some(id) => self.find_item_by_id(id, false),
            None => Ok(self.content.len()),
        };
    }

    /// Verify an incoming item is the expected next operation from its
    /// agent.
    pub(crate) fn check_seq(&self, item: &Item<T>) -> Result<(), Error> {
        let expected = self.version.next_seq(&item.id.agent);
        if item.id.seq != expected {
            return Err(Error::OutOfOrder {
                id: item.id.clone(),
                expected,
            });
        }
        return Ok(());
    }

    /// Commit a placed item: record its id, splice it in, and update the
    /// visible length and ordering high-water mark.
    pub(crate) fn splice_in(&mut self, dest: usize, item: Item<T>) {
        self.version.record(&item.id);
        if item.seq > self.max_seq {
            self.max_seq = item.seq;
        }
        if item.is_visible() {
            self.len += 1;
        }
        self.content.insert(dest, item);
    }

    /// Tombstone the item at visible position `pos`.
    ///
    /// Flipping an already-dead slot is a no-op, so the operation is
    /// idempotent at the item level. The agent parameter is accepted for
    /// symmetry with insertion; deletions carry no identity of their own.
    pub fn delete(&mut self, _agent: &str, pos: usize) -> Result<(), Error> {
        let idx = self.find_item_at_pos(pos, false)?;
        if idx == self.content.len() {
            return Err(Error::OutOfRange { pos, len: self.len });
        }
        let item = &mut self.content[idx];
        if !item.is_deleted {
            item.is_deleted = true;
            self.len -= 1;
        }
        return Ok(());
    }

    /// Verify the store's bookkeeping invariants, panicking on violation.
    ///
    /// Intended for tests and fuzz drivers: every stored id must be
    /// covered by the version, every origin must resolve and be covered,
    /// and the cached visible length must match a recount.
    pub fn check(&self) {
        for item in &self.content {
            assert!(
                self.version.contains(&item.id),
                "item {:?} not covered by the version",
                item.id,
            );
            for origin in [&item.origin_left, &item.origin_right] {
                if let Some(id) = origin {
                    assert!(
                        self.version.contains(id),
                        "origin {:?} of {:?} not covered by the version",
                        id,
                        item.id,
                    );
                    assert!(
                        self.find_item_by_id(id, false).is_ok(),
                        "origin {:?} of {:?} not present in the store",
                        id,
                        item.id,
                    );
                }
            }
        }
        let visible = self.content.iter().filter(|item| item.is_visible()).count();
        assert_eq!(self.len, visible, "cached visible length out of sync");
    }
}

impl<T: Clone> Doc<T> {
    /// The visible sequence: payloads of undeleted, content-bearing
    /// items in document order.
    pub fn to_vec(&self) -> Vec<T> {
        return self
            .content
            .iter()
            .filter(|item| !item.is_deleted)
            .filter_map(|item| item.content.clone())
            .collect();
    }
}

impl<T: fmt::Debug> Doc<T> {
    /// Dump the store line by line for debugging.
    ///
    /// The format is diagnostic only, not a compatibility surface.
    pub fn print_doc(&self) {
        println!(
            "doc[{}]: {} items, {} visible, max_seq {}",
            self.algorithm.name(),
            self.content.len(),
            self.len,
            self.max_seq,
        );
        for (agent, seq) in self.version.iter() {
            println!("  version {} -> {}", agent, seq);
        }
        for (idx, item) in self.content.iter().enumerate() {
            let flags = match (item.content.is_some(), item.is_deleted) {
                (false, _) => " (sentinel)",
                (true, true) => " (deleted)",
                (true, false) => "",
            };
            println!(
                "  {:4} {:?} left {:?} right {:?} seq {} after {}{}: {:?}",
                idx,
                item.id,
                item.origin_left,
                item.origin_right,
                item.seq,
                item.insert_after,
                flags,
                item.content,
            );
        }
    }
}
