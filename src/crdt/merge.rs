// model = "claude-opus-4-5"
// created = 2026-02-04
// modified = 2026-02-04
// driver = "Isaac Clayton"

//! The merge driver: bulk import of a remote document's operations.
//!
//! Merging walks the source store, picks out every content-bearing item
//! the destination has not yet observed, and replays those items through
//! the destination's own placement rule. An item is only ready once its
//! causal dependencies hold locally: the agent's previous operation and
//! both origins. The driver loops over the pending set until it drains;
//! a full pass with no progress means the source referenced operations
//! it does not itself contain, which is a fatal `Stuck`.
//!
//! Tombstone state is deliberately *not* carried across: the driver
//! replays insertions, not deletions. Replicating deletes would need
//! tombstone-flip operations in the stream, which this library does not
//! model, so a merged copy of a document with deletions resurrects the
//! deleted content.

use super::doc::Doc;
use super::doc::Item;
use super::error::Error;
use super::primitives::Id;

/// Whether an operation's causal dependencies are all present in `doc`.
///
/// Ready means: not yet integrated, the agent's preceding operation is
/// in (or this is the agent's first), and both origins are in. The null
/// boundary origins are vacuously present.
pub fn can_insert_now<T>(item: &Item<T>, doc: &Doc<T>) -> bool {
    if doc.version.contains(&item.id) {
        return false;
    }
    if item.id.seq > 0 {
        let previous = Id::new(item.id.agent.clone(), item.id.seq - 1);
        if !doc.version.contains(&previous) {
            return false;
        }
    }
    if let Some(left) = &item.origin_left {
        if !doc.version.contains(left) {
            return false;
        }
    }
    if let Some(right) = &item.origin_right {
        if !doc.version.contains(right) {
            return false;
        }
    }
    return true;
}

impl<T: Clone> Doc<T> {
    /// Integrate every operation from `src` that this document has not
    /// seen.
    ///
    /// Both documents must have been built with the same algorithm.
    /// Merging twice is a no-op: already-observed ids are filtered by
    /// the version vector.
    pub fn merge_from(&mut self, src: &Doc<T>) -> Result<(), Error> {
        assert_eq!(
            self.algorithm, src.algorithm,
            "documents must share a placement rule to merge",
        );

        // Span sentinels carry no content and are never transmitted;
        // the content-bearing half of a split span carries the id.
        let mut pending: Vec<Option<&Item<T>>> = src
            .content
            .iter()
            .filter(|item| item.content.is_some() && !self.version.contains(&item.id))
            .map(Some)
            .collect();

        let mut remaining = pending.len();
        while remaining > 0 {
            let mut progressed = 0;
            for slot in pending.iter_mut() {
                let Some(item) = *slot else { continue };
                if !can_insert_now(item, self) {
                    continue;
                }
                self.integrate(item.to_op(), None)?;
                *slot = None;
                progressed += 1;
            }
            if progressed == 0 {
                return Err(Error::Stuck { remaining });
            }
            remaining -= progressed;
        }
        return Ok(());
    }
}
