// model = "claude-opus-4-5"
// created = 2026-02-03
// modified = 2026-02-04
// driver = "Isaac Clayton"

//! The Automerge placement rule.
//!
//! Each item carries an ordering counter `seq`, strictly greater than
//! every counter its replica had seen when the item was created. Children
//! of the same parent sort by descending counter with ascending agent as
//! the tiebreak, and a child's whole subtree sits contiguously behind it,
//! so the scan can stop as soon as it sees a smaller counter or a
//! shallower parent.
//!
//! Right origins play no part here; the rule is a pure parent-and-counter
//! order. Note the tiebreak runs ascending by agent, the opposite of the
//! reference implementation; an adapter speaking to real automerge
//! peers would have to invert the agent order on the wire.

use super::doc::Doc;
use super::doc::Item;
use super::error::Error;

pub(crate) fn integrate<T>(
    doc: &mut Doc<T>,
    item: Item<T>,
    idx_hint: Option<usize>,
) -> Result<(), Error> {
    doc.check_seq(&item)?;
    let parent = match &item.origin_left {
        Some(id) => {
            let hint = idx_hint.and_then(|slot| slot.checked_sub(1));
            doc.find_item_by_id_hinted(id, false, hint)? as isize
        }
        None => -1,
    };

    let mut dest = (parent + 1) as usize;
    while dest < doc.content.len() {
        let other = &doc.content[dest];
        if item.seq > other.seq {
            break;
        }
        let o_parent = doc.left_origin_idx(&other.origin_left)?;
        if o_parent < parent {
            break;
        }
        if o_parent == parent && item.seq == other.seq && item.id.agent < other.id.agent {
            break;
        }
        dest += 1;
    }

    doc.splice_in(dest, item);
    return Ok(());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crdt::Algorithm;
    use crate::crdt::Id;

    fn root(agent: &str, seq: u64, counter: u64, ch: char) -> Item<char> {
        return Item::new(Id::new(agent, seq), Some(ch), None, None).with_seq(counter);
    }

    #[test]
    fn equal_counters_order_by_agent_ascending() {
        let mut forward = Doc::new(Algorithm::Automerge);
        forward.integrate(root("A", 0, 1, 'a'), None).unwrap();
        forward.integrate(root("B", 0, 1, 'b'), None).unwrap();

        let mut backward = Doc::new(Algorithm::Automerge);
        backward.integrate(root("B", 0, 1, 'b'), None).unwrap();
        backward.integrate(root("A", 0, 1, 'a'), None).unwrap();

        assert_eq!(forward.to_vec(), vec!['a', 'b']);
        assert_eq!(backward.to_vec(), vec!['a', 'b']);
    }

    #[test]
    fn newer_siblings_sort_first() {
        // Two children of the document start: the higher counter wins
        // the earlier slot, whatever the integration order.
        let mut doc = Doc::new(Algorithm::Automerge);
        doc.integrate(root("A", 0, 1, 'x'), None).unwrap();
        doc.integrate(root("B", 0, 5, 'y'), None).unwrap();
        assert_eq!(doc.to_vec(), vec!['y', 'x']);
    }

    #[test]
    fn subtree_stays_behind_its_parent() {
        let mut doc = Doc::new(Algorithm::Automerge);
        doc.integrate(root("A", 0, 1, 'a'), None).unwrap();
        let child = Item::new(Id::new("A", 1), Some('b'), Some(Id::new("A", 0)), None)
            .with_seq(2);
        doc.integrate(child, None).unwrap();
        // A concurrent root with a lower counter may not push between a
        // parent and its child.
        doc.integrate(root("B", 0, 1, 'z'), None).unwrap();
        assert_eq!(doc.to_vec(), vec!['a', 'b', 'z']);
    }
}
