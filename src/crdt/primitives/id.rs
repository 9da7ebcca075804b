// model = "claude-opus-4-5"
// created = 2026-02-03
// modified = 2026-02-03
// driver = "Isaac Clayton"

//! Identifier types for CRDT operations and items.
//!
//! Every item in a document is identified by an `Id`: the agent (replica)
//! that created it plus that agent's sequence number. The pair is globally
//! unique as long as agents are unique and each agent numbers its
//! operations 0, 1, 2, ... without gaps.
//!
//! The list's left and right boundaries are represented as `Option<Id>`
//! with `None`, the null id. The null id is considered present in every
//! version, which call sites get for free by matching on the `Option`.
//!
//! Agents are opaque strings with a total (lexicographic) order. Several
//! integration algorithms use that order to break ties between concurrent
//! siblings, so it has to agree across replicas, which the derived
//! `(agent, seq)` ordering below provides.

use std::cmp::Ordering;
use std::fmt;

/// A unique identifier for an item: the creating agent plus that agent's
/// sequence number.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Id {
    /// The agent (replica) that created the item.
    pub agent: String,
    /// The agent's operation counter, starting at 0.
    pub seq: u64,
}

impl Id {
    /// Create a new id.
    pub fn new(agent: impl Into<String>, seq: u64) -> Id {
        return Id {
            agent: agent.into(),
            seq,
        };
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "({}, {})", self.agent, self.seq);
    }
}

impl PartialOrd for Id {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return Some(self.cmp(other));
    }
}

impl Ord for Id {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.agent.cmp(&other.agent) {
            Ordering::Equal => self.seq.cmp(&other.seq),
            other => other,
        }
    }
}
