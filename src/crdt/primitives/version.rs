// model = "claude-opus-4-5"
// created = 2026-02-03
// modified = 2026-02-03
// driver = "Isaac Clayton"

//! Version vectors for tracking which operations a document has seen.
//!
//! A `Version` maps each agent to the highest sequence number observed
//! from it. Because every agent numbers its operations contiguously from
//! zero, a single `u64` per agent captures the full set of observed ids:
//! `(a, s)` has been seen iff the entry for `a` is at least `s`.
//!
//! The version answers two questions for the merge driver:
//!
//! - membership: is this id already integrated? (`contains`)
//! - admission: what seq do we expect from this agent next? (`next_seq`)
//!
//! Complexity:
//! - contains: O(1)
//! - record: O(1)
//! - next_seq: O(1)

use rustc_hash::FxHashMap;

use super::id::Id;

/// A version vector: agent name to highest observed sequence number.
///
/// An agent absent from the map has produced no observed operations at
/// all, which is distinct from an agent whose entry is 0 (one operation
/// observed).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Version {
    /// Map from agent to the largest seq integrated from that agent.
    entries: FxHashMap<String, u64>,
}

impl Version {
    /// Create an empty version.
    pub fn new() -> Version {
        return Version {
            entries: FxHashMap::default(),
        };
    }

    /// The highest seq observed from an agent, if any.
    #[inline]
    pub fn get(&self, agent: &str) -> Option<u64> {
        return self.entries.get(agent).copied();
    }

    /// Check whether an id is covered by this version.
    #[inline]
    pub fn contains(&self, id: &Id) -> bool {
        return match self.entries.get(&id.agent) {
            Some(&seen) => seen >= id.seq,
            None => false,
        };
    }

    /// The sequence number expected from this agent next: one past the
    /// highest observed, or 0 for an unseen agent.
    #[inline]
    pub fn next_seq(&self, agent: &str) -> u64 {
        return match self.entries.get(agent) {
            Some(&seen) => seen + 1,
            None => 0,
        };
    }

    /// Record an integrated id.
    ///
    /// Callers are expected to have verified the id is the agent's next
    /// seq; the version only ever moves forward.
    pub fn record(&mut self, id: &Id) {
        let entry = self.entries.entry(id.agent.clone()).or_insert(id.seq);
        if id.seq > *entry {
            *entry = id.seq;
        }
    }

    /// Check if no operations have been observed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }

    /// Iterate over `(agent, highest seq)` pairs, in map order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        return self.entries.iter().map(|(agent, &seq)| (agent.as_str(), seq));
    }
}

/// Check whether an id is covered by a version.
///
/// Free-function spelling of [`Version::contains`] for call sites that
/// read better with the id first.
#[inline]
pub fn is_in_version(id: &Id, version: &Version) -> bool {
    return version.contains(id);
}
