// model = "claude-opus-4-5"
// created = 2026-02-03
// modified = 2026-02-04
// driver = "Isaac Clayton"

//! Concord - comparative reference implementations of list CRDTs.
//!
//! Several replicas edit one ordered list concurrently; every algorithm
//! in this crate guarantees that replicas which have seen the same
//! operations display the same sequence, whatever order those operations
//! arrived in. The algorithms share a document store, a version-vector
//! discipline, and a merge driver; they differ only in the placement
//! rule that resolves concurrent insertions, which makes their
//! trade-offs directly comparable.
//!
//! # Quick Start
//!
//! ```
//! use concord::crdt::{Algorithm, Doc};
//!
//! let mut left = Doc::new(Algorithm::YjsMod);
//! let mut right = Doc::new(Algorithm::YjsMod);
//!
//! // Replicas edit independently...
//! for (pos, ch) in "hey".chars().enumerate() {
//!     left.insert("alice", pos, ch).unwrap();
//! }
//! right.insert("bob", 0, '!').unwrap();
//!
//! // ...and converge once they exchange operations.
//! left.merge_from(&right).unwrap();
//! right.merge_from(&left).unwrap();
//! assert_eq!(left.to_vec(), right.to_vec());
//! ```

pub mod crdt;
