// model = "claude-opus-4-5"
// created = 2026-02-03
// modified = 2026-02-03
// driver = "Isaac Clayton"

//! Error kinds shared by the document store and the merge driver.
//!
//! All of these are fatal to the operation that raised them: there is no
//! partial-state recovery and no internal retry. Callers either validate
//! inputs up front (`can_insert_now`) or treat a failure as a programming
//! error in the feeding code.

use std::fmt;

use super::primitives::Id;

/// Why an operation on a document was aborted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// `integrate` received an operation whose seq is not `last + 1` for
    /// its agent. The document is unmodified.
    OutOfOrder {
        /// The id the operation carried.
        id: Id,
        /// The seq the document expected from that agent.
        expected: u64,
    },
    /// A referenced origin id could not be located in the store. Signals
    /// a corrupt input or a missing causal dependency.
    NotFound {
        /// The id that failed to resolve.
        id: Id,
    },
    /// A position past the document's visible length.
    OutOfRange {
        /// The requested visible position.
        pos: usize,
        /// The visible length at the time of the request.
        len: usize,
    },
    /// A merge pass completed without integrating anything while
    /// operations remained: the source references dependencies it does
    /// not itself contain.
    Stuck {
        /// How many operations were still waiting.
        remaining: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Error::OutOfOrder { id, expected } => write!(
                f,
                "operation {:?} out of order: expected seq {} from agent {}",
                id, expected, id.agent,
            ),
            Error::NotFound { id } => write!(f, "origin {:?} not found in document", id),
            Error::OutOfRange { pos, len } => {
                write!(f, "position {} past visible length {}", pos, len)
            }
            Error::Stuck { remaining } => write!(
                f,
                "merge made no progress with {} operations remaining",
                remaining,
            ),
        };
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = Error::OutOfOrder {
            id: Id::new("alice", 3),
            expected: 1,
        };
        assert_eq!(
            err.to_string(),
            "operation (alice, 3) out of order: expected seq 1 from agent alice"
        );

        let err = Error::OutOfRange { pos: 9, len: 4 };
        assert_eq!(err.to_string(), "position 9 past visible length 4");
    }
}
