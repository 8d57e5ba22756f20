use alloc::collections::TryReserveError;
use core::fmt;

/// The error type for fallible [`BSTreeMap`] and [`BSTreeSet`] operations.
///
/// Inserting a key that is already present is not an error; it is reported through the
/// `inserted` flag of [`BSTreeMap::insert_unique`] and friends.
///
/// [`BSTreeMap`]: crate::BSTreeMap
/// [`BSTreeSet`]: crate::BSTreeSet
/// [`BSTreeMap::insert_unique`]: crate::BSTreeMap::insert_unique
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TreeError {
    /// The allocator could not provide storage for a new node. The collection is unchanged.
    AllocationFailed(TryReserveError),
    /// The collection already holds the maximum number of nodes it can address.
    CapacityExceeded,
    /// The position is [`end`](crate::BSTreeMap::end), or its element has since been removed.
    InvalidPosition,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::AllocationFailed(error) => write!(f, "node allocation failed: {error}"),
            TreeError::CapacityExceeded => f.write_str("node capacity exceeded"),
            TreeError::InvalidPosition => f.write_str("invalid position"),
        }
    }
}

impl core::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            TreeError::AllocationFailed(error) => Some(error),
            _ => None,
        }
    }
}

impl From<TryReserveError> for TreeError {
    fn from(error: TryReserveError) -> Self {
        TreeError::AllocationFailed(error)
    }
}

/// A broken structural invariant, as reported by [`BSTreeMap::check_invariants`].
///
/// Seeing one of these means a bug in this crate or an `Ord` implementation that is not a
/// total order.
///
/// [`BSTreeMap::check_invariants`]: crate::BSTreeMap::check_invariants
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvariantError {
    /// The root's parent link is not the sentinel.
    RootHasParent,
    /// A node is not a child of the node its parent link names.
    ParentMismatch,
    /// Two neighbouring keys are not strictly increasing.
    OrderViolation,
    /// The cached minimum is not the leftmost node.
    FirstStale,
    /// The cached maximum is not the rightmost node.
    LastStale,
    /// The element count disagrees with the number of reachable nodes.
    LenMismatch {
        /// The element count the collection reports.
        expected: usize,
        /// The number of nodes reachable from the root.
        found: usize,
    },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::RootHasParent => f.write_str("root has a parent"),
            InvariantError::ParentMismatch => f.write_str("parent link does not match child link"),
            InvariantError::OrderViolation => f.write_str("keys out of order"),
            InvariantError::FirstStale => f.write_str("cached minimum is stale"),
            InvariantError::LastStale => f.write_str("cached maximum is stale"),
            InvariantError::LenMismatch {
                expected,
                found,
            } => write!(f, "length is {expected} but {found} nodes are reachable"),
        }
    }
}

impl core::error::Error for InvariantError {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[test]
    fn allocation_failure_keeps_source() {
        let mut v: Vec<u8> = Vec::new();
        let reserve = v.try_reserve(usize::MAX).expect_err("reserving usize::MAX bytes must fail");
        let error = TreeError::from(reserve.clone());

        assert_eq!(error, TreeError::AllocationFailed(reserve));
        assert!(core::error::Error::source(&error).is_some());
        assert!(error.to_string().starts_with("node allocation failed"));
    }

    #[test]
    fn display_messages() {
        assert_eq!(TreeError::InvalidPosition.to_string(), "invalid position");
        assert_eq!(TreeError::CapacityExceeded.to_string(), "node capacity exceeded");
        assert_eq!(
            InvariantError::LenMismatch {
                expected: 3,
                found: 2,
            }
            .to_string(),
            "length is 3 but 2 nodes are reachable"
        );
    }
}
