use smallvec::SmallVec;

use super::handle::{Handle, Link};
use super::raw_tree::RawTree;
use crate::InvariantError;

impl<K: Ord, V> RawTree<K, V> {
    /// Walks the whole tree and reports the first broken structural invariant.
    ///
    /// Parent links are verified before the in-order walk, which relies on them.
    pub(crate) fn check(&self) -> Result<(), InvariantError> {
        let store = self.store();
        let sentinel = *store.sentinel();
        let Link::Node(root) = sentinel.root else {
            if !sentinel.first.is_nil() {
                return Err(InvariantError::FirstStale);
            }
            if !sentinel.last.is_nil() {
                return Err(InvariantError::LastStale);
            }
            return match self.len() {
                0 => Ok(()),
                expected => Err(InvariantError::LenMismatch {
                    expected,
                    found: 0,
                }),
            };
        };

        if !store.node(root).parent().is_nil() {
            return Err(InvariantError::RootHasParent);
        }

        let mut found = 0;
        let mut stack: SmallVec<[Handle; 32]> = SmallVec::new();
        stack.push(root);
        while let Some(h) = stack.pop() {
            found += 1;
            // More nodes than the arena holds means a cycle.
            if found > store.live() {
                break;
            }
            let node = store.node(h);
            for child in [node.left(), node.right()] {
                if let Link::Node(c) = child {
                    if store.node(c).parent() != Link::Node(h) {
                        return Err(InvariantError::ParentMismatch);
                    }
                    stack.push(c);
                }
            }
        }
        if found != self.len() {
            return Err(InvariantError::LenMismatch {
                expected: self.len(),
                found,
            });
        }

        if sentinel.first != Link::Node(store.minimum(root)) {
            return Err(InvariantError::FirstStale);
        }
        if sentinel.last != Link::Node(store.maximum(root)) {
            return Err(InvariantError::LastStale);
        }

        let mut previous = store.minimum(root);
        let mut current = store.successor(previous.into());
        while let Link::Node(h) = current {
            if store.node(previous).key() >= store.node(h).key() {
                return Err(InvariantError::OrderViolation);
            }
            previous = h;
            current = store.successor(current);
        }
        Ok(())
    }
}
