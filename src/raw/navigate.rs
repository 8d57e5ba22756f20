use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use super::handle::{Handle, Link};
use super::node::{NodeStore, Side};

/// Result of searching for a key.
pub(crate) enum SearchResult {
    /// Key was found at the given node.
    Found(Handle),
    /// Key was not found; a new node belongs in `parent`'s `side` slot.
    /// `parent` is `Nil` only for an empty tree.
    Vacant { parent: Link, side: Side },
}

// In-order stepping. Only parent/left/right links and the sentinel tag are inspected.
impl<K, V> NodeStore<K, V> {
    /// Returns the leftmost node of the subtree rooted at `from`.
    pub(crate) fn minimum(&self, from: Handle) -> Handle {
        let mut current = from;
        while let Link::Node(left) = self.node(current).left() {
            current = left;
        }
        current
    }

    /// Returns the rightmost node of the subtree rooted at `from`.
    pub(crate) fn maximum(&self, from: Handle) -> Handle {
        let mut current = from;
        while let Link::Node(right) = self.node(current).right() {
            current = right;
        }
        current
    }

    /// Returns the in-order successor of `link`.
    ///
    /// The successor of the maximum is `Nil`; the successor of `Nil` wraps to the minimum,
    /// which the sentinel keeps in its left slot.
    pub(crate) fn successor(&self, link: Link) -> Link {
        if link.is_nil() {
            return self.left(link);
        }

        if let Link::Node(right) = self.right(link) {
            return Link::Node(self.minimum(right));
        }

        // Climb while we are a right child; the first ancestor we reach from its left is next.
        let mut child = link;
        let mut parent = self.parent(link);
        while !parent.is_nil() && self.right(parent) == child {
            child = parent;
            parent = self.parent(parent);
        }
        parent
    }

    /// Returns the in-order predecessor of `link`.
    ///
    /// The predecessor of the minimum is `Nil`; the predecessor of `Nil` wraps to the maximum,
    /// which the sentinel keeps in its right slot.
    pub(crate) fn predecessor(&self, link: Link) -> Link {
        if link.is_nil() {
            return self.right(link);
        }

        if let Link::Node(left) = self.left(link) {
            return Link::Node(self.maximum(left));
        }

        let mut child = link;
        let mut parent = self.parent(link);
        while !parent.is_nil() && self.left(parent) == child {
            child = parent;
            parent = self.parent(parent);
        }
        parent
    }
}

// Key-directed descents.
impl<K, V> NodeStore<K, V> {
    #[inline]
    fn compare<Q>(&self, key: &Q, h: Handle) -> core::cmp::Ordering
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        key.cmp(self.node(h).key().borrow())
    }

    /// Returns the node holding `key`, or `Nil`.
    pub(crate) fn find<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.sentinel().root;
        while let Link::Node(h) = current {
            current = match self.compare(key, h) {
                Less => self.node(h).left(),
                Greater => self.node(h).right(),
                Equal => return current,
            };
        }
        Link::Nil
    }

    /// Returns the first node whose key is not less than `key`, or `Nil`.
    pub(crate) fn lower_bound<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.sentinel().root;
        let mut result = Link::Nil;
        while let Link::Node(h) = current {
            if self.compare(key, h) == Greater {
                current = self.node(h).right();
            } else {
                result = current;
                current = self.node(h).left();
            }
        }
        result
    }

    /// Returns the first node whose key is greater than `key`, or `Nil`.
    pub(crate) fn upper_bound<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.sentinel().root;
        let mut result = Link::Nil;
        while let Link::Node(h) = current {
            if self.compare(key, h) == Less {
                result = current;
                current = self.node(h).left();
            } else {
                current = self.node(h).right();
            }
        }
        result
    }

    /// Descends from the root to `key` or to the empty slot where it belongs.
    pub(crate) fn search<Q>(&self, key: &Q) -> SearchResult
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut parent = Link::Nil;
        let mut side = Side::Left;
        let mut current = self.sentinel().root;
        while let Link::Node(h) = current {
            side = match self.compare(key, h) {
                Less => Side::Left,
                Greater => Side::Right,
                Equal => return SearchResult::Found(h),
            };
            parent = current;
            current = self.node(h).child(side);
        }
        SearchResult::Vacant {
            parent,
            side,
        }
    }

    /// Finds `key` or its slot by walking in order from `hint` rather than from the root.
    ///
    /// Walks only as far as needed to bracket the key as `prev <= key < next`, so a hint
    /// next to the key's final place costs O(1) amortized. Any hint, including `Nil`, gives
    /// the same answer as [`NodeStore::search`].
    pub(crate) fn search_from_hint<Q>(&self, hint: Link, key: &Q) -> SearchResult
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut next = hint;
        let mut prev;
        if next.handle().is_none_or(|h| self.compare(key, h) == Less) {
            // Walk backwards while the key is still below `prev`.
            prev = self.predecessor(next);
            while let Link::Node(p) = prev {
                if self.compare(key, p) != Less {
                    break;
                }
                next = prev;
                prev = self.predecessor(prev);
            }
        } else {
            // Walk forwards while `next` is not above the key.
            prev = next;
            while let Link::Node(n) = next {
                if self.compare(key, n) == Less {
                    break;
                }
                prev = next;
                next = self.successor(next);
            }
        }

        match (prev, next) {
            (Link::Nil, Link::Nil) => SearchResult::Vacant {
                parent: Link::Nil,
                side: Side::Left,
            },
            (Link::Node(p), _) if self.compare(key, p) == Equal => SearchResult::Found(p),
            (Link::Node(p), _) if self.node(p).right().is_nil() => SearchResult::Vacant {
                parent: prev,
                side: Side::Right,
            },
            // `next` is the leftmost node of `prev`'s right subtree, or the minimum when there
            // is no `prev`; either way its left slot is the gap.
            (_, Link::Node(_)) => SearchResult::Vacant {
                parent: next,
                side: Side::Left,
            },
            (Link::Node(_), Link::Nil) => SearchResult::Vacant {
                parent: prev,
                side: Side::Right,
            },
        }
    }
}
