//! Pointer surgery shared by insertion and erasure.
//!
//! None of these functions compare keys; they only rewire links and keep the sentinel's
//! root/first/last caches in step. Balanced trees built on top can reuse them unchanged.

use super::handle::{Handle, Link};
use super::node::{NodeStore, Sentinel, Side};

impl<K, V> NodeStore<K, V> {
    /// Hangs the freshly created node `h` in `parent`'s `side` slot, which must be empty.
    ///
    /// A `Nil` parent makes `h` the root of an empty tree.
    pub(crate) fn attach(&mut self, h: Handle, parent: Link, side: Side) {
        #[cfg(feature = "tracing")]
        tracing::trace!(node = ?h, ?parent, ?side, "attach");

        let Link::Node(p) = parent else {
            let sentinel = self.sentinel_mut();
            sentinel.root = h.into();
            sentinel.first = h.into();
            sentinel.last = h.into();
            return;
        };

        debug_assert!(self.node(p).child(side).is_nil(), "`NodeStore::attach()` - slot is occupied!");
        match side {
            Side::Left => {
                self.set_left(parent, h.into());
                // The minimum has no left child, so only a child of the minimum can replace it.
                if self.sentinel().first == parent {
                    self.sentinel_mut().first = h.into();
                }
            }
            Side::Right => {
                self.set_right(parent, h.into());
                if self.sentinel().last == parent {
                    self.sentinel_mut().last = h.into();
                }
            }
        }
    }

    /// Points whichever link of `parent` referred to `old` at `new` instead.
    /// A `Nil` parent means `old` was the root.
    fn replace_child(&mut self, parent: Link, old: Handle, new: Link) {
        match parent {
            Link::Nil => self.sentinel_mut().root = new,
            Link::Node(p) => {
                if self.node(p).left() == Link::Node(old) {
                    self.set_left(parent, new);
                } else {
                    self.set_right(parent, new);
                }
            }
        }
    }

    /// Detaches the childless node `h` from its parent.
    pub(crate) fn delete_leaf(&mut self, h: Handle) {
        #[cfg(feature = "tracing")]
        tracing::trace!(node = ?h, "delete leaf");

        debug_assert!(self.node(h).is_leaf(), "`NodeStore::delete_leaf()` - node has children!");
        let parent = self.node(h).parent();
        let Link::Node(_) = parent else {
            // Sole node.
            *self.sentinel_mut() = Sentinel::new();
            return;
        };

        self.replace_child(parent, h, Link::Nil);
        // A leaf minimum is its parent's left child, so the parent becomes the minimum;
        // symmetrically for the maximum.
        if self.sentinel().first == Link::Node(h) {
            self.sentinel_mut().first = parent;
        }
        if self.sentinel().last == Link::Node(h) {
            self.sentinel_mut().last = parent;
        }
    }

    /// Replaces `h`, which has the single child `child`, with that child's subtree.
    pub(crate) fn splice_one_child(&mut self, h: Handle, child: Handle) {
        #[cfg(feature = "tracing")]
        tracing::trace!(node = ?h, ?child, "splice one child");

        let parent = self.node(h).parent();
        self.replace_child(parent, h, child.into());
        self.set_parent(child.into(), parent);

        if self.sentinel().first == Link::Node(h) {
            let first = self.minimum(child);
            self.sentinel_mut().first = first.into();
        }
        if self.sentinel().last == Link::Node(h) {
            let last = self.maximum(child);
            self.sentinel_mut().last = last.into();
        }
    }

    /// Swaps the two-child node `h` with its in-order predecessor `p` structurally.
    ///
    /// `p` (the maximum of `h`'s left subtree) takes over `h`'s parent, both of `h`'s children
    /// and `h`'s place in the tree. `h` moves down into `p`'s old slot, keeping `p`'s former
    /// left subtree and an empty right link. Keys stay in their nodes, so handles to any other
    /// node remain valid. Afterwards `h` has at most one child and can be unlinked with
    /// [`NodeStore::delete_leaf`] or [`NodeStore::splice_one_child`].
    ///
    /// Between this call and that unlink, `h` is the only node out of key order.
    pub(crate) fn splice_two_children(&mut self, h: Handle) {
        debug_assert!(self.node(h).is_full(), "`NodeStore::splice_two_children()` - node lacks a child!");
        let (Link::Node(left), Link::Node(right)) = (self.node(h).left(), self.node(h).right()) else {
            return;
        };

        let p = self.maximum(left);
        let parent = self.node(h).parent();
        let p_parent = self.node(p).parent();
        let p_left = self.node(p).left();

        #[cfg(feature = "tracing")]
        tracing::trace!(node = ?h, predecessor = ?p, "splice two children");

        // `p` takes `h`'s place.
        self.replace_child(parent, h, p.into());
        self.set_parent(p.into(), parent);
        self.set_right(p.into(), right.into());
        self.set_parent(right.into(), p.into());

        if p == left {
            // `p` was `h`'s own left child: `h` becomes `p`'s left child.
            self.set_left(p.into(), h.into());
            self.set_parent(h.into(), p.into());
        } else {
            // `p` was the right child of some deeper node; `h` takes that slot.
            self.set_left(p.into(), left.into());
            self.set_parent(left.into(), p.into());
            self.set_right(p_parent, h.into());
            self.set_parent(h.into(), p_parent);
        }

        // `h` inherits `p`'s former left subtree and no right subtree.
        self.set_left(h.into(), p_left);
        if let Link::Node(pl) = p_left {
            self.set_parent(pl.into(), h.into());
        }
        self.set_right(h.into(), Link::Nil);

        // `p` can only have been the minimum as `h`'s childless left child, in which case `h`
        // now sits in exactly that spot.
        if self.sentinel().first == Link::Node(p) {
            self.sentinel_mut().first = h.into();
        }
    }

    /// Removes the node `h` from the tree without freeing it.
    pub(crate) fn unlink(&mut self, h: Handle) {
        if self.node(h).is_full() {
            self.splice_two_children(h);
        }

        let node = self.node(h);
        match (node.left(), node.right()) {
            (Link::Nil, Link::Nil) => self.delete_leaf(h),
            (Link::Node(child), Link::Nil) | (Link::Nil, Link::Node(child)) => self.splice_one_child(h, child),
            (Link::Node(_), Link::Node(_)) => unreachable!("`NodeStore::unlink()` - splice left two children!"),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::raw::navigate::SearchResult;
    use alloc::vec::Vec;

    fn insert(store: &mut NodeStore<i32, ()>, key: i32) -> Handle {
        match store.search(&key) {
            SearchResult::Found(h) => h,
            SearchResult::Vacant {
                parent,
                side,
            } => {
                let h = store.create_node(key, (), parent, Link::Nil, Link::Nil).unwrap();
                store.attach(h, parent, side);
                h
            }
        }
    }

    fn keys(store: &NodeStore<i32, ()>) -> Vec<i32> {
        let mut out = Vec::new();
        let mut link = store.successor(Link::Nil);
        while let Link::Node(h) = link {
            out.push(*store.node(h).key());
            link = store.successor(link);
        }
        out
    }

    fn build(keys: &[i32]) -> (NodeStore<i32, ()>, Vec<Handle>) {
        let mut store = NodeStore::new();
        let handles = keys.iter().map(|&k| insert(&mut store, k)).collect();
        (store, handles)
    }

    #[test]
    fn attach_tracks_min_and_max() {
        let (store, handles) = build(&[40, 50, 30, 35, 10, 75]);
        assert_eq!(store.sentinel().root, Link::Node(handles[0]));
        assert_eq!(store.sentinel().first, Link::Node(handles[4]));
        assert_eq!(store.sentinel().last, Link::Node(handles[5]));
    }

    #[test]
    fn splice_with_direct_left_child() {
        //     40
        //    /  \
        //  30    50
        let (mut store, handles) = build(&[40, 30, 50]);
        let [root, low, high] = [handles[0], handles[1], handles[2]];

        store.splice_two_children(root);
        // 30 took the root's place; 40 hangs off its left with no right child.
        assert_eq!(store.sentinel().root, Link::Node(low));
        assert_eq!(store.node(low).left(), Link::Node(root));
        assert_eq!(store.node(low).right(), Link::Node(high));
        assert_eq!(store.node(root).parent(), Link::Node(low));
        assert!(store.node(root).is_leaf());
        assert_eq!(store.sentinel().first, Link::Node(root));

        store.delete_leaf(root);
        store.destroy(root);
        assert_eq!(keys(&store), [30, 50]);
        assert_eq!(store.sentinel().first, Link::Node(low));
        assert_eq!(store.sentinel().last, Link::Node(high));
    }

    #[test]
    fn splice_with_deep_predecessor() {
        //        40
        //       /  \
        //     20    50
        //    /  \
        //  10    30
        //       /
        //     25
        let (mut store, handles) = build(&[40, 20, 50, 10, 30, 25]);
        let [root, twenty, fifty, _ten, thirty, twenty_five] =
            [handles[0], handles[1], handles[2], handles[3], handles[4], handles[5]];

        store.splice_two_children(root);
        assert_eq!(store.sentinel().root, Link::Node(thirty));
        assert_eq!(store.node(thirty).left(), Link::Node(twenty));
        assert_eq!(store.node(thirty).right(), Link::Node(fifty));
        assert_eq!(store.node(twenty).right(), Link::Node(root));
        assert_eq!(store.node(root).left(), Link::Node(twenty_five));
        assert_eq!(store.node(root).right(), Link::Nil);
        assert_eq!(store.node(twenty_five).parent(), Link::Node(root));

        store.splice_one_child(root, twenty_five);
        store.destroy(root);
        assert_eq!(keys(&store), [10, 20, 25, 30, 50]);
        assert_eq!(store.node(twenty_five).parent(), Link::Node(twenty));
    }

    #[test]
    fn unlink_every_shape() {
        let order = [40, 50, 30, 35, 10, 75, 23, 87, 68];
        for victim in order {
            let (mut store, handles) = build(&order);
            let index = order.iter().position(|&k| k == victim).unwrap();
            store.unlink(handles[index]);
            store.destroy(handles[index]);

            let mut expected: Vec<_> = order.iter().copied().filter(|&k| k != victim).collect();
            expected.sort_unstable();
            assert_eq!(keys(&store), expected, "after removing {victim}");

            let first = store.sentinel().first.handle().map(|h| *store.node(h).key());
            let last = store.sentinel().last.handle().map(|h| *store.node(h).key());
            assert_eq!(first, expected.first().copied());
            assert_eq!(last, expected.last().copied());
        }
    }

    #[test]
    fn unlink_sole_node_resets_sentinel() {
        let (mut store, handles) = build(&[1]);
        store.unlink(handles[0]);
        assert_eq!(*store.sentinel(), Sentinel::new());
    }
}
