use alloc::vec::Vec;
use core::borrow::Borrow;

use smallvec::SmallVec;

use super::handle::{Handle, Link};
use super::navigate::SearchResult;
use super::node::{NodeStore, Side};
use crate::{Position, TreeError};

/// The unbalanced binary search tree backing `BSTreeMap`.
pub(crate) struct RawTree<K, V> {
    /// Nodes and the sentinel.
    store: NodeStore<K, V>,
    /// Number of key-value pairs reachable from the root.
    len: usize,
}

impl<K, V> RawTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            store: NodeStore::new(),
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            store: NodeStore::with_capacity(capacity),
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.store.capacity()
    }

    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), TreeError> {
        self.store.try_reserve(additional)
    }

    /// Drops every node in one flat pass over the arena.
    pub(crate) fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.len, "clear");

        self.store.clear();
        self.len = 0;
    }

    #[inline]
    pub(crate) fn store(&self) -> &NodeStore<K, V> {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut NodeStore<K, V> {
        &mut self.store
    }

    #[inline]
    pub(crate) fn first(&self) -> Link {
        self.store.sentinel().first
    }

    #[inline]
    pub(crate) fn last(&self) -> Link {
        self.store.sentinel().last
    }

    #[inline]
    pub(crate) fn successor(&self, link: Link) -> Link {
        self.store.successor(link)
    }

    #[inline]
    pub(crate) fn predecessor(&self, link: Link) -> Link {
        self.store.predecessor(link)
    }

    /// Mints a position for `link` under the node's current generation.
    pub(crate) fn position(&self, link: Link) -> Position {
        match link {
            Link::Nil => Position::END,
            Link::Node(h) => Position::new(link, self.store.generation(h)),
        }
    }

    /// Turns a position back into a link, rejecting positions whose node has been erased.
    /// The end position resolves to `Nil`.
    pub(crate) fn resolve(&self, position: Position) -> Result<Link, TreeError> {
        match position.link() {
            Link::Nil => Ok(Link::Nil),
            Link::Node(h) if self.store.is_live(h, position.generation()) => Ok(position.link()),
            Link::Node(_) => Err(TreeError::InvalidPosition),
        }
    }

    /// Like [`RawTree::resolve`], but the end position is rejected too.
    pub(crate) fn resolve_node(&self, position: Position) -> Result<Handle, TreeError> {
        match self.resolve(position)? {
            Link::Nil => Err(TreeError::InvalidPosition),
            Link::Node(h) => Ok(h),
        }
    }

    #[inline]
    pub(crate) fn key_value(&self, handle: Handle) -> (&K, &V) {
        let node = self.store.node(handle);
        (node.key(), node.value())
    }

    #[inline]
    pub(crate) fn key_value_mut(&mut self, handle: Handle) -> (&K, &mut V) {
        self.store.node_mut(handle).entry_mut()
    }

    /// Unlinks and frees `handle`, returning its contents and the in-order successor.
    pub(crate) fn remove_at(&mut self, handle: Handle) -> ((K, V), Link) {
        // The successor has to be read while `handle` still sits in the tree.
        let next = self.store.successor(handle.into());
        self.store.unlink(handle);
        self.len -= 1;
        (self.store.destroy(handle), next)
    }

    /// Removes every element from `first` up to, but not including, `last`.
    ///
    /// `last` must be reachable from `first` by stepping forward; otherwise removal stops at
    /// the end. Returns the link removal stopped at.
    pub(crate) fn remove_range(&mut self, first: Link, last: Link) -> Link {
        let mut current = first;
        while current != last {
            let Link::Node(h) = current else {
                break;
            };
            current = self.remove_at(h).1;
        }
        current
    }

    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let h = self.first().handle()?;
        Some(self.remove_at(h).0)
    }

    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let h = self.last().handle()?;
        Some(self.remove_at(h).0)
    }

    /// Keeps only the elements for which `keep` returns true, visiting them in order.
    pub(crate) fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut current = self.first();
        while let Link::Node(h) = current {
            let (key, value) = self.key_value_mut(h);
            current = if keep(key, value) {
                self.store.successor(current)
            } else {
                self.remove_at(h).1
            };
        }
    }

    /// Moves every key-value pair out in ascending order and leaves the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut handles = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Link::Node(h) = current {
            handles.push(h);
            current = self.store.successor(current);
        }

        let result = handles.into_iter().map(|h| self.store.destroy(h)).collect();
        self.store.clear();
        self.len = 0;
        result
    }
}

impl<K: Ord, V> RawTree<K, V> {
    pub(crate) fn find<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.store.find(key)
    }

    pub(crate) fn lower_bound<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.store.lower_bound(key)
    }

    pub(crate) fn upper_bound<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.store.upper_bound(key)
    }

    /// Allocates a node for `key` and hangs it in the empty slot found by a search.
    fn insert_vacant(&mut self, parent: Link, side: Side, key: K, value: V) -> Result<Handle, TreeError> {
        // Allocation comes first: if it fails the tree has not been touched.
        let h = self.store.create_node(key, value, parent, Link::Nil, Link::Nil)?;
        self.store.attach(h, parent, side);
        self.len += 1;
        Ok(h)
    }

    /// Inserts `key` unless an equal key is present.
    ///
    /// Returns the node holding the key and whether it was newly inserted. When the key was
    /// already present, `key` and `value` are dropped and the tree is unchanged.
    pub(crate) fn try_insert_unique(&mut self, key: K, value: V) -> Result<(Handle, bool), TreeError> {
        match self.store.search(&key) {
            SearchResult::Found(h) => Ok((h, false)),
            SearchResult::Vacant {
                parent,
                side,
            } => Ok((self.insert_vacant(parent, side, key, value)?, true)),
        }
    }

    /// Inserts `key` by bracketing it from `hint` instead of descending from the root.
    pub(crate) fn try_insert_hint(&mut self, hint: Link, key: K, value: V) -> Result<(Handle, bool), TreeError> {
        match self.store.search_from_hint(hint, &key) {
            SearchResult::Found(h) => Ok((h, false)),
            SearchResult::Vacant {
                parent,
                side,
            } => Ok((self.insert_vacant(parent, side, key, value)?, true)),
        }
    }

    /// Inserts `key` with `value`, replacing and returning the value of an equal key.
    /// The key already in the tree is kept.
    pub(crate) fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, TreeError> {
        match self.store.search(&key) {
            SearchResult::Found(h) => Ok(Some(core::mem::replace(self.store.node_mut(h).value_mut(), value))),
            SearchResult::Vacant {
                parent,
                side,
            } => {
                self.insert_vacant(parent, side, key, value)?;
                Ok(None)
            }
        }
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let h = self.store.find(key).handle()?;
        Some(self.remove_at(h).0)
    }
}

impl<K: Clone, V: Clone> RawTree<K, V> {
    /// Copies this tree's shape node for node into the empty `store`, using an explicit stack
    /// so degenerate (list-shaped) trees cannot overflow the call stack.
    fn copy_into(&self, store: &mut NodeStore<K, V>) {
        let Link::Node(root) = self.store.sentinel().root else {
            return;
        };

        // (node to copy, parent copy, slot in the parent copy)
        let mut stack: SmallVec<[(Handle, Link, Side); 32]> = SmallVec::new();
        stack.push((root, Link::Nil, Side::Left));
        while let Some((source, parent, side)) = stack.pop() {
            let node = self.store.node(source);
            let copy = match store.create_node(node.key().clone(), node.value().clone(), parent, Link::Nil, Link::Nil) {
                Ok(h) => h,
                Err(error) => panic!("`RawTree::clone()` - {error}!"),
            };

            match (parent, side) {
                (Link::Nil, _) => store.sentinel_mut().root = copy.into(),
                (_, Side::Left) => store.set_left(parent, copy.into()),
                (_, Side::Right) => store.set_right(parent, copy.into()),
            }

            if let Link::Node(right) = node.right() {
                stack.push((right, copy.into(), Side::Right));
            }
            if let Link::Node(left) = node.left() {
                stack.push((left, copy.into(), Side::Left));
            }
        }

        if let Link::Node(new_root) = store.sentinel().root {
            let first = store.minimum(new_root);
            let last = store.maximum(new_root);
            let sentinel = store.sentinel_mut();
            sentinel.first = first.into();
            sentinel.last = last.into();
        }
    }
}

impl<K: Clone, V: Clone> Clone for RawTree<K, V> {
    fn clone(&self) -> Self {
        let mut store = NodeStore::with_capacity(self.len);
        self.copy_into(&mut store);
        Self {
            store,
            len: self.len,
        }
    }

    /// Releases the current contents and copies `source` into the same arena, so positions
    /// into the old contents stay detectably stale.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        source.copy_into(&mut self.store);
        self.len = source.len;
    }
}
