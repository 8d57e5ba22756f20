use super::arena::Arena;
use super::handle::{Handle, Link};
use crate::TreeError;

/// A key-holding tree node. The tree's shape lives entirely in the three links.
pub(crate) struct Node<K, V> {
    parent: Link,
    left: Link,
    right: Link,
    key: K,
    value: V,
}

/// The sentinel's links.
///
/// `root` plays the sentinel's parent link, `first` its left link (the minimum) and
/// `last` its right link (the maximum). `Nil` in any of them means "points back at the
/// sentinel itself", which is exactly the empty-tree state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Sentinel {
    pub(crate) root: Link,
    pub(crate) first: Link,
    pub(crate) last: Link,
}

/// Which child slot of a parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl<K, V> Node<K, V> {
    /// Creates a node with the given key, value and links.
    pub(crate) fn new(key: K, value: V, parent: Link, left: Link, right: Link) -> Self {
        Self {
            parent,
            left,
            right,
            key,
            value,
        }
    }

    #[inline]
    pub(crate) fn parent(&self) -> Link {
        self.parent
    }

    #[inline]
    pub(crate) fn left(&self) -> Link {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Link {
        self.right
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    /// Returns true if neither child is present.
    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_nil() && self.right.is_nil()
    }

    /// Returns true if both children are present.
    pub(crate) fn is_full(&self) -> bool {
        !self.left.is_nil() && !self.right.is_nil()
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl Sentinel {
    /// Creates a sentinel whose links all point back at itself.
    pub(crate) const fn new() -> Self {
        Self {
            root: Link::Nil,
            first: Link::Nil,
            last: Link::Nil,
        }
    }
}

/// Owns every node of one tree plus its sentinel.
///
/// Link accessors take a [`Link`] rather than a [`Handle`] so callers can walk through the
/// sentinel exactly as through any other node: the sentinel's parent is the root, its left
/// child the minimum and its right child the maximum.
pub(crate) struct NodeStore<K, V> {
    nodes: Arena<Node<K, V>>,
    sentinel: Sentinel,
}

impl<K, V> NodeStore<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            sentinel: Sentinel::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            sentinel: Sentinel::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), TreeError> {
        self.nodes.try_reserve(additional)
    }

    /// Number of live nodes.
    pub(crate) const fn live(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn sentinel(&self) -> &Sentinel {
        &self.sentinel
    }

    #[inline]
    pub(crate) fn sentinel_mut(&mut self) -> &mut Sentinel {
        &mut self.sentinel
    }

    /// Allocates a node nothing links to yet. Only the new node's own links are set; the
    /// caller wires the neighbours once this has succeeded.
    pub(crate) fn create_node(
        &mut self,
        key: K,
        value: V,
        parent: Link,
        left: Link,
        right: Link,
    ) -> Result<Handle, TreeError> {
        self.nodes.try_alloc(Node::new(key, value, parent, left, right))
    }

    /// Releases an already unlinked node and hands back its contents.
    pub(crate) fn destroy(&mut self, handle: Handle) -> (K, V) {
        self.nodes.take(handle).into_entry()
    }

    /// Drops every node and resets the sentinel.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.sentinel = Sentinel::new();
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    pub(crate) fn generation(&self, handle: Handle) -> u32 {
        self.nodes.generation(handle)
    }

    #[inline]
    pub(crate) fn is_live(&self, handle: Handle, generation: u32) -> bool {
        self.nodes.is_live(handle, generation)
    }

    #[inline]
    pub(crate) fn parent(&self, link: Link) -> Link {
        match link {
            Link::Nil => self.sentinel.root,
            Link::Node(h) => self.node(h).parent,
        }
    }

    #[inline]
    pub(crate) fn left(&self, link: Link) -> Link {
        match link {
            Link::Nil => self.sentinel.first,
            Link::Node(h) => self.node(h).left,
        }
    }

    #[inline]
    pub(crate) fn right(&self, link: Link) -> Link {
        match link {
            Link::Nil => self.sentinel.last,
            Link::Node(h) => self.node(h).right,
        }
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, link: Link, to: Link) {
        match link {
            Link::Nil => self.sentinel.root = to,
            Link::Node(h) => self.node_mut(h).parent = to,
        }
    }

    #[inline]
    pub(crate) fn set_left(&mut self, link: Link, to: Link) {
        match link {
            Link::Nil => self.sentinel.first = to,
            Link::Node(h) => self.node_mut(h).left = to,
        }
    }

    #[inline]
    pub(crate) fn set_right(&mut self, link: Link, to: Link) {
        match link {
            Link::Nil => self.sentinel.last = to,
            Link::Node(h) => self.node_mut(h).right = to,
        }
    }
}
