use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::{Bound, Index, RangeBounds};

use crate::raw::{Link, Pretty, RawTree};
use crate::{InvariantError, Position, TreeError};

mod capacity;

/// Validates that the start bound does not exceed the end bound.
///
/// # Panics
///
/// Panics if `start > end` or if `start == end` and both bounds are `Excluded`.
pub(crate) fn validate_range_bounds<T, R>(range: &R)
where
    T: ?Sized + Ord,
    R: RangeBounds<T>,
{
    if let (Bound::Included(start) | Bound::Excluded(start), Bound::Included(end) | Bound::Excluded(end)) =
        (range.start_bound(), range.end_bound())
    {
        let valid =
            if matches!(range.start_bound(), Bound::Excluded(_)) && matches!(range.end_bound(), Bound::Excluded(_)) {
                start < end
            } else {
                start <= end
            };
        assert!(valid, "range start is greater than range end in BSTreeMap");
    }
}

/// An ordered map based on an unbalanced [binary search tree].
///
/// Given a key type with a [total order], an ordered map stores its entries in key order.
/// That means that keys must be of a type that implements the [`Ord`] trait,
/// such that two keys can always be compared to determine their [`Ordering`].
///
/// Every entry lives in its own node, linked to its parent and its two children. The tree is
/// never rebalanced, so the cost of a lookup is proportional to the depth of the key: O(log n)
/// on average for keys arriving in random order, but O(n) when keys arrive sorted. The
/// [`insert_hint`](BSTreeMap::insert_hint) method makes sorted bulk loads cheap anyway, and
/// teardown, [`clear`](BSTreeMap::clear) and [`clone`](Clone::clone) never recurse, so
/// degenerate trees are slow but safe.
///
/// Besides the usual iterators, the map hands out [`Position`]s: small cursors that stay valid
/// across insertions and across removal of other entries. See [`BSTreeMap::begin`],
/// [`BSTreeMap::find`] and [`BSTreeMap::erase`].
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `BSTreeMap` that observed the logic error and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use bs_tree::BSTreeMap;
///
/// let mut planets = BSTreeMap::new();
/// planets.insert("Mars", 1.5);
/// planets.insert("Earth", 1.0);
/// planets.insert("Venus", 0.7);
///
/// assert_eq!(planets.get("Earth"), Some(&1.0));
/// assert_eq!(planets.keys().copied().collect::<Vec<_>>(), ["Earth", "Mars", "Venus"]);
///
/// // Walk with positions instead of an iterator.
/// let mut position = planets.begin();
/// while let Ok((name, distance)) = planets.get_at(position) {
///     println!("{name}: {distance} AU");
///     position = planets.next_position(position).unwrap();
/// }
/// ```
///
/// A `BSTreeMap` with a known list of items can be initialized from an array:
///
/// ```
/// use bs_tree::BSTreeMap;
///
/// let solar_distance = BSTreeMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(solar_distance.len(), 4);
/// ```
///
/// Keys are always ordered by their [`Ord`] implementation. For any other order, wrap the key
/// in a newtype whose `Ord` expresses it, such as [`Reverse`]:
///
/// ```
/// use core::cmp::Reverse;
/// use bs_tree::BSTreeMap;
///
/// let mut scores = BSTreeMap::new();
/// scores.insert(Reverse(72), "Ana");
/// scores.insert(Reverse(91), "Ben");
/// scores.insert(Reverse(85), "Cy");
///
/// let ranking: Vec<_> = scores.values().copied().collect();
/// assert_eq!(ranking, ["Ben", "Cy", "Ana"]);
/// assert_eq!(scores.first_key_value(), Some((&Reverse(91), &"Ben")));
/// ```
///
/// [`Reverse`]: core::cmp::Reverse
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
pub struct BSTreeMap<K, V> {
    raw: RawTree<K, V>,
}

/// An iterator over the entries of a `BSTreeMap`.
///
/// This `struct` is created by the [`iter`] method on [`BSTreeMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use bs_tree::BSTreeMap;
///
/// let map = BSTreeMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: BSTreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: &'a RawTree<K, V>,
    front: Link,
    back: Link,
    remaining: usize,
}

/// An owning iterator over the entries of a `BSTreeMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`BSTreeMap`]
/// (provided by the [`IntoIterator`] trait). See its documentation for more.
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of a `BSTreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`BSTreeMap`]. See its
/// documentation for more.
///
/// [`keys`]: BSTreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `BSTreeMap`.
///
/// This `struct` is created by the [`values`] method on [`BSTreeMap`]. See its
/// documentation for more.
///
/// [`values`]: BSTreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An owning iterator over the keys of a `BSTreeMap`.
///
/// This `struct` is created by the [`into_keys`] method on [`BSTreeMap`].
/// See its documentation for more.
///
/// [`into_keys`]: BSTreeMap::into_keys
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

/// An owning iterator over the values of a `BSTreeMap`.
///
/// This `struct` is created by the [`into_values`] method on [`BSTreeMap`].
/// See its documentation for more.
///
/// [`into_values`]: BSTreeMap::into_values
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

/// An iterator over a sub-range of entries in a `BSTreeMap`.
///
/// This `struct` is created by the [`range`] method on [`BSTreeMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use bs_tree::BSTreeMap;
///
/// let map = BSTreeMap::from([(1, "a"), (2, "b"), (3, "c")]);
/// let mut range = map.range(2..=3);
/// assert_eq!(range.next(), Some((&2, &"b")));
/// assert_eq!(range.next_back(), Some((&3, &"c")));
/// assert_eq!(range.next(), None);
/// ```
///
/// [`range`]: BSTreeMap::range
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, K: 'a, V: 'a> {
    tree: &'a RawTree<K, V>,
    front: Link,
    back: Link,
    /// Set once `front` and `back` have met.
    finished: bool,
}

impl<K, V> BSTreeMap<K, V> {
    /// Makes a new, empty `BSTreeMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> BSTreeMap<K, V> {
        BSTreeMap {
            raw: RawTree::new(),
        }
    }

    /// Clears the map, removing all elements.
    ///
    /// Every position except [`end`](BSTreeMap::end) is invalidated. The node storage is kept
    /// for reuse.
    ///
    /// # Complexity
    ///
    /// O(n), in a single pass over the node storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut a = BSTreeMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut a = BSTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut a = BSTreeMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a");
    /// assert!(!a.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the first key-value pair in the map.
    /// The key in this pair is the minimum key in the map.
    ///
    /// # Complexity
    ///
    /// O(1), the minimum is cached.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first().handle().map(|h| self.raw.key_value(h))
    }

    /// Returns the last key-value pair in the map.
    /// The key in this pair is the maximum key in the map.
    ///
    /// # Complexity
    ///
    /// O(1), the maximum is cached.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.last_key_value(), Some((&2, &"a")));
    /// ```
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last().handle().map(|h| self.raw.key_value(h))
    }

    /// Removes and returns the first element in the map.
    /// The key of this element is the minimum key that was in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// while let Some((key, _val)) = map.pop_first() {
    ///     assert!(map.iter().all(|(k, _v)| *k > key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.pop_first()
    }

    /// Removes and returns the last element in the map.
    /// The key of this element is the maximum key that was in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// while let Some((key, _val)) = map.pop_last() {
    ///     assert!(map.iter().all(|(k, _v)| *k < key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.pop_last()
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all pairs `(k, v)` for which `f(&k, &mut v)` returns `false`.
    /// The elements are visited in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map: BSTreeMap<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
    /// // Keep only the elements with even-numbered keys.
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert!(map.into_iter().eq(vec![(0, 0), (2, 20), (4, 40), (6, 60)]));
    /// ```
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.raw.retain(f);
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut a = BSTreeMap::new();
    /// a.insert(2, "b");
    /// a.insert(1, "a");
    ///
    /// let keys: Vec<_> = a.keys().cloned().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.iter(),
        }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut a = BSTreeMap::new();
    /// a.insert(1, "hello");
    /// a.insert(2, "goodbye");
    ///
    /// let values: Vec<&str> = a.values().cloned().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.iter(),
        }
    }

    /// Creates a consuming iterator visiting all the keys, in sorted order.
    /// The map cannot be used after calling this.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut a = BSTreeMap::new();
    /// a.insert(2, "b");
    /// a.insert(1, "a");
    ///
    /// let keys: Vec<i32> = a.into_keys().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }

    /// Creates a consuming iterator visiting all the values, in order by key.
    /// The map cannot be used after calling this.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut a = BSTreeMap::new();
    /// a.insert(1, "hello");
    /// a.insert(2, "goodbye");
    ///
    /// let values: Vec<&str> = a.into_values().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues {
            inner: self.into_iter(),
        }
    }

    /// Returns the position of the minimum entry, or [`end`](BSTreeMap::end) if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// assert_eq!(map.begin(), map.end());
    ///
    /// map.insert(5, "five");
    /// assert_eq!(map.get_at(map.begin()), Ok((&5, &"five")));
    /// ```
    #[must_use]
    pub fn begin(&self) -> Position {
        self.raw.position(self.raw.first())
    }

    /// Returns the end position, one past the maximum entry.
    ///
    /// The end position holds no entry and is never invalidated.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn end(&self) -> Position {
        Position::END
    }

    /// Returns the position of the maximum entry, where a descending walk starts, or
    /// [`end`](BSTreeMap::end) if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let map = BSTreeMap::from([(1, 'a'), (2, 'b'), (3, 'c')]);
    /// let mut position = map.rbegin();
    /// let mut keys = Vec::new();
    /// while position != map.rend() {
    ///     keys.push(*map.get_at(position).unwrap().0);
    ///     position = map.prev_position(position).unwrap();
    /// }
    /// assert_eq!(keys, [3, 2, 1]);
    /// ```
    #[must_use]
    pub fn rbegin(&self) -> Position {
        self.raw.position(self.raw.last())
    }

    /// Returns the position a descending walk ends at. This is the same position as
    /// [`end`](BSTreeMap::end).
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn rend(&self) -> Position {
        Position::END
    }

    /// Returns the position of the next entry in key order.
    ///
    /// Stepping past the maximum reaches [`end`](BSTreeMap::end), and stepping from `end`
    /// wraps around to [`begin`](BSTreeMap::begin).
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidPosition`] if the entry at `position` has been removed.
    ///
    /// # Complexity
    ///
    /// O(depth) in the worst case, O(1) amortized over a full walk.
    pub fn next_position(&self, position: Position) -> Result<Position, TreeError> {
        let link = self.raw.resolve(position)?;
        Ok(self.raw.position(self.raw.successor(link)))
    }

    /// Returns the position of the previous entry in key order.
    ///
    /// Stepping back from the minimum reaches [`end`](BSTreeMap::end), and stepping back from
    /// `end` wraps around to [`rbegin`](BSTreeMap::rbegin).
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidPosition`] if the entry at `position` has been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let map = BSTreeMap::from([(1, 'a'), (2, 'b')]);
    /// assert_eq!(map.prev_position(map.end()), Ok(map.rbegin()));
    /// assert_eq!(map.prev_position(map.begin()), Ok(map.end()));
    /// assert_eq!(map.next_position(map.end()), Ok(map.begin()));
    /// ```
    pub fn prev_position(&self, position: Position) -> Result<Position, TreeError> {
        let link = self.raw.resolve(position)?;
        Ok(self.raw.position(self.raw.predecessor(link)))
    }

    /// Returns the entry at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidPosition`] if `position` is [`end`](BSTreeMap::end) or its
    /// entry has been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::{BSTreeMap, TreeError};
    ///
    /// let mut map = BSTreeMap::from([(1, "a")]);
    /// let position = map.find(&1);
    /// assert_eq!(map.get_at(position), Ok((&1, &"a")));
    ///
    /// map.remove(&1);
    /// assert_eq!(map.get_at(position), Err(TreeError::InvalidPosition));
    /// assert_eq!(map.get_at(map.end()), Err(TreeError::InvalidPosition));
    /// ```
    pub fn get_at(&self, position: Position) -> Result<(&K, &V), TreeError> {
        let h = self.raw.resolve_node(position)?;
        Ok(self.raw.key_value(h))
    }

    /// Removes the entry at `position` and returns the position of the entry that followed it.
    ///
    /// Only `position` itself is invalidated; positions of other entries stay valid.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidPosition`] if `position` is [`end`](BSTreeMap::end) or its
    /// entry has already been removed. The map is unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map: BSTreeMap<i32, ()> = (0..10).map(|k| (k, ())).collect();
    ///
    /// // Remove every odd key in one forward walk.
    /// let mut position = map.find(&1);
    /// while !position.is_end() {
    ///     position = map.erase(position).unwrap();
    ///     if !position.is_end() {
    ///         position = map.next_position(position).unwrap();
    ///     }
    /// }
    /// assert_eq!(map.into_keys().collect::<Vec<_>>(), [0, 2, 4, 6, 8]);
    /// ```
    pub fn erase(&mut self, position: Position) -> Result<Position, TreeError> {
        let h = self.raw.resolve_node(position)?;
        let (_, next) = self.raw.remove_at(h);
        Ok(self.raw.position(next))
    }

    /// Swaps the contents of `self` and `other` in O(1).
    ///
    /// Positions follow their entries: a position taken from `self` refers to the same entry,
    /// now in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut a = BSTreeMap::from([(1, "a")]);
    /// let mut b = BSTreeMap::from([(2, "b"), (3, "c")]);
    /// let one = a.begin();
    ///
    /// a.swap(&mut b);
    /// assert_eq!(a.len(), 2);
    /// assert_eq!(b.get_at(one), Ok((&1, &"a")));
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.raw, &mut other.raw);
    }

    /// Returns a value that displays the tree's shape, rotated a quarter turn: the root at
    /// the left margin, right subtrees above and left subtrees below their parent, one level
    /// of indentation per depth, and `nil` for each absent child.
    ///
    /// This is an extension meant for debugging and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let map = BSTreeMap::from([(2, ()), (1, ()), (3, ())]);
    /// let picture = map.pretty().to_string();
    /// assert_eq!(picture.lines().nth(1), Some("    3"));
    /// assert_eq!(picture.lines().nth(3), Some("2"));
    /// ```
    pub fn pretty(&self) -> impl fmt::Display + '_
    where
        K: fmt::Debug,
    {
        Pretty::new(&self.raw)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(depth)
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// The supplied key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// map.insert(String::from("one"), 1);
    /// let (key, _) = map.get_key_value("one").unwrap();
    /// assert_eq!(key, "one");
    /// assert_eq!(map.get_key_value("two"), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).handle().map(|h| self.raw.key_value(h))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let h = self.raw.find(key).handle()?;
        Some(self.raw.key_value_mut(h).1)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.contains_key(&1), true);
    /// assert_eq!(map.contains_key(&2), false);
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        !self.raw.find(key).is_nil()
    }

    /// Returns the number of entries with the given key: `0` or `1`, since keys are unique.
    #[must_use]
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        usize::from(self.contains_key(key))
    }

    /// Returns the position of the entry with the given key, or [`end`](BSTreeMap::end).
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let map = BSTreeMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.get_at(map.find(&2)), Ok((&2, &"b")));
    /// assert_eq!(map.find(&3), map.end());
    /// ```
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.position(self.raw.find(key))
    }

    /// Returns the position of the first entry whose key is not less than `key`, or
    /// [`end`](BSTreeMap::end) if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let map = BSTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.get_at(map.lower_bound(&20)).map(|(k, _)| *k), Ok(20));
    /// assert_eq!(map.get_at(map.lower_bound(&21)).map(|(k, _)| *k), Ok(30));
    /// assert_eq!(map.lower_bound(&31), map.end());
    /// ```
    #[must_use]
    pub fn lower_bound<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.position(self.raw.lower_bound(key))
    }

    /// Returns the position of the first entry whose key is greater than `key`, or
    /// [`end`](BSTreeMap::end) if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let map = BSTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.get_at(map.upper_bound(&20)).map(|(k, _)| *k), Ok(30));
    /// assert_eq!(map.upper_bound(&30), map.end());
    /// ```
    #[must_use]
    pub fn upper_bound<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.position(self.raw.upper_bound(key))
    }

    /// Returns `(lower_bound(key), upper_bound(key))`: the positions delimiting the entries
    /// equal to `key`. They are equal when `key` is absent.
    #[must_use]
    pub fn equal_range<Q>(&self, key: &Q) -> (Position, Position)
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    ///
    /// If the map did have this key present, the value is updated, and the old
    /// value is returned. The key is not updated, though; this matters for
    /// types that can be `==` without being identical.
    ///
    /// # Panics
    ///
    /// Panics if a node cannot be allocated. See [`BSTreeMap::try_insert_unique`] for a
    /// fallible insert.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        match self.raw.try_insert(key, value) {
            Ok(old) => old,
            Err(error) => panic!("`BSTreeMap::insert()` - {error}!"),
        }
    }

    /// Inserts `key` with `value` unless the key is already present.
    ///
    /// Returns the position of the entry holding the key and whether it was inserted. An
    /// existing entry is left untouched, and `key` and `value` are dropped.
    ///
    /// # Panics
    ///
    /// Panics if a node cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// let (first, inserted) = map.insert_unique(1, "a");
    /// assert!(inserted);
    ///
    /// let (again, inserted) = map.insert_unique(1, "b");
    /// assert!(!inserted);
    /// assert_eq!(again, first);
    /// assert_eq!(map[&1], "a");
    /// ```
    pub fn insert_unique(&mut self, key: K, value: V) -> (Position, bool)
    where
        K: Ord,
    {
        match self.try_insert_unique(key, value) {
            Ok(result) => result,
            Err(error) => panic!("`BSTreeMap::insert_unique()` - {error}!"),
        }
    }

    /// Fallible form of [`BSTreeMap::insert_unique`].
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::AllocationFailed`] or [`TreeError::CapacityExceeded`] if a node
    /// cannot be allocated. The map is unchanged in that case.
    pub fn try_insert_unique(&mut self, key: K, value: V) -> Result<(Position, bool), TreeError>
    where
        K: Ord,
    {
        let (h, inserted) = self.raw.try_insert_unique(key, value)?;
        Ok((self.raw.position(h.into()), inserted))
    }

    /// Inserts `key` with `value` near `hint`, unless the key is already present, and returns
    /// the position of the entry holding the key.
    ///
    /// The search walks in key order from `hint` instead of descending from the root, so a
    /// hint at or just after the key's final place makes the insert O(1) amortized. Any
    /// valid hint, [`end`](BSTreeMap::end) included, gives the same result; a poor hint only
    /// costs time.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidPosition`] if the entry at `hint` has been removed, and
    /// [`TreeError::AllocationFailed`] or [`TreeError::CapacityExceeded`] if a node cannot be
    /// allocated. The map is unchanged in either case.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// // Sorted input: hinting at the end keeps every insert O(1).
    /// let mut map = BSTreeMap::new();
    /// for key in 0..1000 {
    ///     map.insert_hint(map.end(), key, key * 2).unwrap();
    /// }
    /// assert_eq!(map.len(), 1000);
    /// assert_eq!(map.check_invariants(), Ok(()));
    /// ```
    pub fn insert_hint(&mut self, hint: Position, key: K, value: V) -> Result<Position, TreeError>
    where
        K: Ord,
    {
        let hint = self.raw.resolve(hint)?;
        let (h, _) = self.raw.try_insert_hint(hint, key, value)?;
        Ok(self.raw.position(h.into()))
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }

    /// Removes the entry with the given key and returns how many entries were removed:
    /// `0` or `1`.
    pub fn erase_key<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        usize::from(self.raw.remove(key).is_some())
    }

    /// Removes the entries from `first` up to, but not including, `last`, and returns `last`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidPosition`] if either position refers to a removed entry,
    /// or if `last` comes before `first`. Nothing is removed in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map: BSTreeMap<i32, ()> = (0..10).map(|k| (k, ())).collect();
    /// let (first, last) = (map.find(&3), map.find(&7));
    /// assert_eq!(map.erase_range(first, last), Ok(last));
    /// assert_eq!(map.into_keys().collect::<Vec<_>>(), [0, 1, 2, 7, 8, 9]);
    /// ```
    pub fn erase_range(&mut self, first: Position, last: Position) -> Result<Position, TreeError>
    where
        K: Ord,
    {
        let from = self.raw.resolve(first)?;
        let to = self.raw.resolve(last)?;
        match (from, to) {
            (Link::Nil, Link::Node(_)) => return Err(TreeError::InvalidPosition),
            (Link::Node(a), Link::Node(b)) if self.raw.key_value(a).0 > self.raw.key_value(b).0 => {
                return Err(TreeError::InvalidPosition);
            }
            _ => {}
        }
        self.raw.remove_range(from, to);
        Ok(last)
    }

    /// Constructs a double-ended iterator over a sub-range of elements in the map.
    /// The simplest way is to use the range syntax `min..max`, thus `range(min..max)` will
    /// yield elements from min (inclusive) to max (exclusive).
    /// The range may also be entered as `(Bound<T>, Bound<T>)`, so for example
    /// `range((Excluded(4), Included(10)))` will yield a left-exclusive, right-inclusive
    /// range from 4 to 10.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`.
    /// Panics if range `start == end` and both bounds are `Excluded`.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::ops::Bound::Included;
    /// use bs_tree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// map.insert(3, "a");
    /// map.insert(5, "b");
    /// map.insert(8, "c");
    /// for (&key, &value) in map.range((Included(&4), Included(&8))) {
    ///     println!("{key}: {value}");
    /// }
    /// assert_eq!(Some((&5, &"b")), map.range(4..).next());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth) to create the iterator; each iteration step is O(1) amortized.
    pub fn range<T, R>(&self, range: R) -> Range<'_, K, V>
    where
        T: ?Sized + Ord,
        K: Borrow<T> + Ord,
        R: RangeBounds<T>,
    {
        validate_range_bounds(&range);

        let front = match range.start_bound() {
            Bound::Unbounded => self.raw.first(),
            Bound::Included(start) => self.raw.lower_bound(start),
            Bound::Excluded(start) => self.raw.upper_bound(start),
        };
        // One past the back of the range.
        let stop = match range.end_bound() {
            Bound::Unbounded => Link::Nil,
            Bound::Included(end) => self.raw.upper_bound(end),
            Bound::Excluded(end) => self.raw.lower_bound(end),
        };
        let back = self.raw.predecessor(stop);

        let finished = match (front, back) {
            (Link::Node(f), Link::Node(b)) => self.raw.key_value(f).0 > self.raw.key_value(b).0,
            _ => true,
        };
        Range {
            tree: &self.raw,
            front,
            back,
            finished,
        }
    }

    /// Walks the whole tree and verifies its structural invariants: parent and child links
    /// agree, keys are strictly increasing in order, the cached minimum and maximum are
    /// current, and the length matches the number of reachable entries.
    ///
    /// This is an extension meant for tests and debugging. It only fails if this crate has a
    /// bug or the key type's [`Ord`] implementation is not a total order.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant found.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        K: Ord,
    {
        self.raw.check()
    }
}

impl<K: Clone, V: Clone> Clone for BSTreeMap<K, V> {
    fn clone(&self) -> Self {
        BSTreeMap {
            raw: self.raw.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.raw.clone_from(&source.raw);
    }
}

impl<K: Hash, V: Hash> Hash for BSTreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for BSTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for BSTreeMap<K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for BSTreeMap<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord> Ord for BSTreeMap<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BSTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for BSTreeMap<K, V> {
    fn default() -> Self {
        BSTreeMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BSTreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = BSTreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for BSTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for BSTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a BSTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> IntoIterator for BSTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let map = BSTreeMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<K, Q, V> Index<&Q> for BSTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `BSTreeMap`.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for BSTreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let h = self.front.handle()?;
        self.front = tree.successor(self.front);
        self.remaining -= 1;
        Some(tree.key_value(h))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let h = self.back.handle()?;
        self.back = tree.predecessor(self.back);
        self.remaining -= 1;
        Some(tree.key_value(h))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    /// Creates an empty `bstree_map::IntoIter`.
    ///
    /// ```
    /// # use bs_tree::bstree_map;
    /// let iter: bstree_map::IntoIter<u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: alloc::vec::Vec::new().into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

impl<K: fmt::Debug, V> fmt::Debug for IntoKeys<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(k, _)| k)).finish()
    }
}

impl<K, V> Default for IntoKeys<K, V> {
    fn default() -> Self {
        IntoKeys {
            inner: IntoIter::default(),
        }
    }
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoValues<K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for IntoValues<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(_, v)| v)).finish()
    }
}

impl<K, V> Default for IntoValues<K, V> {
    fn default() -> Self {
        IntoValues {
            inner: IntoIter::default(),
        }
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let tree = self.tree;
        let Link::Node(h) = self.front else {
            self.finished = true;
            return None;
        };
        if self.front == self.back {
            self.finished = true;
        } else {
            self.front = tree.successor(self.front);
        }
        Some(tree.key_value(h))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            (1, Some(self.tree.len()))
        }
    }
}

impl<K, V> DoubleEndedIterator for Range<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let tree = self.tree;
        let Link::Node(h) = self.back else {
            self.finished = true;
            return None;
        };
        if self.front == self.back {
            self.finished = true;
        } else {
            self.back = tree.predecessor(self.back);
        }
        Some(tree.key_value(h))
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Range {
            tree: self.tree,
            front: self.front,
            back: self.back,
            finished: self.finished,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Range<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    #[test]
    fn range_bounds() {
        let map: BSTreeMap<i32, ()> = [10, 20, 30, 40].into_iter().map(|k| (k, ())).collect();
        let keys = |r: Range<'_, i32, ()>| r.map(|(k, _)| *k).collect::<Vec<_>>();

        assert_eq!(keys(map.range(..)), [10, 20, 30, 40]);
        assert_eq!(keys(map.range(20..40)), [20, 30]);
        assert_eq!(keys(map.range(15..=30)), [20, 30]);
        assert_eq!(keys(map.range((Bound::Excluded(20), Bound::Unbounded))), [30, 40]);
        assert_eq!(keys(map.range(21..29)), Vec::<i32>::new());
        assert_eq!(keys(map.range(20..20)), Vec::<i32>::new());
        assert_eq!(keys(map.range(41..)), Vec::<i32>::new());
        assert_eq!(keys(map.range(..10)), Vec::<i32>::new());
        assert_eq!(map.range(20..=30).rev().map(|(k, _)| *k).collect::<Vec<_>>(), [30, 20]);
    }

    #[test]
    fn range_meets_in_the_middle() {
        let map: BSTreeMap<i32, ()> = (0..5).map(|k| (k, ())).collect();
        let mut range = map.range(1..4);
        assert_eq!(range.next().map(|(k, _)| *k), Some(1));
        assert_eq!(range.next_back().map(|(k, _)| *k), Some(3));
        assert_eq!(range.next().map(|(k, _)| *k), Some(2));
        assert_eq!(range.next_back(), None);
        assert_eq!(range.next(), None);
    }

    #[test]
    #[should_panic(expected = "range start is greater than range end in BSTreeMap")]
    fn inverted_range_panics() {
        let map: BSTreeMap<i32, ()> = BSTreeMap::new();
        #[allow(clippy::reversed_empty_ranges)]
        let _ = map.range(5..1);
    }

    #[test]
    fn iter_meets_in_the_middle() {
        let map: BSTreeMap<i32, i32> = (0..4).map(|k| (k, k)).collect();
        let mut iter = map.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some((&0, &0)));
        assert_eq!(iter.next_back(), Some((&3, &3)));
        assert_eq!(iter.next_back(), Some((&2, &2)));
        assert_eq!(iter.next(), Some((&1, &1)));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn erase_range_rejects_inverted_positions() {
        let mut map: BSTreeMap<i32, ()> = (0..5).map(|k| (k, ())).collect();
        let (three, one) = (map.find(&3), map.find(&1));
        assert_eq!(map.erase_range(three, one), Err(TreeError::InvalidPosition));
        assert_eq!(map.erase_range(map.end(), one), Err(TreeError::InvalidPosition));
        assert_eq!(map.len(), 5);

        assert_eq!(map.erase_range(one, one), Ok(one));
        assert_eq!(map.erase_range(three, map.end()), Ok(map.end()));
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), [0, 1, 2]);
    }

    #[test]
    fn debug_formats() {
        let map = BSTreeMap::from([(1, 'a'), (2, 'b')]);
        assert_eq!(alloc::format!("{map:?}"), "{1: 'a', 2: 'b'}");
        assert_eq!(alloc::format!("{:?}", map.keys()), "[1, 2]");
        assert_eq!(alloc::format!("{:?}", map.into_values()), "['a', 'b']");
    }
}
