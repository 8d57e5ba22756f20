use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::RangeBounds;

use crate::bstree_map::{IntoKeys, Keys, Range as MapRange};
use crate::{BSTreeMap, InvariantError, Position, TreeError};

mod capacity;

/// An ordered set based on an unbalanced binary search tree.
///
/// See [`BSTreeMap`]'s documentation for a discussion of this collection's performance and of
/// the [`Position`] cursors it hands out.
///
/// Items are ordered by [`Ord`]; custom orders go through a newtype such as
/// [`Reverse`](core::cmp::Reverse).
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the [`Ord`] trait, changes while it is in the set. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `BSTreeSet` that observed the logic error and not result in undefined behavior.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use bs_tree::BSTreeSet;
///
/// let mut set = BSTreeSet::new();
/// for key in [40, 50, 30, 35, 10, 75, 23, 87, 68] {
///     set.insert(key);
/// }
/// assert_eq!(set.len(), 9);
/// assert!(set.iter().copied().eq([10, 23, 30, 35, 40, 50, 68, 75, 87]));
///
/// assert_eq!(set.get_at(set.lower_bound(&35)), Ok(&35));
/// assert_eq!(set.get_at(set.upper_bound(&35)), Ok(&40));
///
/// set.remove(&40);
/// assert_eq!(set.get_at(set.upper_bound(&35)), Ok(&50));
/// assert_eq!(set.check_invariants(), Ok(()));
/// ```
///
/// A `BSTreeSet` with a known list of items can be initialized from an array:
///
/// ```
/// use bs_tree::BSTreeSet;
///
/// let set = BSTreeSet::from([1, 2, 3]);
/// ```
pub struct BSTreeSet<T> {
    map: BSTreeMap<T, ()>,
}

/// An iterator over the items of a `BSTreeSet`.
///
/// This `struct` is created by the [`iter`] method on [`BSTreeSet`].
/// See its documentation for more.
///
/// # Examples
///
/// ```
/// use bs_tree::BSTreeSet;
///
/// let set = BSTreeSet::from([3, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// ```
///
/// [`iter`]: BSTreeSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: Keys<'a, T, ()>,
}

/// An owning iterator over the items of a `BSTreeSet` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`BSTreeSet`]
/// (provided by the [`IntoIterator`] trait). See its documentation for more.
///
/// [`into_iter`]: BSTreeSet#method.into_iter
pub struct IntoIter<T> {
    inner: IntoKeys<T, ()>,
}

/// An iterator over a sub-range of items in a `BSTreeSet`.
///
/// This `struct` is created by the [`range`] method on [`BSTreeSet`].
/// See its documentation for more.
///
/// # Examples
///
/// ```
/// use bs_tree::BSTreeSet;
///
/// let set = BSTreeSet::from([1, 2, 3, 4]);
/// let mut range = set.range(2..=3);
/// assert_eq!(range.next(), Some(&2));
/// assert_eq!(range.next_back(), Some(&3));
/// assert_eq!(range.next(), None);
/// ```
///
/// [`range`]: BSTreeSet::range
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, T: 'a> {
    inner: MapRange<'a, T, ()>,
}

impl<T> BSTreeSet<T> {
    /// Makes a new, empty `BSTreeSet`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut set: BSTreeSet<i32> = BSTreeSet::new();
    /// ```
    #[must_use]
    pub const fn new() -> BSTreeSet<T> {
        BSTreeSet {
            map: BSTreeMap::new(),
        }
    }

    /// Constructs a double-ended iterator over a sub-range of elements in the set.
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
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::new();
    /// set.insert(3);
    /// set.insert(5);
    /// set.insert(8);
    /// for &elem in set.range((Included(&4), Included(&8))) {
    ///     println!("{elem}");
    /// }
    /// assert_eq!(Some(&5), set.range(4..).next());
    /// ```
    pub fn range<K, R>(&self, range: R) -> Range<'_, T>
    where
        K: ?Sized + Ord,
        T: Borrow<K> + Ord,
        R: RangeBounds<K>,
    {
        Range {
            inner: self.map.range(range),
        }
    }

    /// Clears the set, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut v = BSTreeSet::new();
    /// v.insert(1);
    /// v.clear();
    /// assert!(v.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns `true` if the set contains an element equal to the value.
    ///
    /// The value may be any borrowed form of the set's element type,
    /// but the ordering on the borrowed form *must* match the
    /// ordering on the element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let set = BSTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.contains_key(value)
    }

    /// Returns a reference to the element in the set, if any, that is equal to
    /// the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let set = BSTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.get(&2), Some(&2));
    /// assert_eq!(set.get(&4), None);
    /// ```
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.get_key_value(value).map(|(k, ())| k)
    }

    /// Returns a reference to the first element in the set, if any.
    /// This element is always the minimum of all elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// set.insert(2);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(k, ())| k)
    }

    /// Returns a reference to the last element in the set, if any.
    /// This element is always the maximum of all elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::new();
    /// assert_eq!(set.last(), None);
    /// set.insert(1);
    /// assert_eq!(set.last(), Some(&1));
    /// set.insert(2);
    /// assert_eq!(set.last(), Some(&2));
    /// ```
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(k, ())| k)
    }

    /// Removes the first element from the set and returns it, if any.
    /// The first element is always the minimum element in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::new();
    ///
    /// set.insert(1);
    /// while let Some(n) = set.pop_first() {
    ///     assert_eq!(n, 1);
    /// }
    /// assert!(set.is_empty());
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        self.map.pop_first().map(|(k, ())| k)
    }

    /// Removes the last element from the set and returns it, if any.
    /// The last element is always the maximum element in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::new();
    ///
    /// set.insert(1);
    /// while let Some(n) = set.pop_last() {
    ///     assert_eq!(n, 1);
    /// }
    /// assert!(set.is_empty());
    /// ```
    pub fn pop_last(&mut self) -> Option<T> {
        self.map.pop_last().map(|(k, ())| k)
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain an equal value, `true` is
    ///   returned.
    /// - If the set already contained an equal value, `false` is returned, and
    ///   the entry is not updated.
    ///
    /// # Panics
    ///
    /// Panics if a node cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        match self.map.try_insert_unique(value, ()) {
            Ok((_, inserted)) => inserted,
            Err(error) => panic!("`BSTreeSet::insert()` - {error}!"),
        }
    }

    /// Adds a value to the set and returns its position together with whether it was newly
    /// inserted. An equal value already in the set is left in place.
    ///
    /// # Panics
    ///
    /// Panics if a node cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::new();
    /// let (position, inserted) = set.insert_unique(5);
    /// assert!(inserted);
    /// assert_eq!(set.get_at(position), Ok(&5));
    /// assert_eq!(set.insert_unique(5), (position, false));
    /// ```
    pub fn insert_unique(&mut self, value: T) -> (Position, bool)
    where
        T: Ord,
    {
        match self.map.try_insert_unique(value, ()) {
            Ok(result) => result,
            Err(error) => panic!("`BSTreeSet::insert_unique()` - {error}!"),
        }
    }

    /// Fallible form of [`BSTreeSet::insert_unique`].
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::AllocationFailed`] or [`TreeError::CapacityExceeded`] if a node
    /// cannot be allocated. The set is unchanged in that case.
    pub fn try_insert_unique(&mut self, value: T) -> Result<(Position, bool), TreeError>
    where
        T: Ord,
    {
        self.map.try_insert_unique(value, ())
    }

    /// Adds a value near `hint` and returns the position of the element equal to it.
    ///
    /// See [`BSTreeMap::insert_hint`].
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidPosition`] if the element at `hint` has been removed, and
    /// [`TreeError::AllocationFailed`] or [`TreeError::CapacityExceeded`] if a node cannot be
    /// allocated. The set is unchanged in either case.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::from([10, 30]);
    /// let thirty = set.find(&30);
    /// let twenty = set.insert_hint(thirty, 20).unwrap();
    /// assert_eq!(set.prev_position(thirty), Ok(twenty));
    /// ```
    pub fn insert_hint(&mut self, hint: Position, value: T) -> Result<Position, TreeError>
    where
        T: Ord,
    {
        self.map.insert_hint(hint, value, ())
    }

    /// If the set contains an element equal to the value, removes it from the
    /// set and drops it. Returns whether such an element was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::new();
    ///
    /// set.insert(2);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.remove(value).is_some()
    }

    /// Removes and returns the element in the set, if any, that is equal to
    /// the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.take(&2), Some(2));
    /// assert_eq!(set.take(&2), None);
    /// ```
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.remove_entry(value).map(|(k, ())| k)
    }

    /// Removes the element equal to `value` and returns how many elements were removed:
    /// `0` or `1`.
    pub fn erase_key<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.erase_key(value)
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all elements `e` for which `f(&e)` returns `false`.
    /// The elements are visited in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::from([1, 2, 3, 4, 5, 6]);
    /// // Keep only the even numbers.
    /// set.retain(|&k| k % 2 == 0);
    /// assert!(set.iter().eq([2, 4, 6].iter()));
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.map.retain(|k, ()| f(k));
    }

    /// Gets an iterator that visits the elements in the `BSTreeSet` in ascending
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let set = BSTreeSet::from([3, 1, 2]);
    /// let mut set_iter = set.iter();
    /// assert_eq!(set_iter.next(), Some(&1));
    /// assert_eq!(set_iter.next(), Some(&2));
    /// assert_eq!(set_iter.next(), Some(&3));
    /// assert_eq!(set_iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.map.keys(),
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut v = BSTreeSet::new();
    /// assert_eq!(v.len(), 0);
    /// v.insert(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut v = BSTreeSet::new();
    /// assert!(v.is_empty());
    /// v.insert(1);
    /// assert!(!v.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the position of the minimum element, or [`end`](BSTreeSet::end) if the set is
    /// empty.
    #[must_use]
    pub fn begin(&self) -> Position {
        self.map.begin()
    }

    /// Returns the end position, one past the maximum element.
    #[must_use]
    pub fn end(&self) -> Position {
        self.map.end()
    }

    /// Returns the position of the maximum element, or [`end`](BSTreeSet::end) if the set is
    /// empty.
    #[must_use]
    pub fn rbegin(&self) -> Position {
        self.map.rbegin()
    }

    /// Returns the position a descending walk ends at, the same as [`end`](BSTreeSet::end).
    #[must_use]
    pub fn rend(&self) -> Position {
        self.map.rend()
    }

    /// Returns the position of the next element, wrapping from [`end`](BSTreeSet::end) to
    /// [`begin`](BSTreeSet::begin).
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidPosition`] if the element at `position` has been removed.
    pub fn next_position(&self, position: Position) -> Result<Position, TreeError> {
        self.map.next_position(position)
    }

    /// Returns the position of the previous element, wrapping from [`end`](BSTreeSet::end)
    /// to [`rbegin`](BSTreeSet::rbegin).
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidPosition`] if the element at `position` has been removed.
    pub fn prev_position(&self, position: Position) -> Result<Position, TreeError> {
        self.map.prev_position(position)
    }

    /// Returns the element at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidPosition`] if `position` is [`end`](BSTreeSet::end) or its
    /// element has been removed.
    pub fn get_at(&self, position: Position) -> Result<&T, TreeError> {
        self.map.get_at(position).map(|(k, ())| k)
    }

    /// Removes the element at `position` and returns the position of the element that
    /// followed it.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidPosition`] if `position` is [`end`](BSTreeSet::end) or its
    /// element has already been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::from([1, 2, 3]);
    /// let next = set.erase(set.begin()).unwrap();
    /// assert_eq!(set.get_at(next), Ok(&2));
    /// assert!(set.erase(set.end()).is_err());
    /// ```
    pub fn erase(&mut self, position: Position) -> Result<Position, TreeError> {
        self.map.erase(position)
    }

    /// Removes the elements from `first` up to, but not including, `last`, and returns `last`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidPosition`] if either position refers to a removed element,
    /// or if `last` comes before `first`.
    pub fn erase_range(&mut self, first: Position, last: Position) -> Result<Position, TreeError>
    where
        T: Ord,
    {
        self.map.erase_range(first, last)
    }

    /// Returns the position of the element equal to `value`, or [`end`](BSTreeSet::end).
    #[must_use]
    pub fn find<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.find(value)
    }

    /// Returns the number of elements equal to `value`: `0` or `1`.
    #[must_use]
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.count(value)
    }

    /// Returns the position of the first element not less than `value`, or
    /// [`end`](BSTreeSet::end).
    #[must_use]
    pub fn lower_bound<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.lower_bound(value)
    }

    /// Returns the position of the first element greater than `value`, or
    /// [`end`](BSTreeSet::end).
    #[must_use]
    pub fn upper_bound<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.upper_bound(value)
    }

    /// Returns `(lower_bound(value), upper_bound(value))`.
    #[must_use]
    pub fn equal_range<Q>(&self, value: &Q) -> (Position, Position)
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.equal_range(value)
    }

    /// Swaps the contents of `self` and `other` in O(1). Positions follow their elements.
    pub fn swap(&mut self, other: &mut Self) {
        self.map.swap(&mut other.map);
    }

    /// Returns a value that displays the tree's shape rotated a quarter turn.
    /// See [`BSTreeMap::pretty`].
    pub fn pretty(&self) -> impl fmt::Display + '_
    where
        T: fmt::Debug,
    {
        self.map.pretty()
    }

    /// Verifies the tree's structural invariants. See [`BSTreeMap::check_invariants`].
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant found.
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        T: Ord,
    {
        self.map.check_invariants()
    }
}

impl<T: Hash> Hash for BSTreeSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.map.hash(state);
    }
}

impl<T: PartialEq> PartialEq for BSTreeSet<T> {
    fn eq(&self, other: &BSTreeSet<T>) -> bool {
        self.map.eq(&other.map)
    }
}

impl<T: Eq> Eq for BSTreeSet<T> {}

impl<T: PartialOrd> PartialOrd for BSTreeSet<T> {
    fn partial_cmp(&self, other: &BSTreeSet<T>) -> Option<Ordering> {
        self.map.partial_cmp(&other.map)
    }
}

impl<T: Ord> Ord for BSTreeSet<T> {
    fn cmp(&self, other: &BSTreeSet<T>) -> Ordering {
        self.map.cmp(&other.map)
    }
}

impl<T: Clone> Clone for BSTreeSet<T> {
    fn clone(&self) -> Self {
        BSTreeSet {
            map: self.map.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.map.clone_from(&source.map);
    }
}

impl<T: fmt::Debug> fmt::Debug for BSTreeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for BSTreeSet<T> {
    /// Creates an empty `BSTreeSet`.
    fn default() -> BSTreeSet<T> {
        BSTreeSet::new()
    }
}

impl<T: Ord> FromIterator<T> for BSTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> BSTreeSet<T> {
        let mut set = BSTreeSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for BSTreeSet<T> {
    #[inline]
    fn extend<Iter: IntoIterator<Item = T>>(&mut self, iter: Iter) {
        for elem in iter {
            self.insert(elem);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for BSTreeSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &elem in iter {
            self.insert(elem);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for BSTreeSet<T> {
    /// Converts a `[T; N]` into a `BSTreeSet<T>`.
    ///
    /// If the array contains any equal values, only the first is kept.
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let set1 = BSTreeSet::from([1, 2, 3, 4]);
    /// let set2: BSTreeSet<_> = [1, 2, 3, 4].into();
    /// assert_eq!(set1, set2);
    /// ```
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for BSTreeSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `BSTreeSet`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let set = BSTreeSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.map.into_keys(),
        }
    }
}

impl<'a, T> IntoIterator for &'a BSTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.inner.clone()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

impl<T> Default for IntoIter<T> {
    /// Creates an empty `bstree_set::IntoIter`.
    ///
    /// ```
    /// # use bs_tree::bstree_set;
    /// let iter: bstree_set::IntoIter<u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: IntoKeys::default(),
        }
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|(k, ())| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Range<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back().map(|(k, ())| k)
    }
}

impl<T> FusedIterator for Range<'_, T> {}

impl<T> Clone for Range<'_, T> {
    fn clone(&self) -> Self {
        Range {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Range<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
