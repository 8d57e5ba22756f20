use super::BSTreeMap;
use crate::TreeError;
use crate::raw::RawTree;

impl<K, V> BSTreeMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries before the node
    /// storage has to grow.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeMap;
    ///
    /// let map: BSTreeMap<i32, i32> = BSTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        BSTreeMap {
            raw: RawTree::with_capacity(capacity),
        }
    }

    /// Returns the number of entries the map can hold without growing its node storage.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Tries to reserve room for at least `additional` more entries.
    ///
    /// Inserting up to `additional` entries afterwards cannot fail with
    /// [`TreeError::AllocationFailed`].
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::AllocationFailed`] if the allocator reports a failure, or
    /// [`TreeError::CapacityExceeded`] if the map could never address that many entries.
    /// The map is unchanged in either case.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::{BSTreeMap, TreeError};
    ///
    /// let mut map: BSTreeMap<u64, u64> = BSTreeMap::new();
    /// map.try_reserve(10).expect("why is the test harness OOMing on 10 entries?");
    /// assert!(map.capacity() >= 10);
    ///
    /// assert_eq!(map.try_reserve(usize::MAX), Err(TreeError::CapacityExceeded));
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TreeError> {
        self.raw.try_reserve(additional)
    }
}
