use super::BSTreeSet;
use crate::{BSTreeMap, TreeError};

impl<T> BSTreeSet<T> {
    /// Creates an empty set with room for at least `capacity` elements.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let set: BSTreeSet<i32> = BSTreeSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        BSTreeSet {
            map: BSTreeMap::with_capacity(capacity),
        }
    }

    /// Returns the number of elements the set can hold without growing its node storage.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Tries to reserve room for at least `additional` more elements.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::CapacityExceeded`] if the set could never hold that many elements,
    /// or [`TreeError::AllocationFailed`] if the allocator refuses the request.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let mut set: BSTreeSet<u8> = BSTreeSet::new();
    /// set.try_reserve(8).unwrap();
    /// assert!(set.capacity() >= 8);
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TreeError> {
        self.map.try_reserve(additional)
    }
}
