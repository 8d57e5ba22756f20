use crate::raw::Link;

/// A cursor to one element of a [`BSTreeMap`] or [`BSTreeSet`], or to the end.
///
/// Positions are small `Copy` tokens handed out by `begin`, `end`, `find`, `lower_bound`,
/// `insert_unique` and friends, and handed back to `get_at`, `next_position`, `erase`,
/// `insert_hint` and so on. They do not borrow the collection, so the collection can be
/// mutated while positions are held:
///
/// - inserting never invalidates a position;
/// - erasing invalidates only the position of the erased element;
/// - `clear` invalidates every position except `end`.
///
/// Using an invalidated position, or dereferencing `end`, is reported as
/// [`TreeError::InvalidPosition`] rather than reaching a recycled element.
/// Node slots are recycled under a fresh generation each time; a slot whose 32-bit generation
/// runs out is never reused, so a stale position can not come back to life.
///
/// The end position doubles as the one-before-the-minimum position: stepping forward from it
/// reaches the minimum and stepping backward reaches the maximum.
///
/// A position is only meaningful for the collection that produced it (or, after
/// [`swap`](crate::BSTreeMap::swap), for the collection that now owns its element).
///
/// # Examples
///
/// ```
/// use bs_tree::BSTreeSet;
///
/// let mut set = BSTreeSet::from([10, 20, 30]);
/// let twenty = set.find(&20);
/// assert_eq!(set.get_at(twenty), Ok(&20));
///
/// // Unrelated inserts and removals leave it valid.
/// set.insert(25);
/// set.remove(&10);
/// let next = set.next_position(twenty).unwrap();
/// assert_eq!(set.get_at(next), Ok(&25));
///
/// // Erasing the element itself does not.
/// set.remove(&20);
/// assert!(set.get_at(twenty).is_err());
/// ```
///
/// [`BSTreeMap`]: crate::BSTreeMap
/// [`BSTreeSet`]: crate::BSTreeSet
/// [`TreeError::InvalidPosition`]: crate::TreeError::InvalidPosition
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    link: Link,
    generation: u32,
}

impl Position {
    pub(crate) const END: Position = Position {
        link: Link::Nil,
        generation: 0,
    };

    #[inline]
    pub(crate) const fn new(link: Link, generation: u32) -> Self {
        Self {
            link,
            generation,
        }
    }

    #[inline]
    pub(crate) const fn link(self) -> Link {
        self.link
    }

    #[inline]
    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }

    /// Returns true if this is the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_tree::BSTreeSet;
    ///
    /// let set = BSTreeSet::from([1]);
    /// assert!(set.end().is_end());
    /// assert!(!set.begin().is_end());
    /// assert!(set.find(&2).is_end());
    /// ```
    #[must_use]
    pub const fn is_end(self) -> bool {
        self.link.is_nil()
    }
}
