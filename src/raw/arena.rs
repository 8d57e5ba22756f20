use alloc::vec::Vec;

use super::handle::Handle;
use crate::TreeError;

struct Slot<T> {
    // Bumped every time the slot is vacated so stale positions can be told apart from
    // whatever node reuses the slot later. Never wraps: at `u32::MAX` the slot is retired.
    generation: u32,
    element: Option<T>,
}

pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<Handle>,
    // Vacant slots whose generation can no longer advance. They are never reused.
    retired: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            retired: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            retired: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len() + self.retired)
    }

    #[cfg(test)]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reserves room for at least `additional` more elements without reallocating.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), TreeError> {
        let reusable = self.free.len();
        let fresh = additional.saturating_sub(reusable);
        if self.slots.len().saturating_add(fresh) > Handle::MAX {
            return Err(TreeError::CapacityExceeded);
        }
        self.slots.try_reserve(fresh)?;
        // `free` never holds more handles than there are slots.
        let wanted = (self.slots.len() + fresh).saturating_sub(self.free.len());
        self.free.try_reserve(wanted)?;
        Ok(())
    }

    /// Stores `element`, reusing a vacated slot when one is available.
    ///
    /// Nothing observable changes unless this returns `Ok`.
    pub(crate) fn try_alloc(&mut self, element: T) -> Result<Handle, TreeError> {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()].element = Some(element);
            return Ok(h);
        }

        // Use strict less-than so the live element count never exceeds Handle::MAX.
        if self.slots.len() >= Handle::MAX {
            return Err(TreeError::CapacityExceeded);
        }
        self.slots.try_reserve(1)?;
        // Keep `free` able to absorb every slot so `take()` never allocates.
        self.free.try_reserve((self.slots.len() + 1).saturating_sub(self.free.len()))?;

        self.slots.push(Slot {
            generation: 0,
            element: Some(element),
        });
        Ok(Handle::from_index(self.slots.len() - 1))
    }

    /// Infallible form of [`Arena::try_alloc`].
    ///
    /// # Panics
    ///
    /// Panics if the arena is full or the allocator fails.
    #[cfg(test)]
    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        match self.try_alloc(element) {
            Ok(h) => h,
            Err(error) => panic!("`Arena::alloc()` - {error}!"),
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].element.as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].element.as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Returns the generation of the slot behind `handle`.
    #[inline]
    pub(crate) fn generation(&self, handle: Handle) -> u32 {
        self.slots[handle.to_index()].generation
    }

    /// Returns true if `handle` is occupied and was occupied at `generation`.
    pub(crate) fn is_live(&self, handle: Handle, generation: u32) -> bool {
        self.slots
            .get(handle.to_index())
            .is_some_and(|slot| slot.element.is_some() && slot.generation == generation)
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = &mut self.slots[handle.to_index()];
        let element = slot.element.take().expect("`Arena::take()` - `handle` is invalid!");
        if Self::advance(slot) {
            self.free.push(handle);
        } else {
            self.retired += 1;
        }
        element
    }

    /// Moves a just-vacated slot to its next generation. Returns false once the counter is
    /// exhausted, in which case the slot must not be handed out again.
    fn advance(slot: &mut Slot<T>) -> bool {
        match slot.generation.checked_add(1) {
            Some(next) => {
                slot.generation = next;
                true
            }
            None => false,
        }
    }

    /// Drops every element. Slots are kept (and their generations advanced) so positions
    /// taken before the clear stay detectably stale. Retired slots stay retired.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        self.retired = 0;
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            let reusable = if slot.element.take().is_some() {
                Self::advance(slot)
            } else {
                slot.generation != u32::MAX
            };
            if reusable {
                self.free.push(Handle::from_index(index));
            } else {
                self.retired += 1;
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reserve_covers_recycled_slots() {
        let mut arena: Arena<u32> = Arena::with_capacity(4);
        assert!(arena.capacity() >= 4);

        let handles: Vec<_> = (0..4).map(|v| arena.alloc(v)).collect();
        arena.take(handles[1]);
        // One vacated slot plus seven fresh ones.
        arena.try_reserve(8).unwrap();
        assert!(arena.capacity() >= 10);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn vacated_slot_is_stale_after_reuse() {
        let mut arena: Arena<u32> = Arena::new();
        let first = arena.alloc(1);
        let generation = arena.generation(first);
        assert!(arena.is_live(first, generation));

        assert_eq!(arena.take(first), 1);
        assert!(!arena.is_live(first, generation));

        // The slot comes back under a new generation.
        let second = arena.alloc(2);
        assert_eq!(second, first);
        assert!(!arena.is_live(second, generation));
        assert!(arena.is_live(second, arena.generation(second)));
    }

    #[test]
    fn exhausted_generation_retires_the_slot() {
        let mut arena: Arena<u32> = Arena::new();
        let worn = arena.alloc(1);
        let spare = arena.alloc(2);
        arena.slots[worn.to_index()].generation = u32::MAX;
        let last_generation = arena.generation(worn);

        assert_eq!(arena.take(worn), 1);
        assert!(!arena.is_live(worn, last_generation));
        assert_eq!(arena.len(), 1);

        // The worn slot is skipped; a fresh one is appended instead.
        let fresh = arena.alloc(3);
        assert_ne!(fresh, worn);
        assert!(!arena.is_live(worn, last_generation));
        assert_eq!(arena.len(), 2);

        // It stays retired across a clear.
        arena.clear();
        assert!(arena.is_empty());
        let reused: Vec<_> = (0..2).map(|v| arena.alloc(v)).collect();
        assert!(!reused.contains(&worn));
        assert!(reused.contains(&spare) && reused.contains(&fresh));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn clear_invalidates_every_slot() {
        let mut arena: Arena<u32> = Arena::new();
        let handles: Vec<_> = (0..8).map(|v| arena.alloc(v)).collect();
        let generations: Vec<_> = handles.iter().map(|&h| arena.generation(h)).collect();

        arena.clear();
        assert!(arena.is_empty());
        for (&h, &g) in handles.iter().zip(&generations) {
            assert!(!arena.is_live(h, g));
        }

        // Slots are reused lowest index first.
        assert_eq!(arena.alloc(42), handles[0]);
    }

    #[test]
    fn full_arena_reports_capacity_exceeded() {
        let mut arena: Arena<()> = Arena::new();
        for _ in 0..Handle::MAX {
            arena.alloc(());
        }
        assert_eq!(arena.try_alloc(()), Err(TreeError::CapacityExceeded));
        assert_eq!(arena.try_reserve(1), Err(TreeError::CapacityExceeded));
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn get_vacated_slot_panics() {
        let mut arena: Arena<u32> = Arena::new();
        let h = arena.alloc(1);
        arena.take(h);
        let _ = arena.get(h);
    }

    proptest! {
        /// Live handles keep their values; every handle that was ever vacated stays stale,
        /// however often its slot is recycled.
        #[test]
        fn retired_handles_never_come_back(steps in prop::collection::vec(step(), 0..256)) {
            let mut live: Vec<(Handle, u32, u32)> = Vec::new();
            let mut retired: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for step in steps {
                match step {
                    Step::Store(value) => {
                        let h = arena.try_alloc(value).unwrap();
                        live.push((h, arena.generation(h), value));
                    }
                    Step::Overwrite(pick, value) if !live.is_empty() => {
                        let slot = pick % live.len();
                        *arena.get_mut(live[slot].0) = value;
                        live[slot].2 = value;
                    }
                    Step::Vacate(pick) if !live.is_empty() => {
                        let (h, generation, value) = live.swap_remove(pick % live.len());
                        prop_assert_eq!(arena.take(h), value);
                        retired.push((h, generation));
                    }
                    Step::Wipe => {
                        arena.clear();
                        retired.extend(live.drain(..).map(|(h, generation, _)| (h, generation)));
                    }
                    Step::Overwrite(..) | Step::Vacate(_) => {}
                }

                prop_assert_eq!(arena.len(), live.len());
                for &(h, generation, value) in &live {
                    prop_assert!(arena.is_live(h, generation));
                    prop_assert_eq!(*arena.get(h), value);
                }
                for &(h, generation) in &retired {
                    prop_assert!(!arena.is_live(h, generation));
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Step {
        Store(u32),
        Overwrite(usize, u32),
        Vacate(usize),
        Wipe,
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            12 => any::<u32>().prop_map(Step::Store),
            3 => (any::<usize>(), any::<u32>()).prop_map(|(pick, value)| Step::Overwrite(pick, value)),
            6 => any::<usize>().prop_map(Step::Vacate),
            1 => Just(Step::Wipe),
        ]
    }
}
