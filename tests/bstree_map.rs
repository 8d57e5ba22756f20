use std::collections::BTreeMap;

use bs_tree::bstree_map;
use bs_tree::{BSTreeMap, TreeError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

fn key_strategy() -> impl Strategy<Value = i32> {
    -1_000i32..1_000i32
}

fn value_strategy() -> impl Strategy<Value = i32> {
    any::<i32>()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i32, i32),
    InsertUnique(i32, i32),
    InsertHint(i32, i32, i32),
    Remove(i32),
    RemoveEntry(i32),
    GetMut(i32, i32),
    Get(i32),
    PopFirst,
    PopLast,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        2 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::InsertUnique(k, v)),
        3 => (key_strategy(), key_strategy(), value_strategy()).prop_map(|(h, k, v)| MapOp::InsertHint(h, k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        1 => key_strategy().prop_map(MapOp::RemoveEntry),
        2 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::GetMut(k, v)),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both BSTreeMap and BTreeMap, asserting
    /// identical results and intact structure after every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut bs_map: BSTreeMap<i32, i32> = BSTreeMap::new();
        let mut bt_map: BTreeMap<i32, i32> = BTreeMap::new();

        for op in &ops {
            match *op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(bs_map.insert(k, v), bt_map.insert(k, v), "insert({}, {})", k, v);
                }
                MapOp::InsertUnique(k, v) => {
                    let (position, inserted) = bs_map.insert_unique(k, v);
                    let bt_inserted = !bt_map.contains_key(&k);
                    let bt_value = *bt_map.entry(k).or_insert(v);
                    prop_assert_eq!(inserted, bt_inserted, "insert_unique({}, {})", k, v);
                    prop_assert_eq!(bs_map.get_at(position), Ok((&k, &bt_value)));
                }
                MapOp::InsertHint(hint, k, v) => {
                    let hint = bs_map.upper_bound(&hint);
                    let position = bs_map.insert_hint(hint, k, v).unwrap();
                    let bt_value = *bt_map.entry(k).or_insert(v);
                    prop_assert_eq!(bs_map.get_at(position), Ok((&k, &bt_value)), "insert_hint(_, {})", k);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(bs_map.remove(&k), bt_map.remove(&k), "remove({})", k);
                }
                MapOp::RemoveEntry(k) => {
                    prop_assert_eq!(bs_map.remove_entry(&k), bt_map.remove_entry(&k), "remove_entry({})", k);
                }
                MapOp::GetMut(k, v) => {
                    if let Some(value) = bs_map.get_mut(&k) {
                        *value = v;
                    }
                    if let Some(value) = bt_map.get_mut(&k) {
                        *value = v;
                    }
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(bs_map.get(&k), bt_map.get(&k), "get({})", k);
                    prop_assert_eq!(bs_map.get_key_value(&k), bt_map.get_key_value(&k), "get_key_value({})", k);
                    prop_assert_eq!(bs_map.contains_key(&k), bt_map.contains_key(&k), "contains_key({})", k);
                }
                MapOp::PopFirst => {
                    prop_assert_eq!(bs_map.pop_first(), bt_map.pop_first(), "pop_first()");
                }
                MapOp::PopLast => {
                    prop_assert_eq!(bs_map.pop_last(), bt_map.pop_last(), "pop_last()");
                }
            }
            prop_assert_eq!(bs_map.len(), bt_map.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(bs_map.first_key_value(), bt_map.first_key_value(), "first after {:?}", op);
            prop_assert_eq!(bs_map.last_key_value(), bt_map.last_key_value(), "last after {:?}", op);
            prop_assert_eq!(bs_map.check_invariants(), Ok(()), "invariants broken after {:?}", op);
        }

        let bs_items: Vec<_> = bs_map.iter().map(|(k, v)| (*k, *v)).collect();
        let bt_items: Vec<_> = bt_map.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(bs_items, bt_items);
    }

    /// Tests keys, values and the owning iterators against BTreeMap.
    #[test]
    fn iterators_match_btreemap(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE),
    ) {
        let bs_map: BSTreeMap<i32, i32> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i32, i32> = entries.iter().copied().collect();

        prop_assert_eq!(bs_map.keys().collect::<Vec<_>>(), bt_map.keys().collect::<Vec<_>>());
        prop_assert_eq!(bs_map.values().collect::<Vec<_>>(), bt_map.values().collect::<Vec<_>>());
        prop_assert_eq!(bs_map.keys().rev().collect::<Vec<_>>(), bt_map.keys().rev().collect::<Vec<_>>());
        prop_assert_eq!(bs_map.values().len(), bt_map.values().len());
        prop_assert_eq!(
            bs_map.clone().into_keys().collect::<Vec<_>>(),
            bt_map.clone().into_keys().collect::<Vec<_>>()
        );
        prop_assert_eq!(
            bs_map.clone().into_values().rev().collect::<Vec<_>>(),
            bt_map.clone().into_values().rev().collect::<Vec<_>>()
        );
        prop_assert_eq!(bs_map.into_iter().collect::<Vec<_>>(), bt_map.into_iter().collect::<Vec<_>>());
    }

    /// Tests range iteration against BTreeMap.
    #[test]
    fn range_matches_btreemap(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE),
        a in key_strategy(),
        b in key_strategy(),
    ) {
        let bs_map: BSTreeMap<i32, i32> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i32, i32> = entries.iter().copied().collect();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        prop_assert_eq!(bs_map.range(lo..hi).collect::<Vec<_>>(), bt_map.range(lo..hi).collect::<Vec<_>>());
        prop_assert_eq!(bs_map.range(lo..=hi).rev().collect::<Vec<_>>(), bt_map.range(lo..=hi).rev().collect::<Vec<_>>());
        prop_assert_eq!(bs_map.range(..=lo).collect::<Vec<_>>(), bt_map.range(..=lo).collect::<Vec<_>>());
        prop_assert_eq!(bs_map.range(hi..).collect::<Vec<_>>(), bt_map.range(hi..).collect::<Vec<_>>());
    }

    /// Tests retain, which may also rewrite values, against BTreeMap.
    #[test]
    fn retain_matches_btreemap(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE),
    ) {
        let mut bs_map: BSTreeMap<i32, i32> = entries.iter().copied().collect();
        let mut bt_map: BTreeMap<i32, i32> = entries.iter().copied().collect();

        let keep = |k: &i32, v: &mut i32| {
            *v = v.wrapping_add(1);
            k % 4 != 0
        };
        bs_map.retain(keep);
        bt_map.retain(keep);

        prop_assert_eq!(bs_map.iter().collect::<Vec<_>>(), bt_map.iter().collect::<Vec<_>>());
        prop_assert_eq!(bs_map.check_invariants(), Ok(()));
    }

    /// Clone and clone_from give equal but independent maps.
    #[test]
    fn clone_matches_original(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE),
    ) {
        let original: BSTreeMap<i32, i32> = entries.iter().copied().collect();
        let mut copy = original.clone();
        prop_assert_eq!(&copy, &original);
        prop_assert_eq!(copy.check_invariants(), Ok(()));

        let mut assigned = BSTreeMap::from([(5_000, 0)]);
        assigned.clone_from(&original);
        prop_assert_eq!(&assigned, &original);
        prop_assert_eq!(assigned.check_invariants(), Ok(()));

        let key = *copy.first_key_value().unwrap().0;
        *copy.get_mut(&key).unwrap() ^= 1;
        prop_assert_ne!(copy.get(&key), original.get(&key));
    }
}

// ─── Concrete scenarios ─────────────────────────────────────────────────────

#[test]
fn nine_key_scenario() {
    let mut map = BSTreeMap::new();
    for key in [40, 50, 30, 35, 10, 75, 23, 87, 68] {
        map.insert(key, key * 10);
    }
    assert_eq!(map.len(), 9);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [10, 23, 30, 35, 40, 50, 68, 75, 87]);
    assert_eq!(map.get_at(map.upper_bound(&35)), Ok((&40, &400)));

    assert_eq!(map.remove(&40), Some(400));
    assert_eq!(map.len(), 8);
    assert_eq!(map.get_at(map.lower_bound(&35)), Ok((&35, &350)));
    assert_eq!(map.get_at(map.upper_bound(&35)), Ok((&50, &500)));
    assert_eq!(map.check_invariants(), Ok(()));
}

#[test]
fn insert_replaces_value_but_keeps_position() {
    let mut map = BSTreeMap::from([(1, "a"), (2, "b")]);
    let two = map.find(&2);

    assert_eq!(map.insert(2, "B"), Some("b"));
    assert_eq!(map.get_at(two), Ok((&2, &"B")));

    let (position, inserted) = map.insert_unique(2, "ignored");
    assert!(!inserted);
    assert_eq!(position, two);
    assert_eq!(map[&2], "B");
}

#[test]
fn insert_hint_keeps_existing_value() {
    let mut map = BSTreeMap::from([(1, 'a'), (3, 'c')]);
    let three = map.find(&3);

    let two = map.insert_hint(three, 2, 'b').unwrap();
    assert_eq!(map.prev_position(three), Ok(two));
    assert_eq!(map.insert_hint(map.begin(), 3, 'x'), Ok(three));
    assert_eq!(map.get(&3), Some(&'c'));
    assert_eq!(map.len(), 3);
    assert_eq!(map.check_invariants(), Ok(()));
}

#[test]
fn sorted_bulk_load_through_hints() {
    let mut map = BSTreeMap::new();
    let mut hint = map.end();
    for key in 0..20_000 {
        hint = map.insert_hint(hint, key, key).unwrap();
        hint = map.next_position(hint).unwrap();
    }
    assert_eq!(map.len(), 20_000);
    assert!(map.keys().copied().eq(0..20_000));
    assert_eq!(map.check_invariants(), Ok(()));

    // Descending input hinted at the previous insert is just as cheap.
    let mut map = BSTreeMap::new();
    let mut hint = map.end();
    for key in (0..20_000).rev() {
        hint = map.insert_hint(hint, key, ()).unwrap();
    }
    assert!(map.keys().copied().eq(0..20_000));
    assert_eq!(map.check_invariants(), Ok(()));
}

#[test]
fn erase_range_by_key_bounds() {
    let mut map: BSTreeMap<i32, i32> = (0..10).map(|k| (k, k)).collect();
    let (first, last) = (map.lower_bound(&3), map.upper_bound(&6));
    assert_eq!(map.erase_range(first, last), Ok(last));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [0, 1, 2, 7, 8, 9]);
    assert_eq!(map.get_at(first), Err(TreeError::InvalidPosition));
    assert_eq!(map.erase_range(first, last), Err(TreeError::InvalidPosition));
    assert_eq!(map.check_invariants(), Ok(()));
}

#[test]
fn stale_positions_are_reported() {
    let mut map = BSTreeMap::from([(1, ()), (2, ()), (3, ())]);
    let two = map.find(&2);
    assert_eq!(map.erase(two).map(|p| map.get_at(p).ok().map(|(k, ())| *k)), Ok(Some(3)));

    assert_eq!(map.get_at(two), Err(TreeError::InvalidPosition));
    assert_eq!(map.erase(two), Err(TreeError::InvalidPosition));
    assert_eq!(map.next_position(two), Err(TreeError::InvalidPosition));
    assert_eq!(map.insert_hint(two, 2, ()), Err(TreeError::InvalidPosition));
    assert_eq!(map.len(), 2);
}

#[test]
fn pretty_renders_values_free_tree() {
    let map = BSTreeMap::from([(2, "two"), (1, "one"), (3, "three")]);
    assert_eq!(
        map.pretty().to_string(),
        "        nil\n    3\n        nil\n2\n        nil\n    1\n        nil\n"
    );
}

// ─── Coverage-focused top-down tests ────────────────────────────────────────

#[test]
#[allow(clippy::double_ended_iterator_last)]
fn capacity_default_from_array_extend_refs_and_iter_traits() {
    let mut map: BSTreeMap<i32, i32> = BSTreeMap::with_capacity(8);
    assert!(map.capacity() >= 8);
    assert_eq!(map.try_reserve(100), Ok(()));
    assert!(map.capacity() >= 100);

    let default_map: BSTreeMap<i32, i32> = Default::default();
    assert_eq!(format!("{default_map:?}"), "{}");

    map.extend([(&1, &10), (&2, &20)]);
    map.extend([(3, 30)]);
    assert_eq!(format!("{map:?}"), "{1: 10, 2: 20, 3: 30}");
    assert_eq!(map[&2], 20);

    {
        let iter = map.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.clone().last(), Some((&3, &30)));
        assert_eq!(format!("{:?}", iter.clone()), "[(1, 10), (2, 20), (3, 30)]");
        let collected: Vec<_> = (&map).into_iter().map(|(k, _)| *k).collect();
        assert_eq!(collected, [1, 2, 3]);
        assert_eq!(format!("{:?}", map.keys()), "[1, 2, 3]");
        assert_eq!(format!("{:?}", map.values()), "[10, 20, 30]");
        assert_eq!(format!("{:?}", map.range(2..)), "[(2, 20), (3, 30)]");
    }

    let empty: bstree_map::IntoIter<i32, i32> = Default::default();
    assert_eq!(empty.len(), 0);
    let empty: bstree_map::IntoKeys<i32, i32> = Default::default();
    assert_eq!(empty.len(), 0);
    let empty: bstree_map::IntoValues<i32, i32> = Default::default();
    assert_eq!(empty.len(), 0);

    let mut other = BSTreeMap::from([(9, 90)]);
    map.swap(&mut other);
    assert_eq!(map.len(), 1);
    assert_eq!(other.len(), 3);
    assert!(BSTreeMap::from([(1, 1)]) < BSTreeMap::from([(1, 2)]));

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.begin(), map.end());
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn index_missing_key_panics() {
    let map = BSTreeMap::from([(1, 1)]);
    let _ = map[&2];
}

#[test]
#[should_panic(expected = "range start is greater than range end in BSTreeMap")]
fn range_start_greater_than_end_panics() {
    let map = BSTreeMap::from([(1, 1), (2, 2)]);
    let _ = map.range(2..1);
}

#[test]
fn try_reserve_beyond_handle_space_fails() {
    let mut map: BSTreeMap<u8, u8> = BSTreeMap::new();
    assert_eq!(map.try_reserve(usize::MAX), Err(TreeError::CapacityExceeded));
    assert!(map.is_empty());
}

#[test]
fn borrowed_key_lookups() {
    let mut map: BSTreeMap<String, usize> = ["pear", "apple", "fig"].iter().map(|s| ((*s).to_owned(), s.len())).collect();
    assert_eq!(map.get("fig"), Some(&3));
    assert_eq!(map.get_at(map.lower_bound("b")).map(|(k, _)| k.as_str()), Ok("fig"));
    assert_eq!(map.count("kiwi"), 0);
    assert_eq!(map.erase_key("apple"), 1);
    assert_eq!(map.keys().map(String::as_str).collect::<Vec<_>>(), ["fig", "pear"]);
}
