use rb_tree_map::{TreeMap, TreeMapError};

fn evens() -> TreeMap<i32, &'static str> {
    let mut map = TreeMap::new();
    for (k, v) in [(2, "two"), (4, "four"), (6, "six"), (8, "eight")] {
        map.put(k, v).unwrap();
    }
    map
}

#[test]
fn nearest_key_matrix() {
    let map = evens();
    assert_eq!(map.floor_key(&5).unwrap(), Some(&4));
    assert_eq!(map.ceiling_key(&5).unwrap(), Some(&6));
    assert_eq!(map.lower_key(&5).unwrap(), Some(&4));
    assert_eq!(map.higher_key(&5).unwrap(), Some(&6));

    assert_eq!(map.floor_key(&2).unwrap(), Some(&2));
    assert_eq!(map.ceiling_key(&8).unwrap(), Some(&8));
    assert_eq!(map.lower_key(&2).unwrap(), None);
    assert_eq!(map.higher_key(&8).unwrap(), None);

    assert_eq!(map.floor_key(&1).unwrap(), None);
    assert_eq!(map.ceiling_key(&9).unwrap(), None);
    assert_eq!(map.lower_key(&100).unwrap(), Some(&8));
    assert_eq!(map.higher_key(&-100).unwrap(), Some(&2));
}

#[test]
fn nearest_entry_matrix() {
    let map = evens();
    assert_eq!(map.floor_entry(&7).unwrap(), Some((&6, &"six")));
    assert_eq!(map.ceiling_entry(&3).unwrap(), Some((&4, &"four")));
    assert_eq!(map.lower_entry(&4).unwrap(), Some((&2, &"two")));
    assert_eq!(map.higher_entry(&4).unwrap(), Some((&6, &"six")));
}

#[test]
fn extremes_matrix() {
    let map = evens();
    assert_eq!(map.first_entry(), Some((&2, &"two")));
    assert_eq!(map.last_entry(), Some((&8, &"eight")));
    assert_eq!(map.first_key(), Ok(&2));
    assert_eq!(map.last_key(), Ok(&8));
}

#[test]
fn poll_matrix() {
    let mut map = evens();
    assert_eq!(map.poll_first_entry(), Some((2, "two")));
    assert_eq!(map.poll_last_entry(), Some((8, "eight")));
    assert_eq!(map.len(), 2);
    map.assert_valid().unwrap();
    assert_eq!(map.poll_first_entry(), Some((4, "four")));
    assert_eq!(map.poll_first_entry(), Some((6, "six")));
    assert_eq!(map.poll_first_entry(), None);
    assert_eq!(map.poll_last_entry(), None);
}

#[test]
fn empty_map_matrix() {
    let map = TreeMap::<i32, i32>::new();
    assert_eq!(map.first_key(), Err(TreeMapError::EmptyStructure));
    assert_eq!(map.last_key(), Err(TreeMapError::EmptyStructure));
    assert_eq!(map.first_entry(), None);
    assert_eq!(map.floor_key(&0).unwrap(), None);
    assert_eq!(map.ceiling_key(&0).unwrap(), None);
}

#[test]
fn navigation_after_many_removals_matrix() {
    let mut map = TreeMap::new();
    for k in 0..200 {
        map.put(k, k).unwrap();
    }
    for k in (0..200).filter(|k| k % 3 != 0) {
        map.remove(&k).unwrap();
    }
    map.assert_valid().unwrap();
    assert_eq!(map.floor_key(&100).unwrap(), Some(&99));
    assert_eq!(map.ceiling_key(&100).unwrap(), Some(&102));
    assert_eq!(map.lower_key(&99).unwrap(), Some(&96));
    assert_eq!(map.higher_key(&99).unwrap(), Some(&102));
    assert_eq!(map.last_key(), Ok(&198));
}
