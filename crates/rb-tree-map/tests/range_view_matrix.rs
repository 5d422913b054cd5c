use rb_tree_map::{TreeMap, TreeMapError};

fn odds() -> TreeMap<i32, i32> {
    let mut map = TreeMap::new();
    for k in [1, 3, 5, 7, 9] {
        map.put(k, k * 10).unwrap();
    }
    map
}

#[test]
fn half_open_window_iterates_in_range_matrix() {
    let map = odds();
    let view = map.sub_map(3, true, 7, false).unwrap();
    let keys: Vec<_> = view.keys().unwrap().copied().collect();
    assert_eq!(keys, vec![3, 5]);
    assert_eq!(view.len().unwrap(), 2);
    assert!(!view.is_empty().unwrap());
    assert_eq!(view.first_key(), Ok(&3));
    assert_eq!(view.last_key(), Ok(&5));
    assert!(view.contains_key(&5).unwrap());
    assert!(!view.contains_key(&7).unwrap());
    assert_eq!(view.get(&9).unwrap(), None);
    assert_eq!(view.get(&3).unwrap(), Some(&30));
}

#[test]
fn writes_through_view_matrix() {
    let mut map = odds();
    {
        let mut view = map.sub_map_mut(3, true, 7, false).unwrap();
        assert_eq!(view.put(7, 0), Err(TreeMapError::Range("key out of range")));
        assert_eq!(view.put(2, 0), Err(TreeMapError::Range("key out of range")));
        assert_eq!(view.put(5, 55).unwrap(), Some(50));
        assert_eq!(view.put(4, 40).unwrap(), None);
        assert_eq!(view.get(&4).unwrap(), Some(&40));
        assert_eq!(view.remove(&9), Err(TreeMapError::Range("key out of range")));
        assert_eq!(view.remove(&3).unwrap(), Some(30));
    }
    assert_eq!(map.get(&5).unwrap(), Some(&55));
    assert_eq!(map.get(&4).unwrap(), Some(&40));
    assert_eq!(map.get(&3).unwrap(), None);
    let keys: Vec<_> = map.keys().copied().collect();
    assert_eq!(keys, vec![1, 4, 5, 7, 9]);
    map.assert_valid().unwrap();
}

#[test]
fn view_reflects_later_map_changes_matrix() {
    let mut map = odds();
    map.put(6, 60).unwrap();
    map.remove(&5).unwrap();
    let view = map.sub_map(3, true, 7, true).unwrap();
    let keys: Vec<_> = view.keys().unwrap().copied().collect();
    assert_eq!(keys, vec![3, 6, 7]);
}

#[test]
fn inverted_bounds_rejected_matrix() {
    let map = odds();
    assert_eq!(
        map.sub_map(7, true, 3, true).err(),
        Some(TreeMapError::Range("fromKey > toKey"))
    );
    assert!(map.sub_map(5, true, 5, false).is_ok());
}

#[test]
fn nested_view_bounds_matrix() {
    let map = odds();
    let view = map.sub_map(3, true, 7, false).unwrap();

    assert_eq!(
        view.sub_map(1, true, 5, true).err(),
        Some(TreeMapError::Range("fromKey out of range"))
    );
    assert_eq!(
        view.sub_map(3, true, 8, true).err(),
        Some(TreeMapError::Range("toKey out of range"))
    );
    // An exclusive bound may sit on the window's exclusive edge.
    let inner = view.sub_map(3, false, 7, false).unwrap();
    let keys: Vec<_> = inner.keys().unwrap().copied().collect();
    assert_eq!(keys, vec![5]);
    assert_eq!(
        view.head_map(7, true).err(),
        Some(TreeMapError::Range("toKey out of range"))
    );

    let head = view.head_map(5, false).unwrap();
    let keys: Vec<_> = head.keys().unwrap().copied().collect();
    assert_eq!(keys, vec![3]);

    let tail = view.tail_map(4, true).unwrap();
    let keys: Vec<_> = tail.keys().unwrap().copied().collect();
    assert_eq!(keys, vec![5]);
}

#[test]
fn head_and_tail_matrix() {
    let map = odds();
    let head = map.head_map(5, false).unwrap();
    let keys: Vec<_> = head.keys().unwrap().copied().collect();
    assert_eq!(keys, vec![1, 3]);

    let head = map.head_map(5, true).unwrap();
    assert_eq!(head.last_key(), Ok(&5));

    let tail = map.tail_map(5, false).unwrap();
    let keys: Vec<_> = tail.keys().unwrap().copied().collect();
    assert_eq!(keys, vec![7, 9]);

    let empty = map.tail_map(10, true).unwrap();
    assert!(empty.is_empty().unwrap());
    assert_eq!(empty.len().unwrap(), 0);
    assert_eq!(empty.first_key(), Err(TreeMapError::EmptyStructure));
    assert_eq!(empty.iter().unwrap().next(), None);
}

#[test]
fn navigation_is_clamped_to_window_matrix() {
    let map = odds();
    let view = map.sub_map(3, true, 7, true).unwrap();
    assert_eq!(view.ceiling_key(&0).unwrap(), Some(&3));
    assert_eq!(view.ceiling_key(&8).unwrap(), None);
    assert_eq!(view.floor_key(&100).unwrap(), Some(&7));
    assert_eq!(view.floor_key(&2).unwrap(), None);
    assert_eq!(view.higher_key(&7).unwrap(), None);
    assert_eq!(view.lower_key(&3).unwrap(), None);
    assert_eq!(view.higher_key(&3).unwrap(), Some(&5));
    assert_eq!(view.lower_entry(&6).unwrap(), Some((&5, &50)));
}

#[test]
fn descending_map_matrix() {
    let map = odds();
    let desc = map.descending_map();
    let keys: Vec<_> = desc.keys().unwrap().copied().collect();
    assert_eq!(keys, vec![9, 7, 5, 3, 1]);
    assert_eq!(desc.first_key(), Ok(&9));
    assert_eq!(desc.last_key(), Ok(&1));
    assert_eq!(desc.len().unwrap(), 5);

    // Navigation is mirrored: "higher" means smaller key.
    assert_eq!(desc.higher_key(&5).unwrap(), Some(&3));
    assert_eq!(desc.lower_key(&5).unwrap(), Some(&7));
    assert_eq!(desc.ceiling_key(&6).unwrap(), Some(&5));
    assert_eq!(desc.floor_key(&6).unwrap(), Some(&7));

    // Bounds are given in view order.
    let sub = desc.sub_map(7, true, 3, false).unwrap();
    let keys: Vec<_> = sub.keys().unwrap().copied().collect();
    assert_eq!(keys, vec![7, 5]);
    assert_eq!(
        desc.sub_map(3, true, 7, true).err(),
        Some(TreeMapError::Range("fromKey > toKey"))
    );

    let head = desc.head_map(5, false).unwrap();
    let keys: Vec<_> = head.keys().unwrap().copied().collect();
    assert_eq!(keys, vec![9, 7]);

    let tail = desc.tail_map(5, true).unwrap();
    let keys: Vec<_> = tail.keys().unwrap().copied().collect();
    assert_eq!(keys, vec![5, 3, 1]);

    let back = desc.descending_map();
    let keys: Vec<_> = back.keys().unwrap().copied().collect();
    assert_eq!(keys, vec![1, 3, 5, 7, 9]);

    let rev: Vec<_> = desc.keys().unwrap().rev().copied().collect();
    assert_eq!(rev, vec![1, 3, 5, 7, 9]);
}

#[test]
fn descending_window_of_submap_matrix() {
    let map = odds();
    let view = map.sub_map(3, false, 9, false).unwrap();
    let desc = view.descending_map();
    let keys: Vec<_> = desc.keys().unwrap().copied().collect();
    assert_eq!(keys, vec![7, 5]);
    assert_eq!(desc.first_entry().unwrap(), Some((&7, &70)));
}

#[test]
fn poll_and_clear_through_view_matrix() {
    let mut map = TreeMap::new();
    for k in 0..10 {
        map.put(k, k).unwrap();
    }
    {
        let mut view = map.sub_map_mut(2, true, 6, true).unwrap();
        assert_eq!(view.poll_first_entry().unwrap(), Some((2, 2)));
        assert_eq!(view.poll_last_entry().unwrap(), Some((6, 6)));
        let mut desc = view.descending_map_mut();
        assert_eq!(desc.poll_first_entry().unwrap(), Some((5, 5)));
    }
    assert_eq!(map.len(), 7);
    {
        let mut view = map.tail_map_mut(7, false).unwrap();
        view.clear().unwrap();
        assert!(view.is_empty().unwrap());
    }
    let keys: Vec<_> = map.keys().copied().collect();
    assert_eq!(keys, vec![0, 1, 3, 4, 7]);
    map.assert_valid().unwrap();

    let mut view = map.head_map_mut(1, true).unwrap();
    view.clear().unwrap();
    assert_eq!(view.poll_first_entry().unwrap(), None);
    assert_eq!(map.len(), 3);
}
