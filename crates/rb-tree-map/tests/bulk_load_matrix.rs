use rb_tree_map::{TreeMap, TreeMapError};

#[test]
fn bulk_load_matches_sequential_inserts_matrix() {
    let loaded = TreeMap::from_sorted(1023, (1..=1023).map(|k| (k, k * 2))).unwrap();
    loaded.assert_valid().unwrap();

    let mut inserted = TreeMap::new();
    for k in 1..=1023 {
        inserted.put(k, k * 2).unwrap();
    }
    inserted.assert_valid().unwrap();

    assert_eq!(loaded, inserted);
    assert_eq!(loaded.len(), 1023);
    assert_eq!(loaded.height(), 10);
    assert!(inserted.height() <= 20);
    assert_eq!(loaded.first_key(), Ok(&1));
    assert_eq!(loaded.last_key(), Ok(&1023));
}

#[test]
fn bulk_loaded_map_accepts_further_updates_matrix() {
    let mut map = TreeMap::from_sorted(100, (0..100).map(|k| (k * 2, ()))).unwrap();
    for k in 0..100 {
        map.put(k * 2 + 1, ()).unwrap();
    }
    map.assert_valid().unwrap();
    for k in 0..50 {
        map.remove(&(k * 4)).unwrap();
    }
    map.assert_valid().unwrap();
    assert_eq!(map.len(), 150);
}

#[test]
fn bulk_load_edge_sizes_matrix() {
    let empty = TreeMap::<i32, i32>::from_sorted(0, std::iter::empty()).unwrap();
    assert!(empty.is_empty());
    empty.assert_valid().unwrap();

    let one = TreeMap::from_sorted(1, [(7, "seven")]).unwrap();
    assert_eq!(one.first_entry(), Some((&7, &"seven")));
    one.assert_valid().unwrap();

    // Only `len` entries are taken from a longer source.
    let prefix = TreeMap::from_sorted(3, (0..10).map(|k| (k, ()))).unwrap();
    assert_eq!(prefix.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[test]
fn bulk_load_rejects_bad_sources_matrix() {
    assert_eq!(
        TreeMap::from_sorted(5, (0..3).map(|k| (k, k))).err(),
        Some(TreeMapError::LengthMismatch {
            expected: 5,
            actual: 3
        })
    );
    assert_eq!(
        TreeMap::from_sorted(3, [(1, 1), (3, 3), (2, 2)]).err(),
        Some(TreeMapError::UnsortedInput)
    );
    assert_eq!(
        TreeMap::from_sorted(2, [(1, 1), (1, 1)]).err(),
        Some(TreeMapError::UnsortedInput)
    );
    assert_eq!(
        TreeMap::from_sorted(2, [(1.0, 1), (f64::NAN, 2)]).err(),
        Some(TreeMapError::InvalidKey)
    );
}

#[test]
fn bulk_load_with_comparator_matrix() {
    let desc = |a: &i32, b: &i32| b.cmp(a);
    let map = TreeMap::from_sorted_with(desc, 4, [(9, 'a'), (7, 'b'), (3, 'c'), (1, 'd')]).unwrap();
    map.assert_valid().unwrap();
    assert_eq!(map.first_key(), Ok(&9));
    assert_eq!(map.get(&3).unwrap(), Some(&'c'));
}

#[test]
fn put_all_from_sorted_map_matrix() {
    let mut source = TreeMap::new();
    for k in (1..=1023).rev() {
        source.put(k, k * 3).unwrap();
    }

    let mut target = TreeMap::new();
    let version = target.version();
    target.put_all_from(&source).unwrap();
    target.assert_valid().unwrap();
    assert_eq!(target, source);
    assert_eq!(target.len(), 1023);
    assert_eq!(target.height(), 10);
    assert_ne!(target.version(), version);

    // A non-empty target merges entry by entry.
    let mut partial = TreeMap::from_sorted(2, [(0, 0), (2000, 0)]).unwrap();
    partial.put_all_from(&source).unwrap();
    partial.assert_valid().unwrap();
    assert_eq!(partial.len(), 1025);
    assert_eq!(partial.get(&512).unwrap(), Some(&1536));

    let empty = TreeMap::<i32, i32>::new();
    let before = partial.version();
    partial.put_all_from(&empty).unwrap();
    assert_eq!(partial.version(), before);
}

#[test]
fn put_all_from_with_custom_comparator_matrix() {
    let desc = |a: &i32, b: &i32| b.cmp(a);
    let mut source = TreeMap::with_comparator(desc);
    source.put_all([(1, 'a'), (3, 'c'), (2, 'b')]).unwrap();

    let mut target = TreeMap::with_comparator(desc);
    target.put_all_from(&source).unwrap();
    target.assert_valid().unwrap();
    assert_eq!(target.keys().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    assert_eq!(target.first_entry(), Some((&3, &'c')));
}
