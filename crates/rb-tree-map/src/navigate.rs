//! Navigation over the node store: extremes, in-order neighbours and the
//! key-relative queries (`floor`, `ceiling`, `lower`, `higher`).
//!
//! Every key-relative query is a single root-to-leaf descent that keeps the
//! best candidate seen so far.

use std::cmp::Ordering;

use crate::compare::{order, Comparator};
use crate::error::Result;
use crate::node::NodeStore;

/// Leftmost node under `root`.
pub fn first<K, V>(store: &NodeStore<K, V>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = store[curr].l {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node under `root`.
pub fn last<K, V>(store: &NodeStore<K, V>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = store[curr].r {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn successor<K, V>(store: &NodeStore<K, V>, mut curr: u32) -> Option<u32> {
    if let Some(r) = store[curr].r {
        return first(store, Some(r));
    }
    let mut p = store[curr].p;
    while let Some(pi) = p {
        if store[pi].r != Some(curr) {
            return Some(pi);
        }
        curr = pi;
        p = store[pi].p;
    }
    None
}

/// In-order predecessor.
pub fn predecessor<K, V>(store: &NodeStore<K, V>, mut curr: u32) -> Option<u32> {
    if let Some(l) = store[curr].l {
        return last(store, Some(l));
    }
    let mut p = store[curr].p;
    while let Some(pi) = p {
        if store[pi].l != Some(curr) {
            return Some(pi);
        }
        curr = pi;
        p = store[pi].p;
    }
    None
}

/// Node holding `key`.
pub fn find<K, V, C>(
    store: &NodeStore<K, V>,
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> Result<Option<u32>>
where
    C: Comparator<K>,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match order(comparator, key, &store[i].key)? {
            Ordering::Less => store[i].l,
            Ordering::Greater => store[i].r,
            Ordering::Equal => return Ok(Some(i)),
        };
    }
    Ok(None)
}

/// Least node with key `>= key`.
pub fn ceiling<K, V, C>(
    store: &NodeStore<K, V>,
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> Result<Option<u32>>
where
    C: Comparator<K>,
{
    let mut curr = root;
    let mut res = None;
    while let Some(i) = curr {
        match order(comparator, key, &store[i].key)? {
            Ordering::Less => {
                res = Some(i);
                curr = store[i].l;
            }
            Ordering::Greater => curr = store[i].r,
            Ordering::Equal => return Ok(Some(i)),
        }
    }
    Ok(res)
}

/// Greatest node with key `<= key`.
pub fn floor<K, V, C>(
    store: &NodeStore<K, V>,
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> Result<Option<u32>>
where
    C: Comparator<K>,
{
    let mut curr = root;
    let mut res = None;
    while let Some(i) = curr {
        match order(comparator, key, &store[i].key)? {
            Ordering::Greater => {
                res = Some(i);
                curr = store[i].r;
            }
            Ordering::Less => curr = store[i].l,
            Ordering::Equal => return Ok(Some(i)),
        }
    }
    Ok(res)
}

/// Least node with key `> key`.
pub fn higher<K, V, C>(
    store: &NodeStore<K, V>,
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> Result<Option<u32>>
where
    C: Comparator<K>,
{
    let mut curr = root;
    let mut res = None;
    while let Some(i) = curr {
        if order(comparator, key, &store[i].key)? == Ordering::Less {
            res = Some(i);
            curr = store[i].l;
        } else {
            curr = store[i].r;
        }
    }
    Ok(res)
}

/// Greatest node with key `< key`.
pub fn lower<K, V, C>(
    store: &NodeStore<K, V>,
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> Result<Option<u32>>
where
    C: Comparator<K>,
{
    let mut curr = root;
    let mut res = None;
    while let Some(i) = curr {
        if order(comparator, key, &store[i].key)? == Ordering::Greater {
            res = Some(i);
            curr = store[i].r;
        } else {
            curr = store[i].l;
        }
    }
    Ok(res)
}
