//! Node store.
//!
//! Nodes live in a slab owned by the map. Every link (`p`, `l`, `r`) is an
//! `Option<u32>` index into that slab instead of a pointer, so the parent
//! back-link never takes part in ownership: a node is freed only through
//! [`NodeStore::release`] or [`NodeStore::clear`].

use std::ops::{Index, IndexMut};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Red-black tree node.
#[derive(Clone, Debug)]
pub struct RbNode<K, V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub key: K,
    pub value: V,
    pub color: Color,
}

impl<K, V> RbNode<K, V> {
    /// Fresh unlinked node. New nodes start out red.
    pub fn new(key: K, value: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            key,
            value,
            color: Color::Red,
        }
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }
}

#[derive(Clone, Debug)]
enum Slot<K, V> {
    Occupied(RbNode<K, V>),
    Vacant(Option<u32>),
}

/// Slab of [`RbNode`]s with an intrusive free list.
#[derive(Clone, Debug)]
pub struct NodeStore<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Option<u32>,
    live: usize,
}

impl<K, V> Default for NodeStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> NodeStore<K, V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            live: 0,
        }
    }

    /// Number of occupied slots.
    pub fn live(&self) -> usize {
        self.live
    }

    /// Stores a new red, unlinked node and returns its index.
    pub fn alloc(&mut self, key: K, value: V) -> u32 {
        let node = Slot::Occupied(RbNode::new(key, value));
        self.live += 1;
        match self.free {
            Some(idx) => {
                let slot = &mut self.slots[idx as usize];
                let Slot::Vacant(next_free) = *slot else {
                    panic!("free list points at occupied slot {idx}");
                };
                self.free = next_free;
                *slot = node;
                idx
            }
            None => {
                self.slots.push(node);
                (self.slots.len() - 1) as u32
            }
        }
    }

    /// Frees the slot at `idx` and hands back its entry.
    ///
    /// The node must already be unlinked from the tree.
    pub fn release(&mut self, idx: u32) -> (K, V) {
        let slot = &mut self.slots[idx as usize];
        if matches!(slot, Slot::Vacant(_)) {
            panic!("release of vacant slot {idx}");
        }
        let Slot::Occupied(node) = std::mem::replace(slot, Slot::Vacant(self.free)) else {
            unreachable!();
        };
        self.free = Some(idx);
        self.live -= 1;
        (node.key, node.value)
    }

    /// Exchanges the key/value pairs of two live nodes, leaving links and
    /// colors where they are.
    pub fn swap_entries(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(hi as usize);
        match (&mut head[lo as usize], &mut tail[0]) {
            (Slot::Occupied(x), Slot::Occupied(y)) => {
                std::mem::swap(&mut x.key, &mut y.key);
                std::mem::swap(&mut x.value, &mut y.value);
            }
            _ => panic!("swap_entries on vacant slot ({a}, {b})"),
        }
    }

    /// Mutable access to the entries of the nodes listed in `order`, each
    /// placed at its position in `order`.
    pub fn entries_mut_ranked(&mut self, order: &[u32]) -> Vec<Option<(&K, &mut V)>> {
        let mut rank = vec![usize::MAX; self.slots.len()];
        for (pos, &idx) in order.iter().enumerate() {
            rank[idx as usize] = pos;
        }
        let mut out = Vec::with_capacity(order.len());
        out.resize_with(order.len(), || None);
        for (slot, &pos) in self.slots.iter_mut().zip(rank.iter()) {
            if pos == usize::MAX {
                continue;
            }
            if let Slot::Occupied(RbNode { key, value, .. }) = slot {
                out[pos] = Some((&*key, value));
            }
        }
        out
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.live = 0;
    }
}

impl<K, V> Index<u32> for NodeStore<K, V> {
    type Output = RbNode<K, V>;

    #[inline]
    fn index(&self, idx: u32) -> &RbNode<K, V> {
        match &self.slots[idx as usize] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("vacant node slot {idx}"),
        }
    }
}

impl<K, V> IndexMut<u32> for NodeStore<K, V> {
    #[inline]
    fn index_mut(&mut self, idx: u32) -> &mut RbNode<K, V> {
        match &mut self.slots[idx as usize] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("vacant node slot {idx}"),
        }
    }
}
