//! Range views.
//!
//! A [`RangeView`] is a window onto a [`TreeMap`]: an optional low bound, an
//! optional high bound and an orientation. It copies nothing. Every query is
//! the whole-map query clamped to the window, and a descending view is the
//! same window with the navigation primitives swapped end for end.
//!
//! The view is generic over its handle `M`: `&TreeMap` gives a read-only
//! view, `&mut TreeMap` additionally allows `put`, `remove` and the polling
//! operations.

use std::cmp::Ordering;
use std::marker::PhantomData;
use std::ops::{Bound, Deref, DerefMut};

use tracing::debug;

use crate::compare::{check_key, order, Comparator};
use crate::cursor::{Cursor, Direction};
use crate::error::{Result, TreeMapError};
use crate::iter::{Iter, Keys, Values};
use crate::map::{bound, TreeMap};

/// Key window with orientation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyRange<K> {
    lo: Bound<K>,
    hi: Bound<K>,
    descending: bool,
}

fn bound_key<K>(b: &Bound<K>) -> Option<&K> {
    match b {
        Bound::Included(k) | Bound::Excluded(k) => Some(k),
        Bound::Unbounded => None,
    }
}

impl<K> KeyRange<K> {
    /// Unbounded window.
    pub fn full(descending: bool) -> Self {
        Self {
            lo: Bound::Unbounded,
            hi: Bound::Unbounded,
            descending,
        }
    }

    /// Window from `lo` to `hi`; rejects `lo > hi`.
    pub fn new<C: Comparator<K>>(
        lo: Bound<K>,
        hi: Bound<K>,
        descending: bool,
        comparator: &C,
    ) -> Result<Self> {
        if let Some(l) = bound_key(&lo) {
            check_key(comparator, l)?;
        }
        if let Some(h) = bound_key(&hi) {
            check_key(comparator, h)?;
        }
        if let (Some(l), Some(h)) = (bound_key(&lo), bound_key(&hi)) {
            if order(comparator, l, h)? == Ordering::Greater {
                debug!("rejected window with low bound above high bound");
                return Err(TreeMapError::Range("fromKey > toKey"));
            }
        }
        Ok(Self { lo, hi, descending })
    }

    pub fn low(&self) -> Bound<&K> {
        self.lo.as_ref()
    }

    pub fn high(&self) -> Bound<&K> {
        self.hi.as_ref()
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    pub fn is_full(&self) -> bool {
        matches!((&self.lo, &self.hi), (Bound::Unbounded, Bound::Unbounded))
    }

    pub fn too_low<C: Comparator<K>>(&self, key: &K, comparator: &C) -> Result<bool> {
        check_key(comparator, key)?;
        Ok(match &self.lo {
            Bound::Unbounded => false,
            Bound::Included(lo) => order(comparator, key, lo)? == Ordering::Less,
            Bound::Excluded(lo) => order(comparator, key, lo)? != Ordering::Greater,
        })
    }

    pub fn too_high<C: Comparator<K>>(&self, key: &K, comparator: &C) -> Result<bool> {
        check_key(comparator, key)?;
        Ok(match &self.hi {
            Bound::Unbounded => false,
            Bound::Included(hi) => order(comparator, key, hi)? == Ordering::Greater,
            Bound::Excluded(hi) => order(comparator, key, hi)? != Ordering::Less,
        })
    }

    pub fn contains<C: Comparator<K>>(&self, key: &K, comparator: &C) -> Result<bool> {
        Ok(!self.too_low(key, comparator)? && !self.too_high(key, comparator)?)
    }

    /// Like [`contains`](Self::contains) but treats both bounds as inclusive.
    fn contains_closed<C: Comparator<K>>(&self, key: &K, comparator: &C) -> Result<bool> {
        check_key(comparator, key)?;
        if let Some(lo) = bound_key(&self.lo) {
            if order(comparator, key, lo)? == Ordering::Less {
                return Ok(false);
            }
        }
        if let Some(hi) = bound_key(&self.hi) {
            if order(comparator, key, hi)? == Ordering::Greater {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether `key` may serve as a bound of a narrower window. An exclusive
    /// bound may sit exactly on this window's exclusive edge.
    fn admits<C: Comparator<K>>(&self, key: &K, inclusive: bool, comparator: &C) -> Result<bool> {
        if inclusive {
            self.contains(key, comparator)
        } else {
            self.contains_closed(key, comparator)
        }
    }

    /// Narrower window from `from` to `to`, in this window's orientation.
    pub fn sub_range<C: Comparator<K>>(
        &self,
        from: K,
        from_inclusive: bool,
        to: K,
        to_inclusive: bool,
        comparator: &C,
    ) -> Result<Self> {
        if !self.admits(&from, from_inclusive, comparator)? {
            return Err(TreeMapError::Range("fromKey out of range"));
        }
        if !self.admits(&to, to_inclusive, comparator)? {
            return Err(TreeMapError::Range("toKey out of range"));
        }
        let (lo, hi) = if self.descending {
            (bound(to, to_inclusive), bound(from, from_inclusive))
        } else {
            (bound(from, from_inclusive), bound(to, to_inclusive))
        };
        Self::new(lo, hi, self.descending, comparator)
    }

    /// Narrower window ending at `to`, in this window's orientation.
    pub fn head_range<C: Comparator<K>>(&self, to: K, inclusive: bool, comparator: &C) -> Result<Self>
    where
        K: Clone,
    {
        if !self.admits(&to, inclusive, comparator)? {
            return Err(TreeMapError::Range("toKey out of range"));
        }
        let (lo, hi) = if self.descending {
            (bound(to, inclusive), self.hi.clone())
        } else {
            (self.lo.clone(), bound(to, inclusive))
        };
        Self::new(lo, hi, self.descending, comparator)
    }

    /// Narrower window starting at `from`, in this window's orientation.
    pub fn tail_range<C: Comparator<K>>(&self, from: K, inclusive: bool, comparator: &C) -> Result<Self>
    where
        K: Clone,
    {
        if !self.admits(&from, inclusive, comparator)? {
            return Err(TreeMapError::Range("fromKey out of range"));
        }
        let (lo, hi) = if self.descending {
            (self.lo.clone(), bound(from, inclusive))
        } else {
            (bound(from, inclusive), self.hi.clone())
        };
        Self::new(lo, hi, self.descending, comparator)
    }

    /// Same window, opposite orientation.
    pub fn reversed(&self) -> Self
    where
        K: Clone,
    {
        Self {
            lo: self.lo.clone(),
            hi: self.hi.clone(),
            descending: !self.descending,
        }
    }
}

/// Window onto a `TreeMap<K, V, C>` through the handle `M`.
pub struct RangeView<M, K, V, C> {
    map: M,
    range: KeyRange<K>,
    _entries: PhantomData<fn() -> (V, C)>,
}

impl<M, K, V, C> RangeView<M, K, V, C> {
    pub(crate) fn new(map: M, range: KeyRange<K>) -> Self {
        Self {
            map,
            range,
            _entries: PhantomData,
        }
    }

    pub fn range(&self) -> &KeyRange<K> {
        &self.range
    }
}

impl<M, K, V, C> RangeView<M, K, V, C>
where
    M: Deref<Target = TreeMap<K, V, C>>,
    C: Comparator<K>,
{
    fn comparator(&self) -> &C {
        self.map.comparator()
    }

    fn too_low(&self, key: &K) -> Result<bool> {
        self.range.too_low(key, self.comparator())
    }

    fn too_high(&self, key: &K) -> Result<bool> {
        self.range.too_high(key, self.comparator())
    }

    fn unless_too_high(&self, e: Option<u32>) -> Result<Option<u32>> {
        match e {
            Some(i) if !self.too_high(self.map.key_at(i))? => Ok(Some(i)),
            _ => Ok(None),
        }
    }

    fn unless_too_low(&self, e: Option<u32>) -> Result<Option<u32>> {
        match e {
            Some(i) if !self.too_low(self.map.key_at(i))? => Ok(Some(i)),
            _ => Ok(None),
        }
    }

    fn abs_lowest(&self) -> Result<Option<u32>> {
        let e = match &self.range.lo {
            Bound::Unbounded => self.map.first_node(),
            Bound::Included(lo) => self.map.ceiling_node(lo)?,
            Bound::Excluded(lo) => self.map.higher_node(lo)?,
        };
        self.unless_too_high(e)
    }

    fn abs_highest(&self) -> Result<Option<u32>> {
        let e = match &self.range.hi {
            Bound::Unbounded => self.map.last_node(),
            Bound::Included(hi) => self.map.floor_node(hi)?,
            Bound::Excluded(hi) => self.map.lower_node(hi)?,
        };
        self.unless_too_low(e)
    }

    fn abs_ceiling(&self, key: &K) -> Result<Option<u32>> {
        if self.too_low(key)? {
            return self.abs_lowest();
        }
        self.unless_too_high(self.map.ceiling_node(key)?)
    }

    fn abs_higher(&self, key: &K) -> Result<Option<u32>> {
        if self.too_low(key)? {
            return self.abs_lowest();
        }
        self.unless_too_high(self.map.higher_node(key)?)
    }

    fn abs_floor(&self, key: &K) -> Result<Option<u32>> {
        if self.too_high(key)? {
            return self.abs_highest();
        }
        self.unless_too_low(self.map.floor_node(key)?)
    }

    fn abs_lower(&self, key: &K) -> Result<Option<u32>> {
        if self.too_high(key)? {
            return self.abs_highest();
        }
        self.unless_too_low(self.map.lower_node(key)?)
    }

    /// First node past the high edge, where an ascending traversal stops.
    fn abs_high_fence(&self) -> Result<Option<u32>> {
        match &self.range.hi {
            Bound::Unbounded => Ok(None),
            Bound::Included(hi) => self.map.higher_node(hi),
            Bound::Excluded(hi) => self.map.ceiling_node(hi),
        }
    }

    /// First node past the low edge, where a descending traversal stops.
    fn abs_low_fence(&self) -> Result<Option<u32>> {
        match &self.range.lo {
            Bound::Unbounded => Ok(None),
            Bound::Included(lo) => self.map.lower_node(lo),
            Bound::Excluded(lo) => self.map.floor_node(lo),
        }
    }

    fn sub_lowest(&self) -> Result<Option<u32>> {
        if self.range.descending {
            self.abs_highest()
        } else {
            self.abs_lowest()
        }
    }

    fn sub_highest(&self) -> Result<Option<u32>> {
        if self.range.descending {
            self.abs_lowest()
        } else {
            self.abs_highest()
        }
    }

    fn sub_ceiling(&self, key: &K) -> Result<Option<u32>> {
        if self.range.descending {
            self.abs_floor(key)
        } else {
            self.abs_ceiling(key)
        }
    }

    fn sub_higher(&self, key: &K) -> Result<Option<u32>> {
        if self.range.descending {
            self.abs_lower(key)
        } else {
            self.abs_higher(key)
        }
    }

    fn sub_floor(&self, key: &K) -> Result<Option<u32>> {
        if self.range.descending {
            self.abs_ceiling(key)
        } else {
            self.abs_floor(key)
        }
    }

    fn sub_lower(&self, key: &K) -> Result<Option<u32>> {
        if self.range.descending {
            self.abs_higher(key)
        } else {
            self.abs_lower(key)
        }
    }

    fn entry(&self, e: Option<u32>) -> Option<(&K, &V)> {
        e.map(|i| self.map.entry_at(i))
    }

    fn key(&self, e: Option<u32>) -> Option<&K> {
        e.map(|i| self.map.key_at(i))
    }

    pub fn contains(&self, key: &K) -> Result<bool> {
        self.range.contains(key, self.comparator())
    }

    /// Number of entries in the window. Counts by traversal unless the window
    /// is unbounded.
    pub fn len(&self) -> Result<usize> {
        if self.range.is_full() {
            return Ok(self.map.len());
        }
        Ok(self.iter()?.count())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.abs_lowest()?.is_none())
    }

    pub fn contains_key(&self, key: &K) -> Result<bool> {
        Ok(self.contains(key)? && self.map.contains_key(key)?)
    }

    pub fn get(&self, key: &K) -> Result<Option<&V>> {
        if !self.contains(key)? {
            return Ok(None);
        }
        self.map.get(key)
    }

    pub fn first_entry(&self) -> Result<Option<(&K, &V)>> {
        Ok(self.entry(self.sub_lowest()?))
    }

    pub fn last_entry(&self) -> Result<Option<(&K, &V)>> {
        Ok(self.entry(self.sub_highest()?))
    }

    pub fn first_key(&self) -> Result<&K> {
        self.key(self.sub_lowest()?)
            .ok_or(TreeMapError::EmptyStructure)
    }

    pub fn last_key(&self) -> Result<&K> {
        self.key(self.sub_highest()?)
            .ok_or(TreeMapError::EmptyStructure)
    }

    pub fn ceiling_entry(&self, key: &K) -> Result<Option<(&K, &V)>> {
        Ok(self.entry(self.sub_ceiling(key)?))
    }

    pub fn ceiling_key(&self, key: &K) -> Result<Option<&K>> {
        Ok(self.key(self.sub_ceiling(key)?))
    }

    pub fn floor_entry(&self, key: &K) -> Result<Option<(&K, &V)>> {
        Ok(self.entry(self.sub_floor(key)?))
    }

    pub fn floor_key(&self, key: &K) -> Result<Option<&K>> {
        Ok(self.key(self.sub_floor(key)?))
    }

    pub fn higher_entry(&self, key: &K) -> Result<Option<(&K, &V)>> {
        Ok(self.entry(self.sub_higher(key)?))
    }

    pub fn higher_key(&self, key: &K) -> Result<Option<&K>> {
        Ok(self.key(self.sub_higher(key)?))
    }

    pub fn lower_entry(&self, key: &K) -> Result<Option<(&K, &V)>> {
        Ok(self.entry(self.sub_lower(key)?))
    }

    pub fn lower_key(&self, key: &K) -> Result<Option<&K>> {
        Ok(self.key(self.sub_lower(key)?))
    }

    /// Entries of the window in the view's orientation.
    pub fn iter(&self) -> Result<Iter<'_, K, V>> {
        let low = self.abs_lowest()?;
        let high = if low.is_some() { self.abs_highest()? } else { None };
        Ok(Iter::new(self.map.store(), low, high, self.range.descending))
    }

    pub fn keys(&self) -> Result<Keys<'_, K, V>> {
        Ok(Keys { inner: self.iter()? })
    }

    pub fn values(&self) -> Result<Values<'_, K, V>> {
        Ok(Values { inner: self.iter()? })
    }

    /// Fail-fast cursor over the window in the view's orientation.
    pub fn cursor(&self) -> Result<Cursor> {
        let version = self.map.version();
        Ok(if self.range.descending {
            Cursor::new(self.abs_highest()?, self.abs_low_fence()?, version, Direction::Descending)
        } else {
            Cursor::new(self.abs_lowest()?, self.abs_high_fence()?, version, Direction::Ascending)
        })
    }

    pub fn sub_map(
        &self,
        from: K,
        from_inclusive: bool,
        to: K,
        to_inclusive: bool,
    ) -> Result<RangeView<&TreeMap<K, V, C>, K, V, C>> {
        let range = self
            .range
            .sub_range(from, from_inclusive, to, to_inclusive, self.comparator())?;
        Ok(RangeView::new(&*self.map, range))
    }

    pub fn head_map(&self, to: K, inclusive: bool) -> Result<RangeView<&TreeMap<K, V, C>, K, V, C>>
    where
        K: Clone,
    {
        let range = self.range.head_range(to, inclusive, self.comparator())?;
        Ok(RangeView::new(&*self.map, range))
    }

    pub fn tail_map(&self, from: K, inclusive: bool) -> Result<RangeView<&TreeMap<K, V, C>, K, V, C>>
    where
        K: Clone,
    {
        let range = self.range.tail_range(from, inclusive, self.comparator())?;
        Ok(RangeView::new(&*self.map, range))
    }

    pub fn descending_map(&self) -> RangeView<&TreeMap<K, V, C>, K, V, C>
    where
        K: Clone,
    {
        RangeView::new(&*self.map, self.range.reversed())
    }
}

impl<M, K, V, C> RangeView<M, K, V, C>
where
    M: DerefMut<Target = TreeMap<K, V, C>>,
    C: Comparator<K>,
{
    fn check_in_range(&self, key: &K) -> Result<()> {
        if self.contains(key)? {
            Ok(())
        } else {
            debug!("rejected key outside view window");
            Err(TreeMapError::Range("key out of range"))
        }
    }

    /// Inserts through the view; keys outside the window are rejected.
    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        self.check_in_range(&key)?;
        self.map.put(key, value)
    }

    /// Removes through the view; keys outside the window are rejected.
    pub fn remove(&mut self, key: &K) -> Result<Option<V>> {
        self.check_in_range(key)?;
        self.map.remove(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Result<Option<&mut V>> {
        if !self.contains(key)? {
            return Ok(None);
        }
        self.map.get_mut(key)
    }

    pub fn poll_first_entry(&mut self) -> Result<Option<(K, V)>> {
        let e = self.sub_lowest()?;
        Ok(e.map(|i| self.map.delete_node(i).1))
    }

    pub fn poll_last_entry(&mut self) -> Result<Option<(K, V)>> {
        let e = self.sub_highest()?;
        Ok(e.map(|i| self.map.delete_node(i).1))
    }

    /// Removes every entry inside the window.
    pub fn clear(&mut self) -> Result<()> {
        while let Some(i) = self.abs_lowest()? {
            self.map.delete_node(i);
        }
        Ok(())
    }

    pub fn sub_map_mut(
        &mut self,
        from: K,
        from_inclusive: bool,
        to: K,
        to_inclusive: bool,
    ) -> Result<RangeView<&mut TreeMap<K, V, C>, K, V, C>> {
        let range = self
            .range
            .sub_range(from, from_inclusive, to, to_inclusive, self.comparator())?;
        Ok(RangeView::new(&mut *self.map, range))
    }

    pub fn head_map_mut(&mut self, to: K, inclusive: bool) -> Result<RangeView<&mut TreeMap<K, V, C>, K, V, C>>
    where
        K: Clone,
    {
        let range = self.range.head_range(to, inclusive, self.comparator())?;
        Ok(RangeView::new(&mut *self.map, range))
    }

    pub fn tail_map_mut(&mut self, from: K, inclusive: bool) -> Result<RangeView<&mut TreeMap<K, V, C>, K, V, C>>
    where
        K: Clone,
    {
        let range = self.range.tail_range(from, inclusive, self.comparator())?;
        Ok(RangeView::new(&mut *self.map, range))
    }

    pub fn descending_map_mut(&mut self) -> RangeView<&mut TreeMap<K, V, C>, K, V, C>
    where
        K: Clone,
    {
        let range = self.range.reversed();
        RangeView::new(&mut *self.map, range)
    }
}
