//! Fail-fast cursor.
//!
//! A [`Cursor`] remembers where it is in a [`TreeMap`] by arena index but does
//! not borrow the map: the map is passed to every step instead. This lets the
//! map be mutated between steps, which the cursor detects through the map's
//! structural version and reports as [`TreeMapError::Concurrency`]. Removing
//! through the cursor itself is allowed and keeps the cursor usable.

use tracing::warn;

use crate::error::{Result, TreeMapError};
use crate::map::TreeMap;
use crate::navigate::{predecessor, successor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Clone, Debug)]
pub struct Cursor {
    next: Option<u32>,
    /// First node past the end of the traversal, for bounded views.
    fence: Option<u32>,
    last_returned: Option<u32>,
    expected_version: u64,
    direction: Direction,
}

impl Cursor {
    pub(crate) fn new(
        first: Option<u32>,
        fence: Option<u32>,
        version: u64,
        direction: Direction,
    ) -> Self {
        Self {
            next: first,
            fence,
            last_returned: None,
            expected_version: version,
            direction,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn check_version<K, V, C>(&self, map: &TreeMap<K, V, C>) -> Result<()> {
        if map.version() != self.expected_version {
            warn!(
                expected = self.expected_version,
                actual = map.version(),
                "cursor observed concurrent modification"
            );
            return Err(TreeMapError::Concurrency);
        }
        Ok(())
    }

    /// Whether another entry remains. Does not check for modification.
    pub fn has_next(&self) -> bool {
        self.next.is_some() && self.next != self.fence
    }

    /// Yields the next entry, or `None` once the traversal is exhausted.
    #[allow(clippy::should_implement_trait)]
    pub fn next<'m, K, V, C>(&mut self, map: &'m TreeMap<K, V, C>) -> Result<Option<(&'m K, &'m V)>> {
        self.check_version(map)?;
        if !self.has_next() {
            return Ok(None);
        }
        let e = self.next.expect("has_next checked");
        let store = map.store();
        self.next = match self.direction {
            Direction::Ascending => successor(store, e),
            Direction::Descending => predecessor(store, e),
        };
        self.last_returned = Some(e);
        let node = &store[e];
        Ok(Some((&node.key, &node.value)))
    }

    pub fn next_key<'m, K, V, C>(&mut self, map: &'m TreeMap<K, V, C>) -> Result<Option<&'m K>> {
        Ok(self.next(map)?.map(|(k, _)| k))
    }

    pub fn next_value<'m, K, V, C>(&mut self, map: &'m TreeMap<K, V, C>) -> Result<Option<&'m V>> {
        Ok(self.next(map)?.map(|(_, v)| v))
    }

    /// Removes the entry most recently yielded by this cursor and returns it.
    pub fn remove<K, V, C>(&mut self, map: &mut TreeMap<K, V, C>) -> Result<(K, V)> {
        let last = self.last_returned.ok_or(TreeMapError::NoCurrentEntry)?;
        self.check_version(map)?;

        let (gone, entry) = map.delete_node(last);
        // A two-child node is deleted by moving its successor's entry into
        // its slot and freeing the successor's slot instead.
        if gone != last {
            if self.next == Some(gone) {
                self.next = Some(last);
            }
            if self.fence == Some(gone) {
                self.fence = Some(last);
            }
        }
        self.last_returned = None;
        self.expected_version = map.version();
        Ok(entry)
    }
}
