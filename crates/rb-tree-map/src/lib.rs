//! Ordered map on an arena-backed red-black tree.
//!
//! [`TreeMap`] keeps its entries sorted by a [`Comparator`] and answers exact
//! lookups, nearest-key navigation (`floor`, `ceiling`, `lower`, `higher`),
//! ordered iteration and bounded or reversed [`RangeView`]s over the same
//! storage. Entries already in order can be loaded in linear time with
//! [`TreeMap::from_sorted`].
//!
//! Nodes are not heap-allocated individually. All "pointers" (parent, left,
//! right) are `Option<u32>` indices into a slab owned by the map.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`node`] | [`node::RbNode`], [`node::Color`] and the slab [`node::NodeStore`] |
//! [`red_black`] | Rotations, insertion/deletion fixups, invariant checker, `print` |
//! [`navigate`] | `first`, `last`, `successor`, `predecessor` and the nearest-key descents |
//! [`build`] | Linear-time construction from a sorted source |
//! [`map`] | [`TreeMap`] |
//! [`range`] | [`KeyRange`] and [`RangeView`] |
//! [`cursor`] | Fail-fast [`Cursor`] with removal |
//! [`iter`] | Borrowing and owning iterators |
//! [`compare`] | [`Comparator`], [`NaturalOrder`], [`TryOrder`] |
//!
//! # Example
//!
//! ```
//! use rb_tree_map::TreeMap;
//!
//! let mut map = TreeMap::new();
//! for k in [2, 4, 6, 8] {
//!     map.put(k, k * 10).unwrap();
//! }
//! assert_eq!(map.floor_key(&5).unwrap(), Some(&4));
//! assert_eq!(map.ceiling_key(&5).unwrap(), Some(&6));
//!
//! let view = map.sub_map(4, true, 8, false).unwrap();
//! let keys: Vec<_> = view.keys().unwrap().copied().collect();
//! assert_eq!(keys, vec![4, 6]);
//! ```

pub mod build;
pub mod compare;
pub mod cursor;
pub mod error;
pub mod iter;
pub mod map;
pub mod navigate;
pub mod node;
pub mod range;
pub mod red_black;

pub use compare::{Comparator, NaturalOrder, TryOrder};
pub use cursor::{Cursor, Direction};
pub use error::{Result, TreeMapError};
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use map::TreeMap;
pub use range::{KeyRange, RangeView};
