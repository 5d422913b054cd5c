//! Balanced tree core: rotations, CLRS insertion/deletion fixups and the
//! structural checker used by tests.
//!
//! All functions take the node store plus the current root and return the
//! new root, so the caller owns the root pointer.

mod print;
pub mod util;

pub use print::print;
pub use util::{assert_red_black_tree, height, insert_at, remove, rotate_left, rotate_right};
