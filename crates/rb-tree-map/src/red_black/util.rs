use std::cmp::Ordering;

use crate::compare::{order, Comparator};
use crate::navigate::{first, successor};
use crate::node::{Color, NodeStore};

#[inline]
fn color_of<K, V>(store: &NodeStore<K, V>, i: Option<u32>) -> Color {
    i.map_or(Color::Black, |i| store[i].color)
}

#[inline]
fn set_color<K, V>(store: &mut NodeStore<K, V>, i: Option<u32>, color: Color) {
    if let Some(i) = i {
        store[i].color = color;
    }
}

#[inline]
fn left_of<K, V>(store: &NodeStore<K, V>, i: Option<u32>) -> Option<u32> {
    i.and_then(|i| store[i].l)
}

#[inline]
fn right_of<K, V>(store: &NodeStore<K, V>, i: Option<u32>) -> Option<u32> {
    i.and_then(|i| store[i].r)
}

/// Points `p`'s link that held `old` (or the root) at `new`.
fn replace_child<K, V>(
    store: &mut NodeStore<K, V>,
    root: Option<u32>,
    p: Option<u32>,
    old: u32,
    new: Option<u32>,
) -> Option<u32> {
    match p {
        None => new,
        Some(p) => {
            if store[p].l == Some(old) {
                store[p].l = new;
            } else {
                store[p].r = new;
            }
            root
        }
    }
}

/// Lifts `n`'s right child into `n`'s place. Returns the new root.
pub fn rotate_left<K, V>(store: &mut NodeStore<K, V>, root: Option<u32>, n: u32) -> Option<u32> {
    let r = store[n].r.expect("rotate_left requires a right child");
    let rl = store[r].l;

    store[n].r = rl;
    if let Some(rl) = rl {
        store[rl].p = Some(n);
    }

    let p = store[n].p;
    store[r].p = p;
    let root = replace_child(store, root, p, n, Some(r));

    store[r].l = Some(n);
    store[n].p = Some(r);
    root
}

/// Lifts `n`'s left child into `n`'s place. Returns the new root.
pub fn rotate_right<K, V>(store: &mut NodeStore<K, V>, root: Option<u32>, n: u32) -> Option<u32> {
    let l = store[n].l.expect("rotate_right requires a left child");
    let lr = store[l].r;

    store[n].l = lr;
    if let Some(lr) = lr {
        store[lr].p = Some(n);
    }

    let p = store[n].p;
    store[l].p = p;
    let root = replace_child(store, root, p, n, Some(l));

    store[l].r = Some(n);
    store[n].p = Some(l);
    root
}

/// Hangs the fresh node `n` below `parent` (or makes it the root) and
/// restores the red-black invariants. Returns the new root.
pub fn insert_at<K, V>(
    store: &mut NodeStore<K, V>,
    root: Option<u32>,
    n: u32,
    parent: Option<u32>,
    side: Ordering,
) -> Option<u32> {
    store[n].p = parent;
    let root = match parent {
        None => Some(n),
        Some(p) => {
            if side == Ordering::Less {
                store[p].l = Some(n);
            } else {
                store[p].r = Some(n);
            }
            root
        }
    };
    fix_after_insertion(store, root, n)
}

fn fix_after_insertion<K, V>(
    store: &mut NodeStore<K, V>,
    mut root: Option<u32>,
    mut x: u32,
) -> Option<u32> {
    store[x].color = Color::Red;

    while Some(x) != root {
        let Some(p) = store[x].p else { break };
        if store[p].is_black() {
            break;
        }
        // A red parent is never the root, so the grandparent exists.
        let g = store[p].p.expect("red node has a parent");

        if store[g].l == Some(p) {
            let uncle = store[g].r;
            if color_of(store, uncle) == Color::Red {
                store[p].color = Color::Black;
                set_color(store, uncle, Color::Black);
                store[g].color = Color::Red;
                x = g;
            } else {
                let mut p = p;
                if store[p].r == Some(x) {
                    x = p;
                    root = rotate_left(store, root, x);
                    p = store[x].p.expect("rotated node has a parent");
                }
                store[p].color = Color::Black;
                store[g].color = Color::Red;
                root = rotate_right(store, root, g);
            }
        } else {
            let uncle = store[g].l;
            if color_of(store, uncle) == Color::Red {
                store[p].color = Color::Black;
                set_color(store, uncle, Color::Black);
                store[g].color = Color::Red;
                x = g;
            } else {
                let mut p = p;
                if store[p].l == Some(x) {
                    x = p;
                    root = rotate_right(store, root, x);
                    p = store[x].p.expect("rotated node has a parent");
                }
                store[p].color = Color::Black;
                store[g].color = Color::Red;
                root = rotate_left(store, root, g);
            }
        }
    }

    set_color(store, root, Color::Black);
    root
}

/// Unlinks the entry held by node `n`.
///
/// When `n` has two children its entry is first swapped with its in-order
/// successor, which is then the node taken out of the tree. Returns the new
/// root and the index of the node that was physically unlinked; that node
/// now holds the deleted entry and is ready to be released.
pub fn remove<K, V>(store: &mut NodeStore<K, V>, mut root: Option<u32>, mut n: u32) -> (Option<u32>, u32) {
    if let (Some(_), Some(r)) = (store[n].l, store[n].r) {
        let s = first(store, Some(r)).expect("right subtree is non-empty");
        store.swap_entries(n, s);
        n = s;
    }

    let replacement = store[n].l.or(store[n].r);
    let p = store[n].p;

    if let Some(rep) = replacement {
        store[rep].p = p;
        root = replace_child(store, root, p, n, Some(rep));
        store[n].l = None;
        store[n].r = None;
        store[n].p = None;
        if store[n].is_black() {
            root = fix_after_deletion(store, root, rep);
        }
    } else if p.is_none() {
        root = None;
    } else {
        // No children: fix up with `n` standing in as the phantom leaf, then
        // cut it loose.
        if store[n].is_black() {
            root = fix_after_deletion(store, root, n);
        }
        if let Some(p) = store[n].p {
            if store[p].l == Some(n) {
                store[p].l = None;
            } else if store[p].r == Some(n) {
                store[p].r = None;
            }
            store[n].p = None;
        }
    }

    (root, n)
}

fn fix_after_deletion<K, V>(
    store: &mut NodeStore<K, V>,
    mut root: Option<u32>,
    mut x: u32,
) -> Option<u32> {
    while Some(x) != root && store[x].is_black() {
        let p = store[x].p.expect("non-root node has a parent");

        if store[p].l == Some(x) {
            let mut sib = store[p].r;

            if color_of(store, sib) == Color::Red {
                set_color(store, sib, Color::Black);
                store[p].color = Color::Red;
                root = rotate_left(store, root, p);
                sib = store[p].r;
            }

            if color_of(store, left_of(store, sib)) == Color::Black
                && color_of(store, right_of(store, sib)) == Color::Black
            {
                set_color(store, sib, Color::Red);
                x = p;
            } else {
                if color_of(store, right_of(store, sib)) == Color::Black {
                    set_color(store, left_of(store, sib), Color::Black);
                    set_color(store, sib, Color::Red);
                    if let Some(s) = sib {
                        root = rotate_right(store, root, s);
                    }
                    sib = store[p].r;
                }
                let parent_color = store[p].color;
                set_color(store, sib, parent_color);
                store[p].color = Color::Black;
                set_color(store, right_of(store, sib), Color::Black);
                root = rotate_left(store, root, p);
                break;
            }
        } else {
            let mut sib = store[p].l;

            if color_of(store, sib) == Color::Red {
                set_color(store, sib, Color::Black);
                store[p].color = Color::Red;
                root = rotate_right(store, root, p);
                sib = store[p].l;
            }

            if color_of(store, right_of(store, sib)) == Color::Black
                && color_of(store, left_of(store, sib)) == Color::Black
            {
                set_color(store, sib, Color::Red);
                x = p;
            } else {
                if color_of(store, left_of(store, sib)) == Color::Black {
                    set_color(store, right_of(store, sib), Color::Black);
                    set_color(store, sib, Color::Red);
                    if let Some(s) = sib {
                        root = rotate_left(store, root, s);
                    }
                    sib = store[p].l;
                }
                let parent_color = store[p].color;
                set_color(store, sib, parent_color);
                store[p].color = Color::Black;
                set_color(store, left_of(store, sib), Color::Black);
                root = rotate_right(store, root, p);
                break;
            }
        }
    }

    store[x].color = Color::Black;
    set_color(store, root, Color::Black);
    root
}

/// Checks parent links, the red-black invariants, key order and that the tree
/// holds exactly `len` nodes.
pub fn assert_red_black_tree<K, V, C>(
    store: &NodeStore<K, V>,
    root: Option<u32>,
    len: usize,
    comparator: &C,
) -> Result<(), String>
where
    C: Comparator<K>,
{
    let Some(root) = root else {
        return if len == 0 {
            Ok(())
        } else {
            Err(format!("Empty tree but len is {len}"))
        };
    };

    if store[root].p.is_some() {
        return Err("Root has parent".to_string());
    }
    if !store[root].is_black() {
        return Err("Root is not black".to_string());
    }

    fn black_height<K, V>(store: &NodeStore<K, V>, node: Option<u32>) -> Result<usize, String> {
        let Some(node) = node else {
            return Ok(0);
        };

        let l = store[node].l;
        let r = store[node].r;

        if let Some(li) = l {
            if store[li].p != Some(node) {
                return Err("Broken parent link on left child".to_string());
            }
        }
        if let Some(ri) = r {
            if store[ri].p != Some(node) {
                return Err("Broken parent link on right child".to_string());
            }
        }

        if !store[node].is_black() {
            if l.is_some_and(|i| !store[i].is_black()) {
                return Err("Red node has red left child".to_string());
            }
            if r.is_some_and(|i| !store[i].is_black()) {
                return Err("Red node has red right child".to_string());
            }
        }

        let lh = black_height(store, l)?;
        let rh = black_height(store, r)?;
        if lh != rh {
            return Err("Black height mismatch".to_string());
        }

        Ok(lh + usize::from(store[node].is_black()))
    }

    black_height(store, Some(root))?;

    let mut count = 0usize;
    let mut curr = first(store, Some(root));
    let mut prev: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev {
            match order(comparator, &store[prev].key, &store[i].key) {
                Ok(Ordering::Less) => {}
                Ok(_) => return Err("Node order violated".to_string()),
                Err(err) => return Err(format!("Node order unverifiable: {err}")),
            }
        }
        count += 1;
        prev = Some(i);
        curr = successor(store, i);
    }

    if count != len {
        return Err(format!("Tree holds {count} nodes but len is {len}"));
    }
    if store.live() != len {
        return Err(format!("Store holds {} live nodes but len is {len}", store.live()));
    }

    Ok(())
}

/// Longest root-to-leaf path, in nodes.
pub fn height<K, V>(store: &NodeStore<K, V>, root: Option<u32>) -> usize {
    let Some(i) = root else {
        return 0;
    };
    1 + height(store, store[i].l).max(height(store, store[i].r))
}
