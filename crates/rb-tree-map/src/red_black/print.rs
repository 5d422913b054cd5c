use std::fmt::{Debug, Write};

use crate::node::{Color, NodeStore};

/// Indented dump of the subtree at `node`, one node per line with its color.
/// Each line is prefixed with `tab` plus two spaces per level of depth, and
/// with `<` or `>` for a left or right child.
pub fn print<K, V>(store: &NodeStore<K, V>, node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
{
    let mut out = String::new();
    dump(store, node, tab, ' ', &mut out);
    out
}

fn dump<K, V>(store: &NodeStore<K, V>, node: Option<u32>, indent: &str, side: char, out: &mut String)
where
    K: Debug,
    V: Debug,
{
    let Some(i) = node else {
        return;
    };
    let n = &store[i];
    let color = match n.color {
        Color::Red => 'R',
        Color::Black => 'B',
    };
    let _ = writeln!(out, "{indent}{side}{color} {:?}: {:?}", n.key, n.value);
    let deeper = format!("{indent}  ");
    dump(store, n.l, &deeper, '<', out);
    dump(store, n.r, &deeper, '>', out);
}
