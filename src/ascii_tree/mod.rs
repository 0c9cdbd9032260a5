//! Draw nested reports as an ascii tree
//!
//! Layout follows the `ascii_tree` crate (MIT, d.maetzke@bpressure.net).

use std::fmt::{self, Write};

#[derive(Clone, Debug)]
pub enum Tree {
    Node(String, Vec<Tree>),
    Leaf(Vec<String>),
}

const EMPTY: &str = "   ";
const EDGE: &str = "└─ ";
const PIPE: &str = "│  ";
const BRANCH: &str = "├─ ";

pub fn write_tree(f: &mut dyn Write, tree: &Tree) -> fmt::Result {
    write_tree_element(f, tree, &[])
}

/// `remaining` holds, for every ancestor level, how many siblings were left
/// to draw (itself included) when descending into it
fn write_tree_element(f: &mut dyn Write, tree: &Tree, remaining: &[usize]) -> fmt::Result {
    let mut continuation = String::new();

    for (depth, &left) in remaining.iter().enumerate() {
        let is_own_level = depth + 1 == remaining.len();
        let is_last_sibling = left == 1;

        let prefix = match (is_own_level, is_last_sibling) {
            (true, true) => EDGE,
            (true, false) => BRANCH,
            (false, true) => EMPTY,
            (false, false) => PIPE,
        };
        f.write_str(prefix)?;
        continuation.push_str(if is_last_sibling { EMPTY } else { PIPE });
    }

    match tree {
        Tree::Node(title, children) => {
            writeln!(f, "{}", title)?;
            for (i, child) in children.iter().enumerate() {
                let mut next = remaining.to_vec();
                next.push(children.len() - i);
                write_tree_element(f, child, &next)?;
            }
        }
        Tree::Leaf(lines) => {
            for (i, line) in lines.iter().enumerate() {
                if i == 0 {
                    writeln!(f, "{}", line)?;
                } else {
                    writeln!(f, "{}{}", continuation, line)?;
                }
            }
        }
    }

    Ok(())
}
