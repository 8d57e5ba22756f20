use core::fmt;

use smallvec::SmallVec;

use super::handle::Link;
use super::raw_tree::RawTree;

/// Spaces added per tree level.
const INDENT: usize = 4;

/// Renders a tree sideways: the root at the left margin, right subtrees above their parent
/// and left subtrees below, with `nil` marking every absent child.
pub(crate) struct Pretty<'a, K, V> {
    tree: &'a RawTree<K, V>,
}

impl<'a, K, V> Pretty<'a, K, V> {
    pub(crate) fn new(tree: &'a RawTree<K, V>) -> Self {
        Self {
            tree,
        }
    }
}

impl<K: fmt::Debug, V> fmt::Display for Pretty<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.tree.store();
        let mut stack: SmallVec<[(Link, usize); 32]> = SmallVec::new();
        let mut current = store.sentinel().root;
        let mut depth = 0;

        // Reverse in-order: right, node, left.
        loop {
            while let Link::Node(h) = current {
                stack.push((current, depth));
                current = store.node(h).right();
                depth += 1;
            }
            writeln!(f, "{:indent$}nil", "", indent = depth * INDENT)?;

            let Some((Link::Node(h), level)) = stack.pop() else {
                break;
            };
            writeln!(f, "{:indent$}{:?}", "", store.node(h).key(), indent = level * INDENT)?;
            current = store.node(h).left();
            depth = level + 1;
        }
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn empty_tree() {
        let tree: RawTree<i32, ()> = RawTree::new();
        assert_eq!(Pretty::new(&tree).to_string(), "nil\n");
    }

    #[test]
    fn rotated_layout() {
        let mut tree = RawTree::new();
        for key in [2, 1, 3] {
            tree.try_insert_unique(key, ()).unwrap();
        }

        let expected = "        nil\n    3\n        nil\n2\n        nil\n    1\n        nil\n";
        assert_eq!(Pretty::new(&tree).to_string(), expected);
    }
}
