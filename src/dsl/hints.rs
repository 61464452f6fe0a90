//! Immutable record of what each parse branch expected and where.
//!
//! A [`Hints`] value is a persistent binary tree. Combinators never mutate a tree;
//! joining two trees allocates one node pointing at both, so hints collected on a
//! backtracked branch stay valid and cheap to share. Each node caches the furthest
//! offset beneath it, which lets [`Hints::expected_at`] skip shallow subtrees.

use std::sync::Arc;

#[derive(Debug)]
enum Node {
    /// `None` marks a position without naming anything.
    Leaf { offset: usize, label: Option<Arc<str>> },
    /// Children are only `None` while the node is being torn down.
    Join {
        furthest: usize,
        left: Option<Arc<Node>>,
        right: Option<Arc<Node>>,
    },
}

impl Node {
    fn furthest(&self) -> usize {
        match self {
            Node::Leaf { offset, .. } => *offset,
            Node::Join { furthest, .. } => *furthest,
        }
    }
}

impl Drop for Node {
    // Long `many` loops build left spines deep enough to overflow a recursive drop.
    fn drop(&mut self) {
        let mut stack = Vec::new();
        if let Node::Join { left, right, .. } = self {
            stack.extend(left.take());
            stack.extend(right.take());
        }
        while let Some(node) = stack.pop() {
            if let Ok(mut node) = Arc::try_unwrap(node) {
                if let Node::Join { left, right, .. } = &mut node {
                    stack.extend(left.take());
                    stack.extend(right.take());
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Hints {
    root: Option<Arc<Node>>,
}

impl Hints {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single `label` expected at `offset`.
    pub fn expected(offset: usize, label: impl Into<Arc<str>>) -> Self {
        Self::leaf(offset, Some(label.into()))
    }

    /// An unlabeled failure position.
    pub fn mark(offset: usize) -> Self {
        Self::leaf(offset, None)
    }

    fn leaf(offset: usize, label: Option<Arc<str>>) -> Self {
        Self {
            root: Some(Arc::new(Node::Leaf { offset, label })),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Union of both trees.
    pub fn join(&self, other: &Hints) -> Hints {
        match (&self.root, &other.root) {
            (None, _) => other.clone(),
            (_, None) => self.clone(),
            (Some(left), Some(right)) => Hints {
                root: Some(Arc::new(Node::Join {
                    furthest: left.furthest().max(right.furthest()),
                    left: Some(Arc::clone(left)),
                    right: Some(Arc::clone(right)),
                })),
            },
        }
    }

    /// Deepest offset recorded anywhere in the tree.
    pub fn furthest(&self) -> Option<usize> {
        self.root.as_ref().map(|node| node.furthest())
    }

    /// Keeps whichever tree reached further; ties are unioned.
    pub fn deepest(&self, other: &Hints) -> Hints {
        match (self.furthest(), other.furthest()) {
            (Some(a), Some(b)) if a > b => self.clone(),
            (Some(a), Some(b)) if b > a => other.clone(),
            _ => self.join(other),
        }
    }

    /// All `(offset, label)` leaves in left-to-right order.
    pub fn flatten(&self) -> Vec<(usize, Option<Arc<str>>)> {
        let mut out = Vec::new();
        self.walk(0, |offset, label| out.push((offset, label.cloned())));
        out
    }

    /// Distinct labels recorded at exactly `offset`, in first-seen order.
    pub fn expected_at(&self, offset: usize) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        self.walk(offset, |at, label| {
            if at != offset {
                return;
            }
            if let Some(label) = label {
                if !labels.iter().any(|l| l.as_str() == label.as_ref()) {
                    labels.push(label.to_string());
                }
            }
        });
        labels
    }

    /// Iterative pre-order walk over leaves whose subtree reaches `min_offset`.
    fn walk(&self, min_offset: usize, mut visit: impl FnMut(usize, Option<&Arc<str>>)) {
        let mut stack: Vec<&Arc<Node>> = self.root.iter().collect();
        while let Some(node) = stack.pop() {
            if node.furthest() < min_offset {
                continue;
            }
            match node.as_ref() {
                Node::Leaf { offset, label } => visit(*offset, label.as_ref()),
                Node::Join { left, right, .. } => {
                    stack.extend(right.iter());
                    stack.extend(left.iter());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_has_no_offset() {
        let hints = Hints::empty();
        assert!(hints.is_empty());
        assert_eq!(hints.furthest(), None);
        assert!(hints.expected_at(0).is_empty());
    }

    #[test]
    fn join_caches_the_furthest_offset() {
        let hints = Hints::expected(3, "a").join(&Hints::mark(7)).join(&Hints::expected(5, "b"));
        assert_eq!(hints.furthest(), Some(7));
        assert!(hints.expected_at(7).is_empty());
        assert_eq!(hints.expected_at(5), vec!["b".to_string()]);
    }

    #[test]
    fn deepest_prefers_further_and_unions_ties() {
        let a = Hints::expected(2, "number");
        let b = Hints::expected(1, "sign");
        let c = Hints::expected(2, "constant");
        assert_eq!(a.deepest(&b).expected_at(2), vec!["number".to_string()]);
        assert_eq!(b.deepest(&a).furthest(), Some(2));
        assert_eq!(
            a.deepest(&c).expected_at(2),
            vec!["number".to_string(), "constant".to_string()]
        );
    }

    #[test]
    fn flatten_preserves_left_to_right_order() {
        let hints = Hints::expected(0, "x")
            .join(&Hints::mark(4))
            .join(&Hints::expected(2, "y"));
        let offsets: Vec<usize> = hints.flatten().into_iter().map(|(o, _)| o).collect();
        assert_eq!(offsets, vec![0, 4, 2]);
    }

    #[test]
    fn deep_left_spines_do_not_recurse() {
        let mut hints = Hints::empty();
        for i in 0..100_000 {
            hints = hints.join(&Hints::expected(i % 10, "digit"));
        }
        assert_eq!(hints.furthest(), Some(9));
        assert_eq!(hints.expected_at(9), vec!["digit".to_string()]);
    }
}
