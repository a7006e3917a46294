//! Collection literals and call argument lists.

use exl_value::Value;

use super::Node;

/// A collection literal: key/value node pairs in declaration order.
///
/// Elements added without a key get the next auto-index (0, 1, 2, ...).
/// The auto-index counts only keyless additions; explicit keys never
/// move it.
#[derive(Clone, Debug, Default)]
pub struct ArrayNode {
    pub(super) pairs: Vec<(Node, Node)>,
    next_index: i64,
}

impl ArrayNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair. A missing key becomes an integer constant from the
    /// auto-index.
    pub fn add_element(&mut self, value: Node, key: Option<Node>) {
        let key = key.unwrap_or_else(|| {
            let index = self.next_index;
            self.next_index = index.saturating_add(1);
            Node::constant(Value::Int(index))
        });
        self.pairs.push((key, value));
    }

    /// Builder-style keyless [`add_element`](Self::add_element).
    #[must_use]
    pub fn with(mut self, value: Node) -> Self {
        self.add_element(value, None);
        self
    }

    /// Builder-style keyed [`add_element`](Self::add_element).
    #[must_use]
    pub fn with_key(mut self, key: Node, value: Node) -> Self {
        self.add_element(value, Some(key));
        self
    }

    /// `(key, value)` pairs in declaration order.
    pub fn pairs(&self) -> impl ExactSizeIterator<Item = (&Node, &Node)> {
        self.pairs.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// A positional argument list.
///
/// Same storage as [`ArrayNode`], but every element is keyless and the
/// keys are never emitted.
#[derive(Clone, Debug, Default)]
pub struct ArgumentsNode(pub(super) ArrayNode);

impl ArgumentsNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: Node) {
        self.0.add_element(value, None);
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, value: Node) -> Self {
        self.push(value);
        self
    }

    /// Argument nodes in order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.0.pairs.iter().map(|(_, v)| v)
    }

    pub(super) fn values_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.0.pairs.iter_mut().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Node> for ArgumentsNode {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        let mut arguments = ArgumentsNode::new();
        for value in iter {
            arguments.push(value);
        }
        arguments
    }
}

impl From<Vec<Node>> for ArgumentsNode {
    fn from(values: Vec<Node>) -> Self {
        values.into_iter().collect()
    }
}
