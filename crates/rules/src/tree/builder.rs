use super::node::{ChildRole, NodeId, NodeKind, Span, SyntaxTree};

/// Cursor-style construction API for host adapters.
///
/// `open` descends into a new node, `close` returns to its parent, `leaf`
/// inserts a childless node in place. When the host does not pass explicit
/// spans, the builder assigns each node the next value of an increasing
/// counter; rules only ever compare offsets for ordering, so construction
/// order standing in for source order is sufficient.
pub struct TreeBuilder {
    tree: SyntaxTree,
    stack: Vec<NodeId>,
    next_offset: usize,
}

impl TreeBuilder {
    pub fn new(unit: impl Into<String>) -> Self {
        let tree = SyntaxTree::new(unit);
        let root = tree.root();
        Self {
            tree,
            stack: vec![root],
            next_offset: 1,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.tree = self.tree.with_path(path);
        self
    }

    pub fn open(&mut self, kind: NodeKind) -> &mut Self {
        self.open_as(ChildRole::Child, kind)
    }

    pub fn open_as(&mut self, role: ChildRole, kind: NodeKind) -> &mut Self {
        let span = self.auto_span();
        self.open_spanned(role, kind, span)
    }

    pub fn open_spanned(&mut self, role: ChildRole, kind: NodeKind, span: Span) -> &mut Self {
        let parent = self.current();
        let id = self.tree.push(parent, role, kind, span);
        if span.start >= self.next_offset {
            self.next_offset = span.start + 1;
        }
        self.stack.push(id);
        self
    }

    pub fn leaf(&mut self, kind: NodeKind) -> &mut Self {
        self.leaf_as(ChildRole::Child, kind)
    }

    pub fn leaf_as(&mut self, role: ChildRole, kind: NodeKind) -> &mut Self {
        self.open_as(role, kind);
        self.close()
    }

    pub fn leaf_spanned(&mut self, role: ChildRole, kind: NodeKind, span: Span) -> &mut Self {
        self.open_spanned(role, kind, span);
        self.close()
    }

    /// The node subsequent `open`/`leaf` calls attach to.
    pub fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or_else(|| self.tree.root())
    }

    pub fn close(&mut self) -> &mut Self {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        self
    }

    /// Closes any still-open nodes and returns the finished tree.
    pub fn finish(mut self) -> SyntaxTree {
        self.stack.truncate(1);
        self.tree
    }

    fn auto_span(&mut self) -> Span {
        let span = Span::point(self.next_offset);
        self.next_offset += 1;
        span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_offsets_follow_construction_order() {
        let mut b = TreeBuilder::new("Offsets.kt");
        b.open(NodeKind::function("work"));
        b.open_as(ChildRole::Body, NodeKind::Block);
        b.leaf(NodeKind::call("first"));
        b.leaf(NodeKind::call("second"));
        let tree = b.finish();

        let offsets: Vec<usize> = tree
            .descendants(tree.root())
            .map(|n| tree.offset(n))
            .collect();
        let mut sorted = offsets.clone();
        sorted.sort_unstable();
        assert_eq!(offsets, sorted);
    }

    #[test]
    fn explicit_spans_advance_the_counter() {
        let mut b = TreeBuilder::new("Spans.kt");
        b.open_spanned(ChildRole::Child, NodeKind::function("work"), Span::new(10, 80));
        b.open_as(ChildRole::Body, NodeKind::Block);
        let tree = b.finish();

        let offsets: Vec<usize> = tree
            .descendants(tree.root())
            .skip(1)
            .map(|n| tree.offset(n))
            .collect();
        assert_eq!(offsets, vec![10, 11]);
    }

    #[test]
    fn finish_closes_open_nodes() {
        let mut b = TreeBuilder::new("Open.kt");
        b.open(NodeKind::function("work"));
        b.open_as(ChildRole::Body, NodeKind::Block);
        let tree = b.finish();
        assert_eq!(tree.node_count(), 3);
    }
}
