/// Index of a node inside one [`SyntaxTree`] arena. Ids are only meaningful
/// for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// Byte-offset range inside the compilation unit. Hosts that translate real
/// parse trees supply genuine offsets; [`TreeBuilder`](super::TreeBuilder)
/// falls back to a monotonically increasing counter, which preserves the only
/// property the analyzer relies on: source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn point(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }
}

/// Position of a node relative to its parent, mirroring the field names a
/// grammar would attach to the edge (a call's receiver vs. its arguments).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildRole {
    Child,
    Receiver,
    Argument,
    Body,
    Condition,
    Initializer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    While,
    DoWhile,
    For,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Function {
        name: String,
        is_suspend: bool,
        annotations: Vec<String>,
    },
    Parameter {
        name: String,
        annotations: Vec<String>,
    },
    Binding {
        name: String,
        annotations: Vec<String>,
    },
    Class {
        name: String,
        supertypes: Vec<String>,
    },
    Lambda,
    Block,
    Call {
        callee: String,
        /// Host frontends that resolve callees can mark calls they know to be
        /// suspend-capable; the analyzer unions this with its fixed name set.
        suspends: bool,
    },
    MemberAccess {
        selector: String,
    },
    Reference {
        name: String,
    },
    Try,
    Catch {
        parameter: String,
        caught_type: String,
    },
    Finally,
    Loop {
        kind: LoopKind,
    },
    Throw,
    Return,
}

impl NodeKind {
    pub fn function(name: impl Into<String>) -> Self {
        NodeKind::Function {
            name: name.into(),
            is_suspend: false,
            annotations: Vec::new(),
        }
    }

    pub fn suspend_function(name: impl Into<String>) -> Self {
        NodeKind::Function {
            name: name.into(),
            is_suspend: true,
            annotations: Vec::new(),
        }
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        NodeKind::Parameter {
            name: name.into(),
            annotations: Vec::new(),
        }
    }

    pub fn annotated_parameter(name: impl Into<String>, annotations: &[&str]) -> Self {
        NodeKind::Parameter {
            name: name.into(),
            annotations: annotations.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn binding(name: impl Into<String>) -> Self {
        NodeKind::Binding {
            name: name.into(),
            annotations: Vec::new(),
        }
    }

    pub fn annotated_binding(name: impl Into<String>, annotations: &[&str]) -> Self {
        NodeKind::Binding {
            name: name.into(),
            annotations: annotations.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn class(name: impl Into<String>, supertypes: &[&str]) -> Self {
        NodeKind::Class {
            name: name.into(),
            supertypes: supertypes.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn call(callee: impl Into<String>) -> Self {
        NodeKind::Call {
            callee: callee.into(),
            suspends: false,
        }
    }

    pub fn suspending_call(callee: impl Into<String>) -> Self {
        NodeKind::Call {
            callee: callee.into(),
            suspends: true,
        }
    }

    pub fn member_access(selector: impl Into<String>) -> Self {
        NodeKind::MemberAccess {
            selector: selector.into(),
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        NodeKind::Reference { name: name.into() }
    }

    pub fn catch(parameter: impl Into<String>, caught_type: impl Into<String>) -> Self {
        NodeKind::Catch {
            parameter: parameter.into(),
            caught_type: caught_type.into(),
        }
    }

    pub fn while_loop() -> Self {
        NodeKind::Loop {
            kind: LoopKind::While,
        }
    }

    pub fn for_loop() -> Self {
        NodeKind::Loop {
            kind: LoopKind::For,
        }
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    span: Span,
    role: ChildRole,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// One compilation unit as an arena of nodes. The root is always a `File`
/// node; every other node records its parent, so analyses can walk the
/// enclosing-declaration chain without the tree owning back-references into
/// host memory.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    unit: String,
    path: Option<String>,
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    pub fn new(unit: impl Into<String>) -> Self {
        let root = NodeData {
            kind: NodeKind::File,
            span: Span::point(0),
            role: ChildRole::Child,
            parent: None,
            children: Vec::new(),
        };
        Self {
            unit: unit.into(),
            path: None,
            nodes: vec![root],
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Compilation-unit name, used for finding locations and exclusion
    /// matching.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Project-relative path, if the host supplied one.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn push(&mut self, parent: NodeId, role: ChildRole, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            span,
            role,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.0].span
    }

    pub fn offset(&self, id: NodeId) -> usize {
        self.nodes[id.0].span.start
    }

    pub fn role(&self, id: NodeId) -> ChildRole {
        self.nodes[id.0].role
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Pre-order traversal of `id` and everything below it. Children are
    /// visited in insertion order, so two walks over the same tree always
    /// yield the same sequence.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    /// Strict ancestors of `id`, nearest first, ending at the file root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.parent(id),
        }
    }
}

pub struct Descendants<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        for &child in self.tree.children(id).iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}

pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
