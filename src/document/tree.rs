// src/document/tree.rs
//! Arena-backed markup tree.
//!
//! Nodes are stored in document order, so a node's descendants occupy the
//! contiguous id range right after it and "everything after this node" is a
//! plain slice walk.

/// Index of a node inside its [`Document`] arena.
pub type NodeId = usize;

/// Tag name, class tokens and attributes of one element.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub name: String,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// 1-based line of the node's first byte in the source.
    pub line: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// One past the id of the last descendant.
    pub(crate) subtree_end: NodeId,
}

/// A parsed document. Node 0 is a synthetic `#document` root.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
}

pub const ROOT: NodeId = 0;

impl Document {
    pub(crate) fn with_root() -> Self {
        let root = Node {
            kind: NodeKind::Element(Element {
                name: "#document".to_string(),
                ..Element::default()
            }),
            line: 1,
            parent: None,
            children: Vec::new(),
            subtree_end: 1,
        };
        Self { nodes: vec![root] }
    }

    pub(crate) fn push(&mut self, parent: NodeId, kind: NodeKind, line: usize) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            line,
            parent: Some(parent),
            children: Vec::new(),
            subtree_end: id + 1,
        });
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(id);
        }
        id
    }

    /// Fixes `subtree_end` for every node once the arena is complete.
    pub(crate) fn seal(&mut self) {
        for id in (0..self.nodes.len()).rev() {
            let end = self.nodes[id]
                .children
                .last()
                .map_or(id + 1, |&last| self.nodes[last].subtree_end);
            self.nodes[id].subtree_end = end;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { doc: self, id }
    }

    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        self.node(ROOT)
    }

    /// All element nodes in document order.
    pub fn elements(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.nodes.len())
            .map(move |id| self.node(id))
            .filter(|n| n.element().is_some() && n.id != ROOT)
    }

    /// Element nodes with the given tag name, in document order.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NodeRef<'a>> {
        self.elements().filter(move |n| n.is(name))
    }
}

/// Borrowed handle to one node.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn raw(&self) -> &'a Node {
        &self.doc.nodes[self.id]
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.raw().line
    }

    #[must_use]
    pub fn element(&self) -> Option<&'a Element> {
        match &self.raw().kind {
            NodeKind::Element(e) => Some(e),
            NodeKind::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&'a str> {
        match &self.raw().kind {
            NodeKind::Text(t) => Some(t.as_str()),
            NodeKind::Element(_) => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.element().map(|e| e.name.as_str())
    }

    /// True for an element with the given tag name.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name() == Some(name)
    }

    #[must_use]
    pub fn classes(&self) -> &'a [String] {
        self.element().map_or(&[] as &[String], |e| e.classes.as_slice())
    }

    #[must_use]
    pub fn first_class(&self) -> Option<&'a str> {
        self.classes().first().map(String::as_str)
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|c| c == class)
    }

    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&'a str> {
        self.element()?
            .attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.raw().parent.map(|id| self.doc.node(id))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        self.raw().children.iter().map(move |&id| doc.node(id))
    }

    /// Every node below this one, in document order.
    pub fn descendants(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        (self.id + 1..self.raw().subtree_end).map(move |id| doc.node(id))
    }

    /// Descendant elements with the given tag name.
    pub fn descendants_named(&self, name: &'a str) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.descendants().filter(move |n| n.is(name))
    }

    /// Every node after this one's start tag (descendants included), in document order.
    pub fn following(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        (self.id + 1..doc.nodes.len()).map(move |id| doc.node(id))
    }

    /// First node after this one in document order that satisfies `pred`.
    pub fn find_next<P>(&self, mut pred: P) -> Option<NodeRef<'a>>
    where
        P: FnMut(&NodeRef<'a>) -> bool,
    {
        self.following().find(|n| pred(n))
    }

    fn siblings(&self) -> &'a [NodeId] {
        self.raw()
            .parent
            .map_or(&[] as &[NodeId], |p| self.doc.nodes[p].children.as_slice())
    }

    fn sibling_index(&self) -> usize {
        self.siblings()
            .iter()
            .position(|&id| id == self.id)
            .unwrap_or(0)
    }

    /// Sibling nodes after this one (text included), nearest first.
    pub fn next_siblings(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        let start = self.sibling_index() + 1;
        self.siblings()
            .get(start..)
            .unwrap_or(&[])
            .iter()
            .map(move |&id| doc.node(id))
    }

    /// Sibling elements after this one, nearest first.
    pub fn next_element_siblings(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.next_siblings().filter(|n| n.element().is_some())
    }

    /// Sibling elements before this one, nearest first.
    pub fn prev_element_siblings(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        let end = self.sibling_index();
        self.siblings()
            .get(..end)
            .unwrap_or(&[])
            .iter()
            .rev()
            .map(move |&id| doc.node(id))
            .filter(|n| n.element().is_some())
    }

    /// The first text node among the following siblings.
    #[must_use]
    pub fn next_sibling_text(&self) -> Option<&'a str> {
        self.next_siblings().find_map(|n| n.as_text())
    }

    /// Raw concatenation of all descendant text.
    #[must_use]
    pub fn text(&self) -> String {
        if let Some(t) = self.as_text() {
            return t.to_string();
        }
        self.descendants().filter_map(|n| n.as_text()).collect()
    }

    /// Descendant text fragments, each trimmed, empty ones dropped, joined without separator.
    #[must_use]
    pub fn stripped_text(&self) -> String {
        if let Some(t) = self.as_text() {
            return t.trim().to_string();
        }
        self.descendants()
            .filter_map(|n| n.as_text())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}
