//! The arena which owns every node of an editable expression.
//!
//! An expression is an [ordered list](NodeKind::Expression) of [Unit]s which always begins with a
//! [Unit::Start]. Composite units (fractions, exponents, square roots) own further expressions.
//! Brackets and absolute value bars are *not* composite: they are flat units in the same list, and
//! are only paired up when the expression is [parsed](crate::node::parser).
//!
//! Children are owned by id through their parent; each child points back at its parent with a
//! plain [NodeId]. Deleted nodes leave a tombstone behind, so ids are never reused and a stale id
//! is reported as [Error::NodeNotFound] rather than aliasing a newer node. The arena therefore
//! only grows while editing; [Tree::clear] starts a fresh one.

use alloc::{collections::BTreeSet, string::String, vec, vec::Vec};
use log::trace;

use crate::error::{Error, Result};
use super::token::{BracketSide, NodeSpec};

/// A handle to a node in a [Tree].
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Copy, Clone)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node which can appear in an expression's list.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Unit {
    /// The first item of every expression. The cursor sits here when it is at the very left.
    Start,

    /// A plain character.
    Atom(char),

    /// A fraction, owning two expressions.
    Division { numerator: NodeId, denominator: NodeId },

    Bracket(BracketSide),

    /// An absolute value bar.
    Absolute,

    /// A superscript, owning the exponent expression. The base is the term before it.
    Exponent { exponent: NodeId },

    SquareRoot { radicand: NodeId },
}

impl Unit {
    /// The single character which stands in for this unit in its expression's precis.
    ///
    /// Fractions and roots are opaque (`%`); a parser which meets one must look at the node.
    pub fn precis(&self) -> char {
        match self {
            Unit::Start => '_',
            Unit::Atom(c) => *c,
            Unit::Bracket(side) => side.to_char(),
            Unit::Absolute => '|',
            Unit::Exponent { .. } => '^',
            Unit::Division { .. } | Unit::SquareRoot { .. } => '%',
        }
    }

    /// The expressions owned by this unit, in display order (top to bottom).
    pub fn sub_expressions(&self) -> Vec<NodeId> {
        match self {
            Unit::Division { numerator, denominator } => vec![*numerator, *denominator],
            Unit::Exponent { exponent } => vec![*exponent],
            Unit::SquareRoot { radicand } => vec![*radicand],
            Unit::Start | Unit::Atom(_) | Unit::Bracket(_) | Unit::Absolute => vec![],
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Unit::Division { .. } | Unit::Exponent { .. } | Unit::SquareRoot { .. })
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum NodeKind {
    Expression(Vec<NodeId>),
    Unit(Unit),
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Node {
    /// The expression containing a unit, or the unit owning an expression. `None` for the root and
    /// for nodes which have been created but not inserted yet.
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Option<Node>>,
    root: NodeId,
    dirty: BTreeSet<NodeId>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Creates a tree with an empty root expression.
    pub fn new() -> Self {
        let mut tree = Tree {
            nodes: vec![],
            root: NodeId(0),
            dirty: BTreeSet::new(),
        };
        tree.root = tree.new_expression(None);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(node));
        id
    }

    /// Allocates an expression holding only its start node.
    fn new_expression(&mut self, owner: Option<NodeId>) -> NodeId {
        let expr = self.alloc(Node { parent: owner, kind: NodeKind::Expression(vec![]) });
        let start = self.alloc(Node { parent: Some(expr), kind: NodeKind::Unit(Unit::Start) });
        if let Some(Node { kind: NodeKind::Expression(items), .. }) = self.nodes[expr.0].as_mut() {
            items.push(start);
        }
        expr
    }

    /// Creates a new, detached unit from a [NodeSpec]. Composite units get fresh empty expressions.
    pub fn create(&mut self, spec: NodeSpec) -> NodeId {
        // Reserve the slot first, so that sub-expressions can point back at it
        let id = self.alloc(Node { parent: None, kind: NodeKind::Unit(Unit::Start) });

        let unit = match spec {
            NodeSpec::Atom(c) => Unit::Atom(c),
            NodeSpec::Bracket(side) => Unit::Bracket(side),
            NodeSpec::Absolute => Unit::Absolute,
            NodeSpec::Division => Unit::Division {
                numerator: self.new_expression(Some(id)),
                denominator: self.new_expression(Some(id)),
            },
            NodeSpec::Exponent => Unit::Exponent { exponent: self.new_expression(Some(id)) },
            NodeSpec::SquareRoot => Unit::SquareRoot { radicand: self.new_expression(Some(id)) },
        };

        self.nodes[id.0] = Some(Node { parent: None, kind: NodeKind::Unit(unit) });
        id
    }

    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).and_then(|n| n.as_ref()).ok_or(Error::NodeNotFound)
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.0).and_then(|n| n.as_mut()).ok_or(Error::NodeNotFound)
    }

    /// Returns true if `id` refers to a node which has not been deleted.
    pub fn is_live(&self, id: NodeId) -> bool {
        self.get(id).is_ok()
    }

    /// Returns the unit with the given id, or an error if it is an expression.
    pub fn unit(&self, id: NodeId) -> Result<Unit> {
        match self.get(id)?.kind {
            NodeKind::Unit(unit) => Ok(unit),
            NodeKind::Expression(_) => Err(Error::InvalidNode),
        }
    }

    /// Returns the items of the given expression, or an error if it is a unit.
    pub fn children(&self, expr: NodeId) -> Result<&[NodeId]> {
        match &self.get(expr)?.kind {
            NodeKind::Expression(items) => Ok(&items[..]),
            NodeKind::Unit(_) => Err(Error::InvalidNode),
        }
    }

    fn children_mut(&mut self, expr: NodeId) -> Result<&mut Vec<NodeId>> {
        match &mut self.get_mut(expr)?.kind {
            NodeKind::Expression(items) => Ok(items),
            NodeKind::Unit(_) => Err(Error::InvalidNode),
        }
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.get(id)?.parent)
    }

    /// The start node of an expression.
    pub fn first(&self, expr: NodeId) -> Result<NodeId> {
        self.children(expr)?.first().copied().ok_or(Error::NodeNotFound)
    }

    /// The rightmost unit of an expression (its start node, if it is empty).
    pub fn last(&self, expr: NodeId) -> Result<NodeId> {
        self.children(expr)?.last().copied().ok_or(Error::NodeNotFound)
    }

    /// Finds the expression containing a unit, and the unit's index within it.
    pub fn position(&self, id: NodeId) -> Result<(NodeId, usize)> {
        let parent = self.get(id)?.parent.ok_or(Error::NoParent)?;
        let index = self.children(parent)
            .map_err(|_| Error::NoParent)?
            .iter()
            .position(|x| *x == id)
            .ok_or(Error::NodeNotFound)?;
        Ok((parent, index))
    }

    /// The unit before this one in its expression, or `None` if this is the start node.
    pub fn previous_sibling(&self, id: NodeId) -> Result<Option<NodeId>> {
        let (parent, index) = self.position(id)?;
        if index == 0 {
            Ok(None)
        } else {
            Ok(Some(self.children(parent)?[index - 1]))
        }
    }

    /// The unit after this one in its expression, or `None` if this is the last unit.
    pub fn next_sibling(&self, id: NodeId) -> Result<Option<NodeId>> {
        let (parent, index) = self.position(id)?;
        Ok(self.children(parent)?.get(index + 1).copied())
    }

    /// Returns true if `ancestor` is `id` or any node above it.
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.get(node).ok().and_then(|n| n.parent);
        }
        false
    }

    /// Returns true if the node can be reached from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.is_live(id) && self.contains(self.root, id)
    }

    /// Returns this node and every node below it, in display order.
    pub fn descendants(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut result = vec![];
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            result.push(current);
            let below = match &self.get(current)?.kind {
                NodeKind::Expression(items) => items.clone(),
                NodeKind::Unit(unit) => unit.sub_expressions(),
            };
            // Reversed so that the leftmost child is visited first
            stack.extend(below.into_iter().rev());
        }
        Ok(result)
    }

    /// The string of precis characters for each unit in an expression, start node included.
    pub fn precis(&self, expr: NodeId) -> Result<String> {
        self.children(expr)?
            .iter()
            .map(|id| self.unit(*id).map(|u| u.precis()))
            .collect()
    }

    /// Inserts `node` into the expression containing `anchor`, directly after it. If `node` is
    /// already part of the tree, it is moved rather than copied.
    pub fn insert_after(&mut self, anchor: NodeId, node: NodeId) -> Result<()> {
        if let Unit::Start = self.unit(node)? {
            return Err(Error::InvalidNode);
        }
        self.unit(anchor)?;
        if self.contains(node, anchor) {
            return Err(Error::CyclicInsert);
        }

        // Fail before detaching, so that an error leaves the node where it was
        let (parent, mut index) = self.position(anchor)?;
        if self.get(node)?.parent.is_some() {
            self.detach(node)?;

            // The node may have been before the anchor in the same expression
            index = self.position(anchor)?.1;
        }
        self.children_mut(parent)?.insert(index + 1, node);
        self.get_mut(node)?.parent = Some(parent);
        self.invalidate(parent);

        trace!("inserted {:?} after {:?} in {:?}", node, anchor, parent);
        Ok(())
    }

    /// Removes a unit from its expression without destroying it.
    fn detach(&mut self, id: NodeId) -> Result<()> {
        let (parent, index) = self.position(id)?;
        self.children_mut(parent)?.remove(index);
        self.get_mut(id)?.parent = None;
        self.invalidate(parent);
        Ok(())
    }

    /// Removes a unit from its expression and destroys it, along with everything inside it.
    ///
    /// The caller is responsible for moving any cursor off the node first.
    pub fn delete(&mut self, id: NodeId) -> Result<()> {
        if let Unit::Start = self.unit(id)? {
            return Err(Error::InvalidNode);
        }

        self.detach(id)?;
        for dead in self.descendants(id)? {
            self.nodes[dead.0] = None;
        }

        trace!("deleted {:?}", id);
        Ok(())
    }

    /// Removes every unit from the root expression except its start node.
    pub fn clear(&mut self) {
        *self = Tree::new();
        self.dirty.insert(self.root);
    }

    /// Marks a node and all of its ancestors as needing layout.
    fn invalidate(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(node) = current {
            self.dirty.insert(node);
            current = self.get(node).ok().and_then(|n| n.parent);
        }
    }

    /// Returns every live node whose size may have changed since the last call, and forgets
    /// them. A renderer should lay these out again.
    pub fn take_dirty(&mut self) -> Vec<NodeId> {
        let dirty = core::mem::take(&mut self.dirty);
        dirty.into_iter().filter(|id| self.is_live(*id)).collect()
    }
}
