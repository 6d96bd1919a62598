//! The state of one editable field: a [Tree], a cursor, and [settings](EditorSettings).
//!
//! A host drives an `Editor` by forwarding keystrokes to [Editor::insert_char] and friends, arrow
//! keys to [Editor::navigate], and backspace to [Editor::delete_previous]. Whenever the host wants
//! the field's value, it calls [Editor::value].

use alloc::{string::{String, ToString}, vec::Vec};
use log::debug;

use crate::{
    error::{Error, Result},
    nav::{self, Direction},
    node::{materialize, token::NodeSpec, tree::{NodeId, Tree, Unit}},
    semantic::{reader, Semantic},
    settings::{EditorSettings, SemanticFormat},
};

#[derive(Debug, Clone)]
pub struct Editor {
    tree: Tree,
    cursor: NodeId,
    settings: EditorSettings,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Creates an empty editor with the cursor at the start.
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        let tree = Tree::new();
        let cursor = tree.first(tree.root()).unwrap_or_else(|_| tree.root());
        Editor { tree, cursor, settings }
    }

    /// Creates an editor holding the given semantic value, in either textual form.
    pub fn from_semantic(text: &str) -> Result<Self> {
        let mut editor = Self::new();
        editor.deserialize(text)?;
        Ok(editor)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutable access to the tree, for a renderer to [drain](Tree::take_dirty) layout updates.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// The unit which the cursor is directly after.
    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    /// Moves the cursor to directly after the given unit.
    pub fn set_cursor(&mut self, id: NodeId) -> Result<()> {
        self.tree.unit(id)?;
        if !self.tree.is_attached(id) {
            return Err(Error::NodeNotFound);
        }

        self.cursor = id;
        Ok(())
    }

    /// The precis of the root expression.
    pub fn precis(&self) -> Result<String> {
        self.tree.precis(self.tree.root())
    }

    /// Creates a node and inserts it at the cursor, then moves the cursor to wherever typing
    /// should continue:
    ///
    ///   - For a division, into its denominator if the numerator could be
    ///     [collected](collect_numerator), or else into its numerator.
    ///   - For an exponent or square root, into its expression.
    ///   - Otherwise, after the new node.
    pub fn insert(&mut self, spec: NodeSpec) -> Result<NodeId> {
        // Check the cursor before allocating, so a failed insert doesn't leave an orphan behind
        self.tree.position(self.cursor)?;
        let node = self.tree.create(spec);
        self.tree.insert_after(self.cursor, node)?;

        self.cursor = match self.tree.unit(node)? {
            Unit::Division { numerator, denominator } => {
                let collected = self.settings.collect_numerator
                    && collect_numerator(&mut self.tree, node)?;
                if collected {
                    self.tree.first(denominator)?
                } else {
                    self.tree.first(numerator)?
                }
            }
            Unit::Exponent { exponent: inner } | Unit::SquareRoot { radicand: inner }
                => self.tree.first(inner)?,

            Unit::Start | Unit::Atom(_) | Unit::Bracket(_) | Unit::Absolute => node,
        };

        debug!("inserted {:?} as {:?}, cursor now {:?}", spec, node, self.cursor);
        Ok(node)
    }

    /// Classifies a typed character and inserts it.
    pub fn insert_char(&mut self, c: char) -> Result<NodeId> {
        self.insert(NodeSpec::from_char(c)?)
    }

    /// Classifies a symbolic name (like `sqrt`) and inserts it.
    pub fn insert_name(&mut self, name: &str) -> Result<NodeId> {
        self.insert(NodeSpec::from_name(name)?)
    }

    /// Moves the cursor, returning its new position. If there is nowhere to go, the cursor stays
    /// where it is.
    pub fn navigate(&mut self, direction: Direction) -> Result<NodeId> {
        self.cursor = nav::navigate(&self.tree, self.cursor, direction)?;
        Ok(self.cursor)
    }

    /// Deletes the unit behind the cursor, moving the cursor back by one. Does nothing and returns
    /// false if the cursor is at the start of an expression.
    pub fn delete_previous(&mut self) -> Result<bool> {
        let previous = match self.tree.previous_sibling(self.cursor)? {
            Some(previous) => previous,
            None => return Ok(false),
        };

        let deleted = self.cursor;
        self.cursor = previous;
        self.tree.delete(deleted)?;

        debug!("deleted {:?}, cursor now {:?}", deleted, self.cursor);
        Ok(true)
    }

    /// Clears the entire tree, resetting the cursor.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.cursor = self.tree.first(self.tree.root()).unwrap_or_else(|_| self.tree.root());
        debug!("cleared");
    }

    /// Converts the whole field into its semantic form.
    pub fn serialize(&self) -> Result<Semantic> {
        self.tree.serialize(self.tree.root()).map_err(|e| {
            debug!("serialization failed: {}", e);
            e
        })
    }

    /// The field's value as text, in the form chosen by the [settings](EditorSettings::format).
    pub fn value(&self) -> Result<String> {
        let semantic = self.serialize()?;
        Ok(match self.settings.format {
            SemanticFormat::Compact => semantic.to_string(),
            SemanticFormat::MathMl => semantic.to_mathml(),
        })
    }

    /// Reads a semantic value in either textual form, and inserts it at the cursor. The cursor
    /// ends up after the inserted units. On error, nothing is inserted.
    pub fn deserialize(&mut self, text: &str) -> Result<()> {
        let value = reader::parse(text)?;
        self.cursor = materialize::materialize(&mut self.tree, self.cursor, &value)?;

        debug!("deserialized {}, cursor now {:?}", value, self.cursor);
        Ok(())
    }
}

/// Moves the run of units before a newly-inserted division into its numerator, so that typing
/// `12/` gives a fraction with `12` on top. Returns true if anything was moved.
///
/// Only the division's own expression is looked at. Working backwards from the division:
///
///   - A run of letters and digits is moved in its entirety.
///   - A closing bracket has its whole bracketed group moved, brackets included.
///   - Anything else (an operator, a bar, a power, another fraction) stops collection.
pub fn collect_numerator(tree: &mut Tree, division: NodeId) -> Result<bool> {
    let numerator = match tree.unit(division)? {
        Unit::Division { numerator, .. } => numerator,
        _ => return Err(Error::InvalidNode),
    };

    // Skip the start node at index 0
    let (expr, index) = tree.position(division)?;
    let preceding: Vec<NodeId> = tree.children(expr)?[1..index].to_vec();
    let tokens = preceding.iter()
        .map(|id| tree.unit(*id).map(|u| u.precis()))
        .collect::<Result<Vec<_>>>()?;

    let run_start = match tokens.last() {
        Some(c) if c.is_alphanumeric() => {
            tokens.len() - tokens.iter().rev().take_while(|c| c.is_alphanumeric()).count()
        }
        Some(')') => match matching_open_bracket(&tokens) {
            Some(open) => open,
            None => return Ok(false),
        },
        _ => return Ok(false),
    };

    // Inserting right-to-left after the start node keeps the original order
    let target = tree.first(numerator)?;
    for id in preceding[run_start..].iter().rev() {
        tree.insert_after(target, *id)?;
    }

    debug!("collected {} units into numerator of {:?}", preceding.len() - run_start, division);
    Ok(true)
}

/// Given tokens ending in `)`, finds the index of the `(` which pairs with it.
fn matching_open_bracket(tokens: &[char]) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in tokens.iter().enumerate().rev() {
        match c {
            ')' => depth += 1,
            '(' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => (),
        }
    }
    None
}
