//! Classification of raw keyboard input into the kinds of node which can be inserted.

use alloc::string::ToString;

use crate::error::{Error, Result};

/// Which side of a bracket pair a [NodeSpec::Bracket] sits on.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum BracketSide {
    Open,
    Close,
}

impl BracketSide {
    pub fn to_char(self) -> char {
        match self {
            BracketSide::Open => '(',
            BracketSide::Close => ')',
        }
    }
}

/// A description of a node which has not been created yet. Pass one of these to
/// [Tree::create](crate::node::tree::Tree::create) or [Editor::insert](crate::Editor::insert).
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum NodeSpec {
    /// A single character: digit, letter, decimal point, `+`, `-` or `*`.
    Atom(char),

    /// A fraction, with an empty numerator and denominator.
    Division,

    Bracket(BracketSide),

    /// An absolute value bar. Bars are paired up when the expression is serialized.
    Absolute,

    /// A superscript. The base is whatever precedes it.
    Exponent,

    SquareRoot,
}

impl NodeSpec {
    /// Attempts to convert the given character to a `NodeSpec`.
    ///
    /// Any alphabetic character is accepted as a letter, so Greek variables like `α` are fine.
    pub fn from_char(c: char) -> Result<NodeSpec> {
        match c {
            '/' => Ok(NodeSpec::Division),
            '(' => Ok(NodeSpec::Bracket(BracketSide::Open)),
            ')' => Ok(NodeSpec::Bracket(BracketSide::Close)),
            '|' => Ok(NodeSpec::Absolute),
            '^' => Ok(NodeSpec::Exponent),
            '.' | '+' | '-' | '*' => Ok(NodeSpec::Atom(c)),
            _ if c.is_ascii_digit() || c.is_alphabetic() => Ok(NodeSpec::Atom(c)),

            _ => Err(Error::UnrecognizedInput(c.to_string())),
        }
    }

    /// Attempts to convert a symbolic name, as typed after a command key, to a `NodeSpec`.
    pub fn from_name(name: &str) -> Result<NodeSpec> {
        match name {
            "sqrt" => Ok(NodeSpec::SquareRoot),
            "pi" => Ok(NodeSpec::Atom('π')),
            "infty" => Ok(NodeSpec::Atom('∞')),

            _ => Err(Error::UnrecognizedInput(name.to_string())),
        }
    }
}

/// Shorthand for [NodeSpec::from_char].
pub fn classify_char(c: char) -> Result<NodeSpec> {
    NodeSpec::from_char(c)
}

/// Shorthand for [NodeSpec::from_name].
pub fn classify_name(name: &str) -> Result<NodeSpec> {
    NodeSpec::from_name(name)
}
