//! Cursor movement around a [Tree].
//!
//! The cursor is always a unit, and sits *after* it. Moving never fails on a well-formed tree: if
//! there is nowhere sensible to go, the starting unit is returned unchanged.

use log::trace;

use crate::error::{Error, Result};
use crate::node::tree::{NodeId, Tree, Unit};

/// A direction which the cursor can be moved in.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Where the cursor lands when it moves rightwards onto `id`. Composite units are entered at the
/// start of their first expression; everything else is landed on directly.
pub fn entry_from_left(tree: &Tree, id: NodeId) -> Result<NodeId> {
    match tree.unit(id)? {
        Unit::Division { numerator: first, .. }
        | Unit::Exponent { exponent: first }
        | Unit::SquareRoot { radicand: first } => tree.first(first),

        Unit::Start | Unit::Atom(_) | Unit::Bracket(_) | Unit::Absolute => Ok(id),
    }
}

/// Where the cursor lands when it moves leftwards from directly after `id`. Composite units are
/// entered at the end of their first expression, so a fraction is entered through its numerator.
pub fn entry_from_right(tree: &Tree, id: NodeId) -> Result<NodeId> {
    match tree.unit(id)? {
        Unit::Division { numerator: first, .. }
        | Unit::Exponent { exponent: first }
        | Unit::SquareRoot { radicand: first } => tree.last(first),

        Unit::Start | Unit::Atom(_) | Unit::Bracket(_) | Unit::Absolute => Ok(id),
    }
}

/// Returns the unit the cursor should move to from `from`.
pub fn navigate(tree: &Tree, from: NodeId, direction: Direction) -> Result<NodeId> {
    let to = match direction {
        Direction::Left => move_left(tree, from)?,
        Direction::Right => move_right(tree, from)?,
        Direction::Up | Direction::Down => move_vertically(tree, from, direction)?,
    };

    trace!("navigate {:?} from {:?} to {:?}", direction, from, to);
    Ok(to)
}

fn move_right(tree: &Tree, from: NodeId) -> Result<NodeId> {
    if let Some(next) = tree.next_sibling(from)? {
        return entry_from_left(tree, next);
    }

    // At the end of an expression - step out past the composite which owns it, if any
    let (expr, _) = tree.position(from)?;
    Ok(tree.parent(expr)?.unwrap_or(from))
}

fn move_left(tree: &Tree, from: NodeId) -> Result<NodeId> {
    if tree.unit(from)?.is_composite() {
        return entry_from_right(tree, from);
    }

    if let Some(previous) = tree.previous_sibling(from)? {
        return Ok(previous);
    }

    // At the start of an expression - step out to just before the composite which owns it
    let (expr, _) = tree.position(from)?;
    match tree.parent(expr)? {
        Some(owner) => match tree.previous_sibling(owner) {
            Ok(Some(previous)) => Ok(previous),

            // The owner hasn't been inserted anywhere, so there's nowhere to go
            Ok(None) | Err(Error::NoParent) => Ok(from),
            Err(e) => Err(e),
        },
        None => Ok(from),
    }
}

fn move_vertically(tree: &Tree, from: NodeId, direction: Direction) -> Result<NodeId> {
    // If you're in a square root in the top of a fraction and press down, you'd expect to end up
    // in the bottom of the fraction, so keep looking outwards until a fraction takes the move
    let mut expr = tree.parent(from)?.ok_or(Error::NoParent)?;

    while let Some(owner) = tree.parent(expr)? {
        if let Unit::Division { numerator, denominator } = tree.unit(owner)? {
            match direction {
                Direction::Down if expr == numerator => return tree.first(denominator),
                Direction::Up if expr == denominator => return tree.first(numerator),
                _ => (),
            }
        }

        match tree.parent(owner)? {
            Some(outer) => expr = outer,
            None => break,
        }
    }

    Ok(from)
}
