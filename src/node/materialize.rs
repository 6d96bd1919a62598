//! Turns a [Semantic] value back into editable units.
//!
//! Every product is typed with an explicit `*`, and brackets are added wherever the
//! [parser](super::parser) would otherwise group things differently, so that serializing the
//! result gives back the same value.

use alloc::format;
use rust_decimal::Decimal;

use crate::{error::{Error, Result}, semantic::{is_number_literal, Operator, Semantic}};

use super::{token::{BracketSide, NodeSpec}, tree::{NodeId, Tree, Unit}};

/// Inserts the units for `value` into the tree, starting directly after `after`. Returns the last
/// unit inserted at that level, which is where a cursor should be placed.
///
/// The value is checked before anything is inserted, so the tree is unchanged on error.
pub fn materialize(tree: &mut Tree, after: NodeId, value: &Semantic) -> Result<NodeId> {
    validate(value)?;
    tree.position(after)?;

    let mut materializer = Materializer { tree, cursor: after };
    materializer.emit(value)?;
    Ok(materializer.cursor)
}

/// Rejects values which have no representation as editable units.
fn validate(value: &Semantic) -> Result<()> {
    match value {
        Semantic::Number(n) if is_number_literal(n) => Ok(()),
        Semantic::Number(n) => Err(Error::InvalidSemantic(format!("invalid number '{}'", n))),
        Semantic::Constant(_) => Ok(()),

        Semantic::Identifier(c) => match NodeSpec::from_char(*c) {
            Ok(NodeSpec::Atom(_)) if c.is_alphabetic() => Ok(()),
            _ => Err(Error::InvalidSemantic(format!("unsupported identifier '{}'", c))),
        },

        Semantic::Degree(_) => Err(Error::InvalidSemantic("degree outside of root".into())),

        Semantic::Apply(Operator::Root, args) => match &args[..] {
            [Semantic::Degree(degree), radicand] => {
                if degree.decimal_value() != Some(Decimal::from(2)) {
                    return Err(Error::InvalidSemantic("only square roots are supported".into()));
                }
                validate(radicand)
            }
            [radicand] => validate(radicand),
            _ => Err(Error::InvalidSemantic("wrong operands for 'root'".into())),
        },

        Semantic::Apply(op, args) => {
            let arity_ok = match op {
                Operator::Plus | Operator::Times => args.len() >= 2,
                Operator::Minus => !args.is_empty(),
                Operator::Divide | Operator::Power => args.len() == 2,
                _ => args.len() == 1,
            };
            if !arity_ok {
                return Err(Error::InvalidSemantic(format!("wrong operands for '{}'", op.tag())));
            }
            args.iter().try_for_each(validate)
        }
    }
}

/// Folds an n-ary `plus` or `minus` to the left, and an n-ary `times` to the right, matching how
/// the parser nests chains of these operators.
fn fold_binary(op: Operator, args: &[Semantic]) -> (Semantic, Semantic) {
    match op {
        Operator::Times => {
            let (first, rest) = (&args[0], &args[1..]);
            let right = if rest.len() == 1 {
                rest[0].clone()
            } else {
                Semantic::Apply(op, rest.to_vec())
            };
            (first.clone(), right)
        }
        _ => {
            let (init, last) = (&args[..args.len() - 1], &args[args.len() - 1]);
            let left = if init.len() == 1 {
                init[0].clone()
            } else {
                Semantic::Apply(op, init.to_vec())
            };
            (left, last.clone())
        }
    }
}

struct Materializer<'a> {
    tree: &'a mut Tree,
    cursor: NodeId,
}

impl<'a> Materializer<'a> {
    fn push(&mut self, spec: NodeSpec) -> Result<NodeId> {
        let id = self.tree.create(spec);
        self.tree.insert_after(self.cursor, id)?;
        self.cursor = id;
        Ok(id)
    }

    fn atom(&mut self, c: char) -> Result<()> {
        self.push(NodeSpec::Atom(c)).map(|_| ())
    }

    /// Emits `value` into the empty expression `expr`, then carries on where we were.
    fn emit_into(&mut self, expr: NodeId, value: &Semantic) -> Result<()> {
        let saved = self.cursor;
        self.cursor = self.tree.first(expr)?;
        self.emit(value)?;
        self.cursor = saved;
        Ok(())
    }

    fn emit_in_parentheses_or_plain(&mut self, value: &Semantic, parens: bool) -> Result<()> {
        if parens {
            self.push(NodeSpec::Bracket(BracketSide::Open))?;
            self.emit(value)?;
            self.push(NodeSpec::Bracket(BracketSide::Close))?;
            Ok(())
        } else {
            self.emit(value)
        }
    }

    fn emit(&mut self, value: &Semantic) -> Result<()> {
        match value {
            // A leading sign becomes a minus atom, which reads back as a unary minus
            Semantic::Number(n) => n.chars().try_for_each(|c| self.atom(c)),

            Semantic::Identifier(c) => self.atom(*c),
            Semantic::Constant(c) => self.atom(c.to_char()),

            Semantic::Degree(_) => Err(Error::InvalidSemantic("degree outside of root".into())),

            Semantic::Apply(op, args) => match (op, &args[..]) {
                (Operator::Minus, [operand]) => {
                    self.atom('-')?;
                    // "-a*b" would parse as (-a)*b
                    self.emit_in_parentheses_or_plain(operand, operand.add_or_sub() || operand.mul())
                }

                (Operator::Plus | Operator::Minus, _) => {
                    let (left, right) = fold_binary(*op, args);
                    self.emit(&left)?;
                    self.atom(if *op == Operator::Plus { '+' } else { '-' })?;
                    // "a-(b-c)" needs its brackets, since subtraction chains are left-associative
                    self.emit_in_parentheses_or_plain(&right, right.add_or_sub())
                }

                (Operator::Times, _) => {
                    let (left, right) = fold_binary(*op, args);
                    self.emit_in_parentheses_or_plain(&left, left.add_or_sub() || left.mul())?;
                    self.atom('*')?;
                    self.emit_in_parentheses_or_plain(&right, right.add_or_sub())
                }

                (Operator::Divide, [numerator, denominator]) => {
                    let id = self.push(NodeSpec::Division)?;
                    if let Unit::Division { numerator: top, denominator: bottom } = self.tree.unit(id)? {
                        self.emit_into(top, numerator)?;
                        self.emit_into(bottom, denominator)?;
                    }
                    Ok(())
                }

                (Operator::Power, [base, exponent]) => {
                    self.emit_in_parentheses_or_plain(base, !binds_power(base))?;
                    let id = self.push(NodeSpec::Exponent)?;
                    if let Unit::Exponent { exponent: slot } = self.tree.unit(id)? {
                        self.emit_into(slot, exponent)?;
                    }
                    Ok(())
                }

                (Operator::Root, [.., radicand]) => {
                    let id = self.push(NodeSpec::SquareRoot)?;
                    if let Unit::SquareRoot { radicand: slot } = self.tree.unit(id)? {
                        self.emit_into(slot, radicand)?;
                    }
                    Ok(())
                }

                (Operator::Abs, [operand]) => {
                    self.push(NodeSpec::Absolute)?;
                    self.emit(operand)?;
                    self.push(NodeSpec::Absolute)?;
                    Ok(())
                }

                (func, [operand]) if func.is_function() => {
                    for c in func.tag().chars() {
                        self.atom(c)?;
                    }
                    self.emit_in_parentheses_or_plain(operand, true)
                }

                _ => Err(Error::InvalidSemantic(format!("wrong operands for '{}'", op.tag()))),
            },
        }
    }
}

/// Returns true if `^` can follow this value directly and bind to all of it.
fn binds_power(value: &Semantic) -> bool {
    match value {
        Semantic::Number(n) => !n.starts_with('-'),
        Semantic::Identifier(_) | Semantic::Constant(_) => true,
        Semantic::Apply(Operator::Divide | Operator::Root | Operator::Abs | Operator::Power, _) => true,
        _ => false,
    }
}

impl Tree {
    /// Converts a semantic value into units, inserted after `after`. See [materialize].
    pub fn materialize(&mut self, after: NodeId, value: &Semantic) -> Result<NodeId> {
        materialize(self, after, value)
    }
}
