use alloc::{format, string::String, vec, vec::Vec};
use log::trace;

use crate::{error::{Error, Result}, semantic::{Constant, Operator, Semantic}};

use super::tree::{NodeId, Tree, Unit};

/// Converts the precis of one expression into a [Semantic] value. Used to implement
/// [Tree::serialize].
///
/// Parsing works on ranges of the precis, looking for the loosest-binding operator which isn't
/// inside a bracket or absolute value span. Composite units show up in the precis as `%` or `^`,
/// and are looked up in `items` by position to parse their own expressions.
pub struct Parser<'a> {
    tree: &'a Tree,
    items: &'a [NodeId],
    precis: Vec<char>,

    /// For each delimiter in the precis, the position of the delimiter it pairs with.
    partners: Vec<Option<usize>>,
}

impl<'a> Parser<'a> {
    pub fn new(tree: &'a Tree, expr: NodeId) -> Result<Self> {
        let precis: Vec<char> = tree.precis(expr)?.chars().collect();
        let partners = match_delimiters(&precis)?;

        Ok(Parser {
            tree,
            items: tree.children(expr)?,
            precis,
            partners,
        })
    }

    pub fn parse(&self) -> Result<Semantic> {
        let start = if self.precis.first() == Some(&'_') { 1 } else { 0 };
        if start >= self.precis.len() {
            return Err(Error::EmptyExpression);
        }

        self.parse_range(start, self.precis.len())
    }

    fn parse_range(&self, lo: usize, hi: usize) -> Result<Semantic> {
        if lo >= hi {
            return Err(Error::CannotParse("expected a term".into()));
        }

        let top_level = self.top_level(lo, hi)?;

        // The rightmost + or - splits first, which makes chains like 1-x+1 left-associative.
        // A sign at the very start, or straight after another operator, is unary instead
        let split = top_level.iter().rev().copied().find(|&i|
            matches!(self.precis[i], '+' | '-')
            && i > lo
            && !is_operator(self.precis[i - 1])
        );
        if let Some(i) = split {
            trace!("split {:?} at {}", &self.precis[lo..hi], i);
            let op = if self.precis[i] == '+' { Operator::Plus } else { Operator::Minus };
            return Ok(Semantic::binary(op, self.parse_range(lo, i)?, self.parse_range(i + 1, hi)?));
        }

        if let Some(i) = top_level.iter().copied().find(|&i| self.precis[i] == '*') {
            trace!("split {:?} at {}", &self.precis[lo..hi], i);
            return Ok(Semantic::binary(
                Operator::Times,
                self.parse_range(lo, i)?,
                self.parse_range(i + 1, hi)?,
            ));
        }

        if self.precis[lo] == '-' {
            return Ok(Semantic::unary(Operator::Minus, self.parse_range(lo + 1, hi)?));
        }

        self.parse_term(lo, hi)
    }

    /// Parses the leading term of a range, any powers bound to it, and then whatever is left as
    /// an implicit multiplication.
    fn parse_term(&self, lo: usize, hi: usize) -> Result<Semantic> {
        let c = self.precis[lo];

        let (mut result, mut next) = if c.is_ascii_digit() {
            let mut end = self.digits_from(lo, hi);
            if end + 1 < hi && self.precis[end] == '.' && self.precis[end + 1].is_ascii_digit() {
                end = self.digits_from(end + 1, hi);
            }

            // Kept as typed, so leading zeros and long literals survive
            (Semantic::Number(self.precis[lo..end].iter().collect::<String>()), end)
        } else if let Some(func) = self.function_at(lo, hi) {
            // Functions apply to everything after them
            let name_len = func.tag().len();
            return Ok(Semantic::unary(func, self.parse_range(lo + name_len, hi)?));
        } else if self.word_at(lo, hi, "pi") {
            (Semantic::Constant(Constant::Pi), lo + 2)
        } else if c == 'π' {
            (Semantic::Constant(Constant::Pi), lo + 1)
        } else if c == 'e' {
            (Semantic::Constant(Constant::ExponentialE), lo + 1)
        } else if c == '∞' {
            (Semantic::Constant(Constant::Infinity), lo + 1)
        } else if c.is_alphabetic() {
            (Semantic::Identifier(c), lo + 1)
        } else if c == '%' {
            (self.parse_composite(lo)?, lo + 1)
        } else if c == '(' {
            let close = self.partner(lo)?;
            (self.parse_range(lo + 1, close)?, close + 1)
        } else if c == '|' {
            let close = self.partner(lo)?;
            (Semantic::unary(Operator::Abs, self.parse_range(lo + 1, close)?), close + 1)
        } else if c == '^' {
            return Err(Error::CannotParse("exponent has no base".into()));
        } else {
            return Err(Error::CannotParse(format!("unexpected '{}'", c)));
        };

        // Bind any powers which follow
        while next < hi && self.precis[next] == '^' {
            result = Semantic::binary(Operator::Power, result, self.parse_exponent(next)?);
            next += 1;
        }

        // Construct implicit multiplications if there's anything left. "2x" will initially parse
        // as "2", then the rest can be picked up here
        if next < hi {
            Ok(Semantic::binary(Operator::Times, result, self.parse_range(next, hi)?))
        } else {
            Ok(result)
        }
    }

    fn digits_from(&self, from: usize, hi: usize) -> usize {
        let mut end = from;
        while end < hi && self.precis[end].is_ascii_digit() {
            end += 1;
        }
        end
    }

    fn word_at(&self, lo: usize, hi: usize, word: &str) -> bool {
        let len = word.chars().count();
        lo + len <= hi && self.precis[lo..lo + len].iter().copied().eq(word.chars())
    }

    fn function_at(&self, lo: usize, hi: usize) -> Option<Operator> {
        Operator::FUNCTIONS.iter().copied().find(|f| self.word_at(lo, hi, f.tag()))
    }

    fn partner(&self, pos: usize) -> Result<usize> {
        self.partners[pos].ok_or(Error::UnmatchedDelimiter(pos))
    }

    /// Returns the positions within a range which are not inside a delimited span.
    fn top_level(&self, lo: usize, hi: usize) -> Result<Vec<usize>> {
        let mut result = vec![];
        let mut i = lo;
        while i < hi {
            result.push(i);
            match self.partners[i] {
                Some(close) if close > i => {
                    if close >= hi {
                        return Err(Error::UnmatchedDelimiter(i));
                    }
                    i = close + 1;
                }
                _ => i += 1,
            }
        }
        Ok(result)
    }

    fn parse_composite(&self, pos: usize) -> Result<Semantic> {
        match self.tree.unit(self.items[pos])? {
            Unit::Division { numerator, denominator } => Ok(Semantic::binary(
                Operator::Divide,
                self.parse_nested(numerator)?,
                self.parse_nested(denominator)?,
            )),
            Unit::SquareRoot { radicand } => Ok(Semantic::square_root(self.parse_nested(radicand)?)),

            _ => Err(Error::CannotParse("precis does not match nodes".into())),
        }
    }

    fn parse_exponent(&self, pos: usize) -> Result<Semantic> {
        match self.tree.unit(self.items[pos])? {
            Unit::Exponent { exponent } => self.parse_nested(exponent),
            _ => Err(Error::CannotParse("precis does not match nodes".into())),
        }
    }

    /// Parses an expression owned by a composite unit. An empty one is a syntax error, rather
    /// than the whole field being empty.
    fn parse_nested(&self, expr: NodeId) -> Result<Semantic> {
        Parser::new(self.tree, expr)?.parse().map_err(|e| match e {
            Error::EmptyExpression => Error::CannotParse("empty slot".into()),
            e => e,
        })
    }
}

fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*')
}

/// Pairs up the brackets and absolute value bars in a precis.
///
/// Brackets pair by depth. A bar closes the innermost open bar, unless it comes straight after
/// something a term can't end with (the start, an operator, an opening bracket or bar), in which
/// case it opens a nested span instead.
fn match_delimiters(precis: &[char]) -> Result<Vec<Option<usize>>> {
    let mut partners = vec![None; precis.len()];
    let mut open: Vec<usize> = vec![];

    for (i, c) in precis.iter().enumerate() {
        match c {
            '(' => open.push(i),

            ')' => match open.pop() {
                Some(o) if precis[o] == '(' => {
                    partners[o] = Some(i);
                    partners[i] = Some(o);
                }
                _ => return Err(Error::UnmatchedDelimiter(i)),
            },

            '|' => {
                let closes = match open.last() {
                    Some(&o) if precis[o] == '|' => {
                        let opens_here = i == 0 || match precis[i - 1] {
                            '_' | '(' | '+' | '-' | '*' => true,
                            '|' => i - 1 == o,
                            _ => false,
                        };
                        !opens_here
                    }
                    _ => false,
                };

                if closes {
                    if let Some(o) = open.pop() {
                        partners[o] = Some(i);
                        partners[i] = Some(o);
                    }
                } else {
                    open.push(i);
                }
            }

            _ => (),
        }
    }

    match open.pop() {
        Some(o) => Err(Error::UnmatchedDelimiter(o)),
        None => Ok(partners),
    }
}

impl Tree {
    /// Converts an expression into its semantic form.
    pub fn serialize(&self, expr: NodeId) -> Result<Semantic> {
        Parser::new(self, expr)?.parse()
    }
}
