//! Reads either textual form of a [Semantic] value back in.

use alloc::{boxed::Box, format, string::String, vec, vec::Vec};

use crate::error::{Error, Result};
use super::{is_number_literal, Constant, Operator, Semantic};

/// Parses a compact (`apply(plus, cn(1), ci(x))`) or content MathML
/// (`<apply><plus/><cn>1</cn><ci>x</ci></apply>`) string. The form is picked from the first
/// non-whitespace character.
pub fn parse(text: &str) -> Result<Semantic> {
    let mut reader = Reader { chars: text.chars().collect(), index: 0 };

    reader.skip_whitespace();
    let result = if reader.current() == Some('<') {
        reader.parse_xml_root()?
    } else {
        reader.parse_compact()?
    };

    // Leftover input is an error
    reader.skip_whitespace();
    if !reader.eoi() {
        return Err(reader.error("unexpected text after value"));
    }

    check(&result)?;
    Ok(result)
}

struct Reader {
    chars: Vec<char>,
    index: usize,
}

impl Reader {
    fn current(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn eoi(&self) -> bool {
        self.index >= self.chars.len()
    }

    fn error(&self, message: &str) -> Error {
        Error::InvalidSemantic(format!("{} at offset {}", message, self.index))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn expect(&mut self, c: char) -> Result<()> {
        self.skip_whitespace();
        if self.current() == Some(c) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", c)))
        }
    }

    /// Reads a run of ASCII letters.
    fn name(&mut self) -> Result<String> {
        self.skip_whitespace();
        let mut name = String::new();
        while let Some(c) = self.current().filter(|c| c.is_ascii_alphabetic()) {
            name.push(c);
            self.advance();
        }

        if name.is_empty() {
            Err(self.error("expected a name"))
        } else {
            Ok(name)
        }
    }

    /// Reads everything up to (but not including) `terminator`, trimmed.
    fn text_until(&mut self, terminator: char) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.current() {
                Some(c) if c == terminator => break,
                Some(c) => text.push(c),
                None => return Err(self.error(&format!("expected '{}'", terminator))),
            }
            self.advance();
        }
        Ok(String::from(text.trim()))
    }

    fn parse_compact(&mut self) -> Result<Semantic> {
        let name = self.name()?;

        match name.as_str() {
            "apply" => {
                self.expect('(')?;
                let op_name = self.name()?;
                let op = Operator::from_tag(&op_name)
                    .ok_or_else(|| self.error(&format!("unknown operator '{}'", op_name)))?;

                let mut args = vec![];
                loop {
                    self.skip_whitespace();
                    match self.current() {
                        Some(',') => {
                            self.advance();
                            args.push(self.parse_compact()?);
                        }
                        Some(')') => {
                            self.advance();
                            break;
                        }
                        _ => return Err(self.error("expected ',' or ')'")),
                    }
                }

                Ok(Semantic::Apply(op, args))
            }

            "cn" => {
                self.expect('(')?;
                let number = self.text_until(')')?;
                self.advance();
                parse_number(&number)
            }

            "ci" => {
                self.expect('(')?;
                let ident = self.text_until(')')?;
                self.advance();
                parse_identifier(&ident)
            }

            "degree" => {
                self.expect('(')?;
                let inner = self.parse_compact()?;
                self.expect(')')?;
                Ok(Semantic::Degree(Box::new(inner)))
            }

            other => Constant::from_tag(other)
                .map(Semantic::Constant)
                .ok_or_else(|| self.error(&format!("unknown tag '{}'", other))),
        }
    }

    /// Reads the value of an XML document, unwrapping a `<math>` element if there is one.
    fn parse_xml_root(&mut self) -> Result<Semantic> {
        let (tag, empty) = self.open_tag()?;
        if tag == "math" {
            if empty {
                return Err(self.error("empty <math> element"));
            }
            let inner = self.parse_xml()?;
            self.close_tag(&tag)?;
            Ok(inner)
        } else {
            self.parse_xml_element(tag, empty)
        }
    }

    fn parse_xml(&mut self) -> Result<Semantic> {
        let (tag, empty) = self.open_tag()?;
        self.parse_xml_element(tag, empty)
    }

    /// Reads `<name attr="...">` or `<name/>`, returning the name and whether it was
    /// self-closing. Attributes are skipped.
    fn open_tag(&mut self) -> Result<(String, bool)> {
        self.expect('<')?;
        let tag = self.name()?;
        let attributes = self.text_until('>')?;
        self.advance();
        Ok((tag, attributes.ends_with('/')))
    }

    fn close_tag(&mut self, tag: &str) -> Result<()> {
        self.expect('<')?;
        self.expect('/')?;
        let name = self.name()?;
        if name != tag {
            return Err(self.error(&format!("expected </{}>", tag)));
        }
        self.expect('>')
    }

    /// Returns true if the next non-whitespace text is a closing tag.
    fn at_close_tag(&mut self) -> bool {
        self.skip_whitespace();
        self.current() == Some('<') && self.chars.get(self.index + 1) == Some(&'/')
    }

    fn parse_xml_element(&mut self, tag: String, empty: bool) -> Result<Semantic> {
        if empty {
            return Constant::from_tag(&tag)
                .map(Semantic::Constant)
                .ok_or_else(|| self.error(&format!("unexpected <{}/>", tag)));
        }

        let result = match tag.as_str() {
            "apply" => {
                let (op_name, op_empty) = self.open_tag()?;
                if !op_empty {
                    return Err(self.error("operator element must be empty"));
                }
                let op = Operator::from_tag(&op_name)
                    .ok_or_else(|| self.error(&format!("unknown operator '{}'", op_name)))?;

                let mut args = vec![];
                while !self.at_close_tag() {
                    args.push(self.parse_xml()?);
                }
                Semantic::Apply(op, args)
            }

            "cn" => parse_number(&self.text_until('<')?)?,
            "ci" => parse_identifier(&self.text_until('<')?)?,
            "degree" => Semantic::Degree(Box::new(self.parse_xml()?)),

            _ => return Err(self.error(&format!("unknown element <{}>", tag))),
        };

        self.close_tag(&tag)?;
        Ok(result)
    }
}

fn parse_number(text: &str) -> Result<Semantic> {
    if is_number_literal(text) {
        Ok(Semantic::Number(text.into()))
    } else {
        Err(Error::InvalidSemantic(format!("invalid number '{}'", text)))
    }
}

fn parse_identifier(text: &str) -> Result<Semantic> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => Ok(Semantic::Identifier(c)),
        _ => Err(Error::InvalidSemantic(format!("unsupported identifier '{}'", text))),
    }
}

/// Checks operator arities, and that degrees only appear as the first operand of a root.
fn check(value: &Semantic) -> Result<()> {
    match value {
        Semantic::Number(_) | Semantic::Identifier(_) | Semantic::Constant(_) => Ok(()),

        Semantic::Degree(_) => Err(Error::InvalidSemantic("degree outside of root".into())),

        Semantic::Apply(op, args) => {
            let arity_ok = match op {
                Operator::Plus | Operator::Times => args.len() >= 2,
                Operator::Minus => !args.is_empty(),
                Operator::Divide | Operator::Power => args.len() == 2,
                Operator::Root => match &args[..] {
                    [Semantic::Degree(_), radicand] | [radicand]
                        => !matches!(radicand, Semantic::Degree(_)),
                    _ => false,
                },
                Operator::Abs | Operator::Sin | Operator::Cos | Operator::Tan | Operator::Ln
                    => args.len() == 1,
            };
            if !arity_ok {
                return Err(Error::InvalidSemantic(
                    format!("wrong operands for '{}'", op.tag())
                ));
            }

            for arg in args {
                match arg {
                    Semantic::Degree(inner) if *op == Operator::Root => check(inner)?,
                    _ => check(arg)?,
                }
            }
            Ok(())
        }
    }
}
