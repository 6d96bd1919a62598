//! The semantic form of an expression: a content-MathML-like tree of operators applied to
//! operands.
//!
//! This is what an editable [tree](crate::node::tree) is serialized into. It has two textual
//! representations:
//!
//!   - The compact form, produced by `Display`: `apply(plus, cn(1), ci(x))`
//!   - Content MathML, produced by [Semantic::to_mathml]: `<apply><plus/><cn>1</cn><ci>x</ci></apply>`
//!
//! Both can be read back with [reader::parse].

use core::{fmt, str::FromStr};

use alloc::{boxed::Box, string::String, vec, vec::Vec};
use rust_decimal::Decimal;

pub mod mathml;
pub mod reader;

/// An operator which can appear as the first item of an `apply`.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Divide,
    Power,
    Root,
    Abs,
    Sin,
    Cos,
    Tan,
    Ln,
}

impl Operator {
    /// The tag name used for this operator in both textual forms.
    pub fn tag(&self) -> &'static str {
        match self {
            Operator::Plus => "plus",
            Operator::Minus => "minus",
            Operator::Times => "times",
            Operator::Divide => "divide",
            Operator::Power => "power",
            Operator::Root => "root",
            Operator::Abs => "abs",
            Operator::Sin => "sin",
            Operator::Cos => "cos",
            Operator::Tan => "tan",
            Operator::Ln => "ln",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Operator> {
        Some(match tag {
            "plus" => Operator::Plus,
            "minus" => Operator::Minus,
            "times" => Operator::Times,
            "divide" => Operator::Divide,
            "power" => Operator::Power,
            "root" => Operator::Root,
            "abs" => Operator::Abs,
            "sin" => Operator::Sin,
            "cos" => Operator::Cos,
            "tan" => Operator::Tan,
            "ln" => Operator::Ln,
            _ => return None,
        })
    }

    /// The named functions, which are typed out letter by letter. The tag doubles as the name.
    pub const FUNCTIONS: [Operator; 4] = [Operator::Sin, Operator::Cos, Operator::Tan, Operator::Ln];

    pub fn is_function(&self) -> bool {
        Self::FUNCTIONS.contains(self)
    }
}

/// A named constant.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Constant {
    Pi,
    ExponentialE,
    Infinity,
}

impl Constant {
    pub fn tag(&self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::ExponentialE => "exponentiale",
            Constant::Infinity => "infinity",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Constant> {
        match tag {
            "pi" => Some(Constant::Pi),
            "exponentiale" => Some(Constant::ExponentialE),
            "infinity" => Some(Constant::Infinity),
            _ => None,
        }
    }

    /// The character which represents this constant in an editable tree.
    pub fn to_char(&self) -> char {
        match self {
            Constant::Pi => 'π',
            Constant::ExponentialE => 'e',
            Constant::Infinity => '∞',
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Semantic {
    /// A numeric literal, `cn`, holding its text exactly as it was typed. Always non-negative when
    /// produced by serialization; see [is_number_literal] for the accepted forms.
    Number(String),

    /// A single-letter variable, `ci`.
    Identifier(char),

    Constant(Constant),

    /// The degree qualifier of a `root`.
    Degree(Box<Semantic>),

    /// An operator applied to operands.
    Apply(Operator, Vec<Semantic>),
}

impl Semantic {
    pub fn unary(op: Operator, operand: Semantic) -> Semantic {
        Semantic::Apply(op, vec![operand])
    }

    pub fn binary(op: Operator, left: Semantic, right: Semantic) -> Semantic {
        Semantic::Apply(op, vec![left, right])
    }

    /// A root with an explicit degree of 2.
    pub fn square_root(radicand: Semantic) -> Semantic {
        Semantic::Apply(Operator::Root, vec![
            Semantic::Degree(Box::new(Semantic::Number("2".into()))),
            radicand,
        ])
    }

    /// Returns true if this is a binary `plus` or `minus`.
    pub fn add_or_sub(&self) -> bool {
        matches!(self, Semantic::Apply(Operator::Plus | Operator::Minus, args) if args.len() >= 2)
    }

    /// Returns true if this is a `times`.
    pub fn mul(&self) -> bool {
        matches!(self, Semantic::Apply(Operator::Times, _))
    }

    /// Returns true if this begins with a minus sign when typed out: a unary `minus` or a
    /// negative number.
    pub fn signed(&self) -> bool {
        match self {
            Semantic::Apply(Operator::Minus, args) => args.len() == 1,
            Semantic::Number(n) => n.starts_with('-'),
            _ => false,
        }
    }

    /// The value of a numeric literal, if it is one and fits in a [Decimal]. Literals are kept as
    /// text, so this is only needed where two numbers must be compared by value.
    pub fn decimal_value(&self) -> Option<Decimal> {
        match self {
            Semantic::Number(n) => Decimal::from_str(n).ok(),
            _ => None,
        }
    }

    /// Renders this as content MathML.
    pub fn to_mathml(&self) -> String {
        let mut out = String::new();
        mathml::write(self, &mut out);
        out
    }
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Semantic::Number(n) => write!(f, "cn({})", n),
            Semantic::Identifier(c) => write!(f, "ci({})", c),
            Semantic::Constant(c) => write!(f, "{}", c.tag()),
            Semantic::Degree(inner) => write!(f, "degree({})", inner),
            Semantic::Apply(op, args) => {
                write!(f, "apply({}", op.tag())?;
                for arg in args {
                    write!(f, ", {}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Returns true if `text` is a numeric literal: digits, optionally followed by a point and more
/// digits, with an optional leading `-`.
pub fn is_number_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    digits(whole) && fraction.map_or(true, digits)
}
