use alloc::string::String;
use thiserror::Error;

/// Everything which can go wrong while building, editing or serializing an expression.
///
/// Parse failures (`UnmatchedDelimiter`, `CannotParse`, `EmptyExpression`, `InvalidSemantic`)
/// are ordinary outcomes for user input. The structural variants only occur when a caller breaks
/// the tree's contract, for example by passing an id which has already been deleted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unrecognized input: {0}")]
    UnrecognizedInput(String),

    #[error("node has no parent")]
    NoParent,

    #[error("node not found in tree")]
    NodeNotFound,

    #[error("operation not permitted on this kind of node")]
    InvalidNode,

    #[error("cannot insert a node inside itself")]
    CyclicInsert,

    #[error("unmatched delimiter at position {0}")]
    UnmatchedDelimiter(usize),

    #[error("expression is empty")]
    EmptyExpression,

    #[error("cannot parse expression: {0}")]
    CannotParse(String),

    #[error("invalid semantic value: {0}")]
    InvalidSemantic(String),
}

pub type Result<T> = core::result::Result<T, Error>;
