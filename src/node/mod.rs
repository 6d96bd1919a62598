//! The editable node tree, and conversion to and from its [semantic](crate::semantic) form.
//!
//! Input flows through these modules in order: raw keystrokes are [classified](token), the
//! resulting nodes are inserted into a [tree], and the tree is [parsed](parser) into a semantic
//! value. [materialize] goes the other way, turning a semantic value back into nodes.

pub mod token;
pub mod tree;
pub mod parser;
pub mod materialize;
