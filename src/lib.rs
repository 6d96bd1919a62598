#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod error;
pub mod settings;
pub mod node;
pub mod nav;
pub mod semantic;
pub mod editor;

#[cfg(test)]
pub mod tests;

pub use crate::{
    editor::Editor,
    error::{Error, Result},
    nav::Direction,
    node::{
        token::{classify_char, classify_name, BracketSide, NodeSpec},
        tree::{NodeId, Tree, Unit},
    },
    semantic::{Constant, Operator, Semantic},
    settings::{EditorSettings, SemanticFormat},
};

pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");
