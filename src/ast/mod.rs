//! Abstract syntax tree for MiniJava programs.
//!
//! `nodes` defines the tree itself: closed enums with one variant per
//! syntactic form, each node carrying its source line and — on a few
//! expression and statement kinds — annotation slots written once by type
//! elaboration. Traversals are plain pattern matches over the enums.
//! `printer` renders a finished tree back to source-like text.

mod nodes;
mod printer;

pub use nodes::*;
pub use printer::{pretty, PrettyPrinter};
