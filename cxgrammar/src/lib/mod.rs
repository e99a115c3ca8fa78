//! A feature-gated model of the C/C++ grammar, with the semantic post-parse
//! actions that make its output usable.
//!
//! The grammar covers the C++17 surface grammar plus the C89/99/11 language
//! constructs, specialised at construction time for the standards selected
//! in a [`cxlex::CxxOptions`]. Parsing itself is delegated to a generic
//! engine (see [`engine`]); this crate contributes:
//!
//! * the non-terminal/production arena with feature gates, display
//!   policies and semantic predicates ([`grammar`]);
//! * the parse-forest node shape the engine builds and the actions walk
//!   ([`forest`]);
//! * the `DeclSpecifier`/`Declarator`/`DeclaratorPart` aggregation and
//!   validation passes ([`actions`]);
//! * the types exchanged with a constant-expression analyzer ([`expr`]).
//!
//! ```
//! use cxgrammar::{CxxGrammar, DisplayPolicy};
//! use cxlex::{CxxOptions, CxxStd};
//!
//! let opts = CxxOptions::builder()
//!     .cxx_standard(CxxStd::Cxx17)
//!     .build()
//!     .unwrap();
//! let grammar = CxxGrammar::new(&opts);
//! assert_eq!(grammar.nonterm(grammar.translation_unit).name(), "translation-unit");
//! assert_eq!(
//!     grammar.nonterm(grammar.statement_seq).display(),
//!     DisplayPolicy::Transparent
//! );
//! ```

pub mod actions;
pub mod engine;
pub mod expr;
pub mod forest;
pub mod grammar;
mod idxnewtype;

#[cfg(test)]
pub(crate) mod test_utils;

pub use actions::{qual, AuxData, DeclSpecifier, Declarator, DeclaratorPart, Sign, Size, Type};
pub use engine::{ParseState, ParserEngine, PostParseAction, Predicate};
pub use expr::{ConstExprMatcher, ExprType, Literal, LiteralValue};
pub use forest::SppfNode;
pub use grammar::{CxxGrammar, DisplayPolicy, NameResolvers, NonTerminal, Production, Symbol};
pub use idxnewtype::{NtIdx, PIdx, SIdx};
