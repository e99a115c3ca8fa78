//! A lexical analyser for C and C++ source text.
//!
//! `cxlex` turns a UTF-8 byte stream into a stream of classified
//! [`Token`]s covering C89/90/95/99/11 and C++98/03/11/14/17, with the
//! selected standards and optional features captured in an immutable
//! [`CxxOptions`] value. The scanner fuses the phases that conventionally
//! precede tokenisation — trigraph replacement, escaped-newline splicing and
//! universal-character-name decoding — behind a simple "give me the next
//! token" contract, and recognises preprocessor directive lines without
//! performing any preprocessing itself.
//!
//! A minimal session:
//!
//! ```
//! use cxlex::{CxxOptions, CxxStd, Lexer, TokenKind};
//!
//! let opts = CxxOptions::builder()
//!     .cxx_standard(CxxStd::Cxx17)
//!     .build()
//!     .unwrap();
//! let mut lexer = Lexer::new(&opts, "int x = 42;".as_bytes());
//! let mut kinds = Vec::new();
//! loop {
//!     let t = lexer.lex();
//!     if t.kind() == TokenKind::Eof {
//!         break;
//!     }
//!     kinds.push(t.kind());
//! }
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::KwInt,
//!         TokenKind::Identifier,
//!         TokenKind::Equal,
//!         TokenKind::DecIntLiteral,
//!         TokenKind::Semi
//!     ]
//! );
//! ```

pub mod diagnostics;
pub mod lexer;
pub mod options;
pub mod source;
pub mod token;

pub use diagnostics::{Diagnostic, Severity};
pub use lexer::Lexer;
pub use options::{CStd, CxxOptions, CxxOptionsBuilder, CxxStd, Features, KeywordTable};
pub use source::CharSource;
pub use token::{
    default_spelling, is_decl_specifier, is_keyword, is_multi_spelling, is_preprocessor_directive,
    is_preprocessor_token, is_punctuation, token_kind_name, Token, TokenFlags, TokenKind,
    TF_ALTERNATE, TF_PREPROCESS, TF_SPACE_BEFORE, TF_SPLITABLE, TF_STARTS_LINE,
};
