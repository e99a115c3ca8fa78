//! The seam between this crate and a generic parser engine.
//!
//! The engine drives the lexer, builds [`SppfNode`]s and calls back into the
//! grammar's semantic predicates and post-parse actions through the
//! [`ParseState`] it implements. Predicates and actions are plain function
//! pointers; a `false` return rejects the match at the current state.

use std::rc::Rc;

use cxlex::{CxxOptions, Diagnostic, Token, TokenKind, TF_SPLITABLE};

use crate::forest::SppfNode;
use crate::grammar::CxxGrammar;
use crate::idxnewtype::NtIdx;

/// A semantic predicate: gates whether the engine accepts a symbol match at
/// the current state.
pub type Predicate = fn(&mut dyn ParseState) -> bool;

/// A post-parse action: fired when a node for a non-terminal completes;
/// returning `false` fails the production.
pub type PostParseAction = fn(&mut dyn ParseState) -> bool;

/// The engine-side state visible to predicates and post-parse actions.
pub trait ParseState {
    fn grammar(&self) -> &CxxGrammar;
    fn options(&self) -> &CxxOptions;

    /// The node just completed for the non-terminal whose post-parse action
    /// is running, or `None` if nothing was matched.
    fn parsed_node(&self) -> Option<Rc<SppfNode>>;

    /// The token currently at the input position.
    fn input(&self) -> Option<&Token>;
    fn input_mut(&mut self) -> Option<&mut Token>;

    /// Splice `token` into the stream immediately after the current input
    /// token. Used when a splitable token is divided in two.
    fn insert_after_input(&mut self, token: Token);

    fn emit(&mut self, diagnostic: Diagnostic);
}

/// The contract a parser engine offers to embedders of this grammar.
pub trait ParserEngine {
    /// Parse the input from the current position as one derivation of
    /// `start`, returning the forest root on success.
    fn parse(&mut self, start: NtIdx) -> Option<Rc<SppfNode>>;

    /// Pull the next token from the underlying lexer.
    fn next_token(&mut self) -> Option<Token>;

    fn enable_debug(&mut self, enable: bool);

    fn error_count(&self) -> usize;

    /// Discard the failed portion of the current parse so that parsing can
    /// resume at the next top-level construct.
    fn reset(&mut self);
}

/*
 * Semantic predicates
 */

/// Is the current input token the contextual keyword `final`?
pub fn is_final_specifier(state: &mut dyn ParseState) -> bool {
    matches!(state.input(),
             Some(t) if t.kind() == TokenKind::Identifier && t.spelling() == "final")
}

/// Is the current input token the contextual keyword `override`?
pub fn is_override_specifier(state: &mut dyn ParseState) -> bool {
    matches!(state.input(),
             Some(t) if t.kind() == TokenKind::Identifier && t.spelling() == "override")
}

/// Is the current input token the integer literal `0`? (pure-specifier)
pub fn is_pure_zero(state: &mut dyn ParseState) -> bool {
    matches!(state.input(),
             Some(t) if t.kind() == TokenKind::DecIntLiteral && t.spelling() == "0")
}

/// Anything except a bracketing token can appear in a balanced-token.
pub fn is_balanced_token(state: &mut dyn ParseState) -> bool {
    match state.input() {
        Some(t) => !matches!(
            t.kind(),
            TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::LSquare
                | TokenKind::RSquare
                | TokenKind::LBrace
                | TokenKind::RBrace
        ),
        None => false,
    }
}

/// Does the declarator node just parsed contain a set of function
/// parameters? Selects the trailing-return-type variants.
pub fn is_function(state: &mut dyn ParseState) -> bool {
    let pq = state.grammar().parameters_and_qualifiers;
    match state.parsed_node() {
        Some(node) => node.find(pq, usize::MAX).is_some(),
        None => false,
    }
}

/// Accept the token closing a template parameter or argument list.
///
/// From C++11, a `>` is accepted directly, and a `>>`, `>=` or `>>=` token
/// carrying [`TF_SPLITABLE`] is split in two: the current token becomes `>`
/// and a second token (`>`, `=` or `>=` respectively, with its offset
/// advanced by one) is inserted after it so the rest of the list still
/// closes correctly.
pub fn process_template_close_token(state: &mut dyn ParseState) -> bool {
    if !state.options().std_cxx11() {
        return true;
    }

    let (new_kind, new_spelling) = match state.input().map(Token::kind) {
        Some(TokenKind::Greater) => return true,
        Some(TokenKind::RShift) => (TokenKind::Greater, ">"),
        Some(TokenKind::GreaterEqual) => (TokenKind::Equal, "="),
        Some(TokenKind::RShiftEqual) => (TokenKind::GreaterEqual, ">="),
        _ => return false,
    };

    if !matches!(state.input(), Some(t) if t.has_flags(TF_SPLITABLE)) {
        return false;
    }

    // split the token in two
    let second = match state.input_mut() {
        Some(first) => {
            let mut second = first.clone();
            first.set_kind(TokenKind::Greater).set_spelling(">");
            second.set_kind(new_kind).set_spelling(new_spelling);
            second.adjust_offset(1);
            second
        }
        None => return false,
    };
    state.insert_after_input(second);
    true
}

/*
 * Name-category predicates. These are the intended extension seam: the
 * defaults classify every identifier as an undeclared name, and an embedder
 * doing real symbol look-up supplies its own set via
 * [`NameResolvers`](crate::grammar::NameResolvers).
 */

pub fn is_typedef_name(_state: &mut dyn ParseState) -> bool {
    false
}

pub fn is_class_name(_state: &mut dyn ParseState) -> bool {
    false
}

pub fn is_enum_name(_state: &mut dyn ParseState) -> bool {
    false
}

pub fn is_namespace_name(_state: &mut dyn ParseState) -> bool {
    false
}

pub fn is_namespace_alias_name(_state: &mut dyn ParseState) -> bool {
    false
}

pub fn is_template_name(_state: &mut dyn ParseState) -> bool {
    false
}

pub fn is_undeclared_name(_state: &mut dyn ParseState) -> bool {
    true
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::TestState;
    use cxlex::{CStd, CxxOptions, CxxStd, TokenKind, TokenKind::*};

    fn cxx11_state() -> TestState {
        TestState::new(
            CxxOptions::builder()
                .cxx_standard(CxxStd::Cxx11)
                .build()
                .unwrap(),
        )
    }

    fn splitable(kind: TokenKind, spelling: &str, offset: usize) -> Token {
        let mut t = Token::default();
        t.set_kind(kind).set_spelling(spelling).add_flags(TF_SPLITABLE);
        t.set_location(offset, 1, offset + 1);
        t
    }

    #[test]
    fn greater_is_accepted_directly() {
        let mut state = cxx11_state();
        let mut t = Token::default();
        t.set_kind_and_spelling(Greater);
        state.set_tokens(vec![t]);
        assert!(process_template_close_token(&mut state));
        assert_eq!(state.tokens().len(), 1);
    }

    #[test]
    fn rshift_splits_into_two_greaters() {
        let mut state = cxx11_state();
        state.set_tokens(vec![splitable(RShift, ">>", 20)]);
        assert!(process_template_close_token(&mut state));
        let tokens = state.tokens();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind(), Greater);
        assert_eq!(tokens[0].spelling(), ">");
        assert_eq!(tokens[0].offset(), 20);
        assert_eq!(tokens[1].kind(), Greater);
        assert_eq!(tokens[1].spelling(), ">");
        assert_eq!(tokens[1].offset(), 21);
    }

    #[test]
    fn greaterequal_splits_into_greater_equal() {
        let mut state = cxx11_state();
        state.set_tokens(vec![splitable(GreaterEqual, ">=", 5)]);
        assert!(process_template_close_token(&mut state));
        let tokens = state.tokens();
        assert_eq!(tokens[0].kind(), Greater);
        assert_eq!(tokens[1].kind(), Equal);
        assert_eq!(tokens[1].spelling(), "=");
        assert_eq!(tokens[1].offset(), 6);
    }

    #[test]
    fn rshiftequal_splits_into_greater_greaterequal() {
        let mut state = cxx11_state();
        state.set_tokens(vec![splitable(RShiftEqual, ">>=", 0)]);
        assert!(process_template_close_token(&mut state));
        let tokens = state.tokens();
        assert_eq!(tokens[0].kind(), Greater);
        assert_eq!(tokens[1].kind(), GreaterEqual);
        assert_eq!(tokens[1].spelling(), ">=");
        assert_eq!(tokens[1].offset(), 1);
    }

    #[test]
    fn unsplitable_rshift_is_rejected() {
        let mut state = cxx11_state();
        let mut t = Token::default();
        t.set_kind_and_spelling(RShift);
        state.set_tokens(vec![t]);
        assert!(!process_template_close_token(&mut state));
        assert_eq!(state.tokens().len(), 1);
    }

    #[test]
    fn other_tokens_are_rejected() {
        let mut state = cxx11_state();
        let mut t = Token::default();
        t.set_kind_and_spelling(Semi);
        state.set_tokens(vec![t]);
        assert!(!process_template_close_token(&mut state));
    }

    #[test]
    fn pre_cxx11_accepts_without_splitting() {
        let mut state = TestState::new(
            CxxOptions::builder()
                .cxx_standard(CxxStd::Cxx03)
                .build()
                .unwrap(),
        );
        state.set_tokens(vec![splitable(RShift, ">>", 0)]);
        assert!(process_template_close_token(&mut state));
        assert_eq!(state.tokens().len(), 1);
        assert_eq!(state.tokens()[0].kind(), RShift);
    }

    #[test]
    fn contextual_keyword_predicates() {
        let mut state = cxx11_state();
        let mut t = Token::default();
        t.set_kind(Identifier).set_spelling("final");
        state.set_tokens(vec![t]);
        assert!(is_final_specifier(&mut state));
        assert!(!is_override_specifier(&mut state));

        let mut t = Token::default();
        t.set_kind(Identifier).set_spelling("override");
        state.set_tokens(vec![t]);
        assert!(is_override_specifier(&mut state));

        let mut t = Token::default();
        t.set_kind(DecIntLiteral).set_spelling("0");
        state.set_tokens(vec![t]);
        assert!(is_pure_zero(&mut state));

        let mut t = Token::default();
        t.set_kind(DecIntLiteral).set_spelling("1");
        state.set_tokens(vec![t]);
        assert!(!is_pure_zero(&mut state));
    }

    #[test]
    fn balanced_token_excludes_brackets() {
        let mut state = TestState::new(
            CxxOptions::builder().c_standard(CStd::C99).build().unwrap(),
        );
        for (kind, balanced) in [
            (Identifier, true),
            (Plus, true),
            (Semi, true),
            (LParen, false),
            (RParen, false),
            (LSquare, false),
            (RSquare, false),
            (LBrace, false),
            (RBrace, false),
        ] {
            let mut t = Token::default();
            t.set_kind(kind);
            state.set_tokens(vec![t]);
            assert_eq!(is_balanced_token(&mut state), balanced, "{:?}", kind);
        }
    }

    #[test]
    fn default_name_resolvers() {
        let mut state = cxx11_state();
        assert!(!is_typedef_name(&mut state));
        assert!(!is_class_name(&mut state));
        assert!(!is_enum_name(&mut state));
        assert!(!is_namespace_name(&mut state));
        assert!(!is_namespace_alias_name(&mut state));
        assert!(!is_template_name(&mut state));
        assert!(is_undeclared_name(&mut state));
    }
}
