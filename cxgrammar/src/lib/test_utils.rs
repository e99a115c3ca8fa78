//! An in-crate stand-in for the parser engine, used by predicate and
//! post-action tests.

use std::rc::Rc;

use cxlex::{CxxOptions, Diagnostic, Token};

use crate::engine::ParseState;
use crate::forest::SppfNode;
use crate::grammar::CxxGrammar;

pub(crate) struct TestState {
    grammar: CxxGrammar,
    options: CxxOptions,
    node: Option<Rc<SppfNode>>,
    tokens: Vec<Token>,
    input_idx: usize,
    diagnostics: Vec<Diagnostic>,
}

impl TestState {
    pub(crate) fn new(options: CxxOptions) -> TestState {
        TestState {
            grammar: CxxGrammar::new(&options),
            options,
            node: None,
            tokens: Vec::new(),
            input_idx: 0,
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn set_parsed_node(&mut self, node: Rc<SppfNode>) {
        self.node = Some(node);
    }

    pub(crate) fn set_tokens(&mut self, tokens: Vec<Token>) {
        self.tokens = tokens;
        self.input_idx = 0;
    }

    pub(crate) fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub(crate) fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl ParseState for TestState {
    fn grammar(&self) -> &CxxGrammar {
        &self.grammar
    }

    fn options(&self) -> &CxxOptions {
        &self.options
    }

    fn parsed_node(&self) -> Option<Rc<SppfNode>> {
        self.node.clone()
    }

    fn input(&self) -> Option<&Token> {
        self.tokens.get(self.input_idx)
    }

    fn input_mut(&mut self) -> Option<&mut Token> {
        self.tokens.get_mut(self.input_idx)
    }

    fn insert_after_input(&mut self, token: Token) {
        self.tokens.insert(self.input_idx + 1, token);
    }

    fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
