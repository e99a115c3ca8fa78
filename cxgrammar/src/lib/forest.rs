//! The shared packed parse forest node handed between the parser engine and
//! the semantic post-actions.
//!
//! The engine owns construction; this crate defines the node shape and the
//! read interface the post-actions are written against. Sharing of common
//! sub-parses is expressed through `Rc`, and node identity (used when two
//! alternative parses reference the same sub-node) is `Rc` pointer identity.

use std::cell::RefCell;
use std::rc::Rc;

use cxlex::Token;

use crate::actions::AuxData;
use crate::idxnewtype::{NtIdx, PIdx};

#[derive(Debug)]
pub enum SppfNode {
    /// A matched terminal.
    Term { token: Token },
    /// A completed non-terminal, together with the production that derived
    /// it (when the engine knows a single one) and an optional auxiliary
    /// payload attached by a post-parse action.
    Nonterm {
        nt: NtIdx,
        pidx: Option<PIdx>,
        children: Vec<Rc<SppfNode>>,
        aux: RefCell<Option<AuxData>>,
    },
}

impl SppfNode {
    pub fn term(token: Token) -> Rc<SppfNode> {
        Rc::new(SppfNode::Term { token })
    }

    pub fn nonterm(nt: NtIdx, children: Vec<Rc<SppfNode>>) -> Rc<SppfNode> {
        Rc::new(SppfNode::Nonterm {
            nt,
            pidx: None,
            children,
            aux: RefCell::new(None),
        })
    }

    pub fn nonterm_for_prod(nt: NtIdx, pidx: PIdx, children: Vec<Rc<SppfNode>>) -> Rc<SppfNode> {
        Rc::new(SppfNode::Nonterm {
            nt,
            pidx: Some(pidx),
            children,
            aux: RefCell::new(None),
        })
    }

    /// The non-terminal this node derives, or `None` for a terminal node.
    pub fn nt(&self) -> Option<NtIdx> {
        match self {
            SppfNode::Term { .. } => None,
            SppfNode::Nonterm { nt, .. } => Some(*nt),
        }
    }

    /// The production recorded by the engine for this node, if any.
    pub fn prod(&self) -> Option<PIdx> {
        match self {
            SppfNode::Term { .. } => None,
            SppfNode::Nonterm { pidx, .. } => *pidx,
        }
    }

    /// The token of a terminal node.
    pub fn token(&self) -> Option<&Token> {
        match self {
            SppfNode::Term { token } => Some(token),
            SppfNode::Nonterm { .. } => None,
        }
    }

    pub fn children(&self) -> &[Rc<SppfNode>] {
        match self {
            SppfNode::Term { .. } => &[],
            SppfNode::Nonterm { children, .. } => children,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Did this node consume no tokens at all?
    pub fn is_empty(&self) -> bool {
        self.first_token().is_none()
    }

    /// The leftmost token derived by this node.
    pub fn first_token(&self) -> Option<&Token> {
        match self {
            SppfNode::Term { token } => Some(token),
            SppfNode::Nonterm { children, .. } => children.iter().find_map(|c| c.first_token()),
        }
    }

    /// The rightmost token derived by this node.
    pub fn last_token(&self) -> Option<&Token> {
        match self {
            SppfNode::Term { token } => Some(token),
            SppfNode::Nonterm { children, .. } => {
                children.iter().rev().find_map(|c| c.last_token())
            }
        }
    }

    pub fn token_count(&self) -> usize {
        match self {
            SppfNode::Term { .. } => 1,
            SppfNode::Nonterm { children, .. } => children.iter().map(|c| c.token_count()).sum(),
        }
    }

    /// Does this node consist of exactly the single token `kind`?
    pub fn is_single_token(&self, kind: cxlex::TokenKind) -> bool {
        self.token_count() == 1 && self.first_token().map(Token::kind) == Some(kind)
    }

    /// The immediate productive children: direct sub-nodes that derive a
    /// non-terminal, in order.
    pub fn sub_productions(&self) -> impl Iterator<Item = &Rc<SppfNode>> {
        self.children()
            .iter()
            .filter(|c| matches!(***c, SppfNode::Nonterm { .. }))
    }

    /// Does this node derive non-terminal `nt`, either directly or through a
    /// chain of single-delegate wrappers?
    pub fn is(&self, nt: NtIdx) -> bool {
        match self {
            SppfNode::Term { .. } => false,
            SppfNode::Nonterm {
                nt: this, children, ..
            } => *this == nt || (children.len() == 1 && children[0].is(nt)),
        }
    }

    /// Find the first node deriving `nt` within `max_depth` levels of this
    /// one (the node itself counts as depth 0).
    pub fn find(self: &Rc<Self>, nt: NtIdx, max_depth: usize) -> Option<Rc<SppfNode>> {
        if self.is(nt) {
            return Some(Rc::clone(self));
        }
        if max_depth == 0 {
            return None;
        }
        for child in self.children() {
            if let Some(found) = child.find(nt, max_depth - 1) {
                return Some(found);
            }
        }
        None
    }

    /// The node's token spellings, space-separated. Used in diagnostics.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            SppfNode::Term { token } => {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(token.spelling());
            }
            SppfNode::Nonterm { children, .. } => {
                for c in children {
                    c.collect_text(out);
                }
            }
        }
    }

    /// The auxiliary payload attached by a post-parse action, if any.
    pub fn aux_data(&self) -> Option<AuxData> {
        match self {
            SppfNode::Term { .. } => None,
            SppfNode::Nonterm { aux, .. } => aux.borrow().clone(),
        }
    }

    /// Attach (or replace) the node's auxiliary payload. A no-op on
    /// terminal nodes.
    pub fn set_aux_data(&self, data: AuxData) {
        if let SppfNode::Nonterm { aux, .. } = self {
            *aux.borrow_mut() = Some(data);
        }
    }

    /// The attached [`DeclSpecifier`](crate::actions::DeclSpecifier), if any.
    pub fn decl_specifier(&self) -> Option<crate::actions::DeclSpecifier> {
        match self.aux_data() {
            Some(AuxData::DeclSpecifier(d)) => Some(d),
            _ => None,
        }
    }

    /// The attached [`Declarator`](crate::actions::Declarator), if any.
    pub fn declarator(&self) -> Option<crate::actions::Declarator> {
        match self.aux_data() {
            Some(AuxData::Declarator(d)) => Some(d),
            _ => None,
        }
    }

    /// The attached [`DeclaratorPart`](crate::actions::DeclaratorPart), if
    /// any.
    pub fn declarator_part(&self) -> Option<crate::actions::DeclaratorPart> {
        match self.aux_data() {
            Some(AuxData::DeclaratorPart(d)) => Some(d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::actions::DeclaratorPart;
    use cxlex::TokenKind;

    fn tok(kind: TokenKind, spelling: &str, offset: usize) -> Rc<SppfNode> {
        let mut t = Token::default();
        t.set_kind(kind).set_spelling(spelling);
        t.set_location(offset, 1, offset + 1);
        SppfNode::term(t)
    }

    #[test]
    fn tokens_and_shape() {
        let a = tok(TokenKind::KwInt, "int", 0);
        let b = tok(TokenKind::Identifier, "x", 4);
        let inner = SppfNode::nonterm(NtIdx(1), vec![b]);
        let outer = SppfNode::nonterm(NtIdx(0), vec![a, inner.clone()]);

        assert_eq!(outer.first_token().unwrap().spelling(), "int");
        assert_eq!(outer.last_token().unwrap().spelling(), "x");
        assert_eq!(outer.token_count(), 2);
        assert!(!outer.is_empty());
        assert!(outer.has_children());
        assert_eq!(outer.sub_productions().count(), 1);
        assert_eq!(outer.text(), "int x");
        assert!(!outer.is_single_token(TokenKind::KwInt));
        assert!(inner.is_single_token(TokenKind::Identifier));

        let empty = SppfNode::nonterm(NtIdx(2), vec![]);
        assert!(empty.is_empty());
        assert!(!empty.has_children());
        assert_eq!(empty.first_token(), None);
    }

    #[test]
    fn is_follows_delegate_chains() {
        let t = tok(TokenKind::KwConst, "const", 0);
        let qualifier = SppfNode::nonterm(NtIdx(5), vec![t]);
        let wrapper = SppfNode::nonterm(NtIdx(4), vec![qualifier.clone()]);
        let outer = SppfNode::nonterm(NtIdx(3), vec![wrapper.clone()]);

        assert!(qualifier.is(NtIdx(5)));
        assert!(wrapper.is(NtIdx(5)));
        assert!(outer.is(NtIdx(5)));
        assert!(outer.is(NtIdx(3)));
        assert!(!outer.is(NtIdx(9)));

        // a node with two children is not a delegate
        let two = SppfNode::nonterm(NtIdx(6), vec![qualifier.clone(), wrapper]);
        assert!(!two.is(NtIdx(5)));
        assert!(two.is(NtIdx(6)));
    }

    #[test]
    fn find_respects_max_depth() {
        let t = tok(TokenKind::KwConst, "const", 0);
        let target = SppfNode::nonterm(NtIdx(9), vec![t]);
        let mid = SppfNode::nonterm_for_prod(NtIdx(8), PIdx(0), vec![target.clone()]);
        let top = SppfNode::nonterm(NtIdx(7), vec![tok(TokenKind::Star, "*", 0), mid.clone()]);

        // depth 1 reaches the direct child (which delegates to the target)
        assert!(top.find(NtIdx(9), 1).is_some());
        assert_eq!(mid.prod(), Some(PIdx(0)));
        assert!(top.find(NtIdx(2), usize::MAX).is_none());
    }

    #[test]
    fn aux_data_round_trip() {
        let node = SppfNode::nonterm(NtIdx(1), vec![]);
        assert!(node.aux_data().is_none());
        node.set_aux_data(AuxData::DeclaratorPart(DeclaratorPart {
            count: 2,
            variadic: true,
            qualifiers: 0x1,
            user_data: None,
        }));
        match node.aux_data() {
            Some(AuxData::DeclaratorPart(p)) => {
                assert_eq!(p.count, 2);
                assert!(p.variadic);
                assert_eq!(p.qualifiers, 0x1);
            }
            other => panic!("unexpected aux data: {:?}", other),
        }
    }
}
