//! Semantic post-parse actions: the aggregation and validation passes that
//! turn raw declaration parses into usable attributes.
//!
//! Three attachment shapes exist, mirroring the three places the C/C++
//! grammar needs semantic folding:
//!
//! * [`DeclSpecifier`] — fired at the end of `decl-specifier-seq`,
//!   `type-specifier-seq` and `trailing-type-specifier-seq`; folds type,
//!   size and sign specifiers together, diagnosing illegal combinations.
//! * [`Declarator`] — fired at the end of the declarator family of
//!   non-terminals; records the last pointer operator and the start of the
//!   function parameter list, and diagnoses reference/array misuse.
//! * [`DeclaratorPart`] — fired at the end of `ptr-operator` and
//!   `parameters-and-qualifiers`; counts parameters and collects cv- and
//!   ref-qualifiers.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use cxlex::{Diagnostic, Severity, Token, TokenKind};

use crate::engine::ParseState;
use crate::forest::SppfNode;
use crate::idxnewtype::NtIdx;

/// Bit values representing `const`, `volatile`, `restrict`, `_Atomic` and
/// reference qualifiers.
pub mod qual {
    pub const CONST: u8 = 0x1;
    pub const VOLATILE: u8 = 0x2;
    pub const RESTRICT: u8 = 0x4;
    pub const ATOMIC: u8 = 0x8;
    pub const LVAL_REF: u8 = 0x40; // functions only
    pub const RVAL_REF: u8 = 0x80; // ditto
}

/// `signed` / `unsigned` specifiers, applicable to `char` and `int` only.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Sign {
    #[default]
    NoSign,
    Signed,
    Unsigned,
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Sign::NoSign => "none",
            Sign::Signed => "signed",
            Sign::Unsigned => "unsigned",
        };
        write!(f, "{}", s)
    }
}

/// `short`, `long` and `long long` specifiers, applicable to `int` and
/// `double` only.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Size {
    #[default]
    NoSize,
    Short,
    Long,
    LongLong,
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Size::NoSize => "none",
            Size::Short => "short",
            Size::Long => "long",
            Size::LongLong => "long long",
        };
        write!(f, "{}", s)
    }
}

/// The core type specifier present in a specifier sequence. `Other` covers
/// user-defined type names and the class/enum/elaborated/typename/atomic
/// specifiers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Type {
    #[default]
    NoType,
    Void,
    Auto,
    Decltype,
    Bool,
    Char,
    Char16T,
    Char32T,
    WcharT,
    Int,
    Float,
    Double,
    NullptrT,
    Other,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Type::NoType => "none",
            Type::Void => "void",
            Type::Auto => "auto",
            Type::Decltype => "decltype(...)",
            Type::Bool => "bool",
            Type::Char => "char",
            Type::Char16T => "char16_t",
            Type::Char32T => "char32_t",
            Type::WcharT => "wchar_t",
            Type::Int => "int",
            Type::Float => "float",
            Type::Double => "double",
            Type::NullptrT => "nullptr_t",
            Type::Other => "user-defined",
        };
        write!(f, "{}", s)
    }
}

/// Data attached to `decl-specifier-seq` nodes, plus the similar
/// `type-specifier-seq` and `trailing-type-specifier-seq` nodes.
#[derive(Clone, Default)]
pub struct DeclSpecifier {
    /// `const`, `volatile`, `restrict` and/or `_Atomic` (but not `&` or
    /// `&&`) qualifiers.
    pub type_qual: u8,
    pub sign_spec: Sign,
    pub size_spec: Size,
    pub type_spec: Type,
    pub sign_spec_node: Option<Rc<SppfNode>>,
    pub size_spec_node: Option<Rc<SppfNode>>,
    pub type_spec_node: Option<Rc<SppfNode>>,
    /// For API users to hang extra data on.
    pub user_data: Option<Rc<dyn Any>>,
}

impl fmt::Debug for DeclSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DeclSpecifier")
            .field("type_qual", &self.type_qual)
            .field("sign_spec", &self.sign_spec)
            .field("size_spec", &self.size_spec)
            .field("type_spec", &self.type_spec)
            .finish()
    }
}

/// Data attached to `declarator`, `nested-declarator`,
/// `abstract-declarator`, `nested-abstract-declarator`, `new-declarator`
/// and `conversion-declarator` nodes.
#[derive(Clone, Default)]
pub struct Declarator {
    /// The last `*`, `X::*`, `&` or `&&` part.
    pub last_ptr: Option<Token>,
    /// The first token of the function parameter list.
    pub begin_parms: Option<Token>,
    /// `true` if the declarator ends with an array part.
    pub array: bool,
    /// For API users to hang extra data on.
    pub user_data: Option<Rc<dyn Any>>,
}

impl fmt::Debug for Declarator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Declarator")
            .field("last_ptr", &self.last_ptr)
            .field("begin_parms", &self.begin_parms)
            .field("array", &self.array)
            .finish()
    }
}

/// Data attached to `ptr-operator` and `parameters-and-qualifiers` nodes.
#[derive(Clone, Default)]
pub struct DeclaratorPart {
    /// Number of function parameters.
    pub count: u16,
    /// Whether the parameter list ends with `...`.
    pub variadic: bool,
    /// `const`, `volatile`, `restrict` and/or ref-qualifiers.
    pub qualifiers: u8,
    /// For API users to hang extra data on.
    pub user_data: Option<Rc<dyn Any>>,
}

impl fmt::Debug for DeclaratorPart {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DeclaratorPart")
            .field("count", &self.count)
            .field("variadic", &self.variadic)
            .field("qualifiers", &self.qualifiers)
            .finish()
    }
}

/// The auxiliary payload a post-parse action can attach to a forest node.
#[derive(Clone)]
pub enum AuxData {
    DeclSpecifier(DeclSpecifier),
    Declarator(Declarator),
    DeclaratorPart(DeclaratorPart),
    /// An opaque payload for embedders.
    User(Rc<dyn Any>),
}

impl fmt::Debug for AuxData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuxData::DeclSpecifier(d) => d.fmt(f),
            AuxData::Declarator(d) => d.fmt(f),
            AuxData::DeclaratorPart(d) => d.fmt(f),
            AuxData::User(_) => write!(f, "User(..)"),
        }
    }
}

/// The qualifier bit a single token contributes, or 0.
pub fn qualifier_for_token(token: &Token) -> u8 {
    match token.kind() {
        TokenKind::KwConst => qual::CONST,
        TokenKind::KwVolatile => qual::VOLATILE,
        TokenKind::KwRestrict => qual::RESTRICT,
        TokenKind::KwAtomic => qual::ATOMIC,
        TokenKind::Amp => qual::LVAL_REF,
        TokenKind::AmpAmp => qual::RVAL_REF,
        _ => 0,
    }
}

/// OR together the qualifiers of a `type-qualifier-seq` node. The sequence
/// nests right-recursively; since each nested tail's first token is its own
/// qualifier, a plain OR over the sub-productions covers every entry.
pub fn type_qualifiers_from_seq(seq: &SppfNode) -> u8 {
    let mut qualifiers = 0;
    for qualifier in seq.sub_productions() {
        if let Some(token) = qualifier.first_token() {
            qualifiers |= qualifier_for_token(token);
        }
    }
    qualifiers
}

fn node_error(state: &mut dyn ParseState, node: &SppfNode, message: String) {
    let (offset, line, column) = node
        .first_token()
        .map(|t| (t.offset(), t.line(), t.column()))
        .unwrap_or((0, 1, 1));
    let len = match (node.first_token(), node.last_token()) {
        (Some(first), Some(last)) => {
            last.offset() + last.spelling().chars().count().max(1) - first.offset()
        }
        _ => 1,
    };
    state.emit(Diagnostic::new(
        Severity::Error,
        offset,
        len,
        line,
        column,
        message,
    ));
}

fn same_node(a: &Option<Rc<SppfNode>>, b: &Rc<SppfNode>) -> bool {
    a.as_ref().map_or(false, |a| Rc::ptr_eq(a, b))
}

/// Collect the specifier children of a specifier-sequence node, flattening
/// any right-recursive tail of the same non-terminal.
fn collect_seq_items(node: &SppfNode, out: &mut Vec<Rc<SppfNode>>) {
    let seq_nt = node.nt();
    for sub in node.sub_productions() {
        if seq_nt.is_some() && sub.nt() == seq_nt {
            collect_seq_items(sub, out);
        } else {
            out.push(Rc::clone(sub));
        }
    }
}

/*
 * DeclSpecifier
 */

/// Post-parse action for `decl-specifier-seq`, `type-specifier-seq` and
/// `trailing-type-specifier-seq`.
pub fn decl_specifier_end(state: &mut dyn ParseState) -> bool {
    let node = match state.parsed_node() {
        Some(node) => node,
        None => return true,
    };

    let mut me = DeclSpecifier::default();
    let mut ok = true;
    let mut specs = Vec::new();
    collect_seq_items(&node, &mut specs);
    for spec in &specs {
        ok = me.add_decl_specifier(state, spec) && ok;
    }

    if ok {
        node.set_aux_data(AuxData::DeclSpecifier(me));
    }
    ok
}

impl DeclSpecifier {
    fn add_decl_specifier(&mut self, state: &mut dyn ParseState, spec: &Rc<SppfNode>) -> bool {
        let g_type_qualifier = state.grammar().type_qualifier;
        let g_simple_type_specifier = state.grammar().simple_type_specifier;
        let g_type_specifier = state.grammar().type_specifier;

        if spec.is(g_type_qualifier) {
            if let Some(token) = spec.first_token() {
                self.type_qual |= qualifier_for_token(token);
            }
        } else if spec.is(g_simple_type_specifier) {
            let mut ty = Type::NoType;
            let mut size = Size::NoSize;
            let mut sign = Sign::NoSign;

            let first = match spec.first_token() {
                Some(token) => token.clone(),
                None => return true,
            };
            match first.kind() {
                TokenKind::KwVoid => ty = Type::Void,
                TokenKind::KwAuto => ty = Type::Auto,
                TokenKind::KwDecltype => ty = Type::Decltype,
                TokenKind::KwBool => ty = Type::Bool,
                TokenKind::KwChar => ty = Type::Char,
                TokenKind::KwChar16T => ty = Type::Char16T,
                TokenKind::KwChar32T => ty = Type::Char32T,
                TokenKind::KwWcharT => ty = Type::WcharT,
                TokenKind::KwInt => ty = Type::Int,
                TokenKind::KwFloat => ty = Type::Float,
                TokenKind::KwDouble => ty = Type::Double,
                TokenKind::KwShort => size = Size::Short,
                TokenKind::KwLong => {
                    size = if spec.is_single_token(TokenKind::KwLong) {
                        Size::Long
                    } else {
                        // two adjacent "long" keywords in one node
                        Size::LongLong
                    };
                }
                TokenKind::KwSigned => sign = Sign::Signed,
                TokenKind::KwUnsigned => sign = Sign::Unsigned,
                TokenKind::Identifier if first.spelling() == "nullptr_t" => {
                    ty = Type::NullptrT;
                }
                _ => ty = Type::Other,
            }

            if ty != Type::NoType {
                return self.apply_type(state, spec, ty);
            } else if size != Size::NoSize {
                self.apply_size(state, spec, size);
            } else if sign != Sign::NoSign {
                self.apply_sign(state, spec, sign);
            }
        } else if spec.is(g_type_specifier) {
            // elaborated-type-specifier, typename-specifier, enum-specifier
            // or class-specifier
            if self.type_spec != Type::NoType {
                return same_node(&self.type_spec_node, spec);
            }
            let mut apply = true;
            if self.sign_spec != Sign::NoSign {
                node_error(
                    state,
                    spec,
                    format!(
                        "\"{}\" modifier cannot be used with type \"{}\"",
                        self.sign_spec,
                        spec.text()
                    ),
                );
                apply = false;
            } else if self.size_spec != Size::NoSize {
                node_error(
                    state,
                    spec,
                    format!(
                        "\"{}\" modifier cannot be used with type \"{}\"",
                        self.size_spec,
                        spec.text()
                    ),
                );
                apply = false;
            }
            if apply {
                self.type_spec = Type::Other;
                self.type_spec_node = Some(Rc::clone(spec));
            }
        }

        true
    }

    fn apply_type(&mut self, state: &mut dyn ParseState, spec: &Rc<SppfNode>, ty: Type) -> bool {
        if self.type_spec != Type::NoType {
            if same_node(&self.type_spec_node, spec) {
                return true;
            }
            if ty == Type::Other {
                // probably the beginning of a declarator; fail this
                // alternative so the parser can back out of the greedy
                // consumption of the identifier
                return false;
            }
            let earlier = self
                .type_spec_node
                .as_ref()
                .map(|n| n.text())
                .unwrap_or_default();
            node_error(
                state,
                spec,
                format!(
                    "\"{}\" conflicts with earlier type specifier \"{}\"",
                    spec.text(),
                    earlier
                ),
            );
            return true; // but carry on parsing
        }

        let mut apply = true;
        match ty {
            Type::Void
            | Type::Auto
            | Type::Decltype
            | Type::Bool
            | Type::Char16T
            | Type::Char32T
            | Type::WcharT
            | Type::Float
            | Type::NullptrT
            | Type::Other => {
                if self.sign_spec != Sign::NoSign {
                    node_error(
                        state,
                        spec,
                        format!(
                            "\"{}\" modifier cannot be used with type \"{}\"",
                            self.sign_spec,
                            spec.text()
                        ),
                    );
                    apply = false;
                }
                if self.size_spec != Size::NoSize {
                    node_error(
                        state,
                        spec,
                        format!(
                            "\"{}\" modifier cannot be used with type \"{}\"",
                            self.size_spec,
                            spec.text()
                        ),
                    );
                    apply = false;
                }
            }
            Type::Char => {
                if self.size_spec != Size::NoSize {
                    node_error(
                        state,
                        spec,
                        format!(
                            "\"{}\" modifier cannot be used with type \"char\"",
                            self.size_spec
                        ),
                    );
                    return true;
                }
            }
            Type::Int => (),
            Type::Double => {
                if self.sign_spec != Sign::NoSign {
                    node_error(
                        state,
                        spec,
                        format!(
                            "\"{}\" modifier cannot be used with type \"double\"",
                            self.sign_spec
                        ),
                    );
                    apply = false;
                }
                if self.size_spec != Size::NoSize && self.size_spec != Size::Long {
                    node_error(
                        state,
                        spec,
                        format!(
                            "\"{}\" modifier cannot be used with type \"double\"",
                            self.size_spec
                        ),
                    );
                    apply = false;
                }
            }
            Type::NoType => unreachable!(),
        }

        if apply {
            self.type_spec = ty;
            self.type_spec_node = Some(Rc::clone(spec));
        }
        true
    }

    fn apply_size(&mut self, state: &mut dyn ParseState, spec: &Rc<SppfNode>, size: Size) {
        if self.size_spec != Size::NoSize && size != self.size_spec {
            node_error(
                state,
                spec,
                format!(
                    "\"{}\" conflicts with earlier \"{}\" modifier",
                    size, self.size_spec
                ),
            );
            return;
        }

        match size {
            Size::Short | Size::LongLong => {
                if self.type_spec != Type::NoType && self.type_spec != Type::Int {
                    node_error(
                        state,
                        spec,
                        format!(
                            "\"{}\" modifier cannot be used with type \"{}\"",
                            size, self.type_spec
                        ),
                    );
                    return;
                }
            }
            Size::Long => {
                if self.type_spec != Type::NoType
                    && self.type_spec != Type::Int
                    && self.type_spec != Type::Double
                {
                    node_error(
                        state,
                        spec,
                        format!(
                            "\"{}\" modifier cannot be used with type \"{}\"",
                            size, self.type_spec
                        ),
                    );
                    return;
                }
            }
            Size::NoSize => unreachable!(),
        }

        self.size_spec = size;
        self.size_spec_node = Some(Rc::clone(spec));
    }

    fn apply_sign(&mut self, state: &mut dyn ParseState, spec: &Rc<SppfNode>, sign: Sign) {
        let mut apply = true;
        if self.sign_spec != Sign::NoSign && sign != self.sign_spec {
            node_error(
                state,
                spec,
                format!(
                    "\"{}\" conflicts with earlier modifier \"{}\"",
                    sign, self.sign_spec
                ),
            );
            apply = false;
        }
        if self.type_spec != Type::NoType
            && self.type_spec != Type::Int
            && self.type_spec != Type::Char
        {
            node_error(
                state,
                spec,
                format!(
                    "\"{}\" modifier cannot be used with type \"{}\"",
                    sign, self.type_spec
                ),
            );
            apply = false;
        }

        if apply {
            self.sign_spec = sign;
            self.sign_spec_node = Some(Rc::clone(spec));
        }
    }
}

/*
 * Declarator
 */

/// Post-parse action for the declarator family of non-terminals.
pub fn declarator_end(state: &mut dyn ParseState) -> bool {
    let node = match state.parsed_node() {
        Some(node) => node,
        None => return true,
    };
    let mut me = Declarator::default();
    if !me.check(state, &node) {
        return false;
    }
    node.set_aux_data(AuxData::Declarator(me));
    true
}

impl Declarator {
    fn check(&mut self, state: &mut dyn ParseState, dcl_node: &Rc<SppfNode>) -> bool {
        let g_ptr_operator = state.grammar().ptr_operator;
        let g_parms = state.grammar().parameters_and_qualifiers;
        let g_array = state.grammar().array_declarator;
        let g_nested = state.grammar().nested_declarator;
        let g_nested_abstract = state.grammar().nested_abstract_declarator;

        let mut nested_dcl: Option<Rc<SppfNode>> = None;
        let mut ref_op: Option<Token> = None;
        let mut ref_to_ref = false;
        let mut ptr_to_ref = false;
        let mut multi_fn_parms = false;
        let mut array_of_refs = false;

        let parts: Vec<Rc<SppfNode>> = dcl_node.sub_productions().cloned().collect();
        for part in &parts {
            if part.is(g_ptr_operator) {
                let first = part.first_token().cloned();
                let is_ref = matches!(
                    first.as_ref().map(Token::kind),
                    Some(TokenKind::Amp) | Some(TokenKind::AmpAmp)
                );
                if is_ref {
                    if ref_op.is_none() {
                        ref_op = first.clone();
                    } else if !ref_to_ref {
                        node_error(
                            state,
                            part,
                            "reference to reference not permitted".to_string(),
                        );
                        ref_to_ref = true;
                    }
                } else if ref_op.is_some() && !ptr_to_ref {
                    node_error(
                        state,
                        part,
                        "pointer to reference not permitted".to_string(),
                    );
                    ptr_to_ref = true;
                }
                self.last_ptr = first;
            } else if part.is(g_parms) {
                if self.begin_parms.is_none() {
                    // = first token of the parameter-declaration-clause
                    self.begin_parms = part.first_token().cloned();
                } else if !multi_fn_parms {
                    node_error(
                        state,
                        part,
                        "multiple sets of function parameters/qualifiers".to_string(),
                    );
                    multi_fn_parms = true;
                }
            } else if part.is(g_array) {
                if ref_op.is_some() && !array_of_refs {
                    node_error(
                        state,
                        part,
                        "array of references not permitted".to_string(),
                    );
                    array_of_refs = true;
                }
                self.array = true;
            } else if part.is(g_nested) || part.is(g_nested_abstract) {
                nested_dcl = Some(Rc::clone(part));
            }
        }

        if let Some(nested_dcl) = nested_dcl {
            return self.check(state, &nested_dcl);
        }
        true
    }
}

/*
 * DeclaratorPart
 */

/// Post-parse action for `parameters-and-qualifiers` (and
/// `lambda-declarator`, which shares its shape).
pub fn parameters_and_qualifiers_end(state: &mut dyn ParseState) -> bool {
    let node = match state.parsed_node() {
        Some(node) => node,
        None => return false, // didn't match
    };

    let g_clause = state.grammar().parameter_declaration_clause;
    let g_type_qualifier_seq = state.grammar().type_qualifier_seq;
    let g_ref_qualifier = state.grammar().ref_qualifier;

    let mut me = DeclaratorPart::default();

    if let Some(parms) = node.sub_productions().next() {
        if parms.is(g_clause) {
            if parms.is_empty() {
                me.count = 0;
            } else if !parms.has_children() {
                me.count = 1;
            } else {
                me.count = count_parameters(parms);
            }
            me.variadic = !parms.is_empty()
                && parms.last_token().map(Token::kind) == Some(TokenKind::Ellipsis);
        }
    }

    for quals in node.sub_productions() {
        if quals.is(g_type_qualifier_seq) {
            me.qualifiers |= type_qualifiers_from_seq(quals);
        } else if quals.is(g_ref_qualifier) {
            if let Some(token) = quals.first_token() {
                me.qualifiers |= qualifier_for_token(token);
            }
        }
    }

    node.set_aux_data(AuxData::DeclaratorPart(me));
    true
}

fn count_parameters(clause: &SppfNode) -> u16 {
    let mut items = Vec::new();
    collect_seq_items(clause, &mut items);
    num_traits::cast(items.len()).unwrap_or(u16::MAX)
}

/// Post-parse action for `ptr-operator`.
pub fn ptr_operator_end(state: &mut dyn ParseState) -> bool {
    let node = match state.parsed_node() {
        Some(node) => node,
        None => return false, // didn't match
    };

    let g_type_qualifier_seq = state.grammar().type_qualifier_seq;

    let mut me = DeclaratorPart::default();
    if let Some(type_quals) = node.find(g_type_qualifier_seq, 1) {
        me.qualifiers = type_qualifiers_from_seq(&type_quals);
    }

    node.set_aux_data(AuxData::DeclaratorPart(me));
    true
}

/// Is `part` a parameter-pack operator: a `declarator-id` beginning with
/// `...`, or an `abstract-pack-declarator`?
pub fn is_parameter_pack_operator(
    declarator_id: NtIdx,
    abstract_pack_declarator: NtIdx,
    part: &SppfNode,
) -> bool {
    (part.is(declarator_id) && part.first_token().map(Token::kind) == Some(TokenKind::Ellipsis))
        || part.is(abstract_pack_declarator)
}

/// Find a declarator node's rightmost `ptr-operator` (`*`, `&`, `&&` or
/// `X::*`) among its direct parts. Nested declarators are not searched, so
/// a declarator parsed from `int (*p)` yields `None`.
pub fn last_ptr_operator(ptr_operator: NtIdx, dcl_node: &SppfNode) -> Option<&Rc<SppfNode>> {
    let mut ptr_op = None;
    // ptr-operators always come first
    for part in dcl_node.sub_productions() {
        if part.is(ptr_operator) {
            ptr_op = Some(part);
        } else {
            break;
        }
    }
    ptr_op
}

/// Does the declarator node declare a reference? Nested declarators are not
/// searched (see [`last_ptr_operator`]).
pub fn is_reference(ptr_operator: NtIdx, dcl_node: &SppfNode) -> bool {
    match last_ptr_operator(ptr_operator, dcl_node).and_then(|op| op.first_token()) {
        Some(token) => token.is(TokenKind::Amp) || token.is(TokenKind::AmpAmp),
        None => false,
    }
}
