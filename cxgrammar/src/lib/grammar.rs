//! The unified, feature-gated C/C++ grammar.
//!
//! Non-terminals live in an arena addressed by [`NtIdx`] handles, so the
//! heavily self-referential rule graph needs no tangled initialisation:
//! every non-terminal is declared first, then productions reference the
//! handles. Alternatives carry construction-time gates derived from the
//! selected standards; disabled alternatives are never tried by the engine.
//!
//! The content covers the C++17 surface grammar (ISO C++ annex A) plus the
//! C89/99/11 constructs, with a handful of deliberate structural deviations
//! from the published grammar that make GLL parsing tractable and give the
//! post-parse actions clean shapes to walk (see the inline comments at the
//! relevant rules).

use indexmap::IndexMap;

use cxlex::options::{BINARY_LITERALS, INLINE_FUNCTIONS, LONG_LONG, UTF8_CHAR_LITERALS};
use cxlex::{CxxOptions, TokenKind};

use crate::actions;
use crate::engine::{
    self, is_balanced_token, is_final_specifier, is_function, is_override_specifier, is_pure_zero,
    process_template_close_token, PostParseAction, Predicate,
};
use crate::idxnewtype::{NtIdx, PIdx, SIdx};

/// How a non-terminal's node appears in the output forest.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DisplayPolicy {
    Normal,
    /// If the parse derived a single sub-non-terminal, the outer node is
    /// elided in the output tree.
    HideIfDelegate,
    /// The node's children are spliced into the parent.
    Transparent,
}

/// One grammar symbol within a production.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Symbol {
    Token(TokenKind),
    Rule(NtIdx),
    OptToken(TokenKind),
    OptRule(NtIdx),
    /// A token match additionally gated by a semantic predicate.
    PredToken(TokenKind, Predicate),
    /// A rule match additionally gated by a semantic predicate.
    PredRule(NtIdx, Predicate),
    /// Any single token accepted by the predicate.
    AnyToken(Predicate),
}

/// An ordered sequence of symbols forming one alternative of a
/// non-terminal. `enabled` is fixed at construction from the selected
/// standards and features.
pub struct Production {
    symbols: Vec<Symbol>,
    enabled: bool,
}

impl Production {
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> SIdx {
        SIdx::new(self.symbols.len())
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }
}

pub struct NonTerminal {
    name: &'static str,
    enabled: bool,
    display: DisplayPolicy,
    prods: Vec<PIdx>,
    actions: Vec<PostParseAction>,
}

impl NonTerminal {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn display(&self) -> DisplayPolicy {
        self.display
    }

    pub fn prods(&self) -> &[PIdx] {
        &self.prods
    }

    pub fn actions(&self) -> &[PostParseAction] {
        &self.actions
    }
}

/// The overridable identifier-classification predicates. The defaults make
/// every identifier resolve as an undeclared name; an embedder doing real
/// symbol look-up supplies its own set.
#[derive(Clone, Copy)]
pub struct NameResolvers {
    pub is_typedef_name: Predicate,
    pub is_class_name: Predicate,
    pub is_enum_name: Predicate,
    pub is_namespace_name: Predicate,
    pub is_namespace_alias_name: Predicate,
    pub is_template_name: Predicate,
    pub is_undeclared_name: Predicate,
}

impl Default for NameResolvers {
    fn default() -> NameResolvers {
        NameResolvers {
            is_typedef_name: engine::is_typedef_name,
            is_class_name: engine::is_class_name,
            is_enum_name: engine::is_enum_name,
            is_namespace_name: engine::is_namespace_name,
            is_namespace_alias_name: engine::is_namespace_alias_name,
            is_template_name: engine::is_template_name,
            is_undeclared_name: engine::is_undeclared_name,
        }
    }
}

fn tok(kind: TokenKind) -> Symbol {
    Symbol::Token(kind)
}

fn nt(idx: NtIdx) -> Symbol {
    Symbol::Rule(idx)
}

fn opt(idx: NtIdx) -> Symbol {
    Symbol::OptRule(idx)
}

fn opt_tok(kind: TokenKind) -> Symbol {
    Symbol::OptToken(kind)
}

fn pred_tok(kind: TokenKind, pred: Predicate) -> Symbol {
    Symbol::PredToken(kind, pred)
}

fn pred_nt(idx: NtIdx, pred: Predicate) -> Symbol {
    Symbol::PredRule(idx, pred)
}

fn any_tok(pred: Predicate) -> Symbol {
    Symbol::AnyToken(pred)
}

struct GrammarBuilder {
    nonterms: Vec<NonTerminal>,
    prods: Vec<Production>,
    prods_nonterms: Vec<NtIdx>,
    name_map: IndexMap<&'static str, NtIdx>,
}

impl GrammarBuilder {
    fn new() -> GrammarBuilder {
        GrammarBuilder {
            nonterms: Vec::new(),
            prods: Vec::new(),
            prods_nonterms: Vec::new(),
            name_map: IndexMap::new(),
        }
    }

    fn nonterm(&mut self, name: &'static str, enabled: bool, display: DisplayPolicy) -> NtIdx {
        let idx = NtIdx::new(self.nonterms.len());
        self.nonterms.push(NonTerminal {
            name,
            enabled,
            display,
            prods: Vec::new(),
            actions: Vec::new(),
        });
        self.name_map.insert(name, idx);
        idx
    }

    fn prod(&mut self, lhs: NtIdx, symbols: &[Symbol]) -> PIdx {
        self.prod_if(lhs, true, symbols)
    }

    fn prod_if(&mut self, lhs: NtIdx, enabled: bool, symbols: &[Symbol]) -> PIdx {
        let pidx = PIdx::new(self.prods.len());
        self.prods.push(Production {
            symbols: symbols.to_vec(),
            enabled,
        });
        self.prods_nonterms.push(lhs);
        self.nonterms[usize::from(lhs)].prods.push(pidx);
        pidx
    }

    fn action(&mut self, lhs: NtIdx, action: PostParseAction) {
        self.nonterms[usize::from(lhs)].actions.push(action);
    }
}

/// The C/C++ grammar, specialised for one [`CxxOptions`] configuration.
///
/// The public `NtIdx` fields name every non-terminal; the `PIdx` fields at
/// the end identify the comparison/arithmetic/shift productions so that
/// consumers can ask "was this expression produced by rule X?" without
/// string-matching the operator token.
pub struct CxxGrammar {
    nonterms: Vec<NonTerminal>,
    prods: Vec<Production>,
    prods_nonterms: Vec<NtIdx>,
    name_map: IndexMap<&'static str, NtIdx>,

    // A.1 Keywords [gram.key]
    pub typedef_name: NtIdx,
    pub class_name: NtIdx,
    pub enum_name: NtIdx,
    pub namespace_name: NtIdx,
    pub original_namespace_name: NtIdx,
    pub namespace_alias: NtIdx,
    pub template_name: NtIdx,
    pub undeclared_name: NtIdx,

    // A.2 Lexical conventions [gram.lex]
    pub identifier: NtIdx,
    pub literal: NtIdx,
    pub boolean_literal: NtIdx,
    pub pointer_literal: NtIdx,
    pub user_defined_literal: NtIdx,
    pub ud_suffix: NtIdx,
    pub numeric_literal: NtIdx,
    pub character_literal: NtIdx,
    pub string_literal: NtIdx,

    // A.3 Basic concepts [gram.basic]
    pub translation_unit: NtIdx,

    // A.4 Expressions [gram.expr]
    pub primary_expression: NtIdx,
    pub generic_selection: NtIdx,
    pub generic_assoc_list: NtIdx,
    pub generic_association: NtIdx,
    pub paren_expression: NtIdx,
    pub id_expression: NtIdx,
    pub unqualified_id: NtIdx,
    pub postfix_expression: NtIdx,
    pub array_subscript: NtIdx,
    pub function_call: NtIdx,
    pub member_access: NtIdx,
    pub expression_list: NtIdx,
    pub unary_expression: NtIdx,
    pub unary_operator: NtIdx,
    pub qualified_id: NtIdx,
    pub nested_name_specifier: NtIdx,
    pub pseudo_destructor_name: NtIdx,
    pub new_expression: NtIdx,
    pub new_placement: NtIdx,
    pub new_type_id: NtIdx,
    pub new_declarator: NtIdx,
    pub noptr_new_declarator: NtIdx,
    pub new_initializer: NtIdx,
    pub delete_expression: NtIdx,
    pub lambda_expression: NtIdx,
    pub lambda_introducer: NtIdx,
    pub lambda_capture: NtIdx,
    pub capture_default: NtIdx,
    pub capture_list: NtIdx,
    pub capture: NtIdx,
    pub simple_capture: NtIdx,
    pub init_capture: NtIdx,
    pub lambda_declarator: NtIdx,
    pub noexcept_expression: NtIdx,
    pub cast_expression: NtIdx,
    pub pm_expression: NtIdx,
    pub multiplicative_expression: NtIdx,
    pub additive_expression: NtIdx,
    pub shift_expression: NtIdx,
    pub relational_expression: NtIdx,
    pub equality_expression: NtIdx,
    pub and_expression: NtIdx,
    pub exclusive_or_expression: NtIdx,
    pub inclusive_or_expression: NtIdx,
    pub logical_and_expression: NtIdx,
    pub logical_or_expression: NtIdx,
    pub conditional_expression: NtIdx,
    pub assignment_expression: NtIdx,
    pub assignment_operator: NtIdx,
    pub expression: NtIdx,
    pub constant_expression: NtIdx,

    // A.5 Statements [gram.stmt]
    pub statement: NtIdx,
    pub labeled_statement: NtIdx,
    pub expression_statement: NtIdx,
    pub compound_statement: NtIdx,
    pub block_declaration_seq: NtIdx,
    pub statement_seq: NtIdx,
    pub selection_statement: NtIdx,
    pub condition: NtIdx,
    pub iteration_statement: NtIdx,
    pub for_init_statement: NtIdx,
    pub for_range_declaration: NtIdx,
    pub for_range_initializer: NtIdx,
    pub jump_statement: NtIdx,
    pub declaration_statement: NtIdx,

    // A.6 Declarations [gram.dcl]
    pub declaration_seq: NtIdx,
    pub declaration: NtIdx,
    pub block_declaration: NtIdx,
    pub simple_declaration: NtIdx,
    pub static_assert_declaration: NtIdx,
    pub empty_declaration: NtIdx,
    pub decl_specifier: NtIdx,
    pub decl_specifier_seq: NtIdx,
    pub storage_class_specifier: NtIdx,
    pub function_specifier: NtIdx,
    pub type_specifier: NtIdx,
    pub trailing_type_specifier: NtIdx,
    pub type_specifier_seq: NtIdx,
    pub trailing_type_specifier_seq: NtIdx,
    pub simple_type_specifier: NtIdx,
    pub ud_type_specifier: NtIdx,
    pub type_name: NtIdx,
    pub elaborated_type_specifier: NtIdx,
    pub atomic_type_specifier: NtIdx,
    pub enum_specifier: NtIdx,
    pub enum_head: NtIdx,
    pub enum_key: NtIdx,
    pub enumerator_list: NtIdx,
    pub enumerator_definition: NtIdx,
    pub enumerator: NtIdx,
    pub namespace_definition: NtIdx,
    pub named_namespace_definition: NtIdx,
    pub original_namespace_definition: NtIdx,
    pub extension_namespace_definition: NtIdx,
    pub unnamed_namespace_definition: NtIdx,
    pub namespace_body: NtIdx,
    pub namespace_alias_definition: NtIdx,
    pub qualified_namespace_specifier: NtIdx,
    pub using_declaration: NtIdx,
    pub using_directive: NtIdx,
    pub linkage_specification: NtIdx,
    pub asm_definition: NtIdx,
    pub alignment_specifier: NtIdx,
    pub decltype_specifier: NtIdx,
    pub opaque_enum_declaration: NtIdx,
    pub enum_base: NtIdx,
    pub alias_declaration: NtIdx,
    pub attribute_declaration: NtIdx,
    pub attribute_specifier_seq: NtIdx,
    pub attribute_specifier: NtIdx,
    pub attribute_list: NtIdx,
    pub attribute: NtIdx,
    pub attribute_token: NtIdx,
    pub attribute_scoped_token: NtIdx,
    pub attribute_namespace: NtIdx,
    pub attribute_argument_clause: NtIdx,
    pub balanced_token_seq: NtIdx,
    pub balanced_token: NtIdx,

    // A.7 Declarators [gram.decl]
    pub init_declarator_list: NtIdx,
    pub init_declarator: NtIdx,
    pub declarator: NtIdx,
    pub ptr_declarator: NtIdx,
    pub noptr_declarator: NtIdx,
    pub nested_declarator: NtIdx,
    pub array_declarator: NtIdx,
    pub parameters_and_qualifiers: NtIdx,
    pub ptr_operator: NtIdx,
    pub type_qualifier_seq: NtIdx,
    pub type_qualifier: NtIdx,
    pub declarator_id: NtIdx,
    pub type_id: NtIdx,
    pub abstract_declarator: NtIdx,
    pub ptr_abstract_declarator: NtIdx,
    pub noptr_abstract_declarator: NtIdx,
    pub nested_abstract_declarator: NtIdx,
    pub trailing_return_type: NtIdx,
    pub ref_qualifier: NtIdx,
    pub abstract_pack_declarator: NtIdx,
    pub noptr_abstract_pack_declarator: NtIdx,
    pub parameter_declaration_clause: NtIdx,
    pub parameter_declaration_list: NtIdx,
    pub parameter_declaration: NtIdx,
    pub function_definition: NtIdx,
    pub function_body: NtIdx,
    pub initializer: NtIdx,
    pub brace_or_equal_initializer: NtIdx,
    pub initializer_clause: NtIdx,
    pub initializer_list: NtIdx,
    pub braced_init_list: NtIdx,
    pub designation: NtIdx,
    pub designator_list: NtIdx,
    pub designator: NtIdx,

    // A.8 Classes [gram.class]
    pub class_specifier: NtIdx,
    pub class_head: NtIdx,
    pub class_head_name: NtIdx,
    pub class_virt_specifier: NtIdx,
    pub class_key: NtIdx,
    pub member_declaration: NtIdx,
    pub member_specification: NtIdx,
    pub member_declarator_list: NtIdx,
    pub member_declarator: NtIdx,
    pub virt_specifier_seq: NtIdx,
    pub virt_specifier: NtIdx,
    pub pure_specifier: NtIdx,

    // A.9 Derived classes [gram.derived]
    pub base_clause: NtIdx,
    pub base_specifier_list: NtIdx,
    pub base_specifier: NtIdx,
    pub class_or_decltype: NtIdx,
    pub base_type_specifier: NtIdx,
    pub access_specifier: NtIdx,

    // A.10 Special member functions [gram.special]
    pub conversion_function_id: NtIdx,
    pub conversion_type_id: NtIdx,
    pub conversion_declarator: NtIdx,
    pub ctor_initializer: NtIdx,
    pub mem_initializer_list: NtIdx,
    pub mem_initializer: NtIdx,
    pub mem_initializer_id: NtIdx,
    pub destructor_id: NtIdx,

    // A.11 Overloading [gram.over]
    pub operator_function_id: NtIdx,
    pub overloadable_operator: NtIdx,
    pub literal_operator_id: NtIdx,

    // A.12 Templates [gram.temp]
    pub template_declaration: NtIdx,
    pub template_parameter_list: NtIdx,
    pub template_parameter: NtIdx,
    pub type_parameter: NtIdx,
    pub simple_template_id: NtIdx,
    pub template_id: NtIdx,
    pub template_argument_list: NtIdx,
    pub template_argument: NtIdx,
    pub typename_specifier: NtIdx,
    pub explicit_instantiation: NtIdx,
    pub explicit_specialization: NtIdx,

    // A.13 Exception handling [gram.except]
    pub try_block: NtIdx,
    pub function_try_block: NtIdx,
    pub handler_seq: NtIdx,
    pub handler: NtIdx,
    pub exception_declaration: NtIdx,
    pub throw_expression: NtIdx,
    pub exception_specification: NtIdx,
    pub dynamic_exception_specification: NtIdx,
    pub type_id_list: NtIdx,
    pub noexcept_specification: NtIdx,

    // Operator-token rule attachments
    pub equal: PIdx,
    pub not_equal: PIdx,
    pub less: PIdx,
    pub less_or_equal: PIdx,
    pub greater: PIdx,
    pub greater_or_equal: PIdx,
    pub binary_add: PIdx,
    pub binary_subtract: PIdx,
    pub left_shift: PIdx,
    pub right_shift: PIdx,
    pub multiply: PIdx,
    pub divide: PIdx,
    pub modulo: PIdx,
}

impl CxxGrammar {
    pub fn new(options: &CxxOptions) -> CxxGrammar {
        CxxGrammar::with_resolvers(options, NameResolvers::default())
    }

    pub fn with_resolvers(options: &CxxOptions, resolvers: NameResolvers) -> CxxGrammar {
        use DisplayPolicy::{HideIfDelegate, Normal, Transparent};
        use TokenKind::*;

        let lang_c = options.lang_c();
        let lang_cxx = options.lang_cxx();
        let c99 = options.std_c99();
        let c11 = options.std_c11();
        let cxx11 = options.std_cxx11();

        let mut b = GrammarBuilder::new();

        /*
         * Declare every non-terminal up front; productions below reference
         * the handles, so registration order does not matter.
         */

        // A.1 Keywords [gram.key]
        let typedef_name = b.nonterm("typedef-name", true, Normal);
        let class_name = b.nonterm("class-name", true, Normal);
        let enum_name = b.nonterm("enum-name", true, Normal);
        let namespace_name = b.nonterm("namespace-name", lang_cxx, Normal);
        let original_namespace_name = b.nonterm("original-namespace-name", lang_cxx, Normal);
        let namespace_alias = b.nonterm("namespace-alias", lang_cxx, Normal);
        let template_name = b.nonterm("template-name", lang_cxx, Normal);
        let undeclared_name = b.nonterm("undeclared-name", true, Normal);

        // A.2 Lexical conventions [gram.lex]
        let identifier = b.nonterm("identifier", true, Normal);
        let literal = b.nonterm("literal", true, Normal);
        let boolean_literal = b.nonterm("boolean-literal", lang_cxx, Normal);
        let pointer_literal = b.nonterm("pointer-literal", cxx11, Normal);
        let user_defined_literal = b.nonterm("user-defined-literal", cxx11, Normal);
        let ud_suffix = b.nonterm("ud-suffix", cxx11, Normal);
        let numeric_literal = b.nonterm("numeric-literal", true, Normal);
        let character_literal = b.nonterm("character-literal", true, Normal);
        let string_literal = b.nonterm("string-literal", true, Normal);

        // A.3 Basic concepts [gram.basic]
        let translation_unit = b.nonterm("translation-unit", true, Normal);

        // A.4 Expressions [gram.expr]
        let primary_expression = b.nonterm("primary-expression", true, HideIfDelegate);
        let generic_selection = b.nonterm("generic-selection", c11, Normal);
        let generic_assoc_list = b.nonterm("generic-assoc-list", c11, Transparent);
        let generic_association = b.nonterm("generic-association", c11, Normal);
        let paren_expression = b.nonterm("paren-expression", true, Normal);
        let id_expression = b.nonterm("id-expression", true, Normal);
        let unqualified_id = b.nonterm("unqualified-id", true, Normal);
        let postfix_expression = b.nonterm("postfix-expression", true, HideIfDelegate);
        let array_subscript = b.nonterm("array-subscript", true, Normal);
        let function_call = b.nonterm("function-call", true, Normal);
        let member_access = b.nonterm("member-access", true, Normal);
        let expression_list = b.nonterm("expression-list", true, Normal);
        let unary_expression = b.nonterm("unary-expression", true, HideIfDelegate);
        let unary_operator = b.nonterm("unary-operator", true, Normal);
        let qualified_id = b.nonterm("qualified-id", lang_cxx, Normal);
        let nested_name_specifier = b.nonterm("nested-name-specifier", lang_cxx, Normal);
        let pseudo_destructor_name = b.nonterm("pseudo-destructor-name", lang_cxx, Normal);
        let new_expression = b.nonterm("new-expression", lang_cxx, Normal);
        let new_placement = b.nonterm("new-placement", lang_cxx, Normal);
        let new_type_id = b.nonterm("new-type-id", lang_cxx, Normal);
        let new_declarator = b.nonterm("new-declarator", lang_cxx, Normal);
        let noptr_new_declarator = b.nonterm("noptr-new-declarator", lang_cxx, Normal);
        let new_initializer = b.nonterm("new-initializer", lang_cxx, Normal);
        let delete_expression = b.nonterm("delete-expression", lang_cxx, Normal);
        let lambda_expression = b.nonterm("lambda-expression", cxx11, Normal);
        let lambda_introducer = b.nonterm("lambda-introducer", cxx11, Normal);
        let lambda_capture = b.nonterm("lambda-capture", cxx11, Normal);
        let capture_default = b.nonterm("capture-default", cxx11, Normal);
        let capture_list = b.nonterm("capture-list", cxx11, Transparent);
        let capture = b.nonterm("capture", cxx11, Normal);
        let simple_capture = b.nonterm("simple-capture", cxx11, Normal);
        let init_capture = b.nonterm("init-capture", cxx11, Normal);
        let lambda_declarator = b.nonterm("lambda-declarator", cxx11, Normal);
        let noexcept_expression = b.nonterm("noexcept-expression", cxx11, Normal);
        let cast_expression = b.nonterm("cast-expression", true, HideIfDelegate);
        let pm_expression = b.nonterm("pm-expression", true, HideIfDelegate);
        let multiplicative_expression =
            b.nonterm("multiplicative-expression", true, HideIfDelegate);
        let additive_expression = b.nonterm("additive-expression", true, HideIfDelegate);
        let shift_expression = b.nonterm("shift-expression", true, HideIfDelegate);
        let relational_expression = b.nonterm("relational-expression", true, HideIfDelegate);
        let equality_expression = b.nonterm("equality-expression", true, HideIfDelegate);
        let and_expression = b.nonterm("and-expression", true, HideIfDelegate);
        let exclusive_or_expression = b.nonterm("exclusive-or-expression", true, HideIfDelegate);
        let inclusive_or_expression = b.nonterm("inclusive-or-expression", true, HideIfDelegate);
        let logical_and_expression = b.nonterm("logical-and-expression", true, HideIfDelegate);
        let logical_or_expression = b.nonterm("logical-or-expression", true, HideIfDelegate);
        let conditional_expression = b.nonterm("conditional-expression", true, HideIfDelegate);
        let assignment_expression = b.nonterm("assignment-expression", true, HideIfDelegate);
        let assignment_operator = b.nonterm("assignment-operator", true, Normal);
        let expression = b.nonterm("expression", true, Normal);
        let constant_expression = b.nonterm("constant-expression", true, Normal);

        // A.5 Statements [gram.stmt]
        let statement = b.nonterm("statement", true, Normal);
        let labeled_statement = b.nonterm("labeled-statement", true, Normal);
        let expression_statement = b.nonterm("expression-statement", true, Normal);
        let compound_statement = b.nonterm("compound-statement", true, Normal);
        let block_declaration_seq =
            b.nonterm("block-declaration-seq", !lang_cxx && !c99, Transparent);
        let statement_seq = b.nonterm("statement-seq", true, Transparent);
        let selection_statement = b.nonterm("selection-statement", true, Normal);
        let condition = b.nonterm("condition", true, Normal);
        let iteration_statement = b.nonterm("iteration-statement", true, Normal);
        let for_init_statement = b.nonterm("for-init-statement", true, Normal);
        let for_range_declaration = b.nonterm("for-range-declaration", true, Normal);
        let for_range_initializer = b.nonterm("for-range-initializer", true, Normal);
        let jump_statement = b.nonterm("jump-statement", true, Normal);
        let declaration_statement = b.nonterm("declaration-statement", true, Normal);

        // A.6 Declarations [gram.dcl]
        let declaration_seq = b.nonterm("declaration-seq", true, Transparent);
        let declaration = b.nonterm("declaration", true, Normal);
        let block_declaration = b.nonterm("block-declaration", true, Normal);
        let simple_declaration = b.nonterm("simple-declaration", true, Normal);
        let static_assert_declaration =
            b.nonterm("static_assert-declaration", c11 || cxx11, Normal);
        let empty_declaration = b.nonterm("empty-declaration", true, Normal);
        let decl_specifier = b.nonterm("decl-specifier", true, Normal);
        let decl_specifier_seq = b.nonterm("decl-specifier-seq", true, Normal);
        let storage_class_specifier = b.nonterm("storage-class-specifier", true, Normal);
        let function_specifier = b.nonterm("function-specifier", true, Normal);
        let type_specifier = b.nonterm("type-specifier", true, Normal);
        let trailing_type_specifier = b.nonterm("trailing-type-specifier", true, Transparent);
        let type_specifier_seq = b.nonterm("type-specifier-seq", true, Normal);
        let trailing_type_specifier_seq =
            b.nonterm("trailing-type-specifier-seq", true, Normal);
        let simple_type_specifier = b.nonterm("simple-type-specifier", true, Normal);
        let ud_type_specifier = b.nonterm("ud-type-specifier", lang_cxx, Normal);
        let type_name = b.nonterm("type-name", lang_cxx, Normal);
        let elaborated_type_specifier = b.nonterm("elaborated-type-specifier", true, Normal);
        let atomic_type_specifier = b.nonterm("atomic-type-specifier", c11, Normal);
        let enum_specifier = b.nonterm("enum-specifier", true, Normal);
        let enum_head = b.nonterm("enum-head", true, Normal);
        let enum_key = b.nonterm("enum-key", true, Normal);
        let enumerator_list = b.nonterm("enumerator-list", true, Transparent);
        let enumerator_definition = b.nonterm("enumerator-definition", true, Normal);
        let enumerator = b.nonterm("enumerator", true, Normal);
        let namespace_definition = b.nonterm("namespace-definition", lang_cxx, Normal);
        let named_namespace_definition =
            b.nonterm("named-namespace-definition", lang_cxx, Normal);
        let original_namespace_definition =
            b.nonterm("original-namespace-definition", lang_cxx, Normal);
        let extension_namespace_definition =
            b.nonterm("extension-namespace-definition", lang_cxx, Normal);
        let unnamed_namespace_definition =
            b.nonterm("unnamed-namespace-definition", lang_cxx, Normal);
        let namespace_body = b.nonterm("namespace-body", lang_cxx, Normal);
        let namespace_alias_definition =
            b.nonterm("namespace-alias-definition", lang_cxx, Normal);
        let qualified_namespace_specifier =
            b.nonterm("qualified-namespace-specifier", lang_cxx, Normal);
        let using_declaration = b.nonterm("using-declaration", lang_cxx, Normal);
        let using_directive = b.nonterm("using-directive", lang_cxx, Normal);
        let linkage_specification = b.nonterm("linkage-specification", lang_cxx, Normal);
        let asm_definition = b.nonterm("asm-definition", true, Normal);
        let alignment_specifier = b.nonterm("alignment-specifier", c11 || cxx11, Normal);
        let decltype_specifier = b.nonterm("decltype-specifier", cxx11, Normal);
        let opaque_enum_declaration = b.nonterm("opaque-enum-declaration", cxx11, Normal);
        let enum_base = b.nonterm("enum-base", cxx11, Normal);
        let alias_declaration = b.nonterm("alias-declaration", cxx11, Normal);
        let attribute_declaration = b.nonterm("attribute-declaration", cxx11, Normal);
        let attribute_specifier_seq = b.nonterm("attribute-specifier-seq", cxx11, Normal);
        let attribute_specifier = b.nonterm("attribute-specifier", cxx11, Normal);
        let attribute_list = b.nonterm("attribute-list", cxx11, Normal);
        let attribute = b.nonterm("attribute", cxx11, Normal);
        let attribute_token = b.nonterm("attribute-token", cxx11, Normal);
        let attribute_scoped_token = b.nonterm("attribute-scoped-token", cxx11, Normal);
        let attribute_namespace = b.nonterm("attribute-namespace", cxx11, Normal);
        let attribute_argument_clause = b.nonterm("attribute_argument_clause", cxx11, Normal);
        let balanced_token_seq = b.nonterm("balanced-token-seq", cxx11, Transparent);
        let balanced_token = b.nonterm("balanced-token", cxx11, Normal);

        // A.7 Declarators [gram.decl]
        let init_declarator_list = b.nonterm("init-declarator-list", true, Normal);
        let init_declarator = b.nonterm("init-declarator", true, Normal);
        let declarator = b.nonterm("declarator", true, Normal);
        let ptr_declarator = b.nonterm("ptr-declarator", true, Transparent);
        let noptr_declarator = b.nonterm("noptr-declarator", true, Transparent);
        let nested_declarator = b.nonterm("nested-declarator", true, Normal);
        let array_declarator = b.nonterm("array-declarator", true, Normal);
        let parameters_and_qualifiers = b.nonterm("parameters-and-qualifiers", true, Normal);
        let ptr_operator = b.nonterm("ptr-operator", true, Normal);
        let type_qualifier_seq = b.nonterm("type-qualifier-seq", true, Normal);
        let type_qualifier = b.nonterm("type-qualifier", true, Normal);
        let declarator_id = b.nonterm("declarator-id", true, Normal);
        let type_id = b.nonterm("type-id", true, Normal);
        let abstract_declarator = b.nonterm("abstract-declarator", true, Normal);
        let ptr_abstract_declarator = b.nonterm("ptr-abstract-declarator", true, Transparent);
        let noptr_abstract_declarator =
            b.nonterm("noptr-abstract-declarator", true, Transparent);
        let nested_abstract_declarator =
            b.nonterm("nested-abstract-declarator", true, Normal);
        let trailing_return_type = b.nonterm("trailing-return-type", cxx11, Normal);
        let ref_qualifier = b.nonterm("ref-qualifier", cxx11, Normal);
        let abstract_pack_declarator = b.nonterm("abstract-pack-declarator", cxx11, Normal);
        let noptr_abstract_pack_declarator =
            b.nonterm("noptr-abstract-pack-declarator", cxx11, Normal);
        let parameter_declaration_clause =
            b.nonterm("parameter-declaration-clause", true, Normal);
        let parameter_declaration_list =
            b.nonterm("parameter-declaration-list", true, Transparent);
        let parameter_declaration = b.nonterm("parameter-declaration", true, Normal);
        let function_definition = b.nonterm("function-definition", true, Normal);
        let function_body = b.nonterm("function-body", true, Normal);
        let initializer = b.nonterm("initializer", true, Normal);
        let brace_or_equal_initializer =
            b.nonterm("brace-or-equal-initializer", true, Normal);
        let initializer_clause = b.nonterm("initializer-clause", true, Normal);
        let initializer_list = b.nonterm("initializer-list", true, Normal);
        let braced_init_list = b.nonterm("braced-init-list", true, Normal);
        let designation = b.nonterm("designation", c99, Transparent);
        let designator_list = b.nonterm("designator-list", c99, Normal);
        let designator = b.nonterm("designator", c99, Normal);

        // A.8 Classes [gram.class]
        let class_specifier = b.nonterm("class-specifier", true, Normal);
        let class_head = b.nonterm("class-head", true, Normal);
        let class_head_name = b.nonterm("class-head-name", true, Normal);
        let class_virt_specifier = b.nonterm("class-virt-specifier", cxx11, Normal);
        let class_key = b.nonterm("class-key", true, Normal);
        let member_declaration = b.nonterm("member-declaration", true, Normal);
        let member_specification = b.nonterm("member-specification", true, Transparent);
        let member_declarator_list = b.nonterm("member-declarator-list", true, Normal);
        let member_declarator = b.nonterm("member-declarator", true, Normal);
        let virt_specifier_seq = b.nonterm("virt-specifier-seq", cxx11, Normal);
        let virt_specifier = b.nonterm("virt-specifier", cxx11, Normal);
        let pure_specifier = b.nonterm("pure-specifier", lang_cxx, Normal);

        // A.9 Derived classes [gram.derived]
        let base_clause = b.nonterm("base-clause", lang_cxx, Normal);
        let base_specifier_list = b.nonterm("base-specifier-list", lang_cxx, Transparent);
        let base_specifier = b.nonterm("base-specifier", lang_cxx, Normal);
        let class_or_decltype = b.nonterm("class-or-decltype", lang_cxx, Normal);
        let base_type_specifier = b.nonterm("base-type-specifier", lang_cxx, Normal);
        let access_specifier = b.nonterm("access-specifier", lang_cxx, Normal);

        // A.10 Special member functions [gram.special]
        let conversion_function_id = b.nonterm("conversion-function-id", lang_cxx, Normal);
        let conversion_type_id = b.nonterm("conversion-type-id", lang_cxx, Normal);
        let conversion_declarator = b.nonterm("conversion-declarator", lang_cxx, Normal);
        let ctor_initializer = b.nonterm("ctor-initializer", lang_cxx, Normal);
        let mem_initializer_list = b.nonterm("mem-initializer-list", lang_cxx, Transparent);
        let mem_initializer = b.nonterm("mem-initializer", lang_cxx, Normal);
        let mem_initializer_id = b.nonterm("mem-initializer-id", lang_cxx, Normal);
        let destructor_id = b.nonterm("destructor-id", lang_cxx, Normal);

        // A.11 Overloading [gram.over]
        let operator_function_id = b.nonterm("operator-function-id", lang_cxx, Normal);
        let overloadable_operator = b.nonterm("overloadable-operator", lang_cxx, Normal);
        let literal_operator_id = b.nonterm("literal-operator-id", cxx11, Normal);

        // A.12 Templates [gram.temp]
        let template_declaration = b.nonterm("template-declaration", lang_cxx, Normal);
        let template_parameter_list = b.nonterm("template-parameter-list", lang_cxx, Normal);
        let template_parameter = b.nonterm("template-parameter", lang_cxx, Normal);
        let type_parameter = b.nonterm("type-parameter", lang_cxx, Normal);
        let simple_template_id = b.nonterm("simple-template-id", lang_cxx, Normal);
        let template_id = b.nonterm("template-id", lang_cxx, Normal);
        let template_argument_list = b.nonterm("template-argument-list", lang_cxx, Normal);
        let template_argument = b.nonterm("template-argument", lang_cxx, Normal);
        let typename_specifier = b.nonterm("typename-specifier", lang_cxx, Normal);
        let explicit_instantiation = b.nonterm("explicit-instantiation", lang_cxx, Normal);
        let explicit_specialization = b.nonterm("explicit-specialization", lang_cxx, Normal);

        // A.13 Exception handling [gram.except]
        let try_block = b.nonterm("try-block", lang_cxx, Normal);
        let function_try_block = b.nonterm("function-try-block", lang_cxx, Normal);
        let handler_seq = b.nonterm("handler-seq", lang_cxx, Normal);
        let handler = b.nonterm("handler", lang_cxx, Normal);
        let exception_declaration = b.nonterm("exception-declaration", lang_cxx, Normal);
        let throw_expression = b.nonterm("throw-expression", lang_cxx, Normal);
        let exception_specification = b.nonterm("exception-specification", lang_cxx, Normal);
        let dynamic_exception_specification =
            b.nonterm("dynamic-exception-specification", lang_cxx, Normal);
        let type_id_list = b.nonterm("type-id-list", lang_cxx, Transparent);
        let noexcept_specification = b.nonterm("noexcept-specification", cxx11, Normal);

        /*
         * A.1 Keywords [gram.key]
         */
        b.prod(typedef_name, &[pred_nt(identifier, resolvers.is_typedef_name)]);

        b.prod(class_name, &[pred_nt(identifier, resolvers.is_class_name)]);
        b.prod_if(class_name, lang_cxx, &[nt(simple_template_id)]);

        b.prod(enum_name, &[pred_nt(identifier, resolvers.is_enum_name)]);

        b.prod(namespace_name, &[nt(original_namespace_name)]);
        b.prod(namespace_name, &[nt(namespace_alias)]);

        b.prod(
            original_namespace_name,
            &[pred_nt(identifier, resolvers.is_namespace_name)],
        );

        b.prod(
            namespace_alias,
            &[pred_nt(identifier, resolvers.is_namespace_alias_name)],
        );

        b.prod(
            template_name,
            &[pred_nt(identifier, resolvers.is_template_name)],
        );

        b.prod(
            undeclared_name,
            &[pred_nt(identifier, resolvers.is_undeclared_name)],
        );

        /*
         * A.2 Lexical conventions [gram.lex]
         * NB: most of the elements are handled by the lexer
         */
        b.prod(identifier, &[tok(Identifier)]);

        b.prod(literal, &[nt(numeric_literal)]);
        b.prod(literal, &[nt(character_literal)]);
        b.prod(literal, &[nt(string_literal)]);
        b.prod_if(literal, lang_cxx, &[nt(boolean_literal)]);
        b.prod_if(literal, cxx11, &[nt(pointer_literal)]);
        b.prod_if(literal, cxx11, &[nt(user_defined_literal)]);

        b.prod(boolean_literal, &[tok(KwFalse)]);
        b.prod(boolean_literal, &[tok(KwTrue)]);

        b.prod(pointer_literal, &[tok(KwNullptr)]);

        b.prod(user_defined_literal, &[nt(numeric_literal), nt(ud_suffix)]);
        b.prod(user_defined_literal, &[nt(character_literal), nt(ud_suffix)]);
        b.prod(user_defined_literal, &[nt(string_literal), nt(ud_suffix)]);

        b.prod(ud_suffix, &[nt(identifier)]);

        b.prod(numeric_literal, &[tok(DecIntLiteral)]);
        b.prod(numeric_literal, &[tok(HexIntLiteral)]);
        b.prod(numeric_literal, &[tok(OctIntLiteral)]);
        b.prod_if(
            numeric_literal,
            options.have(BINARY_LITERALS),
            &[tok(BinIntLiteral)],
        );
        b.prod(numeric_literal, &[tok(FloatLiteral)]);

        b.prod(character_literal, &[tok(CharLiteral)]);
        b.prod(character_literal, &[tok(WcharLiteral)]);
        b.prod_if(
            character_literal,
            options.have(UTF8_CHAR_LITERALS),
            &[tok(U8CharLiteral)],
        );
        b.prod_if(character_literal, c11 || cxx11, &[tok(U16CharLiteral)]);
        b.prod_if(character_literal, c11 || cxx11, &[tok(U32CharLiteral)]);

        b.prod(string_literal, &[tok(StrLiteral)]);
        b.prod(string_literal, &[tok(WstrLiteral)]);
        b.prod_if(string_literal, c11 || cxx11, &[tok(U8StrLiteral)]);
        b.prod_if(string_literal, c11 || cxx11, &[tok(U16StrLiteral)]);
        b.prod_if(string_literal, c11 || cxx11, &[tok(U32StrLiteral)]);

        /*
         * A.3 Basic concepts [gram.basic]
         */
        b.prod(translation_unit, &[opt(declaration_seq)]);

        /*
         * A.4 Expressions [gram.expr]
         */
        b.prod(primary_expression, &[nt(literal)]);
        b.prod(primary_expression, &[nt(paren_expression)]);
        b.prod(primary_expression, &[nt(id_expression)]);
        b.prod_if(primary_expression, lang_cxx, &[tok(KwThis)]);
        b.prod_if(primary_expression, cxx11, &[nt(lambda_expression)]);
        b.prod_if(primary_expression, c11, &[nt(generic_selection)]);

        b.prod(
            generic_selection,
            &[
                tok(KwGeneric),
                tok(LParen),
                nt(assignment_expression),
                tok(Comma),
                nt(generic_assoc_list),
                tok(RParen),
            ],
        );

        b.prod(generic_assoc_list, &[nt(generic_association)]);
        b.prod(
            generic_assoc_list,
            &[nt(generic_assoc_list), tok(Comma), nt(generic_association)],
        );

        b.prod(
            generic_association,
            &[tok(KwDefault), tok(Colon), nt(assignment_expression)],
        );
        b.prod(
            generic_association,
            &[nt(type_id), tok(Colon), nt(assignment_expression)],
        );

        b.prod(paren_expression, &[tok(LParen), nt(expression), tok(RParen)]);

        b.prod(id_expression, &[nt(unqualified_id)]);
        b.prod_if(id_expression, lang_cxx, &[nt(qualified_id)]);

        b.prod(unqualified_id, &[nt(identifier)]);
        b.prod_if(unqualified_id, lang_cxx, &[nt(operator_function_id)]); // e.g. "operator="
        b.prod_if(unqualified_id, lang_cxx, &[nt(conversion_function_id)]); // e.g. "operator int"
        b.prod_if(unqualified_id, cxx11, &[nt(literal_operator_id)]); // operator""
        b.prod_if(unqualified_id, lang_cxx, &[nt(destructor_id)]);
        b.prod_if(unqualified_id, lang_cxx, &[nt(template_id)]);

        /* the recursive tail of postfix-expression is factored into the
           named sub-rules array-subscript, function-call and member-access
           so that downstream walkers can match each shape directly */
        b.prod(postfix_expression, &[nt(primary_expression)]);
        b.prod(postfix_expression, &[nt(postfix_expression), nt(array_subscript)]);
        b.prod(postfix_expression, &[nt(postfix_expression), nt(function_call)]);
        b.prod(postfix_expression, &[nt(postfix_expression), nt(member_access)]);
        // C++ function-style type casting / object construction
        b.prod_if(
            postfix_expression,
            lang_cxx,
            &[
                nt(simple_type_specifier),
                tok(LParen),
                opt(expression_list),
                tok(RParen),
            ],
        );
        b.prod_if(
            postfix_expression,
            lang_cxx,
            &[
                nt(typename_specifier),
                tok(LParen),
                opt(expression_list),
                tok(RParen),
            ],
        );
        // C++11 uniform initialisation
        b.prod_if(
            postfix_expression,
            cxx11,
            &[nt(simple_type_specifier), nt(braced_init_list)],
        );
        b.prod_if(
            postfix_expression,
            cxx11,
            &[nt(typename_specifier), nt(braced_init_list)],
        );
        // post-increment and decrement
        b.prod(postfix_expression, &[nt(postfix_expression), tok(PlusPlus)]);
        b.prod(postfix_expression, &[nt(postfix_expression), tok(MinusMinus)]);
        // C++ dynamic_/static_/reinterpret_/const_cast<T>(x)
        for cast in [KwDynamicCast, KwStaticCast, KwReinterpretCast, KwConstCast] {
            b.prod_if(
                postfix_expression,
                lang_cxx,
                &[
                    tok(cast),
                    tok(Less),
                    nt(type_id),
                    tok(Greater),
                    tok(LParen),
                    nt(expression),
                    tok(RParen),
                ],
            );
        }
        // C++ typeid(x) and typeid(T)
        b.prod_if(
            postfix_expression,
            lang_cxx,
            &[tok(KwTypeid), tok(LParen), nt(expression), tok(RParen)],
        );
        b.prod_if(
            postfix_expression,
            lang_cxx,
            &[tok(KwTypeid), tok(LParen), nt(type_id), tok(RParen)],
        );
        // C99 compound literal
        b.prod_if(
            postfix_expression,
            c99,
            &[
                tok(LParen),
                nt(type_id),
                tok(RParen),
                tok(LBrace),
                nt(initializer_list),
                opt_tok(Comma),
                tok(RBrace),
            ],
        );

        b.prod(array_subscript, &[tok(LSquare), nt(expression), tok(RSquare)]);
        b.prod_if(
            array_subscript,
            cxx11,
            &[tok(LSquare), nt(braced_init_list), tok(RSquare)],
        );

        b.prod(
            function_call,
            &[tok(LParen), opt(expression_list), tok(RParen)],
        );

        b.prod(
            member_access,
            &[tok(Dot), opt_tok(KwTemplate), nt(id_expression)],
        );
        b.prod_if(member_access, lang_cxx, &[tok(Dot), nt(pseudo_destructor_name)]);
        b.prod(
            member_access,
            &[tok(Arrow), opt_tok(KwTemplate), nt(id_expression)],
        );
        b.prod_if(
            member_access,
            lang_cxx,
            &[tok(Arrow), nt(pseudo_destructor_name)],
        );

        b.prod(expression_list, &[nt(initializer_list)]);

        b.prod(unary_expression, &[nt(postfix_expression)]);
        // pre-increment and decrement
        b.prod(unary_expression, &[tok(PlusPlus), nt(cast_expression)]);
        b.prod(unary_expression, &[tok(MinusMinus), nt(cast_expression)]);
        b.prod(unary_expression, &[nt(unary_operator), nt(cast_expression)]);
        // sizeof(expr) and sizeof(type)
        b.prod(unary_expression, &[tok(KwSizeof), nt(unary_expression)]);
        b.prod(
            unary_expression,
            &[tok(KwSizeof), tok(LParen), nt(type_id), tok(RParen)],
        );
        // C++11 sizeof template parameter pack
        b.prod_if(
            unary_expression,
            cxx11,
            &[
                tok(KwSizeof),
                tok(Ellipsis),
                tok(LParen),
                nt(identifier),
                tok(RParen),
            ],
        );
        b.prod_if(
            unary_expression,
            c11 || cxx11,
            &[tok(KwAlignof), tok(LParen), nt(type_id), tok(RParen)],
        );
        b.prod_if(unary_expression, cxx11, &[nt(noexcept_expression)]);
        b.prod_if(unary_expression, lang_cxx, &[nt(new_expression)]);
        b.prod_if(unary_expression, lang_cxx, &[nt(delete_expression)]);

        b.prod(unary_operator, &[tok(Star)]);
        b.prod(unary_operator, &[tok(Amp)]);
        b.prod(unary_operator, &[tok(Plus)]);
        b.prod(unary_operator, &[tok(Minus)]);
        b.prod(unary_operator, &[tok(Exclaim)]);
        b.prod(unary_operator, &[tok(Tilde)]);

        b.prod(
            qualified_id,
            &[
                nt(nested_name_specifier),
                opt_tok(KwTemplate),
                nt(unqualified_id),
            ],
        );

        b.prod(nested_name_specifier, &[tok(ColonColon)]);
        b.prod(nested_name_specifier, &[nt(type_name), tok(ColonColon)]);
        b.prod(nested_name_specifier, &[nt(namespace_name), tok(ColonColon)]);
        b.prod(
            nested_name_specifier,
            &[nt(decltype_specifier), tok(ColonColon)],
        );
        b.prod(
            nested_name_specifier,
            &[nt(nested_name_specifier), nt(identifier), tok(ColonColon)],
        );
        b.prod(
            nested_name_specifier,
            &[
                nt(nested_name_specifier),
                opt_tok(KwTemplate),
                nt(simple_template_id),
                tok(ColonColon),
            ],
        );

        b.prod(
            pseudo_destructor_name,
            &[
                opt(nested_name_specifier),
                nt(type_name),
                tok(ColonColon),
                tok(Tilde),
                nt(type_name),
            ],
        );
        b.prod(
            pseudo_destructor_name,
            &[
                nt(nested_name_specifier),
                tok(KwTemplate),
                nt(simple_template_id),
                tok(ColonColon),
                tok(Tilde),
                nt(type_name),
            ],
        );
        b.prod(
            pseudo_destructor_name,
            &[opt(nested_name_specifier), tok(Tilde), nt(type_name)],
        );
        b.prod_if(
            pseudo_destructor_name,
            cxx11,
            &[tok(Tilde), nt(decltype_specifier)],
        );

        b.prod(
            new_expression,
            &[
                opt_tok(ColonColon),
                tok(KwNew),
                opt(new_placement),
                nt(new_type_id),
                opt(new_initializer),
            ],
        );
        b.prod(
            new_expression,
            &[
                opt_tok(ColonColon),
                tok(KwNew),
                opt(new_placement),
                tok(LParen),
                nt(type_id),
                tok(RParen),
                opt(new_initializer),
            ],
        );

        b.prod(new_placement, &[tok(LParen), nt(expression_list), tok(RParen)]);

        b.prod(new_type_id, &[nt(type_specifier_seq), opt(new_declarator)]);

        b.prod(new_declarator, &[nt(ptr_operator), opt(new_declarator)]);
        b.prod(new_declarator, &[nt(noptr_new_declarator)]);

        b.prod(
            noptr_new_declarator,
            &[
                tok(LSquare),
                nt(expression),
                tok(RSquare),
                opt(attribute_specifier_seq),
            ],
        );
        b.prod(
            noptr_new_declarator,
            &[
                nt(noptr_new_declarator),
                tok(LSquare),
                nt(constant_expression),
                tok(RSquare),
                opt(attribute_specifier_seq),
            ],
        );

        b.prod(
            new_initializer,
            &[tok(LParen), opt(expression_list), tok(RParen)],
        );
        b.prod(new_initializer, &[nt(braced_init_list)]);

        b.prod(
            delete_expression,
            &[opt_tok(ColonColon), tok(KwDelete), nt(cast_expression)],
        );
        b.prod(
            delete_expression,
            &[
                opt_tok(ColonColon),
                tok(KwDelete),
                tok(LSquare),
                tok(RSquare),
                nt(cast_expression),
            ],
        );

        b.prod(
            lambda_expression,
            &[
                nt(lambda_introducer),
                opt(lambda_declarator),
                nt(compound_statement),
            ],
        );

        b.prod(
            lambda_introducer,
            &[tok(LSquare), opt(lambda_capture), tok(RSquare)],
        );

        b.prod(lambda_capture, &[nt(capture_default)]);
        b.prod(lambda_capture, &[nt(capture_list)]);
        b.prod(
            lambda_capture,
            &[nt(capture_default), tok(Comma), nt(capture_list)],
        );

        b.prod(capture_default, &[tok(Amp)]);
        b.prod(capture_default, &[tok(Equal)]);

        b.prod(capture_list, &[nt(capture), opt_tok(Ellipsis)]);
        b.prod(
            capture_list,
            &[nt(capture_list), tok(Comma), nt(capture), opt_tok(Ellipsis)],
        );

        b.prod(capture, &[nt(simple_capture)]);
        b.prod(capture, &[nt(init_capture)]);

        b.prod(simple_capture, &[nt(identifier)]);
        b.prod(simple_capture, &[tok(Amp), nt(identifier)]);
        b.prod(simple_capture, &[tok(KwThis)]);

        b.prod(init_capture, &[nt(identifier), nt(initializer)]);
        b.prod(init_capture, &[tok(Amp), nt(identifier), nt(initializer)]);

        b.prod(
            lambda_declarator,
            &[
                tok(LParen),
                nt(parameter_declaration_clause),
                tok(RParen),
                opt_tok(KwMutable),
                opt(exception_specification),
                opt(attribute_specifier_seq),
                opt(trailing_return_type),
            ],
        );

        b.prod(
            noexcept_expression,
            &[tok(KwNoexcept), tok(LBrace), nt(expression), tok(RBrace)],
        );

        b.prod(cast_expression, &[nt(unary_expression)]);
        b.prod(
            cast_expression,
            &[tok(LParen), nt(type_id), tok(RParen), nt(cast_expression)],
        );

        b.prod(pm_expression, &[nt(cast_expression)]);
        b.prod_if(
            pm_expression,
            lang_cxx,
            &[nt(pm_expression), tok(DotStar), nt(cast_expression)],
        );
        b.prod_if(
            pm_expression,
            lang_cxx,
            &[nt(pm_expression), tok(ArrowStar), nt(cast_expression)],
        );

        b.prod(multiplicative_expression, &[nt(pm_expression)]);
        let multiply = b.prod(
            multiplicative_expression,
            &[nt(multiplicative_expression), tok(Star), nt(pm_expression)],
        );
        let divide = b.prod(
            multiplicative_expression,
            &[nt(multiplicative_expression), tok(Slash), nt(pm_expression)],
        );
        let modulo = b.prod(
            multiplicative_expression,
            &[nt(multiplicative_expression), tok(Percent), nt(pm_expression)],
        );

        b.prod(additive_expression, &[nt(multiplicative_expression)]);
        let binary_add = b.prod(
            additive_expression,
            &[
                nt(additive_expression),
                tok(Plus),
                nt(multiplicative_expression),
            ],
        );
        let binary_subtract = b.prod(
            additive_expression,
            &[
                nt(additive_expression),
                tok(Minus),
                nt(multiplicative_expression),
            ],
        );

        b.prod(shift_expression, &[nt(additive_expression)]);
        let left_shift = b.prod(
            shift_expression,
            &[nt(shift_expression), tok(LShift), nt(additive_expression)],
        );
        let right_shift = b.prod(
            shift_expression,
            &[nt(shift_expression), tok(RShift), nt(additive_expression)],
        );

        b.prod(relational_expression, &[nt(shift_expression)]);
        let less = b.prod(
            relational_expression,
            &[nt(relational_expression), tok(Less), nt(shift_expression)],
        );
        let greater = b.prod(
            relational_expression,
            &[nt(relational_expression), tok(Greater), nt(shift_expression)],
        );
        let less_or_equal = b.prod(
            relational_expression,
            &[
                nt(relational_expression),
                tok(LessEqual),
                nt(shift_expression),
            ],
        );
        let greater_or_equal = b.prod(
            relational_expression,
            &[
                nt(relational_expression),
                tok(GreaterEqual),
                nt(shift_expression),
            ],
        );

        b.prod(equality_expression, &[nt(relational_expression)]);
        let equal = b.prod(
            equality_expression,
            &[
                nt(equality_expression),
                tok(EqualEqual),
                nt(relational_expression),
            ],
        );
        let not_equal = b.prod(
            equality_expression,
            &[
                nt(equality_expression),
                tok(ExclaimEqual),
                nt(relational_expression),
            ],
        );

        b.prod(and_expression, &[nt(equality_expression)]);
        b.prod(
            and_expression,
            &[nt(and_expression), tok(Amp), nt(equality_expression)],
        );

        b.prod(exclusive_or_expression, &[nt(and_expression)]);
        b.prod(
            exclusive_or_expression,
            &[nt(exclusive_or_expression), tok(Caret), nt(and_expression)],
        );

        b.prod(inclusive_or_expression, &[nt(exclusive_or_expression)]);
        b.prod(
            inclusive_or_expression,
            &[
                nt(inclusive_or_expression),
                tok(Pipe),
                nt(exclusive_or_expression),
            ],
        );

        b.prod(logical_and_expression, &[nt(inclusive_or_expression)]);
        b.prod(
            logical_and_expression,
            &[
                nt(logical_and_expression),
                tok(AmpAmp),
                nt(inclusive_or_expression),
            ],
        );

        b.prod(logical_or_expression, &[nt(logical_and_expression)]);
        b.prod(
            logical_or_expression,
            &[
                nt(logical_or_expression),
                tok(PipePipe),
                nt(logical_and_expression),
            ],
        );

        b.prod(conditional_expression, &[nt(logical_or_expression)]);
        b.prod_if(
            conditional_expression,
            lang_cxx,
            &[
                nt(logical_or_expression),
                tok(Question),
                nt(expression),
                tok(Colon),
                nt(assignment_expression),
            ],
        );
        b.prod_if(
            conditional_expression,
            !lang_cxx,
            &[
                nt(logical_or_expression),
                tok(Question),
                nt(expression),
                tok(Colon),
                nt(conditional_expression),
            ],
        );

        b.prod(assignment_expression, &[nt(conditional_expression)]);
        b.prod_if(
            assignment_expression,
            lang_cxx,
            &[
                nt(logical_or_expression),
                nt(assignment_operator),
                nt(initializer_clause),
            ],
        );
        b.prod_if(assignment_expression, lang_cxx, &[nt(throw_expression)]);
        b.prod_if(
            assignment_expression,
            !lang_cxx,
            &[
                nt(unary_expression),
                nt(assignment_operator),
                nt(assignment_expression),
            ],
        );

        for op in [
            Equal,
            StarEqual,
            SlashEqual,
            PercentEqual,
            PlusEqual,
            MinusEqual,
            RShiftEqual,
            LShiftEqual,
            AmpEqual,
            CaretEqual,
            PipeEqual,
        ] {
            b.prod(assignment_operator, &[tok(op)]);
        }

        b.prod(expression, &[nt(assignment_expression)]);
        b.prod(
            expression,
            &[nt(expression), tok(Comma), nt(assignment_expression)],
        );

        b.prod(constant_expression, &[nt(conditional_expression)]);

        /*
         * A.5 Statements [gram.stmt]
         */
        b.prod(statement, &[nt(labeled_statement)]);
        b.prod(
            statement,
            &[opt(attribute_specifier_seq), nt(expression_statement)],
        );
        b.prod(
            statement,
            &[opt(attribute_specifier_seq), nt(compound_statement)],
        );
        b.prod(
            statement,
            &[opt(attribute_specifier_seq), nt(selection_statement)],
        );
        b.prod(
            statement,
            &[opt(attribute_specifier_seq), nt(iteration_statement)],
        );
        b.prod(statement, &[opt(attribute_specifier_seq), nt(jump_statement)]);
        // intermixing of declarations with statements
        b.prod_if(statement, lang_cxx || c99, &[nt(declaration_statement)]);
        b.prod_if(statement, lang_cxx, &[opt(attribute_specifier_seq), nt(try_block)]);

        b.prod(
            labeled_statement,
            &[
                opt(attribute_specifier_seq),
                nt(identifier),
                tok(Colon),
                nt(statement),
            ],
        );
        b.prod(
            labeled_statement,
            &[
                opt(attribute_specifier_seq),
                tok(KwCase),
                nt(constant_expression),
                tok(Colon),
                nt(statement),
            ],
        );
        b.prod(
            labeled_statement,
            &[
                opt(attribute_specifier_seq),
                tok(KwDefault),
                tok(Colon),
                nt(statement),
            ],
        );

        b.prod(expression_statement, &[opt(expression), tok(Semi)]);

        b.prod_if(
            compound_statement,
            lang_cxx || c99,
            &[tok(LBrace), opt(statement_seq), tok(RBrace)],
        );
        // pre-C99: declarations at top of block only
        b.prod_if(
            compound_statement,
            !lang_cxx && !c99,
            &[
                tok(LBrace),
                opt(block_declaration_seq),
                opt(statement_seq),
                tok(RBrace),
            ],
        );

        b.prod(block_declaration_seq, &[nt(block_declaration)]);
        b.prod(
            block_declaration_seq,
            &[nt(block_declaration_seq), nt(block_declaration)],
        );

        b.prod(statement_seq, &[nt(statement)]);
        b.prod(statement_seq, &[nt(statement_seq), nt(statement)]);

        b.prod(
            selection_statement,
            &[
                tok(KwIf),
                tok(LParen),
                nt(condition),
                tok(RParen),
                nt(statement),
            ],
        );
        b.prod(
            selection_statement,
            &[
                tok(KwIf),
                tok(LParen),
                nt(condition),
                tok(RParen),
                nt(statement),
                tok(KwElse),
                nt(statement),
            ],
        );
        b.prod(
            selection_statement,
            &[
                tok(KwSwitch),
                tok(LParen),
                nt(condition),
                tok(RParen),
                nt(statement),
            ],
        );

        b.prod(condition, &[nt(expression)]);
        // C++: variable decls inside if/for/while/switch condition
        b.prod_if(
            condition,
            lang_cxx && !cxx11,
            &[
                nt(decl_specifier_seq),
                nt(declarator),
                tok(Equal),
                nt(assignment_expression),
            ],
        );
        // C++11 uniform initialisation
        b.prod_if(
            condition,
            cxx11,
            &[
                opt(attribute_specifier_seq),
                nt(decl_specifier_seq),
                nt(declarator),
                tok(Equal),
                nt(initializer_clause),
            ],
        );
        b.prod_if(
            condition,
            cxx11,
            &[
                opt(attribute_specifier_seq),
                nt(decl_specifier_seq),
                nt(declarator),
                nt(braced_init_list),
            ],
        );

        // while ...
        b.prod(
            iteration_statement,
            &[
                tok(KwWhile),
                tok(LParen),
                nt(condition),
                tok(RParen),
                nt(statement),
            ],
        );
        // do ... while
        b.prod(
            iteration_statement,
            &[
                tok(KwDo),
                nt(statement),
                tok(KwWhile),
                tok(LParen),
                nt(expression),
                tok(RParen),
                tok(Semi),
            ],
        );
        // original C/C++-style for (;;)
        b.prod(
            iteration_statement,
            &[
                tok(KwFor),
                tok(LParen),
                nt(for_init_statement),
                opt(condition),
                tok(Semi),
                opt(expression),
                tok(RParen),
                nt(statement),
            ],
        );
        // C++11 range-based for
        b.prod_if(
            iteration_statement,
            cxx11,
            &[
                tok(KwFor),
                tok(LParen),
                nt(for_range_declaration),
                tok(Colon),
                nt(for_range_initializer),
                tok(RParen),
                nt(statement),
            ],
        );

        b.prod(for_init_statement, &[nt(expression_statement)]);
        // C++/C99: enable variable declarations in 'for' statements
        b.prod_if(for_init_statement, lang_cxx || c99, &[nt(simple_declaration)]);

        b.prod(
            for_range_declaration,
            &[
                opt(attribute_specifier_seq),
                nt(decl_specifier_seq),
                nt(declarator),
            ],
        );

        b.prod(for_range_initializer, &[nt(expression)]);
        b.prod(for_range_initializer, &[nt(braced_init_list)]);

        b.prod(jump_statement, &[tok(KwBreak), tok(Semi)]);
        b.prod(jump_statement, &[tok(KwContinue), tok(Semi)]);
        b.prod(jump_statement, &[tok(KwGoto), nt(identifier), tok(Semi)]);
        b.prod(jump_statement, &[tok(KwReturn), opt(expression), tok(Semi)]);
        b.prod_if(
            jump_statement,
            cxx11,
            &[tok(KwReturn), nt(braced_init_list), tok(Semi)],
        );

        b.prod(declaration_statement, &[nt(block_declaration)]);

        /*
         * A.6 Declarations [gram.dcl]
         */
        b.prod(declaration_seq, &[nt(declaration)]);
        b.prod(declaration_seq, &[nt(declaration_seq), nt(declaration)]);

        b.prod(declaration, &[nt(block_declaration)]);
        b.prod(declaration, &[nt(function_definition)]);
        b.prod(declaration, &[nt(empty_declaration)]);
        b.prod_if(declaration, lang_cxx, &[nt(template_declaration)]);
        b.prod_if(declaration, lang_cxx, &[nt(explicit_instantiation)]);
        b.prod_if(declaration, lang_cxx, &[nt(explicit_specialization)]);
        b.prod_if(declaration, lang_cxx, &[nt(linkage_specification)]);
        b.prod_if(declaration, lang_cxx, &[nt(namespace_definition)]);
        b.prod_if(declaration, cxx11, &[nt(attribute_declaration)]);

        b.prod(block_declaration, &[nt(simple_declaration)]);
        b.prod(block_declaration, &[nt(asm_definition)]);
        b.prod_if(
            block_declaration,
            c11 || cxx11,
            &[nt(static_assert_declaration)],
        );
        b.prod_if(block_declaration, lang_cxx, &[nt(namespace_alias_definition)]);
        b.prod_if(block_declaration, lang_cxx, &[nt(using_declaration)]);
        b.prod_if(block_declaration, lang_cxx, &[nt(using_directive)]);
        b.prod_if(block_declaration, cxx11, &[nt(alias_declaration)]);
        b.prod_if(block_declaration, cxx11, &[nt(opaque_enum_declaration)]);

        /* simple-declaration is split into variants with and without a
           decl-specifier-seq: the declarator-id of a constructor declaration
           is otherwise mistaken for a decl-specifier-seq */
        b.prod(
            simple_declaration,
            &[nt(decl_specifier_seq), opt(init_declarator_list), tok(Semi)],
        );
        // C++ constructors and pre-C99 implicit int functions
        b.prod_if(
            simple_declaration,
            lang_cxx || !c99,
            &[nt(init_declarator_list), tok(Semi)],
        );
        b.prod_if(
            simple_declaration,
            cxx11,
            &[
                nt(attribute_specifier_seq),
                nt(decl_specifier_seq),
                nt(init_declarator_list),
                tok(Semi),
            ],
        );
        b.prod_if(
            simple_declaration,
            cxx11,
            &[nt(attribute_specifier_seq), nt(init_declarator_list), tok(Semi)],
        );

        b.prod(
            static_assert_declaration,
            &[
                tok(KwStaticAssert),
                tok(LParen),
                nt(constant_expression),
                tok(Comma),
                nt(string_literal),
                tok(RParen),
                tok(Semi),
            ],
        );

        b.prod(empty_declaration, &[tok(Semi)]);

        b.prod(decl_specifier, &[nt(storage_class_specifier)]);
        b.prod(decl_specifier, &[nt(type_specifier)]);
        b.prod(decl_specifier, &[nt(function_specifier)]);
        b.prod(decl_specifier, &[tok(KwTypedef)]);
        b.prod_if(decl_specifier, lang_cxx, &[tok(KwFriend)]);
        b.prod_if(decl_specifier, cxx11, &[tok(KwConstexpr)]);
        // NB: alignment-specifier is parsed via attribute-specifier in C++11
        b.prod_if(decl_specifier, c11, &[nt(alignment_specifier)]);

        b.prod(
            decl_specifier_seq,
            &[nt(decl_specifier), opt(attribute_specifier_seq)],
        );
        b.prod(decl_specifier_seq, &[nt(decl_specifier), nt(decl_specifier_seq)]);

        b.prod(storage_class_specifier, &[tok(KwRegister)]);
        b.prod(storage_class_specifier, &[tok(KwStatic)]);
        b.prod(storage_class_specifier, &[tok(KwThreadLocal)]);
        b.prod(storage_class_specifier, &[tok(KwExtern)]);
        b.prod(storage_class_specifier, &[tok(KwMutable)]);
        // 'auto' has a different meaning from C++11; see simple-type-specifier
        b.prod_if(storage_class_specifier, lang_c && !cxx11, &[tok(KwAuto)]);

        b.prod_if(
            function_specifier,
            options.have(INLINE_FUNCTIONS),
            &[tok(KwInline)],
        );
        b.prod_if(function_specifier, lang_cxx, &[tok(KwVirtual)]);
        b.prod_if(function_specifier, lang_cxx, &[tok(KwExplicit)]);
        b.prod_if(function_specifier, c11, &[tok(KwNoreturn)]);

        // typedef-name: see section A.1 Keywords [gram.key]

        b.prod(type_specifier, &[nt(trailing_type_specifier)]);
        b.prod(type_specifier, &[nt(class_specifier)]);
        b.prod(type_specifier, &[nt(enum_specifier)]);

        b.prod(trailing_type_specifier, &[nt(simple_type_specifier)]);
        b.prod(trailing_type_specifier, &[nt(elaborated_type_specifier)]);
        b.prod(trailing_type_specifier, &[nt(type_qualifier)]);
        b.prod_if(trailing_type_specifier, cxx11, &[nt(typename_specifier)]);
        b.prod_if(trailing_type_specifier, c11, &[nt(atomic_type_specifier)]);

        b.prod(
            type_specifier_seq,
            &[nt(type_specifier), opt(attribute_specifier_seq)],
        );
        b.prod(type_specifier_seq, &[nt(type_specifier), nt(type_specifier_seq)]);

        b.prod(
            trailing_type_specifier_seq,
            &[nt(trailing_type_specifier), opt(attribute_specifier_seq)],
        );
        b.prod(
            trailing_type_specifier_seq,
            &[nt(trailing_type_specifier), nt(trailing_type_specifier_seq)],
        );

        // user-defined type specifiers are factored into ud-type-specifier
        b.prod_if(simple_type_specifier, lang_cxx, &[nt(ud_type_specifier)]);
        b.prod_if(simple_type_specifier, !lang_cxx, &[nt(typedef_name)]);
        b.prod_if(simple_type_specifier, !lang_cxx, &[nt(undeclared_name)]);
        b.prod(simple_type_specifier, &[tok(KwChar)]);
        b.prod(simple_type_specifier, &[tok(KwWcharT)]);
        b.prod_if(simple_type_specifier, c11 || cxx11, &[tok(KwChar16T)]);
        b.prod_if(simple_type_specifier, c11 || cxx11, &[tok(KwChar32T)]);
        b.prod(simple_type_specifier, &[tok(KwSigned)]);
        b.prod(simple_type_specifier, &[tok(KwUnsigned)]);
        b.prod(simple_type_specifier, &[tok(KwFloat)]);
        b.prod(simple_type_specifier, &[tok(KwDouble)]);
        b.prod(simple_type_specifier, &[tok(KwVoid)]);
        b.prod(simple_type_specifier, &[tok(KwShort)]);
        b.prod(simple_type_specifier, &[tok(KwInt)]);
        b.prod(simple_type_specifier, &[tok(KwLong)]);
        // parse "long long" separately
        b.prod_if(
            simple_type_specifier,
            options.have(LONG_LONG),
            &[tok(KwLong), tok(KwLong)],
        );
        b.prod_if(simple_type_specifier, lang_cxx || c99, &[tok(KwBool)]);
        b.prod_if(simple_type_specifier, cxx11, &[tok(KwAuto)]);
        b.prod_if(simple_type_specifier, cxx11, &[nt(decltype_specifier)]);
        b.prod_if(simple_type_specifier, c99, &[tok(KwComplex)]);

        b.prod(ud_type_specifier, &[opt(nested_name_specifier), nt(type_name)]);
        b.prod(
            ud_type_specifier,
            &[
                nt(nested_name_specifier),
                tok(KwTemplate),
                nt(simple_template_id),
            ],
        );

        b.prod(type_name, &[nt(class_name)]); // C: see type-id
        b.prod(type_name, &[nt(enum_name)]);
        b.prod(type_name, &[nt(typedef_name)]);
        b.prod(type_name, &[nt(undeclared_name)]);
        b.prod(type_name, &[nt(simple_template_id)]);

        b.prod(
            elaborated_type_specifier,
            &[
                nt(class_key),
                opt(attribute_specifier_seq),
                opt(nested_name_specifier),
                nt(identifier),
            ],
        );
        b.prod_if(
            elaborated_type_specifier,
            lang_cxx,
            &[
                nt(class_key),
                opt(nested_name_specifier),
                tok(KwTemplate),
                nt(simple_template_id),
            ],
        );
        b.prod(
            elaborated_type_specifier,
            &[tok(KwEnum), opt(nested_name_specifier), nt(identifier)],
        );

        b.prod(
            atomic_type_specifier,
            &[tok(KwAtomic), tok(LParen), nt(type_id), tok(RParen)],
        );

        // enum-name: see section A.1 Keywords [gram.key]

        b.prod(
            enum_specifier,
            &[nt(enum_head), tok(LBrace), opt(enumerator_list), tok(RBrace)],
        );
        b.prod(
            enum_specifier,
            &[
                nt(enum_head),
                tok(LBrace),
                nt(enumerator_list),
                tok(Comma),
                tok(RBrace),
            ],
        );
        b.prod_if(enum_specifier, lang_c, &[nt(enum_head)]);

        b.prod(
            enum_head,
            &[
                nt(enum_key),
                opt(attribute_specifier_seq),
                opt(identifier),
                opt(enum_base),
            ],
        );
        b.prod_if(
            enum_head,
            lang_cxx,
            &[
                nt(enum_key),
                opt(attribute_specifier_seq),
                nt(nested_name_specifier),
                nt(identifier),
                opt(enum_base),
            ],
        );

        b.prod(enum_key, &[tok(KwEnum)]);
        // C++11 scoped enums
        b.prod_if(enum_key, cxx11, &[tok(KwEnum), tok(KwClass)]);
        b.prod_if(enum_key, cxx11, &[tok(KwEnum), tok(KwStruct)]);

        b.prod(enumerator_list, &[nt(enumerator_definition)]);
        b.prod(
            enumerator_list,
            &[nt(enumerator_list), tok(Comma), nt(enumerator_definition)],
        );

        b.prod(enumerator_definition, &[nt(enumerator)]);
        b.prod(
            enumerator_definition,
            &[nt(enumerator), tok(Equal), nt(constant_expression)],
        );

        b.prod(enumerator, &[nt(identifier)]);

        // namespace-name, original-namespace-name: see section A.1

        b.prod(namespace_definition, &[nt(named_namespace_definition)]);
        b.prod(namespace_definition, &[nt(unnamed_namespace_definition)]);

        b.prod(
            named_namespace_definition,
            &[nt(original_namespace_definition)],
        );
        b.prod(
            named_namespace_definition,
            &[nt(extension_namespace_definition)],
        );

        b.prod(
            original_namespace_definition,
            &[
                opt_tok(KwInline),
                tok(KwNamespace),
                nt(undeclared_name),
                tok(LBrace),
                nt(namespace_body),
                tok(RBrace),
            ],
        );

        b.prod(
            extension_namespace_definition,
            &[
                opt_tok(KwInline),
                tok(KwNamespace),
                nt(original_namespace_name),
                tok(LBrace),
                nt(namespace_body),
                tok(RBrace),
            ],
        );

        b.prod(
            unnamed_namespace_definition,
            &[
                opt_tok(KwInline),
                tok(KwNamespace),
                tok(LBrace),
                nt(namespace_body),
                tok(RBrace),
            ],
        );

        b.prod(namespace_body, &[opt(declaration_seq)]);

        // namespace-alias: see section A.1 Keywords [gram.key]

        b.prod(
            namespace_alias_definition,
            &[
                tok(KwNamespace),
                nt(identifier),
                tok(Equal),
                nt(qualified_namespace_specifier),
                tok(Semi),
            ],
        );

        b.prod(
            qualified_namespace_specifier,
            &[opt(nested_name_specifier), nt(namespace_name)],
        );
        b.prod(
            qualified_namespace_specifier,
            &[opt(nested_name_specifier), nt(undeclared_name)],
        );

        b.prod(
            using_declaration,
            &[
                tok(KwUsing),
                opt_tok(KwTypename),
                nt(nested_name_specifier),
                nt(unqualified_id),
                tok(Semi),
            ],
        );
        b.prod(
            using_declaration,
            &[tok(KwUsing), tok(ColonColon), nt(unqualified_id), tok(Semi)],
        );

        b.prod(
            using_directive,
            &[
                opt(attribute_specifier_seq),
                tok(KwUsing),
                tok(KwNamespace),
                opt(nested_name_specifier),
                nt(namespace_name),
                tok(Semi),
            ],
        );
        b.prod(
            using_directive,
            &[
                opt(attribute_specifier_seq),
                tok(KwUsing),
                tok(KwNamespace),
                opt(nested_name_specifier),
                nt(undeclared_name),
                tok(Semi),
            ],
        );

        b.prod(
            linkage_specification,
            &[
                tok(KwExtern),
                nt(string_literal),
                tok(LBrace),
                opt(declaration_seq),
                tok(RBrace),
            ],
        );
        b.prod(
            linkage_specification,
            &[tok(KwExtern), nt(string_literal), nt(declaration)],
        );

        b.prod(
            asm_definition,
            &[
                tok(KwAsm),
                tok(LParen),
                nt(string_literal),
                tok(RParen),
                tok(Semi),
            ],
        );

        b.prod(
            alignment_specifier,
            &[
                tok(KwAlignas),
                tok(LParen),
                nt(type_id),
                opt_tok(Ellipsis),
                tok(RParen),
            ],
        );
        b.prod(
            alignment_specifier,
            &[
                tok(KwAlignas),
                tok(LParen),
                nt(assignment_expression),
                opt_tok(Ellipsis),
                tok(RParen),
            ],
        );

        b.prod(
            decltype_specifier,
            &[tok(KwDecltype), tok(LParen), nt(expression), tok(RParen)],
        );
        b.prod(
            decltype_specifier,
            &[tok(KwDecltype), tok(LParen), tok(KwAuto), tok(RParen)],
        );

        b.prod(
            opaque_enum_declaration,
            &[
                nt(enum_key),
                opt(attribute_specifier_seq),
                nt(identifier),
                opt(enum_base),
                tok(Semi),
            ],
        );

        b.prod(enum_base, &[tok(Colon), nt(type_specifier_seq)]);

        b.prod(
            alias_declaration,
            &[
                tok(KwUsing),
                nt(identifier),
                opt(attribute_specifier_seq),
                tok(Equal),
                nt(type_id),
                tok(Semi),
            ],
        );

        b.prod(
            attribute_declaration,
            &[nt(attribute_specifier_seq), tok(Semi)],
        );

        b.prod(
            attribute_specifier_seq,
            &[nt(attribute_specifier_seq), nt(attribute_specifier)],
        );
        b.prod(attribute_specifier_seq, &[nt(attribute_specifier)]);

        b.prod(
            attribute_specifier,
            &[
                tok(LSquare),
                tok(LSquare),
                nt(attribute_list),
                tok(RSquare),
                tok(RSquare),
            ],
        );
        b.prod(attribute_specifier, &[nt(alignment_specifier)]);

        b.prod(attribute_list, &[opt(attribute)]);
        b.prod(
            attribute_list,
            &[nt(attribute_list), tok(Comma), opt(attribute)],
        );
        b.prod(attribute_list, &[nt(attribute), tok(Ellipsis)]);
        b.prod(
            attribute_list,
            &[nt(attribute_list), tok(Comma), nt(attribute), tok(Ellipsis)],
        );

        b.prod(attribute, &[nt(attribute_token), opt(attribute_argument_clause)]);

        b.prod(attribute_token, &[nt(identifier)]);
        b.prod(attribute_token, &[nt(attribute_scoped_token)]);

        b.prod(
            attribute_scoped_token,
            &[nt(attribute_namespace), tok(ColonColon), nt(identifier)],
        );

        b.prod(attribute_namespace, &[nt(identifier)]);

        b.prod(
            attribute_argument_clause,
            &[tok(LParen), nt(balanced_token_seq), tok(RParen)],
        );

        b.prod(balanced_token_seq, &[opt(balanced_token)]);
        b.prod(balanced_token_seq, &[nt(balanced_token_seq), nt(balanced_token)]);

        b.prod(
            balanced_token,
            &[tok(LParen), nt(balanced_token_seq), tok(RParen)],
        );
        b.prod(
            balanced_token,
            &[tok(LSquare), nt(balanced_token_seq), tok(RSquare)],
        );
        b.prod(
            balanced_token,
            &[tok(LBrace), nt(balanced_token_seq), tok(RBrace)],
        );
        b.prod(balanced_token, &[any_tok(is_balanced_token)]);

        /*
         * A.7 Declarators [gram.decl]
         */
        b.prod(init_declarator_list, &[nt(init_declarator)]);
        b.prod(
            init_declarator_list,
            &[nt(init_declarator_list), tok(Comma), nt(init_declarator)],
        );

        b.prod(init_declarator, &[nt(declarator), opt(initializer)]);

        b.prod(declarator, &[nt(ptr_declarator)]);
        /* deviation from the published C++11 grammar:
           parameters-and-qualifiers is only parsed via noptr-declarator, and
           the trailing-return variant is accepted only when a parameter list
           has already been seen */
        b.prod_if(
            declarator,
            cxx11,
            &[
                nt(noptr_declarator),
                pred_nt(trailing_return_type, is_function),
            ],
        );

        b.prod(ptr_declarator, &[nt(noptr_declarator)]);
        b.prod(ptr_declarator, &[nt(ptr_operator), nt(ptr_declarator)]);

        b.prod(
            noptr_declarator,
            &[nt(declarator_id), opt(attribute_specifier_seq)],
        );
        b.prod(
            noptr_declarator,
            &[nt(noptr_declarator), nt(parameters_and_qualifiers)],
        );
        b.prod(noptr_declarator, &[nt(noptr_declarator), nt(array_declarator)]);
        b.prod(noptr_declarator, &[nt(nested_declarator)]);

        b.prod(
            nested_declarator,
            &[tok(LParen), nt(ptr_declarator), tok(RParen)],
        );

        b.prod_if(
            array_declarator,
            !c99,
            &[
                tok(LSquare),
                opt(constant_expression),
                tok(RSquare),
                opt(attribute_specifier_seq),
            ],
        );
        b.prod_if(
            array_declarator,
            c99,
            &[
                tok(LSquare),
                opt(type_qualifier_seq),
                opt(assignment_expression),
                tok(RSquare),
                opt(attribute_specifier_seq),
            ],
        );
        b.prod_if(
            array_declarator,
            c99,
            &[
                tok(LSquare),
                tok(KwStatic),
                opt(type_qualifier_seq),
                nt(assignment_expression),
                tok(RSquare),
                opt(attribute_specifier_seq),
            ],
        );
        b.prod_if(
            array_declarator,
            c99,
            &[
                tok(LSquare),
                nt(type_qualifier_seq),
                tok(KwStatic),
                nt(assignment_expression),
                tok(RSquare),
                opt(attribute_specifier_seq),
            ],
        );
        b.prod_if(
            array_declarator,
            c99,
            &[
                tok(LSquare),
                opt(type_qualifier_seq),
                tok(Star),
                tok(RSquare),
                opt(attribute_specifier_seq),
            ],
        );

        b.prod_if(
            parameters_and_qualifiers,
            lang_cxx,
            &[
                tok(LParen),
                nt(parameter_declaration_clause),
                tok(RParen),
                opt(type_qualifier_seq),
                opt(ref_qualifier),
                opt(exception_specification),
                opt(attribute_specifier_seq),
            ],
        );
        b.prod_if(
            parameters_and_qualifiers,
            !lang_cxx,
            &[tok(LParen), nt(parameter_declaration_clause), tok(RParen)],
        );

        b.prod(
            ptr_operator,
            &[
                tok(Star),
                opt(attribute_specifier_seq),
                opt(type_qualifier_seq),
            ],
        );
        // C++ lvalue reference
        b.prod_if(
            ptr_operator,
            lang_cxx,
            &[tok(Amp), opt(attribute_specifier_seq)],
        );
        // C++11 rvalue reference
        b.prod_if(
            ptr_operator,
            cxx11,
            &[tok(AmpAmp), opt(attribute_specifier_seq)],
        );
        // C++ pointer-to-member
        b.prod_if(
            ptr_operator,
            lang_cxx,
            &[
                nt(nested_name_specifier),
                tok(Star),
                opt(attribute_specifier_seq),
                opt(type_qualifier_seq),
            ],
        );

        // C++: cv-qualifier-seq
        b.prod(type_qualifier_seq, &[nt(type_qualifier), opt(type_qualifier_seq)]);

        // C++: cv-qualifier
        b.prod(type_qualifier, &[tok(KwConst)]);
        b.prod(type_qualifier, &[tok(KwVolatile)]);
        b.prod_if(type_qualifier, c99, &[tok(KwRestrict)]);
        b.prod_if(type_qualifier, c11, &[tok(KwAtomic)]);

        b.prod(declarator_id, &[opt_tok(Ellipsis), nt(id_expression)]);

        b.prod(type_id, &[nt(type_specifier_seq), opt(abstract_declarator)]);

        b.prod(abstract_declarator, &[nt(ptr_abstract_declarator)]);
        /* deviation from the published C++11 grammar: split into two rules,
           the first parsing parameters-and-qualifiers via
           noptr-abstract-declarator */
        b.prod_if(
            abstract_declarator,
            cxx11,
            &[
                nt(noptr_abstract_declarator),
                pred_nt(trailing_return_type, is_function),
            ],
        );
        b.prod_if(
            abstract_declarator,
            cxx11,
            &[nt(parameters_and_qualifiers), nt(trailing_return_type)],
        );
        b.prod_if(abstract_declarator, cxx11, &[nt(abstract_pack_declarator)]);

        b.prod(ptr_abstract_declarator, &[nt(noptr_abstract_declarator)]);
        b.prod(
            ptr_abstract_declarator,
            &[nt(ptr_operator), opt(ptr_abstract_declarator)],
        );

        b.prod(
            noptr_abstract_declarator,
            &[
                opt(noptr_abstract_declarator),
                nt(parameters_and_qualifiers),
            ],
        );
        b.prod(
            noptr_abstract_declarator,
            &[opt(noptr_abstract_declarator), nt(array_declarator)],
        );
        b.prod(noptr_abstract_declarator, &[nt(nested_abstract_declarator)]);

        b.prod(
            nested_abstract_declarator,
            &[tok(LParen), nt(ptr_abstract_declarator), tok(RParen)],
        );

        b.prod(
            trailing_return_type,
            &[
                tok(Arrow),
                nt(trailing_type_specifier_seq),
                opt(abstract_declarator),
            ],
        );

        b.prod(ref_qualifier, &[tok(Amp)]);
        b.prod(ref_qualifier, &[tok(AmpAmp)]);

        b.prod(
            abstract_pack_declarator,
            &[nt(noptr_abstract_pack_declarator)],
        );
        b.prod(
            abstract_pack_declarator,
            &[nt(ptr_operator), nt(abstract_pack_declarator)],
        );

        b.prod(
            noptr_abstract_pack_declarator,
            &[
                nt(noptr_abstract_pack_declarator),
                nt(parameters_and_qualifiers),
            ],
        );
        b.prod(
            noptr_abstract_pack_declarator,
            &[nt(noptr_abstract_pack_declarator), nt(array_declarator)],
        );
        b.prod(noptr_abstract_pack_declarator, &[tok(Ellipsis)]);

        b.prod(
            parameter_declaration_clause,
            &[opt(parameter_declaration_list), opt_tok(Ellipsis)],
        );
        b.prod(
            parameter_declaration_clause,
            &[nt(parameter_declaration_list), tok(Comma), tok(Ellipsis)],
        );

        b.prod(parameter_declaration_list, &[nt(parameter_declaration)]);
        b.prod(
            parameter_declaration_list,
            &[
                nt(parameter_declaration_list),
                tok(Comma),
                nt(parameter_declaration),
            ],
        );

        b.prod(
            parameter_declaration,
            &[
                opt(attribute_specifier_seq),
                nt(decl_specifier_seq),
                nt(declarator),
            ],
        );
        // parameter with default value
        b.prod_if(
            parameter_declaration,
            lang_cxx,
            &[
                opt(attribute_specifier_seq),
                nt(decl_specifier_seq),
                nt(declarator),
                tok(Equal),
                nt(initializer_clause),
            ],
        );
        b.prod(
            parameter_declaration,
            &[
                opt(attribute_specifier_seq),
                nt(decl_specifier_seq),
                opt(abstract_declarator),
            ],
        );
        b.prod_if(
            parameter_declaration,
            lang_cxx,
            &[
                opt(attribute_specifier_seq),
                nt(decl_specifier_seq),
                opt(abstract_declarator),
                tok(Equal),
                nt(initializer_clause),
            ],
        );

        /* deviation from the published C++11 grammar: split into two rules,
           making decl-specifier-seq mandatory in the first (the
           declarator-id of a constructor declaration is otherwise mistaken
           for a decl-specifier-seq) */
        b.prod(
            function_definition,
            &[
                opt(attribute_specifier_seq),
                nt(decl_specifier_seq),
                nt(declarator),
                opt(virt_specifier_seq),
                nt(function_body),
            ],
        );
        b.prod(
            function_definition,
            &[
                opt(attribute_specifier_seq),
                nt(declarator),
                opt(virt_specifier_seq),
                nt(function_body),
            ],
        );

        b.prod(function_body, &[opt(ctor_initializer), nt(compound_statement)]);
        b.prod_if(function_body, lang_cxx, &[nt(function_try_block)]);
        // C++11 defaulted/deleted functions
        b.prod_if(function_body, cxx11, &[tok(Equal), tok(KwDefault), tok(Semi)]);
        b.prod_if(function_body, cxx11, &[tok(Equal), tok(KwDelete), tok(Semi)]);

        // C: see initializer-clause
        b.prod(initializer, &[nt(brace_or_equal_initializer)]);
        b.prod_if(
            initializer,
            lang_cxx,
            &[tok(LParen), nt(expression_list), tok(RParen)],
        );

        b.prod(brace_or_equal_initializer, &[tok(Equal), nt(initializer_clause)]);
        // uniform initialisation
        b.prod_if(brace_or_equal_initializer, cxx11, &[nt(braced_init_list)]);

        b.prod(initializer_clause, &[nt(assignment_expression)]);
        b.prod(initializer_clause, &[nt(braced_init_list)]);

        b.prod(
            initializer_list,
            &[opt(designation), nt(initializer_clause), opt_tok(Ellipsis)],
        );
        b.prod(
            initializer_list,
            &[
                nt(initializer_list),
                tok(Comma),
                opt(designation),
                nt(initializer_clause),
                opt_tok(Ellipsis),
            ],
        );

        b.prod(
            braced_init_list,
            &[tok(LBrace), nt(initializer_list), opt_tok(Comma), tok(RBrace)],
        );
        b.prod(braced_init_list, &[tok(LBrace), tok(RBrace)]);

        // C99 designated initializers
        b.prod(designation, &[nt(designator_list), tok(Equal)]);

        b.prod(designator_list, &[nt(designator)]);
        b.prod(designator_list, &[nt(designator_list), nt(designator)]);

        b.prod(
            designator,
            &[tok(LSquare), nt(constant_expression), tok(RSquare)],
        );
        b.prod(designator, &[tok(Dot), nt(identifier)]);

        /*
         * A.8 Classes [gram.class]
         */
        // class-name: see section A.1 Keywords [gram.key]

        // = struct-or-union-specifier in the C grammar
        b.prod(
            class_specifier,
            &[
                nt(class_head),
                tok(LBrace),
                opt(member_specification),
                tok(RBrace),
            ],
        );

        b.prod(
            class_head,
            &[
                nt(class_key),
                opt(attribute_specifier_seq),
                nt(class_head_name),
                opt(class_virt_specifier),
                opt(base_clause),
            ],
        );
        b.prod(
            class_head,
            &[nt(class_key), opt(attribute_specifier_seq), opt(base_clause)],
        );

        b.prod(class_head_name, &[opt(nested_name_specifier), nt(class_name)]);
        b.prod(
            class_head_name,
            &[opt(nested_name_specifier), nt(undeclared_name)],
        );
        b.prod(
            class_head_name,
            &[opt(nested_name_specifier), nt(simple_template_id)],
        );

        b.prod(
            class_virt_specifier,
            &[pred_tok(Identifier, is_final_specifier)],
        );

        b.prod(class_key, &[tok(KwStruct)]);
        b.prod(class_key, &[tok(KwUnion)]);
        b.prod_if(class_key, lang_cxx, &[tok(KwClass)]);

        b.prod_if(
            member_declaration,
            !lang_cxx,
            &[nt(decl_specifier_seq), opt(member_declarator_list), tok(Semi)],
        );
        /* deviation from the published C++11 grammar: split into variants
           with and without decl-specifier-seq (constructor declarator-ids
           are otherwise mistaken for a decl-specifier-seq) */
        b.prod_if(
            member_declaration,
            lang_cxx,
            &[
                opt(attribute_specifier_seq),
                nt(decl_specifier_seq),
                opt(member_declarator_list),
                tok(Semi),
            ],
        );
        b.prod_if(
            member_declaration,
            lang_cxx,
            &[
                opt(attribute_specifier_seq),
                opt(member_declarator_list),
                tok(Semi),
            ],
        );
        b.prod_if(
            member_declaration,
            lang_cxx,
            &[nt(function_definition), opt_tok(Semi)],
        );
        b.prod_if(member_declaration, lang_cxx, &[nt(using_declaration)]);
        b.prod_if(member_declaration, lang_cxx, &[nt(template_declaration)]);
        b.prod_if(member_declaration, lang_cxx, &[nt(alias_declaration)]);
        b.prod_if(
            member_declaration,
            c11 || cxx11,
            &[nt(static_assert_declaration)],
        );

        // = struct-declaration-list in the C grammar
        b.prod(
            member_specification,
            &[nt(member_declaration), opt(member_specification)],
        );
        b.prod_if(
            member_specification,
            lang_cxx,
            &[nt(access_specifier), tok(Colon), opt(member_specification)],
        );

        b.prod(member_declarator_list, &[nt(member_declarator)]);
        b.prod(
            member_declarator_list,
            &[nt(member_declarator_list), tok(Comma), nt(member_declarator)],
        );

        b.prod(
            member_declarator,
            &[nt(declarator), opt(virt_specifier_seq), opt(pure_specifier)],
        );
        // member with default value
        b.prod_if(
            member_declarator,
            cxx11,
            &[nt(declarator), opt(brace_or_equal_initializer)],
        );
        // C++ bitfield
        b.prod_if(
            member_declarator,
            lang_cxx,
            &[
                opt(identifier),
                opt(attribute_specifier_seq),
                tok(Colon),
                nt(constant_expression),
            ],
        );
        // C bitfield
        b.prod_if(
            member_declarator,
            !lang_cxx,
            &[opt(declarator), tok(Colon), nt(constant_expression)],
        );

        b.prod(virt_specifier_seq, &[nt(virt_specifier)]);
        b.prod(virt_specifier_seq, &[nt(virt_specifier_seq), nt(virt_specifier)]);

        b.prod(
            virt_specifier,
            &[pred_tok(Identifier, is_override_specifier)],
        );
        b.prod(virt_specifier, &[pred_tok(Identifier, is_final_specifier)]);

        b.prod(
            pure_specifier,
            &[tok(Equal), pred_tok(DecIntLiteral, is_pure_zero)],
        );

        /*
         * A.9 Derived classes [gram.derived]
         */
        b.prod(base_clause, &[tok(Colon), nt(base_specifier_list)]);

        b.prod(base_specifier_list, &[nt(base_specifier), opt_tok(Ellipsis)]);
        b.prod(
            base_specifier_list,
            &[
                nt(base_specifier_list),
                tok(Comma),
                nt(base_specifier),
                opt_tok(Ellipsis),
            ],
        );

        b.prod(
            base_specifier,
            &[opt(attribute_specifier_seq), nt(base_type_specifier)],
        );
        b.prod(
            base_specifier,
            &[
                opt(attribute_specifier_seq),
                tok(KwVirtual),
                opt(access_specifier),
                nt(base_type_specifier),
            ],
        );
        b.prod(
            base_specifier,
            &[
                opt(attribute_specifier_seq),
                nt(access_specifier),
                opt_tok(KwVirtual),
                nt(base_type_specifier),
            ],
        );

        b.prod(class_or_decltype, &[opt(nested_name_specifier), nt(class_name)]);
        b.prod(
            class_or_decltype,
            &[opt(nested_name_specifier), nt(undeclared_name)],
        );
        b.prod_if(class_or_decltype, cxx11, &[nt(decltype_specifier)]);

        b.prod(base_type_specifier, &[nt(class_or_decltype)]);

        b.prod(access_specifier, &[tok(KwPrivate)]);
        b.prod(access_specifier, &[tok(KwProtected)]);
        b.prod(access_specifier, &[tok(KwPublic)]);

        /*
         * A.10 Special member functions [gram.special]
         */
        b.prod(conversion_function_id, &[tok(KwOperator), nt(conversion_type_id)]);

        b.prod(
            conversion_type_id,
            &[nt(type_specifier_seq), opt(conversion_declarator)],
        );

        b.prod(
            conversion_declarator,
            &[nt(ptr_operator), opt(conversion_declarator)],
        );

        b.prod(ctor_initializer, &[tok(Colon), nt(mem_initializer_list)]);

        b.prod(mem_initializer_list, &[nt(mem_initializer), opt_tok(Ellipsis)]);
        b.prod(
            mem_initializer_list,
            &[
                nt(mem_initializer),
                opt_tok(Ellipsis),
                tok(Comma),
                nt(mem_initializer_list),
            ],
        );

        b.prod(
            mem_initializer,
            &[
                nt(mem_initializer_id),
                tok(LParen),
                opt(expression_list),
                tok(RParen),
            ],
        );
        b.prod_if(
            mem_initializer,
            cxx11,
            &[nt(mem_initializer_id), nt(braced_init_list)],
        );

        b.prod(mem_initializer_id, &[nt(class_or_decltype)]);
        b.prod(mem_initializer_id, &[nt(identifier)]);

        b.prod(destructor_id, &[tok(Tilde), nt(class_name)]);
        b.prod(destructor_id, &[tok(Tilde), nt(undeclared_name)]);
        b.prod_if(destructor_id, cxx11, &[tok(Tilde), nt(decltype_specifier)]);

        /*
         * A.11 Overloading [gram.over]
         */
        b.prod(operator_function_id, &[tok(KwOperator), nt(overloadable_operator)]);

        b.prod(overloadable_operator, &[tok(KwNew)]);
        b.prod(overloadable_operator, &[tok(KwDelete)]);
        b.prod(
            overloadable_operator,
            &[tok(KwNew), tok(LSquare), tok(RSquare)],
        );
        b.prod(
            overloadable_operator,
            &[tok(KwDelete), tok(LSquare), tok(RSquare)],
        );
        for op in [
            Plus, Minus, Star, Slash, Percent, Caret, Amp, Pipe, Tilde, Exclaim, Equal, Less,
            Greater, PlusEqual, MinusEqual, StarEqual, SlashEqual, PercentEqual, CaretEqual,
            AmpEqual, PipeEqual, LShift, RShift, LShiftEqual, RShiftEqual, EqualEqual,
            ExclaimEqual, LessEqual, GreaterEqual, AmpAmp, PipePipe, PlusPlus, MinusMinus, Comma,
            ArrowStar, Arrow,
        ] {
            b.prod(overloadable_operator, &[tok(op)]);
        }
        b.prod(overloadable_operator, &[tok(LParen), tok(RParen)]);
        b.prod(overloadable_operator, &[tok(LSquare), tok(RSquare)]);

        b.prod(
            literal_operator_id,
            &[tok(KwOperator), nt(string_literal), nt(identifier)],
        );

        /*
         * A.12 Templates [gram.temp]
         */
        b.prod_if(
            template_declaration,
            !cxx11,
            &[
                opt_tok(KwExport),
                tok(KwTemplate),
                tok(Less),
                nt(template_parameter_list),
                tok(Greater),
                nt(declaration),
            ],
        );
        b.prod_if(
            template_declaration,
            cxx11,
            &[
                tok(KwTemplate),
                tok(Less),
                nt(template_parameter_list),
                pred_tok(Greater, process_template_close_token),
                nt(declaration),
            ],
        );

        b.prod(template_parameter_list, &[nt(template_parameter)]);
        b.prod(
            template_parameter_list,
            &[
                nt(template_parameter_list),
                tok(Comma),
                nt(template_parameter),
            ],
        );

        b.prod(template_parameter, &[nt(type_parameter)]); // template type/template parameter
        b.prod(template_parameter, &[nt(parameter_declaration)]); // non-type template parameter

        // template type parameters
        b.prod(
            type_parameter,
            &[tok(KwClass), opt_tok(Ellipsis), opt(identifier)],
        );
        b.prod(
            type_parameter,
            &[tok(KwClass), opt(identifier), tok(Equal), nt(type_id)],
        );
        b.prod(
            type_parameter,
            &[tok(KwTypename), opt_tok(Ellipsis), opt(identifier)],
        );
        b.prod(
            type_parameter,
            &[tok(KwTypename), opt(identifier), tok(Equal), nt(type_id)],
        );
        // template template parameters
        b.prod(
            type_parameter,
            &[
                tok(KwTemplate),
                tok(Less),
                nt(template_parameter_list),
                pred_tok(Greater, process_template_close_token),
                tok(KwClass),
                opt_tok(Ellipsis),
                opt(identifier),
            ],
        );
        b.prod(
            type_parameter,
            &[
                tok(KwTemplate),
                tok(Less),
                nt(template_parameter_list),
                pred_tok(Greater, process_template_close_token),
                tok(KwClass),
                opt(identifier),
                tok(Equal),
                nt(id_expression),
            ],
        );

        b.prod(
            simple_template_id,
            &[
                nt(template_name),
                tok(Less),
                opt(template_argument_list),
                pred_tok(Greater, process_template_close_token),
            ],
        );
        b.prod(
            simple_template_id,
            &[
                nt(undeclared_name),
                tok(Less),
                opt(template_argument_list),
                pred_tok(Greater, process_template_close_token),
            ],
        );

        b.prod(template_id, &[nt(simple_template_id)]);
        b.prod(
            template_id,
            &[
                nt(operator_function_id),
                tok(Less),
                opt(template_argument_list),
                pred_tok(Greater, process_template_close_token),
            ],
        );
        b.prod_if(
            template_id,
            cxx11,
            &[
                nt(literal_operator_id),
                tok(Less),
                opt(template_argument_list),
                pred_tok(Greater, process_template_close_token),
            ],
        );

        // template-name: see section A.1 Keywords [gram.key]

        b.prod(template_argument_list, &[nt(template_argument), opt_tok(Ellipsis)]);
        b.prod(
            template_argument_list,
            &[
                nt(template_argument_list),
                tok(Comma),
                nt(template_argument),
                opt_tok(Ellipsis),
            ],
        );

        b.prod(template_argument, &[nt(type_id)]);
        b.prod(template_argument, &[nt(constant_expression)]);
        b.prod(template_argument, &[nt(id_expression)]);

        b.prod(
            typename_specifier,
            &[tok(KwTypename), nt(nested_name_specifier), nt(identifier)],
        );
        b.prod(
            typename_specifier,
            &[
                tok(KwTypename),
                nt(nested_name_specifier),
                opt_tok(KwTemplate),
                nt(simple_template_id),
            ],
        );

        b.prod_if(
            explicit_instantiation,
            !cxx11,
            &[tok(KwTemplate), nt(declaration)],
        );
        b.prod_if(
            explicit_instantiation,
            cxx11,
            &[opt_tok(KwExtern), tok(KwTemplate), nt(declaration)],
        );

        b.prod(
            explicit_specialization,
            &[tok(KwTemplate), tok(Less), tok(Greater), nt(declaration)],
        );

        /*
         * A.13 Exception handling [gram.except]
         */
        b.prod(try_block, &[tok(KwTry), nt(compound_statement), nt(handler_seq)]);

        b.prod(
            function_try_block,
            &[
                tok(KwTry),
                opt(ctor_initializer),
                nt(compound_statement),
                nt(handler_seq),
            ],
        );

        b.prod(handler_seq, &[nt(handler), opt(handler_seq)]);

        b.prod(
            handler,
            &[
                tok(KwCatch),
                tok(LParen),
                nt(exception_declaration),
                tok(RParen),
                nt(compound_statement),
            ],
        );

        b.prod(
            exception_declaration,
            &[
                opt(attribute_specifier_seq),
                nt(type_specifier_seq),
                nt(declarator),
            ],
        );
        b.prod(
            exception_declaration,
            &[
                opt(attribute_specifier_seq),
                nt(type_specifier_seq),
                opt(abstract_declarator),
            ],
        );

        b.prod(throw_expression, &[tok(KwThrow), opt(assignment_expression)]);

        b.prod(exception_specification, &[nt(dynamic_exception_specification)]);
        b.prod_if(exception_specification, cxx11, &[nt(noexcept_specification)]);

        b.prod(
            dynamic_exception_specification,
            &[tok(KwThrow), tok(LParen), opt(type_id_list), tok(RParen)],
        );

        b.prod(type_id_list, &[nt(type_id), opt_tok(Ellipsis)]);
        b.prod(type_id_list, &[nt(type_id_list), nt(type_id), opt_tok(Ellipsis)]);

        b.prod(
            noexcept_specification,
            &[
                tok(KwNoexcept),
                tok(LParen),
                nt(constant_expression),
                tok(RParen),
            ],
        );
        b.prod(noexcept_specification, &[tok(KwNoexcept)]);

        /*
         * Post-parse actions
         */
        b.action(decl_specifier_seq, actions::decl_specifier_end);
        b.action(type_specifier_seq, actions::decl_specifier_end);
        b.action(trailing_type_specifier_seq, actions::decl_specifier_end);

        b.action(declarator, actions::declarator_end);
        b.action(nested_declarator, actions::declarator_end);
        b.action(abstract_declarator, actions::declarator_end);
        b.action(nested_abstract_declarator, actions::declarator_end);
        b.action(new_declarator, actions::declarator_end);
        b.action(conversion_declarator, actions::declarator_end);

        b.action(lambda_declarator, actions::parameters_and_qualifiers_end);
        b.action(
            parameters_and_qualifiers,
            actions::parameters_and_qualifiers_end,
        );

        b.action(ptr_operator, actions::ptr_operator_end);

        CxxGrammar {
            nonterms: b.nonterms,
            prods: b.prods,
            prods_nonterms: b.prods_nonterms,
            name_map: b.name_map,

            typedef_name,
            class_name,
            enum_name,
            namespace_name,
            original_namespace_name,
            namespace_alias,
            template_name,
            undeclared_name,
            identifier,
            literal,
            boolean_literal,
            pointer_literal,
            user_defined_literal,
            ud_suffix,
            numeric_literal,
            character_literal,
            string_literal,
            translation_unit,
            primary_expression,
            generic_selection,
            generic_assoc_list,
            generic_association,
            paren_expression,
            id_expression,
            unqualified_id,
            postfix_expression,
            array_subscript,
            function_call,
            member_access,
            expression_list,
            unary_expression,
            unary_operator,
            qualified_id,
            nested_name_specifier,
            pseudo_destructor_name,
            new_expression,
            new_placement,
            new_type_id,
            new_declarator,
            noptr_new_declarator,
            new_initializer,
            delete_expression,
            lambda_expression,
            lambda_introducer,
            lambda_capture,
            capture_default,
            capture_list,
            capture,
            simple_capture,
            init_capture,
            lambda_declarator,
            noexcept_expression,
            cast_expression,
            pm_expression,
            multiplicative_expression,
            additive_expression,
            shift_expression,
            relational_expression,
            equality_expression,
            and_expression,
            exclusive_or_expression,
            inclusive_or_expression,
            logical_and_expression,
            logical_or_expression,
            conditional_expression,
            assignment_expression,
            assignment_operator,
            expression,
            constant_expression,
            statement,
            labeled_statement,
            expression_statement,
            compound_statement,
            block_declaration_seq,
            statement_seq,
            selection_statement,
            condition,
            iteration_statement,
            for_init_statement,
            for_range_declaration,
            for_range_initializer,
            jump_statement,
            declaration_statement,
            declaration_seq,
            declaration,
            block_declaration,
            simple_declaration,
            static_assert_declaration,
            empty_declaration,
            decl_specifier,
            decl_specifier_seq,
            storage_class_specifier,
            function_specifier,
            type_specifier,
            trailing_type_specifier,
            type_specifier_seq,
            trailing_type_specifier_seq,
            simple_type_specifier,
            ud_type_specifier,
            type_name,
            elaborated_type_specifier,
            atomic_type_specifier,
            enum_specifier,
            enum_head,
            enum_key,
            enumerator_list,
            enumerator_definition,
            enumerator,
            namespace_definition,
            named_namespace_definition,
            original_namespace_definition,
            extension_namespace_definition,
            unnamed_namespace_definition,
            namespace_body,
            namespace_alias_definition,
            qualified_namespace_specifier,
            using_declaration,
            using_directive,
            linkage_specification,
            asm_definition,
            alignment_specifier,
            decltype_specifier,
            opaque_enum_declaration,
            enum_base,
            alias_declaration,
            attribute_declaration,
            attribute_specifier_seq,
            attribute_specifier,
            attribute_list,
            attribute,
            attribute_token,
            attribute_scoped_token,
            attribute_namespace,
            attribute_argument_clause,
            balanced_token_seq,
            balanced_token,
            init_declarator_list,
            init_declarator,
            declarator,
            ptr_declarator,
            noptr_declarator,
            nested_declarator,
            array_declarator,
            parameters_and_qualifiers,
            ptr_operator,
            type_qualifier_seq,
            type_qualifier,
            declarator_id,
            type_id,
            abstract_declarator,
            ptr_abstract_declarator,
            noptr_abstract_declarator,
            nested_abstract_declarator,
            trailing_return_type,
            ref_qualifier,
            abstract_pack_declarator,
            noptr_abstract_pack_declarator,
            parameter_declaration_clause,
            parameter_declaration_list,
            parameter_declaration,
            function_definition,
            function_body,
            initializer,
            brace_or_equal_initializer,
            initializer_clause,
            initializer_list,
            braced_init_list,
            designation,
            designator_list,
            designator,
            class_specifier,
            class_head,
            class_head_name,
            class_virt_specifier,
            class_key,
            member_declaration,
            member_specification,
            member_declarator_list,
            member_declarator,
            virt_specifier_seq,
            virt_specifier,
            pure_specifier,
            base_clause,
            base_specifier_list,
            base_specifier,
            class_or_decltype,
            base_type_specifier,
            access_specifier,
            conversion_function_id,
            conversion_type_id,
            conversion_declarator,
            ctor_initializer,
            mem_initializer_list,
            mem_initializer,
            mem_initializer_id,
            destructor_id,
            operator_function_id,
            overloadable_operator,
            literal_operator_id,
            template_declaration,
            template_parameter_list,
            template_parameter,
            type_parameter,
            simple_template_id,
            template_id,
            template_argument_list,
            template_argument,
            typename_specifier,
            explicit_instantiation,
            explicit_specialization,
            try_block,
            function_try_block,
            handler_seq,
            handler,
            exception_declaration,
            throw_expression,
            exception_specification,
            dynamic_exception_specification,
            type_id_list,
            noexcept_specification,

            equal,
            not_equal,
            less,
            less_or_equal,
            greater,
            greater_or_equal,
            binary_add,
            binary_subtract,
            left_shift,
            right_shift,
            multiply,
            divide,
            modulo,
        }
    }

    /// How many non-terminals does this grammar have?
    pub fn nonterms_len(&self) -> NtIdx {
        NtIdx::new(self.nonterms.len())
    }

    /// How many productions does this grammar have?
    pub fn prods_len(&self) -> PIdx {
        PIdx::new(self.prods.len())
    }

    /// The non-terminal `ntidx`. Panics if `ntidx` doesn't exist.
    pub fn nonterm(&self, ntidx: NtIdx) -> &NonTerminal {
        &self.nonterms[usize::from(ntidx)]
    }

    /// The production `pidx`. Panics if `pidx` doesn't exist.
    pub fn prod(&self, pidx: PIdx) -> &Production {
        &self.prods[usize::from(pidx)]
    }

    /// The non-terminal owning production `pidx`. Panics if `pidx` doesn't
    /// exist.
    pub fn prod_to_nonterm(&self, pidx: PIdx) -> NtIdx {
        self.prods_nonterms[usize::from(pidx)]
    }

    /// Is production `pidx` available in this configuration? True only when
    /// both the production's own gate and its owning non-terminal are
    /// enabled.
    pub fn prod_enabled(&self, pidx: PIdx) -> bool {
        self.prod(pidx).enabled() && self.nonterm(self.prod_to_nonterm(pidx)).enabled()
    }

    /// Look a non-terminal up by its grammar name, e.g. `"decl-specifier-seq"`.
    pub fn nonterm_by_name(&self, name: &str) -> Option<NtIdx> {
        self.name_map.get(name).copied()
    }

    /// Iterate over all valid `NtIdx`s in order.
    pub fn iter_ntidxs(&self) -> impl Iterator<Item = NtIdx> {
        (0..self.nonterms.len()).map(NtIdx::new)
    }

    /// Iterate over all valid `PIdx`s in order.
    pub fn iter_pidxs(&self) -> impl Iterator<Item = PIdx> {
        (0..self.prods.len()).map(PIdx::new)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cxlex::{CStd, CxxOptionsBuilder, CxxStd};

    fn cxx17() -> CxxOptions {
        CxxOptionsBuilder::new()
            .cxx_standard(CxxStd::Cxx17)
            .build()
            .unwrap()
    }

    fn c(std: CStd) -> CxxOptions {
        CxxOptionsBuilder::new().c_standard(std).build().unwrap()
    }

    #[test]
    fn arena_is_consistent() {
        let opts = cxx17();
        let g = CxxGrammar::new(&opts);
        assert_eq!(usize::from(g.nonterms_len()), g.name_map.len());
        for ntidx in g.iter_ntidxs() {
            let nonterm = g.nonterm(ntidx);
            assert!(!nonterm.prods().is_empty(), "{}", nonterm.name());
            assert_eq!(g.nonterm_by_name(nonterm.name()), Some(ntidx));
            for &pidx in nonterm.prods() {
                assert_eq!(g.prod_to_nonterm(pidx), ntidx);
            }
        }
        for pidx in g.iter_pidxs() {
            for sym in g.prod(pidx).symbols() {
                match sym {
                    Symbol::Rule(ntidx)
                    | Symbol::OptRule(ntidx)
                    | Symbol::PredRule(ntidx, _) => {
                        assert!(usize::from(*ntidx) < usize::from(g.nonterms_len()));
                    }
                    _ => (),
                }
            }
        }
    }

    #[test]
    fn handles_resolve_by_name() {
        let opts = cxx17();
        let g = CxxGrammar::new(&opts);
        assert_eq!(g.nonterm(g.translation_unit).name(), "translation-unit");
        assert_eq!(g.nonterm(g.decl_specifier_seq).name(), "decl-specifier-seq");
        assert_eq!(
            g.nonterm_by_name("parameters-and-qualifiers"),
            Some(g.parameters_and_qualifiers)
        );
        assert_eq!(g.nonterm_by_name("no-such-rule"), None);
    }

    #[test]
    fn cxx_rules_are_disabled_in_c_mode() {
        let opts = c(CStd::C99);
        let g = CxxGrammar::new(&opts);
        assert!(!g.nonterm(g.namespace_definition).enabled());
        assert!(!g.nonterm(g.template_declaration).enabled());
        assert!(!g.nonterm(g.lambda_expression).enabled());
        assert!(!g.nonterm(g.try_block).enabled());
        assert!(g.nonterm(g.typedef_name).enabled());
        assert!(g.nonterm(g.translation_unit).enabled());
        // C99 designated initializers are present
        assert!(g.nonterm(g.designation).enabled());

        let g89 = CxxGrammar::new(&c(CStd::C89));
        assert!(!g89.nonterm(g89.designation).enabled());
        // pre-C99 C keeps the declarations-first compound statement
        assert!(g89.nonterm(g89.block_declaration_seq).enabled());
        assert!(!g.nonterm(g.block_declaration_seq).enabled());
    }

    #[test]
    fn long_long_alternative_follows_the_feature() {
        let find_long_long = |g: &CxxGrammar| {
            g.nonterm(g.simple_type_specifier)
                .prods()
                .iter()
                .copied()
                .find(|&p| {
                    g.prod(p).symbols()
                        == [
                            Symbol::Token(TokenKind::KwLong),
                            Symbol::Token(TokenKind::KwLong),
                        ]
                })
                .unwrap()
        };

        let opts = c(CStd::C99);
        let g = CxxGrammar::new(&opts);
        assert!(g.prod_enabled(find_long_long(&g)));

        let opts = CxxOptionsBuilder::new()
            .c_standard(CStd::C99)
            .disable(cxlex::options::LONG_LONG)
            .build()
            .unwrap();
        let g = CxxGrammar::new(&opts);
        assert!(!g.prod_enabled(find_long_long(&g)));
    }

    #[test]
    fn display_policies() {
        let opts = cxx17();
        let g = CxxGrammar::new(&opts);
        assert_eq!(g.nonterm(g.statement_seq).display(), DisplayPolicy::Transparent);
        assert_eq!(g.nonterm(g.declaration_seq).display(), DisplayPolicy::Transparent);
        assert_eq!(g.nonterm(g.capture_list).display(), DisplayPolicy::Transparent);
        assert_eq!(
            g.nonterm(g.primary_expression).display(),
            DisplayPolicy::HideIfDelegate
        );
        assert_eq!(
            g.nonterm(g.assignment_expression).display(),
            DisplayPolicy::HideIfDelegate
        );
        assert_eq!(g.nonterm(g.declarator).display(), DisplayPolicy::Normal);
    }

    #[test]
    fn operator_rule_attachments() {
        let opts = cxx17();
        let g = CxxGrammar::new(&opts);
        assert_eq!(g.prod_to_nonterm(g.multiply), g.multiplicative_expression);
        assert_eq!(g.prod_to_nonterm(g.divide), g.multiplicative_expression);
        assert_eq!(g.prod_to_nonterm(g.modulo), g.multiplicative_expression);
        assert_eq!(g.prod_to_nonterm(g.binary_add), g.additive_expression);
        assert_eq!(g.prod_to_nonterm(g.binary_subtract), g.additive_expression);
        assert_eq!(g.prod_to_nonterm(g.left_shift), g.shift_expression);
        assert_eq!(g.prod_to_nonterm(g.right_shift), g.shift_expression);
        assert_eq!(g.prod_to_nonterm(g.less), g.relational_expression);
        assert_eq!(g.prod_to_nonterm(g.greater), g.relational_expression);
        assert_eq!(g.prod_to_nonterm(g.less_or_equal), g.relational_expression);
        assert_eq!(
            g.prod_to_nonterm(g.greater_or_equal),
            g.relational_expression
        );
        assert_eq!(g.prod_to_nonterm(g.equal), g.equality_expression);
        assert_eq!(g.prod_to_nonterm(g.not_equal), g.equality_expression);

        assert_eq!(
            g.prod(g.multiply).symbols(),
            [
                Symbol::Rule(g.multiplicative_expression),
                Symbol::Token(TokenKind::Star),
                Symbol::Rule(g.pm_expression)
            ]
        );

        let all = [
            g.equal,
            g.not_equal,
            g.less,
            g.less_or_equal,
            g.greater,
            g.greater_or_equal,
            g.binary_add,
            g.binary_subtract,
            g.left_shift,
            g.right_shift,
            g.multiply,
            g.divide,
            g.modulo,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn template_close_predicate_is_wired() {
        let opts = cxx17();
        let g = CxxGrammar::new(&opts);
        let has_close_pred = |ntidx| {
            g.nonterm(ntidx).prods().iter().any(|&p| {
                g.prod(p).symbols().iter().any(|sym| {
                    matches!(sym,
                             Symbol::PredToken(TokenKind::Greater, pred)
                                 if *pred == process_template_close_token as Predicate)
                })
            })
        };
        assert!(has_close_pred(g.simple_template_id));
        assert!(has_close_pred(g.template_id));
        assert!(has_close_pred(g.template_declaration));
        assert!(has_close_pred(g.type_parameter));
        assert!(!has_close_pred(g.relational_expression));
    }

    #[test]
    fn name_resolver_seam() {
        fn always_typedef(_state: &mut dyn crate::engine::ParseState) -> bool {
            true
        }
        let opts = cxx17();
        let resolvers = NameResolvers {
            is_typedef_name: always_typedef,
            ..NameResolvers::default()
        };
        let g = CxxGrammar::with_resolvers(&opts, resolvers);
        let pidx = g.nonterm(g.typedef_name).prods()[0];
        match g.prod(pidx).symbols() {
            [Symbol::PredRule(ntidx, pred)] => {
                assert_eq!(*ntidx, g.identifier);
                assert_eq!(*pred, always_typedef as Predicate);
            }
            other => panic!("unexpected symbols: {:?}", other),
        }

        // the default classifies identifiers as undeclared names only
        let g = CxxGrammar::new(&opts);
        let pidx = g.nonterm(g.undeclared_name).prods()[0];
        match g.prod(pidx).symbols() {
            [Symbol::PredRule(_, pred)] => {
                assert_eq!(*pred, crate::engine::is_undeclared_name as Predicate);
            }
            other => panic!("unexpected symbols: {:?}", other),
        }
    }

    #[test]
    fn post_actions_are_registered() {
        let opts = cxx17();
        let g = CxxGrammar::new(&opts);
        for ntidx in [
            g.decl_specifier_seq,
            g.type_specifier_seq,
            g.trailing_type_specifier_seq,
            g.declarator,
            g.nested_declarator,
            g.abstract_declarator,
            g.nested_abstract_declarator,
            g.new_declarator,
            g.conversion_declarator,
            g.lambda_declarator,
            g.parameters_and_qualifiers,
            g.ptr_operator,
        ] {
            assert_eq!(g.nonterm(ntidx).actions().len(), 1, "{}", g.nonterm(ntidx).name());
        }
        assert!(g.nonterm(g.statement).actions().is_empty());
    }

    #[test]
    fn conditional_expression_variants_are_language_gated() {
        let g = CxxGrammar::new(&cxx17());
        let enabled: Vec<_> = g
            .nonterm(g.conditional_expression)
            .prods()
            .iter()
            .filter(|&&p| g.prod_enabled(p))
            .collect();
        // delegate + the C++ ternary
        assert_eq!(enabled.len(), 2);

        let g = CxxGrammar::new(&c(CStd::C99));
        let enabled: Vec<_> = g
            .nonterm(g.conditional_expression)
            .prods()
            .iter()
            .filter(|&&p| g.prod_enabled(p))
            .collect();
        assert_eq!(enabled.len(), 2);
    }

    #[test]
    fn array_declarator_variants_follow_c_standard() {
        let g = CxxGrammar::new(&c(CStd::C89));
        let enabled = g
            .nonterm(g.array_declarator)
            .prods()
            .iter()
            .filter(|&&p| g.prod_enabled(p))
            .count();
        assert_eq!(enabled, 1);

        let g = CxxGrammar::new(&c(CStd::C99));
        let enabled = g
            .nonterm(g.array_declarator)
            .prods()
            .iter()
            .filter(|&&p| g.prod_enabled(p))
            .count();
        assert_eq!(enabled, 4);
    }

    #[test]
    fn balanced_token_has_a_catch_all_predicate() {
        let g = CxxGrammar::new(&cxx17());
        let prods = g.nonterm(g.balanced_token).prods();
        assert_eq!(prods.len(), 4);
        let last = g.prod(*prods.last().unwrap());
        assert!(matches!(
            last.symbols(),
            [Symbol::AnyToken(pred)] if *pred == is_balanced_token as Predicate
        ));
    }

    #[test]
    fn storage_class_auto_only_outside_cxx11() {
        let g = CxxGrammar::new(&c(CStd::C99));
        let has_auto = g.nonterm(g.storage_class_specifier).prods().iter().any(|&p| {
            g.prod_enabled(p) && g.prod(p).symbols() == [Symbol::Token(TokenKind::KwAuto)]
        });
        assert!(has_auto);

        let g = CxxGrammar::new(&cxx17());
        let has_auto = g.nonterm(g.storage_class_specifier).prods().iter().any(|&p| {
            g.prod_enabled(p) && g.prod(p).symbols() == [Symbol::Token(TokenKind::KwAuto)]
        });
        assert!(!has_auto);
        // ... but C++11 'auto' lives in simple-type-specifier
        let has_type_auto = g.nonterm(g.simple_type_specifier).prods().iter().any(|&p| {
            g.prod_enabled(p) && g.prod(p).symbols() == [Symbol::Token(TokenKind::KwAuto)]
        });
        assert!(has_type_auto);
    }
}
