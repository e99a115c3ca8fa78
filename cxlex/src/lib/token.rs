//! The closed catalogue of C/C++ token kinds, their metadata, and the token
//! representation handed out by the lexer.
//!
//! `TokenKind` is deliberately laid out so that every category query is a
//! cheap range test over the discriminant: punctuation occupies
//! `LParen..=ColonColon`, keywords `KwAlignas..=KwWhile`, the multi-spelling
//! kinds `Identifier..=PpNumber` and the preprocessor directives
//! `PpInclude..=PpPragma`. New kinds must be inserted inside their category
//! range.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

/// Bitset of per-token flags.
pub type TokenFlags = u8;

/// The token is the first token on its source line.
pub const TF_STARTS_LINE: TokenFlags = 0x01;
/// The token was preceded by whitespace or a comment on the same line.
pub const TF_SPACE_BEFORE: TokenFlags = 0x02;
/// Alternate form: a digraph or a named alternate token such as `and`.
pub const TF_ALTERNATE: TokenFlags = 0x04;
/// The token belongs to a preprocessor directive line.
pub const TF_PREPROCESS: TokenFlags = 0x08;
/// A `>>`, `>=` or `>>=` token that may be split in two when it closes a
/// template parameter or argument list.
pub const TF_SPLITABLE: TokenFlags = 0x10;

struct TokenKindInfo {
    name: &'static str,
    default_spelling: &'static str,
}

macro_rules! token_kinds {
    ($($kind:ident => ($name:literal, $spelling:literal)),+ $(,)?) => {
        /// C/C++ token kinds.
        #[repr(u8)]
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum TokenKind {
            $($kind),+
        }

        impl TokenKind {
            /// Every kind, in discriminant order.
            pub const ALL: &'static [TokenKind] = &[$(TokenKind::$kind),+];
        }

        const TOKEN_KINDS: &[TokenKindInfo] = &[
            $(TokenKindInfo { name: $name, default_spelling: $spelling }),+
        ];
    };
}

token_kinds! {
    Null => ("NULL", ""),
    Eof => ("EOF", ""),

    LParen => ("LPAREN", "("),
    RParen => ("RPAREN", ")"),
    LSquare => ("LSQUARE", "["),
    RSquare => ("RSQUARE", "]"),
    LBrace => ("LBRACE", "{"),
    RBrace => ("RBRACE", "}"),
    Dollar => ("DOLLAR", "$"),
    Dot => ("DOT", "."),
    Ellipsis => ("ELLIPSIS", "..."),
    Amp => ("AMP", "&"),
    AmpAmp => ("AMPAMP", "&&"),
    AmpEqual => ("AMPEQUAL", "&="),
    Star => ("STAR", "*"),
    StarEqual => ("STAREQUAL", "*="),
    Plus => ("PLUS", "+"),
    PlusPlus => ("PLUSPLUS", "++"),
    PlusEqual => ("PLUSEQUAL", "+="),
    Minus => ("MINUS", "-"),
    Arrow => ("ARROW", "->"),
    MinusMinus => ("MINUSMINUS", "--"),
    MinusEqual => ("MINUSEQUAL", "-="),
    Tilde => ("TILDE", "~"),
    Exclaim => ("EXCLAIM", "!"),
    ExclaimEqual => ("EXCLAIMEQUAL", "!="),
    Slash => ("SLASH", "/"),
    SlashEqual => ("SLASHEQUAL", "/="),
    Percent => ("PERCENT", "%"),
    PercentEqual => ("PERCENTEQUAL", "%="),
    Less => ("LESS", "<"),
    LessEqual => ("LESSEQUAL", "<="),
    LShift => ("LSHIFT", "<<"),
    LShiftEqual => ("LSHIFTEQUAL", "<<="),
    Greater => ("GREATER", ">"),
    GreaterEqual => ("GREATEREQUAL", ">="),
    RShift => ("RSHIFT", ">>"),
    RShiftEqual => ("RSHIFTEQUAL", ">>="),
    Caret => ("CARET", "^"),
    CaretEqual => ("CARETEQUAL", "^="),
    Pipe => ("PIPE", "|"),
    PipePipe => ("PIPEPIPE", "||"),
    PipeEqual => ("PIPEEQUAL", "|="),
    Question => ("QUESTION", "?"),
    Colon => ("COLON", ":"),
    Semi => ("SEMI", ";"),
    Equal => ("EQUAL", "="),
    EqualEqual => ("EQUALEQUAL", "=="),
    Comma => ("COMMA", ","),
    Hash => ("HASH", "#"),
    HashHash => ("HASHHASH", "##"),
    DotStar => ("DOTSTAR", ".*"),
    ArrowStar => ("ARROWSTAR", "->*"),
    ColonColon => ("COLONCOLON", "::"),

    KwAlignas => ("KW_ALIGNAS", "alignas"),
    KwAlignof => ("KW_ALIGNOF", "alignof"),
    KwAsm => ("KW_ASM", "asm"),
    KwAtomic => ("KW_ATOMIC", "_Atomic"),
    KwAuto => ("KW_AUTO", "auto"),
    KwBool => ("KW_BOOL", "bool"),
    KwBreak => ("KW_BREAK", "break"),
    KwCase => ("KW_CASE", "case"),
    KwCatch => ("KW_CATCH", "catch"),
    KwChar => ("KW_CHAR", "char"),
    KwChar16T => ("KW_CHAR16_T", "char16_t"),
    KwChar32T => ("KW_CHAR32_T", "char32_t"),
    KwClass => ("KW_CLASS", "class"),
    KwComplex => ("KW_COMPLEX", "_Complex"),
    KwConst => ("KW_CONST", "const"),
    KwConstCast => ("KW_CONST_CAST", "const_cast"),
    KwConstexpr => ("KW_CONSTEXPR", "constexpr"),
    KwContinue => ("KW_CONTINUE", "continue"),
    KwDecltype => ("KW_DECLTYPE", "decltype"),
    KwDefault => ("KW_DEFAULT", "default"),
    KwDelete => ("KW_DELETE", "delete"),
    KwDo => ("KW_DO", "do"),
    KwDouble => ("KW_DOUBLE", "double"),
    KwDynamicCast => ("KW_DYNAMIC_CAST", "dynamic_cast"),
    KwElse => ("KW_ELSE", "else"),
    KwEnum => ("KW_ENUM", "enum"),
    KwExplicit => ("KW_EXPLICIT", "explicit"),
    KwExport => ("KW_EXPORT", "export"),
    KwExtern => ("KW_EXTERN", "extern"),
    KwFalse => ("KW_FALSE", "false"),
    KwFloat => ("KW_FLOAT", "float"),
    KwFor => ("KW_FOR", "for"),
    KwFriend => ("KW_FRIEND", "friend"),
    KwFunc => ("KW_FUNC", "func"),
    KwGeneric => ("KW_GENERIC", "_Generic"),
    KwGoto => ("KW_GOTO", "goto"),
    KwIf => ("KW_IF", "if"),
    KwImaginary => ("KW_IMAGINARY", "_Imaginary"),
    KwInline => ("KW_INLINE", "inline"),
    KwInt => ("KW_INT", "int"),
    KwLong => ("KW_LONG", "long"),
    KwMutable => ("KW_MUTABLE", "mutable"),
    KwNew => ("KW_NEW", "new"),
    KwNamespace => ("KW_NAMESPACE", "namespace"),
    KwNoexcept => ("KW_NOEXCEPT", "noexcept"),
    KwNoreturn => ("KW_NORETURN", "_Noreturn"),
    KwNullptr => ("KW_NULLPTR", "nullptr"),
    KwOperator => ("KW_OPERATOR", "operator"),
    KwPrivate => ("KW_PRIVATE", "private"),
    KwProtected => ("KW_PROTECTED", "protected"),
    KwPublic => ("KW_PUBLIC", "public"),
    KwRegister => ("KW_REGISTER", "register"),
    KwReinterpretCast => ("KW_REINTERPRET_CAST", "reinterpret_cast"),
    KwRestrict => ("KW_RESTRICT", "restrict"),
    KwReturn => ("KW_RETURN", "return"),
    KwShort => ("KW_SHORT", "short"),
    KwSigned => ("KW_SIGNED", "signed"),
    KwSizeof => ("KW_SIZEOF", "sizeof"),
    KwStatic => ("KW_STATIC", "static"),
    KwStaticAssert => ("KW_STATIC_ASSERT", "static_assert"),
    KwStaticCast => ("KW_STATIC_CAST", "static_cast"),
    KwStruct => ("KW_STRUCT", "struct"),
    KwSwitch => ("KW_SWITCH", "switch"),
    KwTemplate => ("KW_TEMPLATE", "template"),
    KwThis => ("KW_THIS", "this"),
    KwThreadLocal => ("KW_THREAD_LOCAL", "thread_local"),
    KwThrow => ("KW_THROW", "throw"),
    KwTrue => ("KW_TRUE", "true"),
    KwTry => ("KW_TRY", "try"),
    KwTypedef => ("KW_TYPEDEF", "typedef"),
    KwTypeid => ("KW_TYPEID", "typeid"),
    KwTypename => ("KW_TYPENAME", "typename"),
    KwUnion => ("KW_UNION", "union"),
    KwUnsigned => ("KW_UNSIGNED", "unsigned"),
    KwUsing => ("KW_USING", "using"),
    KwVirtual => ("KW_VIRTUAL", "virtual"),
    KwVoid => ("KW_VOID", "void"),
    KwVolatile => ("KW_VOLATILE", "volatile"),
    KwWcharT => ("KW_WCHAR_T", "wchar_t"),
    KwWhile => ("KW_WHILE", "while"),

    Identifier => ("IDENTIFIER", ""),
    DecIntLiteral => ("DEC_INT_LITERAL", ""),
    HexIntLiteral => ("HEX_INT_LITERAL", ""),
    OctIntLiteral => ("OCT_INT_LITERAL", ""),
    BinIntLiteral => ("BIN_INT_LITERAL", ""),
    FloatLiteral => ("FLOAT_LITERAL", ""),
    CharLiteral => ("CHAR_LITERAL", ""),
    WcharLiteral => ("WCHAR_LITERAL", ""),
    U8CharLiteral => ("U8_CHAR_LITERAL", ""),
    U16CharLiteral => ("U16_CHAR_LITERAL", ""),
    U32CharLiteral => ("U32_CHAR_LITERAL", ""),
    StrLiteral => ("STR_LITERAL", ""),
    WstrLiteral => ("WSTR_LITERAL", ""),
    U8StrLiteral => ("U8_STR_LITERAL", ""),
    U16StrLiteral => ("U16_STR_LITERAL", ""),
    U32StrLiteral => ("U32_STR_LITERAL", ""),

    Whitespace => ("TOK_WHITESPACE", " "),
    Comment => ("TOK_COMMENT", ""),

    PpNumber => ("TOK_PP_NUMBER", ""),
    PpInclude => ("TOK_PP_INCLUDE", "#include"),
    PpIncludeNext => ("TOK_PP_INCLUDE_NEXT", "#include_next"),
    PpDefine => ("TOK_PP_DEFINE", "#define"),
    PpUndef => ("TOK_PP_UNDEF", "#undef"),
    PpIf => ("TOK_PP_IF", "#if"),
    PpIfdef => ("TOK_PP_IFDEF", "#ifdef"),
    PpIfndef => ("TOK_PP_IFNDEF", "#ifndef"),
    PpElif => ("TOK_PP_ELIF", "#elif"),
    PpElse => ("TOK_PP_ELSE", "#else"),
    PpEndif => ("TOK_PP_ENDIF", "#endif"),
    PpLine => ("TOK_PP_LINE", "#line"),
    PpError => ("TOK_PP_ERROR", "#error"),
    PpWarning => ("TOK_PP_WARNING", "#warning"),
    PpPragma => ("TOK_PP_PRAGMA", "#pragma"),
    PpNull => ("TOK_PP_NULL", "#"),
}

// The category range tests below rely on the categories being contiguous.
const_assert_eq!(TokenKind::LParen as u8, TokenKind::Eof as u8 + 1);
const_assert_eq!(TokenKind::KwAlignas as u8, TokenKind::ColonColon as u8 + 1);
const_assert_eq!(TokenKind::Identifier as u8, TokenKind::KwWhile as u8 + 1);
const_assert_eq!(TokenKind::PpInclude as u8, TokenKind::PpNumber as u8 + 1);

/// The symbolic name of `kind`, e.g. `"LPAREN"` or `"KW_WHILE"`.
///
/// These strings are part of the public contract: debugging dumps and
/// round-trip tests compare against them verbatim.
pub fn token_kind_name(kind: TokenKind) -> &'static str {
    TOKEN_KINDS[kind as usize].name
}

/// The canonical spelling of `kind`, e.g. `"->*"` for [`TokenKind::ArrowStar`].
/// Empty for multi-spelling kinds such as identifiers and literals.
pub fn default_spelling(kind: TokenKind) -> &'static str {
    TOKEN_KINDS[kind as usize].default_spelling
}

pub fn is_punctuation(kind: TokenKind) -> bool {
    (kind >= TokenKind::LParen) && (kind <= TokenKind::ColonColon)
}

pub fn is_keyword(kind: TokenKind) -> bool {
    (kind >= TokenKind::KwAlignas) && (kind <= TokenKind::KwWhile)
}

/// Does `kind` cover more than one possible spelling (identifiers, literals,
/// whitespace, comments, pp-numbers)?
pub fn is_multi_spelling(kind: TokenKind) -> bool {
    (kind >= TokenKind::Identifier) && (kind <= TokenKind::PpNumber)
}

pub fn is_preprocessor_directive(kind: TokenKind) -> bool {
    (kind >= TokenKind::PpInclude) && (kind <= TokenKind::PpPragma)
}

pub fn is_preprocessor_token(kind: TokenKind) -> bool {
    (kind == TokenKind::Hash)
        || (kind == TokenKind::HashHash)
        || ((kind >= TokenKind::PpNumber) && (kind <= TokenKind::PpPragma))
}

/// Can `kind` begin or continue a declaration-specifier sequence on its own?
pub fn is_decl_specifier(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::KwAtomic
            | TokenKind::KwAuto
            | TokenKind::KwBool
            | TokenKind::KwChar
            | TokenKind::KwChar16T
            | TokenKind::KwChar32T
            | TokenKind::KwComplex
            | TokenKind::KwConst
            | TokenKind::KwDouble
            | TokenKind::KwFloat
            | TokenKind::KwImaginary
            | TokenKind::KwInt
            | TokenKind::KwLong
            | TokenKind::KwRegister
            | TokenKind::KwRestrict
            | TokenKind::KwShort
            | TokenKind::KwSigned
            | TokenKind::KwThreadLocal
            | TokenKind::KwUnsigned
            | TokenKind::KwVirtual
            | TokenKind::KwVoid
            | TokenKind::KwVolatile
            | TokenKind::KwWcharT
    )
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", token_kind_name(*self))
    }
}

/// A single lexed token.
///
/// `offset`, `line` and `column` are positions in the logical code-point
/// stream, i.e. after trigraph folding and escaped-newline splicing; `line`
/// and `column` are 1-based.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    kind: TokenKind,
    spelling: String,
    flags: TokenFlags,
    offset: usize,
    line: usize,
    column: usize,
}

impl Default for Token {
    fn default() -> Self {
        Token {
            kind: TokenKind::Null,
            spelling: String::new(),
            flags: 0,
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: TokenKind) -> &mut Self {
        self.kind = kind;
        self
    }

    pub fn spelling(&self) -> &str {
        &self.spelling
    }

    pub fn set_spelling<S: Into<String>>(&mut self, spelling: S) -> &mut Self {
        self.spelling = spelling.into();
        self
    }

    /// Set both the kind and its canonical spelling in one go.
    pub fn set_kind_and_spelling(&mut self, kind: TokenKind) -> &mut Self {
        self.set_kind(kind).set_spelling(default_spelling(kind))
    }

    pub fn flags(&self) -> TokenFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: TokenFlags) -> &mut Self {
        self.flags = flags;
        self
    }

    pub fn add_flags(&mut self, flags: TokenFlags) -> &mut Self {
        self.flags |= flags;
        self
    }

    pub fn has_flags(&self, flags: TokenFlags) -> bool {
        (self.flags & flags) == flags
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn set_location(&mut self, offset: usize, line: usize, column: usize) -> &mut Self {
        self.offset = offset;
        self.line = line;
        self.column = column;
        self
    }

    /// Shift the token right by `n` code points on the same line. Used when a
    /// splitable token is divided in two.
    pub fn adjust_offset(&mut self, n: usize) -> &mut Self {
        self.offset += n;
        self.column += n;
        self
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Revert the token to its freshly-constructed state, keeping the
    /// location.
    pub fn reset(&mut self) -> &mut Self {
        self.kind = TokenKind::Null;
        self.spelling.clear();
        self.flags = 0;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.spelling.is_empty() {
            write!(f, "{}", token_kind_name(self.kind))
        } else {
            write!(f, "{}({:?})", token_kind_name(self.kind), self.spelling)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn metadata_table_covers_every_kind() {
        assert_eq!(TOKEN_KINDS.len(), TokenKind::ALL.len());
        for (i, kind) in TokenKind::ALL.iter().enumerate() {
            assert_eq!(*kind as usize, i);
        }
        assert_eq!(TokenKind::ALL.len(), TokenKind::PpNull as usize + 1);
    }

    #[test]
    fn names_and_spellings() {
        assert_eq!(token_kind_name(TokenKind::Null), "NULL");
        assert_eq!(token_kind_name(TokenKind::LParen), "LPAREN");
        assert_eq!(token_kind_name(TokenKind::ColonColon), "COLONCOLON");
        assert_eq!(token_kind_name(TokenKind::KwAlignas), "KW_ALIGNAS");
        assert_eq!(token_kind_name(TokenKind::KwWhile), "KW_WHILE");
        assert_eq!(token_kind_name(TokenKind::Whitespace), "TOK_WHITESPACE");
        assert_eq!(token_kind_name(TokenKind::PpPragma), "TOK_PP_PRAGMA");
        assert_eq!(default_spelling(TokenKind::Ellipsis), "...");
        assert_eq!(default_spelling(TokenKind::ArrowStar), "->*");
        assert_eq!(default_spelling(TokenKind::KwStaticAssert), "static_assert");
        assert_eq!(default_spelling(TokenKind::KwAtomic), "_Atomic");
        assert_eq!(default_spelling(TokenKind::PpIncludeNext), "#include_next");
        assert_eq!(default_spelling(TokenKind::PpNull), "#");
        assert_eq!(default_spelling(TokenKind::Identifier), "");
    }

    #[test]
    fn category_predicates_are_range_tests() {
        for kind in TokenKind::ALL.iter().copied() {
            assert_eq!(
                is_punctuation(kind),
                (TokenKind::LParen..=TokenKind::ColonColon).contains(&kind),
                "{}",
                kind
            );
            assert_eq!(
                is_keyword(kind),
                (TokenKind::KwAlignas..=TokenKind::KwWhile).contains(&kind),
                "{}",
                kind
            );
            assert_eq!(
                is_preprocessor_directive(kind),
                (TokenKind::PpInclude..=TokenKind::PpPragma).contains(&kind),
                "{}",
                kind
            );
        }
        assert!(is_multi_spelling(TokenKind::Whitespace));
        assert!(is_multi_spelling(TokenKind::Comment));
        assert!(!is_multi_spelling(TokenKind::PpInclude));
        assert!(is_preprocessor_token(TokenKind::Hash));
        assert!(is_preprocessor_token(TokenKind::HashHash));
        assert!(is_preprocessor_token(TokenKind::PpNumber));
        assert!(!is_preprocessor_token(TokenKind::PpNull));
    }

    #[test]
    fn token_builder_chain() {
        let mut t = Token::default();
        t.set_kind_and_spelling(TokenKind::LBrace).add_flags(TF_ALTERNATE);
        assert_eq!(t.kind(), TokenKind::LBrace);
        assert_eq!(t.spelling(), "{");
        assert!(t.has_flags(TF_ALTERNATE));
        t.reset();
        assert_eq!(t.kind(), TokenKind::Null);
        assert_eq!(t.spelling(), "");
        assert_eq!(t.flags(), 0);
    }

    #[test]
    fn adjust_offset_moves_offset_and_column() {
        let mut t = Token::default();
        t.set_location(10, 2, 5);
        t.adjust_offset(1);
        assert_eq!((t.offset(), t.line(), t.column()), (11, 2, 6));
    }
}
