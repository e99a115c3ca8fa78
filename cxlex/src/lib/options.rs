//! Language-standard selection, optional feature flags and the keyword table
//! they seed.
//!
//! A [`CxxOptions`] value is immutable once built: the selected standards
//! imply a fixed feature set, individual features can be switched on or off
//! through the builder, and the keyword table is seeded to exactly the
//! keywords of the selected standards (plus or minus the few keywords that
//! individual features control).

use std::{error::Error, fmt};

use indexmap::IndexMap;

use crate::token::TokenKind;

/// C language standards, oldest first.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CStd {
    C89,
    C90,
    C95,
    C99,
    C11,
}

impl CStd {
    pub const LATEST: CStd = CStd::C11;
}

impl fmt::Display for CStd {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            CStd::C89 => "C89",
            CStd::C90 => "C90",
            CStd::C95 => "C95",
            CStd::C99 => "C99",
            CStd::C11 => "C11",
        };
        write!(f, "{}", s)
    }
}

/// C++ language standards, oldest first.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CxxStd {
    Cxx98,
    Cxx03,
    Cxx11,
    Cxx14,
    Cxx17,
}

impl CxxStd {
    pub const LATEST: CxxStd = CxxStd::Cxx17;
}

impl fmt::Display for CxxStd {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            CxxStd::Cxx98 => "C++98",
            CxxStd::Cxx03 => "C++03",
            CxxStd::Cxx11 => "C++11",
            CxxStd::Cxx14 => "C++14",
            CxxStd::Cxx17 => "C++17",
        };
        write!(f, "{}", s)
    }
}

/// Bitset of optional lexical/syntactic features. Unless noted otherwise a
/// feature is valid for any C or C++ standard.
pub type Features = u64;

/// Lexer: record full content for whitespace tokens.
pub const KEEP_SPACE: Features = 1;
/// Lexer: record full content for comments.
pub const KEEP_COMMENTS: Features = 1 << 1;
/// Lexer: recognise one-line comments prefixed by `//`.
pub const LINE_COMMENTS: Features = 1 << 2;
/// `long long` integer type; standard from C99 and C++11.
pub const LONG_LONG: Features = 1 << 3;
/// Digraph tokens; standard in C++ and from C95.
pub const DIGRAPHS: Features = 1 << 4;
/// Interpret trigraph sequences; standard until C++17.
pub const TRIGRAPHS: Features = 1 << 5;
/// `0b`-prefixed binary integer literals; standard from C++14.
pub const BINARY_LITERALS: Features = 1 << 6;
/// UTF-8 character literals (`u8'...'`); standard from C++17, optional for
/// C++11/14 and C11 only.
pub const UTF8_CHAR_LITERALS: Features = 1 << 7;
/// `0x`-prefixed hexadecimal floating point literals; standard from C99 and
/// C++17.
pub const HEX_FLOAT_LITERALS: Features = 1 << 8;
/// Allow `\uXXXX` and `\UXXXXXXXX` universal character names; standard from
/// C99 and C++11.
pub const UCNS: Features = 1 << 9;
/// Allow dollar characters in identifiers.
pub const IDENTIFIER_DOLLARS: Features = 1 << 10;
/// The `inline` function specifier; standard from C99 and in C++.
pub const INLINE_FUNCTIONS: Features = 1 << 11;
/// Lexer: do not interpret preprocessor directives.
pub const NO_PP_DIRECTIVES: Features = 1 << 12;

pub const C89_STD_FEATURES: Features = TRIGRAPHS;
pub const C90_STD_FEATURES: Features = C89_STD_FEATURES;
pub const C95_STD_FEATURES: Features = DIGRAPHS | TRIGRAPHS;
pub const C99_STD_FEATURES: Features =
    C95_STD_FEATURES | LINE_COMMENTS | UCNS | LONG_LONG | HEX_FLOAT_LITERALS | INLINE_FUNCTIONS;
pub const C11_STD_FEATURES: Features = C99_STD_FEATURES;

pub const CXX98_STD_FEATURES: Features = LINE_COMMENTS | DIGRAPHS | TRIGRAPHS | INLINE_FUNCTIONS;
pub const CXX03_STD_FEATURES: Features = CXX98_STD_FEATURES;
pub const CXX11_STD_FEATURES: Features = CXX03_STD_FEATURES | LONG_LONG | UCNS;
pub const CXX14_STD_FEATURES: Features = CXX11_STD_FEATURES | BINARY_LITERALS;
pub const CXX17_STD_FEATURES: Features =
    (CXX14_STD_FEATURES ^ TRIGRAPHS) | UTF8_CHAR_LITERALS | HEX_FLOAT_LITERALS;

/// Maps UTF-8 lexemes to token kinds. Seeded with keywords; the lexer also
/// interns identifiers into its own copy.
pub type KeywordTable = IndexMap<String, TokenKind>;

const C89_KEYWORDS: &[(&str, TokenKind)] = &[
    ("auto", TokenKind::KwAuto),
    ("break", TokenKind::KwBreak),
    ("case", TokenKind::KwCase),
    ("char", TokenKind::KwChar),
    ("const", TokenKind::KwConst),
    ("continue", TokenKind::KwContinue),
    ("default", TokenKind::KwDefault),
    ("do", TokenKind::KwDo),
    ("double", TokenKind::KwDouble),
    ("else", TokenKind::KwElse),
    ("enum", TokenKind::KwEnum),
    ("extern", TokenKind::KwExtern),
    ("float", TokenKind::KwFloat),
    ("for", TokenKind::KwFor),
    ("goto", TokenKind::KwGoto),
    ("if", TokenKind::KwIf),
    ("int", TokenKind::KwInt),
    ("long", TokenKind::KwLong),
    ("register", TokenKind::KwRegister),
    ("return", TokenKind::KwReturn),
    ("short", TokenKind::KwShort),
    ("signed", TokenKind::KwSigned),
    ("sizeof", TokenKind::KwSizeof),
    ("static", TokenKind::KwStatic),
    ("struct", TokenKind::KwStruct),
    ("switch", TokenKind::KwSwitch),
    ("typedef", TokenKind::KwTypedef),
    ("union", TokenKind::KwUnion),
    ("unsigned", TokenKind::KwUnsigned),
    ("void", TokenKind::KwVoid),
    ("volatile", TokenKind::KwVolatile),
    ("while", TokenKind::KwWhile),
];

const C99_KEYWORDS: &[(&str, TokenKind)] = &[
    ("_Bool", TokenKind::KwBool),
    ("_Complex", TokenKind::KwComplex),
    ("_Imaginary", TokenKind::KwImaginary),
    ("inline", TokenKind::KwInline),
    ("restrict", TokenKind::KwRestrict),
];

const C11_KEYWORDS: &[(&str, TokenKind)] = &[
    ("_Alignas", TokenKind::KwAlignas),
    ("_Alignof", TokenKind::KwAlignof),
    ("_Atomic", TokenKind::KwAtomic),
    ("_Generic", TokenKind::KwGeneric),
    ("_Noreturn", TokenKind::KwNoreturn),
    ("_Static_assert", TokenKind::KwStaticAssert),
    ("_Thread_local", TokenKind::KwThreadLocal),
];

const CXX98_KEYWORDS: &[(&str, TokenKind)] = &[
    ("and", TokenKind::AmpAmp),
    ("and_eq", TokenKind::AmpEqual),
    ("asm", TokenKind::KwAsm),
    ("bitand", TokenKind::Amp),
    ("bitor", TokenKind::Pipe),
    ("bool", TokenKind::KwBool),
    ("catch", TokenKind::KwCatch),
    ("class", TokenKind::KwClass),
    ("compl", TokenKind::Tilde),
    ("const_cast", TokenKind::KwConstCast),
    ("delete", TokenKind::KwDelete),
    ("dynamic_cast", TokenKind::KwDynamicCast),
    ("explicit", TokenKind::KwExplicit),
    ("export", TokenKind::KwExport),
    ("false", TokenKind::KwFalse),
    ("friend", TokenKind::KwFriend),
    ("inline", TokenKind::KwInline),
    ("mutable", TokenKind::KwMutable),
    ("namespace", TokenKind::KwNamespace),
    ("new", TokenKind::KwNew),
    ("not", TokenKind::Exclaim),
    ("not_eq", TokenKind::ExclaimEqual),
    ("operator", TokenKind::KwOperator),
    ("or", TokenKind::PipePipe),
    ("or_eq", TokenKind::PipeEqual),
    ("private", TokenKind::KwPrivate),
    ("protected", TokenKind::KwProtected),
    ("public", TokenKind::KwPublic),
    ("reinterpret_cast", TokenKind::KwReinterpretCast),
    ("static_cast", TokenKind::KwStaticCast),
    ("template", TokenKind::KwTemplate),
    ("this", TokenKind::KwThis),
    ("throw", TokenKind::KwThrow),
    ("true", TokenKind::KwTrue),
    ("try", TokenKind::KwTry),
    ("typeid", TokenKind::KwTypeid),
    ("typename", TokenKind::KwTypename),
    ("using", TokenKind::KwUsing),
    ("virtual", TokenKind::KwVirtual),
    ("wchar_t", TokenKind::KwWcharT),
    ("__wchar_t", TokenKind::KwWcharT),
    ("xor", TokenKind::Caret),
    ("xor_eq", TokenKind::CaretEqual),
];

const CXX11_KEYWORDS: &[(&str, TokenKind)] = &[
    ("alignas", TokenKind::KwAlignas),
    ("alignof", TokenKind::KwAlignof),
    ("char16_t", TokenKind::KwChar16T),
    ("char32_t", TokenKind::KwChar32T),
    ("constexpr", TokenKind::KwConstexpr),
    ("decltype", TokenKind::KwDecltype),
    ("noexcept", TokenKind::KwNoexcept),
    ("nullptr", TokenKind::KwNullptr),
    ("static_assert", TokenKind::KwStaticAssert),
    ("thread_local", TokenKind::KwThreadLocal),
];

fn add_entries(keywords: &mut KeywordTable, entries: &[(&str, TokenKind)]) {
    for &(spelling, kind) in entries {
        keywords.insert(spelling.to_string(), kind);
    }
}

pub fn add_c89_keywords(keywords: &mut KeywordTable) {
    add_entries(keywords, C89_KEYWORDS);
}

pub fn add_c99_keywords(keywords: &mut KeywordTable) {
    add_c89_keywords(keywords);
    add_entries(keywords, C99_KEYWORDS);
}

pub fn add_c11_keywords(keywords: &mut KeywordTable) {
    add_c99_keywords(keywords);
    add_entries(keywords, C11_KEYWORDS);
}

pub fn add_cxx98_keywords(keywords: &mut KeywordTable) {
    add_c89_keywords(keywords);
    add_entries(keywords, CXX98_KEYWORDS);
}

pub fn add_cxx11_keywords(keywords: &mut KeywordTable) {
    add_cxx98_keywords(keywords);
    add_entries(keywords, CXX11_KEYWORDS);
}

/// The name of a language standard as selected on a command line: either a C
/// standard or a C++ standard.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StandardName {
    C(CStd),
    Cxx(CxxStd),
}

/// Case-insensitive lookup of a language name (`"c"`, `"c++"`), yielding the
/// latest standard of that family. Unknown names yield `None`.
pub fn language(name: &str) -> Option<StandardName> {
    match name.to_ascii_lowercase().as_str() {
        "c" => Some(StandardName::C(CStd::LATEST)),
        "c++" => Some(StandardName::Cxx(CxxStd::LATEST)),
        _ => None,
    }
}

/// Case-insensitive lookup of a standard name (`"c99"`, `"c++0x"`, ...).
/// Unknown names yield `None`.
pub fn standard(name: &str) -> Option<StandardName> {
    let lookup = match name.to_ascii_lowercase().as_str() {
        "c89" => StandardName::C(CStd::C89),
        "c90" => StandardName::C(CStd::C90),
        "c95" => StandardName::C(CStd::C95),
        "c99" => StandardName::C(CStd::C99),
        "c11" => StandardName::C(CStd::C11),
        "c++98" => StandardName::Cxx(CxxStd::Cxx98),
        "c++03" => StandardName::Cxx(CxxStd::Cxx03),
        "c++0x" | "c++11" => StandardName::Cxx(CxxStd::Cxx11),
        "c++1y" | "c++14" => StandardName::Cxx(CxxStd::Cxx14),
        "c++1z" | "c++17" => StandardName::Cxx(CxxStd::Cxx17),
        _ => return None,
    };
    Some(lookup)
}

/// Errors detectable when building a [`CxxOptions`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OptionsError {
    NoLanguageSelected,
    Utf8CharLiteralsUnavailable,
}

impl Error for OptionsError {}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            OptionsError::NoLanguageSelected => "no language selected",
            OptionsError::Utf8CharLiteralsUnavailable => {
                "UTF-8 character literals not available before C11/C++11"
            }
        };
        write!(f, "{}", s)
    }
}

/// Builder for [`CxxOptions`]. At least one of `c_standard`/`cxx_standard`
/// must be given; `enable`/`disable` adjust the feature set implied by the
/// selected standards.
#[derive(Clone, Copy, Debug, Default)]
pub struct CxxOptionsBuilder {
    c: Option<CStd>,
    cxx: Option<CxxStd>,
    enable: Features,
    disable: Features,
}

impl CxxOptionsBuilder {
    pub fn new() -> Self {
        CxxOptionsBuilder::default()
    }

    pub fn c_standard(mut self, std: CStd) -> Self {
        self.c = Some(std);
        self
    }

    pub fn cxx_standard(mut self, std: CxxStd) -> Self {
        self.cxx = Some(std);
        self
    }

    pub fn enable(mut self, features: Features) -> Self {
        self.enable |= features;
        self
    }

    pub fn disable(mut self, features: Features) -> Self {
        self.disable |= features;
        self
    }

    pub fn build(self) -> Result<CxxOptions, OptionsError> {
        if self.c.is_none() && self.cxx.is_none() {
            return Err(OptionsError::NoLanguageSelected);
        }

        let mut features = 0;
        if let Some(c) = self.c {
            features |= match c {
                CStd::C89 => C89_STD_FEATURES,
                CStd::C90 => C90_STD_FEATURES,
                CStd::C95 => C95_STD_FEATURES,
                CStd::C99 => C99_STD_FEATURES,
                CStd::C11 => C11_STD_FEATURES,
            };
        }
        if let Some(cxx) = self.cxx {
            features |= match cxx {
                CxxStd::Cxx98 => CXX98_STD_FEATURES,
                CxxStd::Cxx03 => CXX03_STD_FEATURES,
                CxxStd::Cxx11 => CXX11_STD_FEATURES,
                CxxStd::Cxx14 => CXX14_STD_FEATURES,
                CxxStd::Cxx17 => CXX17_STD_FEATURES,
            };
        }
        features = (features | self.enable) & !self.disable;

        if (features & UTF8_CHAR_LITERALS) != 0
            && self.c < Some(CStd::C11)
            && self.cxx < Some(CxxStd::Cxx11)
        {
            return Err(OptionsError::Utf8CharLiteralsUnavailable);
        }

        let mut keywords = KeywordTable::new();
        match self.c {
            Some(CStd::C89) | Some(CStd::C90) | Some(CStd::C95) => add_c89_keywords(&mut keywords),
            Some(CStd::C99) => add_c99_keywords(&mut keywords),
            Some(CStd::C11) => add_c11_keywords(&mut keywords),
            None => (),
        }
        match self.cxx {
            Some(CxxStd::Cxx98) | Some(CxxStd::Cxx03) => add_cxx98_keywords(&mut keywords),
            Some(CxxStd::Cxx11) | Some(CxxStd::Cxx14) | Some(CxxStd::Cxx17) => {
                add_cxx11_keywords(&mut keywords)
            }
            None => (),
        }
        if (features & INLINE_FUNCTIONS) != 0 {
            keywords.insert("inline".to_string(), TokenKind::KwInline);
        } else {
            keywords.shift_remove("inline");
        }

        Ok(CxxOptions {
            c: self.c,
            cxx: self.cxx,
            features,
            keywords,
        })
    }
}

/// The language configuration a lexer and grammar are built against.
/// Immutable after construction; safely shareable by reference.
#[derive(Clone, Debug)]
pub struct CxxOptions {
    c: Option<CStd>,
    cxx: Option<CxxStd>,
    features: Features,
    keywords: KeywordTable,
}

impl CxxOptions {
    pub fn builder() -> CxxOptionsBuilder {
        CxxOptionsBuilder::new()
    }

    /// Shorthand for the latest C and C++ standards together.
    pub fn latest() -> CxxOptions {
        CxxOptionsBuilder::new()
            .c_standard(CStd::LATEST)
            .cxx_standard(CxxStd::LATEST)
            .build()
            .expect("latest standards are always a valid combination")
    }

    pub fn c(&self) -> Option<CStd> {
        self.c
    }

    pub fn cxx(&self) -> Option<CxxStd> {
        self.cxx
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    /// Are all the features in `want` enabled?
    pub fn have(&self, want: Features) -> bool {
        (self.features & want) == want
    }

    pub fn lang_c(&self) -> bool {
        self.c.is_some()
    }

    pub fn lang_cxx(&self) -> bool {
        self.cxx.is_some()
    }

    pub fn std_c99(&self) -> bool {
        self.c >= Some(CStd::C99)
    }

    pub fn std_c11(&self) -> bool {
        self.c >= Some(CStd::C11)
    }

    pub fn std_cxx11(&self) -> bool {
        self.cxx >= Some(CxxStd::Cxx11)
    }

    pub fn std_cxx14(&self) -> bool {
        self.cxx >= Some(CxxStd::Cxx14)
    }

    pub fn std_cxx17(&self) -> bool {
        self.cxx >= Some(CxxStd::Cxx17)
    }

    /// `"C"`, `"C++"` or `"C/C++"` according to the selected languages.
    pub fn lang_name(&self) -> String {
        match (self.c, self.cxx) {
            (Some(_), Some(_)) => "C/C++".to_string(),
            (Some(_), None) => "C".to_string(),
            (None, Some(_)) => "C++".to_string(),
            (None, None) => "unknown".to_string(),
        }
    }

    /// The selected standards, e.g. `"C11/C++17"`.
    pub fn std_name(&self) -> String {
        let mut name = String::new();
        if let Some(c) = self.c {
            name.push_str(&c.to_string());
        }
        if let Some(cxx) = self.cxx {
            if !name.is_empty() {
                name.push('/');
            }
            name.push_str(&cxx.to_string());
        }
        if name.is_empty() {
            name.push_str("unknown");
        }
        name
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn no_language_is_rejected() {
        assert_eq!(
            CxxOptionsBuilder::new().build().unwrap_err(),
            OptionsError::NoLanguageSelected
        );
    }

    #[test]
    fn standard_feature_sets() {
        let opts = CxxOptionsBuilder::new().c_standard(CStd::C89).build().unwrap();
        assert!(opts.have(TRIGRAPHS));
        assert!(!opts.have(DIGRAPHS));
        assert!(!opts.have(LINE_COMMENTS));

        let opts = CxxOptionsBuilder::new().c_standard(CStd::C99).build().unwrap();
        assert!(opts.have(LINE_COMMENTS | UCNS | LONG_LONG | HEX_FLOAT_LITERALS));
        assert!(opts.have(INLINE_FUNCTIONS));
        assert!(!opts.have(BINARY_LITERALS));

        let opts = CxxOptionsBuilder::new()
            .cxx_standard(CxxStd::Cxx14)
            .build()
            .unwrap();
        assert!(opts.have(TRIGRAPHS | BINARY_LITERALS | LONG_LONG | UCNS));
        assert!(!opts.have(UTF8_CHAR_LITERALS));

        // C++17 drops trigraphs and gains UTF-8 char literals and hex floats.
        let opts = CxxOptionsBuilder::new()
            .cxx_standard(CxxStd::Cxx17)
            .build()
            .unwrap();
        assert!(!opts.have(TRIGRAPHS));
        assert!(opts.have(UTF8_CHAR_LITERALS | HEX_FLOAT_LITERALS | BINARY_LITERALS));
    }

    #[test]
    fn features_can_be_disabled() {
        let opts = CxxOptionsBuilder::new()
            .c_standard(CStd::C99)
            .disable(LONG_LONG)
            .build()
            .unwrap();
        assert!(!opts.have(LONG_LONG));
        assert!(opts.have(UCNS));
    }

    #[test]
    fn utf8_char_literals_need_c11_or_cxx11() {
        let err = CxxOptionsBuilder::new()
            .c_standard(CStd::C99)
            .enable(UTF8_CHAR_LITERALS)
            .build()
            .unwrap_err();
        assert_eq!(err, OptionsError::Utf8CharLiteralsUnavailable);

        // A C++11 selector satisfies the requirement even with an older C one.
        assert!(CxxOptionsBuilder::new()
            .c_standard(CStd::C89)
            .cxx_standard(CxxStd::Cxx11)
            .enable(UTF8_CHAR_LITERALS)
            .build()
            .is_ok());
    }

    #[test]
    fn keyword_seeding_follows_standards() {
        let opts = CxxOptionsBuilder::new().c_standard(CStd::C89).build().unwrap();
        assert_eq!(opts.keywords().get("while"), Some(&TokenKind::KwWhile));
        assert_eq!(opts.keywords().get("restrict"), None);
        assert_eq!(opts.keywords().get("inline"), None);
        assert_eq!(opts.keywords().get("class"), None);

        let opts = CxxOptionsBuilder::new().c_standard(CStd::C99).build().unwrap();
        assert_eq!(opts.keywords().get("restrict"), Some(&TokenKind::KwRestrict));
        assert_eq!(opts.keywords().get("inline"), Some(&TokenKind::KwInline));
        assert_eq!(opts.keywords().get("_Generic"), None);

        let opts = CxxOptionsBuilder::new().c_standard(CStd::C11).build().unwrap();
        assert_eq!(opts.keywords().get("_Generic"), Some(&TokenKind::KwGeneric));
        assert_eq!(
            opts.keywords().get("_Static_assert"),
            Some(&TokenKind::KwStaticAssert)
        );

        let opts = CxxOptionsBuilder::new()
            .cxx_standard(CxxStd::Cxx03)
            .build()
            .unwrap();
        assert_eq!(opts.keywords().get("class"), Some(&TokenKind::KwClass));
        assert_eq!(opts.keywords().get("and"), Some(&TokenKind::AmpAmp));
        assert_eq!(opts.keywords().get("__wchar_t"), Some(&TokenKind::KwWcharT));
        assert_eq!(opts.keywords().get("constexpr"), None);

        let opts = CxxOptionsBuilder::new()
            .cxx_standard(CxxStd::Cxx11)
            .build()
            .unwrap();
        assert_eq!(opts.keywords().get("constexpr"), Some(&TokenKind::KwConstexpr));
        assert_eq!(opts.keywords().get("nullptr"), Some(&TokenKind::KwNullptr));
    }

    #[test]
    fn inline_keyword_tracks_the_feature() {
        let opts = CxxOptionsBuilder::new()
            .c_standard(CStd::C89)
            .enable(INLINE_FUNCTIONS)
            .build()
            .unwrap();
        assert_eq!(opts.keywords().get("inline"), Some(&TokenKind::KwInline));

        let opts = CxxOptionsBuilder::new()
            .cxx_standard(CxxStd::Cxx11)
            .disable(INLINE_FUNCTIONS)
            .build()
            .unwrap();
        assert_eq!(opts.keywords().get("inline"), None);
    }

    #[test]
    fn standard_and_language_lookup() {
        assert_eq!(standard("c99"), Some(StandardName::C(CStd::C99)));
        assert_eq!(standard("C11"), Some(StandardName::C(CStd::C11)));
        assert_eq!(standard("c++0x"), Some(StandardName::Cxx(CxxStd::Cxx11)));
        assert_eq!(standard("c++1y"), Some(StandardName::Cxx(CxxStd::Cxx14)));
        assert_eq!(standard("C++1Z"), Some(StandardName::Cxx(CxxStd::Cxx17)));
        assert_eq!(standard("c++17"), Some(StandardName::Cxx(CxxStd::Cxx17)));
        assert_eq!(standard("c++20"), None);
        assert_eq!(standard(""), None);

        assert_eq!(language("c"), Some(StandardName::C(CStd::C11)));
        assert_eq!(language("C++"), Some(StandardName::Cxx(CxxStd::Cxx17)));
        assert_eq!(language("fortran"), None);
    }

    #[test]
    fn names() {
        let opts = CxxOptions::latest();
        assert_eq!(opts.lang_name(), "C/C++");
        assert_eq!(opts.std_name(), "C11/C++17");

        let opts = CxxOptionsBuilder::new()
            .cxx_standard(CxxStd::Cxx98)
            .build()
            .unwrap();
        assert_eq!(opts.lang_name(), "C++");
        assert_eq!(opts.std_name(), "C++98");
    }

    #[test]
    fn standard_gates() {
        let opts = CxxOptionsBuilder::new()
            .c_standard(CStd::C95)
            .build()
            .unwrap();
        assert!(opts.lang_c());
        assert!(!opts.std_c99());
        assert!(!opts.lang_cxx());
        assert!(!opts.std_cxx11());

        let opts = CxxOptionsBuilder::new()
            .cxx_standard(CxxStd::Cxx14)
            .build()
            .unwrap();
        assert!(opts.std_cxx11() && opts.std_cxx14() && !opts.std_cxx17());
    }
}
