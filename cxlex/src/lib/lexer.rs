//! The C/C++ token scanner.
//!
//! A `Lexer` pulls code points from a [`CharSource`], applying three
//! transparent transformations before classification: trigraph folding (when
//! `TRIGRAPHS` is on), escaped-newline splicing, and universal character name
//! decoding inside identifiers and literals (when `UCNS` is on). The first
//! two rewrite the source window in place, so offsets and line/column
//! positions describe the logical stream.
//!
//! `lex` hands out one classified [`Token`] per call, suppressing whitespace
//! and comments unless `KEEP_SPACE`/`KEEP_COMMENTS` are set. A newline is
//! always delivered as its own whitespace token so that preprocessor
//! directive line boundaries stay observable.

use std::io::Read;

use lazy_static::lazy_static;
use vob::Vob;

use crate::diagnostics::{Diagnostic, Severity};
use crate::options::{
    CxxOptions, KeywordTable, BINARY_LITERALS, DIGRAPHS, HEX_FLOAT_LITERALS, IDENTIFIER_DOLLARS,
    KEEP_COMMENTS, KEEP_SPACE, LINE_COMMENTS, LONG_LONG, NO_PP_DIRECTIVES, TRIGRAPHS,
    UCNS, UTF8_CHAR_LITERALS,
};
use crate::source::CharSource;
use crate::token::{
    default_spelling, is_preprocessor_directive, is_punctuation, token_kind_name, Token,
    TokenFlags, TokenKind, TF_ALTERNATE, TF_PREPROCESS, TF_SPACE_BEFORE, TF_SPLITABLE,
    TF_STARTS_LINE,
};

const MAX_RAW_DELIMITER_LEN: usize = 16;

lazy_static! {
    /// Code points below U+10000 that may appear in an identifier. The
    /// astral planes are handled by a range rule instead (see
    /// `Lexer::is_valid_ident_char`).
    static ref BMP_IDENT_CHARS: Vob = {
        const CHAR_RANGES: &[(u32, u32)] = &[
            (0x24, 0x24), (0x30, 0x39), (0x41, 0x5a), (0x5f, 0x5f),
            (0x61, 0x7a), (0xa8, 0xa8), (0xaa, 0xaa), (0xad, 0xad),
            (0xaf, 0xaf), (0xb2, 0xb5), (0xb7, 0xba), (0xbc, 0xbe),
            (0xc0, 0xd6), (0xd8, 0xf6), (0xf8, 0xff),

            (0x0100, 0x167f), (0x1681, 0x180d), (0x180f, 0x1fff),
            (0x200b, 0x200d), (0x202a, 0x202e), (0x203f, 0x2040),
            (0x2054, 0x2054), (0x2060, 0x206f), (0x2070, 0x218f),
            (0x2460, 0x24ff), (0x2776, 0x2793), (0x2c00, 0x2dff),
            (0x2e80, 0x2fff), (0x3004, 0x3007), (0x3021, 0x302f),
            (0x3031, 0x303f), (0x3040, 0xd7ff), (0xf900, 0xfd3d),
            (0xfd40, 0xfdcf), (0xfdf0, 0xfe44), (0xfe47, 0xfffd),
        ];
        let mut bits = Vob::from_elem(false, 0x10000);
        for &(lo, hi) in CHAR_RANGES {
            for c in lo..=hi {
                bits.set(c as usize, true);
            }
        }
        bits
    };
}

pub struct Lexer<'opt, R: Read> {
    options: &'opt CxxOptions,
    source: CharSource<R>,
    /// The lexer's own copy of the seeded keyword table; identifiers are
    /// interned into it as they are first seen.
    kw_id_table: KeywordTable,
    /// Scratch buffer for the spelling of the token under construction.
    tmp_spelling: String,
    /// Stack of expected closing token kinds matching the "opening" tokens
    /// `(`, `{`, `[` and `<`; the top of the stack is the last element.
    closing_tokens: Vec<TokenKind>,
    next_flags: TokenFlags,
    diagnostics: Vec<Diagnostic>,
    bad_reported: bool,
}

impl<'opt, R: Read> Lexer<'opt, R> {
    pub fn new(options: &'opt CxxOptions, input: R) -> Lexer<'opt, R> {
        Lexer {
            options,
            source: CharSource::new(input),
            kw_id_table: options.keywords().clone(),
            tmp_spelling: String::new(),
            closing_tokens: Vec::new(),
            next_flags: TF_STARTS_LINE,
            diagnostics: Vec::new(),
            bad_reported: false,
        }
    }

    pub fn options(&self) -> &CxxOptions {
        self.options
    }

    /// The symbolic name of `kind`; see [`token_kind_name`].
    pub fn token_kind_name(&self, kind: TokenKind) -> &'static str {
        token_kind_name(kind)
    }

    /// Diagnostics collected so far, in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// How many opening delimiters are currently unmatched. Zero after the
    /// last token of any well-formed input.
    pub fn open_delimiters(&self) -> usize {
        self.closing_tokens.len()
    }

    /// Drop interned identifier entries, reverting to the standard-seeded
    /// keyword table.
    pub fn clear_storage(&mut self) -> &mut Self {
        self.kw_id_table = self.options.keywords().clone();
        self
    }

    /// Advance to the next token. Returns a token with kind
    /// [`TokenKind::Eof`] at end of input. On a fatal I/O error the returned
    /// token is reset (kind [`TokenKind::Null`]) and a diagnostic is
    /// recorded.
    pub fn lex(&mut self) -> Token {
        loop {
            let mut t = Token::default();
            t.set_flags(self.next_flags);
            // Everything but the preprocessor flag is recomputed per token.
            self.next_flags &= TF_PREPROCESS;

            match self.read_token(&mut t) {
                TokenKind::Whitespace => {
                    if t.spelling() == "\n" {
                        self.next_flags |= TF_STARTS_LINE;
                        // Newline is always a separate token so directive
                        // line boundaries stay visible downstream.
                        return t;
                    }
                    self.next_flags |= TF_SPACE_BEFORE;
                    if self.options.have(KEEP_SPACE) {
                        return t;
                    }
                }
                TokenKind::Comment => {
                    self.next_flags |= TF_SPACE_BEFORE;
                    if self.options.have(KEEP_COMMENTS) {
                        return t;
                    }
                }
                _ => return t,
            }
        }
    }

    fn update_next_token_flags(&mut self, t: &Token) {
        match t.kind() {
            TokenKind::Whitespace => {
                if self.source.last_read() == Some('\n') {
                    self.next_flags &= !TF_PREPROCESS;
                }
            }
            TokenKind::Eof => {
                self.next_flags = (self.next_flags & !TF_PREPROCESS) | TF_STARTS_LINE;
            }
            _ => (),
        }
    }

    fn bad_input(&mut self, t: &mut Token) -> TokenKind {
        if !self.bad_reported {
            self.bad_reported = true;
            self.emit_here(Severity::FatalError, 1, "input error");
        }
        t.reset();
        TokenKind::Null
    }

    fn read_token(&mut self, t: &mut Token) -> TokenKind {
        let mut eat_next = false;

        let ch = match self.read_char() {
            Some(ch) => ch,
            None => {
                t.set_location(
                    self.source.offset(),
                    self.source.line(),
                    self.source.column(),
                );
                if self.source.bad() && !self.bad_reported {
                    return self.bad_input(t);
                }
                // a failed stream was already reported; treat it as ended
                t.set_kind_and_spelling(TokenKind::Eof)
                    .add_flags(TF_STARTS_LINE);
                self.update_next_token_flags(t);
                return TokenKind::Eof;
            }
        };

        if let Some((offset, line, column)) = self.source.last_pos() {
            t.set_location(offset, line, column);
        }

        match ch {
            '#' => {
                if self.peek_char() == Some('#') {
                    t.set_kind_and_spelling(TokenKind::HashHash);
                    eat_next = true;
                } else {
                    t.set_kind_and_spelling(TokenKind::Hash);
                    if !self.options.have(NO_PP_DIRECTIVES) && t.has_flags(TF_STARTS_LINE) {
                        self.pp_directive(t);
                    }
                }
            }
            '/' => match self.peek_char() {
                Some('=') => {
                    t.set_kind_and_spelling(TokenKind::SlashEqual);
                    eat_next = true;
                }
                Some('*') => self.comment(t),
                Some('/') if self.options.have(LINE_COMMENTS) => self.comment(t),
                _ => {
                    t.set_kind_and_spelling(TokenKind::Slash);
                }
            },
            '.' => {
                if self.options.lang_cxx() && self.peek_char() == Some('*') {
                    t.set_kind_and_spelling(TokenKind::DotStar);
                    eat_next = true;
                } else if matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
                    self.numeric_literal(t);
                } else if self.peek_char() == Some('.') {
                    self.read_char(); // eat 2nd '.'
                    if self.peek_char() == Some('.') {
                        t.set_kind_and_spelling(TokenKind::Ellipsis);
                        eat_next = true;
                    } else {
                        self.source.backtrack(1); // spit 2nd '.' back out
                        t.set_kind_and_spelling(TokenKind::Dot);
                    }
                } else {
                    t.set_kind_and_spelling(TokenKind::Dot);
                }
            }
            '<' => match self.peek_char() {
                Some('<') => {
                    self.read_char(); // consume 2nd '<'
                    if self.peek_char() == Some('=') {
                        t.set_kind_and_spelling(TokenKind::LShiftEqual);
                        eat_next = true;
                    } else {
                        t.set_kind_and_spelling(TokenKind::LShift);
                    }
                }
                Some('=') => {
                    t.set_kind_and_spelling(TokenKind::LessEqual);
                    eat_next = true;
                }
                Some('%') => {
                    // "<%" digraph => '{'
                    if self.options.have(DIGRAPHS) {
                        t.add_flags(TF_ALTERNATE);
                        t.set_kind(TokenKind::LBrace).set_spelling("<%");
                        self.push_closing_token(TokenKind::RBrace);
                        eat_next = true;
                    } else {
                        t.set_kind_and_spelling(TokenKind::Less);
                        self.push_closing_token(TokenKind::Greater);
                    }
                }
                Some(':') => {
                    // "<:" digraph => '['
                    if !self.options.have(DIGRAPHS) {
                        t.set_kind_and_spelling(TokenKind::Less);
                        self.push_closing_token(TokenKind::Greater);
                    } else {
                        self.read_char();

                        // C++11: don't misinterpret a sequence like
                        // std::set<::std::string> as std::set[:std::string>
                        if self.options.std_cxx11() && self.peek_char() == Some(':') {
                            self.read_char();
                            match self.peek_char() {
                                Some(':') | Some('>') => self.source.backtrack(1), // treat as '['
                                _ => {
                                    self.source.backtrack(2);
                                    t.set_kind_and_spelling(TokenKind::Less);
                                    self.push_closing_token(TokenKind::Greater);
                                }
                            }
                        }

                        if t.kind() == TokenKind::Null {
                            t.add_flags(TF_ALTERNATE);
                            t.set_kind(TokenKind::LSquare).set_spelling("<:");
                            self.push_closing_token(TokenKind::RSquare);
                        }
                    }
                }
                _ => {
                    t.set_kind_and_spelling(TokenKind::Less);
                    self.push_closing_token(TokenKind::Greater);
                }
            },
            '>' => match self.peek_char() {
                Some('>') => {
                    self.read_char(); // consume 2nd '>'
                    if self.peek_char() == Some('=') {
                        t.set_kind_and_spelling(TokenKind::RShiftEqual);
                        eat_next = true;
                    } else {
                        t.set_kind_and_spelling(TokenKind::RShift);
                    }
                    if self.next_closing_token_is(TokenKind::Greater) && self.options.std_cxx11() {
                        t.add_flags(TF_SPLITABLE);
                    }
                }
                Some('=') => {
                    t.set_kind_and_spelling(TokenKind::GreaterEqual);
                    if self.next_closing_token_is(TokenKind::Greater) && self.options.std_cxx11() {
                        t.add_flags(TF_SPLITABLE);
                    }
                    eat_next = true;
                }
                _ => {
                    t.set_kind_and_spelling(TokenKind::Greater);
                    self.pop_closing_token_if(TokenKind::Greater);
                }
            },
            '+' => match self.peek_char() {
                Some('=') => {
                    t.set_kind_and_spelling(TokenKind::PlusEqual);
                    eat_next = true;
                }
                Some('+') => {
                    t.set_kind_and_spelling(TokenKind::PlusPlus);
                    eat_next = true;
                }
                _ => {
                    t.set_kind_and_spelling(TokenKind::Plus);
                }
            },
            '-' => match self.peek_char() {
                Some('=') => {
                    t.set_kind_and_spelling(TokenKind::MinusEqual);
                    eat_next = true;
                }
                Some('-') => {
                    t.set_kind_and_spelling(TokenKind::MinusMinus);
                    eat_next = true;
                }
                Some('>') => {
                    self.read_char();
                    if self.options.lang_cxx() && self.peek_char() == Some('*') {
                        t.set_kind_and_spelling(TokenKind::ArrowStar);
                        eat_next = true;
                    } else {
                        t.set_kind_and_spelling(TokenKind::Arrow);
                    }
                }
                _ => {
                    t.set_kind_and_spelling(TokenKind::Minus);
                }
            },
            '*' => {
                if self.peek_char() == Some('=') {
                    t.set_kind_and_spelling(TokenKind::StarEqual);
                    eat_next = true;
                } else {
                    t.set_kind_and_spelling(TokenKind::Star);
                }
            }
            '%' => match self.peek_char() {
                Some('=') => {
                    t.set_kind_and_spelling(TokenKind::PercentEqual);
                    eat_next = true;
                }
                Some('>') => {
                    // "%>" digraph => '}'
                    if self.options.have(DIGRAPHS) {
                        t.add_flags(TF_ALTERNATE);
                        t.set_kind(TokenKind::RBrace).set_spelling("%>");
                        self.pop_closing_token_if(TokenKind::RBrace);
                        eat_next = true;
                    } else {
                        t.set_kind_and_spelling(TokenKind::Percent);
                    }
                }
                Some(':') => {
                    // "%:" digraph => '#'
                    if !self.options.have(DIGRAPHS) {
                        t.set_kind_and_spelling(TokenKind::Percent);
                    } else {
                        t.add_flags(TF_ALTERNATE);
                        self.read_char();

                        if self.peek_char() == Some('%') {
                            self.read_char();
                            if self.peek_char() == Some(':') {
                                // "%:%:" => "##"
                                t.set_kind(TokenKind::HashHash).set_spelling("%:%:");
                                eat_next = true;
                            } else {
                                self.source.backtrack(1);
                            }
                        }

                        if t.kind() != TokenKind::HashHash {
                            t.set_kind(TokenKind::Hash).set_spelling("%:");
                            if !self.options.have(NO_PP_DIRECTIVES) && t.has_flags(TF_STARTS_LINE)
                            {
                                self.pp_directive(t);
                            }
                        }
                    }
                }
                _ => {
                    t.set_kind_and_spelling(TokenKind::Percent);
                }
            },
            '&' => match self.peek_char() {
                Some('=') => {
                    t.set_kind_and_spelling(TokenKind::AmpEqual);
                    eat_next = true;
                }
                Some('&') => {
                    t.set_kind_and_spelling(TokenKind::AmpAmp);
                    eat_next = true;
                }
                _ => {
                    t.set_kind_and_spelling(TokenKind::Amp);
                }
            },
            '|' => match self.peek_char() {
                Some('=') => {
                    t.set_kind_and_spelling(TokenKind::PipeEqual);
                    eat_next = true;
                }
                Some('|') => {
                    t.set_kind_and_spelling(TokenKind::PipePipe);
                    eat_next = true;
                }
                _ => {
                    t.set_kind_and_spelling(TokenKind::Pipe);
                }
            },
            '^' => {
                if self.peek_char() == Some('=') {
                    t.set_kind_and_spelling(TokenKind::CaretEqual);
                    eat_next = true;
                } else {
                    t.set_kind_and_spelling(TokenKind::Caret);
                }
            }
            '=' => {
                if self.peek_char() == Some('=') {
                    t.set_kind_and_spelling(TokenKind::EqualEqual);
                    eat_next = true;
                } else {
                    t.set_kind_and_spelling(TokenKind::Equal);
                }
            }
            '!' => {
                if self.peek_char() == Some('=') {
                    t.set_kind_and_spelling(TokenKind::ExclaimEqual);
                    eat_next = true;
                } else {
                    t.set_kind_and_spelling(TokenKind::Exclaim);
                }
            }
            ':' => match self.peek_char() {
                Some('>') => {
                    // ":>" digraph => ']'
                    if self.options.have(DIGRAPHS) {
                        t.add_flags(TF_ALTERNATE);
                        t.set_kind(TokenKind::RSquare).set_spelling(":>");
                        self.pop_closing_token_if(TokenKind::RSquare);
                        eat_next = true;
                    } else {
                        t.set_kind_and_spelling(TokenKind::Colon);
                    }
                }
                Some(':') if self.options.lang_cxx() => {
                    t.set_kind_and_spelling(TokenKind::ColonColon);
                    eat_next = true;
                }
                _ => {
                    t.set_kind_and_spelling(TokenKind::Colon);
                }
            },
            'u' => match self.peek_char() {
                Some('8') => {
                    self.read_char();
                    match self.peek_char() {
                        Some('\'') => {
                            if self.options.have(UTF8_CHAR_LITERALS) {
                                self.read_char();
                                t.set_kind(TokenKind::U8CharLiteral);
                                self.string_or_char_literal(t);
                            } else {
                                self.source.backtrack(1);
                                self.identifier_or_keyword(t);
                            }
                        }
                        Some('"') => {
                            if self.options.std_c11() || self.options.std_cxx11() {
                                self.read_char();
                                t.set_kind(TokenKind::U8StrLiteral);
                                self.string_or_char_literal(t);
                            } else {
                                self.source.backtrack(1);
                                self.identifier_or_keyword(t);
                            }
                        }
                        Some('R') => {
                            self.read_char();
                            if self.peek_char() == Some('"') && self.options.std_cxx11() {
                                self.read_char();
                                t.set_kind(TokenKind::U8StrLiteral);
                                self.raw_string_literal(t);
                            } else {
                                self.source.backtrack(2);
                                self.identifier_or_keyword(t);
                            }
                        }
                        _ => {
                            self.source.backtrack(1);
                            self.identifier_or_keyword(t);
                        }
                    }
                }
                Some('R') => {
                    self.read_char();
                    if self.peek_char() == Some('"') && self.options.std_cxx11() {
                        self.read_char();
                        t.set_kind(TokenKind::U16StrLiteral);
                        self.raw_string_literal(t);
                    } else {
                        self.source.backtrack(1);
                        self.identifier_or_keyword(t);
                    }
                }
                Some('"') => {
                    if self.options.std_c11() || self.options.std_cxx11() {
                        self.read_char();
                        t.set_kind(TokenKind::U16StrLiteral);
                        self.string_or_char_literal(t);
                    } else {
                        self.identifier_or_keyword(t);
                    }
                }
                Some('\'') => {
                    if self.options.std_c11() || self.options.std_cxx11() {
                        self.read_char();
                        t.set_kind(TokenKind::U16CharLiteral);
                        self.string_or_char_literal(t);
                    } else {
                        self.identifier_or_keyword(t);
                    }
                }
                _ => self.identifier_or_keyword(t),
            },
            'U' => match self.peek_char() {
                Some('"') => {
                    if self.options.std_c11() || self.options.std_cxx11() {
                        self.read_char();
                        t.set_kind(TokenKind::U32StrLiteral);
                        self.string_or_char_literal(t);
                    } else {
                        self.identifier_or_keyword(t);
                    }
                }
                Some('\'') => {
                    if self.options.std_c11() || self.options.std_cxx11() {
                        self.read_char();
                        t.set_kind(TokenKind::U32CharLiteral);
                        self.string_or_char_literal(t);
                    } else {
                        self.identifier_or_keyword(t);
                    }
                }
                Some('R') => {
                    self.read_char();
                    if self.peek_char() == Some('"') && self.options.std_cxx11() {
                        self.read_char();
                        t.set_kind(TokenKind::U32StrLiteral);
                        self.raw_string_literal(t);
                    } else {
                        self.source.backtrack(1);
                        self.identifier_or_keyword(t);
                    }
                }
                _ => self.identifier_or_keyword(t),
            },
            'L' => match self.peek_char() {
                Some('"') => {
                    self.read_char();
                    t.set_kind(TokenKind::WstrLiteral);
                    self.string_or_char_literal(t);
                }
                Some('\'') => {
                    self.read_char();
                    t.set_kind(TokenKind::WcharLiteral);
                    self.string_or_char_literal(t);
                }
                Some('R') => {
                    self.read_char();
                    if self.peek_char() == Some('"') && self.options.std_cxx11() {
                        self.read_char();
                        t.set_kind(TokenKind::WstrLiteral);
                        self.raw_string_literal(t);
                    } else {
                        self.source.backtrack(1);
                        self.identifier_or_keyword(t);
                    }
                }
                _ => self.identifier_or_keyword(t),
            },
            'R' => {
                if self.peek_char() == Some('"') && self.options.std_cxx11() {
                    self.read_char();
                    t.set_kind(TokenKind::StrLiteral);
                    self.raw_string_literal(t);
                } else {
                    self.identifier_or_keyword(t);
                }
            }
            '"' => {
                t.set_kind(TokenKind::StrLiteral);
                self.string_or_char_literal(t);
            }
            '\'' => {
                t.set_kind(TokenKind::CharLiteral);
                self.string_or_char_literal(t);
            }
            ';' => {
                t.set_kind_and_spelling(TokenKind::Semi);
            }
            ',' => {
                t.set_kind_and_spelling(TokenKind::Comma);
            }
            '~' => {
                t.set_kind_and_spelling(TokenKind::Tilde);
            }
            '?' => {
                t.set_kind_and_spelling(TokenKind::Question);
            }
            '_' => self.identifier_or_keyword(t),
            '{' => {
                t.set_kind_and_spelling(TokenKind::LBrace);
                self.push_closing_token(TokenKind::RBrace);
            }
            '}' => {
                t.set_kind_and_spelling(TokenKind::RBrace);
                self.pop_closing_token_if(TokenKind::RBrace);
            }
            '(' => {
                t.set_kind_and_spelling(TokenKind::LParen);
                self.push_closing_token(TokenKind::RParen);
            }
            ')' => {
                t.set_kind_and_spelling(TokenKind::RParen);
                self.pop_closing_token_if(TokenKind::RParen);
            }
            '[' => {
                t.set_kind_and_spelling(TokenKind::LSquare);
                self.push_closing_token(TokenKind::RSquare);
            }
            ']' => {
                t.set_kind_and_spelling(TokenKind::RSquare);
                self.pop_closing_token_if(TokenKind::RSquare);
            }
            '$' => {
                if self.options.have(IDENTIFIER_DOLLARS) {
                    self.identifier_or_keyword(t);
                } else {
                    t.set_kind_and_spelling(TokenKind::Dollar);
                }
            }
            '\\' => {
                // possible UCN as the start of an identifier
                if matches!(self.peek_char(), Some('u') | Some('U')) && self.options.have(UCNS) {
                    if let Some(c) = self.ucn() {
                        if self.is_valid_initial_ident_char(c) {
                            self.identifier_or_keyword(t);
                        }
                    }
                }
            }
            c if c.is_whitespace() => self.whitespace(t),
            c if c.is_ascii_digit() => self.numeric_literal(t),
            c if self.is_valid_initial_ident_char(c) => self.identifier_or_keyword(t),
            _ => (), // otherwise leave as NULL
        }

        if self.source.bad() {
            return self.bad_input(t);
        }
        if eat_next {
            self.read_char();
        }
        self.update_next_token_flags(t);
        t.kind()
    }

    /*
     * Character-level input pipeline
     */

    fn handle_trigraph(&mut self) -> Option<char> {
        if self.source.last_read() != Some('?') {
            return self.source.last_read();
        }
        match self.source.read() {
            Some('?') => {
                let folded = match self.source.read() {
                    Some('<') => '{',
                    Some('>') => '}',
                    Some('(') => '[',
                    Some(')') => ']',
                    Some('=') => '#',
                    Some('/') => '\\',
                    Some('\'') => '^',
                    Some('!') => '|',
                    Some('-') => '~',
                    Some(_) => {
                        self.source.backtrack(2);
                        return Some('?');
                    }
                    None => {
                        self.source.backtrack(1);
                        return Some('?');
                    }
                };
                self.source.replace(3, folded);
                Some(folded)
            }
            Some(_) => {
                self.source.backtrack(1);
                Some('?')
            }
            None => Some('?'),
        }
    }

    fn handle_escaped_newline(&mut self) -> bool {
        if self.source.last_read() == Some('\\') && self.source.peek() == Some('\n') {
            self.source.read();
            self.source.erase(2);
            return true;
        }
        false
    }

    /// Look at the next logical character, interpreting trigraphs and
    /// escaped newlines.
    fn peek_char(&mut self) -> Option<char> {
        loop {
            match self.source.peek() {
                Some('?') if self.options.have(TRIGRAPHS) => {
                    self.source.read();
                    let folded = self.handle_trigraph();
                    if self.handle_escaped_newline() {
                        continue;
                    }
                    self.source.backtrack(1);
                    return folded;
                }
                Some('\\') => {
                    self.source.read();
                    if self.handle_escaped_newline() {
                        continue;
                    }
                    self.source.backtrack(1);
                    return Some('\\');
                }
                other => return other,
            }
        }
    }

    /// Read the next logical character, interpreting trigraphs and escaped
    /// newlines.
    fn read_char(&mut self) -> Option<char> {
        loop {
            let mut c = self.source.read();
            if self.options.have(TRIGRAPHS) && c == Some('?') {
                c = self.handle_trigraph();
            }
            if self.handle_escaped_newline() {
                continue;
            }
            return c;
        }
    }

    /// Decode a `\uXXXX` or `\UXXXXXXXX` universal character name. The
    /// backslash must already have been consumed. On success the whole
    /// escape is collapsed to the decoded character in the source window; on
    /// failure the prefix is backtracked so that scanning can resume with
    /// minimal loss.
    fn ucn(&mut self) -> Option<char> {
        let start_offset = self.source.offset();
        let start_line = self.source.line();
        let start_column = self.source.column();

        let n = match self.read_char() {
            Some('u') => 4,
            Some('U') => 8,
            Some(_) => {
                self.source.backtrack(1);
                return None;
            }
            None => return None,
        };

        let mut value: u32 = 0;
        let mut i = 0;
        while i < n {
            match self.peek_char() {
                Some(d) if d.is_ascii_hexdigit() => {
                    self.read_char();
                    value = (value << 4) | d.to_digit(16).unwrap();
                    i += 1;
                }
                _ => break,
            }
        }

        if i < n {
            self.emit_span(
                Severity::Error,
                start_offset,
                self.source.offset() - start_offset,
                start_line,
                start_column,
                "Not a UCN: insufficient digits given",
            );
            self.source.backtrack(i + 1);
            return None;
        }
        if (0xd800..=0xdfff).contains(&value) {
            self.emit_span(
                Severity::Error,
                start_offset,
                self.source.offset() - start_offset,
                start_line,
                start_column,
                "Illegal UCN: surrogate code point",
            );
            return None;
        }
        if value > 0x10fffd {
            self.emit_span(
                Severity::Error,
                start_offset,
                self.source.offset() - start_offset,
                start_line,
                start_column,
                "Not a UCN: code point out of range 0 - 0x10fffd",
            );
            return None;
        }

        let c = char::from_u32(value)?;
        self.source.replace(n + 2, c);
        Some(c)
    }

    /*
     * Identifier character classification
     */

    pub fn is_valid_ident_char(&self, c: char) -> bool {
        if c == '$' && !self.options.have(IDENTIFIER_DOLLARS) {
            return false;
        }
        let v = c as u32;
        (v <= 0xffff && BMP_IDENT_CHARS[v as usize])
            || (v >= 0x10000 && v <= 0xefffd && (v & 0xffff) <= 0xfffd)
    }

    pub fn is_valid_initial_ident_char(&self, c: char) -> bool {
        self.is_valid_ident_char(c)
            && !c.is_ascii_digit()
            && !('\u{0300}'..='\u{036f}').contains(&c)
            && !('\u{1dc0}'..='\u{1dff}').contains(&c)
            && !('\u{20d0}'..='\u{20ff}').contains(&c)
            && !('\u{fe20}'..='\u{fe2f}').contains(&c)
    }

    /*
     * Sub-scanners
     */

    fn whitespace(&mut self, t: &mut Token) {
        t.set_kind(TokenKind::Whitespace);

        // return newline as individual token to aid preprocessing
        if self.source.last_read() == Some('\n') {
            t.set_spelling("\n");
            return;
        }

        if self.options.have(KEEP_SPACE) {
            self.tmp_spelling.clear();
            self.tmp_spelling.push(self.source.last_read().unwrap_or(' '));
            loop {
                match self.peek_char() {
                    Some(c) if c.is_whitespace() && c != '\n' => {
                        self.read_char();
                        self.tmp_spelling.push(c);
                    }
                    _ => break,
                }
            }
            t.set_spelling(self.tmp_spelling.as_str());
        } else {
            t.set_spelling(" ");
            loop {
                match self.peek_char() {
                    Some(c) if c.is_whitespace() && c != '\n' => {
                        self.read_char();
                    }
                    _ => break,
                }
            }
        }
    }

    fn numeric_literal(&mut self, t: &mut Token) {
        self.tmp_spelling.clear();
        let first = self.source.last_read().unwrap_or('0');
        self.tmp_spelling.push(first);

        let mut octal = false;

        match first {
            '0' => match self.peek_char() {
                Some('b') | Some('B') => {
                    if self.options.have(BINARY_LITERALS) {
                        self.read_char();
                        if matches!(self.peek_char(), Some('0') | Some('1')) {
                            self.binary_literal(t);
                            return;
                        }
                        self.source.backtrack(1);
                    }
                    // '0' alone is an octal zero; 'b' starts the next token
                    octal = true;
                }
                Some('x') | Some('X') => {
                    self.read_char();
                    if matches!(self.peek_char(), Some(c) if c.is_ascii_hexdigit()) {
                        self.hexadecimal_literal(t);
                        return;
                    }
                    self.source.backtrack(1);
                    octal = true;
                }
                Some('.') => {
                    self.floating_literal(t);
                    return;
                }
                _ => octal = true,
            },
            '.' => {
                self.floating_literal(t);
                return;
            }
            _ => (), // digit (already checked by read_token)
        }

        loop {
            match self.peek_char() {
                Some(c @ ('.' | 'E' | 'e')) => {
                    self.read_char();
                    self.tmp_spelling.push(c);
                    self.floating_literal(t);
                    return;
                }
                Some('\'') => {
                    // grouping separator, not stored in the spelling
                    self.read_char();
                    if !matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
                        self.source.backtrack(1);
                    }
                }
                _ => (),
            }

            match self.peek_char() {
                Some(c) if c.is_ascii_digit() => {
                    octal = octal && c.to_digit(10).unwrap() < 8;
                    self.read_char();
                    self.tmp_spelling.push(c);
                }
                _ => break,
            }
        }

        self.check_for_integer_suffix();
        t.set_kind(if octal {
            TokenKind::OctIntLiteral
        } else {
            TokenKind::DecIntLiteral
        });
        t.set_spelling(self.tmp_spelling.as_str());
    }

    fn binary_literal(&mut self, t: &mut Token) {
        // 'b' or 'B' has just been consumed
        self.tmp_spelling.push(self.source.last_read().unwrap_or('b'));

        loop {
            match self.peek_char() {
                Some(c @ ('0' | '1')) => {
                    self.read_char();
                    self.tmp_spelling.push(c);
                }
                Some('\'') => {
                    self.read_char();
                    if !matches!(self.peek_char(), Some('0') | Some('1')) {
                        self.source.backtrack(1);
                        break;
                    }
                }
                _ => break,
            }
        }

        self.check_for_integer_suffix();
        t.set_kind(TokenKind::BinIntLiteral);
        t.set_spelling(self.tmp_spelling.as_str());
    }

    fn hexadecimal_literal(&mut self, t: &mut Token) {
        // 'x' or 'X' has just been consumed
        self.tmp_spelling.push(self.source.last_read().unwrap_or('x'));

        loop {
            match self.peek_char() {
                Some(c) if c.is_ascii_hexdigit() => {
                    self.read_char();
                    self.tmp_spelling.push(c);
                    if self.peek_char() == Some('\'') {
                        // grouping separator
                        self.read_char();
                        if !matches!(self.peek_char(), Some(c2) if c2.is_ascii_hexdigit()) {
                            self.source.backtrack(1);
                        }
                    }
                }
                _ => break,
            }
        }

        if self.options.have(HEX_FLOAT_LITERALS)
            && matches!(self.peek_char(), Some('.') | Some('p') | Some('P'))
        {
            self.hexadecimal_float(t);
            return;
        }

        self.check_for_integer_suffix();
        t.set_kind(TokenKind::HexIntLiteral);
        t.set_spelling(self.tmp_spelling.as_str());
    }

    fn hexadecimal_float(&mut self, t: &mut Token) {
        if self.peek_char() == Some('.') {
            self.read_char();
            self.tmp_spelling.push('.');
            loop {
                match self.peek_char() {
                    Some(c) if c.is_ascii_hexdigit() => {
                        self.read_char();
                        self.tmp_spelling.push(c);
                    }
                    _ => break,
                }
            }
        }

        if let Some(p @ ('p' | 'P')) = self.peek_char() {
            self.read_char();
            self.tmp_spelling.push(p);
            if let Some(sign @ ('+' | '-')) = self.peek_char() {
                self.read_char();
                self.tmp_spelling.push(sign);
            }
            loop {
                match self.peek_char() {
                    Some(c) if c.is_ascii_digit() => {
                        self.read_char();
                        self.tmp_spelling.push(c);
                    }
                    _ => break,
                }
            }
        }

        if let Some(c @ ('F' | 'f' | 'L' | 'l')) = self.peek_char() {
            self.read_char();
            self.tmp_spelling.push(c);
        }

        t.set_kind(TokenKind::FloatLiteral);
        t.set_spelling(self.tmp_spelling.as_str());
    }

    fn check_for_integer_suffix(&mut self) {
        match self.peek_char() {
            Some(u @ ('u' | 'U')) => {
                self.read_char();
                self.tmp_spelling.push(u);
                if let Some(l @ ('l' | 'L')) = self.peek_char() {
                    self.read_char();
                    self.tmp_spelling.push(l);
                    if self.options.have(LONG_LONG) && self.peek_char() == Some(l) {
                        // LL or ll
                        self.read_char();
                        self.tmp_spelling.push(l);
                    }
                }
            }
            Some(l @ ('l' | 'L')) => {
                self.read_char();
                self.tmp_spelling.push(l);
                if self.options.have(LONG_LONG) && self.peek_char() == Some(l) {
                    // LL or ll
                    self.read_char();
                    self.tmp_spelling.push(l);
                }
                if let Some(u @ ('u' | 'U')) = self.peek_char() {
                    self.read_char();
                    self.tmp_spelling.push(u);
                }
            }
            _ => (),
        }
    }

    fn floating_literal(&mut self, t: &mut Token) {
        let mut int_part = self.source.last_read() != Some('.');
        let mut exp_part = false;

        loop {
            match self.peek_char() {
                Some('.') => {
                    if !int_part {
                        break;
                    }
                    self.read_char();
                    self.tmp_spelling.push('.');
                    int_part = false;
                }
                Some(e @ ('E' | 'e')) => {
                    if exp_part {
                        break;
                    }
                    self.read_char();
                    self.tmp_spelling.push(e);
                    exp_part = true;
                    if let Some(sign @ ('+' | '-')) = self.peek_char() {
                        self.read_char();
                        self.tmp_spelling.push(sign);
                    }
                }
                Some(c) if c.is_ascii_digit() => {
                    self.read_char();
                    self.tmp_spelling.push(c);
                }
                _ => break,
            }
        }

        if let Some(c @ ('F' | 'f' | 'L' | 'l')) = self.peek_char() {
            // consume suffix
            self.read_char();
            self.tmp_spelling.push(c);
        }

        t.set_kind(TokenKind::FloatLiteral);
        t.set_spelling(self.tmp_spelling.as_str());
    }

    fn string_or_char_literal(&mut self, t: &mut Token) {
        self.tmp_spelling.clear();

        let delimiter = self.source.last_read().unwrap_or('"');

        loop {
            let c = match self.read_char() {
                None | Some('\n') => {
                    let kind = if delimiter == '"' { "string" } else { "character" };
                    self.emit_token_diag(
                        Severity::Error,
                        t,
                        format!("unterminated {} literal", kind),
                    );
                    break;
                }
                Some(c) => c,
            };
            if c == delimiter {
                break;
            }
            if c != '\\' {
                self.tmp_spelling.push(c);
                continue;
            }

            let escaped = match self.read_char() {
                Some(c @ ('\'' | '"' | '?' | '\\')) => Some(c),
                Some('a') => Some('\u{07}'),
                Some('b') => Some('\u{08}'),
                Some('f') => Some('\u{0c}'),
                Some('n') => Some('\n'),
                Some('r') => Some('\r'),
                Some('t') => Some('\t'),
                Some('v') => Some('\u{0b}'),
                Some('x') => {
                    if matches!(self.peek_char(), Some(h) if h.is_ascii_hexdigit()) {
                        // up to 2-digit hex character value
                        self.hex_escape_sequence()
                    } else {
                        Some('x')
                    }
                }
                Some(u @ ('u' | 'U')) => {
                    if self.options.have(UCNS) {
                        self.source.backtrack(1);
                        // if this is not a UCN, ucn() has backtracked and the
                        // prefix character is re-read as ordinary content
                        self.ucn()
                    } else {
                        Some(u)
                    }
                }
                Some(d) if d.is_digit(8) => {
                    // up to 3-digit octal character value
                    self.source.backtrack(1);
                    self.octal_escape_sequence()
                }
                // unrecognised escape sequence: take the next character
                other => other,
            };
            if let Some(c) = escaped {
                self.tmp_spelling.push(c);
            }
        }

        t.set_spelling(self.tmp_spelling.as_str());
    }

    fn octal_escape_sequence(&mut self) -> Option<char> {
        let mut value: u32 = 0;
        for _ in 0..3 {
            match self.peek_char() {
                Some(d) if d.is_digit(8) => {
                    self.read_char();
                    value = (value << 3) | d.to_digit(8).unwrap();
                }
                _ => break,
            }
        }
        char::from_u32(value)
    }

    fn hex_escape_sequence(&mut self) -> Option<char> {
        let mut value: u32 = 0;
        for _ in 0..2 {
            match self.peek_char() {
                Some(d) if d.is_ascii_hexdigit() => {
                    self.read_char();
                    value = (value << 4) | d.to_digit(16).unwrap();
                }
                _ => break,
            }
        }
        char::from_u32(value)
    }

    fn raw_string_literal(&mut self, t: &mut Token) {
        let start_offset = self.source.offset();
        let start_line = self.source.line();
        let start_column = self.source.column();

        let mut delimiter: Vec<char> = Vec::new();

        // read optional delimiter between '"' and '('
        loop {
            match self.read_char() {
                None => {
                    self.emit_here(
                        Severity::Error,
                        1,
                        "end of file in raw string literal delimiter",
                    );
                    t.reset();
                    return;
                }
                Some('(') => break,
                Some(c @ ('\\' | ')')) => {
                    self.source.backtrack(1);
                    self.emit_here(
                        Severity::Error,
                        1,
                        format!("illegal character '{}' in raw string literal delimiter", c),
                    );
                    self.read_char();
                }
                Some(c) if c.is_whitespace() => {
                    self.source.backtrack(1);
                    self.emit_here(
                        Severity::Error,
                        1,
                        "illegal whitespace character in raw string literal delimiter",
                    );
                    self.read_char();
                }
                Some(c) => {
                    if delimiter.len() >= MAX_RAW_DELIMITER_LEN {
                        self.emit_span(
                            Severity::FatalError,
                            start_offset,
                            self.source.offset() - start_offset,
                            start_line,
                            start_column,
                            format!(
                                "raw string literal delimiter length ({}) longer than maximum ({})",
                                delimiter.len() + 1,
                                MAX_RAW_DELIMITER_LEN
                            ),
                        );
                        t.reset();
                        return;
                    }
                    delimiter.push(c);
                }
            }
        }

        self.tmp_spelling.clear();

        // candidate ")delimiter" match length; -1 when no candidate is open
        let mut delimiter2_len: isize = -1;
        let mut tentative_spelling_len = 0;

        // read string contents; trigraphs and escaped newlines are not
        // interpreted inside the raw body
        loop {
            let c = match self.source.read() {
                None => {
                    self.emit_token_diag(Severity::Error, t, "unterminated raw string literal");
                    break;
                }
                Some(c) => c,
            };

            if c == ')' {
                tentative_spelling_len = self.tmp_spelling.len();
                delimiter2_len = 0;
            } else if c == '"' {
                if delimiter2_len == delimiter.len() as isize {
                    self.tmp_spelling.truncate(tentative_spelling_len);
                    break;
                }
                delimiter2_len = -1;
            } else if delimiter2_len >= 0 {
                if (delimiter2_len as usize) < delimiter.len()
                    && delimiter[delimiter2_len as usize] == c
                {
                    delimiter2_len += 1;
                } else {
                    delimiter2_len = -1;
                }
            }

            self.tmp_spelling.push(c);
        }

        t.set_spelling(self.tmp_spelling.as_str());
    }

    fn identifier_or_keyword(&mut self, t: &mut Token) {
        self.tmp_spelling.clear();
        self.tmp_spelling.push(self.source.last_read().unwrap_or('_'));

        loop {
            match self.read_char() {
                Some('\\')
                    if matches!(self.peek_char(), Some('u') | Some('U'))
                        && self.options.have(UCNS) =>
                {
                    match self.ucn() {
                        Some(c) if self.is_valid_ident_char(c) => self.tmp_spelling.push(c),
                        // not a UCN after all
                        None => break,
                        // a valid UCN but not a legal identifier character
                        Some(_) => {
                            self.source.backtrack(1);
                            break;
                        }
                    }
                }
                Some(c) if self.is_valid_ident_char(c) => self.tmp_spelling.push(c),
                Some(_) => {
                    self.source.backtrack(1);
                    break;
                }
                None => break,
            }
        }

        match self.kw_id_table.get(self.tmp_spelling.as_str()) {
            Some(&kind) => {
                t.set_kind(kind).set_spelling(self.tmp_spelling.as_str());
                if is_punctuation(kind) {
                    // one of the alternate tokens "and", "bitand", "or", etc.
                    t.add_flags(TF_ALTERNATE);
                }
            }
            None => {
                t.set_kind(TokenKind::Identifier)
                    .set_spelling(self.tmp_spelling.as_str());
                self.kw_id_table
                    .insert(self.tmp_spelling.clone(), TokenKind::Identifier);
            }
        }
    }

    fn comment(&mut self, t: &mut Token) {
        t.set_kind(TokenKind::Comment);

        let keep = self.options.have(KEEP_COMMENTS);
        if keep {
            self.tmp_spelling.clear();
            self.tmp_spelling.push('/');
        }

        self.read_char(); // consume '*' or '/' character
        let is_line = self.source.last_read() == Some('/');
        if keep {
            self.tmp_spelling.push(if is_line { '/' } else { '*' });
        }

        if is_line {
            loop {
                match self.peek_char() {
                    None | Some('\n') => break,
                    Some(c) => {
                        self.read_char();
                        if keep {
                            self.tmp_spelling.push(c);
                        }
                    }
                }
            }
        } else {
            loop {
                match self.read_char() {
                    None => {
                        self.emit_token_diag(
                            Severity::Error,
                            t,
                            "unexpected end of file encountered in comment",
                        );
                        break;
                    }
                    Some(c) => {
                        if keep {
                            self.tmp_spelling.push(c);
                        }
                        if c == '*' && self.peek_char() == Some('/') {
                            self.read_char();
                            if keep {
                                self.tmp_spelling.push('/');
                            }
                            break;
                        }
                    }
                }
            }
        }

        if keep {
            t.set_spelling(self.tmp_spelling.as_str());
        }
    }

    fn pp_directive(&mut self, t: &mut Token) {
        let mut name = String::new();

        loop {
            match self.peek_char() {
                Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                    self.read_char();
                    name.push(c);
                }
                _ => break,
            }
        }

        let kind = match name.as_str() {
            "include" => Some(TokenKind::PpInclude),
            "include_next" => Some(TokenKind::PpIncludeNext),
            "define" => Some(TokenKind::PpDefine),
            "undef" => Some(TokenKind::PpUndef),
            "if" => Some(TokenKind::PpIf),
            "ifdef" => Some(TokenKind::PpIfdef),
            "ifndef" => Some(TokenKind::PpIfndef),
            "elif" => Some(TokenKind::PpElif),
            "else" => Some(TokenKind::PpElse),
            "endif" => Some(TokenKind::PpEndif),
            "line" => Some(TokenKind::PpLine),
            "error" => Some(TokenKind::PpError),
            "warning" => Some(TokenKind::PpWarning),
            "pragma" => Some(TokenKind::PpPragma),
            _ => None,
        };

        match kind {
            Some(kind) => {
                t.set_kind(kind);
                debug_assert!(is_preprocessor_directive(kind));
            }
            None => {
                self.emit_token_diag(
                    Severity::Warning,
                    t,
                    format!("unrecognised preprocessor directive \"#{}\"", name),
                );
                self.source.backtrack(name.chars().count());
                t.set_kind(TokenKind::PpNull);
            }
        }

        t.add_flags(TF_PREPROCESS);
        t.set_spelling(default_spelling(t.kind()));
        self.next_flags |= TF_PREPROCESS;
    }

    /*
     * Delimiter-matching stack
     */

    fn push_closing_token(&mut self, kind: TokenKind) {
        self.closing_tokens.push(kind);
    }

    fn pop_closing_token_if(&mut self, kind: TokenKind) -> bool {
        if self.closing_tokens.is_empty() {
            return false;
        }
        if kind != TokenKind::Greater {
            // '<' openers do not strictly match; unwind any pending '>'s
            while self.pop_closing_token_if(TokenKind::Greater) {}
        }
        if self.closing_tokens.last() == Some(&kind) {
            self.closing_tokens.pop();
            true
        } else {
            false
        }
    }

    pub fn next_closing_token_is(&self, kind: TokenKind) -> bool {
        self.closing_tokens.last() == Some(&kind)
    }

    /*
     * Diagnostics
     */

    fn emit_here<S: Into<String>>(&mut self, severity: Severity, len: usize, message: S) {
        let d = Diagnostic::new(
            severity,
            self.source.offset(),
            len,
            self.source.line(),
            self.source.column(),
            message,
        );
        self.diagnostics.push(d);
    }

    fn emit_span<S: Into<String>>(
        &mut self,
        severity: Severity,
        offset: usize,
        len: usize,
        line: usize,
        column: usize,
        message: S,
    ) {
        self.diagnostics
            .push(Diagnostic::new(severity, offset, len, line, column, message));
    }

    fn emit_token_diag<S: Into<String>>(&mut self, severity: Severity, t: &Token, message: S) {
        let len = self.source.offset().saturating_sub(t.offset()).max(1);
        self.diagnostics.push(Diagnostic::new(
            severity,
            t.offset(),
            len,
            t.line(),
            t.column(),
            message,
        ));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::options::{CStd, CxxOptionsBuilder, CxxStd};
    use crate::source::BrokenReader;
    use crate::token::{is_keyword, TokenKind::*};

    fn cxx(std: CxxStd) -> CxxOptions {
        CxxOptionsBuilder::new().cxx_standard(std).build().unwrap()
    }

    fn c(std: CStd) -> CxxOptions {
        CxxOptionsBuilder::new().c_standard(std).build().unwrap()
    }

    fn lex_all(opts: &CxxOptions, src: &str) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut lexer = Lexer::new(opts, src.as_bytes());
        let mut tokens = Vec::new();
        loop {
            let t = lexer.lex();
            if t.kind() == Eof {
                break;
            }
            tokens.push(t);
        }
        let diags = lexer.take_diagnostics();
        (tokens, diags)
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(Token::kind).collect()
    }

    #[test]
    fn punctuation_and_keyword_round_trip() {
        let opts = CxxOptionsBuilder::new()
            .c_standard(CStd::C11)
            .cxx_standard(CxxStd::Cxx17)
            .enable(NO_PP_DIRECTIVES)
            .build()
            .unwrap();
        for kind in TokenKind::ALL.iter().copied() {
            if !(is_punctuation(kind) || is_keyword(kind)) {
                continue;
            }
            if kind == KwFunc {
                // catalogued but never seeded as a keyword
                continue;
            }
            let spelling = default_spelling(kind);
            let (tokens, diags) = lex_all(&opts, spelling);
            assert!(diags.is_empty(), "{}: {:?}", spelling, diags);
            assert_eq!(tokens.len(), 1, "{}", spelling);
            assert_eq!(tokens[0].kind(), kind, "{}", spelling);
            assert_eq!(tokens[0].spelling(), spelling);
        }
    }

    #[test]
    fn trigraph_digraph_directive() {
        // "??=" folds to '#', which starts the line and begins a directive.
        let (tokens, diags) = lex_all(&cxx(CxxStd::Cxx14), "??=define X 1");
        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(kinds(&tokens), vec![PpDefine, Identifier, DecIntLiteral]);
        assert_eq!(tokens[0].spelling(), "#define");
        assert_eq!(tokens[0].offset(), 0);
        assert_eq!(tokens[1].spelling(), "X");
        assert_eq!(tokens[2].spelling(), "1");
        for t in &tokens {
            assert!(t.has_flags(TF_PREPROCESS), "{}", t);
        }
    }

    #[test]
    fn trigraphs_off_in_cxx17() {
        let (tokens, _) = lex_all(&cxx(CxxStd::Cxx17), "x??=y");
        assert_eq!(
            kinds(&tokens),
            vec![Identifier, Question, Question, Equal, Identifier]
        );
    }

    #[test]
    fn template_rshift_is_splitable() {
        let (tokens, _) = lex_all(&cxx(CxxStd::Cxx11), "vector<pair<int,int>>");
        assert_eq!(
            kinds(&tokens),
            vec![Identifier, Less, Identifier, Less, KwInt, Comma, KwInt, RShift]
        );
        let rshift = tokens.last().unwrap();
        assert!(rshift.has_flags(TF_SPLITABLE));

        let (tokens, _) = lex_all(&cxx(CxxStd::Cxx11), "vector<int>=x");
        assert_eq!(
            kinds(&tokens),
            vec![Identifier, Less, KwInt, GreaterEqual, Identifier]
        );
        assert!(tokens[3].has_flags(TF_SPLITABLE));
    }

    #[test]
    fn rshift_not_splitable_before_cxx11() {
        let (tokens, _) = lex_all(&cxx(CxxStd::Cxx03), "vector<pair<int,int>>");
        assert_eq!(tokens.last().unwrap().kind(), RShift);
        assert!(!tokens.last().unwrap().has_flags(TF_SPLITABLE));
    }

    #[test]
    fn rshift_not_splitable_outside_template_depth() {
        let (tokens, _) = lex_all(&cxx(CxxStd::Cxx11), "a >> b");
        assert_eq!(kinds(&tokens), vec![Identifier, RShift, Identifier]);
        assert!(!tokens[1].has_flags(TF_SPLITABLE));
    }

    #[test]
    fn lsquare_digraph_guard() {
        // <:: followed by ':' or '>' keeps '<' a LESS token
        let (tokens, _) = lex_all(&cxx(CxxStd::Cxx11), "std::set<::std::string>");
        assert_eq!(
            kinds(&tokens),
            vec![
                Identifier, ColonColon, Identifier, Less, ColonColon, Identifier, ColonColon,
                Identifier, Greater
            ]
        );

        let (tokens, _) = lex_all(&cxx(CxxStd::Cxx11), "x<:y");
        assert_eq!(kinds(&tokens), vec![Identifier, LSquare, Identifier]);
        assert!(tokens[1].has_flags(TF_ALTERNATE));
        assert_eq!(tokens[1].spelling(), "<:");
    }

    #[test]
    fn digraphs() {
        let (tokens, _) = lex_all(&c(CStd::C95), "x<%y%>z<:a:>b");
        assert_eq!(
            kinds(&tokens),
            vec![
                Identifier, LBrace, Identifier, RBrace, Identifier, LSquare, Identifier, RSquare,
                Identifier
            ]
        );
        for t in tokens.iter().filter(|t| t.kind() != Identifier) {
            assert!(t.has_flags(TF_ALTERNATE), "{}", t);
        }

        // "%:%:" is "##"; mid-line "%:" is a plain '#'
        let (tokens, _) = lex_all(&c(CStd::C95), "x %:%: y %: z");
        assert_eq!(
            kinds(&tokens),
            vec![Identifier, HashHash, Identifier, Hash, Identifier]
        );
        assert_eq!(tokens[1].spelling(), "%:%:");
        assert_eq!(tokens[3].spelling(), "%:");
    }

    #[test]
    fn digraph_directive() {
        let (tokens, diags) = lex_all(&c(CStd::C95), "%:include x");
        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(kinds(&tokens), vec![PpInclude, Identifier]);
        assert!(tokens[0].has_flags(TF_ALTERNATE | TF_PREPROCESS));
    }

    #[test]
    fn raw_string_literal_content_is_uninterpreted() {
        let (tokens, diags) = lex_all(&cxx(CxxStd::Cxx11), "R\"xx(a\\n)xx\"");
        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(kinds(&tokens), vec![StrLiteral]);
        assert_eq!(tokens[0].spelling(), "a\\n");
    }

    #[test]
    fn raw_string_with_embedded_close_candidates() {
        let (tokens, diags) = lex_all(&cxx(CxxStd::Cxx11), "R\"ab(x)a)ab\"");
        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(tokens[0].spelling(), "x)a");

        // a ')' run immediately before the real terminator
        let (tokens, diags) = lex_all(&cxx(CxxStd::Cxx11), "R\"xx()))xx\"");
        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(tokens[0].spelling(), "))");
    }

    #[test]
    fn raw_string_newline_and_trigraph_are_literal() {
        let opts = cxx(CxxStd::Cxx14); // trigraphs on
        let (tokens, diags) = lex_all(&opts, "R\"(a??=\nb)\"");
        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(tokens[0].spelling(), "a??=\nb");
    }

    #[test]
    fn raw_string_delimiter_errors() {
        let (_, diags) = lex_all(&cxx(CxxStd::Cxx11), "R\"a b(x)a b\"");
        assert!(diags
            .iter()
            .any(|d| d.message.contains("illegal whitespace character")));

        let (_, diags) = lex_all(&cxx(CxxStd::Cxx11), "R\"aaaaaaaaaaaaaaaaa(x)\"");
        assert!(diags.iter().any(|d| d.severity == Severity::FatalError));
    }

    #[test]
    fn raw_string_before_cxx11_is_an_identifier() {
        let (tokens, _) = lex_all(&cxx(CxxStd::Cxx03), "R\"x\"");
        assert_eq!(kinds(&tokens), vec![Identifier, StrLiteral]);
        assert_eq!(tokens[0].spelling(), "R");
    }

    #[test]
    fn string_escapes_are_decoded() {
        let (tokens, diags) = lex_all(&c(CStd::C99), r#""a\n\t\x41\102\\""#);
        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(kinds(&tokens), vec![StrLiteral]);
        assert_eq!(tokens[0].spelling(), "a\n\tAB\\");
    }

    #[test]
    fn string_ucn_escape() {
        let (tokens, diags) = lex_all(&c(CStd::C99), r#""\u0394""#);
        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(tokens[0].spelling(), "Δ");
    }

    #[test]
    fn unterminated_string_literal() {
        let (_, diags) = lex_all(&c(CStd::C99), "\"abc");
        assert!(diags
            .iter()
            .any(|d| d.message == "unterminated string literal"));

        let (_, diags) = lex_all(&c(CStd::C99), "'a\nx");
        assert!(diags
            .iter()
            .any(|d| d.message == "unterminated character literal"));
    }

    #[test]
    fn character_literal_prefixes() {
        let (tokens, _) = lex_all(&cxx(CxxStd::Cxx11), "L'a' u'b' U'c' 'd'");
        assert_eq!(
            kinds(&tokens),
            vec![WcharLiteral, U16CharLiteral, U32CharLiteral, CharLiteral]
        );

        let (tokens, _) = lex_all(&cxx(CxxStd::Cxx17), "u8'x' u8\"y\"");
        assert_eq!(kinds(&tokens), vec![U8CharLiteral, U8StrLiteral]);

        // Without the UTF-8 char literal feature, u8 is an identifier.
        let (tokens, _) = lex_all(&cxx(CxxStd::Cxx11), "u8'x'");
        assert_eq!(kinds(&tokens), vec![Identifier, CharLiteral]);
        assert_eq!(tokens[0].spelling(), "u8");

        // Pre-C11 C: no u/U literal prefixes at all.
        let (tokens, _) = lex_all(&c(CStd::C99), "u'b'");
        assert_eq!(kinds(&tokens), vec![Identifier, CharLiteral]);
    }

    #[test]
    fn numeric_literals() {
        let opts = cxx(CxxStd::Cxx14);
        let cases: &[(&str, TokenKind, &str)] = &[
            ("123", DecIntLiteral, "123"),
            ("0", OctIntLiteral, "0"),
            ("0755", OctIntLiteral, "0755"),
            ("089", DecIntLiteral, "089"),
            ("0x1f", HexIntLiteral, "0x1f"),
            ("0XAB", HexIntLiteral, "0XAB"),
            ("0b101", BinIntLiteral, "0b101"),
            ("3.25", FloatLiteral, "3.25"),
            (".5", FloatLiteral, ".5"),
            ("0.5", FloatLiteral, "0.5"),
            ("1e10", FloatLiteral, "1e10"),
            ("6.02E+23", FloatLiteral, "6.02E+23"),
            ("1.5f", FloatLiteral, "1.5f"),
            ("42u", DecIntLiteral, "42u"),
            ("42ul", DecIntLiteral, "42ul"),
            ("42ull", DecIntLiteral, "42ull"),
            ("42ll", DecIntLiteral, "42ll"),
            ("42LL", DecIntLiteral, "42LL"),
        ];
        for &(src, kind, spelling) in cases {
            let (tokens, diags) = lex_all(&opts, src);
            assert!(diags.is_empty(), "{}: {:?}", src, diags);
            assert_eq!(tokens.len(), 1, "{}", src);
            assert_eq!(tokens[0].kind(), kind, "{}", src);
            assert_eq!(tokens[0].spelling(), spelling, "{}", src);
        }
    }

    #[test]
    fn digit_separators_are_dropped_from_spelling() {
        let (tokens, _) = lex_all(&cxx(CxxStd::Cxx14), "1'000'000 0x1'0000 0b1'01");
        assert_eq!(
            kinds(&tokens),
            vec![DecIntLiteral, HexIntLiteral, BinIntLiteral]
        );
        assert_eq!(tokens[0].spelling(), "1000000");
        assert_eq!(tokens[1].spelling(), "0x10000");
        assert_eq!(tokens[2].spelling(), "0b101");
    }

    #[test]
    fn binary_literals_are_feature_gated() {
        // Without BINARY_LITERALS, "0b101" is octal zero then an identifier.
        let (tokens, _) = lex_all(&c(CStd::C99), "0b101");
        assert_eq!(kinds(&tokens), vec![OctIntLiteral, Identifier]);
        assert_eq!(tokens[0].spelling(), "0");
        assert_eq!(tokens[1].spelling(), "b101");
    }

    #[test]
    fn long_long_suffix_is_feature_gated() {
        let opts = CxxOptionsBuilder::new()
            .c_standard(CStd::C99)
            .disable(LONG_LONG)
            .build()
            .unwrap();
        let (tokens, _) = lex_all(&opts, "42ll");
        assert_eq!(kinds(&tokens), vec![DecIntLiteral, Identifier]);
        assert_eq!(tokens[0].spelling(), "42l");
        assert_eq!(tokens[1].spelling(), "l");
    }

    #[test]
    fn hex_float_literals() {
        let (tokens, diags) = lex_all(&c(CStd::C99), "0x1.8p3 0x1p-2");
        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(kinds(&tokens), vec![FloatLiteral, FloatLiteral]);
        assert_eq!(tokens[0].spelling(), "0x1.8p3");
        assert_eq!(tokens[1].spelling(), "0x1p-2");

        // Feature off: the 'p' exponent is not part of the literal.
        let (tokens, _) = lex_all(&c(CStd::C89), "0x1p3");
        assert_eq!(kinds(&tokens), vec![HexIntLiteral, Identifier]);
    }

    #[test]
    fn keywords_follow_the_selected_standard() {
        let (tokens, _) = lex_all(&c(CStd::C99), "restrict");
        assert_eq!(kinds(&tokens), vec![KwRestrict]);

        let (tokens, _) = lex_all(&c(CStd::C89), "restrict");
        assert_eq!(kinds(&tokens), vec![Identifier]);

        let (tokens, _) = lex_all(&c(CStd::C11), "_Generic _Static_assert");
        assert_eq!(kinds(&tokens), vec![KwGeneric, KwStaticAssert]);

        let (tokens, _) = lex_all(&cxx(CxxStd::Cxx11), "constexpr nullptr");
        assert_eq!(kinds(&tokens), vec![KwConstexpr, KwNullptr]);
    }

    #[test]
    fn named_alternate_operators() {
        let (tokens, _) = lex_all(&cxx(CxxStd::Cxx03), "a and b or not c");
        assert_eq!(
            kinds(&tokens),
            vec![Identifier, AmpAmp, Identifier, PipePipe, Identifier, Exclaim, Identifier]
        );
        assert!(tokens[1].has_flags(TF_ALTERNATE));
        assert_eq!(tokens[1].spelling(), "and");
        assert!(tokens[3].has_flags(TF_ALTERNATE));
        assert!(tokens[5].has_flags(TF_ALTERNATE));
    }

    #[test]
    fn ampamp_is_lexed_in_every_language_mode() {
        let (tokens, _) = lex_all(&c(CStd::C89), "a&&b||c");
        assert_eq!(
            kinds(&tokens),
            vec![Identifier, AmpAmp, Identifier, PipePipe, Identifier]
        );
    }

    #[test]
    fn cxx_only_operators() {
        let (tokens, _) = lex_all(&c(CStd::C99), "a::b");
        assert_eq!(kinds(&tokens), vec![Identifier, Colon, Colon, Identifier]);

        let (tokens, _) = lex_all(&cxx(CxxStd::Cxx03), "a::b.*c->*d");
        assert_eq!(
            kinds(&tokens),
            vec![Identifier, ColonColon, Identifier, DotStar, Identifier, ArrowStar, Identifier]
        );
    }

    #[test]
    fn identifiers_are_interned() {
        let opts = c(CStd::C99);
        let mut lexer = Lexer::new(&opts, "foo bar foo".as_bytes());
        let t1 = lexer.lex();
        let t2 = lexer.lex();
        let t3 = lexer.lex();
        assert_eq!(t1.kind(), Identifier);
        assert_eq!(t2.kind(), Identifier);
        assert_eq!(t3.kind(), Identifier);
        assert_eq!(t1.spelling(), "foo");
        assert_eq!(t3.spelling(), "foo");

        // clear_storage drops interned identifiers but keeps keywords
        lexer.clear_storage();
        let mut lexer2 = Lexer::new(&opts, "while".as_bytes());
        assert_eq!(lexer2.lex().kind(), KwWhile);
    }

    #[test]
    fn identifier_with_ucn() {
        let (tokens, diags) = lex_all(&c(CStd::C99), "\\u0394x y\\u0301");
        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(kinds(&tokens), vec![Identifier, Identifier]);
        assert_eq!(tokens[0].spelling(), "Δx");
        assert_eq!(tokens[1].spelling(), "y\u{0301}");
    }

    #[test]
    fn bad_ucn_is_diagnosed_and_resynced() {
        let (tokens, diags) = lex_all(&c(CStd::C99), "\\u12 x");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("insufficient digits"));
        // the backslash is consumed; "u12" is re-lexed as an identifier
        assert_eq!(kinds(&tokens), vec![Null, Identifier, Identifier]);
        assert_eq!(tokens[1].spelling(), "u12");

        let (_, diags) = lex_all(&c(CStd::C99), "\"\\ud800\"");
        assert!(diags.iter().any(|d| d.message.contains("surrogate")));
    }

    #[test]
    fn comments_are_skipped_by_default() {
        let (tokens, _) = lex_all(&c(CStd::C99), "a /* hmm */ b // rest\nc");
        assert_eq!(
            kinds(&tokens),
            vec![Identifier, Identifier, Whitespace, Identifier]
        );
        assert!(tokens[1].has_flags(TF_SPACE_BEFORE));
        assert!(tokens[3].has_flags(TF_STARTS_LINE));
    }

    #[test]
    fn line_comments_are_feature_gated() {
        let (tokens, _) = lex_all(&c(CStd::C89), "a//b");
        assert_eq!(kinds(&tokens), vec![Identifier, Slash, Slash, Identifier]);
    }

    #[test]
    fn keep_comments_records_content() {
        let opts = CxxOptionsBuilder::new()
            .c_standard(CStd::C99)
            .enable(KEEP_COMMENTS)
            .build()
            .unwrap();
        let (tokens, _) = lex_all(&opts, "/* x */ // tail\n");
        assert_eq!(kinds(&tokens), vec![Comment, Comment, Whitespace]);
        assert_eq!(tokens[0].spelling(), "/* x */");
        assert_eq!(tokens[1].spelling(), "// tail");
    }

    #[test]
    fn unterminated_block_comment() {
        let (_, diags) = lex_all(&c(CStd::C99), "/* x");
        assert!(diags
            .iter()
            .any(|d| d.message.contains("end of file encountered in comment")));
    }

    #[test]
    fn keep_space_records_the_run() {
        let opts = CxxOptionsBuilder::new()
            .c_standard(CStd::C99)
            .enable(KEEP_SPACE)
            .build()
            .unwrap();
        let (tokens, _) = lex_all(&opts, "a  \t b");
        assert_eq!(kinds(&tokens), vec![Identifier, Whitespace, Identifier]);
        assert_eq!(tokens[1].spelling(), "  \t ");
    }

    #[test]
    fn newline_is_always_its_own_token() {
        let (tokens, _) = lex_all(&c(CStd::C99), "a \nb");
        assert_eq!(kinds(&tokens), vec![Identifier, Whitespace, Identifier]);
        assert_eq!(tokens[1].spelling(), "\n");
        assert!(tokens[2].has_flags(TF_STARTS_LINE));
        assert!(tokens[0].has_flags(TF_STARTS_LINE));
    }

    #[test]
    fn preprocessor_directives() {
        let (tokens, diags) = lex_all(&c(CStd::C99), "#include <stdio.h>\nint x;");
        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(tokens[0].kind(), PpInclude);
        assert_eq!(tokens[0].spelling(), "#include");
        assert!(tokens[0].has_flags(TF_PREPROCESS));
        // every token up to the newline carries the preprocessor flag
        let newline_at = tokens.iter().position(|t| t.spelling() == "\n").unwrap();
        for t in &tokens[..newline_at] {
            assert!(t.has_flags(TF_PREPROCESS), "{}", t);
        }
        // and tokens after it do not
        for t in &tokens[newline_at + 1..] {
            assert!(!t.has_flags(TF_PREPROCESS), "{}", t);
        }
    }

    #[test]
    fn include_next_directive() {
        let (tokens, diags) = lex_all(&c(CStd::C99), "#include_next \"x.h\"");
        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(tokens[0].kind(), PpIncludeNext);
    }

    #[test]
    fn unknown_directive_warns_and_backtracks() {
        let (tokens, diags) = lex_all(&c(CStd::C99), "#foo bar");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert!(diags[0].message.contains("\"#foo\""));
        assert_eq!(kinds(&tokens), vec![PpNull, Identifier, Identifier]);
        assert_eq!(tokens[1].spelling(), "foo");
        assert!(tokens[1].has_flags(TF_PREPROCESS));
    }

    #[test]
    fn misspelt_directives_are_not_accepted() {
        for src in ["#lragma x", "#inclde x", "#Pragma x"] {
            let (tokens, diags) = lex_all(&c(CStd::C99), src);
            assert_eq!(tokens[0].kind(), PpNull, "{}", src);
            assert_eq!(diags.len(), 1, "{}", src);
        }
    }

    #[test]
    fn hash_mid_line_is_not_a_directive() {
        let (tokens, diags) = lex_all(&c(CStd::C99), "x # define");
        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(kinds(&tokens), vec![Identifier, Hash, Identifier]);
    }

    #[test]
    fn no_pp_directives_feature() {
        let opts = CxxOptionsBuilder::new()
            .c_standard(CStd::C99)
            .enable(NO_PP_DIRECTIVES)
            .build()
            .unwrap();
        let (tokens, diags) = lex_all(&opts, "#define X");
        assert!(diags.is_empty());
        assert_eq!(kinds(&tokens), vec![Hash, Identifier]);
    }

    #[test]
    fn delimiter_stack_is_empty_after_balanced_input() {
        let opts = cxx(CxxStd::Cxx11);
        let mut lexer = Lexer::new(
            &opts,
            "int f(map<int, vector<int>> m) { return m[0]; }".as_bytes(),
        );
        loop {
            if lexer.lex().kind() == Eof {
                break;
            }
        }
        assert_eq!(lexer.open_delimiters(), 0);
    }

    #[test]
    fn unmatched_less_is_unwound_by_closers() {
        let opts = cxx(CxxStd::Cxx11);
        let mut lexer = Lexer::new(&opts, "f(a < b, c > d); g(e < f);".as_bytes());
        loop {
            if lexer.lex().kind() == Eof {
                break;
            }
        }
        assert_eq!(lexer.open_delimiters(), 0);
    }

    #[test]
    fn escaped_newline_splices_tokens() {
        let (tokens, _) = lex_all(&c(CStd::C99), "ab\\\ncd");
        assert_eq!(kinds(&tokens), vec![Identifier]);
        assert_eq!(tokens[0].spelling(), "abcd");
    }

    #[test]
    fn trigraph_escaped_newline_splices() {
        // "??/" folds to '\' which then splices the newline
        let (tokens, _) = lex_all(&c(CStd::C99), "ab??/\ncd");
        assert_eq!(kinds(&tokens), vec![Identifier]);
        assert_eq!(tokens[0].spelling(), "abcd");
    }

    #[test]
    fn escaped_newline_inside_string() {
        let (tokens, diags) = lex_all(&c(CStd::C99), "\"ab\\\ncd\"");
        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(tokens[0].spelling(), "abcd");
    }

    #[test]
    fn eof_token_flags() {
        let opts = c(CStd::C99);
        let mut lexer = Lexer::new(&opts, "".as_bytes());
        let t = lexer.lex();
        assert_eq!(t.kind(), Eof);
        assert!(t.has_flags(TF_STARTS_LINE));
        // lexing past the end keeps returning EOF
        assert_eq!(lexer.lex().kind(), Eof);
    }

    #[test]
    fn dollar_signs() {
        let (tokens, _) = lex_all(&c(CStd::C99), "$x");
        assert_eq!(kinds(&tokens), vec![Dollar, Identifier]);

        let opts = CxxOptionsBuilder::new()
            .c_standard(CStd::C99)
            .enable(IDENTIFIER_DOLLARS)
            .build()
            .unwrap();
        let (tokens, _) = lex_all(&opts, "$x");
        assert_eq!(kinds(&tokens), vec![Identifier]);
        assert_eq!(tokens[0].spelling(), "$x");
    }

    #[test]
    fn token_locations() {
        let (tokens, _) = lex_all(&c(CStd::C99), "ab\ncd e");
        assert_eq!(
            (tokens[0].offset(), tokens[0].line(), tokens[0].column()),
            (0, 1, 1)
        );
        // tokens[1] is the newline
        assert_eq!(
            (tokens[2].offset(), tokens[2].line(), tokens[2].column()),
            (3, 2, 1)
        );
        assert_eq!(
            (tokens[3].offset(), tokens[3].line(), tokens[3].column()),
            (6, 2, 4)
        );
    }

    #[test]
    fn bad_input_stream() {
        let opts = c(CStd::C99);
        let mut lexer = Lexer::new(&opts, BrokenReader);
        let t = lexer.lex();
        assert_eq!(t.kind(), Null);
        assert_eq!(lexer.error_count(), 1);
        assert_eq!(lexer.diagnostics()[0].severity, Severity::FatalError);
        // subsequent calls return EOF without further diagnostics
        assert_eq!(lexer.lex().kind(), Eof);
        assert_eq!(lexer.error_count(), 1);
    }

    #[test]
    fn null_token_for_stray_character() {
        let (tokens, _) = lex_all(&c(CStd::C99), "@x");
        assert_eq!(kinds(&tokens), vec![Null, Identifier]);
    }
}
