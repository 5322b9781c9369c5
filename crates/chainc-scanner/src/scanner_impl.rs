//! Scanner state machine.
//!
//! The scanner is pull-based: the parser calls `scan()` to advance and reads
//! the current token through the getters. Look-ahead is done by taking a
//! `ScannerSnapshot`, scanning, and restoring.

use crate::char_codes::{
    is_identifier_part, is_identifier_start, is_line_break, is_white_space_single_line,
};
use crate::syntax_kind::{SyntaxKind, keyword_kind};

pub mod token_flags {
    pub const NONE: u32 = 0;
    /// A line terminator appeared between the previous token and this one.
    pub const PRECEDING_LINE_BREAK: u32 = 1 << 0;
    /// String literal reached end of line/file without its closing quote.
    pub const UNTERMINATED: u32 = 1 << 1;
    /// Numeric literal written in hex (`0x..`).
    pub const HEX_SPECIFIER: u32 = 1 << 2;
    /// `0x` with no hex digits after it.
    pub const MISSING_DIGITS: u32 = 1 << 3;
    /// A block comment in the leading trivia ran to end of file.
    pub const UNTERMINATED_COMMENT: u32 = 1 << 4;
}

/// Saved scanner position for look-ahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: u32,
}

pub struct ScannerState {
    text: String,
    /// Current read position (byte offset)
    pos: usize,
    /// Start of the current token including leading trivia
    full_start: usize,
    /// Start of the current token after trivia
    token_start: usize,
    token: SyntaxKind,
    /// Identifier name or cooked string literal value
    token_value: String,
    token_flags: u32,
}

impl ScannerState {
    pub fn new(text: String) -> Self {
        ScannerState {
            text,
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: token_flags::NONE,
        }
    }

    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    #[inline]
    #[must_use]
    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    #[must_use]
    pub fn get_token_start(&self) -> u32 {
        self.token_start as u32
    }

    #[inline]
    #[must_use]
    pub fn get_token_full_start(&self) -> u32 {
        self.full_start as u32
    }

    #[inline]
    #[must_use]
    pub fn get_token_end(&self) -> u32 {
        self.pos as u32
    }

    #[inline]
    #[must_use]
    pub fn get_token_value_ref(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    #[must_use]
    pub fn get_token_text(&self) -> &str {
        &self.text[self.token_start..self.pos]
    }

    #[inline]
    #[must_use]
    pub fn get_token_flags(&self) -> u32 {
        self.token_flags
    }

    #[inline]
    #[must_use]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags & token_flags::PRECEDING_LINE_BREAK != 0
    }

    #[inline]
    #[must_use]
    pub fn is_unterminated(&self) -> bool {
        self.token_flags & token_flags::UNTERMINATED != 0
    }

    #[inline]
    #[must_use]
    pub fn has_unterminated_comment(&self) -> bool {
        self.token_flags & token_flags::UNTERMINATED_COMMENT != 0
    }

    #[must_use]
    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start = snapshot.full_start;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.token_flags = snapshot.token_flags;
    }

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    #[inline]
    fn peek_char_at(&self, byte_offset: usize) -> Option<char> {
        self.text.get(self.pos + byte_offset..)?.chars().next()
    }

    #[inline]
    fn starts_with(&self, s: &str) -> bool {
        self.text[self.pos..].starts_with(s)
    }

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = token_flags::NONE;
        self.token_value.clear();
        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.peek_char() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '"' | '\'' => self.scan_string(ch),
            '0'..='9' => self.scan_number(),
            '.' if self.peek_char_at(1).is_some_and(|c| c.is_ascii_digit()) => self.scan_number(),
            c if is_identifier_start(c) => self.scan_identifier(),
            _ => self.scan_punctuation(ch),
        };
        self.token
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek_char() {
            if is_line_break(ch) {
                self.token_flags |= token_flags::PRECEDING_LINE_BREAK;
                self.pos += ch.len_utf8();
            } else if is_white_space_single_line(ch) {
                self.pos += ch.len_utf8();
            } else if self.starts_with("//") {
                while let Some(c) = self.peek_char() {
                    if is_line_break(c) {
                        break;
                    }
                    self.pos += c.len_utf8();
                }
            } else if self.starts_with("/*") {
                self.pos += 2;
                loop {
                    if self.starts_with("*/") {
                        self.pos += 2;
                        break;
                    }
                    let Some(c) = self.peek_char() else {
                        self.token_flags |= token_flags::UNTERMINATED_COMMENT;
                        break;
                    };
                    if is_line_break(c) {
                        self.token_flags |= token_flags::PRECEDING_LINE_BREAK;
                    }
                    self.pos += c.len_utf8();
                }
            } else {
                break;
            }
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if !is_identifier_part(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        let text = &self.text[start..self.pos];
        self.token_value.push_str(text);
        keyword_kind(text).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        if self.starts_with("0x") || self.starts_with("0X") {
            self.pos += 2;
            self.token_flags |= token_flags::HEX_SPECIFIER;
            let digits_start = self.pos;
            while self.peek_char().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.pos += 1;
            }
            if self.pos == digits_start {
                self.token_flags |= token_flags::MISSING_DIGITS;
            }
        } else {
            self.skip_digits();
            if self.peek_char() == Some('.') {
                self.pos += 1;
                self.skip_digits();
            }
            if matches!(self.peek_char(), Some('e' | 'E')) {
                let sign_offset = usize::from(matches!(self.peek_char_at(1), Some('+' | '-')));
                if self
                    .peek_char_at(1 + sign_offset)
                    .is_some_and(|c| c.is_ascii_digit())
                {
                    self.pos += 1 + sign_offset;
                    self.skip_digits();
                }
            }
        }
        self.token_value.push_str(&self.text[start..self.pos]);
        SyntaxKind::NumericLiteral
    }

    fn skip_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.pos += 1;
        }
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1;
        loop {
            let Some(ch) = self.peek_char() else {
                self.token_flags |= token_flags::UNTERMINATED;
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if is_line_break(ch) {
                self.token_flags |= token_flags::UNTERMINATED;
                break;
            }
            if ch == '\\' {
                self.pos += 1;
                self.scan_escape_sequence();
                continue;
            }
            self.token_value.push(ch);
            self.pos += ch.len_utf8();
        }
        SyntaxKind::StringLiteral
    }

    fn scan_escape_sequence(&mut self) {
        let Some(ch) = self.peek_char() else {
            return;
        };
        self.pos += ch.len_utf8();
        let cooked = match ch {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'v' => '\u{000B}',
            '0' => '\0',
            'u' => match self.scan_unicode_escape() {
                Some(c) => c,
                None => return,
            },
            // Line continuation
            c if is_line_break(c) => return,
            c => c,
        };
        self.token_value.push(cooked);
    }

    /// `\uXXXX` or `\u{X...}`, with the `\u` already consumed.
    fn scan_unicode_escape(&mut self) -> Option<char> {
        let rest = &self.text[self.pos..];
        let (digits, consumed) = if let Some(braced) = rest.strip_prefix('{') {
            let close = braced.find('}')?;
            (&braced[..close], close + 2)
        } else {
            (rest.get(..4)?, 4)
        };
        let value = u32::from_str_radix(digits, 16).ok()?;
        let ch = char::from_u32(value)?;
        self.pos += consumed;
        Some(ch)
    }

    fn scan_punctuation(&mut self, ch: char) -> SyntaxKind {
        const PUNCTUATION: &[(&str, SyntaxKind)] = &[
            // Longest first
            ("===", SyntaxKind::EqualsEqualsEqualsToken),
            ("!==", SyntaxKind::ExclamationEqualsEqualsToken),
            ("...", SyntaxKind::DotDotDotToken),
            ("==", SyntaxKind::EqualsEqualsToken),
            ("!=", SyntaxKind::ExclamationEqualsToken),
            ("=>", SyntaxKind::EqualsGreaterThanToken),
            ("<=", SyntaxKind::LessThanEqualsToken),
            (">=", SyntaxKind::GreaterThanEqualsToken),
            ("&&", SyntaxKind::AmpersandAmpersandToken),
            ("||", SyntaxKind::BarBarToken),
            ("??", SyntaxKind::QuestionQuestionToken),
            ("{", SyntaxKind::OpenBraceToken),
            ("}", SyntaxKind::CloseBraceToken),
            ("(", SyntaxKind::OpenParenToken),
            (")", SyntaxKind::CloseParenToken),
            ("[", SyntaxKind::OpenBracketToken),
            ("]", SyntaxKind::CloseBracketToken),
            (".", SyntaxKind::DotToken),
            (";", SyntaxKind::SemicolonToken),
            (",", SyntaxKind::CommaToken),
            ("<", SyntaxKind::LessThanToken),
            (">", SyntaxKind::GreaterThanToken),
            ("+", SyntaxKind::PlusToken),
            ("-", SyntaxKind::MinusToken),
            ("*", SyntaxKind::AsteriskToken),
            ("/", SyntaxKind::SlashToken),
            ("%", SyntaxKind::PercentToken),
            ("!", SyntaxKind::ExclamationToken),
            (":", SyntaxKind::ColonToken),
            ("=", SyntaxKind::EqualsToken),
        ];

        // `?.` is only optional chaining when not followed by a digit (`a?.5:b`)
        if self.starts_with("?.") && !self.peek_char_at(2).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 2;
            return SyntaxKind::QuestionDotToken;
        }
        if self.starts_with("??") {
            self.pos += 2;
            return SyntaxKind::QuestionQuestionToken;
        }
        if ch == '?' {
            self.pos += 1;
            return SyntaxKind::QuestionToken;
        }

        for &(text, kind) in PUNCTUATION {
            if self.starts_with(text) {
                self.pos += text.len();
                return kind;
            }
        }

        self.pos += ch.len_utf8();
        SyntaxKind::Unknown
    }
}
