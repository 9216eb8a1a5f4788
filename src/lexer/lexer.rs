//! Logos-based lexer for Java
//!
//! Fast tokenization using the logos crate. Numbers, block comments and
//! text blocks are scanned by callbacks so that their full extent is
//! consumed in one token.

use super::token_kind::TokenKind;
use logos::Logos;
use text_size::TextSize;

/// A token with its kind, text, and position, before trivia attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedToken<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexedToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.inner.span().start as u32);

        let kind = match logos_token {
            Ok(LogosToken::Number) => classify_number(text),
            Ok(t) => t.into(),
            Err(()) => TokenKind::ERROR,
        };

        Some(LexedToken { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<LexedToken<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\f\r\n]+")]
    Whitespace,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[token("/*", lex_block_comment)]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_$\u{80}-\u{10FFFF}][a-zA-Z0-9_$\u{80}-\u{10FFFF}]*")]
    Ident,

    #[regex(r"[0-9]", lex_number)]
    #[regex(r"\.[0-9]", lex_number)]
    Number,

    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*""#)]
    String,

    #[token(r#"""""#, lex_text_block)]
    TextBlock,

    #[regex(r"'([^'\\\r\n]|\\[^\r\n])+'")]
    Char,

    // =========================================================================
    // MULTI-CHARACTER OPERATORS (longest match wins)
    // =========================================================================
    #[token(">>>=")]
    GtGtGtEq,
    #[token("<<=")]
    LtLtEq,
    #[token(">>=")]
    GtGtEq,
    #[token(">>>")]
    GtGtGt,
    #[token("...")]
    Ellipsis,
    #[token("->")]
    Arrow,
    #[token("::")]
    ColonColon,
    #[token("==")]
    EqEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("!=")]
    BangEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("%=")]
    PercentEq,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("@")]
    At,
    #[token("=")]
    Eq,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("%")]
    Percent,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("abstract")]
    AbstractKw,
    #[token("assert")]
    AssertKw,
    #[token("boolean")]
    BooleanKw,
    #[token("break")]
    BreakKw,
    #[token("byte")]
    ByteKw,
    #[token("case")]
    CaseKw,
    #[token("catch")]
    CatchKw,
    #[token("char")]
    CharKw,
    #[token("class")]
    ClassKw,
    #[token("const")]
    ConstKw,
    #[token("continue")]
    ContinueKw,
    #[token("default")]
    DefaultKw,
    #[token("do")]
    DoKw,
    #[token("double")]
    DoubleKw,
    #[token("else")]
    ElseKw,
    #[token("enum")]
    EnumKw,
    #[token("extends")]
    ExtendsKw,
    #[token("final")]
    FinalKw,
    #[token("finally")]
    FinallyKw,
    #[token("float")]
    FloatKw,
    #[token("for")]
    ForKw,
    #[token("goto")]
    GotoKw,
    #[token("if")]
    IfKw,
    #[token("implements")]
    ImplementsKw,
    #[token("import")]
    ImportKw,
    #[token("instanceof")]
    InstanceofKw,
    #[token("int")]
    IntKw,
    #[token("interface")]
    InterfaceKw,
    #[token("long")]
    LongKw,
    #[token("native")]
    NativeKw,
    #[token("new")]
    NewKw,
    #[token("package")]
    PackageKw,
    #[token("private")]
    PrivateKw,
    #[token("protected")]
    ProtectedKw,
    #[token("public")]
    PublicKw,
    #[token("return")]
    ReturnKw,
    #[token("short")]
    ShortKw,
    #[token("static")]
    StaticKw,
    #[token("strictfp")]
    StrictfpKw,
    #[token("super")]
    SuperKw,
    #[token("switch")]
    SwitchKw,
    #[token("synchronized")]
    SynchronizedKw,
    #[token("this")]
    ThisKw,
    #[token("throw")]
    ThrowKw,
    #[token("throws")]
    ThrowsKw,
    #[token("transient")]
    TransientKw,
    #[token("try")]
    TryKw,
    #[token("void")]
    VoidKw,
    #[token("volatile")]
    VolatileKw,
    #[token("while")]
    WhileKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
    #[token("null")]
    NullKw,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => TokenKind::WHITESPACE,
            LineComment => TokenKind::LINE_COMMENT,
            BlockComment => TokenKind::BLOCK_COMMENT,

            // Literals
            Ident => TokenKind::IDENT,
            Number => TokenKind::INT_LITERAL,
            String => TokenKind::STRING_LITERAL,
            TextBlock => TokenKind::TEXT_BLOCK,
            Char => TokenKind::CHAR_LITERAL,

            // Multi-char operators
            GtGtGtEq => TokenKind::GT_GT_GT_EQ,
            LtLtEq => TokenKind::LT_LT_EQ,
            GtGtEq => TokenKind::GT_GT_EQ,
            GtGtGt => TokenKind::GT_GT_GT,
            Ellipsis => TokenKind::ELLIPSIS,
            Arrow => TokenKind::ARROW,
            ColonColon => TokenKind::COLON_COLON,
            EqEq => TokenKind::EQ_EQ,
            LtEq => TokenKind::LT_EQ,
            GtEq => TokenKind::GT_EQ,
            BangEq => TokenKind::BANG_EQ,
            AmpAmp => TokenKind::AMP_AMP,
            PipePipe => TokenKind::PIPE_PIPE,
            PlusPlus => TokenKind::PLUS_PLUS,
            MinusMinus => TokenKind::MINUS_MINUS,
            LtLt => TokenKind::LT_LT,
            GtGt => TokenKind::GT_GT,
            PlusEq => TokenKind::PLUS_EQ,
            MinusEq => TokenKind::MINUS_EQ,
            StarEq => TokenKind::STAR_EQ,
            SlashEq => TokenKind::SLASH_EQ,
            AmpEq => TokenKind::AMP_EQ,
            PipeEq => TokenKind::PIPE_EQ,
            CaretEq => TokenKind::CARET_EQ,
            PercentEq => TokenKind::PERCENT_EQ,

            // Single-char punctuation
            LParen => TokenKind::L_PAREN,
            RParen => TokenKind::R_PAREN,
            LBrace => TokenKind::L_BRACE,
            RBrace => TokenKind::R_BRACE,
            LBracket => TokenKind::L_BRACKET,
            RBracket => TokenKind::R_BRACKET,
            Semicolon => TokenKind::SEMICOLON,
            Comma => TokenKind::COMMA,
            Dot => TokenKind::DOT,
            At => TokenKind::AT,
            Eq => TokenKind::EQ,
            Gt => TokenKind::GT,
            Lt => TokenKind::LT,
            Bang => TokenKind::BANG,
            Tilde => TokenKind::TILDE,
            Question => TokenKind::QUESTION,
            Colon => TokenKind::COLON,
            Plus => TokenKind::PLUS,
            Minus => TokenKind::MINUS,
            Star => TokenKind::STAR,
            Slash => TokenKind::SLASH,
            Amp => TokenKind::AMP,
            Pipe => TokenKind::PIPE,
            Caret => TokenKind::CARET,
            Percent => TokenKind::PERCENT,

            // Keywords
            AbstractKw => TokenKind::ABSTRACT_KW,
            AssertKw => TokenKind::ASSERT_KW,
            BooleanKw => TokenKind::BOOLEAN_KW,
            BreakKw => TokenKind::BREAK_KW,
            ByteKw => TokenKind::BYTE_KW,
            CaseKw => TokenKind::CASE_KW,
            CatchKw => TokenKind::CATCH_KW,
            CharKw => TokenKind::CHAR_KW,
            ClassKw => TokenKind::CLASS_KW,
            ConstKw => TokenKind::CONST_KW,
            ContinueKw => TokenKind::CONTINUE_KW,
            DefaultKw => TokenKind::DEFAULT_KW,
            DoKw => TokenKind::DO_KW,
            DoubleKw => TokenKind::DOUBLE_KW,
            ElseKw => TokenKind::ELSE_KW,
            EnumKw => TokenKind::ENUM_KW,
            ExtendsKw => TokenKind::EXTENDS_KW,
            FinalKw => TokenKind::FINAL_KW,
            FinallyKw => TokenKind::FINALLY_KW,
            FloatKw => TokenKind::FLOAT_KW,
            ForKw => TokenKind::FOR_KW,
            GotoKw => TokenKind::GOTO_KW,
            IfKw => TokenKind::IF_KW,
            ImplementsKw => TokenKind::IMPLEMENTS_KW,
            ImportKw => TokenKind::IMPORT_KW,
            InstanceofKw => TokenKind::INSTANCEOF_KW,
            IntKw => TokenKind::INT_KW,
            InterfaceKw => TokenKind::INTERFACE_KW,
            LongKw => TokenKind::LONG_KW,
            NativeKw => TokenKind::NATIVE_KW,
            NewKw => TokenKind::NEW_KW,
            PackageKw => TokenKind::PACKAGE_KW,
            PrivateKw => TokenKind::PRIVATE_KW,
            ProtectedKw => TokenKind::PROTECTED_KW,
            PublicKw => TokenKind::PUBLIC_KW,
            ReturnKw => TokenKind::RETURN_KW,
            ShortKw => TokenKind::SHORT_KW,
            StaticKw => TokenKind::STATIC_KW,
            StrictfpKw => TokenKind::STRICTFP_KW,
            SuperKw => TokenKind::SUPER_KW,
            SwitchKw => TokenKind::SWITCH_KW,
            SynchronizedKw => TokenKind::SYNCHRONIZED_KW,
            ThisKw => TokenKind::THIS_KW,
            ThrowKw => TokenKind::THROW_KW,
            ThrowsKw => TokenKind::THROWS_KW,
            TransientKw => TokenKind::TRANSIENT_KW,
            TryKw => TokenKind::TRY_KW,
            VoidKw => TokenKind::VOID_KW,
            VolatileKw => TokenKind::VOLATILE_KW,
            WhileKw => TokenKind::WHILE_KW,
            TrueKw => TokenKind::TRUE_KW,
            FalseKw => TokenKind::FALSE_KW,
            NullKw => TokenKind::NULL_KW,
        }
    }
}

// =============================================================================
// CALLBACKS
// =============================================================================

fn lex_block_comment(lex: &mut logos::Lexer<LogosToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

fn lex_text_block(lex: &mut logos::Lexer<LogosToken>) -> bool {
    let rest = lex.remainder().as_bytes();
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            b'\\' => i += 2,
            b'"' if rest[i..].starts_with(b"\"\"\"") => {
                lex.bump(i + 3);
                return true;
            }
            _ => i += 1,
        }
    }
    false
}

fn lex_number(lex: &mut logos::Lexer<LogosToken>) -> bool {
    let start = lex.span().start;
    let total = scan_number(&lex.source()[start..]);
    lex.bump(total.saturating_sub(lex.slice().len()));
    true
}

/// Length of the numeric literal at the start of `text` (JLS §3.10.1-2).
fn scan_number(text: &str) -> usize {
    let bytes = text.as_bytes();
    let at = |i: usize| bytes.get(i).copied().unwrap_or(0);
    let digits = |mut i: usize, accept: fn(u8) -> bool| {
        while accept(at(i)) || at(i) == b'_' {
            i += 1;
        }
        i
    };

    if at(0) == b'0' && matches!(at(1), b'x' | b'X') {
        let mut i = digits(2, |b| b.is_ascii_hexdigit());
        let mut floating = false;
        if at(i) == b'.' {
            floating = true;
            i = digits(i + 1, |b| b.is_ascii_hexdigit());
        }
        if matches!(at(i), b'p' | b'P') {
            floating = true;
            i += 1;
            if matches!(at(i), b'+' | b'-') {
                i += 1;
            }
            i = digits(i, |b| b.is_ascii_digit());
        }
        let suffix: &[u8] = if floating { b"fFdD" } else { b"lL" };
        if suffix.contains(&at(i)) {
            i += 1;
        }
        return i;
    }

    if at(0) == b'0' && matches!(at(1), b'b' | b'B') {
        let mut i = digits(2, |b| b == b'0' || b == b'1');
        if matches!(at(i), b'l' | b'L') {
            i += 1;
        }
        return i;
    }

    let mut i = digits(0, |b| b.is_ascii_digit());
    if at(i) == b'.' && at(i + 1) != b'.' {
        i = digits(i + 1, |b| b.is_ascii_digit());
    }
    if matches!(at(i), b'e' | b'E') {
        let mut j = i + 1;
        if matches!(at(j), b'+' | b'-') {
            j += 1;
        }
        if at(j).is_ascii_digit() {
            i = digits(j, |b| b.is_ascii_digit());
        }
    }
    if matches!(at(i), b'f' | b'F' | b'd' | b'D' | b'l' | b'L') {
        i += 1;
    }
    i
}

/// Refine a numeric token into its literal kind from suffix and shape.
pub fn classify_number(text: &str) -> TokenKind {
    let lower = text.to_ascii_lowercase();
    let hex = lower.starts_with("0x");
    match lower.as_bytes().last() {
        Some(b'l') => TokenKind::LONG_LITERAL,
        Some(b'f') if !hex || lower.contains('p') => TokenKind::FLOAT_LITERAL,
        Some(b'd') if !hex || lower.contains('p') => TokenKind::DOUBLE_LITERAL,
        _ if hex => {
            if lower.contains('p') {
                TokenKind::DOUBLE_LITERAL
            } else {
                TokenKind::INT_LITERAL
            }
        }
        _ if lower.contains('.') || lower.contains('e') => TokenKind::DOUBLE_LITERAL,
        _ => TokenKind::INT_LITERAL,
    }
}
