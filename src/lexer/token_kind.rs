//! Token kinds of the Java lexical grammar.
//!
//! Contextual keywords (`var`, `record`, `yield`, `sealed`, `permits`,
//! `when`, `module`, `requires`, ...) are lexed as [`TokenKind::IDENT`] and
//! recognized by their text where the grammar gives them meaning.

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - attached to the following token)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // IDENTIFIERS AND LITERALS
    // =========================================================================
    IDENT,
    INT_LITERAL,    // 42, 0x2A, 0b101
    LONG_LITERAL,   // 42L
    FLOAT_LITERAL,  // 1.5f
    DOUBLE_LITERAL, // 1.5, 1e3, 2d
    CHAR_LITERAL,   // 'c'
    STRING_LITERAL, // "text"
    TEXT_BLOCK,     // """ ... """

    // =========================================================================
    // SEPARATORS
    // =========================================================================
    L_PAREN,     // (
    R_PAREN,     // )
    L_BRACE,     // {
    R_BRACE,     // }
    L_BRACKET,   // [
    R_BRACKET,   // ]
    SEMICOLON,   // ;
    COMMA,       // ,
    DOT,         // .
    ELLIPSIS,    // ...
    AT,          // @
    COLON_COLON, // ::

    // =========================================================================
    // OPERATORS
    // =========================================================================
    EQ,          // =
    GT,          // >
    LT,          // <
    BANG,        // !
    TILDE,       // ~
    QUESTION,    // ?
    COLON,       // :
    ARROW,       // ->
    EQ_EQ,       // ==
    LT_EQ,       // <=
    GT_EQ,       // >=
    BANG_EQ,     // !=
    AMP_AMP,     // &&
    PIPE_PIPE,   // ||
    PLUS_PLUS,   // ++
    MINUS_MINUS, // --
    PLUS,        // +
    MINUS,       // -
    STAR,        // *
    SLASH,       // /
    AMP,         // &
    PIPE,        // |
    CARET,       // ^
    PERCENT,     // %
    LT_LT,       // <<
    GT_GT,       // >>
    GT_GT_GT,    // >>>
    PLUS_EQ,     // +=
    MINUS_EQ,    // -=
    STAR_EQ,     // *=
    SLASH_EQ,    // /=
    AMP_EQ,      // &=
    PIPE_EQ,     // |=
    CARET_EQ,    // ^=
    PERCENT_EQ,  // %=
    LT_LT_EQ,    // <<=
    GT_GT_EQ,    // >>=
    GT_GT_GT_EQ, // >>>=

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    ABSTRACT_KW,
    ASSERT_KW,
    BOOLEAN_KW,
    BREAK_KW,
    BYTE_KW,
    CASE_KW,
    CATCH_KW,
    CHAR_KW,
    CLASS_KW,
    CONST_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DO_KW,
    DOUBLE_KW,
    ELSE_KW,
    ENUM_KW,
    EXTENDS_KW,
    FINAL_KW,
    FINALLY_KW,
    FLOAT_KW,
    FOR_KW,
    GOTO_KW,
    IF_KW,
    IMPLEMENTS_KW,
    IMPORT_KW,
    INSTANCEOF_KW,
    INT_KW,
    INTERFACE_KW,
    LONG_KW,
    NATIVE_KW,
    NEW_KW,
    PACKAGE_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    RETURN_KW,
    SHORT_KW,
    STATIC_KW,
    STRICTFP_KW,
    SUPER_KW,
    SWITCH_KW,
    SYNCHRONIZED_KW,
    THIS_KW,
    THROW_KW,
    THROWS_KW,
    TRANSIENT_KW,
    TRY_KW,
    VOID_KW,
    VOLATILE_KW,
    WHILE_KW,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    ERROR,
    EOF,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::WHITESPACE | TokenKind::LINE_COMMENT | TokenKind::BLOCK_COMMENT
        )
    }

    pub fn is_keyword(self) -> bool {
        self >= TokenKind::ABSTRACT_KW && self <= TokenKind::NULL_KW
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::INT_LITERAL
                | TokenKind::LONG_LITERAL
                | TokenKind::FLOAT_LITERAL
                | TokenKind::DOUBLE_LITERAL
                | TokenKind::CHAR_LITERAL
                | TokenKind::STRING_LITERAL
                | TokenKind::TEXT_BLOCK
                | TokenKind::TRUE_KW
                | TokenKind::FALSE_KW
                | TokenKind::NULL_KW
        )
    }

    pub fn is_primitive_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::BOOLEAN_KW
                | TokenKind::BYTE_KW
                | TokenKind::CHAR_KW
                | TokenKind::SHORT_KW
                | TokenKind::INT_KW
                | TokenKind::LONG_KW
                | TokenKind::FLOAT_KW
                | TokenKind::DOUBLE_KW
                | TokenKind::VOID_KW
        )
    }

    /// Kind of an operator or separator spelled `text`.
    ///
    /// Used when a compound token is split and its pieces need a kind again.
    pub fn from_operator(text: &str) -> Option<TokenKind> {
        use TokenKind::*;
        let kind = match text {
            "(" => L_PAREN,
            ")" => R_PAREN,
            "{" => L_BRACE,
            "}" => R_BRACE,
            "[" => L_BRACKET,
            "]" => R_BRACKET,
            ";" => SEMICOLON,
            "," => COMMA,
            "." => DOT,
            "..." => ELLIPSIS,
            "@" => AT,
            "::" => COLON_COLON,
            "=" => EQ,
            ">" => GT,
            "<" => LT,
            "!" => BANG,
            "~" => TILDE,
            "?" => QUESTION,
            ":" => COLON,
            "->" => ARROW,
            "==" => EQ_EQ,
            "<=" => LT_EQ,
            ">=" => GT_EQ,
            "!=" => BANG_EQ,
            "&&" => AMP_AMP,
            "||" => PIPE_PIPE,
            "++" => PLUS_PLUS,
            "--" => MINUS_MINUS,
            "+" => PLUS,
            "-" => MINUS,
            "*" => STAR,
            "/" => SLASH,
            "&" => AMP,
            "|" => PIPE,
            "^" => CARET,
            "%" => PERCENT,
            "<<" => LT_LT,
            ">>" => GT_GT,
            ">>>" => GT_GT_GT,
            "+=" => PLUS_EQ,
            "-=" => MINUS_EQ,
            "*=" => STAR_EQ,
            "/=" => SLASH_EQ,
            "&=" => AMP_EQ,
            "|=" => PIPE_EQ,
            "^=" => CARET_EQ,
            "%=" => PERCENT_EQ,
            "<<=" => LT_LT_EQ,
            ">>=" => GT_GT_EQ,
            ">>>=" => GT_GT_GT_EQ,
            _ => return None,
        };
        Some(kind)
    }

    /// Compound tokens that start with `>` and may close a generic.
    pub fn is_compound_greater(self) -> bool {
        matches!(
            self,
            TokenKind::GT_GT | TokenKind::GT_GT_GT | TokenKind::GT_GT_EQ | TokenKind::GT_GT_GT_EQ
        )
    }
}
