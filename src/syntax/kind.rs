//! Node kinds of the Java concrete syntax tree.
//!
//! A closed set: every raw construct maps onto exactly one of these, and
//! token leaves are [`TreeKind::TOKEN`].

/// All node kinds in the CST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum TreeKind {
    /// A token leaf.
    TOKEN = 0,

    // =========================================================================
    // COMPILATION UNIT
    // =========================================================================
    COMPILATION_UNIT,
    PACKAGE,
    IMPORT,
    MODULE,
    REQUIRES_DIRECTIVE,
    EXPORTS_DIRECTIVE,
    OPENS_DIRECTIVE,
    USES_DIRECTIVE,
    PROVIDES_DIRECTIVE,

    // =========================================================================
    // DECLARATIONS
    // =========================================================================
    CLASS,
    INTERFACE,
    ENUM,
    RECORD,
    ANNOTATION_TYPE,
    ENUM_CONSTANT,
    METHOD,
    CONSTRUCTOR,
    /// Field, local variable, parameter, record component or resource.
    VARIABLE,
    MODIFIERS,
    INITIALIZER,
    STATIC_INITIALIZER,
    TYPE_PARAMETER,
    TYPE_PARAMETERS,
    /// `extends`/`implements`/`permits`/`throws` clauses and other
    /// separated lists.
    LIST,

    // =========================================================================
    // STATEMENTS
    // =========================================================================
    BLOCK,
    EMPTY_STATEMENT,
    LABELED_STATEMENT,
    EXPRESSION_STATEMENT,
    IF_STATEMENT,
    ASSERT_STATEMENT,
    SWITCH_STATEMENT,
    CASE_GROUP,
    CASE_LABEL,
    WHILE_STATEMENT,
    DO_STATEMENT,
    FOR_STATEMENT,
    FOR_EACH_STATEMENT,
    BREAK_STATEMENT,
    CONTINUE_STATEMENT,
    RETURN_STATEMENT,
    THROW_STATEMENT,
    SYNCHRONIZED_STATEMENT,
    TRY_STATEMENT,
    CATCH,
    YIELD_STATEMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    INT_LITERAL,
    LONG_LITERAL,
    FLOAT_LITERAL,
    DOUBLE_LITERAL,
    BOOLEAN_LITERAL,
    CHAR_LITERAL,
    STRING_LITERAL,
    TEXT_BLOCK,
    NULL_LITERAL,

    // =========================================================================
    // UNARY EXPRESSIONS
    // =========================================================================
    POSTFIX_INCREMENT,
    POSTFIX_DECREMENT,
    PREFIX_INCREMENT,
    PREFIX_DECREMENT,
    UNARY_PLUS,
    UNARY_MINUS,
    BITWISE_COMPLEMENT,
    LOGICAL_COMPLEMENT,

    // =========================================================================
    // BINARY EXPRESSIONS
    // =========================================================================
    MULTIPLY,
    DIVIDE,
    REMAINDER,
    PLUS,
    MINUS,
    LEFT_SHIFT,
    RIGHT_SHIFT,
    UNSIGNED_RIGHT_SHIFT,
    LESS_THAN,
    GREATER_THAN,
    LESS_THAN_OR_EQUAL_TO,
    GREATER_THAN_OR_EQUAL_TO,
    EQUAL_TO,
    NOT_EQUAL_TO,
    AND,
    XOR,
    OR,
    CONDITIONAL_AND,
    CONDITIONAL_OR,

    // =========================================================================
    // ASSIGNMENTS
    // =========================================================================
    ASSIGNMENT,
    MULTIPLY_ASSIGNMENT,
    DIVIDE_ASSIGNMENT,
    REMAINDER_ASSIGNMENT,
    PLUS_ASSIGNMENT,
    MINUS_ASSIGNMENT,
    LEFT_SHIFT_ASSIGNMENT,
    RIGHT_SHIFT_ASSIGNMENT,
    UNSIGNED_RIGHT_SHIFT_ASSIGNMENT,
    AND_ASSIGNMENT,
    XOR_ASSIGNMENT,
    OR_ASSIGNMENT,

    // =========================================================================
    // OTHER EXPRESSIONS
    // =========================================================================
    IDENTIFIER,
    MEMBER_SELECT,
    METHOD_INVOCATION,
    NEW_CLASS,
    NEW_ARRAY,
    ARRAY_ACCESS_EXPRESSION,
    TYPE_CAST,
    INSTANCE_OF,
    PATTERN_INSTANCE_OF,
    CONDITIONAL_EXPRESSION,
    PARENTHESIZED_EXPRESSION,
    LAMBDA_EXPRESSION,
    METHOD_REFERENCE,
    SWITCH_EXPRESSION,
    ARGUMENTS,
    /// `{ a, b }` array initializer.
    ARRAY_INITIALIZER,

    // =========================================================================
    // PATTERNS
    // =========================================================================
    TYPE_PATTERN,
    RECORD_PATTERN,
    GUARDED_PATTERN,
    DEFAULT_PATTERN,

    // =========================================================================
    // TYPES
    // =========================================================================
    PRIMITIVE_TYPE,
    ARRAY_TYPE,
    PARAMETERIZED_TYPE,
    TYPE_ARGUMENTS,
    UNBOUNDED_WILDCARD,
    EXTENDS_WILDCARD,
    SUPER_WILDCARD,
    UNION_TYPE,
    INTERSECTION_TYPE,
    VAR_TYPE,
    /// Type of an implicitly typed lambda parameter; has no tokens.
    INFERRED_TYPE,

    // =========================================================================
    // ANNOTATIONS
    // =========================================================================
    ANNOTATION,
}

impl TreeKind {
    pub fn is_token(self) -> bool {
        self == TreeKind::TOKEN
    }

    pub fn is_class_like(self) -> bool {
        matches!(
            self,
            TreeKind::CLASS
                | TreeKind::INTERFACE
                | TreeKind::ENUM
                | TreeKind::RECORD
                | TreeKind::ANNOTATION_TYPE
        )
    }

    pub fn is_method_like(self) -> bool {
        matches!(self, TreeKind::METHOD | TreeKind::CONSTRUCTOR)
    }

    pub fn is_literal(self) -> bool {
        self >= TreeKind::INT_LITERAL && self <= TreeKind::NULL_LITERAL
    }

    pub fn is_unary(self) -> bool {
        self >= TreeKind::POSTFIX_INCREMENT && self <= TreeKind::LOGICAL_COMPLEMENT
    }

    pub fn is_binary(self) -> bool {
        self >= TreeKind::MULTIPLY && self <= TreeKind::CONDITIONAL_OR
    }

    pub fn is_assignment(self) -> bool {
        self >= TreeKind::ASSIGNMENT && self <= TreeKind::OR_ASSIGNMENT
    }

    pub fn is_statement(self) -> bool {
        self >= TreeKind::BLOCK && self <= TreeKind::YIELD_STATEMENT
            && !matches!(self, TreeKind::CASE_GROUP | TreeKind::CASE_LABEL | TreeKind::CATCH)
    }

    pub fn is_expression(self) -> bool {
        self >= TreeKind::INT_LITERAL && self <= TreeKind::SWITCH_EXPRESSION
            || self == TreeKind::ARRAY_INITIALIZER
    }

    pub fn is_type(self) -> bool {
        self >= TreeKind::PRIMITIVE_TYPE && self <= TreeKind::INFERRED_TYPE
            && self != TreeKind::TYPE_ARGUMENTS
    }

    pub fn is_pattern(self) -> bool {
        self >= TreeKind::TYPE_PATTERN && self <= TreeKind::DEFAULT_PATTERN
    }
}
