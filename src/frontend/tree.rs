//! The raw bound tree handed over by the external frontend.
//!
//! Shapes follow what a Java compiler's DOM exposes: declarations,
//! statements and expressions with byte spans into the source and opaque
//! binding handles. Spans never include leading comments. Tokens that the
//! raw tree does not model (keywords, punctuation, stray `;`) are recovered
//! from the re-lexed token stream during conversion.

use smol_str::SmolStr;
use text_size::TextRange;

use super::binding::BindingId;

// ============================================================================
// NAMES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RawSimpleName {
    pub span: TextRange,
    pub identifier: SmolStr,
    /// What the name refers to: a variable, method, type or package.
    pub binding: Option<BindingId>,
    /// Type of the name when used as an expression.
    pub type_binding: Option<BindingId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawName {
    Simple(RawSimpleName),
    Qualified {
        span: TextRange,
        qualifier: Box<RawName>,
        name: RawSimpleName,
    },
}

impl RawName {
    pub fn span(&self) -> TextRange {
        match self {
            RawName::Simple(name) => name.span,
            RawName::Qualified { span, .. } => *span,
        }
    }

    /// The rightmost simple name.
    pub fn last(&self) -> &RawSimpleName {
        match self {
            RawName::Simple(name) => name,
            RawName::Qualified { name, .. } => name,
        }
    }

    /// Dotted source form, e.g. `java.util.List`.
    pub fn full_name(&self) -> String {
        match self {
            RawName::Simple(name) => name.identifier.to_string(),
            RawName::Qualified {
                qualifier, name, ..
            } => format!("{}.{}", qualifier.full_name(), name.identifier),
        }
    }
}

// ============================================================================
// COMPILATION UNIT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RawCompilationUnit {
    pub span: TextRange,
    pub package: Option<RawPackageDeclaration>,
    pub imports: Vec<RawImport>,
    pub types: Vec<RawTypeDeclaration>,
    pub module: Option<RawModuleDeclaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawPackageDeclaration {
    pub span: TextRange,
    pub annotations: Vec<RawAnnotation>,
    pub name: RawName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawImport {
    pub span: TextRange,
    pub is_static: bool,
    pub on_demand: bool,
    pub name: RawName,
}

// ============================================================================
// MODULES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RawModuleDeclaration {
    pub span: TextRange,
    pub annotations: Vec<RawAnnotation>,
    pub open: bool,
    pub name: RawName,
    pub directives: Vec<RawDirective>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawDirective {
    pub span: TextRange,
    pub kind: RawDirectiveKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawDirectiveKind {
    /// `requires transitive static m;`. Modifier keywords are recovered
    /// from the tokens.
    Requires { module: RawName },
    Exports { package: RawName, to: Vec<RawName> },
    Opens { package: RawName, to: Vec<RawName> },
    Uses { service: RawName },
    Provides {
        service: RawName,
        implementations: Vec<RawName>,
    },
}

// ============================================================================
// DECLARATIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawDeclarationKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawModifier {
    /// A modifier keyword; `non-sealed` spans three tokens.
    Keyword { span: TextRange, keyword: SmolStr },
    Annotation(RawAnnotation),
}

impl RawModifier {
    pub fn span(&self) -> TextRange {
        match self {
            RawModifier::Keyword { span, .. } => *span,
            RawModifier::Annotation(annotation) => annotation.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawTypeDeclaration {
    pub span: TextRange,
    pub kind: RawDeclarationKind,
    pub modifiers: Vec<RawModifier>,
    pub name: RawSimpleName,
    pub type_parameters: Vec<RawTypeParameter>,
    pub record_components: Vec<RawSingleVariable>,
    pub superclass: Option<RawType>,
    pub interfaces: Vec<RawType>,
    pub permitted: Vec<RawType>,
    pub enum_constants: Vec<RawEnumConstant>,
    pub body: Vec<RawBodyDeclaration>,
    pub binding: Option<BindingId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawBodyDeclaration {
    Field(RawFieldDeclaration),
    Method(RawMethodDeclaration),
    Initializer(RawInitializer),
    Type(RawTypeDeclaration),
    AnnotationMember(RawAnnotationMember),
}

impl RawBodyDeclaration {
    pub fn span(&self) -> TextRange {
        match self {
            RawBodyDeclaration::Field(d) => d.span,
            RawBodyDeclaration::Method(d) => d.span,
            RawBodyDeclaration::Initializer(d) => d.span,
            RawBodyDeclaration::Type(d) => d.span,
            RawBodyDeclaration::AnnotationMember(d) => d.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawFieldDeclaration {
    pub span: TextRange,
    pub modifiers: Vec<RawModifier>,
    pub ty: RawType,
    pub fragments: Vec<RawFragment>,
}

/// One declarator of a field or local variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFragment {
    pub span: TextRange,
    pub name: RawSimpleName,
    /// Extra `[]` after the name.
    pub extra_dimensions: u32,
    pub initializer: Option<RawExpression>,
    pub binding: Option<BindingId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawMethodDeclaration {
    pub span: TextRange,
    pub modifiers: Vec<RawModifier>,
    pub type_parameters: Vec<RawTypeParameter>,
    /// Absent for constructors.
    pub return_type: Option<RawType>,
    pub constructor: bool,
    /// Compact canonical record constructor, without a parameter list.
    pub compact: bool,
    pub name: RawSimpleName,
    pub parameters: Vec<RawSingleVariable>,
    pub extra_dimensions: u32,
    pub thrown: Vec<RawType>,
    pub body: Option<RawBlock>,
    pub binding: Option<BindingId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawAnnotationMember {
    pub span: TextRange,
    pub modifiers: Vec<RawModifier>,
    pub ty: RawType,
    pub name: RawSimpleName,
    pub default: Option<RawExpression>,
    pub binding: Option<BindingId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawInitializer {
    pub span: TextRange,
    pub is_static: bool,
    pub body: RawBlock,
}

/// Parameter, record component, catch parameter, pattern variable or
/// lambda parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSingleVariable {
    pub span: TextRange,
    pub modifiers: Vec<RawModifier>,
    /// Absent for implicitly typed lambda parameters.
    pub ty: Option<RawType>,
    pub varargs: bool,
    pub name: RawSimpleName,
    pub extra_dimensions: u32,
    pub initializer: Option<RawExpression>,
    pub binding: Option<BindingId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawEnumConstant {
    pub span: TextRange,
    pub modifiers: Vec<RawModifier>,
    pub name: RawSimpleName,
    /// `None` when the constant has no argument list at all.
    pub arguments: Option<Vec<RawExpression>>,
    pub body: Option<RawAnonymousClass>,
    pub binding: Option<BindingId>,
    /// The constructor invoked by the constant.
    pub constructor: Option<BindingId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawAnonymousClass {
    pub span: TextRange,
    pub body: Vec<RawBodyDeclaration>,
    pub binding: Option<BindingId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawTypeParameter {
    pub span: TextRange,
    pub annotations: Vec<RawAnnotation>,
    pub name: RawSimpleName,
    pub bounds: Vec<RawType>,
    pub binding: Option<BindingId>,
}

// ============================================================================
// STATEMENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    pub span: TextRange,
    pub statements: Vec<RawStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawStatement {
    pub span: TextRange,
    pub kind: RawStatementKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawStatementKind {
    Block(RawBlock),
    Empty,
    Expression(RawExpression),
    LocalVariable {
        modifiers: Vec<RawModifier>,
        ty: RawType,
        fragments: Vec<RawFragment>,
    },
    LocalType(RawTypeDeclaration),
    If {
        condition: RawExpression,
        then: Box<RawStatement>,
        otherwise: Option<Box<RawStatement>>,
    },
    Assert {
        condition: RawExpression,
        message: Option<RawExpression>,
    },
    /// Case labels and statements come as one flat list, as the compiler
    /// DOM has them.
    Switch {
        selector: RawExpression,
        body: Vec<RawStatement>,
    },
    SwitchCase {
        /// Constants, patterns and `default` inside `case null, default`.
        labels: Vec<RawExpression>,
        is_default: bool,
        arrow: bool,
    },
    While {
        condition: RawExpression,
        body: Box<RawStatement>,
    },
    Do {
        body: Box<RawStatement>,
        condition: RawExpression,
    },
    For {
        initializers: Vec<RawExpression>,
        condition: Option<RawExpression>,
        updaters: Vec<RawExpression>,
        body: Box<RawStatement>,
    },
    ForEach {
        variable: RawSingleVariable,
        iterable: RawExpression,
        body: Box<RawStatement>,
    },
    Break { label: Option<RawSimpleName> },
    Continue { label: Option<RawSimpleName> },
    Return { expression: Option<RawExpression> },
    Throw { expression: RawExpression },
    Synchronized {
        lock: RawExpression,
        body: RawBlock,
    },
    Try {
        resources: Vec<RawExpression>,
        body: RawBlock,
        catches: Vec<RawCatch>,
        finally: Option<RawBlock>,
    },
    Labeled {
        label: RawSimpleName,
        body: Box<RawStatement>,
    },
    /// `implicit` marks the expression body of a `case ... ->` rule.
    Yield {
        expression: RawExpression,
        implicit: bool,
    },
    /// `this(...)` in a constructor.
    ConstructorInvocation {
        type_arguments: Vec<RawType>,
        arguments: Vec<RawExpression>,
        binding: Option<BindingId>,
    },
    /// `super(...)` or `outer.super(...)` in a constructor.
    SuperConstructorInvocation {
        qualifier: Option<RawExpression>,
        type_arguments: Vec<RawType>,
        arguments: Vec<RawExpression>,
        binding: Option<BindingId>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawCatch {
    pub span: TextRange,
    pub parameter: RawSingleVariable,
    pub body: RawBlock,
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RawExpression {
    pub span: TextRange,
    pub kind: RawExpressionKind,
    /// Resolved type of the expression.
    pub type_binding: Option<BindingId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawLiteralKind {
    /// Integral or floating point; the exact kind comes from the token.
    Number,
    Character,
    String,
    TextBlock,
    Boolean,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawInfixOperator {
    Times,
    Divide,
    Remainder,
    Plus,
    Minus,
    LeftShift,
    RightShiftSigned,
    RightShiftUnsigned,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    Equals,
    NotEquals,
    Xor,
    And,
    Or,
    ConditionalAnd,
    ConditionalOr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawPrefixOperator {
    Increment,
    Decrement,
    Plus,
    Minus,
    Complement,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawPostfixOperator {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawAssignmentOperator {
    Assign,
    PlusAssign,
    MinusAssign,
    TimesAssign,
    DivideAssign,
    RemainderAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    LeftShiftAssign,
    RightShiftSignedAssign,
    RightShiftUnsignedAssign,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawLambdaBody {
    Expression(Box<RawExpression>),
    Block(RawBlock),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawMethodReferenceTarget {
    Expression(Box<RawExpression>),
    Type(RawType),
    /// `super::m` or `Outer.super::m`.
    Super(Option<RawName>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawExpressionKind {
    Name(RawName),
    Literal(RawLiteralKind),
    Infix {
        operator: RawInfixOperator,
        left: Box<RawExpression>,
        right: Box<RawExpression>,
        /// Further operands of a flattened `a + b + c` chain.
        extended: Vec<RawExpression>,
    },
    Prefix {
        operator: RawPrefixOperator,
        operand: Box<RawExpression>,
    },
    Postfix {
        operator: RawPostfixOperator,
        operand: Box<RawExpression>,
    },
    Assignment {
        operator: RawAssignmentOperator,
        left: Box<RawExpression>,
        right: Box<RawExpression>,
    },
    MethodInvocation {
        receiver: Option<Box<RawExpression>>,
        type_arguments: Vec<RawType>,
        name: RawSimpleName,
        arguments: Vec<RawExpression>,
        binding: Option<BindingId>,
    },
    SuperMethodInvocation {
        qualifier: Option<RawName>,
        type_arguments: Vec<RawType>,
        name: RawSimpleName,
        arguments: Vec<RawExpression>,
        binding: Option<BindingId>,
    },
    ClassInstanceCreation {
        outer: Option<Box<RawExpression>>,
        type_arguments: Vec<RawType>,
        ty: RawType,
        arguments: Vec<RawExpression>,
        body: Option<RawAnonymousClass>,
        binding: Option<BindingId>,
    },
    ArrayCreation {
        element_type: RawType,
        /// Sized dimensions; empty `[]` pairs come from the tokens.
        dimensions: Vec<RawExpression>,
        initializer: Option<Box<RawExpression>>,
    },
    ArrayInitializer(Vec<RawExpression>),
    ArrayAccess {
        array: Box<RawExpression>,
        index: Box<RawExpression>,
    },
    FieldAccess {
        expression: Box<RawExpression>,
        name: RawSimpleName,
    },
    SuperFieldAccess {
        qualifier: Option<RawName>,
        name: RawSimpleName,
    },
    This { qualifier: Option<RawName> },
    Cast {
        ty: RawType,
        expression: Box<RawExpression>,
    },
    Instanceof {
        expression: Box<RawExpression>,
        ty: RawType,
    },
    PatternInstanceof {
        expression: Box<RawExpression>,
        pattern: RawPattern,
    },
    Conditional {
        condition: Box<RawExpression>,
        then: Box<RawExpression>,
        otherwise: Box<RawExpression>,
    },
    Parenthesized(Box<RawExpression>),
    Lambda {
        parameters: Vec<RawSingleVariable>,
        body: RawLambdaBody,
        binding: Option<BindingId>,
    },
    MethodReference {
        target: RawMethodReferenceTarget,
        type_arguments: Vec<RawType>,
        /// `None` for `::new`.
        name: Option<RawSimpleName>,
        binding: Option<BindingId>,
    },
    TypeLiteral(RawType),
    Switch {
        selector: Box<RawExpression>,
        body: Vec<RawStatement>,
    },
    /// Local declaration inside `for (...)` or a try resource.
    VariableDeclaration {
        modifiers: Vec<RawModifier>,
        ty: RawType,
        fragments: Vec<RawFragment>,
    },
    Pattern(RawPattern),
    /// `default` inside `case null, default`.
    CaseDefault,
    Annotation(RawAnnotation),
}

// ============================================================================
// PATTERNS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RawPattern {
    pub span: TextRange,
    pub kind: RawPatternKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawPatternKind {
    Type(Box<RawSingleVariable>),
    Record {
        ty: RawType,
        patterns: Vec<RawPattern>,
    },
    Guarded {
        pattern: Box<RawPattern>,
        guard: Box<RawExpression>,
    },
}

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RawType {
    pub span: TextRange,
    pub annotations: Vec<RawAnnotation>,
    pub kind: RawTypeNodeKind,
    pub binding: Option<BindingId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawWildcardBound {
    Extends,
    Super,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawTypeNodeKind {
    /// `int`, `void`, ...
    Primitive(SmolStr),
    /// A possibly qualified class type name.
    Named(RawName),
    Array {
        element: Box<RawType>,
        dimensions: u32,
    },
    Parameterized {
        ty: Box<RawType>,
        arguments: Vec<RawType>,
    },
    Wildcard {
        bound: Option<(RawWildcardBound, Box<RawType>)>,
    },
    Union(Vec<RawType>),
    Intersection(Vec<RawType>),
    /// `var`
    Var,
}

// ============================================================================
// ANNOTATIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RawAnnotation {
    pub span: TextRange,
    pub name: RawName,
    pub kind: RawAnnotationKind,
    /// The resolved annotation instance.
    pub binding: Option<BindingId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawAnnotationKind {
    Marker,
    SingleMember(Box<RawExpression>),
    Normal(Vec<RawMemberValuePair>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawMemberValuePair {
    pub span: TextRange,
    pub name: RawSimpleName,
    pub value: RawExpression,
}
