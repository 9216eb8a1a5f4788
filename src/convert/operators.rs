//! Static tables from raw operator and literal enumerations to node kinds.

use crate::frontend::{
    RawAssignmentOperator, RawInfixOperator, RawLiteralKind, RawPostfixOperator,
    RawPrefixOperator,
};
use crate::lexer::TokenKind;
use crate::syntax::TreeKind;

const INFIX: &[(RawInfixOperator, TreeKind)] = &[
    (RawInfixOperator::Times, TreeKind::MULTIPLY),
    (RawInfixOperator::Divide, TreeKind::DIVIDE),
    (RawInfixOperator::Remainder, TreeKind::REMAINDER),
    (RawInfixOperator::Plus, TreeKind::PLUS),
    (RawInfixOperator::Minus, TreeKind::MINUS),
    (RawInfixOperator::LeftShift, TreeKind::LEFT_SHIFT),
    (RawInfixOperator::RightShiftSigned, TreeKind::RIGHT_SHIFT),
    (RawInfixOperator::RightShiftUnsigned, TreeKind::UNSIGNED_RIGHT_SHIFT),
    (RawInfixOperator::Less, TreeKind::LESS_THAN),
    (RawInfixOperator::Greater, TreeKind::GREATER_THAN),
    (RawInfixOperator::LessEquals, TreeKind::LESS_THAN_OR_EQUAL_TO),
    (RawInfixOperator::GreaterEquals, TreeKind::GREATER_THAN_OR_EQUAL_TO),
    (RawInfixOperator::Equals, TreeKind::EQUAL_TO),
    (RawInfixOperator::NotEquals, TreeKind::NOT_EQUAL_TO),
    (RawInfixOperator::Xor, TreeKind::XOR),
    (RawInfixOperator::And, TreeKind::AND),
    (RawInfixOperator::Or, TreeKind::OR),
    (RawInfixOperator::ConditionalAnd, TreeKind::CONDITIONAL_AND),
    (RawInfixOperator::ConditionalOr, TreeKind::CONDITIONAL_OR),
];

const PREFIX: &[(RawPrefixOperator, TreeKind)] = &[
    (RawPrefixOperator::Increment, TreeKind::PREFIX_INCREMENT),
    (RawPrefixOperator::Decrement, TreeKind::PREFIX_DECREMENT),
    (RawPrefixOperator::Plus, TreeKind::UNARY_PLUS),
    (RawPrefixOperator::Minus, TreeKind::UNARY_MINUS),
    (RawPrefixOperator::Complement, TreeKind::BITWISE_COMPLEMENT),
    (RawPrefixOperator::Not, TreeKind::LOGICAL_COMPLEMENT),
];

const POSTFIX: &[(RawPostfixOperator, TreeKind)] = &[
    (RawPostfixOperator::Increment, TreeKind::POSTFIX_INCREMENT),
    (RawPostfixOperator::Decrement, TreeKind::POSTFIX_DECREMENT),
];

const ASSIGNMENT: &[(RawAssignmentOperator, TreeKind)] = &[
    (RawAssignmentOperator::Assign, TreeKind::ASSIGNMENT),
    (RawAssignmentOperator::PlusAssign, TreeKind::PLUS_ASSIGNMENT),
    (RawAssignmentOperator::MinusAssign, TreeKind::MINUS_ASSIGNMENT),
    (RawAssignmentOperator::TimesAssign, TreeKind::MULTIPLY_ASSIGNMENT),
    (RawAssignmentOperator::DivideAssign, TreeKind::DIVIDE_ASSIGNMENT),
    (RawAssignmentOperator::RemainderAssign, TreeKind::REMAINDER_ASSIGNMENT),
    (RawAssignmentOperator::BitAndAssign, TreeKind::AND_ASSIGNMENT),
    (RawAssignmentOperator::BitOrAssign, TreeKind::OR_ASSIGNMENT),
    (RawAssignmentOperator::BitXorAssign, TreeKind::XOR_ASSIGNMENT),
    (RawAssignmentOperator::LeftShiftAssign, TreeKind::LEFT_SHIFT_ASSIGNMENT),
    (RawAssignmentOperator::RightShiftSignedAssign, TreeKind::RIGHT_SHIFT_ASSIGNMENT),
    (
        RawAssignmentOperator::RightShiftUnsignedAssign,
        TreeKind::UNSIGNED_RIGHT_SHIFT_ASSIGNMENT,
    ),
];

const LITERAL: &[(RawLiteralKind, TreeKind)] = &[
    (RawLiteralKind::Character, TreeKind::CHAR_LITERAL),
    (RawLiteralKind::String, TreeKind::STRING_LITERAL),
    (RawLiteralKind::TextBlock, TreeKind::TEXT_BLOCK),
    (RawLiteralKind::Boolean, TreeKind::BOOLEAN_LITERAL),
    (RawLiteralKind::Null, TreeKind::NULL_LITERAL),
];

const NUMBER: &[(TokenKind, TreeKind)] = &[
    (TokenKind::INT_LITERAL, TreeKind::INT_LITERAL),
    (TokenKind::LONG_LITERAL, TreeKind::LONG_LITERAL),
    (TokenKind::FLOAT_LITERAL, TreeKind::FLOAT_LITERAL),
    (TokenKind::DOUBLE_LITERAL, TreeKind::DOUBLE_LITERAL),
];

fn lookup<K: PartialEq + Copy>(table: &[(K, TreeKind)], key: K) -> Option<TreeKind> {
    table.iter().find(|(k, _)| *k == key).map(|(_, kind)| *kind)
}

pub fn infix_kind(operator: RawInfixOperator) -> Option<TreeKind> {
    lookup(INFIX, operator)
}

pub fn prefix_kind(operator: RawPrefixOperator) -> Option<TreeKind> {
    lookup(PREFIX, operator)
}

pub fn postfix_kind(operator: RawPostfixOperator) -> Option<TreeKind> {
    lookup(POSTFIX, operator)
}

pub fn assignment_kind(operator: RawAssignmentOperator) -> Option<TreeKind> {
    lookup(ASSIGNMENT, operator)
}

/// Literal node kind. Numbers are refined by the lexed token.
pub fn literal_kind(literal: RawLiteralKind, token: TokenKind) -> Option<TreeKind> {
    match literal {
        RawLiteralKind::Number => lookup(NUMBER, token),
        other => lookup(LITERAL, other),
    }
}
