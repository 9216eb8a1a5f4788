//! Constant folding over expression nodes.
//!
//! Follows the language's compile-time constant rules: literals, unary
//! and binary operators with numeric promotion, casts to primitives and
//! `String`, conditionals, and final variables initialized with constant
//! expressions. Anything else folds to `None`.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::context::SemanticContext;
use super::symbols::{Symbol, SymbolId};
use crate::base::Constant;
use crate::frontend::BindingId;
use crate::syntax::{Node, TreeKind};

pub(super) fn fold(ctx: &SemanticContext, node: Node<'_>, visiting: &mut FxHashSet<SymbolId>) -> Option<Constant> {
    let kind = node.kind();
    if kind.is_literal() {
        return literal(kind, &node.text());
    }
    if kind.is_unary() {
        return unary(kind, fold(ctx, operand(node, 0)?, visiting)?);
    }
    if kind.is_binary() {
        let left = fold(ctx, operand(node, 0)?, visiting)?;
        // `&&` and `||` still need both sides to be constant.
        let right = fold(ctx, operand(node, 1)?, visiting)?;
        return binary(kind, left, right);
    }
    match kind {
        TreeKind::PARENTHESIZED_EXPRESSION => fold(ctx, operand(node, 0)?, visiting),
        TreeKind::CONDITIONAL_EXPRESSION => {
            let condition = fold(ctx, operand(node, 0)?, visiting)?.as_bool()?;
            let then = fold(ctx, operand(node, 1)?, visiting)?;
            let otherwise = fold(ctx, operand(node, 2)?, visiting)?;
            let (then, otherwise) = promote_pair(then, otherwise);
            Some(if condition { then } else { otherwise })
        }
        TreeKind::TYPE_CAST => {
            let target = cast_target(ctx, operand(node, 0)?)?;
            let value = fold(ctx, operand(node, 1)?, visiting)?;
            cast(value, &target)
        }
        TreeKind::IDENTIFIER | TreeKind::MEMBER_SELECT => {
            let binding = name_binding(node)?;
            variable_value(ctx.symbol_of(binding), visiting)
        }
        _ => None,
    }
}

/// The `index`th non-leaf child.
fn operand(node: Node<'_>, index: usize) -> Option<Node<'_>> {
    node.child_nodes().filter(|c| !c.is_leaf()).nth(index)
}

/// The binding of a simple or qualified name: the selected identifier's.
fn name_binding(node: Node<'_>) -> Option<BindingId> {
    if node.is(TreeKind::MEMBER_SELECT) {
        let last = node.child_nodes().rev().find(|c| c.is(TreeKind::IDENTIFIER))?;
        return last.binding().or(node.binding());
    }
    node.binding()
}

fn cast_target(ctx: &SemanticContext, ty: Node<'_>) -> Option<SmolStr> {
    if ty.is(TreeKind::PRIMITIVE_TYPE) {
        return Some(SmolStr::new(ty.text()));
    }
    let ty = ctx.type_of_node(ty);
    ty.is("java.lang.String").then(|| ty.fully_qualified_name())
}

/// Value of a constant variable, memoized per symbol.
pub(super) fn variable_value(symbol: Symbol<'_>, visiting: &mut FxHashSet<SymbolId>) -> Option<Constant> {
    if !symbol.is_variable_symbol() || symbol.is_unknown() {
        return None;
    }
    let ctx = symbol.context();
    if let Some(cached) = ctx.cached_constant(symbol.id()) {
        return cached;
    }
    let raw = ctx.bindings().variable_binding(symbol.binding()?)?;
    if let Some(value) = &raw.constant_value {
        return Some(value.clone());
    }
    if !symbol.is_final() || !visiting.insert(symbol.id()) {
        return None;
    }

    let value = initializer(symbol).and_then(|init| fold(ctx, init, visiting)).and_then(|value| {
        let ty = symbol.ty();
        if ty.is_primitive() || ty.is("java.lang.String") {
            cast(value, &ty.fully_qualified_name())
        } else {
            None
        }
    });
    visiting.remove(&symbol.id());
    ctx.store_constant(symbol.id(), value.clone());
    value
}

/// The expression after `=` in a variable's declaration.
fn initializer(symbol: Symbol<'_>) -> Option<Node<'_>> {
    let declaration = symbol.declaration()?;
    let mut children = declaration.child_nodes();
    children.find(|c| c.token().is_some_and(|t| t.text() == "="))?;
    children.find(|c| !c.is_leaf())
}

// ============================================================================
// LITERALS
// ============================================================================

fn literal(kind: TreeKind, text: &str) -> Option<Constant> {
    match kind {
        TreeKind::INT_LITERAL => integral(text).map(|v| Constant::Int(v as i32)),
        TreeKind::LONG_LITERAL => {
            integral(text.trim_end_matches(['l', 'L'])).map(|v| Constant::Long(v as i64))
        }
        TreeKind::FLOAT_LITERAL => text
            .trim_end_matches(['f', 'F'])
            .replace('_', "")
            .parse()
            .ok()
            .map(Constant::Float),
        TreeKind::DOUBLE_LITERAL => text
            .trim_end_matches(['d', 'D'])
            .replace('_', "")
            .parse()
            .ok()
            .map(Constant::Double),
        TreeKind::BOOLEAN_LITERAL => match text {
            "true" => Some(Constant::Bool(true)),
            "false" => Some(Constant::Bool(false)),
            _ => None,
        },
        TreeKind::CHAR_LITERAL => {
            let inner = text.strip_prefix('\'')?.strip_suffix('\'')?;
            let unescaped = unescape(inner)?;
            let mut chars = unescaped.chars();
            let c = chars.next()?;
            chars.next().is_none().then_some(Constant::Char(c))
        }
        TreeKind::STRING_LITERAL => {
            let inner = text.strip_prefix('"')?.strip_suffix('"')?;
            unescape(inner).map(|s| Constant::String(SmolStr::new(s)))
        }
        TreeKind::TEXT_BLOCK => text_block(text).map(|s| Constant::String(SmolStr::new(s))),
        _ => None,
    }
}

/// Integral literal bits. Values beyond the signed range wrap, matching
/// `0xFFFFFFFF == -1`.
fn integral(text: &str) -> Option<u64> {
    let digits = text.replace('_', "");
    let (radix, digits) = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        (16, hex.to_string())
    } else if let Some(bin) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        (2, bin.to_string())
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, digits[1..].to_string())
    } else {
        (10, digits)
    };
    u64::from_str_radix(&digits, radix).ok()
}

fn unescape(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'b' => out.push('\u{8}'),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'f' => out.push('\u{c}'),
            'r' => out.push('\r'),
            's' => out.push(' '),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            // Line continuation in text blocks.
            '\n' => {}
            'u' => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16).ok()?;
                out.push(char::from_u32(code)?);
            }
            digit @ '0'..='7' => {
                let mut code = digit.to_digit(8)?;
                let max_digits = if digit <= '3' { 2 } else { 1 };
                for _ in 0..max_digits {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(next) => {
                            code = code * 8 + next;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code)?);
            }
            _ => return None,
        }
    }
    Some(out)
}

/// Content of a text block with incidental indentation and trailing
/// spaces stripped, then escapes processed.
fn text_block(text: &str) -> Option<String> {
    let inner = text.strip_prefix("\"\"\"")?.strip_suffix("\"\"\"")?;
    let (_, content) = inner.split_once('\n')?;
    let lines: Vec<&str> = content.split('\n').map(|l| l.trim_end_matches('\r')).collect();
    let last_is_closing = lines.last().is_some_and(|l| l.trim().is_empty());

    let indent = lines
        .iter()
        .enumerate()
        .filter(|&(i, line)| !line.trim().is_empty() || (last_is_closing && i == lines.len() - 1))
        .map(|(_, line)| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        let is_last = i == lines.len() - 1;
        if is_last && last_is_closing {
            break;
        }
        let stripped = line.get(indent..).unwrap_or("").trim_end_matches([' ', '\t']);
        out.push_str(stripped);
        if !is_last {
            out.push('\n');
        }
    }
    unescape(&out)
}

// ============================================================================
// OPERATORS
// ============================================================================

fn unary(kind: TreeKind, value: Constant) -> Option<Constant> {
    match (kind, promote(value)) {
        (TreeKind::UNARY_PLUS, v) if v.is_numeric() => Some(v),
        (TreeKind::UNARY_MINUS, Constant::Int(v)) => Some(Constant::Int(v.wrapping_neg())),
        (TreeKind::UNARY_MINUS, Constant::Long(v)) => Some(Constant::Long(v.wrapping_neg())),
        (TreeKind::UNARY_MINUS, Constant::Float(v)) => Some(Constant::Float(-v)),
        (TreeKind::UNARY_MINUS, Constant::Double(v)) => Some(Constant::Double(-v)),
        (TreeKind::BITWISE_COMPLEMENT, Constant::Int(v)) => Some(Constant::Int(!v)),
        (TreeKind::BITWISE_COMPLEMENT, Constant::Long(v)) => Some(Constant::Long(!v)),
        (TreeKind::LOGICAL_COMPLEMENT, Constant::Bool(v)) => Some(Constant::Bool(!v)),
        _ => None,
    }
}

/// Unary numeric promotion: `char` becomes `int`.
fn promote(value: Constant) -> Constant {
    match value {
        Constant::Char(c) => Constant::Int(c as i32),
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Int,
    Long,
    Float,
    Double,
}

fn rank(value: &Constant) -> Option<Rank> {
    match value {
        Constant::Int(_) | Constant::Char(_) => Some(Rank::Int),
        Constant::Long(_) => Some(Rank::Long),
        Constant::Float(_) => Some(Rank::Float),
        Constant::Double(_) => Some(Rank::Double),
        Constant::Bool(_) | Constant::String(_) => None,
    }
}

fn widen(value: &Constant, rank: Rank) -> Option<Constant> {
    Some(match rank {
        Rank::Int => Constant::Int(value.as_int()?),
        Rank::Long => Constant::Long(value.as_long()?),
        Rank::Float => Constant::Float(match value {
            Constant::Float(v) => *v,
            other => other.as_long()? as f32,
        }),
        Rank::Double => Constant::Double(value.as_double()?),
    })
}

/// Binary numeric promotion of two operands; non-numeric pairs pass
/// through unchanged.
fn promote_pair(left: Constant, right: Constant) -> (Constant, Constant) {
    match (rank(&left), rank(&right)) {
        (Some(a), Some(b)) => {
            let target = a.max(b);
            match (widen(&left, target), widen(&right, target)) {
                (Some(l), Some(r)) => (l, r),
                _ => (left, right),
            }
        }
        _ => (left, right),
    }
}

fn binary(kind: TreeKind, left: Constant, right: Constant) -> Option<Constant> {
    if kind == TreeKind::PLUS && (matches!(left, Constant::String(_)) || matches!(right, Constant::String(_))) {
        return Some(Constant::String(SmolStr::new(format!("{left}{right}"))));
    }
    if let (Constant::Bool(a), Constant::Bool(b)) = (&left, &right) {
        let (a, b) = (*a, *b);
        return match kind {
            TreeKind::AND | TreeKind::CONDITIONAL_AND => Some(Constant::Bool(a && b)),
            TreeKind::OR | TreeKind::CONDITIONAL_OR => Some(Constant::Bool(a || b)),
            TreeKind::XOR | TreeKind::NOT_EQUAL_TO => Some(Constant::Bool(a != b)),
            TreeKind::EQUAL_TO => Some(Constant::Bool(a == b)),
            _ => None,
        };
    }
    if matches!(
        kind,
        TreeKind::LEFT_SHIFT | TreeKind::RIGHT_SHIFT | TreeKind::UNSIGNED_RIGHT_SHIFT
    ) {
        return shift(kind, promote(left), right.as_long()?);
    }

    let (left, right) = promote_pair(left, right);
    match (left, right) {
        (Constant::Int(a), Constant::Int(b)) => int_op(kind, a, b),
        (Constant::Long(a), Constant::Long(b)) => long_op(kind, a, b),
        (Constant::Float(a), Constant::Float(b)) => {
            float_op(kind, f64::from(a), f64::from(b)).map(|c| match c {
                Constant::Double(v) => Constant::Float(v as f32),
                other => other,
            })
        }
        (Constant::Double(a), Constant::Double(b)) => float_op(kind, a, b),
        _ => None,
    }
}

fn shift(kind: TreeKind, value: Constant, distance: i64) -> Option<Constant> {
    match value {
        Constant::Int(v) => {
            let d = (distance & 0x1f) as u32;
            Some(Constant::Int(match kind {
                TreeKind::LEFT_SHIFT => v.wrapping_shl(d),
                TreeKind::RIGHT_SHIFT => v.wrapping_shr(d),
                _ => ((v as u32) >> d) as i32,
            }))
        }
        Constant::Long(v) => {
            let d = (distance & 0x3f) as u32;
            Some(Constant::Long(match kind {
                TreeKind::LEFT_SHIFT => v.wrapping_shl(d),
                TreeKind::RIGHT_SHIFT => v.wrapping_shr(d),
                _ => ((v as u64) >> d) as i64,
            }))
        }
        _ => None,
    }
}

macro_rules! integral_op {
    ($name:ident, $ty:ty, $variant:ident) => {
        fn $name(kind: TreeKind, a: $ty, b: $ty) -> Option<Constant> {
            Some(match kind {
                TreeKind::PLUS => Constant::$variant(a.wrapping_add(b)),
                TreeKind::MINUS => Constant::$variant(a.wrapping_sub(b)),
                TreeKind::MULTIPLY => Constant::$variant(a.wrapping_mul(b)),
                TreeKind::DIVIDE if b != 0 => Constant::$variant(a.wrapping_div(b)),
                TreeKind::REMAINDER if b != 0 => Constant::$variant(a.wrapping_rem(b)),
                TreeKind::AND => Constant::$variant(a & b),
                TreeKind::OR => Constant::$variant(a | b),
                TreeKind::XOR => Constant::$variant(a ^ b),
                TreeKind::LESS_THAN => Constant::Bool(a < b),
                TreeKind::GREATER_THAN => Constant::Bool(a > b),
                TreeKind::LESS_THAN_OR_EQUAL_TO => Constant::Bool(a <= b),
                TreeKind::GREATER_THAN_OR_EQUAL_TO => Constant::Bool(a >= b),
                TreeKind::EQUAL_TO => Constant::Bool(a == b),
                TreeKind::NOT_EQUAL_TO => Constant::Bool(a != b),
                _ => return None,
            })
        }
    };
}

integral_op!(int_op, i32, Int);
integral_op!(long_op, i64, Long);

fn float_op(kind: TreeKind, a: f64, b: f64) -> Option<Constant> {
    Some(match kind {
        TreeKind::PLUS => Constant::Double(a + b),
        TreeKind::MINUS => Constant::Double(a - b),
        TreeKind::MULTIPLY => Constant::Double(a * b),
        TreeKind::DIVIDE => Constant::Double(a / b),
        TreeKind::REMAINDER => Constant::Double(a % b),
        TreeKind::LESS_THAN => Constant::Bool(a < b),
        TreeKind::GREATER_THAN => Constant::Bool(a > b),
        TreeKind::LESS_THAN_OR_EQUAL_TO => Constant::Bool(a <= b),
        TreeKind::GREATER_THAN_OR_EQUAL_TO => Constant::Bool(a >= b),
        TreeKind::EQUAL_TO => Constant::Bool(a == b),
        TreeKind::NOT_EQUAL_TO => Constant::Bool(a != b),
        _ => return None,
    })
}

/// Casting conversion to a primitive or `java.lang.String`.
fn cast(value: Constant, target: &str) -> Option<Constant> {
    if target == "java.lang.String" {
        return matches!(value, Constant::String(_)).then_some(value);
    }
    if target == "boolean" {
        return matches!(value, Constant::Bool(_)).then_some(value);
    }
    // Narrowing goes through `int` first, as in the language.
    let as_int = |value: &Constant| -> Option<i32> {
        match value {
            Constant::Float(v) => Some(*v as i32),
            Constant::Double(v) => Some(*v as i32),
            Constant::Long(v) => Some(*v as i32),
            other => other.as_int(),
        }
    };
    match target {
        "int" => as_int(&value).map(Constant::Int),
        "short" => as_int(&value).map(|v| Constant::Int(i32::from(v as i16))),
        "byte" => as_int(&value).map(|v| Constant::Int(i32::from(v as i8))),
        "char" => as_int(&value)
            .and_then(|v| char::from_u32(u32::from(v as u16)))
            .map(Constant::Char),
        "long" => match value {
            Constant::Float(v) => Some(Constant::Long(v as i64)),
            Constant::Double(v) => Some(Constant::Long(v as i64)),
            other => other.as_long().map(Constant::Long),
        },
        "float" => match value {
            Constant::Float(_) => Some(value),
            Constant::Double(v) => Some(Constant::Float(v as f32)),
            other => other.as_long().map(|v| Constant::Float(v as f32)),
        },
        "double" => value.as_double().map(Constant::Double),
        _ => None,
    }
}
