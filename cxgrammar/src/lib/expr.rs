//! Types for constant-expression matching.
//!
//! Evaluation itself lives outside this crate; these are the shapes an
//! evaluating analyzer exchanges with the grammar layer. A literal's type is
//! expressed with the same sign/size/type dimensions the
//! [`DeclSpecifier`](crate::actions::DeclSpecifier) aggregation produces, so
//! a parsed specifier sequence converts directly.

use std::rc::Rc;

use crate::actions::{DeclSpecifier, Sign, Size, Type};
use crate::forest::SppfNode;

/// The arithmetic type of an expression or literal.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ExprType {
    pub sign: Sign,
    pub size: Size,
    pub type_spec: Type,
}

impl ExprType {
    pub fn new(sign: Sign, size: Size, type_spec: Type) -> ExprType {
        ExprType {
            sign,
            size,
            type_spec,
        }
    }

    pub fn from_decl_specifier(spec: &DeclSpecifier) -> ExprType {
        ExprType {
            sign: spec.sign_spec,
            size: spec.size_spec,
            // a bare "unsigned"/"long" etc. implies int
            type_spec: if spec.type_spec == Type::NoType
                && (spec.sign_spec != Sign::NoSign || spec.size_spec != Size::NoSize)
            {
                Type::Int
            } else {
                spec.type_spec
            },
        }
    }

    pub fn is_set(&self) -> bool {
        self.type_spec != Type::NoType
    }

    pub fn is_unsigned(&self) -> bool {
        self.sign == Sign::Unsigned
    }

    pub fn is_signed(&self) -> bool {
        self.is_non_ptr_arithmetic_type() && self.sign != Sign::Unsigned
    }

    /// Integer, character or floating type (no pointers at this level).
    pub fn is_non_ptr_arithmetic_type(&self) -> bool {
        matches!(
            self.type_spec,
            Type::Bool
                | Type::Char
                | Type::Char16T
                | Type::Char32T
                | Type::WcharT
                | Type::Int
                | Type::Float
                | Type::Double
        )
    }

    /// The C integer conversion rank, usable for usual-arithmetic-conversion
    /// decisions; 0 for non-integral types.
    pub fn int_conv_rank(&self) -> u8 {
        match self.type_spec {
            Type::Bool => 1,
            Type::Char => 2,
            Type::Char16T | Type::Char32T | Type::WcharT => 3,
            Type::Int => match self.size {
                Size::Short => 3,
                Size::NoSize => 4,
                Size::Long => 5,
                Size::LongLong => 6,
            },
            _ => 0,
        }
    }
}

/// An evaluated literal value.
///
/// String literals carry no evaluated value and always take the `None` arm;
/// consumers that need string contents must read the token spelling instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LiteralValue {
    None,
    Int(i64),
    UInt(u64),
    Float(f64),
}

/// A literal together with its arithmetic type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Literal {
    pub expr_type: ExprType,
    pub value: LiteralValue,
}

/// The interface an evaluating analyzer implements to compare parsed
/// constant expressions.
pub trait ConstExprMatcher {
    /// Evaluate a `literal` node, or `None` if it is not evaluable.
    fn literal(&mut self, node: &Rc<SppfNode>) -> Option<Literal>;

    /// Are `a` and `b` equivalent constant expressions when both are
    /// converted to `target`?
    fn match_const_expr(
        &mut self,
        a: &Rc<SppfNode>,
        b: &Rc<SppfNode>,
        target: ExprType,
    ) -> bool;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decl_specifier_conversion_implies_int() {
        let mut spec = DeclSpecifier::default();
        spec.sign_spec = Sign::Unsigned;
        spec.size_spec = Size::Long;
        let ty = ExprType::from_decl_specifier(&spec);
        assert_eq!(ty.type_spec, Type::Int);
        assert!(ty.is_unsigned());
        assert!(!ty.is_signed());
        assert!(ty.is_set());

        let empty = ExprType::from_decl_specifier(&DeclSpecifier::default());
        assert!(!empty.is_set());
    }

    #[test]
    fn conversion_ranks_order_the_int_sizes() {
        let rank = |size| ExprType::new(Sign::NoSign, size, Type::Int).int_conv_rank();
        assert!(rank(Size::Short) < rank(Size::NoSize));
        assert!(rank(Size::NoSize) < rank(Size::Long));
        assert!(rank(Size::Long) < rank(Size::LongLong));
        assert_eq!(
            ExprType::new(Sign::NoSign, Size::NoSize, Type::Float).int_conv_rank(),
            0
        );
    }

    #[test]
    fn arithmetic_classification() {
        assert!(ExprType::new(Sign::NoSign, Size::NoSize, Type::Double)
            .is_non_ptr_arithmetic_type());
        assert!(!ExprType::new(Sign::NoSign, Size::NoSize, Type::Void)
            .is_non_ptr_arithmetic_type());
        assert!(ExprType::new(Sign::Signed, Size::NoSize, Type::Char).is_signed());
    }
}
