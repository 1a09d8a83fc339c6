use crate::{
    ast::{BinaryOperator, ComparisonOperator},
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
};

/// Applies an arithmetic operator to two integers.
///
/// Division truncates toward zero. Every operation is checked.
///
/// # Errors
/// - `DivisionByZero` if `op` is `/` and `right` is `0`.
/// - `Overflow` if the result does not fit in an `i64`.
///
/// # Example
/// ```
/// use declang::{ast::BinaryOperator, interpreter::evaluator::binary::arithmetic};
///
/// assert_eq!(arithmetic(BinaryOperator::Div, -7, 2).unwrap(), -3);
/// assert!(arithmetic(BinaryOperator::Add, i64::MAX, 1).is_err());
/// ```
pub fn arithmetic(op: BinaryOperator, left: i64, right: i64) -> EvalResult<i64> {
    use BinaryOperator::{Add, Div, Mul, Sub};

    let result = match op {
        Add => left.checked_add(right),
        Sub => left.checked_sub(right),
        Mul => left.checked_mul(right),
        Div => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            left.checked_div(right)
        },
    };

    result.ok_or_else(|| RuntimeError::Overflow { operator: op.to_string() })
}

/// Applies a comparison, yielding `1` for true and `0` for false.
#[must_use]
pub fn compare(op: ComparisonOperator, left: i64, right: i64) -> i64 {
    use ComparisonOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

    let holds = match op {
        Equal => left == right,
        NotEqual => left != right,
        Less => left < right,
        LessEqual => left <= right,
        Greater => left > right,
        GreaterEqual => left >= right,
    };
    i64::from(holds)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(BinaryOperator::Add, 2, 3, 5)]
    #[case(BinaryOperator::Sub, 2, 3, -1)]
    #[case(BinaryOperator::Mul, -4, 3, -12)]
    #[case(BinaryOperator::Div, 7, 2, 3)]
    #[case(BinaryOperator::Div, -7, 2, -3)]
    #[case(BinaryOperator::Div, 7, -2, -3)]
    fn arithmetic_on_integers(#[case] op: BinaryOperator,
                              #[case] left: i64,
                              #[case] right: i64,
                              #[case] expected: i64) {
        assert_eq!(arithmetic(op, left, right).unwrap(), expected);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert!(matches!(arithmetic(BinaryOperator::Div, 1, 0), Err(RuntimeError::DivisionByZero)));
    }

    #[rstest]
    #[case(BinaryOperator::Add, i64::MAX, 1)]
    #[case(BinaryOperator::Sub, i64::MIN, 1)]
    #[case(BinaryOperator::Mul, i64::MAX, 2)]
    #[case(BinaryOperator::Div, i64::MIN, -1)]
    fn overflow_is_an_error(#[case] op: BinaryOperator, #[case] left: i64, #[case] right: i64) {
        assert!(matches!(arithmetic(op, left, right), Err(RuntimeError::Overflow { .. })));
    }

    #[rstest]
    #[case(ComparisonOperator::Less, 1, 2, 1)]
    #[case(ComparisonOperator::GreaterEqual, 2, 2, 1)]
    #[case(ComparisonOperator::Equal, 1, 2, 0)]
    #[case(ComparisonOperator::NotEqual, 1, 2, 1)]
    #[case(ComparisonOperator::LessEqual, 3, 2, 0)]
    #[case(ComparisonOperator::Greater, 3, 2, 1)]
    fn comparisons_yield_truth_values(#[case] op: ComparisonOperator,
                                      #[case] left: i64,
                                      #[case] right: i64,
                                      #[case] expected: i64) {
        assert_eq!(compare(op, left, right), expected);
    }
}
