//! Binary integer expression evaluator

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    DivideByZero,
    UnknownOperator,
}

/// Evaluate `a <op> b` for the four arithmetic operators.
///
/// Division truncates toward zero. Overflow wraps.
pub fn eval(a: i32, op: &str, b: i32) -> Result<i32, CalcError> {
    match op {
        "+" => Ok(a.wrapping_add(b)),
        "-" => Ok(a.wrapping_sub(b)),
        "*" => Ok(a.wrapping_mul(b)),
        "/" => {
            if b == 0 {
                Err(CalcError::DivideByZero)
            } else {
                Ok(a.wrapping_div(b))
            }
        }
        _ => Err(CalcError::UnknownOperator),
    }
}
