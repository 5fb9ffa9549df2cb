use num_bigint::BigInt;
use std::fmt;

#[derive(Clone, PartialEq)]
pub enum CalcError {
    StrToFloat(String),
    StrToInt(String),
    IntToFloat(BigInt),
    FloatToInt(f64),
    DividedByZero(String),

    DomainError(String, String),
    OnlyInt(String),
    NotForNegativeInt(String),
    FactorialDomain,

    EmptyValue,
    InvalidOp(String),
    TooManyOps,
    ClosingBracketMismatch,
    FunctionUnfinished(String),
    FunctionNoArgs(String),
    FunctionNotEnoughArgs(String, usize),
    EmptyExpression,
    InsufficientOps,
    UnknownName(String),

    ParseFailed(String),

    Unreachable,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            CalcError::StrToFloat(s) => write!(f, "Failed to convert '{}' to float", s),
            CalcError::StrToInt(s) => write!(f, "Failed to convert '{}' to integer", s),
            CalcError::IntToFloat(i) => write!(f, "Failed to convert integer {} to float", i),
            CalcError::FloatToInt(r) => write!(f, "Failed to convert float {} to integer", r),
            CalcError::DividedByZero(s) => write!(f, "'{}' divided by zero", s),

            CalcError::DomainError(func, val) => write!(f, "Math domain error: {}({})", func, val),
            CalcError::OnlyInt(s) => write!(f, "{} supports only integers", s),
            CalcError::NotForNegativeInt(s) => {
                write!(f, "Function '{}' is not supported for negative integers", s)
            }
            CalcError::FactorialDomain => write!(f, "An integer is required for factorial"),

            CalcError::EmptyValue => write!(f, "Nor value neither operator found"),
            CalcError::InvalidOp(s) => write!(f, "Invalid operator '{}'", s),
            CalcError::TooManyOps => write!(f, "Too many operators"),
            CalcError::ClosingBracketMismatch => write!(f, "Mismatched closing bracket"),
            CalcError::FunctionUnfinished(s) => write!(f, "Closing bracket for function '{}' not found", s),
            CalcError::FunctionNoArgs(s) => write!(f, "Function '{}' requires an argument", s),
            CalcError::FunctionNotEnoughArgs(s, i) => {
                write!(f, "Function '{}' requires at least {} arguments", s, i)
            }
            CalcError::EmptyExpression => write!(f, "Nothing to calculate"),
            CalcError::InsufficientOps => write!(f, "Too many numbers"),
            CalcError::UnknownName(s) => write!(f, "Name '{}' is not allowed", s),

            CalcError::ParseFailed(s) => write!(f, "Failed to parse expression: {}", s),

            CalcError::Unreachable => write!(f, "unreachable"),
        }
    }
}

impl fmt::Debug for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
