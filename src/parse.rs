use pest::Parser;
use std::f64::consts::{E, PI};

use crate::errors::*;
use crate::stack::{Stack, UNARY_MINUS};
use crate::value::*;

#[derive(Parser)]
#[grammar = "calc.pest"]
pub struct CalcParser;

/// Returns a constant value by its name. Name is caseinsensitive
pub fn constant(name: &str) -> Option<Value> {
    let a = name.to_lowercase();
    match a.as_str() {
        "e" => Some(Value::Float(E)),
        "pi" => Some(Value::Float(PI)),
        _ => None,
    }
}

macro_rules! process_value {
    ($stack:ident, $last_value:ident, $last_func:ident, $v:expr) => {
        if $last_func {
            $stack.push("(", None)?;
        } else if $last_value {
            $stack.push("*", None)?;
        }
        $stack.push("", Some($v))?;
        if $last_func {
            $stack.push(")", None)?;
        }
        $last_value = true;
        $last_func = false;
    };
}

/// Evaluates a given expression and returns either result or error.
///
/// The only identifiers that resolve are the whitelisted function names and
/// the constants `pi` and `e`. Everything else fails with an error, nothing
/// outside the whitelist is ever looked up or executed
pub fn eval(expr: &str) -> CalcResult {
    let pairs = match CalcParser::parse(Rule::expr, expr) {
        Ok(p) => p,
        Err(..) => return Err(CalcError::ParseFailed("invalid expression".to_string())),
    };

    let mut is_last_value = false;
    let mut is_last_func = false;

    let mut stk = Stack::new();
    for pair in pairs {
        let rule = pair.as_rule();
        let val = pair.as_span().as_str().to_lowercase();
        match rule {
            Rule::int => {
                process_value!(stk, is_last_value, is_last_func, Value::from_str_integer(&val)?);
            }
            Rule::float => {
                process_value!(stk, is_last_value, is_last_func, Value::from_str_float(&val)?);
            }
            Rule::open_b => {
                if is_last_value {
                    stk.push("*", None)?;
                }
                stk.push("(", None)?;
                is_last_value = false;
                is_last_func = false;
            }
            Rule::close_b => {
                stk.push(")", None)?;
                is_last_value = true;
                is_last_func = false;
            }
            Rule::arg_sep => {
                stk.push(";", None)?;
                is_last_value = false;
                is_last_func = false;
            }
            Rule::operator => {
                if val == "+" && !is_last_value {
                    // unary plus changes nothing
                    is_last_value = false;
                    is_last_func = false;
                } else if val == "-" && (!is_last_value || is_last_func) {
                    if is_last_func {
                        stk.push("(", None)?;
                        stk.push(")", None)?;
                        stk.push("-", None)?;
                    } else {
                        stk.push(UNARY_MINUS, None)?;
                    }
                    is_last_value = false;
                    is_last_func = false;
                } else {
                    stk.push(&val, None)?;
                    is_last_value = false;
                    is_last_func = false;
                }
            }
            Rule::ident => {
                if stk.is_func(&val) {
                    if is_last_value {
                        stk.push("*", None)?;
                    } else if is_last_func {
                        stk.increase_func_argc()?;
                    }
                    stk.push(&val, None)?;
                    is_last_value = false;
                    is_last_func = true;
                } else if let Some(v) = constant(&val) {
                    process_value!(stk, is_last_value, is_last_func, v);
                } else {
                    return Err(CalcError::UnknownName(val.to_string()));
                }
            }
            Rule::EOI => {}
            _ => return Err(CalcError::Unreachable),
        }
    }
    stk.calculate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn test_expr() {
        let v = eval("2+3");
        assert_eq!(v, Ok(Value::Int(BigInt::from(5))));
        let v = eval("(3+2)*(4-9)");
        assert_eq!(v, Ok(Value::Int(BigInt::from(-25))));
        let v = eval("(3+2)(4-9)");
        assert_eq!(v, Ok(Value::Int(BigInt::from(-25))));
        let v = eval("2**10");
        assert_eq!(v, Ok(Value::Int(BigInt::from(1024))));
        let v = eval("200*0.1");
        assert_eq!(v, Ok(Value::Float(20.0)));
        let v = eval("sqrt(16)");
        assert_eq!(v, Ok(Value::Float(4.0)));
        let v = eval("pow(2,10)");
        assert_eq!(v, Ok(Value::Int(BigInt::from(1024))));
    }

    #[test]
    fn test_unary() {
        let v = eval("-5+3");
        assert_eq!(v, Ok(Value::Int(BigInt::from(-2))));
        let v = eval("2**-1");
        assert_eq!(v, Ok(Value::Float(0.5)));
        let v = eval("+7");
        assert_eq!(v, Ok(Value::Int(BigInt::from(7))));
    }

    #[test]
    fn test_constants() {
        let v = eval("pi");
        assert_eq!(v, Ok(Value::Float(std::f64::consts::PI)));
        let v = eval("2*pi");
        assert_eq!(v, Ok(Value::Float(2.0 * std::f64::consts::PI)));
        let v = eval("sin(pi/2)");
        assert_eq!(v, Ok(Value::Float(1.0)));
    }

    #[test]
    fn test_unknown_names() {
        let v = eval("ans+1");
        assert_eq!(v, Err(CalcError::UnknownName("ans".to_string())));
        let v = eval("foo(3)");
        assert_eq!(v, Err(CalcError::UnknownName("foo".to_string())));
    }

    #[test]
    fn test_rejected_text() {
        // nothing outside the expression grammar parses at all
        let v = eval("__import__('os')");
        assert_eq!(v, Err(CalcError::ParseFailed("invalid expression".to_string())));
        let v = eval("a.b");
        assert_eq!(v, Err(CalcError::ParseFailed("invalid expression".to_string())));
        let v = eval("x = 1");
        assert_eq!(v, Err(CalcError::ParseFailed("invalid expression".to_string())));
        let v = eval("1 % 2");
        assert_eq!(v, Err(CalcError::ParseFailed("invalid expression".to_string())));
    }

    #[test]
    fn test_errors() {
        let v = eval("");
        assert_eq!(v, Err(CalcError::EmptyExpression));
        let v = eval("1/0");
        assert_eq!(v, Err(CalcError::DividedByZero("1".to_string())));
        let v = eval("sqrt(0-2)");
        assert!(v.is_err());
    }
}
