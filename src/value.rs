use dtoa;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, One, ToPrimitive, Zero};
use std::fmt;
use std::str;

use crate::errors::*;

/// Expression calculation result: either value or error
pub type CalcResult = Result<Value, CalcError>;
pub(crate) type CalcErrorResult = Result<(), CalcError>;

/// A float closer than this to a whole number is presented as an integer
pub const INT_EPS: f64 = 1e-12;

/// Supported value types
#[derive(Clone, PartialEq)]
pub enum Value {
    /// Big integer number
    Int(BigInt),
    /// Float number
    Float(f64),
}

const F64_BUF_LEN: usize = 48;
pub(crate) fn format_f64(g: f64) -> String {
    let mut buf = [b'\0'; F64_BUF_LEN];
    match dtoa::write(&mut buf[..], g) {
        Ok(len) => match str::from_utf8(&buf[..len]) {
            Ok(s) => s.to_string(),
            Err(..) => format!("{}", g),
        },
        Err(..) => format!("{}", g),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            Value::Int(ref i) => write!(f, "{}", i),
            Value::Float(ref g) => write!(f, "{}", format_f64(*g)),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            Value::Int(ref i) => write!(f, "Int({})", i),
            Value::Float(ref g) => write!(f, "Float({})", format_f64(*g)),
        }
    }
}

impl Default for Value {
    fn default() -> Value {
        Value::Int(BigInt::zero())
    }
}

fn int_to_f64(i: &BigInt) -> Result<f64, CalcError> {
    if let Some(f) = i.to_f64() {
        Ok(f)
    } else {
        Err(CalcError::IntToFloat(i.clone()))
    }
}

fn f64_to_int(f: f64) -> Result<BigInt, CalcError> {
    if let Some(i) = BigInt::from_f64(f) {
        Ok(i)
    } else {
        Err(CalcError::FloatToInt(f))
    }
}

// integer exponents above this limit are calculated as floats
const MAX_INT_POW: usize = 1_000_000;

macro_rules! basic_op {
    ($id:ident, $op:tt) => {
        pub fn $id(self, rhs: Value) -> CalcResult {
            match (&self, &rhs) {
                (Value::Int(i1), Value::Int(i2)) => Ok(Value::Int(i1 $op i2)),
                _ => {
                    let f1 = self.into_raw_f64()?;
                    let f2 = rhs.into_raw_f64()?;
                    Ok(Value::Float(f1 $op f2))
                }
            }
        }
    };
}

macro_rules! float_func {
    ($id:ident) => {
        pub fn $id(self) -> CalcResult {
            let f = self.into_raw_f64()?;
            let r = f.$id();
            if r.is_nan() || r.is_infinite() {
                return Err(CalcError::DomainError(stringify!($id).to_string(), format_f64(f)));
            }
            Ok(Value::Float(r))
        }
    };
}

impl Value {
    pub fn new() -> Self {
        Default::default()
    }

    /// Convert &str to big integer number (decimal digits only)
    pub fn from_str_integer(s: &str) -> CalcResult {
        match s.parse::<BigInt>() {
            Ok(i) => Ok(Value::Int(i)),
            Err(..) => Err(CalcError::StrToInt(s.to_owned())),
        }
    }

    /// Convert &str to float number, e.g. `1.023` or `1.02e-5`
    pub fn from_str_float(s: &str) -> CalcResult {
        match s.parse::<f64>() {
            Ok(f) => Ok(Value::Float(f)),
            Err(..) => Err(CalcError::StrToFloat(s.to_owned())),
        }
    }

    pub(crate) fn into_raw_f64(self) -> Result<f64, CalcError> {
        match self {
            Value::Int(i) => int_to_f64(&i),
            Value::Float(f) => Ok(f),
        }
    }

    pub fn is_zero(&self) -> bool {
        match &self {
            Value::Int(i) => i.is_zero(),
            Value::Float(f) => *f == 0.0,
        }
    }

    /// A float within `INT_EPS` of a whole number collapses to a big integer.
    /// Everything else is returned unchanged
    pub fn normalized(self) -> Value {
        match self {
            Value::Float(f) => {
                if (f - f.round()).abs() < INT_EPS {
                    if let Ok(i) = f64_to_int(f.round()) {
                        return Value::Int(i);
                    }
                }
                Value::Float(f)
            }
            v => v,
        }
    }

    basic_op!(addition, +);
    basic_op!(subtract, -);
    basic_op!(multiply, *);

    /// Divides two numbers. Integer division that leaves no remainder
    /// stays an integer, everything else is a float
    pub fn divide(self, rhs: Value) -> CalcResult {
        if rhs.is_zero() {
            return Err(CalcError::DividedByZero(format!("{}", self)));
        }
        match (&self, &rhs) {
            (Value::Int(i1), Value::Int(i2)) => {
                if (i1 % i2).is_zero() {
                    Ok(Value::Int(i1 / i2))
                } else {
                    let f1 = int_to_f64(i1)?;
                    let f2 = int_to_f64(i2)?;
                    Ok(Value::Float(f1 / f2))
                }
            }
            _ => {
                let f1 = self.into_raw_f64()?;
                let f2 = rhs.into_raw_f64()?;
                Ok(Value::Float(f1 / f2))
            }
        }
    }

    pub fn negate(self) -> CalcResult {
        match self {
            Value::Int(i) => Ok(Value::Int(-i)),
            Value::Float(f) => Ok(Value::Float(-f)),
        }
    }

    /// Raises a number into arbitrary power. Non-negative integer degrees
    /// of integers are calculated exactly, the rest through `powf`
    pub fn power(self, rhs: Value) -> CalcResult {
        if let (Value::Int(b), Value::Int(e)) = (&self, &rhs) {
            if *e >= BigInt::zero() {
                if let Some(exp) = e.to_usize() {
                    if exp <= MAX_INT_POW {
                        return Ok(Value::Int(num_traits::pow(b.clone(), exp)));
                    }
                }
            }
        }
        let f1 = self.into_raw_f64()?;
        let f2 = rhs.into_raw_f64()?;
        let r = f1.powf(f2);
        if r.is_nan() || r.is_infinite() {
            return Err(CalcError::DomainError("pow".to_string(), format_f64(f1)));
        }
        Ok(Value::Float(r))
    }

    /// Returns factorial of a non-negative integer number
    pub fn factorial(self) -> CalcResult {
        match self {
            Value::Int(i) => {
                if i < BigInt::zero() {
                    return Err(CalcError::NotForNegativeInt("factorial".to_owned()));
                }
                let mut res = BigInt::one();
                let mut cnt = BigInt::one();
                while cnt <= i {
                    res *= cnt.clone();
                    cnt += BigInt::one();
                }
                Ok(Value::Int(res))
            }
            Value::Float(..) => Err(CalcError::OnlyInt("factorial".to_string())),
        }
    }

    float_func!(sin);
    float_func!(cos);
    float_func!(tan);
    float_func!(asin);
    float_func!(acos);
    float_func!(atan);
    float_func!(sinh);
    float_func!(cosh);
    float_func!(tanh);
    float_func!(sqrt);
    float_func!(ln);
    float_func!(log10);

    pub fn degrees(self) -> CalcResult {
        let f = self.into_raw_f64()?;
        Ok(Value::Float(f.to_degrees()))
    }

    pub fn radians(self) -> CalcResult {
        let f = self.into_raw_f64()?;
        Ok(Value::Float(f.to_radians()))
    }
}
