use crate::errors::*;
use crate::value::{format_f64, Value};

/// A pressed calculator button.
///
/// Labels that are not special actions (digits, `.`, `+`, `-`, `*`, `/`,
/// brackets) become `Literal` and are appended to the buffer as-is
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// `C` - reset the buffer to an empty string
    Clear,
    /// `BACK` - drop the last character
    Backspace,
    /// `ANS` - append the previous result, no-op when there is none
    Ans,
    Pi,
    /// `sqrt` - appends `sqrt(`
    Sqrt,
    /// `^` - appends the power operator `**`
    Power,
    /// `%` - divides the trailing number by 100, or appends `/100`
    Percent,
    /// `!` - replaces the trailing integer with its factorial
    Factorial,
    Sin,
    Cos,
    Tan,
    /// `ln` - appends `ln(` (natural logarithm)
    Ln,
    /// `log` - appends `log10(`
    Log,
    Literal(String),
}

impl Token {
    /// Maps a button label to a token
    pub fn from_label(label: &str) -> Token {
        match label {
            "C" => Token::Clear,
            "BACK" => Token::Backspace,
            "ANS" => Token::Ans,
            "pi" => Token::Pi,
            "sqrt" => Token::Sqrt,
            "^" => Token::Power,
            "%" => Token::Percent,
            "!" => Token::Factorial,
            "sin" => Token::Sin,
            "cos" => Token::Cos,
            "tan" => Token::Tan,
            "ln" => Token::Ln,
            "log" => Token::Log,
            _ => Token::Literal(label.to_string()),
        }
    }
}

// Start of the trailing digit run, i.e. the reverse-scan match of `\d+$`
fn trailing_integer(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = bytes.len();
    while i > 0 && bytes[i - 1].is_ascii_digit() {
        i -= 1;
    }
    if i == bytes.len() {
        None
    } else {
        Some(i)
    }
}

// Start of the trailing number, i.e. the reverse-scan match of `\d+\.?\d*$`.
// The decimal point is part of the match only when digits precede it, so
// `2*.5` matches `5` while `2*3.` matches `3.`
fn trailing_number(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = bytes.len();
    while i > 0 && bytes[i - 1].is_ascii_digit() {
        i -= 1;
    }
    if i > 0 && bytes[i - 1] == b'.' {
        let mut j = i - 1;
        while j > 0 && bytes[j - 1].is_ascii_digit() {
            j -= 1;
        }
        if j < i - 1 {
            return Some(j);
        }
    }
    if i == bytes.len() {
        None
    } else {
        Some(i)
    }
}

/// Applies one pressed token to the expression buffer and returns the new
/// buffer text. The buffer itself is never parsed as an expression here:
/// every rule is a plain append or a trailing-token replacement.
///
/// `last_answer` is only read for [`Token::Ans`]
pub fn apply(buffer: &str, token: &Token, last_answer: Option<&Value>) -> Result<String, CalcError> {
    match token {
        Token::Clear => Ok(String::new()),
        Token::Backspace => {
            let mut s = buffer.to_string();
            s.pop();
            Ok(s)
        }
        Token::Ans => match last_answer {
            Some(v) => Ok(format!("{}{}", buffer, v)),
            None => Ok(buffer.to_string()),
        },
        Token::Pi => Ok(format!("{}pi", buffer)),
        Token::Sqrt => Ok(format!("{}sqrt(", buffer)),
        Token::Power => Ok(format!("{}**", buffer)),
        Token::Sin => Ok(format!("{}sin(", buffer)),
        Token::Cos => Ok(format!("{}cos(", buffer)),
        Token::Tan => Ok(format!("{}tan(", buffer)),
        Token::Ln => Ok(format!("{}ln(", buffer)),
        Token::Log => Ok(format!("{}log10(", buffer)),
        Token::Percent => match trailing_number(buffer) {
            Some(start) => {
                let num: f64 = match buffer[start..].parse() {
                    Ok(f) => f,
                    Err(..) => return Err(CalcError::StrToFloat(buffer[start..].to_string())),
                };
                Ok(format!("{}{}", &buffer[..start], format_f64(num / 100.0)))
            }
            None => Ok(format!("{}/100", buffer)),
        },
        Token::Factorial => match trailing_integer(buffer) {
            Some(start) => {
                let n = Value::from_str_integer(&buffer[start..])?;
                let f = n.factorial()?;
                Ok(format!("{}{}", &buffer[..start], f))
            }
            None => Err(CalcError::FactorialDomain),
        },
        Token::Literal(s) => Ok(format!("{}{}", buffer, s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn press(buffer: &str, label: &str) -> Result<String, CalcError> {
        apply(buffer, &Token::from_label(label), None)
    }

    #[test]
    fn test_literals() {
        assert_eq!(press("", "7"), Ok("7".to_string()));
        assert_eq!(press("7", "+"), Ok("7+".to_string()));
        assert_eq!(press("7+", "("), Ok("7+(".to_string()));
        assert_eq!(press("1", "."), Ok("1.".to_string()));
    }

    #[test]
    fn test_macros() {
        assert_eq!(press("2", "^"), Ok("2**".to_string()));
        assert_eq!(press("", "sqrt"), Ok("sqrt(".to_string()));
        assert_eq!(press("", "sin"), Ok("sin(".to_string()));
        assert_eq!(press("", "ln"), Ok("ln(".to_string()));
        assert_eq!(press("", "log"), Ok("log10(".to_string()));
        assert_eq!(press("2*", "pi"), Ok("2*pi".to_string()));
    }

    #[test]
    fn test_clear_and_backspace() {
        assert_eq!(press("12+3", "C"), Ok("".to_string()));
        assert_eq!(press("12+3", "BACK"), Ok("12+".to_string()));
        assert_eq!(press("", "BACK"), Ok("".to_string()));
    }

    #[test]
    fn test_ans() {
        let ans = Value::Float(0.5);
        let v = apply("2*", &Token::Ans, Some(&ans));
        assert_eq!(v, Ok("2*0.5".to_string()));
        let ans = Value::Int(BigInt::from(120));
        let v = apply("", &Token::Ans, Some(&ans));
        assert_eq!(v, Ok("120".to_string()));
        // no answer yet - nothing changes
        let v = apply("2*", &Token::Ans, None);
        assert_eq!(v, Ok("2*".to_string()));
    }

    #[test]
    fn test_percent() {
        assert_eq!(press("200*10", "%"), Ok("200*0.1".to_string()));
        assert_eq!(press("200", "%"), Ok("2.0".to_string()));
        assert_eq!(press("2*1.5", "%"), Ok("2*0.015".to_string()));
        // the trailing dot belongs to the number
        assert_eq!(press("2*3.", "%"), Ok("2*0.03".to_string()));
        // no digits before the dot - only the digit run matches
        assert_eq!(press("2*.5", "%"), Ok("2*.0.05".to_string()));
        // no trailing number at all
        assert_eq!(press("sin(30)", "%"), Ok("sin(30)/100".to_string()));
        assert_eq!(press("", "%"), Ok("/100".to_string()));
    }

    #[test]
    fn test_factorial() {
        assert_eq!(press("2*5", "!"), Ok("2*120".to_string()));
        assert_eq!(press("5", "!"), Ok("120".to_string()));
        assert_eq!(press("0", "!"), Ok("1".to_string()));
        // only the digit run is captured, the decimal point stays
        assert_eq!(press("1.5", "!"), Ok("1.120".to_string()));
        assert_eq!(press("abc", "!"), Err(CalcError::FactorialDomain));
        assert_eq!(press("", "!"), Err(CalcError::FactorialDomain));
        assert_eq!(press("2+3*", "!"), Err(CalcError::FactorialDomain));
    }

    #[test]
    fn test_trailing_scans() {
        assert_eq!(trailing_integer("2*15"), Some(2));
        assert_eq!(trailing_integer("2*"), None);
        assert_eq!(trailing_number("200*10"), Some(4));
        assert_eq!(trailing_number("2*1.5"), Some(2));
        assert_eq!(trailing_number("2*.5"), Some(3));
        assert_eq!(trailing_number("2*3."), Some(2));
        assert_eq!(trailing_number("2*."), None);
        assert_eq!(trailing_number(""), None);
    }
}
