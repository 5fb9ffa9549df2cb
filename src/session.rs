use log::debug;

use crate::angle::{wrap_degrees, AngleMode};
use crate::editor::{self, Token};
use crate::errors::*;
use crate::parse;
use crate::value::*;

/// Evaluates an expression string in the given angle mode.
///
/// In [`AngleMode::Degrees`] trig call arguments are first wrapped in a
/// `radians(..)` conversion; in [`AngleMode::Radians`] the string is
/// evaluated as-is. The result is normalized, so `4/2` comes back as the
/// integer `2` and not `2.0`
pub fn evaluate(expr: &str, mode: AngleMode) -> CalcResult {
    let prepared = match mode {
        AngleMode::Degrees => wrap_degrees(expr),
        AngleMode::Radians => expr.to_string(),
    };
    if prepared != expr {
        debug!("degree rewrite: '{}' -> '{}'", expr, prepared);
    }
    let v = parse::eval(&prepared)?;
    Ok(v.normalized())
}

/// One calculator session: the in-progress expression text, the angle mode,
/// and the last successful result. All state lives here, there are no
/// globals; the UI layer owns a `Session` and forwards every input event
/// to it
#[derive(Default)]
pub struct Session {
    buffer: String,
    mode: AngleMode,
    last_answer: Option<Value>,
}

impl Session {
    pub fn new() -> Self {
        Default::default()
    }

    /// The expression text to show in the display
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn mode(&self) -> AngleMode {
        self.mode
    }

    /// The label for the mode toggle control (`DEG` or `RAD`)
    pub fn mode_label(&self) -> &'static str {
        self.mode.label()
    }

    pub fn last_answer(&self) -> Option<&Value> {
        self.last_answer.as_ref()
    }

    /// Switches between degrees and radians and returns the new mode
    pub fn toggle_mode(&mut self) -> AngleMode {
        self.mode = self.mode.toggle();
        self.mode
    }

    /// Applies one pressed token to the buffer. On error (only the factorial
    /// action can fail, and only on a buffer without a trailing integer) the
    /// buffer is left untouched
    pub fn press(&mut self, token: &Token) -> Result<(), CalcError> {
        let next = editor::apply(&self.buffer, token, self.last_answer.as_ref())?;
        self.buffer = next;
        Ok(())
    }

    /// Convenience wrapper around [`Session::press`] for raw button labels
    pub fn press_label(&mut self, label: &str) -> Result<(), CalcError> {
        self.press(&Token::from_label(label))
    }

    /// Evaluates the current buffer. A blank buffer is a no-op. On success
    /// the result becomes both the new buffer text and the last answer; on
    /// failure everything is left as it was so the user can correct the
    /// expression
    pub fn evaluate(&mut self) -> Result<Option<Value>, CalcError> {
        if self.buffer.trim().is_empty() {
            return Ok(None);
        }
        let v = match evaluate(&self.buffer, self.mode) {
            Ok(v) => v,
            Err(e) => {
                debug!("evaluation of '{}' failed: {}", self.buffer, e);
                return Err(e);
            }
        };
        self.buffer = format!("{}", v);
        self.last_answer = Some(v.clone());
        Ok(Some(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn press_all(s: &mut Session, labels: &[&str]) {
        for label in labels {
            s.press_label(label).unwrap();
        }
    }

    #[test]
    fn test_degrees_evaluation() {
        let v = evaluate("sin(30)", AngleMode::Degrees);
        match v {
            Ok(Value::Float(f)) => assert!((f - 0.5).abs() < 1e-12),
            other => panic!("expected float close to 0.5, got {:?}", other),
        }
        let v = evaluate("sin(90)", AngleMode::Degrees);
        assert_eq!(v, Ok(Value::Int(BigInt::from(1))));
    }

    #[test]
    fn test_radians_evaluation() {
        let v = evaluate("sin(pi/2)", AngleMode::Radians);
        assert_eq!(v, Ok(Value::Int(BigInt::from(1))));
        // radians mode does not rewrite anything
        let v = evaluate("sin(pi/2)", AngleMode::Radians);
        assert_eq!(v, Ok(Value::Int(BigInt::from(1))));
    }

    #[test]
    fn test_normalization() {
        let v = evaluate("4/2", AngleMode::Radians);
        assert_eq!(v, Ok(Value::Int(BigInt::from(2))));
        let v = evaluate("1/2", AngleMode::Radians);
        assert_eq!(v, Ok(Value::Float(0.5)));
    }

    #[test]
    fn test_session_flow() {
        let mut s = Session::new();
        press_all(&mut s, &["2", "*", "5"]);
        s.press_label("!").unwrap();
        assert_eq!(s.buffer(), "2*120");
        let v = s.evaluate().unwrap();
        assert_eq!(v, Some(Value::Int(BigInt::from(240))));
        // the result becomes the next buffer
        assert_eq!(s.buffer(), "240");
        assert_eq!(s.last_answer(), Some(&Value::Int(BigInt::from(240))));
    }

    #[test]
    fn test_ans_round_trip() {
        let mut s = Session::new();
        // ANS before any result changes nothing
        s.press_label("ANS").unwrap();
        assert_eq!(s.buffer(), "");

        press_all(&mut s, &["1", "/", "2"]);
        let v = s.evaluate().unwrap();
        assert_eq!(v, Some(Value::Float(0.5)));
        s.press_label("C").unwrap();
        press_all(&mut s, &["2", "*"]);
        s.press_label("ANS").unwrap();
        assert_eq!(s.buffer(), "2*0.5");
        let v = s.evaluate().unwrap();
        assert_eq!(v, Some(Value::Int(BigInt::from(1))));
    }

    #[test]
    fn test_mode_toggle() {
        let mut s = Session::new();
        assert_eq!(s.mode_label(), "DEG");
        assert_eq!(s.toggle_mode(), AngleMode::Radians);
        assert_eq!(s.mode_label(), "RAD");
        assert_eq!(s.toggle_mode(), AngleMode::Degrees);
        assert_eq!(s.mode_label(), "DEG");
    }

    #[test]
    fn test_blank_buffer_is_noop() {
        let mut s = Session::new();
        assert_eq!(s.evaluate(), Ok(None));
        assert_eq!(s.buffer(), "");
        assert_eq!(s.last_answer(), None);
    }

    #[test]
    fn test_error_keeps_buffer() {
        let mut s = Session::new();
        press_all(&mut s, &["1", "/", "0"]);
        let v = s.evaluate();
        assert_eq!(v, Err(CalcError::DividedByZero("1".to_string())));
        assert_eq!(s.buffer(), "1/0");
        assert_eq!(s.last_answer(), None);

        // a failing factorial press keeps the buffer too
        let mut s = Session::new();
        press_all(&mut s, &["2", "+"]);
        assert_eq!(s.press_label("!"), Err(CalcError::FactorialDomain));
        assert_eq!(s.buffer(), "2+");
    }

    #[test]
    fn test_percent_press() {
        let mut s = Session::new();
        press_all(&mut s, &["2", "0", "0", "*", "1", "0"]);
        s.press_label("%").unwrap();
        assert_eq!(s.buffer(), "200*0.1");
        let v = s.evaluate().unwrap();
        assert_eq!(v, Some(Value::Int(BigInt::from(20))));
    }

    #[test]
    fn test_sandbox_containment() {
        let v = evaluate("__import__('os')", AngleMode::Radians);
        assert_eq!(v, Err(CalcError::ParseFailed("invalid expression".to_string())));
        let v = evaluate("open(1)", AngleMode::Radians);
        assert_eq!(v, Err(CalcError::UnknownName("open".to_string())));
    }
}
