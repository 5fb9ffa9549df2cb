/// How trigonometric function arguments are interpreted during evaluation.
/// The mode never changes the buffer text, only the pre-evaluation rewrite
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AngleMode {
    Degrees,
    Radians,
}

impl AngleMode {
    pub fn toggle(self) -> AngleMode {
        match self {
            AngleMode::Degrees => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Degrees,
        }
    }

    /// The label shown on the mode toggle control
    pub fn label(self) -> &'static str {
        match self {
            AngleMode::Degrees => "DEG",
            AngleMode::Radians => "RAD",
        }
    }
}

impl Default for AngleMode {
    fn default() -> AngleMode {
        AngleMode::Degrees
    }
}

const TRIG_FUNCS: [&str; 6] = ["sin", "cos", "tan", "asin", "acos", "atan"];

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

// Rewrites every word-boundary `name(` that is not already followed by
// `radians(` into `name(radians(`. One closing bracket per rewrite is
// appended at the very end of the string, after the whole pass for this
// name. Keeping the brackets at the end (instead of closing each wrapped
// argument in place) reproduces the historical behavior; it only balances
// when the rewritten calls need no earlier closure
fn wrap_one(expr: &str, fname: &str) -> String {
    let needle = format!("{}(", fname);
    let bytes = expr.as_bytes();
    let mut out = String::with_capacity(expr.len() + 16);
    let mut count = 0;
    let mut i = 0;
    while i < expr.len() {
        let at_boundary = i == 0 || !is_word_byte(bytes[i - 1]);
        if at_boundary
            && expr[i..].starts_with(&needle)
            && !expr[i + needle.len()..].starts_with("radians(")
        {
            out.push_str(fname);
            out.push_str("(radians(");
            count += 1;
            i += needle.len();
        } else {
            // i is always on a char boundary here, so unwrap is OK
            let ch = expr[i..].chars().next().unwrap();
            out.push(ch);
            i += ch.len_utf8();
        }
    }
    for _c in 0..count {
        out.push(')');
    }
    out
}

/// Prepares an expression for evaluation in [`AngleMode::Degrees`]: every
/// direct and inverse trig call gets its argument wrapped in a `radians(..)`
/// conversion. Calls already written with an explicit `radians(` are left
/// alone
pub fn wrap_degrees(expr: &str) -> String {
    let mut out = expr.to_string();
    for fname in TRIG_FUNCS.iter() {
        out = wrap_one(&out, fname);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let m = AngleMode::Degrees;
        assert_eq!(m.label(), "DEG");
        assert_eq!(m.toggle(), AngleMode::Radians);
        assert_eq!(m.toggle().label(), "RAD");
        assert_eq!(m.toggle().toggle(), m);
    }

    #[test]
    fn test_wrap_single() {
        assert_eq!(wrap_degrees("sin(30)"), "sin(radians(30))");
        assert_eq!(wrap_degrees("atan(1)"), "atan(radians(1))");
    }

    #[test]
    fn test_wrap_does_not_double() {
        assert_eq!(wrap_degrees("sin(radians(30))"), "sin(radians(30))");
    }

    #[test]
    fn test_wrap_word_boundary() {
        // the `sin` inside `asin` must not match on its own
        assert_eq!(wrap_degrees("asin(0.5)"), "asin(radians(0.5))");
    }

    #[test]
    fn test_wrap_name_without_bracket() {
        // only call sites (name followed by a bracket) are rewritten
        assert_eq!(wrap_degrees("sin"), "sin");
        assert_eq!(wrap_degrees("2+2"), "2+2");
    }

    #[test]
    fn test_wrap_multiple() {
        // both opens collect their closing brackets at the end
        assert_eq!(wrap_degrees("sin(30)+cos(60)"), "sin(radians(30)+cos(radians(60)))");
    }
}
