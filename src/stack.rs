use crate::errors::*;
use crate::value::*;

use lazy_static::lazy_static;

#[derive(Clone, Debug)]
pub(crate) enum Entry {
    Val(Value),
    Op(String, i32, bool),
    OpenB,
    Func(String, usize),
}

pub(crate) struct Stack {
    pub(crate) queue: Vec<Entry>,
    pub(crate) output: Vec<Entry>,
    values: Vec<Value>,
}

pub(crate) const UNARY_MINUS: &str = "---";

lazy_static! {
    // the only identifiers that resolve to functions during evaluation
    pub(crate) static ref STD_FUNCS: Vec<&'static str> = [
        "sin",
        "cos",
        "tan",
        "asin",
        "acos",
        "atan",
        "sinh",
        "cosh",
        "tanh",
        "ln",
        "log",
        "log10",
        "sqrt",
        "factorial",
        "degrees",
        "radians",
        "pow",
    ]
    .to_vec();
}

macro_rules! two_arg_op {
    ($id:ident) => {
        fn $id(&mut self) -> CalcErrorResult {
            if self.values.len() < 2 {
                return Err(CalcError::TooManyOps);
            }

            let v2 = self.values.pop().unwrap();
            let v1 = self.values.pop().unwrap();
            let v = v1.$id(v2)?;
            self.values.push(v);
            Ok(())
        }
    }
}
macro_rules! function_op {
    ($id:ident) => {
        fn $id(&mut self, args: usize) -> CalcErrorResult {
            if args == 0 {
                return Err(CalcError::FunctionNoArgs(stringify!($id).to_string()));
            }
            if self.values.len() < args {
                return Err(CalcError::FunctionUnfinished(stringify!($id).to_string()));
            }

            // single-argument function: extra arguments are dropped and the
            // first one is used
            let mut v = self.values.pop().unwrap();
            for _i in 0..args - 1 {
                v = self.values.pop().unwrap();
            }
            let v = v.$id()?;
            self.values.push(v);
            Ok(())
        }
    }
}

impl Stack {
    fn priority(op: &str) -> (i32, bool) {
        match op {
            UNARY_MINUS => (20, true), // negate
            "**" => (17, true),        // power
            "*" | "/" => (12, false),  // mult, div
            "+" | "-" => (8, false),   // add, sub
            _ => (0, false),           // invalid op
        }
    }

    pub(crate) fn is_func(&self, s: &str) -> bool {
        for fname in STD_FUNCS.iter() {
            if *fname == s {
                return true;
            }
        }
        false
    }

    // move operators from the queue to output while the top operator in the
    // queue has equal or greater priority
    fn pop_while_priority(&mut self, priority: i32) {
        loop {
            if self.queue.is_empty() {
                return;
            }
            // queue is not empty, so unwrap is OK
            let e = self.queue.pop().unwrap();
            match &e {
                Entry::OpenB => {
                    self.queue.push(e);
                    return;
                }
                Entry::Func(..) => {
                    self.output.push(e);
                }
                Entry::Op(_, p, right) => {
                    if *p > priority || (*p == priority && !*right) {
                        self.output.push(e);
                    } else {
                        self.queue.push(e);
                        return;
                    }
                }
                _ => return, // unreachable
            }
        }
    }

    fn update_func_args(&mut self) {
        if let Some(q) = self.queue.pop() {
            match &q {
                Entry::Func(name, args) => {
                    let args = args + 1;
                    self.queue.push(Entry::Func(name.to_string(), args));
                }
                _ => self.queue.push(q),
            }
        }
    }

    // move operators from the queue to output until the first bracket
    // or first argument separator
    fn pop_until_bracket(&mut self, keep_bracket: bool) -> CalcErrorResult {
        loop {
            if self.queue.is_empty() {
                return Err(CalcError::ClosingBracketMismatch);
            }

            // unwrap is ok - vector is not empty
            let e = self.queue.pop().unwrap();
            match &e {
                Entry::Val(..) | Entry::Op(..) | Entry::Func(..) => self.output.push(e),
                Entry::OpenB => {
                    self.update_func_args();
                    if keep_bracket {
                        self.queue.push(Entry::OpenB);
                    }
                    return Ok(());
                }
            }
        }
    }

    // move all operators from queue to output
    // Must be called only after the expression ends.
    fn pop_all(&mut self) -> CalcErrorResult {
        while let Some(v) = self.queue.pop() {
            match &v {
                Entry::OpenB => {} // do nothing - allows to omit last closing brackets
                Entry::Op(..) => self.output.push(v),
                Entry::Func(..) => self.output.push(v),
                _ => return Err(CalcError::Unreachable),
            }
        }
        Ok(())
    }

    // ------------ PUBLIC -----------------

    pub(crate) fn new() -> Self {
        Stack {
            queue: Vec::new(),
            output: Vec::new(),
            values: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, op: &str, val: Option<Value>) -> CalcErrorResult {
        if op.is_empty() {
            if let Some(v) = val {
                self.output.push(Entry::Val(v))
            } else {
                return Err(CalcError::EmptyValue);
            }
            return Ok(());
        }

        if self.is_func(op) {
            self.queue.push(Entry::Func(op.to_owned(), 0));
            return Ok(());
        }

        if op == "(" {
            self.queue.push(Entry::OpenB);
            return Ok(());
        }

        if op == ")" {
            return self.pop_until_bracket(false);
        }
        if op == ";" {
            return self.pop_until_bracket(true);
        }

        let (pri, right_assoc) = Stack::priority(op);
        if pri == 0 {
            return Err(CalcError::InvalidOp(op.to_owned()));
        }

        self.pop_while_priority(pri);
        self.queue.push(Entry::Op(op.to_owned(), pri, right_assoc));

        Ok(())
    }

    pub(crate) fn increase_func_argc(&mut self) -> CalcErrorResult {
        if let Some(e) = self.queue.pop() {
            match &e {
                Entry::Func(fname, argc) => {
                    self.queue.push(Entry::Func(fname.to_string(), argc + 1));
                }
                _ => self.queue.push(e),
            }
        }
        Ok(())
    }

    pub(crate) fn calculate(&mut self) -> CalcResult {
        self.pop_all()?;
        if self.output.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        self.values = Vec::new();

        for i in 0..self.output.len() {
            let o = self.output[i].clone();
            match o {
                Entry::Val(v) => {
                    self.values.push(v);
                }
                Entry::Op(op, ..) => {
                    self.process_operator(&op)?;
                }
                Entry::Func(fname, args) => {
                    self.process_function(&fname, args)?;
                }
                _ => return Err(CalcError::Unreachable),
            }
        }

        if self.values.len() != 1 {
            return Err(CalcError::InsufficientOps);
        }

        // values is never empty after calculation - unwrap is fine
        Ok(self.values.pop().unwrap())
    }

    fn process_operator(&mut self, op: &str) -> CalcErrorResult {
        match op {
            "/" => self.divide(),
            "*" => self.multiply(),
            "+" => self.addition(),
            "-" => self.subtract(),
            "**" => self.power(),
            UNARY_MINUS => self.negate(),
            _ => Err(CalcError::InvalidOp(op.to_string())),
        }
    }

    fn process_function(&mut self, fname: &str, args: usize) -> CalcErrorResult {
        match fname {
            "sin" => self.sin(args),
            "cos" => self.cos(args),
            "tan" => self.tan(args),
            "asin" => self.asin(args),
            "acos" => self.acos(args),
            "atan" => self.atan(args),
            "sinh" => self.sinh(args),
            "cosh" => self.cosh(args),
            "tanh" => self.tanh(args),
            // both are the natural logarithm in the original button layout
            "ln" | "log" => self.ln(args),
            "log10" => self.log10(args),
            "sqrt" => self.sqrt(args),
            "factorial" => self.factorial(args),
            "degrees" => self.degrees(args),
            "radians" => self.radians(args),
            "pow" => self.pow(args),
            _ => Err(CalcError::InvalidOp(fname.to_string())),
        }
    }

    fn negate(&mut self) -> CalcErrorResult {
        if self.values.is_empty() {
            return Err(CalcError::TooManyOps);
        }

        let v = self.values.pop().unwrap();
        let v = v.negate()?;
        self.values.push(v);
        Ok(())
    }

    two_arg_op!(power);
    two_arg_op!(divide);
    two_arg_op!(addition);
    two_arg_op!(subtract);
    two_arg_op!(multiply);

    function_op!(sin);
    function_op!(cos);
    function_op!(tan);
    function_op!(asin);
    function_op!(acos);
    function_op!(atan);
    function_op!(sinh);
    function_op!(cosh);
    function_op!(tanh);

    function_op!(sqrt);
    function_op!(ln);
    function_op!(log10);
    function_op!(factorial);
    function_op!(degrees);
    function_op!(radians);

    fn pow(&mut self, args: usize) -> CalcErrorResult {
        if args < 2 || self.values.len() < 2 {
            return Err(CalcError::FunctionNotEnoughArgs("pow".to_string(), 2));
        }

        // remove redundant arguments
        for _i in 0..args - 2 {
            let _ = self.values.pop().unwrap();
        }
        let v2 = self.values.pop().unwrap();
        let v1 = self.values.pop().unwrap();
        let v = v1.power(v2)?;
        self.values.push(v);
        Ok(())
    }
}
