//! Builtin functions offered to a script interpreter: `len`, `print` and `balance`.
//!
//! The interpreter itself lives elsewhere; it looks a builtin up by name and calls it with the
//! evaluated arguments. Errors are returned as `Value::Error` so the interpreter can report
//! them like any other runtime error.
use crate::Balancer::balancer_api::EquationBalancer;
use std::io::Write;

/// runtime value seen by builtins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Integer(i64),
    None,
    Error(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "STRING",
            Value::Integer(_) => "INTEGER",
            Value::None => "NONE",
            Value::Error(_) => "ERROR",
        }
    }

    pub fn inspect(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::None => "None".to_string(),
            Value::Error(message) => format!("ERROR: {}", message),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }
}

pub type BuiltinFn = fn(&Builtins, &[Value], &mut dyn Write) -> Value;

fn wrong_arity(args: &[Value]) -> Value {
    Value::Error(format!(
        "wrong number of arguments. got={}, want=1",
        args.len()
    ))
}

fn builtin_len(_: &Builtins, args: &[Value], _: &mut dyn Write) -> Value {
    if args.len() != 1 {
        return wrong_arity(args);
    }
    match &args[0] {
        Value::Str(s) => Value::Str(s.len().to_string()),
        other => Value::Error(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        )),
    }
}

fn builtin_print(_: &Builtins, args: &[Value], out: &mut dyn Write) -> Value {
    for arg in args {
        if let Err(e) = writeln!(out, "{}", arg.inspect()) {
            return Value::Error(format!("cannot write output: {}", e));
        }
    }
    Value::None
}

fn builtin_balance(builtins: &Builtins, args: &[Value], _: &mut dyn Write) -> Value {
    if args.len() != 1 {
        return wrong_arity(args);
    }
    match &args[0] {
        Value::Str(equation) => match builtins.balancer.balance(equation) {
            Ok(balanced) => Value::Str(balanced),
            Err(e) => Value::Error(format!(
                "argument to `balance` not supported, got error `{}`",
                e
            )),
        },
        other => Value::Error(format!(
            "argument to `balance` not supported, got {}",
            other.type_name()
        )),
    }
}

/// table of builtins sharing one balancer
#[derive(Debug, Clone, Default)]
pub struct Builtins {
    balancer: EquationBalancer,
}

impl Builtins {
    pub fn new(balancer: EquationBalancer) -> Self {
        Self { balancer }
    }

    pub fn names() -> &'static [&'static str] {
        &["len", "print", "balance"]
    }

    pub fn lookup(name: &str) -> Option<BuiltinFn> {
        match name {
            "len" => Some(builtin_len as BuiltinFn),
            "print" => Some(builtin_print as BuiltinFn),
            "balance" => Some(builtin_balance as BuiltinFn),
            _ => None,
        }
    }

    /// None if there is no builtin with this name
    pub fn call(&self, name: &str, args: &[Value], out: &mut dyn Write) -> Option<Value> {
        Self::lookup(name).map(|f| f(self, args, out))
    }
}
