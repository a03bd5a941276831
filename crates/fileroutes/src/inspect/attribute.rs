/// Attribute model for inspected route modules
///
/// A loaded route file is described by the public items it declares. Values
/// of constants and `#[route(...)]` annotations are reduced to [`Value`]s so
/// they can be type-checked without running any code.

use quote::ToTokens;
use serde::Serialize;
use std::collections::BTreeMap;
use syn::punctuated::Punctuated;
use syn::{Expr, Lit, Token, UnOp};

/// `#[route(key = value, ...)]` metadata attached to a view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    pairs: BTreeMap<String, Value>,
    /// Token text of every `#[route]` attribute or pair that could not be read
    pub malformed: Vec<String>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.pairs.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.pairs.insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.malformed.is_empty()
    }
}

/// A statically known value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    /// Array of `(&str, value)` pairs
    Mapping(BTreeMap<String, Value>),
    /// Any non-literal expression, kept as token text
    Expr(String),
}

impl Value {
    /// Reduces an expression to a value
    ///
    /// References, parentheses and `vec![...]` are looked through; arrays of
    /// two-element tuples keyed by string literals become mappings.
    pub fn from_expr(expr: &Expr) -> Self {
        match expr {
            Expr::Lit(lit) => Self::from_lit(&lit.lit).unwrap_or_else(|| Self::tokens(expr)),
            Expr::Reference(reference) => Self::from_expr(&reference.expr),
            Expr::Paren(paren) => Self::from_expr(&paren.expr),
            Expr::Group(group) => Self::from_expr(&group.expr),
            Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => {
                match Self::from_expr(&unary.expr) {
                    Value::Integer(n) => Value::Integer(-n),
                    Value::Float(f) => Value::Float(-f),
                    _ => Self::tokens(expr),
                }
            }
            Expr::Array(array) => Self::from_elements(array.elems.iter()),
            Expr::Tuple(tuple) => Value::List(tuple.elems.iter().map(Self::from_expr).collect()),
            Expr::Macro(mac) if mac.mac.path.is_ident("vec") => mac
                .mac
                .parse_body_with(Punctuated::<Expr, Token![,]>::parse_terminated)
                .map(|elems| Self::from_elements(elems.iter()))
                .unwrap_or_else(|_| Self::tokens(expr)),
            _ => Self::tokens(expr),
        }
    }

    fn from_lit(lit: &Lit) -> Option<Self> {
        match lit {
            Lit::Str(s) => Some(Value::Text(s.value())),
            Lit::Char(c) => Some(Value::Text(c.value().to_string())),
            Lit::Int(i) => i.base10_parse().ok().map(Value::Integer),
            Lit::Float(f) => f.base10_parse().ok().map(Value::Float),
            Lit::Bool(b) => Some(Value::Bool(b.value)),
            _ => None,
        }
    }

    fn from_elements<'e>(elems: impl Iterator<Item = &'e Expr>) -> Self {
        let elems: Vec<&Expr> = elems.collect();
        if !elems.is_empty() {
            if let Some(pairs) = elems.iter().map(|e| Self::pair(e)).collect::<Option<_>>() {
                return Value::Mapping(pairs);
            }
        }
        Value::List(elems.into_iter().map(Self::from_expr).collect())
    }

    fn pair(expr: &Expr) -> Option<(String, Value)> {
        let expr = match expr {
            Expr::Paren(paren) => &*paren.expr,
            Expr::Group(group) => &*group.expr,
            other => other,
        };
        let Expr::Tuple(tuple) = expr else {
            return None;
        };
        if tuple.elems.len() != 2 {
            return None;
        }
        match Self::from_expr(&tuple.elems[0]) {
            Value::Text(key) => Some((key, Self::from_expr(&tuple.elems[1]))),
            _ => None,
        }
    }

    fn tokens(expr: &Expr) -> Self {
        Value::Expr(expr.to_token_stream().to_string())
    }

    /// Short type description used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::List(_) => "list",
            Value::Mapping(_) => "mapping",
            Value::Expr(_) => "expression",
        }
    }
}

/// Typed view of a [`Value`]
pub trait FromValue: Sized {
    /// Description of the expected type, e.g. "text"
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    const EXPECTED: &'static str = "text";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(text) => Some(text.clone()),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for BTreeMap<String, Value> {
    const EXPECTED: &'static str = "mapping";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Mapping(map) => Some(map.clone()),
            // `&[]` cannot tell a list from a mapping
            Value::List(items) if items.is_empty() => Some(BTreeMap::new()),
            _ => None,
        }
    }
}

impl FromValue for Vec<Value> {
    const EXPECTED: &'static str = "list";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => Some(items.clone()),
            _ => None,
        }
    }
}

/// A public free function
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub is_async: bool,
    pub annotations: Annotations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Struct,
    Enum,
}

/// A public struct or enum, with the traits implemented for it in the same file
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: String,
    pub kind: ClassKind,
    /// Last path segment of every trait implemented for this type
    pub bases: Vec<String>,
    pub annotations: Annotations,
}

impl Class {
    pub fn implements(&self, base: &str) -> bool {
        self.bases.iter().any(|b| b == base)
    }
}

/// A public `const` or `static`
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub name: String,
    pub is_static: bool,
    /// Declared type as token text
    pub ty: String,
    pub value: Value,
}

/// A public `use` re-export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reexport {
    /// Name the item is visible under in this module
    pub name: String,
    /// Full path being re-exported, e.g. `crate::views::View`
    pub target: String,
}

impl Reexport {
    /// Whether the re-exported item is named `ident`
    pub fn imports(&self, ident: &str) -> bool {
        self.target.rsplit("::").next() == Some(ident)
    }
}

/// One public item of a loaded module
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Function(Function),
    Class(Class),
    Constant(Constant),
    Reexport(Reexport),
    /// Any other public item (`mod`, `trait`, `type`, ...)
    Other { name: String, kind: &'static str },
}

impl Attribute {
    pub fn name(&self) -> &str {
        match self {
            Attribute::Function(f) => &f.name,
            Attribute::Class(c) => &c.name,
            Attribute::Constant(c) => &c.name,
            Attribute::Reexport(r) => &r.name,
            Attribute::Other { name, .. } => name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Attribute::Function(_) => "function",
            Attribute::Class(c) => match c.kind {
                ClassKind::Struct => "struct",
                ClassKind::Enum => "enum",
            },
            Attribute::Constant(c) if c.is_static => "static",
            Attribute::Constant(_) => "constant",
            Attribute::Reexport(_) => "re-export",
            Attribute::Other { kind, .. } => *kind,
        }
    }
}
