//! Callable construct records
//!
//! Records are plain values: produced once during a scan, never mutated.

use serde::{Serialize, Serializer};
use std::fmt;

/// Name used when a construct has no identifier in source
pub const ANONYMOUS: &str = "<anonymous>";

/// Role of a class member, as declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodRole {
    Constructor,
    Method,
    Getter,
    Setter,
}

impl MethodRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodRole::Constructor => "constructor",
            MethodRole::Method => "method",
            MethodRole::Getter => "get",
            MethodRole::Setter => "set",
        }
    }
}

/// Category of a discovered callable construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallableKind {
    FunctionDeclaration,
    FunctionExpression,
    ArrowFunction,
    ClassMethod(MethodRole),
}

impl fmt::Display for CallableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallableKind::FunctionDeclaration => f.write_str("FunctionDeclaration"),
            CallableKind::FunctionExpression => f.write_str("FunctionExpression"),
            CallableKind::ArrowFunction => f.write_str("ArrowFunction"),
            CallableKind::ClassMethod(role) => write!(f, "ClassMethod ({})", role.as_str()),
        }
    }
}

impl Serialize for CallableKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One discovered function-like construct
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallableRecord {
    pub name: String,
    pub file: String,
    /// 1-based line of the construct's first token
    pub line: u32,
    pub kind: CallableKind,
}

impl CallableRecord {
    pub fn new(name: Option<String>, file: &str, line: u32, kind: CallableKind) -> Self {
        CallableRecord {
            name: name.unwrap_or_else(|| ANONYMOUS.to_string()),
            file: file.to_string(),
            line,
            kind,
        }
    }
}
