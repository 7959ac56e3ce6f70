//! Type representation for the MPPL type system.
//!
//! A closed sum: the three standard types, strings (the type of multi-byte
//! string literals), arrays, and procedure types. Equality is structural.

use std::fmt;

/// An MPPL type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ty {
    Integer,
    Char,
    Boolean,
    String,
    /// `array[size] of elem`
    Array { elem: Box<Ty>, size: u32 },
    /// A procedure with its parameter types in declaration order.
    Proc(Vec<Ty>),
}

impl Ty {
    /// Whether this is a standard type (integer, char, or boolean).
    pub fn is_std(&self) -> bool {
        matches!(self, Ty::Integer | Ty::Char | Ty::Boolean)
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Integer => write!(f, "integer"),
            Ty::Char => write!(f, "char"),
            Ty::Boolean => write!(f, "boolean"),
            Ty::String => write!(f, "string"),
            Ty::Array { elem, size } => write!(f, "array[{size}] of {elem}"),
            Ty::Proc(params) => {
                write!(f, "procedure(")?;
                for (index, param) in params.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ")")
            }
        }
    }
}
