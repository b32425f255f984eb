//! Declaration rules checked while the parser consumes each declaration.
//!
//! The checks work on the declarations seen so far, so a rule violation is
//! reported at the first point it can be detected.

use lcm_idl_schema::{is_array_dimension_type, is_legal_identifier, Dimension, EnumValue, Member};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Duplicate member name '{0}'.")]
    DuplicateMember(String),

    #[error("Array sizes must be declared either as a constant or variable.")]
    MissingArraySize,

    #[error("Constant array size must be > 0")]
    NonPositiveArraySize,

    #[error("Invalid array size variable name: must start with [a-zA-Z_].")]
    IllegalSizeVariable(String),

    #[error("Array dimension '{0}' must not be an array type.")]
    SizeVariableIsArray(String),

    #[error("Array dimension '{0}' must be an integer type.")]
    SizeVariableNotInteger(String),

    #[error("Unknown variable array index '{0}'. Index variables must be declared before the array.")]
    UnknownSizeVariable(String),

    #[error("Enum values {existing} and {name} have the same value {value}!")]
    DuplicateEnumValue {
        existing: String,
        name:     String,
        value:    i32,
    },

    #[error("Enum value {0} declared twice!")]
    DuplicateEnumName(String),

    #[error("Enum value {0} does not fit in a 32-bit integer.")]
    EnumValueOverflow(String),
}

/// `members` are the members already declared in the enclosing struct.
pub fn check_member_name(members: &[Member], name: &str) -> Result<(), Violation> {
    if members.iter().any(|m| m.name == name) {
        return Err(Violation::DuplicateMember(name.to_string()));
    }
    Ok(())
}

pub fn check_constant_size(size: i64) -> Result<(), Violation> {
    if size <= 0 {
        return Err(Violation::NonPositiveArraySize);
    }
    Ok(())
}

/// A variable dimension must name an earlier scalar member of integer type.
pub fn resolve_size_variable(members: &[Member], name: &str) -> Result<Dimension, Violation> {
    if !is_legal_identifier(name) {
        return Err(Violation::IllegalSizeVariable(name.to_string()));
    }

    let member = members
        .iter()
        .find(|m| m.name == name)
        .ok_or_else(|| Violation::UnknownSizeVariable(name.to_string()))?;

    if !member.is_scalar() {
        return Err(Violation::SizeVariableIsArray(name.to_string()));
    }
    if !is_array_dimension_type(member.type_.as_str()) {
        return Err(Violation::SizeVariableNotInteger(name.to_string()));
    }

    Ok(Dimension::variable(name))
}

/// Value for an enum entry without an explicit `= N`: one more than the
/// largest value so far (0 when there is none), not one more than the
/// previous entry.
pub fn next_enum_value(values: &[EnumValue], name: &str) -> Result<i32, Violation> {
    let max = values.iter().map(|v| v.value).max().unwrap_or(0).max(0);
    max.checked_add(1)
        .ok_or_else(|| Violation::EnumValueOverflow(name.to_string()))
}

pub fn check_enum_value(values: &[EnumValue], candidate: &EnumValue) -> Result<(), Violation> {
    for existing in values {
        if existing.value == candidate.value {
            return Err(Violation::DuplicateEnumValue {
                existing: existing.name.clone(),
                name:     candidate.name.clone(),
                value:    candidate.value,
            });
        }
        if existing.name == candidate.name {
            return Err(Violation::DuplicateEnumName(candidate.name.clone()));
        }
    }
    Ok(())
}
