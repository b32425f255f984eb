//! AST types for LCM message definitions, plus the fingerprint that
//! downstream code uses to detect incompatible changes to a type.
//!
//! ```
//! use lcm_idl_schema::*;
//!
//! let mut point = Struct::new("geometry.point_t", "point.lcm");
//! point.members.push(Member::new("x", "double"));
//! point.members.push(Member::new("y", "double"));
//! point.hash = struct_hash(&point.members);
//!
//! assert_eq!(point.name.package(), "geometry");
//! assert_eq!(point.name.shortname(), "point_t");
//! assert!(is_primitive_type("double"));
//! ```

pub mod hash;
pub mod types;

pub use hash::*;
pub use types::*;

/// Built-in scalar types. Unsigned integers are deliberately absent.
pub const PRIMITIVE_TYPES: [&str; 9] = [
    "int8_t", "int16_t", "int32_t", "int64_t", "byte", "float", "double", "string", "boolean",
];

/// Types a member must have to be used as a variable array dimension.
pub const ARRAY_DIMENSION_TYPES: [&str; 4] = ["int8_t", "int16_t", "int32_t", "int64_t"];

pub fn is_primitive_type(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}

pub fn is_array_dimension_type(name: &str) -> bool {
    ARRAY_DIMENSION_TYPES.contains(&name)
}

/// Member, type and array-size names must start with `[a-zA-Z_]`.
pub fn is_legal_identifier(name: &str) -> bool {
    name.chars()
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
}
