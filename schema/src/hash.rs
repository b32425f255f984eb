//! Type fingerprints.
//!
//! The fingerprint is a rolling 64-bit hash. The order in which
//! [`hash_update`] is called is significant, so the field order below is
//! part of the wire contract and must not change.

use crate::{is_primitive_type, Member};

pub const STRUCT_HASH_SEED: i64 = 0x1234_5678;
pub const ENUM_HASH_SEED:   i64 = 0x8765_4321;

/// Mix one character (or small integer) into the hash.
///
/// `>>` on `i64` is an arithmetic shift: the sign bit fills the top bits.
pub fn hash_update(v: i64, c: i64) -> i64 {
    ((v << 8) ^ (v >> 55)).wrapping_add(c)
}

/// Mix a string into the hash: its byte length first, then each byte.
/// Both go in as a signed `char` would.
pub fn hash_string_update(v: i64, s: &str) -> i64 {
    let v = hash_update(v, s.len() as u8 as i8 as i64);
    s.bytes().fold(v, |v, b| hash_update(v, b as i8 as i64))
}

/// Fingerprint of a struct body.
///
/// The struct's own name is not hashed, so a type can be renamed without
/// breaking compatibility. Member type names are only hashed for primitives;
/// the content of a compound member type is covered by that type's own hash.
pub fn struct_hash(members: &[Member]) -> i64 {
    members.iter().fold(STRUCT_HASH_SEED, |mut v, member| {
        v = hash_string_update(v, &member.name);

        if is_primitive_type(member.type_.as_str()) {
            v = hash_string_update(v, member.type_.as_str());
        }

        v = hash_update(v, member.dimensions.len() as i64);
        for dim in &member.dimensions {
            v = hash_update(v, dim.mode as i64);
            v = hash_string_update(v, &dim.size);
        }
        v
    })
}

/// Fingerprint of an enum: only its qualified name, so values can be added later.
pub fn enum_hash(name: &str) -> i64 {
    hash_string_update(ENUM_HASH_SEED, name)
}
