//! Composite identifiers.
//!
//! Armies and relations are keyed by an ordered pair of ids, borders by an
//! unordered one. Both are flattened into a single `left:right` string so
//! every collection in the store can share the same `String` key type.

/// Separator between the two halves of a composite id. Plain ids must not
/// contain it; content validation enforces this.
pub const ID_SEPARATOR: char = ':';

/// Ordered composite id, e.g. `(faction, unit)` for an army or
/// `(source, target)` for a relation.
pub fn composite_id(left: &str, right: &str) -> String {
    format!("{left}{ID_SEPARATOR}{right}")
}

/// Unordered composite id: `border_key(a, b) == border_key(b, a)`.
pub fn border_key(a: &str, b: &str) -> String {
    if a <= b {
        composite_id(a, b)
    } else {
        composite_id(b, a)
    }
}

/// Whether `id` is usable as a plain entity id.
pub fn is_valid_id(id: &str) -> bool {
    !id.trim().is_empty() && !id.contains(ID_SEPARATOR)
}
