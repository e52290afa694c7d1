//! Name case-folding.

/// Upper-case every character using Unicode's locale-independent mapping.
///
/// Some characters expand (`ß` becomes `SS`), so the output may be longer than the input.
pub fn normalize_name(raw: &str) -> String {
    raw.to_uppercase()
}
