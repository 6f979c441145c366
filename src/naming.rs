//! Delimiter-driven name normalization.
//!
//! External names arrive with `/`, `_`, `-` separators (URL path segments,
//! snake_case document keys). Splitting is purely delimiter-driven: embedded
//! capitals are left alone, and case folding is ASCII-only, so the same input
//! always yields the same output.

const DELIMITERS: [char; 3] = ['/', '_', '-'];

/// Split `raw` on delimiters, upcase the first char of every segment, and
/// concatenate. With `capitalize_first = false` the first char of the result
/// is downcased again. Empty segments (consecutive delimiters) contribute
/// nothing.
pub fn camel(raw: &str, capitalize_first: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for segment in raw.split(DELIMITERS) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars);
        }
    }
    if !capitalize_first {
        if let Some(first) = out.chars().next() {
            let lower = first.to_ascii_lowercase();
            let mut buf = [0u8; 4];
            out.replace_range(..first.len_utf8(), lower.encode_utf8(&mut buf));
        }
    }
    out
}

/// Type-name form: `guild-role` → `GuildRole`.
pub fn type_name(raw: &str) -> String {
    camel(raw, true)
}

/// Field-name form: `user_id` → `userId`.
pub fn field_name(raw: &str) -> String {
    camel(raw, false)
}

// ------------------------------- Tests ------------------------------------ //
