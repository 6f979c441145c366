//! Sample repair pre-pass.
//!
//! Example payloads lifted from vendor documentation are routinely broken:
//! comment lines inside the JSON, mustache-mangled doubled braces, trailing
//! commas. Each repair is a named rule that can be tested on its own; all of
//! them run before parsing and none of them touch synthesis.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::Error;

/// Drop lines whose first non-blank characters start a `#` or `//` comment.
pub fn strip_comment_lines(raw: &str) -> String {
    raw.lines()
        .filter(|line| {
            let t = line.trim_start();
            !t.starts_with('#') && !t.starts_with("//")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse `{{` / `}}` to single braces, but only when both doubled forms
/// appear (a template-mangled sample, not a nested object).
pub fn collapse_doubled_braces(raw: &str) -> String {
    if raw.contains("{{") && raw.contains("}}") {
        raw.replace("{{", "{").replace("}}", "}")
    } else {
        raw.to_owned()
    }
}

static TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*([}\]])").unwrap());

/// Remove a comma left dangling before a closing brace or bracket.
pub fn drop_trailing_commas(raw: &str) -> String {
    TRAILING_COMMA.replace_all(raw, "$1").into_owned()
}

/// All repair rules, in order.
pub fn repair(raw: &str) -> String {
    drop_trailing_commas(&collapse_doubled_braces(&strip_comment_lines(raw)))
}

/// Repair, then parse one sample.
///
/// Malformed input is fatal for this document only; the error carries the
/// JSON path at which parsing gave up, plus `origin` for the batch log.
pub fn parse_sample(raw: &str, origin: &str) -> Result<Value, Error> {
    let repaired = repair(raw);
    let de = &mut serde_json::Deserializer::from_str(&repaired);
    serde_path_to_error::deserialize(de).map_err(|err| Error::Json {
        path: origin.to_owned(),
        pointer: err.path().to_string(),
        source: err.into_inner(),
    })
}

// ------------------------------- Tests ------------------------------------ //
