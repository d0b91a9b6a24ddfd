//! Placeholder substitution engine.
//!
//! Fills `{{ key }}` tokens in a template with caller-supplied field values.
//! Pure and deterministic: no I/O, and alias iteration order cannot change
//! the result because each entry targets a disjoint token pattern.

use std::collections::HashMap;

use regex::{NoExpand, Regex};
use serde_json::Value;

use super::templates::AliasTable;

/// Visible marker substituted for unfilled fields.
///
/// An unfilled contract field must stay visually obvious in the rendered
/// document, so empty values become a blank line instead of vanishing.
pub const BLANK_FIELD: &str = "&nbsp;&nbsp;____________&nbsp;&nbsp;";

/// Escape HTML-special characters so a field value cannot inject markup.
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// String form of a context value. Null maps to empty, which downstream
/// becomes the blank-field marker.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Fill a template with context values through the alias table.
///
/// For every `(placeholder, data_key)` entry the matching `{{ placeholder }}`
/// tokens are replaced across the whole document. Matching tolerates
/// whitespace around the key; the key literal itself is escaped before the
/// pattern is built so dotted names cannot match beyond their own token.
/// Tokens whose key has no alias entry pass through untouched.
pub fn fill(template: &str, context: &HashMap<String, Value>, aliases: AliasTable) -> String {
    let mut html = template.to_string();

    for (placeholder, data_key) in aliases {
        let pattern = format!(r"\{{\{{\s*{}\s*\}}\}}", regex::escape(placeholder));
        let token = Regex::new(&pattern).expect("escaped placeholder key forms a valid pattern");

        let value = context.get(*data_key).map(display_value).unwrap_or_default();
        let replacement = if value.trim().is_empty() {
            BLANK_FIELD.to_string()
        } else {
            escape_html(&value)
        };

        html = token.replace_all(&html, NoExpand(&replacement)).into_owned();
    }

    html
}
