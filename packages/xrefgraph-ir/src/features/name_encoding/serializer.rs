//! Dotted name → `SerializedName`
//!
//! `N.Dict<System.String, N.X>.Add` becomes the elements
//! `N`, `Dict<System:String, N:X>`, `Add`: the generic argument span stays one
//! element and its inner dots turn into `:` so the store does not read them
//! as nesting.

use xrefgraph_storage::{NameElement, SerializedName};

pub fn serialize_name(full_name: &str, prefix: &str, postfix: &str) -> SerializedName {
    let parts = split_name(full_name);
    let last = parts.len().saturating_sub(1);
    let elements = parts
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            if idx == last {
                NameElement {
                    prefix: prefix.to_string(),
                    name,
                    postfix: postfix.to_string(),
                }
            } else {
                NameElement::new(name)
            }
        })
        .collect();
    SerializedName::new(elements)
}

/// Split on `.`, keeping the first `<` .. last `>` span atomic.
pub fn split_name(full_name: &str) -> Vec<String> {
    let flattened = match (full_name.find('<'), full_name.rfind('>')) {
        (Some(start), Some(end)) if start > 0 && end > start => format!(
            "{}{}{}",
            &full_name[..start],
            full_name[start..=end].replace('.', ":"),
            &full_name[end + 1..]
        ),
        _ => full_name.to_string(),
    };
    flattened
        .split(SerializedName::DELIMITER)
        .map(str::to_string)
        .collect()
}
