//! Attribute name inference
//!
//! PV names are far from standard, so the rule is deliberately simple: an
//! underscore goes before every capital letter except the first, then the
//! whole name is lowercased. Acronyms are not detected, so `EVTLoadGainFile`
//! becomes `e_v_t_load_gain_file` and may need a manual touch-up.

use crate::types::strip_readback;

/// Convert a PV name into a snake_case attribute name
pub fn infer_attribute_name(pv: &str) -> String {
    let mut name = String::with_capacity(pv.len() + 4);

    for (i, ch) in pv.chars().enumerate() {
        if i > 0 && ch.is_ascii_uppercase() {
            name.push('_');
        }
        name.push(ch.to_ascii_lowercase());
    }

    name
}

/// Attribute name for a mapping key
///
/// Strips a trailing `_RBV` and any literal `Prefix:` segments before
/// applying [`infer_attribute_name`].
pub fn attribute_name_for(pv: &str) -> String {
    let base = strip_readback(pv);
    let stem = base.rsplit(':').next().unwrap_or(base);
    infer_attribute_name(stem)
}
