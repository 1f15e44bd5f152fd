//! Contact-field helpers shared by list and detail views.

use crate::model::School;

pub const ADDRESS_PLACEHOLDER: &str = "Address not available";

/// URL to open for a stored website. Bare hosts get `https://`.
pub fn website_url(raw: &str) -> String {
    if raw.starts_with("http") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    }
}

/// Website without its scheme, for compact display.
pub fn display_website(raw: &str) -> &str {
    raw.strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .unwrap_or(raw)
}

pub fn phone_url(raw: &str) -> String {
    format!("tel:{}", raw)
}

/// The school's address, or a placeholder when it is absent or unresolved.
pub fn address_or_placeholder(school: &School) -> &str {
    match school.address.as_deref() {
        Some(address) if !address.is_empty() => address,
        _ => ADDRESS_PLACEHOLDER,
    }
}
