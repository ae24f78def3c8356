//! Utility functions shared by the analyzer and rule implementations.

pub mod allowance;

#[doc(inline)]
pub use allowance::{check_allow_with_reason, AllowCheck};

/// Converts a camel-case style key to hyphen-case (`aspectRatio` → `aspect-ratio`).
///
/// Every uppercase ASCII letter becomes `-` followed by its lowercase form,
/// so vendor keys keep their leading dash (`WebkitAppearance` →
/// `-webkit-appearance`). Keys already in hyphen-case pass through unchanged.
#[must_use]
pub fn camel_to_kebab(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::camel_to_kebab;

    #[test]
    fn converts_camel_case() {
        assert_eq!(camel_to_kebab("aspectRatio"), "aspect-ratio");
        assert_eq!(camel_to_kebab("backgroundColor"), "background-color");
        assert_eq!(camel_to_kebab("color"), "color");
    }

    #[test]
    fn keeps_vendor_prefix_dash() {
        assert_eq!(camel_to_kebab("WebkitAppearance"), "-webkit-appearance");
        assert_eq!(camel_to_kebab("msTransform"), "ms-transform");
    }

    #[test]
    fn passes_hyphen_case_through() {
        assert_eq!(camel_to_kebab("container-type"), "container-type");
        assert_eq!(camel_to_kebab("--brand-color"), "--brand-color");
    }
}
