use super::FieldMap;
use crate::core::constants;

/// Whether `fields` carries every name in `required` with at least one value.
///
/// Names are compared case-insensitively. Response-shape checks (an HTML body
/// served with a 200) happen before parsing and are not repeated here.
pub fn validate(fields: &FieldMap, required: &[&str]) -> bool {
    required.iter().all(|name| fields.contains(name))
}

/// [`validate`] against the fixed required set.
pub fn validate_required(fields: &FieldMap) -> bool {
    validate(fields, &constants::fields::REQUIRED)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::securitytxt::parse;

    #[test]
    fn test_validate__rejects_missing_contact() {
        let fields = parse("Expires: 2025-01-01");

        assert!(!validate_required(&fields));
    }

    #[test]
    fn test_validate__accepts_contact_in_any_case() {
        for body in [
            "Contact: mailto:x@y.com",
            "contact: mailto:x@y.com",
            "CONTACT: mailto:x@y.com",
        ] {
            assert!(validate_required(&parse(body)), "rejected {body:?}");
        }
    }

    #[test]
    fn test_validate__accepts_cr_only_file() {
        let fields = parse("Expires: 2030-01-01\rContact: mailto:a@x.com\r");

        assert!(validate_required(&fields));
    }

    #[test]
    fn test_validate__required_names_are_case_insensitive() {
        let fields = parse("Contact: mailto:x@y.com\nPolicy: https://y.com/p");

        assert!(validate(&fields, &["CONTACT", "Policy"]));
        assert!(!validate(&fields, &["contact", "hiring"]));
    }

    #[test]
    fn test_validate__empty_required_set_accepts_anything() {
        assert!(validate(&FieldMap::default(), &[]));
    }

    #[test]
    fn test_validate__empty_map_is_rejected() {
        assert!(!validate_required(&FieldMap::default()));
    }
}
