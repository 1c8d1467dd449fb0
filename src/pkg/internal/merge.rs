use crate::pkg::internal::recognize::RecognizedFields;

/// Override candidates supplied by the caller alongside the upload. Tags
/// have no recognized counterpart and always come from here.
#[derive(Debug, Clone, Default)]
pub struct UserSuppliedFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub tags: Vec<String>,
}

/// The resolved contact fields a record is created with.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalFields {
    pub name: String,
    pub email: String,
    pub phone: String,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Extracted values outrank manual entry: they are sourced straight from
/// the document. The caller's value is consulted only when recognition
/// came up empty, and "Unknown" is the last resort.
pub fn resolve_name(recognized: Option<&str>, supplied: Option<&str>) -> String {
    non_empty(recognized)
        .or(non_empty(supplied))
        .unwrap_or("Unknown")
        .to_string()
}

pub fn resolve_email(recognized: Option<&str>, supplied: Option<&str>) -> String {
    non_empty(recognized)
        .or(non_empty(supplied))
        .unwrap_or("")
        .to_string()
}

pub fn resolve_phone(recognized: Option<&str>, supplied: Option<&str>) -> String {
    non_empty(recognized)
        .or(non_empty(supplied))
        .unwrap_or("")
        .to_string()
}

pub fn merge(recognized: &RecognizedFields, supplied: &UserSuppliedFields) -> FinalFields {
    FinalFields {
        name: resolve_name(recognized.name.as_deref(), supplied.name.as_deref()),
        email: resolve_email(recognized.email.as_deref(), supplied.email.as_deref()),
        phone: resolve_phone(recognized.phone.as_deref(), supplied.phone.as_deref()),
    }
}

/// Splits a comma-separated tag field, trimming entries and dropping empty
/// ones. Order is the caller's, duplicates are kept.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_value_wins() {
        assert_eq!(
            resolve_name(Some("Jane Doe"), Some("Manual Entry")),
            "Jane Doe"
        );
        assert_eq!(resolve_email(Some("a@b.com"), Some("c@d.org")), "a@b.com");
        assert_eq!(
            resolve_phone(Some("555-123-4567"), Some("555-987-6543")),
            "555-123-4567"
        );
    }

    #[test]
    fn test_supplied_value_fills_the_gap() {
        assert_eq!(resolve_name(None, Some("Manual Entry")), "Manual Entry");
        assert_eq!(resolve_email(None, Some("c@d.org")), "c@d.org");
        assert_eq!(resolve_phone(None, Some("555-987-6543")), "555-987-6543");
    }

    #[test]
    fn test_fixed_defaults() {
        assert_eq!(resolve_name(None, None), "Unknown");
        assert_eq!(resolve_email(None, None), "");
        assert_eq!(resolve_phone(None, None), "");
    }

    #[test]
    fn test_empty_strings_do_not_count_as_present() {
        assert_eq!(resolve_name(Some(""), Some("")), "Unknown");
        assert_eq!(resolve_name(Some(""), Some("Manual Entry")), "Manual Entry");
        assert_eq!(resolve_email(Some(""), None), "");
    }

    #[test]
    fn test_fields_resolve_independently() {
        let recognized = RecognizedFields {
            name: None,
            email: Some("jane@work.io".into()),
            phone: None,
        };
        let supplied = UserSuppliedFields {
            name: Some("".into()),
            phone: Some("555-123-4567".into()),
            ..Default::default()
        };
        let merged = merge(&recognized, &supplied);
        assert_eq!(merged.name, "Unknown");
        assert_eq!(merged.email, "jane@work.io");
        assert_eq!(merged.phone, "555-123-4567");
    }

    #[test]
    fn test_parse_tags_trims_and_drops_empties() {
        assert_eq!(
            parse_tags("Frontend, , React ,Senior"),
            vec!["Frontend", "React", "Senior"]
        );
    }

    #[test]
    fn test_parse_tags_keeps_order_and_duplicates() {
        assert_eq!(parse_tags("b,a,b"), vec!["b", "a", "b"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }
}
