use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Contact details heuristically pulled out of the extracted text. Every
/// field is optional; an all-empty result is a valid outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecognizedFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
    // north-american 3-3-4 shape with optional +1 and parenthesized area
    // code; same-shaped numeric ids will match too, that is accepted
    static ref PHONE_RE: Regex =
        Regex::new(r"(\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}").unwrap();
}

const NAME_EXCLUSIONS: [&str; 4] = ["Phone", "Email", "Resume", "CV"];

/// A trimmed line qualifies as a name candidate when it is short enough to
/// be a person's name and carries none of the usual contact-detail markers.
/// The exclusion list is case-sensitive substring matching.
fn looks_like_name(line: &str) -> bool {
    line.len() > 2
        && line.len() < 50
        && !line.contains('@')
        && !line.contains("http")
        && !NAME_EXCLUSIONS.iter().any(|kw| line.contains(kw))
}

fn first_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

fn first_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

/// Resumes conventionally open with the candidate's name, before any of
/// the labelled contact lines; the first qualifying line wins.
fn first_name_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| looks_like_name(line))
        .map(str::to_string)
}

/// Scans the text for email, phone and name candidates. Total function:
/// never fails, each field resolves independently, first match in document
/// order wins.
pub fn recognize(text: &str) -> RecognizedFields {
    RecognizedFields {
        name: first_name_line(text),
        email: first_email(text),
        phone: first_phone(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typical_resume_header() {
        let text = "Jane Doe\nSoftware Engineer\njane.doe@example.com\n(555) 123-4567";
        let fields = recognize(text);
        assert_eq!(fields.name.as_deref(), Some("Jane Doe"));
        assert_eq!(fields.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(fields.phone.as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn test_labelled_lines_are_not_names() {
        let text = "Email: x@y.com\nPhone: 555-1234";
        let fields = recognize(text);
        assert_eq!(fields.name, None);
        assert_eq!(fields.email.as_deref(), Some("x@y.com"));
        // seven digits do not fit the 3-3-4 shape
        assert_eq!(fields.phone, None);
    }

    #[test]
    fn test_first_email_wins() {
        let text = "contact a@b.com or fallback c@d.org";
        assert_eq!(recognize(text).email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_first_phone_wins() {
        let text = "main 555-123-4567, alt 555.987.6543";
        assert_eq!(recognize(text).phone.as_deref(), Some("555-123-4567"));
    }

    #[test]
    fn test_phone_with_country_code() {
        let fields = recognize("reach me at +1 (416) 555-0199 after hours");
        assert_eq!(fields.phone.as_deref(), Some("+1 (416) 555-0199"));
    }

    #[test]
    fn test_empty_text_yields_all_absent() {
        assert_eq!(recognize(""), RecognizedFields::default());
    }

    #[test]
    fn test_overlong_line_yields_no_name_but_keeps_contacts() {
        let line = format!(
            "{} someone@example.com 555-123-4567",
            "x".repeat(60)
        );
        let fields = recognize(&line);
        assert_eq!(fields.name, None);
        assert_eq!(fields.email.as_deref(), Some("someone@example.com"));
        assert_eq!(fields.phone.as_deref(), Some("555-123-4567"));
    }

    #[test]
    fn test_name_skips_urls_and_short_lines() {
        let text = "CV\nhttp://example.com/jane\nJD\nJane Doe";
        assert_eq!(recognize(text).name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_name_exclusions_are_case_sensitive() {
        // lowercase "resume" is not on the exclusion list
        assert_eq!(
            recognize("my resume summary").name.as_deref(),
            Some("my resume summary")
        );
        assert_eq!(recognize("Resume of Jane Doe").name, None);
    }

    #[test]
    fn test_name_is_a_trimmed_line_from_the_input() {
        let text = "   Jane Doe   \nEngineer";
        assert_eq!(recognize(text).name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_recognized_contacts_are_substrings_of_the_input() {
        let text = "Jane Doe\njane@work.io\n(555) 123-4567\nbackup: j@x.dev";
        let fields = recognize(text);
        assert!(text.contains(fields.email.as_deref().unwrap()));
        assert!(text.contains(fields.phone.as_deref().unwrap()));
    }
}
