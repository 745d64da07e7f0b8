use std::fmt;

use regex::Regex;

/// Compiled redaction patterns, checked at build time.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    pub fn email() -> &'static Regex {
        lazy_regex::regex!(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b")
    }

    /// Korean mobile / landline numbers, with or without dashes.
    pub fn phone() -> &'static Regex {
        lazy_regex::regex!(r"\b0\d{1,2}-?\d{3,4}-?\d{4}\b")
    }

    /// UUIDs (user ids, auth subjects).
    pub fn uuid() -> &'static Regex {
        lazy_regex::regex!(r"\b[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\b")
    }

    /// Bearer tokens and other opaque base64-ish runs.
    pub fn opaque_token() -> &'static Regex {
        lazy_regex::regex!(r"\b[A-Za-z0-9+/_.-]{24,}={0,2}")
    }

    /// Ten or more consecutive digits (account and registration numbers).
    pub fn long_digits() -> &'static Regex {
        lazy_regex::regex!(r"\b\d{10,}\b")
    }
}

/// Mask PII in free text.
///
/// Emails keep their first character and domain. Phone numbers, UUIDs,
/// opaque tokens and long digit runs are replaced outright. Emails go first
/// so their local parts are not mistaken for tokens.
pub fn redact(input: &str) -> String {
    let out = PiiRegexRegistry::email().replace_all(input, |caps: &regex::Captures| {
        let full = &caps[0];
        match full.split_once('@') {
            Some((local, domain)) => match local.chars().next() {
                Some(first) => format!("{first}***@{domain}"),
                None => format!("@{domain}"),
            },
            None => full.to_string(),
        }
    });
    let out = PiiRegexRegistry::uuid().replace_all(&out, "[REDACTED_ID]");
    let out = PiiRegexRegistry::phone().replace_all(&out, "[REDACTED_PHONE]");
    let out = PiiRegexRegistry::long_digits().replace_all(&out, "[REDACTED_NUMBER]");
    PiiRegexRegistry::opaque_token()
        .replace_all(&out, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Display wrapper that redacts on format.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_emails() {
        assert_eq!(redact("kim@grigo.co.kr"), "k***@grigo.co.kr");
        assert_eq!(
            redact("from a@b.com to c@d.org"),
            "from a***@b.com to c***@d.org"
        );
    }

    #[test]
    fn masks_phone_numbers() {
        assert_eq!(redact("연락처 010-1234-5678"), "연락처 [REDACTED_PHONE]");
        assert_eq!(redact("02-123-4567"), "[REDACTED_PHONE]");
    }

    #[test]
    fn masks_uuids() {
        assert_eq!(
            redact("user 1b4e28ba-2fa1-11d2-883f-0016d3cca427 failed"),
            "user [REDACTED_ID] failed"
        );
    }

    #[test]
    fn masks_tokens_and_long_digit_runs() {
        assert_eq!(
            redact("Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"),
            "Bearer [REDACTED_TOKEN]"
        );
        assert_eq!(redact("계좌 110234567890"), "계좌 [REDACTED_NUMBER]");
    }

    #[test]
    fn leaves_ordinary_text_alone() {
        assert_eq!(redact("출근 기록 3건 처리"), "출근 기록 3건 처리");
        assert_eq!(redact("2025-03-04"), "2025-03-04");
        assert_eq!(redact(""), "");
    }

    #[test]
    fn wrapper_redacts_display_and_debug() {
        let r = Redacted("admin@grigo.test");
        assert_eq!(format!("{r}"), "a***@grigo.test");
        assert_eq!(format!("{r:?}"), "a***@grigo.test");
    }
}
