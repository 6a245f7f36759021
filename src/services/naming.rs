//! Copy naming for duplicated records
//!
//! A duplicate of "Spring" is named "Spring (Copy)"; further duplicates
//! continue from the highest existing copy number: "Spring (Copy 2)",
//! "Spring (Copy 3)", ... Duplicating a copy counts from its base name.
//!
//! Contact emails follow the same scheme inside the local part:
//! "ada@example.com" becomes "ada.copy@example.com", then
//! "ada.copy2@example.com" and so on.

use regex::Regex;
use std::sync::LazyLock;

/// Regex to match a trailing copy suffix
static COPY_SUFFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" \(Copy( \d+)?\)$").unwrap()
});

/// Regex to match a copy marker right before the domain of an email
static EMAIL_COPY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.copy(\d+)?@").unwrap()
});

/// Strip a trailing " (Copy)" or " (Copy N)" suffix
pub fn base_name(name: &str) -> &str {
    match COPY_SUFFIX_REGEX.find(name) {
        Some(m) => &name[..m.start()],
        None => name,
    }
}

/// Copy number of `name` relative to `base`, if it is a copy of it
///
/// A bare "(Copy)" counts as copy 1.
fn copy_number(re: &Regex, candidate: &str) -> Option<u64> {
    let captures = re.captures(candidate)?;
    match captures.get(1) {
        Some(n) => n.as_str().parse().ok(),
        None => Some(1),
    }
}

/// Number for the next copy, `None` when there is no copy yet
fn next_copy_number<'a>(re: &Regex, existing: impl IntoIterator<Item = &'a str>) -> Option<u64> {
    existing
        .into_iter()
        .filter_map(|candidate| copy_number(re, candidate))
        .max()
        .map(|n| n.saturating_add(1))
}

/// Name for a new duplicate of `name`, given every existing name
pub fn next_copy_name<'a>(name: &str, existing: impl IntoIterator<Item = &'a str>) -> String {
    let base = base_name(name);
    let pattern = format!(r"^{} \(Copy(?: (\d+))?\)$", regex::escape(base));
    let next = Regex::new(&pattern)
        .ok()
        .and_then(|re| next_copy_number(&re, existing));

    match next {
        Some(n) => format!("{} (Copy {})", base, n),
        None => format!("{} (Copy)", base),
    }
}

/// Email for a new duplicate of the contact at `email`, given every existing email
pub fn next_copy_email<'a>(email: &str, existing: impl IntoIterator<Item = &'a str>) -> String {
    let base = EMAIL_COPY_REGEX.replace(email, "@");
    let (local, domain) = match base.split_once('@') {
        Some((local, domain)) => (local, format!("@{}", domain)),
        None => (&*base, String::new()),
    };

    let pattern = format!(
        r"^{}\.copy(\d+)?{}$",
        regex::escape(local),
        regex::escape(&domain)
    );
    let next = Regex::new(&pattern)
        .ok()
        .and_then(|re| next_copy_number(&re, existing));

    match next {
        Some(n) => format!("{}.copy{}{}", local, n, domain),
        None => format!("{}.copy{}", local, domain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("Spring"), "Spring");
        assert_eq!(base_name("Spring (Copy)"), "Spring");
        assert_eq!(base_name("Spring (Copy 12)"), "Spring");
        assert_eq!(base_name("Spring (Copy) launch"), "Spring (Copy) launch");
    }

    #[test]
    fn test_first_copy() {
        assert_eq!(next_copy_name("Spring", ["Spring"]), "Spring (Copy)");
    }

    #[test]
    fn test_second_copy() {
        assert_eq!(
            next_copy_name("Spring", ["Spring", "Spring (Copy)"]),
            "Spring (Copy 2)"
        );
    }

    #[test]
    fn test_copy_of_copy_continues_from_highest() {
        let existing = ["A", "A (Copy)", "A (Copy 2)", "A (Copy 3)"];
        assert_eq!(next_copy_name("A (Copy 3)", existing), "A (Copy 4)");
        assert_eq!(next_copy_name("A (Copy)", existing), "A (Copy 4)");
    }

    #[test]
    fn test_gaps_use_highest_number() {
        let existing = ["A", "A (Copy 5)"];
        assert_eq!(next_copy_name("A", existing), "A (Copy 6)");
    }

    #[test]
    fn test_other_records_are_ignored() {
        let existing = ["AB (Copy 4)", "A (Copy) B", "Spring (Copy 9)"];
        assert_eq!(next_copy_name("A", existing), "A (Copy)");
    }

    #[test]
    fn test_huge_copy_number_does_not_overflow() {
        let existing = ["A", "A (Copy 4294967295)"];
        assert_eq!(next_copy_name("A", existing), "A (Copy 4294967296)");

        let existing = ["A", "A (Copy 18446744073709551615)"];
        assert_eq!(
            next_copy_name("A", existing),
            "A (Copy 18446744073709551615)"
        );
    }

    #[test]
    fn test_copy_email() {
        let existing = ["ada@example.com"];
        assert_eq!(next_copy_email("ada@example.com", existing), "ada.copy@example.com");

        let existing = ["ada@example.com", "ada.copy@example.com", "ada.copy3@example.com"];
        assert_eq!(next_copy_email("ada@example.com", existing), "ada.copy4@example.com");
        assert_eq!(next_copy_email("ada.copy3@example.com", existing), "ada.copy4@example.com");
    }

    #[test]
    fn test_copy_email_ignores_other_domains_and_locals() {
        let existing = ["ada.copy5@other.com", "adam.copy2@example.com", "ada.copy@example.com"];
        assert_eq!(next_copy_email("ada@example.com", existing), "ada.copy2@example.com");
        assert_eq!(next_copy_email("not-an-email", ["not-an-email"]), "not-an-email.copy");
    }

    #[test]
    fn test_regex_characters_in_name() {
        let existing = ["Q1 [draft] (Copy)"];
        assert_eq!(
            next_copy_name("Q1 [draft]", existing),
            "Q1 [draft] (Copy 2)"
        );
    }
}
