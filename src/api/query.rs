use super::dates::format_date;
use chrono::NaiveDate;

/// Escaped delimiters put back after encoding, in application order.
///
/// `%20 -> +` runs last so it only sees spaces the encoder escaped; a
/// literal `+` in the input was escaped to `%2B` and stays that way.
/// `%25` is never restored, so no step can create a sequence a later
/// step would match.
const RESTORE: &[(&str, &str)] = &[
    ("%21", "!"),
    ("%3A", ":"),
    ("%2F", "/"),
    ("%3F", "?"),
    ("%26", "&"),
    ("%3D", "="),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%7E", "~"),
    ("%20", "+"),
];

/// Appends `from-date` to `template` and encodes the result.
///
/// The whole string is percent-encoded first, then the characters the
/// query-string grammar needs literal are restored.
pub fn build_url(template: &str, start: NaiveDate) -> String {
    let raw = format!("{}&from-date={}", template, format_date(start));
    let encoded = urlencoding::encode(&raw).into_owned();
    RESTORE
        .iter()
        .fold(encoded, |url, (escaped, literal)| url.replace(escaped, literal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june_14() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 14).unwrap()
    }

    #[test]
    fn plain_template_passes_through() {
        let url = build_url("https://example.com/search?section=world", june_14());
        assert_eq!(
            url,
            "https://example.com/search?section=world&from-date=2023-06-14"
        );
    }

    #[test]
    fn allow_listed_characters_stay_literal() {
        let url = build_url("https://h/p?q=(a)!b'c~d", june_14());
        assert_eq!(url, "https://h/p?q=(a)!b'c~d&from-date=2023-06-14");
    }

    #[test]
    fn spaces_become_plus_and_literal_plus_stays_escaped() {
        let url = build_url("https://h/p?q=a b+c", june_14());
        assert_eq!(url, "https://h/p?q=a+b%2Bc&from-date=2023-06-14");
    }

    #[test]
    fn escaped_percent_is_not_restored() {
        // "%21" in the input encodes to "%2521", which must not turn into "%!".
        let url = build_url("https://h/p?q=%21", june_14());
        assert_eq!(url, "https://h/p?q=%2521&from-date=2023-06-14");
    }

    #[test]
    fn other_reserved_characters_remain_escaped() {
        let url = build_url("https://h/p?q=a,b;c@d", june_14());
        assert_eq!(url, "https://h/p?q=a%2Cb%3Bc%40d&from-date=2023-06-14");
    }
}
