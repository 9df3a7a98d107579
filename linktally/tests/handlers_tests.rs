use linktally::ensure_scheme;

#[test]
fn urls_with_a_scheme_pass_through_unchanged() {
    assert_eq!(
        ensure_scheme("https://example.com/docs"),
        Some("https://example.com/docs".to_string())
    );
    assert_eq!(
        ensure_scheme("http://example.com"),
        Some("http://example.com".to_string())
    );
}

#[test]
fn bare_hostnames_get_an_https_prefix() {
    assert_eq!(
        ensure_scheme("example.com"),
        Some("https://example.com".to_string())
    );
    assert_eq!(
        ensure_scheme("example.com/path/page"),
        Some("https://example.com/path/page".to_string())
    );
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    assert_eq!(
        ensure_scheme("  example.com  "),
        Some("https://example.com".to_string())
    );
}

#[test]
fn garbage_input_is_rejected() {
    assert_eq!(ensure_scheme("not a valid url!!!"), None);
}

#[test]
fn empty_and_blank_input_is_rejected() {
    assert_eq!(ensure_scheme(""), None);
    assert_eq!(ensure_scheme("   "), None);
}
