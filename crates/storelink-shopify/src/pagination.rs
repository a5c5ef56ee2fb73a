//! Cursor extraction for `Link`-header pagination.
//!
//! The admin API carries pagination state in the `Link` response header; each
//! directive holds a URL whose `page_info` query parameter is the cursor.
//!
//! Single next link:
//! ```text
//! <https://shop.example/admin/api/2023-10/products.json?limit=250&page_info=CURSOR>; rel="next"
//! ```
//!
//! Combined previous and next:
//! ```text
//! <...page_info=PREV>; rel="previous", <...page_info=NEXT>; rel="next"
//! ```

/// Parses a `Link` header value and extracts the `page_info` cursor for the
/// next page.
///
/// Returns `None` if:
/// - `link_header` is `None` (no header was present),
/// - there is no `rel="next"` segment (last page reached),
/// - the URL in the next segment has no `page_info` query parameter.
#[must_use]
pub fn extract_next_cursor(link_header: Option<&str>) -> Option<String> {
    let header = link_header?;

    // Directives are comma-separated; each looks like `<URL>; rel="next"`.
    for segment in header.split(',') {
        let segment = segment.trim();

        if !segment.contains(r#"rel="next""#) {
            continue;
        }

        let url = extract_angle_bracket_url(segment)?;
        return extract_query_param(url, "page_info");
    }

    None
}

/// Extracts the URL between `<` and `>` in a link directive segment.
fn extract_angle_bracket_url(segment: &str) -> Option<&str> {
    let start = segment.find('<')? + 1;
    let end = segment.find('>')?;
    if start >= end {
        return None;
    }
    Some(&segment[start..end])
}

/// Extracts the value of a named query parameter from a URL string.
///
/// No percent-decoding: admin-API cursors are base64url-encoded and contain
/// no characters that require it.
fn extract_query_param(url: &str, param: &str) -> Option<String> {
    let query_start = url.find('?')? + 1;
    let query = &url[query_start..];

    let needle = format!("{param}=");
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix(needle.as_str()) {
            let value = value.split('#').next().unwrap_or(value);
            if !value.is_empty() {
                return Some(value.to_owned());
            }
        }
    }
    None
}
