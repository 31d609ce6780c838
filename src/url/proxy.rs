/// Strips an institutional proxy suffix from the host portion of a link
///
/// Proxied links look like `http://journal.example.org.libezproxy.open.ac.uk/path`;
/// removing the suffix yields the public address that anyone can check.
/// Only the host is touched, and the rest of the href is returned
/// byte-for-byte so the normalized URL still matches what authors wrote.
///
/// Hrefs without a `scheme://host` part (relative paths, `mailto:` and
/// the like) are returned unchanged.
///
/// # Examples
///
/// ```
/// use ouxml_linkcheck::url::strip_proxy_suffix;
///
/// let href = "http://ieeexplore.ieee.org.libezproxy.open.ac.uk/xpl/a.jsp?n=1";
/// assert_eq!(
///     strip_proxy_suffix(href, ".libezproxy.open.ac.uk"),
///     "http://ieeexplore.ieee.org/xpl/a.jsp?n=1"
/// );
/// assert_eq!(strip_proxy_suffix("https://example.com/", ".libezproxy.open.ac.uk"), "https://example.com/");
/// ```
pub fn strip_proxy_suffix(href: &str, suffix: &str) -> String {
    match host_span(href) {
        Some((start, end)) if !suffix.is_empty() => {
            let host = &href[start..end];
            let matches = host.len() > suffix.len()
                && host
                    .to_ascii_lowercase()
                    .ends_with(&suffix.to_ascii_lowercase());

            if matches {
                let cut = end - suffix.len();
                format!("{}{}", &href[..cut], &href[end..])
            } else {
                href.to_string()
            }
        }
        _ => href.to_string(),
    }
}

/// Byte range of the host inside `href`, skipping userinfo and port
fn host_span(href: &str) -> Option<(usize, usize)> {
    let authority_start = href.find("://")? + 3;
    let rest = &href[authority_start..];
    let authority_len = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..authority_len];

    let host_offset = authority.rfind('@').map(|i| i + 1).unwrap_or(0);
    let host_and_port = &authority[host_offset..];

    // Bracketed IPv6 literals never carry a proxy suffix
    if host_and_port.starts_with('[') {
        return None;
    }

    let host_len = host_and_port.find(':').unwrap_or(host_and_port.len());
    if host_len == 0 {
        return None;
    }

    let start = authority_start + host_offset;
    Some((start, start + host_len))
}
