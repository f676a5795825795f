//! Domain name normalization and list-line cleanup

/// Prefix removed from every domain before it is stored or compared
pub const WWW_PREFIX: &str = "www.";

/// Strip a leading `www.` label.
///
/// The comparison is case-sensitive and nothing else is touched: no case
/// folding, no trailing-dot removal, no IDN handling.
///
/// ```
/// assert_eq!(dgate_core::normalize("www.example.org"), "example.org");
/// assert_eq!(dgate_core::normalize("WWW.example.org"), "WWW.example.org");
/// ```
pub fn normalize(domain: &str) -> &str {
    domain.strip_prefix(WWW_PREFIX).unwrap_or(domain)
}

/// Reduce one raw list-file line to the token worth inserting.
///
/// Works on raw bytes so a skipped line never has to be valid UTF-8.
/// Returns `None` for blank lines and `#` comments. Only spaces and tabs
/// count as padding.
pub fn clean_line(line: &[u8]) -> Option<&[u8]> {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    let start = line.iter().position(|&b| !is_blank(b))?;
    let token = &line[start..];
    if token[0] == b'#' {
        return None;
    }
    let end = token.iter().rposition(|&b| !is_blank(b)).map_or(0, |i| i + 1);
    Some(&token[..end])
}

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_www() {
        assert_eq!(normalize("www.gentoo.org"), "gentoo.org");
        assert_eq!(normalize("gentoo.org"), "gentoo.org");
        assert_eq!(normalize("www."), "");
    }

    #[test]
    fn test_normalize_only_once() {
        assert_eq!(normalize("www.www.example.org"), "www.example.org");
    }

    #[test]
    fn test_normalize_leaves_other_labels() {
        assert_eq!(normalize("wwwexample.org"), "wwwexample.org");
        assert_eq!(normalize("mail.www.example.org"), "mail.www.example.org");
        assert_eq!(normalize("Www.example.org"), "Www.example.org");
    }

    #[test]
    fn test_clean_line() {
        assert_eq!(clean_line(b"  example.org  \n"), Some(&b"example.org"[..]));
        assert_eq!(clean_line(b"\texample.org\t"), Some(&b"example.org"[..]));
        assert_eq!(clean_line(b"example.org"), Some(&b"example.org"[..]));
    }

    #[test]
    fn test_clean_line_skips() {
        assert_eq!(clean_line(b"\n"), None);
        assert_eq!(clean_line(b" \t \n"), None);
        assert_eq!(clean_line(b"# comment\n"), None);
        assert_eq!(clean_line(b"   # indented comment"), None);
        assert_eq!(clean_line(b"# caf\xe9 \xff\n"), None);
    }

    #[test]
    fn test_clean_line_keeps_inner_text() {
        // Only leading '#' marks a comment
        assert_eq!(clean_line(b"example.org # note"), Some(&b"example.org # note"[..]));
        // Carriage returns are not padding
        assert_eq!(clean_line(b"example.org\r\n"), Some(&b"example.org\r"[..]));
    }
}
