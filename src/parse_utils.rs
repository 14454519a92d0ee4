pub fn trim_ascii_whitespace(b: &[u8]) -> Option<&[u8]> {
    let start = b.iter().position(|&c| !c.is_ascii_whitespace())?;
    let end = b.iter().rposition(|&c| !c.is_ascii_whitespace())?;
    Some(&b[start..=end])
}

/// The identifier in a FASTA header: its first whitespace-delimited token.
pub fn header_id(header: &[u8]) -> &[u8] {
    let header = header.strip_prefix(b">").unwrap_or(header);
    header
        .split(|c| c.is_ascii_whitespace())
        .find(|t| !t.is_empty())
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim() {
        assert_eq!(trim_ascii_whitespace(b"  ACGT\r\n"), Some(&b"ACGT"[..]));
        assert_eq!(trim_ascii_whitespace(b" \t "), None);
        assert_eq!(trim_ascii_whitespace(b""), None);
    }

    #[test]
    fn test_header_id() {
        assert_eq!(header_id(b"INSR chr19:7150261-7150808"), b"INSR");
        assert_eq!(header_id(b">MBNL  extra"), b"MBNL");
        assert_eq!(header_id(b"  CLASP1"), b"CLASP1");
        assert_eq!(header_id(b""), b"");
        assert_eq!(header_id(b"   "), b"");
    }
}
