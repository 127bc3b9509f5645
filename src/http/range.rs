//! HTTP Range request parsing module
//!
//! Single-range `bytes=` parsing per RFC 7233. Multi-range requests and
//! non-byte units are ignored and answered with the full representation.

/// A byte range resolved against a known asset size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    /// Inclusive end position; None means to the last byte
    pub end: Option<usize>,
}

impl ByteRange {
    /// Inclusive end position for an asset of `total` bytes
    #[inline]
    pub fn end_position(&self, total: usize) -> usize {
        self.end.unwrap_or_else(|| total.saturating_sub(1))
    }
}

/// Outcome of parsing a Range header
#[derive(Debug)]
pub enum RangeOutcome {
    /// Serve 206 with this range
    Satisfiable(ByteRange),
    /// Serve 416
    Unsatisfiable,
    /// No header, or a form we ignore; serve the full asset
    Ignored,
}

/// Parse a Range header against an asset of `total` bytes.
///
/// Supported forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
pub fn parse_range_header(range_header: Option<&str>, total: usize) -> RangeOutcome {
    let Some(header) = range_header else {
        return RangeOutcome::Ignored;
    };

    let Some(range_value) = header.strip_prefix("bytes=") else {
        return RangeOutcome::Ignored;
    };

    // Single range only
    if range_value.contains(',') {
        return RangeOutcome::Ignored;
    }

    let Some((start_str, end_str)) = range_value.split_once('-') else {
        return RangeOutcome::Ignored;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        return parse_suffix(end_str, total);
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Ignored;
    };
    if start >= total {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        None
    } else {
        let Ok(e) = end_str.parse::<usize>() else {
            return RangeOutcome::Ignored;
        };
        Some(e.min(total - 1))
    };

    if let Some(e) = end {
        if start > e {
            return RangeOutcome::Unsatisfiable;
        }
    }

    RangeOutcome::Satisfiable(ByteRange { start, end })
}

/// `bytes=-N`: the last N bytes of the asset
fn parse_suffix(suffix_str: &str, total: usize) -> RangeOutcome {
    let Ok(suffix) = suffix_str.parse::<usize>() else {
        return RangeOutcome::Ignored;
    };

    if suffix == 0 {
        return RangeOutcome::Unsatisfiable;
    }

    // A suffix longer than the asset is just the whole asset
    let start = total.saturating_sub(suffix);
    RangeOutcome::Satisfiable(ByteRange {
        start,
        end: Some(total - 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_header_is_ignored() {
        assert!(matches!(parse_range_header(None, 100), RangeOutcome::Ignored));
    }

    #[test]
    fn fixed_range() {
        match parse_range_header(Some("bytes=0-9"), 100) {
            RangeOutcome::Satisfiable(r) => {
                assert_eq!(r.start, 0);
                assert_eq!(r.end, Some(9));
                assert_eq!(r.end_position(100), 9);
            }
            _ => panic!("expected Satisfiable"),
        }
    }

    #[test]
    fn open_range_runs_to_last_byte() {
        match parse_range_header(Some("bytes=50-"), 100) {
            RangeOutcome::Satisfiable(r) => {
                assert_eq!(r.start, 50);
                assert_eq!(r.end, None);
                assert_eq!(r.end_position(100), 99);
            }
            _ => panic!("expected Satisfiable"),
        }
    }

    #[test]
    fn suffix_range() {
        match parse_range_header(Some("bytes=-20"), 100) {
            RangeOutcome::Satisfiable(r) => {
                assert_eq!(r.start, 80);
                assert_eq!(r.end, Some(99));
            }
            _ => panic!("expected Satisfiable"),
        }
    }

    #[test]
    fn oversized_suffix_is_the_whole_asset() {
        match parse_range_header(Some("bytes=-500"), 100) {
            RangeOutcome::Satisfiable(r) => {
                assert_eq!(r.start, 0);
                assert_eq!(r.end, Some(99));
            }
            _ => panic!("expected Satisfiable"),
        }
    }

    #[test]
    fn start_past_end_is_unsatisfiable() {
        assert!(matches!(
            parse_range_header(Some("bytes=200-"), 100),
            RangeOutcome::Unsatisfiable
        ));
        assert!(matches!(
            parse_range_header(Some("bytes=50-10"), 100),
            RangeOutcome::Unsatisfiable
        ));
    }

    #[test]
    fn malformed_and_multi_ranges_are_ignored() {
        assert!(matches!(
            parse_range_header(Some("bytes=a-b"), 100),
            RangeOutcome::Ignored
        ));
        assert!(matches!(
            parse_range_header(Some("bytes=0-9,20-29"), 100),
            RangeOutcome::Ignored
        ));
        assert!(matches!(
            parse_range_header(Some("items=0-9"), 100),
            RangeOutcome::Ignored
        ));
    }
}
