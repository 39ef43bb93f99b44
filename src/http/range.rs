//! HTTP Range request parsing module
//!
//! Single byte-range parsing (RFC 7233) for static file responses.

/// Inclusive byte span resolved against a known body length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub const fn byte_count(self) -> usize {
        self.end - self.start + 1
    }
}

/// What to send for a given `Range` header
#[derive(Debug, PartialEq, Eq)]
pub enum RangeOutcome {
    /// No usable Range header: send the whole body
    Full,
    /// Send this span with 206
    Partial(ByteRange),
    /// Range cannot be satisfied: send 416
    Unsatisfiable,
}

/// Resolve a `Range` header against a body of `len` bytes
///
/// Accepts `bytes=start-end`, `bytes=start-` and `bytes=-suffix`. Other units,
/// multi-range requests and malformed values fall back to the full body.
pub fn resolve_range(range_header: Option<&str>, len: usize) -> RangeOutcome {
    let Some(spec) = range_header.and_then(|h| h.trim().strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };

    if spec.contains(',') {
        return RangeOutcome::Full;
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        return resolve_suffix(end_str, len);
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start >= len {
        return RangeOutcome::Unsatisfiable;
    }

    let last = len - 1;
    let end = if end_str.is_empty() {
        last
    } else {
        match end_str.parse::<usize>() {
            Ok(end) => end.min(last),
            Err(_) => return RangeOutcome::Full,
        }
    };

    if start > end {
        return RangeOutcome::Unsatisfiable;
    }
    RangeOutcome::Partial(ByteRange { start, end })
}

/// Suffix range ("-500" is the last 500 bytes)
fn resolve_suffix(suffix_str: &str, len: usize) -> RangeOutcome {
    let Ok(suffix) = suffix_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if suffix == 0 || len == 0 {
        return RangeOutcome::Unsatisfiable;
    }
    RangeOutcome::Partial(ByteRange {
        start: len.saturating_sub(suffix),
        end: len - 1,
    })
}
