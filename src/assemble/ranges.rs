//! Page range specifications for range splits.
//!
//! A [`PageRanges`] value is an ordered list of inclusive 1-based spans.
//! Order is significant (it determines output numbering), spans may
//! overlap or leave gaps, and no exhaustiveness is required.

use anyhow::{Context, Result, bail};

/// Ordered inclusive page spans, 1-based.
///
/// Supports parsing from a compact string form:
/// - `"3"` - single page
/// - `"1-5"` - inclusive range
/// - `"1-3,7,9-12"` - several spans in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRanges {
    spans: Vec<(u32, u32)>,
}

impl PageRanges {
    /// Build from explicit `(start, end)` spans.
    ///
    /// Spans are taken as given; clipping to the document happens at
    /// split time, so out-of-range spans are representable.
    pub fn new(spans: Vec<(u32, u32)>) -> Self {
        Self { spans }
    }

    /// Parse a range string like `"1-3,7,9-12"`.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed parts, page number zero, or an
    /// inverted range (`"5-3"`).
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfshelf::assemble::PageRanges;
    ///
    /// let ranges = PageRanges::parse("1-3,7").unwrap();
    /// assert_eq!(ranges.spans(), &[(1, 3), (7, 7)]);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let mut spans = Vec::new();

        for part in s.split(',') {
            let part = part.trim();

            if let Some((start, end)) = part.split_once('-') {
                let start: u32 = start
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid page number: {start}"))?;
                let end: u32 = end
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid page number: {end}"))?;

                if start == 0 || end == 0 {
                    bail!("Page numbers must be positive (1-indexed)");
                }
                if start > end {
                    bail!("Invalid range {start}-{end}: start page must not exceed end page");
                }

                spans.push((start, end));
            } else {
                let page: u32 = part
                    .parse()
                    .with_context(|| format!("Invalid page number: {part}"))?;
                if page == 0 {
                    bail!("Page numbers must be positive (1-indexed)");
                }
                spans.push((page, page));
            }
        }

        if spans.is_empty() {
            bail!("Page range cannot be empty");
        }

        Ok(Self { spans })
    }

    /// The spans in caller order.
    pub fn spans(&self) -> &[(u32, u32)] {
        &self.spans
    }

    /// Number of spans.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether there are no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
