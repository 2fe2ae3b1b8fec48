//! Line annotation
//!
//! Parses the highlight-range mini-language (`"5"`, `"6-10"`,
//! `"16-24,32-60"`) and splits a token forest into per-line records.
//!
//! Grammar of a highlight spec:
//!
//! ```text
//! spec  = "" | item ("," item)*
//! item  = int | int "-" int
//! ```
//!
//! Whitespace around items and around `-` is ignored. Line numbers are
//! 1-based; a range's start must not exceed its end.

use std::fmt;
use std::ops::{Range, RangeInclusive};
use std::str::FromStr;

use thiserror::Error;

use crate::syntax::Token;

/// Why a highlight-spec item was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidItem {
    #[error("is empty")]
    Empty,

    #[error("is not a line number or range")]
    NotANumber,

    #[error("names line 0, but lines start at 1")]
    Zero,

    #[error("starts after it ends")]
    Reversed,

    #[error("is too large")]
    TooLarge,
}

/// A malformed highlight spec, reported with the full spec text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid highlight lines \"{spec}\": item \"{item}\" {reason}")]
pub struct HighlightSpecError {
    /// Highlight lines exactly as written
    pub spec: String,
    /// The offending item, trimmed
    pub item: String,
    /// What is wrong with it
    pub reason: InvalidItem,
}

/// Set of 1-based line numbers requested for emphasis
///
/// Stored as sorted, non-overlapping, non-adjacent inclusive ranges, so
/// two specs naming the same lines compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSpec {
    ranges: Vec<RangeInclusive<usize>>,
}

impl HighlightSpec {
    /// The empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ranges (start ≤ end, start ≥ 1), merging overlaps
    fn from_ranges(mut ranges: Vec<RangeInclusive<usize>>) -> Self {
        ranges.sort_by_key(|r| *r.start());
        let mut merged: Vec<RangeInclusive<usize>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if *range.start() <= last.end().saturating_add(1) => {
                    if range.end() > last.end() {
                        *last = *last.start()..=*range.end();
                    }
                }
                _ => merged.push(range),
            }
        }
        Self { ranges: merged }
    }

    /// Check if a line is emphasized
    pub fn contains(&self, line: usize) -> bool {
        self.ranges
            .binary_search_by(|r| {
                if *r.end() < line {
                    std::cmp::Ordering::Less
                } else if *r.start() > line {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Check if no line is emphasized
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Emphasized line numbers in ascending order
    pub fn lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.ranges.iter().flat_map(|r| r.clone())
    }

    /// The merged ranges
    pub fn ranges(&self) -> &[RangeInclusive<usize>] {
        &self.ranges
    }
}

impl FromStr for HighlightSpec {
    type Err = HighlightSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_highlight_spec(s)
    }
}

impl fmt::Display for HighlightSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if range.start() == range.end() {
                write!(f, "{}", range.start())?;
            } else {
                write!(f, "{}-{}", range.start(), range.end())?;
            }
        }
        Ok(())
    }
}

/// Parse a highlight spec such as `"1,4-6"`
///
/// One surrounding `{...}` pair, as written in code-fence meta such as
/// `{4-7}`, is accepted and stripped. Empty or blank specs give the empty
/// set. Any malformed item fails the whole spec; nothing is guessed.
pub fn parse_highlight_spec(spec: &str) -> Result<HighlightSpec, HighlightSpecError> {
    let trimmed = spec.trim();
    let body = trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(trimmed);
    if body.trim().is_empty() {
        return Ok(HighlightSpec::new());
    }

    let mut ranges = Vec::new();
    for item in body.split(',') {
        let item = item.trim();
        let fail = |reason| HighlightSpecError {
            spec: spec.to_string(),
            item: item.to_string(),
            reason,
        };

        let range = match item.split_once('-') {
            Some((start, end)) => {
                let start = parse_line(start.trim()).map_err(fail)?;
                let end = parse_line(end.trim()).map_err(fail)?;
                if start > end {
                    return Err(fail(InvalidItem::Reversed));
                }
                start..=end
            }
            None => {
                let line = parse_line(item).map_err(fail)?;
                line..=line
            }
        };
        ranges.push(range);
    }

    Ok(HighlightSpec::from_ranges(ranges))
}

fn parse_line(s: &str) -> Result<usize, InvalidItem> {
    if s.is_empty() {
        return Err(InvalidItem::Empty);
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidItem::NotANumber);
    }
    match s.parse::<usize>() {
        Ok(0) => Err(InvalidItem::Zero),
        Ok(n) => Ok(n),
        Err(_) => Err(InvalidItem::TooLarge),
    }
}

/// Diff decoration for a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffMarker {
    /// Line starts with `+`
    Inserted,
    /// Line starts with `-`
    Deleted,
}

impl DiffMarker {
    /// Marker for a line's text, if any
    pub fn for_line(text: &str) -> Option<Self> {
        match text.as_bytes().first() {
            Some(b'+') => Some(DiffMarker::Inserted),
            Some(b'-') => Some(DiffMarker::Deleted),
            _ => None,
        }
    }

    /// Class attached to the line container
    pub fn markup_class(&self) -> &'static str {
        match self {
            DiffMarker::Inserted => "inserted",
            DiffMarker::Deleted => "deleted",
        }
    }
}

/// One source line: its tokens, emphasis, and diff marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord<'a> {
    /// 1-based line number
    pub number: usize,
    /// Token forest restricted to this line, including its line feed
    pub tokens: Vec<Token<'a>>,
    /// Whether the line number is in the highlight spec
    pub emphasized: bool,
    /// Diff decoration, when enabled
    pub diff: Option<DiffMarker>,
}

impl LineRecord<'_> {
    /// Text of the line, including its line feed
    pub fn text(&self) -> String {
        crate::syntax::leaf_text(&self.tokens)
    }
}

/// Split a token forest into lines and flag emphasized ones
pub fn annotate<'a>(tokens: &[Token<'a>], spec: &HighlightSpec) -> Vec<LineRecord<'a>> {
    annotate_with_diff(tokens, spec, false)
}

/// Like [`annotate`], additionally setting diff markers when `diff` is on
pub fn annotate_with_diff<'a>(tokens: &[Token<'a>], spec: &HighlightSpec, diff: bool) -> Vec<LineRecord<'a>> {
    // Offsets of top-level tokens
    let mut starts = Vec::with_capacity(tokens.len());
    let mut total = 0;
    for token in tokens {
        starts.push(total);
        total += token.text.len();
    }

    let mut records = Vec::new();
    let mut first = 0;
    for (idx, range) in line_ranges(tokens, total).into_iter().enumerate() {
        // Skip tokens that end before this line
        while first < tokens.len() && starts[first] + tokens[first].text.len() <= range.start {
            first += 1;
        }

        let mut line_tokens = Vec::new();
        slice_forest(&tokens[first..], starts.get(first).copied().unwrap_or(total), &range, &mut line_tokens);

        let number = idx + 1;
        let diff = if diff {
            line_tokens
                .first()
                .and_then(|t| DiffMarker::for_line(t.text))
        } else {
            None
        };
        records.push(LineRecord {
            number,
            tokens: line_tokens,
            emphasized: spec.contains(number),
            diff,
        });
    }
    records
}

/// Byte ranges of lines, found by walking leaves for line feeds
///
/// Each range includes its terminating line feed. A trailing line feed
/// does not open an extra empty line.
fn line_ranges(tokens: &[Token<'_>], total: usize) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut line_start = 0;
    let mut offset = 0;
    for leaf in crate::syntax::leaves(tokens) {
        for (i, b) in leaf.text.bytes().enumerate() {
            if b == b'\n' {
                let end = offset + i + 1;
                ranges.push(line_start..end);
                line_start = end;
            }
        }
        offset += leaf.text.len();
    }
    if line_start < total {
        ranges.push(line_start..total);
    }
    ranges
}

/// Copy the part of `tokens` (starting at byte `offset`) inside `range`
fn slice_forest<'a>(tokens: &[Token<'a>], mut offset: usize, range: &Range<usize>, out: &mut Vec<Token<'a>>) {
    for token in tokens {
        let start = offset;
        let end = offset + token.text.len();
        offset = end;

        if end <= range.start {
            continue;
        }
        if start >= range.end {
            break;
        }

        let lo = range.start.max(start);
        let hi = range.end.min(end);
        let mut children = Vec::new();
        if !token.is_leaf() {
            slice_forest(&token.children, start, range, &mut children);
        }
        out.push(Token::with_children(token.category, &token.text[lo - start..hi - start], children));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{leaf_text, Category, GrammarRegistry};

    fn lines(spec: &str) -> Vec<usize> {
        parse_highlight_spec(spec).unwrap().lines().collect()
    }

    #[test]
    fn test_parse_single_line() {
        assert_eq!(lines("5"), vec![5]);
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(lines("6-10"), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_parse_whitespace_and_merging() {
        assert_eq!(lines(" 3 , 1 - 2,2 "), vec![1, 2, 3]);
        assert_eq!(parse_highlight_spec("1-3,2-5").unwrap().ranges(), &[1..=5]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_highlight_spec("").unwrap().is_empty());
        assert!(parse_highlight_spec("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_braced() {
        assert_eq!(lines("{4-7}"), vec![4, 5, 6, 7]);
        assert_eq!(lines("{9,22}"), vec![9, 22]);
        assert_eq!(lines(" { 9-11, 18-19 } "), vec![9, 10, 11, 18, 19]);
        assert!(parse_highlight_spec("{}").unwrap().is_empty());

        let err = parse_highlight_spec("{4-7").unwrap_err();
        assert_eq!(err.spec, "{4-7");
        assert_eq!(err.reason, InvalidItem::NotANumber);
        assert!(parse_highlight_spec("{}x").is_err());
        assert!(parse_highlight_spec("4-7}").is_err());
        assert!(parse_highlight_spec("{{4}}").is_err());
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_highlight_spec("1,10-3").unwrap_err();
        assert_eq!(err.spec, "1,10-3");
        assert_eq!(err.item, "10-3");
        assert_eq!(err.reason, InvalidItem::Reversed);

        assert_eq!(parse_highlight_spec("abc").unwrap_err().reason, InvalidItem::NotANumber);
        assert_eq!(parse_highlight_spec("0").unwrap_err().reason, InvalidItem::Zero);
        assert_eq!(parse_highlight_spec("1,,2").unwrap_err().reason, InvalidItem::Empty);
        assert_eq!(parse_highlight_spec("1,").unwrap_err().reason, InvalidItem::Empty);
        assert_eq!(parse_highlight_spec("-4").unwrap_err().reason, InvalidItem::Empty);
        assert_eq!(parse_highlight_spec("+4").unwrap_err().reason, InvalidItem::NotANumber);
        assert_eq!(parse_highlight_spec("1-2-3").unwrap_err().reason, InvalidItem::NotANumber);
        assert_eq!(
            parse_highlight_spec("99999999999999999999999").unwrap_err().reason,
            InvalidItem::TooLarge
        );
    }

    #[test]
    fn test_error_message_names_spec() {
        let err = parse_highlight_spec("4-x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid highlight lines \"4-x\": item \"4-x\" is not a line number or range"
        );
    }

    #[test]
    fn test_huge_range_is_cheap() {
        let spec = parse_highlight_spec("1-18446744073709551615").unwrap();
        assert!(spec.contains(1));
        assert!(spec.contains(usize::MAX));
    }

    #[test]
    fn test_contains() {
        let spec: HighlightSpec = "2,5-7".parse().unwrap();
        assert!(!spec.contains(1));
        assert!(spec.contains(2));
        assert!(!spec.contains(4));
        assert!(spec.contains(6));
        assert!(!spec.contains(8));
    }

    #[test]
    fn test_display() {
        let spec: HighlightSpec = "7, 1-3,2".parse().unwrap();
        assert_eq!(spec.to_string(), "1-3,7");
    }

    #[test]
    fn test_annotate_splits_lines() {
        let registry = GrammarRegistry::with_builtins();
        let source = "int a;\nint b;\n";
        let tokens = registry.tokenize(source, "c");
        let spec = parse_highlight_spec("2").unwrap();

        let records = annotate(&tokens, &spec);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].number, 1);
        assert_eq!(records[0].text(), "int a;\n");
        assert!(!records[0].emphasized);
        assert_eq!(records[1].text(), "int b;\n");
        assert!(records[1].emphasized);
    }

    #[test]
    fn test_annotate_splits_multiline_token() {
        let registry = GrammarRegistry::with_builtins();
        let source = "/* one\ntwo */ x";
        let tokens = registry.tokenize(source, "c");

        let records = annotate(&tokens, &HighlightSpec::new());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tokens[0].category, Category::Comment);
        assert_eq!(records[0].tokens[0].text, "/* one\n");
        assert_eq!(records[1].tokens[0].category, Category::Comment);
        assert_eq!(records[1].tokens[0].text, "two */");
    }

    #[test]
    fn test_annotate_splits_nested_token() {
        let registry = GrammarRegistry::with_builtins();
        let source = "x = \"\"\"a\\n\nb\"\"\"";
        let tokens = registry.tokenize(source, "python");

        let records = annotate(&tokens, &HighlightSpec::new());
        assert_eq!(records.len(), 2);
        let string = records[0].tokens.last().unwrap();
        assert_eq!(string.category, Category::String);
        assert_eq!(leaf_text(&string.children), string.text);
        assert!(string.children.iter().any(|t| t.category == Category::Escape));
    }

    #[test]
    fn test_annotate_empty_and_out_of_range() {
        let registry = GrammarRegistry::with_builtins();
        let spec = parse_highlight_spec("3-100").unwrap();
        assert!(annotate(&registry.tokenize("", "c"), &spec).is_empty());

        let records = annotate(&registry.tokenize("only\n\n", "none"), &spec);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text(), "\n");
        assert!(records.iter().all(|r| !r.emphasized));
    }

    #[test]
    fn test_annotate_diff_markers() {
        let registry = GrammarRegistry::with_builtins();
        let tokens = registry.tokenize("-int a;\n+int b;\n int c;\n", "c");

        let records = annotate_with_diff(&tokens, &HighlightSpec::new(), true);
        let markers: Vec<_> = records.iter().map(|r| r.diff).collect();
        assert_eq!(markers, vec![Some(DiffMarker::Deleted), Some(DiffMarker::Inserted), None]);

        let plain = annotate(&tokens, &HighlightSpec::new());
        assert!(plain.iter().all(|r| r.diff.is_none()));
    }
}
