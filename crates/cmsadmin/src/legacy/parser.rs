//! Best-effort extraction of job records from a PHP `$jobs = [...]` literal.

use std::ops::Range;
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::error::LegacyError;
use crate::models::{split_salary, Job};

static RE_JOBS_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$jobs\s*=\s*\[").unwrap());
// String bodies allow backslash escapes so files written by `render_jobs_array` read back.
static RE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""title"\s*=>\s*"((?:[^"\\]|\\.)*)""#).unwrap());
static RE_QUOTA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""quota"\s*=>\s*"((?:[^"\\]|\\.)*)""#).unwrap());
static RE_SALARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""salary"\s*=>\s*"((?:[^"\\]|\\.)*)""#).unwrap());
static RE_REQUIREMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)"requirements"\s*=>\s*\[(.*?)\]"#).unwrap());
static RE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""((?:[^"\\]|\\.)*)""#).unwrap());

/// Parses every job block of the `$jobs` array in `content`.
///
/// Only a missing `$jobs` array is reported; malformed blocks yield partial
/// records, and blocks without a title are dropped.
pub fn parse_jobs(content: &str) -> Result<Vec<Job>, LegacyError> {
    let Some(span) = locate_jobs_array(content) else {
        warn!("No $jobs array found");
        return Err(LegacyError::ArrayNotFound);
    };
    let inner = content[span.inner].trim();

    let jobs: Vec<Job> = top_level_blocks(inner)
        .into_iter()
        .map(parse_block)
        .filter(|job| !job.title.is_empty())
        .collect();

    debug!("Parsed {} jobs from legacy file", jobs.len());
    Ok(jobs)
}

/// Byte ranges of a `$jobs = [...];` statement within a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct JobsArraySpan {
    /// From `$jobs` through the terminating `;`.
    pub statement: Range<usize>,
    /// Between the outer brackets.
    pub inner: Range<usize>,
}

/// Finds the first `$jobs = [...];` statement, matching the outer brackets.
///
/// Brackets inside quoted strings do not count. Returns `None` when the
/// literal is missing, unterminated, or not followed by `;`.
pub(crate) fn locate_jobs_array(content: &str) -> Option<JobsArraySpan> {
    let start = RE_JOBS_START.find(content)?;
    let open_end = start.end();
    let close = open_end + matching_close(&content[open_end..])?;

    let rest = &content[close + 1..];
    let trimmed = rest.trim_start();
    if !trimmed.starts_with(';') {
        return None;
    }
    let end = close + 1 + (rest.len() - trimmed.len()) + 1;

    Some(JobsArraySpan {
        statement: start.start()..end,
        inner: open_end..close,
    })
}

/// Offset of the `]` closing a bracket opened just before `text`.
fn matching_close(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits `text` into the contents of its top-level `[...]` groups.
///
/// Nested brackets stay inside their block. Brackets inside string literals
/// are not special-cased.
pub fn top_level_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, c) in text.char_indices() {
        match c {
            '[' => {
                if depth == 0 {
                    start = i + 1;
                }
                depth += 1;
            }
            ']' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    blocks.push(&text[start..i]);
                }
            }
            _ => {}
        }
    }

    blocks
}

/// Undoes PHP double-quoted escapes for `\\`, `\"` and `\$`; other sequences stay verbatim.
pub(crate) fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ ('\\' | '"' | '$')) => out.push(next),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn capture_field(re: &Regex, block: &str) -> String {
    re.captures(block)
        .and_then(|c| c.get(1))
        .map(|m| unescape(m.as_str().trim()))
        .unwrap_or_default()
}

fn parse_block(block: &str) -> Job {
    let (salary_start, salary_end) = split_salary(&capture_field(&RE_SALARY, block));

    let requirements = RE_REQUIREMENTS
        .captures(block)
        .and_then(|c| c.get(1))
        .map(|section| {
            RE_QUOTED
                .captures_iter(section.as_str())
                .filter_map(|c| c.get(1))
                .map(|m| unescape(m.as_str().trim()))
                .collect()
        })
        .unwrap_or_default();

    Job {
        title: capture_field(&RE_TITLE, block),
        quota: capture_field(&RE_QUOTA, block),
        salary_start,
        salary_end,
        requirements,
    }
}
