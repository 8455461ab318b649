//! Single-line tokenizer for the INI text format.
//!
//! Each input line is classified on its own, with no lookahead:
//!
//! ```text
//! ; full-line comment          -> Comment
//! # full-line comment          -> Comment
//!                              -> Blank
//! [ section ]   ; trailing     -> SectionHeader("section")
//! [section                     -> UnterminatedSection
//! key = value   # trailing     -> Property { key: "key", value: "value" }
//! anything else                -> Invalid
//! ```
//!
//! Trailing comments start at the first `;` or `#` anywhere in the line.
//! There is no quoting or escaping, so neither character can appear in a
//! value or section name.

/// Characters that start a comment.
pub const COMMENT_CHARS: [char; 2] = [';', '#'];

/// Classification of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Nothing but white space (possibly after removing a trailing comment).
    Blank,
    /// The first non-space character starts a comment.
    Comment,
    /// `[name]`, with `name` trimmed.  Text after the `]` is ignored.
    SectionHeader(&'a str),
    /// Starts with `[` but has no closing `]`.
    UnterminatedSection,
    /// `key = value`, split at the first `=`, both sides trimmed.
    Property { key: &'a str, value: &'a str },
    /// None of the above.
    Invalid(&'a str),
}

/// Cuts `line` at the first comment character.
pub fn strip_comment(line: &str) -> &str {
    match line.find(&COMMENT_CHARS[..]) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Classifies one raw line (without its line terminator).
pub fn classify(raw: &str) -> Line<'_> {
    if raw.trim_start().starts_with(&COMMENT_CHARS[..]) {
        return Line::Comment;
    }

    let line = strip_comment(raw).trim();
    if line.is_empty() {
        return Line::Blank;
    }

    if let Some(rest) = line.strip_prefix('[') {
        return match rest.find(']') {
            Some(end) => Line::SectionHeader(rest[..end].trim()),
            None => Line::UnterminatedSection,
        };
    }

    if let Some((key, value)) = line.split_once('=') {
        return Line::Property {
            key: key.trim(),
            value: value.trim(),
        };
    }

    Line::Invalid(line)
}

/// Returns `true` if a (trimmed) key contains an embedded space.
pub fn key_has_space(key: &str) -> bool {
    key.contains(' ')
}
