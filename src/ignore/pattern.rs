//! Parsing of single .gitignore lines into compiled patterns

use glob::{MatchOptions, Pattern as GlobPattern};

/// Segment globs never see a separator, but `*` must still not cross one.
const SEGMENT_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// One `/`-separated piece of a compiled pattern
#[derive(Debug, Clone)]
pub enum Segment {
    /// `**`: zero or more whole path segments
    AnyPath,
    /// Single-segment glob (`*`, `?`, `[...]`)
    Glob(GlobPattern),
}

impl Segment {
    fn compile(text: &str) -> Option<Self> {
        if text == "**" {
            return Some(Segment::AnyPath);
        }

        GlobPattern::new(&to_glob_syntax(text)).ok().map(Segment::Glob)
    }

    /// Check a single path segment (file or directory name)
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Segment::AnyPath => true,
            Segment::Glob(pattern) => pattern.matches_with(name, SEGMENT_OPTIONS),
        }
    }
}

/// Rewrite gitignore segment syntax into `glob` syntax.
///
/// `\x` becomes a literal `x`, `[^...]` becomes `[!...]`, and runs of `*`
/// (`***`, `a**b`) collapse to a single `*`.
fn to_glob_syntax(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_class = false;
    let mut after_star = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) if in_class => out.push(escaped),
                Some(escaped) => out.push_str(&GlobPattern::escape(&escaped.to_string())),
                None => out.push('\\'),
            },
            '*' if !in_class => {
                if !after_star {
                    out.push('*');
                }
                after_star = true;
                continue;
            },
            '[' if !in_class => {
                in_class = true;
                out.push('[');
                if matches!(chars.peek(), Some('^' | '!')) {
                    chars.next();
                    out.push('!');
                }
                // A `]` right after the opening bracket is part of the class
                if chars.peek() == Some(&']') {
                    chars.next();
                    out.push(']');
                }
            },
            ']' if in_class => {
                in_class = false;
                out.push(']');
            },
            other => out.push(other),
        }
        after_star = false;
    }

    out
}

/// How a pattern is compared against a path
#[derive(Debug, Clone)]
pub enum PatternKind {
    /// Unanchored pattern without a separator, compared against the last segment
    Basename(Segment),
    /// Anchored pattern, compared against the full root-relative path
    Path(Vec<Segment>),
    /// Malformed glob syntax, compared as a literal substring of the path
    Substring(String),
}

/// A compiled pattern from a .gitignore file
#[derive(Debug, Clone)]
pub struct Pattern {
    /// The original line, trimmed
    pub original: String,
    /// Pattern started with `!`
    pub negated: bool,
    /// Pattern is matched from the repository root
    pub anchored: bool,
    /// Pattern ended with `/` and only matches directories
    pub directory_only: bool,
    /// Compiled matcher
    pub kind: PatternKind,
}

impl Pattern {
    /// Parse a single line. Returns `None` for blank lines, comments and
    /// lines that carry no pattern once the markers are stripped.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (negated, body) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, line),
        };

        // `\#` and `\!` start a literal pattern
        let body = match body.strip_prefix('\\') {
            Some(rest) if rest.starts_with('#') || rest.starts_with('!') => rest,
            _ => body,
        };

        // The directory flag is taken before the trailing slashes go away.
        let directory_only = body.ends_with('/');
        let body = body.trim_end_matches('/');

        let leading_slash = body.starts_with('/');
        let body = body.trim_start_matches('/');
        if body.is_empty() {
            return None;
        }

        let anchored = leading_slash || body.contains('/');

        let segments: Option<Vec<Segment>> = body
            .split('/')
            .filter(|part| !part.is_empty())
            .map(Segment::compile)
            .collect();

        let kind = match segments {
            None => PatternKind::Substring(body.to_string()),
            Some(mut segments) if !anchored && segments.len() == 1 => {
                PatternKind::Basename(segments.remove(0))
            }
            Some(segments) => PatternKind::Path(segments),
        };

        Some(Self {
            original: line.to_string(),
            negated,
            anchored,
            directory_only,
            kind,
        })
    }

    /// Check whether this pattern matches a normalized, root-relative path.
    ///
    /// Only the path itself is considered; exclusion inherited from an
    /// ancestor directory is handled by the matcher.
    pub fn matches(&self, segments: &[&str], is_dir: bool) -> bool {
        if segments.is_empty() || (self.directory_only && !is_dir) {
            return false;
        }

        match &self.kind {
            PatternKind::Basename(segment) => segments
                .last()
                .map_or(false, |name| segment.matches(name)),
            PatternKind::Path(pattern) => match_segments(pattern, segments),
            PatternKind::Substring(text) => segments.join("/").contains(text.as_str()),
        }
    }
}

fn match_segments(pattern: &[Segment], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        // A trailing `**` covers the contents of a directory, not the directory itself
        Some((Segment::AnyPath, [])) => !path.is_empty(),
        Some((Segment::AnyPath, rest)) => {
            (0..=path.len()).any(|skip| match_segments(rest, &path[skip..]))
        }
        Some((segment, rest)) => match path.split_first() {
            Some((name, tail)) => segment.matches(name) && match_segments(rest, tail),
            None => false,
        },
    }
}
