use crate::error::{Result, SearchError};
use regex::{Regex, RegexBuilder};
use stackblitz_project::ProjectSnapshot;

pub const DEFAULT_MAX_RESULTS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Treat the query as a regular expression instead of a literal substring.
    pub regex: bool,
    pub case_sensitive: bool,
    /// Scanning stops once this many matches are collected.
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            regex: false,
            case_sensitive: false,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// A matching line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// Full path of the file.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    /// Line content without trailing whitespace.
    pub text: String,
}

/// Compiled form of a query; decides whether a single line matches.
#[derive(Debug, Clone)]
pub enum LineMatcher {
    Pattern(Regex),
    Literal { needle: String, case_sensitive: bool },
}

impl LineMatcher {
    /// Fails with [`SearchError::InvalidPattern`] for a regex that does not compile.
    pub fn new(query: &str, options: &SearchOptions) -> Result<Self> {
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        if options.regex {
            let regex = RegexBuilder::new(query)
                .case_insensitive(!options.case_sensitive)
                .build()?;
            return Ok(Self::Pattern(regex));
        }

        let needle = if options.case_sensitive {
            query.to_string()
        } else {
            query.to_lowercase()
        };
        Ok(Self::Literal {
            needle,
            case_sensitive: options.case_sensitive,
        })
    }

    pub fn is_match(&self, line: &str) -> bool {
        match self {
            Self::Pattern(regex) => regex.is_match(line),
            Self::Literal {
                needle,
                case_sensitive: true,
            } => line.contains(needle.as_str()),
            Self::Literal {
                needle,
                case_sensitive: false,
            } => line.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Scans every file of `snapshot` line by line and returns matches in scan order.
///
/// Files are visited in the snapshot's stored order and lines are split on `\n`. The pattern
/// is compiled before any file is read, so an invalid regex never produces partial output.
pub fn search(
    snapshot: &ProjectSnapshot,
    query: &str,
    options: &SearchOptions,
) -> Result<Vec<SearchMatch>> {
    let matcher = LineMatcher::new(query, options)?;
    Ok(search_with(snapshot, &matcher, options.max_results))
}

/// Scan with an already compiled matcher, stopping after `max_results` matches.
pub fn search_with(
    snapshot: &ProjectSnapshot,
    matcher: &LineMatcher,
    max_results: usize,
) -> Vec<SearchMatch> {
    let mut matches = Vec::new();
    if max_results == 0 {
        return matches;
    }

    'files: for file in snapshot.files() {
        for (idx, line) in file.contents.split('\n').enumerate() {
            if !matcher.is_match(line) {
                continue;
            }
            matches.push(SearchMatch {
                file: file.full_path.clone(),
                line: idx + 1,
                text: line.trim_end().to_string(),
            });
            if matches.len() >= max_results {
                break 'files;
            }
        }
    }

    matches
}
