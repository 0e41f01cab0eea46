use crate::line_search::SearchMatch;
use std::collections::HashMap;

/// Matches of one file, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatches<'a> {
    pub file: &'a str,
    pub matches: Vec<&'a SearchMatch>,
}

/// Groups matches by file, keeping files in first-seen order.
pub fn group_matches(matches: &[SearchMatch]) -> Vec<FileMatches<'_>> {
    let mut groups: Vec<FileMatches<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for m in matches {
        let slot = *index.entry(m.file.as_str()).or_insert_with(|| {
            groups.push(FileMatches {
                file: m.file.as_str(),
                matches: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].matches.push(m);
    }

    groups
}

/// Human-readable report: a summary header followed by one `## <file>` block per file.
pub fn render_matches(query: &str, matches: &[SearchMatch]) -> String {
    if matches.is_empty() {
        return format!("No matches found for \"{query}\"");
    }

    let groups = group_matches(matches);
    let mut out = format!(
        "Found {} {} in {} {}:\n\n",
        matches.len(),
        plural(matches.len(), "match", "matches"),
        groups.len(),
        plural(groups.len(), "file", "files"),
    );

    for group in &groups {
        out.push_str(&format!("## {}\n", group.file));
        for m in &group.matches {
            out.push_str(&format!("  L{}: {}\n", m.line, m.text));
        }
        out.push('\n');
    }

    out.truncate(out.trim_end().len());
    out
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}
