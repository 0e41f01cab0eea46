use crate::types::TreeNode;
use icu_collator::{CaseFirst, Collator, CollatorOptions, Strength};
use std::cmp::Ordering;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

thread_local! {
    static NAME_COLLATOR: Option<Collator> = root_collator();
}

/// Renders the children of `root` as an ASCII tree.
///
/// Directories come before files at every level and carry a trailing `/`. Returns an empty
/// string when `root` has no children.
pub fn format_tree(root: &TreeNode) -> String {
    let mut lines = Vec::new();
    render_level(root.children(), "", &mut lines);
    lines.join("\n")
}

/// Root-locale collation with lower case first on tertiary ties, so `_redirects` sorts before
/// `.gitignore` and `é.ts` sits between `a.ts` and `f.ts`.
fn root_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    options.case_first = Some(CaseFirst::LowerFirst);
    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(err) => {
            log::warn!("root collator unavailable, falling back to case-folded order: {err}");
            None
        }
    }
}

pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    let collated = NAME_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    });
    collated.then_with(|| b.cmp(a))
}

fn render_level(children: &[TreeNode], prefix: &str, lines: &mut Vec<String>) {
    let mut sorted: Vec<&TreeNode> = children.iter().collect();
    sorted.sort_by(|a, b| {
        b.is_dir()
            .cmp(&a.is_dir())
            .then_with(|| compare_names(a.name(), b.name()))
    });

    let last = sorted.len().saturating_sub(1);
    for (idx, node) in sorted.into_iter().enumerate() {
        let is_last = idx == last;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        match node {
            TreeNode::File { name, .. } => lines.push(format!("{prefix}{connector}{name}")),
            TreeNode::Directory { name, children, .. } => {
                lines.push(format!("{prefix}{connector}{name}/"));
                let indent = if is_last { SPACE_INDENT } else { PIPE_INDENT };
                render_level(children, &format!("{prefix}{indent}"), lines);
            }
        }
    }
}
