mod error;
mod line_search;
mod report;

pub use error::{Result, SearchError};
pub use line_search::{
    search, search_with, LineMatcher, SearchMatch, SearchOptions, DEFAULT_MAX_RESULTS,
};
pub use report::{group_matches, render_matches, FileMatches};
