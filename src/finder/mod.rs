pub mod highlight;
pub mod matcher;
pub mod scope;

pub use highlight::build_highlight;
pub use matcher::{locate_match, replace_all};
pub use scope::{scan, scan_scopes, PreviewRow, RowTarget, ScopeKind, SearchQuery, ViewField};
