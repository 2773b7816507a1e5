//! Page access: HTTP fetch, HTML table reading, text normalization.

pub mod html;
pub mod page;
pub mod text;

pub use html::parse_tables;
pub use page::{PageClient, StaticPage, TableSource};
