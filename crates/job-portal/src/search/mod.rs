//! Client-side browse pipeline: free-text and category filtering plus pagination over a
//! fetched feed, driven by explicit session state.

pub mod fetch;
pub mod pipeline;
pub mod session;

pub use fetch::FetchState;
pub use pipeline::{search, PageRequest, SearchCriteria, SearchPage, DEFAULT_PAGE_SIZE};
pub use session::BrowseSession;
