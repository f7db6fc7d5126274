use std::fmt::Display;

use serde_json::Value;

use super::fetch::FetchState;
use super::pipeline::{search, PageRequest, SearchCriteria, SearchPage, DEFAULT_PAGE_SIZE};

/// Browse state for one viewer: queries, category, current page, and the fetched feed.
///
/// Any change to the queries or category sends the viewer back to the first page.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseSession {
    criteria: SearchCriteria,
    current_page: usize,
    page_size: usize,
    fetch: FetchState,
}

impl Default for BrowseSession {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl BrowseSession {
    pub fn new(page_size: usize) -> Self {
        Self {
            criteria: SearchCriteria::default(),
            current_page: 1,
            page_size: page_size.max(1),
            fetch: FetchState::Loading,
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    pub fn is_loading(&self) -> bool {
        self.fetch.is_loading()
    }

    pub fn set_job_query(&mut self, query: impl Into<String>) {
        self.criteria.job_query = query.into();
        self.current_page = 1;
    }

    pub fn set_location_query(&mut self, query: impl Into<String>) {
        self.criteria.location_query = query.into();
        self.current_page = 1;
    }

    pub fn select_category(&mut self, category: Option<String>) {
        self.criteria.category = category;
        self.current_page = 1;
    }

    pub fn begin_fetch(&mut self) {
        self.fetch = FetchState::Loading;
    }

    pub fn complete_fetch<E: Display>(&mut self, result: Result<Value, E>) {
        self.fetch = FetchState::from_result(result);
    }

    pub fn set_fetch_state(&mut self, state: FetchState) {
        self.fetch = state;
    }

    /// Current page of the filtered feed.
    pub fn view(&self) -> SearchPage<'_> {
        search(
            self.fetch.postings().iter().map(Option::as_ref),
            &self.criteria,
            PageRequest::new(self.current_page, self.page_size),
        )
    }

    pub fn next_page(&mut self) -> bool {
        let total_pages = self.clamp_page();
        if self.current_page < total_pages {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        self.clamp_page();
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page`, clamped into the pages the current feed and filters produce.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page;
        self.clamp_page();
    }

    /// Pager caption, or `None` when nothing matches and the pager is hidden.
    pub fn status_line(&self) -> Option<String> {
        self.view().status_line()
    }

    /// Pull `current_page` back into range, e.g. after a refetch shrank the feed.
    fn clamp_page(&mut self) -> usize {
        let total_pages = self.view().total_pages;
        self.current_page = self.current_page.clamp(1, total_pages.max(1));
        total_pages
    }
}
