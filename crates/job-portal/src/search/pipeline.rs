use serde::{Deserialize, Serialize};

use crate::listings::JobPosting;

/// Page size used by the browse view when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Free-text queries and the single-select category applied to a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(default)]
    pub job_query: String,
    #[serde(default)]
    pub location_query: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl SearchCriteria {
    pub fn matches(&self, posting: &JobPosting) -> bool {
        contains_ignore_case(&posting.job_title, &self.job_query)
            && contains_ignore_case(&posting.job_location, &self.location_query)
            && self.matches_category(posting)
    }

    /// Union of four categorical equalities and a price ceiling. Unset or empty matches everything.
    pub fn matches_category(&self, posting: &JobPosting) -> bool {
        let Some(category) = self.category.as_deref().filter(|value| !value.is_empty()) else {
            return true;
        };

        let selected = category.to_lowercase();
        let categorical = [
            &posting.job_location,
            &posting.salary_type,
            &posting.experience_level,
            &posting.employment_type,
        ]
        .into_iter()
        .any(|field| field.to_lowercase() == selected);

        categorical || within_price_ceiling(posting.max_price, category)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn within_price_ceiling(max_price: f64, category: &str) -> bool {
    let Ok(ceiling) = category.trim().parse::<f64>() else {
        return false;
    };
    max_price.is_finite() && max_price > 0.0 && max_price <= ceiling
}

/// One-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size: page_size.max(1),
        }
    }

    pub fn first(page_size: usize) -> Self {
        Self::new(1, page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Window of matching postings plus the totals a pager needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage<'a> {
    pub items: Vec<&'a JobPosting>,
    pub page: usize,
    pub page_size: usize,
    pub total_matching: usize,
    pub total_pages: usize,
}

impl<'a> SearchPage<'a> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pager caption, e.g. `Page 2 of 5`. `None` when nothing matched.
    pub fn status_line(&self) -> Option<String> {
        (self.total_pages > 0).then(|| format!("Page {} of {}", self.page, self.total_pages))
    }
}

/// Filter `postings` by `criteria` and cut out the requested page.
///
/// Null entries are dropped, input order is preserved, and out-of-range pages are
/// clamped into `[1, total_pages]`.
pub fn search<'a, I, P>(
    postings: I,
    criteria: &SearchCriteria,
    request: PageRequest,
) -> SearchPage<'a>
where
    I: IntoIterator<Item = P>,
    P: Into<Option<&'a JobPosting>>,
{
    let page_size = request.page_size.max(1);
    let matching: Vec<&'a JobPosting> = postings
        .into_iter()
        .filter_map(Into::<Option<&'a JobPosting>>::into)
        .filter(|posting| criteria.matches(posting))
        .collect();

    let total_matching = matching.len();
    let total_pages = total_matching.div_ceil(page_size);
    let page = request.page.clamp(1, total_pages.max(1));

    let items = matching
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    SearchPage {
        items,
        page,
        page_size,
        total_matching,
        total_pages,
    }
}
