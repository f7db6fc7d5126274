use clap::Args;
use job_portal::config::AppConfig;
use job_portal::error::AppError;
use job_portal::listings::JobPosting;
use job_portal::search::{BrowseSession, FetchState, DEFAULT_PAGE_SIZE};
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// JSON array of postings (defaults to JOBS_DATA_PATH)
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Case-insensitive substring of the job title
    #[arg(long)]
    pub(crate) job: Option<String>,
    /// Case-insensitive substring of the job location
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Location, salary type, experience level, employment type, or a price ceiling
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Page to show (clamped to the available pages)
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
    /// Postings per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub(crate) page_size: usize,
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let path = match args.file.clone() {
        Some(path) => path,
        None => AppConfig::load()?.listings.data_path.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "no job feed given; pass --file or set JOBS_DATA_PATH",
            )
        })?,
    };

    let content = fs::read_to_string(&path)?;
    let payload: Value = serde_json::from_str(&content)?;
    let session = browse_session(&args, FetchState::from_payload(payload));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Job feed: {}", path.display())?;
    render_session(&session, &mut out)?;
    Ok(())
}

pub(crate) fn browse_session(args: &SearchArgs, feed: FetchState) -> BrowseSession {
    let mut session = BrowseSession::new(args.page_size);
    session.set_fetch_state(feed);
    if let Some(job) = &args.job {
        session.set_job_query(job.clone());
    }
    if let Some(location) = &args.location {
        session.set_location_query(location.clone());
    }
    session.select_category(args.category.clone());
    session.go_to_page(args.page);
    session
}

pub(crate) fn render_session(session: &BrowseSession, out: &mut impl Write) -> io::Result<()> {
    let criteria = session.criteria();
    writeln!(
        out,
        "Filters: job=\"{}\" location=\"{}\" category={}",
        criteria.job_query,
        criteria.location_query,
        criteria.category.as_deref().unwrap_or("any")
    )?;

    let page = session.view();
    let Some(status) = page.status_line() else {
        writeln!(out, "No Jobs Found")?;
        writeln!(out, "Try changing your search or filters")?;
        return Ok(());
    };

    writeln!(out, "{status} ({} matching)", page.total_matching)?;
    for posting in &page.items {
        writeln!(out, "- {}", posting_line(posting))?;
    }
    Ok(())
}

fn posting_line(posting: &JobPosting) -> String {
    format!(
        "{} | {} | {} | {} | ${}k-${}k {} | {}",
        posting.job_title,
        posting.company_name,
        posting.job_location,
        posting.employment_type,
        posting.min_price,
        posting.max_price,
        posting.salary_type,
        posting.id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args() -> SearchArgs {
        SearchArgs {
            file: None,
            job: None,
            location: None,
            category: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    fn feed() -> FetchState {
        FetchState::from_payload(json!([
            {
                "_id": "job-000002",
                "jobTitle": "Senior React Developer",
                "companyName": "Northwind",
                "jobLocation": "Pune",
                "employmentType": "Full-time",
                "salaryType": "Yearly",
                "minPrice": 20,
                "maxPrice": 40,
                "createdAt": "2025-02-01T00:00:00Z"
            },
            null,
            {
                "_id": "job-000001",
                "jobTitle": "Backend Engineer",
                "companyName": "Northwind",
                "jobLocation": "Delhi",
                "employmentType": "Full-time",
                "salaryType": "Yearly",
                "minPrice": 30,
                "maxPrice": 60,
                "createdAt": "2025-01-01T00:00:00Z"
            }
        ]))
    }

    fn render(args: &SearchArgs) -> String {
        let session = browse_session(args, feed());
        let mut out = Vec::new();
        render_session(&session, &mut out).expect("render succeeds");
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn renders_matching_postings_with_pager() {
        let mut args = args();
        args.job = Some("react".to_string());
        let output = render(&args);

        assert!(output.contains("Page 1 of 1 (1 matching)"));
        assert!(output.contains(
            "- Senior React Developer | Northwind | Pune | Full-time | $20k-$40k Yearly | job-000002"
        ));
        assert!(!output.contains("Backend Engineer"));
    }

    #[test]
    fn renders_empty_state_when_nothing_matches() {
        let mut args = args();
        args.category = Some("Internship".to_string());
        let output = render(&args);

        assert!(output.contains("category=Internship"));
        assert!(output.contains("No Jobs Found"));
    }

    #[test]
    fn requested_page_is_clamped() {
        let mut args = args();
        args.page = 9;
        args.page_size = 1;
        let output = render(&args);

        assert!(output.contains("Page 2 of 2 (2 matching)"));
        assert!(output.contains("Backend Engineer"));
    }
}
