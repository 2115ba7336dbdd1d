//! Full-scan filtering and sorting for list views.
//!
//! Queries borrow records from the store and never reorder or modify it.

use crate::error::JobTrackError;
use crate::model::{JobApplication, JobStatus, RecordStatus, StatusGroup};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Group(StatusGroup),
    Exact(JobStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: &RecordStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Group(group) => status.group() == Some(*group),
            StatusFilter::Exact(exact) => status == exact,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = JobTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(StatusFilter::All);
        }
        if let Ok(group) = s.parse::<StatusGroup>() {
            return Ok(StatusFilter::Group(group));
        }
        s.parse::<JobStatus>()
            .map(StatusFilter::Exact)
            .map_err(|_| JobTrackError::MalformedInput(format!("Unknown status filter: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    DateApplied,
    CreatedAt,
    UpdatedAt,
    CompanyName,
    JobTitle,
    Status,
    Location,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::DateApplied => "dateApplied",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
            SortField::CompanyName => "companyName",
            SortField::JobTitle => "jobTitle",
            SortField::Status => "status",
            SortField::Location => "location",
        }
    }

    fn compare(&self, a: &JobApplication, b: &JobApplication) -> Ordering {
        match self {
            SortField::DateApplied => a.date_applied.cmp(&b.date_applied),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortField::CompanyName => cmp_text(Some(&a.company_name), Some(&b.company_name)),
            SortField::JobTitle => cmp_text(Some(&a.job_title), Some(&b.job_title)),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
            SortField::Location => cmp_text(a.location.as_ref(), b.location.as_ref()),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = JobTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dateApplied" | "date-applied" | "date" => Ok(SortField::DateApplied),
            "createdAt" | "created-at" | "created" => Ok(SortField::CreatedAt),
            "updatedAt" | "updated-at" | "updated" => Ok(SortField::UpdatedAt),
            "companyName" | "company-name" | "company" => Ok(SortField::CompanyName),
            "jobTitle" | "job-title" | "title" => Ok(SortField::JobTitle),
            "status" => Ok(SortField::Status),
            "location" => Ok(SortField::Location),
            other => Err(JobTrackError::MalformedInput(format!(
                "Unknown sort field: {}",
                other
            ))),
        }
    }
}

// Missing values sort as empty strings.
fn cmp_text(a: Option<&String>, b: Option<&String>) -> Ordering {
    let a = a.map(|s| s.to_lowercase()).unwrap_or_default();
    let b = b.map(|s| s.to_lowercase()).unwrap_or_default();
    a.cmp(&b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub search: Option<String>,
    pub status: StatusFilter,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl JobFilter {
    /// Case-insensitive match on company, title, location and notes.
    pub fn matches_search(&self, record: &JobApplication) -> bool {
        let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) else {
            return true;
        };
        let needle = term.to_lowercase();
        [
            Some(&record.company_name),
            Some(&record.job_title),
            record.location.as_ref(),
            record.notes.as_ref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn matches(&self, record: &JobApplication) -> bool {
        self.status.matches(&record.status) && self.matches_search(record)
    }

    /// Filter then sort. Ties keep their stored order.
    pub fn apply<'a>(&self, records: &'a [JobApplication]) -> Vec<&'a JobApplication> {
        let mut selected: Vec<&JobApplication> =
            records.iter().filter(|record| self.matches(record)).collect();
        selected.sort_by(|a, b| {
            let ordering = self.sort.compare(a, b);
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewJobApplication;
    use chrono::{TimeZone, Utc};

    fn record(company: &str, day: u32, status: JobStatus) -> JobApplication {
        JobApplication::new(NewJobApplication::new(
            company,
            "Engineer",
            Utc.with_ymd_and_hms(2024, 2, day, 0, 0, 0).unwrap(),
            status,
        ))
    }

    fn fixture() -> Vec<JobApplication> {
        let mut remote = record("globex", 3, JobStatus::RejectedOnsite);
        remote.location = Some("Remote".into());
        let mut noted = record("Initech", 1, JobStatus::OfferReceived);
        noted.notes = Some("Recruiter mentioned REMOTE options".into());
        vec![
            record("Acme", 2, JobStatus::InterviewingTechnical),
            remote,
            noted,
            record("Hooli", 4, JobStatus::Ghosted),
        ]
    }

    fn companies(records: &[&JobApplication]) -> Vec<String> {
        records.iter().map(|r| r.company_name.clone()).collect()
    }

    #[test]
    fn default_sorts_by_date_applied_descending() {
        let records = fixture();
        let result = JobFilter::default().apply(&records);
        assert_eq!(companies(&result), vec!["Hooli", "globex", "Acme", "Initech"]);
    }

    #[test]
    fn search_covers_location_and_notes() {
        let records = fixture();
        let filter = JobFilter {
            search: Some("remote".into()),
            ..JobFilter::default()
        };
        assert_eq!(companies(&filter.apply(&records)), vec!["globex", "Initech"]);
    }

    #[test]
    fn status_group_filter() {
        let records = fixture();
        let filter = JobFilter {
            status: "rejected".parse().unwrap(),
            ..JobFilter::default()
        };
        assert_eq!(companies(&filter.apply(&records)), vec!["globex"]);

        let filter = JobFilter {
            status: "offers".parse().unwrap(),
            ..JobFilter::default()
        };
        assert_eq!(companies(&filter.apply(&records)), vec!["Initech"]);
    }

    #[test]
    fn exact_status_filter() {
        let records = fixture();
        let filter = JobFilter {
            status: "ghosted".parse().unwrap(),
            ..JobFilter::default()
        };
        assert_eq!(filter.status, StatusFilter::Group(StatusGroup::Ghosted));
        assert_eq!(companies(&filter.apply(&records)), vec!["Hooli"]);

        let filter = JobFilter {
            status: "interviewing_technical".parse().unwrap(),
            ..JobFilter::default()
        };
        assert_eq!(companies(&filter.apply(&records)), vec!["Acme"]);
    }

    #[test]
    fn unlisted_status_only_matches_all() {
        let mut records = fixture();
        records[0].status = RecordStatus::Other("applied".into());

        assert_eq!(JobFilter::default().apply(&records).len(), 4);
        for group in ["interviewing", "offers", "rejected", "ghosted"] {
            let filter = JobFilter {
                status: group.parse().unwrap(),
                ..JobFilter::default()
            };
            assert!(!companies(&filter.apply(&records)).contains(&"Acme".to_string()));
        }
    }

    #[test]
    fn text_sort_is_case_insensitive() {
        let records = fixture();
        let filter = JobFilter {
            sort: SortField::CompanyName,
            direction: SortDirection::Asc,
            ..JobFilter::default()
        };
        assert_eq!(
            companies(&filter.apply(&records)),
            vec!["Acme", "globex", "Hooli", "Initech"]
        );
    }

    #[test]
    fn missing_values_sort_first_ascending() {
        let records = fixture();
        let filter = JobFilter {
            sort: SortField::Location,
            direction: SortDirection::Asc,
            ..JobFilter::default()
        };
        let result = filter.apply(&records);
        assert_eq!(result.last().unwrap().company_name, "globex");
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("applied".parse::<StatusFilter>().is_err());
        assert!("salary".parse::<SortField>().is_err());
    }

    #[test]
    fn query_does_not_reorder_source() {
        let records = fixture();
        let before: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
        let _ = JobFilter::default().apply(&records);
        let after: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
        assert_eq!(before, after);
    }
}
