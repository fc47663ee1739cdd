//! Job application records for the job tracker.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    date::{
        format_iso_date, format_optional_iso_date, optional_iso_date, parse_optional_iso_date,
        today,
    },
    id::RecordId,
    record_store::Record,
};

const MISSING_FIELDS_MESSAGE: &str = "Please fill in company and position";

/// How far an application has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// The application has been sent.
    #[default]
    Applied,
    /// The applicant is in the interview process.
    Interviewing,
    /// The applicant received an offer.
    Offer,
    /// The application was unsuccessful.
    Rejected,
}

impl JobStatus {
    /// Every status, in display order.
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Applied,
        JobStatus::Interviewing,
        JobStatus::Offer,
        JobStatus::Rejected,
    ];

    /// The stored value of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Applied => "applied",
            JobStatus::Interviewing => "interviewing",
            JobStatus::Offer => "offer",
            JobStatus::Rejected => "rejected",
        }
    }

    /// The status with its first letter capitalised, e.g. "Interviewing".
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::Interviewing => "Interviewing",
            JobStatus::Offer => "Offer",
            JobStatus::Rejected => "Rejected",
        }
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::Validation(format!("\"{s}\" is not a job status")))
    }
}

/// Which jobs to show in the job list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Show every job.
    #[default]
    All,
    /// Only show jobs with the given status.
    Only(JobStatus),
}

impl StatusFilter {
    /// Whether `status` passes the filter.
    pub fn matches(&self, status: JobStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    /// The message shown in place of a job list that this filter left empty.
    pub fn empty_list_message(&self) -> String {
        match self {
            StatusFilter::All => "No job applications yet.".to_owned(),
            StatusFilter::Only(status) => format!("No {status} applications."),
        }
    }
}

impl Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            status => status.parse().map(StatusFilter::Only),
        }
    }
}

/// An application for a position at a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// The ID of the job.
    pub id: RecordId,
    /// The company the application was sent to.
    pub company: String,
    /// The position applied for.
    pub position: String,
    /// How far the application has progressed.
    pub status: JobStatus,
    /// When the application was sent, if a date was given.
    #[serde(with = "optional_iso_date", default)]
    pub date_applied: Option<Date>,
    /// Free-form notes, e.g. interview dates or contact details.
    #[serde(default)]
    pub notes: String,
}

/// The validated contents of a job, without its ID.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct JobFields {
    pub company: String,
    pub position: String,
    pub status: JobStatus,
    pub date_applied: Option<Date>,
    pub notes: String,
}

impl Record for Job {
    type Fields = JobFields;

    const COLLECTION: &'static str = "jobs";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_fields(id: RecordId, fields: JobFields) -> Self {
        let JobFields {
            company,
            position,
            status,
            date_applied,
            notes,
        } = fields;

        Self {
            id,
            company,
            position,
            status,
            date_applied,
            notes,
        }
    }
}

/// The job form as filled in by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobForm {
    /// The company applied to. Required.
    pub company: String,
    /// The position applied for. Required.
    pub position: String,
    /// The application status, chosen from a list.
    pub status: JobStatus,
    /// The application date as `YYYY-MM-DD`, or empty if the input was cleared.
    pub date_applied: String,
    /// Optional notes.
    #[serde(default)]
    pub notes: String,
}

impl Default for JobForm {
    fn default() -> Self {
        Self {
            company: String::new(),
            position: String::new(),
            status: JobStatus::default(),
            date_applied: format_iso_date(today()),
            notes: String::new(),
        }
    }
}

impl JobForm {
    /// Check the form and convert it into the fields of a job.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::Validation] if the company or
    /// position is empty, or the date is neither blank nor a valid
    /// `YYYY-MM-DD` date.
    pub fn validate(&self) -> Result<JobFields, Error> {
        if self.company.is_empty() || self.position.is_empty() {
            return Err(Error::validation(MISSING_FIELDS_MESSAGE));
        }

        Ok(JobFields {
            company: self.company.clone(),
            position: self.position.clone(),
            status: self.status,
            date_applied: parse_optional_iso_date(&self.date_applied)?,
            notes: self.notes.clone(),
        })
    }
}

impl From<&Job> for JobForm {
    fn from(job: &Job) -> Self {
        Self {
            company: job.company.clone(),
            position: job.position.clone(),
            status: job.status,
            date_applied: format_optional_iso_date(job.date_applied),
            notes: job.notes.clone(),
        }
    }
}

#[cfg(test)]
mod status_filter_tests {
    use crate::job::{JobStatus, StatusFilter};

    #[test]
    fn parses_all_and_each_status() {
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        for status in JobStatus::ALL {
            assert_eq!(
                status.as_str().parse::<StatusFilter>(),
                Ok(StatusFilter::Only(status))
            );
        }
    }

    #[test]
    fn rejects_unknown_status() {
        assert!("ghosted".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn only_matches_its_status() {
        let filter = StatusFilter::Only(JobStatus::Offer);

        assert!(filter.matches(JobStatus::Offer));
        assert!(!filter.matches(JobStatus::Applied));
        assert!(StatusFilter::All.matches(JobStatus::Rejected));
    }

    #[test]
    fn empty_list_message_names_the_filtered_status() {
        assert_eq!(
            StatusFilter::All.empty_list_message(),
            "No job applications yet."
        );
        assert_eq!(
            StatusFilter::Only(JobStatus::Interviewing).empty_list_message(),
            "No interviewing applications."
        );
    }
}
