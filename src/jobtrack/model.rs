//! # Domain Model
//!
//! The single entity is [`JobApplication`]: one row in the tracker. Everything the
//! store persists is a `Vec<JobApplication>` serialized as a JSON array.
//!
//! ## Wire Format
//!
//! Field names are camelCase (`companyName`, `dateApplied`, ...) so that files written
//! by earlier versions of the tracker load unchanged. Optional text fields are
//! omitted when absent.
//!
//! Timestamps are written as RFC 3339 with millisecond precision and a `Z` suffix:
//!
//! ```text
//! 2024-01-01T00:00:00.000Z
//! ```
//!
//! On read, any RFC 3339 value is accepted, as well as a bare `YYYY-MM-DD` date
//! (taken as midnight UTC). Values are truncated to milliseconds on the way in so
//! the in-memory collection always equals what a reload would produce.
//!
//! Stored records are read leniently: unknown keys are kept in
//! [`JobApplication::extra`], status strings outside [`JobStatus`] load as
//! [`RecordStatus::Other`], and missing timestamps fall back to each other.
//!
//! ## Server-Assigned Fields
//!
//! `id`, `createdAt` and `updatedAt` are never taken from callers:
//! - [`NewJobApplication`] carries everything else and is turned into a record by
//!   [`JobApplication::new`].
//! - [`JobApplicationPatch`] ignores those keys entirely.

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::JobTrackError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    InterviewingPhoneScreen,
    InterviewingTechnical,
    InterviewingOnsite,
    InterviewingFinalRound,
    OfferReceived,
    OfferAccepted,
    OfferDeclined,
    Ghosted,
    RejectedApplication,
    RejectedResumeScreening,
    RejectedPhoneScreen,
    RejectedTechnicalInterview,
    RejectedOnsite,
    RejectedFinalRound,
    RejectedOfferNegotiation,
}

impl JobStatus {
    pub const ALL: [JobStatus; 15] = [
        JobStatus::InterviewingPhoneScreen,
        JobStatus::InterviewingTechnical,
        JobStatus::InterviewingOnsite,
        JobStatus::InterviewingFinalRound,
        JobStatus::OfferReceived,
        JobStatus::OfferAccepted,
        JobStatus::OfferDeclined,
        JobStatus::Ghosted,
        JobStatus::RejectedApplication,
        JobStatus::RejectedResumeScreening,
        JobStatus::RejectedPhoneScreen,
        JobStatus::RejectedTechnicalInterview,
        JobStatus::RejectedOnsite,
        JobStatus::RejectedFinalRound,
        JobStatus::RejectedOfferNegotiation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::InterviewingPhoneScreen => "interviewing_phone_screen",
            JobStatus::InterviewingTechnical => "interviewing_technical",
            JobStatus::InterviewingOnsite => "interviewing_onsite",
            JobStatus::InterviewingFinalRound => "interviewing_final_round",
            JobStatus::OfferReceived => "offer_received",
            JobStatus::OfferAccepted => "offer_accepted",
            JobStatus::OfferDeclined => "offer_declined",
            JobStatus::Ghosted => "ghosted",
            JobStatus::RejectedApplication => "rejected_application",
            JobStatus::RejectedResumeScreening => "rejected_resume_screening",
            JobStatus::RejectedPhoneScreen => "rejected_phone_screen",
            JobStatus::RejectedTechnicalInterview => "rejected_technical_interview",
            JobStatus::RejectedOnsite => "rejected_onsite",
            JobStatus::RejectedFinalRound => "rejected_final_round",
            JobStatus::RejectedOfferNegotiation => "rejected_offer_negotiation",
        }
    }

    pub fn group(&self) -> StatusGroup {
        match self {
            JobStatus::InterviewingPhoneScreen
            | JobStatus::InterviewingTechnical
            | JobStatus::InterviewingOnsite
            | JobStatus::InterviewingFinalRound => StatusGroup::Interviewing,
            JobStatus::OfferReceived | JobStatus::OfferAccepted | JobStatus::OfferDeclined => {
                StatusGroup::Offer
            }
            JobStatus::Ghosted => StatusGroup::Ghosted,
            JobStatus::RejectedApplication
            | JobStatus::RejectedResumeScreening
            | JobStatus::RejectedPhoneScreen
            | JobStatus::RejectedTechnicalInterview
            | JobStatus::RejectedOnsite
            | JobStatus::RejectedFinalRound
            | JobStatus::RejectedOfferNegotiation => StatusGroup::Rejected,
        }
    }

    /// Human label: underscores become spaces, first letter capitalized.
    pub fn label(&self) -> String {
        capitalize_words(self.as_str())
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = JobTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| JobTrackError::MalformedInput(format!("Unknown status: {}", s)))
    }
}

/// Coarse buckets used by the list filter and the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusGroup {
    Interviewing,
    Offer,
    Rejected,
    Ghosted,
}

impl StatusGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusGroup::Interviewing => "interviewing",
            StatusGroup::Offer => "offers",
            StatusGroup::Rejected => "rejected",
            StatusGroup::Ghosted => "ghosted",
        }
    }
}

impl fmt::Display for StatusGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusGroup {
    type Err = JobTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interviewing" => Ok(StatusGroup::Interviewing),
            "offers" | "offer" => Ok(StatusGroup::Offer),
            "rejected" => Ok(StatusGroup::Rejected),
            "ghosted" => Ok(StatusGroup::Ghosted),
            other => Err(JobTrackError::MalformedInput(format!(
                "Unknown status group: {}",
                other
            ))),
        }
    }
}

/// Status as stored on a record.
///
/// Files written by other tools may carry status strings outside [`JobStatus`].
/// Those load as `Other` and are written back unchanged; new input through the
/// bridge is always one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordStatus {
    Known(JobStatus),
    Other(String),
}

impl RecordStatus {
    pub fn known(&self) -> Option<JobStatus> {
        match self {
            RecordStatus::Known(status) => Some(*status),
            RecordStatus::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecordStatus::Known(status) => status.as_str(),
            RecordStatus::Other(raw) => raw,
        }
    }

    /// `None` for statuses outside the known set.
    pub fn group(&self) -> Option<StatusGroup> {
        self.known().map(|status| status.group())
    }

    pub fn label(&self) -> String {
        match self {
            RecordStatus::Known(status) => status.label(),
            RecordStatus::Other(raw) => capitalize_words(raw),
        }
    }
}

impl Default for RecordStatus {
    fn default() -> Self {
        RecordStatus::Other(String::new())
    }
}

impl From<JobStatus> for RecordStatus {
    fn from(status: JobStatus) -> Self {
        RecordStatus::Known(status)
    }
}

impl PartialEq<JobStatus> for RecordStatus {
    fn eq(&self, other: &JobStatus) -> bool {
        self.known() == Some(*other)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One persisted record.
///
/// Keys this version does not know about are kept in `extra` and written back
/// as they were read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredApplication")]
pub struct JobApplication {
    pub id: String,
    pub company_name: String,
    pub job_title: String,
    #[serde(with = "timestamp")]
    pub date_applied: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_link: Option<String>,
    pub status: RecordStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Read-side shape of a record: every field may be missing.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredApplication {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    job_title: String,
    #[serde(default, deserialize_with = "optional_timestamp")]
    date_applied: Option<DateTime<Utc>>,
    #[serde(default)]
    job_link: Option<String>,
    #[serde(default)]
    status: RecordStatus,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    industry: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    salary: Option<String>,
    #[serde(default, deserialize_with = "optional_timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "optional_timestamp")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<StoredApplication> for JobApplication {
    fn from(stored: StoredApplication) -> Self {
        // Missing stamps fall back to each other, then to the epoch.
        let created_at = stored
            .created_at
            .or(stored.updated_at)
            .or(stored.date_applied)
            .unwrap_or_default();
        let id = match stored.id {
            Some(id) if !id.is_empty() => id,
            _ => {
                let id = new_record_id();
                tracing::warn!(%id, "stored record had no id, assigned one");
                id
            }
        };
        Self {
            id,
            company_name: stored.company_name,
            job_title: stored.job_title,
            date_applied: stored.date_applied.unwrap_or(created_at),
            job_link: stored.job_link,
            status: stored.status,
            notes: stored.notes,
            industry: stored.industry,
            location: stored.location,
            salary: stored.salary,
            created_at,
            updated_at: stored.updated_at.unwrap_or(created_at),
            extra: stored.extra,
        }
    }
}

impl JobApplication {
    /// Builds a fresh record: new id, `created_at == updated_at == now`.
    pub fn new(fields: NewJobApplication) -> Self {
        let now = now();
        Self {
            id: new_record_id(),
            company_name: fields.company_name,
            job_title: fields.job_title,
            date_applied: fields.date_applied,
            job_link: fields.job_link,
            status: fields.status.into(),
            notes: fields.notes,
            industry: fields.industry,
            location: fields.location,
            salary: fields.salary,
            created_at: now,
            updated_at: now,
            extra: Map::new(),
        }
    }

    /// Applies a patch and refreshes `updated_at`. Identity fields are untouched.
    pub fn apply(&mut self, patch: &JobApplicationPatch) {
        if let Some(company_name) = &patch.company_name {
            self.company_name = company_name.clone();
        }
        if let Some(job_title) = &patch.job_title {
            self.job_title = job_title.clone();
        }
        if let Some(date_applied) = patch.date_applied {
            self.date_applied = date_applied;
        }
        if let Some(status) = patch.status {
            self.status = status.into();
        }
        if let Some(job_link) = &patch.job_link {
            self.job_link = job_link.clone();
        }
        if let Some(notes) = &patch.notes {
            self.notes = notes.clone();
        }
        if let Some(industry) = &patch.industry {
            self.industry = industry.clone();
        }
        if let Some(location) = &patch.location {
            self.location = location.clone();
        }
        if let Some(salary) = &patch.salary {
            self.salary = salary.clone();
        }
        self.updated_at = next_update_stamp(self.updated_at);
    }
}

/// Caller-supplied fields for a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJobApplication {
    pub company_name: String,
    pub job_title: String,
    #[serde(with = "timestamp")]
    pub date_applied: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_link: Option<String>,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
}

impl NewJobApplication {
    pub fn new(
        company_name: impl Into<String>,
        job_title: impl Into<String>,
        date_applied: DateTime<Utc>,
        status: JobStatus,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            job_title: job_title.into(),
            date_applied,
            job_link: None,
            status,
            notes: None,
            industry: None,
            location: None,
            salary: None,
        }
    }
}

/// Shallow partial update.
///
/// For the optional text fields the outer `Option` says whether the key was sent;
/// the inner one distinguishes a value from an explicit `null`, which clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicationPatch {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub date_applied: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub job_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub industry: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub salary: Option<Option<String>>,
}

impl JobApplicationPatch {
    pub fn status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

fn capitalize_words(raw: &str) -> String {
    let spaced = raw.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Opaque record id: a hyphenated UUID v4 (122 random bits).
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time at the precision timestamps are persisted with.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// `max(now, previous + 1ms)`, so `updated_at` strictly increases once serialized.
pub fn next_update_stamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    let floor = previous + Duration::milliseconds(1);
    if now >= floor {
        now
    } else {
        floor
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc).trunc_subsecs(3));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(format!("invalid ISO-8601 timestamp: {:?}", raw))
}

pub mod timestamp {
    use super::{format_timestamp, parse_timestamp};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use std::collections::HashSet;

    fn sample() -> JobApplication {
        JobApplication::new(NewJobApplication::new(
            "Acme",
            "Engineer",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            JobStatus::InterviewingPhoneScreen,
        ))
    }

    #[test]
    fn status_wire_names_match_labels() {
        for status in JobStatus::ALL {
            let wire = serde_json::to_value(status).unwrap();
            assert_eq!(wire, json!(status.as_str()));
            assert_eq!(status.as_str().parse::<JobStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_malformed_input() {
        let err = "applied".parse::<JobStatus>().unwrap_err();
        assert!(matches!(err, JobTrackError::MalformedInput(_)));
    }

    #[test]
    fn every_status_has_a_group() {
        assert_eq!(
            JobStatus::InterviewingOnsite.group(),
            StatusGroup::Interviewing
        );
        assert_eq!(JobStatus::OfferDeclined.group(), StatusGroup::Offer);
        assert_eq!(JobStatus::Ghosted.group(), StatusGroup::Ghosted);
        for status in JobStatus::ALL {
            let prefix_matches = match status.group() {
                StatusGroup::Interviewing => status.as_str().starts_with("interviewing_"),
                StatusGroup::Offer => status.as_str().starts_with("offer_"),
                StatusGroup::Rejected => status.as_str().starts_with("rejected_"),
                StatusGroup::Ghosted => status.as_str() == "ghosted",
            };
            assert!(prefix_matches, "{} is in the wrong group", status);
        }
    }

    #[test]
    fn label_is_capitalized_and_spaced() {
        assert_eq!(
            JobStatus::RejectedTechnicalInterview.label(),
            "Rejected technical interview"
        );
        assert_eq!(JobStatus::Ghosted.label(), "Ghosted");
    }

    #[test]
    fn new_record_stamps_identity_fields() {
        let record = sample();
        assert!(!record.id.is_empty());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<String> = (0..10_000).map(|_| new_record_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn serializes_camel_case_with_millisecond_timestamps() {
        let record = sample();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["companyName"], "Acme");
        assert_eq!(value["dateApplied"], "2024-01-01T00:00:00.000Z");
        assert_eq!(value["status"], "interviewing_phone_screen");
        assert!(value.get("notes").is_none());
        let created = value["createdAt"].as_str().unwrap();
        assert!(created.ends_with('Z'));
        assert_eq!(created.len(), "2024-01-01T00:00:00.000Z".len());
    }

    #[test]
    fn reads_records_written_by_older_versions() {
        let raw = json!({
            "id": "k3j2h4g5abc",
            "companyName": "Initech",
            "jobTitle": "TPS Analyst",
            "dateApplied": "2023-05-02",
            "jobLink": "",
            "status": "ghosted",
            "createdAt": "2023-05-02T10:11:12.123Z",
            "updatedAt": "2023-05-03T10:11:12.456789Z"
        });
        let record: JobApplication = serde_json::from_value(raw).unwrap();
        assert_eq!(record.id, "k3j2h4g5abc");
        assert_eq!(record.job_link.as_deref(), Some(""));
        assert_eq!(
            record.date_applied,
            Utc.with_ymd_and_hms(2023, 5, 2, 0, 0, 0).unwrap()
        );
        assert_eq!(
            format_timestamp(&record.updated_at),
            "2023-05-03T10:11:12.456Z"
        );
    }

    #[test]
    fn stored_record_keeps_unlisted_status_and_unknown_keys() {
        let raw = json!({
            "id": "abc",
            "companyName": "Acme",
            "jobTitle": "Engineer",
            "dateApplied": "2024-01-01T00:00:00.000Z",
            "status": "applied",
            "contactEmail": "hr@acme.test",
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-02T00:00:00.000Z"
        });
        let record: JobApplication = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.status, RecordStatus::Other("applied".into()));
        assert_eq!(record.status.group(), None);
        assert_eq!(record.extra["contactEmail"], "hr@acme.test");

        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn stored_record_without_stamps_falls_back_to_date_applied() {
        let record: JobApplication = serde_json::from_value(json!({
            "id": "abc",
            "companyName": "Acme",
            "jobTitle": "Engineer",
            "dateApplied": "2024-03-04",
            "status": "ghosted"
        }))
        .unwrap();
        let applied = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        assert_eq!(record.created_at, applied);
        assert_eq!(record.updated_at, applied);
        assert!(record.extra.is_empty());
    }

    #[test]
    fn stored_record_without_id_gets_one() {
        let record: JobApplication = serde_json::from_value(json!({
            "companyName": "Acme",
            "status": "ghosted"
        }))
        .unwrap();
        assert!(!record.id.is_empty());
        assert_eq!(record.job_title, "");
    }

    #[test]
    fn new_application_requires_core_fields() {
        let missing_title = json!({
            "companyName": "Acme",
            "dateApplied": "2024-01-01T00:00:00.000Z",
            "status": "ghosted"
        });
        assert!(serde_json::from_value::<NewJobApplication>(missing_title).is_err());

        let unlisted_status = json!({
            "companyName": "Acme",
            "jobTitle": "Engineer",
            "dateApplied": "2024-01-01T00:00:00.000Z",
            "status": "applied"
        });
        assert!(serde_json::from_value::<NewJobApplication>(unlisted_status).is_err());
    }

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch: JobApplicationPatch = serde_json::from_value(json!({
            "id": "ignored",
            "notes": null,
            "location": "Remote",
            "createdAt": "1999-01-01T00:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(patch.notes, Some(None));
        assert_eq!(patch.location, Some(Some("Remote".to_string())));
        assert_eq!(patch.salary, None);
        assert_eq!(patch.company_name, None);
    }

    #[test]
    fn apply_merges_shallowly_and_preserves_identity() {
        let mut record = sample();
        record.notes = Some("first call went well".into());
        let id = record.id.clone();
        let created_at = record.created_at;
        let before = record.updated_at;

        let patch = JobApplicationPatch {
            status: Some(JobStatus::OfferReceived),
            notes: Some(None),
            ..JobApplicationPatch::default()
        };
        record.apply(&patch);

        assert_eq!(record.id, id);
        assert_eq!(record.created_at, created_at);
        assert_eq!(record.company_name, "Acme");
        assert_eq!(record.status, JobStatus::OfferReceived);
        assert_eq!(record.notes, None);
        assert!(record.updated_at > before);
    }

    #[test]
    fn update_stamp_never_goes_backwards() {
        let future = now() + Duration::hours(1);
        let next = next_update_stamp(future);
        assert_eq!(next, future + Duration::milliseconds(1));
    }

    #[test]
    fn rejects_garbage_timestamps() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("2024-13-40").is_err());
    }
}
