use crate::model::{JobApplication, StatusGroup};
use serde::Serialize;

/// Dashboard numbers computed over the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub interviews: usize,
    pub offers: usize,
    pub rejected: usize,
    pub ghosted: usize,
    /// Records whose status is outside the known set.
    pub applied: usize,
    /// Percent of applications that reached an interview stage.
    pub interview_rate: u32,
    /// Percent of interviews that turned into an offer.
    pub offer_rate: u32,
    pub recent: Vec<JobApplication>,
}

impl Summary {
    pub fn compute(records: &[JobApplication], recent_limit: usize) -> Self {
        let mut summary = Summary {
            total: records.len(),
            interviews: 0,
            offers: 0,
            rejected: 0,
            ghosted: 0,
            applied: 0,
            interview_rate: 0,
            offer_rate: 0,
            recent: Vec::new(),
        };

        for record in records {
            match record.status.group() {
                Some(StatusGroup::Interviewing) => summary.interviews += 1,
                Some(StatusGroup::Offer) => summary.offers += 1,
                Some(StatusGroup::Rejected) => summary.rejected += 1,
                Some(StatusGroup::Ghosted) => summary.ghosted += 1,
                None => summary.applied += 1,
            }
        }

        summary.interview_rate = percent(summary.interviews, summary.total);
        summary.offer_rate = percent(summary.offers, summary.interviews);

        let mut recent: Vec<&JobApplication> = records.iter().collect();
        recent.sort_by(|a, b| b.date_applied.cmp(&a.date_applied));
        summary.recent = recent.into_iter().take(recent_limit).cloned().collect();

        summary
    }
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}
