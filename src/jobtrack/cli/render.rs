//! Terminal output for list and stats.
//!
//! Layout math (width, truncation, padding) is Unicode-aware; colors follow the
//! status group of each application.

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use jobtrack::model::{JobApplication, JobStatus, RecordStatus, StatusGroup};
use jobtrack::stats::Summary;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
const ID_WIDTH: usize = 8;
const STATUS_WIDTH: usize = 30;

pub fn render_job_list(records: &[&JobApplication]) -> String {
    if records.is_empty() {
        return "No job applications found.".to_string();
    }

    let mut lines = Vec::with_capacity(records.len());
    for record in records {
        let short_id: String = record.id.chars().take(ID_WIDTH).collect();
        let id_col = format!("{:<width$}  ", short_id, width = ID_WIDTH);

        let status_label = truncate_to_width(&record.status.label(), STATUS_WIDTH);
        let status_pad = STATUS_WIDTH.saturating_sub(status_label.width());
        let status_col = format!("{}{}", status_label, " ".repeat(status_pad));

        let fixed = id_col.width() + STATUS_WIDTH + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let headline = format!("{} · {}", record.company_name, record.job_title);
        let headline = truncate_to_width(&headline, available);
        let padding = available.saturating_sub(headline.width());

        lines.push(format!(
            "{}{}{}  {}{}",
            id_col.dimmed(),
            headline,
            " ".repeat(padding),
            color_status(&record.status, &status_col),
            format_time_ago(record.date_applied).dimmed()
        ));
    }
    lines.join("\n")
}

pub fn render_summary(summary: &Summary) -> String {
    let mut out = vec![
        format!("{:<20}{}", "Applications", summary.total),
        format!(
            "{:<20}{}  ({}% of applications)",
            "Interviews", summary.interviews, summary.interview_rate
        ),
        format!(
            "{:<20}{}  ({}% of interviews)",
            "Offers", summary.offers, summary.offer_rate
        ),
        format!(
            "{:<20}{}  (including {} ghosted)",
            "Rejected",
            summary.rejected + summary.ghosted,
            summary.ghosted
        ),
    ];
    if summary.applied > 0 {
        out.push(format!("{:<20}{}", "Other statuses", summary.applied));
    }

    if !summary.recent.is_empty() {
        out.push(String::new());
        out.push("Recent applications".bold().to_string());
        let recent: Vec<&JobApplication> = summary.recent.iter().collect();
        out.push(render_job_list(&recent));
    }
    out.join("\n")
}

fn color_status(status: &RecordStatus, text: &str) -> ColoredString {
    match status.group() {
        Some(StatusGroup::Rejected) => text.red(),
        Some(StatusGroup::Interviewing) => text.blue(),
        Some(StatusGroup::Offer) if *status == JobStatus::OfferDeclined => text.yellow(),
        Some(StatusGroup::Offer) => text.green(),
        Some(StatusGroup::Ghosted) => text.dimmed(),
        None => text.normal(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
