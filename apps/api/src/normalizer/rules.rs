use chrono::{DateTime, NaiveDate};

use crate::models::worker::{CourseStatus, NormalizedCourse, NormalizedLearningPath};

const EMAIL_DOMAIN: &str = "example.com";

/// Lowercases and joins whitespace-separated words with `.`: "Jane  Doe" -> "jane.doe".
pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(|word| word.replace('@', "").to_lowercase())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

pub fn synthesize_email(name: &str) -> String {
    let local = slug(name);
    let local = if local.is_empty() { "worker".to_string() } else { local };
    format!("{local}@{EMAIL_DOMAIN}")
}

/// Keeps a stored address only when it has exactly one `@` with text on both sides.
pub fn resolve_email(stored: Option<&str>, name: &str) -> String {
    match stored.map(str::trim) {
        Some(email) if is_email_shaped(email) => email.to_string(),
        _ => synthesize_email(name),
    }
}

fn is_email_shaped(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        _ => false,
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp and keeps the calendar date.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

pub fn path_status(courses: &[NormalizedCourse]) -> CourseStatus {
    if courses.is_empty() {
        return CourseStatus::NotStarted;
    }
    if courses.iter().all(|c| c.status == CourseStatus::Completed) {
        CourseStatus::Completed
    } else if courses.iter().any(|c| c.status != CourseStatus::NotStarted) {
        CourseStatus::InProgress
    } else {
        CourseStatus::NotStarted
    }
}

/// Mean of per-course progress, rounded half away from zero. Empty paths are 0.
pub fn path_progress(courses: &[NormalizedCourse]) -> u8 {
    if courses.is_empty() {
        return 0;
    }
    let total: u32 = courses.iter().map(|c| c.status.progress()).sum();
    let mean = (total as f64 / courses.len() as f64).round();
    mean.clamp(0.0, 100.0) as u8
}

/// Recomputes the aggregate status and progress from the path's courses.
pub fn summarize(path: &mut NormalizedLearningPath) {
    path.status = path_status(&path.courses);
    path.progress = path_progress(&path.courses);
}
