use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Course lifecycle. Only ever derived from raw data or from a recorded completion.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CourseStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl CourseStatus {
    /// Accepts the spellings found across fixtures and database rows
    /// ("in_progress", "In Progress", "completed", ...). Unknown values are Not Started.
    pub fn parse_lenient(raw: &str) -> Self {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "inprogress" | "active" | "started" | "expanded" => CourseStatus::InProgress,
            "completed" | "complete" | "done" | "passed" => CourseStatus::Completed,
            _ => CourseStatus::NotStarted,
        }
    }

    /// Progress a single course contributes to its learning path.
    /// In Progress is a fixed midpoint since partial completion is never measured.
    pub fn progress(self) -> u32 {
        match self {
            CourseStatus::NotStarted => 0,
            CourseStatus::InProgress => 60,
            CourseStatus::Completed => 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCourse {
    pub id: String,
    pub title: String,
    pub status: CourseStatus,
    pub score: Option<f64>,
    pub completed_date: Option<NaiveDate>,
    pub duration: String,
    /// Per-course generated paths, in input order.
    pub learning_paths: Vec<GeneratedPath>,
}

/// A learning path generated for one course. `generatedAt` is kept as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPath {
    pub id: String,
    pub summary: Option<String>,
    pub generated_at: Option<String>,
    pub expanded: bool,
    pub modules: Vec<Value>,
}

impl GeneratedPath {
    /// Display title: the summary, or the id when there is none.
    pub fn title(&self) -> &str {
        self.summary.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedLearningPath {
    pub id: String,
    pub name: String,
    pub status: CourseStatus,
    /// Always within 0..=100.
    pub progress: u8,
    pub start_date: Option<NaiveDate>,
    pub estimated_completion: Option<NaiveDate>,
    pub courses: Vec<NormalizedCourse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillGap {
    pub skill: String,
    pub status: String,
    pub priority: String,
}

/// The one worker shape every route serves, whatever the raw record looked like.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedWorker {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    /// Passed through as stored; not reformatted.
    pub hire_date: Option<String>,
    pub learning_path: NormalizedLearningPath,
    pub skill_gaps: Vec<SkillGap>,
    pub last_assessment: Option<NaiveDate>,
    pub assessment_score: Option<f64>,
    pub next_review: Option<NaiveDate>,
}

/// A course title match, carrying enough context that callers never need a second lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseSearchHit {
    pub course_id: String,
    pub title: String,
    pub worker_id: String,
    pub worker_name: String,
    pub learning_path_id: String,
    pub learning_path_title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_status_spellings() {
        assert_eq!(CourseStatus::parse_lenient("in_progress"), CourseStatus::InProgress);
        assert_eq!(CourseStatus::parse_lenient("In Progress"), CourseStatus::InProgress);
        assert_eq!(CourseStatus::parse_lenient("COMPLETED"), CourseStatus::Completed);
        assert_eq!(CourseStatus::parse_lenient("draft"), CourseStatus::NotStarted);
        assert_eq!(CourseStatus::parse_lenient(""), CourseStatus::NotStarted);
    }

    #[test]
    fn test_status_serializes_with_display_names() {
        let json = serde_json::to_string(&CourseStatus::NotStarted).unwrap();
        assert_eq!(json, "\"Not Started\"");
        let parsed: CourseStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(parsed, CourseStatus::InProgress);
    }
}
