//! Worker view normalization.
//!
//! Every read path (worker list, worker detail, search, learning-path summaries)
//! goes through `normalize_worker` so that both raw shapes produce the same
//! `NormalizedWorker`. Functions here are pure and never fail: missing or
//! malformed optional fields collapse into documented defaults.

pub mod rules;
pub mod search;

use std::collections::HashSet;

use serde_json::Value;

use crate::models::raw::{
    RawCompactCourse, RawCourseLearningPath, RawLegacyCourse, RawSkillGap, RawWorker,
    RawWorkerShapeA, RawWorkerShapeB,
};
use crate::models::worker::{
    CourseStatus, GeneratedPath, NormalizedCourse, NormalizedLearningPath, NormalizedWorker,
    SkillGap,
};
use rules::{parse_iso_date, resolve_email, summarize};

pub use search::{search_courses, search_workers};

pub const DEFAULT_DEPARTMENT: &str = "Engineering";
pub const DEFAULT_POSITION: &str = "Employee";
pub const DEFAULT_DURATION: &str = "10 hours";

/// Normalizes one raw worker record of either shape.
pub fn normalize_worker(raw: &Value) -> NormalizedWorker {
    match RawWorker::from_value(raw) {
        RawWorker::Legacy(worker) => from_legacy(worker),
        RawWorker::Compact(worker) => from_compact(worker),
        RawWorker::Missing => empty_worker(),
    }
}

/// Normalizes every record, keeping input order. Records without an id and
/// repeated ids (after the first) are dropped.
pub fn normalize_company(raw_workers: &[Value]) -> Vec<NormalizedWorker> {
    let mut seen = HashSet::new();
    raw_workers
        .iter()
        .map(normalize_worker)
        .filter(|w| !w.id.is_empty() && seen.insert(w.id.clone()))
        .collect()
}

fn from_legacy(raw: RawWorkerShapeA) -> NormalizedWorker {
    let id = non_empty(raw.id).unwrap_or_default();
    let name = raw.name.unwrap_or_default();
    let path = raw.learning_path.unwrap_or_default();
    let path_id = non_empty(path.id).unwrap_or_else(|| format!("lp-{id}"));

    let courses = path
        .courses
        .into_iter()
        .enumerate()
        .map(|(idx, course)| legacy_course(&path_id, idx, course))
        .collect();

    let mut learning_path = NormalizedLearningPath {
        name: non_empty(path.name).unwrap_or_else(|| format!("{name} Learning Path")),
        id: path_id,
        status: CourseStatus::NotStarted,
        progress: 0,
        start_date: path.start_date.as_deref().and_then(parse_iso_date),
        estimated_completion: path.estimated_completion.as_deref().and_then(parse_iso_date),
        courses,
    };
    summarize(&mut learning_path);

    NormalizedWorker {
        email: resolve_email(raw.email.as_deref(), &name),
        department: non_empty(raw.department).unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string()),
        position: non_empty(raw.position).unwrap_or_else(|| DEFAULT_POSITION.to_string()),
        hire_date: non_empty(raw.hire_date),
        learning_path,
        skill_gaps: skill_gaps(raw.skill_gaps),
        last_assessment: raw.last_assessment.as_deref().and_then(parse_iso_date),
        assessment_score: raw.assessment_score,
        next_review: raw.next_review.as_deref().and_then(parse_iso_date),
        id,
        name,
    }
}

fn legacy_course(path_id: &str, idx: usize, raw: RawLegacyCourse) -> NormalizedCourse {
    let id = non_empty(raw.id).unwrap_or_else(|| fallback_course_id(path_id, idx));
    NormalizedCourse {
        title: non_empty(raw.title).unwrap_or_else(|| id.clone()),
        status: raw
            .status
            .as_deref()
            .map(CourseStatus::parse_lenient)
            .unwrap_or_default(),
        score: raw.score,
        completed_date: raw.completed_date.as_deref().and_then(parse_iso_date),
        duration: non_empty(raw.duration).unwrap_or_else(|| DEFAULT_DURATION.to_string()),
        learning_paths: generated_paths(&id, raw.learning_paths),
        id,
    }
}

fn from_compact(raw: RawWorkerShapeB) -> NormalizedWorker {
    let id = non_empty(raw.worker_id).unwrap_or_default();
    let name = raw.worker_name.unwrap_or_default();
    let path_id = format!("lp-{id}");

    // The path starts when the first course's first entry was generated.
    let start_date = raw
        .courses
        .first()
        .and_then(|c| c.learning_paths.first())
        .and_then(|lp| lp.generated_at.as_deref())
        .and_then(parse_iso_date);

    let courses = raw
        .courses
        .into_iter()
        .enumerate()
        .map(|(idx, course)| compact_course(&path_id, idx, course))
        .collect();

    let mut learning_path = NormalizedLearningPath {
        id: path_id,
        name: format!("{name} Learning Path"),
        status: CourseStatus::NotStarted,
        progress: 0,
        start_date,
        estimated_completion: None,
        courses,
    };
    summarize(&mut learning_path);

    NormalizedWorker {
        email: resolve_email(raw.email.as_deref(), &name),
        department: DEFAULT_DEPARTMENT.to_string(),
        position: DEFAULT_POSITION.to_string(),
        hire_date: None,
        learning_path,
        skill_gaps: skill_gaps(raw.skill_gaps),
        last_assessment: None,
        assessment_score: None,
        next_review: None,
        id,
        name,
    }
}

fn compact_course(path_id: &str, idx: usize, raw: RawCompactCourse) -> NormalizedCourse {
    let id = non_empty(raw.id).unwrap_or_else(|| fallback_course_id(path_id, idx));
    let expanded = raw.learning_paths.first().is_some_and(|lp| lp.expanded);
    NormalizedCourse {
        title: non_empty(raw.name).unwrap_or_else(|| id.clone()),
        status: if expanded {
            CourseStatus::InProgress
        } else {
            CourseStatus::NotStarted
        },
        score: None,
        completed_date: None,
        duration: DEFAULT_DURATION.to_string(),
        learning_paths: generated_paths(&id, raw.learning_paths),
        id,
    }
}

fn generated_paths(course_id: &str, raw: Vec<RawCourseLearningPath>) -> Vec<GeneratedPath> {
    raw.into_iter()
        .enumerate()
        .map(|(idx, lp)| GeneratedPath {
            id: non_empty(lp.id).unwrap_or_else(|| format!("{course_id}-lp-{}", idx + 1)),
            summary: non_empty(lp.summary),
            generated_at: non_empty(lp.generated_at),
            expanded: lp.expanded,
            modules: lp.modules,
        })
        .collect()
}

fn skill_gaps(raw: Vec<RawSkillGap>) -> Vec<SkillGap> {
    raw.into_iter()
        .filter_map(|gap| {
            Some(SkillGap {
                skill: non_empty(gap.skill)?,
                status: non_empty(gap.status).unwrap_or_else(|| "Not Started".to_string()),
                priority: non_empty(gap.priority).unwrap_or_else(|| "Medium".to_string()),
            })
        })
        .collect()
}

fn empty_worker() -> NormalizedWorker {
    from_compact(RawWorkerShapeB::default())
}

fn fallback_course_id(path_id: &str, idx: usize) -> String {
    format!("{path_id}-course-{}", idx + 1)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
