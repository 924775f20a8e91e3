//! Raw worker records as they arrive from fixtures or database rows.
//!
//! Two incompatible layouts exist for the same logical worker. Decoding here is
//! tolerant: a missing or wrongly-typed field becomes `None` or an empty list,
//! never an error. Defaults are applied later by the normalizer.
//!
//! Stored aggregates (a legacy path's `status`/`progress`) are not decoded; the
//! normalizer recomputes them from the courses.

use serde::Deserialize;
use serde_json::Value;

/// Legacy flat shape: `{ id, name, email, department, learningPath: { courses } }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawWorkerShapeA {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub hire_date: Option<String>,
    pub learning_path: Option<RawLegacyPath>,
    pub skill_gaps: Vec<RawSkillGap>,
    pub last_assessment: Option<String>,
    pub assessment_score: Option<f64>,
    pub next_review: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLegacyPath {
    pub id: Option<String>,
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub estimated_completion: Option<String>,
    pub courses: Vec<RawLegacyCourse>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLegacyCourse {
    pub id: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub score: Option<f64>,
    pub completed_date: Option<String>,
    pub duration: Option<String>,
    pub learning_paths: Vec<RawCourseLearningPath>,
}

/// Compact shape: `{ workerId, workerName, email?, courses: [{ learningPaths }] }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawWorkerShapeB {
    pub worker_id: Option<String>,
    pub worker_name: Option<String>,
    pub email: Option<String>,
    pub courses: Vec<RawCompactCourse>,
    pub skill_gaps: Vec<RawSkillGap>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCompactCourse {
    pub id: Option<String>,
    pub name: Option<String>,
    pub learning_paths: Vec<RawCourseLearningPath>,
}

/// One generated learning-path entry attached to a compact-shape course.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCourseLearningPath {
    pub id: Option<String>,
    pub summary: Option<String>,
    pub generated_at: Option<String>,
    pub expanded: bool,
    pub modules: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSkillGap {
    pub skill: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawWorker {
    Legacy(RawWorkerShapeA),
    Compact(RawWorkerShapeB),
    /// `null` or a non-object value.
    Missing,
}

impl RawWorker {
    /// Detects the shape: `workerId` means compact, `id` or `learningPath` means legacy.
    /// Objects carrying neither are decoded as compact so every field takes its default.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return RawWorker::Missing;
        };
        let is_legacy = !obj.contains_key("workerId")
            && (obj.contains_key("id") || obj.contains_key("learningPath"));
        if is_legacy {
            RawWorker::Legacy(RawWorkerShapeA::from_value(value))
        } else {
            RawWorker::Compact(RawWorkerShapeB::from_value(value))
        }
    }
}

impl RawWorkerShapeA {
    pub fn from_value(v: &Value) -> Self {
        Self {
            id: text(v, "id"),
            name: text(v, "name").or_else(|| text(v, "workerName")),
            email: text(v, "email"),
            department: text(v, "department"),
            position: text(v, "position"),
            hire_date: text(v, "hireDate").or_else(|| text(v, "hire_date")),
            learning_path: v
                .get("learningPath")
                .filter(|lp| lp.is_object())
                .map(RawLegacyPath::from_value),
            skill_gaps: list(v, "skillGaps", RawSkillGap::from_value),
            last_assessment: text(v, "lastAssessment"),
            assessment_score: number(v, "assessmentScore"),
            next_review: text(v, "nextReview"),
        }
    }
}

impl RawLegacyPath {
    pub fn from_value(v: &Value) -> Self {
        Self {
            id: text(v, "id"),
            name: text(v, "name").or_else(|| text(v, "title")),
            start_date: text(v, "startDate"),
            estimated_completion: text(v, "estimatedCompletion"),
            courses: list(v, "courses", RawLegacyCourse::from_value),
        }
    }
}

impl RawLegacyCourse {
    pub fn from_value(v: &Value) -> Self {
        Self {
            id: text(v, "id"),
            title: text(v, "title").or_else(|| text(v, "name")),
            status: text(v, "status"),
            score: number(v, "score"),
            completed_date: text(v, "completedDate"),
            duration: text(v, "duration"),
            learning_paths: list(v, "learningPaths", RawCourseLearningPath::from_value),
        }
    }
}

impl RawWorkerShapeB {
    pub fn from_value(v: &Value) -> Self {
        Self {
            worker_id: text(v, "workerId"),
            worker_name: text(v, "workerName").or_else(|| text(v, "name")),
            email: text(v, "email"),
            courses: list(v, "courses", RawCompactCourse::from_value),
            skill_gaps: list(v, "skillGaps", RawSkillGap::from_value),
        }
    }
}

impl RawCompactCourse {
    pub fn from_value(v: &Value) -> Self {
        Self {
            id: text(v, "id"),
            name: text(v, "name").or_else(|| text(v, "title")),
            learning_paths: list(v, "learningPaths", RawCourseLearningPath::from_value),
        }
    }
}

impl RawCourseLearningPath {
    pub fn from_value(v: &Value) -> Self {
        Self {
            id: text(v, "id"),
            summary: text(v, "summary"),
            generated_at: text(v, "generatedAt"),
            expanded: v.get("expanded").and_then(Value::as_bool).unwrap_or(false),
            modules: list(v, "modules", Value::clone),
        }
    }
}

impl RawSkillGap {
    pub fn from_value(v: &Value) -> Self {
        Self {
            skill: text(v, "skill").or_else(|| text(v, "skill_name")),
            status: text(v, "status"),
            priority: text(v, "priority"),
        }
    }
}

/// Company fixture document. Workers stay untyped until normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCompany {
    pub company_id: Option<String>,
    pub company_name: Option<String>,
    pub workers: Vec<Value>,
    pub company_analytics: Value,
}

/// Strings pass through, numbers are stringified, everything else is absent.
fn text(v: &Value, key: &str) -> Option<String> {
    match v.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(v: &Value, key: &str) -> Option<f64> {
    match v.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn list<T>(v: &Value, key: &str, decode: fn(&Value) -> T) -> Vec<T> {
    v.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().map(decode).collect())
        .unwrap_or_default()
}
