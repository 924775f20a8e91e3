use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::models::worker::{CourseStatus, GeneratedPath, NormalizedCourse, NormalizedWorker};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathSummary {
    pub id: String,
    pub name: String,
    pub worker_id: String,
    pub worker_name: String,
    pub status: CourseStatus,
    pub progress: u8,
    pub start_date: Option<NaiveDate>,
    pub estimated_completion: Option<NaiveDate>,
    pub course_count: usize,
    pub generated_paths: Vec<GeneratedPathRef>,
}

/// Listing entry for a path generated for one of the worker's courses.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPathRef {
    pub id: String,
    pub summary: Option<String>,
    pub course_id: String,
    pub course_title: String,
    pub expanded: bool,
    pub generated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathDetail {
    #[serde(flatten)]
    pub summary: LearningPathSummary,
    pub courses: Vec<NormalizedCourse>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IdName {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CourseRef {
    pub id: String,
    pub title: String,
}

/// A generated path together with the course and worker it belongs to.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPathDetail {
    pub id: String,
    pub summary: Option<String>,
    pub generated_at: Option<String>,
    pub expanded: bool,
    pub modules: Vec<Value>,
    pub course: CourseRef,
    pub worker: IdName,
}

/// Either a worker's learning path or one generated for a single course.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum LearningPathView {
    Worker(LearningPathDetail),
    Generated(GeneratedPathDetail),
}

impl LearningPathSummary {
    pub fn of(worker: &NormalizedWorker) -> Self {
        let path = &worker.learning_path;
        Self {
            id: path.id.clone(),
            name: path.name.clone(),
            worker_id: worker.id.clone(),
            worker_name: worker.name.clone(),
            status: path.status,
            progress: path.progress,
            start_date: path.start_date,
            estimated_completion: path.estimated_completion,
            course_count: path.courses.len(),
            generated_paths: path
                .courses
                .iter()
                .flat_map(|course| {
                    course.learning_paths.iter().map(move |lp| GeneratedPathRef {
                        id: lp.id.clone(),
                        summary: lp.summary.clone(),
                        course_id: course.id.clone(),
                        course_title: course.title.clone(),
                        expanded: lp.expanded,
                        generated_at: lp.generated_at.clone(),
                    })
                })
                .collect(),
        }
    }
}

impl GeneratedPathDetail {
    fn of(worker: &NormalizedWorker, course: &NormalizedCourse, lp: &GeneratedPath) -> Self {
        Self {
            id: lp.id.clone(),
            summary: lp.summary.clone(),
            generated_at: lp.generated_at.clone(),
            expanded: lp.expanded,
            modules: lp.modules.clone(),
            course: CourseRef {
                id: course.id.clone(),
                title: course.title.clone(),
            },
            worker: IdName {
                id: worker.id.clone(),
                name: worker.name.clone(),
            },
        }
    }
}

/// One summary per worker, in worker order.
pub fn learning_path_summaries(workers: &[NormalizedWorker]) -> Vec<LearningPathSummary> {
    workers.iter().map(LearningPathSummary::of).collect()
}

/// Looks up a worker's path by id first, then the paths generated for each course.
pub fn find_learning_path(workers: &[NormalizedWorker], id: &str) -> Option<LearningPathView> {
    if let Some(worker) = workers.iter().find(|w| w.learning_path.id == id) {
        return Some(LearningPathView::Worker(LearningPathDetail {
            summary: LearningPathSummary::of(worker),
            courses: worker.learning_path.courses.clone(),
        }));
    }
    workers.iter().find_map(|worker| {
        worker.learning_path.courses.iter().find_map(|course| {
            course
                .learning_paths
                .iter()
                .find(|lp| lp.id == id)
                .map(|lp| LearningPathView::Generated(GeneratedPathDetail::of(worker, course, lp)))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize_company;
    use serde_json::json;

    fn workers() -> Vec<NormalizedWorker> {
        normalize_company(&[
            json!({ "workerId": "w1", "workerName": "John Smith", "courses": [
                { "id": "c1", "name": "JS", "learningPaths": [
                    { "id": "lp-js", "summary": "closures", "expanded": true,
                      "generatedAt": "2024-01-15", "modules": ["Scope"] }
                ]},
                { "id": "c2", "name": "TS" }
            ]}),
            json!({ "id": "w2", "name": "Ann Lee", "learningPath": { "id": "lp-ann", "courses": [] } }),
        ])
    }

    #[test]
    fn test_summary_per_worker() {
        let summaries = learning_path_summaries(&workers());
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, "lp-w1");
        assert_eq!(summaries[0].course_count, 2);
        assert_eq!(summaries[0].progress, 30);
        assert_eq!(summaries[0].status, CourseStatus::InProgress);
        assert_eq!(summaries[1].worker_name, "Ann Lee");
        assert_eq!(summaries[1].status, CourseStatus::NotStarted);
    }

    #[test]
    fn test_summary_lists_generated_paths() {
        let summaries = learning_path_summaries(&workers());
        let generated = &summaries[0].generated_paths;
        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].id, "lp-js");
        assert_eq!(generated[0].course_id, "c1");
        assert_eq!(generated[0].course_title, "JS");
        assert!(summaries[1].generated_paths.is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let Some(LearningPathView::Worker(detail)) = find_learning_path(&workers(), "lp-ann") else {
            panic!("expected the worker path");
        };
        assert_eq!(detail.summary.worker_id, "w2");
        assert!(detail.courses.is_empty());
        assert!(find_learning_path(&workers(), "lp-missing").is_none());
    }

    #[test]
    fn test_find_generated_path() {
        let Some(LearningPathView::Generated(detail)) = find_learning_path(&workers(), "lp-js") else {
            panic!("expected a generated path");
        };
        assert_eq!(detail.summary.as_deref(), Some("closures"));
        assert_eq!(detail.course, CourseRef { id: "c1".into(), title: "JS".into() });
        assert_eq!(detail.worker.name, "John Smith");
        assert_eq!(detail.modules, vec![json!("Scope")]);
    }

    #[test]
    fn test_detail_serializes_flat() {
        let detail = find_learning_path(&workers(), "lp-w1").unwrap();
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["workerName"], "John Smith");
        assert_eq!(value["courses"][1]["status"], "Not Started");

        let generated = serde_json::to_value(find_learning_path(&workers(), "lp-js")).unwrap();
        assert_eq!(generated["generatedAt"], "2024-01-15");
        assert_eq!(generated["worker"]["id"], "w1");
    }
}
