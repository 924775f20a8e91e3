use serde::Serialize;
use serde_json::Value;

use crate::models::learner::{LearnerModule, Lesson, RawLearner};
use crate::models::worker::CourseStatus;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProgress {
    pub user_type: &'static str,
    pub overall_progress: u8,
    pub completed_modules: usize,
    pub total_modules: usize,
    pub average_score: u32,
    pub time_spent: f64,
    pub next_milestone: String,
    pub achievements: Vec<Value>,
}

pub fn learner_progress(learner: &RawLearner) -> LearnerProgress {
    let modules = &learner.learning_path.modules;
    LearnerProgress {
        user_type: "learner",
        overall_progress: learner.learning_path.progress.clamp(0.0, 100.0).round() as u8,
        completed_modules: modules
            .iter()
            .filter(|m| status_of(&m.status) == CourseStatus::Completed)
            .count(),
        total_modules: modules.len(),
        average_score: average_score(modules),
        time_spent: time_spent(modules),
        next_milestone: next_milestone(modules),
        achievements: learner.achievements.clone(),
    }
}

fn status_of(raw: &str) -> CourseStatus {
    CourseStatus::parse_lenient(raw)
}

fn completed_lessons(modules: &[LearnerModule]) -> impl Iterator<Item = &Lesson> {
    modules
        .iter()
        .flat_map(|m| m.lessons.iter())
        .filter(|l| status_of(&l.status) == CourseStatus::Completed)
}

/// Mean score of completed, scored lessons; 0 when none are scored.
fn average_score(modules: &[LearnerModule]) -> u32 {
    let scores: Vec<f64> = completed_lessons(modules).filter_map(|l| l.score).collect();
    if scores.is_empty() {
        return 0;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    mean.round().max(0.0) as u32
}

/// Hours across completed lessons, read from the leading number of `duration`.
fn time_spent(modules: &[LearnerModule]) -> f64 {
    completed_lessons(modules)
        .filter_map(|l| l.duration.as_deref())
        .filter_map(|d| d.split_whitespace().next()?.parse::<f64>().ok())
        .filter(|hours| hours.is_finite() && *hours >= 0.0)
        .sum()
}

fn next_milestone(modules: &[LearnerModule]) -> String {
    if let Some(current) = modules
        .iter()
        .find(|m| status_of(&m.status) == CourseStatus::InProgress)
    {
        return current
            .lessons
            .iter()
            .find(|l| status_of(&l.status) == CourseStatus::NotStarted)
            .map(|l| l.title.clone())
            .unwrap_or_else(|| "Complete current module".to_string());
    }
    modules
        .iter()
        .find(|m| status_of(&m.status) == CourseStatus::NotStarted)
        .map(|m| m.title.clone())
        .unwrap_or_else(|| "All modules completed!".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn learner(modules: Value) -> RawLearner {
        serde_json::from_value(json!({
            "user": { "id": "u1" },
            "learningPath": { "id": "lp", "progress": 45, "modules": modules },
            "achievements": [{ "id": "a1" }]
        }))
        .unwrap()
    }

    #[test]
    fn test_progress_from_fixture_like_data() {
        let progress = learner_progress(&learner(json!([
            { "id": "m1", "title": "One", "status": "Completed", "lessons": [
                { "id": "l1", "title": "L1", "status": "Completed", "score": 95, "duration": "2 hours" },
                { "id": "l2", "title": "L2", "status": "Completed", "score": 88, "duration": "1.5 hours" }
            ]},
            { "id": "m2", "title": "Two", "status": "In Progress", "lessons": [
                { "id": "l3", "title": "L3", "status": "Completed", "score": 90, "duration": "3 hours" },
                { "id": "l4", "title": "L4", "status": "In Progress", "score": null, "duration": "2 hours" },
                { "id": "l5", "title": "Exception Handling", "status": "Not Started", "duration": "1 hours" }
            ]}
        ])));
        assert_eq!(progress.overall_progress, 45);
        assert_eq!(progress.completed_modules, 1);
        assert_eq!(progress.total_modules, 2);
        // (95 + 88 + 90) / 3 = 91
        assert_eq!(progress.average_score, 91);
        assert!((progress.time_spent - 6.5).abs() < f64::EPSILON);
        assert_eq!(progress.next_milestone, "Exception Handling");
        assert_eq!(progress.achievements.len(), 1);
    }

    #[test]
    fn test_milestone_fallbacks() {
        let current_done = learner(json!([
            { "id": "m1", "title": "One", "status": "In Progress", "lessons": [
                { "id": "l1", "title": "L1", "status": "Completed" }
            ]}
        ]));
        assert_eq!(next_milestone(&current_done.learning_path.modules), "Complete current module");

        let next_module = learner(json!([
            { "id": "m1", "title": "One", "status": "Completed" },
            { "id": "m2", "title": "Two", "status": "Not Started" }
        ]));
        assert_eq!(next_milestone(&next_module.learning_path.modules), "Two");

        let all_done = learner(json!([{ "id": "m1", "title": "One", "status": "Completed" }]));
        assert_eq!(next_milestone(&all_done.learning_path.modules), "All modules completed!");
    }

    #[test]
    fn test_empty_path_is_zeroed() {
        let progress = learner_progress(&RawLearner::default());
        assert_eq!(progress.average_score, 0);
        assert_eq!(progress.time_spent, 0.0);
        assert_eq!(progress.total_modules, 0);
        assert_eq!(progress.next_milestone, "All modules completed!");
    }

    #[test]
    fn test_unparseable_duration_counts_zero() {
        let progress = learner_progress(&learner(json!([
            { "id": "m1", "title": "One", "status": "Completed", "lessons": [
                { "id": "l1", "title": "L1", "status": "Completed", "duration": "a while" },
                { "id": "l2", "title": "L2", "status": "Completed", "duration": "4 hours" }
            ]}
        ])));
        assert!((progress.time_spent - 4.0).abs() < f64::EPSILON);
    }
}
