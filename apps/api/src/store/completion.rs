use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::NaiveDate;

use crate::models::worker::{CourseStatus, NormalizedWorker};
use crate::normalizer::rules::summarize;

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub score: Option<f64>,
    pub completed_on: NaiveDate,
}

/// Course completions recorded at runtime, keyed by worker then course.
///
/// An overlay on top of the fixtures: the raw documents are never touched,
/// completions are applied to freshly normalized workers on every read.
#[derive(Debug, Clone, Default)]
pub struct CompletionLedger {
    inner: Arc<RwLock<HashMap<String, HashMap<String, Completion>>>>,
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or overwrites) a completion.
    pub fn record(&self, worker_id: &str, course_id: &str, completion: Completion) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard
            .entry(worker_id.to_string())
            .or_default()
            .insert(course_id.to_string(), completion);
    }

    /// Copy of one worker's completions; the lock is released before the caller uses it.
    pub fn for_worker(&self, worker_id: &str) -> HashMap<String, Completion> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(worker_id).cloned().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.is_empty()
    }
}

/// Marks the listed courses Completed and re-derives the path aggregate.
/// Completions for courses the worker does not have are ignored.
pub fn apply_completions(
    mut worker: NormalizedWorker,
    completions: &HashMap<String, Completion>,
) -> NormalizedWorker {
    if completions.is_empty() {
        return worker;
    }
    for course in &mut worker.learning_path.courses {
        if let Some(done) = completions.get(&course.id) {
            course.status = CourseStatus::Completed;
            course.completed_date = Some(done.completed_on);
            if done.score.is_some() {
                course.score = done.score;
            }
        }
    }
    summarize(&mut worker.learning_path);
    worker
}
