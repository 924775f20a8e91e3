use crate::models::worker::{CourseSearchHit, NormalizedWorker};

/// Case-insensitive substring match on name or email. A blank query matches nothing.
pub fn search_workers(workers: &[NormalizedWorker], query: &str) -> Vec<NormalizedWorker> {
    let Some(needle) = lowered_query(query) else {
        return Vec::new();
    };
    workers
        .iter()
        .filter(|w| {
            w.name.to_lowercase().contains(&needle) || w.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Case-insensitive substring match on course titles, in worker order then course order.
/// Path context comes from the course's first generated path, else the worker's path.
pub fn search_courses(workers: &[NormalizedWorker], query: &str) -> Vec<CourseSearchHit> {
    let Some(needle) = lowered_query(query) else {
        return Vec::new();
    };
    let needle = needle.as_str();
    workers
        .iter()
        .flat_map(|worker| {
            let path = &worker.learning_path;
            path.courses
                .iter()
                .filter(move |c| c.title.to_lowercase().contains(needle))
                .map(move |course| {
                    let (learning_path_id, learning_path_title) =
                        match course.learning_paths.first() {
                            Some(generated) => (generated.id.clone(), generated.title().to_string()),
                            None => (path.id.clone(), path.name.clone()),
                        };
                    CourseSearchHit {
                        course_id: course.id.clone(),
                        title: course.title.clone(),
                        worker_id: worker.id.clone(),
                        worker_name: worker.name.clone(),
                        learning_path_id,
                        learning_path_title,
                    }
                })
        })
        .collect()
}

fn lowered_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}
