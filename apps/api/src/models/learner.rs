use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Learner fixture document. Unknown fields are kept so they round-trip to the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLearner {
    pub user: Value,
    pub learning_path: LearnerPath,
    pub skill_gaps: Vec<Value>,
    pub achievements: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearnerPath {
    pub id: String,
    pub name: String,
    pub progress: f64,
    pub modules: Vec<LearnerModule>,
    pub ai_recommendations: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearnerModule {
    pub id: String,
    pub title: String,
    pub status: String,
    pub lessons: Vec<Lesson>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub status: String,
    pub score: Option<f64>,
    pub duration: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_round_trip() {
        let raw = json!({
            "user": { "id": "u1" },
            "preferences": { "theme": "dark" },
            "learningPath": {
                "id": "lp1",
                "startDate": "2024-01-01",
                "modules": [{
                    "id": "m1",
                    "estimatedHours": 4,
                    "lessons": [{ "id": "l1", "status": "Completed", "videoUrl": "https://v/1" }]
                }]
            }
        });
        let learner: RawLearner = serde_json::from_value(raw).unwrap();
        let lesson = &learner.learning_path.modules[0].lessons[0];
        assert_eq!(lesson.extra["videoUrl"], "https://v/1");

        let back = serde_json::to_value(&learner).unwrap();
        assert_eq!(back["preferences"]["theme"], "dark");
        assert_eq!(back["learningPath"]["startDate"], "2024-01-01");
        assert_eq!(back["learningPath"]["modules"][0]["estimatedHours"], 4);
        assert_eq!(back["learningPath"]["modules"][0]["lessons"][0]["videoUrl"], "https://v/1");
    }
}
