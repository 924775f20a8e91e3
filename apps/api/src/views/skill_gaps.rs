use serde::Serialize;

use crate::models::worker::NormalizedWorker;
use crate::normalizer::rules::slug;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSkillGap {
    pub id: String,
    pub worker_id: String,
    pub worker_name: String,
    pub department: String,
    pub skill: String,
    pub status: String,
    pub priority: String,
}

/// Every worker's gaps in one list. Ids are `<workerId>-<skill-slug>`.
pub fn flatten_skill_gaps(workers: &[NormalizedWorker]) -> Vec<WorkerSkillGap> {
    workers
        .iter()
        .flat_map(|worker| {
            worker.skill_gaps.iter().map(move |gap| WorkerSkillGap {
                id: format!("{}-{}", worker.id, slug(&gap.skill).replace('.', "-")),
                worker_id: worker.id.clone(),
                worker_name: worker.name.clone(),
                department: worker.department.clone(),
                skill: gap.skill.clone(),
                status: gap.status.clone(),
                priority: gap.priority.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize_company;
    use serde_json::json;

    #[test]
    fn test_flatten_in_worker_order() {
        let workers = normalize_company(&[
            json!({ "workerId": "w1", "workerName": "A", "skillGaps": [
                { "skill": "React Hooks", "status": "Open", "priority": "High" }
            ]}),
            json!({ "workerId": "w2", "workerName": "B" }),
            json!({ "id": "w3", "name": "C", "department": "Data", "skillGaps": [
                { "skill_name": "SQL", "priority": "Low" }
            ]}),
        ]);
        let gaps = flatten_skill_gaps(&workers);
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].id, "w1-react-hooks");
        assert_eq!(gaps[0].department, "Engineering");
        assert_eq!(gaps[1].id, "w3-sql");
        assert_eq!(gaps[1].department, "Data");
        assert_eq!(gaps[1].status, "Not Started");
    }
}
