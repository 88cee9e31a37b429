use crate::api::job::dto::UpdateJobRequest;
use crate::db::models::JobRow;

/// The full field set written back by an update
#[derive(Debug, PartialEq, Eq)]
pub struct MergedJob {
    pub title: String,
    pub location: String,
    pub level: String,
    pub description: String,
    pub salary: i64,
    pub category: String,
    pub visible: bool,
}

/// Permissive partial-update merge: absent or falsy values (empty
/// strings, zero salary) keep the stored value. Visibility is the one
/// tri-state field — an explicit `false` applies, only absence keeps
/// the stored flag.
pub fn merge_job_update(existing: &JobRow, patch: &UpdateJobRequest) -> MergedJob {
    fn keep_nonempty(provided: &Option<String>, existing: &str) -> String {
        match provided.as_deref() {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => existing.to_string(),
        }
    }

    MergedJob {
        title: keep_nonempty(&patch.title, &existing.title),
        location: keep_nonempty(&patch.location, &existing.location),
        level: keep_nonempty(&patch.level, &existing.level),
        description: keep_nonempty(&patch.description, &existing.description),
        salary: match patch.salary {
            Some(salary) if salary != 0 => salary,
            _ => existing.salary,
        },
        category: keep_nonempty(&patch.category, &existing.category),
        visible: patch.visible.unwrap_or(existing.visible),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn existing_job() -> JobRow {
        JobRow {
            id: 1,
            title: "Backend Engineer".to_string(),
            location: "Berlin".to_string(),
            level: "Senior".to_string(),
            description: "Build APIs".to_string(),
            salary: 90_000,
            category: "Engineering".to_string(),
            recruiter_id: 5,
            visible: true,
            created_at: Utc::now(),
        }
    }

    fn empty_patch() -> UpdateJobRequest {
        UpdateJobRequest {
            title: None,
            location: None,
            level: None,
            description: None,
            salary: None,
            category: None,
            visible: None,
        }
    }

    #[test]
    fn title_only_update_keeps_every_other_field() {
        let job = existing_job();
        let patch = UpdateJobRequest {
            title: Some("Staff Engineer".to_string()),
            ..empty_patch()
        };

        let merged = merge_job_update(&job, &patch);
        assert_eq!(merged.title, "Staff Engineer");
        assert_eq!(merged.location, job.location);
        assert_eq!(merged.level, job.level);
        assert_eq!(merged.description, job.description);
        assert_eq!(merged.salary, job.salary);
        assert_eq!(merged.category, job.category);
        assert_eq!(merged.visible, job.visible);
    }

    #[test]
    fn empty_strings_keep_the_stored_value() {
        let job = existing_job();
        let patch = UpdateJobRequest {
            title: Some(String::new()),
            location: Some(String::new()),
            ..empty_patch()
        };

        let merged = merge_job_update(&job, &patch);
        assert_eq!(merged.title, job.title);
        assert_eq!(merged.location, job.location);
    }

    #[test]
    fn zero_salary_keeps_the_stored_value() {
        let job = existing_job();
        let patch = UpdateJobRequest {
            salary: Some(0),
            ..empty_patch()
        };

        assert_eq!(merge_job_update(&job, &patch).salary, job.salary);
    }

    #[test]
    fn explicit_visible_false_applies() {
        let job = existing_job();
        let patch = UpdateJobRequest {
            visible: Some(false),
            ..empty_patch()
        };

        assert!(!merge_job_update(&job, &patch).visible);
    }

    #[test]
    fn absent_visible_keeps_the_stored_flag() {
        let job = existing_job();
        assert!(merge_job_update(&job, &empty_patch()).visible);
    }
}
