//! Student snapshot sent by the client alongside a copilot conversation
//!
//! Every field is optional: the client builds the snapshot from whatever it
//! has loaded, so missing data renders as a placeholder instead of failing
//! the request.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentContext {
    #[serde(default)]
    pub profile: Option<StudentProfile>,
    #[serde(default)]
    pub subjects: Vec<ContextSubject>,
    #[serde(default)]
    pub sessions: Vec<ContextSession>,
    #[serde(default)]
    pub tasks: Vec<ContextTask>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub study_level: Option<String>,
    #[serde(default)]
    pub study_domain: Option<String>,
    #[serde(default)]
    pub exam_period: Option<String>,
    #[serde(default)]
    pub weekly_revision_hours: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextSubject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub coefficient: Option<f64>,
}

/// Joined subject name as returned by `select("*, subjects(name)")`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSession {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub subjects: Option<SubjectRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_fields_deserialize_as_missing() {
        let context: StudentContext = serde_json::from_str(
            r#"{
                "profile": { "first_name": null, "weekly_revision_hours": null },
                "subjects": [{ "name": null, "coefficient": null }],
                "sessions": [{ "date": null, "subjects": null }],
                "tasks": [{ "title": null, "priority": null, "status": "todo" }]
            }"#,
        )
        .unwrap();

        assert_eq!(context.subjects[0].name, None);
        assert_eq!(context.tasks[0].title, None);
        assert_eq!(context.tasks[0].status.as_deref(), Some("todo"));
        assert_eq!(context.profile.unwrap().first_name, None);
    }
}
