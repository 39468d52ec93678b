//! Data model for interview question generation.
//!
//! JSON field names are camelCase; role and level labels serialize as their display text.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed set of job roles offered by the requirement form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobRole {
    #[serde(rename = "Frontend Developer")]
    FrontendDeveloper,
    #[serde(rename = "Backend Developer")]
    BackendDeveloper,
    #[serde(rename = "Full Stack Developer")]
    FullStackDeveloper,
    #[serde(rename = "Data Scientist")]
    DataScientist,
    #[serde(rename = "DevOps Engineer")]
    DevOpsEngineer,
    #[serde(rename = "Mobile Developer")]
    MobileDeveloper,
    #[serde(rename = "QA Engineer")]
    QaEngineer,
    #[serde(rename = "UI/UX Developer")]
    UiUxDeveloper,
}

impl JobRole {
    /// All roles, in the order the form lists them.
    pub const ALL: [JobRole; 8] = [
        JobRole::FrontendDeveloper,
        JobRole::BackendDeveloper,
        JobRole::FullStackDeveloper,
        JobRole::DataScientist,
        JobRole::DevOpsEngineer,
        JobRole::MobileDeveloper,
        JobRole::QaEngineer,
        JobRole::UiUxDeveloper,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            JobRole::FrontendDeveloper => "Frontend Developer",
            JobRole::BackendDeveloper => "Backend Developer",
            JobRole::FullStackDeveloper => "Full Stack Developer",
            JobRole::DataScientist => "Data Scientist",
            JobRole::DevOpsEngineer => "DevOps Engineer",
            JobRole::MobileDeveloper => "Mobile Developer",
            JobRole::QaEngineer => "QA Engineer",
            JobRole::UiUxDeveloper => "UI/UX Developer",
        }
    }
}

impl fmt::Display for JobRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Seniority of the candidate; doubles as question difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Junior,
    #[serde(rename = "Mid-Level")]
    MidLevel,
    Senior,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [
        ExperienceLevel::Junior,
        ExperienceLevel::MidLevel,
        ExperienceLevel::Senior,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::MidLevel => "Mid-Level",
            ExperienceLevel::Senior => "Senior",
        }
    }

    /// Parses a display label as emitted by the model.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.label() == label)
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the user asked for. Immutable for the lifetime of one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequirement {
    pub role: JobRole,
    pub skills: Vec<String>,
    pub experience_level: ExperienceLevel,
}

/// A single generated question. Only ever produced by parsing a model reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub question: String,
    pub difficulty: ExperienceLevel,
    /// 3–5 entries.
    pub evaluation_criteria: Vec<String>,
    /// The skill the question primarily exercises.
    pub category: String,
}

/// One generation result. Replaced wholesale on regeneration, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_role_labels_match_serde() {
        for role in JobRole::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.label()));
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result: Result<JobRole, _> = serde_json::from_str(r#""Rust Wizard""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_experience_level_mid_level_label() {
        let level: ExperienceLevel = serde_json::from_str(r#""Mid-Level""#).unwrap();
        assert_eq!(level, ExperienceLevel::MidLevel);
        assert_eq!(ExperienceLevel::from_label("Mid-Level"), Some(level));
        assert_eq!(ExperienceLevel::from_label("Mid"), None);
    }

    #[test]
    fn test_job_requirement_uses_camel_case() {
        let json = serde_json::json!({
            "role": "UI/UX Developer",
            "skills": ["Figma", "CSS"],
            "experienceLevel": "Junior"
        });
        let requirement: JobRequirement = serde_json::from_value(json).unwrap();
        assert_eq!(requirement.role, JobRole::UiUxDeveloper);
        assert_eq!(requirement.skills, vec!["Figma", "CSS"]);
        assert_eq!(requirement.experience_level, ExperienceLevel::Junior);
    }

    #[test]
    fn test_question_serializes_evaluation_criteria_camel_case() {
        let question = Question {
            id: "1".to_string(),
            question: "Explain indexes".to_string(),
            difficulty: ExperienceLevel::Senior,
            evaluation_criteria: vec!["a".to_string()],
            category: "SQL".to_string(),
        };
        let value = serde_json::to_value(&question).unwrap();
        assert!(value.get("evaluationCriteria").is_some());
        assert_eq!(value["difficulty"], "Senior");
    }
}
