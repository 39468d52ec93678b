use crate::errors::AppError;
use crate::questions::models::JobRequirement;

/// Applies the requirement form rules and returns a normalized copy.
///
/// Skills are trimmed; empty and duplicate skills are rejected, as is an empty list.
/// Role and level need no check here since serde only admits the fixed labels.
pub fn validate_requirement(requirement: &JobRequirement) -> Result<JobRequirement, AppError> {
    let mut skills: Vec<String> = Vec::with_capacity(requirement.skills.len());

    for raw in &requirement.skills {
        let skill = raw.trim();
        if skill.is_empty() {
            return Err(AppError::Validation("Skill cannot be empty.".to_string()));
        }
        if skills.iter().any(|s| s == skill) {
            return Err(AppError::Validation(format!(
                "Skill already added: {skill}"
            )));
        }
        skills.push(skill.to_string());
    }

    if skills.is_empty() {
        return Err(AppError::Validation(
            "Please add at least one skill.".to_string(),
        ));
    }

    Ok(JobRequirement {
        role: requirement.role,
        skills,
        experience_level: requirement.experience_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::models::{ExperienceLevel, JobRole};

    fn requirement(skills: &[&str]) -> JobRequirement {
        JobRequirement {
            role: JobRole::FrontendDeveloper,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience_level: ExperienceLevel::MidLevel,
        }
    }

    #[test]
    fn test_trims_skills() {
        let validated = validate_requirement(&requirement(&[" React ", "CSS"])).unwrap();
        assert_eq!(validated.skills, vec!["React", "CSS"]);
        assert_eq!(validated.role, JobRole::FrontendDeveloper);
        assert_eq!(validated.experience_level, ExperienceLevel::MidLevel);
    }

    #[test]
    fn test_rejects_empty_list() {
        let err = validate_requirement(&requirement(&[])).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("at least one skill")));
    }

    #[test]
    fn test_rejects_blank_skill() {
        let err = validate_requirement(&requirement(&["React", "  "])).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Skill cannot be empty."));
    }

    #[test]
    fn test_rejects_duplicate_after_trim() {
        let err = validate_requirement(&requirement(&["React", "React "])).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("already added")));
    }

    #[test]
    fn test_duplicates_are_case_sensitive() {
        let validated = validate_requirement(&requirement(&["sql", "SQL"])).unwrap();
        assert_eq!(validated.skills.len(), 2);
    }
}
