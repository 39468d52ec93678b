//! Prompt rendering for question generation.
//!
//! User-controlled text is sanitized before substitution so that a role or skill
//! cannot smuggle newline-delimited instructions into the prompt.

use crate::questions::models::JobRequirement;

/// Question generation prompt template.
/// Replace: {experience_level}, {role}, {skills}
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Create a set of 5 technical interview questions for a {experience_level} {role} with skills in {skills}.

For each question:
1. The question should test the knowledge appropriate for the {experience_level} level
2. Include 3-5 specific evaluation criteria for each question
3. Categorize the question based on the skill it primarily tests

Format the response as a JSON object:
{
  "questions": [
    {
      "id": "1",
      "question": "Your question here",
      "difficulty": "{experience_level}",
      "evaluationCriteria": ["Criterion 1", "Criterion 2", "Criterion 3"],
      "category": "Specific skill being tested"
    }
  ]
}

Respond with the JSON object only. Do NOT include any text outside the JSON object."#;

/// Removes CR, LF and TAB characters, then trims surrounding whitespace.
pub fn sanitize_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\t'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Renders the generation prompt. Deterministic for equal requirements.
pub fn create_prompt(requirement: &JobRequirement) -> String {
    let role = sanitize_input(requirement.role.label());
    let skills = requirement
        .skills
        .iter()
        .map(|s| sanitize_input(s))
        .collect::<Vec<_>>()
        .join(", ");

    // {skills} is substituted last so skill text containing a placeholder is left as-is.
    QUESTIONS_PROMPT_TEMPLATE
        .replace("{experience_level}", requirement.experience_level.label())
        .replace("{role}", &role)
        .replace("{skills}", &skills)
}
