//! Question generation — the single request/response pipeline.
//!
//! Flow: credential check → create_prompt → one completion call →
//!       envelope decode → content decode → shape validation → QuestionsResponse.
//!
//! No retries and no caching. Every failure surfaces as one `GenerationError`.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use crate::llm_client::prompts::INTERVIEWER_SYSTEM;
use crate::llm_client::{
    strip_json_fences, ChatCompletion, ChatRequest, CompletionTransport, ErrorEnvelope, LlmError,
    TransportResponse,
};
use crate::questions::models::{ExperienceLevel, JobRequirement, Question, QuestionsResponse};
use crate::questions::prompts::create_prompt;

/// Used when a non-2xx body carries no `error.message`.
pub const UNKNOWN_API_ERROR: &str = "An unknown error occurred while generating questions.";

const MIN_CRITERIA: usize = 3;
const MAX_CRITERIA: usize = 5;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API key is missing. Please provide a valid API key.")]
    MissingCredential,

    #[error("Could not reach the completion endpoint: {0}")]
    TransportFailure(#[from] LlmError),

    #[error("{message}")]
    ApiError { status: u16, message: String },

    #[error("The model returned content that is not valid JSON: {0}")]
    MalformedResponse(String),

    #[error("Invalid response format from the completion endpoint: {0}")]
    InvalidResponseShape(String),
}

/// Turns a `JobRequirement` and a credential into a `QuestionsResponse`
/// via exactly one call on the configured transport.
#[derive(Clone)]
pub struct QuestionGenerator {
    transport: Arc<dyn CompletionTransport>,
}

impl QuestionGenerator {
    pub fn new(transport: Arc<dyn CompletionTransport>) -> Self {
        Self { transport }
    }

    pub async fn generate(
        &self,
        requirement: &JobRequirement,
        credential: Option<&str>,
    ) -> Result<QuestionsResponse, GenerationError> {
        // Opaque token: blank means missing, anything else is sent exactly as given.
        let credential = credential
            .filter(|c| !c.trim().is_empty())
            .ok_or(GenerationError::MissingCredential)?;

        let result = self.call(requirement, credential).await;

        match &result {
            Ok(response) => info!(
                "Generated {} questions for {} {}",
                response.questions.len(),
                requirement.experience_level,
                requirement.role
            ),
            Err(e) => error!("Error generating questions: {e} (requirement: {requirement:?})"),
        }

        result
    }

    async fn call(
        &self,
        requirement: &JobRequirement,
        credential: &str,
    ) -> Result<QuestionsResponse, GenerationError> {
        let request = ChatRequest::new(INTERVIEWER_SYSTEM, create_prompt(requirement));

        let response = self.transport.complete(&request, credential).await?;
        let questions = parse_transport_response(&response)?;

        Ok(QuestionsResponse {
            questions,
            timestamp: Utc::now(),
        })
    }
}

/// Interprets the raw transport outcome: status, envelope, then the inner content string.
fn parse_transport_response(response: &TransportResponse) -> Result<Vec<Question>, GenerationError> {
    if !response.is_success() {
        let message = ErrorEnvelope::message_from(&response.body)
            .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string());
        return Err(GenerationError::ApiError {
            status: response.status,
            message,
        });
    }

    let completion: ChatCompletion = serde_json::from_str(&response.body).map_err(|e| {
        if e.is_data() {
            GenerationError::InvalidResponseShape(format!("unexpected completion envelope: {e}"))
        } else {
            GenerationError::MalformedResponse(format!("completion envelope: {e}"))
        }
    })?;

    let content = completion.first_content().ok_or_else(|| {
        GenerationError::InvalidResponseShape("missing choices[0].message.content".to_string())
    })?;

    parse_questions_content(content)
}

/// Decodes the model-generated content string and validates it field by field.
pub fn parse_questions_content(content: &str) -> Result<Vec<Question>, GenerationError> {
    let payload: Value = serde_json::from_str(strip_json_fences(content))
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    let items = payload
        .get("questions")
        .ok_or_else(|| GenerationError::InvalidResponseShape("missing `questions`".to_string()))?
        .as_array()
        .ok_or_else(|| {
            GenerationError::InvalidResponseShape("`questions` is not an array".to_string())
        })?;

    let mut seen_ids = HashSet::new();
    let mut questions = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let question = parse_question(index, item)?;
        if !seen_ids.insert(question.id.clone()) {
            return Err(shape_error(
                index,
                &format!("duplicate id {:?}", question.id),
            ));
        }
        questions.push(question);
    }

    Ok(questions)
}

fn parse_question(index: usize, item: &Value) -> Result<Question, GenerationError> {
    let fields = item
        .as_object()
        .ok_or_else(|| shape_error(index, "not an object"))?;

    let id = match fields.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(shape_error(index, "`id` missing or not a string")),
    };

    let difficulty = fields
        .get("difficulty")
        .and_then(Value::as_str)
        .ok_or_else(|| shape_error(index, "`difficulty` missing or not a string"))?;
    let difficulty = ExperienceLevel::from_label(difficulty)
        .ok_or_else(|| shape_error(index, &format!("unknown difficulty {difficulty:?}")))?;

    let evaluation_criteria = fields
        .get("evaluationCriteria")
        .and_then(Value::as_array)
        .ok_or_else(|| shape_error(index, "`evaluationCriteria` missing or not an array"))?
        .iter()
        .map(|c| c.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| shape_error(index, "`evaluationCriteria` must contain only strings"))?;

    if !(MIN_CRITERIA..=MAX_CRITERIA).contains(&evaluation_criteria.len()) {
        return Err(shape_error(
            index,
            &format!(
                "expected {MIN_CRITERIA}-{MAX_CRITERIA} evaluation criteria, got {}",
                evaluation_criteria.len()
            ),
        ));
    }

    Ok(Question {
        id,
        question: required_str(fields, index, "question")?,
        difficulty,
        evaluation_criteria,
        category: required_str(fields, index, "category")?,
    })
}

fn required_str(
    fields: &serde_json::Map<String, Value>,
    index: usize,
    key: &str,
) -> Result<String, GenerationError> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| shape_error(index, &format!("`{key}` missing or not a string")))
}

fn shape_error(index: usize, detail: &str) -> GenerationError {
    GenerationError::InvalidResponseShape(format!("questions[{index}]: {detail}"))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
