use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::engine::{QuizEngine, QuizSession, StepOutcome};
use crate::error::{ProtocolError, ProtocolResult};
use crate::graph::QuestionNode;

/// A question as presented to the quiz taker.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    /// Node identifier to answer.
    pub node_id: String,
    /// 1-based question number.
    pub question_number: u32,
    /// Question text.
    pub question: String,
    /// Options in display order.
    pub options: Vec<OptionView>,
}

/// An answer option as presented to the quiz taker.
#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    /// Index to pass back to `quiz.step`.
    pub index: usize,
    /// Option text.
    pub text: String,
}

impl QuestionView {
    fn new(node_id: &str, node: &QuestionNode, question_number: u32) -> Self {
        Self {
            node_id: node_id.to_string(),
            question_number,
            question: node.question.clone(),
            options: node
                .options
                .iter()
                .enumerate()
                .map(|(index, option)| OptionView {
                    index,
                    text: option.text.clone(),
                })
                .collect(),
        }
    }
}

/// Parameters for `quiz.question`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionParams {
    /// Node to show; defaults to the session's current node.
    #[serde(default)]
    pub node_id: Option<String>,
}

/// Parameters for `quiz.step`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepParams {
    /// Node being answered; defaults to the session's current node.
    #[serde(default)]
    pub node_id: Option<String>,
    /// Chosen option index.
    pub option_index: usize,
}

/// Result of `quiz.step`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    #[serde(flatten)]
    outcome: StepOutcome,
    /// The next question, absent once complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    next_question: Option<QuestionView>,
}

/// Route a method call to its handler.
pub fn handle_method(
    engine: &QuizEngine,
    session: &mut QuizSession,
    method: &str,
    params: Option<Value>,
) -> ProtocolResult<Value> {
    info!(method = %method, "Routing method call");

    match method {
        "quiz.start" => handle_start(engine, session),
        "quiz.question" => handle_question(engine, session, parse_params(method, params)?),
        "quiz.step" => handle_step(engine, session, parse_params(method, params)?),
        "quiz.classify" => to_value(serde_json::json!({
            "personalityType": engine.classify(session),
        })),
        "quiz.report" => to_value(engine.report(session)),
        "quiz.reset" => {
            session.reset();
            to_value(serde_json::json!({
                "sessionId": session.id(),
                "nodeId": session.current_node(),
            }))
        }
        "quiz.state" => to_value(session),
        _ => Err(ProtocolError::UnknownMethod {
            method: method.to_string(),
        }),
    }
}

fn handle_start(engine: &QuizEngine, session: &mut QuizSession) -> ProtocolResult<Value> {
    *session = engine.new_session();
    let start = engine.graph().start();
    let question = engine
        .question(start)
        .map(|node| QuestionView::new(start, node, session.question_number()));
    to_value(serde_json::json!({
        "sessionId": session.id(),
        "question": question,
    }))
}

fn handle_question(
    engine: &QuizEngine,
    session: &QuizSession,
    params: QuestionParams,
) -> ProtocolResult<Value> {
    let node_id = params
        .node_id
        .or_else(|| session.current_node().map(String::from))
        .ok_or_else(|| ProtocolError::InvalidParameters {
            method: "quiz.question".to_string(),
            message: "Quiz is complete; no current question".to_string(),
        })?;
    let node = engine
        .question(&node_id)
        .ok_or_else(|| ProtocolError::InvalidReference(crate::error::EngineError::UnknownNode {
            node_id: node_id.clone(),
        }))?;
    to_value(QuestionView::new(&node_id, node, session.question_number()))
}

fn handle_step(
    engine: &QuizEngine,
    session: &mut QuizSession,
    params: StepParams,
) -> ProtocolResult<Value> {
    let node_id = params
        .node_id
        .or_else(|| session.current_node().map(String::from))
        .ok_or_else(|| ProtocolError::InvalidParameters {
            method: "quiz.step".to_string(),
            message: "Quiz is complete; pass nodeId or reset".to_string(),
        })?;

    let outcome = engine.step(session, &node_id, params.option_index)?;
    let next_question = outcome.next_node_id.as_deref().and_then(|id| {
        engine
            .question(id)
            .map(|node| QuestionView::new(id, node, outcome.question_number))
    });

    to_value(StepResult {
        outcome,
        next_question,
    })
}

/// Deserialize method parameters, treating absent params as `{}`.
fn parse_params<T: DeserializeOwned>(method: &str, params: Option<Value>) -> ProtocolResult<T> {
    let params = params.unwrap_or_else(|| Value::Object(Default::default()));
    serde_json::from_value(params).map_err(|e| ProtocolError::InvalidParameters {
        method: method.to_string(),
        message: e.to_string(),
    })
}

fn to_value<T: Serialize>(value: T) -> ProtocolResult<Value> {
    Ok(serde_json::to_value(value)?)
}
