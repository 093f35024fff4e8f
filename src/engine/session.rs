//! Per-user quiz session state.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{RouteDecision, Scores};
use crate::graph::{AnswerOption, QuestionNode, TraitTaxonomy};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Fresh or reset: zero scores, empty history.
    Initialized,
    /// At least one answer recorded, quiz not finished.
    Answering,
    /// The last answer led to no further question.
    Terminal,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Initialized => write!(f, "initialized"),
            SessionState::Answering => write!(f, "answering"),
            SessionState::Terminal => write!(f, "terminal"),
        }
    }
}

/// One recorded answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    /// Node that was answered.
    pub node_id: String,
    /// Index of the chosen option.
    pub option_index: usize,
    /// Question text at the time of answering.
    pub question: String,
    /// Chosen option text.
    pub selected_text: String,
    /// Weights carried by the chosen option, as authored.
    pub weights: HashMap<String, f64>,
    /// 1-based position of this answer in the session.
    pub question_number: u32,
    /// When the answer was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Mutable state for one quiz taker.
///
/// History is append-only; [`QuizSession::reset`] is the only way to clear
/// it. Sessions share nothing, so each user gets their own instance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    id: String,
    start_node: String,
    scores: Scores,
    history: Vec<QuizResponse>,
    routes: Vec<RouteDecision>,
    question_number: u32,
    current_node: Option<String>,
    state: SessionState,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Start a session at `start_node` with zero scores for `taxonomy`.
    pub fn new(taxonomy: &TraitTaxonomy, start_node: impl Into<String>) -> Self {
        let start_node = start_node.into();
        Self {
            id: Uuid::new_v4().to_string(),
            current_node: Some(start_node.clone()),
            start_node,
            scores: Scores::new(taxonomy),
            history: Vec::new(),
            routes: Vec::new(),
            question_number: 1,
            state: SessionState::Initialized,
            started_at: Utc::now(),
        }
    }

    /// Session identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Running trait scores.
    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// Recorded answers in order.
    pub fn history(&self) -> &[QuizResponse] {
        &self.history
    }

    /// Routing decision for each recorded answer, aligned with `history`.
    pub fn routes(&self) -> &[RouteDecision] {
        &self.routes
    }

    /// Number of the next question to be answered (1-based).
    pub fn question_number(&self) -> u32 {
        self.question_number
    }

    /// Node the session is waiting on. `None` once the quiz is complete.
    pub fn current_node(&self) -> Option<&str> {
        self.current_node.as_deref()
    }

    /// Lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the quiz has finished.
    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Terminal
    }

    /// When the session was created.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Answers whose routing was adaptive-eligible.
    pub fn adaptive_decisions(&self) -> Vec<QuizResponse> {
        self.history
            .iter()
            .zip(self.routes.iter())
            .filter(|(_, route)| route.eligible)
            .map(|(response, _)| response.clone())
            .collect()
    }

    /// Apply an option's weights to the running scores.
    pub fn apply_weights(&mut self, weights: &HashMap<String, f64>) {
        self.scores.apply_weights(weights);
    }

    /// Append an answer and advance the question counter.
    ///
    /// Always followed by [`record_route`](Self::record_route) for the same
    /// answer, which keeps `history` and `routes` aligned.
    pub(crate) fn record_response(
        &mut self,
        node: &QuestionNode,
        option_index: usize,
        option: &AnswerOption,
    ) -> &QuizResponse {
        self.history.push(QuizResponse {
            node_id: node.id.clone(),
            option_index,
            question: node.question.clone(),
            selected_text: option.text.clone(),
            weights: option.weights.clone(),
            question_number: self.question_number,
            timestamp: Utc::now(),
        });
        self.question_number += 1;
        self.state = SessionState::Answering;
        &self.history[self.history.len() - 1]
    }

    /// Record the routing decision for the latest answer and move to its
    /// successor.
    pub(crate) fn record_route(&mut self, decision: RouteDecision) {
        self.current_node = decision.next.clone();
        if self.current_node.is_none() {
            self.state = SessionState::Terminal;
        }
        self.routes.push(decision);
    }

    /// Return to the initial state: zero scores, empty history, question 1.
    pub fn reset(&mut self) {
        self.scores.reset();
        self.history.clear();
        self.routes.clear();
        self.question_number = 1;
        self.current_node = Some(self.start_node.clone());
        self.state = SessionState::Initialized;
    }
}
