//! Adaptive quiz engine.
//!
//! This module provides:
//! - [`Scores`] / [`PersonalityProfile`]: weighted trait accumulation
//! - [`AdaptiveRouter`]: default or archetype-biased next-question selection
//! - [`PersonalityClassifier`]: personality naming from dominant traits
//! - [`QuizSession`]: per-user state, owned by the caller
//! - [`QuizEngine`]: drives a session one answer at a time
//!
//! The engine holds only read-only data and can be shared across threads;
//! every mutation goes through a `&mut QuizSession`.

mod classifier;
mod router;
mod scores;
mod session;

pub use classifier::*;
pub use router::*;
pub use scores::*;
pub use session::*;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::EngineResult;
use crate::graph::{QuestionNode, QuizGraph};

/// Number of dominant traits listed in a personality report.
pub const REPORT_TRAIT_LIMIT: usize = 5;

/// Result of answering one question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutcome {
    /// Next node to ask. `None` means the quiz is complete.
    pub next_node_id: Option<String>,
    /// Whether the adaptive-eligibility predicate held for this answer.
    pub adaptive: bool,
    /// Whether the next node is an archetype alternate.
    pub rerouted: bool,
    /// Question number of the next question.
    pub question_number: u32,
}

impl StepOutcome {
    /// Whether the quiz has finished.
    pub fn is_complete(&self) -> bool {
        self.next_node_id.is_none()
    }
}

/// Full end-of-quiz summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityReport {
    /// Classified personality name.
    pub personality_type: String,
    /// Up to [`REPORT_TRAIT_LIMIT`] positive traits, highest first.
    pub dominant_traits: Vec<String>,
    /// Every trait score in taxonomy order.
    pub all_scores: Scores,
    /// Sum of all trait scores.
    pub total_score: f64,
    /// Every recorded answer.
    pub quiz_journey: Vec<QuizResponse>,
    /// Answers whose routing was adaptive-eligible.
    pub adaptive_decisions: Vec<QuizResponse>,
}

/// Quiz engine over a shared, immutable graph.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    graph: Arc<QuizGraph>,
    router: AdaptiveRouter,
    classifier: PersonalityClassifier,
}

impl QuizEngine {
    /// Create an engine with default router tuning.
    pub fn new(graph: Arc<QuizGraph>) -> Self {
        Self::with_router(graph, AdaptiveRouter::default())
    }

    /// Create an engine with a specific router.
    pub fn with_router(graph: Arc<QuizGraph>, router: AdaptiveRouter) -> Self {
        Self {
            graph,
            router,
            classifier: PersonalityClassifier::new(),
        }
    }

    /// The quiz graph.
    pub fn graph(&self) -> &QuizGraph {
        &self.graph
    }

    /// The router.
    pub fn router(&self) -> &AdaptiveRouter {
        &self.router
    }

    /// Start a fresh session at the graph's start node.
    pub fn new_session(&self) -> QuizSession {
        let session = QuizSession::new(self.graph.taxonomy(), self.graph.start());
        debug!(session_id = %session.id(), start = %self.graph.start(), "Session created");
        session
    }

    /// Look up a question for display.
    pub fn question(&self, node_id: &str) -> Option<&QuestionNode> {
        self.graph.node(node_id)
    }

    /// Answer `node_id` with option `option_index`.
    ///
    /// Applies the option's weights, records the answer, then routes. Returns
    /// the next node, or `None` inside `Ok` when the quiz is complete.
    ///
    /// # Errors
    /// An invalid node or option reference. The session is left unchanged.
    pub fn step(
        &self,
        session: &mut QuizSession,
        node_id: &str,
        option_index: usize,
    ) -> EngineResult<StepOutcome> {
        let (node, option) = match self.router.resolve(&self.graph, node_id, option_index) {
            Ok(found) => found,
            Err(e) => {
                warn!(
                    session_id = %session.id(),
                    node_id = %node_id,
                    option_index,
                    error = %e,
                    "Rejected answer"
                );
                return Err(e);
            }
        };

        session.apply_weights(&option.weights);
        session.record_response(node, option_index, option);

        let profile = PersonalityProfile::from_scores(session.scores());
        let decision = self.router.next_node(
            &self.graph,
            node_id,
            option,
            &profile,
            session.question_number(),
        );

        debug!(
            session_id = %session.id(),
            node_id = %node_id,
            option_index,
            total_score = profile.total_score,
            eligible = decision.eligible,
            next = ?decision.next,
            "Answer recorded"
        );

        let outcome = StepOutcome {
            next_node_id: decision.next.clone(),
            adaptive: decision.eligible,
            rerouted: decision.rerouted,
            question_number: session.question_number(),
        };
        session.record_route(decision);

        if outcome.is_complete() {
            info!(
                session_id = %session.id(),
                answers = session.history().len(),
                "Quiz complete"
            );
        }

        Ok(outcome)
    }

    /// Current profile for a session.
    pub fn profile(&self, session: &QuizSession) -> PersonalityProfile {
        PersonalityProfile::from_scores(session.scores())
    }

    /// Classify the session's current scores.
    pub fn classify(&self, session: &QuizSession) -> &'static str {
        self.classifier.classify(&self.profile(session))
    }

    /// Build the personality report for the session's current state.
    pub fn report(&self, session: &QuizSession) -> PersonalityReport {
        let scores = session.scores();
        PersonalityReport {
            personality_type: self.classify(session).to_string(),
            dominant_traits: scores
                .dominant_traits(REPORT_TRAIT_LIMIT)
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
            all_scores: scores.clone(),
            total_score: scores.total(),
            quiz_journey: session.history().to_vec(),
            adaptive_decisions: session.adaptive_decisions(),
        }
    }
}
