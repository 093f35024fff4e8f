//! Adaptive routing: picks the next question from the chosen answer and the
//! accumulated trait profile.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::PersonalityProfile;
use crate::error::{EngineError, EngineResult};
use crate::graph::{AnswerOption, Archetype, QuestionNode, QuizGraph, Trait};

/// Archetype membership rules in priority order. The first rule whose trait
/// set contains the primary or secondary dominant trait wins.
pub const ARCHETYPE_RULES: [(Archetype, &[Trait]); 4] = [
    (
        Archetype::Wild,
        &[
            Trait::Boldness,
            Trait::Excitement,
            Trait::Ruggedness,
            Trait::ColorPlayfulness,
        ],
    ),
    (
        Archetype::Elegant,
        &[
            Trait::Elegance,
            Trait::Sophistication,
            Trait::LuxuryLeaning,
            Trait::Minimalism,
        ],
    ),
    (
        Archetype::Creative,
        &[Trait::ArtisticFlair, Trait::Whimsy, Trait::ColorPlayfulness],
    ),
    (
        Archetype::Minimalist,
        &[
            Trait::Minimalism,
            Trait::Competence,
            Trait::Sincerity,
            Trait::Versatility,
        ],
    ),
];

/// Tuning for the adaptive-eligibility predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouterConfig {
    /// Total score above which routing becomes adaptive.
    pub score_threshold: f64,
    /// Question number above which routing becomes adaptive.
    pub min_question_number: u32,
    /// Nodes at which routing is always adaptive.
    pub major_branch_points: Vec<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            score_threshold: 25.0,
            min_question_number: 2,
            major_branch_points: ["Q1", "Q3", "Q5", "Q7"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Outcome of a routing decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDecision {
    /// Node to visit next. `None` ends the quiz.
    pub next: Option<String>,
    /// The chosen option's declared successor.
    pub default_next: Option<String>,
    /// Whether the adaptive-eligibility predicate held.
    pub eligible: bool,
    /// Archetype matched by the dominant traits, if evaluated and matched.
    pub archetype: Option<Archetype>,
    /// Whether `next` is an alternate rather than the declared successor.
    pub rerouted: bool,
}

/// Decides the next node for each answered question.
#[derive(Debug, Clone, Default)]
pub struct AdaptiveRouter {
    config: RouterConfig,
}

impl AdaptiveRouter {
    /// Create a router with the given tuning.
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    /// The router's tuning.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Look up a node and one of its options.
    ///
    /// # Errors
    /// [`EngineError::UnknownNode`] or [`EngineError::OptionOutOfRange`].
    pub fn resolve<'g>(
        &self,
        graph: &'g QuizGraph,
        node_id: &str,
        option_index: usize,
    ) -> EngineResult<(&'g QuestionNode, &'g AnswerOption)> {
        let node = graph.node(node_id).ok_or_else(|| EngineError::UnknownNode {
            node_id: node_id.to_string(),
        })?;
        let option = node
            .options
            .get(option_index)
            .ok_or_else(|| EngineError::OptionOutOfRange {
                node_id: node_id.to_string(),
                index: option_index,
                available: node.options.len(),
            })?;
        Ok((node, option))
    }

    /// Whether adaptive override may apply.
    ///
    /// Any one of: total score above threshold, current node is a major
    /// branch point, question number above the minimum.
    pub fn is_eligible(&self, node_id: &str, total_score: f64, question_number: u32) -> bool {
        total_score > self.config.score_threshold
            || self.config.major_branch_points.iter().any(|id| id == node_id)
            || question_number > self.config.min_question_number
    }

    /// Match the top two dominant traits against [`ARCHETYPE_RULES`].
    ///
    /// Needs at least two dominant traits.
    pub fn match_archetype(dominant: &[Trait]) -> Option<Archetype> {
        let [primary, secondary, ..] = dominant else {
            return None;
        };
        ARCHETYPE_RULES
            .iter()
            .find(|(_, members)| members.contains(primary) || members.contains(secondary))
            .map(|(archetype, _)| *archetype)
    }

    /// Choose the node that follows `option` at `node_id`.
    ///
    /// `question_number` is the session counter after recording the answer.
    /// A successor that is not in the graph ends the quiz.
    pub fn next_node(
        &self,
        graph: &QuizGraph,
        node_id: &str,
        option: &AnswerOption,
        profile: &PersonalityProfile,
        question_number: u32,
    ) -> RouteDecision {
        let default_next = option.next.clone();
        let eligible = self.is_eligible(node_id, profile.total_score, question_number);

        let mut decision = RouteDecision {
            next: default_next.clone(),
            default_next: default_next.clone(),
            eligible,
            archetype: None,
            rerouted: false,
        };

        if eligible {
            decision.archetype = Self::match_archetype(&profile.dominant_traits);
        }

        if let (Some(archetype), Some(default_id)) = (decision.archetype, default_next.as_deref()) {
            match graph.alternate(archetype, default_id) {
                Some(alternate) if graph.contains(alternate) => {
                    info!(
                        from = %node_id,
                        default = %default_id,
                        alternate = %alternate,
                        archetype = %archetype,
                        "Adaptive reroute"
                    );
                    decision.next = Some(alternate.to_string());
                    decision.rerouted = true;
                }
                Some(alternate) => {
                    debug!(
                        alternate = %alternate,
                        archetype = %archetype,
                        "Alternate node not in graph, keeping default"
                    );
                }
                None => {}
            }
        }

        if let Some(next) = decision.next.as_deref() {
            if !graph.contains(next) {
                warn!(
                    from = %node_id,
                    next = %next,
                    "Successor node not in graph, ending quiz"
                );
                decision.next = None;
            }
        }

        decision
    }
}
