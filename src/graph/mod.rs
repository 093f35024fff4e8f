//! Quiz graph data model.
//!
//! This module provides:
//! - [`QuizGraph`]: immutable directed graph of question nodes
//! - [`QuestionNode`] and [`AnswerOption`]: questions and weighted answers
//! - [`TraitTaxonomy`]: the ordered trait set a quiz scores
//! - [`GraphIssue`]: non-fatal authoring problems found by validation
//!
//! A graph is loaded once from a JSON document and shared read-only
//! (`Arc<QuizGraph>`) by every session.

mod taxonomy;
mod validate;

pub use taxonomy::*;
pub use validate::GraphIssue;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GraphError, GraphResult};

/// Node ID used when a document does not name a start node.
pub const DEFAULT_START_NODE: &str = "Q1";

/// Default successor IDs that carry conventional alternate-path nodes.
const BUILTIN_ALTERNATE_SOURCES: [&str; 6] = ["Q3", "Q4", "Q5", "Q6", "Q7", "Q8"];

/// A selectable answer with its successor and trait weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Answer text shown to the user.
    pub text: String,
    /// Default successor node. `None` ends the quiz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Signed score deltas keyed by trait name.
    #[serde(default)]
    pub weights: HashMap<String, f64>,
}

impl AnswerOption {
    /// Create a terminal option with no weights.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next: None,
            weights: HashMap::new(),
        }
    }

    /// Set the default successor.
    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }

    /// Add a trait weight.
    pub fn with_weight(mut self, trait_name: impl Into<String>, delta: f64) -> Self {
        self.weights.insert(trait_name.into(), delta);
        self
    }
}

/// A question and its ordered answer options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionNode {
    /// Node identifier. Filled from the node map key when omitted.
    #[serde(default)]
    pub id: String,
    /// Question text.
    pub question: String,
    /// Answer options in display order.
    #[serde(default)]
    pub options: Vec<AnswerOption>,
}

impl QuestionNode {
    /// Create a question with no options.
    pub fn new(id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            options: Vec::new(),
        }
    }

    /// Append an answer option.
    pub fn with_option(mut self, option: AnswerOption) -> Self {
        self.options.push(option);
        self
    }
}

#[derive(Debug, Deserialize)]
struct QuizDocument {
    #[serde(default)]
    dimensions: Dimensions,
    graph: GraphSection,
}

#[derive(Debug, Deserialize)]
struct GraphSection {
    #[serde(default)]
    start: Option<String>,
    nodes: HashMap<String, QuestionNode>,
    #[serde(default)]
    alternates: HashMap<String, HashMap<String, String>>,
}

/// Immutable quiz graph.
#[derive(Debug, Clone)]
pub struct QuizGraph {
    taxonomy: TraitTaxonomy,
    start: String,
    nodes: HashMap<String, QuestionNode>,
    alternates: HashMap<Archetype, HashMap<String, String>>,
}

impl QuizGraph {
    /// Build a graph from parts.
    ///
    /// Nodes are keyed by their own `id`. Built-in alternate-path tables are
    /// installed.
    ///
    /// # Errors
    /// Returns [`GraphError::Empty`] for no nodes and
    /// [`GraphError::MissingStart`] when `start` is not a node.
    pub fn new(
        taxonomy: TraitTaxonomy,
        start: impl Into<String>,
        nodes: impl IntoIterator<Item = QuestionNode>,
    ) -> GraphResult<Self> {
        let nodes = nodes.into_iter().map(|n| (n.id.clone(), n)).collect();
        Self::assemble(taxonomy, start.into(), nodes, builtin_alternates())
    }

    /// Parse a quiz document.
    pub fn from_json_str(json: &str) -> GraphResult<Self> {
        let doc: QuizDocument = serde_json::from_str(json)?;
        let taxonomy = TraitTaxonomy::from_dimensions(&doc.dimensions);

        let mut nodes = doc.graph.nodes;
        for (key, node) in nodes.iter_mut() {
            if node.id.is_empty() {
                node.id = key.clone();
            }
        }

        let mut alternates = builtin_alternates();
        for (name, table) in doc.graph.alternates {
            match name.parse::<Archetype>() {
                Ok(archetype) => alternates.entry(archetype).or_default().extend(table),
                Err(e) => warn!(error = %e, "Ignoring alternate table for unknown archetype"),
            }
        }

        let start = doc
            .graph
            .start
            .unwrap_or_else(|| DEFAULT_START_NODE.to_string());

        Self::assemble(taxonomy, start, nodes, alternates)
    }

    /// Read and parse a quiz document from disk.
    pub fn from_file(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| GraphError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let graph = Self::from_json_str(&raw)?;
        debug!(
            path = %path.display(),
            nodes = graph.len(),
            traits = graph.taxonomy.len(),
            "Quiz graph loaded"
        );
        Ok(graph)
    }

    fn assemble(
        taxonomy: TraitTaxonomy,
        start: String,
        nodes: HashMap<String, QuestionNode>,
        alternates: HashMap<Archetype, HashMap<String, String>>,
    ) -> GraphResult<Self> {
        if nodes.is_empty() {
            return Err(GraphError::Empty);
        }
        if !nodes.contains_key(&start) {
            return Err(GraphError::MissingStart { node_id: start });
        }
        Ok(Self {
            taxonomy,
            start,
            nodes,
            alternates,
        })
    }

    /// Add or override an alternate-path entry.
    pub fn with_alternate(
        mut self,
        archetype: Archetype,
        default_id: impl Into<String>,
        alternate_id: impl Into<String>,
    ) -> Self {
        self.alternates
            .entry(archetype)
            .or_default()
            .insert(default_id.into(), alternate_id.into());
        self
    }

    /// The trait taxonomy declared by this quiz.
    pub fn taxonomy(&self) -> &TraitTaxonomy {
        &self.taxonomy
    }

    /// The first question's node ID.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Look up a node by ID.
    pub fn node(&self, id: &str) -> Option<&QuestionNode> {
        self.nodes.get(id)
    }

    /// Whether a node with this ID exists.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Alternate node ID listed for an archetype and default successor.
    ///
    /// The entry may name a node that does not exist; callers check.
    pub fn alternate(&self, archetype: Archetype, default_id: &str) -> Option<&str> {
        self.alternates
            .get(&archetype)
            .and_then(|table| table.get(default_id))
            .map(String::as_str)
    }

    /// Node IDs in sorted order.
    pub fn node_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of question nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes. Never true for a loaded graph.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn builtin_alternates() -> HashMap<Archetype, HashMap<String, String>> {
    Archetype::ALL
        .iter()
        .map(|archetype| {
            let table = BUILTIN_ALTERNATE_SOURCES
                .iter()
                .map(|id| (id.to_string(), format!("{}_{}", id, archetype.node_suffix())))
                .collect();
            (*archetype, table)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_graph() -> QuizGraph {
        QuizGraph::new(
            TraitTaxonomy::canonical(),
            "Q1",
            [
                QuestionNode::new("Q1", "First?")
                    .with_option(AnswerOption::new("Go").with_next("Q2")),
                QuestionNode::new("Q2", "Last?").with_option(AnswerOption::new("Done")),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_graph_accessors() {
        let graph = two_node_graph();
        assert_eq!(graph.start(), "Q1");
        assert_eq!(graph.len(), 2);
        assert!(graph.contains("Q2"));
        assert!(!graph.contains("Q3"));
        assert_eq!(graph.node_ids(), vec!["Q1", "Q2"]);
        assert_eq!(graph.node("Q1").unwrap().options.len(), 1);
    }

    #[test]
    fn test_new_graph_rejects_empty() {
        let result = QuizGraph::new(TraitTaxonomy::canonical(), "Q1", Vec::new());
        assert!(matches!(result, Err(GraphError::Empty)));
    }

    #[test]
    fn test_new_graph_rejects_missing_start() {
        let result = QuizGraph::new(
            TraitTaxonomy::canonical(),
            "START",
            [QuestionNode::new("Q1", "Only")],
        );
        match result {
            Err(GraphError::MissingStart { node_id }) => assert_eq!(node_id, "START"),
            other => panic!("expected MissingStart, got {:?}", other),
        }
    }

    #[test]
    fn test_builtin_alternates_installed() {
        let graph = two_node_graph();
        assert_eq!(graph.alternate(Archetype::Wild, "Q4"), Some("Q4_WILD"));
        assert_eq!(
            graph.alternate(Archetype::Minimalist, "Q8"),
            Some("Q8_MINIMALIST")
        );
        assert_eq!(graph.alternate(Archetype::Creative, "Q2"), None);
        assert_eq!(graph.alternate(Archetype::Elegant, "Q9"), None);
    }

    #[test]
    fn test_with_alternate_overrides() {
        let graph = two_node_graph().with_alternate(Archetype::Wild, "Q4", "Q4_EDGY");
        assert_eq!(graph.alternate(Archetype::Wild, "Q4"), Some("Q4_EDGY"));
    }

    #[test]
    fn test_from_json_fills_ids_and_defaults_start() {
        let json = r#"{
            "graph": {
                "nodes": {
                    "Q1": {"question": "Pick", "options": [{"text": "A", "weights": {"Boldness": 3}}]}
                }
            }
        }"#;
        let graph = QuizGraph::from_json_str(json).unwrap();
        assert_eq!(graph.start(), DEFAULT_START_NODE);
        assert_eq!(graph.node("Q1").unwrap().id, "Q1");
        assert_eq!(graph.taxonomy(), &TraitTaxonomy::canonical());
        let option = &graph.node("Q1").unwrap().options[0];
        assert_eq!(option.next, None);
        assert_eq!(option.weights.get("Boldness"), Some(&3.0));
    }

    #[test]
    fn test_from_json_reads_declared_alternates() {
        let json = r#"{
            "graph": {
                "start": "Intro",
                "nodes": {"Intro": {"question": "Hi", "options": []}},
                "alternates": {
                    "creative": {"Q2": "Q2_ART"},
                    "bogus": {"Q2": "Q2_BOGUS"}
                }
            }
        }"#;
        let graph = QuizGraph::from_json_str(json).unwrap();
        assert_eq!(graph.start(), "Intro");
        assert_eq!(graph.alternate(Archetype::Creative, "Q2"), Some("Q2_ART"));
        assert_eq!(
            graph.alternate(Archetype::Creative, "Q3"),
            Some("Q3_CREATIVE")
        );
    }

    #[test]
    fn test_from_json_malformed() {
        let result = QuizGraph::from_json_str("{ not json");
        assert!(matches!(result, Err(GraphError::Parse(_))));

        let result = QuizGraph::from_json_str(r#"{"dimensions": {}}"#);
        assert!(matches!(result, Err(GraphError::Parse(_))));
    }

    #[test]
    fn test_answer_option_serialize_skips_absent_next() {
        let json = serde_json::to_value(AnswerOption::new("End")).unwrap();
        assert!(json.get("next").is_none());
        assert_eq!(json["text"], "End");
    }
}
