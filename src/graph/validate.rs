//! Authoring checks for loaded quiz graphs.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;

use super::{Archetype, QuizGraph};

/// A non-fatal problem in quiz content.
///
/// None of these stop a quiz: dangling successors end the session, unknown
/// weight keys are ignored, and unreachable nodes are simply never asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphIssue {
    /// An option's `next` names a node that does not exist.
    DanglingNext {
        node_id: String,
        option_index: usize,
        target: String,
    },
    /// An option weights a trait outside the quiz taxonomy.
    UnknownTrait {
        node_id: String,
        option_index: usize,
        trait_name: String,
    },
    /// A node offers no answers.
    NoOptions { node_id: String },
    /// The node map key differs from the node's own `id`.
    IdMismatch { key: String, id: String },
    /// The node cannot be reached from the start node.
    Unreachable { node_id: String },
}

impl std::fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphIssue::DanglingNext {
                node_id,
                option_index,
                target,
            } => write!(
                f,
                "{} option {}: next node '{}' does not exist (treated as end of quiz)",
                node_id, option_index, target
            ),
            GraphIssue::UnknownTrait {
                node_id,
                option_index,
                trait_name,
            } => write!(
                f,
                "{} option {}: weight for unknown trait '{}' is ignored",
                node_id, option_index, trait_name
            ),
            GraphIssue::NoOptions { node_id } => write!(f, "{}: no answer options", node_id),
            GraphIssue::IdMismatch { key, id } => {
                write!(f, "{}: node declares id '{}'", key, id)
            }
            GraphIssue::Unreachable { node_id } => {
                write!(f, "{}: unreachable from start node", node_id)
            }
        }
    }
}

impl QuizGraph {
    /// Check the graph for authoring problems.
    ///
    /// Issues are reported per node in sorted node order; unreachable nodes
    /// are listed last.
    pub fn validate(&self) -> Vec<GraphIssue> {
        let mut issues = Vec::new();

        for key in self.node_ids() {
            let Some(node) = self.node(key) else {
                continue;
            };

            if node.id != key {
                issues.push(GraphIssue::IdMismatch {
                    key: key.to_string(),
                    id: node.id.clone(),
                });
            }

            if node.options.is_empty() {
                issues.push(GraphIssue::NoOptions {
                    node_id: key.to_string(),
                });
            }

            for (index, option) in node.options.iter().enumerate() {
                if let Some(target) = &option.next {
                    if !self.contains(target) {
                        issues.push(GraphIssue::DanglingNext {
                            node_id: key.to_string(),
                            option_index: index,
                            target: target.clone(),
                        });
                    }
                }

                let mut unknown: Vec<&String> = option
                    .weights
                    .keys()
                    .filter(|name| self.taxonomy().resolve(name).is_none())
                    .collect();
                unknown.sort();
                for name in unknown {
                    issues.push(GraphIssue::UnknownTrait {
                        node_id: key.to_string(),
                        option_index: index,
                        trait_name: name.clone(),
                    });
                }
            }
        }

        let reachable = self.reachable();
        for key in self.node_ids() {
            if !reachable.contains(key) {
                issues.push(GraphIssue::Unreachable {
                    node_id: key.to_string(),
                });
            }
        }

        issues
    }

    /// Node IDs reachable from the start node via default successors or
    /// alternate paths.
    pub fn reachable(&self) -> HashSet<&str> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        seen.insert(self.start());
        queue.push_back(self.start());

        while let Some(id) = queue.pop_front() {
            let Some(node) = self.node(id) else {
                continue;
            };
            for option in &node.options {
                let Some(next) = option.next.as_deref() else {
                    continue;
                };
                let alternates = Archetype::ALL
                    .iter()
                    .filter_map(|a| self.alternate(*a, next));
                for candidate in std::iter::once(next).chain(alternates) {
                    if let Some((key, _)) = self.nodes.get_key_value(candidate) {
                        if seen.insert(key.as_str()) {
                            queue.push_back(key.as_str());
                        }
                    }
                }
            }
        }

        seen
    }
}
