//! Command-line interface for the quiz binary.
//!
//! Provides the stdio driver, graph validation and scripted replay of a
//! quiz from a list of option indices.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::engine::{QuizEngine, QuizSession};
use crate::server::QuizServer;

/// Adaptive personality quiz engine.
#[derive(Parser, Debug)]
#[command(name = "adaptive-quiz", version, about)]
pub struct Cli {
    /// Quiz graph JSON file (overrides QUIZ_GRAPH_PATH)
    #[arg(long, global = true)]
    pub graph: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: QuizCommands,
}

/// Quiz CLI subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum QuizCommands {
    /// Run the line-delimited JSON driver on stdin/stdout
    Serve,

    /// Check the quiz graph and list any issues
    Validate,

    /// Answer the quiz with the given option indices and print the report
    Replay {
        /// Comma-separated option indices, one per question
        #[arg(long, value_delimiter = ',', required = true)]
        answers: Vec<usize>,

        /// Node to start from instead of the graph's start node
        #[arg(long)]
        start: Option<String>,
    },
}

/// Result of CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    /// Exit code (0 = success)
    pub exit_code: i32,
    /// Output message
    pub message: String,
}

impl CliResult {
    /// Create a success result with the given message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            message: message.into(),
        }
    }

    /// Create an error result with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            exit_code: 1,
            message: message.into(),
        }
    }
}

/// Execute a quiz CLI command.
pub async fn execute_command(command: QuizCommands, engine: Arc<QuizEngine>) -> CliResult {
    match command {
        QuizCommands::Serve => execute_serve(engine).await,
        QuizCommands::Validate => execute_validate(&engine),
        QuizCommands::Replay { answers, start } => {
            execute_replay(&engine, &answers, start.as_deref())
        }
    }
}

async fn execute_serve(engine: Arc<QuizEngine>) -> CliResult {
    let mut server = QuizServer::new(engine);
    match server.run().await {
        Ok(()) => CliResult::success(""),
        Err(e) => CliResult::error(format!("Driver error: {}", e)),
    }
}

/// Execute validate command.
pub fn execute_validate(engine: &QuizEngine) -> CliResult {
    let graph = engine.graph();
    let issues = graph.validate();

    if issues.is_empty() {
        return CliResult::success(format!(
            "Quiz graph OK: {} nodes, start {}",
            graph.len(),
            graph.start()
        ));
    }

    let mut output = format!("Quiz graph has {} issue(s):\n", issues.len());
    for issue in &issues {
        output.push_str(&format!("  - {}\n", issue));
    }
    CliResult::error(output.trim_end())
}

/// Execute replay command.
pub fn execute_replay(engine: &QuizEngine, answers: &[usize], start: Option<&str>) -> CliResult {
    let mut session = match start {
        Some(id) if engine.question(id).is_none() => {
            return CliResult::error(format!("Unknown start node: {}", id));
        }
        Some(id) => QuizSession::new(engine.graph().taxonomy(), id),
        None => engine.new_session(),
    };

    for (answered, &option_index) in answers.iter().enumerate() {
        let Some(node_id) = session.current_node().map(String::from) else {
            warn!(
                unused = answers.len() - answered,
                "Quiz complete before all answers were used"
            );
            break;
        };

        if let Err(e) = engine.step(&mut session, &node_id, option_index) {
            return CliResult::error(format!("Cannot proceed: {}", e));
        }
    }

    info!(
        answers = session.history().len(),
        complete = session.is_complete(),
        "Replay finished"
    );

    match serde_json::to_string_pretty(&engine.report(&session)) {
        Ok(json) => CliResult::success(json),
        Err(e) => CliResult::error(format!("Failed to serialize report: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AnswerOption, QuestionNode, QuizGraph, TraitTaxonomy};

    fn engine() -> QuizEngine {
        let graph = QuizGraph::new(
            TraitTaxonomy::canonical(),
            "Q1",
            [
                QuestionNode::new("Q1", "Weekend plans?")
                    .with_option(
                        AnswerOption::new("Gallery")
                            .with_next("Q2")
                            .with_weight("Artistic Flair", 6.0),
                    )
                    .with_option(
                        AnswerOption::new("Hike")
                            .with_next("Q2")
                            .with_weight("Ruggedness", 6.0),
                    ),
                QuestionNode::new("Q2", "Pick a hue").with_option(
                    AnswerOption::new("Neon").with_weight("Color Playfulness", 4.0),
                ),
            ],
        )
        .unwrap();
        QuizEngine::new(Arc::new(graph))
    }

    #[test]
    fn test_cli_parses_replay() {
        let cli = Cli::try_parse_from([
            "adaptive-quiz",
            "--graph",
            "quiz.json",
            "replay",
            "--answers",
            "0,1,2",
        ])
        .unwrap();
        assert_eq!(cli.graph, Some(PathBuf::from("quiz.json")));
        assert_eq!(
            cli.command,
            QuizCommands::Replay {
                answers: vec![0, 1, 2],
                start: None,
            }
        );
    }

    #[test]
    fn test_cli_graph_after_subcommand() {
        let cli = Cli::try_parse_from(["adaptive-quiz", "validate", "--graph", "g.json"]).unwrap();
        assert_eq!(cli.command, QuizCommands::Validate);
        assert_eq!(cli.graph, Some(PathBuf::from("g.json")));
    }

    #[test]
    fn test_cli_rejects_non_numeric_answers() {
        assert!(Cli::try_parse_from(["adaptive-quiz", "replay", "--answers", "a,b"]).is_err());
    }

    #[test]
    fn test_replay_prints_report() {
        let result = execute_replay(&engine(), &[0, 0], None);
        assert_eq!(result.exit_code, 0);
        let report: serde_json::Value = serde_json::from_str(&result.message).unwrap();
        assert_eq!(report["personalityType"], "The Creative Visionary");
        assert_eq!(report["quizJourney"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_replay_ignores_extra_answers() {
        let result = execute_replay(&engine(), &[1, 0, 0, 0], None);
        assert_eq!(result.exit_code, 0);
        let report: serde_json::Value = serde_json::from_str(&result.message).unwrap();
        assert_eq!(report["quizJourney"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_replay_invalid_option() {
        let result = execute_replay(&engine(), &[7], None);
        assert_eq!(result.exit_code, 1);
        assert!(result.message.starts_with("Cannot proceed"));
    }

    #[test]
    fn test_replay_custom_start() {
        let result = execute_replay(&engine(), &[0], Some("Q2"));
        assert_eq!(result.exit_code, 0);

        let result = execute_replay(&engine(), &[0], Some("Q9"));
        assert_eq!(result.exit_code, 1);
        assert_eq!(result.message, "Unknown start node: Q9");
    }

    #[test]
    fn test_validate_clean_graph() {
        let result = execute_validate(&engine());
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.message, "Quiz graph OK: 2 nodes, start Q1");
    }
}
