//! # Adaptive Quiz
//!
//! An adaptive personality-quiz engine: answers carry weighted trait deltas,
//! the running profile can steer the quiz onto archetype-specific alternate
//! questions, and the final profile is named by ordered classification
//! tables.
//!
//! ## Features
//!
//! - **Question graph**: JSON-loaded, immutable, shared via `Arc`
//! - **Weighted scoring**: unknown trait names are ignored, never fatal
//! - **Adaptive routing**: Wild, Elegant, Creative and Minimalist alternate paths
//! - **Classification**: two-trait patterns first, then single-trait names
//! - **Stdio driver**: line-delimited JSON-RPC for interactive or scripted runs
//!
//! ## Architecture
//!
//! ```text
//! QuizGraph (Arc, read-only) → QuizEngine → &mut QuizSession (per user)
//!                                   ↓
//!                     AdaptiveRouter, PersonalityClassifier
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use adaptive_quiz::{QuizEngine, QuizGraph};
//!
//! let graph = QuizGraph::from_file("data/quiz_graph.json")?;
//! let engine = QuizEngine::new(Arc::new(graph));
//! let mut session = engine.new_session();
//!
//! let outcome = engine.step(&mut session, "Q1", 0)?;
//! println!("next: {:?}", outcome.next_node_id);
//! println!("{}", engine.classify(&session));
//! ```

#![warn(missing_docs)]

/// Command-line interface.
pub mod cli;
/// Configuration management.
pub mod config;
/// Scoring, routing, classification and sessions.
pub mod engine;
/// Error types and result aliases for the application.
pub mod error;
/// Quiz graph data model, loading and validation.
pub mod graph;
/// Stdio driver and request handling.
pub mod server;

pub use config::Config;
pub use engine::{PersonalityReport, QuizEngine, QuizSession, StepOutcome};
pub use error::{AppError, AppResult};
pub use graph::{QuizGraph, Trait};
pub use server::QuizServer;
