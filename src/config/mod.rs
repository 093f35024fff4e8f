use std::env;
use std::path::PathBuf;

use crate::engine::RouterConfig;
use crate::error::AppError;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub quiz: QuizConfig,
    pub logging: LoggingConfig,
    pub router: RouterConfig,
}

/// Quiz content configuration
#[derive(Debug, Clone)]
pub struct QuizConfig {
    pub graph_path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let quiz = QuizConfig {
            graph_path: PathBuf::from(
                env::var("QUIZ_GRAPH_PATH")
                    .unwrap_or_else(|_| "./data/quiz_graph.json".to_string()),
            ),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let defaults = RouterConfig::default();
        let router = RouterConfig {
            score_threshold: env::var("ADAPTIVE_SCORE_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.score_threshold),
            min_question_number: env::var("ADAPTIVE_MIN_QUESTION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_question_number),
            major_branch_points: env::var("ADAPTIVE_BRANCH_POINTS")
                .ok()
                .map(|s| parse_id_list(&s))
                .filter(|ids| !ids.is_empty())
                .unwrap_or(defaults.major_branch_points),
        };

        if !router.score_threshold.is_finite() {
            return Err(AppError::Config {
                message: format!(
                    "ADAPTIVE_SCORE_THRESHOLD must be finite, got {}",
                    router.score_threshold
                ),
            });
        }

        Ok(Config {
            quiz,
            logging,
            router,
        })
    }
}

fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("Q1, Q4 ,Q9"), vec!["Q1", "Q4", "Q9"]);
        assert_eq!(parse_id_list("Q1,,"), vec!["Q1"]);
        assert!(parse_id_list(" , ").is_empty());
    }

    #[test]
    fn test_logging_config_default() {
        let logging = LoggingConfig::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Pretty);
    }
}
