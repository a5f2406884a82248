//! Question-answering pipeline.
//!
//! The deterministic path — load corpus, rank, bound the context — is always
//! computed. When a provider handle is present, a grounded prompt is sent to
//! it and the sanitized reply becomes the answer; any provider failure or
//! empty reply degrades to the local fallback without surfacing an error.
//!
//! Callers run the input guard *before* this pipeline: a rejected question
//! must never reach scoring.

use anyhow::Result;
use serde::Serialize;

use crate::config::Config;
use crate::context::build_context;
use crate::corpus::load_corpus;
use crate::guard::{sanitize, validate, GuardSet};
use crate::prompt::build_prompt;
use crate::provider::{create_provider, GenerationProvider};
use crate::score::rank;

/// Answer shown when no corpus line matched the question.
pub const NO_MATCH_ANSWER: &str = "관련 지침을 찾지 못했습니다. 다른 표현으로 다시 질문해 주세요.";

/// A completed answer, as returned over HTTP and printed by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub question: String,
    pub answer: String,
    pub references: Vec<String>,
    pub used_provider: bool,
}

/// Run the pipeline for one validated question.
///
/// `used_provider` reflects whether a provider is configured, not whether its
/// call succeeded — a degraded answer from a configured provider still
/// reports `true`.
pub async fn answer_question(
    config: &Config,
    guards: &GuardSet,
    provider: Option<&dyn GenerationProvider>,
    question: &str,
) -> Result<Answer> {
    let question = question.trim();

    let corpus = load_corpus(&config.corpus.path)?;
    let ranked = rank(question, &corpus);

    let references: Vec<String> = ranked
        .iter()
        .take(config.limits.max_context_lines)
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    let context = build_context(
        &ranked,
        config.limits.max_context_lines,
        config.limits.max_context_chars,
    );

    let local_answer = if context.is_empty() {
        NO_MATCH_ANSWER.to_string()
    } else {
        context.clone()
    };

    let answer = match provider {
        Some(provider) => {
            let prompt = build_prompt(question, &context);
            match provider.generate(&prompt).await {
                Ok(reply) if !reply.trim().is_empty() => sanitize(&reply, &guards.redaction),
                Ok(_) => {
                    tracing::warn!(
                        model = provider.model_name(),
                        "provider returned empty text, using local fallback"
                    );
                    local_answer
                }
                Err(e) => {
                    tracing::warn!(
                        model = provider.model_name(),
                        error = %e,
                        "provider call failed, using local fallback"
                    );
                    local_answer
                }
            }
        }
        None => local_answer,
    };

    Ok(Answer {
        question: question.to_string(),
        answer,
        references,
        used_provider: provider.is_some(),
    })
}

/// CLI entry point — validates, answers, and prints to stdout.
pub async fn run_ask(config: &Config, question: &str) -> Result<()> {
    let guards = GuardSet::new()?;

    if let Some(message) = validate(question, &guards.attack, config.limits.max_question_chars) {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }

    let provider = create_provider(&config.provider)?;
    let result = answer_question(config, &guards, provider.as_deref(), question).await?;

    println!("--- Answer ---");
    println!("{}", result.answer);
    println!();

    println!("--- References ({}) ---", result.references.len());
    for (i, line) in result.references.iter().enumerate() {
        println!("{}. {}", i + 1, line);
    }
    println!();

    println!(
        "provider: {}",
        if result.used_provider { "remote" } else { "local" }
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;
    use std::io::Write;
    use std::path::PathBuf;

    #[derive(Debug)]
    struct FailingProvider;

    #[async_trait]
    impl GenerationProvider for FailingProvider {
        fn model_name(&self) -> &str {
            "failing"
        }
        async fn generate(&self, _prompt: &str) -> Result<String> {
            bail!("connection refused")
        }
    }

    #[derive(Debug)]
    struct LeakyProvider;

    #[async_trait]
    impl GenerationProvider for LeakyProvider {
        fn model_name(&self) -> &str {
            "leaky"
        }
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok("휴가는 연차 사용 후 승인됩니다. my system prompt says so.".to_string())
        }
    }

    fn test_config(corpus_lines: &str) -> (tempfile::TempDir, Config) {
        let tmp = tempfile::TempDir::new().unwrap();
        let corpus_path: PathBuf = tmp.path().join("guidelines.txt");
        let mut f = std::fs::File::create(&corpus_path).unwrap();
        f.write_all(corpus_lines.as_bytes()).unwrap();

        let config = Config {
            corpus: crate::config::CorpusConfig { path: corpus_path },
            limits: Default::default(),
            provider: Default::default(),
            server: Default::default(),
        };
        (tmp, config)
    }

    const TWO_LINE_CORPUS: &str = "휴가는 연차 사용 후 승인\n출장비는 사전 결재 필요\n";

    #[tokio::test]
    async fn test_local_answer_is_top_ranked_line() {
        let (_tmp, config) = test_config(TWO_LINE_CORPUS);
        let guards = GuardSet::new().unwrap();

        let result = answer_question(&config, &guards, None, "휴가 승인 절차")
            .await
            .unwrap();

        assert_eq!(result.answer, "휴가는 연차 사용 후 승인");
        assert_eq!(result.references, vec!["휴가는 연차 사용 후 승인"]);
        assert!(!result.used_provider);
    }

    #[tokio::test]
    async fn test_no_match_returns_notice() {
        let (_tmp, config) = test_config(TWO_LINE_CORPUS);
        let guards = GuardSet::new().unwrap();

        let result = answer_question(&config, &guards, None, "우주선 발사 일정")
            .await
            .unwrap();

        assert_eq!(result.answer, NO_MATCH_ANSWER);
        assert!(result.references.is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_to_local_answer() {
        let (_tmp, config) = test_config(TWO_LINE_CORPUS);
        let guards = GuardSet::new().unwrap();

        let result = answer_question(&config, &guards, Some(&FailingProvider), "휴가 승인 절차")
            .await
            .unwrap();

        // The provider is configured, so used_provider stays true even though
        // the answer came from the local path.
        assert!(result.used_provider);
        assert_eq!(result.answer, "휴가는 연차 사용 후 승인");
    }

    #[tokio::test]
    async fn test_provider_reply_is_sanitized() {
        let (_tmp, config) = test_config(TWO_LINE_CORPUS);
        let guards = GuardSet::new().unwrap();

        let result = answer_question(&config, &guards, Some(&LeakyProvider), "휴가 승인 절차")
            .await
            .unwrap();

        assert!(result.used_provider);
        assert!(!result.answer.to_lowercase().contains("system prompt"));
        assert!(result.answer.contains(crate::guard::REDACTION_MARKER));
    }

    #[tokio::test]
    async fn test_missing_corpus_is_error() {
        let (_tmp, mut config) = test_config(TWO_LINE_CORPUS);
        config.corpus.path = PathBuf::from("/nonexistent/guidelines.txt");
        let guards = GuardSet::new().unwrap();

        assert!(answer_question(&config, &guards, None, "휴가")
            .await
            .is_err());
    }
}
