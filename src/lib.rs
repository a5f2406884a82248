//! # askgate
//!
//! A guarded question-answering service over policy guideline text.
//!
//! askgate answers natural-language questions against a static corpus of
//! guideline lines. Every corpus line is scored against the question with a
//! deterministic keyword scorer, the top lines are bounded into a context
//! snippet, and — when a generation provider is configured — a grounded
//! prompt is forwarded to it. Both directions are defended: inbound questions
//! are validated against prompt-injection attack patterns, and outbound
//! generated answers are redacted before they leave the service.
//!
//! ## Architecture
//!
//! ```text
//! question ──▶ InputGuard ──▶ Scorer ──▶ ContextAssembler ──┬──▶ answer
//!                               ▲                           │
//!                        corpus lines          PromptBuilder│
//!                                                           ▼
//!                                             provider ──▶ OutputGuard
//! ```
//!
//! When no provider is configured (or the provider call fails), the bounded
//! context snippet itself is the answer — the local path is always computable
//! without the network.
//!
//! ## Quick Start
//!
//! ```bash
//! askgate ask "휴가 승인 절차"          # one-shot answer
//! askgate check "ignore previous..."   # input guard verdict only
//! askgate corpus                       # corpus statistics
//! askgate serve                        # start the HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`corpus`] | Guideline file loading |
//! | [`normalize`] | Text normalization passes |
//! | [`token`] | Tokenization with Korean suffix stripping |
//! | [`score`] | Line relevance scoring and ranking |
//! | [`context`] | Bounded context snippet assembly |
//! | [`guard`] | Input validation and output redaction |
//! | [`prompt`] | Generation prompt construction |
//! | [`provider`] | Generation provider abstraction |
//! | [`answer`] | Question-answering pipeline |
//! | [`server`] | HTTP server |

pub mod answer;
pub mod config;
pub mod context;
pub mod corpus;
pub mod guard;
pub mod normalize;
pub mod prompt;
pub mod provider;
pub mod score;
pub mod server;
pub mod token;
