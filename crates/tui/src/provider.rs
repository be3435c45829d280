//! Collaborators the view controllers call out to.
//!
//! The tree view fetches lazy children through a [`ChildProvider`] and asks
//! the user for names and confirmations through an [`Interaction`]. Both are
//! traits so the terminal host, the tests, and any other front end can plug
//! in their own.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, instrument};
use trellis_config::TreeConfig;
use trellis_protocol::TreeNode;
use trellis_protocol::dummy::mock_children;

/// Errors reported by a [`ChildProvider`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider has nothing for this node.
    #[error("no children available for node {0}")]
    NotFound(String),

    /// The fetch itself failed.
    #[error("failed to fetch children of {node_id}: {reason}")]
    Fetch {
        /// Node whose children were requested.
        node_id: String,
        /// What went wrong.
        reason: String,
    },
}

/// Asynchronous source of children for lazy nodes.
#[async_trait]
pub trait ChildProvider: Send + Sync {
    /// Fetches the children of the node with the given id.
    async fn fetch(&self, node_id: &str) -> Result<Vec<TreeNode>, ProviderError>;
}

/// Provider that simulates a remote fetch with random latency and random
/// children.
///
/// # Examples
///
/// ```
/// use trellis_config::{LatencyRange, TreeConfig};
/// use trellis_tui::provider::{ChildProvider, MockChildProvider};
///
/// # async fn example() {
/// let provider = MockChildProvider::new(&TreeConfig {
///     fetch_latency_ms: LatencyRange::fixed(0),
///     ..Default::default()
/// });
/// let children = provider.fetch("node_1").await.unwrap();
/// assert!(!children.is_empty());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockChildProvider {
    min_latency: Duration,
    max_latency: Duration,
    max_children: usize,
    lazy_probability: f64,
}

impl MockChildProvider {
    /// Creates a provider from the tree configuration.
    #[must_use]
    pub fn new(config: &TreeConfig) -> Self {
        let (min_latency, max_latency) = config.fetch_latency_ms.bounds();
        Self {
            min_latency,
            max_latency: max_latency.max(min_latency),
            max_children: config.max_mock_children,
            lazy_probability: config.lazy_probability,
        }
    }

    fn pick_latency(&self) -> Duration {
        if self.min_latency >= self.max_latency {
            return self.min_latency;
        }
        rand::rng().random_range(self.min_latency..=self.max_latency)
    }
}

impl Default for MockChildProvider {
    fn default() -> Self {
        Self::new(&TreeConfig::default())
    }
}

#[async_trait]
impl ChildProvider for MockChildProvider {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, node_id: &str) -> Result<Vec<TreeNode>, ProviderError> {
        let latency = self.pick_latency();
        debug!(?latency, "mock fetch started");
        tokio::time::sleep(latency).await;

        let children = mock_children(&mut rand::rng(), self.max_children, self.lazy_probability);
        debug!(count = children.len(), "mock fetch finished");
        Ok(children)
    }
}

/// Provider returning canned answers, keyed by node id.
///
/// Unknown ids fail with [`ProviderError::NotFound`].
#[derive(Debug, Default)]
pub struct StaticChildProvider {
    answers: Vec<(String, Result<Vec<TreeNode>, ProviderError>)>,
}

impl StaticChildProvider {
    /// Creates a provider with no answers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the children returned for `node_id`.
    #[must_use]
    pub fn with_children(self, node_id: impl Into<String>, children: Vec<TreeNode>) -> Self {
        self.push(node_id.into(), Ok(children))
    }

    /// Registers a failure for `node_id`.
    #[must_use]
    pub fn with_failure(self, node_id: impl Into<String>, reason: impl Into<String>) -> Self {
        let node_id = node_id.into();
        let err = ProviderError::Fetch {
            node_id: node_id.clone(),
            reason: reason.into(),
        };
        self.push(node_id, Err(err))
    }

    fn push(mut self, node_id: String, answer: Result<Vec<TreeNode>, ProviderError>) -> Self {
        self.answers.push((node_id, answer));
        self
    }
}

#[async_trait]
impl ChildProvider for StaticChildProvider {
    async fn fetch(&self, node_id: &str) -> Result<Vec<TreeNode>, ProviderError> {
        self.answers
            .iter()
            .find(|(id, _)| id == node_id)
            .map(|(_, answer)| answer.clone())
            .unwrap_or_else(|| Err(ProviderError::NotFound(node_id.to_string())))
    }
}

/// Synchronous user dialogs: free-text prompts and yes/no confirmations.
pub trait Interaction {
    /// Asks for a string. `None` means the user cancelled.
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String>;

    /// Asks a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;
}

/// An answer collected ahead of time, typically by a modal dialog.
///
/// The terminal host shows its own dialog, then hands the result to the
/// controller wrapped in this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreparedAnswer {
    /// Text entered into a prompt.
    Text(String),
    /// A confirmation was accepted.
    Confirmed,
    /// A confirmation was declined.
    Declined,
    /// The dialog was dismissed.
    Cancelled,
}

impl Interaction for PreparedAnswer {
    fn prompt(&mut self, _message: &str, _default: Option<&str>) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            _ => None,
        }
    }

    fn confirm(&mut self, _message: &str) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// Replays a queue of answers and records every question asked.
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    answers: VecDeque<PreparedAnswer>,
    asked: Vec<String>,
}

impl ScriptedInteraction {
    /// Creates an interaction that answers with `answers`, in order.
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = PreparedAnswer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Returns every message shown so far, with defaults appended as
    /// `message [default]`.
    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    fn next_answer(&mut self) -> PreparedAnswer {
        self.answers.pop_front().unwrap_or(PreparedAnswer::Cancelled)
    }
}

impl Interaction for ScriptedInteraction {
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String> {
        match default {
            Some(default) => self.asked.push(format!("{message} [{default}]")),
            None => self.asked.push(message.to_string()),
        }
        self.next_answer().prompt(message, default)
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.next_answer().confirm(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_config::LatencyRange;

    fn instant_config() -> TreeConfig {
        TreeConfig {
            fetch_latency_ms: LatencyRange::fixed(0),
            max_mock_children: 3,
            lazy_probability: 0.0,
        }
    }

    #[tokio::test]
    async fn mock_provider_respects_config() {
        let provider = MockChildProvider::new(&instant_config());
        let children = provider.fetch("node_x").await.unwrap();
        assert!((1..=3).contains(&children.len()));
        assert!(children.iter().all(|c| !c.is_lazy()));
    }

    #[tokio::test]
    async fn mock_provider_waits_for_latency() {
        let provider = MockChildProvider::new(&TreeConfig {
            fetch_latency_ms: LatencyRange::fixed(30),
            ..instant_config()
        });
        let started = tokio::time::Instant::now();
        provider.fetch("node_x").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn pick_latency_stays_in_range() {
        let provider = MockChildProvider::new(&TreeConfig {
            fetch_latency_ms: LatencyRange { min: 10, max: 20 },
            ..instant_config()
        });
        for _ in 0..100 {
            let latency = provider.pick_latency();
            assert!(latency >= Duration::from_millis(10));
            assert!(latency <= Duration::from_millis(20));
        }
    }

    #[tokio::test]
    async fn static_provider_answers() {
        let provider = StaticChildProvider::new()
            .with_children("a", vec![TreeNode::new("child")])
            .with_failure("b", "offline");

        let children = provider.fetch("a").await.unwrap();
        assert_eq!(children[0].name, "child");

        let err = provider.fetch("b").await.unwrap_err();
        assert_eq!(err.to_string(), "failed to fetch children of b: offline");

        assert_eq!(
            provider.fetch("c").await.unwrap_err(),
            ProviderError::NotFound("c".to_string())
        );
    }

    #[test]
    fn prepared_answer_semantics() {
        assert_eq!(
            PreparedAnswer::Text("x".into()).prompt("?", None),
            Some("x".to_string())
        );
        assert_eq!(PreparedAnswer::Cancelled.prompt("?", None), None);
        assert!(PreparedAnswer::Confirmed.confirm("?"));
        assert!(!PreparedAnswer::Declined.confirm("?"));
        assert!(!PreparedAnswer::Text("yes".into()).confirm("?"));
    }

    #[test]
    fn scripted_interaction_records_questions() {
        let mut ui = ScriptedInteraction::new([
            PreparedAnswer::Text("Alpha".into()),
            PreparedAnswer::Confirmed,
        ]);

        assert_eq!(ui.prompt("Name?", Some("old")), Some("Alpha".to_string()));
        assert!(ui.confirm("Sure?"));
        assert_eq!(ui.prompt("Again?", None), None);

        assert_eq!(ui.asked(), ["Name? [old]", "Sure?", "Again?"]);
    }
}
