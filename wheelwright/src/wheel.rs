//! Tree builder: recursively expands a central topic into a futures wheel.
//!
//! Strictly sequential depth-first pre-order: a child's subtree is fully
//! expanded before the next sibling, because each child's branch text must be
//! the fully resolved ancestor chain before its own children are requested.
//! Path and branch text are derived during traversal and never stored on the
//! nodes.

use futures::future::BoxFuture;
use tracing::{debug, info};

use crate::config::WheelConfig;
use crate::error::WheelError;
use crate::llm::{complete_with_retry, parse_impacts, CompletionClient, CompletionRequest};
use crate::node::WheelNode;
use crate::prompt::resolve_prompt;

/// Separator joining ancestor topics into the branch text.
pub const BRANCH_SEPARATOR: &str = " -> ";

/// Interactive confirmation channel: asked once per node before expansion.
///
/// A non-affirmative answer prunes that branch (children left empty); this is
/// not an error. The CLI implements this over stdin; tests plug in fixed
/// policies.
pub trait Confirm: Send + Sync {
    /// Returns true to expand the node at `path`, false to prune it.
    fn confirm(&self, topic: &str, depth: usize, path: &[usize]) -> bool;
}

/// Recursively expands topic nodes into child impact nodes via a completion
/// client, one wheel per [`generate`](WheelGenerator::generate) call.
pub struct WheelGenerator {
    config: WheelConfig,
    client: Box<dyn CompletionClient>,
    confirm: Option<Box<dyn Confirm>>,
}

impl WheelGenerator {
    /// Creates a generator with the given config and completion client.
    pub fn new(config: WheelConfig, client: Box<dyn CompletionClient>) -> Self {
        Self {
            config,
            client,
            confirm: None,
        }
    }

    /// Sets the interactive confirmation channel. Required when
    /// `config.interactive` is true; `generate` rejects an interactive
    /// config that has no channel to ask.
    pub fn with_confirm(mut self, confirm: Box<dyn Confirm>) -> Self {
        self.confirm = Some(confirm);
        self
    }

    /// Generates a complete futures wheel for the central topic.
    ///
    /// The root is at depth 0; leaves sit at depth `config.max_depth()` with
    /// empty impacts. The root's branch text is the central topic itself.
    pub async fn generate(&self, central_topic: &str) -> Result<WheelNode, WheelError> {
        if self.config.interactive && self.confirm.is_none() {
            return Err(WheelError::Config(
                "interactive mode requires a confirmation channel".to_string(),
            ));
        }
        info!(
            topic = central_topic,
            variant = %self.config.variant,
            max_depth = self.config.max_depth(),
            "generating futures wheel"
        );
        let mut root = WheelNode::new(central_topic);
        self.expand(&mut root, 0, &[], central_topic).await?;
        Ok(root)
    }

    /// Expands one node: resolve prompt, request impacts, attach children,
    /// recurse. Boxed future because the recursion is async.
    fn expand<'a>(
        &'a self,
        node: &'a mut WheelNode,
        depth: usize,
        path: &'a [usize],
        branch_text: &'a str,
    ) -> BoxFuture<'a, Result<(), WheelError>> {
        Box::pin(async move {
            if depth >= self.config.max_depth() {
                return Ok(());
            }

            if self.config.interactive {
                if let Some(ref confirm) = self.confirm {
                    if !confirm.confirm(&node.topic, depth, path) {
                        info!(?path, topic = %node.topic, "branch pruned by user");
                        return Ok(());
                    }
                }
            }

            let prompt = resolve_prompt(&self.config, path, depth, branch_text)?;
            let count = self.config.branch_counts[depth];
            debug!(?path, depth, count, "resolved prompt");

            let request = CompletionRequest::new(prompt, self.config.temperature, count);
            let content = complete_with_retry(self.client.as_ref(), &request).await?;
            let impacts = parse_impacts(&content, count, branch_text);

            for (i, topic) in impacts.into_iter().enumerate() {
                let mut child_path = path.to_vec();
                child_path.push(i);
                let child_branch = format!("{}{}{}", branch_text, BRANCH_SEPARATOR, topic);
                let mut child = WheelNode::new(topic);
                info!(path = ?child_path, topic = %child.topic, "processing impact");

                if !self.config.delay.is_zero() {
                    tokio::time::sleep(self.config.delay).await;
                }
                self.expand(&mut child, depth + 1, &child_path, &child_branch)
                    .await?;
                node.impacts.push(child);
            }
            Ok(())
        })
    }
}
