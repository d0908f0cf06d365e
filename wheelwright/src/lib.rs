//! # Wheelwright
//!
//! Recursive futures-wheel generation driven by an LLM. Starting from a
//! central topic, [`WheelGenerator`] queries a completion client for chains of
//! consequences down to a configured depth, then the export module writes the
//! finished tree as a PlantUML mindmap plus a JSON document.
//!
//! ## Design principles
//!
//! - **Immutable-after-construction tree**: [`WheelNode`] holds only
//!   `{topic, impacts}`; path and branch text are derived during traversal,
//!   never stored and stripped.
//! - **Injected completion client**: the [`CompletionClient`] trait is the
//!   single boundary to the language model; [`OpenAiCompletion`] for the real
//!   API, [`MockCompletion`] for tests.
//! - **Sequential depth-first expansion**: each child's subtree is fully
//!   expanded before the next sibling so prompts always carry the complete
//!   ancestor chain.
//! - **Recover locally, abort on configuration errors**: unparseable
//!   completion content becomes placeholder impacts; unresolved template
//!   placeholders abort the run.
//!
//! ## Main modules
//!
//! - [`wheel`]: [`WheelGenerator`], [`Confirm`] — build the tree.
//! - [`prompt`]: template rendering and per-path prompt resolution.
//! - [`llm`]: [`CompletionClient`], [`OpenAiCompletion`], [`MockCompletion`],
//!   response post-processing ([`parse_impacts`]).
//! - [`config`]: [`WheelConfig`], [`WheelVariant`], business-description loader.
//! - [`export`]: [`render_mindmap`], [`render_json`], [`save_wheel`].
//! - [`node`]: [`WheelNode`].
//! - [`error`]: [`WheelError`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use wheelwright::{OpenAiCompletion, WheelConfig, WheelGenerator, WheelVariant};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), wheelwright::WheelError> {
//! let config = WheelConfig::new(vec![4, 3, 2, 1]).with_variant(WheelVariant::Positive);
//! let client = OpenAiCompletion::new("gpt-4o-mini");
//! let generator = WheelGenerator::new(config, Box::new(client));
//!
//! let wheel = generator.generate("The future of education").await?;
//! wheelwright::save_wheel(&wheel, "files".as_ref(), "futures_wheel")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod llm;
pub mod node;
pub mod prompt;
pub mod wheel;

pub use config::{
    load_business_description, WheelConfig, WheelVariant, BUSINESS_TEMPLATE, DEFAULT_PROMPT,
};
pub use error::WheelError;
pub use export::{render_json, render_mindmap, save_wheel};
pub use llm::{
    parse_impacts, CompletionClient, CompletionRequest, MockCompletion, OpenAiCompletion,
    SYSTEM_PROMPT,
};
pub use node::WheelNode;
pub use prompt::{render_template, resolve_prompt, TRIGGER_PHRASE};
pub use wheel::{Confirm, WheelGenerator, BRANCH_SEPARATOR};
