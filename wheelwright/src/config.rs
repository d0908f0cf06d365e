//! Generator configuration: branch counts, variant, temperature, prompt
//! templates, and the business-description loader.
//!
//! `WheelConfig` is set once before generation and never mutated afterwards.
//! The long-shot variant forces temperature to 1.0 at construction; an
//! explicit `with_temperature` call after `with_variant` overrides that.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::WheelError;

/// Default prompt template for paths without a custom template.
pub const DEFAULT_PROMPT: &str = r#"For the topic "{topic}", identify {count} potential impacts or consequences.
Provide only the impacts as a JSON array of strings. Each impact should be concise (10 words or less)."#;

/// Template written when the business-description file is missing.
pub const BUSINESS_TEMPLATE: &str = "\
# Business Description
# Replace this text with information about your business, products, services,
# target market, goals, and any other relevant information.
# This information will be used to make the futures wheel more relevant to your business.

";

/// Tone bias applied to generation.
///
/// Each variant keys a full instruction fragment (see [`impact_phrase`]) that
/// replaces the neutral "potential impacts or consequences" phrase in resolved
/// prompts; `Neutral` is the identity.
///
/// [`impact_phrase`]: WheelVariant::impact_phrase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WheelVariant {
    /// No tone bias.
    #[default]
    Neutral,
    /// Benefits, opportunities, advantages.
    Positive,
    /// Risks, challenges, disadvantages.
    Negative,
    /// Low-probability but high-impact outcomes; forces temperature 1.0.
    LongShot,
}

impl WheelVariant {
    /// Instruction fragment for this variant, composed into resolved prompts.
    pub fn impact_phrase(&self) -> &'static str {
        match self {
            Self::Neutral => "potential impacts or consequences",
            Self::Positive => {
                "potential POSITIVE impacts or consequences (benefits, opportunities, advantages)"
            }
            Self::Negative => {
                "potential NEGATIVE impacts or consequences (risks, challenges, disadvantages)"
            }
            Self::LongShot => {
                "potential UNUSUAL or SURPRISING impacts or consequences (low-probability but high-impact)"
            }
        }
    }
}

impl std::str::FromStr for WheelVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "neutral" => Ok(Self::Neutral),
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "long_shot" => Ok(Self::LongShot),
            _ => Err(format!(
                "unknown wheel variant: {} (use neutral, positive, negative, or long_shot)",
                s
            )),
        }
    }
}

impl std::fmt::Display for WheelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Neutral => "neutral",
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::LongShot => "long_shot",
        };
        f.write_str(s)
    }
}

/// Configuration for one wheel generation run.
///
/// `branch_counts` has one entry per depth level; its length is the maximum
/// depth of the tree. Custom prompt templates are keyed by exact path (not
/// prefix). The final-node template is only used when a business description
/// is also set.
#[derive(Clone, Debug)]
pub struct WheelConfig {
    /// Number of impacts to generate at each depth; length = max depth.
    pub branch_counts: Vec<usize>,
    /// When true, ask the confirmation channel before expanding each node.
    pub interactive: bool,
    /// Delay honored before recursing into each new child (rate-limit courtesy).
    pub delay: Duration,
    /// Tone bias for generated impacts.
    pub variant: WheelVariant,
    /// Sampling temperature sent with every completion request.
    pub temperature: f32,
    custom_prompts: HashMap<Vec<usize>, String>,
    default_prompt: String,
    final_node_prompt: Option<String>,
    business_description: Option<String>,
}

impl WheelConfig {
    /// Creates a config with the given branch counts and defaults: neutral
    /// variant, temperature 0.7, no delay, non-interactive.
    pub fn new(branch_counts: Vec<usize>) -> Self {
        Self {
            branch_counts,
            interactive: false,
            delay: Duration::ZERO,
            variant: WheelVariant::Neutral,
            temperature: 0.7,
            custom_prompts: HashMap::new(),
            default_prompt: DEFAULT_PROMPT.to_string(),
            final_node_prompt: None,
            business_description: None,
        }
    }

    /// Sets the wheel variant. `LongShot` forces temperature to 1.0; call
    /// `with_temperature` afterwards to override.
    pub fn with_variant(mut self, variant: WheelVariant) -> Self {
        self.variant = variant;
        if variant == WheelVariant::LongShot {
            self.temperature = 1.0;
        }
        self
    }

    /// Sets the sampling temperature (overrides any variant-forced value).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Enables or disables interactive confirmation.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Sets the delay honored before recursing into each child.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Maximum depth of the tree (root is depth 0, leaves at this depth).
    pub fn max_depth(&self) -> usize {
        self.branch_counts.len()
    }

    /// Registers a custom prompt template for one exact path.
    ///
    /// `path` is the sequence of child indices from the root, e.g. `[0, 1]`
    /// for the second branch under the first root branch. Matching is exact
    /// sequence equality, never prefix.
    pub fn set_custom_prompt(&mut self, path: Vec<usize>, template: impl Into<String>) {
        self.custom_prompts.insert(path, template.into());
    }

    /// Replaces the default prompt template (`{topic}` and `{count}` placeholders).
    pub fn set_default_prompt(&mut self, template: impl Into<String>) {
        self.default_prompt = template.into();
    }

    /// Sets the template used for final nodes when a business description is present
    /// (`{topic}`, `{count}`, `{business_description}` placeholders).
    pub fn set_final_node_prompt(&mut self, template: impl Into<String>) {
        self.final_node_prompt = Some(template.into());
    }

    /// Sets the business-context string used by the final-node template.
    pub fn set_business_description(&mut self, description: impl Into<String>) {
        self.business_description = Some(description.into());
    }

    /// Custom template for the exact path, if registered.
    pub(crate) fn custom_prompt(&self, path: &[usize]) -> Option<&str> {
        self.custom_prompts.get(path).map(String::as_str)
    }

    /// Default prompt template.
    pub(crate) fn default_prompt(&self) -> &str {
        &self.default_prompt
    }

    /// Final-node template, if set.
    pub(crate) fn final_node_prompt(&self) -> Option<&str> {
        self.final_node_prompt.as_deref()
    }

    /// Business description, if set.
    pub(crate) fn business_description(&self) -> Option<&str> {
        self.business_description.as_deref()
    }
}

/// Loads the business description from a plain-text file.
///
/// Missing file is a convenience fallback, not an error: a commented template
/// is written at `path` for the user to fill in, and an empty string is
/// returned. Any other I/O failure propagates.
pub fn load_business_description(path: &Path) -> Result<String, WheelError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            info!(path = %path.display(), "loaded business description");
            Ok(content.trim().to_string())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(
                path = %path.display(),
                "business description file not found, writing template"
            );
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, BUSINESS_TEMPLATE)?;
            Ok(String::new())
        }
        Err(e) => Err(e.into()),
    }
}
