//! STEEPV preset: six first-level domain branches (Social, Technological,
//! Economic, Environmental, Political, Values), a chain-of-consequences
//! default prompt, and an optional business-aware final-node prompt.

use std::path::PathBuf;

use clap::Args;
use wheelwright::llm::DEFAULT_MODEL;
use wheelwright::{WheelConfig, WheelVariant};

/// Fixed branching pattern: six STEEPV domains, then 3 -> 2 -> 1.
pub const BRANCH_COUNTS: [usize; 4] = [6, 3, 2, 1];

/// Maximum length of the topic slug in the output stem.
const SLUG_MAX_CHARS: usize = 30;

#[derive(Args, Debug)]
pub struct SteepvArgs {
    /// Central topic for the futures wheel
    pub topic: String,

    /// Confirm each branch expansion interactively
    #[arg(short, long)]
    pub interactive: bool,

    /// Delay in seconds between completion calls
    #[arg(long, default_value_t = 1)]
    pub delay: u64,

    /// Output filename prefix (topic slug and variant are appended)
    #[arg(long, default_value = "futures_wheel_steepv")]
    pub output: String,

    /// Output directory for the .puml and .json artifacts
    #[arg(long, default_value = "files", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Wheel variant: neutral, positive, negative, or long_shot
    #[arg(long, default_value = "neutral")]
    pub variant: WheelVariant,

    /// Path to the business description file for final-node relevance
    #[arg(long, default_value = "files/business_description.txt")]
    pub business: PathBuf,

    /// Disable business relevance even if a business description file exists
    #[arg(long)]
    pub no_business: bool,

    /// Chat model to use
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,
}

/// First-level STEEPV prompts, one per domain, registered at paths [0]..[5].
const DOMAIN_PROMPTS: [&str; 6] = [
    r#"For the topic "{topic}", identify 3 potential SOCIAL impacts or consequences.
Focus on community effects, social cohesion, cultural aspects, ways of life,
demographic structures, and social inclusion issues.
Provide only the impacts as a JSON array of strings. Each impact should be concise (20 words or less)."#,
    r#"For the topic "{topic}", identify 3 potential TECHNOLOGICAL impacts or consequences.
Focus on digital divide, technology adoption, innovation, rates of tech progress,
pace of diffusion, and technology-related problems & risks.
Provide only the impacts as a JSON array of strings. Each impact should be concise (20 words or less)."#,
    r#"For the topic "{topic}", identify 3 potential ECONOMIC impacts or consequences.
Focus on financial aspects, market changes, economic inequality, level & distribution of economic growth,
industrial structures, markets & financial issues.
Provide only the impacts as a JSON array of strings. Each impact should be concise (20 words or less)."#,
    r#"For the topic "{topic}", identify 3 potential ENVIRONMENTAL impacts or consequences.
Focus on sustainability, climate change, localized environmental issues, resource usage, ecological impacts.
Provide only the impacts as a JSON array of strings. Each impact should be concise (20 words or less)."#,
    r#"For the topic "{topic}", identify 3 potential POLITICAL impacts or consequences.
Focus on governance, policy changes, political movements, dominant political viewpoints,
regulation, lobbying.
Provide only the impacts as a JSON array of strings. Each impact should be concise (20 words or less)."#,
    r#"For the topic "{topic}", identify 3 potential VALUES impacts or consequences.
Focus on attitudes to working life, preferences for leisure, culture, social relations,
deference to authority, changing value systems.
Provide only the impacts as a JSON array of strings. Each impact should be concise (20 words or less)."#,
];

/// Default prompt for deeper branches: continue the whole chain of
/// consequences, not just the most recent impact.
const CHAIN_PROMPT: &str = r#"Continue the train of thought for this branch: "{topic}"

Consider the entire chain of consequences shown above, not just the most recent impact.
Identify {count} logical next-order impacts or consequences that would follow.

Provide only the impacts as a JSON array of strings. Each impact should be concise (20 words or less)."#;

/// Final-node prompt with business relevance.
pub const FINAL_NODE_PROMPT: &str = r#"Continue the train of thought for this branch: "{topic}"

Consider the entire chain of consequences shown above, not just the most recent impact.
Identify {count} logical next-order impacts or consequences that would follow.

IMPORTANT: Consider the relevance to the following business:
{business_description}

Focus on how these impacts might specifically affect this business, its market, customers,
operations, or strategy. Prioritize impacts with clear business relevance.

Provide only the impacts as a JSON array of strings. Each impact should be concise (20 words or less)."#;

/// Registers the six domain prompts and the chain-of-consequences default.
pub fn apply_prompts(config: &mut WheelConfig) {
    for (i, prompt) in DOMAIN_PROMPTS.iter().enumerate() {
        config.set_custom_prompt(vec![i], *prompt);
    }
    config.set_default_prompt(CHAIN_PROMPT);
}

/// Short slug from the topic: lowercased, spaces replaced by underscores,
/// truncated to 30 characters.
fn topic_slug(topic: &str) -> String {
    topic
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .take(SLUG_MAX_CHARS)
        .collect()
}

/// Output stem: `{prefix}_{slug}` with a `_{variant}` suffix for non-neutral wheels.
pub fn output_stem(prefix: &str, topic: &str, variant: WheelVariant) -> String {
    let slug = topic_slug(topic);
    if variant == WheelVariant::Neutral {
        format!("{}_{}", prefix, slug)
    } else {
        format!("{}_{}_{}", prefix, slug, variant)
    }
}
