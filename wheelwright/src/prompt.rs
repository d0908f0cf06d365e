//! Prompt resolution: pick and render the template for one path/depth.
//!
//! Precedence: final-node template (needs a business description) over a
//! custom template registered for the exact path, over the default template.
//! After rendering, the variant's instruction fragment replaces the neutral
//! trigger phrase; custom templates without the phrase are left untouched.

use crate::config::{WheelConfig, WheelVariant};
use crate::error::WheelError;

/// Neutral phrase that variant fragments replace in resolved prompts.
///
/// Custom templates that drop this phrase opt out of tone biasing; the
/// substitution silently no-ops for them.
pub const TRIGGER_PHRASE: &str = "potential impacts or consequences";

/// Renders a template by substituting `{name}` placeholders from `vars`.
///
/// `{{` and `}}` escape to literal braces. A placeholder not present in
/// `vars`, an unterminated `{`, or a stray `}` is a configuration error.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> Result<String, WheelError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => {
                            return Err(WheelError::Template(format!(
                                "unterminated placeholder '{{{}'",
                                name
                            )))
                        }
                    }
                }
                match vars.iter().find(|(k, _)| *k == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        return Err(WheelError::Template(format!(
                            "unknown placeholder '{{{}}}'",
                            name
                        )))
                    }
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(WheelError::Template("stray '}' in template".to_string()));
                }
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Resolves the literal prompt for the node at `path`/`depth` with the given
/// accumulated branch text, then applies the variant's tone bias.
pub fn resolve_prompt(
    config: &WheelConfig,
    path: &[usize],
    depth: usize,
    branch_text: &str,
) -> Result<String, WheelError> {
    let count = config
        .branch_counts
        .get(depth)
        .copied()
        .ok_or_else(|| WheelError::Template(format!("no branch count for depth {}", depth)))?;
    let count = count.to_string();

    let is_final_node = depth == config.max_depth() - 1;
    let rendered = if let (true, Some(template), Some(business)) = (
        is_final_node,
        config.final_node_prompt(),
        config.business_description(),
    ) {
        render_template(
            template,
            &[
                ("topic", branch_text),
                ("count", &count),
                ("business_description", business),
            ],
        )?
    } else if let Some(template) = config.custom_prompt(path) {
        render_template(template, &[("topic", branch_text), ("count", &count)])?
    } else {
        render_template(
            config.default_prompt(),
            &[("topic", branch_text), ("count", &count)],
        )?
    };

    Ok(apply_variant(&rendered, config.variant))
}

/// Replaces the neutral trigger phrase with the variant's fragment.
/// Identity for `Neutral`; no-op when the phrase is absent.
fn apply_variant(prompt: &str, variant: WheelVariant) -> String {
    match variant {
        WheelVariant::Neutral => prompt.to_string(),
        _ => prompt.replace(TRIGGER_PHRASE, variant.impact_phrase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WheelConfig;

    fn base_config() -> WheelConfig {
        WheelConfig::new(vec![2, 3])
    }

    /// **Scenario**: placeholders substitute and brace escapes produce literal braces.
    #[test]
    fn render_template_substitutes_and_escapes() {
        let out = render_template(
            "topic={topic} count={count} {{literal}}",
            &[("topic", "X -> A"), ("count", "3")],
        )
        .unwrap();
        assert_eq!(out, "topic=X -> A count=3 {literal}");
    }

    /// **Scenario**: an unknown placeholder is a Template error that names it.
    #[test]
    fn render_template_rejects_unknown_placeholder() {
        let err = render_template("hello {business_description}", &[("topic", "t")]).unwrap_err();
        match err {
            WheelError::Template(msg) => assert!(msg.contains("business_description")),
            other => panic!("expected Template error, got {:?}", other),
        }
    }

    /// **Scenario**: unterminated `{` and stray `}` are Template errors.
    #[test]
    fn render_template_rejects_malformed_braces() {
        assert!(matches!(
            render_template("oops {topic", &[("topic", "t")]),
            Err(WheelError::Template(_))
        ));
        assert!(matches!(
            render_template("oops } here", &[]),
            Err(WheelError::Template(_))
        ));
    }

    /// **Scenario**: the default template renders with branch text and the depth's count.
    #[test]
    fn resolve_prompt_uses_default_template() {
        let config = base_config();
        let prompt = resolve_prompt(&config, &[], 0, "The future of education").unwrap();
        assert!(prompt.contains(r#"For the topic "The future of education""#));
        assert!(prompt.contains("identify 2 potential impacts"));
    }

    /// **Scenario**: a custom template registered for the exact path wins over
    /// the default, and only for that path.
    #[test]
    fn resolve_prompt_prefers_exact_custom_path() {
        let mut config = base_config();
        config.set_custom_prompt(vec![0], "CUSTOM for {topic}, n={count}");
        let prompt = resolve_prompt(&config, &[0], 1, "X -> A").unwrap();
        assert_eq!(prompt, "CUSTOM for X -> A, n=3");

        // Sibling path falls back to the default template.
        let other = resolve_prompt(&config, &[1], 1, "X -> B").unwrap();
        assert!(other.contains("identify 3 potential impacts"));
    }

    /// **Scenario**: at the final depth, with both a final-node template and a
    /// business description set, the final-node template beats a custom template
    /// registered at that exact path.
    #[test]
    fn resolve_prompt_final_node_beats_custom() {
        let mut config = base_config();
        config.set_custom_prompt(vec![0], "CUSTOM {topic} {count}");
        config.set_final_node_prompt("FINAL {topic} n={count} biz={business_description}");
        config.set_business_description("We sell sprockets.");
        let prompt = resolve_prompt(&config, &[0], 1, "X -> A").unwrap();
        assert_eq!(prompt, "FINAL X -> A n=3 biz=We sell sprockets.");
    }

    /// **Scenario**: a final-node template without a business description is
    /// ignored; the custom template applies instead.
    #[test]
    fn resolve_prompt_final_node_needs_business_description() {
        let mut config = base_config();
        config.set_custom_prompt(vec![0], "CUSTOM {topic} {count}");
        config.set_final_node_prompt("FINAL {topic} {count} {business_description}");
        let prompt = resolve_prompt(&config, &[0], 1, "X -> A").unwrap();
        assert_eq!(prompt, "CUSTOM X -> A 3");
    }

    /// **Scenario**: positive variant swaps the trigger phrase for its fragment.
    #[test]
    fn resolve_prompt_applies_positive_variant() {
        let config = base_config().with_variant(WheelVariant::Positive);
        let prompt = resolve_prompt(&config, &[], 0, "X").unwrap();
        assert!(prompt.contains(
            "potential POSITIVE impacts or consequences (benefits, opportunities, advantages)"
        ));
        assert!(!prompt.contains("identify 2 potential impacts or consequences."));
    }

    /// **Scenario**: a custom template without the trigger phrase is unchanged by
    /// a non-neutral variant (silent no-op), and neutral is the identity.
    #[test]
    fn variant_substitution_noops_without_trigger_phrase() {
        let mut config = base_config().with_variant(WheelVariant::Negative);
        config.set_custom_prompt(vec![], "List {count} SOCIAL effects of {topic}.");
        let prompt = resolve_prompt(&config, &[], 0, "X").unwrap();
        assert_eq!(prompt, "List 2 SOCIAL effects of X.");

        assert_eq!(apply_variant("keep as is", WheelVariant::Neutral), "keep as is");
    }

    /// **Scenario**: a depth with no configured branch count is a Template error.
    #[test]
    fn resolve_prompt_rejects_depth_out_of_range() {
        let config = base_config();
        let err = resolve_prompt(&config, &[0, 0], 2, "X -> A -> A1").unwrap_err();
        assert!(matches!(err, WheelError::Template(_)));
    }
}
