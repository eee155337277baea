//! Persona prompt assembly.
//!
//! Pure data-to-text: the request is a function of the grounding context
//! plus optional topic/instruction overrides, so it is testable without
//! calling any generation service.

use crate::grounding::GroundingContext;

/// Persona preamble and style constraints. The constraints mirror the
/// normalizer rules so the model rarely violates them in the first place.
const PERSONA: &[&str] = &[
    "You are Bino, the community voice for the BNB Chain ecosystem.",
    "Speak with enthusiastic, optimistic energy that celebrates Binance innovations, CZ's leadership, and broader crypto culture.",
    "Weave references to BNB Chain, Binance, and milestone builders whenever relevant. Highlight real utilities, ecosystem wins, and market awareness.",
    "Lean on the latest market data and headlines to deliver timely perspective with forward-looking optimism about BNB's future.",
    "Each post must be under 230 characters. Prefer concise, clear language with crypto-native flair.",
    "Limit yourself to at most one emoji and one hashtag. Prioritize clarity over hype.",
    "Structure the post with line breaks between key thoughts so it is easy to read.",
    "Incorporate relevant context from the memory bank when helpful, but do not repeat old posts verbatim or fabricate facts.",
];

/// Build the generation request text from the grounding context.
pub fn build_prompt(
    ctx: &GroundingContext,
    topic: Option<&str>,
    instructions: Option<&str>,
) -> String {
    let mut parts: Vec<String> = PERSONA.iter().map(|s| s.to_string()).collect();
    parts.push(format!("Current memory:\n{}", ctx.memory_lines));
    parts.push(format!(
        "Market snapshot (as of {}): price {}, 24h change {}.",
        ctx.timestamp, ctx.price, ctx.variation
    ));
    parts.push(format!(
        "Latest BNB Chain highlights:\n{}\n\
         Use these insights to comment on recent developments, celebrate builders, \
         and share optimistic yet realistic takes on where BNB is heading.",
        ctx.highlights
    ));
    if let Some(topic) = topic {
        parts.push(format!("Topic to cover: {topic}"));
    }
    if let Some(instructions) = instructions {
        parts.push(format!("Extra instructions: {instructions}"));
    }
    parts.push("Return only the post text without any markdown or explanations.".to_string());

    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> GroundingContext {
        GroundingContext {
            memory_lines: "- [launch] greenfield went live".to_string(),
            price: "$612.40".to_string(),
            variation: "+2.41%".to_string(),
            timestamp: "2026-08-27T10:00:00Z".to_string(),
            highlights: "- BNB Chain ships a new release".to_string(),
        }
    }

    #[test]
    fn test_prompt_includes_all_context_blocks() {
        let prompt = build_prompt(&ctx(), None, None);
        assert!(prompt.contains("Current memory:\n- [launch] greenfield went live"));
        assert!(prompt.contains("price $612.40, 24h change +2.41%"));
        assert!(prompt.contains("as of 2026-08-27T10:00:00Z"));
        assert!(prompt.contains("- BNB Chain ships a new release"));
        assert!(prompt.contains("You are Bino"));
    }

    #[test]
    fn test_topic_and_instructions_are_optional() {
        let bare = build_prompt(&ctx(), None, None);
        assert!(!bare.contains("Topic to cover"));
        assert!(!bare.contains("Extra instructions"));

        let full = build_prompt(&ctx(), Some("BNB ATH"), Some("celebrate builders"));
        assert!(full.contains("Topic to cover: BNB ATH"));
        assert!(full.contains("Extra instructions: celebrate builders"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt(&ctx(), None, None), build_prompt(&ctx(), None, None));
    }
}
