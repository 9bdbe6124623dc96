//! Approximate prompt token counts.
//!
//! Counts are only used for diagnostics: the `estimated_prompt_tokens` log
//! field and the detail attached to content-too-large errors. Nothing is
//! truncated or rejected based on them.
//!
//! # Provider-Specific Notes
//!
//! - **OpenAI/Groq/Ollama**: cl100k_base (exact for older OpenAI models, close
//!   enough elsewhere)
//! - **Claude**: cl100k_base with a 1.1x approximation factor

use crate::logging::log_warn;
use crate::registry::ProviderKind;
use once_cell::sync::Lazy;
use tiktoken_rs::{cl100k_base, CoreBPE};

/// Anthropic's tokenizer produces roughly 10% more tokens than cl100k_base.
const ANTHROPIC_FACTOR: f64 = 1.1;

/// Characters per token used when the tokenizer cannot be loaded.
const CHARS_PER_TOKEN: usize = 4;

static TOKENIZER: Lazy<Option<CoreBPE>> = Lazy::new(|| match cl100k_base() {
    Ok(bpe) => Some(bpe),
    Err(e) => {
        log_warn!(error = %e, "Failed to load cl100k_base tokenizer, falling back to character estimate");
        None
    }
});

/// Estimated token count of `text` using cl100k_base.
pub fn estimate_tokens(text: &str) -> u32 {
    let count = match TOKENIZER.as_ref() {
        Some(bpe) => bpe.encode_with_special_tokens(text).len(),
        None => text.chars().count().div_ceil(CHARS_PER_TOKEN),
    };
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Estimated token count for a specific vendor family.
pub fn estimate_tokens_for(kind: ProviderKind, text: &str) -> u32 {
    let base = estimate_tokens(text);
    match kind {
        ProviderKind::Claude => (f64::from(base) * ANTHROPIC_FACTOR).ceil() as u32,
        ProviderKind::OpenAI | ProviderKind::Groq | ProviderKind::Ollama => base,
    }
}

/// Combined estimate for a system/user prompt pair.
pub fn estimate_prompt_tokens(kind: ProviderKind, system_prompt: &str, user_prompt: &str) -> u32 {
    estimate_tokens_for(kind, system_prompt).saturating_add(estimate_tokens_for(kind, user_prompt))
}
