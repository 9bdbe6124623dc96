//! Prompt resolution
//!
//! Turns a [`PromptSelector`], the stored templates, the page text, and the
//! response language into a [`ResolvedPrompt`]. Resolution never fails:
//! every problem (unreadable store, bad index, unusable template) falls back
//! to the built-in template and is reported with a `warn!` event.

use crate::core_types::{PromptSelector, PromptTemplate, ResolvedPrompt, LANGUAGE_PLACEHOLDER};
use crate::logging::{log_debug, log_warn};
use crate::store::{self, keys, ConfigStore};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Name reported for the built-in template
pub const BUILTIN_PROMPT_NAME: &str = "Default Prompt";

const BUILTIN_SYSTEM_PROMPT: &str = "You are an assistant that writes clear, well-structured \
summaries of web pages. Always write your answer in {{language}}, whatever the language of the \
page. Use Markdown headings for each section.";

const BUILTIN_USER_PROMPT: &str = "Summarize the following content in {{language}} using these \
five sections:

1. Introduction: one short paragraph on what the content is about and who it is for.
2. Key Takeaways: the most important points as a bulleted list.
3. Content Outline: the structure of the content, section by section.
4. Example Walkthrough: if the content contains examples, code, or procedures, walk through the \
most representative one. Otherwise say that there are none.
5. Next Steps and Resources: what a reader could do or read next.

Content:

{{content}}";

/// Both placeholders, matched in one pass so substituted text is never rescanned.
static PLACEHOLDER: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"\{\{(content|language)\}\}").ok());

/// The template used whenever no stored template applies.
pub fn builtin_template() -> PromptTemplate {
    PromptTemplate::new(
        BUILTIN_PROMPT_NAME,
        BUILTIN_SYSTEM_PROMPT,
        BUILTIN_USER_PROMPT,
    )
}

/// Replace `{{content}}` and `{{language}}` in `template`.
///
/// Placeholders appearing inside `content` or `language` are left as they are.
pub fn substitute(template: &str, content: &str, language: &str) -> String {
    let Some(regex) = PLACEHOLDER.as_ref() else {
        log_warn!("Placeholder pattern unavailable, returning template unchanged");
        return template.to_string();
    };
    regex
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "content" => content.to_string(),
            _ => language.to_string(),
        })
        .into_owned()
}

/// Replace only `{{language}}` in a system prompt.
///
/// Page text never reaches the system role, so `{{content}}` is kept as is.
pub fn substitute_language(template: &str, language: &str) -> String {
    template.replace(LANGUAGE_PLACEHOLDER, language)
}

/// Resolve against an already-loaded template list.
///
/// `default_index` is the stored `defaultPromptIndex`, if any.
pub fn resolve_with(
    selector: PromptSelector,
    templates: &[PromptTemplate],
    default_index: Option<usize>,
    content: &str,
    language: &str,
) -> ResolvedPrompt {
    let template = select_template(selector, templates, default_index);
    ResolvedPrompt {
        system_prompt: substitute_language(&template.system_prompt, language),
        user_prompt: substitute(&template.user_prompt, content, language),
        prompt_name: template.name,
    }
}

fn select_template(
    selector: PromptSelector,
    templates: &[PromptTemplate],
    default_index: Option<usize>,
) -> PromptTemplate {
    match selector {
        PromptSelector::UseBuiltin => return builtin_template(),
        PromptSelector::ByIndex(index) => match templates.get(index) {
            Some(template) => return usable_or_builtin(template, index),
            None => log_warn!(
                index,
                available = templates.len(),
                "Requested prompt index out of range, using default prompt"
            ),
        },
        PromptSelector::UseDefault => {}
    }

    match default_index {
        Some(index) => match templates.get(index) {
            Some(template) => usable_or_builtin(template, index),
            None => {
                log_warn!(
                    index,
                    available = templates.len(),
                    "Stored default prompt index out of range, using built-in prompt"
                );
                builtin_template()
            }
        },
        None => {
            log_debug!("No default prompt configured, using built-in prompt");
            builtin_template()
        }
    }
}

/// A template without a user prompt would send the vendor nothing to summarize.
fn usable_or_builtin(template: &PromptTemplate, index: usize) -> PromptTemplate {
    if template.user_prompt.trim().is_empty() {
        log_warn!(
            index,
            prompt_name = %template.name,
            "Prompt template has an empty user prompt, using built-in prompt"
        );
        return builtin_template();
    }
    template.clone()
}

/// Resolves prompts from the templates saved in a [`ConfigStore`].
pub struct PromptResolver<'a, S: ConfigStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ConfigStore + ?Sized> PromptResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Load the stored templates and default index, then resolve.
    pub async fn resolve(
        &self,
        selector: PromptSelector,
        content: &str,
        language: &str,
    ) -> ResolvedPrompt {
        let templates = match store::load_prompts(self.store).await {
            Ok(templates) => templates,
            Err(e) => {
                log_warn!(error = %e, "Could not load prompt templates, using built-in prompt");
                Vec::new()
            }
        };

        let default_index = match store::load_index(self.store, keys::DEFAULT_PROMPT_INDEX).await {
            Ok(index) => index,
            Err(e) => {
                log_warn!(error = %e, "Could not load default prompt index");
                None
            }
        };

        let resolved = resolve_with(selector, &templates, default_index, content, language);

        log_debug!(
            selector = ?selector,
            prompt_name = %resolved.prompt_name,
            stored_templates = templates.len(),
            "Prompt resolved"
        );

        resolved
    }
}
