//! Prompt types for the Handbook Assistant.
//!
//! This module defines the template and the built two-message prompt.

use handbook_llm::ChatMessage;
use std::collections::HashMap;

/// Identifier of the built-in handbook template.
pub const HANDBOOK_TEMPLATE_ID: &str = "handbook.ask.default";

/// System instruction; `{{context}}` receives the whole KnowledgeContext.
pub const HANDBOOK_SYSTEM_TEMPLATE: &str =
    "You are an expert on the following employee handbook:\n\n{{context}}";

/// User message; `{{query}}` receives the literal question.
pub const HANDBOOK_USER_TEMPLATE: &str = "Question: {{query}}";

/// A pair of Handlebars templates producing the system and user messages.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// Unique template identifier
    pub id: String,

    /// Template for the system message
    pub system_template: String,

    /// Template for the user message
    pub user_template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            id: HANDBOOK_TEMPLATE_ID.to_string(),
            system_template: HANDBOOK_SYSTEM_TEMPLATE.to_string(),
            user_template: HANDBOOK_USER_TEMPLATE.to_string(),
        }
    }
}

/// A fully built prompt ready for LLM execution.
///
/// Always exactly one system message followed by one user message.
#[derive(Debug, Clone)]
pub struct BuiltPrompt {
    /// System message carrying the knowledge context
    pub system: String,

    /// User message carrying the question
    pub user: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone)]
pub struct BuiltPromptMetadata {
    /// Source template ID
    pub source_template_id: String,

    /// Byte length of the embedded knowledge context
    pub context_length: usize,

    /// Template variables that were resolved
    pub resolved_variables: HashMap<String, String>,
}

impl BuiltPrompt {
    /// Create a new built prompt.
    pub fn new(
        system: String,
        user: String,
        source_template_id: String,
        resolved_variables: HashMap<String, String>,
    ) -> Self {
        let context_length = resolved_variables
            .get("context")
            .map(String::len)
            .unwrap_or(0);

        Self {
            system,
            user,
            metadata: BuiltPromptMetadata {
                source_template_id,
                context_length,
                resolved_variables,
            },
        }
    }

    /// The ordered message list: `[system, user]`.
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system.clone()),
            ChatMessage::user(self.user.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handbook_llm::ChatRole;

    #[test]
    fn test_default_template() {
        let template = PromptTemplate::default();
        assert_eq!(template.id, "handbook.ask.default");
        assert!(template.system_template.ends_with("{{context}}"));
        assert!(template.user_template.starts_with("Question: "));
    }

    #[test]
    fn test_built_prompt_messages_order() {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), "handbook".to_string());

        let built = BuiltPrompt::new(
            "System message".to_string(),
            "User message".to_string(),
            HANDBOOK_TEMPLATE_ID.to_string(),
            vars,
        );

        let messages = built.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[0].content, "System message");
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[1].content, "User message");
        assert_eq!(built.metadata.context_length, 8);
    }
}
