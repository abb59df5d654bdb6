//! Prompt builder for rendering templates and injecting the knowledge context.

use crate::types::{BuiltPrompt, PromptTemplate};
use handbook_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Build the grounded handbook prompt from a knowledge context and a question.
///
/// Uses the built-in template: the system message embeds the whole context
/// verbatim, the user message is `"Question: "` followed by the query.
///
/// # Example
/// ```no_run
/// use handbook_prompt::build_prompt;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let built = build_prompt("Employees accrue 15 vacation days.", "How many vacation days?")?;
/// assert_eq!(built.user, "Question: How many vacation days?");
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(context: &str, query: &str) -> AppResult<BuiltPrompt> {
    build_prompt_with_template(&PromptTemplate::default(), context, query)
}

/// Build a prompt from an explicit template.
///
/// Variables are substituted into the rendered output and never parsed as
/// template syntax, so handbook text containing `{{` passes through intact.
/// No truncation or token counting is applied.
pub fn build_prompt_with_template(
    template: &PromptTemplate,
    context: &str,
    query: &str,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", template.id);

    let mut variables = HashMap::new();
    variables.insert("context".to_string(), context.to_string());
    variables.insert("query".to_string(), query.to_string());

    let system = render_template(&template.system_template, &variables)?;
    let user = render_template(&template.user_template, &variables)?;

    tracing::debug!(
        "Built prompt - system: {} bytes, user: {} bytes",
        system.len(),
        user.len()
    );

    Ok(BuiltPrompt::new(system, user, template.id.clone(), variables))
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
