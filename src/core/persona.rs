/// Built-in persona sent as the single system turn of every new transcript.
pub const CHEF_SYSTEM_PROMPT: &str = include_str!("../builtins/chef_persona.txt");

/// Returns the configured system prompt, falling back to the built-in chef
/// persona when the override is missing or blank.
pub fn resolve_system_prompt(configured: Option<&str>) -> String {
    match configured.map(str::trim) {
        Some(prompt) if !prompt.is_empty() => prompt.to_string(),
        _ => CHEF_SYSTEM_PROMPT.trim().to_string(),
    }
}
