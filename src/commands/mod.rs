//! Words typed at the chat prompt that are handled locally instead of being
//! sent to the kitchen.

pub enum CommandResult {
    Quit,
    /// Wipe the conversation, after the user confirms.
    Clear,
    Help,
    ProcessAsMessage(String),
}

pub const HELP_TEXT: &str = "\
Type a message and press Enter to ask the chef.
  help    Show this help
  clear   Forget the conversation (asks first)
  quit    Leave the kitchen (also: exit)";

pub fn process_input(input: &str) -> CommandResult {
    let trimmed = input.trim();
    let word = trimmed.strip_prefix('/').unwrap_or(trimmed);

    match word.to_ascii_lowercase().as_str() {
        "quit" | "exit" => CommandResult::Quit,
        "clear" => CommandResult::Clear,
        "help" => CommandResult::Help,
        _ => CommandResult::ProcessAsMessage(trimmed.to_string()),
    }
}

/// Only an explicit yes confirms a destructive action.
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
