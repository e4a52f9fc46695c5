use crate::core::message::Role;
use std::io::{self, Write};

/// Rendering boundary used by the chat session. Implementations decide how a
/// turn looks; the session only hands over the role and the text.
pub trait Presenter {
    fn append_message(&mut self, role: Role, text: &str);

    /// Toggles the send affordance around an in-flight request.
    fn set_input_enabled(&mut self, _enabled: bool) {}
}

/// Line-oriented presenter for a plain terminal.
pub struct TerminalPresenter<W: Write> {
    out: W,
    input_enabled: bool,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            input_enabled: true,
        }
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_block(&mut self, role: Role, text: &str) -> io::Result<()> {
        let prefix = match role {
            Role::User => "You",
            Role::Assistant => "Chef",
            Role::System => return Ok(()),
        };
        writeln!(self.out, "{prefix}: {text}")?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn append_message(&mut self, role: Role, text: &str) {
        // A closed stdout is not worth aborting the conversation over.
        if let Err(err) = self.write_block(role, text) {
            tracing::debug!(%err, "Failed to write message to terminal");
        }
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        if !enabled {
            let _ = writeln!(self.out, "… the chef is thinking");
            let _ = self.out.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(presenter: TerminalPresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).expect("utf8")
    }

    #[test]
    fn turns_are_prefixed_by_speaker() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.append_message(Role::User, "Hello");
        presenter.append_message(Role::Assistant, "Hi, chef here!");
        assert_eq!(rendered(presenter), "You: Hello\n\nChef: Hi, chef here!\n\n");
    }

    #[test]
    fn system_turns_are_never_rendered() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.append_message(Role::System, "secret persona");
        assert_eq!(rendered(presenter), "");
    }

    #[test]
    fn input_toggle_is_tracked() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.set_input_enabled(false);
        assert!(!presenter.input_enabled());
        presenter.set_input_enabled(true);
        assert!(presenter.input_enabled());
        assert_eq!(rendered(presenter), "… the chef is thinking\n");
    }
}
