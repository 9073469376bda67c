use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use riskalia_agents::Presenter;
use riskalia_core::{Action, Sender};
use tracing::debug;

/// Quick actions currently on screen, shared with the input loop so a typed
/// number can be mapped back to an action key.
pub type ActionBoard = Arc<Mutex<Vec<Action>>>;

pub struct TerminalPresenter {
    board: ActionBoard,
}

impl TerminalPresenter {
    pub fn new(board: ActionBoard) -> Self {
        Self { board }
    }
}

impl Presenter for TerminalPresenter {
    fn render(&mut self, sender: Sender, content: &str, title: Option<&str>) {
        // The terminal already shows what the user typed.
        if sender == Sender::User {
            return;
        }
        println!();
        if let Some(title) = title {
            println!("== {title} ==");
        }
        println!("{content}");
    }

    fn render_actions(&mut self, actions: &[Action]) {
        for (index, action) in actions.iter().enumerate() {
            println!("  [{}] {} {}", index + 1, action.icon, action.label);
        }
        *self.board.lock() = actions.to_vec();
    }

    fn set_typing(&mut self, typing: bool) {
        if typing {
            show_typing(&mut io::stdout());
        } else {
            println!();
        }
    }

    fn open_link(&mut self, label: &str, uri: &str) {
        println!("  {label} -> {uri}");
    }

    fn clear(&mut self) {
        println!("\n{}", "-".repeat(40));
    }
}

/// Typing indicator without a newline; write failures are logged, not fatal.
fn show_typing(out: &mut impl Write) {
    if let Err(err) = write!(out, "…").and_then(|()| out.flush()) {
        debug!(error = %err, "failed writing typing indicator");
    }
}

/// Maps a 1-based menu number to the action key shown at that position.
pub fn pick(board: &ActionBoard, input: &str) -> Option<String> {
    let index = input.parse::<usize>().ok()?.checked_sub(1)?;
    board.lock().get(index).map(|action| action.key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StuckOutput {
        written: Vec<u8>,
    }

    impl Write for StuckOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn typing_indicator_survives_flush_failure() {
        let mut out = StuckOutput { written: Vec::new() };
        show_typing(&mut out);
        assert_eq!(String::from_utf8(out.written).expect("utf8"), "…");
    }

    #[test]
    fn picks_actions_by_menu_number() {
        let board: ActionBoard = Arc::new(Mutex::new(vec![
            Action::new("assurance", "Assurance", "🛡️"),
            Action::new("contact", "Contact", "📞"),
        ]));

        assert_eq!(pick(&board, "2").as_deref(), Some("contact"));
        assert_eq!(pick(&board, "0"), None);
        assert_eq!(pick(&board, "3"), None);
        assert_eq!(pick(&board, "devis"), None);
    }
}
