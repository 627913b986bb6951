//! Blocking user dialogs.

/// Modal messages shown to the user. The browser maps these to
/// `window.alert`/`window.confirm`; the CLI logs or auto-answers.
pub trait UserPrompt {
    /// Show a message the user has to acknowledge.
    fn alert(&self, message: &str);

    /// Ask a yes/no question; `true` means the user accepted.
    fn confirm(&self, message: &str) -> bool;
}
