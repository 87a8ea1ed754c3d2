//! Filesystem primitives, terminal prompts, and link reconciliation.
pub mod fs;
pub mod link;
pub mod prompt;

pub use link::{Action, LinkChange, LinkResource, LinkState};
pub use prompt::{AssumeYes, Prompt, TerminalPrompt};
