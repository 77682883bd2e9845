//! CLI commands

mod changelog;
mod completions;
mod init;
mod run;
mod version;

pub use changelog::ChangelogCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use run::RunCommand;
pub use version::VersionCommand;
