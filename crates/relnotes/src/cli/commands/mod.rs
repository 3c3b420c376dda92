//! CLI commands

mod classify;
mod generate;
mod init;

pub use classify::ClassifyCommand;
pub use generate::GenerateCommand;
pub use init::InitCommand;
