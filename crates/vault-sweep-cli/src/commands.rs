use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vault_sweep_core::DeletePolicy;

#[derive(Debug, Parser)]
#[command(name = "vault-sweep")]
#[command(about = "Find and clean unused attachments in a document vault", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan the vault and list unused attachments
    Scan,
    /// Scan the vault and delete the unused attachments found
    Clean {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
        /// Override the configured delete destination
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
    },
    /// Scan the vault and write a markdown report of unused attachments
    Report {
        /// Report destination path
        #[arg(long, default_value = "Unused Attachments Report.md")]
        output: PathBuf,
    },
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Move to the vault's .trash directory (reversible)
    SoftTrash,
    /// Move to the operating system's trash
    SystemTrash,
    /// Delete permanently
    Permanent,
}

impl From<PolicyArg> for DeletePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::SoftTrash => DeletePolicy::SoftTrash,
            PolicyArg::SystemTrash => DeletePolicy::SystemTrash,
            PolicyArg::Permanent => DeletePolicy::Permanent,
        }
    }
}
