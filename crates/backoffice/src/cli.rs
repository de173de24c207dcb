//! Clap derive structures for the `backoffice` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// backoffice -- admin console client for products, orders and CRM
#[derive(Debug, Parser)]
#[command(
    name = "backoffice",
    version,
    about = "Manage the backoffice admin backend from the command line",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL (overrides config)
    #[arg(long, env = "BACKOFFICE_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "BACKOFFICE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "BACKOFFICE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage product categories
    #[command(alias = "cat")]
    Categories(CategoriesArgs),

    /// Browse products with filters
    #[command(alias = "p")]
    Products(ProductsArgs),

    /// Validate and upload bulk product imports
    Import(ImportArgs),

    /// Send a message through the chat proxy
    Chat(ChatArgs),

    /// Manage CRM conversation users
    #[command(alias = "conv")]
    Conversations(ConversationsArgs),

    /// Show the analytics summary
    Analytics,

    /// Inspect and toggle UI preferences
    Prefs(PrefsArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

// ── Categories ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List categories with product counts
    #[command(alias = "ls")]
    List,

    /// Create a category
    Create {
        /// Category name
        name: String,
    },

    /// Delete a category by id
    #[command(alias = "rm")]
    Delete {
        /// Category id
        id: i64,
    },
}

// ── Products ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products matching the given filters
    #[command(alias = "ls")]
    List(ProductFilterArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct ProductFilterArgs {
    /// Free-text search over name, description and tags
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Category id
    #[arg(long, short = 'c')]
    pub category: Option<i64>,

    /// Minimum price
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Only products with stock left
    #[arg(long)]
    pub in_stock: bool,
}

// ── Import ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[command(subcommand)]
    pub command: ImportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ImportCommand {
    /// Write the CSV import template
    Template {
        /// Destination file (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check a file against the import rules without uploading
    Validate {
        /// CSV or XLSX file
        file: PathBuf,
    },

    /// Validate and upload a file
    Upload {
        /// CSV or XLSX file
        file: PathBuf,
    },
}

// ── Chat ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ChatArgs {
    /// Message text
    pub message: Option<String>,

    /// Continue an existing conversation
    #[arg(long)]
    pub conversation: Option<String>,
}

// ── Conversations ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConversationsArgs {
    #[command(subcommand)]
    pub command: ConversationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConversationsCommand {
    /// List conversation users
    #[command(alias = "ls")]
    List,

    /// Patch a conversation user with a JSON object
    Update {
        /// User id
        id: i64,

        /// JSON object with the fields to change
        #[arg(long)]
        data: String,
    },
}

// ── Preferences ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub command: PrefsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Show current preferences and document attributes
    Show,

    /// Switch between light and dark
    ToggleTheme,

    /// Switch between Persian and English
    ToggleLanguage,

    /// Print the shell frame before and after hydration
    Shell,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a config file interactively
    Init,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_product_filters() {
        let cli = Cli::try_parse_from([
            "backoffice",
            "products",
            "list",
            "--search",
            "lamp",
            "--max-price",
            "99.5",
            "--in-stock",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        match cli.command {
            Command::Products(ProductsArgs {
                command: ProductsCommand::List(filters),
            }) => {
                assert_eq!(filters.search.as_deref(), Some("lamp"));
                assert_eq!(filters.max_price, Some(99.5));
                assert!(filters.in_stock);
                assert!(filters.category.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn chat_message_is_optional_at_parse_time() {
        let cli = Cli::try_parse_from(["backoffice", "chat"]).unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            cli.command,
            Command::Chat(ChatArgs { message: None, .. })
        ));
    }
}
