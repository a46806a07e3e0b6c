//! CLI command definitions using clap
//!
//! Defines the command structure for the `ghrest` CLI tool.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::search::sort::SortOrder;

/// ghrest - query the GitHub REST API from the terminal
#[derive(Parser, Debug)]
#[command(name = "ghrest", version, about, long_about = None)]
pub struct Cli {
    /// Personal access token; falls back to GITHUB_USERNAME/GITHUB_PASSWORD
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search repositories, commits, code, issues, users, topics or labels
    Search(SearchArgs),

    /// Work with gists
    Gist(GistArgs),

    /// Show a user or organization
    User {
        /// Account login
        login: String,
    },

    /// Show a repository
    Repo {
        /// Repository as owner/name
        full_name: String,
    },

    /// Manage configuration
    Config(ConfigArgs),

    /// Inspect credentials
    Auth(AuthArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Search Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Search family to query
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SearchKind {
    Repositories,
    Commits,
    Code,
    Issues,
    Users,
    Topics,
    Labels,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

/// Search arguments
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// What to search
    #[arg(value_enum)]
    pub family: SearchKind,

    /// Keywords and qualifiers, e.g. `tetris language:assembly stars:>100`
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Sort key, e.g. `stars` or `author-date`
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort direction
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u32>,

    /// Results per page (max 100)
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Repository to search labels in (required for `labels`)
    #[arg(long)]
    pub repository_id: Option<u64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Gist Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Gist commands
#[derive(Parser, Debug)]
pub struct GistArgs {
    #[command(subcommand)]
    pub command: GistCommand,
}

/// Paging flags shared by gist listings
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u32>,

    /// Results per page (max 100)
    #[arg(long)]
    pub per_page: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum GistCommand {
    /// List public gists
    Public {
        /// Only gists updated after this RFC 3339 timestamp
        #[arg(long)]
        since: Option<DateTime<Utc>>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// List gists you starred
    Starred {
        /// Only gists updated after this RFC 3339 timestamp
        #[arg(long)]
        since: Option<DateTime<Utc>>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// List a user's public gists
    User {
        /// Account login
        username: String,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Show one or more gists
    Get {
        /// Gist IDs
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,

        /// Show the gist at this revision (single ID only)
        #[arg(long)]
        revision: Option<String>,
    },

    /// List a gist's revisions
    Commits {
        /// Gist ID
        id: String,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// List a gist's forks
    Forks {
        /// Gist ID
        id: String,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Star a gist
    Star {
        /// Gist ID
        id: String,
    },

    /// Remove a star
    Unstar {
        /// Gist ID
        id: String,
    },

    /// Check whether you starred a gist
    StarredStatus {
        /// Gist ID
        id: String,
    },

    /// Fork a gist
    Fork {
        /// Gist ID
        id: String,
    },

    /// Delete a gist
    Delete {
        /// Gist ID
        id: String,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Set a configuration value
    Set {
        /// Key, one of: api-url, user-agent, per-page, max-per-page, timeout-secs, worker-threads
        key: String,

        /// New value
        value: String,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Authentication commands
#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Show which credential would be used
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "ghrest", "search", "issues", "bug", "label:crash", "--sort", "comments", "--order",
            "asc", "--per-page", "50",
        ])
        .unwrap();
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.family, SearchKind::Issues);
                assert_eq!(args.query, vec!["bug", "label:crash"]);
                assert_eq!(args.sort.as_deref(), Some("comments"));
                assert_eq!(args.per_page, Some(50));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_gist_get_many() {
        let cli = Cli::try_parse_from(["ghrest", "gist", "get", "a1", "b2"]).unwrap();
        match cli.command {
            Commands::Gist(GistArgs {
                command: GistCommand::Get { ids, revision },
            }) => {
                assert_eq!(ids, vec!["a1", "b2"]);
                assert!(revision.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Cli::try_parse_from(["ghrest", "search", "code"]).is_err());
    }
}
