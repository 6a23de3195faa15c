//! Clap derive structures for the `portway` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// portway -- admin console for a captive-portal backend
#[derive(Debug, Parser)]
#[command(
    name = "portway",
    version,
    about = "Manage a captive-portal network from the command line",
    long_about = "Administer a captive-portal backend: client devices, \
        bandwidth policies, web-content filtering, guest vouchers, activity \
        logs, and reports.",
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
    /// Portal profile to use
    #[arg(long, short = 'p', env = "PORTWAY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Portal base URL (overrides profile)
    #[arg(long, env = "PORTWAY_PORTAL", global = true)]
    pub portal: Option<String>,

    /// Session token (overrides the stored session)
    #[arg(long, env = "PORTWAY_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PORTWAY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PORTWAY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (default 30)
    #[arg(long, env = "PORTWAY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in as admin and store the session token
    Login(LoginArgs),

    /// End the admin session
    Logout,

    /// Manage client devices
    #[command(alias = "cl")]
    Clients(ClientsArgs),

    /// Show and assign bandwidth limits
    #[command(alias = "bw")]
    Bandwidth(BandwidthArgs),

    /// Manage web-content filtering
    #[command(alias = "filter")]
    Filtering(FilteringArgs),

    /// Manage guest vouchers
    Vouchers(VouchersArgs),

    /// Guest network master switch
    Guest(GuestArgs),

    /// View the activity log and notifications
    Logs(LogsArgs),

    /// Dashboard summary counters
    Stats(StatsArgs),

    /// Generate and export reports
    Reports(ReportsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Admin identifier (defaults to the profile's admin)
    #[arg(long)]
    pub admin: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CLIENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ClientsArgs {
    #[command(subcommand)]
    pub command: ClientsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ClientsCommand {
    /// List all client devices
    #[command(alias = "ls")]
    List,

    /// Show one client in detail
    Get {
        /// Client id or display name
        client: String,
    },

    /// Register a new client
    Add {
        /// Roll number / identifier
        roll_no: String,

        /// Initial password
        #[arg(long)]
        password: Option<String>,

        /// Initial activity label
        #[arg(long)]
        activity: Option<String>,
    },

    /// Edit a client's identity or credential
    Edit {
        /// Client id or display name
        client: String,

        /// New roll number / identifier
        #[arg(long)]
        roll_no: String,

        /// New password
        #[arg(long)]
        password: Option<String>,
    },

    /// Block a client (asks for confirmation)
    Block {
        /// Client id or display name
        client: String,
    },

    /// Unblock a client (asks for confirmation)
    Unblock {
        /// Client id or display name
        client: String,
    },

    /// Bulk-import clients from a CSV file
    Import {
        /// Path to the CSV file
        file: std::path::PathBuf,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BANDWIDTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BandwidthArgs {
    #[command(subcommand)]
    pub command: BandwidthCommand,
}

#[derive(Debug, Subcommand)]
pub enum BandwidthCommand {
    /// Show effective limits for all clients (admins hidden)
    Show,

    /// Assign a limit: a named tier or a manual Mbps value
    Set {
        /// Client id or display name
        client: String,

        /// Tier token (vlow, low, standard, high, unlimited) or a
        /// positive integer for a manual Mbps override
        limit: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FILTERING
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FilteringArgs {
    #[command(subcommand)]
    pub command: FilteringCommand,
}

#[derive(Debug, Subcommand)]
pub enum FilteringCommand {
    /// Show the effective blocklist and category toggles
    #[command(alias = "ls")]
    List,

    /// Add a domain to the manual block list
    Block {
        /// Domain to block
        domain: String,
    },

    /// Remove a manually blocked domain
    Unblock {
        /// Domain to unblock
        domain: String,
    },

    /// Flip a category's active state
    Toggle {
        /// Category name (e.g. "Gaming")
        category: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VOUCHERS / GUEST
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VouchersArgs {
    #[command(subcommand)]
    pub command: VouchersCommand,
}

#[derive(Debug, Subcommand)]
pub enum VouchersCommand {
    /// List vouchers, newest first
    #[command(alias = "ls")]
    List,

    /// Create one voucher with an explicit code
    Create {
        /// Voucher code
        code: String,

        /// Validity label
        #[arg(long, default_value = "24 hours")]
        duration: String,
    },

    /// Batch-generate vouchers with random codes
    Generate {
        /// How many to generate
        #[arg(long, default_value = "5")]
        count: usize,
    },

    /// Mark a voucher as claimed (one-way)
    Claim {
        /// Voucher id
        id: u32,

        /// Who claimed it
        #[arg(long, default_value = "Guest")]
        by: String,
    },

    /// Delete a voucher (asks for confirmation)
    Delete {
        /// Voucher id
        id: u32,
    },
}

#[derive(Debug, Args)]
pub struct GuestArgs {
    #[command(subcommand)]
    pub command: GuestCommand,
}

#[derive(Debug, Subcommand)]
pub enum GuestCommand {
    /// Enable the guest network
    On,
    /// Disable the guest network
    Off,
    /// Show the current state
    Status,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOGS / STATS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LogsArgs {
    /// Only show entries at this level
    #[arg(long, value_parser = ["info", "warn", "error"])]
    pub level: Option<String>,

    /// Show the notification feed (newest warn/error entries)
    #[arg(long)]
    pub notifications: bool,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Keep polling and re-rendering until interrupted
    #[arg(long)]
    pub watch: bool,

    /// Poll interval for --watch (e.g. "2s", "1m")
    #[arg(long, default_value = "5s", value_parser = humantime::parse_duration)]
    pub interval: std::time::Duration,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REPORTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub command: ReportsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReportsCommand {
    /// Build a report and print or export it
    Generate {
        /// Report type: top-bandwidth-users, blocked-site-activity, or
        /// full-network-audit
        #[arg(long = "type")]
        report_type: portway_core::ReportType,

        /// Time range: daily, weekly, or monthly
        #[arg(long, default_value = "daily")]
        range: portway_core::ReportRange,

        /// Build from the local snapshot instead of asking the backend
        #[arg(long)]
        offline: bool,

        /// Write CSV to this path instead of printing a table
        #[arg(long)]
        csv: Option<std::path::PathBuf>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG / COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile interactively
    Init,

    /// Print the resolved configuration
    Show,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
