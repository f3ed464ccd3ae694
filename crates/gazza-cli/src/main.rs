use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use gazza_cli::{OutputFormat, commands};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gazza")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Copy draft listings from Airtable into marketplace publishing forms",
    long_about = "Gazza reads draft listings from an Airtable base, drives a Chrome tab on \
                  the marketplace's publishing page, and fills the form field by field so \
                  the seller only has to review and hit publish."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and a starter config.toml
    Init {
        /// Overwrite an existing config.toml
        #[arg(long)]
        force: bool,
    },

    /// List draft listings waiting in Airtable
    Drafts,

    /// Fill a marketplace publishing form from a draft listing
    Fill {
        /// Record id (recXXXX) or 1-based position in the drafts list
        #[arg(value_name = "RECORD")]
        record: String,

        /// Target marketplace
        #[arg(long, default_value = "subito")]
        marketplace: String,

        /// Attach to a Chrome already listening on this DevTools port
        #[arg(long)]
        port: Option<u16>,

        /// Browser binary to launch
        #[arg(long)]
        chrome_path: Option<PathBuf>,

        /// Launch with a throwaway profile instead of the persistent one
        #[arg(long)]
        temp_profile: bool,

        /// Open this URL instead of the marketplace's publishing page
        #[arg(long)]
        url: Option<String>,

        /// Mark the record as published after a successful fill
        #[arg(long)]
        publish: bool,

        /// Exit after the fill instead of waiting for a key
        #[arg(long)]
        no_wait: bool,
    },

    /// Mark a draft as published in Airtable
    Publish {
        /// Record id (recXXXX) or 1-based position in the drafts list
        #[arg(value_name = "RECORD")]
        record: String,
    },

    /// Inspect, export, or clear the activity log
    Log {
        #[command(subcommand)]
        action: LogAction,
    },

    /// Manage category-to-fields suggestions
    Mappings {
        #[command(subcommand)]
        action: MappingsAction,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS:\n    \
                            bash, zsh, fish, powershell, elvish\n\n\
                            INSTALLATION:\n    \
                            Bash:  gazza completion --shell bash >> ~/.bashrc\n    \
                            Zsh:   gazza completion --shell zsh >> ~/.zshrc\n    \
                            Fish:  gazza completion --shell fish > ~/.config/fish/completions/gazza.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(short, long, value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum LogAction {
    /// Show recent entries
    Show {
        /// Number of entries to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Export the full log as CSV
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete every entry
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum MappingsAction {
    /// List category mappings
    List,
    /// Add or replace a category mapping
    Add {
        /// Category name as it appears in Airtable
        name: String,

        /// Comma-separated field list (titolo, prezzo, ...)
        #[arg(long, required = true, value_delimiter = ',')]
        fields: Vec<String>,
    },
    /// Remove a category mapping
    Remove {
        /// Category name
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Init { force } => commands::init::execute(force),
        Commands::Drafts => commands::drafts::execute(cli.format),
        Commands::Fill {
            record,
            marketplace,
            port,
            chrome_path,
            temp_profile,
            url,
            publish,
            no_wait,
        } => commands::fill::execute(
            &record,
            &marketplace,
            port,
            chrome_path,
            temp_profile,
            url,
            publish,
            no_wait,
            cli.format,
        ),
        Commands::Publish { record } => commands::publish::execute(&record),
        Commands::Log { action } => match action {
            LogAction::Show { limit } => commands::log::show(limit, cli.format),
            LogAction::Export { output } => commands::log::export(output.as_deref()),
            LogAction::Clear { yes } => commands::log::clear(yes),
        },
        Commands::Mappings { action } => match action {
            MappingsAction::List => commands::mappings::list(cli.format),
            MappingsAction::Add { name, fields } => commands::mappings::add(&name, fields),
            MappingsAction::Remove { name } => commands::mappings::remove(&name),
        },
        Commands::Completion { shell } => {
            commands::completion::execute(shell, &mut Cli::command())
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new(
            "gazza_cli=debug,gazza_core=debug,gazza_airtable=debug,gazza_browser=debug,gazza_fill=debug",
        )
    } else {
        EnvFilter::new("gazza_cli=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
