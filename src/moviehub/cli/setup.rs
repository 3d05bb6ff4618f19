use clap::{Args, CommandFactory, Parser, Subcommand};
use moviehub::filter::SortKey;
use moviehub::model::MovieDraft;
use std::path::PathBuf;

/// Returns the version string, with the git hash for builds made inside a checkout.
/// Format: "0.1.0" or "0.1.0@abc1234"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH == "unknown" {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "moviehub",
    bin_name = "moviehub",
    version = get_version(),
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Browse and curate a small movie catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Allow add, edit and delete
    #[arg(long, global = true, help_heading = "Options")]
    pub admin: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Directory holding config.json
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub config_dir: Option<PathBuf>,

    /// JSON file to seed the catalog from
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub seed: Option<PathBuf>,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Browse,
    Manage,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Browse => "Browse Commands:",
            CommandGroup::Manage => "Admin Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "view" | "genres" | "play" => Some(CommandGroup::Browse),
            "add" | "edit" | "delete" => Some(CommandGroup::Manage),
            "config" | "shell" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::Browse, CommandGroup::Manage, CommandGroup::Misc]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("moviehub {version}\n"));
    output.push_str("Browse and curate a small movie catalog\n");
    output.push('\n');
    output.push_str("Usage: moviehub [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --admin             Allow add, edit and delete\n");
    output.push_str("  -v, --verbose           Verbose output\n");
    output.push_str("      --config-dir <DIR>  Directory holding config.json\n");
    output.push_str("      --seed <FILE>       JSON file to seed the catalog from\n");
    output.push_str("  -h, --help              Print help\n");
    output.push_str("  -V, --version           Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a specific subcommand using clap's built-in rendering
pub fn print_subcommand_help(command: &Option<Commands>) {
    match command {
        Some(command) => print_help_for_command(command.name()),
        None => print_grouped_help(),
    }
}

pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            let help = subcmd.render_help();
            print!("{}", help);
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Browse(BrowseCommands),

    #[command(flatten)]
    Manage(ManageCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Browse(c) => match c {
                BrowseCommands::List { .. } => "list",
                BrowseCommands::View { .. } => "view",
                BrowseCommands::Genres => "genres",
                BrowseCommands::Play { .. } => "play",
            },
            Commands::Manage(c) => match c {
                ManageCommands::Add { .. } => "add",
                ManageCommands::Edit { .. } => "edit",
                ManageCommands::Delete { .. } => "delete",
            },
            Commands::Misc(c) => match c {
                MiscCommands::Config { .. } => "config",
                MiscCommands::Shell => "shell",
            },
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum BrowseCommands {
    /// List movies
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Case-insensitive search over title and description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only show this genre ("All" for every genre)
        #[arg(short, long, default_value = "All")]
        genre: String,

        /// Sort by a field instead of catalog order
        #[arg(long, value_enum)]
        sort: Option<SortKey>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// Show every field of a movie
    #[command(alias = "v", display_order = 2)]
    View {
        /// Movie id
        id: String,
    },

    /// List the genres offered for filtering
    #[command(display_order = 3)]
    Genres,

    /// Print the playback link of a movie
    #[command(display_order = 4)]
    Play {
        /// Movie id
        id: String,

        /// Also copy the link to the clipboard
        #[arg(long)]
        copy: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ManageCommands {
    /// Add a movie (admin)
    #[command(alias = "n", display_order = 10)]
    Add {
        #[command(flatten)]
        fields: DraftArgs,
    },

    /// Edit a movie; only the given fields change (admin)
    #[command(alias = "e", display_order = 11)]
    Edit {
        /// Movie id
        id: String,

        #[command(flatten)]
        fields: DraftArgs,
    },

    /// Delete a movie (admin)
    #[command(alias = "rm", display_order = 12)]
    Delete {
        /// Movie id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 20)]
    Config {
        /// Configuration key (fetch-latency, mutation-latency, genre-source, seed-file)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Start an interactive session where changes persist between commands
    #[command(display_order = 21)]
    Shell,
}

/// Movie form fields. Omitted fields keep the value they start from: blank for
/// `add`, the current movie for `edit`.
#[derive(Args, Debug, Default, Clone)]
pub struct DraftArgs {
    #[arg(long)]
    pub title: Option<String>,

    /// Release year
    #[arg(long)]
    pub year: Option<String>,

    #[arg(long)]
    pub genre: Option<String>,

    /// Rating from 0 to 10
    #[arg(long)]
    pub rating: Option<String>,

    /// Running time, e.g. "148 min"
    #[arg(long)]
    pub duration: Option<String>,

    /// Download or stream URL
    #[arg(long = "link", value_name = "URL")]
    pub download_link: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

impl DraftArgs {
    pub fn overlay(self, mut base: MovieDraft) -> MovieDraft {
        let fields = [
            (self.title, &mut base.title),
            (self.year, &mut base.year),
            (self.genre, &mut base.genre),
            (self.rating, &mut base.rating),
            (self.duration, &mut base.duration),
            (self.download_link, &mut base.download_link),
            (self.description, &mut base.description),
        ];
        for (given, slot) in fields {
            if let Some(value) = given {
                *slot = value;
            }
        }
        base
    }
}
