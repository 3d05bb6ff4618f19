use super::commands::{dispatch, AppContext};
use super::setup::Commands;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use moviehub::error::{CatalogError, Result};
use rustyline::{
    completion::Completer, highlight::Highlighter, hint::Hinter, history::FileHistory,
    validate::Validator, CompletionType, Config, Editor, Helper,
};

const PROMPT: &str = "moviehub> ";
const ADMIN_PROMPT: &str = "moviehub# ";
const HISTORY_FILE: &str = "history.txt";

#[derive(Parser, Debug)]
#[command(name = "", disable_version_flag = true)]
struct ShellCli {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    #[command(flatten)]
    Catalog(Commands),

    /// Turn admin mode on or off
    Admin {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Dismiss the current error
    Dismiss,

    /// Fetch the catalog again
    Reload,

    /// Close the session
    #[command(alias = "quit")]
    Exit,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

async fn execute_line(ctx: &mut AppContext, line: &str) -> Flow {
    let line = line.trim();
    if line.is_empty() {
        return Flow::Continue;
    }

    let args =
        shlex::split(line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());
    let cli = ShellCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    let command = match cli {
        Ok(cli) => cli.command,
        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
            return Flow::Continue;
        }
    };

    let outcome = match command {
        ShellCommand::Exit => return Flow::Exit,
        ShellCommand::Admin { state } => {
            ctx.admin = matches!(state, Toggle::On);
            println!("Admin mode {}.", if ctx.admin { "on" } else { "off" });
            Ok(())
        }
        ShellCommand::Dismiss => {
            ctx.api.clear_error();
            Ok(())
        }
        ShellCommand::Reload => ctx.api.reload().await.map(|()| {
            println!(
                "Loaded {} movies.",
                ctx.api.controller().movies().len()
            )
        }),
        ShellCommand::Catalog(command) => dispatch(ctx, Some(command)).await,
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
    }
    Flow::Continue
}

struct ShellHelper {
    command_names: Vec<String>,
}

impl ShellHelper {
    fn new() -> Self {
        let command_names = ShellCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();
        Self { command_names }
    }
}

impl Completer for ShellHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::new()));
        }
        let matches = self
            .command_names
            .iter()
            .filter(|c| c.starts_with(line))
            .cloned()
            .collect();
        Ok((0, matches))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}
impl Highlighter for ShellHelper {}
impl Validator for ShellHelper {}
impl Helper for ShellHelper {}

pub(super) async fn run(ctx: &mut AppContext) -> Result<()> {
    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();
    let mut rl = Editor::<ShellHelper, FileHistory>::with_config(config)
        .map_err(|e| CatalogError::Api(format!("Failed to start shell: {}", e)))?;
    rl.set_helper(Some(ShellHelper::new()));

    let history = ctx.api.config_dir().join(HISTORY_FILE);
    let _ = rl.load_history(&history);

    println!(
        "{} movies loaded. Type --help for commands, exit to quit.",
        ctx.api.controller().movies().len()
    );

    loop {
        let prompt = if ctx.admin { ADMIN_PROMPT } else { PROMPT };
        match rl.readline(prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                if execute_line(ctx, &line).await == Flow::Exit {
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    if let Some(dir) = history.parent().filter(|d| d.exists()) {
        tracing::debug!(dir = %dir.display(), "saving shell history");
        let _ = rl.save_history(&history);
    }
    Ok(())
}
