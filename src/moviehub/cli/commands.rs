use super::print::{
    print_messages, render_config, render_movie_detail, render_movie_list, render_text_list,
};
use super::setup::{
    print_grouped_help, print_subcommand_help, BrowseCommands, Cli, Commands, DraftArgs,
    ManageCommands, MiscCommands,
};
use super::shell;
use clap::Parser;
use directories::ProjectDirs;
use moviehub::api::{CatalogApi, ConfigAction, MovieQuery, SortKey, SortOrder};
use moviehub::clipboard::{copy_to_clipboard, format_for_clipboard};
use moviehub::config::CatalogConfig;
use moviehub::controller::CatalogController;
use moviehub::error::{CatalogError, Result};
use moviehub::model::MovieDraft;
use moviehub::seed::load_seed;
use moviehub::store::memory::InMemoryStore;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Overrides the platform config directory when `--config-dir` is not given.
const HOME_ENV: &str = "MOVIEHUB_HOME";

const NOT_AUTHORIZED: &str = "You are not authorized to perform this action.";

pub(super) struct AppContext {
    pub(super) api: CatalogApi<InMemoryStore>,
    pub(super) admin: bool,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    // Config edits don't need the catalog, skip the simulated fetch.
    if !matches!(cli.command, Some(Commands::Misc(MiscCommands::Config { .. }))) {
        let _ = ctx.api.reload().await;
    }

    match cli.command {
        Some(Commands::Misc(MiscCommands::Shell)) => shell::run(&mut ctx).await,
        command => dispatch(&mut ctx, command).await,
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "moviehub=debug"
    } else {
        "moviehub=warn"
    };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .try_init();
}

fn resolve_config_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.config_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "moviehub", "moviehub")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| CatalogError::Api("Could not determine config dir".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = resolve_config_dir(cli)?;
    let config = CatalogConfig::load(&config_dir)?;

    let seed_path = cli.seed.clone().or_else(|| config.seed_file.clone());
    let seed = load_seed(seed_path.as_deref())?;

    let store = InMemoryStore::seeded(seed.clone()).with_latency(config.latency());
    let controller = CatalogController::new(store, &seed).with_genre_source(config.genre_source);

    Ok(AppContext {
        api: CatalogApi::new(controller, config_dir),
        admin: cli.admin,
    })
}

pub(super) async fn dispatch(ctx: &mut AppContext, command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Browse(cmd)) => match cmd {
            BrowseCommands::List {
                search,
                genre,
                sort,
                desc,
            } => handle_list(ctx, &search, &genre, sort, desc),
            BrowseCommands::View { id } => handle_view(ctx, &id),
            BrowseCommands::Genres => handle_genres(ctx),
            BrowseCommands::Play { id, copy } => handle_play(ctx, &id, copy),
        },
        Some(Commands::Manage(cmd)) => {
            require_admin(ctx)?;
            match cmd {
                ManageCommands::Add { fields } => handle_add(ctx, fields).await,
                ManageCommands::Edit { id, fields } => handle_edit(ctx, &id, fields).await,
                ManageCommands::Delete { id } => handle_delete(ctx, &id).await,
            }
        }
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Config { key, value } => handle_config(ctx, key, value),
            MiscCommands::Shell => Err(CatalogError::Api("Already in a shell".to_string())),
        },
        None => handle_list(ctx, "", "All", None, false),
    }
}

/// Mutations are refused here, before they reach the API.
fn require_admin(ctx: &AppContext) -> Result<()> {
    if ctx.admin {
        Ok(())
    } else {
        Err(CatalogError::Api(NOT_AUTHORIZED.to_string()))
    }
}

fn handle_list(
    ctx: &mut AppContext,
    search: &str,
    genre: &str,
    sort: Option<SortKey>,
    desc: bool,
) -> Result<()> {
    let mut query = MovieQuery::new(search, genre);
    if let Some(key) = sort {
        let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
        query = query.sorted(key, order);
    }

    let result = ctx.api.list_movies(&query)?;
    print!("{}", render_movie_list(&result.listed_movies));
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.view_movie(id)?;
    for movie in &result.listed_movies {
        print!("{}", render_movie_detail(movie));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_genres(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.genres()?;
    print!("{}", render_text_list(&result.genres, "No genres."));
    print_messages(&result.messages);
    Ok(())
}

fn handle_play(ctx: &mut AppContext, id: &str, copy: bool) -> Result<()> {
    let result = ctx.api.play_movie(id)?;
    print_messages(&result.messages);

    let Some(movie) = result.affected_movies.first() else {
        return Ok(());
    };
    let link = format_for_clipboard(movie);
    if link.is_empty() {
        return Ok(());
    }
    println!("{}", link);

    if copy {
        match copy_to_clipboard(&link) {
            Ok(()) => println!("Link copied to clipboard."),
            Err(e) => eprintln!("Warning: Failed to copy to clipboard: {}", e),
        }
    }
    Ok(())
}

async fn handle_add(ctx: &mut AppContext, fields: DraftArgs) -> Result<()> {
    let draft = fields.overlay(MovieDraft::default());
    let result = ctx.api.add_movie(&draft).await?;
    print_messages(&result.messages);
    print!("{}", render_movie_list(&result.affected_movies));
    Ok(())
}

async fn handle_edit(ctx: &mut AppContext, id: &str, fields: DraftArgs) -> Result<()> {
    let draft = fields.overlay(ctx.api.edit_draft(id)?);
    let result = ctx.api.update_movie(id, &draft).await?;
    print_messages(&result.messages);
    print!("{}", render_movie_list(&result.affected_movies));
    Ok(())
}

async fn handle_delete(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.delete_movie(id).await?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.clone(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if key.is_none() {
        if let Some(config) = &result.config {
            print!("{}", render_config(config, None));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use moviehub::seed::default_seed;
    use moviehub::store::memory::Latency;

    pub(in crate::cli) async fn test_context(admin: bool) -> (AppContext, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let seed = default_seed();
        let store = InMemoryStore::seeded(seed.clone()).with_latency(Latency::none());
        let controller = CatalogController::connect(store, &seed).await;
        let ctx = AppContext {
            api: CatalogApi::new(controller, dir.path().to_path_buf()),
            admin,
        };
        (ctx, dir)
    }

    fn delete(id: &str) -> Option<Commands> {
        Some(Commands::Manage(ManageCommands::Delete { id: id.into() }))
    }

    #[tokio::test]
    async fn mutations_need_admin() {
        let (mut ctx, _dir) = test_context(false).await;
        let err = dispatch(&mut ctx, delete("1")).await.unwrap_err();
        assert_eq!(err.to_string(), format!("Api Error: {}", NOT_AUTHORIZED));
        assert_eq!(ctx.api.controller().movies().len(), 5);
        assert_eq!(ctx.api.current_error(), None);
    }

    #[tokio::test]
    async fn admin_can_delete() {
        let (mut ctx, _dir) = test_context(true).await;
        dispatch(&mut ctx, delete("1")).await.unwrap();
        assert!(ctx.api.controller().find(moviehub::model::MovieId(1)).is_none());
    }

    #[tokio::test]
    async fn edit_changes_only_given_fields() {
        let (mut ctx, _dir) = test_context(true).await;
        let fields = DraftArgs {
            rating: Some("9.1".into()),
            ..Default::default()
        };
        let command = Some(Commands::Manage(ManageCommands::Edit {
            id: "2".into(),
            fields,
        }));
        dispatch(&mut ctx, command).await.unwrap();

        let movie = &ctx.api.controller().movies()[1];
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.rating, 9.1);
    }

    #[tokio::test]
    async fn add_with_missing_fields_is_rejected() {
        let (mut ctx, _dir) = test_context(true).await;
        let fields = DraftArgs {
            title: Some("Half a form".into()),
            ..Default::default()
        };
        let command = Some(Commands::Manage(ManageCommands::Add { fields }));
        let err = dispatch(&mut ctx, command).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDraft(_)));
        assert_eq!(ctx.api.controller().movies().len(), 5);
    }

    #[tokio::test]
    async fn view_of_unknown_id_fails() {
        let (mut ctx, _dir) = test_context(false).await;
        let command = Some(Commands::Browse(BrowseCommands::View { id: "42".into() }));
        assert!(dispatch(&mut ctx, command).await.is_err());
    }
}
