//! CLI parsing and command dispatch.

use std::path::Path;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{
    commands::{self, new::NewKind},
    config::Config,
    editor::EditorConfig,
    error::Result,
    filter::FilterArgs,
    paths::expand_path,
};

/// Parsed command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "postkit",
    version,
    about = "Search, edit, rename, remove and isolate static site posts"
)]
struct Cli {
    /// Site root containing `_config.yml`.
    #[arg(long, global = true, default_value = ".")]
    site: String,
    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value = "auto")]
    color: ColorMode,
    /// Enable verbose output.
    #[arg(long, global = true)]
    verbose: bool,
    /// Command to execute.
    #[command(subcommand)]
    command: Command,
}

/// Supported color output modes.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorMode {
    /// Only colorize when stdout is a TTY.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

/// Search terms and structured filters for `edit`.
#[derive(Debug, Args)]
struct FilterOptions {
    /// Case-insensitive patterns matched against title or slug.
    terms: Vec<String>,
    /// Only posts dated after this day (MM-DD-YYYY).
    #[arg(long, short = 'a')]
    after: Option<String>,
    /// Only posts dated before this day (MM-DD-YYYY).
    #[arg(long, short = 'b')]
    before: Option<String>,
    /// Pattern matched against category names.
    #[arg(long, short = 'c', alias = "categories")]
    category: Option<String>,
    /// Only drafts.
    #[arg(long, alias = "drafts")]
    draft: bool,
    /// Pattern matched against the containing folder (`post`, `draft`, or a path).
    #[arg(long, short = 'f')]
    folder: Option<String>,
    /// Pattern matched against the layout name.
    #[arg(long, short = 'l')]
    layout: Option<String>,
    /// Pattern matched against tag names.
    #[arg(long, short = 't')]
    tag: Option<String>,
}

impl From<FilterOptions> for FilterArgs {
    fn from(options: FilterOptions) -> Self {
        Self {
            terms: options.terms,
            after: options.after,
            before: options.before,
            category: options.category,
            draft: options.draft,
            folder: options.folder,
            layout: options.layout,
            tag: options.tag,
        }
    }
}

// Commands are ordered alphabetically - maintain this order.
/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Find a post or page and open it in your editor.
    Edit {
        /// Search terms and filters.
        #[command(flatten)]
        filters: FilterOptions,
        /// Open with the desktop application instead of the editor.
        #[arg(long, short = 'g')]
        gui: bool,
        /// Search pages instead of posts.
        #[arg(long, short = 'p')]
        page: bool,
    },
    /// Restore every post parked by `isolate`.
    Integrate,
    /// Keep one post and move every other post into `_posts/_exile`.
    Isolate {
        /// Case-insensitive patterns identifying the post to keep.
        terms: Vec<String>,
        /// Exile every post, keeping none.
        #[arg(long, short = 'a')]
        all: bool,
    },
    /// Create a post, draft, or page and open it.
    New {
        /// Title of the new content.
        title: Vec<String>,
        /// Create a draft in `_drafts`.
        #[arg(long, short = 'd', conflicts_with = "page")]
        draft: bool,
        /// Create a page at `<slug>/index.md`.
        #[arg(long, short = 'p')]
        page: bool,
        /// Open with the desktop application instead of the editor.
        #[arg(long, short = 'g')]
        gui: bool,
    },
    /// Delete a post or page and its asset directory.
    #[command(alias = "rm")]
    Remove {
        /// Case-insensitive patterns matched against title or slug.
        terms: Vec<String>,
    },
    /// Rename the title and/or file of a post or page.
    #[command(alias = "mv")]
    Rename {
        /// Case-insensitive patterns matched against title or slug.
        terms: Vec<String>,
        /// New title; its slug becomes the new file name.
        #[arg(long, short = 'n')]
        new: Option<String>,
    },
}

/// Run the requested command.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let color = cli.color.into_choice();
    let site = expand_path(&cli.site, Path::new("."))?;

    // Match arms are ordered alphabetically - maintain this order.
    match cli.command {
        Command::Edit { filters, gui, page } => {
            let editor = resolve_editor(gui)?;
            let filters = FilterArgs::from(filters);
            commands::edit::run(color, cli.verbose, &site, &filters, page, &editor).await
        }
        Command::Integrate => commands::integrate::run(color, cli.verbose, &site).await,
        Command::Isolate { terms, all } => {
            commands::isolate::run(color, cli.verbose, &site, &terms, all).await
        }
        Command::New {
            title,
            draft,
            page,
            gui,
        } => {
            let kind = match (draft, page) {
                (true, _) => NewKind::Draft,
                (false, true) => NewKind::Page,
                (false, false) => NewKind::Post,
            };
            let editor = resolve_editor(gui)?;
            commands::new::run(color, cli.verbose, &site, &title, kind, &editor).await
        }
        Command::Remove { terms } => commands::remove::run(color, cli.verbose, &site, &terms).await,
        Command::Rename { terms, new } => {
            commands::rename::run(color, cli.verbose, &site, &terms, new.as_deref()).await
        }
    }
}

/// Load the user config and decide how files are opened.
fn resolve_editor(gui: bool) -> Result<EditorConfig> {
    let config = Config::load()?;
    Ok(EditorConfig::resolve(&config, gui))
}

impl ColorMode {
    /// Convert a CLI color mode into a color choice.
    const fn into_choice(self) -> commands::ColorChoice {
        match self {
            Self::Auto => commands::ColorChoice::Auto,
            Self::Always => commands::ColorChoice::Always,
            Self::Never => commands::ColorChoice::Never,
        }
    }
}
