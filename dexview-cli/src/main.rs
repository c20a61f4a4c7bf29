mod commands;
mod fs_fetcher;
mod reports;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dexview_core::{DexFilter, PageSize};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Console,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "dexview", version)]
#[command(about = "Browse a Dexview mon dataset from the terminal")]
struct Args {
    /// Dataset directory holding dex.json and mons/
    #[arg(long, env = "DEXVIEW_DATA", default_value = "site/out")]
    data: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    format: OutputFormat,

    /// Optional path to write output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Dex listing ordered by dex number
    List {
        /// Case-insensitive substring of the name or id
        #[arg(short, long, default_value = "")]
        query: String,
        /// Exact primary or secondary type
        #[arg(short = 't', long = "type", default_value = "")]
        type_filter: String,
        /// Only mons that never spawn
        #[arg(long)]
        no_spawns: bool,
    },
    /// Full detail record of one mon
    Mon { id: String },
    /// Resolve free evolution text to an index id
    Resolve { text: String },
    /// Drop items and the mons that drop them
    Drops {
        #[arg(short, long, default_value = "")]
        query: String,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// One of 10, 25, 50, 100
        #[arg(long, default_value = "25", value_parser = parse_page_size)]
        page_size: PageSize,
    },
    /// Biome tags, or one tag with its resolution and users
    Biome { tag: Option<String> },
    /// Spawn presets, or one preset with its users
    Preset { name: Option<String> },
    /// Parse a URL fragment such as `#/mon/raichu`
    Route { fragment: String },
    /// Base stat total tiers over every detail record
    Bst {
        /// Number of quantile tiers
        #[arg(long, default_value_t = 3)]
        tiers: usize,
        /// Also list the N highest totals
        #[arg(long)]
        top: Option<usize>,
    },
}

fn parse_page_size(raw: &str) -> Result<PageSize, String> {
    let value: usize = raw
        .parse()
        .map_err(|_| format!("page size must be a number (got {raw})"))?;
    PageSize::try_from(value)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    if args.output.is_some() {
        colored::control::set_override(false);
    }

    let mut output_target = OutputTarget::new(args.output.clone())?;
    run(&args, output_target.writer()).await?;
    output_target.flush_inner()?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

async fn run(args: &Args, out: &mut dyn Write) -> Result<()> {
    if let Command::Route { fragment } = &args.command {
        return commands::route(fragment, args.format, out);
    }

    let shell = commands::open(&args.data)
        .await
        .with_context(|| format!("cannot open dataset at {}", args.data.display()))?;
    let format = args.format;
    match &args.command {
        Command::List {
            query,
            type_filter,
            no_spawns,
        } => {
            let filter = DexFilter {
                query: query.clone(),
                type_filter: type_filter.clone(),
                no_spawns: *no_spawns,
            };
            commands::list(&shell, filter, format, out)
        }
        Command::Mon { id } => commands::mon(&shell, id, format, out).await,
        Command::Resolve { text } => commands::resolve(&shell, text, format, out),
        Command::Drops {
            query,
            page,
            page_size,
        } => commands::drops(&shell, query, *page, *page_size, format, out),
        Command::Biome { tag } => {
            commands::biome(&shell, tag.as_deref().unwrap_or_default(), format, out)
        }
        Command::Preset { name } => {
            commands::preset(&shell, name.as_deref().unwrap_or_default(), format, out)
        }
        Command::Bst { tiers, top } => commands::bst(&shell, *tiers, *top, format, out).await,
        Command::Route { .. } => Ok(()),
    }
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}
