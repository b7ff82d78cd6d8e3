//! CLI for shelfmap - generate the assignment workbook and edit it headlessly
//!
//! Usage:
//!   shelfmap_cli generate                      # summary + families -> output
//!   shelfmap_cli resave                        # rewrite output with fresh dropdowns
//!   shelfmap_cli assign --section A --aisle 1 --side 1 --cells 1:1,1:2 \
//!       --family Dairy --category Milk
//!   shelfmap_cli show --section A --aisle 1 --side 1

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shelfmap::config::Config;
use shelfmap::export::ValidationHints;
use shelfmap::family::FamilyIndex;
use shelfmap::store::AssignmentStore;
use shelfmap::{parser, GridCell, Result, SideRef};

#[derive(Debug, Parser)]
#[command(
    name = "shelfmap_cli",
    about = "Expand shelf summaries and assign product families and categories",
    version
)]
struct Cli {
    /// JSON config file; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Expand the shelf summary into the assignment workbook.
    Generate(GenerateArgs),

    /// Rewrite the assignment workbook with dropdowns rebuilt from the family file.
    Resave(FileArgs),

    /// Assign a family and category to shelves of one side and save.
    Assign(AssignArgs),

    /// Print one side's shelves as a level x shelf grid.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
struct FileArgs {
    /// Family workbook
    #[arg(long)]
    families: Option<PathBuf>,

    /// Assignment workbook
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Shelf summary workbook
    #[arg(long)]
    summary: Option<PathBuf>,

    #[command(flatten)]
    files: FileArgs,
}

#[derive(Debug, Args)]
struct SideArgs {
    #[arg(long)]
    section: String,

    #[arg(long)]
    aisle: u32,

    #[arg(long)]
    side: u32,
}

#[derive(Debug, Args)]
struct AssignArgs {
    #[command(flatten)]
    side: SideArgs,

    /// Comma-separated LEVEL:SHELF pairs, e.g. 1:1,1:2
    #[arg(long, value_delimiter = ',', value_parser = parse_cell)]
    cells: Vec<GridCell>,

    #[arg(long)]
    family: String,

    #[arg(long)]
    category: String,

    #[command(flatten)]
    files: FileArgs,
}

#[derive(Debug, Args)]
struct ShowArgs {
    #[command(flatten)]
    side: SideArgs,

    /// Assignment workbook
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Generate(args) => run_generate(&config, &args),
        Commands::Resave(args) => run_resave(&config, &args),
        Commands::Assign(args) => run_assign(&config, &args),
        Commands::Show(args) => run_show(&config, &args),
    }
}

fn run_generate(config: &Config, args: &GenerateArgs) -> Result<()> {
    let summary_path = args.summary.as_deref().unwrap_or(&config.shelf_info);
    let summary = parser::parse_file(summary_path)?;
    let families = parser::parse_file(families_path(config, &args.files))?;

    let (store, _) = shelfmap::generate(&summary, &families, config.family_sheet)?;
    let output = output_path(config, &args.files);
    store.persist_to(output)?;
    println!("Wrote {} shelves to {}", store.len(), output.display());
    Ok(())
}

fn run_resave(config: &Config, args: &FileArgs) -> Result<()> {
    let (store, _) = open_store(config, args)?;
    store.persist()?;
    println!("Saved {} shelves", store.len());
    Ok(())
}

fn run_assign(config: &Config, args: &AssignArgs) -> Result<()> {
    let (mut store, index) = open_store(config, &args.files)?;
    match index.categories(&args.family) {
        None => tracing::warn!(family = %args.family, "family not in family workbook"),
        Some(categories) if !categories.iter().any(|c| *c == args.category) => {
            tracing::warn!(
                family = %args.family,
                category = %args.category,
                "category not listed for family"
            );
        }
        Some(_) => {}
    }

    let side = side_ref(&args.side);
    let updated = store.assign(&args.cells, &side, &args.family, &args.category);
    store.persist()?;
    println!("Assigned {updated} shelves");
    Ok(())
}

fn run_show(config: &Config, args: &ShowArgs) -> Result<()> {
    let output = args.output.as_deref().unwrap_or(&config.output);
    let store = AssignmentStore::load(&parser::parse_file(output)?)?;
    let side = side_ref(&args.side);
    print!("{}", render_side(&store, &side));
    Ok(())
}

/// Load the assignment workbook with hints rebuilt from the family file.
fn open_store(config: &Config, args: &FileArgs) -> Result<(AssignmentStore, FamilyIndex)> {
    let output = output_path(config, args);
    let families = parser::parse_file(families_path(config, args))?;
    let index = FamilyIndex::from_workbook(&families, config.family_sheet);
    let store = AssignmentStore::load(&parser::parse_file(output)?)?
        .with_backing(output)
        .with_hints(ValidationHints::from_index(&index));
    Ok((store, index))
}

fn families_path<'a>(config: &'a Config, args: &'a FileArgs) -> &'a Path {
    args.families.as_deref().unwrap_or(&config.family_info)
}

fn output_path<'a>(config: &'a Config, args: &'a FileArgs) -> &'a Path {
    args.output.as_deref().unwrap_or(&config.output)
}

fn side_ref(args: &SideArgs) -> SideRef {
    SideRef::new(&args.section, args.aisle, args.side)
}

fn parse_cell(s: &str) -> std::result::Result<GridCell, String> {
    let (level, shelf) = s
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("expected LEVEL:SHELF, got '{s}'"))?;
    let number = |v: &str| {
        v.trim()
            .parse::<u32>()
            .map_err(|_| format!("invalid number in '{s}'"))
    };
    Ok(GridCell::new(number(level)?, number(shelf)?))
}

/// One text line per level, top to bottom; each shelf shows its category or `-`.
fn render_side(store: &AssignmentStore, side: &SideRef) -> String {
    let records: Vec<_> = store.side_view(side).collect();
    let max_level = records.iter().map(|r| r.level).max().unwrap_or(0);
    let max_shelf = records.iter().map(|r| r.shelf).max().unwrap_or(0);
    let label = |level: u32, shelf: u32| {
        records
            .iter()
            .find(|r| r.level == level && r.shelf == shelf)
            .map(|r| r.category.as_str())
            .filter(|c| !c.is_empty())
            .unwrap_or("-")
    };

    let mut out = String::new();
    for level in 1..=max_level {
        let row: Vec<String> = (1..=max_shelf)
            .map(|shelf| format!("{:<16}", label(level, shelf)))
            .collect();
        out.push_str(&format!("L{level:<3}{}\n", row.join(" ").trim_end()));
    }
    out
}
