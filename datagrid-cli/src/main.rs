mod args;
mod columns;
mod error;
mod paths;
mod render;

use std::collections::HashSet;
use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use datagrid_lib::DataGrid;
use datagrid_lib::GridConfig;
use datagrid_lib::QueryAction;
use datagrid_lib::QueryState;
use datagrid_lib::accessor::resolve_row_id;
use datagrid_lib::column::ColumnRegistry;
use datagrid_lib::column::RowIdAccessor;
use datagrid_lib::observer::LogObserver;
use log::debug;
use log::error;
use log::info;
use simplelog::ConfigBuilder;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::args::CliArgs;
use crate::error::CliError;

type JsonRow = serde_json::Value;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);
    info!("datagrid starting with {:?}", args);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(&args, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Writes to `<cache dir>/latest.log`. When the file cannot be set up, warns
/// once on stderr and runs without a logger.
fn init_logging(verbose: bool) {
    let Some(path) = paths::log_file() else {
        eprintln!("Warning: no cache directory found, logging is disabled");
        return;
    };
    let file = match open_log_file(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!(
                "Warning: cannot open log file {}: {}; logging is disabled",
                path.display(),
                e
            );
            return;
        }
    };
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Err(e) = WriteLogger::init(level, config, file) {
        eprintln!("Warning: cannot install logger: {}", e);
    }
}

/// Creates the log file, and its directory if needed.
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    File::create(path)
}

fn run<W: io::Write>(args: &CliArgs, out: &mut W) -> Result<(), CliError> {
    let rows = load_rows(&args.rows)?;
    let columns = match &args.columns {
        Some(path) => columns::load(path)?,
        None => columns::infer(&rows),
    };
    let columns = ColumnRegistry::new(columns)?;
    let row_id = RowIdAccessor::path(&args.row_id)?;
    check_unique_ids(&rows, &row_id)?;
    let config = load_config(args.config.as_deref())?;

    let mut grid = DataGrid::new(rows, columns, row_id).with_config(config);
    if args.verbose {
        grid = grid.with_observer(LogObserver);
    }

    let state = query(&grid, args);
    render::render(out, &grid, &state, args.format, args.all)
}

/// Replays the command line as actions against a fresh query.
fn query(grid: &DataGrid<JsonRow>, args: &CliArgs) -> QueryState {
    let state = args
        .actions()
        .into_iter()
        .fold(grid.initial_state(), |state, action| grid.dispatch(&state, action));

    if args.select_page {
        let page_ids = grid.evaluate(&state).page_row_ids().to_vec();
        grid.dispatch(&state, QueryAction::toggle_all_on_page(true, page_ids))
    } else {
        state
    }
}

fn load_rows(path: &Path) -> Result<Vec<JsonRow>, CliError> {
    let text = fs::read_to_string(path).map_err(|e| CliError::read(path, e))?;
    let value: JsonRow = serde_json::from_str(&text).map_err(|e| CliError::json(path, e))?;
    let JsonRow::Array(rows) = value else {
        return Err(CliError::NotAnArray {
            path: path.to_path_buf(),
        });
    };
    if !rows.iter().all(JsonRow::is_object) {
        return Err(CliError::NotAnArray {
            path: path.to_path_buf(),
        });
    }
    debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Reads the grid config from `path`, else from the user config directory
/// if a `grid.toml` exists there, else uses the defaults.
fn load_config(path: Option<&Path>) -> Result<GridConfig, CliError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match paths::default_config().filter(|p| p.exists()) {
            Some(path) => path,
            None => return Ok(GridConfig::default()),
        },
    };
    let text = fs::read_to_string(&path).map_err(|e| CliError::read(&path, e))?;
    let config = toml::from_str(&text).map_err(|e| CliError::toml(&path, e))?;
    debug!("Loaded grid config from {}", path.display());
    Ok(config)
}

fn check_unique_ids(rows: &[JsonRow], row_id: &RowIdAccessor<JsonRow>) -> Result<(), CliError> {
    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows {
        let id = resolve_row_id(row, row_id);
        if !seen.insert(id.clone()) {
            return Err(CliError::DuplicateRowId { id });
        }
    }
    Ok(())
}
