use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use datagrid_lib::QueryAction;
use datagrid_lib::filter::FilterType;
use datagrid_lib::sort::Direction;

/// Filter, sort and page a JSON array of records.
#[derive(Parser, Debug, PartialEq)]
#[command(name = "datagrid", version, about)]
pub struct CliArgs {
    /// JSON file holding an array of row objects
    #[arg(short, long)]
    pub rows: PathBuf,

    /// TOML file of `[[column]]` tables; inferred from the first row if omitted
    #[arg(short, long)]
    pub columns: Option<PathBuf>,

    /// TOML grid config (page size, global search)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Dotted path to the field that identifies a row
    #[arg(long, default_value = "id")]
    pub row_id: String,

    /// Case-insensitive text searched across visible columns
    #[arg(short, long)]
    pub search: Option<String>,

    /// Column filter as `column=value` or `column=value:type`
    #[arg(short, long = "filter", value_parser = parse_filter)]
    pub filters: Vec<FilterArg>,

    /// Sort key as `column` or `column:desc`; repeat for tie-breakers
    #[arg(long = "sort", value_parser = parse_sort)]
    pub sorts: Vec<SortArg>,

    /// 1-based page to show
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Hide a column
    #[arg(long = "hide")]
    pub hidden: Vec<String>,

    /// Select a row by id
    #[arg(long = "select")]
    pub selected: Vec<String>,

    /// Select every row on the shown page
    #[arg(long)]
    pub select_page: bool,

    /// Output format
    #[arg(long, default_value_t, value_enum)]
    pub format: Format,

    /// Print every filtered row instead of one page (json and csv)
    #[arg(long)]
    pub all: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterArg {
    pub column_id: String,
    pub value: String,
    pub filter_type: Option<FilterType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortArg {
    pub column_id: String,
    pub direction: Direction,
}

/// Parses `column=value[:type]`. The suffix is only taken as a type when it
/// names one, so values such as `10:30` pass through whole.
fn parse_filter(s: &str) -> Result<FilterArg, String> {
    let (column_id, rest) = s
        .split_once('=')
        .ok_or_else(|| format!("expected column=value, got '{}'", s))?;
    if column_id.is_empty() {
        return Err("filter column is empty".to_string());
    }

    let (value, filter_type) = match rest.rsplit_once(':') {
        Some((value, suffix)) => match filter_type_named(suffix) {
            Some(filter_type) => (value, Some(filter_type)),
            None => (rest, None),
        },
        None => (rest, None),
    };

    Ok(FilterArg {
        column_id: column_id.to_string(),
        value: value.to_string(),
        filter_type,
    })
}

fn filter_type_named(name: &str) -> Option<FilterType> {
    match name.to_ascii_lowercase().as_str() {
        "text" => Some(FilterType::Text),
        "select" => Some(FilterType::Select),
        "number" => Some(FilterType::Number),
        "boolean" | "bool" => Some(FilterType::Boolean),
        "date" => Some(FilterType::Date),
        _ => None,
    }
}

/// Parses `column[:asc|desc]`.
fn parse_sort(s: &str) -> Result<SortArg, String> {
    let (column_id, direction) = match s.rsplit_once(':') {
        Some((column_id, "asc")) => (column_id, Direction::Asc),
        Some((column_id, "desc")) => (column_id, Direction::Desc),
        Some((_, other)) => return Err(format!("unknown sort direction '{}'", other)),
        None => (s, Direction::Asc),
    };
    if column_id.is_empty() {
        return Err("sort column is empty".to_string());
    }
    Ok(SortArg {
        column_id: column_id.to_string(),
        direction,
    })
}

impl CliArgs {
    /// Translates the flags into query actions, in the order they apply.
    ///
    /// Selecting the whole page depends on the evaluated page, so it is not
    /// included here.
    pub fn actions(&self) -> Vec<QueryAction> {
        let mut actions = Vec::new();

        if let Some(page_size) = self.page_size {
            actions.push(QueryAction::SetPageSize { page_size });
        }
        actions.extend(
            self.hidden
                .iter()
                .map(|id| QueryAction::set_column_visible(id.as_str(), false)),
        );
        if let Some(text) = &self.search {
            actions.push(QueryAction::set_global_text(text.as_str()));
        }
        actions.extend(self.filters.iter().map(|f| QueryAction::SetFilter {
            column_id: f.column_id.clone(),
            value: f.value.as_str().into(),
            filter_type: f.filter_type,
        }));
        actions.extend(
            self.sorts
                .iter()
                .map(|s| QueryAction::set_sort(s.column_id.as_str(), s.direction)),
        );
        actions.extend(
            self.selected
                .iter()
                .map(|id| QueryAction::toggle_row(id.as_str(), true)),
        );
        actions.push(QueryAction::SetPage {
            page: self.page.saturating_sub(1),
        });

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = CliArgs::parse_from([
            "datagrid",
            "--rows",
            "rows.json",
            "-f",
            "status=active:select",
            "--filter",
            "opens=10:30",
            "--sort",
            "age:desc",
            "--sort",
            "name",
            "--format",
            "csv",
        ]);
        assert_eq!(args.rows, PathBuf::from("rows.json"));
        assert_eq!(args.row_id, "id");
        assert_eq!(args.page, 1);
        assert_eq!(args.format, Format::Csv);
        assert_eq!(
            args.filters,
            vec![
                FilterArg {
                    column_id: "status".to_string(),
                    value: "active".to_string(),
                    filter_type: Some(FilterType::Select),
                },
                FilterArg {
                    column_id: "opens".to_string(),
                    value: "10:30".to_string(),
                    filter_type: None,
                },
            ]
        );
        assert_eq!(
            args.sorts,
            vec![
                SortArg {
                    column_id: "age".to_string(),
                    direction: Direction::Desc,
                },
                SortArg {
                    column_id: "name".to_string(),
                    direction: Direction::Asc,
                },
            ]
        );
    }

    #[test]
    fn test_bad_specs_are_rejected() {
        assert!(parse_filter("status").is_err());
        assert!(parse_filter("=x").is_err());
        assert!(parse_sort("age:sideways").is_err());
        assert!(parse_sort(":asc").is_err());
    }

    #[test]
    fn test_actions_order() {
        let args = CliArgs::parse_from([
            "datagrid",
            "-r",
            "rows.json",
            "--page-size",
            "5",
            "--search",
            "fort",
            "--select",
            "7",
            "--page",
            "3",
        ]);
        assert_eq!(
            args.actions(),
            vec![
                QueryAction::SetPageSize { page_size: 5 },
                QueryAction::set_global_text("fort"),
                QueryAction::toggle_row("7", true),
                QueryAction::SetPage { page: 2 },
            ]
        );
    }
}
