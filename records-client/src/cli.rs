use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::SubmitMode;

#[derive(Parser, Debug)]
#[command(
    name = "records",
    version,
    about = "Employee records: spreadsheet upload, listing and cleanup"
)]
pub struct Cli {
    /// Records server base URL
    #[arg(long, global = true, env = "RECORDS_SERVER_URL")]
    pub server: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "RECORDS_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a spreadsheet and show its first rows
    Preview(PreviewArgs),
    /// Decode a spreadsheet and upload every row
    Upload(UploadArgs),
    /// List records
    List(ListArgs),
    /// Partially update one record
    Update(UpdateArgs),
    /// Delete records by id
    Delete(DeleteArgs),
    /// Check the server
    Health,
}

#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    /// .xls, .xlsx or .xlsm file
    pub file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct UploadArgs {
    /// .xls, .xlsx or .xlsm file
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t = UploadMode::Bulk)]
    pub mode: UploadMode,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Keep only these levels (repeatable)
    #[arg(long = "level")]
    pub levels: Vec<String>,

    /// Case-insensitive match on name or position
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub position: Option<String>,

    #[arg(long)]
    pub level: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    #[arg(required = true)]
    pub ids: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    /// One request, all or nothing
    Bulk,
    /// One request per row
    PerRecord,
}

impl From<UploadMode> for SubmitMode {
    fn from(mode: UploadMode) -> Self {
        match mode {
            UploadMode::Bulk => SubmitMode::Bulk,
            UploadMode::PerRecord => SubmitMode::PerRecord,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upload() {
        let cli = Cli::try_parse_from([
            "records",
            "--server",
            "http://example:5050",
            "upload",
            "staff.xlsx",
            "--mode",
            "per-record",
        ])
        .unwrap();

        assert_eq!(cli.server.as_deref(), Some("http://example:5050"));
        match cli.command {
            Commands::Upload(args) => {
                assert_eq!(args.file, PathBuf::from("staff.xlsx"));
                assert_eq!(SubmitMode::from(args.mode), SubmitMode::PerRecord);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::try_parse_from([
            "records", "list", "--level", "Senior", "--level", "Intern", "--search", "eng",
        ])
        .unwrap();

        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.levels, vec!["Senior", "Intern"]);
                assert_eq!(args.search.as_deref(), Some("eng"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_delete_requires_ids() {
        assert!(Cli::try_parse_from(["records", "delete"]).is_err());
    }
}
