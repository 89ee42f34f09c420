use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wt", about = concat!("[x] weektodo v", env!("CARGO_PKG_VERSION"), " - a to-do list for the week"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Read settings from this config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks grouped by day
    List(ListArgs),
    /// Add a task (name only, or with any of the dialog fields)
    Add(AddArgs),
    /// Change fields of a task
    Edit(EditArgs),
    /// Mark a task complete
    Done(IdArg),
    /// Mark a task incomplete again
    Reopen(IdArg),
    /// Permanently delete a task
    Rm(IdArg),
    /// Verify stored day ordering keys
    Check(CheckArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Which tasks to show (all, incomplete, complete)
    #[arg(long, default_value = "all")]
    pub filter: String,
}

/// Fields shared by `add` and `edit`. Days, difficulties and activity
/// types take the stored label or the English name.
#[derive(Args, Default)]
pub struct FieldArgs {
    /// Day of the week (e.g. monday, Segunda-feira)
    #[arg(long)]
    pub day: Option<String>,
    /// Start time (free text, e.g. 09:00)
    #[arg(long)]
    pub start: Option<String>,
    /// End time (free text)
    #[arg(long)]
    pub end: Option<String>,
    /// easy, medium or hard
    #[arg(long)]
    pub difficulty: Option<String>,
    /// study, work or leisure
    #[arg(long)]
    pub activity: Option<String>,
}

impl FieldArgs {
    pub fn is_empty(&self) -> bool {
        self.day.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.difficulty.is_none()
            && self.activity.is_none()
    }
}

#[derive(Args)]
pub struct AddArgs {
    /// Task name
    pub name: String,
    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id
    pub id: i64,
    /// New name
    #[arg(long)]
    pub name: Option<String>,
    /// Given fields replace the stored ones; pass "" to clear one
    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(Args)]
pub struct IdArg {
    /// Task id
    pub id: i64,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Rewrite mismatched day_num values
    #[arg(long)]
    pub fix: bool,
}
