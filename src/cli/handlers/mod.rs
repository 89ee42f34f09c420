use std::error::Error;
use std::str::FromStr;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::store::{Store, StoreError};
use crate::model::{Config, Filter, Status, UnknownOption};
use crate::ops::task_ops::{self, TaskForm, ValidationError};
use crate::ops::{check, grouping};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let json = cli.json;
    let config = config_io::load_config(cli.config.as_deref())?;
    let store = open_store(&cli, &config)?;

    match cli.command {
        None => crate::tui::run(store, &config),
        Some(cmd) => match cmd {
            // Read commands
            Commands::List(args) => cmd_list(&store, &config, args, json),
            Commands::Check(args) => cmd_check(&store, args, json),

            // Write commands
            Commands::Add(args) => cmd_add(&store, args, json),
            Commands::Edit(args) => cmd_edit(&store, args),
            Commands::Done(args) => cmd_set_status(&store, args.id, Status::Complete),
            Commands::Reopen(args) => cmd_set_status(&store, args.id, Status::Incomplete),
            Commands::Rm(args) => cmd_rm(&store, args),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_store(cli: &Cli, config: &Config) -> Result<Store, StoreError> {
    let path = config_io::resolve_db_path(cli.db.as_deref(), config);
    tracing::debug!(path = %path.display(), "opening store");
    Store::open(&path)
}

/// For `edit`: no flag keeps the current value, an empty string clears it
fn overlay_option<T>(value: Option<&str>, current: Option<T>) -> Result<Option<T>, ValidationError>
where
    T: FromStr<Err = UnknownOption>,
{
    match value {
        None => Ok(current),
        Some(v) if v.trim().is_empty() => Ok(None),
        Some(v) => task_ops::parse_option(Some(v)),
    }
}

fn form_from_args(name: String, fields: &FieldArgs) -> Result<TaskForm, ValidationError> {
    Ok(TaskForm {
        title: name,
        day: task_ops::parse_option(fields.day.as_deref())?,
        start_time: fields.start.clone().unwrap_or_default(),
        end_time: fields.end.clone().unwrap_or_default(),
        difficulty: task_ops::parse_option(fields.difficulty.as_deref())?,
        activity_type: task_ops::parse_option(fields.activity.as_deref())?,
    })
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(
    store: &Store,
    config: &Config,
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let filter = Filter::parse_filter(&args.filter).ok_or_else(|| {
        format!(
            "unknown filter: {} (expected all, incomplete or complete)",
            args.filter
        )
    })?;
    let tasks = store.list(filter)?;
    let groups = grouping::group_by_day(&tasks, config.view.time_order);

    if json {
        // Display order, so scripts see what the TUI shows
        let ordered: Vec<TaskJson> = groups
            .iter()
            .flat_map(|g| g.tasks.iter().map(|t| task_to_json(t)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&ordered)?);
    } else if groups.is_empty() {
        println!("no tasks");
    } else {
        for line in format_grouped_listing(&groups) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_check(store: &Store, args: CheckArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let result = check::check_store(store, args.fix)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for m in &result.mismatches {
            let stored = m
                .stored
                .map_or_else(|| "NULL".to_string(), |n| n.to_string());
            let fixed = if result.fixed.contains(&m.id) {
                " (fixed)"
            } else {
                ""
            };
            println!(
                "  #{} {} [{}]: day_num {} should be {}{}",
                m.id,
                m.name,
                m.day.as_deref().unwrap_or("-"),
                stored,
                m.expected,
                fixed
            );
        }
        if result.valid {
            println!("\u{2713} {} tasks checked, day order is consistent", result.checked);
        } else {
            println!(
                "\u{2717} {} of {} tasks have a wrong day_num (run with --fix)",
                result.mismatches.len(),
                result.checked
            );
        }
    }

    if result.valid {
        Ok(())
    } else {
        Err(format!("{} day_num mismatch(es) remain", result.mismatches.len()).into())
    }
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(store: &Store, args: AddArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let id = if args.fields.is_empty() {
        task_ops::quick_add(store, &args.name)?.ok_or("task name is empty")?
    } else {
        let form = form_from_args(args.name, &args.fields)?;
        task_ops::add_task(store, &form)?
    };

    if json {
        println!("{}", serde_json::to_string(&AddedJson { id })?);
    } else {
        println!("{}", id);
    }
    Ok(())
}

fn cmd_edit(store: &Store, args: EditArgs) -> Result<(), Box<dyn Error>> {
    let task = store
        .get(args.id)?
        .ok_or_else(|| format!("task not found: {}", args.id))?;
    let mut form = TaskForm::from_draft(&task.to_draft());

    let fields = &args.fields;
    if let Some(name) = args.name {
        form.title = name;
    }
    form.day = overlay_option(fields.day.as_deref(), form.day)?;
    if let Some(start) = &fields.start {
        form.start_time = start.clone();
    }
    if let Some(end) = &fields.end {
        form.end_time = end.clone();
    }
    form.difficulty = overlay_option(fields.difficulty.as_deref(), form.difficulty)?;
    form.activity_type = overlay_option(fields.activity.as_deref(), form.activity_type)?;

    task_ops::edit_task(store, args.id, &form)?;
    println!("#{} updated", args.id);
    Ok(())
}

fn cmd_set_status(store: &Store, id: i64, status: Status) -> Result<(), Box<dyn Error>> {
    task_ops::set_status(store, id, status)?;
    println!("#{} \u{2192} {}", id, status.as_str());
    Ok(())
}

fn cmd_rm(store: &Store, args: IdArg) -> Result<(), Box<dyn Error>> {
    task_ops::delete_task(store, args.id)?;
    println!("#{} deleted", args.id);
    Ok(())
}
