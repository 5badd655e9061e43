mod new;
use new::cmd_new;

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::{config_io, link, list_io, recent, recovery};
use crate::model::config::AppConfig;
use crate::model::settings::FontSize;
use crate::ops::session::Session;
use crate::ops::task_ops::{self, ColorSlot};
use crate::ops::{check, search};

/// Configuration shared by every command
struct Context {
    config_dir: PathBuf,
    config: AppConfig,
}

impl Context {
    fn load() -> Self {
        let config_dir = config_io::config_dir();
        let config = config_io::load_config(&config_dir);
        Context { config_dir, config }
    }

    fn record(&self, path: &Path) {
        recent::record_recent(&self.config_dir, path, self.config.recent.limit);
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let file = cli.file.as_deref();

    let ctx = Context::load();
    let Some(command) = cli.command else {
        let args = ShowArgs {
            task: None,
            checks: Vec::new(),
        };
        return cmd_show(&ctx, file, args, json);
    };

    match command {
        Commands::New(args) => cmd_new(&ctx, args),

        // Read commands
        Commands::Show(args) => cmd_show(&ctx, file, args, json),
        Commands::Search(args) => cmd_search(&ctx, file, args, json),
        Commands::Check => cmd_check(&ctx, file, json),
        Commands::Open(args) => cmd_open(&ctx, file, args),
        Commands::Recent => cmd_recent(&ctx, json),

        // Write commands
        Commands::Add(args) => cmd_add(&ctx, file, args),
        Commands::Rm(args) => cmd_rm(&ctx, file, args),
        Commands::Rename(args) => cmd_rename(&ctx, file, args),
        Commands::Mv(args) => cmd_mv(&ctx, file, args),
        Commands::Sub(args) => cmd_sub(&ctx, file, args),
        Commands::Color(args) => cmd_color(&ctx, file, args),
        Commands::Link(args) => cmd_link(&ctx, file, args),
        Commands::Settings(args) => cmd_settings(&ctx, file, args, json),
        Commands::Reset(args) => cmd_reset(&ctx, file, args),
        Commands::SaveAs(args) => cmd_save_as(&ctx, file, args),

        // Maintenance
        Commands::Config(args) => cmd_config(&ctx, args),
        Commands::Recovery(args) => cmd_recovery(&ctx, args, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The list file given with -f, or the most recently used one
fn resolve_path(ctx: &Context, file: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match file {
        Some(f) => Ok(PathBuf::from(f)),
        None => recent::read_recent(&ctx.config_dir)
            .latest()
            .ok_or_else(|| "no list file given (use -f <FILE>, or create one with `ckl new <FILE>`)".into()),
    }
}

/// Load the list without touching the recent-files list
fn load_session(ctx: &Context, file: Option<&str>) -> Result<Session, Box<dyn std::error::Error>> {
    let path = resolve_path(ctx, file)?;
    let mut session =
        Session::new(ctx.config.defaults.to_settings()).with_recovery_dir(ctx.config_dir.clone());
    session.load(&path)?;
    Ok(session)
}

fn open_session(ctx: &Context, file: Option<&str>) -> Result<Session, Box<dyn std::error::Error>> {
    let session = load_session(ctx, file)?;
    if let Some(path) = session.path() {
        ctx.record(path);
    }
    Ok(session)
}

fn save_session(ctx: &Context, session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    session.save()?;
    if let Some(path) = session.path() {
        ctx.record(path);
    }
    Ok(())
}

/// Convert a 1-based number from the command line to an index
fn to_index(number: usize, what: &str) -> Result<usize, Box<dyn std::error::Error>> {
    number
        .checked_sub(1)
        .ok_or_else(|| format!("{} numbers start at 1", what).into())
}

/// Mark `TASK.SUB` references (1-based) as checked
fn apply_checks(session: &mut Session, refs: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    for r in refs {
        let (task, sub) = r
            .split_once('.')
            .and_then(|(t, s)| Some((t.trim().parse::<usize>().ok()?, s.trim().parse::<usize>().ok()?)))
            .ok_or_else(|| format!("invalid sub-task reference '{}' (expected TASK.SUB, e.g. 2.1)", r))?;
        let task_index = to_index(task, "task")?;
        let sub_index = to_index(sub, "sub-task")?;
        if session.is_checked(task_index, sub_index) {
            continue;
        }
        session
            .toggle_check(task_index, sub_index)
            .ok_or_else(|| format!("sub-task {} not found in task {}", sub, task))?;
    }
    Ok(())
}

fn parse_font_size(s: &str) -> Result<FontSize, Box<dyn std::error::Error>> {
    FontSize::from_token(s.trim())
        .ok_or_else(|| format!("unknown font size '{}' (expected: small, medium, large)", s).into())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_show(
    ctx: &Context,
    file: Option<&str>,
    args: ShowArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(ctx, file)?;
    apply_checks(&mut session, &args.checks)?;
    let doc = session.document();

    match args.task {
        Some(number) => {
            let index = to_index(number, "task")?;
            let task = doc
                .tasks
                .get(index)
                .ok_or_else(|| format!("task not found: {}", number))?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&task_to_json(&session, index, task))?
                );
            } else {
                for line in format_task_detail(&session, index, task) {
                    println!("{}", line);
                }
            }
        }
        None => {
            if json {
                println!("{}", serde_json::to_string_pretty(&document_to_json(&session))?);
            } else {
                for line in format_document(&session) {
                    println!("{}", line);
                }
            }
        }
    }
    Ok(())
}

fn cmd_search(
    ctx: &Context,
    file: Option<&str>,
    args: SearchArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(ctx, file)?;
    let re = Regex::new(&args.pattern)?;
    let doc = session.document();
    let hits = search::search_document(doc, &re);

    if json {
        let out: Vec<SearchHitJson> = hits.iter().map(|h| search_hit_to_json(doc, h)).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for hit in &hits {
            println!("{}", format_search_hit(doc, hit));
        }
    }
    Ok(())
}

fn cmd_check(ctx: &Context, file: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = resolve_path(ctx, file)?;
    let parsed = list_io::load_list(&path)?;
    let result = check::check_list(&parsed);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in format_check_result(&result) {
            println!("{}", line);
        }
    }

    if result.valid {
        Ok(())
    } else {
        Err(format!("{} error(s) in {}", result.errors.len(), path.display()).into())
    }
}

fn cmd_open(ctx: &Context, file: Option<&str>, args: TaskRef) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(ctx, file)?;
    let index = to_index(args.task, "task")?;
    let task = session
        .document()
        .tasks
        .get(index)
        .ok_or_else(|| format!("task not found: {}", args.task))?;
    let target = task
        .link
        .as_deref()
        .ok_or_else(|| format!("task {} has no link", args.task))?;

    // Failures are logged by the opener and are not an error here
    if let Some(opened) = link::open_link(target, ctx.config.links.opener.as_deref()) {
        println!("opened {}", opened);
    }
    Ok(())
}

fn cmd_recent(ctx: &Context, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let recent = recent::read_recent(&ctx.config_dir);
    if json {
        let out: Vec<RecentJson> = recent.files.iter().map(recent_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if recent.files.is_empty() {
        println!("no recent lists");
    } else {
        for entry in &recent.files {
            println!(
                "{}  {}",
                entry.last_opened.format("%Y-%m-%d %H:%M"),
                entry.path
            );
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &Context, file: Option<&str>, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(ctx, file)?;
    let doc = session.document_mut();
    let index = task_ops::add_task(doc, args.name, args.sub_tasks);
    if let Some(ref target) = args.link {
        task_ops::set_link(doc, index, target)?;
    }
    save_session(ctx, &mut session)?;
    println!("{}", index + 1);
    Ok(())
}

fn cmd_rm(ctx: &Context, file: Option<&str>, args: TaskRef) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(ctx, file)?;
    let index = to_index(args.task, "task")?;
    let removed = task_ops::remove_task(session.document_mut(), index)?;
    save_session(ctx, &mut session)?;
    println!("removed {}", format_task_line(index, &removed));
    Ok(())
}

fn cmd_rename(ctx: &Context, file: Option<&str>, args: RenameArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(ctx, file)?;
    let index = to_index(args.task, "task")?;
    task_ops::rename_task(session.document_mut(), index, args.name)?;
    save_session(ctx, &mut session)?;
    Ok(())
}

fn cmd_mv(ctx: &Context, file: Option<&str>, args: MvArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(ctx, file)?;
    let from = to_index(args.task, "task")?;
    let to = to_index(args.to, "position")?;
    task_ops::move_task(session.document_mut(), from, to)?;
    save_session(ctx, &mut session)?;
    Ok(())
}

fn cmd_sub(ctx: &Context, file: Option<&str>, args: SubCmd) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(ctx, file)?;
    match args.action {
        SubAction::Add { task, text } => {
            let index = to_index(task, "task")?;
            let sub = task_ops::add_sub_task(session.document_mut(), index, text)?;
            save_session(ctx, &mut session)?;
            println!("{}.{}", task, sub + 1);
        }
        SubAction::Edit { task, sub, text } => {
            let index = to_index(task, "task")?;
            let sub_index = to_index(sub, "sub-task")?;
            task_ops::edit_sub_task(session.document_mut(), index, sub_index, text)?;
            save_session(ctx, &mut session)?;
        }
        SubAction::Rm { task, sub } => {
            let index = to_index(task, "task")?;
            let sub_index = to_index(sub, "sub-task")?;
            let removed = task_ops::remove_sub_task(session.document_mut(), index, sub_index)?;
            save_session(ctx, &mut session)?;
            println!("removed {}", removed);
        }
    }
    Ok(())
}

fn cmd_color(ctx: &Context, file: Option<&str>, args: ColorArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.base.is_none() && args.selected.is_none() {
        return Err("nothing to change (use --base and/or --selected)".into());
    }
    let mut session = open_session(ctx, file)?;
    let index = to_index(args.task, "task")?;
    let doc = session.document_mut();
    if let Some(ref value) = args.base {
        task_ops::set_color(doc, index, ColorSlot::Base, value)?;
    }
    if let Some(ref value) = args.selected {
        task_ops::set_color(doc, index, ColorSlot::Selected, value)?;
    }
    save_session(ctx, &mut session)?;
    Ok(())
}

fn cmd_link(ctx: &Context, file: Option<&str>, args: LinkArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(ctx, file)?;
    let index = to_index(args.task, "task")?;
    let target = if args.clear {
        ""
    } else {
        args.link.as_deref().unwrap_or("")
    };
    task_ops::set_link(session.document_mut(), index, target)?;
    save_session(ctx, &mut session)?;
    Ok(())
}

fn cmd_settings(
    ctx: &Context,
    file: Option<&str>,
    args: SettingsArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(ctx, file)?;

    let changing = args.title.is_some() || args.font_size.is_some() || args.strikethrough.is_some();
    if changing {
        let font_size = args.font_size.as_deref().map(parse_font_size).transpose()?;
        let settings = &mut session.document_mut().settings;
        if let Some(title) = args.title {
            settings.title = title;
        }
        if let Some(size) = font_size {
            settings.font_size = size;
        }
        if let Some(flag) = args.strikethrough {
            settings.strikethrough = flag;
        }
        save_session(ctx, &mut session)?;
    }

    let settings = &session.document().settings;
    if json {
        println!("{}", serde_json::to_string_pretty(settings)?);
    } else {
        for line in format_settings(settings) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_reset(ctx: &Context, file: Option<&str>, args: ResetArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.checks {
        // Checks are never stored, so this only confirms the list opens
        let mut session = load_session(ctx, file)?;
        session.reset_checks();
        println!("checks are not saved; nothing to reset");
        return Ok(());
    }
    if !args.tasks {
        return Err("nothing to reset (use --checks or --tasks)".into());
    }
    if !args.yes {
        return Err("this deletes every task in the list; re-run with --yes to confirm".into());
    }

    let mut session = open_session(ctx, file)?;
    let count = session.document().tasks.len();
    session.reset_tasks();
    save_session(ctx, &mut session)?;
    println!("removed {} task(s)", count);
    Ok(())
}

fn cmd_save_as(ctx: &Context, file: Option<&str>, args: SaveAsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(ctx, file)?;
    let path = PathBuf::from(&args.path);
    session.save_as(&path)?;
    ctx.record(&path);
    println!("saved {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

fn cmd_config(ctx: &Context, args: ConfigCmd) -> Result<(), Box<dyn std::error::Error>> {
    match args.action {
        None => {
            for key in config_io::CONFIG_KEYS {
                let value = config_io::get_value(&ctx.config_dir, key)?;
                println!("{} = {}", key, value.unwrap_or_else(|| "(default)".to_string()));
            }
        }
        Some(ConfigAction::Get { key }) => match config_io::get_value(&ctx.config_dir, &key)? {
            Some(value) => println!("{}", value),
            None => println!("(default)"),
        },
        Some(ConfigAction::Set { key, value }) => {
            config_io::set_value(&ctx.config_dir, &key, &value)?;
        }
        Some(ConfigAction::Path) => {
            println!("{}", config_io::config_path(&ctx.config_dir).display());
        }
    }
    Ok(())
}

fn cmd_recovery(ctx: &Context, args: RecoveryArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if args.clear {
        if recovery::clear_recovery(&ctx.config_dir)? {
            println!("recovery log cleared");
        } else {
            println!("recovery log is empty");
        }
        return Ok(());
    }

    let entries = recovery::read_recovery_entries(&ctx.config_dir);
    if json {
        let out: Vec<serde_json::Value> = entries
            .iter()
            .map(|e| {
                serde_json::json!({
                    "timestamp": e.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                    "target": e.target,
                    "error": e.error,
                    "body": e.body,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if entries.is_empty() {
        println!("recovery log is empty");
    } else {
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                println!();
            }
            for line in format_recovery_entry(entry) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}
