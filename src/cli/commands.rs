use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ckl", about = concat!("checklist v", env!("CARGO_PKG_VERSION"), " - to-do lists in plain text"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// List file to work on (default: the most recently used one)
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new, empty list file
    New(NewArgs),
    /// Show the list, or one task
    Show(ShowArgs),
    /// Add a task at the end of the list
    Add(AddArgs),
    /// Delete a task
    Rm(TaskRef),
    /// Change a task's name
    Rename(RenameArgs),
    /// Move a task to another position
    Mv(MvArgs),
    /// Add, edit or remove sub-tasks
    Sub(SubCmd),
    /// Set a task's title or checked color
    Color(ColorArgs),
    /// Set or clear a task's link
    Link(LinkArgs),
    /// Open a task's link (file or URL)
    Open(TaskRef),
    /// Show or change the list settings
    Settings(SettingsArgs),
    /// Search names, sub-tasks and links by regex
    Search(SearchArgs),
    /// Validate the list file
    Check,
    /// Remove all tasks, or reset checks
    Reset(ResetArgs),
    /// Save the list under a new path and switch to it
    SaveAs(SaveAsArgs),
    /// List recently used files
    Recent,
    /// View or change configuration
    Config(ConfigCmd),
    /// View or clear the recovery log
    Recovery(RecoveryArgs),
}

// ---------------------------------------------------------------------------
// Document commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct NewArgs {
    /// Path of the list file to create
    pub path: String,
    /// List title (default: from config)
    #[arg(long)]
    pub title: Option<String>,
    /// Font size: small, medium or large
    #[arg(long)]
    pub font_size: Option<String>,
    /// Do not strike through checked sub-tasks
    #[arg(long)]
    pub no_strikethrough: bool,
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task number (default: the whole list)
    pub task: Option<usize>,
    /// Show a sub-task as checked, e.g. `2.1` (repeatable; not saved)
    #[arg(long = "check", short = 'c', value_name = "TASK.SUB")]
    pub checks: Vec<String>,
}

#[derive(Args)]
pub struct SaveAsArgs {
    /// Destination path
    pub path: String,
}

#[derive(Args)]
pub struct ResetArgs {
    /// Uncheck all sub-tasks
    #[arg(long, conflicts_with = "tasks")]
    pub checks: bool,
    /// Delete every task from the list
    #[arg(long)]
    pub tasks: bool,
    /// Confirm deleting tasks
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args)]
pub struct SettingsArgs {
    /// New list title
    #[arg(long)]
    pub title: Option<String>,
    /// Font size: small, medium or large
    #[arg(long)]
    pub font_size: Option<String>,
    /// Strike through checked sub-tasks (true/false)
    #[arg(long)]
    pub strikethrough: Option<bool>,
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TaskRef {
    /// Task number (1-based)
    pub task: usize,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task name
    pub name: String,
    /// Sub-task text (repeatable)
    #[arg(long = "sub", short = 's')]
    pub sub_tasks: Vec<String>,
    /// File path or URL to attach
    #[arg(long)]
    pub link: Option<String>,
}

#[derive(Args)]
pub struct RenameArgs {
    /// Task number
    pub task: usize,
    /// New name
    pub name: String,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task number
    pub task: usize,
    /// New position (1-based)
    pub to: usize,
}

#[derive(Args)]
pub struct ColorArgs {
    /// Task number
    pub task: usize,
    /// Title color (#RRGGBB, #RGB or default)
    #[arg(long)]
    pub base: Option<String>,
    /// Checked sub-task color (#RRGGBB, #RGB or default)
    #[arg(long)]
    pub selected: Option<String>,
}

#[derive(Args)]
pub struct LinkArgs {
    /// Task number
    pub task: usize,
    /// File path or URL (omit with --clear)
    #[arg(required_unless_present = "clear")]
    pub link: Option<String>,
    /// Remove the link
    #[arg(long, conflicts_with = "link")]
    pub clear: bool,
}

#[derive(Args)]
pub struct SubCmd {
    #[command(subcommand)]
    pub action: SubAction,
}

#[derive(Subcommand)]
pub enum SubAction {
    /// Append a sub-task
    Add {
        /// Task number
        task: usize,
        /// Sub-task text
        text: String,
    },
    /// Change a sub-task's text
    Edit {
        /// Task number
        task: usize,
        /// Sub-task number
        sub: usize,
        /// New text
        text: String,
    },
    /// Remove a sub-task
    Rm {
        /// Task number
        task: usize,
        /// Sub-task number
        sub: usize,
    },
}

#[derive(Args)]
pub struct SearchArgs {
    /// Regex pattern
    pub pattern: String,
}

// ---------------------------------------------------------------------------
// Config and maintenance
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print a config value
    Get {
        /// Dotted key, e.g. defaults.title
        key: String,
    },
    /// Set a config value
    Set {
        /// Dotted key, e.g. defaults.font_size
        key: String,
        /// New value
        value: String,
    },
    /// Print the config file location
    Path,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// Delete the recovery log
    #[arg(long)]
    pub clear: bool,
}
