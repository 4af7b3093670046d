use clap::Parser;

/// Command-line overrides for the demo assignment and display language.
/// Anything not given here falls back to environment variables, then to the
/// built-in demo configuration.
#[derive(Debug, Parser, Default)]
#[command(name = "assignment_submission_tui", version, about)]
pub struct Cli {
    /// Assignment title
    #[arg(long)]
    pub title: Option<String>,

    /// Assignment description
    #[arg(long)]
    pub description: Option<String>,

    /// Due date and time in UTC, "YYYY-MM-DD HH:MM"
    #[arg(long, value_name = "DATETIME")]
    pub due: Option<String>,

    /// Minutes from launch until the deadline (ignored when --due is given)
    #[arg(long, value_name = "MINUTES", conflicts_with = "due")]
    pub due_in: Option<i64>,

    /// Opened date and time in UTC, "YYYY-MM-DD HH:MM"
    #[arg(long, value_name = "DATETIME")]
    pub opened: Option<String>,

    /// Display language (en or fr), overriding host locale detection
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,
}
