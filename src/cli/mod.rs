//! Command-line front end: `smartspend_cli <command> [args]`.

pub mod args;
pub mod commands;
pub mod output;
pub mod render;

use strsim::levenshtein;

use crate::errors::{Result, SmartSpendError};

use args::CommandArgs;
use commands::CliContext;

type Handler = fn(&CliContext, &CommandArgs) -> Result<()>;

/// Name, usage line, handler.
const COMMANDS: &[(&str, &str, Handler)] = &[
    ("dashboard", "dashboard [--json]", commands::dashboard),
    (
        "add-expense",
        "add-expense <amount> <category> <description> [--date YYYY-MM-DD]",
        commands::add_expense,
    ),
    (
        "add-income",
        "add-income <amount> <source> [--date YYYY-MM-DD]",
        commands::add_income,
    ),
    (
        "add-investment",
        "add-investment <amount> <type> [--current-value N] [--date YYYY-MM-DD]",
        commands::add_investment,
    ),
    ("list-expenses", "list-expenses", commands::list_expenses),
    ("delete-expense", "delete-expense <id> [--yes]", commands::delete_expense),
    ("goals", "goals", commands::goals),
    (
        "goal-set",
        "goal-set <name> <target> [--saved N] [--date YYYY-MM-DD]",
        commands::goal_set,
    ),
    ("goal-add", "goal-add <name> <amount>", commands::goal_add),
    (
        "settings",
        "settings [--currency SAR|USD|INR|EUR|CAD] [--budget N]",
        commands::settings,
    ),
    (
        "settings-backup",
        "settings-backup [note]",
        commands::settings_backup,
    ),
    ("settings-backups", "settings-backups", commands::settings_backups),
    (
        "settings-restore",
        "settings-restore <number|name>",
        commands::settings_restore,
    ),
];

const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Runs one command from process arguments (program name excluded).
pub fn run<I, S>(argv: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut argv = argv.into_iter().map(Into::<String>::into);
    let Some(command) = argv.next() else {
        print_usage();
        return Err(SmartSpendError::input("no command given"));
    };

    match command.as_str() {
        "help" | "--help" | "-h" => {
            print_usage();
            return Ok(());
        }
        "version" | "--version" => return commands::version(),
        _ => {}
    }

    let Some((_, _, handler)) = COMMANDS.iter().find(|(name, _, _)| *name == command) else {
        let hint = suggest(&command)
            .map(|best| format!(" Did you mean `{best}`?"))
            .unwrap_or_default();
        return Err(SmartSpendError::Command(format!(
            "unknown command `{command}`.{hint}"
        )));
    };

    let args = CommandArgs::parse(argv)?;
    let ctx = CliContext::from_env()?;
    tracing::debug!(command = %command, "dispatching command");
    handler(&ctx, &args)
}

/// Closest known command name, if it is near enough to be a typo.
pub fn suggest(input: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .map(|(name, _, _)| *name)
        .chain(["help", "version"])
        .map(|name| (levenshtein(name, input), name))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}

pub fn print_usage() {
    let mut usage = String::from("Usage: smartspend_cli <command>\nCommands:\n");
    for (_, line, _) in COMMANDS {
        usage.push_str("  ");
        usage.push_str(line);
        usage.push('\n');
    }
    usage.push_str("  version\n  help");
    eprintln!("{usage}");
}
