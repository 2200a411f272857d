//! One handler per CLI command. Each loads what it needs, applies a core
//! operation, and writes back with the revision it loaded.

use chrono::{Local, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Confirm};
use uuid::Uuid;

use crate::{
    config::{Settings, SettingsManager},
    core::{
        services::{GoalAllocator, RecordService, TotalsService, UpsertOutcome},
        Dashboard,
    },
    currency::{format_amount, Currency},
    domain::{Displayable, ExpenseCategory, InvestmentType},
    errors::{Result, SmartSpendError},
    storage::{CsvStorage, RecordStorage, Snapshot},
    utils::{build_info, paths},
};

use super::{args::CommandArgs, output, render};

/// Storage and settings resolved for one invocation.
pub struct CliContext {
    pub storage: CsvStorage,
    pub settings: SettingsManager,
    pub today: NaiveDate,
}

impl CliContext {
    pub fn from_env() -> Result<Self> {
        let root = paths::app_data_dir();
        let storage = CsvStorage::new(Some(root.clone()), None)?;
        storage.ensure_files()?;
        Ok(Self {
            storage,
            settings: SettingsManager::with_base_dir(&root)?,
            today: Local::now().date_naive(),
        })
    }

    fn load_settings(&self) -> Result<Settings> {
        Ok(self.settings.load()?)
    }
}

pub fn dashboard(ctx: &CliContext, args: &CommandArgs) -> Result<()> {
    let settings = ctx.load_settings()?;
    let snapshot = Snapshot::load(&ctx.storage)?;
    let view = Dashboard::build(&snapshot.data, &settings, ctx.today);
    if args.switch("json") {
        let json = serde_json::to_string_pretty(&view)
            .map_err(|err| SmartSpendError::Command(err.to_string()))?;
        println!("{json}");
    } else {
        render::dashboard(&view);
    }
    Ok(())
}

/// `add-expense <amount> <category> <description...> [--date D]`
pub fn add_expense(ctx: &CliContext, args: &CommandArgs) -> Result<()> {
    let amount = args.amount(0, "amount")?;
    let category = ExpenseCategory::from_label(args.positional(1, "category")?);
    let description = args.rest(2);
    let record = RecordService::new_expense(
        args.date_or("date", ctx.today)?,
        category,
        &description,
        amount,
    )?;

    let mut table = ctx.storage.load_expenses()?;
    table.rows.push(record.clone());
    ctx.storage.save_expenses(&table.rows, Some(table.revision))?;

    let currency = ctx.load_settings()?.currency;
    output::success(format!(
        "Added expense {} for {} ({})",
        record.description,
        format_amount(record.amount, currency),
        record.category
    ));
    Ok(())
}

/// `add-income <amount> <source...> [--date D]`
pub fn add_income(ctx: &CliContext, args: &CommandArgs) -> Result<()> {
    let amount = args.amount(0, "amount")?;
    let source = args.rest(1);
    let record = RecordService::new_income(args.date_or("date", ctx.today)?, &source, amount)?;

    let mut table = ctx.storage.load_incomes()?;
    table.rows.push(record.clone());
    ctx.storage.save_incomes(&table.rows, Some(table.revision))?;

    let currency = ctx.load_settings()?.currency;
    output::success(format!(
        "Added income from {} for {}",
        record.source,
        format_amount(record.amount, currency)
    ));
    Ok(())
}

/// `add-investment <amount> <type...> [--current-value N] [--date D]`
pub fn add_investment(ctx: &CliContext, args: &CommandArgs) -> Result<()> {
    let amount = args.amount(0, "amount")?;
    let kind = InvestmentType::from_label(&args.rest(1));
    let record = RecordService::new_investment(
        args.date_or("date", ctx.today)?,
        kind,
        amount,
        args.option_amount("current-value")?,
    )?;

    let mut table = ctx.storage.load_investments()?;
    table.rows.push(record.clone());
    ctx.storage.save_investments(&table.rows, Some(table.revision))?;

    let currency = ctx.load_settings()?.currency;
    output::success(format!(
        "Added {} investment of {} (now worth {})",
        record.kind,
        format_amount(record.amount, currency),
        format_amount(record.effective_value(), currency)
    ));
    Ok(())
}

pub fn list_expenses(ctx: &CliContext, _args: &CommandArgs) -> Result<()> {
    let table = ctx.storage.load_expenses()?;
    // Ids handed out on load must be stored before they are shown.
    if table.needs_migration() {
        ctx.storage.save_expenses(&table.rows, Some(table.revision))?;
        tracing::info!(assigned = table.assigned_ids, "stored ids for legacy expense rows");
    }
    let currency = ctx.load_settings()?.currency;
    output::section("Expenses");
    render::expenses(&table.rows, currency);
    Ok(())
}

/// `delete-expense <id> [--yes]`
pub fn delete_expense(ctx: &CliContext, args: &CommandArgs) -> Result<()> {
    let raw = args.positional(0, "expense id")?;
    let id = Uuid::parse_str(raw)
        .map_err(|_| SmartSpendError::input(format!("`{raw}` is not an expense id")))?;

    let mut table = ctx.storage.load_expenses()?;
    let target = table
        .rows
        .iter()
        .find(|row| row.id == id)
        .map(|row| format!("{} ({:.2})", row.description, row.amount));
    let Some(target) = target else {
        return Err(crate::core::FinanceError::RecordNotFound(id).into());
    };

    if !args.switch("yes") {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete expense {target}?"))
            .default(false)
            .interact()?;
        if !confirmed {
            output::info("Nothing deleted.");
            return Ok(());
        }
    }

    let removed = RecordService::delete_expense(&mut table.rows, id)?;
    ctx.storage.save_expenses(&table.rows, Some(table.revision))?;
    output::success(format!("Deleted expense {}", removed.description));
    Ok(())
}

pub fn goals(ctx: &CliContext, _args: &CommandArgs) -> Result<()> {
    let settings = ctx.load_settings()?;
    let snapshot = Snapshot::load(&ctx.storage)?;
    let data = &snapshot.data;
    let totals = TotalsService::compute(&data.incomes, &data.expenses, &data.investments);
    output::section("Goals");
    render::goals(&data.goals, &GoalAllocator::from_totals(&totals), settings.currency);
    Ok(())
}

/// `goal-set <name> <target> [--saved N] [--date D]`
pub fn goal_set(ctx: &CliContext, args: &CommandArgs) -> Result<()> {
    let name = args.positional(0, "goal name")?;
    let target = args.amount(1, "target amount")?;
    let saved = args.option_amount("saved")?.unwrap_or(0.0);

    let mut table = ctx.storage.load_goals()?;
    let target_date = args.option_date("date")?;
    let outcome = RecordService::upsert_goal(&mut table.rows, name, target, saved, target_date)?;
    ctx.storage.save_goals(&table.rows, Some(table.revision))?;

    match outcome {
        UpsertOutcome::Created => output::success(format!("Created goal {}", name.trim())),
        UpsertOutcome::Updated => output::success(format!("Updated goal {}", name.trim())),
    }
    Ok(())
}

/// `goal-add <name> <amount>`
pub fn goal_add(ctx: &CliContext, args: &CommandArgs) -> Result<()> {
    let name = args.positional(0, "goal name")?;
    let amount = args.amount(1, "amount")?;

    let settings = ctx.load_settings()?;
    let mut snapshot = Snapshot::load(&ctx.storage)?;
    let data = &mut snapshot.data;
    let totals = TotalsService::compute(&data.incomes, &data.expenses, &data.investments);
    let result = GoalAllocator::from_totals(&totals).allocate(&mut data.goals, name, amount);

    let Some(goal) = result.updated_goal else {
        let reason = result
            .reason
            .map(|reason| reason.to_string())
            .unwrap_or_else(|| "allocation rejected".into());
        return Err(SmartSpendError::Command(reason));
    };
    ctx.storage
        .save_goals(&data.goals, Some(snapshot.revisions.goals))?;
    output::success(format!(
        "Added {} to {}. Remaining savings: {}",
        format_amount(amount, settings.currency),
        goal.display_label(),
        format_amount(result.remaining_savings, settings.currency)
    ));
    Ok(())
}

/// `settings [--currency C] [--budget N]`
pub fn settings(ctx: &CliContext, args: &CommandArgs) -> Result<()> {
    let mut settings = ctx.load_settings()?;
    let mut changed = false;
    if let Some(code) = args.option("currency") {
        settings.currency = code
            .parse::<Currency>()
            .map_err(|err| SmartSpendError::input(err.to_string()))?;
        changed = true;
    }
    if let Some(budget) = args.option_amount("budget")? {
        settings.set_monthly_budget(budget)?;
        changed = true;
    }
    if changed {
        ctx.settings.save(&settings)?;
        output::success("Settings saved.");
    }

    output::section("Settings");
    output::field("Currency", settings.currency);
    let budget = if settings.budget_is_set() {
        format_amount(settings.monthly_budget, settings.currency)
    } else {
        "not set".to_string()
    };
    output::field("Monthly budget", budget);
    output::field("Theme", &settings.theme);
    Ok(())
}

/// `settings-backup [note]`
pub fn settings_backup(ctx: &CliContext, args: &CommandArgs) -> Result<()> {
    let settings = ctx.load_settings()?;
    let note = args.rest(0);
    let file_name = ctx.settings.backup(&settings, Some(note.as_str()))?;
    output::success(format!("Settings backup saved: {file_name}"));
    Ok(())
}

/// `settings-backups`
pub fn settings_backups(ctx: &CliContext, _args: &CommandArgs) -> Result<()> {
    let backups = ctx.settings.list_backups()?;
    if backups.is_empty() {
        output::warning("No settings backups found.");
        return Ok(());
    }
    output::section("Settings backups");
    for (idx, name) in backups.iter().enumerate() {
        println!("  {:>2}. {name}", idx + 1);
    }
    Ok(())
}

/// `settings-restore <number|name>`; numbers follow `settings-backups` order.
pub fn settings_restore(ctx: &CliContext, args: &CommandArgs) -> Result<()> {
    let reference = args.positional(0, "backup number or name")?;
    let backups = ctx.settings.list_backups()?;
    let target = resolve_backup(&backups, reference)?;
    let restored = ctx.settings.restore(target)?;
    output::success(format!(
        "Restored settings from {target} (currency {}).",
        restored.currency
    ));
    Ok(())
}

fn resolve_backup<'a>(backups: &'a [String], reference: &str) -> Result<&'a str> {
    if backups.is_empty() {
        return Err(SmartSpendError::Command("no settings backups available".into()));
    }
    let found = match reference.parse::<usize>() {
        Ok(index) => index.checked_sub(1).and_then(|idx| backups.get(idx)),
        Err(_) => backups.iter().find(|name| name.contains(reference)),
    };
    found
        .map(String::as_str)
        .ok_or_else(|| SmartSpendError::input(format!("no settings backup matches `{reference}`")))
}

pub fn version() -> Result<()> {
    println!("{}", build_info::current().summary());
    Ok(())
}
