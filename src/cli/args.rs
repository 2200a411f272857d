//! Minimal `positional --flag value` argument splitting.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::common::{parse_date_lenient, DATE_FORMAT};
use crate::errors::{Result, SmartSpendError};

/// Flags that never take a value.
const SWITCHES: &[&str] = &["yes", "json"];

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CommandArgs {
    positional: Vec<String>,
    options: HashMap<String, String>,
    switches: Vec<String>,
}

impl CommandArgs {
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = CommandArgs::default();
        let mut iter = args.into_iter().map(Into::<String>::into);
        while let Some(arg) = iter.next() {
            if !arg.starts_with("--") {
                parsed.positional.push(arg);
                continue;
            }
            let name = &arg[2..];
            if let Some((key, value)) = name.split_once('=') {
                parsed.options.insert(key.to_string(), value.to_string());
            } else if SWITCHES.contains(&name) {
                parsed.switches.push(name.to_string());
            } else {
                let value = iter
                    .next()
                    .ok_or_else(|| SmartSpendError::input(format!("`--{name}` needs a value")))?;
                parsed.options.insert(name.to_string(), value);
            }
        }
        Ok(parsed)
    }

    pub fn positional(&self, index: usize, what: &str) -> Result<&str> {
        self.positional
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| SmartSpendError::input(format!("missing {what}")))
    }

    /// Positional arguments from `index` on, joined by spaces.
    pub fn rest(&self, index: usize) -> String {
        self.positional
            .get(index..)
            .map(|words| words.join(" "))
            .unwrap_or_default()
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn switch(&self, name: &str) -> bool {
        self.switches.iter().any(|flag| flag == name)
    }

    pub fn amount(&self, index: usize, what: &str) -> Result<f64> {
        parse_number(self.positional(index, what)?, what)
    }

    pub fn option_amount(&self, name: &str) -> Result<Option<f64>> {
        self.option(name)
            .map(|raw| parse_number(raw, &format!("--{name}")))
            .transpose()
    }

    /// `--date` when given, else `today`.
    pub fn date_or(&self, name: &str, today: NaiveDate) -> Result<Option<NaiveDate>> {
        match self.option(name) {
            Some(raw) => parse_date_lenient(raw).map(Some).ok_or_else(|| {
                SmartSpendError::input(format!("`{raw}` is not a date in {DATE_FORMAT} form"))
            }),
            None => Ok(Some(today)),
        }
    }

    /// `--name` as a date; absent means no date.
    pub fn option_date(&self, name: &str) -> Result<Option<NaiveDate>> {
        match self.option(name) {
            Some(raw) => parse_date_lenient(raw).map(Some).ok_or_else(|| {
                SmartSpendError::input(format!("`{raw}` is not a date in {DATE_FORMAT} form"))
            }),
            None => Ok(None),
        }
    }
}

fn parse_number(raw: &str, what: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| SmartSpendError::input(format!("{what} must be a number, got `{raw}`")))
}
