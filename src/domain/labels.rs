//! Enum-like labels used by expense and investment records.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Spending categories offered by the expense form.
///
/// Labels read from disk that are not part of the known set are preserved as
/// [`ExpenseCategory::Custom`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpenseCategory {
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Health,
    Education,
    #[default]
    Other,
    Custom(String),
}

impl ExpenseCategory {
    pub const KNOWN: [ExpenseCategory; 8] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Shopping,
        ExpenseCategory::Bills,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Health,
        ExpenseCategory::Education,
        ExpenseCategory::Other,
    ];

    pub fn label(&self) -> &str {
        match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Bills => "Bills",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Health => "Health",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::Other => "Other",
            ExpenseCategory::Custom(label) => label,
        }
    }

    /// Matches known labels case-insensitively; anything else becomes `Custom`.
    /// A blank label maps to `Other`.
    pub fn from_label(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ExpenseCategory::Other;
        }
        Self::KNOWN
            .iter()
            .find(|known| known.label().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| ExpenseCategory::Custom(trimmed.to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ExpenseCategory::Custom(_))
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ExpenseCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ExpenseCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(ExpenseCategory::from_label(&value))
    }
}

/// Investment kinds offered by the investment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum InvestmentType {
    Stocks,
    MutualFunds,
    Crypto,
    Gold,
    RealEstate,
    #[default]
    Other,
    Custom(String),
}

impl InvestmentType {
    pub const KNOWN: [InvestmentType; 6] = [
        InvestmentType::Stocks,
        InvestmentType::MutualFunds,
        InvestmentType::Crypto,
        InvestmentType::Gold,
        InvestmentType::RealEstate,
        InvestmentType::Other,
    ];

    pub fn label(&self) -> &str {
        match self {
            InvestmentType::Stocks => "Stocks",
            InvestmentType::MutualFunds => "Mutual Funds",
            InvestmentType::Crypto => "Crypto",
            InvestmentType::Gold => "Gold",
            InvestmentType::RealEstate => "Real Estate",
            InvestmentType::Other => "Other",
            InvestmentType::Custom(label) => label,
        }
    }

    /// Matches known labels ignoring case, spaces, and dashes ("mutual-funds" == "Mutual Funds").
    pub fn from_label(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return InvestmentType::Other;
        }
        let wanted = squash(trimmed);
        Self::KNOWN
            .iter()
            .find(|known| squash(known.label()) == wanted)
            .cloned()
            .unwrap_or_else(|| InvestmentType::Custom(trimmed.to_string()))
    }
}

fn squash(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for InvestmentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for InvestmentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(InvestmentType::from_label(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_labels_are_case_insensitive_and_preserve_unknowns() {
        assert_eq!(ExpenseCategory::from_label("food"), ExpenseCategory::Food);
        assert_eq!(ExpenseCategory::from_label(""), ExpenseCategory::Other);
        let custom = ExpenseCategory::from_label("Pets");
        assert_eq!(custom, ExpenseCategory::Custom("Pets".into()));
        assert_eq!(custom.to_string(), "Pets");
        assert!(!custom.is_known());
    }

    #[test]
    fn defaults_are_other() {
        assert_eq!(ExpenseCategory::default(), ExpenseCategory::Other);
        assert_eq!(InvestmentType::default(), InvestmentType::Other);
    }

    #[test]
    fn investment_labels_ignore_spacing() {
        assert_eq!(
            InvestmentType::from_label("mutual-funds"),
            InvestmentType::MutualFunds
        );
        assert_eq!(
            InvestmentType::from_label("RealEstate"),
            InvestmentType::RealEstate
        );
        assert_eq!(InvestmentType::MutualFunds.to_string(), "Mutual Funds");
    }
}
