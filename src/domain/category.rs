//! Category registry: the allowed labels per transaction kind.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::transaction::TransactionKind;

static DEFAULT_INCOME: Lazy<Vec<String>> = Lazy::new(|| {
    ["Salary", "Freelance", "Investments", "Other Income"]
        .map(String::from)
        .to_vec()
});

static DEFAULT_EXPENSE: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "Food",
        "Transport",
        "Housing",
        "Health",
        "Education",
        "Leisure",
        "Bills",
        "Shopping",
        "Other Expenses",
    ]
    .map(String::from)
    .to_vec()
});

/// Ordered, duplicate-free category names per kind.
///
/// Insertion order matters for display, so plain vectors rather than sets.
/// Name comparisons trim whitespace and ignore case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRegistry {
    income: Vec<String>,
    expense: Vec<String>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self {
            income: DEFAULT_INCOME.clone(),
            expense: DEFAULT_EXPENSE.clone(),
        }
    }
}

impl CategoryRegistry {
    /// An empty registry without the default labels.
    pub fn empty() -> Self {
        Self {
            income: Vec::new(),
            expense: Vec::new(),
        }
    }

    pub fn for_kind(&self, kind: TransactionKind) -> &[String] {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expense,
        }
    }

    fn for_kind_mut(&mut self, kind: TransactionKind) -> &mut Vec<String> {
        match kind {
            TransactionKind::Income => &mut self.income,
            TransactionKind::Expense => &mut self.expense,
        }
    }

    pub fn contains(&self, kind: TransactionKind, name: &str) -> bool {
        let wanted = normalized(name);
        self.for_kind(kind)
            .iter()
            .any(|existing| normalized(existing) == wanted)
    }

    /// Appends `name`, returning `false` when it is blank or already present.
    pub fn add(&mut self, kind: TransactionKind, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.contains(kind, trimmed) {
            return false;
        }
        self.for_kind_mut(kind).push(trimmed.to_string());
        true
    }

    /// Removes `name`, returning `false` when it was not present.
    pub fn remove(&mut self, kind: TransactionKind, name: &str) -> bool {
        let wanted = normalized(name);
        let names = self.for_kind_mut(kind);
        let before = names.len();
        names.retain(|existing| normalized(existing) != wanted);
        names.len() != before
    }
}

fn normalized(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_seeded_per_kind() {
        let registry = CategoryRegistry::default();
        assert!(registry.contains(TransactionKind::Income, "Salary"));
        assert!(registry.contains(TransactionKind::Expense, "Food"));
        assert!(!registry.contains(TransactionKind::Income, "Food"));
    }

    #[test]
    fn add_keeps_insertion_order_and_rejects_duplicates() {
        let mut registry = CategoryRegistry::empty();
        assert!(registry.add(TransactionKind::Expense, "Pets"));
        assert!(registry.add(TransactionKind::Expense, "Garden"));
        assert!(!registry.add(TransactionKind::Expense, "  pets "));
        assert_eq!(registry.for_kind(TransactionKind::Expense), ["Pets", "Garden"]);
    }

    #[test]
    fn add_rejects_blank_names() {
        let mut registry = CategoryRegistry::empty();
        assert!(!registry.add(TransactionKind::Income, "   "));
    }

    #[test]
    fn remove_reports_absence() {
        let mut registry = CategoryRegistry::default();
        assert!(registry.remove(TransactionKind::Expense, "food"));
        assert!(!registry.remove(TransactionKind::Expense, "Food"));
    }
}
