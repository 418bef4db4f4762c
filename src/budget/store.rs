//! Defines the budget models and the in-memory budget store.

use crate::{Error, budget::reallocation::reallocate};

/// The budget for a single spending category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBudget {
    /// The category name, unique within the store.
    pub category: String,
    /// The budgeted amount for the category. Always >= 0.
    pub budget: f64,
    /// The display color used for this category in charts.
    pub color: &'static str,
    /// Essential categories never donate to or receive from reallocations.
    pub is_essential: bool,
}

/// The total monthly budget plus the ordered per-category budgets.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetState {
    /// The total monthly budget. Tracked independently of the category
    /// budgets; the two are never reconciled.
    pub monthly_budget: f64,
    /// The per-category budgets, in display order.
    pub category_budgets: Vec<CategoryBudget>,
}

/// The in-memory budget store.
///
/// The category set is seeded at creation and fixed for the lifetime of the
/// store. Category budgets are only ever mutated through
/// [BudgetStore::set_category_budget], which routes every change through the
/// reallocation engine.
#[derive(Debug)]
pub struct BudgetStore {
    state: BudgetState,
}

impl Default for BudgetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetStore {
    /// Create a budget store seeded with the default categories.
    pub fn new() -> Self {
        let category = |category: &str, budget: f64, color: &'static str, is_essential: bool| {
            CategoryBudget {
                category: category.to_owned(),
                budget,
                color,
                is_essential,
            }
        };

        Self {
            state: BudgetState {
                monthly_budget: 3700.0,
                category_budgets: vec![
                    category("Housing", 1200.0, "#0ea5e9", true),
                    category("Food", 500.0, "#10b981", true),
                    category("Transport", 300.0, "#f59e0b", false),
                    category("Entertainment", 200.0, "#8b5cf6", false),
                    category("Utilities", 200.0, "#06b6d4", true),
                    category("Other", 300.0, "#64748b", false),
                ],
            },
        }
    }

    /// The current total monthly budget and category budgets.
    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    /// Replace the total monthly budget. Does not touch category budgets.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if `amount` is negative, NaN or
    /// infinite, leaving the store unchanged.
    pub fn set_monthly_budget(&mut self, amount: f64) -> Result<(), Error> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidAmount(amount));
        }

        self.state.monthly_budget = amount;

        Ok(())
    }

    /// Set one category's budget, shifting the difference onto non-essential
    /// categories via the reallocation engine.
    ///
    /// The non-negative guard lives here at the store boundary; the engine
    /// itself does not validate `new_amount`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if `new_amount` is negative, NaN or infinite,
    /// - or [Error::CategoryNotFound] if `category` matches no seeded
    ///   category.
    ///
    /// The store is left unchanged on error.
    pub fn set_category_budget(&mut self, category: &str, new_amount: f64) -> Result<(), Error> {
        if !new_amount.is_finite() || new_amount < 0.0 {
            return Err(Error::InvalidAmount(new_amount));
        }

        reallocate(&mut self.state.category_budgets, category, new_amount)
    }
}
