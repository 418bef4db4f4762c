//! Defines the core transaction model and the in-memory transaction store.

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction is money spent or money earned.
///
/// Amounts are always non-negative; the direction is carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money spent.
    Expense,
    /// Money earned.
    Income,
}

/// The kind of debt a debt payment goes towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DebtKind {
    /// Credit card debt.
    CreditCard,
    /// A car or other vehicle loan.
    Vehicle,
    /// A mortgage.
    Home,
    /// A personal loan.
    PersonalLoan,
}

impl DebtKind {
    /// A human-readable label for the debt kind.
    pub fn label(self) -> &'static str {
        match self {
            DebtKind::CreditCard => "Credit Card",
            DebtKind::Vehicle => "Vehicle",
            DebtKind::Home => "Home",
            DebtKind::PersonalLoan => "Personal Loan",
        }
    }
}

/// Extra detail recorded against a debt payment transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtDetails {
    /// The kind of debt the payment goes towards.
    pub debt_kind: DebtKind,
    /// The minimum payment due each period.
    pub minimum_payment: f64,
    /// The interest rate on the debt, as a percentage.
    pub interest_rate: f64,
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are immutable once created; the only way to get rid of one is
/// to delete it. To create a `Transaction`, pass a [NewTransaction] to
/// [TransactionStore::add].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The opaque identifier of the transaction, unique within the store.
    pub id: String,
    /// When the transaction happened. A calendar date, no time component.
    pub date: Date,
    /// The amount of money spent or earned in this transaction. Always >= 0.
    pub amount: f64,
    /// The category the transaction belongs to, e.g. "Food".
    pub category: String,
    /// Free-text notes describing the transaction.
    pub notes: String,
    /// Whether this is money spent or money earned.
    pub kind: TransactionKind,
    /// Creation sequence number, monotonically increasing across the
    /// lifetime of the store. Newer transactions have larger values.
    pub timestamp: u64,
    /// Extra detail for debt payments.
    pub debt_details: Option<DebtDetails>,
}

/// The user-supplied fields of a transaction, before the store assigns an
/// identifier and creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// When the transaction happened.
    pub date: Date,
    /// The amount of money spent or earned. Must be a finite number >= 0.
    pub amount: f64,
    /// The category the transaction belongs to. Must not be empty.
    pub category: String,
    /// Free-text notes describing the transaction.
    pub notes: String,
    /// Whether this is money spent or money earned.
    pub kind: TransactionKind,
    /// Extra detail for debt payments.
    pub debt_details: Option<DebtDetails>,
}

impl NewTransaction {
    /// Shortcut for building a plain transaction with no notes or debt detail.
    pub fn new(date: Date, amount: f64, category: &str, kind: TransactionKind) -> Self {
        Self {
            date,
            amount,
            category: category.to_owned(),
            notes: String::new(),
            kind,
            debt_details: None,
        }
    }

    /// Set the notes for the transaction.
    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_owned();
        self
    }

    /// Set the debt details for the transaction.
    pub fn debt_details(mut self, debt_details: Option<DebtDetails>) -> Self {
        self.debt_details = debt_details;
        self
    }
}

// ============================================================================
// STORE
// ============================================================================

/// An in-memory, newest-first collection of transactions.
///
/// The store lives for the duration of one server process and is only
/// mutated in response to discrete user actions.
#[derive(Debug, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    next_sequence: u64,
}

impl TransactionStore {
    /// Create an empty transaction store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a few sample transactions dated relative
    /// to `today`, for first-run demo data.
    pub fn with_sample_data(today: Date) -> Self {
        let mut store = Self::new();
        let yesterday = today - Duration::days(1);
        let two_days_ago = today - Duration::days(2);

        let seeds = [
            NewTransaction::new(two_days_ago, 52.0, "Transport", TransactionKind::Expense)
                .notes("Gas Station"),
            NewTransaction::new(yesterday, 3200.0, "Income", TransactionKind::Income)
                .notes("Monthly Salary"),
            NewTransaction::new(yesterday, 45.99, "Food", TransactionKind::Expense)
                .notes("Grocery Store"),
        ];

        for seed in seeds {
            store
                .add(seed)
                .expect("sample transactions are always valid");
        }

        store
    }

    /// Validate and store a new transaction.
    ///
    /// Assigns a fresh unique identifier and a monotonically non-decreasing
    /// creation timestamp, then prepends the record so the collection stays
    /// newest-first. Returns the stored record.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if the amount is negative, NaN or infinite,
    /// - or [Error::EmptyCategory] if the category is empty or whitespace.
    ///
    /// The store is left unchanged when validation fails.
    pub fn add(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        if !new_transaction.amount.is_finite() || new_transaction.amount < 0.0 {
            return Err(Error::InvalidAmount(new_transaction.amount));
        }

        if new_transaction.category.trim().is_empty() {
            return Err(Error::EmptyCategory);
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let transaction = Transaction {
            id: format!("txn-{sequence}"),
            date: new_transaction.date,
            amount: new_transaction.amount,
            category: new_transaction.category,
            notes: new_transaction.notes,
            kind: new_transaction.kind,
            timestamp: sequence,
            debt_details: new_transaction.debt_details,
        };

        self.transactions.insert(0, transaction.clone());

        Ok(transaction)
    }

    /// Remove the transaction with the matching identifier.
    ///
    /// Deleting an identifier that is not in the store is a silent no-op,
    /// not an error: the end state is the same either way.
    pub fn delete(&mut self, id: &str) {
        self.transactions.retain(|transaction| transaction.id != id);
    }

    /// All transactions, newest-first by insertion order (not by date field).
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }
}

// ============================================================================
// TESTS
// ============================================================================
