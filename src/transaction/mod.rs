//! Transaction management for the application.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the in-memory `TransactionStore`
//! - Endpoints for creating and deleting transactions
//! - The view handler for the transactions page

mod create_endpoint;
mod delete_endpoint;
mod store;
mod transactions_page;

pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use store::{
    DebtDetails, DebtKind, NewTransaction, Transaction, TransactionKind, TransactionStore,
};
pub use transactions_page::get_transactions_page;

pub(crate) use transactions_page::transaction_list_view;
