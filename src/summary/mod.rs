//! Spending summary generation.
//!
//! The summary collaborator turns aggregate totals into a short
//! natural-language sentence. It is deliberately deterministic: a fixed
//! per-period template referencing the total spent and the top category.
//! Swapping in a model-generated backend would only change the internals of
//! this module, not its contracts.

mod endpoint;
mod panel;

pub use endpoint::{SummaryRequest, SummaryResponse, generate_summary_endpoint};
pub use panel::get_summary_panel;
