//! The budget reallocation engine.
//!
//! When a user sets a new budget for one category, the pool of money across
//! categories is kept roughly stable by shifting the difference to or from
//! the **non-essential** categories, in a fixed priority order. The user's
//! requested change to the target category is always applied in full, even
//! when the other categories cannot absorb or supply the whole difference.

use crate::{Error, budget::CategoryBudget};

/// The fixed order in which non-essential categories donate to or receive
/// from a reallocation.
const DONOR_PRIORITY: [&str; 3] = ["Entertainment", "Transport", "Other"];

/// Set `target`'s budget to `new_amount` and redistribute the difference
/// across the non-essential categories.
///
/// A *reduction* frees money: the first eligible category in the priority
/// order absorbs the entire freed amount (it is not split). If no category
/// is eligible the freed amount is simply dropped.
///
/// An *increase* draws money: each eligible category in turn is drained by
/// up to its full budget, never below zero, until the increase is covered.
/// Any shortfall left after the last donor is not recovered; the target
/// still gets its full increase.
///
/// A category is eligible when it appears in the priority order, is flagged
/// non-essential and is not the target itself.
///
/// This function does not validate `new_amount`; callers are expected to
/// reject negative amounts before delegating here.
///
/// # Errors
/// Returns [Error::CategoryNotFound] if `target` matches no entry in
/// `categories`, in which case nothing is mutated.
pub(crate) fn reallocate(
    categories: &mut [CategoryBudget],
    target: &str,
    new_amount: f64,
) -> Result<(), Error> {
    let target_index = categories
        .iter()
        .position(|c| c.category == target)
        .ok_or_else(|| Error::CategoryNotFound(target.to_owned()))?;

    let old_amount = categories[target_index].budget;
    let delta = old_amount - new_amount;

    // Applied before redistribution, and regardless of whether the
    // redistribution below manages to move the full amount.
    categories[target_index].budget = new_amount;

    if delta > 0.0 {
        // The budget was reduced: the first eligible category absorbs the
        // entire freed amount.
        for donor in DONOR_PRIORITY {
            if donor == target {
                continue;
            }

            if let Some(recipient) = eligible_category(categories, donor) {
                recipient.budget += delta;
                break;
            }
        }
    } else if delta < 0.0 {
        // The budget was increased: draw the difference from the eligible
        // categories in turn, never driving any of them negative.
        let mut needed = delta.abs();

        for donor in DONOR_PRIORITY {
            if needed <= 0.0 {
                break;
            }

            if donor == target {
                continue;
            }

            if let Some(donor) = eligible_category(categories, donor) {
                let available = needed.min(donor.budget);
                donor.budget -= available;
                needed -= available;
            }
        }
    }

    Ok(())
}

fn eligible_category<'a>(
    categories: &'a mut [CategoryBudget],
    name: &str,
) -> Option<&'a mut CategoryBudget> {
    categories
        .iter_mut()
        .find(|c| c.category == name && !c.is_essential)
}
