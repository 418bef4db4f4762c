//! Transaction data aggregation for charts and summaries.
//!
//! Provides functions to bucket transaction amounts by day, week or month
//! and to group expenses by category. Currency sums are only rounded at
//! these presentation boundaries, never while accumulating the raw ledger.

use std::collections::HashMap;

use serde::Deserialize;
use time::{Date, Duration, Month, Weekday};

use crate::transaction::{Transaction, TransactionKind};

/// The time period over which transactions are bucketed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    /// The last 7 calendar days, one bucket per day.
    Daily,
    /// The last 4 Sunday-to-Saturday weeks, one bucket per week.
    Weekly,
    /// The last 6 calendar months, one bucket per month.
    Monthly,
}

impl TimePeriod {
    /// Every period, in toggle-display order.
    pub const ALL: [TimePeriod; 3] = [TimePeriod::Daily, TimePeriod::Weekly, TimePeriod::Monthly];

    /// The lowercase form used in query strings and API payloads.
    pub fn as_query_value(self) -> &'static str {
        match self {
            TimePeriod::Daily => "daily",
            TimePeriod::Weekly => "weekly",
            TimePeriod::Monthly => "monthly",
        }
    }

    /// A capitalised label for display.
    pub fn label(self) -> &'static str {
        match self {
            TimePeriod::Daily => "Daily",
            TimePeriod::Weekly => "Weekly",
            TimePeriod::Monthly => "Monthly",
        }
    }
}

/// One time window of aggregated transaction amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodBucket {
    /// The display label for the bucket, e.g. "Mon", "Week 2" or "Jun".
    pub label: String,
    /// The first day of the bucket window, inclusive.
    pub start: Date,
    /// The last day of the bucket window, inclusive.
    pub end: Date,
    /// Total expense amount in the window, rounded to 2 decimal places.
    pub spent: f64,
    /// Total income amount in the window, rounded to 2 decimal places.
    pub income: f64,
}

/// Aggregates transaction amounts into the display buckets for `period`,
/// oldest bucket first.
///
/// - `Daily`: the last 7 calendar days ending with `today`, labelled with
///   short weekday names.
/// - `Weekly`: 4 Sunday-to-Saturday windows, found by walking back
///   28/21/14/7 days from `today` and snapping each anchor to its week's
///   Sunday, labelled "Week 1" to "Week 4".
/// - `Monthly`: the last 6 calendar months ending with the current month,
///   labelled with short month names.
pub fn bucketize(
    transactions: &[Transaction],
    period: TimePeriod,
    today: Date,
) -> Vec<PeriodBucket> {
    let windows: Vec<(String, Date, Date)> = match period {
        TimePeriod::Daily => (0..7)
            .rev()
            .map(|days_back| {
                let day = today - Duration::days(days_back);
                (weekday_abbrev(day.weekday()).to_owned(), day, day)
            })
            .collect(),
        TimePeriod::Weekly => [28, 21, 14, 7]
            .into_iter()
            .enumerate()
            .map(|(index, days_back)| {
                let start = sunday_of_week(today - Duration::days(days_back));
                let end = start + Duration::days(6);
                (format!("Week {}", index + 1), start, end)
            })
            .collect(),
        TimePeriod::Monthly => last_six_months(today)
            .into_iter()
            .map(|(year, month)| {
                let start = Date::from_calendar_date(year, month, 1)
                    .expect("the first of the month is always a valid date");
                let end = Date::from_calendar_date(year, month, last_day_of_month(year, month))
                    .expect("invalid month end date");
                (month_abbrev(month).to_owned(), start, end)
            })
            .collect(),
    };

    windows
        .into_iter()
        .map(|(label, start, end)| {
            let mut spent = 0.0;
            let mut income = 0.0;

            for transaction in transactions {
                if transaction.date < start || transaction.date > end {
                    continue;
                }

                match transaction.kind {
                    TransactionKind::Expense => spent += transaction.amount,
                    TransactionKind::Income => income += transaction.amount,
                }
            }

            PeriodBucket {
                label,
                start,
                end,
                spent: round_currency(spent),
                income: round_currency(income),
            }
        })
        .collect()
}

/// Groups expense amounts by category, sorted descending by total.
///
/// Each category total is rounded to 2 decimal places. Income transactions
/// are ignored. The first entry is the top spending category.
pub fn by_category(transactions: &[Transaction]) -> Vec<(String, f64)> {
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
    {
        *totals.entry(transaction.category.as_str()).or_insert(0.0) += transaction.amount;
    }

    let mut grouped: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(category, total)| (category.to_owned(), round_currency(total)))
        .collect();

    // Descending by total; ties broken by name so the order is stable.
    grouped.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    grouped
}

/// The window containing `today` for the given period: today itself, the
/// Sunday-to-Saturday week containing today, or the current calendar month.
///
/// Used by the summary generator, which reports on the current window
/// rather than the full chart history.
pub(crate) fn current_window(period: TimePeriod, today: Date) -> (Date, Date) {
    match period {
        TimePeriod::Daily => (today, today),
        TimePeriod::Weekly => {
            let start = sunday_of_week(today);
            (start, start + Duration::days(6))
        }
        TimePeriod::Monthly => {
            let (year, month) = (today.year(), today.month());
            let start = Date::from_calendar_date(year, month, 1)
                .expect("the first of the month is always a valid date");
            let end = Date::from_calendar_date(year, month, last_day_of_month(year, month))
                .expect("invalid month end date");
            (start, end)
        }
    }
}

/// Round a currency sum to 2 decimal places for display.
fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The Sunday that starts the week containing `date`.
fn sunday_of_week(date: Date) -> Date {
    date - Duration::days(date.weekday().number_days_from_sunday() as i64)
}

/// The last 6 (year, month) pairs ending with the month of `today`,
/// oldest first.
fn last_six_months(today: Date) -> Vec<(i32, Month)> {
    let mut months = Vec::with_capacity(6);
    let mut year = today.year();
    let mut month = today.month();

    for _ in 0..6 {
        months.push((year, month));

        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }

    months.reverse();
    months
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
