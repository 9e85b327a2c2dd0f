//! Read-only views over the transaction collection.
//!
//! Every function here is pure: the reference date or month is an explicit
//! parameter, nothing reads the wall clock, and the input list is never
//! mutated. Handlers pick the reference date once and pass it down, which
//! keeps these functions deterministic under test.

use time::{Date, Duration, Month};

use crate::money::Amount;

use super::core::{Category, Frequency, Transaction, TransactionKind};

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first date in the range.
    pub start: Date,
    /// The last date in the range.
    pub end: Date,
}

impl DateRange {
    /// Whether `date` falls within the range.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Income and expense sums for a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// The sum of all income amounts.
    pub income: Amount,
    /// The sum of all expense amounts, as a positive value.
    pub expenses: Amount,
}

impl Totals {
    /// Income minus expenses. Negative when the period spent more than it
    /// earned.
    pub fn balance(&self) -> Amount {
        self.income - self.expenses
    }
}

/// Transactions that share a calendar date, in input order.
#[derive(Debug, PartialEq)]
pub struct DayGroup<'a> {
    /// The date all the group's transactions fall on.
    pub date: Date,
    /// The transactions on that date.
    pub transactions: Vec<&'a Transaction>,
}

/// A category's share of one side of the ledger.
#[derive(Debug, PartialEq)]
pub struct CategoryShare {
    /// The category the share belongs to.
    pub category: Category,
    /// The summed amount for the category.
    pub total: Amount,
    /// The category's percentage of the kind's total, in `0.0..=100.0`.
    pub percent: f64,
}

/// Income, expenses, and net for one month of a trend window.
#[derive(Debug, PartialEq)]
pub struct MonthTotals {
    /// The first day of the month the totals cover.
    pub month: Date,
    /// The month's income and expense sums.
    pub totals: Totals,
}

/// The transactions relevant to the month containing `anchor`.
///
/// A transaction is included when it is dated within the month, or when it
/// recurs monthly. Recurring transactions appear in every month's view
/// exactly once, independent of their stored date.
pub fn month_set<'a>(transactions: &'a [Transaction], anchor: Date) -> Vec<&'a Transaction> {
    let range = month_bounds(anchor);

    transactions
        .iter()
        .filter(|transaction| {
            transaction.frequency == Frequency::Monthly || range.contains(transaction.date)
        })
        .collect()
}

/// Sum the incomes and expenses of `transactions`.
pub fn totals(transactions: &[&Transaction]) -> Totals {
    let mut totals = Totals::default();

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => totals.income += transaction.amount,
            TransactionKind::Expense => totals.expenses += transaction.amount,
        }
    }

    totals
}

/// Sum `transactions` by category, for the given side of the ledger.
///
/// Shares are sorted by total, largest first, with ties broken
/// alphabetically. When the kind's total is zero the result is empty, so
/// callers never divide by zero building percentage labels.
pub fn category_breakdown(
    transactions: &[&Transaction],
    kind: TransactionKind,
) -> Vec<CategoryShare> {
    let mut totals_by_category: Vec<(Category, Amount)> = Vec::new();

    for transaction in transactions {
        if transaction.kind != kind {
            continue;
        }

        match totals_by_category
            .iter_mut()
            .find(|(category, _)| *category == transaction.category)
        {
            Some((_, total)) => *total += transaction.amount,
            None => totals_by_category.push((transaction.category.clone(), transaction.amount)),
        }
    }

    let total: Amount = totals_by_category.iter().map(|(_, total)| *total).sum();
    if !total.is_positive() {
        return Vec::new();
    }

    let mut shares: Vec<CategoryShare> = totals_by_category
        .into_iter()
        .map(|(category, category_total)| CategoryShare {
            category,
            total: category_total,
            percent: category_total.cents() as f64 / total.cents() as f64 * 100.0,
        })
        .collect();

    shares.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });

    shares
}

/// The transactions dated within the week containing `today`.
///
/// Weeks run Sunday through Saturday; the window starts on the most recent
/// Sunday on or before `today`. Only the stored date matters here: the
/// weekly figures track what actually happened that week, so recurrence is
/// not consulted.
pub fn week_window<'a>(transactions: &'a [Transaction], today: Date) -> Vec<&'a Transaction> {
    let range = week_bounds(today);

    transactions
        .iter()
        .filter(|transaction| range.contains(transaction.date))
        .collect()
}

/// Group transactions into per-day buckets, newest day first.
///
/// The output dates are a strict descending sort of the distinct dates in
/// the input, and entries within a day keep their input order.
pub fn group_by_date<'a>(transactions: &[&'a Transaction]) -> Vec<DayGroup<'a>> {
    let mut groups: Vec<DayGroup<'a>> = Vec::new();

    for &transaction in transactions {
        match groups
            .iter_mut()
            .find(|group| group.date == transaction.date)
        {
            Some(group) => group.transactions.push(transaction),
            None => {
                let index = groups
                    .iter()
                    .position(|group| group.date < transaction.date)
                    .unwrap_or(groups.len());
                groups.insert(
                    index,
                    DayGroup {
                        date: transaction.date,
                        transactions: vec![transaction],
                    },
                );
            }
        }
    }

    groups
}

/// Totals for each of the six calendar months ending at the month containing
/// `anchor`, oldest first.
///
/// Each bucket applies the same inclusion rule as [month_set] scoped to that
/// bucket's month, so a monthly-recurring transaction contributes to every
/// bucket, including months before its stored date.
pub fn six_month_trend(transactions: &[Transaction], anchor: Date) -> Vec<MonthTotals> {
    let mut month = first_of_month(anchor);
    let mut months = Vec::with_capacity(6);

    for _ in 0..6 {
        months.push(month);
        month = previous_month(month);
    }
    months.reverse();

    months
        .into_iter()
        .map(|month| MonthTotals {
            month,
            totals: totals(&month_set(transactions, month)),
        })
        .collect()
}

/// The first through last day of the month containing `anchor`.
pub fn month_bounds(anchor: Date) -> DateRange {
    let start = first_of_month(anchor);
    let end = next_month(start) - Duration::days(1);

    DateRange { start, end }
}

/// The Sunday-through-Saturday week containing `anchor`.
pub fn week_bounds(anchor: Date) -> DateRange {
    let days_from_sunday = anchor.weekday().number_days_from_sunday() as i64;
    let start = anchor - Duration::days(days_from_sunday);

    DateRange {
        start,
        end: start + Duration::days(6),
    }
}

pub(crate) fn first_of_month(anchor: Date) -> Date {
    anchor.replace_day(1).unwrap()
}

pub(crate) fn previous_month(anchor: Date) -> Date {
    let (year, month) = match anchor.month() {
        Month::January => (anchor.year() - 1, Month::December),
        month => (anchor.year(), month.previous()),
    };

    Date::from_calendar_date(year, month, 1).unwrap()
}

pub(crate) fn next_month(anchor: Date) -> Date {
    let (year, month) = match anchor.month() {
        Month::December => (anchor.year() + 1, Month::January),
        month => (anchor.year(), month.next()),
    };

    Date::from_calendar_date(year, month, 1).unwrap()
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        money::Amount,
        transaction::{Frequency, Transaction, TransactionKind},
    };

    use super::{
        category_breakdown, group_by_date, month_bounds, month_set, six_month_trend, totals,
        week_bounds, week_window,
    };

    fn transaction(
        id: i64,
        kind: TransactionKind,
        cents: i64,
        category: &str,
        date: Date,
        frequency: Frequency,
    ) -> Transaction {
        Transaction::build(kind, Amount::from_cents(cents), date)
            .category(category)
            .frequency(frequency)
            .finalize(id)
            .expect("test transaction should be valid")
    }

    /// A once-off salary and grocery run in January plus a recurring
    /// utilities bill.
    fn example_transactions() -> Vec<Transaction> {
        vec![
            transaction(
                1,
                TransactionKind::Income,
                100_000,
                "Salary",
                date!(2024 - 01 - 01),
                Frequency::Once,
            ),
            transaction(
                2,
                TransactionKind::Expense,
                20_000,
                "Food",
                date!(2024 - 01 - 01),
                Frequency::Once,
            ),
            transaction(
                3,
                TransactionKind::Expense,
                5_000,
                "Utilities",
                date!(2024 - 01 - 10),
                Frequency::Monthly,
            ),
        ]
    }

    #[test]
    fn month_set_includes_dated_and_recurring_transactions() {
        let transactions = example_transactions();

        let january = month_set(&transactions, date!(2024 - 01 - 15));

        assert_eq!(january.len(), 3);
    }

    #[test]
    fn month_set_in_other_months_only_has_recurring_transactions() {
        let transactions = example_transactions();

        let february = month_set(&transactions, date!(2024 - 02 - 15));

        assert_eq!(february.len(), 1);
        assert_eq!(february[0].id, 3);
    }

    #[test]
    fn totals_match_worked_example() {
        let transactions = example_transactions();

        let january = totals(&month_set(&transactions, date!(2024 - 01 - 15)));
        assert_eq!(january.income, Amount::from_cents(100_000));
        assert_eq!(january.expenses, Amount::from_cents(25_000));
        assert_eq!(january.balance(), Amount::from_cents(75_000));

        let february = totals(&month_set(&transactions, date!(2024 - 02 - 15)));
        assert_eq!(february.income, Amount::ZERO);
        assert_eq!(february.expenses, Amount::from_cents(5_000));
        assert_eq!(february.balance(), Amount::from_cents(-5_000));
    }

    #[test]
    fn balance_is_income_minus_expenses() {
        let transactions = example_transactions();

        for anchor in [date!(2024 - 01 - 15), date!(2024 - 02 - 15)] {
            let month_totals = totals(&month_set(&transactions, anchor));
            assert_eq!(
                month_totals.balance(),
                month_totals.income - month_totals.expenses
            );
        }
    }

    #[test]
    fn breakdown_sums_each_category_with_percentages() {
        let transactions = vec![
            transaction(
                1,
                TransactionKind::Expense,
                7_500,
                "Food",
                date!(2024 - 01 - 02),
                Frequency::Once,
            ),
            transaction(
                2,
                TransactionKind::Expense,
                2_500,
                "Transport",
                date!(2024 - 01 - 03),
                Frequency::Once,
            ),
            transaction(
                3,
                TransactionKind::Income,
                100_000,
                "Salary",
                date!(2024 - 01 - 01),
                Frequency::Once,
            ),
        ];

        let subset = month_set(&transactions, date!(2024 - 01 - 15));
        let shares = category_breakdown(&subset, TransactionKind::Expense);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category.as_str(), "Food");
        assert_eq!(shares[0].total, Amount::from_cents(7_500));
        assert_eq!(shares[0].percent, 75.0);
        assert_eq!(shares[1].category.as_str(), "Transport");
        assert_eq!(shares[1].percent, 25.0);
    }

    #[test]
    fn breakdown_with_zero_total_is_empty() {
        // Only income present, so the expense side has a total of zero.
        let transactions = vec![transaction(
            1,
            TransactionKind::Income,
            100_000,
            "Salary",
            date!(2024 - 01 - 01),
            Frequency::Once,
        )];

        let subset = month_set(&transactions, date!(2024 - 01 - 15));

        assert_eq!(category_breakdown(&subset, TransactionKind::Expense), vec![]);
    }

    #[test]
    fn week_bounds_run_sunday_through_saturday() {
        // 2024-01-10 is a Wednesday.
        let range = week_bounds(date!(2024 - 01 - 10));

        assert_eq!(range.start, date!(2024 - 01 - 07));
        assert_eq!(range.end, date!(2024 - 01 - 13));
    }

    #[test]
    fn week_bounds_on_a_sunday_start_that_day() {
        let range = week_bounds(date!(2024 - 01 - 07));

        assert_eq!(range.start, date!(2024 - 01 - 07));
        assert_eq!(range.end, date!(2024 - 01 - 13));
    }

    #[test]
    fn week_window_ignores_recurrence() {
        let transactions = vec![
            transaction(
                1,
                TransactionKind::Expense,
                1_000,
                "Food",
                date!(2024 - 01 - 10),
                Frequency::Once,
            ),
            // Recurring, but dated outside the week.
            transaction(
                2,
                TransactionKind::Expense,
                5_000,
                "Housing",
                date!(2023 - 12 - 01),
                Frequency::Monthly,
            ),
        ];

        let week = week_window(&transactions, date!(2024 - 01 - 10));

        assert_eq!(week.len(), 1);
        assert_eq!(week[0].id, 1);
    }

    #[test]
    fn group_by_date_sorts_dates_descending_and_keeps_tie_order() {
        let transactions = vec![
            transaction(
                1,
                TransactionKind::Expense,
                100,
                "Food",
                date!(2024 - 01 - 10),
                Frequency::Once,
            ),
            transaction(
                2,
                TransactionKind::Expense,
                200,
                "Food",
                date!(2024 - 01 - 10),
                Frequency::Once,
            ),
            transaction(
                3,
                TransactionKind::Expense,
                300,
                "Food",
                date!(2024 - 01 - 05),
                Frequency::Once,
            ),
            transaction(
                4,
                TransactionKind::Expense,
                400,
                "Food",
                date!(2024 - 01 - 20),
                Frequency::Once,
            ),
        ];
        let subset: Vec<_> = transactions.iter().collect();

        let groups = group_by_date(&subset);

        let dates: Vec<_> = groups.iter().map(|group| group.date).collect();
        assert_eq!(
            dates,
            vec![
                date!(2024 - 01 - 20),
                date!(2024 - 01 - 10),
                date!(2024 - 01 - 05)
            ]
        );

        let tied_ids: Vec<_> = groups[1]
            .transactions
            .iter()
            .map(|transaction| transaction.id)
            .collect();
        assert_eq!(tied_ids, vec![1, 2]);
    }

    #[test]
    fn trend_covers_six_months_ending_at_the_anchor() {
        let transactions = example_transactions();

        let trend = six_month_trend(&transactions, date!(2024 - 03 - 15));

        let months: Vec<_> = trend.iter().map(|bucket| bucket.month).collect();
        assert_eq!(
            months,
            vec![
                date!(2023 - 10 - 01),
                date!(2023 - 11 - 01),
                date!(2023 - 12 - 01),
                date!(2024 - 01 - 01),
                date!(2024 - 02 - 01),
                date!(2024 - 03 - 01),
            ]
        );
    }

    #[test]
    fn recurring_transactions_appear_in_every_trend_bucket() {
        let transactions = example_transactions();

        let trend = six_month_trend(&transactions, date!(2024 - 03 - 15));

        // The subscription is dated January but counts everywhere, including
        // months before it was recorded.
        for bucket in &trend {
            assert!(
                bucket.totals.expenses >= Amount::from_cents(5_000),
                "want at least the recurring expense in {}, got {:?}",
                bucket.month,
                bucket.totals
            );
        }

        let january = &trend[3];
        assert_eq!(january.totals.income, Amount::from_cents(100_000));
        assert_eq!(january.totals.expenses, Amount::from_cents(25_000));
        assert_eq!(january.totals.balance(), Amount::from_cents(75_000));
    }

    #[test]
    fn month_bounds_handle_leap_february() {
        let range = month_bounds(date!(2024 - 02 - 15));

        assert_eq!(range.start, date!(2024 - 02 - 01));
        assert_eq!(range.end, date!(2024 - 02 - 29));
    }
}
