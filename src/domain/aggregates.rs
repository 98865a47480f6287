//! One-pass derivations over a customer view. Built once per pipeline run and
//! shared read-only with every scenario, so no scenario ever needs a second
//! pass over the raw rows.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::domain::{CustomerView, Money, TransferType, category};

const TOP_CATEGORIES: usize = 5;

/// Year-month bucket key, displayed as `yyyy-mm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub(crate) fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Immutable precomputed derivatives over one [`CustomerView`].
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    total_spend: Money,
    by_category_sum: HashMap<&'static str, Money>,
    by_category_count: HashMap<&'static str, u32>,
    top_by_amount: Vec<(&'static str, Money)>,
    top_by_count: Vec<(&'static str, u32)>,
    monthly_spend: BTreeMap<YearMonth, Money>,
    monthly_deposits: BTreeMap<YearMonth, Money>,
    category_months: HashMap<&'static str, BTreeSet<YearMonth>>,
    transfer_type_sum: HashMap<TransferType, Money>,
    transfer_type_count: HashMap<TransferType, u32>,
    transfer_type_months: HashMap<TransferType, BTreeSet<YearMonth>>,
    months_observed: BTreeSet<YearMonth>,
    in_sum: Money,
    out_sum: Money,
    fx_count: u32,
    fx_sum: Money,
    fx_currencies: HashMap<String, u32>,
    accumulation_count: u32,
    credit_activity_count: u32,
    income_count: u32,
    income_sum: Money,
    salary_in_total: Money,
    salary_in_count: u32,
    transaction_count: u32,
    transfer_count: u32,
    window_days: u32,
}

impl Aggregates {
    /// Builds the aggregates in a single pass over the transaction list and a
    /// single pass over the transfer list.
    pub fn build(view: &CustomerView) -> Self {
        let mut agg = Aggregates {
            window_days: view.window_days.max(1),
            ..Aggregates::default()
        };

        for tx in &view.transactions {
            let amount = tx.amount.round_dp(2);
            let label = category::normalize(&tx.category);
            let month = YearMonth::of(tx.date);

            agg.total_spend += amount;
            *agg.by_category_sum.entry(label).or_default() += amount;
            *agg.by_category_count.entry(label).or_default() += 1;
            *agg.monthly_spend.entry(month).or_default() += amount;
            agg.category_months.entry(label).or_default().insert(month);
            agg.months_observed.insert(month);
            agg.transaction_count += 1;
        }

        for transfer in &view.transfers {
            let amount = transfer.amount.round_dp(2);
            let month = YearMonth::of(transfer.date);

            match transfer.direction {
                crate::domain::Direction::In => agg.in_sum += amount,
                crate::domain::Direction::Out => agg.out_sum += amount,
            }
            *agg.transfer_type_sum.entry(transfer.kind).or_default() += amount;
            *agg.transfer_type_count.entry(transfer.kind).or_default() += 1;
            agg.transfer_type_months
                .entry(transfer.kind)
                .or_default()
                .insert(month);
            agg.months_observed.insert(month);

            if transfer.kind.is_fx() || transfer.currency != "KZT" {
                agg.fx_count += 1;
                agg.fx_sum += amount;
                if transfer.currency != "KZT" {
                    *agg.fx_currencies.entry(transfer.currency.clone()).or_default() += 1;
                }
            }
            if transfer.kind.is_accumulation() {
                agg.accumulation_count += 1;
            }
            if transfer.kind.is_deposit_topup() {
                *agg.monthly_deposits.entry(month).or_default() += amount;
            }
            if transfer.kind.is_credit_activity() {
                agg.credit_activity_count += 1;
            }
            if transfer.kind.is_income() {
                agg.income_count += 1;
                agg.income_sum += amount;
            }
            if transfer.kind == TransferType::SalaryIn {
                agg.salary_in_count += 1;
                agg.salary_in_total += amount;
            }
            agg.transfer_count += 1;
        }

        let mut ranked: Vec<(&'static str, Money)> = agg
            .by_category_sum
            .iter()
            .map(|(label, sum)| (*label, *sum))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(TOP_CATEGORIES);
        agg.top_by_amount = ranked;

        let mut frequent: Vec<(&'static str, u32)> = agg
            .by_category_count
            .iter()
            .map(|(label, count)| (*label, *count))
            .collect();
        frequent.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        frequent.truncate(TOP_CATEGORIES);
        agg.top_by_count = frequent;

        agg
    }

    pub fn total_spend(&self) -> Money {
        self.total_spend
    }

    /// Total spend across an exact set of category labels.
    pub fn spend_in(&self, categories: &[&str]) -> Money {
        categories
            .iter()
            .filter_map(|label| self.by_category_sum.get(label))
            .copied()
            .sum()
    }

    pub fn count_in(&self, categories: &[&str]) -> u32 {
        categories
            .iter()
            .filter_map(|label| self.by_category_count.get(label))
            .copied()
            .sum()
    }

    /// Share of total spend landing in the given categories, in [0, 1].
    pub fn category_share(&self, categories: &[&str]) -> f64 {
        ratio_of(self.spend_in(categories), self.total_spend)
    }

    pub fn distinct_categories(&self) -> usize {
        self.by_category_count.len()
    }

    /// Top categories by spent amount, largest first, at most five entries.
    pub fn top_by_amount(&self) -> &[(&'static str, Money)] {
        &self.top_by_amount
    }

    /// Top categories by purchase count, most frequent first.
    pub fn top_by_count(&self) -> &[(&'static str, u32)] {
        &self.top_by_count
    }

    pub fn monthly_spend(&self) -> &BTreeMap<YearMonth, Money> {
        &self.monthly_spend
    }

    /// Deposit top-up sums bucketed by month.
    pub fn monthly_deposits(&self) -> &BTreeMap<YearMonth, Money> {
        &self.monthly_deposits
    }

    /// Number of distinct year-months with any observed activity.
    pub fn months_observed(&self) -> usize {
        self.months_observed.len()
    }

    /// Fraction of observed months containing at least one transaction in the
    /// given categories.
    pub fn month_fraction_with_category(&self, categories: &[&str]) -> f64 {
        if self.months_observed.is_empty() {
            return 0.0;
        }
        let mut with: BTreeSet<YearMonth> = BTreeSet::new();
        for label in categories {
            if let Some(months) = self.category_months.get(label) {
                with.extend(months.iter().copied());
            }
        }
        with.len() as f64 / self.months_observed.len() as f64
    }

    /// Fraction of observed months containing at least one transfer of the
    /// given types.
    pub fn month_fraction_with_types(&self, kinds: &[TransferType]) -> f64 {
        if self.months_observed.is_empty() {
            return 0.0;
        }
        let mut with: BTreeSet<YearMonth> = BTreeSet::new();
        for kind in kinds {
            if let Some(months) = self.transfer_type_months.get(kind) {
                with.extend(months.iter().copied());
            }
        }
        with.len() as f64 / self.months_observed.len() as f64
    }

    pub fn sum_for(&self, kinds: &[TransferType]) -> Money {
        kinds
            .iter()
            .filter_map(|kind| self.transfer_type_sum.get(kind))
            .copied()
            .sum()
    }

    pub fn count_for(&self, kinds: &[TransferType]) -> u32 {
        kinds
            .iter()
            .filter_map(|kind| self.transfer_type_count.get(kind))
            .copied()
            .sum()
    }

    /// Share of all transfers whose type is in the given set, by count.
    pub fn transfer_count_share(&self, kinds: &[TransferType]) -> f64 {
        if self.transfer_count == 0 {
            return 0.0;
        }
        self.count_for(kinds) as f64 / self.transfer_count as f64
    }

    pub fn in_sum(&self) -> Money {
        self.in_sum
    }

    pub fn out_sum(&self) -> Money {
        self.out_sum
    }

    pub fn fx_count(&self) -> u32 {
        self.fx_count
    }

    pub fn fx_sum(&self) -> Money {
        self.fx_sum
    }

    /// Share of all transfers that are FX-class, by count.
    pub fn fx_count_share(&self) -> f64 {
        if self.transfer_count == 0 {
            return 0.0;
        }
        self.fx_count as f64 / self.transfer_count as f64
    }

    /// The most traded non-KZT currency, if any FX operation named one.
    pub fn dominant_fx_currency(&self) -> Option<&str> {
        self.fx_currencies
            .iter()
            .max_by(|(a_currency, a_count), (b_currency, b_count)| {
                a_count
                    .cmp(b_count)
                    .then_with(|| b_currency.cmp(a_currency))
            })
            .map(|(currency, _)| currency.as_str())
    }

    pub fn accumulation_count(&self) -> u32 {
        self.accumulation_count
    }

    pub fn credit_activity_count(&self) -> u32 {
        self.credit_activity_count
    }

    pub fn income_count(&self) -> u32 {
        self.income_count
    }

    pub fn income_sum(&self) -> Money {
        self.income_sum
    }

    pub fn salary_in_total(&self) -> Money {
        self.salary_in_total
    }

    pub fn salary_in_count(&self) -> u32 {
        self.salary_in_count
    }

    pub fn transaction_count(&self) -> u32 {
        self.transaction_count
    }

    pub fn transfer_count(&self) -> u32 {
        self.transfer_count
    }

    /// Average spend per month of the analysis window.
    pub fn monthly_spend_average(&self) -> Money {
        let months = self.window_months();
        if months == 0 {
            return Decimal::ZERO;
        }
        (self.total_spend / Decimal::from(months)).round_dp(2)
    }

    /// Transactions per month of the analysis window.
    pub fn monthly_transaction_rate(&self) -> f64 {
        let months = self.window_months();
        if months == 0 {
            return 0.0;
        }
        self.transaction_count as f64 / months as f64
    }

    fn window_months(&self) -> u32 {
        (self.window_days / 30).max(1)
    }
}

fn ratio_of(part: Money, whole: Money) -> f64 {
    use rust_decimal::prelude::ToPrimitive;

    if whole <= Decimal::ZERO {
        return 0.0;
    }
    (part / whole).to_f64().unwrap_or(0.0)
}
