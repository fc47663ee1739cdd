//! Summary statistics derived from the transaction and job collections.
//!
//! Everything here is a pure function of the records passed in, so the
//! values can be recomputed whenever a collection changes.

use serde::Serialize;

use crate::{
    job::{Job, JobStatus, StatusFilter},
    transaction::{Category, Transaction, TransactionType},
};

/// The totals shown on the budget summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BudgetSummary {
    /// The sum of all income.
    pub total_income: f64,
    /// The sum of all expenses.
    pub total_expenses: f64,
    /// Income minus expenses.
    pub balance: f64,
}

/// Sum income and expenses and calculate the balance.
pub fn budget_summary(transactions: &[Transaction]) -> BudgetSummary {
    let total_income = total_of(transactions, TransactionType::Income);
    let total_expenses = total_of(transactions, TransactionType::Expense);

    BudgetSummary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    }
}

fn total_of(transactions: &[Transaction], kind: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
        .map(|transaction| transaction.amount.value())
        .sum()
}

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category name.
    pub name: String,
    /// The total amount spent.
    pub value: f64,
}

/// Sum expenses per category.
///
/// Categories are listed in the order they first appear in `transactions`,
/// and categories without any expenses are left out.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<(Category, f64)> = Vec::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionType::Expense)
    {
        let amount = transaction.amount.value();

        match totals
            .iter_mut()
            .find(|(category, _)| *category == transaction.category)
        {
            Some((_, total)) => *total += amount,
            None => totals.push((transaction.category, amount)),
        }
    }

    totals
        .into_iter()
        .map(|(category, value)| CategoryTotal {
            name: category.name().to_owned(),
            value,
        })
        .collect()
}

/// The number of jobs with each status.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct JobStatusCounts {
    pub applied: usize,
    pub interviewing: usize,
    pub offer: usize,
    pub rejected: usize,
}

impl JobStatusCounts {
    /// The number of jobs with `status`.
    pub fn get(&self, status: JobStatus) -> usize {
        match status {
            JobStatus::Applied => self.applied,
            JobStatus::Interviewing => self.interviewing,
            JobStatus::Offer => self.offer,
            JobStatus::Rejected => self.rejected,
        }
    }

    /// The total number of jobs counted.
    pub fn total(&self) -> usize {
        self.applied + self.interviewing + self.offer + self.rejected
    }
}

/// Count the jobs with each status.
pub fn job_status_counts(jobs: &[Job]) -> JobStatusCounts {
    let mut counts = JobStatusCounts::default();

    for job in jobs {
        let count = match job.status {
            JobStatus::Applied => &mut counts.applied,
            JobStatus::Interviewing => &mut counts.interviewing,
            JobStatus::Offer => &mut counts.offer,
            JobStatus::Rejected => &mut counts.rejected,
        };
        *count += 1;
    }

    counts
}

/// The jobs that pass `filter`, in their original order.
pub fn filter_jobs(jobs: &[Job], filter: StatusFilter) -> Vec<&Job> {
    jobs.iter().filter(|job| filter.matches(job.status)).collect()
}
