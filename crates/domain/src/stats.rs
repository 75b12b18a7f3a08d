// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::money::Money;
use crate::types::{EditionFilter, Participant, SourceType, Transaction, TransactionType};
use serde::{Deserialize, Serialize};

/// Aggregate figures for an edition scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_income: Money,
    pub total_expense: Money,
    /// Always `total_income - total_expense`.
    pub net_balance: Money,
    /// Income received through the registration platform.
    pub endu_income: Money,
    /// Income received in cash.
    pub cash_income: Money,
    pub total_ebikes: u64,
    pub participants_count: u64,
}

/// One bar of the income/expense chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: Money,
}

impl Stats {
    /// Returns the two-bar income/expense series for the dashboard chart.
    #[must_use]
    pub fn chart_series(&self) -> Vec<ChartPoint> {
        vec![
            ChartPoint {
                name: String::from("Entrate"),
                value: self.total_income,
            },
            ChartPoint {
                name: String::from("Uscite"),
                value: self.total_expense,
            },
        ]
    }
}

/// Computes the aggregate figures for the records in scope.
///
/// Records are visited front to back and summed in integer cents, so the
/// result depends only on the inputs. A filter that matches nothing
/// produces all-zero figures.
///
/// # Arguments
///
/// * `transactions` - The current transaction collection
/// * `participants` - The current participant collection
/// * `filter` - The edition scope
#[must_use]
pub fn compute_stats(
    transactions: &[Transaction],
    participants: &[Participant],
    filter: &EditionFilter,
) -> Stats {
    let mut total_income: Money = Money::ZERO;
    let mut total_expense: Money = Money::ZERO;
    let mut endu_income: Money = Money::ZERO;
    let mut cash_income: Money = Money::ZERO;

    for transaction in transactions
        .iter()
        .filter(|t| filter.matches(&t.edition_id))
    {
        let amount: Money = transaction.details.amount;
        match transaction.details.kind {
            TransactionType::Income => {
                total_income += amount;
                match transaction.details.source {
                    SourceType::Endu => endu_income += amount,
                    SourceType::Cash => cash_income += amount,
                }
            }
            TransactionType::Expense => total_expense += amount,
        }
    }

    let mut total_ebikes: u64 = 0;
    let mut participants_count: u64 = 0;
    for participant in participants
        .iter()
        .filter(|p| filter.matches(&p.edition_id))
    {
        participants_count += 1;
        if participant.details.ebike {
            total_ebikes += 1;
        }
    }

    Stats {
        total_income,
        total_expense,
        net_balance: total_income - total_expense,
        endu_income,
        cash_income,
        total_ebikes,
        participants_count,
    }
}
