// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// Largest amount a record may carry. Drafts hold `i64`, so stored amounts
/// stay within its range.
pub const MAX_AMOUNT: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Income => "income",
            Direction::Expense => "expense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Income => "수입",
            Direction::Expense => "지출",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "수입" => Ok(Direction::Income),
            "expense" | "지출" => Ok(Direction::Expense),
            other => Err(LedgerError::validation(format!(
                "Invalid type '{other}', expected income|expense"
            ))),
        }
    }
}

/// The fixed category set. Each category belongs to exactly one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "급여")]
    Salary,
    #[serde(rename = "상여금")]
    Bonus,
    #[serde(rename = "기타수입")]
    OtherIncome,
    #[serde(rename = "식비")]
    Food,
    #[serde(rename = "교통비")]
    Transport,
    #[serde(rename = "주거비")]
    Housing,
    #[serde(rename = "의료비")]
    Medical,
    #[serde(rename = "교육비")]
    Education,
    #[serde(rename = "문화생활")]
    Leisure,
    #[serde(rename = "기타지출")]
    OtherExpense,
    #[serde(rename = "월세")]
    Rent,
    #[serde(rename = "관리비")]
    MaintenanceFee,
    #[serde(rename = "통신비")]
    Telecom,
    #[serde(rename = "보험료")]
    Insurance,
    #[serde(rename = "구독료")]
    Subscription,
    #[serde(rename = "대출상환")]
    LoanRepayment,
}

impl Category {
    pub const ALL: [Category; 16] = [
        Category::Salary,
        Category::Bonus,
        Category::OtherIncome,
        Category::Food,
        Category::Transport,
        Category::Housing,
        Category::Medical,
        Category::Education,
        Category::Leisure,
        Category::OtherExpense,
        Category::Rent,
        Category::MaintenanceFee,
        Category::Telecom,
        Category::Insurance,
        Category::Subscription,
        Category::LoanRepayment,
    ];

    pub fn direction(&self) -> Direction {
        match self {
            Category::Salary | Category::Bonus | Category::OtherIncome => Direction::Income,
            _ => Direction::Expense,
        }
    }

    pub fn for_direction(direction: Direction) -> impl Iterator<Item = Category> {
        Category::ALL
            .into_iter()
            .filter(move |c| c.direction() == direction)
    }

    /// Stored label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Salary => "급여",
            Category::Bonus => "상여금",
            Category::OtherIncome => "기타수입",
            Category::Food => "식비",
            Category::Transport => "교통비",
            Category::Housing => "주거비",
            Category::Medical => "의료비",
            Category::Education => "교육비",
            Category::Leisure => "문화생활",
            Category::OtherExpense => "기타지출",
            Category::Rent => "월세",
            Category::MaintenanceFee => "관리비",
            Category::Telecom => "통신비",
            Category::Insurance => "보험료",
            Category::Subscription => "구독료",
            Category::LoanRepayment => "대출상환",
        }
    }

    pub fn alias(&self) -> &'static str {
        match self {
            Category::Salary => "salary",
            Category::Bonus => "bonus",
            Category::OtherIncome => "other-income",
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Housing => "housing",
            Category::Medical => "medical",
            Category::Education => "education",
            Category::Leisure => "leisure",
            Category::OtherExpense => "other-expense",
            Category::Rent => "rent",
            Category::MaintenanceFee => "maintenance",
            Category::Telecom => "telecom",
            Category::Insurance => "insurance",
            Category::Subscription => "subscription",
            Category::LoanRepayment => "loan",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s || c.alias().eq_ignore_ascii_case(s))
            .ok_or_else(|| LedgerError::validation(format!("Unknown category '{s}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub date: NaiveDate,
    pub direction: Direction,
    pub category: Category,
    pub amount: u64,
    pub description: String,
    pub recorded_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedExpenseRecord {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub amount: u64,
    pub payment_day: u32,
    pub description: String,
    pub recorded_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub description: String,
    pub recorded_at: Option<NaiveDateTime>,
}

/// Field values for creating or replacing a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub direction: Direction,
    pub category: Category,
    pub amount: i64,
    pub description: String,
}

impl TransactionDraft {
    pub fn validate(&self) -> Result<u64, LedgerError> {
        if self.category.direction() != self.direction {
            return Err(LedgerError::validation(format!(
                "Category '{}' is not a {} category",
                self.category, self.direction
            )));
        }
        non_negative(self.amount)
    }
}

impl TryFrom<&TransactionRecord> for TransactionDraft {
    type Error = LedgerError;

    fn try_from(r: &TransactionRecord) -> Result<Self, Self::Error> {
        Ok(TransactionDraft {
            date: r.date,
            direction: r.direction,
            category: r.category,
            amount: signed_amount(r.amount)?,
            description: r.description.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedExpenseDraft {
    pub title: String,
    pub category: Category,
    pub amount: i64,
    pub payment_day: u32,
    pub description: String,
}

impl FixedExpenseDraft {
    pub fn validate(&self) -> Result<u64, LedgerError> {
        required("title", &self.title)?;
        if self.category.direction() != Direction::Expense {
            return Err(LedgerError::validation(format!(
                "Category '{}' is not an expense category",
                self.category
            )));
        }
        if !(1..=31).contains(&self.payment_day) {
            return Err(LedgerError::validation(format!(
                "Payment day {} out of range 1-31",
                self.payment_day
            )));
        }
        non_negative(self.amount)
    }
}

impl TryFrom<&FixedExpenseRecord> for FixedExpenseDraft {
    type Error = LedgerError;

    fn try_from(r: &FixedExpenseRecord) -> Result<Self, Self::Error> {
        Ok(FixedExpenseDraft {
            title: r.title.clone(),
            category: r.category,
            amount: signed_amount(r.amount)?,
            payment_day: r.payment_day,
            description: r.description.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDraft {
    pub date: NaiveDate,
    pub title: String,
    pub description: String,
}

impl ScheduleDraft {
    pub fn validate(&self) -> Result<(), LedgerError> {
        required("title", &self.title)
    }
}

impl From<&ScheduleEvent> for ScheduleDraft {
    fn from(r: &ScheduleEvent) -> Self {
        ScheduleDraft {
            date: r.date,
            title: r.title.clone(),
            description: r.description.clone(),
        }
    }
}

fn non_negative(amount: i64) -> Result<u64, LedgerError> {
    u64::try_from(amount)
        .map_err(|_| LedgerError::validation(format!("Amount {amount} must not be negative")))
}

fn signed_amount(amount: u64) -> Result<i64, LedgerError> {
    i64::try_from(amount)
        .map_err(|_| LedgerError::validation(format!("Amount {amount} exceeds {MAX_AMOUNT}")))
}

fn required(field: &str, value: &str) -> Result<(), LedgerError> {
    if value.trim().is_empty() {
        return Err(LedgerError::validation(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_record_amount_does_not_wrap() {
        let rec = TransactionRecord {
            id: "-x".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            direction: Direction::Expense,
            category: Category::Food,
            amount: MAX_AMOUNT + 1,
            description: String::new(),
            recorded_at: None,
        };
        assert!(TransactionDraft::try_from(&rec).is_err());

        let ok = TransactionRecord {
            amount: MAX_AMOUNT,
            ..rec
        };
        let draft = TransactionDraft::try_from(&ok).unwrap();
        assert_eq!(draft.amount, i64::MAX);
        assert_eq!(draft.validate().unwrap(), MAX_AMOUNT);
    }

    #[test]
    fn categories_parse_from_label_or_alias() {
        assert_eq!("급여".parse::<Category>().unwrap(), Category::Salary);
        assert_eq!("Food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(" 월세 ".parse::<Category>().unwrap(), Category::Rent);
        assert!("pizza".parse::<Category>().is_err());
    }

    #[test]
    fn category_sets_partition_by_direction() {
        let income: Vec<_> = Category::for_direction(Direction::Income).collect();
        assert_eq!(income, vec![Category::Salary, Category::Bonus, Category::OtherIncome]);
        assert_eq!(Category::for_direction(Direction::Expense).count(), 13);
    }

    #[test]
    fn draft_rejects_mismatched_direction_and_negative_amount() {
        let draft = TransactionDraft {
            date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            direction: Direction::Expense,
            category: Category::Salary,
            amount: 10,
            description: String::new(),
        };
        assert!(draft.validate().is_err());
        let draft = TransactionDraft {
            category: Category::Food,
            amount: -1,
            ..draft
        };
        assert!(draft.validate().is_err());
        let draft = TransactionDraft { amount: 0, ..draft };
        assert_eq!(draft.validate().unwrap(), 0);
    }

    #[test]
    fn fixed_draft_requires_title_and_day_in_range() {
        let draft = FixedExpenseDraft {
            title: "  ".into(),
            category: Category::Rent,
            amount: 800_000,
            payment_day: 25,
            description: String::new(),
        };
        assert!(draft.validate().is_err());
        let draft = FixedExpenseDraft {
            title: "월세".into(),
            payment_day: 32,
            ..draft
        };
        assert!(draft.validate().is_err());
        let draft = FixedExpenseDraft {
            payment_day: 31,
            ..draft
        };
        assert_eq!(draft.validate().unwrap(), 800_000);
    }
}
