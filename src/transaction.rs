//! Income and expense records for the budget tracker.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    date::{
        format_iso_date, format_optional_iso_date, optional_iso_date, parse_optional_iso_date,
        today,
    },
    id::RecordId,
    record_store::Record,
};

const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned.
    Income,
    /// Money that was spent.
    #[default]
    Expense,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::Validation(format!(
                "\"{other}\" is not a transaction type, expected \"income\" or \"expense\""
            ))),
        }
    }
}

/// What a transaction was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Category {
    #[default]
    Food,
    Transportation,
    Housing,
    Entertainment,
    Utilities,
    Healthcare,
    Salary,
    Other,
}

impl Category {
    /// Every category, in the order they are offered on the form.
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transportation,
        Category::Housing,
        Category::Entertainment,
        Category::Utilities,
        Category::Healthcare,
        Category::Salary,
        Category::Other,
    ];

    /// The display name, which is also the stored value.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Housing => "Housing",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Salary => "Salary",
            Category::Other => "Other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| Error::Validation(format!("\"{s}\" is not a category")))
    }
}

/// A non-negative decimal amount of money, kept as the text it was entered as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    /// Create an amount from user input.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::Validation] if `text` is not a
    /// finite, non-negative number.
    pub fn new(text: &str) -> Result<Self, Error> {
        let text = text.trim();

        match text.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(Self(text.to_owned())),
            _ => Err(Error::Validation(format!(
                "\"{text}\" is not a valid amount, enter a number that is zero or more"
            ))),
        }
    }

    /// Create an amount without validation.
    ///
    /// The caller should ensure that `text` is a non-negative number.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because an invalid amount
    /// is only counted as zero, see [Amount::value].
    pub fn new_unchecked(text: &str) -> Self {
        Self(text.to_owned())
    }

    /// The numeric value of the amount.
    ///
    /// Amounts written by this crate are always valid, but stored data may
    /// have been edited by hand. Text that does not parse as a finite number
    /// counts as zero.
    pub fn value(&self) -> f64 {
        match self.0.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                tracing::warn!("Counting malformed amount {:?} as zero", self.0);
                0.0
            }
        }
    }
}

impl AsRef<str> for Amount {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: RecordId,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// How much money was earned or spent.
    pub amount: Amount,
    /// What the transaction was for.
    pub category: Category,
    /// A text description of the transaction.
    pub description: String,
    /// When the transaction happened, if a date was given.
    #[serde(with = "optional_iso_date", default)]
    pub date: Option<Date>,
}

/// The validated contents of a transaction, without its ID.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    /// See [Transaction::kind].
    pub kind: TransactionType,
    /// See [Transaction::amount].
    pub amount: Amount,
    /// See [Transaction::category].
    pub category: Category,
    /// See [Transaction::description].
    pub description: String,
    /// See [Transaction::date].
    pub date: Option<Date>,
}

impl Record for Transaction {
    type Fields = TransactionFields;

    const COLLECTION: &'static str = "transactions";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_fields(id: RecordId, fields: TransactionFields) -> Self {
        let TransactionFields {
            kind,
            amount,
            category,
            description,
            date,
        } = fields;

        Self {
            id,
            kind,
            amount,
            category,
            description,
            date,
        }
    }
}

/// The transaction form as filled in by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionForm {
    /// Income or expense, chosen from a list.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The amount as typed, validated by [TransactionForm::validate].
    pub amount: String,
    /// The category, chosen from a list.
    pub category: Category,
    /// What the transaction was for.
    pub description: String,
    /// The date as `YYYY-MM-DD`, or empty if the input was cleared.
    pub date: String,
}

impl Default for TransactionForm {
    /// An empty expense in the food category, dated today.
    fn default() -> Self {
        Self {
            kind: TransactionType::default(),
            amount: String::new(),
            category: Category::default(),
            description: String::new(),
            date: format_iso_date(today()),
        }
    }
}

impl TransactionForm {
    /// Check the form and convert it into the fields of a transaction.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::Validation] if the amount or
    /// description is empty, the amount is not a non-negative number, or the
    /// date is neither blank nor a valid `YYYY-MM-DD` date.
    pub fn validate(&self) -> Result<TransactionFields, Error> {
        if self.amount.is_empty() || self.description.is_empty() {
            return Err(Error::validation(MISSING_FIELDS_MESSAGE));
        }

        Ok(TransactionFields {
            kind: self.kind,
            amount: Amount::new(&self.amount)?,
            category: self.category,
            description: self.description.clone(),
            date: parse_optional_iso_date(&self.date)?,
        })
    }
}

impl From<&Transaction> for TransactionForm {
    /// Prefill the form for editing an existing transaction.
    fn from(transaction: &Transaction) -> Self {
        Self {
            kind: transaction.kind,
            amount: transaction.amount.as_ref().to_owned(),
            category: transaction.category,
            description: transaction.description.clone(),
            date: format_optional_iso_date(transaction.date),
        }
    }
}


#[cfg(test)]
mod transaction_form_tests {
    use time::macros::date;

    use crate::{
        Error,
        date::{format_iso_date, today},
        id::RecordId,
        record_store::Record,
        transaction::{Amount, Category, Transaction, TransactionForm, TransactionType},
    };

    fn valid_form() -> TransactionForm {
        TransactionForm {
            kind: TransactionType::Expense,
            amount: "300".to_owned(),
            category: Category::Food,
            description: "Groceries".to_owned(),
            date: "2025-01-15".to_owned(),
        }
    }

    #[test]
    fn default_form_is_todays_food_expense() {
        let form = TransactionForm::default();

        assert_eq!(form.kind, TransactionType::Expense);
        assert_eq!(form.category, Category::Food);
        assert_eq!(form.amount, "");
        assert_eq!(form.date, format_iso_date(today()));
    }

    #[test]
    fn validate_converts_valid_form() {
        let fields = valid_form().validate().unwrap();

        assert_eq!(fields.amount, Amount::new_unchecked("300"));
        assert_eq!(fields.description, "Groceries");
        assert_eq!(fields.date, Some(date!(2025 - 01 - 15)));
    }

    #[test]
    fn validate_requires_amount_and_description() {
        let missing_amount = TransactionForm {
            amount: String::new(),
            ..valid_form()
        };
        let missing_description = TransactionForm {
            description: String::new(),
            ..valid_form()
        };

        let want = Err(Error::Validation(
            "Please fill in all required fields".to_owned(),
        ));
        assert_eq!(missing_amount.validate(), want);
        assert_eq!(missing_description.validate(), want);
    }

    #[test]
    fn validate_rejects_negative_amount_and_bad_date() {
        let negative = TransactionForm {
            amount: "-5".to_owned(),
            ..valid_form()
        };
        let bad_date = TransactionForm {
            date: "yesterday".to_owned(),
            ..valid_form()
        };

        assert!(matches!(negative.validate(), Err(Error::Validation(_))));
        assert!(matches!(bad_date.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn form_round_trips_through_existing_transaction() {
        let transaction =
            Transaction::from_fields(RecordId::new("1"), valid_form().validate().unwrap());

        assert_eq!(TransactionForm::from(&transaction), valid_form());
    }

    #[test]
    fn transaction_serializes_with_stored_field_names() {
        let transaction =
            Transaction::from_fields(RecordId::new("1"), valid_form().validate().unwrap());

        assert_eq!(
            serde_json::to_string(&transaction).unwrap(),
            r#"{"id":"1","type":"expense","amount":"300","category":"Food","description":"Groceries","date":"2025-01-15"}"#
        );
    }

    #[test]
    fn category_parses_display_name() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>(), Ok(category));
        }
        assert!("Groceries".parse::<Category>().is_err());
    }

    #[test]
    fn blank_date_is_accepted_and_kept_blank() {
        let form = TransactionForm {
            date: String::new(),
            ..valid_form()
        };

        let transaction = Transaction::from_fields(RecordId::new("1"), form.validate().unwrap());

        assert_eq!(transaction.date, None);
        assert_eq!(TransactionForm::from(&transaction).date, "");
        assert!(
            serde_json::to_string(&transaction)
                .unwrap()
                .ends_with(r#""date":""}"#)
        );
    }
}
