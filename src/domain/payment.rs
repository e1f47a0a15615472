//! Rent payment ledger entries.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::lease::{parse_date, Lease};
use super::money;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Gcash,
    Paymaya,
    BankTransfer,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Gcash => "gcash",
            PaymentMethod::Paymaya => "paymaya",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gcash" => Ok(PaymentMethod::Gcash),
            "paymaya" => Ok(PaymentMethod::Paymaya),
            "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            "cash" => Ok(PaymentMethod::Cash),
            _ => Err(AppError::validation("Invalid payment method")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Confirmed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Confirmed => "confirmed",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "confirmed" => Ok(PaymentStatus::Confirmed),
            _ => Err(AppError::validation("Invalid payment status")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Payment {
    pub id: Uuid,
    pub lease_id: Uuid,
    #[schema(value_type = String, example = "15000.00")]
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    #[schema(value_type = String, format = Date)]
    pub payment_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub due_date: NaiveDate,
    pub reference_number: Option<String>,
    pub status: PaymentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payment recording payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RecordPayment {
    pub lease_id: Uuid,
    #[schema(value_type = String, example = "15000.00")]
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    #[schema(example = "2024-02-03")]
    pub payment_date: String,
    /// Defaults to the lease's next due date on or after the payment date
    #[schema(example = "2024-02-05")]
    pub due_date: Option<String>,
    #[validate(length(max = 100, message = "Reference number is too long"))]
    #[schema(example = "GC-7781-2024")]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub status: PaymentStatus,
    pub notes: Option<String>,
}

/// Validated payment ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub lease_id: Uuid,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_date: NaiveDate,
    pub due_date: NaiveDate,
    pub reference_number: Option<String>,
    pub status: PaymentStatus,
    pub notes: Option<String>,
}

impl RecordPayment {
    /// Validate against the lease the payment is recorded for.
    pub fn into_new_payment(self, lease: &Lease) -> AppResult<NewPayment> {
        let amount = money::non_negative(self.amount, "Amount must be positive")?;
        let payment_date = parse_date(&self.payment_date, "Invalid payment date")?;
        let due_date = match self.due_date.as_deref() {
            Some(s) => parse_date(s, "Invalid due date")?,
            None => lease.next_due_date(payment_date),
        };

        Ok(NewPayment {
            lease_id: lease.id,
            amount,
            payment_method: self.payment_method,
            payment_date,
            due_date,
            reference_number: self
                .reference_number
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
            status: self.status,
            notes: self.notes,
        })
    }
}

/// Payment status change payload
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdatePaymentStatus {
    pub status: PaymentStatus,
}
