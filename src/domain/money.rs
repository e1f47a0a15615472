//! Currency amounts.
//!
//! Amounts are exact decimals carried with two fractional digits, both in
//! storage (`NUMERIC(10,2)`) and on the wire (decimal strings).

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use crate::config::{CURRENCY_SCALE, MAX_AMOUNT_CENTS};
use crate::errors::{AppError, AppResult};

/// Round to centavos and pin the scale so `15000` renders as `"15000.00"`.
pub fn normalize(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CURRENCY_SCALE);
    rounded
}

/// Largest amount a `NUMERIC(10,2)` column holds.
pub fn max_amount() -> Decimal {
    Decimal::new(MAX_AMOUNT_CENTS, CURRENCY_SCALE)
}

/// Accept amounts in `0..=max_amount()` with at most two fractional digits.
pub fn non_negative(amount: Decimal, message: &str) -> AppResult<Decimal> {
    let negative = amount.is_sign_negative() && !amount.is_zero();
    let sub_centavo = amount.normalize().scale() > CURRENCY_SCALE;
    if negative || sub_centavo || amount > max_amount() {
        return Err(AppError::validation(message));
    }
    Ok(normalize(amount))
}

/// Optional variant of [`non_negative`].
pub fn non_negative_opt(amount: Option<Decimal>, message: &str) -> AppResult<Option<Decimal>> {
    amount.map(|a| non_negative(a, message)).transpose()
}

/// Read an amount from a JSON number or decimal string.
pub fn from_json(value: &Value, message: &str) -> AppResult<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(AppError::validation(message)),
    };
    let amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| AppError::validation(message))?;
    non_negative(amount, message)
}

/// Optional variant of [`from_json`]; `null` counts as absent.
pub fn from_json_opt(value: Option<&Value>, message: &str) -> AppResult<Option<Decimal>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => from_json(v, message).map(Some),
    }
}
