//! Lease domain entity, its inputs and the rules that govern them.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::money;
use super::schedule;
use crate::config::{MAX_DUE_DAY, MIN_DUE_DAY};
use crate::errors::{AppError, AppResult};

/// Lease lifecycle status. Only `Active` blocks a unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum LeaseStatus {
    Active,
    Terminated,
    Expired,
}

impl LeaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaseStatus::Active => "active",
            LeaseStatus::Terminated => "terminated",
            LeaseStatus::Expired => "expired",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, LeaseStatus::Active)
    }
}

impl std::str::FromStr for LeaseStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(LeaseStatus::Active),
            "terminated" => Ok(LeaseStatus::Terminated),
            "expired" => Ok(LeaseStatus::Expired),
            _ => Err(AppError::validation("Invalid lease status")),
        }
    }
}

impl std::fmt::Display for LeaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if end < start {
            return Err(AppError::validation(
                "End date must be on or after the start date",
            ));
        }
        Ok(Self { start, end })
    }

    /// Touching endpoints count as an overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Lease domain entity
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Lease {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub tenant_id: Uuid,
    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2024-12-31")]
    pub end_date: NaiveDate,
    #[schema(value_type = String, example = "15000.00")]
    pub monthly_rent: Decimal,
    #[schema(value_type = String, example = "15000.00")]
    pub deposit_paid: Decimal,
    #[schema(value_type = String, example = "15000.00")]
    pub advance_paid: Decimal,
    /// Day of month rent falls due (1-31)
    pub due_date: u32,
    pub status: LeaseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lease {
    pub fn period(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Next rent due date on or after `reference`.
    pub fn next_due_date(&self, reference: NaiveDate) -> NaiveDate {
        schedule::next_due_date(self.due_date, reference)
    }
}

/// Lease creation payload, as submitted by the client.
///
/// Fields are kept loose so validation can run in field order and report
/// the first failure with a readable message.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLease {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub unit_id: String,
    #[schema(example = "550e8400-e29b-41d4-a716-446655440001")]
    pub tenant_id: String,
    #[schema(example = "2024-01-01")]
    pub start_date: String,
    #[schema(example = "2024-12-31")]
    pub end_date: String,
    #[serde(default)]
    #[schema(value_type = String, example = "15000.00")]
    pub monthly_rent: Value,
    #[serde(default)]
    #[schema(value_type = String, example = "15000.00")]
    pub deposit_paid: Value,
    #[serde(default)]
    #[schema(value_type = String, example = "15000.00")]
    pub advance_paid: Value,
    #[serde(default)]
    #[schema(value_type = i64, example = 5)]
    pub due_date: Value,
    #[serde(default)]
    #[schema(example = "active")]
    pub status: Option<String>,
}

/// Validated lease ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLease {
    pub unit_id: Uuid,
    pub tenant_id: Uuid,
    pub period: DateRange,
    pub monthly_rent: Decimal,
    pub deposit_paid: Decimal,
    pub advance_paid: Decimal,
    pub due_date: u32,
    pub status: LeaseStatus,
}

impl CreateLease {
    /// Validate in field order; the first failure wins.
    pub fn validate(self) -> AppResult<NewLease> {
        let unit_id = parse_uuid(&self.unit_id, "Invalid unit ID")?;
        let tenant_id = parse_uuid(&self.tenant_id, "Invalid tenant ID")?;
        let start = parse_date(&self.start_date, "Invalid start date")?;
        let end = parse_date(&self.end_date, "Invalid end date")?;
        let period = DateRange::new(start, end)?;
        let monthly_rent = money::from_json(&self.monthly_rent, "Monthly rent must be positive")?;
        let deposit_paid = money::from_json(&self.deposit_paid, "Deposit must be positive")?;
        let advance_paid = money::from_json(&self.advance_paid, "Advance must be positive")?;
        let due_date = parse_due_day(&self.due_date)?;
        let status = match self.status.as_deref() {
            Some(s) => s.parse()?,
            None => LeaseStatus::Active,
        };

        Ok(NewLease {
            unit_id,
            tenant_id,
            period,
            monthly_rent,
            deposit_paid,
            advance_paid,
            due_date,
            status,
        })
    }
}

/// Partial lease update payload. Absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateLease {
    #[schema(example = "2024-01-01")]
    pub start_date: Option<String>,
    #[schema(example = "2025-06-30")]
    pub end_date: Option<String>,
    #[schema(value_type = Option<String>, example = "16000.00")]
    pub monthly_rent: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub deposit_paid: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub advance_paid: Option<Value>,
    #[schema(value_type = Option<i64>)]
    pub due_date: Option<Value>,
    #[schema(example = "terminated")]
    pub status: Option<String>,
}

/// Validated set of lease changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaseChanges {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub monthly_rent: Option<Decimal>,
    pub deposit_paid: Option<Decimal>,
    pub advance_paid: Option<Decimal>,
    pub due_date: Option<u32>,
    pub status: Option<LeaseStatus>,
}

impl UpdateLease {
    pub fn validate(self) -> AppResult<LeaseChanges> {
        Ok(LeaseChanges {
            start_date: self
                .start_date
                .as_deref()
                .map(|s| parse_date(s, "Invalid start date"))
                .transpose()?,
            end_date: self
                .end_date
                .as_deref()
                .map(|s| parse_date(s, "Invalid end date"))
                .transpose()?,
            monthly_rent: money::from_json_opt(
                self.monthly_rent.as_ref(),
                "Monthly rent must be positive",
            )?,
            deposit_paid: money::from_json_opt(self.deposit_paid.as_ref(), "Deposit must be positive")?,
            advance_paid: money::from_json_opt(self.advance_paid.as_ref(), "Advance must be positive")?,
            due_date: match &self.due_date {
                None | Some(Value::Null) => None,
                Some(v) => Some(parse_due_day(v)?),
            },
            status: self.status.as_deref().map(str::parse).transpose()?,
        })
    }
}

impl LeaseChanges {
    /// Merge onto the stored lease, keeping the date range well-formed.
    pub fn apply_to(&self, lease: &Lease) -> AppResult<Lease> {
        let period = DateRange::new(
            self.start_date.unwrap_or(lease.start_date),
            self.end_date.unwrap_or(lease.end_date),
        )?;

        Ok(Lease {
            start_date: period.start,
            end_date: period.end,
            monthly_rent: self.monthly_rent.unwrap_or(lease.monthly_rent),
            deposit_paid: self.deposit_paid.unwrap_or(lease.deposit_paid),
            advance_paid: self.advance_paid.unwrap_or(lease.advance_paid),
            due_date: self.due_date.unwrap_or(lease.due_date),
            status: self.status.unwrap_or(lease.status),
            ..lease.clone()
        })
    }

    /// Whether the merged lease must be checked against other active leases.
    pub fn needs_overlap_check(&self, before: &Lease, after: &Lease) -> bool {
        after.is_active() && (!before.is_active() || before.period() != after.period())
    }

    /// Unit availability to write after this update, if any.
    pub fn availability_after(&self, before: LeaseStatus) -> Option<bool> {
        availability_after_status_change(before, self.status)
    }
}

/// Availability implied by a status edit.
///
/// Moving into `Active` occupies the unit and leaving it frees the unit.
/// Edits between non-active statuses leave availability alone.
pub fn availability_after_status_change(
    before: LeaseStatus,
    after: Option<LeaseStatus>,
) -> Option<bool> {
    match after? {
        LeaseStatus::Active => Some(false),
        _ if before.is_active() => Some(true),
        _ => None,
    }
}

/// Termination payload; the date defaults to today.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TerminateLease {
    #[schema(example = "2024-07-15")]
    pub termination_date: Option<String>,
}

impl TerminateLease {
    pub fn termination_date(&self) -> AppResult<Option<NaiveDate>> {
        self.termination_date
            .as_deref()
            .map(|s| parse_date(s, "Invalid termination date"))
            .transpose()
    }
}

/// Reject termination dates that would invert the lease period.
pub fn check_termination_date(lease: &Lease, date: NaiveDate) -> AppResult<()> {
    if date < lease.start_date {
        return Err(AppError::validation(
            "Termination date cannot be before the lease start date",
        ));
    }
    Ok(())
}

/// Lease list filters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaseFilters {
    pub property_id: Option<Uuid>,
    pub unit_id: Option<Uuid>,
    pub tenant_id: Option<Uuid>,
    #[param(value_type = Option<String>, example = "active")]
    pub status: Option<LeaseStatus>,
}

/// Tenant fields shown alongside a lease
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaseTenant {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Property fields shown alongside a lease
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaseProperty {
    pub id: Uuid,
    pub name: String,
    pub address: String,
}

/// Lease joined with its unit, tenant and property
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaseSummary {
    #[serde(flatten)]
    pub lease: Lease,
    pub unit_number: String,
    pub tenant: LeaseTenant,
    pub property: LeaseProperty,
}

/// Single-lease view with the upcoming rent due date
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaseDetails {
    #[serde(flatten)]
    pub summary: LeaseSummary,
    /// Only present for active leases
    #[schema(value_type = Option<String>, format = Date)]
    pub next_due_date: Option<NaiveDate>,
}

impl LeaseDetails {
    pub fn new(summary: LeaseSummary, today: NaiveDate) -> Self {
        let next_due_date = summary
            .lease
            .is_active()
            .then(|| summary.lease.next_due_date(today));
        Self {
            summary,
            next_due_date,
        }
    }
}

/// Active lease nearing its end date
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExpiringLease {
    #[serde(flatten)]
    pub summary: LeaseSummary,
    pub days_until_expiry: i64,
}

impl ExpiringLease {
    pub fn new(summary: LeaseSummary, today: NaiveDate) -> Self {
        let days_until_expiry = (summary.lease.end_date - today).num_days();
        Self {
            summary,
            days_until_expiry,
        }
    }
}

fn parse_uuid(value: &str, message: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|_| AppError::validation(message))
}

/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp whose date part is used.
pub(crate) fn parse_date(value: &str, message: &str) -> AppResult<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| AppError::validation(message))
}

/// Day of month from a JSON integer or numeric string.
fn parse_due_day(value: &Value) -> AppResult<u32> {
    let day = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match day {
        Some(day) if (MIN_DUE_DAY..=MAX_DUE_DAY).contains(&day) => Ok(day as u32),
        _ => Err(AppError::validation("Due date must be between 1 and 31")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_input() -> CreateLease {
        CreateLease {
            unit_id: Uuid::new_v4().to_string(),
            tenant_id: Uuid::new_v4().to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-12-31".to_string(),
            monthly_rent: json!(15000),
            deposit_paid: json!("15000"),
            advance_paid: json!(15000),
            due_date: json!(5),
            status: None,
        }
    }

    fn stored_lease(status: LeaseStatus) -> Lease {
        Lease {
            id: Uuid::new_v4(),
            unit_id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            monthly_rent: dec!(15000.00),
            deposit_paid: dec!(15000.00),
            advance_paid: dec!(15000.00),
            due_date: 5,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn validation_message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_defaults_to_active_and_normalizes_money() {
        let lease = create_input().validate().unwrap();
        assert_eq!(lease.status, LeaseStatus::Active);
        assert_eq!(lease.monthly_rent.to_string(), "15000.00");
        assert_eq!(lease.period, DateRange { start: date(2024, 1, 1), end: date(2024, 12, 31) });
    }

    #[test]
    fn test_create_reports_first_failing_field() {
        let mut input = create_input();
        input.monthly_rent = json!(-1);
        input.due_date = json!(40);
        assert_eq!(
            validation_message(input.validate().unwrap_err()),
            "Monthly rent must be positive"
        );

        let mut input = create_input();
        input.start_date = "not-a-date".to_string();
        input.status = Some("pending".to_string());
        assert_eq!(validation_message(input.validate().unwrap_err()), "Invalid start date");
    }

    #[test]
    fn test_malformed_fields_keep_field_order() {
        let input: CreateLease = serde_json::from_value(json!({
            "unit_id": "not-a-uuid",
            "tenant_id": Uuid::new_v4(),
            "start_date": "2024-01-01",
            "end_date": "2024-12-31",
            "monthly_rent": "lots",
            "deposit_paid": 0,
            "advance_paid": 0,
            "due_date": "fifth"
        }))
        .unwrap();
        assert_eq!(validation_message(input.validate().unwrap_err()), "Invalid unit ID");

        let mut input = create_input();
        input.monthly_rent = json!("lots");
        input.due_date = json!("fifth");
        assert_eq!(
            validation_message(input.validate().unwrap_err()),
            "Monthly rent must be positive"
        );
    }

    #[test]
    fn test_missing_amount_reported_in_order() {
        let input: CreateLease = serde_json::from_value(json!({
            "unit_id": Uuid::new_v4(),
            "tenant_id": Uuid::new_v4(),
            "start_date": "2024-01-01",
            "end_date": "2024-12-31",
            "monthly_rent": 15000,
            "advance_paid": 0,
            "due_date": 5
        }))
        .unwrap();
        assert_eq!(validation_message(input.validate().unwrap_err()), "Deposit must be positive");
    }

    #[test]
    fn test_out_of_range_rent_is_validation_error() {
        let mut input = create_input();
        input.monthly_rent = json!(1_000_000_000);
        assert_eq!(
            validation_message(input.validate().unwrap_err()),
            "Monthly rent must be positive"
        );
    }

    #[test]
    fn test_due_day_bounds() {
        for (day, ok) in [(0, false), (1, true), (31, true), (32, false)] {
            let mut input = create_input();
            input.due_date = json!(day);
            assert_eq!(input.validate().is_ok(), ok, "due day {day}");
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        let mut input = create_input();
        input.status = Some("pending".to_string());
        assert_eq!(validation_message(input.validate().unwrap_err()), "Invalid lease status");
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut input = create_input();
        input.end_date = "2023-12-31".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_overlap_is_inclusive() {
        let year = DateRange::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        let june = DateRange::new(date(2024, 6, 1), date(2024, 6, 30)).unwrap();
        let touching = DateRange::new(date(2024, 12, 31), date(2025, 3, 31)).unwrap();
        let after = DateRange::new(date(2025, 1, 1), date(2025, 3, 31)).unwrap();

        assert!(year.overlaps(&june));
        assert!(june.overlaps(&year));
        assert!(year.overlaps(&touching));
        assert!(!year.overlaps(&after));
    }

    #[test]
    fn test_availability_after_status_change() {
        use LeaseStatus::*;
        assert_eq!(availability_after_status_change(Active, Some(Terminated)), Some(true));
        assert_eq!(availability_after_status_change(Active, Some(Expired)), Some(true));
        assert_eq!(availability_after_status_change(Terminated, Some(Active)), Some(false));
        assert_eq!(availability_after_status_change(Active, Some(Active)), Some(false));
        assert_eq!(availability_after_status_change(Terminated, Some(Expired)), None);
        assert_eq!(availability_after_status_change(Active, None), None);
    }

    #[test]
    fn test_apply_keeps_unsupplied_fields() {
        let lease = stored_lease(LeaseStatus::Active);
        let changes = UpdateLease {
            monthly_rent: Some(json!("16000")),
            ..Default::default()
        }
        .validate()
        .unwrap();

        let merged = changes.apply_to(&lease).unwrap();
        assert_eq!(merged.monthly_rent, dec!(16000.00));
        assert_eq!(merged.start_date, lease.start_date);
        assert_eq!(merged.status, LeaseStatus::Active);
        assert!(!changes.needs_overlap_check(&lease, &merged));
    }

    #[test]
    fn test_apply_rejects_inverted_period() {
        let lease = stored_lease(LeaseStatus::Active);
        let changes = UpdateLease {
            end_date: Some("2023-06-01".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert!(changes.apply_to(&lease).is_err());
    }

    #[test]
    fn test_reactivation_needs_overlap_check() {
        let lease = stored_lease(LeaseStatus::Terminated);
        let changes = UpdateLease {
            status: Some("active".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        let merged = changes.apply_to(&lease).unwrap();
        assert!(changes.needs_overlap_check(&lease, &merged));
    }

    #[test]
    fn test_termination_date_before_start_rejected() {
        let lease = stored_lease(LeaseStatus::Active);
        assert!(check_termination_date(&lease, date(2023, 12, 31)).is_err());
        assert!(check_termination_date(&lease, date(2024, 1, 1)).is_ok());
    }

    #[test]
    fn test_parse_date_accepts_timestamps() {
        assert_eq!(
            parse_date("2024-07-15T08:30:00Z", "bad").unwrap(),
            date(2024, 7, 15)
        );
    }
}
