//! Occupancy and revenue aggregation over an owner's portfolio.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::lease::LeaseStatus;
use super::money;

/// Per-status lease count and summed monthly rent
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LeaseStatusStats {
    pub status: LeaseStatus,
    pub count: u64,
    /// Sum of monthly rent across leases in this status, not collected revenue
    #[schema(value_type = String, example = "33000.00")]
    pub total_revenue: Decimal,
}

/// Dashboard analytics for one owner
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LeaseAnalytics {
    pub lease_stats_by_status: Vec<LeaseStatusStats>,
    #[schema(value_type = String, example = "33000.00")]
    pub total_monthly_revenue: Decimal,
    /// Percentage of units occupied, 0-100
    #[schema(example = 60.0)]
    pub occupancy_rate: f64,
    pub total_units: u64,
    pub occupied_units: u64,
}

impl LeaseAnalytics {
    /// Aggregate a snapshot of `(status, monthly_rent)` lease rows and
    /// per-unit `is_available` flags.
    pub fn from_snapshot<L, U>(leases: L, unit_availability: U) -> Self
    where
        L: IntoIterator<Item = (LeaseStatus, Decimal)>,
        U: IntoIterator<Item = bool>,
    {
        let mut buckets: BTreeMap<LeaseStatus, (u64, Decimal)> = BTreeMap::new();
        for (status, rent) in leases {
            let bucket = buckets.entry(status).or_insert((0, Decimal::ZERO));
            bucket.0 += 1;
            bucket.1 += rent;
        }

        let total_monthly_revenue = buckets
            .get(&LeaseStatus::Active)
            .map(|(_, revenue)| *revenue)
            .unwrap_or(Decimal::ZERO);

        let lease_stats_by_status = buckets
            .into_iter()
            .map(|(status, (count, revenue))| LeaseStatusStats {
                status,
                count,
                total_revenue: money::normalize(revenue),
            })
            .collect();

        let (total_units, occupied_units) = unit_availability
            .into_iter()
            .fold((0u64, 0u64), |(total, occupied), available| {
                (total + 1, occupied + u64::from(!available))
            });

        Self {
            lease_stats_by_status,
            total_monthly_revenue: money::normalize(total_monthly_revenue),
            occupancy_rate: occupancy_rate(occupied_units, total_units),
            total_units,
            occupied_units,
        }
    }
}

/// Occupied share as an unrounded percentage; 0 for an empty portfolio.
pub fn occupancy_rate(occupied: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (occupied.min(total) as f64 * 100.0) / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_portfolio_snapshot() {
        let leases = vec![
            (LeaseStatus::Active, dec!(15000.00)),
            (LeaseStatus::Terminated, dec!(10000.00)),
            (LeaseStatus::Active, dec!(18000.00)),
        ];
        let units = vec![false, false, false, true, true];

        let analytics = LeaseAnalytics::from_snapshot(leases, units);

        assert_eq!(analytics.total_monthly_revenue, dec!(33000.00));
        assert_eq!(analytics.total_units, 5);
        assert_eq!(analytics.occupied_units, 3);
        assert_eq!(analytics.occupancy_rate, 60.0);
        assert_eq!(
            analytics.lease_stats_by_status,
            vec![
                LeaseStatusStats {
                    status: LeaseStatus::Active,
                    count: 2,
                    total_revenue: dec!(33000.00),
                },
                LeaseStatusStats {
                    status: LeaseStatus::Terminated,
                    count: 1,
                    total_revenue: dec!(10000.00),
                },
            ]
        );
    }

    #[test]
    fn test_empty_portfolio_has_zero_occupancy() {
        let analytics = LeaseAnalytics::from_snapshot(Vec::new(), Vec::new());
        assert_eq!(analytics.occupancy_rate, 0.0);
        assert_eq!(analytics.total_monthly_revenue, Decimal::ZERO);
        assert!(analytics.lease_stats_by_status.is_empty());
    }

    #[test]
    fn test_occupancy_rate_bounds() {
        assert_eq!(occupancy_rate(0, 4), 0.0);
        assert_eq!(occupancy_rate(4, 4), 100.0);
        assert_eq!(occupancy_rate(1, 3), 100.0 / 3.0);
        assert_eq!(occupancy_rate(2, 3), 200.0 / 3.0);
    }

    #[test]
    fn test_serializes_money_as_strings() {
        let analytics =
            LeaseAnalytics::from_snapshot(vec![(LeaseStatus::Active, dec!(15000))], vec![false]);
        let json = serde_json::to_value(&analytics).unwrap();
        assert_eq!(json["total_monthly_revenue"], "15000.00");
        assert_eq!(json["lease_stats_by_status"][0]["status"], "active");
    }
}
