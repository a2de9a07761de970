//! # Dashboard Statistics
//!
//! Derives a [`StatsSnapshot`] from a case collection on demand. Nothing here
//! is persisted.
//!
//! Percentages are rounded to one decimal place. Every division is guarded:
//! an empty collection yields zero rates, never NaN.
//!
//! Period-over-period change figures and processing-time averages need
//! history the store does not keep, so the snapshot does not carry them.
//! `weekly_data` is only filled when the caller supplies a reference date
//! (see [`compute_stats_as_of`]).

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::case::CaseRecord;
use crate::domain::{CaseStatus, RiskLevel};

/// Number of days covered by `weekly_data`.
const WEEK_DAYS: i64 = 7;

/// Aggregate statistics over all cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Number of cases.
    pub total_checks: u64,
    pub approved: u64,
    /// Cases in `pending` or `review`.
    pub pending: u64,
    pub rejected: u64,
    /// `approved / total_checks * 100`, one decimal.
    pub approval_rate: f64,
    pub risk_distribution: RiskDistribution,
    /// Per-level breakdown with percentage of total, lowest risk first.
    pub risk_data: Vec<RiskBucket>,
    /// Cases created on each of the last seven days, oldest first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_data: Option<Vec<u64>>,
}

/// Case counts by risk level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RiskDistribution {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

impl RiskDistribution {
    pub fn get(&self, level: RiskLevel) -> u64 {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }

    fn bump(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
        }
    }
}

/// One row of the risk breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RiskBucket {
    /// "Low", "Medium" or "High".
    pub label: String,
    pub level: RiskLevel,
    pub value: u64,
    /// Share of all cases, one decimal.
    pub percentage: f64,
}

/// Compute the dashboard snapshot for `cases`.
pub fn compute_stats<'a>(cases: impl IntoIterator<Item = &'a CaseRecord>) -> StatsSnapshot {
    let mut total = 0u64;
    let mut approved = 0u64;
    let mut pending = 0u64;
    let mut rejected = 0u64;
    let mut risk = RiskDistribution::default();

    for case in cases {
        total += 1;
        match case.status {
            CaseStatus::Approved => approved += 1,
            CaseStatus::Rejected => rejected += 1,
            CaseStatus::Pending | CaseStatus::Review => pending += 1,
        }
        risk.bump(case.risk_level);
    }

    let risk_data = RiskLevel::all()
        .iter()
        .map(|level| RiskBucket {
            label: level.label().to_string(),
            level: *level,
            value: risk.get(*level),
            percentage: percentage(risk.get(*level), total),
        })
        .collect();

    StatsSnapshot {
        total_checks: total,
        approved,
        pending,
        rejected,
        approval_rate: percentage(approved, total),
        risk_distribution: risk,
        risk_data,
        weekly_data: None,
    }
}

/// Like [`compute_stats`], additionally filling `weekly_data` with the number
/// of cases dated on each of the seven days ending at `today`.
pub fn compute_stats_as_of(cases: &[CaseRecord], today: NaiveDate) -> StatsSnapshot {
    let mut snapshot = compute_stats(cases);
    let weekly = (0..WEEK_DAYS)
        .rev()
        .map(|days_back| {
            let day = today - Duration::days(days_back);
            cases.iter().filter(|c| c.date == day).count() as u64
        })
        .collect();
    snapshot.weekly_data = Some(weekly);
    snapshot
}

/// `part / total * 100`, rounded to one decimal; `0.0` when `total` is zero.
fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(part as f64 / total as f64 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::CaseId;
    use chrono::{TimeZone, Utc};

    fn case(n: u32, status: CaseStatus, risk: RiskLevel, date: NaiveDate) -> CaseRecord {
        CaseRecord {
            id: CaseId::new(format!("KYC-{n}")).unwrap(),
            name: "Test Applicant".into(),
            first_name: "Test".into(),
            last_name: "Applicant".into(),
            date_of_birth: "1990-01-01".into(),
            country: "United States".into(),
            id_number: format!("P{n}"),
            status,
            risk_level: risk,
            date,
            created_at: Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap()),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, d).unwrap()
    }

    #[test]
    fn empty_collection_has_zero_rates() {
        let stats = compute_stats(&[] as &[CaseRecord]);
        assert_eq!(stats.total_checks, 0);
        assert_eq!(stats.approved, 0);
        assert_eq!(stats.pending, 0);
        assert_eq!(stats.rejected, 0);
        assert_eq!(stats.approval_rate, 0.0);
        assert_eq!(stats.risk_distribution, RiskDistribution::default());
        assert_eq!(stats.risk_data.len(), 3);
        assert!(stats.risk_data.iter().all(|b| b.percentage == 0.0));
        assert!(stats.weekly_data.is_none());
    }

    #[test]
    fn demo_collection() {
        let cases = vec![
            case(1, CaseStatus::Approved, RiskLevel::Low, day(27)),
            case(2, CaseStatus::Review, RiskLevel::Medium, day(27)),
            case(3, CaseStatus::Approved, RiskLevel::Low, day(26)),
        ];
        let stats = compute_stats(&cases);
        assert_eq!(stats.total_checks, 3);
        assert_eq!(stats.approved, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.rejected, 0);
        assert_eq!(stats.approval_rate, 66.7);
        assert_eq!(stats.risk_distribution.low, 2);
        assert_eq!(stats.risk_distribution.medium, 1);
        assert_eq!(stats.risk_distribution.high, 0);
        assert_eq!(stats.risk_data[0].label, "Low");
        assert_eq!(stats.risk_data[0].percentage, 66.7);
        assert_eq!(stats.risk_data[1].percentage, 33.3);
        assert_eq!(stats.risk_data[2].percentage, 0.0);
    }

    #[test]
    fn pending_bucket_includes_review() {
        let cases = vec![
            case(1, CaseStatus::Pending, RiskLevel::High, day(1)),
            case(2, CaseStatus::Review, RiskLevel::High, day(1)),
            case(3, CaseStatus::Rejected, RiskLevel::High, day(1)),
        ];
        let stats = compute_stats(&cases);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.approval_rate, 0.0);
        assert_eq!(stats.risk_data[2].percentage, 100.0);
    }

    #[test]
    fn rounds_to_one_decimal() {
        // 1 of 8 = 12.5%, 7 of 8 = 87.5%
        let mut cases = vec![case(0, CaseStatus::Rejected, RiskLevel::High, day(1))];
        for n in 1..8 {
            cases.push(case(n, CaseStatus::Approved, RiskLevel::Low, day(1)));
        }
        let stats = compute_stats(&cases);
        assert_eq!(stats.approval_rate, 87.5);
        assert_eq!(stats.risk_data[2].percentage, 12.5);
    }

    #[test]
    fn weekly_data_counts_last_seven_days() {
        let cases = vec![
            case(1, CaseStatus::Approved, RiskLevel::Low, day(27)),
            case(2, CaseStatus::Approved, RiskLevel::Low, day(27)),
            case(3, CaseStatus::Approved, RiskLevel::Low, day(21)),
            // Outside the window.
            case(4, CaseStatus::Approved, RiskLevel::Low, day(20)),
            case(5, CaseStatus::Approved, RiskLevel::Low, day(28)),
        ];
        let stats = compute_stats_as_of(&cases, day(27));
        assert_eq!(stats.weekly_data, Some(vec![1, 0, 0, 0, 0, 0, 2]));
        assert_eq!(stats.total_checks, 5);
    }

    #[test]
    fn weekly_data_omitted_from_json_when_absent() {
        let json = serde_json::to_value(compute_stats(&[] as &[CaseRecord])).unwrap();
        assert!(json.get("weeklyData").is_none());
        assert_eq!(json["totalChecks"], 0);
        assert_eq!(json["approvalRate"], 0.0);
        assert_eq!(json["riskDistribution"]["medium"], 0);
        assert_eq!(json["riskData"][1]["label"], "Medium");
        assert_eq!(json["riskData"][1]["level"], "medium");
    }
}
