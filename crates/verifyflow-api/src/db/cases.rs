//! KYC case persistence operations.
//!
//! Operates on the `kyc_cases` and `kyc_checks` tables. Enum columns are
//! stored as their wire strings; a row whose strings no longer parse is
//! logged and skipped rather than failing the whole read.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use verifyflow_core::{
    CaseId, CaseRecord, CaseStatus, CheckRecord, CoreError, RiskLevel, StoredCase,
};

use crate::store::{newest_first, CaseStore, StoreError};

const CASE_COLUMNS: &str = "id, name, first_name, last_name, date_of_birth, country, id_number, \
                            status, risk_level, date, created_at";

/// PostgreSQL-backed [`CaseStore`].
#[derive(Debug, Clone)]
pub struct PgCaseStore {
    pool: PgPool,
}

impl PgCaseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn checks_for(&self, ids: &[String]) -> Result<Vec<CheckRecord>, StoreError> {
        let rows = sqlx::query_as::<_, CheckRow>(
            "SELECT case_id, check_type, status FROM kyc_checks
             WHERE case_id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().filter_map(CheckRow::into_record).collect())
    }
}

#[async_trait]
impl CaseStore for PgCaseStore {
    async fn create_case(&self, stored: &StoredCase) -> Result<(), StoreError> {
        let case = &stored.case;
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO kyc_cases (id, name, first_name, last_name, date_of_birth, country,
                                    id_number, status, risk_level, date, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(case.id.as_str())
        .bind(&case.name)
        .bind(&case.first_name)
        .bind(&case.last_name)
        .bind(&case.date_of_birth)
        .bind(&case.country)
        .bind(&case.id_number)
        .bind(case.status.as_str())
        .bind(case.risk_level.as_str())
        .bind(case.date)
        .bind(case.created_at)
        .execute(&mut *tx)
        .await;

        if let Err(err) = inserted {
            let duplicate =
                matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation());
            return Err(if duplicate {
                StoreError::Duplicate(case.id.clone())
            } else {
                StoreError::Database(err)
            });
        }

        for check in &stored.checks {
            sqlx::query("INSERT INTO kyc_checks (case_id, check_type, status) VALUES ($1, $2, $3)")
                .bind(check.case_id.as_str())
                .bind(check.check_type.as_str())
                .bind(check.status.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_case(&self, id: &str) -> Result<Option<StoredCase>, StoreError> {
        let row = sqlx::query_as::<_, CaseRow>(&format!(
            "SELECT {CASE_COLUMNS} FROM kyc_cases WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(case) = row.and_then(CaseRow::into_record) else {
            return Ok(None);
        };
        let checks = self.checks_for(&[id.to_string()]).await?;
        Ok(Some(StoredCase { case, checks }))
    }

    async fn list_cases(&self) -> Result<Vec<StoredCase>, StoreError> {
        let cases = self.list_case_records().await?;
        let ids: Vec<String> = cases.iter().map(|c| c.id.to_string()).collect();

        let mut by_case: HashMap<CaseId, Vec<CheckRecord>> = HashMap::new();
        for check in self.checks_for(&ids).await? {
            by_case.entry(check.case_id.clone()).or_default().push(check);
        }

        Ok(cases
            .into_iter()
            .map(|case| {
                let checks = by_case.remove(&case.id).unwrap_or_default();
                StoredCase { case, checks }
            })
            .collect())
    }

    async fn list_case_records(&self) -> Result<Vec<CaseRecord>, StoreError> {
        let rows = sqlx::query_as::<_, CaseRow>(&format!(
            "SELECT {CASE_COLUMNS} FROM kyc_cases ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut records: Vec<CaseRecord> =
            rows.into_iter().filter_map(CaseRow::into_record).collect();
        // The database collation may order ids differently from byte order.
        records.sort_by(newest_first);
        Ok(records)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

/// Internal row type for SQLx mapping.
#[derive(Debug, sqlx::FromRow)]
struct CaseRow {
    id: String,
    name: String,
    first_name: String,
    last_name: String,
    date_of_birth: String,
    country: String,
    id_number: String,
    status: String,
    risk_level: String,
    date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl CaseRow {
    fn parse_keys(&self) -> Result<(CaseId, CaseStatus, RiskLevel), CoreError> {
        Ok((
            CaseId::new(self.id.clone())?,
            self.status.parse()?,
            self.risk_level.parse()?,
        ))
    }

    fn into_record(self) -> Option<CaseRecord> {
        let (id, status, risk_level) = match self.parse_keys() {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(id = %self.id, error = %e, "skipping unreadable kyc_cases row");
                return None;
            }
        };

        Some(CaseRecord {
            id,
            name: self.name,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            country: self.country,
            id_number: self.id_number,
            status,
            risk_level,
            date: self.date,
            created_at: self.created_at,
        })
    }
}

/// Internal row type for SQLx mapping.
#[derive(Debug, sqlx::FromRow)]
struct CheckRow {
    case_id: String,
    check_type: String,
    status: String,
}

impl CheckRow {
    fn parse(&self) -> Result<CheckRecord, CoreError> {
        Ok(CheckRecord {
            case_id: CaseId::new(self.case_id.clone())?,
            check_type: self.check_type.parse()?,
            status: self.status.parse()?,
        })
    }

    fn into_record(self) -> Option<CheckRecord> {
        match self.parse() {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    case_id = %self.case_id,
                    check_type = %self.check_type,
                    error = %e,
                    "skipping unreadable kyc_checks row"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use verifyflow_core::{CheckStatus, CheckType};

    fn case_row(status: &str, risk_level: &str) -> CaseRow {
        CaseRow {
            id: "KYC-2025-002".into(),
            name: "Michael Rodriguez".into(),
            first_name: "Michael".into(),
            last_name: "Rodriguez".into(),
            date_of_birth: "1979-09-30".into(),
            country: "Mexico".into(),
            id_number: "MX-INE-204471".into(),
            status: status.into(),
            risk_level: risk_level.into(),
            date: NaiveDate::from_ymd_opt(2025, 12, 27).unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 12, 27, 11, 0, 0).unwrap(),
        }
    }

    #[test]
    fn case_row_parses() {
        let record = case_row("review", "medium").into_record().unwrap();
        assert_eq!(record.id, "KYC-2025-002");
        assert_eq!(record.status, CaseStatus::Review);
        assert_eq!(record.risk_level, RiskLevel::Medium);
        assert_eq!(record.country, "Mexico");
    }

    #[test]
    fn case_row_with_unknown_status_is_skipped() {
        assert!(case_row("escalated", "medium").into_record().is_none());
        assert!(case_row("review", "extreme").into_record().is_none());
    }

    #[test]
    fn case_row_with_bad_id_is_skipped() {
        let mut row = case_row("approved", "low");
        row.id = "2025-002".into();
        assert!(row.into_record().is_none());
    }

    #[test]
    fn check_row_parses_camel_case_type() {
        let row = CheckRow {
            case_id: "KYC-2025-002".into(),
            check_type: "adverseMedia".into(),
            status: "flagged".into(),
        };
        let record = row.into_record().unwrap();
        assert_eq!(record.check_type, CheckType::AdverseMedia);
        assert_eq!(record.status, CheckStatus::Flagged);
    }

    #[test]
    fn check_row_with_unknown_values_is_skipped() {
        let row = CheckRow {
            case_id: "KYC-2025-002".into(),
            check_type: "creditScore".into(),
            status: "passed".into(),
        };
        assert!(row.into_record().is_none());
        let row = CheckRow {
            case_id: "KYC-2025-002".into(),
            check_type: "pep".into(),
            status: "maybe".into(),
        };
        assert!(row.into_record().is_none());
    }

    #[test]
    fn wire_strings_round_trip_through_rows() {
        for check_type in CheckType::all() {
            let row = CheckRow {
                case_id: "KYC-1".into(),
                check_type: check_type.as_str().into(),
                status: CheckStatus::Passed.as_str().into(),
            };
            assert_eq!(row.into_record().unwrap().check_type, *check_type);
        }
    }
}
