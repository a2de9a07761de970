//! # Demo Cases
//!
//! Three fixed cases for dashboard demos, inserted at startup when
//! `SEED_DEMO_CASES` is enabled. Cases already present are left untouched,
//! so restarting against a persistent database does not fail.

use chrono::{NaiveDate, TimeZone, Utc};
use verifyflow_core::{
    CaseId, CaseRecord, CaseStatus, CheckOutcomes, CheckStatus, CheckType, RiskLevel, StoredCase,
};

use crate::store::{CaseStore, StoreError};

struct DemoCase {
    id: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    date_of_birth: &'static str,
    country: &'static str,
    id_number: &'static str,
    status: CaseStatus,
    risk_level: RiskLevel,
    date: (i32, u32, u32),
    hour: u32,
    pep: CheckStatus,
}

const DEMO_CASES: [DemoCase; 3] = [
    DemoCase {
        id: "KYC-2025-001",
        first_name: "Sarah",
        last_name: "Chen",
        date_of_birth: "1988-04-12",
        country: "United States",
        id_number: "US-P-551203948",
        status: CaseStatus::Approved,
        risk_level: RiskLevel::Low,
        date: (2025, 12, 27),
        hour: 15,
        pep: CheckStatus::Passed,
    },
    DemoCase {
        id: "KYC-2025-002",
        first_name: "Michael",
        last_name: "Rodriguez",
        date_of_birth: "1979-09-30",
        country: "Mexico",
        id_number: "MX-INE-204471",
        status: CaseStatus::Review,
        risk_level: RiskLevel::Medium,
        date: (2025, 12, 27),
        hour: 11,
        pep: CheckStatus::Flagged,
    },
    DemoCase {
        id: "KYC-2025-003",
        first_name: "James",
        last_name: "Wilson",
        date_of_birth: "1992-01-18",
        country: "United Kingdom",
        id_number: "GB-P-120938475",
        status: CaseStatus::Approved,
        risk_level: RiskLevel::Low,
        date: (2025, 12, 26),
        hour: 16,
        pep: CheckStatus::Passed,
    },
];

impl DemoCase {
    fn to_stored(&self) -> Option<StoredCase> {
        let (y, m, d) = self.date;
        let date = NaiveDate::from_ymd_opt(y, m, d)?;
        let created_at = Utc.with_ymd_and_hms(y, m, d, self.hour, 0, 0).single()?;

        let mut outcomes = CheckOutcomes::new();
        outcomes.insert(CheckType::Identity, CheckStatus::Passed);
        outcomes.insert(CheckType::Sanctions, CheckStatus::Passed);
        outcomes.insert(CheckType::Pep, self.pep);
        outcomes.insert(CheckType::AdverseMedia, CheckStatus::Passed);

        let case = CaseRecord {
            id: CaseId::new(self.id).ok()?,
            name: format!("{} {}", self.first_name, self.last_name),
            first_name: self.first_name.to_string(),
            last_name: self.last_name.to_string(),
            date_of_birth: self.date_of_birth.to_string(),
            country: self.country.to_string(),
            id_number: self.id_number.to_string(),
            status: self.status,
            risk_level: self.risk_level,
            date,
            created_at,
        };
        Some(StoredCase::from_outcomes(case, &outcomes))
    }
}

/// The demo cases with their check rows, newest first.
pub fn demo_cases() -> Vec<StoredCase> {
    DEMO_CASES
        .iter()
        .filter_map(|demo| {
            let stored = demo.to_stored();
            if stored.is_none() {
                tracing::warn!(id = demo.id, "skipping malformed demo case");
            }
            stored
        })
        .collect()
}

/// Insert every demo case not already in `store`. Returns how many were added.
pub async fn seed_demo_cases(store: &dyn CaseStore) -> Result<usize, StoreError> {
    let mut inserted = 0;
    for stored in demo_cases() {
        if store.get_case(stored.case.id.as_str()).await?.is_some() {
            tracing::debug!(id = %stored.case.id, "demo case already present");
            continue;
        }
        store.create_case(&stored).await?;
        inserted += 1;
    }
    tracing::info!(inserted, backend = store.backend(), "demo cases seeded");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCaseStore;
    use verifyflow_core::{compute_stats, project_cases};

    #[test]
    fn demo_cases_match_dashboard_fixtures() {
        let cases = demo_cases();
        assert_eq!(cases.len(), 3);

        let views = project_cases(&cases);
        assert_eq!(views[0].id, "KYC-2025-001");
        assert_eq!(views[0].name, "Sarah Chen");
        assert_eq!(views[1].status, CaseStatus::Review);
        assert_eq!(views[1].checks[&CheckType::Pep], CheckStatus::Flagged);
        assert_eq!(views[2].country, "United Kingdom");
        assert_eq!(views[2].date, NaiveDate::from_ymd_opt(2025, 12, 26).unwrap());
        assert!(views.iter().all(|v| v.checks.len() == 4));
    }

    #[test]
    fn demo_stats() {
        let cases = demo_cases();
        let stats = compute_stats(cases.iter().map(|s| &s.case));
        assert_eq!(stats.total_checks, 3);
        assert_eq!(stats.approved, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.rejected, 0);
        assert_eq!(stats.approval_rate, 66.7);
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let store = MemoryCaseStore::new();
        assert_eq!(seed_demo_cases(&store).await.unwrap(), 3);
        assert_eq!(seed_demo_cases(&store).await.unwrap(), 0);
        assert_eq!(store.len(), 3);

        let ids: Vec<String> = store
            .list_cases()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.case.id.to_string())
            .collect();
        assert_eq!(ids, vec!["KYC-2025-001", "KYC-2025-002", "KYC-2025-003"]);
    }
}
