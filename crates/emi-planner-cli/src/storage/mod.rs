//! Local saved-plan store.
//!
//! All saved plans live in one JSON array file. Saving reads the list,
//! appends, and rewrites the file atomically.

pub mod file_io;

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use emi_planner_core::plan::{LoanPlan, SavedPlan};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::PlannerPaths;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Saved plan not found: {0}")]
    NotFound(String),
}

pub struct PlanStore {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl PlanStore {
    pub fn new(paths: &PlannerPaths) -> Self {
        Self {
            path: paths.saved_plans_file(),
            write_lock: Mutex::new(()),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// All saved plans, oldest first. A missing file is an empty list.
    pub fn list(&self) -> Result<Vec<SavedPlan>, StoreError> {
        let plans: Vec<SavedPlan> = file_io::read_json(&self.path)?;
        debug!(count = plans.len(), path = %self.path.display(), "loaded saved plans");
        Ok(plans)
    }

    /// Append a plan stamped with the current time.
    pub fn save(&self, plan: &LoanPlan) -> Result<SavedPlan, StoreError> {
        self.save_at(plan, Utc::now())
    }

    /// Append a plan stamped with `saved_at`. A timestamp already used as an
    /// id is moved forward a millisecond at a time until it is free.
    pub fn save_at(&self, plan: &LoanPlan, saved_at: DateTime<Utc>) -> Result<SavedPlan, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut plans = self.list()?;
        let mut stamp = saved_at;
        let mut saved = SavedPlan::new(plan.clone(), stamp);
        while plans.iter().any(|p| p.id == saved.id) {
            stamp += Duration::milliseconds(1);
            saved = SavedPlan::new(plan.clone(), stamp);
        }

        plans.push(saved.clone());
        file_io::write_json_atomic(&self.path, &plans)?;
        info!(id = %saved.id, total = plans.len(), "saved plan");
        Ok(saved)
    }

    /// The plan saved under `id`.
    pub fn load(&self, id: &str) -> Result<LoanPlan, StoreError> {
        self.list()?
            .into_iter()
            .find(|p| p.id == id)
            .map(|p| p.loan_plan)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Remove the plan saved under `id`, returning it.
    pub fn delete(&self, id: &str) -> Result<SavedPlan, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut plans = self.list()?;
        let index = plans
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = plans.remove(index);
        file_io::write_json_atomic(&self.path, &plans)?;
        info!(id, remaining = plans.len(), "deleted saved plan");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> PlanStore {
        PlanStore::new(&PlannerPaths::with_data_dir(dir.path().to_path_buf()))
    }

    fn plan(amount: rust_decimal::Decimal) -> LoanPlan {
        LoanPlan {
            loan_type: "term".into(),
            loan_amount: amount,
            ..LoanPlan::default()
        }
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).list().unwrap().is_empty());
    }

    #[test]
    fn test_save_list_load_delete() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();

        let first = store.save_at(&plan(dec!(1000)), at).unwrap();
        let second = store
            .save_at(&plan(dec!(2000)), at + Duration::seconds(5))
            .unwrap();
        assert_eq!(first.id, "2024-05-01T08:00:00.000Z");

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].id, second.id);

        assert_eq!(store.load(&first.id).unwrap().loan_amount, dec!(1000));

        store.delete(&first.id).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
        assert!(matches!(store.load(&first.id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_colliding_timestamps_get_distinct_ids() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();

        let a = store.save_at(&plan(dec!(1)), at).unwrap();
        let b = store.save_at(&plan(dec!(2)), at).unwrap();
        assert_eq!(a.id, "2024-05-01T08:00:00.000Z");
        assert_eq!(b.id, "2024-05-01T08:00:00.001Z");
    }

    #[test]
    fn test_delete_unknown_id() {
        let dir = TempDir::new().unwrap();
        let err = store(&dir).delete("nope").unwrap_err();
        assert_eq!(err.to_string(), "Saved plan not found: nope");
    }

    #[test]
    fn test_file_is_a_json_array_of_id_and_plan() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&plan(dec!(10))).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entry = &value.as_array().unwrap()[0];
        assert!(entry["id"].as_str().unwrap().ends_with('Z'));
        assert_eq!(entry["loanPlan"]["loanType"], "term");
    }
}
