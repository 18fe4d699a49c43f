//! Data directory resolution.
//!
//! Resolution order:
//!
//! 1. `--data-dir` flag, or the `EMI_PLANNER_DATA_DIR` environment variable
//! 2. The platform data directory (`~/.local/share/emi-planner` on Linux,
//!    `~/Library/Application Support/emi-planner` on macOS, `%APPDATA%` on Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::storage::StoreError;

pub const DATA_DIR_ENV: &str = "EMI_PLANNER_DATA_DIR";

const SAVED_PLANS_FILE: &str = "saved_plans.json";

/// Paths used by the planner.
#[derive(Debug, Clone)]
pub struct PlannerPaths {
    data_dir: PathBuf,
}

impl PlannerPaths {
    /// Resolve paths, preferring an explicit directory when given.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, StoreError> {
        let data_dir = match explicit {
            Some(dir) => dir.to_path_buf(),
            None => ProjectDirs::from("", "", "emi-planner")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| {
                    StoreError::Io(format!(
                        "Could not determine a data directory; set {DATA_DIR_ENV} or pass --data-dir"
                    ))
                })?,
        };
        Ok(Self { data_dir })
    }

    #[cfg(test)]
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The saved-plans list, a JSON array of `{id, loanPlan}`
    pub fn saved_plans_file(&self) -> PathBuf {
        self.data_dir.join(SAVED_PLANS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_dir_wins() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::resolve(Some(temp_dir.path())).unwrap();
        assert_eq!(paths.data_dir(), temp_dir.path());
        assert_eq!(
            paths.saved_plans_file(),
            temp_dir.path().join("saved_plans.json")
        );
    }
}
