//! # Project Store
//!
//! Name-keyed persistence for projects: one `.qsp` JSON file per project
//! inside a store directory. The store is the only part of the crate that
//! touches the filesystem; the calculation engine stays pure.
//!
//! Safety features:
//! - **Atomic saves**: write to .tmp, fsync, rename
//! - **Unique names**: creating a project whose name is already taken fails
//! - **Version validation**: schema compatibility checked on load
//! - **Id assignment**: unsaved calculations get their stable UUID on
//!   first save
//!
//! ## Example
//!
//! ```rust,no_run
//! use qsc_core::project::Project;
//! use qsc_core::store::ProjectStore;
//! use std::path::Path;
//!
//! let store = ProjectStore::open(Path::new("projects"))?;
//!
//! let mut project = Project::new("Villa Duplex");
//! store.create(&mut project)?;
//!
//! let loaded = store.load("Villa Duplex")?;
//! assert_eq!(loaded.name, "Villa Duplex");
//! # Ok::<(), qsc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// File extension for stored projects
const PROJECT_EXTENSION: &str = "qsp";

/// A directory-backed project store keyed by project name.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    dir: PathBuf,
}

impl ProjectStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> CalcResult<Self> {
        fs::create_dir_all(dir).map_err(|e| {
            CalcError::file_error("create store dir", dir.display().to_string(), e.to_string())
        })?;
        Ok(ProjectStore {
            dir: dir.to_path_buf(),
        })
    }

    /// The store's root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save a new project. Fails with `ProjectExists` if a project with
    /// this name is already stored.
    ///
    /// Assigns ids to unsaved calculations and bumps the modified
    /// timestamp before writing, mutating the caller's project so it
    /// matches what was stored.
    pub fn create(&self, project: &mut Project) -> CalcResult<()> {
        let path = self.path_for(&project.name);
        if path.exists() {
            return Err(CalcError::project_exists(&project.name));
        }
        self.write(project, &path)
    }

    /// Overwrite an existing project. Fails with `ProjectNotFound` if no
    /// project with this name is stored.
    pub fn update(&self, project: &mut Project) -> CalcResult<()> {
        let path = self.path_for(&project.name);
        if !path.exists() {
            return Err(CalcError::project_not_found(&project.name));
        }
        self.write(project, &path)
    }

    /// Load a project by name.
    ///
    /// # Errors
    ///
    /// * `ProjectNotFound` - no stored project under this name
    /// * `VersionMismatch` - the file's schema version is incompatible
    /// * `SerializationError` - the file is not valid project JSON
    pub fn load(&self, name: &str) -> CalcResult<Project> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(CalcError::project_not_found(name));
        }

        let mut contents = String::new();
        File::open(&path)
            .and_then(|mut file| file.read_to_string(&mut contents))
            .map_err(|e| {
                CalcError::file_error("read", path.display().to_string(), e.to_string())
            })?;

        let project: Project =
            serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
                reason: format!("Invalid JSON in {}: {}", path.display(), e),
            })?;

        validate_version(&project.version)?;

        // Distinct names can sanitize to the same file name; the stored
        // name is authoritative
        if project.name != name {
            return Err(CalcError::project_not_found(name));
        }

        Ok(project)
    }

    /// List the names of all stored projects, sorted.
    pub fn list(&self) -> CalcResult<Vec<String>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            CalcError::file_error("read store dir", self.dir.display().to_string(), e.to_string())
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                CalcError::file_error(
                    "read store dir",
                    self.dir.display().to_string(),
                    e.to_string(),
                )
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PROJECT_EXTENSION) {
                continue;
            }
            // The file name is sanitized; the stored project carries the
            // real name
            if let Ok(contents) = fs::read_to_string(&path) {
                if let Ok(project) = serde_json::from_str::<Project>(&contents) {
                    names.push(project.name);
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Delete a stored project by name.
    ///
    /// Returns the deleted project's name, mirroring the store's
    /// load-then-confirm contract. Fails with `ProjectNotFound` if absent.
    pub fn delete(&self, name: &str) -> CalcResult<String> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(CalcError::project_not_found(name));
        }
        fs::remove_file(&path).map_err(|e| {
            CalcError::file_error("delete", path.display().to_string(), e.to_string())
        })?;
        Ok(name.to_string())
    }

    /// True if a project with this name is stored.
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", sanitize_name(name), PROJECT_EXTENSION))
    }

    /// Assign ids, bump the timestamp, and write atomically.
    fn write(&self, project: &mut Project, path: &Path) -> CalcResult<()> {
        for calc in &mut project.calculations {
            if calc.id.is_none() {
                calc.id = Some(Uuid::new_v4());
            }
        }
        project.modified = Utc::now();

        let json =
            serde_json::to_string_pretty(project).map_err(|e| CalcError::SerializationError {
                reason: e.to_string(),
            })?;

        // Atomic save: temp file, fsync, rename
        let tmp_path = path.with_extension(format!("{}.tmp", PROJECT_EXTENSION));

        let mut tmp_file = File::create(&tmp_path).map_err(|e| {
            CalcError::file_error(
                "create temp file",
                tmp_path.display().to_string(),
                e.to_string(),
            )
        })?;

        tmp_file.write_all(json.as_bytes()).map_err(|e| {
            CalcError::file_error(
                "write temp file",
                tmp_path.display().to_string(),
                e.to_string(),
            )
        })?;

        tmp_file.sync_all().map_err(|e| {
            CalcError::file_error(
                "sync temp file",
                tmp_path.display().to_string(),
                e.to_string(),
            )
        })?;

        fs::rename(&tmp_path, path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
        })?;

        Ok(())
    }
}

/// Replace every non-alphanumeric character with '_' for use as a file
/// name, the same rule the report exports use.
pub(crate) fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Validate that a file's schema version is compatible.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // For 0.x versions, a newer minor than we support is also a mismatch
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{Calculation, CalculationItem, ConcreteInput};
    use std::env::temp_dir;

    fn test_store(name: &str) -> ProjectStore {
        let dir = temp_dir().join(format!("qsc_store_test_{}", name));
        let _ = fs::remove_dir_all(&dir);
        ProjectStore::open(&dir).unwrap()
    }

    fn slab_calculation() -> Calculation {
        Calculation::evaluated(CalculationItem::Concrete(ConcreteInput {
            name: "Slab".to_string(),
            length_m: 2.0,
            width_m: 3.0,
            height_m: 0.15,
            concrete_mix: "1:2:4".to_string(),
            waste_factor_pct: 5.0,
        }))
        .unwrap()
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Villa Duplex"), "Villa_Duplex");
        assert_eq!(sanitize_name("plot-42/B"), "plot_42_B");
        assert_eq!(sanitize_name("Simple1"), "Simple1");
    }

    #[test]
    fn test_create_and_load_roundtrip() {
        let store = test_store("roundtrip");

        let mut project = Project::new("Villa Duplex");
        project.add_calculation(slab_calculation());
        store.create(&mut project).unwrap();

        let loaded = store.load("Villa Duplex").unwrap();
        assert_eq!(loaded, project);
        assert_eq!(loaded.calculation_count(), 1);
    }

    #[test]
    fn test_create_assigns_ids() {
        let store = test_store("assign_ids");

        let mut project = Project::new("Ids");
        project.add_calculation(slab_calculation());
        assert!(project.calculations[0].id.is_none());

        store.create(&mut project).unwrap();
        let first_id = project.calculations[0].id;
        assert!(first_id.is_some());

        // Ids are stable across subsequent saves
        store.update(&mut project).unwrap();
        assert_eq!(project.calculations[0].id, first_id);
    }

    #[test]
    fn test_duplicate_create_rejected() {
        let store = test_store("duplicate");

        let mut project = Project::new("Taken");
        store.create(&mut project).unwrap();

        let mut second = Project::new("Taken");
        let err = store.create(&mut second).unwrap_err();
        assert_eq!(err.error_code(), "PROJECT_EXISTS");
    }

    #[test]
    fn test_update_requires_existing() {
        let store = test_store("update_missing");
        let mut project = Project::new("Ghost");
        let err = store.update(&mut project).unwrap_err();
        assert_eq!(err.error_code(), "PROJECT_NOT_FOUND");
    }

    #[test]
    fn test_update_bumps_modified() {
        let store = test_store("bump");

        let mut project = Project::new("Bump");
        store.create(&mut project).unwrap();
        let first_modified = project.modified;

        project.add_calculation(slab_calculation());
        store.update(&mut project).unwrap();
        assert!(project.modified >= first_modified);
    }

    #[test]
    fn test_list_returns_stored_names() {
        let store = test_store("list");
        store.create(&mut Project::new("Beta Block")).unwrap();
        store.create(&mut Project::new("Alpha House")).unwrap();

        let names = store.list().unwrap();
        assert_eq!(names, vec!["Alpha House", "Beta Block"]);
    }

    #[test]
    fn test_delete() {
        let store = test_store("delete");
        store.create(&mut Project::new("Doomed")).unwrap();

        let deleted = store.delete("Doomed").unwrap();
        assert_eq!(deleted, "Doomed");
        assert!(!store.exists("Doomed"));

        let err = store.delete("Doomed").unwrap_err();
        assert_eq!(err.error_code(), "PROJECT_NOT_FOUND");
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let store = test_store("atomic");
        let mut project = Project::new("Atomic");
        store.create(&mut project).unwrap();

        let tmp: Vec<_> = fs::read_dir(store.dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp.is_empty());
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
