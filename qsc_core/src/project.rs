//! # Project Data Structures
//!
//! The `Project` struct is the root container for a named collection of
//! quantity calculations. Projects serialize to `.qsp` files as
//! human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── name: String (unique store key)
//! ├── description: String
//! ├── version: schema version string
//! ├── calculations: Vec<Calculation> (ordered; report order)
//! └── created / modified: DateTime<Utc>
//! ```
//!
//! Calculations are kept in insertion order rather than keyed by id:
//! reports list them in the order the user added them, and new records
//! have no id until the store assigns one on first save.
//!
//! ## Example
//!
//! ```rust
//! use qsc_core::project::Project;
//!
//! let project = Project::new("Villa Duplex");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Villa Duplex"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::Calculation;
use crate::totals::{aggregate, MaterialPriceTable, ProjectTotals};

/// Current schema version for .qsp files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Default description for new projects
const DEFAULT_DESCRIPTION: &str = "A new building project.";

/// Root project container.
///
/// Owns its calculation records; the calculation engine itself is
/// stateless and never holds a reference to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Project name; unique key within a store
    pub name: String,

    /// Free-form description
    pub description: String,

    /// All calculation records, in insertion order
    pub calculations: Vec<Calculation>,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qsc_core::project::Project;
    ///
    /// let project = Project::new("Villa Duplex");
    /// assert_eq!(project.name, "Villa Duplex");
    /// assert!(project.calculations.is_empty());
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            version: SCHEMA_VERSION.to_string(),
            name: name.into(),
            description: DEFAULT_DESCRIPTION.to_string(),
            calculations: Vec::new(),
            created: now,
            modified: now,
        }
    }

    /// Append a calculation record.
    pub fn add_calculation(&mut self, calculation: Calculation) {
        self.calculations.push(calculation);
        self.touch();
    }

    /// Remove a calculation by its stable id.
    ///
    /// Returns the removed record if a record with that id existed.
    /// Unsaved records (id `None`) can only be removed by index.
    pub fn remove_calculation(&mut self, id: Uuid) -> Option<Calculation> {
        let index = self
            .calculations
            .iter()
            .position(|calc| calc.id == Some(id))?;
        let removed = self.calculations.remove(index);
        self.touch();
        Some(removed)
    }

    /// Get a calculation by its stable id.
    pub fn get_calculation(&self, id: Uuid) -> Option<&Calculation> {
        self.calculations.iter().find(|calc| calc.id == Some(id))
    }

    /// Get a mutable reference to a calculation by its stable id.
    ///
    /// Marks the project as modified when the record is found.
    pub fn get_calculation_mut(&mut self, id: Uuid) -> Option<&mut Calculation> {
        let found = self
            .calculations
            .iter_mut()
            .position(|calc| calc.id == Some(id))?;
        self.modified = Utc::now();
        self.calculations.get_mut(found)
    }

    /// Number of calculation records.
    pub fn calculation_count(&self) -> usize {
        self.calculations.len()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Aggregate all evaluated calculations into material totals and an
    /// estimated cost. Recomputed from scratch on every call.
    pub fn totals(&self, prices: &MaterialPriceTable) -> ProjectTotals {
        aggregate(&self.calculations, prices)
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("")
    }
}
