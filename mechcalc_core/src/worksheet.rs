//! # Worksheets
//!
//! A `Worksheet` is the root container for a set of calculations.
//! Worksheets serialize to `.mcw` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Worksheet
//! ├── meta: WorksheetMetadata (version, author, title, timestamps)
//! ├── settings: WorksheetSettings (seed, trials, stress uncertainty)
//! └── items: HashMap<Uuid, CalculationItem> (all calculations)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use mechcalc_core::worksheet::Worksheet;
//!
//! let worksheet = Worksheet::new("Jane Engineer", "Gearbox housing");
//! let json = serde_json::to_string_pretty(&worksheet).unwrap();
//! assert!(json.contains("Gearbox housing"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::calculations::CalculationItem;
use crate::errors::CalcError;

/// Current schema version for .mcw files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root worksheet container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worksheet {
    pub meta: WorksheetMetadata,

    #[serde(default)]
    pub settings: WorksheetSettings,

    /// All calculation items, keyed by UUID
    pub items: HashMap<Uuid, CalculationItem>,
}

impl Worksheet {
    /// Create a new empty worksheet.
    pub fn new(author: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Worksheet {
            meta: WorksheetMetadata {
                version: SCHEMA_VERSION.to_string(),
                author: author.into(),
                title: title.into(),
                created: now,
                modified: now,
            },
            settings: WorksheetSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a calculation item to the worksheet.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Evaluate every item with the worksheet settings.
    ///
    /// A failing item does not stop the others; its error is reported in
    /// its [`ItemReport`]. Reports are sorted by label.
    pub fn evaluate_all(&self) -> Vec<ItemReport> {
        let mut reports: Vec<ItemReport> = self
            .items
            .iter()
            .map(|(id, item)| {
                let outcome = match item.evaluate(&self.settings) {
                    Ok(value) => Outcome::Result(value),
                    Err(e) => {
                        log::warn!("{} '{}' failed: {}", item.calc_type(), item.label(), e);
                        Outcome::Error(e)
                    }
                };
                ItemReport {
                    id: *id,
                    label: item.label().to_string(),
                    calc_type: item.calc_type().to_string(),
                    outcome,
                }
            })
            .collect();
        reports.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));
        log::info!("Evaluated {} items in '{}'", reports.len(), self.meta.title);
        reports
    }
}

impl Default for Worksheet {
    fn default() -> Self {
        Worksheet::new("", "")
    }
}

/// Worksheet metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    pub author: String,
    pub title: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Defaults applied to optional calculator inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorksheetSettings {
    /// Seed for Monte Carlo calculators
    pub default_seed: u64,
    /// Trial count for Monte Carlo calculators
    pub default_trials: u32,
    /// Stress uncertainty for fatigue and crack growth bounds (%)
    pub stress_uncertainty_pct: f64,
}

impl Default for WorksheetSettings {
    fn default() -> Self {
        WorksheetSettings {
            default_seed: 42,
            default_trials: 500,
            stress_uncertainty_pct: 10.0,
        }
    }
}

/// Result or error of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Result(Value),
    Error(CalcError),
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Result(_))
    }
}

/// Evaluation report for one worksheet item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReport {
    pub id: Uuid,
    pub label: String,
    pub calc_type: String,
    pub outcome: Outcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{
        AshbyInput, ControllerType, FleetInput, Objective, PidInput, SplSumInput, TuningRule,
    };

    fn pid(label: &str, gain: f64) -> CalculationItem {
        CalculationItem::Pid(PidInput {
            label: label.to_string(),
            ultimate_gain: gain,
            ultimate_period_s: 8.0,
            rule: TuningRule::ZieglerNichols,
            controller: ControllerType::Pid,
        })
    }

    #[test]
    fn test_worksheet_creation() {
        let worksheet = Worksheet::new("John Doe", "Pump skid");
        assert_eq!(worksheet.meta.author, "John Doe");
        assert_eq!(worksheet.meta.title, "Pump skid");
        assert_eq!(worksheet.meta.version, SCHEMA_VERSION);
        assert_eq!(worksheet.settings, WorksheetSettings::default());
    }

    #[test]
    fn test_worksheet_serialization() {
        let mut worksheet = Worksheet::new("Jane", "Test");
        worksheet.add_item(pid("Loop", 5.0));
        let json = serde_json::to_string_pretty(&worksheet).unwrap();
        assert!(json.contains("\"default_seed\": 42"));

        let roundtrip: Worksheet = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.item_count(), 1);
        assert_eq!(roundtrip.meta.author, "Jane");
    }

    #[test]
    fn test_settings_default_when_missing() {
        let settings: WorksheetSettings = serde_json::from_str(r#"{"default_trials": 50}"#).unwrap();
        assert_eq!(settings.default_trials, 50);
        assert_eq!(settings.default_seed, 42);
    }

    #[test]
    fn test_add_remove_item() {
        let mut worksheet = Worksheet::new("Engineer", "Test");
        let id = worksheet.add_item(pid("Loop", 5.0));
        assert_eq!(worksheet.item_count(), 1);
        assert!(worksheet.get_item(&id).is_some());

        assert!(worksheet.remove_item(&id).is_some());
        assert_eq!(worksheet.item_count(), 0);
        assert!(worksheet.remove_item(&id).is_none());
    }

    #[test]
    fn test_evaluate_all_sorted_and_isolated() {
        let mut worksheet = Worksheet::new("Engineer", "Test");
        worksheet.add_item(pid("B loop", 5.0));
        worksheet.add_item(pid("A loop", -1.0));
        worksheet.add_item(CalculationItem::Ashby(AshbyInput {
            label: "C steel".to_string(),
            youngs_modulus_gpa: 200.0,
            strength_mpa: 250.0,
            density_kg_m3: 8000.0,
            objective: Objective::TieStiffness,
        }));

        let reports = worksheet.evaluate_all();
        let labels: Vec<&str> = reports.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["A loop", "B loop", "C steel"]);
        assert!(!reports[0].outcome.is_ok());
        assert!(reports[1].outcome.is_ok());
        assert_eq!(reports[2].calc_type, "Ashby");
    }

    #[test]
    fn test_sentinel_is_a_result() {
        let mut worksheet = Worksheet::new("Engineer", "Test");
        worksheet.add_item(CalculationItem::SplSum(SplSumInput {
            label: "Empty".to_string(),
            levels_db: String::new(),
        }));
        let reports = worksheet.evaluate_all();
        match &reports[0].outcome {
            Outcome::Result(value) => assert!(value.get("error").is_some()),
            Outcome::Error(e) => panic!("unexpected error {}", e),
        }
    }

    #[test]
    fn test_settings_fill_monte_carlo_defaults() {
        let mut worksheet = Worksheet::new("Engineer", "Fleet");
        worksheet.settings.default_seed = 7;
        worksheet.settings.default_trials = 20;
        worksheet.add_item(CalculationItem::Fleet(FleetInput {
            label: "Fleet".to_string(),
            printer_count: 2,
            printer_cost: 5000.0,
            annual_demand_mean: 1000.0,
            annual_demand_std: 100.0,
            print_hours_per_part: 2.0,
            available_hours_per_year: 2000.0,
            uptime_mean: 0.9,
            uptime_std: 0.05,
            downtime_probability: 0.1,
            downtime_hours: 40.0,
            operator_issue_probability: 0.1,
            operator_issue_hours: 8.0,
            material_cost_per_part: 3.0,
            operating_cost_per_hour: 1.5,
            outsource_cost_per_part: 20.0,
            trials: None,
            seed: None,
        }));
        let reports = worksheet.evaluate_all();
        match &reports[0].outcome {
            Outcome::Result(value) => {
                assert_eq!(value["seed"].as_u64(), Some(7));
                assert_eq!(value["trials"].as_u64(), Some(20));
            }
            Outcome::Error(e) => panic!("unexpected error {}", e),
        }
    }
}
