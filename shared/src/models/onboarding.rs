//! Onboarding Model
//!
//! Profile completeness is a pure predicate over six restaurant fields.
//! The server persists a cached copy of the result, but every read of
//! completeness goes through [`OnboardingSnapshot::is_complete`].

use serde::{Deserialize, Serialize};

/// The fields that decide whether a restaurant profile is complete
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingSnapshot {
    pub name: Option<String>,
    #[serde(default)]
    pub cuisine: Vec<String>,
    pub currency: Option<String>,
    pub timezone: Option<String>,
    /// Number of business-hours entries
    #[serde(default)]
    pub business_hours: usize,
    /// Number of menu categories
    #[serde(default)]
    pub menu_categories: usize,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl OnboardingSnapshot {
    /// name, cuisine, currency, timezone, business hours and menu
    /// categories must all be present and non-empty
    pub fn is_complete(&self) -> bool {
        self.basic_info_complete() && self.business_hours > 0 && self.menu_categories > 0
    }

    pub fn basic_info_complete(&self) -> bool {
        present(&self.name)
            && !self.cuisine.is_empty()
            && present(&self.currency)
            && present(&self.timezone)
    }

    /// Wizard steps still outstanding, in wizard order
    pub fn missing_steps(&self) -> Vec<SetupStep> {
        let mut steps = Vec::new();
        if !self.basic_info_complete() {
            steps.push(SetupStep::BasicInfo);
        }
        if self.business_hours == 0 {
            steps.push(SetupStep::BusinessHours);
        }
        if self.menu_categories == 0 {
            steps.push(SetupStep::Menu);
        }
        steps
    }

    pub fn progress(&self) -> SetupProgress {
        let missing_steps = self.missing_steps();
        let completed_steps = SetupStep::ALL
            .into_iter()
            .filter(|step| !missing_steps.contains(step))
            .collect();
        SetupProgress {
            is_complete: self.is_complete(),
            next_step: missing_steps.first().map(|s| s.path().to_string()),
            completed_steps,
            missing_steps,
        }
    }
}

/// Setup wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SetupStep {
    BasicInfo,
    BusinessHours,
    Menu,
}

impl SetupStep {
    pub const ALL: [SetupStep; 3] = [
        SetupStep::BasicInfo,
        SetupStep::BusinessHours,
        SetupStep::Menu,
    ];

    /// Page path for this step
    pub const fn path(&self) -> &'static str {
        match self {
            SetupStep::BasicInfo => "/setup",
            SetupStep::BusinessHours => "/setup/hours",
            SetupStep::Menu => "/setup/menu",
        }
    }
}

/// Wizard progress report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupProgress {
    pub is_complete: bool,
    pub completed_steps: Vec<SetupStep>,
    pub missing_steps: Vec<SetupStep>,
    pub next_step: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> OnboardingSnapshot {
        OnboardingSnapshot {
            name: Some("Joe's".to_string()),
            cuisine: vec!["Italian".to_string()],
            currency: Some("USD".to_string()),
            timezone: Some("America/New_York".to_string()),
            business_hours: 7,
            menu_categories: 1,
        }
    }

    #[test]
    fn test_all_fields_complete() {
        assert!(complete().is_complete());
        assert!(complete().missing_steps().is_empty());
    }

    #[test]
    fn test_removing_any_field_makes_incomplete() {
        let removals: [fn(&mut OnboardingSnapshot); 6] = [
            |s| s.name = None,
            |s| s.cuisine.clear(),
            |s| s.currency = None,
            |s| s.timezone = None,
            |s| s.business_hours = 0,
            |s| s.menu_categories = 0,
        ];
        for remove in removals {
            let mut snapshot = complete();
            remove(&mut snapshot);
            assert!(!snapshot.is_complete(), "{:?}", snapshot);
        }
    }

    #[test]
    fn test_blank_strings_are_not_present() {
        let snapshot = OnboardingSnapshot {
            timezone: Some("  ".to_string()),
            ..complete()
        };
        assert!(!snapshot.is_complete());
        assert_eq!(snapshot.missing_steps(), vec![SetupStep::BasicInfo]);
    }

    #[test]
    fn test_predicate_is_idempotent() {
        let snapshot = complete();
        assert_eq!(snapshot.is_complete(), snapshot.is_complete());
    }

    #[test]
    fn test_progress_of_fresh_restaurant() {
        let snapshot = OnboardingSnapshot {
            name: Some("Joe's".to_string()),
            ..Default::default()
        };
        let progress = snapshot.progress();
        assert!(!progress.is_complete);
        assert!(progress.completed_steps.is_empty());
        assert_eq!(progress.missing_steps, SetupStep::ALL.to_vec());
        assert_eq!(progress.next_step.as_deref(), Some("/setup"));
    }

    #[test]
    fn test_progress_points_at_next_step() {
        let snapshot = OnboardingSnapshot {
            menu_categories: 0,
            ..complete()
        };
        let progress = snapshot.progress();
        assert_eq!(progress.next_step.as_deref(), Some("/setup/menu"));
        assert_eq!(
            progress.completed_steps,
            vec![SetupStep::BasicInfo, SetupStep::BusinessHours]
        );
    }

    #[test]
    fn test_step_wire_names() {
        assert_eq!(
            serde_json::to_string(&SetupStep::BasicInfo).unwrap(),
            "\"basic-info\""
        );
    }
}
