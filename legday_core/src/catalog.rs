//! Default catalog of leg-training exercises.
//!
//! This module provides the built-in exercise list for the system.

use crate::types::Exercise;
use once_cell::sync::Lazy;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// The complete, ordered catalog of exercises
///
/// Built at load time and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct Catalog {
    exercises: Vec<Exercise>,
}

/// Builds the default catalog with the built-in exercises
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalog
/// creation.
pub fn build_default_catalog() -> Catalog {
    let exercises = vec![
        Exercise {
            id: 1,
            title: "Bodyweight Squat".into(),
            note: "Feet shoulder-width apart, chest up, sit back until your \
                   thighs are parallel to the floor. The foundation of every \
                   leg day."
                .into(),
            reference_url: "https://www.youtube.com/watch?v=aclHkVaku9U".into(),
        },
        Exercise {
            id: 2,
            title: "Sumo Squat".into(),
            note: "Wide stance, toes pointed out. Targets the inner thighs \
                   and glutes more than the standard squat."
                .into(),
            reference_url: "https://www.youtube.com/watch?v=9ZuXKqRbT9k".into(),
        },
        Exercise {
            id: 3,
            title: "Bulgarian Split Squat".into(),
            note: "Rear foot elevated on a bench or chair. Keep the front \
                   knee tracking over the toes and lower under control."
                .into(),
            reference_url: "https://www.youtube.com/watch?v=2C-uNgKwPLE".into(),
        },
        Exercise {
            id: 4,
            title: "Forward Lunge".into(),
            note: "Step forward, drop the back knee toward the floor, push \
                   back to standing. Alternate legs each rep."
                .into(),
            reference_url: "https://www.youtube.com/watch?v=QOVaHwm-Q6U".into(),
        },
        Exercise {
            id: 5,
            title: "Wall Sit".into(),
            note: "Back flat against a wall, knees at ninety degrees. Hold \
                   for the whole countdown and breathe."
                .into(),
            reference_url: "https://www.youtube.com/watch?v=y-wV4Venusw".into(),
        },
        Exercise {
            id: 6,
            title: "Calf Raise".into(),
            note: "Rise onto the balls of your feet, pause at the top, lower \
                   slowly. A step edge increases the range of motion."
                .into(),
            reference_url: "https://www.youtube.com/watch?v=gwLzBJYoWlI".into(),
        },
    ];

    Catalog { exercises }
}

impl Catalog {
    /// All exercises in menu order
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Look up an exercise by id
    ///
    /// An absent id yields `None`; the presentation layer renders a
    /// placeholder for it rather than treating it as an error.
    pub fn lookup(&self, id: u32) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = std::collections::HashSet::new();

        if self.exercises.is_empty() {
            errors.push("Catalog has no exercises".to_string());
        }

        for exercise in &self.exercises {
            if exercise.id == 0 {
                errors.push(format!("Exercise '{}' has id 0", exercise.title));
            }
            if !seen.insert(exercise.id) {
                errors.push(format!("Duplicate exercise id {}", exercise.id));
            }
            if exercise.title.is_empty() {
                errors.push(format!("Exercise {} has empty title", exercise.id));
            }
            if exercise.note.is_empty() {
                errors.push(format!("Exercise {} has empty note", exercise.id));
            }
            if exercise.reference_url.is_empty() {
                errors.push(format!(
                    "Exercise {} has empty reference URL",
                    exercise.id
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.exercises().len(), 6);
    }

    #[test]
    fn test_lookup_returns_intact_record() {
        let catalog = build_default_catalog();
        for expected in catalog.exercises() {
            let found = catalog.lookup(expected.id).expect("known id must resolve");
            assert_eq!(found, expected);
            assert!(!found.title.is_empty());
            assert!(!found.note.is_empty());
            assert!(found.reference_url.starts_with("https://"));
        }
    }

    #[test]
    fn test_lookup_unknown_id_is_none() {
        let catalog = build_default_catalog();
        assert!(catalog.lookup(0).is_none());
        assert!(catalog.lookup(999).is_none());
    }

    #[test]
    fn test_exercises_in_menu_order() {
        let catalog = build_default_catalog();
        let ids: Vec<u32> = catalog.exercises().iter().map(|e| e.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_validate_flags_duplicates() {
        let mut catalog = build_default_catalog();
        let dup = catalog.exercises[0].clone();
        catalog.exercises.push(dup);
        let errors = catalog.validate();
        assert!(errors.iter().any(|e| e.contains("Duplicate")));
    }
}
