// File: src/rules.rs
// Purpose: Declarative field rules and the groups that select them

use crate::value::FieldValue;
use std::fmt;

/// A named tag selecting which rules run for one validation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Group(&'static str);

impl Group {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Built-in rule kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Text that is present and contains a non-whitespace character
    NotBlank,
    NotNull,
    /// The field must be absent
    Null,
    /// Integer within `[min, max]`; null passes
    Range { min: i64, max: i64 },
    /// Integer at most the bound; null passes
    Max(i64),
}

impl Constraint {
    /// Short error code, also the first segment of every message key
    pub fn code(&self) -> &'static str {
        match self {
            Constraint::NotBlank => "NotBlank",
            Constraint::NotNull => "NotNull",
            Constraint::Null => "Null",
            Constraint::Range { .. } => "Range",
            Constraint::Max(_) => "Max",
        }
    }

    /// Arguments handed to the message template
    pub fn arguments(&self) -> Vec<FieldValue> {
        match self {
            Constraint::Range { min, max } => vec![FieldValue::Int(*min), FieldValue::Int(*max)],
            Constraint::Max(max) => vec![FieldValue::Int(*max)],
            _ => Vec::new(),
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Constraint::NotBlank => "must not be blank",
            Constraint::NotNull => "must not be null",
            Constraint::Null => "must be null",
            Constraint::Range { .. } => "must be between {0} and {1}",
            Constraint::Max(_) => "must be less than or equal to {0}",
        }
    }

    pub fn is_satisfied_by(&self, value: &FieldValue) -> bool {
        match self {
            Constraint::NotBlank => !value.is_blank(),
            Constraint::NotNull => !value.is_null(),
            Constraint::Null => value.is_null(),
            Constraint::Range { min, max } => value
                .as_int()
                .map_or(true, |n| (*min..=*max).contains(&n)),
            Constraint::Max(max) => value.as_int().map_or(true, |n| n <= *max),
        }
    }
}

/// One row of a form's rule table: `(field, rule, groups)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub constraint: Constraint,
    pub groups: &'static [Group],
}

impl FieldRule {
    pub const fn new(field: &'static str, constraint: Constraint) -> Self {
        Self {
            field,
            constraint,
            groups: &[],
        }
    }

    pub const fn in_groups(mut self, groups: &'static [Group]) -> Self {
        self.groups = groups;
        self
    }

    /// A rule without groups always runs; otherwise it needs a shared group
    pub fn applies_to(&self, active: &[Group]) -> bool {
        self.groups.is_empty() || self.groups.iter().any(|g| active.contains(g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAVE: Group = Group::new("SaveCheck");
    const UPDATE: Group = Group::new("UpdateCheck");

    #[rstest]
    #[case(Constraint::NotBlank, FieldValue::from("pen"), true)]
    #[case(Constraint::NotBlank, FieldValue::from(""), false)]
    #[case(Constraint::NotBlank, FieldValue::from(" \t"), false)]
    #[case(Constraint::NotBlank, FieldValue::Null, false)]
    #[case(Constraint::NotNull, FieldValue::Int(0), true)]
    #[case(Constraint::NotNull, FieldValue::Null, false)]
    #[case(Constraint::Null, FieldValue::Null, true)]
    #[case(Constraint::Null, FieldValue::Int(1), false)]
    #[case(Constraint::Range { min: 1000, max: 1000000 }, FieldValue::Int(1000), true)]
    #[case(Constraint::Range { min: 1000, max: 1000000 }, FieldValue::Int(1000000), true)]
    #[case(Constraint::Range { min: 1000, max: 1000000 }, FieldValue::Int(500), false)]
    #[case(Constraint::Range { min: 1000, max: 1000000 }, FieldValue::Null, true)]
    #[case(Constraint::Max(9999), FieldValue::Int(9999), true)]
    #[case(Constraint::Max(9999), FieldValue::Int(10000), false)]
    #[case(Constraint::Max(9999), FieldValue::Null, true)]
    fn test_constraint(
        #[case] constraint: Constraint,
        #[case] value: FieldValue,
        #[case] ok: bool,
    ) {
        assert_eq!(constraint.is_satisfied_by(&value), ok);
    }

    #[test]
    fn test_arguments() {
        assert_eq!(
            Constraint::Range { min: 1000, max: 1000000 }.arguments(),
            vec![FieldValue::Int(1000), FieldValue::Int(1000000)]
        );
        assert_eq!(Constraint::Max(9999).arguments(), vec![FieldValue::Int(9999)]);
        assert!(Constraint::NotBlank.arguments().is_empty());
    }

    #[test]
    fn test_group_selection() {
        let always = FieldRule::new("itemName", Constraint::NotBlank);
        let save_only = FieldRule::new("id", Constraint::Null).in_groups(&[SAVE]);

        assert!(always.applies_to(&[]));
        assert!(always.applies_to(&[UPDATE]));
        assert!(!save_only.applies_to(&[]));
        assert!(!save_only.applies_to(&[UPDATE]));
        assert!(save_only.applies_to(&[SAVE]));
        assert!(save_only.applies_to(&[UPDATE, SAVE]));
    }
}
