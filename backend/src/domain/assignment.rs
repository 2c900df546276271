//! Cook to dish assignment toggling.

use serde::Serialize;
use utoipa::ToSchema;

use super::{CookId, DishId, RecordName};

/// What a toggle did to the (cook, dish) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentChange {
    /// The pair was absent and has been added.
    Assigned,
    /// The pair was present and has been removed.
    Unassigned,
}

impl AssignmentChange {
    /// Decide the change from the current membership.
    #[must_use]
    pub const fn toggling(currently_assigned: bool) -> Self {
        if currently_assigned {
            Self::Unassigned
        } else {
            Self::Assigned
        }
    }

    /// The change a second toggle would make.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Assigned => Self::Unassigned,
            Self::Unassigned => Self::Assigned,
        }
    }
}

/// Result of toggling a dish for the acting cook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentOutcome {
    /// Acting cook.
    pub cook_id: CookId,
    /// Toggled dish.
    pub dish_id: DishId,
    /// Dish name, for the notification.
    pub dish_name: RecordName,
    /// What happened.
    pub change: AssignmentChange,
}

impl AssignmentOutcome {
    /// Flash message shown to the cook.
    ///
    /// # Examples
    /// ```
    /// use kitchen::domain::{AssignmentChange, AssignmentOutcome, CookId, DishId, RecordName};
    ///
    /// let outcome = AssignmentOutcome {
    ///     cook_id: CookId::new(1),
    ///     dish_id: DishId::new(2),
    ///     dish_name: RecordName::new("Pasta").unwrap(),
    ///     change: AssignmentChange::Assigned,
    /// };
    /// assert_eq!(outcome.notification(), "You are now cooking 'Pasta'");
    /// ```
    #[must_use]
    pub fn notification(&self) -> String {
        match self.change {
            AssignmentChange::Assigned => format!("You are now cooking '{}'", self.dish_name),
            AssignmentChange::Unassigned => {
                format!("You are no longer cooking '{}'", self.dish_name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(false, AssignmentChange::Assigned)]
    #[case(true, AssignmentChange::Unassigned)]
    fn toggling_flips_membership(#[case] assigned: bool, #[case] expected: AssignmentChange) {
        let change = AssignmentChange::toggling(assigned);
        assert_eq!(change, expected);
        assert_eq!(change.inverse().inverse(), change);
    }

    #[rstest]
    fn removal_notification_names_the_dish() {
        let outcome = AssignmentOutcome {
            cook_id: CookId::new(1),
            dish_id: DishId::new(2),
            dish_name: RecordName::new("Pasta").expect("name"),
            change: AssignmentChange::Unassigned,
        };
        assert_eq!(outcome.notification(), "You are no longer cooking 'Pasta'");
    }
}
