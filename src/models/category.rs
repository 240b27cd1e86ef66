//! Expense categories and their display colors
//!
//! The app offers a fixed set of categories, but stored data may carry any
//! string; unknown names survive a load/save cycle as `Category::Custom`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::expense::Expense;
use super::money::Money;
use crate::error::ExpenseResult;

/// Color used for categories outside the fixed set
pub const FALLBACK_COLOR: &str = "#AAAAAA";

/// Category of an expense
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Food,
    Travel,
    Shopping,
    Utility,
    Other,
    /// Any other stored label, kept verbatim
    Custom(String),
}

impl Category {
    /// The categories offered when adding or editing an expense
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Travel,
        Category::Shopping,
        Category::Utility,
        Category::Other,
    ];

    pub fn name(&self) -> &str {
        match self {
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Shopping => "Shopping",
            Self::Utility => "Utility",
            Self::Other => "Other",
            Self::Custom(name) => name,
        }
    }

    /// Display color for charts and badges
    pub fn color(&self) -> &'static str {
        match self {
            Self::Food => "#FF6384",
            Self::Travel => "#36A2EB",
            Self::Shopping => "#FFCE56",
            Self::Utility => "#60A5FA",
            Self::Other => "#3B82F6",
            Self::Custom(_) => FALLBACK_COLOR,
        }
    }

    /// Whether this is one of the fixed categories
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Food" => Self::Food,
            "Travel" => Self::Travel,
            "Shopping" => Self::Shopping,
            "Utility" => Self::Utility,
            "Other" => Self::Other,
            _ => Self::Custom(name),
        }
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Custom(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parses user input against the fixed set, ignoring case
impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .cloned()
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// Error for category names outside the fixed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
        write!(
            f,
            "Unknown category '{}' (expected one of: {})",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for CategoryParseError {}

/// Sum of amounts for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Money,
    /// Number of expenses in the group
    pub count: usize,
    pub color: &'static str,
}

/// Group expenses by category, summing amounts
///
/// Groups appear in first-occurrence order; categories with no expenses are
/// not returned. A group total that does not fit is an error.
pub fn group_by_category<'a, I>(expenses: I) -> ExpenseResult<Vec<CategoryTotal>>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut groups: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        match groups.iter_mut().find(|g| g.category == expense.category) {
            Some(group) => {
                group.total = group.total.checked_add(expense.amount)?;
                group.count += 1;
            }
            None => groups.push(CategoryTotal {
                category: expense.category.clone(),
                total: expense.amount,
                count: 1,
                color: expense.category.color(),
            }),
        }
    }

    Ok(groups)
}
