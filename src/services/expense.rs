//! Expense service
//!
//! Validation and lookup on top of `ExpenseStore`. The store accepts anything
//! it is handed; this is where empty titles and non-positive amounts are
//! turned away, and where an unknown id becomes a user-facing error.

use chrono::{DateTime, Local, NaiveDate, Utc};
use tracing::info;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, ExpenseId, Money, NewExpense};
use crate::storage::{ExpenseStore, KeyValueStore};

/// Optional field changes for an edit; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ExpenseChanges {
    pub title: Option<String>,
    pub amount: Option<Money>,
    pub category: Option<Category>,
    pub date: Option<DateTime<Utc>>,
}

impl ExpenseChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
    }
}

/// Service for expense management
pub struct ExpenseService<'a, S> {
    store: &'a ExpenseStore<S>,
}

impl<'a, S: KeyValueStore> ExpenseService<'a, S> {
    pub fn new(store: &'a ExpenseStore<S>) -> Self {
        Self { store }
    }

    /// Record a new expense, dated now unless a date is given
    pub fn add(
        &self,
        title: &str,
        amount: Money,
        category: Category,
        date: Option<DateTime<Utc>>,
    ) -> ExpenseResult<Expense> {
        let mut fields = NewExpense::new(title.trim(), amount, category);
        if let Some(date) = date {
            fields = fields.with_date(date);
        }

        fields
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let expense = self.store.create(fields)?;
        info!(id = %expense.id, "Added expense");
        Ok(expense)
    }

    /// All expenses in stored order
    pub fn list(&self) -> ExpenseResult<Vec<Expense>> {
        self.store.list_all()
    }

    /// Fetch an expense, failing if it doesn't exist
    pub fn find(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        self.store
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))
    }

    /// Apply changes to an existing expense; the id never changes
    pub fn edit(&self, id: ExpenseId, changes: ExpenseChanges) -> ExpenseResult<Expense> {
        let mut expense = self.find(id)?;

        if let Some(title) = changes.title {
            expense.title = title.trim().to_string();
        }
        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(category) = changes.category {
            expense.category = category;
        }
        if let Some(date) = changes.date {
            expense.date = date.into();
        }

        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        // Removed between our read and the write
        if !self.store.update(&expense)? {
            return Err(ExpenseError::expense_not_found(id.to_string()));
        }

        info!(id = %expense.id, "Updated expense");
        Ok(expense)
    }

    /// Delete an expense, returning the removed record
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        let expense = self.find(id)?;

        if !self.store.delete(id)? {
            return Err(ExpenseError::expense_not_found(id.to_string()));
        }

        info!(id = %id, "Deleted expense");
        Ok(expense)
    }
}

/// Parse an amount typed by the user; it must be a positive number
pub fn parse_amount(input: &str) -> ExpenseResult<Money> {
    let amount = Money::parse(input).map_err(|e| ExpenseError::Validation(e.to_string()))?;
    if !amount.is_positive() {
        return Err(ExpenseError::Validation(format!(
            "Amount must be greater than zero: '{}'",
            input.trim()
        )));
    }
    Ok(amount)
}

/// Parse a category name from the fixed set (case-insensitive)
pub fn parse_category(input: &str) -> ExpenseResult<Category> {
    input
        .parse()
        .map_err(|e: crate::models::CategoryParseError| ExpenseError::Validation(e.to_string()))
}

/// Category to filter on
///
/// Fixed names match ignoring case; anything else selects stored records
/// carrying exactly that label.
pub fn parse_filter_category(input: &str) -> Category {
    input
        .parse()
        .unwrap_or_else(|_| Category::from(input.trim()))
}

/// Parse a calendar date (`YYYY-MM-DD`)
pub fn parse_day(input: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!("Invalid date '{}' (expected YYYY-MM-DD)", input.trim()))
    })
}

/// Parse an expense timestamp
///
/// Accepts a full RFC 3339 timestamp or a plain `YYYY-MM-DD`, which is taken
/// as local midnight.
pub fn parse_date(input: &str) -> ExpenseResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(input.trim()) {
        return Ok(ts.with_timezone(&Utc));
    }

    let day = parse_day(input)?;
    day.and_hms_opt(0, 0, 0)
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| {
            ExpenseError::Validation(format!("Date '{}' does not exist locally", input.trim()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    fn store() -> ExpenseStore<MemoryStore> {
        ExpenseStore::new(MemoryStore::new())
    }

    #[test]
    fn test_add_trims_and_stores() {
        let store = store();
        let service = ExpenseService::new(&store);

        let expense = service
            .add("  Coffee  ", Money::from_cents(450), Category::Food, None)
            .unwrap();

        assert_eq!(expense.title, "Coffee");
        assert_eq!(store.list_all().unwrap(), vec![expense]);
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let store = store();
        let service = ExpenseService::new(&store);

        let err = service
            .add("   ", Money::from_cents(450), Category::Food, None)
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .add("Coffee", Money::from_cents(-1), Category::Food, None)
            .unwrap_err();
        assert!(err.is_validation());

        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_add_with_explicit_date() {
        let store = store();
        let service = ExpenseService::new(&store);
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();

        let expense = service
            .add("Taxi", Money::from_cents(1200), Category::Travel, Some(date))
            .unwrap();
        assert_eq!(expense.date, date);
    }

    #[test]
    fn test_edit_changes_only_given_fields() {
        let store = store();
        let service = ExpenseService::new(&store);
        let original = service
            .add("Lunch", Money::from_cents(800), Category::Food, None)
            .unwrap();

        let edited = service
            .edit(
                original.id,
                ExpenseChanges {
                    amount: Some(Money::from_cents(950)),
                    category: Some(Category::Other),
                    ..ExpenseChanges::default()
                },
            )
            .unwrap();

        assert_eq!(edited.id, original.id);
        assert_eq!(edited.title, "Lunch");
        assert_eq!(edited.amount, Money::from_cents(950));
        assert_eq!(edited.category, Category::Other);
        assert_eq!(edited.date, original.date);
        assert_eq!(service.find(original.id).unwrap(), edited);
    }

    #[test]
    fn test_edit_rejects_blank_title_without_writing() {
        let store = store();
        let service = ExpenseService::new(&store);
        let original = service
            .add("Lunch", Money::from_cents(800), Category::Food, None)
            .unwrap();

        let err = service
            .edit(
                original.id,
                ExpenseChanges {
                    title: Some("  ".into()),
                    ..ExpenseChanges::default()
                },
            )
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(service.find(original.id).unwrap(), original);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let store = store();
        let service = ExpenseService::new(&store);
        let id = ExpenseId::from_raw(7);

        assert!(service.find(id).unwrap_err().is_not_found());
        assert!(service.delete(id).unwrap_err().is_not_found());
        assert!(service
            .edit(id, ExpenseChanges::default())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_delete_returns_removed_record() {
        let store = store();
        let service = ExpenseService::new(&store);
        let expense = service
            .add("Movie", Money::from_cents(1500), Category::Other, None)
            .unwrap();

        assert_eq!(service.delete(expense.id).unwrap(), expense);
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("4.5").unwrap(), Money::from_cents(450));
        assert!(parse_amount("0").unwrap_err().is_validation());
        assert!(parse_amount("-3").unwrap_err().is_validation());
        assert!(parse_amount("lots").unwrap_err().is_validation());
        assert!(parse_amount("").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("shopping").unwrap(), Category::Shopping);
        assert!(parse_category("Rent").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_filter_category() {
        assert_eq!(parse_filter_category("FOOD"), Category::Food);
        assert_eq!(
            parse_filter_category(" Gifts "),
            Category::Custom("Gifts".into())
        );
    }

    #[test]
    fn test_edit_keeps_precise_amount_of_neighbour() {
        let store = store();
        let service = ExpenseService::new(&store);
        let tip = service
            .add("Tip", Money::parse("0.125").unwrap(), Category::Food, None)
            .unwrap();
        let lunch = service
            .add("Lunch", Money::from_cents(800), Category::Food, None)
            .unwrap();

        service
            .edit(
                lunch.id,
                ExpenseChanges {
                    title: Some("Dinner".into()),
                    ..ExpenseChanges::default()
                },
            )
            .unwrap();

        assert_eq!(service.find(tip.id).unwrap().amount, Money::parse("0.125").unwrap());
    }

    #[test]
    fn test_parse_date() {
        let ts = parse_date("2024-03-10T08:30:00.000Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap());

        let midnight = parse_date("2024-03-10").unwrap();
        assert_eq!(
            midnight.with_timezone(&Local).date_naive(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );

        assert!(parse_date("10/03/2024").unwrap_err().is_validation());
    }
}
