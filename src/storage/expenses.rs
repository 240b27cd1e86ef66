//! Expense store
//!
//! All expenses live as one JSON array under the `expenses` key of a
//! key-value backend. Every mutation reads the whole array, changes it in
//! memory and writes it back with a single `set_item` call, so a failed
//! write never leaves a half-updated collection behind.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::ExpenseError;
use crate::models::{group_by_category, CategoryTotal, Expense, ExpenseId, Money, NewExpense};

use super::kv::KeyValueStore;

/// Key under which the expense collection is stored
pub const EXPENSES_KEY: &str = "expenses";

/// Owner of the persisted expense collection
pub struct ExpenseStore<S> {
    backend: S,
    /// Serializes read-modify-write cycles so concurrent callers can't lose updates
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> ExpenseStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Every stored expense, in insertion order
    ///
    /// An absent key reads as an empty list.
    pub fn list_all(&self) -> Result<Vec<Expense>, ExpenseError> {
        self.read_collection()
    }

    /// Look up a single expense
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        Ok(self.read_collection()?.into_iter().find(|e| e.id == id))
    }

    /// Append a new expense and return it with its assigned id
    ///
    /// No validation happens here; callers check input first.
    pub fn create(&self, fields: NewExpense) -> Result<Expense, ExpenseError> {
        let _guard = self.lock()?;

        let mut expenses = self.read_collection()?;
        let id = ExpenseId::next(expenses.iter().map(|e| e.id), Utc::now());
        let expense = fields.into_expense(id);
        expenses.push(expense.clone());

        self.write_collection(&expenses)?;
        debug!(id = %expense.id, category = %expense.category, "Expense created");
        Ok(expense)
    }

    /// Overwrite the stored record with the same id, keeping its position
    ///
    /// A missing id is a silent no-op: nothing is written and `Ok(false)` is
    /// returned.
    pub fn update(&self, expense: &Expense) -> Result<bool, ExpenseError> {
        let _guard = self.lock()?;

        let mut expenses = self.read_collection()?;
        let Some(slot) = expenses.iter_mut().find(|e| e.id == expense.id) else {
            debug!(id = %expense.id, "Update skipped, no such expense");
            return Ok(false);
        };
        *slot = expense.clone();

        self.write_collection(&expenses)?;
        debug!(id = %expense.id, "Expense updated");
        Ok(true)
    }

    /// Remove the record with `id`
    ///
    /// A missing id is a silent no-op: nothing is written and `Ok(false)` is
    /// returned.
    pub fn delete(&self, id: ExpenseId) -> Result<bool, ExpenseError> {
        let _guard = self.lock()?;

        let mut expenses = self.read_collection()?;
        let before = expenses.len();
        expenses.retain(|e| e.id != id);
        if expenses.len() == before {
            debug!(id = %id, "Delete skipped, no such expense");
            return Ok(false);
        }

        self.write_collection(&expenses)?;
        debug!(id = %id, "Expense deleted");
        Ok(true)
    }

    /// Totals per category over every stored expense
    ///
    /// Categories without expenses are omitted; order follows the first
    /// occurrence of each category in the collection.
    pub fn aggregate_by_category(&self) -> Result<Vec<CategoryTotal>, ExpenseError> {
        group_by_category(&self.read_collection()?)
    }

    /// Sum of amounts over a caller-supplied (usually filtered) set
    pub fn sum_amounts(expenses: &[Expense]) -> Result<Money, ExpenseError> {
        crate::models::sum_amounts(expenses)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, ExpenseError> {
        self.write_lock.lock().map_err(|e| {
            ExpenseError::StorageUnavailable(format!("Failed to acquire store lock: {}", e))
        })
    }

    fn read_collection(&self) -> Result<Vec<Expense>, ExpenseError> {
        let Some(raw) = self.backend.get_item(EXPENSES_KEY)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|e| {
            warn!(error = %e, "Stored expenses could not be parsed");
            ExpenseError::malformed(EXPENSES_KEY, e)
        })
    }

    fn write_collection(&self, expenses: &[Expense]) -> Result<(), ExpenseError> {
        let raw = serde_json::to_string(expenses).map_err(|e| {
            ExpenseError::StorageUnavailable(format!("Failed to serialize expenses: {}", e))
        })?;
        self.backend.set_item(EXPENSES_KEY, &raw)
    }
}
