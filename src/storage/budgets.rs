//! Budget row accessors.

use rusqlite::params;

use super::Store;
use crate::error::FinResult;
use crate::models::{Budget, BudgetId, Money, UserId};

impl Store {
    /// Look up the budget row for an exact (user, category, month, year) key
    pub fn budget_for_key(
        &self,
        user_id: UserId,
        category: &str,
        month: u32,
        year: i32,
    ) -> FinResult<Option<Budget>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, category, amount_cents, month, year FROM budgets
             WHERE user_id = ?1 AND category = ?2 AND month = ?3 AND year = ?4",
        )?;

        let result = stmt.query_row(params![user_id.as_i64(), category, month, year], |row| {
            Ok(Budget {
                id: BudgetId::from_raw(row.get(0)?),
                user_id: UserId::from_raw(row.get(1)?),
                category: row.get(2)?,
                amount: Money::from_cents(row.get(3)?),
                month: row.get(4)?,
                year: row.get(5)?,
            })
        });

        match result {
            Ok(budget) => Ok(Some(budget)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert a new budget row and return its assigned id
    pub fn insert_budget(
        &self,
        user_id: UserId,
        category: &str,
        amount: Money,
        month: u32,
        year: i32,
    ) -> FinResult<BudgetId> {
        self.conn.execute(
            "INSERT INTO budgets (user_id, category, amount_cents, month, year)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![user_id.as_i64(), category, amount.cents(), month, year],
        )?;

        Ok(BudgetId::from_raw(self.conn.last_insert_rowid()))
    }

    /// Replace the amount of an existing budget row, keeping its identity
    pub fn update_budget_amount(&self, id: BudgetId, amount: Money) -> FinResult<()> {
        self.conn.execute(
            "UPDATE budgets SET amount_cents = ?1 WHERE id = ?2",
            params![amount.cents(), id.as_i64()],
        )?;

        Ok(())
    }

    /// All of a user's budgets, ordered by year, month, then category
    pub fn budgets_for_user(&self, user_id: UserId) -> FinResult<Vec<Budget>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, category, amount_cents, month, year FROM budgets
             WHERE user_id = ?1 ORDER BY year ASC, month ASC, category ASC",
        )?;

        let rows = stmt.query_map(params![user_id.as_i64()], |row| {
            Ok(Budget {
                id: BudgetId::from_raw(row.get(0)?),
                user_id: UserId::from_raw(row.get(1)?),
                category: row.get(2)?,
                amount: Money::from_cents(row.get(3)?),
                month: row.get(4)?,
                year: row.get(5)?,
            })
        })?;

        let mut budgets = Vec::new();
        for row in rows {
            budgets.push(row?);
        }

        Ok(budgets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn store_with_user() -> (Store, UserId) {
        let store = Store::open_in_memory().unwrap();
        let user_id = store
            .insert_user("alice", "$argon2id$fake", Utc::now())
            .unwrap();
        (store, user_id)
    }

    #[test]
    fn test_insert_and_lookup_by_key() {
        let (store, user_id) = store_with_user();

        let id = store
            .insert_budget(user_id, "Food", Money::from_cents(500_000), 12, 2024)
            .unwrap();

        let budget = store
            .budget_for_key(user_id, "Food", 12, 2024)
            .unwrap()
            .unwrap();
        assert_eq!(budget.id, id);
        assert_eq!(budget.amount.cents(), 500_000);

        // Key matching is exact on every component.
        assert!(store.budget_for_key(user_id, "food", 12, 2024).unwrap().is_none());
        assert!(store.budget_for_key(user_id, "Food", 11, 2024).unwrap().is_none());
        assert!(store.budget_for_key(user_id, "Food", 12, 2025).unwrap().is_none());
    }

    #[test]
    fn test_update_amount_keeps_identity() {
        let (store, user_id) = store_with_user();

        let id = store
            .insert_budget(user_id, "Food", Money::from_cents(500_000), 12, 2024)
            .unwrap();
        store
            .update_budget_amount(id, Money::from_cents(700_000))
            .unwrap();

        let budget = store
            .budget_for_key(user_id, "Food", 12, 2024)
            .unwrap()
            .unwrap();
        assert_eq!(budget.id, id);
        assert_eq!(budget.amount.cents(), 700_000);
    }

    #[test]
    fn test_budgets_for_user_ordering() {
        let (store, user_id) = store_with_user();

        store
            .insert_budget(user_id, "Rent", Money::from_cents(1), 1, 2025)
            .unwrap();
        store
            .insert_budget(user_id, "Food", Money::from_cents(1), 12, 2024)
            .unwrap();
        store
            .insert_budget(user_id, "Gas", Money::from_cents(1), 12, 2024)
            .unwrap();

        let budgets = store.budgets_for_user(user_id).unwrap();
        let keys: Vec<(i32, u32, &str)> = budgets
            .iter()
            .map(|b| (b.year, b.month, b.category.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![(2024, 12, "Food"), (2024, 12, "Gas"), (2025, 1, "Rent")]
        );
    }
}
