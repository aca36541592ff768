//! Menu Repository Implementation
//!
//! SQLite-backed implementation of Repository<MenuItem> and MenuRepository.

use async_trait::async_trait;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{MenuItem, DomainError, DomainResult};
use super::traits::{Repository, MenuRepository};

const SELECT_MENU_ITEMS: &str =
    "SELECT id, name, price, description, image, category FROM menu_items";

/// SQLite implementation of the menu cache
pub struct SqliteMenuRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteMenuRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<MenuItem> for SqliteMenuRepository {
    async fn find_by_id(&self, id: u32) -> DomainResult<Option<MenuItem>> {
        let conn = self.conn.lock().await;

        conn.query_row(
            &format!("{} WHERE id = ?1", SELECT_MENU_ITEMS),
            params![id],
            row_to_menu_item,
        )
        .optional()
        .map_err(|e| DomainError::StorageQuery(e.to_string()))
    }

    async fn list(&self) -> DomainResult<Vec<MenuItem>> {
        let conn = self.conn.lock().await;

        // Nothing cached yet
        if !table_exists(&conn)? {
            return Ok(Vec::new());
        }

        let mut stmt = conn
            .prepare(&format!("{} ORDER BY id ASC", SELECT_MENU_ITEMS))
            .map_err(|e| DomainError::StorageQuery(e.to_string()))?;

        let items = stmt
            .query_map([], row_to_menu_item)
            .map_err(|e| DomainError::StorageQuery(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::StorageQuery(e.to_string()))?;
        Ok(items)
    }
}

#[async_trait]
impl MenuRepository for SqliteMenuRepository {
    async fn initialize(&self) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS menu_items (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                price TEXT NOT NULL,
                description TEXT NOT NULL,
                image TEXT NOT NULL,
                category TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| DomainError::StorageInit(e.to_string()))?;

        Ok(())
    }

    async fn bulk_insert(&self, items: &[MenuItem]) -> DomainResult<()> {
        if items.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn.lock().await;

        // Dropping the transaction without commit rolls every row back
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::StorageWrite(e.to_string()))?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO menu_items (id, name, price, description, image, category)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )
                .map_err(|e| DomainError::StorageWrite(e.to_string()))?;

            for item in items {
                stmt.execute(params![
                    item.id,
                    item.name,
                    item.price,
                    item.description,
                    item.image,
                    item.category
                ])
                .map_err(|e| DomainError::StorageWrite(format!("item {}: {}", item.id, e)))?;
            }
        }
        tx.commit()
            .map_err(|e| DomainError::StorageWrite(e.to_string()))?;

        log::info!("Cached {} menu items", items.len());
        Ok(())
    }

    async fn query_filtered(
        &self,
        search_term: &str,
        categories: &[String],
    ) -> DomainResult<Vec<MenuItem>> {
        let conn = self.conn.lock().await;

        let mut sql = format!(r"{} WHERE name LIKE ?1 ESCAPE '\'", SELECT_MENU_ITEMS);
        if !categories.is_empty() {
            let placeholders = (0..categories.len())
                .map(|i| format!("?{}", i + 2))
                .collect::<Vec<_>>()
                .join(", ");
            sql.push_str(&format!(" AND category IN ({})", placeholders));
        }
        sql.push_str(" ORDER BY id ASC");

        let pattern = format!("%{}%", escape_like(search_term));
        let values = std::iter::once(pattern).chain(categories.iter().cloned());

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::StorageQuery(e.to_string()))?;

        let items = stmt
            .query_map(params_from_iter(values), row_to_menu_item)
            .map_err(|e| DomainError::StorageQuery(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::StorageQuery(e.to_string()))?;
        Ok(items)
    }
}

fn table_exists(conn: &Connection) -> DomainResult<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'menu_items')",
        [],
        |row| row.get(0),
    )
    .map_err(|e| DomainError::StorageQuery(e.to_string()))
}

/// Make `%`, `_` and `\` match literally inside a LIKE pattern
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Convert a database row to MenuItem
fn row_to_menu_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<MenuItem> {
    Ok(MenuItem {
        id: row.get(0)?,
        name: row.get(1)?,
        price: row.get(2)?,
        description: row.get(3)?,
        image: row.get(4)?,
        category: row.get(5)?,
    })
}
