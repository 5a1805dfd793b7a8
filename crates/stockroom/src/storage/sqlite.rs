//! # SQLite Store
//!
//! One connection shared by the product actor, the order actor and the metric recorder.
//! Each actor calls in from its own task, so the connection sits behind a mutex; a call holds
//! it only for the duration of one statement.
//!
//! Rows are loaded in `rowid` order, which is insertion order for all three tables.

use crate::model::{Metric, Order, OrderId, Product, ProductId};
use actor_framework::{Persistence, StorageError};
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS products (
    id    TEXT PRIMARY KEY,
    name  TEXT NOT NULL,
    stock INTEGER NOT NULL,
    price REAL NOT NULL
);
CREATE TABLE IF NOT EXISTS orders (
    id         INTEGER PRIMARY KEY,
    product_id TEXT NOT NULL,
    quantity   INTEGER NOT NULL,
    total      REAL NOT NULL,
    status     TEXT NOT NULL DEFAULT 'Pending',
    created_at INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS metrics (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL,
    value REAL NOT NULL,
    time  INTEGER NOT NULL
);
";

/// Cloneable handle on a SQLite database holding products, orders and metrics.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

/// Wraps a rusqlite failure with what was being attempted.
fn failed(context: &'static str) -> impl FnOnce(rusqlite::Error) -> StorageError {
    move |e| StorageError::new(context, e)
}

fn order_key(id: OrderId, context: &'static str) -> Result<i64, StorageError> {
    i64::try_from(id.0).map_err(|e| StorageError::new(context, e))
}

impl SqliteStore {
    /// Opens (or creates) the database file at `path` and makes sure the tables exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(failed("open database"))?;
        info!(path = %path.display(), "Opened database");
        Self::init(conn)
    }

    /// A private database that disappears with the last clone of the handle.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(failed("open database"))?;
        debug!("Opened in-memory database");
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(SCHEMA).map_err(failed("create schema"))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Appends one metric row.
    pub fn insert_metric(&self, metric: &Metric) -> Result<(), StorageError> {
        self.conn
            .lock()
            .execute(
                "INSERT INTO metrics (name, value, time) VALUES (?1, ?2, ?3)",
                params![metric.name, metric.value, metric.time],
            )
            .map_err(failed("insert metric"))?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn lock_connection(&self) -> parking_lot::MutexGuard<'_, Connection> {
        self.conn.lock()
    }

    /// Every stored metric, oldest first.
    pub fn load_metrics(&self) -> Result<Vec<Metric>, StorageError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare("SELECT name, value, time FROM metrics ORDER BY id")
            .map_err(failed("load metrics"))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Metric {
                    name: row.get(0)?,
                    value: row.get(1)?,
                    time: row.get(2)?,
                })
            })
            .map_err(failed("load metrics"))?;
        let metrics = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(failed("load metrics"))?;
        Ok(metrics)
    }
}

impl Persistence<Product> for SqliteStore {
    fn load(&mut self) -> Result<Vec<Product>, StorageError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare("SELECT id, name, stock, price FROM products ORDER BY rowid")
            .map_err(failed("load products"))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Product {
                    id: ProductId(row.get(0)?),
                    name: row.get(1)?,
                    stock: row.get(2)?,
                    price: row.get(3)?,
                })
            })
            .map_err(failed("load products"))?;
        let products = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(failed("load products"))?;
        debug!(count = products.len(), "Loaded products");
        Ok(products)
    }

    fn insert(&mut self, item: &Product) -> Result<(), StorageError> {
        self.conn
            .lock()
            .execute(
                "INSERT INTO products (id, name, stock, price) VALUES (?1, ?2, ?3, ?4)",
                params![item.id.as_str(), item.name, item.stock, item.price],
            )
            .map_err(failed("insert product"))?;
        Ok(())
    }

    fn update(&mut self, item: &Product) -> Result<(), StorageError> {
        self.conn
            .lock()
            .execute(
                "UPDATE products SET name = ?2, stock = ?3, price = ?4 WHERE id = ?1",
                params![item.id.as_str(), item.name, item.stock, item.price],
            )
            .map_err(failed("update product"))?;
        Ok(())
    }

    fn remove(&mut self, id: &ProductId) -> Result<(), StorageError> {
        self.conn
            .lock()
            .execute("DELETE FROM products WHERE id = ?1", params![id.as_str()])
            .map_err(failed("remove product"))?;
        Ok(())
    }
}

impl Persistence<Order> for SqliteStore {
    fn load(&mut self) -> Result<Vec<Order>, StorageError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT id, product_id, quantity, total, status, created_at
                 FROM orders ORDER BY rowid",
            )
            .map_err(failed("load orders"))?;
        let rows = stmt
            .query_map([], |row| {
                let id: i64 = row.get(0)?;
                Ok(Order {
                    id: OrderId(id as u64),
                    product_id: ProductId(row.get(1)?),
                    quantity: row.get(2)?,
                    total: row.get(3)?,
                    status: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })
            .map_err(failed("load orders"))?;
        let orders = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(failed("load orders"))?;
        debug!(count = orders.len(), "Loaded orders");
        Ok(orders)
    }

    fn insert(&mut self, item: &Order) -> Result<(), StorageError> {
        let id = order_key(item.id, "insert order")?;
        self.conn
            .lock()
            .execute(
                "INSERT INTO orders (id, product_id, quantity, total, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    id,
                    item.product_id.as_str(),
                    item.quantity,
                    item.total,
                    item.status,
                    item.created_at
                ],
            )
            .map_err(failed("insert order"))?;
        Ok(())
    }

    fn update(&mut self, item: &Order) -> Result<(), StorageError> {
        let id = order_key(item.id, "update order")?;
        self.conn
            .lock()
            .execute(
                "UPDATE orders SET status = ?2 WHERE id = ?1",
                params![id, item.status],
            )
            .map_err(failed("update order"))?;
        Ok(())
    }

    fn remove(&mut self, id: &OrderId) -> Result<(), StorageError> {
        let id = order_key(*id, "remove order")?;
        self.conn
            .lock()
            .execute("DELETE FROM orders WHERE id = ?1", params![id])
            .map_err(failed("remove order"))?;
        Ok(())
    }
}
