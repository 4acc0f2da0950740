//! In-process [`RecordStore`] that interprets [`Query`] against JSON rows.
//!
//! Backs the `--demo` mode and the integration tests. Tables are registered with
//! their id column; embedded selections (`table(col, ...)`) are resolved through
//! relations registered with [`MemoryStore::relate`].

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{Order, Query, RecordStore, Result, SelectItem, StoreError};

#[derive(Debug, Default)]
struct Table {
    id_column: String,
    rows: Vec<Value>,
}

#[derive(Debug, Clone)]
struct Relation {
    from_table: String,
    from_column: String,
    to_table: String,
    to_column: String,
}

#[derive(Debug, Default)]
struct Inner {
    tables: HashMap<String, Table>,
    relations: Vec<Relation>,
    failing: HashSet<String>,
    log: Vec<String>,
}

/// Thread-safe in-memory record store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store with no tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `table` whose rows are identified by `id_column`.
    #[must_use]
    pub fn with_table(self, table: &str, id_column: &str) -> Self {
        self.lock().tables.insert(
            table.to_string(),
            Table {
                id_column: id_column.to_string(),
                rows: Vec::new(),
            },
        );
        self
    }

    /// What: Register a foreign key so `from_table` can embed rows of `to_table`.
    ///
    /// Inputs:
    /// - `from_table`/`from_column`: Referencing side, e.g. `comment.keyword_id`.
    /// - `to_table`/`to_column`: Referenced side, e.g. `search_term_keyword.keyword_id`.
    #[must_use]
    pub fn relate(self, from_table: &str, from_column: &str, to_table: &str, to_column: &str) -> Self {
        self.lock().relations.push(Relation {
            from_table: from_table.to_string(),
            from_column: from_column.to_string(),
            to_table: to_table.to_string(),
            to_column: to_column.to_string(),
        });
        self
    }

    /// Append raw rows to `table` as-is (no id or timestamp assignment).
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        if let Some(t) = self.lock().tables.get_mut(table) {
            t.rows.extend(rows);
        }
    }

    /// Make every request touching `table` fail with a 503 until [`MemoryStore::heal_table`].
    pub fn fail_table(&self, table: &str) {
        self.lock().failing.insert(table.to_string());
    }

    /// Undo [`MemoryStore::fail_table`].
    pub fn heal_table(&self, table: &str) {
        self.lock().failing.remove(table);
    }

    /// Snapshot of every row currently stored in `table`.
    #[must_use]
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock()
            .tables
            .get(table)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }

    /// Count logged requests of `op` against `table`.
    #[must_use]
    pub fn count_requests(&self, op: &str, table: &str) -> usize {
        let needle = format!("{op} {table}");
        self.lock().log.iter().filter(|l| **l == needle).count()
    }
}

impl Inner {
    /// Record the request and reject it when the table is failing or unknown.
    fn admit(&mut self, op: &str, table: &str) -> Result<()> {
        self.log.push(format!("{op} {table}"));
        if self.failing.contains(table) {
            return Err(StoreError::Status {
                table: table.to_string(),
                status: 503,
                body: "simulated outage".to_string(),
            });
        }
        if !self.tables.contains_key(table) {
            return Err(StoreError::UnknownTable(table.to_string()));
        }
        Ok(())
    }

    fn table_mut(&mut self, table: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))
    }

    /// Resolve one embedded relation for `row` of `table`.
    fn embed(&self, table: &str, row: &Value, target: &str, columns: &[String]) -> Value {
        let Some(rel) = self
            .relations
            .iter()
            .find(|r| r.from_table == table && r.to_table == target)
        else {
            return Value::Null;
        };
        let Some(key) = row.get(&rel.from_column) else {
            return Value::Null;
        };
        self.tables
            .get(target)
            .and_then(|t| {
                t.rows
                    .iter()
                    .find(|r| r.get(&rel.to_column).is_some_and(|v| loose_eq(v, key)))
            })
            .map_or(Value::Null, |found| project_columns(found, columns))
    }

    fn project(&self, query: &Query, row: &Value) -> Value {
        let mut out = Map::new();
        for item in query.select_items() {
            match item {
                SelectItem::All => {
                    if let Some(obj) = row.as_object() {
                        out.extend(obj.iter().map(|(k, v)| (k.clone(), v.clone())));
                    }
                }
                SelectItem::Column(c) => {
                    out.insert(c.clone(), row.get(&c).cloned().unwrap_or(Value::Null));
                }
                SelectItem::Embed { table, columns } => {
                    let embedded = self.embed(query.table(), row, &table, &columns);
                    out.insert(table, embedded);
                }
            }
        }
        Value::Object(out)
    }
}

fn project_columns(row: &Value, columns: &[String]) -> Value {
    if columns.iter().any(|c| c == "*") {
        return row.clone();
    }
    let mut out = Map::new();
    for c in columns {
        out.insert(c.clone(), row.get(c).cloned().unwrap_or(Value::Null));
    }
    Value::Object(out)
}

/// Equality that treats `1` and `1.0` as the same number.
fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => (x - y).abs() < f64::EPSILON,
        _ => a == b,
    }
}

fn matches(row: &Value, filters: &[(String, Value)]) -> bool {
    filters
        .iter()
        .all(|(col, want)| row.get(col).is_some_and(|have| loose_eq(have, want)))
}

/// Total order over JSON scalars: null < bool < number < string.
fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(_) => 4,
        }
    }
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn next_id(table: &Table) -> i64 {
    table
        .rows
        .iter()
        .filter_map(|r| r.get(&table.id_column).and_then(Value::as_i64))
        .max()
        .unwrap_or(0)
        + 1
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn select(&self, query: &Query) -> Result<Vec<Value>> {
        let mut inner = self.lock();
        inner.admit("select", query.table())?;
        let mut rows: Vec<Value> = inner
            .tables
            .get(query.table())
            .map(|t| {
                t.rows
                    .iter()
                    .filter(|r| matches(r, query.filters()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if let Some((col, order)) = query.ordering() {
            rows.sort_by(|a, b| {
                let ord = compare(a.get(col), b.get(col));
                match order {
                    Order::Asc => ord,
                    Order::Desc => ord.reverse(),
                }
            });
        }
        if let Some(n) = query.row_limit() {
            rows.truncate(n);
        }
        Ok(rows.iter().map(|r| inner.project(query, r)).collect())
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>> {
        let mut inner = self.lock();
        inner.admit("insert", table)?;
        let Value::Object(mut fields) = row else {
            return Err(StoreError::Status {
                table: table.to_string(),
                status: 400,
                body: "row must be a JSON object".to_string(),
            });
        };
        let t = inner.table_mut(table)?;
        if fields.get(&t.id_column).is_none_or(Value::is_null) {
            fields.insert(t.id_column.clone(), Value::from(next_id(t)));
        }
        fields
            .entry("created_at")
            .or_insert_with(|| Value::String(chrono::Utc::now().to_rfc3339()));
        let stored = Value::Object(fields);
        t.rows.push(stored.clone());
        Ok(vec![stored])
    }

    async fn update(&self, query: &Query, patch: Value) -> Result<usize> {
        let mut inner = self.lock();
        inner.admit("update", query.table())?;
        let t = inner.table_mut(query.table())?;
        let mut touched = 0;
        for row in t.rows.iter_mut().filter(|r| matches(r, query.filters())) {
            if let (Some(dst), Some(src)) = (row.as_object_mut(), patch.as_object()) {
                dst.extend(src.iter().map(|(k, v)| (k.clone(), v.clone())));
                touched += 1;
            }
        }
        Ok(touched)
    }

    async fn delete(&self, query: &Query) -> Result<usize> {
        let mut inner = self.lock();
        inner.admit("delete", query.table())?;
        let t = inner.table_mut(query.table())?;
        let before = t.rows.len();
        t.rows.retain(|r| !matches(r, query.filters()));
        Ok(before - t.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> MemoryStore {
        let s = MemoryStore::new()
            .with_table("search_term_keyword", "keyword_id")
            .with_table("comment", "comment_id")
            .relate("comment", "keyword_id", "search_term_keyword", "keyword_id");
        s.seed(
            "search_term_keyword",
            vec![
                json!({"keyword_id": 1, "keyword_name": "alpha", "category_id": 1, "rank": 2}),
                json!({"keyword_id": 2, "keyword_name": "beta", "category_id": 1, "rank": 1}),
            ],
        );
        s.seed(
            "comment",
            vec![
                json!({"comment_id": 1, "keyword_id": 2, "comment_contents": "hi", "created_at": "2024-01-01T00:00:00+00:00"}),
                json!({"comment_id": 2, "keyword_id": 9, "comment_contents": "orphan", "created_at": "2024-01-02T00:00:00+00:00"}),
            ],
        );
        s
    }

    #[tokio::test]
    /// What: Filters, ordering and limit are applied in that order.
    async fn select_filters_orders_and_limits() {
        let s = store();
        let rows = s
            .select(
                &Query::from("search_term_keyword")
                    .select("keyword_name, rank")
                    .eq("category_id", 1)
                    .order("rank", Order::Asc)
                    .limit(1),
            )
            .await
            .expect("select");
        assert_eq!(rows, vec![json!({"keyword_name": "beta", "rank": 1})]);
    }

    #[tokio::test]
    /// What: Embedded relations resolve through the registered foreign key.
    ///
    /// Inputs:
    /// - One comment pointing at an existing keyword and one pointing at a missing keyword.
    ///
    /// Output:
    /// - The first embeds `{keyword_name}`, the orphan embeds `null`.
    async fn select_resolves_embedded_relation() {
        let s = store();
        let rows = s
            .select(
                &Query::from("comment")
                    .select("comment_id, search_term_keyword(keyword_name)")
                    .order("created_at", Order::Desc),
            )
            .await
            .expect("select");
        assert_eq!(rows[0]["search_term_keyword"], Value::Null);
        assert_eq!(rows[1]["search_term_keyword"]["keyword_name"], "beta");
    }

    #[tokio::test]
    /// What: Inserts assign ids and timestamps; updates and deletes honour filters.
    async fn writes_assign_ids_and_respect_filters() {
        let s = store();
        let stored = s
            .insert("comment", json!({"keyword_id": 1, "comment_contents": "new"}))
            .await
            .expect("insert");
        assert_eq!(stored[0]["comment_id"], 3);
        assert!(stored[0]["created_at"].is_string());

        let n = s
            .update(&Query::from("comment").eq("comment_id", 3), json!({"comment_contents": "edited"}))
            .await
            .expect("update");
        assert_eq!(n, 1);
        let n = s
            .delete(&Query::from("comment").eq("keyword_id", 9))
            .await
            .expect("delete");
        assert_eq!(n, 1);
        assert_eq!(s.rows("comment").len(), 2);
        assert_eq!(s.count_requests("select", "comment"), 0);
    }

    #[tokio::test]
    /// What: Failing tables reject requests and `maybe_single` detects duplicates.
    async fn failures_and_single_row_checks() {
        let s = store();
        s.fail_table("comment");
        assert!(matches!(
            s.select(&Query::from("comment")).await,
            Err(StoreError::Status { status: 503, .. })
        ));
        s.heal_table("comment");
        assert!(matches!(
            s.maybe_single(&Query::from("search_term_keyword").eq("category_id", 1)).await,
            Err(StoreError::MultipleRows { count: 2, .. })
        ));
        let one = s
            .maybe_single(&Query::from("search_term_keyword").eq("keyword_id", 1))
            .await
            .expect("single");
        assert!(one.is_some());
        assert!(matches!(
            s.select(&Query::from("nope")).await,
            Err(StoreError::UnknownTable(_))
        ));
    }
}
