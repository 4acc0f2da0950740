//! Query builder shared by every [`RecordStore`](super::RecordStore) backend.
//!
//! The builder mirrors the subset of the PostgREST dialect the dashboard uses:
//! column selection (including embedded relations such as
//! `search_term_keyword(keyword_name, category_id)`), equality filters, a single
//! ordering column, and a row limit.

use serde_json::Value;

/// Sort direction for [`Query::order`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

impl Order {
    /// PostgREST keyword for this direction.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// One entry of a parsed `select` expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectItem {
    /// `*`: every column of the row.
    All,
    /// A plain column name.
    Column(String),
    /// An embedded relation: `table(col, col, ...)`.
    Embed {
        /// Related table name.
        table: String,
        /// Columns projected from the related row.
        columns: Vec<String>,
    },
}

/// A read (or filter) request against a single table.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    table: String,
    columns: String,
    filters: Vec<(String, Value)>,
    order: Option<(String, Order)>,
    limit: Option<usize>,
}

impl Query {
    /// What: Start a query against `table` selecting every column.
    ///
    /// Inputs:
    /// - `table`: Remote table name.
    ///
    /// Output:
    /// - A query with `select=*`, no filters, no ordering and no limit.
    #[must_use]
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Replace the select expression (whitespace and newlines are normalised).
    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .replace(" ,", ",")
            .replace(", ", ",")
            .replace("( ", "(")
            .replace(" )", ")");
        self
    }

    /// Add an equality filter on `column`.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push((column.to_string(), value.into()));
        self
    }

    /// Order rows by `column`.
    #[must_use]
    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.order = Some((column.to_string(), order));
        self
    }

    /// Keep at most `n` rows.
    #[must_use]
    pub const fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Target table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Normalised select expression.
    #[must_use]
    pub fn columns(&self) -> &str {
        &self.columns
    }

    /// Equality filters in insertion order.
    #[must_use]
    pub fn filters(&self) -> &[(String, Value)] {
        &self.filters
    }

    /// Ordering column and direction, if any.
    #[must_use]
    pub fn ordering(&self) -> Option<(&str, Order)> {
        self.order.as_ref().map(|(c, o)| (c.as_str(), *o))
    }

    /// Row limit, if any.
    #[must_use]
    pub const fn row_limit(&self) -> Option<usize> {
        self.limit
    }

    /// What: Parse the select expression into columns and embedded relations.
    ///
    /// Output:
    /// - One [`SelectItem`] per top-level comma-separated entry.
    ///
    /// Details:
    /// - Commas inside parentheses belong to the embedded relation.
    #[must_use]
    pub fn select_items(&self) -> Vec<SelectItem> {
        let mut items = Vec::new();
        let mut depth = 0usize;
        let mut current = String::new();
        for ch in self.columns.chars() {
            match ch {
                '(' => {
                    depth += 1;
                    current.push(ch);
                }
                ')' => {
                    depth = depth.saturating_sub(1);
                    current.push(ch);
                }
                ',' if depth == 0 => {
                    if let Some(item) = parse_select_item(&current) {
                        items.push(item);
                    }
                    current.clear();
                }
                _ => current.push(ch),
            }
        }
        if let Some(item) = parse_select_item(&current) {
            items.push(item);
        }
        items
    }

    /// What: Render filters only, as `(column, "eq.<value>")` pairs.
    ///
    /// Details:
    /// - Used for `PATCH` and `DELETE`, which take no select, order or limit.
    #[must_use]
    pub fn filter_params(&self) -> Vec<(String, String)> {
        self.filters
            .iter()
            .map(|(col, val)| (col.clone(), format!("eq.{}", literal(val))))
            .collect()
    }

    /// What: Render the full query as PostgREST URL parameters.
    ///
    /// Output:
    /// - `select`, then filters, then `order`, then `limit`.
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.columns.clone())];
        params.extend(self.filter_params());
        if let Some((col, order)) = &self.order {
            params.push(("order".to_string(), format!("{col}.{}", order.as_param())));
        }
        if let Some(n) = self.limit {
            params.push(("limit".to_string(), n.to_string()));
        }
        params
    }
}

/// Parse one top-level select entry; empty entries yield `None`.
fn parse_select_item(raw: &str) -> Option<SelectItem> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if s == "*" {
        return Some(SelectItem::All);
    }
    if let Some(open) = s.find('(') {
        let table = s[..open].trim().to_string();
        let inner = s[open + 1..].trim_end_matches(')');
        let columns = inner
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        return Some(SelectItem::Embed { table, columns });
    }
    Some(SelectItem::Column(s.to_string()))
}

/// Render a JSON scalar as a PostgREST literal.
fn literal(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Ensure a keyword query renders select, filters, order and limit in order.
    ///
    /// Inputs:
    /// - A query with two equality filters, ascending order and limit 12.
    ///
    /// Output:
    /// - Parameter list matches the PostgREST dialect exactly.
    fn keyword_query_renders_postgrest_params() {
        let q = Query::from("search_term_keyword")
            .select("keyword_id, keyword_name, rank")
            .eq("is_active", true)
            .eq("category_id", 3)
            .order("rank", Order::Asc)
            .limit(12);
        assert_eq!(
            q.to_params(),
            vec![
                ("select".to_string(), "keyword_id,keyword_name,rank".to_string()),
                ("is_active".to_string(), "eq.true".to_string()),
                ("category_id".to_string(), "eq.3".to_string()),
                ("order".to_string(), "rank.asc".to_string()),
                ("limit".to_string(), "12".to_string()),
            ]
        );
    }

    #[test]
    /// What: Verify multi-line select expressions with an embedded relation parse into items.
    ///
    /// Inputs:
    /// - A select spread over several lines containing `search_term_keyword(keyword_name, category_id)`.
    ///
    /// Output:
    /// - Plain columns followed by one `Embed` item carrying both inner columns.
    fn select_items_split_embedded_relation() {
        let q = Query::from("comment").select(
            "
            comment_id,
            comment_contents,
            search_term_keyword(keyword_name, category_id)
            ",
        );
        assert_eq!(
            q.select_items(),
            vec![
                SelectItem::Column("comment_id".into()),
                SelectItem::Column("comment_contents".into()),
                SelectItem::Embed {
                    table: "search_term_keyword".into(),
                    columns: vec!["keyword_name".into(), "category_id".into()],
                },
            ]
        );
        assert_eq!(
            q.columns(),
            "comment_id,comment_contents,search_term_keyword(keyword_name,category_id)"
        );
    }

    #[test]
    /// What: String filter values are rendered without JSON quotes.
    fn string_filters_render_bare() {
        let q = Query::from("comment_recommendation").eq("ip_address", "10.0.0.1");
        assert_eq!(
            q.filter_params(),
            vec![("ip_address".to_string(), "eq.10.0.0.1".to_string())]
        );
        assert_eq!(Query::from("t").select_items(), vec![SelectItem::All]);
    }
}
