//! Text rendering for command results.
//!
//! JSON output is the backend body re-serialised; table output is a plain
//! aligned grid suited to a terminal.

use serde::Serialize;
use serde_json::Value;

use db_query_client::api::{
    ConnectionOut, HealthStatus, MetadataResponse, NlQueryResult, QueryResult,
};

/// Renders any response as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Formats a single cell for table display.
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders headers and rows as an aligned text table.
///
/// Widths are measured in chars, not terminal columns, so double-width
/// characters (CJK, most emoji) push their row out of alignment.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let format_line = |cells: &[String]| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!("{cell:<w$}")
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_line(headers));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&format_line(row));
        out.push('\n');
    }
    out
}

fn stringify_rows(rows: &[Vec<Value>]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect()
}

fn footer(out: &mut String, row_count: usize, limit_added: bool, message: Option<&str>) {
    let noun = if row_count == 1 { "row" } else { "rows" };
    out.push_str(&format!("({row_count} {noun})\n"));
    if limit_added {
        out.push_str("Note: a row limit was applied by the server.\n");
    }
    if let Some(message) = message {
        out.push_str(message);
        out.push('\n');
    }
}

/// Renders a SQL query result.
pub fn render_query_result(result: &QueryResult) -> String {
    let headers: Vec<String> = result.columns.iter().map(|c| c.name.clone()).collect();
    let mut out = render_table(&headers, &stringify_rows(&result.rows));
    footer(
        &mut out,
        result.rows.len(),
        result.limit_added,
        result.message.as_deref(),
    );
    out
}

/// Renders a natural-language query result, generated SQL first.
pub fn render_nl_query_result(result: &NlQueryResult) -> String {
    let mut out = format!("SQL: {}\n\n", result.generated_sql);
    out.push_str(&render_table(&result.columns, &stringify_rows(&result.rows)));
    footer(
        &mut out,
        result.rows.len(),
        result.limit_added,
        result.message.as_deref(),
    );
    out
}

/// Renders the saved connection list.
pub fn render_connections(connections: &[ConnectionOut]) -> String {
    let headers = ["id", "name", "connection_url", "last_synced"].map(String::from);
    let rows: Vec<Vec<String>> = connections.iter().map(connection_row).collect();
    render_table(&headers, &rows)
}

fn connection_row(c: &ConnectionOut) -> Vec<String> {
    vec![
        c.id.to_string(),
        c.name.clone().unwrap_or_default(),
        c.connection_url.clone(),
        c.last_synced.clone().unwrap_or_default(),
    ]
}

/// Renders a single connection.
pub fn render_connection(connection: &ConnectionOut) -> String {
    render_connections(std::slice::from_ref(connection))
}

/// Renders a connection's tables and columns.
pub fn render_metadata(meta: &MetadataResponse) -> String {
    let mut out = render_connection(&meta.connection);
    out.push('\n');

    let headers = ["table", "kind", "column", "type"].map(String::from);
    let mut rows = Vec::new();
    for table in &meta.tables {
        let kind = if table.is_view { "view" } else { "table" };
        if table.columns.is_empty() {
            rows.push(vec![table.qualified_name(), kind.to_string()]);
            continue;
        }
        for column in &table.columns {
            rows.push(vec![
                table.qualified_name(),
                kind.to_string(),
                column.name.clone(),
                column.data_type.clone(),
            ]);
        }
    }
    out.push_str(&render_table(&headers, &rows));
    out.push_str(&format!("({} tables)\n", meta.tables.len()));
    out
}

/// Renders a health check.
pub fn render_health(health: &HealthStatus) -> String {
    format!("status: {}\n", health.status)
}
