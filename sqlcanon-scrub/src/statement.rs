use serde_json::{Map, Value};
use sqlcanon_ast::{
    statement::{
        ColumnConstraint, ColumnDef, CreateIndexStmt, CreateTableStmt, CreateViewStmt,
        DeleteStmt, InsertStmt, TableConstraint, UpdateStmt,
    },
    Stmt,
};

use crate::{
    context::{vec_to_value, ScrubContext},
    expr::scrub_expr,
    query::scrub_query,
    util::{ident_value, object_name_value},
};

/// Scrubs a top-level statement. `SELECT` delegates straight to
/// [`scrub_query`]; every other statement kind gets its own clause mapping
/// keyed by its statement name, per spec §3's "DML/DDL statements" shape.
pub(crate) fn scrub_stmt(stmt: &Stmt, ctx: &ScrubContext) -> Value {
    match stmt {
        Stmt::Select(select) => scrub_query(&select.0, ctx),
        Stmt::Insert(insert) => wrap("insert", scrub_insert(insert, ctx)),
        Stmt::Update(update) => wrap("update", scrub_update(update, ctx)),
        Stmt::Delete(delete) => wrap("delete", scrub_delete(delete, ctx)),
        Stmt::CreateTable(create) => wrap("create_table", scrub_create_table(create, ctx)),
        Stmt::CreateView(create) => wrap("create_view", scrub_create_view(create, ctx)),
        Stmt::CreateIndex(create) => wrap("create_index", scrub_create_index(create)),
    }
}

fn wrap(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

fn scrub_insert(insert: &InsertStmt, ctx: &ScrubContext) -> Value {
    let mut map = Map::new();
    map.insert(
        "table".to_string(),
        Value::String(object_name_value(&insert.table)),
    );
    if !insert.columns.is_empty() {
        map.insert(
            "columns".to_string(),
            Value::Array(
                insert
                    .columns
                    .iter()
                    .map(|c| Value::String(ident_value(c)))
                    .collect(),
            ),
        );
    }
    if let Some(source) = &insert.source {
        map.insert("query".to_string(), scrub_query(source, ctx));
    }
    Value::Object(map)
}

fn scrub_update(update: &UpdateStmt, ctx: &ScrubContext) -> Value {
    let mut map = Map::new();
    map.insert(
        "table".to_string(),
        Value::String(object_name_value(&update.table)),
    );
    let mut set = Map::new();
    for assignment in &update.assignments {
        set.insert(ident_value(&assignment.target), scrub_expr(&assignment.value, ctx));
    }
    map.insert("set".to_string(), Value::Object(set));
    if let Some(selection) = &update.selection {
        map.insert("where".to_string(), scrub_expr(selection, ctx));
    }
    Value::Object(map)
}

fn scrub_delete(delete: &DeleteStmt, ctx: &ScrubContext) -> Value {
    let mut map = Map::new();
    map.insert(
        "from".to_string(),
        Value::String(object_name_value(&delete.table)),
    );
    if let Some(selection) = &delete.selection {
        map.insert("where".to_string(), scrub_expr(selection, ctx));
    }
    Value::Object(map)
}

fn scrub_create_table(create: &CreateTableStmt, ctx: &ScrubContext) -> Value {
    let mut map = Map::new();
    map.insert(
        "name".to_string(),
        Value::String(object_name_value(&create.name)),
    );
    if create.temporary {
        map.insert("temporary".to_string(), Value::Bool(true));
    }
    if create.if_not_exists {
        map.insert("if_not_exists".to_string(), Value::Bool(true));
    }
    if let Some(like) = &create.like {
        map.insert(
            "like".to_string(),
            Value::String(object_name_value(&like.table)),
        );
    }
    if !create.columns.is_empty() {
        map.insert(
            "columns".to_string(),
            Value::Array(create.columns.iter().map(|c| scrub_column_def(c, ctx)).collect()),
        );
    }
    if !create.constraints.is_empty() {
        map.insert(
            "constraint".to_string(),
            vec_to_value(
                create
                    .constraints
                    .iter()
                    .map(|c| scrub_table_constraint(&c.constraint, ctx))
                    .collect(),
            ),
        );
    }
    if let Some(query) = &create.query {
        map.insert("query".to_string(), scrub_query(query, ctx));
    }
    Value::Object(map)
}

fn scrub_column_def(column: &ColumnDef, ctx: &ScrubContext) -> Value {
    let mut map = Map::new();
    map.insert("name".to_string(), Value::String(ident_value(&column.name)));
    map.insert(
        "type".to_string(),
        Value::String(column.data_type.to_string()),
    );
    if let Some(default) = &column.default {
        map.insert("default".to_string(), scrub_expr(default, ctx));
    }
    for constraint_def in &column.constraints {
        match &constraint_def.constraint {
            ColumnConstraint::NotNull => {
                map.insert("nullable".to_string(), Value::Bool(false));
            }
            ColumnConstraint::Null => {
                map.insert("nullable".to_string(), Value::Bool(true));
            }
            ColumnConstraint::Unique { is_primary } => {
                let key = if *is_primary { "primary_key" } else { "unique" };
                map.insert(key.to_string(), Value::Bool(true));
            }
            ColumnConstraint::References { table, .. } => {
                map.insert(
                    "references".to_string(),
                    Value::String(object_name_value(table)),
                );
            }
            ColumnConstraint::Check(expr) => {
                map.insert("check".to_string(), scrub_expr(expr, ctx));
            }
        }
    }
    Value::Object(map)
}

fn scrub_table_constraint(constraint: &TableConstraint, ctx: &ScrubContext) -> Value {
    match constraint {
        TableConstraint::Unique { columns, is_primary } => {
            let key = if *is_primary { "primary_key" } else { "unique" };
            let mut map = Map::new();
            map.insert(
                key.to_string(),
                vec_to_value(columns.iter().map(|c| Value::String(ident_value(c))).collect()),
            );
            Value::Object(map)
        }
        TableConstraint::ForeignKey {
            columns,
            foreign_table,
            referred_columns,
        } => {
            let mut map = Map::new();
            map.insert(
                "foreign_key".to_string(),
                vec_to_value(columns.iter().map(|c| Value::String(ident_value(c))).collect()),
            );
            map.insert(
                "references".to_string(),
                Value::Object({
                    let mut refs = Map::new();
                    refs.insert(
                        "table".to_string(),
                        Value::String(object_name_value(foreign_table)),
                    );
                    refs.insert(
                        "columns".to_string(),
                        vec_to_value(
                            referred_columns
                                .iter()
                                .map(|c| Value::String(ident_value(c)))
                                .collect(),
                        ),
                    );
                    refs
                }),
            );
            Value::Object(map)
        }
        TableConstraint::Check(expr) => {
            let mut map = Map::new();
            map.insert("check".to_string(), scrub_expr(expr, ctx));
            Value::Object(map)
        }
    }
}

fn scrub_create_view(create: &CreateViewStmt, ctx: &ScrubContext) -> Value {
    let mut map = Map::new();
    map.insert(
        "name".to_string(),
        Value::String(object_name_value(&create.name)),
    );
    if create.or_replace {
        map.insert("replace".to_string(), Value::Bool(true));
    }
    if create.recursive {
        map.insert("recursive".to_string(), Value::Bool(true));
    }
    if !create.columns.is_empty() {
        map.insert(
            "columns".to_string(),
            Value::Array(
                create
                    .columns
                    .iter()
                    .map(|c| Value::String(ident_value(c)))
                    .collect(),
            ),
        );
    }
    map.insert("query".to_string(), scrub_query(&create.query, ctx));
    if let Some(check_option) = &create.check_option {
        map.insert(
            "check_option".to_string(),
            Value::String(check_option.to_string().to_lowercase()),
        );
    }
    Value::Object(map)
}

fn scrub_create_index(create: &CreateIndexStmt) -> Value {
    let mut map = Map::new();
    if let Some(index) = &create.index {
        map.insert("name".to_string(), Value::String(object_name_value(index)));
    }
    map.insert(
        "table".to_string(),
        Value::String(object_name_value(&create.table)),
    );
    if create.unique {
        map.insert("unique".to_string(), Value::Bool(true));
    }
    if create.if_not_exists {
        map.insert("if_not_exists".to_string(), Value::Bool(true));
    }
    map.insert(
        "columns".to_string(),
        vec_to_value(
            create
                .columns
                .iter()
                .map(|c| {
                    let mut col = Map::new();
                    col.insert(
                        "name".to_string(),
                        Value::String(ident_value(&c.column)),
                    );
                    match c.asc {
                        Some(true) => {
                            col.insert("sort".to_string(), Value::String("asc".to_string()));
                        }
                        Some(false) => {
                            col.insert("sort".to_string(), Value::String("desc".to_string()));
                        }
                        None => {}
                    }
                    if col.len() == 1 {
                        col.remove("name").unwrap()
                    } else {
                        Value::Object(col)
                    }
                })
                .collect(),
        ),
    );
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sqlcanon_core::common::CommonDialect;
    use sqlcanon_parser::Parser;

    use crate::{scrub, ScrubOptions};

    fn scrub_sql(sql: &str) -> Value {
        let dialect = CommonDialect::default();
        let stmt = Parser::new_with_sql(&dialect, sql)
            .unwrap()
            .parse_statement()
            .unwrap();
        scrub(&stmt, &ScrubOptions::default())
    }

    #[test]
    fn insert_with_values() {
        assert_eq!(
            scrub_sql("INSERT INTO t (a, b) VALUES (1, 2)"),
            json!({
                "insert": {
                    "table": "t",
                    "columns": ["a", "b"],
                    "query": {"select": [1, 2]},
                }
            })
        );
    }

    #[test]
    fn update_with_where() {
        assert_eq!(
            scrub_sql("UPDATE t SET a = 1 WHERE b = 2"),
            json!({
                "update": {
                    "table": "t",
                    "set": {"a": 1},
                    "where": {"eq": ["b", 2]},
                }
            })
        );
    }

    #[test]
    fn delete_with_where() {
        assert_eq!(
            scrub_sql("DELETE FROM t WHERE a = 1"),
            json!({
                "delete": {
                    "from": "t",
                    "where": {"eq": ["a", 1]},
                }
            })
        );
    }

    #[test]
    fn create_table_with_columns() {
        assert_eq!(
            scrub_sql("CREATE TABLE t (a INT NOT NULL, b TEXT)"),
            json!({
                "create_table": {
                    "name": "t",
                    "columns": [
                        {"name": "a", "type": "INT", "nullable": false},
                        {"name": "b", "type": "TEXT"},
                    ],
                }
            })
        );
    }

    #[test]
    fn create_view_as_select() {
        assert_eq!(
            scrub_sql("CREATE VIEW v AS SELECT a FROM t"),
            json!({
                "create_view": {
                    "name": "v",
                    "query": {"select": {"value": "a"}, "from": "t"},
                }
            })
        );
    }

    #[test]
    fn create_index_on_columns() {
        assert_eq!(
            scrub_sql("CREATE INDEX idx ON t (a, b)"),
            json!({
                "create_index": {
                    "name": "idx",
                    "table": "t",
                    "columns": ["a", "b"],
                }
            })
        );
    }
}
