//! Tests for placeholder rewriting and the driver binding adapters.

use std::collections::BTreeMap;

use oxide_dbal::driver::{
    NamedParameterStatement, NamedStatement, PositionalParameterStatement, PositionalStatement,
};
use oxide_dbal::{
    Error, ParameterBindingMap, ParameterType, PlaceholderRewriter, QueryBuilder, Result, SqlValue,
};

#[derive(Debug, Default)]
struct PositionalBackend {
    bound: BTreeMap<usize, SqlValue>,
}

impl PositionalStatement for PositionalBackend {
    fn bind_value(&mut self, position: usize, value: SqlValue, _ty: ParameterType) -> Result<()> {
        self.bound.insert(position, value);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct NamedBackend {
    bound: BTreeMap<String, SqlValue>,
}

impl NamedStatement for NamedBackend {
    fn bind_value(&mut self, name: &str, value: SqlValue, _ty: ParameterType) -> Result<()> {
        self.bound.insert(String::from(name), value);
        Ok(())
    }
}

#[test]
fn rewrite_skips_question_mark_in_literal() {
    let rewritten = PlaceholderRewriter::rewrite("SELECT * FROM t WHERE a = ? AND b = '?'").unwrap();
    assert_eq!(rewritten.sql, "SELECT * FROM t WHERE a = :param1 AND b = '?'");
    assert_eq!(
        rewritten.parameter_map,
        BTreeMap::from([(1, String::from(":param1"))])
    );
}

#[test]
fn rewrite_unterminated_literal_reports_opening_quote() {
    assert_eq!(
        PlaceholderRewriter::rewrite("a = 'unterminated"),
        Err(Error::NonTerminatedStringLiteral { offset: 4 })
    );
}

#[test]
fn rewrite_handles_escaped_quotes_and_double_quoted_identifiers() {
    let rewritten =
        PlaceholderRewriter::rewrite("SELECT \"wh?t\" FROM t WHERE a = 'it''s?' AND b = ? AND c = ?")
            .unwrap();
    assert_eq!(
        rewritten.sql,
        "SELECT \"wh?t\" FROM t WHERE a = 'it''s?' AND b = :param1 AND c = :param2"
    );
    assert_eq!(rewritten.parameter_map.len(), 2);
}

#[test]
fn binding_map_records_every_occurrence() {
    let map = ParameterBindingMap::parse("WHERE a=:x OR b=:x").unwrap();
    assert_eq!(map.sql(), "WHERE a=? OR b=?");
    assert_eq!(map.positions_by_name().get("x"), Some(&vec![0, 1]));
}

#[test]
fn binding_map_rejects_unterminated_literal() {
    assert_eq!(
        ParameterBindingMap::parse("WHERE a = :a AND b = \"x"),
        Err(Error::NonTerminatedStringLiteral { offset: 21 })
    );
}

#[test]
fn named_bind_reaches_every_position() {
    let mut stmt = NamedParameterStatement::prepare("WHERE a=:x OR b=:x AND c=:y", |_| {
        Ok(PositionalBackend::default())
    })
    .unwrap();

    let v = SqlValue::Text(String::from("V"));
    stmt.bind_value("x", &v, ParameterType::String).unwrap();
    stmt.bind_value(":y", &SqlValue::Int(3), ParameterType::Integer)
        .unwrap();

    let bound = stmt.into_inner().bound;
    assert_eq!(bound.get(&0), Some(&v));
    assert_eq!(bound.get(&1), Some(&v));
    assert_eq!(bound.get(&2), Some(&SqlValue::Int(3)));
}

#[test]
fn named_bind_unknown_parameter() {
    let mut stmt =
        NamedParameterStatement::prepare("WHERE a=:x", |_| Ok(PositionalBackend::default()))
            .unwrap();
    assert_eq!(
        stmt.bind_value("nope", &SqlValue::Null, ParameterType::Null),
        Err(Error::UnknownParameterName(String::from("nope")))
    );
}

#[test]
fn positional_bind_through_named_backend() {
    let mut stmt = PositionalParameterStatement::prepare("INSERT INTO t VALUES(?, ?)", |sql| {
        assert_eq!(sql, "INSERT INTO t VALUES(:param1, :param2)");
        Ok(NamedBackend::default())
    })
    .unwrap();

    stmt.bind_value(2, SqlValue::Bool(true), ParameterType::Boolean)
        .unwrap();
    stmt.bind_value(1, SqlValue::Int(1), ParameterType::Integer)
        .unwrap();
    assert_eq!(
        stmt.bind_value(3, SqlValue::Null, ParameterType::Null),
        Err(Error::UnknownParameterIndex(3))
    );

    let bound = stmt.into_inner().bound;
    assert_eq!(bound.get(":param1"), Some(&SqlValue::Int(1)));
    assert_eq!(bound.get(":param2"), Some(&SqlValue::Bool(true)));
}

#[test]
fn compiled_query_feeds_binding_map() {
    let mut qb = QueryBuilder::default();
    let status = qb.create_named_parameter("open", None, Some(":status"));
    let mut qb = qb
        .select(["id"])
        .from("tickets", None)
        .where_clause(format!("status = {status}"))
        .or_where(format!("previous_status = {status}"))
        .and_where("title <> ':status'");

    let sql = qb.get_sql().unwrap();
    let map = ParameterBindingMap::parse(&sql).unwrap();
    assert_eq!(
        map.sql(),
        "SELECT id FROM tickets WHERE (status = ? OR previous_status = ?) AND title <> ':status'"
    );
    assert_eq!(map.positions("status").unwrap(), &[0, 1]);
}
