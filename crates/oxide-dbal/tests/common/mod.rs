#![allow(dead_code)]

use std::sync::Arc;

use oxide_dbal::platform::Platform;
use oxide_dbal::{Error, QueryBuilder};

pub fn qb() -> QueryBuilder {
    QueryBuilder::default()
}

pub fn qb_for(platform: impl Platform + 'static) -> QueryBuilder {
    QueryBuilder::new(Arc::new(platform))
}

pub fn sql(mut qb: QueryBuilder) -> String {
    qb.get_sql()
        .unwrap_or_else(|e| panic!("Failed to compile query\nError: {e}"))
}

pub fn sql_err(mut qb: QueryBuilder) -> Error {
    match qb.get_sql() {
        Ok(sql) => panic!("Expected compile error, got: {sql}"),
        Err(e) => e,
    }
}
