//! Tests for join tree linearization and alias validation.

mod common;
use common::*;

use oxide_dbal::Error;

fn aliases(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| String::from(*s)).collect()
}

#[test]
fn direct_children_are_emitted_before_grandchildren() {
    let qb = qb()
        .select(["*"])
        .from("ta", "a")
        .join("a", "tb", "b", "b.a_id = a.id")
        .join("b", "tc", "c", "c.b_id = b.id")
        .join("a", "td", "d", "d.a_id = a.id")
        .join("c", "te", "e", "e.c_id = c.id");
    assert_eq!(
        sql(qb),
        "SELECT * FROM ta a \
         INNER JOIN tb b ON b.a_id = a.id \
         INNER JOIN td d ON d.a_id = a.id \
         INNER JOIN tc c ON c.b_id = b.id \
         INNER JOIN te e ON e.c_id = c.id"
    );
}

#[test]
fn subtrees_are_expanded_in_registration_order() {
    let qb = qb()
        .select(["*"])
        .from("ta", "a")
        .left_join("a", "tb", "b", None)
        .left_join("a", "td", "d", None)
        .right_join("d", "tf", "f", None)
        .inner_join("b", "tc", "c", None);
    assert_eq!(
        sql(qb),
        "SELECT * FROM ta a LEFT JOIN tb b LEFT JOIN td d INNER JOIN tc c RIGHT JOIN tf f"
    );
}

#[test]
fn joins_attach_to_their_own_from_source() {
    let qb = qb()
        .select(["*"])
        .from("users", "u")
        .from("groups", "g")
        .join("g", "roles", "r", "r.group_id = g.id")
        .join("u", "phones", "p", "p.user_id = u.id");
    assert_eq!(
        sql(qb),
        "SELECT * FROM users u INNER JOIN phones p ON p.user_id = u.id, \
         groups g INNER JOIN roles r ON r.group_id = g.id"
    );
}

#[test]
fn join_may_be_added_before_its_from() {
    let qb = qb()
        .select(["u.id"])
        .join("u", "phones", "p", "p.user_id = u.id")
        .from("users", "u");
    assert_eq!(
        sql(qb),
        "SELECT u.id FROM users u INNER JOIN phones p ON p.user_id = u.id"
    );
}

#[test]
fn join_on_table_without_alias() {
    let qb = qb()
        .select(["*"])
        .from("users", None)
        .join("users", "phones", "p", "p.user_id = users.id");
    assert_eq!(
        sql(qb),
        "SELECT * FROM users INNER JOIN phones p ON p.user_id = users.id"
    );
}

#[test]
fn duplicate_join_alias_is_not_unique() {
    let qb = qb()
        .select(["*"])
        .from("users", "u")
        .join("u", "phones", "x", None)
        .join("u", "addresses", "x", None);
    assert_eq!(
        sql_err(qb),
        Error::NonUniqueAlias {
            alias: String::from("x"),
            known_aliases: aliases(&["u", "x"]),
        }
    );
}

#[test]
fn join_alias_colliding_with_from_is_not_unique() {
    let qb = qb()
        .select(["*"])
        .from("users", "u")
        .from("groups", "g")
        .join("u", "phones", "g", None);
    let err = sql_err(qb);
    assert!(matches!(err, Error::NonUniqueAlias { ref alias, .. } if alias == "g"));
    assert!(err.to_string().contains("registered aliases are: u, g."));
}

#[test]
fn join_from_unknown_alias() {
    let qb = qb()
        .select(["*"])
        .from("users", "u")
        .join("u", "phones", "p", None)
        .join("z", "addresses", "a", None);
    assert_eq!(
        sql_err(qb),
        Error::UnknownAlias {
            alias: String::from("z"),
            known_aliases: aliases(&["u", "p"]),
        }
    );
}

#[test]
fn join_from_unreachable_join_alias() {
    let qb = qb()
        .select(["*"])
        .from("users", "u")
        .join("x", "phones", "y", None)
        .join("y", "addresses", "x", None);
    assert!(matches!(
        sql_err(qb),
        Error::UnknownAlias { ref alias, .. } if alias == "x"
    ));
}

#[test]
fn self_referencing_join_is_not_unique() {
    let qb = qb()
        .select(["*"])
        .from("users", "u")
        .join("u", "phones", "p", None)
        .join("p", "phones", "p", None);
    assert!(matches!(
        sql_err(qb),
        Error::NonUniqueAlias { ref alias, .. } if alias == "p"
    ));
}

#[test]
fn alias_errors_are_only_raised_by_compilation() {
    let qb = qb()
        .select(["*"])
        .from("users", "u")
        .join("missing", "phones", "p", None);
    let fixed = qb.clone().from("people", "missing");
    assert!(qb.compile().is_err());
    assert_eq!(
        sql(fixed),
        "SELECT * FROM users u, people missing INNER JOIN phones p"
    );
}
