//! Rendering through the high-level `Query` surface.

use fluentql::{FulltextMode, Operator, QbError, Query, SortOrder, Value, reference};

#[test]
fn grouped_where_with_order() {
    let query = Query::new()
        .select("tablename", &["id", "username", "email"])
        .unwrap()
        .where_("id", 1)
        .unwrap()
        .and_where("email", "someone@example.com")
        .unwrap()
        .order_by_asc("id")
        .or_where("id", 2)
        .unwrap()
        .or_where("id", 3)
        .unwrap()
        .and_where("username", "test")
        .unwrap()
        .prepare()
        .unwrap();

    assert_eq!(
        query.sql(),
        Some(
            "SELECT `tablename`.`id`,`tablename`.`username`,`tablename`.`email` FROM `tablename` \
             WHERE (`id` = 1 AND `email` = 'someone@example.com') OR (`id` = 2) OR (`id` = 3 AND `username` = 'test') \
             ORDER BY `id` ASC"
        )
    );
}

#[test]
fn count_uses_default_alias() {
    let sql = Query::new()
        .count("tablename", "id")
        .unwrap()
        .where_("type", "something")
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT COUNT(`tablename`.`id`) AS `count` FROM `tablename` WHERE (`type` = 'something')"
    );
}

#[test]
fn where_after_between_needs_a_group_type() {
    let err = Query::new()
        .select("tablename", &["id", "name"])
        .unwrap()
        .where_between("age", 18, 99)
        .unwrap()
        .where_("id", 1)
        .unwrap_err();
    assert!(matches!(err, QbError::DuplicateInitialWhereClause));
    assert!(err.is_validation());
}

#[test]
fn between_groups() {
    let sql = Query::new()
        .select("products", &["id"])
        .unwrap()
        .where_between("price", 10, 20)
        .unwrap()
        .and_where("stock", 0)
        .unwrap()
        .or_where_between("price", 100, 200)
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT `products`.`id` FROM `products` \
         WHERE (`price` BETWEEN 10 AND 20 AND `stock` = 0) OR (`price` BETWEEN 100 AND 200)"
    );
}

#[test]
fn joins_and_limit() {
    let sql = Query::new()
        .select("tablename", &["id", "name"])
        .unwrap()
        .left_join("tablename2", "id", reference("tablename", "id"))
        .unwrap()
        .right_join("tablename3", "id", reference("tablename", "id"))
        .unwrap()
        .inner_join("tablename4", "id", reference("tablename", "id"))
        .unwrap()
        .where_("id", 1)
        .unwrap()
        .limit(0, 20)
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT `tablename`.`id`,`tablename`.`name` FROM `tablename` \
         LEFT JOIN `tablename2` ON `tablename2`.`id` = `tablename`.`id` \
         RIGHT JOIN `tablename3` ON `tablename3`.`id` = `tablename`.`id` \
         INNER JOIN `tablename4` ON `tablename4`.`id` = `tablename`.`id` \
         WHERE (`id` = 1) LIMIT 0, 20"
    );
}

#[test]
fn fulltext_where_and_select() {
    let sql = Query::new()
        .select("tablename", &["id", "name"])
        .unwrap()
        .where_fulltext(
            "summary,description",
            "Keywords here ...",
            FulltextMode::NaturalLanguage,
        )
        .unwrap()
        .limit(0, 20)
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT `tablename`.`id`,`tablename`.`name` FROM `tablename` \
         WHERE (MATCH (summary,description) AGAINST 'Keywords here ...' IN NATURAL LANGUAGE MODE) \
         LIMIT 0, 20"
    );

    let sql = Query::new()
        .select("tablename", &[])
        .unwrap()
        .fulltext("title,description", "text", FulltextMode::Boolean)
        .unwrap()
        .order_by_asc("score")
        .render()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT MATCH (title,description) AGAINST 'text' IN BOOLEAN MODE AS `score` \
         FROM `tablename` ORDER BY `score` ASC"
    );
}

#[test]
fn insert_and_update_from_pairs() {
    let sql = Query::new()
        .insert("tablename", [("firstame", "John"), ("lastname", "Doe")])
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(
        sql,
        "INSERT INTO `tablename` (`firstame`,`lastname`) VALUES ('John','Doe')"
    );

    let sql = Query::new()
        .update("tablename", [("firstame", "John"), ("lastname", "Doe")])
        .unwrap()
        .where_("id", 1)
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(
        sql,
        "UPDATE `tablename` SET `firstame`='John', `lastname`='Doe' WHERE (`id` = 1)"
    );
}

#[test]
fn update_with_mixed_values() {
    let sql = Query::new()
        .update(
            "sessions",
            [
                ("active", Value::from(false)),
                ("ended_at", Value::current_timestamp()),
                ("note", Value::Null),
            ],
        )
        .unwrap()
        .where_op("expires_at", Value::raw("NOW()"), Operator::Lt)
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(
        sql,
        "UPDATE `sessions` SET `active`=FALSE, `ended_at`=CURRENT_TIMESTAMP, `note`=NULL \
         WHERE (`expires_at` < NOW())"
    );
}

#[test]
fn delete_and_truncate() {
    let sql = Query::new()
        .delete("tablename")
        .unwrap()
        .where_("id", 1)
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(sql, "DELETE FROM `tablename` WHERE (`id` = 1)");

    let sql = Query::new().truncate("tablename").unwrap().render().unwrap();
    assert_eq!(sql, "TRUNCATE `tablename`");
}

#[test]
fn subquery_defaults_to_result_alias() {
    let nested = Query::new()
        .count("tablename", "id")
        .unwrap()
        .where_("user", 1)
        .unwrap();
    let nested_sql = nested.render().unwrap();

    let sql = Query::new()
        .select("tablename", &["id", "test"])
        .unwrap()
        .sub_query(nested)
        .unwrap()
        .order_by_asc("score")
        .render()
        .unwrap();
    assert_eq!(
        sql,
        format!(
            "SELECT `tablename`.`id`,`tablename`.`test`,({nested_sql}) AS `result` \
             FROM `tablename` ORDER BY `score` ASC"
        )
    );
}

#[test]
fn avg_and_sum_aliases() {
    let sql = Query::new()
        .select("tablename", &["id", "name", "price"])
        .unwrap()
        .avg("tablename", "price")
        .unwrap()
        .sum_as("tablename", "price", "total")
        .unwrap()
        .order_by_desc("price")
        .render()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT `tablename`.`id`,`tablename`.`name`,`tablename`.`price`,\
         AVG(`tablename`.`price`) AS `avg`,SUM(`tablename`.`price`) AS `total` \
         FROM `tablename` ORDER BY `price` DESC"
    );
}

#[test]
fn null_comparisons() {
    let sql = Query::new()
        .select("users", &["id"])
        .unwrap()
        .where_("deleted_at", Value::Null)
        .unwrap()
        .or_where_op("banned_at", None::<i64>, Operator::Ne)
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT `users`.`id` FROM `users` WHERE (`deleted_at` IS NULL) OR (`banned_at` IS NOT NULL)"
    );
}

#[test]
fn limit_boundaries() {
    let sql = Query::new()
        .select("users", &["id"])
        .unwrap()
        .limit(0, 10)
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(sql, "SELECT `users`.`id` FROM `users` LIMIT 0, 10");

    let sql = Query::new()
        .select("users", &["id"])
        .unwrap()
        .first_page()
        .render()
        .unwrap();
    assert_eq!(sql, "SELECT `users`.`id` FROM `users` LIMIT 0, 25");

    let err = Query::new()
        .select("users", &["id"])
        .unwrap()
        .limit(0, 0)
        .unwrap_err();
    assert!(matches!(err, QbError::InvalidLimit));
}

#[test]
fn order_keys_keep_call_order() {
    let sql = Query::new()
        .select("users", &["id"])
        .unwrap()
        .order_by("last_name", SortOrder::Asc)
        .order_by_desc("created_at")
        .order_by_asc("id")
        .render()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT `users`.`id` FROM `users` ORDER BY `last_name` ASC, `created_at` DESC, `id` ASC"
    );
}

#[test]
fn prepare_twice_is_stable() {
    let query = Query::new()
        .select("users", &["id", "name"])
        .unwrap()
        .where_("id", 1)
        .unwrap()
        .debug(true)
        .prepare()
        .unwrap();
    let first = query.sql().map(str::to_string);
    let query = query.prepare().unwrap();
    assert_eq!(query.sql().map(str::to_string), first);
    assert_eq!(query.builder().where_clauses().len(), 1);
}
