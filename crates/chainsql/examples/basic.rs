//! Basic usage example for chainsql
//!
//! Run with: cargo run --example basic -p chainsql

use chainsql::{BuilderConfig, Dialect, SqlBuilder, on, on_and, row, var};

fn main() {
    let mut sb = SqlBuilder::new(Dialect::MySql);

    // SELECT with a join and grouping
    sb.select(["u.name", "count(o.id)"])
        .from(["users u"])
        .left_join_ons("orders o", [on("o.user_id", "=", var("u.id")), on_and("o.state", "=", "paid")])
        .and_where("u.country", "=", "NZ")
        .group_by(["u.name"])
        .having("count(o.id)", ">", 3)
        .order_by_desc(["u.name"])
        .limit_offset(0, 20)
        .build_select();
    println!("{}", sb.sql());

    // UPDATE
    sb.clear();
    sb.set("last_seen", var("now()"))
        .set("note", "it's back")
        .from_one("users")
        .and_where("id", "=", 42)
        .build_update();
    println!("{}", sb.sql());

    // Bulk INSERT
    sb.clear();
    sb.fields(["id", "name", "email"])
        .values(row![1, "alice", "alice@example.com"])
        .values(row![2, "bob", None::<&str>])
        .insert_into("users")
        .build_bulk_insert();
    println!("{}", sb.sql());

    // SQLite upsert
    let mut lite = SqlBuilder::new(Dialect::Sqlite);
    lite.fields(["k", "v"])
        .values(row!["theme", "dark"])
        .insert_into("settings")
        .build_insert_or_replace();
    println!("{}", lite.sql());

    // MSSQL TOP
    let mut ms = SqlBuilder::new(Dialect::MsSql);
    ms.select(["id"]).from(["jobs"]).top(5).order_by(["id"]).build_select();
    println!("{}", ms.sql());

    // Log instead of panicking; the violation is kept on the builder
    let mut pg = SqlBuilder::with_config(BuilderConfig::new().dialect(Dialect::PostgreSql).log_violations());
    pg.select(["id"]).from(["jobs"]).limit(5).build_select();
    println!("{}", pg.sql());
    if let Err(e) = pg.validate() {
        println!("violation: {e}");
    }
}
