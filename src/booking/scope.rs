//! Row-level visibility rules. Every list and lookup over orders and tickets
//! goes through these conditions so that the database only ever returns (and
//! counts) rows the caller may see.

use sea_orm::{
    ColumnTrait, Condition, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait, Select,
    sea_query::{Expr, extension::postgres::PgExpr},
};

use crate::{
    entity::{flights, orders, tickets},
    middleware::auth::AuthUser,
};

/// Orders visible to `caller`: staff see every order, everyone else only their own.
pub fn scope_orders(caller: &AuthUser) -> Condition {
    if caller.is_staff() {
        Condition::all()
    } else {
        Condition::all().add(orders::Column::UserId.eq(caller.user_id))
    }
}

/// Tickets visible to `caller`, resolved through the owning order.
/// Only meaningful on a query joined with `orders`; see [`visible_tickets`].
pub fn scope_tickets(caller: &AuthUser) -> Condition {
    scope_orders(caller)
}

/// Ticket query joined with `orders` and narrowed to what `caller` may see.
pub fn visible_tickets(caller: &AuthUser) -> Select<tickets::Entity> {
    tickets::Entity::find()
        .join(JoinType::InnerJoin, tickets::Relation::Orders.def())
        .filter(scope_tickets(caller))
}

/// Case-insensitive substring match on the flight code. Blank input matches everything.
pub fn flight_code_filter(code: Option<&str>) -> Condition {
    match code.map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => Condition::all().add(
            Expr::col((flights::Entity, flights::Column::Code))
                .ilike(format!("%{}%", escape_like(code))),
        ),
        None => Condition::all(),
    }
}

fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};
    use uuid::Uuid;

    use super::*;

    fn caller(role: &str) -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            role: role.into(),
        }
    }

    #[test]
    fn regular_users_only_see_their_orders() {
        let user = caller("user");
        let sql = orders::Entity::find()
            .filter(scope_orders(&user))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#""orders"."user_id" = "#), "{sql}");
        assert!(sql.contains(&user.user_id.to_string()), "{sql}");
    }

    #[test]
    fn staff_orders_are_unfiltered() {
        let staff = caller("staff");
        let sql = orders::Entity::find()
            .filter(scope_orders(&staff))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!sql.contains("user_id\" ="), "{sql}");
    }

    #[test]
    fn ticket_scope_filters_through_orders_join() {
        let user = caller("user");
        let sql = visible_tickets(&user).build(DbBackend::Postgres).to_string();
        assert!(sql.contains(r#"INNER JOIN "orders""#), "{sql}");
        assert!(sql.contains(r#""orders"."user_id" = "#), "{sql}");
        assert!(sql.contains(&user.user_id.to_string()), "{sql}");

        let staff_sql = visible_tickets(&caller("staff"))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!staff_sql.contains("user_id\" ="), "{staff_sql}");
    }

    #[test]
    fn flight_code_filter_is_case_insensitive_substring() {
        let sql = flights::Entity::find()
            .filter(flight_code_filter(Some(" fl12 ")))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains("ILIKE"), "{sql}");
        assert!(sql.contains("%fl12%"), "{sql}");

        for blank in [None, Some(""), Some("   ")] {
            let sql = flights::Entity::find()
                .filter(flight_code_filter(blank))
                .build(DbBackend::Postgres)
                .to_string();
            assert!(!sql.contains("ILIKE"), "{sql}");
        }
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("FL_1%"), r"FL\_1\%");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
        assert_eq!(escape_like("FL12"), "FL12");
    }
}
