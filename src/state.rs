use std::sync::Arc;

use crate::db::{DbPool, OrmConn, create_orm_conn};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub auth: Arc<AuthSettings>,
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
}

impl AppState {
    pub fn new(pool: DbPool, auth: AuthSettings) -> Self {
        let orm = create_orm_conn(pool.clone());
        Self {
            pool,
            orm,
            auth: Arc::new(auth),
        }
    }
}
