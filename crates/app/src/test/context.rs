//! Test context for service-level integration tests.

use jiff::SignedDuration;

use crate::{
    auth::PgAuthService,
    database::Db,
    domain::{
        categories::PgCategoriesService, orders::PgOrdersService, products::PgProductsService,
        users::PgUsersService,
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub app_db: Db,
    pub auth: PgAuthService,
    pub categories: PgCategoriesService,
    pub products: PgProductsService,
    pub users: PgUsersService,
    pub orders: PgOrdersService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            auth: PgAuthService::new(&db, SignedDuration::from_hours(1)),
            categories: PgCategoriesService::new(db.clone()),
            products: PgProductsService::new(db.clone()),
            users: PgUsersService::new(db.clone()),
            orders: PgOrdersService::new(db.clone()),
            app_db: db,
            db: test_db,
        }
    }
}
