//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    columns::{amount_param, try_get_amount},
    orders::{
        data::{OrderAccess, ShippingDetails},
        records::{OrderRecord, OrderUuid},
        status::OrderStatus,
    },
    users::records::UserUuid,
};

const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("../sql/list_user_orders.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("../sql/lock_order.sql");
const GET_ACTIVE_ORDER_SQL: &str = include_str!("../sql/get_active_order.sql");
const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const UPDATE_ORDER_SQL: &str = include_str!("../sql/update_order.sql");
const SET_ORDER_TOTAL_SQL: &str = include_str!("../sql/set_order_total.sql");
const SET_ORDER_STATUS_SQL: &str = include_str!("../sql/set_order_status.sql");
const DELETE_ORDER_SQL: &str = include_str!("../sql/delete_order.sql");
const COUNT_ORDERS_SQL: &str = include_str!("../sql/count_orders.sql");
const TOTAL_SALES_SQL: &str = include_str!("../sql/total_sales.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_USER_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        access: OrderAccess,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(access.owner().map(UserUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch the order and hold a row lock on it until the transaction ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        access: OrderAccess,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(access.owner().map(UserUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_active_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ACTIVE_ORDER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
        shipping: ShippingDetails,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .bind(shipping.shipping_address1)
            .bind(shipping.shipping_address2)
            .bind(shipping.city)
            .bind(shipping.zip)
            .bind(shipping.country)
            .bind(shipping.phone)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        shipping: ShippingDetails,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(shipping.shipping_address1)
            .bind(shipping.shipping_address2)
            .bind(shipping.city)
            .bind(shipping.zip)
            .bind(shipping.country)
            .bind(shipping.phone)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_order_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        total_price: u64,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(SET_ORDER_TOTAL_SQL)
            .bind(order.into_uuid())
            .bind(amount_param(total_price, "total_price")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(SET_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_ORDERS_SQL).fetch_one(&mut **tx).await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "order_count".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn total_sales(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let total: i64 = query_scalar(TOTAL_SALES_SQL).fetch_one(&mut **tx).await?;

        u64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total_sales".to_string(),
            source: Box::new(e),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            status,
            shipping: ShippingDetails {
                shipping_address1: row.try_get("shipping_address1")?,
                shipping_address2: row.try_get("shipping_address2")?,
                city: row.try_get("city")?,
                zip: row.try_get("zip")?,
                country: row.try_get("country")?,
                phone: row.try_get("phone")?,
            },
            total_price: try_get_amount(row, "total_price")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
