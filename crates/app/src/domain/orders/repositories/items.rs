//! Order Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    columns::{try_get_amount, try_get_unsigned},
    orders::{
        data::NewOrderItem,
        records::{OrderItemRecord, OrderItemUuid, OrderUuid},
    },
    products::records::ProductUuid,
};

const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");
const ADD_ORDER_ITEM_SQL: &str = include_str!("../sql/add_order_item.sql");
const UPDATE_ORDER_ITEM_SQL: &str = include_str!("../sql/update_order_item.sql");
const DELETE_ORDER_ITEM_SQL: &str = include_str!("../sql/delete_order_item.sql");
const LOCK_ORDER_STOCK_SQL: &str = include_str!("../sql/lock_order_stock.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("../sql/decrement_stock.sql");
const RESTOCK_SQL: &str = include_str!("../sql/restock.sql");

/// An order line alongside the current stock of its product.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StockLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub count_in_stock: u8,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let orders: Vec<Uuid> = orders.iter().copied().map(OrderUuid::into_uuid).collect();

        query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(orders)
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert the line, or add to the quantity of the existing line for the
    /// same product. Returns `None` if the product does not exist.
    pub(crate) async fn add_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: NewOrderItem,
    ) -> Result<Option<OrderItemUuid>, sqlx::Error> {
        let uuid: Option<Uuid> = query_scalar(ADD_ORDER_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(order.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(quantity_param(item.quantity)?)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(uuid.map(OrderItemUuid::from_uuid))
    }

    pub(crate) async fn update_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: OrderItemUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(order.into_uuid())
            .bind(quantity_param(quantity)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: OrderItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Lock the products referenced by the order and report their stock.
    pub(crate) async fn lock_order_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<StockLine>, sqlx::Error> {
        query_as::<Postgres, StockLine>(LOCK_ORDER_STOCK_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<(), sqlx::Error> {
        query(DECREMENT_STOCK_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn restock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<(), sqlx::Error> {
        query(RESTOCK_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

fn quantity_param(quantity: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(quantity).map_err(|e| sqlx::Error::Encode(format!("quantity: {e}").into()))
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            quantity: try_get_unsigned::<u32, i32>(row, "quantity")?,
            price: try_get_amount(row, "price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StockLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_unsigned::<u32, i32>(row, "quantity")?,
            count_in_stock: try_get_unsigned::<u8, i16>(row, "count_in_stock")?,
        })
    }
}
