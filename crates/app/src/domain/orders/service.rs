//! Orders service.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        orders::{
            data::{NewOrder, NewOrderItem, OrderAccess, ShippingDetails},
            errors::OrdersServiceError,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
            status::OrderStatus,
            totals::order_total,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
        }
    }

    /// Attach each order's items in one query.
    async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut items: HashMap<OrderUuid, Vec<OrderItemRecord>> = HashMap::new();

        for item in self.items_repository.list_order_items(tx, &uuids).await? {
            items.entry(item.order_uuid).or_default().push(item);
        }

        for order in &mut orders {
            order.items = items.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }

    async fn load_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut order: OrderRecord,
    ) -> Result<OrderRecord, OrdersServiceError> {
        order.items = self
            .items_repository
            .list_order_items(tx, &[order.uuid])
            .await?;

        Ok(order)
    }

    /// Lock an order whose items may still change.
    async fn lock_editable(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        access: OrderAccess,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let locked = self.orders_repository.lock_order(tx, access, order).await?;

        if !locked.status.items_editable() {
            return Err(OrdersServiceError::NotEditable);
        }

        Ok(locked)
    }

    /// Recompute and store the total from the order's current items.
    async fn recompute_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let items = self.items_repository.list_order_items(tx, &[order]).await?;

        let total = order_total(items.iter().map(|item| (item.price, item.quantity)))
            .ok_or(OrdersServiceError::InvalidData)?;

        let mut updated = self
            .orders_repository
            .set_order_total(tx, order, total)
            .await?;

        updated.items = items;

        Ok(updated)
    }

    async fn reserve_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<(), OrdersServiceError> {
        let lines = self.items_repository.lock_order_stock(tx, order).await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyOrder);
        }

        if let Some(short) = lines
            .iter()
            .find(|line| line.quantity > u32::from(line.count_in_stock))
        {
            return Err(OrdersServiceError::InsufficientStock {
                product: short.product_uuid,
            });
        }

        self.items_repository.decrement_stock(tx, order).await?;

        Ok(())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders_repository.list_orders(&mut tx).await?;
        let orders = self.with_items(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_user_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders_repository.list_user_orders(&mut tx, user).await?;
        let orders = self.with_items(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        access: OrderAccess,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.orders_repository.get_order(&mut tx, access, order).await?;
        let order = self.load_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn get_active_order(&self, user: UserUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.orders_repository.get_active_order(&mut tx, user).await?;
        let order = self.load_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .orders_repository
            .create_order(&mut tx, order.uuid, order.user_uuid, order.shipping)
            .await?;

        for line in order.items {
            let item = NewOrderItem {
                uuid: OrderItemUuid::new(),
                product_uuid: line.product_uuid,
                quantity: line.quantity,
            };

            self.items_repository
                .add_order_item(&mut tx, created.uuid, item)
                .await?
                .ok_or(OrdersServiceError::InvalidReference)?;
        }

        let created = self.recompute_total(&mut tx, created.uuid).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_order(
        &self,
        access: OrderAccess,
        order: OrderUuid,
        shipping: ShippingDetails,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let locked = self
            .orders_repository
            .lock_order(&mut tx, access, order)
            .await?;

        if locked.status.is_terminal() {
            return Err(OrdersServiceError::NotEditable);
        }

        let updated = self
            .orders_repository
            .update_order(&mut tx, order, shipping)
            .await?;

        let updated = self.load_items(&mut tx, updated).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn add_item(
        &self,
        access: OrderAccess,
        order: OrderUuid,
        item: NewOrderItem,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.lock_editable(&mut tx, access, order).await?;

        self.items_repository
            .add_order_item(&mut tx, order, item)
            .await?
            .ok_or(OrdersServiceError::InvalidReference)?;

        let updated = self.recompute_total(&mut tx, order).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn update_item(
        &self,
        access: OrderAccess,
        order: OrderUuid,
        item: OrderItemUuid,
        quantity: u32,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.lock_editable(&mut tx, access, order).await?;

        let rows_affected = self
            .items_repository
            .update_order_item(&mut tx, order, item, quantity)
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        let updated = self.recompute_total(&mut tx, order).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn remove_item(
        &self,
        access: OrderAccess,
        order: OrderUuid,
        item: OrderItemUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.lock_editable(&mut tx, access, order).await?;

        let rows_affected = self
            .items_repository
            .delete_order_item(&mut tx, order, item)
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        let updated = self.recompute_total(&mut tx, order).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn update_status(
        &self,
        access: OrderAccess,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .orders_repository
            .lock_order(&mut tx, access, order)
            .await?;

        if matches!(access, OrderAccess::OwnedBy(_)) && status != OrderStatus::Cancelled {
            return Err(OrdersServiceError::Forbidden);
        }

        if !current.status.can_transition_to(status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        match (current.status, status) {
            (OrderStatus::Placed, OrderStatus::Processing) => {
                self.reserve_stock(&mut tx, order).await?;
            }
            (OrderStatus::Processing, OrderStatus::Cancelled) => {
                self.items_repository.restock(&mut tx, order).await?;
            }
            _ => {}
        }

        let updated = self
            .orders_repository
            .set_order_status(&mut tx, order, status)
            .await?;

        let updated = self.load_items(&mut tx, updated).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.orders_repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn total_sales(&self) -> Result<u64, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self.orders_repository.total_sales(&mut tx).await?;

        tx.commit().await?;

        Ok(total)
    }

    async fn count_orders(&self) -> Result<u64, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let count = self.orders_repository.count_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(count)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieves every order, newest first.
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Retrieves a user's orders, newest first.
    async fn list_user_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Retrieve a single order the caller can reach.
    async fn get_order(
        &self,
        access: OrderAccess,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve the user's `Placed` order.
    async fn get_active_order(&self, user: UserUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Creates a new `Placed` order with its initial items.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Replaces the order's shipping details.
    async fn update_order(
        &self,
        access: OrderAccess,
        order: OrderUuid,
        shipping: ShippingDetails,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Adds a product to the order, merging with an existing line.
    async fn add_item(
        &self,
        access: OrderAccess,
        order: OrderUuid,
        item: NewOrderItem,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Sets the quantity of an existing line.
    async fn update_item(
        &self,
        access: OrderAccess,
        order: OrderUuid,
        item: OrderItemUuid,
        quantity: u32,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Removes a line from the order.
    async fn remove_item(
        &self,
        access: OrderAccess,
        order: OrderUuid,
        item: OrderItemUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Moves the order to a new status.
    async fn update_status(
        &self,
        access: OrderAccess,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Deletes an order and its items.
    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError>;

    /// Sum of order totals, excluding cancelled orders.
    async fn total_sales(&self) -> Result<u64, OrdersServiceError>;

    /// Counts all orders.
    async fn count_orders(&self) -> Result<u64, OrdersServiceError>;
}
