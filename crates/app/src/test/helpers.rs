//! Test Helpers

use crate::{
    domain::{
        categories::{
            CategoriesService, CategoriesServiceError,
            data::NewCategory,
            records::{CategoryRecord, CategoryUuid},
        },
        orders::{
            OrdersService, OrdersServiceError,
            data::{NewOrder, NewOrderLine, ShippingDetails},
            records::{OrderRecord, OrderUuid},
        },
        products::{
            ProductsService, ProductsServiceError,
            data::{NewProduct, ProductDetails},
            records::{ProductRecord, ProductUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

pub(crate) fn new_user(email: &str, password: &str, is_admin: bool) -> NewUser {
    NewUser {
        uuid: UserUuid::new(),
        name: "Test User".to_string(),
        email: email.to_string(),
        password: password.to_string(),
        phone: "555-0100".to_string(),
        is_admin,
        street: "1 Main Street".to_string(),
        apartment: String::new(),
        zip: "12345".to_string(),
        city: "Springfield".to_string(),
        country: "US".to_string(),
    }
}

pub(crate) async fn create_user(
    ctx: &TestContext,
    email: &str,
    password: &str,
    is_admin: bool,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .create_user(new_user(email, password, is_admin))
        .await
}

pub(crate) async fn create_category(
    ctx: &TestContext,
    name: &str,
) -> Result<CategoryRecord, CategoriesServiceError> {
    ctx.categories
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: name.to_string(),
            icon: None,
            color: None,
        })
        .await
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    category: CategoryUuid,
    price: u64,
    count_in_stock: u8,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            details: ProductDetails {
                category_uuid: category,
                name: "Test Product".to_string(),
                description: "A product".to_string(),
                rich_description: String::new(),
                brand: "Acme".to_string(),
                price,
                count_in_stock,
                rating: 0.0,
                num_reviews: 0,
                is_featured: false,
            },
        })
        .await
}

pub(crate) fn shipping() -> ShippingDetails {
    ShippingDetails {
        shipping_address1: "1 Main Street".to_string(),
        shipping_address2: String::new(),
        city: "Springfield".to_string(),
        zip: "12345".to_string(),
        country: "US".to_string(),
        phone: "555-0100".to_string(),
    }
}

pub(crate) async fn create_order(
    ctx: &TestContext,
    user: UserUuid,
    lines: &[(ProductUuid, u32)],
) -> Result<OrderRecord, OrdersServiceError> {
    ctx.orders
        .create_order(NewOrder {
            uuid: OrderUuid::new(),
            user_uuid: user,
            shipping: shipping(),
            items: lines
                .iter()
                .map(|&(product_uuid, quantity)| NewOrderLine {
                    product_uuid,
                    quantity,
                })
                .collect(),
        })
        .await
}
