//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use eshop_app::{
    auth::{Identity, MockAuthService, SessionUuid},
    context::AppContext,
    domain::{
        categories::{
            MockCategoriesService,
            records::{CategoryRecord, CategoryUuid},
        },
        orders::{
            MockOrdersService, OrderStatus,
            data::ShippingDetails,
            records::{OrderRecord, OrderUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        users::{
            MockUsersService,
            records::{UserRecord, UserUuid},
        },
    },
    health::MockHealthService,
    payments::MockPaymentsService,
};

use crate::{extensions::*, state::State, uploads::UploadStore};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));
pub(crate) const TEST_ADMIN_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(2));
pub(crate) const TEST_SESSION_UUID: SessionUuid = SessionUuid::from_uuid(Uuid::from_u128(3));

/// Who the request under test is made as.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Caller {
    Anonymous,
    Shopper,
    Admin,
}

impl Caller {
    fn identity(self) -> Option<Identity> {
        match self {
            Self::Anonymous => None,
            Self::Shopper => Some(Identity {
                session_uuid: TEST_SESSION_UUID,
                user_uuid: TEST_USER_UUID,
                is_admin: false,
            }),
            Self::Admin => Some(Identity {
                session_uuid: TEST_SESSION_UUID,
                user_uuid: TEST_ADMIN_UUID,
                is_admin: true,
            }),
        }
    }
}

struct InjectIdentity(Identity);

#[async_trait]
impl Handler for InjectIdentity {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_identity(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

/// Mocked services behind a test router.
///
/// Every mock starts strict; tests replace the one they exercise.
pub(crate) struct MockServices {
    pub(crate) products: MockProductsService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) users: MockUsersService,
    pub(crate) orders: MockOrdersService,
    pub(crate) auth: MockAuthService,
    pub(crate) payments: MockPaymentsService,
    pub(crate) health: MockHealthService,
    pub(crate) uploads: UploadStore,
}

impl MockServices {
    pub(crate) fn strict() -> Self {
        Self {
            products: strict_products_mock(),
            categories: strict_categories_mock(),
            users: strict_users_mock(),
            orders: strict_orders_mock(),
            auth: strict_auth_mock(),
            payments: strict_payments_mock(),
            health: strict_health_mock(),
            uploads: UploadStore::new(
                std::env::temp_dir().join("eshop-json-tests"),
                "http://example.com",
            ),
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            products: Arc::new(self.products),
            categories: Arc::new(self.categories),
            users: Arc::new(self.users),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
            payments: Arc::new(self.payments),
            health: Arc::new(self.health),
        };

        State::from_app_context(app, self.uploads)
    }

    /// Serve `route` with these services, as `caller`.
    pub(crate) fn into_service(self, caller: Caller, route: Router) -> Service {
        let mut router = Router::new().hoop(inject(self.into_state()));

        if let Some(identity) = caller.identity() {
            router = router.hoop(InjectIdentity(identity));
        }

        Service::new(router.push(route))
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    MockServices {
        auth,
        ..MockServices::strict()
    }
    .into_state()
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_login().never();
    auth.expect_authenticate_bearer().never();
    auth.expect_logout().never();

    auth
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_count_products().never();
    products.expect_featured_products().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_set_product_image().never();
    products.expect_set_product_images().never();
    products.expect_delete_product().never();

    products
}

fn strict_categories_mock() -> MockCategoriesService {
    let mut categories = MockCategoriesService::new();

    categories.expect_list_categories().never();
    categories.expect_get_category().never();
    categories.expect_create_category().never();
    categories.expect_update_category().never();
    categories.expect_delete_category().never();

    categories
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_list_users().never();
    users.expect_get_user().never();
    users.expect_find_user_by_email().never();
    users.expect_count_users().never();
    users.expect_create_user().never();
    users.expect_delete_user().never();

    users
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_list_orders().never();
    orders.expect_list_user_orders().never();
    orders.expect_get_order().never();
    orders.expect_get_active_order().never();
    orders.expect_create_order().never();
    orders.expect_update_order().never();
    orders.expect_add_item().never();
    orders.expect_update_item().never();
    orders.expect_remove_item().never();
    orders.expect_update_status().never();
    orders.expect_delete_order().never();
    orders.expect_total_sales().never();
    orders.expect_count_orders().never();

    orders
}

fn strict_payments_mock() -> MockPaymentsService {
    let mut payments = MockPaymentsService::new();

    payments.expect_create_stripe_intent().never();
    payments.expect_create_paypal_order().never();
    payments.expect_capture_paypal_order().never();
    payments.expect_verify_stripe_webhook().never();

    payments
}

fn strict_health_mock() -> MockHealthService {
    let mut health = MockHealthService::new();

    health.expect_check_database().never();

    health
}

pub(crate) fn make_category(uuid: CategoryUuid) -> CategoryRecord {
    CategoryRecord {
        uuid,
        name: "Phones".to_string(),
        icon: Some("phone".to_string()),
        color: Some("#112233".to_string()),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        category_uuid: CategoryUuid::from_uuid(Uuid::nil()),
        name: "Handset".to_string(),
        description: "A phone".to_string(),
        rich_description: String::new(),
        image: String::new(),
        images: Vec::new(),
        brand: "Acme".to_string(),
        price: 100,
        count_in_stock: 5,
        rating: 4.5,
        num_reviews: 2,
        is_featured: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_user(uuid: UserUuid) -> UserRecord {
    UserRecord {
        uuid,
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        phone: "555-0100".to_string(),
        is_admin: false,
        street: String::new(),
        apartment: String::new(),
        zip: String::new(),
        city: String::new(),
        country: String::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_shipping() -> ShippingDetails {
    ShippingDetails {
        shipping_address1: "1 Main St".to_string(),
        shipping_address2: String::new(),
        city: "Springfield".to_string(),
        zip: "12345".to_string(),
        country: "US".to_string(),
        phone: "555-0100".to_string(),
    }
}

pub(crate) fn make_order(uuid: OrderUuid, user_uuid: UserUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        user_uuid,
        status: OrderStatus::Placed,
        shipping: make_shipping(),
        total_price: 0,
        items: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
