//! Application state for the seller dashboard.
//!
//! [`AdminApp`] is the single owner of everything the dashboard holds: the
//! auth service, the insight client and, while someone is signed in, an
//! [`AdminSession`] with the three record collections. Pages call methods on
//! the session; nothing is global.

use std::collections::HashSet;

use chrono::NaiveDate;
use rand::Rng;
use tracing::instrument;

use bharatcart_core::{
    CustomerId, Email, Handle, OrderStatus, Price, ProductId, ProductStatus,
};

use crate::config::AdminConfig;
use crate::db::{CredentialRepository, JsonFileRegistry};
use crate::error::AppError;
use crate::insights::{InsightClient, InsightReport};
use crate::models::{
    AccountProfile, Customer, NewCustomer, NewProduct, Order, Product, ProductPatch, SessionKind,
};
use crate::models::customer::NEW_CUSTOMER_LABEL;
use crate::seed::SeedData;
use crate::services::export::{self, ExportError};
use crate::services::metrics;
use crate::services::{
    AnalyticsReport, AuthService, ChannelShare, DashboardStats, NotificationSettings,
    OrderPipeline, Profile, RevenuePoint,
};
use crate::store::{Collection, CustomerQuery, OrderQuery, ProductQuery, filter_by};

const PRODUCT_ID_PREFIX: &str = "BC-SKU-";
const PRODUCT_ID_SPACE: u32 = 10_000;
const CUSTOMER_ID_PREFIX: &str = "CUS-IND-";
const CUSTOMER_ID_SPACE: u32 = 1_000;
/// Random draws before falling back to a scan for a free id.
const ID_DRAW_ATTEMPTS: usize = 32;
const IMAGE_PHOTO_BASE: u64 = 1_600_000_000_000;
const IMAGE_PHOTO_SPREAD: u64 = 1_000_000;

/// Number of orders in the dashboard's "recent orders" table.
pub const RECENT_ORDER_COUNT: usize = 5;

// =============================================================================
// AdminApp
// =============================================================================

/// Top-level controller: owns auth, insights and the current session.
#[derive(Debug)]
pub struct AdminApp<R> {
    auth: AuthService<R>,
    insights: InsightClient,
    session: Option<AdminSession>,
}

impl AdminApp<JsonFileRegistry> {
    /// Build the app from configuration, with a file-backed registry.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Insight` if the insight client cannot be built.
    pub fn from_config(config: &AdminConfig) -> Result<Self, AppError> {
        let registry = JsonFileRegistry::new(&config.registry_path);
        let auth = AuthService::new(registry).with_latency(config.auth_latency);
        let insights = InsightClient::new(config.insights())?;
        Ok(Self::new(auth, insights))
    }
}

impl<R: CredentialRepository> AdminApp<R> {
    #[must_use]
    pub const fn new(auth: AuthService<R>, insights: InsightClient) -> Self {
        Self {
            auth,
            insights,
            session: None,
        }
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthService<R> {
        &self.auth
    }

    /// Register a seller. Does not sign them in.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` for a blank field, a taken handle, or a
    /// registry failure.
    pub async fn register(
        &self,
        owner_name: &str,
        business_name: &str,
        secret: &str,
    ) -> Result<Handle, AppError> {
        Ok(self.auth.register(owner_name, business_name, secret).await?)
    }

    /// Sign in and open a session, replacing any current one.
    ///
    /// The demo account starts with the sample collections; registered
    /// accounts start empty. Both see the sample analytics series.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` on bad credentials or registry failure, and
    /// `AppError::Seed` if the sample data cannot be parsed.
    pub async fn login(&mut self, handle: &str, secret: &str) -> Result<&mut AdminSession, AppError> {
        let outcome = self.auth.authenticate(handle, secret).await?;
        let seed = SeedData::demo()?;
        let session = AdminSession::open(outcome.profile, outcome.kind, seed);

        tracing::info!(
            handle = %session.account.handle,
            kind = ?session.kind,
            products = session.products.len(),
            "Session opened"
        );
        Ok(self.session.insert(session))
    }

    /// Close the session and drop all held records. Returns whether a
    /// session was open.
    pub fn logout(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                tracing::info!(handle = %session.account.handle, "Session closed");
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub const fn session(&self) -> Option<&AdminSession> {
        self.session.as_ref()
    }

    pub const fn session_mut(&mut self) -> Option<&mut AdminSession> {
        self.session.as_mut()
    }

    /// The open session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotAuthenticated` if nobody is signed in.
    pub fn require_session(&mut self) -> Result<&mut AdminSession, AppError> {
        self.session.as_mut().ok_or(AppError::NotAuthenticated)
    }

    /// Insight report for the current dashboard stats.
    ///
    /// Returns the fallback report when the insight service is unavailable.
    /// The AI insight notification toggle is not consulted.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotAuthenticated` if nobody is signed in.
    pub async fn insights(&self) -> Result<InsightReport, AppError> {
        let session = self.session.as_ref().ok_or(AppError::NotAuthenticated)?;
        Ok(self.insights.get_insights(&session.dashboard_stats()).await)
    }

    #[must_use]
    pub const fn insight_client(&self) -> &InsightClient {
        &self.insights
    }
}

// =============================================================================
// AdminSession
// =============================================================================

/// Everything held for one signed-in seller.
#[derive(Debug, Clone)]
pub struct AdminSession {
    account: AccountProfile,
    kind: SessionKind,
    products: Collection<Product>,
    orders: Collection<Order>,
    customers: Collection<Customer>,
    revenue: Vec<RevenuePoint>,
    channels: Vec<ChannelShare>,
    settings: NotificationSettings,
    profile: Profile,
}

impl AdminSession {
    /// Open a session for `account`.
    #[must_use]
    pub fn open(account: AccountProfile, kind: SessionKind, seed: SeedData) -> Self {
        let (products, orders, customers) = match kind {
            SessionKind::Demo => (seed.products, seed.orders, seed.customers),
            SessionKind::Registered => (Vec::new(), Vec::new(), Vec::new()),
        };
        let profile = Profile::from_account(&account);

        Self {
            account,
            kind,
            products: Collection::new(products),
            orders: Collection::new(orders),
            customers: Collection::new(customers),
            revenue: seed.revenue,
            channels: seed.channels,
            settings: NotificationSettings::default(),
            profile,
        }
    }

    #[must_use]
    pub const fn account(&self) -> &AccountProfile {
        &self.account
    }

    #[must_use]
    pub const fn kind(&self) -> SessionKind {
        self.kind
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        self.products.as_slice()
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        self.orders.as_slice()
    }

    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        self.customers.as_slice()
    }

    #[must_use]
    pub fn revenue_series(&self) -> &[RevenuePoint] {
        &self.revenue
    }

    #[must_use]
    pub fn channels(&self) -> &[ChannelShare] {
        &self.channels
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Add a product from the form and return its new id.
    ///
    /// The product is listed first, `Active`, with a generated image URL.
    /// A blank category falls back to the form default.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a blank name, a negative price, or
    /// when every product id is taken.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub fn add_product(&mut self, input: NewProduct) -> Result<ProductId, AppError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Product name is required.".to_string()));
        }
        let price = Price::inr(input.price);
        if price.is_negative() {
            return Err(AppError::Validation("Price cannot be negative.".to_string()));
        }
        let category = match input.category.trim() {
            "" => NewProduct::DEFAULT_CATEGORY.to_string(),
            category => category.to_string(),
        };

        let id = self.free_product_id()?;
        let mut rng = rand::rng();
        let image = format!(
            "https://images.unsplash.com/photo-{}?auto=format&fit=crop&w=400&q=80",
            IMAGE_PHOTO_BASE + rng.random_range(0..IMAGE_PHOTO_SPREAD)
        );

        self.products.insert(Product {
            id: id.clone(),
            name: name.to_string(),
            category,
            price,
            stock: input.stock,
            status: ProductStatus::Active,
            image,
        });

        tracing::info!(%id, "Product added");
        Ok(id)
    }

    /// Set `status` on every selected product. Returns how many matched.
    pub fn set_product_status(&mut self, ids: &HashSet<ProductId>, status: ProductStatus) -> usize {
        let updated = self.products.bulk_update(ids, &ProductPatch::status(status));
        tracing::info!(selected = ids.len(), updated, %status, "Bulk status update");
        updated
    }

    /// Delete every selected product. Returns how many were removed.
    pub fn delete_products(&mut self, ids: &HashSet<ProductId>) -> usize {
        let removed = self.products.bulk_delete(ids);
        tracing::info!(selected = ids.len(), removed, "Bulk delete");
        removed
    }

    /// Delete one product. Returns whether it existed.
    pub fn delete_product(&mut self, id: &ProductId) -> bool {
        self.delete_products(&HashSet::from([id.clone()])) == 1
    }

    /// Products matching the Products page filters.
    pub fn search_products<'a>(&'a self, query: &'a ProductQuery) -> impl Iterator<Item = &'a Product> + 'a {
        filter_by(self.products.as_slice(), move |product| query.matches(product))
    }

    fn free_product_id(&self) -> Result<ProductId, AppError> {
        free_id(PRODUCT_ID_PREFIX, PRODUCT_ID_SPACE, |id| {
            self.products.contains(&ProductId::new(id))
        })
        .map(ProductId::new)
        .ok_or_else(|| AppError::Validation("No product ids are left.".to_string()))
    }

    // -------------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------------

    /// Add a customer from the form and return the new id.
    ///
    /// New customers have no orders, zero spend, and the "New Customer" label.
    /// The form's city is not stored.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a blank name, an invalid email, or
    /// when every customer id is taken.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub fn add_customer(&mut self, input: NewCustomer) -> Result<CustomerId, AppError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Customer name is required.".to_string()));
        }
        let email =
            Email::parse(&input.email).map_err(|e| AppError::Validation(e.to_string()))?;

        let id = free_id(CUSTOMER_ID_PREFIX, CUSTOMER_ID_SPACE, |id| {
            self.customers.contains(&CustomerId::new(id))
        })
        .map(CustomerId::new)
        .ok_or_else(|| AppError::Validation("No customer ids are left.".to_string()))?;

        self.customers.insert(Customer {
            id: id.clone(),
            name: name.to_string(),
            email,
            orders: 0,
            total_spent: Price::zero(),
            last_order: NEW_CUSTOMER_LABEL.to_string(),
            avatar: String::new(),
        });

        tracing::info!(%id, "Customer added");
        Ok(id)
    }

    /// Customers matching the Customers page search box.
    pub fn search_customers<'a>(&'a self, query: &'a CustomerQuery) -> impl Iterator<Item = &'a Customer> + 'a {
        filter_by(self.customers.as_slice(), move |customer| query.matches(customer))
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    /// Orders matching the Orders page filters.
    pub fn search_orders<'a>(&'a self, query: &'a OrderQuery) -> impl Iterator<Item = &'a Order> + 'a {
        filter_by(self.orders.as_slice(), move |order| query.matches(order))
    }

    #[must_use]
    pub fn order_count(&self, status: OrderStatus) -> usize {
        metrics::order_count_by_status(self.orders.as_slice(), status)
    }

    #[must_use]
    pub fn order_pipeline(&self) -> OrderPipeline {
        OrderPipeline::from_orders(self.orders.as_slice())
    }

    #[must_use]
    pub fn recent_orders(&self) -> &[Order] {
        metrics::recent_orders(self.orders.as_slice(), RECENT_ORDER_COUNT)
    }

    // -------------------------------------------------------------------------
    // Dashboard, analytics, settings
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats::from_snapshot(
            self.products.as_slice(),
            self.orders.as_slice(),
            self.customers.as_slice(),
        )
    }

    /// The Analytics page CSV download.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the CSV cannot be rendered.
    pub fn revenue_csv(&self) -> Result<String, ExportError> {
        export::revenue_csv(&self.revenue)
    }

    /// The Analytics page JSON download, stamped now.
    #[must_use]
    pub fn analytics_report(&self) -> AnalyticsReport {
        AnalyticsReport::new(chrono::Utc::now(), self.revenue.clone(), self.channels.clone())
    }

    /// Suggested CSV file name for `date`.
    #[must_use]
    pub fn csv_file_name(date: NaiveDate) -> String {
        export::csv_file_name(date)
    }

    #[must_use]
    pub const fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    pub const fn settings_mut(&mut self) -> &mut NotificationSettings {
        &mut self.settings
    }

    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    pub const fn profile_mut(&mut self) -> &mut Profile {
        &mut self.profile
    }
}

/// A `<prefix><n>` id with `n` in `0..space` for which `taken` is false.
///
/// Draws at random first, then scans, so a nearly full space still succeeds.
fn free_id(prefix: &str, space: u32, taken: impl Fn(&str) -> bool) -> Option<String> {
    let mut rng = rand::rng();
    (0..ID_DRAW_ATTEMPTS)
        .map(|_| rng.random_range(0..space))
        .chain(0..space)
        .map(|n| format!("{prefix}{n}"))
        .find(|id| !taken(id))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    use rust_decimal::Decimal;

    use crate::db::MemoryRegistry;
    use crate::services::auth::{DEMO_HANDLE, DEMO_SECRET};

    fn app() -> AdminApp<MemoryRegistry> {
        AdminApp::new(
            AuthService::new(MemoryRegistry::new()),
            InsightClient::disabled(),
        )
    }

    async fn demo_session(app: &mut AdminApp<MemoryRegistry>) -> &mut AdminSession {
        app.login(DEMO_HANDLE, DEMO_SECRET).await.unwrap()
    }

    fn new_product(name: &str, price: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: String::new(),
            price: Decimal::new(price, 0),
            stock: 12,
        }
    }

    #[tokio::test]
    async fn test_demo_login_loads_seed() {
        let mut app = app();
        let session = demo_session(&mut app).await;
        assert_eq!(session.kind(), SessionKind::Demo);
        assert_eq!(session.products().len(), 8);
        assert_eq!(session.orders().len(), 5);
        assert_eq!(session.customers().len(), 4);
        assert_eq!(session.profile().email, "demo@gmail.com");
    }

    #[tokio::test]
    async fn test_registered_login_starts_empty() {
        let mut app = app();
        app.register("Arjun", "Sharma Co", "pw1").await.unwrap();
        let session = app.login("sharmaco", "pw1").await.unwrap();
        assert_eq!(session.kind(), SessionKind::Registered);
        assert!(session.products().is_empty());
        assert!(session.orders().is_empty());
        assert_eq!(session.revenue_series().len(), 7);

        let stats = session.dashboard_stats();
        assert_eq!(stats.total_revenue, Decimal::ZERO);
        assert_eq!(stats.revenue_growth, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let mut app = app();
        demo_session(&mut app).await;
        assert!(app.logout());
        assert!(app.session().is_none());
        assert!(!app.logout());
        assert!(matches!(app.insights().await, Err(AppError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_no_session() {
        let mut app = app();
        let err = app.login("nobody", "pw").await.unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
        assert!(app.session().is_none());
    }

    #[tokio::test]
    async fn test_add_product_prepends_active() {
        let mut app = app();
        let session = demo_session(&mut app).await;

        let id = session.add_product(new_product("Pashmina Wool Shawl", 7999)).unwrap();
        assert!(id.as_str().starts_with("BC-SKU-"));

        let first = &session.products()[0];
        assert_eq!(first.id, id);
        assert_eq!(first.status, ProductStatus::Active);
        assert_eq!(first.category, "Ethnic Wear");
        assert!(first.image.starts_with("https://images.unsplash.com/photo-16"));
        assert_eq!(session.products().len(), 9);
    }

    #[tokio::test]
    async fn test_add_product_validation() {
        let mut app = app();
        let session = demo_session(&mut app).await;
        assert!(matches!(
            session.add_product(new_product("  ", 10)),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            session.add_product(new_product("Shawl", -1)),
            Err(AppError::Validation(_))
        ));
        assert_eq!(session.products().len(), 8);
    }

    #[tokio::test]
    async fn test_bulk_status_and_delete() {
        let mut app = app();
        let session = demo_session(&mut app).await;

        let ids: HashSet<ProductId> = ["1", "2", "missing"].into_iter().map(ProductId::from).collect();
        assert_eq!(session.set_product_status(&ids, ProductStatus::Draft), 2);
        assert_eq!(session.dashboard_stats().active_products, 4);

        assert_eq!(session.delete_products(&ids), 2);
        assert_eq!(session.products().len(), 6);
        assert!(session.delete_product(&ProductId::from("3")));
        assert!(!session.delete_product(&ProductId::from("3")));
    }

    #[tokio::test]
    async fn test_add_customer() {
        let mut app = app();
        let session = demo_session(&mut app).await;

        let id = session
            .add_customer(NewCustomer {
                name: "Meera Nair".to_string(),
                email: "meera.nair@infosys.com".to_string(),
                city: "Kochi".to_string(),
            })
            .unwrap();
        assert!(id.as_str().starts_with("CUS-IND-"));

        let first = &session.customers()[0];
        assert_eq!(first.orders, 0);
        assert_eq!(first.total_spent, Price::zero());
        assert_eq!(first.last_order, "New Customer");

        let err = session
            .add_customer(NewCustomer {
                name: "X".to_string(),
                email: "nope".to_string(),
                city: String::new(),
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_searches() {
        let mut app = app();
        let session = demo_session(&mut app).await;

        let query = ProductQuery::new("SAREE", None);
        assert_eq!(session.search_products(&query).count(), 1);

        let query = ProductQuery::new("", Some("Home Decor"));
        assert_eq!(session.search_products(&query).count(), 2);

        let query = CustomerQuery::new("tcs.com");
        assert_eq!(session.search_customers(&query).count(), 1);

        let query = OrderQuery::new(Some(OrderStatus::Completed), "");
        assert_eq!(session.search_orders(&query).count(), 2);
    }

    #[tokio::test]
    async fn test_pipeline_and_recent_orders() {
        let mut app = app();
        let session = demo_session(&mut app).await;

        let pipeline = session.order_pipeline();
        assert_eq!(pipeline.awaiting_pickup, 1);
        assert_eq!(pipeline.in_transit, 1);
        assert_eq!(pipeline.delivered, 2);
        assert_eq!(session.order_count(OrderStatus::Cancelled), 1);
        assert_eq!(session.recent_orders().len(), 5);
    }

    #[tokio::test]
    async fn test_insights_fall_back_when_disabled() {
        let mut app = app();
        demo_session(&mut app).await;
        assert_eq!(app.insights().await.unwrap(), InsightReport::fallback());
    }

    #[test]
    fn test_free_id_scans_when_space_is_nearly_full() {
        let id = free_id("X-", 3, |id| id != "X-2").unwrap();
        assert_eq!(id, "X-2");
        assert!(free_id("X-", 3, |_| true).is_none());
    }
}
