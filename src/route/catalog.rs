//! The point-of-sale administration screens and their access rules.
//!
//! Declaration order follows the original router. Several paths are
//! declared twice (`/inventory`, `/expenses`, `/inventory/shop-stock`);
//! under [`FirstMatch`](crate::ResolutionPolicy::FirstMatch) the later
//! declarations are dead, which is why a supervisor opening `/inventory`
//! is refused. Building with [`Merge`](crate::ResolutionPolicy::Merge)
//! folds them together instead.

use std::fmt;

use crate::config::GuardConfig;
use crate::error::{ConfigError, Error};
use crate::policy::Access;
use crate::role::Role::{self, Admin, Cashier, SuperAdmin, Supervisor};
use crate::router::Router;

use super::{Chrome, RouteTable};

/// The screens of the administration client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Login form
    Login,
    /// Picks a landing screen from the session's roles
    RoleRedirect,
    /// Static "access denied" notice
    Unauthorized,
    /// Admin dashboard
    Dashboard,
    /// Shop management
    Shops,
    /// Inventory overview
    Inventory,
    /// New product form
    AddProduct,
    /// Price adjustment
    AdjustPrice,
    /// Stock level adjustment
    StockAdjustment,
    /// Stock transfer between shops
    StockTransfer,
    /// Stock movement log
    StockLog,
    /// Per-shop stock view
    ShopStock,
    /// Expense list
    Expenses,
    /// New expense category form
    CreateExpenseCategory,
    /// Expense entry form
    RecordExpense,
    /// Reports
    Reports,
    /// Settings
    Settings,
    /// User management
    UserManagement,
    /// Purchases
    Purchases,
    /// Purchase order dashboard
    PurchaseOrdersDashboard,
    /// New purchase order form
    CreatePurchaseOrder,
    /// Add items to a purchase order
    AddPurchaseOrderItem,
    /// Add expenses to a purchase order
    AddPurchaseOrderExpense,
    /// Till screen
    Cashier,
    /// Sales history
    SalesHistory,
    /// A single sale, identified by the `saleId` parameter
    SaleDetail,
}

impl Page {
    /// The name of the page component.
    pub fn component(&self) -> &'static str {
        match self {
            Page::Login => "LoginPage",
            Page::RoleRedirect => "RoleRedirect",
            Page::Unauthorized => "UnauthorizedNotice",
            Page::Dashboard => "DashboardPage",
            Page::Shops => "ShopsPage",
            Page::Inventory => "InventoryPage",
            Page::AddProduct => "AddProductPage",
            Page::AdjustPrice => "AdjustPricePage",
            Page::StockAdjustment => "StockAdjustmentPage",
            Page::StockTransfer => "StockTransferPage",
            Page::StockLog => "StockLogPage",
            Page::ShopStock => "ShopStockPage",
            Page::Expenses => "ExpensesPage",
            Page::CreateExpenseCategory => "CreateExpenseCategoryPage",
            Page::RecordExpense => "RecordExpensePage",
            Page::Reports => "ReportsPage",
            Page::Settings => "SettingsPage",
            Page::UserManagement => "UserManagementPage",
            Page::Purchases => "PurchasesPage",
            Page::PurchaseOrdersDashboard => "PurchaseOrdersDashboardPage",
            Page::CreatePurchaseOrder => "CreatePurchaseOrderPage",
            Page::AddPurchaseOrderItem => "AddPurchaseOrderItemPage",
            Page::AddPurchaseOrderExpense => "AddOrderExpensePage",
            Page::Cashier => "CashierPage",
            Page::SalesHistory => "SalesHistoryPage",
            Page::SaleDetail => "SaleDetailPage",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component())
    }
}

const ADMINS: &[Role] = &[Admin, SuperAdmin];
const STOCK_TEAM: &[Role] = &[Supervisor, Admin, SuperAdmin];
const FLOOR: &[Role] = &[Supervisor, Cashier];

/// Builds the route table of the administration client.
///
/// Uses `config.resolution` for duplicate paths and
/// `config.case_sensitive` for literal matching.
///
/// # Errors
///
/// Only fails under [`ResolutionPolicy::Merge`](crate::ResolutionPolicy::Merge)
/// if duplicate declarations disagree, which the shipped catalog does not do.
///
/// # Examples
///
/// ```
/// use route_guard::{GuardConfig, Page};
/// use route_guard::route::catalog::pos_routes;
///
/// let table = pos_routes(&GuardConfig::default()).unwrap();
/// let resolved = table.resolve("/sales/42").unwrap();
///
/// assert_eq!(resolved.entry.page, Page::SaleDetail);
/// assert_eq!(resolved.params.get("saleId"), Some("42"));
/// ```
pub fn pos_routes(config: &GuardConfig) -> Result<RouteTable<Page>, ConfigError> {
    use Chrome::{Bare, Layout};

    RouteTable::builder()
        .policy(config.resolution)
        .case_sensitive(config.case_sensitive)
        // Open screens
        .route("/login", Access::Public, Page::Login, Bare)
        .route("/redirect", Access::Public, Page::RoleRedirect, Bare)
        .route("/unauthorized", Access::Public, Page::Unauthorized, Bare)
        // Admin and super-admin
        .route("/", Access::any_of(ADMINS), Page::Dashboard, Layout)
        .route("/shops", Access::any_of(ADMINS), Page::Shops, Layout)
        .route(
            "/inventory",
            Access::any_of(ADMINS),
            Page::Inventory,
            Layout,
        )
        .route("/expenses", Access::any_of(ADMINS), Page::Expenses, Layout)
        .route(
            "/inventory/add",
            Access::any_of(ADMINS),
            Page::AddProduct,
            Layout,
        )
        .route(
            "/inventory/adjust-price",
            Access::any_of(STOCK_TEAM),
            Page::AdjustPrice,
            Layout,
        )
        .route(
            "/inventory/adjust-stock",
            Access::any_of(ADMINS),
            Page::StockAdjustment,
            Layout,
        )
        .route(
            "/inventory/transfer",
            Access::any_of(&[Supervisor, Admin]),
            Page::StockTransfer,
            Layout,
        )
        .route(
            "/inventory/logs",
            Access::any_of(STOCK_TEAM),
            Page::StockLog,
            Layout,
        )
        .route(
            "/expenses/create",
            Access::any_of(ADMINS),
            Page::CreateExpenseCategory,
            Layout,
        )
        .route("/reports", Access::any_of(ADMINS), Page::Reports, Layout)
        .route("/settings", Access::any_of(ADMINS), Page::Settings, Layout)
        .route(
            "/settings/users",
            Access::any_of(ADMINS),
            Page::UserManagement,
            Layout,
        )
        .route(
            "/purchases/dashboard",
            Access::any_of(ADMINS),
            Page::PurchaseOrdersDashboard,
            Layout,
        )
        .route(
            "/inventory/shop-stock",
            Access::any_of(STOCK_TEAM),
            Page::ShopStock,
            Layout,
        )
        // Supervisor
        .route(
            "/purchases",
            Access::any_of(&[Supervisor]),
            Page::Purchases,
            Layout,
        )
        .route(
            "/purchase-orders/dashboard",
            Access::any_of(&[Supervisor]),
            Page::PurchaseOrdersDashboard,
            Layout,
        )
        .route(
            "/purchase-orders/create",
            Access::any_of(&[Supervisor]),
            Page::CreatePurchaseOrder,
            Layout,
        )
        .route(
            "/purchase-orders/items/add",
            Access::any_of(&[Supervisor]),
            Page::AddPurchaseOrderItem,
            Layout,
        )
        .route(
            "/purchase-orders/expenses/add",
            Access::any_of(&[Supervisor]),
            Page::AddPurchaseOrderExpense,
            Layout,
        )
        .route("/expenses", Access::any_of(FLOOR), Page::Expenses, Layout)
        .route(
            "/expenses/record",
            Access::any_of(FLOOR),
            Page::RecordExpense,
            Layout,
        )
        .route(
            "/inventory",
            Access::any_of(&[Supervisor]),
            Page::Inventory,
            Layout,
        )
        .route(
            "/inventory/shop-stock",
            Access::any_of(STOCK_TEAM),
            Page::ShopStock,
            Layout,
        )
        // Cashier
        .route("/cashier", Access::any_of(&[Cashier]), Page::Cashier, Bare)
        .route(
            "/sales/history",
            Access::any_of(&[Cashier, Admin, SuperAdmin]),
            Page::SalesHistory,
            Layout,
        )
        .route(
            "/sales/:saleId",
            Access::any_of(&[Cashier]),
            Page::SaleDetail,
            Bare,
        )
        .build()
}

/// Builds a router over [`pos_routes`] after validating `config`.
///
/// # Errors
///
/// Returns `Error::Config` if the configuration or the table is invalid.
pub fn pos_router(config: GuardConfig) -> Result<Router<Page>, Error> {
    config.validate()?;
    let table = pos_routes(&config)?;
    Ok(Router::with_config(table, config))
}
