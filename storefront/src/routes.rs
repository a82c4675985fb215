//! The website's route table.

use crate::{RouteTable, RouteTableError, View};

/// Build the route table of the website.
///
/// `/affiliate` renders the legacy affiliate page; the affiliate program itself lives under
/// `/affiliate/...`.
pub fn storefront_routes() -> Result<RouteTable, RouteTableError> {
    Ok(RouteTable::builder()
        .route("/", View::Home)?
        // PROFITFLUENCE: public pages.
        .route("/pf", View::PfHome)?
        .route("/pf/work/{work_id}", View::PfWorkDetails)?
        .route("/pf/influencer/{user_id}", View::PfInfluencerProfile)?
        // PROFITFLUENCE: users and brands.
        .route("/pf/dashboard", View::PfUserDashboard)?
        .route("/pf/dashboard/ad", View::PfPostAd)?
        .route("/pf/apply-influencer", View::PfApplyInfluencer)?
        // PROFITFLUENCE: influencers.
        .route("/pf/dashboard/i", View::PfInfluencerDashboard)?
        .route("/pf/dashboard/withdraw", View::PfInfluencerWithdraw)?
        .route("/pf/dashboard/i/ad", View::PfInfluencerPostAd)?
        .route("/pf/dashboard/inbox", View::PfInfluencerInbox)?
        .route("/pf/dashboard/settings", View::PfInfluencerSettings)?
        // Affiliates.
        .route("/affiliate", View::LegacyAffiliateStub)?
        .route("/affiliate/dashboard", View::AffiliateDashboard)?
        .route("/affiliate/withdraw", View::AffiliateWithdraw)?
        .route("/affiliate/orders", View::AffiliateOrders)?
        // Storefront.
        .route("/products", View::ProductsList)?
        .route("/product/{product_id}", View::ProductDetail)?
        .route("/login", View::Login)?
        .route("/wp", View::LegacyLoginStub)?
        .route("/account", View::Account)?
        .route("/checkout", View::Checkout)?
        .route("/menu", View::Menu)?
        // Administration.
        .route("/admin", View::AdminPanel)?
        .route("/admin/affiliates", View::AdminAffiliates)?
        .route("/admin/withdrawals", View::AdminWithdrawals)?
        .route("/admin/orders", View::AdminOrders)?
        .route("/admin/users", View::AdminUsers)?
        .build())
}
