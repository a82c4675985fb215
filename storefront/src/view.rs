//! The view registry.
//!
//! Every page the website can render is a [`View`]. Views are fixed at compile time: each one is
//! bound to a template resource and a human-readable title.

use std::{fmt::Display, str::FromStr};

/// Declares the `View` enum along with its identifier, template and title tables.
macro_rules! views {
    ($($(#[$meta:meta])* $variant:ident => ($id:literal, $template:literal, $title:literal),)+) => {
        /// A view that can be rendered.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum View {
            $($(#[$meta])* $variant,)+
        }

        impl View {
            /// All the views, in declaration order.
            pub const ALL: &'static [View] = &[$(View::$variant,)+];

            /// The identifier of the view.
            pub fn id(self) -> &'static str {
                match self {
                    $(View::$variant => $id,)+
                }
            }

            /// The name of the template resource that renders the view.
            pub fn template_name(self) -> &'static str {
                match self {
                    $(View::$variant => $template,)+
                }
            }

            /// The human-readable title of the view.
            pub fn title(self) -> &'static str {
                match self {
                    $(View::$variant => $title,)+
                }
            }
        }
    };
}

views! {
    /// The storefront landing page.
    Home => ("home", "index.html", "Home"),

    // PROFITFLUENCE marketplace.
    PfHome => ("pf-home", "pf_home.html", "PROFITFLUENCE - Home"),
    PfWorkDetails => ("pf-work-details", "pf_work_details.html", "Work Details"),
    PfInfluencerProfile => ("pf-influencer-profile", "pf_influencer_profile.html", "Influencer Profile"),
    PfUserDashboard => ("pf-user-dashboard", "pf_user_dashboard.html", "My Dashboard"),
    PfPostAd => ("pf-post-ad", "pf_post_ad.html", "Post a New Job"),
    PfApplyInfluencer => ("pf-apply-influencer", "pf_apply_influencer.html", "Apply for Influencer Program"),
    PfInfluencerDashboard => ("pf-influencer-dashboard", "pf_influencer_dashboard.html", "Influencer Dashboard"),
    PfInfluencerWithdraw => ("pf-influencer-withdraw", "pf_influencer_withdraw.html", "Withdraw Funds"),
    PfInfluencerPostAd => ("pf-influencer-post-ad", "pf_influencer_post_ad.html", "Post Your Service"),
    PfInfluencerInbox => ("pf-influencer-inbox", "pf_influencer_inbox.html", "Inbox"),
    PfInfluencerSettings => ("pf-influencer-settings", "pf_influencer_settings.html", "Settings"),

    // Affiliate program.
    /// The page served at `/affiliate` before the affiliate dashboard existed.
    LegacyAffiliateStub => ("legacy-affiliate-stub", "t.html", "Affiliate Program"),
    AffiliateDashboard => ("affiliate-dashboard", "affiliate-dashboard.html", "Affiliate Dashboard"),
    AffiliateWithdraw => ("affiliate-withdraw", "affiliate-withdraw.html", "Withdraw Funds"),
    AffiliateOrders => ("affiliate-orders", "affiliate-orders.html", "My Affiliate Orders"),

    // Storefront.
    ProductsList => ("products-list", "products.html", "Products"),
    ProductDetail => ("product-detail", "product.html", "Product Details"),
    Login => ("login", "login.html", "Login or Signup"),
    /// An older login page, still reachable at `/wp`.
    LegacyLoginStub => ("legacy-login-stub", "z.html", "Login or Signup"),
    Account => ("account", "account.html", "My Account"),
    Checkout => ("checkout", "checkout.html", "Checkout"),
    Menu => ("menu", "menu.html", "Menu"),

    // Administration.
    AdminPanel => ("admin-panel", "admin.html", "Admin Panel"),
    AdminAffiliates => ("admin-affiliates", "admin-affiliates.html", "Affiliate Management"),
    AdminWithdrawals => ("admin-withdrawals", "admin-withdrawals.html", "Withdrawal Requests"),
    AdminOrders => ("admin-orders", "admin-orders.html", "Order Management"),
    AdminUsers => ("admin-users", "admin-users.html", "User Management"),

    // Errors.
    /// Rendered when no route matches the request path.
    NotFound => ("404", "404.html", "Page Not Found"),
    /// Rendered when rendering the matched view failed.
    InternalError => ("500", "500.html", "Internal Server Error"),
}

impl Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// An unknown view identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view `{0}`")]
pub struct UnknownViewError(pub String);

impl FromStr for View {
    type Err = UnknownViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|view| view.id() == s)
            .ok_or_else(|| UnknownViewError(s.to_string()))
    }
}
