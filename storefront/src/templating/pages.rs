//! Askama pages.

use askama::Template;

use crate::{Context, View};

/// An error that occurred while rendering an askama template.
#[derive(Debug, thiserror::Error)]
#[error("failed to render template `{template}`: {err}")]
pub struct RenderError {
    /// The template that failed.
    pub template: &'static str,

    /// The underlying error.
    #[source]
    pub err: askama::Error,
}

/// Declares one askama template per view.
///
/// Template paths must match `View::template_name`.
macro_rules! pages {
    ($($view:ident => $path:tt,)+) => {
        $(
            #[derive(Template)]
            #[template(path = $path)]
            struct $view<'a> {
                ctx: &'a Context,
            }
        )+

        fn render_page(view: View, ctx: &Context) -> askama::Result<String> {
            match view {
                $(View::$view => $view { ctx }.render(),)+
            }
        }
    };
}

pages! {
    Home => "index.html",
    PfHome => "pf_home.html",
    PfWorkDetails => "pf_work_details.html",
    PfInfluencerProfile => "pf_influencer_profile.html",
    PfUserDashboard => "pf_user_dashboard.html",
    PfPostAd => "pf_post_ad.html",
    PfApplyInfluencer => "pf_apply_influencer.html",
    PfInfluencerDashboard => "pf_influencer_dashboard.html",
    PfInfluencerWithdraw => "pf_influencer_withdraw.html",
    PfInfluencerPostAd => "pf_influencer_post_ad.html",
    PfInfluencerInbox => "pf_influencer_inbox.html",
    PfInfluencerSettings => "pf_influencer_settings.html",
    LegacyAffiliateStub => "t.html",
    AffiliateDashboard => "affiliate-dashboard.html",
    AffiliateWithdraw => "affiliate-withdraw.html",
    AffiliateOrders => "affiliate-orders.html",
    ProductsList => "products.html",
    ProductDetail => "product.html",
    Login => "login.html",
    LegacyLoginStub => "z.html",
    Account => "account.html",
    Checkout => "checkout.html",
    Menu => "menu.html",
    AdminPanel => "admin.html",
    AdminAffiliates => "admin-affiliates.html",
    AdminWithdrawals => "admin-withdrawals.html",
    AdminOrders => "admin-orders.html",
    AdminUsers => "admin-users.html",
    NotFound => "404.html",
    InternalError => "500.html",
}

/// A renderer backed by the askama templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct AskamaRenderer;

impl super::Renderer for AskamaRenderer {
    type Error = RenderError;

    fn render(&self, view: View, context: &Context) -> Result<String, Self::Error> {
        render_page(view, context).map_err(|err| RenderError {
            template: view.template_name(),
            err,
        })
    }
}
