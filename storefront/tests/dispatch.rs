//! Dispatch properties of the website's route table.

use std::sync::{
    Arc,
    atomic::{AtomicI32, Ordering},
};

use chrono::{DateTime, TimeZone, Utc};
use http::StatusCode;
use storefront::{
    Clock, Context, DispatchError, Dispatcher, Renderer, RoutePattern, View, route::Segment,
    routes::storefront_routes,
};

/// Renders the view and its context as JSON.
struct EchoRenderer;

impl Renderer for EchoRenderer {
    type Error = serde_json::Error;

    fn render(&self, view: View, context: &Context) -> Result<String, Self::Error> {
        serde_json::to_string(&serde_json::json!({
            "view": view.id(),
            "context": context,
        }))
    }
}

/// A clock whose year can be changed between requests.
#[derive(Clone)]
struct YearClock(Arc<AtomicI32>);

impl YearClock {
    fn new(year: i32) -> Self {
        Self(Arc::new(AtomicI32::new(year)))
    }

    fn set(&self, year: i32) {
        self.0.store(year, Ordering::SeqCst);
    }
}

impl Clock for YearClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(self.0.load(Ordering::SeqCst), 6, 15, 12, 0, 0)
            .unwrap()
    }
}

fn dispatcher(clock: YearClock) -> Dispatcher<EchoRenderer, YearClock> {
    Dispatcher::with_clock(storefront_routes().unwrap(), EchoRenderer, clock)
}

fn context_of(body: &str) -> serde_json::Value {
    let value: serde_json::Value = serde_json::from_str(body).unwrap();

    value["context"].clone()
}

/// Build a concrete path for a pattern, replacing each parameter with a token.
fn sample_path(pattern: &RoutePattern) -> String {
    if pattern.segments().is_empty() {
        return "/".to_string();
    }

    pattern
        .segments()
        .iter()
        .map(|segment| match segment {
            Segment::Literal(literal) => format!("/{literal}"),
            Segment::Parameter { name } => format!("/{name}-token"),
        })
        .collect()
}

#[test]
fn test_every_route_dispatches_to_its_view() {
    let dispatcher = dispatcher(YearClock::new(2025));

    for binding in dispatcher.routes().iter() {
        let path = sample_path(binding.pattern());
        let response = dispatcher.dispatch(&path).unwrap();

        assert_eq!(response.status, StatusCode::OK, "path `{path}`");
        assert_eq!(response.view, binding.view(), "path `{path}`");

        let context = context_of(&response.body);

        assert_eq!(context["current_year"], "2025", "path `{path}`");
        assert_eq!(context["title"], binding.view().title(), "path `{path}`");

        for name in binding.pattern().parameter_names() {
            assert_eq!(context[name], format!("{name}-token"), "path `{path}`");
        }
    }
}

#[test]
fn test_route_table_matches_the_site_map() {
    let dispatcher = dispatcher(YearClock::new(2025));

    for (path, view) in [
        ("/", View::Home),
        ("/pf", View::PfHome),
        ("/pf/work/w1", View::PfWorkDetails),
        ("/pf/influencer/u1", View::PfInfluencerProfile),
        ("/pf/dashboard", View::PfUserDashboard),
        ("/pf/dashboard/ad", View::PfPostAd),
        ("/pf/apply-influencer", View::PfApplyInfluencer),
        ("/pf/dashboard/i", View::PfInfluencerDashboard),
        ("/pf/dashboard/withdraw", View::PfInfluencerWithdraw),
        ("/pf/dashboard/i/ad", View::PfInfluencerPostAd),
        ("/pf/dashboard/inbox", View::PfInfluencerInbox),
        ("/pf/dashboard/settings", View::PfInfluencerSettings),
        ("/affiliate", View::LegacyAffiliateStub),
        ("/affiliate/dashboard", View::AffiliateDashboard),
        ("/affiliate/withdraw", View::AffiliateWithdraw),
        ("/affiliate/orders", View::AffiliateOrders),
        ("/products", View::ProductsList),
        ("/product/p1", View::ProductDetail),
        ("/login", View::Login),
        ("/wp", View::LegacyLoginStub),
        ("/account", View::Account),
        ("/checkout", View::Checkout),
        ("/menu", View::Menu),
        ("/admin", View::AdminPanel),
        ("/admin/affiliates", View::AdminAffiliates),
        ("/admin/withdrawals", View::AdminWithdrawals),
        ("/admin/orders", View::AdminOrders),
        ("/admin/users", View::AdminUsers),
    ] {
        assert_eq!(dispatcher.dispatch(path).unwrap().view, view, "path `{path}`");
    }
}

#[test]
fn test_unmatched_paths_are_not_found() {
    let dispatcher = dispatcher(YearClock::new(2025));

    for path in [
        "/nonexistent",
        "/pf/",
        "/pf/work",
        "/pf/work/",
        "/pf/work/w1/extra",
        "/product",
        "/admin/",
        "/Admin",
        "/static/app.js",
        "//",
    ] {
        let err = dispatcher.dispatch(path).unwrap_err();

        assert!(
            matches!(err, DispatchError::RouteNotFound { .. }),
            "path `{path}`"
        );

        let response = dispatcher.handle(path);

        assert_eq!(response.status, StatusCode::NOT_FOUND, "path `{path}`");
        assert_eq!(response.view, View::NotFound, "path `{path}`");
        assert_eq!(context_of(&response.body)["current_year"], "2025");
    }
}

#[test]
fn test_parameter_extraction() {
    let dispatcher = dispatcher(YearClock::new(2025));

    let response = dispatcher.dispatch("/product/42").unwrap();
    let context = context_of(&response.body);
    assert_eq!(context["product_id"], "42");
    assert_eq!(context["title"], "Product Details");

    let response = dispatcher.dispatch("/pf/work/abc-123").unwrap();
    assert_eq!(context_of(&response.body)["work_id"], "abc-123");

    let response = dispatcher.dispatch("/pf/influencer/jane%20doe").unwrap();
    assert_eq!(context_of(&response.body)["user_id"], "jane doe");
}

#[test]
fn test_influencer_profile_scenario() {
    let dispatcher = dispatcher(YearClock::new(2025));

    let response = dispatcher.handle("/pf/influencer/u77");

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.view, View::PfInfluencerProfile);

    let context = context_of(&response.body);
    assert_eq!(context["user_id"], "u77");
    assert_eq!(context["title"], "Influencer Profile");
}

#[test]
fn test_current_year_follows_rollover() {
    let clock = YearClock::new(2025);
    let dispatcher = dispatcher(clock.clone());

    let before = dispatcher.dispatch("/menu").unwrap();
    assert_eq!(context_of(&before.body)["current_year"], "2025");

    clock.set(2026);

    let after = dispatcher.dispatch("/menu").unwrap();
    assert_eq!(context_of(&after.body)["current_year"], "2026");
    assert_ne!(before.body, after.body);
}

#[test]
fn test_dispatch_is_idempotent() {
    let dispatcher = dispatcher(YearClock::new(2025));

    for path in ["/", "/product/42", "/nonexistent"] {
        assert_eq!(dispatcher.handle(path), dispatcher.handle(path));
    }
}

#[test]
fn test_render_failure_scenario() {
    struct FailingAdmin;

    impl Renderer for FailingAdmin {
        type Error = std::io::Error;

        fn render(&self, view: View, context: &Context) -> Result<String, Self::Error> {
            match view {
                View::AdminPanel => Err(std::io::Error::other("admin template is broken")),
                _ => Ok(format!("{view}|{}", context.get("title"))),
            }
        }
    }

    let dispatcher = Dispatcher::new(storefront_routes().unwrap(), FailingAdmin);

    let err = dispatcher.dispatch("/admin").unwrap_err();
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = dispatcher.handle("/admin");
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.view, View::InternalError);
    assert_eq!(response.body, "500|Internal Server Error");

    // Other routes are unaffected.
    assert_eq!(dispatcher.handle("/admin/users").status, StatusCode::OK);
}
