//! Dashboard pages as each role sees them after signing in.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use pharmconnect_core::{OrderStatus, UserRole};
use pharmconnect_integration_tests::{CENTRAL_FILL_EMAIL, PHARMACY_EMAIL, TestContext, password};
use pharmconnect_portal::views::connections::connected_vendors;
use pharmconnect_portal::views::orders::{OrderQuery, StatusFilter, visible_orders};
use pharmconnect_portal::views::pharmacies::{search_pharmacies, share_code};
use pharmconnect_portal::views::products::{Cart, search_products};
use pharmconnect_portal::views::{self, Access, Page};

async fn signed_in(email: &str) -> TestContext {
    let ctx = TestContext::new();
    ctx.session().login(email, &password()).await.unwrap();
    ctx
}

fn granted_user(ctx: &TestContext) -> pharmconnect_portal::models::User {
    match views::require_user(&ctx.session().snapshot()) {
        Access::Granted(user) => user,
        other => panic!("expected access, got {other:?}"),
    }
}

#[test]
fn test_signed_out_user_is_redirected() {
    let ctx = TestContext::new();
    assert_eq!(
        views::require_user(&ctx.session().snapshot()),
        Access::RedirectToLogin
    );
}

#[tokio::test]
async fn test_logout_revokes_access() {
    let ctx = signed_in(PHARMACY_EMAIL).await;
    granted_user(&ctx);

    ctx.session().logout();
    assert_eq!(
        views::require_user(&ctx.session().snapshot()),
        Access::RedirectToLogin
    );
}

#[tokio::test]
async fn test_pharmacy_dashboard() {
    let ctx = signed_in(PHARMACY_EMAIL).await;
    let user = granted_user(&ctx);
    let samples = ctx.portal.samples();

    assert_eq!(views::landing_page(user.role()), Page::Products);
    assert!(views::navigation(user.role()).contains(&Page::Connections));
    assert!(!views::navigation(user.role()).contains(&Page::Pharmacies));

    let orders = visible_orders(&samples.orders, &user, &OrderQuery::default());
    assert!(orders.iter().all(|o| o.pharmacy.id == user.organization_id));
    assert_eq!(orders.len(), 2);

    let vendors = connected_vendors(&samples.vendors, &user);
    assert_eq!(vendors.len(), 1);
    assert_eq!(vendors[0].id, user.central_fill_connections()[0]);

    assert!(share_code(&user, ctx.portal.notifier()).is_none());
}

#[tokio::test]
async fn test_central_fill_dashboard() {
    let ctx = signed_in(CENTRAL_FILL_EMAIL).await;
    let user = granted_user(&ctx);
    let samples = ctx.portal.samples();

    assert_eq!(user.role(), UserRole::CentralFill);
    assert_eq!(views::landing_page(user.role()), Page::Pharmacies);
    assert!(Cart::for_user(&user).is_none());

    let delivered = visible_orders(
        &samples.orders,
        &user,
        &OrderQuery {
            search: String::new(),
            status: StatusFilter::Only(OrderStatus::Delivered),
        },
    );
    assert_eq!(delivered.len(), 2);

    assert_eq!(search_pharmacies(&samples.pharmacies, "").len(), 3);
    assert!(connected_vendors(&samples.vendors, &user).is_empty());

    let code = share_code(&user, ctx.portal.notifier()).unwrap();
    assert_eq!(code.as_str(), "XYZ12345");
    assert_eq!(ctx.last_notification().title, "Connection Code Copied");
}

#[tokio::test]
async fn test_shopping_for_pain_relief() {
    let ctx = signed_in(PHARMACY_EMAIL).await;
    let samples = ctx.portal.samples();

    let found = search_products(&samples.products, "Pain Relief");
    assert_eq!(found.len(), 2);

    let mut cart = Cart::for_user(&granted_user(&ctx)).unwrap();
    for product in &found {
        cart.add(product, ctx.portal.notifier());
    }
    cart.add(found[0], ctx.portal.notifier());

    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.item_count(), 3);
    // 2 x 12.99 + 8.75
    assert_eq!(cart.total().display(), "$34.73");
    assert_eq!(
        ctx.last_notification().description,
        "Paracetamol 500mg has been added to your cart"
    );
}
