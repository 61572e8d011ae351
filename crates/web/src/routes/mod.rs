//! HTTP route handlers for the Clotho storefront and admin console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to role home (or login)
//! GET  /health                 - Health check
//!
//! # Auth (public)
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /register               - Register page
//! POST /register               - Register action
//! POST /logout                 - Logout action
//!
//! # Storefront (requires auth)
//! GET  /user-homepage          - Product grid for shoppers
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart
//! POST /cart/update            - Change line quantity
//! POST /cart/remove            - Remove a line
//! GET  /checkout               - Payment widget page
//! POST /checkout/complete      - Finish checkout, clear cart
//! GET  /orders                 - Own order history
//! GET  /orders/{id}/invoice    - Invoice PDF download
//!
//! # Contact (public)
//! GET  /contact                - Contact form
//! POST /contact                - Submit a message
//!
//! # Admin console (requires admin role)
//! GET  /dashboard              - Analytics dashboard
//! GET  /admin/products         - Product table
//! GET  /admin/products/new     - Create form
//! POST /admin/products         - Create (multipart, optional image)
//! GET  /admin/products/{id}/edit - Edit form
//! POST /admin/products/{id}    - Update (multipart, optional image)
//! POST /admin/products/{id}/delete  - Delete
//! POST /admin/products/{id}/listing - Toggle listed flag
//! GET  /admin/inventory        - Synthesized stock table
//! POST /admin/inventory        - Create stock record
//! POST /admin/inventory/{id}   - Update stock record
//! POST /admin/inventory/{id}/delete - Delete stock record
//! GET  /admin/communication    - Customer message inbox
//! POST /admin/communication/{id}/reply - Reply to one message
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod communication;
pub mod contact;
pub mod dashboard;
pub mod home;
pub mod inventory;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}/invoice", get(orders::invoice))
}

/// Create the admin console routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(products::index).post(products::create),
        )
        .route("/products/new", get(products::new_form))
        .route("/products/{id}", post(products::update))
        .route("/products/{id}/edit", get(products::edit_form))
        .route("/products/{id}/delete", post(products::delete))
        .route("/products/{id}/listing", post(products::toggle_listing))
        .route(
            "/inventory",
            get(inventory::index).post(inventory::create),
        )
        .route("/inventory/{id}", post(inventory::update))
        .route("/inventory/{id}/delete", post(inventory::delete))
        .route("/communication", get(communication::index))
        .route("/communication/{id}/reply", post(communication::reply))
}

/// Create all routes for the application.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing redirect
        .route("/", get(home::root))
        // Storefront
        .route("/user-homepage", get(home::user_homepage))
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show))
        .route("/checkout/complete", post(checkout::complete))
        .nest("/orders", order_routes())
        // Contact
        .route("/contact", get(contact::form).post(contact::submit))
        // Auth
        .merge(auth_routes())
        // Admin console
        .route("/dashboard", get(dashboard::dashboard))
        .nest("/admin", admin_routes())
}
