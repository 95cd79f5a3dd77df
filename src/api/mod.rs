// ============================================================================
// HTTP Surface
// ============================================================================
//
// /api/v1/customers      GET (list), POST (register)
// /api/v1/customers/{id} GET, PUT (partial update), DELETE
// /ping, /health, /metrics
//
// Handlers expect `web::Data<CustomerService>` and `web::Data<Metrics>` to be
// registered on the App.
//
// ============================================================================

mod customers;
mod error;
mod system;

pub use error::ErrorBody;

use actix_web::web;

use crate::metrics::metrics_handler;

pub const CUSTOMERS_PATH: &str = "/api/v1/customers";

/// Register every route and the extractor error handlers
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::path_config())
        .service(
            web::scope(CUSTOMERS_PATH)
                .route("", web::get().to(customers::list_customers))
                .route("", web::post().to(customers::register_customer))
                .route("/{id}", web::get().to(customers::get_customer))
                .route("/{id}", web::put().to(customers::update_customer))
                .route("/{id}", web::delete().to(customers::delete_customer)),
        )
        .route("/ping", web::get().to(system::ping))
        .route("/health", web::get().to(system::health))
        .route("/metrics", web::get().to(metrics_handler));
}
