//! HTTP handlers and route configuration.

mod councils;
mod feedback;
mod health;
mod items;
mod recognize;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::scope("/health")
                    .route("", web::get().to(health::health_check))
                    .route("/ready", web::get().to(health::readiness))
                    .route("/live", web::get().to(health::liveness)),
            )
            .service(
                web::scope("/recognize")
                    .route("", web::post().to(recognize::recognize))
                    .route("/status", web::get().to(recognize::status)),
            )
            .service(
                web::scope("/councils")
                    .route("", web::get().to(councils::list))
                    .route("/{postcode}", web::get().to(councils::by_postcode))
                    .route("/{postcode}/rules", web::get().to(councils::rules))
                    .route("/{postcode}/schedule", web::get().to(councils::schedule)),
            )
            .service(
                web::scope("/feedback")
                    .route("", web::post().to(feedback::submit))
                    .route("/batch", web::post().to(feedback::submit_batch))
                    .route("/stats", web::get().to(feedback::stats))
                    .route("/accuracy", web::get().to(feedback::accuracy))
                    .route("/analysis", web::get().to(feedback::analysis)),
            )
            .service(
                web::scope("/items")
                    .route("", web::get().to(items::list))
                    .route("/search", web::get().to(items::search))
                    .route("/category/{category}", web::get().to(items::by_category))
                    .route("/{id}", web::get().to(items::by_id)),
            ),
    );
}
