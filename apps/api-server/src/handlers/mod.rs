//! HTTP handlers and route configuration.

mod health;
mod posts;
mod reservations;
mod user;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Post lifecycle
            .route("/posts", web::post().to(posts::create_post))
            .route("/posts", web::put().to(posts::update_post))
            .route("/posts", web::delete().to(posts::delete_post))
            // Reservation ledger
            .route("/reservations", web::post().to(reservations::create_reservation))
            .route("/reservations", web::get().to(reservations::list_reservations))
            .route("/reservations", web::delete().to(reservations::cancel_reservation))
            // Account purge
            .route("/user", web::delete().to(user::delete_account)),
    );
}
