use actix_web::web;

pub mod health;
pub mod play;

/// Register every relay route. `main.rs` and the integration tests share it;
/// middleware is wrapped by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));
    cfg.configure(health::configure_routes);
    cfg.configure(play::configure_routes);
}
