//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod measurements;
pub mod schemas;
pub mod series;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register the `/api` scope with every resource handler and the extractor
/// configuration that keeps rejections in the JSON error envelope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use measurement_backend::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(
            web::scope("/api")
                .service(series::list_series)
                .service(series::get_series)
                .service(series::create_series)
                .service(series::update_series)
                .service(series::delete_series)
                .service(measurements::query_measurements)
                .service(measurements::get_measurement)
                .service(measurements::create_measurement)
                .service(measurements::update_measurement)
                .service(measurements::delete_measurement)
                .service(users::create_user)
                .service(users::find_user_by_username)
                .service(users::get_user)
                .service(users::update_user)
                .service(users::delete_user),
        );
}
