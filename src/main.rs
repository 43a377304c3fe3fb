mod controllers {
    pub mod carts;
    pub mod checkout;
    pub mod functions;
    pub mod messages;
    pub mod orders;
    pub mod products;
    pub mod users;
}
mod config;
mod error;
mod insertables;
mod payment;

use actix_cors::Cors;
use actix_web::http::{header, Method};
use actix_web::{get, web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use config::AppConfig;
use controllers::carts;
use controllers::checkout;
use controllers::messages;
use controllers::orders;
use controllers::products;
use controllers::users;
use diesel::{r2d2, PgConnection};
use payment::PaymentClient;
use serde_json::json;
type DbPool = r2d2::Pool<r2d2::ConnectionManager<PgConnection>>;

#[get("/")]
async fn welcome() -> impl Responder {
    HttpResponse::Ok().body("Welcome to the Caspian Treasure API")
}

// Catch-all responder. Unmatched OPTIONS requests pass through with an
// empty success; everything else gets the JSON 404 envelope.
async fn not_found(req: HttpRequest) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().json(json!({ "message": "404 - Not Found" }))
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let db_pool = initialize_db_pool(&config);
    let payment_client = PaymentClient::new(
        config.stripe_secret_key.clone(),
        config.stripe_api_base.clone(),
    );

    tracing::info!(host = %config.host, port = config.port, "Server starting");

    let allowed_origin = config.allowed_origin.clone();
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "PUT", "POST", "DELETE"])
            .allowed_headers(vec![header::CONTENT_TYPE]);
        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(cors)
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(payment_client.clone()))
            .service(welcome)
            .service(products::get_products)
            .service(carts::get_cart_products)
            .service(carts::add_cart_product)
            .service(carts::update_cart_product)
            .service(carts::remove_cart_product)
            .service(users::get_users)
            .service(users::create_user)
            .service(users::create_customer)
            .service(orders::get_orders)
            .service(orders::create_order)
            .service(orders::add_order_line)
            .service(messages::create_message_from)
            .service(messages::create_message_to)
            .service(checkout::checkout)
            .default_service(web::route().to(not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn initialize_db_pool(config: &AppConfig) -> DbPool {
    let manager = r2d2::ConnectionManager::<PgConnection>::new(&config.database_url);
    r2d2::Pool::builder()
        .max_size(config.max_pool_size)
        .build(manager)
        .expect("DB Error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;

    #[actix_web::test]
    async fn unmatched_routes_answer_json_404() {
        let app = test::init_service(
            App::new()
                .service(welcome)
                .default_service(web::route().to(not_found)),
        )
        .await;
        let req = test::TestRequest::get().uri("/no-such-route").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "404 - Not Found");
    }

    #[actix_web::test]
    async fn unmatched_options_passes_through() {
        let app = test::init_service(
            App::new().default_service(web::route().to(not_found)),
        )
        .await;
        let req = test::TestRequest::with_uri("/no-such-route")
            .method(Method::OPTIONS)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn welcome_banner_is_served_at_the_root() {
        let app = test::init_service(
            App::new()
                .service(welcome)
                .default_service(web::route().to(not_found)),
        )
        .await;
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(body, "Welcome to the Caspian Treasure API");
    }
}
