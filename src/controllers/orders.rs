use crate::controllers::functions::require;
use crate::error::{ApiError, ApiResult};
use crate::insertables::{NewOrder, NewOrderDetail};
use actix_web::{get, post, web, HttpResponse, Responder};
use caspian_treasure_api::models::{Order, UpsertOutcome};
use caspian_treasure_api::schema;
use diesel::{prelude::*, r2d2};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
type DbPool = r2d2::Pool<r2d2::ConnectionManager<PgConnection>>;

#[derive(Deserialize)]
pub struct CreateOrderDto {
    #[serde(rename = "customerId")]
    pub customer_id: Option<i32>,
    pub confirmation: Option<String>,
}

#[derive(Deserialize)]
pub struct OrderProductDto {
    pub product_id: Option<i32>,
}

#[derive(Deserialize)]
pub struct AddOrderLineDto {
    #[serde(rename = "newProduct")]
    pub new_product: Option<OrderProductDto>,
    #[serde(rename = "orderId")]
    pub order_id: Option<i32>,
}

/// Caller-supplied confirmation token, or a fresh v4 UUID. An empty or
/// blank token counts as absent.
pub fn new_confirmation(supplied: Option<String>) -> String {
    supplied
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub fn get_all_orders(conn: &mut PgConnection) -> ApiResult<Vec<Order>> {
    use schema::orders::dsl::*;
    let all_orders = orders.select(Order::as_select()).load(conn)?;
    Ok(all_orders)
}

pub fn insert_new_order(conn: &mut PgConnection, new_order: NewOrder) -> ApiResult<Order> {
    use schema::orders::dsl::*;
    let created_order = diesel::insert_into(orders)
        .values(&new_order)
        .get_result(conn)?;
    Ok(created_order)
}

/// Insert-ignore on the (order_id, product_id) line-item key.
pub fn add_order_detail(conn: &mut PgConnection, detail: NewOrderDetail) -> ApiResult<UpsertOutcome> {
    use schema::order_details::dsl::*;
    let rows = diesel::insert_into(order_details)
        .values(&detail)
        .on_conflict_do_nothing()
        .execute(conn)?;
    Ok(UpsertOutcome::from_row_count(rows))
}

#[get("/orders")]
async fn get_orders(pool: web::Data<DbPool>) -> Result<impl Responder, ApiError> {
    let all_orders = web::block(move || {
        let mut conn = pool.get()?;
        get_all_orders(&mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().json(all_orders))
}

#[post("/orders")]
async fn create_order(
    pool: web::Data<DbPool>,
    form: web::Json<CreateOrderDto>,
) -> Result<impl Responder, ApiError> {
    let form = form.into_inner();
    let customer_id = require(form.customer_id, "customerId")?;
    let new_order = NewOrder {
        customer_id,
        confirmation: new_confirmation(form.confirmation),
    };
    let order = web::block(move || {
        let mut conn = pool.get()?;
        insert_new_order(&mut conn, new_order)
    })
    .await??;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Order created!",
        "confirmation": order.confirmation
    })))
}

#[post("/order-details")]
async fn add_order_line(
    pool: web::Data<DbPool>,
    form: web::Json<AddOrderLineDto>,
) -> Result<impl Responder, ApiError> {
    let form = form.into_inner();
    let new_product = require(form.new_product, "newProduct")?;
    let line_product_id = require(new_product.product_id, "newProduct.product_id")?;
    let line_order_id = require(form.order_id, "orderId")?;

    let detail = NewOrderDetail {
        order_id: line_order_id,
        product_id: line_product_id,
    };
    let outcome = web::block(move || {
        let mut conn = pool.get()?;
        add_order_detail(&mut conn, detail)
    })
    .await??;
    Ok(HttpResponse::Ok().json(json!({ "message": "Order line added!", "outcome": outcome })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::{self};

    fn test_pool() -> DbPool {
        let manager = r2d2::ConnectionManager::<PgConnection>::new("postgres://unused/none");
        r2d2::Pool::builder().max_size(1).build_unchecked(manager)
    }

    #[test]
    fn generated_confirmation_is_a_36_char_uuid() {
        let token = new_confirmation(None);
        assert_eq!(token.len(), 36);
        assert!(Uuid::parse_str(&token).is_ok());
    }

    #[test]
    fn generated_confirmations_are_unique() {
        assert_ne!(new_confirmation(None), new_confirmation(None));
    }

    #[test]
    fn supplied_confirmation_is_kept_and_blank_is_replaced() {
        assert_eq!(
            new_confirmation(Some("my-confirmation".to_string())),
            "my-confirmation"
        );
        assert_eq!(new_confirmation(Some("  ".to_string())).len(), 36);
    }

    #[actix_web::test]
    async fn create_order_without_customer_answers_400() {
        let app = test::init_service(
            actix_web::App::new()
                .app_data(web::Data::new(test_pool()))
                .service(create_order),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(json!({ "confirmation": "abc" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn add_order_line_without_order_id_answers_400() {
        let app = test::init_service(
            actix_web::App::new()
                .app_data(web::Data::new(test_pool()))
                .service(add_order_line),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/order-details")
            .set_json(json!({ "newProduct": { "product_id": 1 } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    #[ignore = "requires a running Postgres"]
    fn duplicate_order_lines_are_ignored() {
        use crate::insertables::{NewCustomer, NewUser};
        use caspian_treasure_api::models::{Customer, User};
        use diesel::Connection;

        let mut conn = caspian_treasure_api::establish_connection();
        conn.test_transaction::<_, ApiError, _>(|conn| {
            use caspian_treasure_api::schema::{customers, products, users};
            diesel::insert_into(products::table)
                .values((
                    products::id.eq(9003),
                    products::name.eq("test-treasure-9003"),
                    products::description.eq("carved test chess set"),
                    products::price.eq(bigdecimal::BigDecimal::from(120)),
                ))
                .on_conflict_do_nothing()
                .execute(conn)?;
            let user: User = diesel::insert_into(users::table)
                .values(&NewUser {
                    name: "Order Tester".into(),
                    password_hash: "x".into(),
                    email: "orders@example.com".into(),
                    address: "1 Test St".into(),
                    city: "Baku".into(),
                    state: "AZ".into(),
                    zip: "1000".into(),
                    country: "AZ".into(),
                })
                .get_result(conn)?;
            let customer: Customer = diesel::insert_into(customers::table)
                .values(&NewCustomer { user_id: user.id })
                .get_result(conn)?;

            let order = insert_new_order(
                conn,
                NewOrder {
                    customer_id: customer.id,
                    confirmation: new_confirmation(None),
                },
            )?;
            assert_eq!(order.confirmation.len(), 36);

            let detail = NewOrderDetail {
                order_id: order.id,
                product_id: 9003,
            };
            assert_eq!(add_order_detail(conn, detail.clone())?, UpsertOutcome::Inserted);
            assert_eq!(add_order_detail(conn, detail)?, UpsertOutcome::AlreadyExists);
            Ok(())
        });
    }
}
