use crate::error::{ApiError, ApiResult};
use actix_web::{get, web, HttpResponse, Responder};
use caspian_treasure_api::models::Product;
use caspian_treasure_api::schema;
use diesel::{prelude::*, r2d2};
use schema::products::dsl::*;
type DbPool = r2d2::Pool<r2d2::ConnectionManager<PgConnection>>;

// The catalog is seeded out of band and immutable through the API, so
// listing is the whole surface.
pub fn get_all_products(conn: &mut PgConnection) -> ApiResult<Vec<Product>> {
    let all_products = products.select(Product::as_select()).load(conn)?;
    Ok(all_products)
}

#[get("/products")]
async fn get_products(pool: web::Data<DbPool>) -> Result<impl Responder, ApiError> {
    let all_products = web::block(move || {
        let mut conn = pool.get()?;
        get_all_products(&mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().json(all_products))
}
