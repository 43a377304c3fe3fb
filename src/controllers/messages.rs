use crate::controllers::functions::{require, require_str};
use crate::error::{ApiError, ApiResult};
use crate::insertables::{NewMessageFrom, NewMessageTo};
use actix_web::{post, web, HttpResponse, Responder};
use caspian_treasure_api::schema;
use diesel::{prelude::*, r2d2};
use serde::Deserialize;
use serde_json::json;
type DbPool = r2d2::Pool<r2d2::ConnectionManager<PgConnection>>;

#[derive(Deserialize)]
pub struct MessageDataDto {
    pub subject: Option<String>,
    pub from_name: Option<String>,
    pub from_email: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub struct MessageFromDto {
    pub data: Option<MessageDataDto>,
}

#[derive(Deserialize)]
pub struct MessageToDto {
    #[serde(rename = "productId")]
    pub product_id: Option<i32>,
    #[serde(rename = "customerId")]
    pub customer_id: Option<i32>,
}

pub fn insert_message_from(conn: &mut PgConnection, msg: NewMessageFrom) -> ApiResult<()> {
    use schema::message_from::dsl::*;
    diesel::insert_into(message_from).values(&msg).execute(conn)?;
    Ok(())
}

pub fn insert_message_to(conn: &mut PgConnection, msg: NewMessageTo) -> ApiResult<()> {
    use schema::message_to::dsl::*;
    diesel::insert_into(message_to).values(&msg).execute(conn)?;
    Ok(())
}

pub fn message_from_dto(form: MessageFromDto) -> ApiResult<NewMessageFrom> {
    let data = require(form.data, "data")?;
    Ok(NewMessageFrom {
        subject: require_str(&data.subject, "data.subject")?,
        from_name: require_str(&data.from_name, "data.from_name")?,
        from_email: require_str(&data.from_email, "data.from_email")?,
        message: require_str(&data.message, "data.message")?,
    })
}

// Inbound contact-form log. Write-only, no read surface.
#[post("/message-from")]
async fn create_message_from(
    pool: web::Data<DbPool>,
    form: web::Json<MessageFromDto>,
) -> Result<impl Responder, ApiError> {
    let msg = message_from_dto(form.into_inner())?;
    web::block(move || {
        let mut conn = pool.get()?;
        insert_message_from(&mut conn, msg)
    })
    .await??;
    Ok(HttpResponse::Ok().json(json!({ "message": "Message sent!" })))
}

// Outbound order-confirmation log keyed by product and customer.
#[post("/message-to")]
async fn create_message_to(
    pool: web::Data<DbPool>,
    form: web::Json<MessageToDto>,
) -> Result<impl Responder, ApiError> {
    let form = form.into_inner();
    let msg = NewMessageTo {
        product_id: require(form.product_id, "productId")?,
        customer_id: require(form.customer_id, "customerId")?,
    };
    web::block(move || {
        let mut conn = pool.get()?;
        insert_message_to(&mut conn, msg)
    })
    .await??;
    Ok(HttpResponse::Ok().json(json!({ "message": "Confirmation recorded!" })))
}
