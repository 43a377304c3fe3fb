use crate::controllers::functions::require;
use crate::error::{ApiError, ApiResult};
use crate::insertables::{NewCustomer, NewUser};
use actix_web::{get, post, web, HttpResponse, Responder};
use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
use argon2::Argon2;
use caspian_treasure_api::models::{Customer, User};
use caspian_treasure_api::schema;
use diesel::{prelude::*, r2d2};
use serde::Deserialize;
use serde_json::json;
type DbPool = r2d2::Pool<r2d2::ConnectionManager<PgConnection>>;

#[derive(Deserialize)]
pub struct RegisterUserDto {
    pub name: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateCustomerDto {
    #[serde(rename = "userId")]
    pub user_id: Option<i32>,
}

pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Hash(e.to_string()))
}

pub fn get_all_users(conn: &mut PgConnection) -> ApiResult<Vec<User>> {
    use schema::users::dsl::*;
    let all_users = users.select(User::as_select()).load(conn)?;
    Ok(all_users)
}

pub fn insert_new_user(conn: &mut PgConnection, new_user: NewUser) -> ApiResult<()> {
    use schema::users::dsl::*;
    diesel::insert_into(users).values(&new_user).execute(conn)?;
    Ok(())
}

pub fn insert_new_customer(conn: &mut PgConnection, new_customer: NewCustomer) -> ApiResult<Customer> {
    use schema::customers::dsl::*;
    let customer = diesel::insert_into(customers)
        .values(&new_customer)
        .get_result(conn)?;
    Ok(customer)
}

/// Validates the registration body and hashes the password before
/// anything touches the database.
pub fn new_user_from_dto(form: RegisterUserDto) -> ApiResult<NewUser> {
    use crate::controllers::functions::require_str;
    let password = require_str(&form.password, "password")?;
    Ok(NewUser {
        name: require_str(&form.name, "name")?,
        password_hash: hash_password(&password)?,
        email: require_str(&form.email, "email")?,
        address: require_str(&form.address, "address")?,
        city: require_str(&form.city, "city")?,
        state: require_str(&form.state, "state")?,
        zip: require_str(&form.zip, "zip")?,
        country: require_str(&form.country, "country")?,
    })
}

#[get("/users")]
async fn get_users(pool: web::Data<DbPool>) -> Result<impl Responder, ApiError> {
    let all_users = web::block(move || {
        let mut conn = pool.get()?;
        get_all_users(&mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().json(all_users))
}

#[post("/users")]
async fn create_user(
    pool: web::Data<DbPool>,
    form: web::Json<RegisterUserDto>,
) -> Result<impl Responder, ApiError> {
    let new_user = new_user_from_dto(form.into_inner())?;
    web::block(move || {
        let mut conn = pool.get()?;
        insert_new_user(&mut conn, new_user)
    })
    .await??;
    Ok(HttpResponse::Ok().json(json!({ "message": "User registered!" })))
}

#[post("/customers")]
async fn create_customer(
    pool: web::Data<DbPool>,
    form: web::Json<CreateCustomerDto>,
) -> Result<impl Responder, ApiError> {
    let user_id = require(form.user_id, "userId")?;
    let customer = web::block(move || {
        let mut conn = pool.get()?;
        insert_new_customer(&mut conn, NewCustomer { user_id })
    })
    .await??;
    Ok(HttpResponse::Ok().json(json!({ "message": "Customer created!", "id": customer.id })))
}
