use crate::schema::{carts, customers, message_from, message_to, order_details, orders, products, users};
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use serde::Serialize;

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, PartialEq)]
#[diesel(table_name = products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, PartialEq)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub name: String,
    // Argon2 hash, never the raw password. Kept out of every response body.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Serialize, Debug, PartialEq)]
#[diesel(belongs_to(User))]
#[diesel(table_name = customers)]
pub struct Customer {
    pub id: i32,
    pub user_id: i32,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Serialize, Debug, PartialEq)]
#[diesel(belongs_to(User))]
#[diesel(belongs_to(Product))]
#[diesel(table_name = carts)]
#[diesel(primary_key(product_id, user_id))]
pub struct CartLine {
    pub product_id: i32,
    pub user_id: i32,
    pub amount: i32,
    pub total_amount: BigDecimal,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Serialize, Debug, PartialEq)]
#[diesel(belongs_to(Customer))]
#[diesel(table_name = orders)]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    pub confirmation: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Serialize, Debug)]
#[diesel(belongs_to(Order))]
#[diesel(belongs_to(Product))]
#[diesel(table_name = order_details)]
#[diesel(primary_key(order_id, product_id))]
pub struct OrderDetail {
    pub order_id: i32,
    pub product_id: i32,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, PartialEq)]
#[diesel(table_name = message_from)]
pub struct MessageFrom {
    pub id: i32,
    pub subject: String,
    pub from_name: String,
    pub from_email: String,
    pub message: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Serialize, Debug, PartialEq)]
#[diesel(belongs_to(Product))]
#[diesel(belongs_to(Customer))]
#[diesel(table_name = message_to)]
pub struct MessageTo {
    pub id: i32,
    pub product_id: i32,
    pub customer_id: i32,
}

/// Result of an insert that ignores duplicate keys. The database swallows
/// the conflict; callers still get told which of the two happened.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted,
    AlreadyExists,
}

impl UpsertOutcome {
    pub fn from_row_count(rows: usize) -> Self {
        if rows == 0 {
            UpsertOutcome::AlreadyExists
        } else {
            UpsertOutcome::Inserted
        }
    }
}
