use bigdecimal::BigDecimal;
use caspian_treasure_api::schema::{carts, customers, message_from, message_to, order_details, orders, users};
use diesel::Insertable;
use serde::{Deserialize, Serialize};

#[derive(Insertable, Serialize, Clone, Debug)]
#[diesel(table_name=users)]
pub struct NewUser {
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

#[derive(Insertable, Serialize, Deserialize, Clone)]
#[diesel(table_name=customers)]
pub struct NewCustomer {
    pub user_id: i32,
}

#[derive(Insertable, Serialize, Deserialize, Clone)]
#[diesel(table_name=carts)]
pub struct NewCartLine {
    pub product_id: i32,
    pub user_id: i32,
    pub amount: i32,
    pub total_amount: BigDecimal,
}

#[derive(Insertable, Serialize, Deserialize, Clone)]
#[diesel(table_name=orders)]
pub struct NewOrder {
    pub customer_id: i32,
    pub confirmation: String,
}

#[derive(Insertable, Serialize, Deserialize, Clone)]
#[diesel(table_name=order_details)]
pub struct NewOrderDetail {
    pub order_id: i32,
    pub product_id: i32,
}

#[derive(Insertable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name=message_from)]
pub struct NewMessageFrom {
    pub subject: String,
    pub from_name: String,
    pub from_email: String,
    pub message: String,
}

#[derive(Insertable, Serialize, Deserialize, Clone)]
#[diesel(table_name=message_to)]
pub struct NewMessageTo {
    pub product_id: i32,
    pub customer_id: i32,
}
