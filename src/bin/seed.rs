use bigdecimal::BigDecimal;
use caspian_treasure_api::establish_connection;
use caspian_treasure_api::schema;
use diesel::insert_into;
use diesel::prelude::*;
use schema::products;
use schema::products::dsl::*;
use serde::Deserialize;
use std::fs;
use std::io::Read;

#[derive(Deserialize, Insertable)]
struct Product {
    name: String,
    description: String,
    price: BigDecimal,
}

// The schema is created here rather than by migration tooling; reseeding
// an existing database is a no-op thanks to IF NOT EXISTS and the unique
// product name.
const TABLE_DDL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL UNIQUE,
        description VARCHAR(255) NOT NULL,
        price NUMERIC(6, 2) NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        address VARCHAR(255) NOT NULL,
        city VARCHAR(255) NOT NULL,
        state VARCHAR(255) NOT NULL,
        zip VARCHAR(255) NOT NULL,
        country VARCHAR(255) NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS customers (
        id SERIAL PRIMARY KEY,
        user_id INT NOT NULL REFERENCES users (id)
    )",
    "CREATE TABLE IF NOT EXISTS carts (
        product_id INT NOT NULL REFERENCES products (id),
        user_id INT NOT NULL REFERENCES users (id),
        amount INT NOT NULL,
        total_amount NUMERIC(8, 2) NOT NULL,
        PRIMARY KEY (product_id, user_id)
    )",
    "CREATE TABLE IF NOT EXISTS orders (
        id SERIAL PRIMARY KEY,
        customer_id INT NOT NULL REFERENCES customers (id),
        confirmation VARCHAR(36) NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS order_details (
        order_id INT NOT NULL REFERENCES orders (id),
        product_id INT NOT NULL REFERENCES products (id),
        PRIMARY KEY (order_id, product_id)
    )",
    "CREATE TABLE IF NOT EXISTS message_from (
        id SERIAL PRIMARY KEY,
        subject VARCHAR(255) NOT NULL,
        from_name VARCHAR(255) NOT NULL,
        from_email VARCHAR(255) NOT NULL,
        message VARCHAR(255) NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS message_to (
        id SERIAL PRIMARY KEY,
        product_id INT NOT NULL REFERENCES products (id),
        customer_id INT NOT NULL REFERENCES customers (id)
    )",
];

fn main() -> std::io::Result<()> {
    let connection = &mut establish_connection();

    for ddl in TABLE_DDL {
        diesel::sql_query(*ddl)
            .execute(connection)
            .expect("can't create table");
    }

    let mut products_json = String::new();
    fs::File::open("src/bin/products.json")
        .expect("can't open")
        .read_to_string(&mut products_json)
        .unwrap();

    insert_into(products)
        .values(serde_json::from_str::<Vec<Product>>(&products_json).unwrap())
        .on_conflict_do_nothing()
        .execute(connection)
        .unwrap();
    Ok(())
}
