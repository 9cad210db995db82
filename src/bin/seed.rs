use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use dotenvy::dotenv;
use pizza_catalog::models::{Pizza, Restaurant, RestaurantPizza};
use pizza_catalog::schema::{pizzas, restaurant_pizzas, restaurants};
use pizza_catalog::{establish_connection, MIGRATIONS};

fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut conn = establish_connection();
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");

    // Offerings reference both other tables, so they go first.
    diesel::delete(restaurant_pizzas::table)
        .execute(&mut conn)
        .expect("Failed to clear offerings");
    diesel::delete(restaurants::table)
        .execute(&mut conn)
        .expect("Failed to clear restaurants");
    diesel::delete(pizzas::table)
        .execute(&mut conn)
        .expect("Failed to clear pizzas");

    let restaurants = vec![
        Restaurant {
            id: 1,
            name: "Dominion Pizza".to_string(),
            address: "8 Good Italian Street".to_string(),
        },
        Restaurant {
            id: 2,
            name: "Kiki's Pizza".to_string(),
            address: "123 Melted Cheese Road".to_string(),
        },
        Restaurant {
            id: 3,
            name: "Pizza Hat".to_string(),
            address: "12 Chewy Crust Avenue".to_string(),
        },
    ];
    diesel::insert_into(restaurants::table)
        .values(&restaurants)
        .execute(&mut conn)
        .expect("Failed to seed restaurants");

    let pizzas = vec![
        Pizza {
            id: 1,
            name: "Margherita".to_string(),
            ingredients: "Dough, Tomato Sauce, Cheese".to_string(),
        },
        Pizza {
            id: 2,
            name: "Pepperoni".to_string(),
            ingredients: "Dough, Tomato Sauce, Cheese, Pepperoni".to_string(),
        },
        Pizza {
            id: 3,
            name: "California".to_string(),
            ingredients: "Dough, Sauce, Ricotta, Red Peppers, Mustard".to_string(),
        },
    ];
    diesel::insert_into(pizzas::table)
        .values(&pizzas)
        .execute(&mut conn)
        .expect("Failed to seed pizzas");

    let offerings = vec![
        RestaurantPizza {
            id: 1,
            price: 10,
            restaurant_id: 1,
            pizza_id: 1,
        },
        RestaurantPizza {
            id: 2,
            price: 12,
            restaurant_id: 1,
            pizza_id: 2,
        },
        RestaurantPizza {
            id: 3,
            price: 9,
            restaurant_id: 2,
            pizza_id: 3,
        },
    ];
    diesel::insert_into(restaurant_pizzas::table)
        .values(&offerings)
        .execute(&mut conn)
        .expect("Failed to seed offerings");

    tracing::info!(
        restaurants = restaurants.len(),
        pizzas = pizzas.len(),
        offerings = offerings.len(),
        "seeded catalog"
    );
}
