use diesel::prelude::*;

use crate::schema::{pizzas, restaurant_pizzas, restaurants};

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Insertable, Debug, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Pizza))]
#[diesel(table_name = restaurant_pizzas)]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurant_pizzas)]
pub struct NewRestaurantPizza {
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}
