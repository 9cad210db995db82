use diesel::prelude::*;
use diesel::result::Error::NotFound;

use crate::error::ApiError;
use crate::models::{NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

pub const PRICE_MIN: i32 = 1;
pub const PRICE_MAX: i32 = 30;

pub fn list_restaurants(conn: &mut SqliteConnection) -> Result<Vec<Restaurant>, ApiError> {
    let results = restaurants::table
        .select(Restaurant::as_select())
        .load(conn)?;
    Ok(results)
}

pub fn list_pizzas(conn: &mut SqliteConnection) -> Result<Vec<Pizza>, ApiError> {
    let results = pizzas::table.select(Pizza::as_select()).load(conn)?;
    Ok(results)
}

/// Fetch one restaurant together with its offerings and their pizzas.
pub fn get_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
) -> Result<(Restaurant, Vec<(RestaurantPizza, Pizza)>), ApiError> {
    conn.transaction::<_, ApiError, _>(|conn| {
        let restaurant = match restaurants::table
            .find(restaurant_id)
            .select(Restaurant::as_select())
            .first(conn)
        {
            Ok(restaurant) => restaurant,
            Err(NotFound) => return Err(ApiError::RestaurantNotFound),
            Err(err) => return Err(err.into()),
        };

        let offerings = RestaurantPizza::belonging_to(&restaurant)
            .inner_join(pizzas::table)
            .select((RestaurantPizza::as_select(), Pizza::as_select()))
            .load::<(RestaurantPizza, Pizza)>(conn)?;

        Ok((restaurant, offerings))
    })
}

/// Remove a restaurant and every offering that references it. The cascade
/// runs inside one transaction: offerings go first so no reader can observe
/// a deleted restaurant with surviving offerings, or the reverse.
pub fn delete_restaurant(conn: &mut SqliteConnection, restaurant_id: i32) -> Result<(), ApiError> {
    conn.transaction::<_, ApiError, _>(|conn| {
        let restaurant = match restaurants::table
            .find(restaurant_id)
            .select(Restaurant::as_select())
            .first(conn)
        {
            Ok(restaurant) => restaurant,
            Err(NotFound) => return Err(ApiError::RestaurantNotFound),
            Err(err) => return Err(err.into()),
        };

        diesel::delete(
            restaurant_pizzas::table.filter(restaurant_pizzas::restaurant_id.eq(restaurant.id)),
        )
        .execute(conn)?;
        diesel::delete(restaurants::table.find(restaurant.id)).execute(conn)?;

        Ok(())
    })
}

/// Price gate for new offerings. An absent price fails the same way an
/// out-of-range one does.
pub fn validate_price(price: Option<i32>) -> Result<i32, ApiError> {
    match price {
        Some(price) if (PRICE_MIN..=PRICE_MAX).contains(&price) => Ok(price),
        _ => Err(ApiError::ValidationFailed),
    }
}

/// Create an offering linking a pizza to a restaurant at a price. Reference
/// checks run before the price gate: a dangling pizza or restaurant id
/// reports not-found even when the price is also invalid.
pub fn create_restaurant_pizza(
    conn: &mut SqliteConnection,
    price: Option<i32>,
    pizza_id: Option<i32>,
    restaurant_id: Option<i32>,
) -> Result<(RestaurantPizza, Pizza, Restaurant), ApiError> {
    conn.transaction::<_, ApiError, _>(|conn| {
        let pizza = match pizza_id {
            Some(id) => pizzas::table
                .find(id)
                .select(Pizza::as_select())
                .first(conn)
                .optional()?,
            None => None,
        };
        let restaurant = match restaurant_id {
            Some(id) => restaurants::table
                .find(id)
                .select(Restaurant::as_select())
                .first(conn)
                .optional()?,
            None => None,
        };
        let (Some(pizza), Some(restaurant)) = (pizza, restaurant) else {
            return Err(ApiError::PizzaOrRestaurantNotFound);
        };

        let price = validate_price(price)?;

        let offering = diesel::insert_into(restaurant_pizzas::table)
            .values(&NewRestaurantPizza {
                price,
                restaurant_id: restaurant.id,
                pizza_id: pizza.id,
            })
            .returning(RestaurantPizza::as_returning())
            .get_result(conn)?;

        Ok((offering, pizza, restaurant))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::connection::SimpleConnection;
    use diesel_migrations::MigrationHarness;

    fn setup_connection() -> SqliteConnection {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        conn.batch_execute("PRAGMA foreign_keys = ON;").unwrap();
        conn.run_pending_migrations(crate::MIGRATIONS).unwrap();
        conn
    }

    fn seed_catalog(conn: &mut SqliteConnection) {
        diesel::insert_into(restaurants::table)
            .values(&vec![
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
            ])
            .execute(conn)
            .unwrap();
        diesel::insert_into(pizzas::table)
            .values(&vec![
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
            ])
            .execute(conn)
            .unwrap();
    }

    fn offering_count(conn: &mut SqliteConnection) -> i64 {
        restaurant_pizzas::table.count().get_result(conn).unwrap()
    }

    #[test]
    fn test_list_restaurants() {
        let conn = &mut setup_connection();
        seed_catalog(conn);

        let results = list_restaurants(conn).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 1);
        assert_eq!(results[0].name, "Dominion Pizza");
        assert_eq!(results[1].id, 2);
        assert_eq!(results[1].name, "Kiki's Pizza");
    }

    #[test]
    fn test_list_pizzas() {
        let conn = &mut setup_connection();
        seed_catalog(conn);

        let results = list_pizzas(conn).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Margherita");
        assert_eq!(results[0].ingredients, "Dough, Tomato Sauce, Cheese");
        assert_eq!(results[1].name, "Pepperoni");
    }

    #[test]
    fn test_list_operations_are_pure_reads() {
        let conn = &mut setup_connection();
        seed_catalog(conn);

        assert_eq!(list_restaurants(conn).unwrap(), list_restaurants(conn).unwrap());
        assert_eq!(list_pizzas(conn).unwrap(), list_pizzas(conn).unwrap());
    }

    #[test]
    fn test_get_restaurant_includes_offerings() {
        let conn = &mut setup_connection();
        seed_catalog(conn);
        create_restaurant_pizza(conn, Some(5), Some(1), Some(1)).unwrap();
        create_restaurant_pizza(conn, Some(12), Some(2), Some(1)).unwrap();
        create_restaurant_pizza(conn, Some(7), Some(1), Some(2)).unwrap();

        let (restaurant, offerings) = get_restaurant(conn, 1).unwrap();

        assert_eq!(restaurant.name, "Dominion Pizza");
        assert_eq!(offerings.len(), 2);
        assert_eq!(offerings[0].0.price, 5);
        assert_eq!(offerings[0].0.restaurant_id, 1);
        assert_eq!(offerings[0].1.name, "Margherita");
        assert_eq!(offerings[1].0.price, 12);
        assert_eq!(offerings[1].1.name, "Pepperoni");
    }

    #[test]
    fn test_get_restaurant_without_offerings() {
        let conn = &mut setup_connection();
        seed_catalog(conn);

        let (restaurant, offerings) = get_restaurant(conn, 2).unwrap();

        assert_eq!(restaurant.id, 2);
        assert!(offerings.is_empty());
    }

    #[test]
    fn test_get_restaurant_missing() {
        let conn = &mut setup_connection();
        seed_catalog(conn);

        let err = get_restaurant(conn, 999).unwrap_err();

        assert!(matches!(err, ApiError::RestaurantNotFound));
    }

    #[test]
    fn test_create_restaurant_pizza_persists_row() {
        let conn = &mut setup_connection();
        seed_catalog(conn);

        let (offering, pizza, restaurant) =
            create_restaurant_pizza(conn, Some(5), Some(1), Some(1)).unwrap();

        assert!(offering.id > 0);
        assert_eq!(offering.price, 5);
        assert_eq!(offering.pizza_id, 1);
        assert_eq!(offering.restaurant_id, 1);
        assert_eq!(pizza.name, "Margherita");
        assert_eq!(restaurant.name, "Dominion Pizza");
        assert_eq!(offering_count(conn), 1);
    }

    #[test]
    fn test_create_restaurant_pizza_price_boundaries() {
        let conn = &mut setup_connection();
        seed_catalog(conn);

        assert!(create_restaurant_pizza(conn, Some(PRICE_MIN), Some(1), Some(1)).is_ok());
        assert!(create_restaurant_pizza(conn, Some(PRICE_MAX), Some(1), Some(1)).is_ok());

        let below = create_restaurant_pizza(conn, Some(PRICE_MIN - 1), Some(1), Some(1));
        assert!(matches!(below.unwrap_err(), ApiError::ValidationFailed));
        let above = create_restaurant_pizza(conn, Some(PRICE_MAX + 1), Some(1), Some(1));
        assert!(matches!(above.unwrap_err(), ApiError::ValidationFailed));

        assert_eq!(offering_count(conn), 2);
    }

    #[test]
    fn test_create_restaurant_pizza_missing_price() {
        let conn = &mut setup_connection();
        seed_catalog(conn);

        let err = create_restaurant_pizza(conn, None, Some(1), Some(1)).unwrap_err();

        assert!(matches!(err, ApiError::ValidationFailed));
        assert_eq!(offering_count(conn), 0);
    }

    #[test]
    fn test_create_restaurant_pizza_unknown_reference() {
        let conn = &mut setup_connection();
        seed_catalog(conn);

        let err = create_restaurant_pizza(conn, Some(5), Some(999), Some(1)).unwrap_err();
        assert!(matches!(err, ApiError::PizzaOrRestaurantNotFound));

        let err = create_restaurant_pizza(conn, Some(5), Some(1), Some(999)).unwrap_err();
        assert!(matches!(err, ApiError::PizzaOrRestaurantNotFound));

        let err = create_restaurant_pizza(conn, Some(5), None, Some(1)).unwrap_err();
        assert!(matches!(err, ApiError::PizzaOrRestaurantNotFound));

        assert_eq!(offering_count(conn), 0);
    }

    #[test]
    fn test_create_restaurant_pizza_reference_checked_before_price() {
        let conn = &mut setup_connection();
        seed_catalog(conn);

        let err = create_restaurant_pizza(conn, Some(50), Some(999), Some(1)).unwrap_err();

        assert!(matches!(err, ApiError::PizzaOrRestaurantNotFound));
    }

    #[test]
    fn test_delete_restaurant_cascades_offerings() {
        let conn = &mut setup_connection();
        seed_catalog(conn);
        create_restaurant_pizza(conn, Some(5), Some(1), Some(1)).unwrap();
        create_restaurant_pizza(conn, Some(12), Some(2), Some(1)).unwrap();
        create_restaurant_pizza(conn, Some(7), Some(1), Some(2)).unwrap();

        delete_restaurant(conn, 1).unwrap();

        let remaining = list_restaurants(conn).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, 2);

        let offerings = restaurant_pizzas::table
            .select(RestaurantPizza::as_select())
            .load(conn)
            .unwrap();
        assert_eq!(offerings.len(), 1);
        assert_eq!(offerings[0].restaurant_id, 2);

        // Pizza rows are untouched by the cascade.
        assert_eq!(list_pizzas(conn).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_restaurant_missing() {
        let conn = &mut setup_connection();
        seed_catalog(conn);

        let err = delete_restaurant(conn, 999).unwrap_err();

        assert!(matches!(err, ApiError::RestaurantNotFound));
        assert_eq!(list_restaurants(conn).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_then_get_reports_not_found() {
        let conn = &mut setup_connection();
        seed_catalog(conn);
        create_restaurant_pizza(conn, Some(5), Some(1), Some(1)).unwrap();

        delete_restaurant(conn, 1).unwrap();

        let err = get_restaurant(conn, 1).unwrap_err();
        assert!(matches!(err, ApiError::RestaurantNotFound));
        assert_eq!(offering_count(conn), 0);
    }
}
