//! Demo-catalog seeder: 2 categories, 15 products, 15 stock rows, keyed by
//! human-readable codes. Safe to re-run; existing rows are left alone.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::env;

const CATEGORIES: &[(&str, &str, &str)] = &[
    ("FOOD", "Food", "All food items"),
    ("DRINK", "Drink", "All drink items"),
];

// (code, name, category code, unit, description)
const PRODUCTS: &[(&str, &str, &str, &str, &str)] = &[
    ("APPLE", "Apple", "FOOD", "pcs", "Fresh red apples, hand-picked and perfect for snacking or baking. Crisp and juicy with a sweet flavor."),
    ("WATER", "Water Bottle", "DRINK", "bottle", "Bottled mineral water sourced from natural springs, ideal for hydration on the go or at home."),
    ("BANANA", "Banana", "FOOD", "pcs", "Ripe yellow bananas, rich in potassium and perfect for a healthy snack or smoothie ingredient."),
    ("BREAD", "Bread", "FOOD", "loaf", "Freshly baked bread loaf with a soft interior and golden crust, great for sandwiches or toast."),
    ("MILK", "Milk", "DRINK", "liter", "Whole cow milk, rich in calcium and nutrients, suitable for drinking, cooking, or baking."),
    ("ORANGE", "Orange", "FOOD", "pcs", "Juicy oranges packed with vitamin C, perfect for juicing, snacking, or adding to salads."),
    ("COFFEE", "Coffee", "DRINK", "cup", "Hot brewed coffee made from premium roasted beans, offering a rich aroma and bold flavor to start your day."),
    ("TEA", "Tea", "DRINK", "cup", "Freshly brewed tea, soothing and aromatic, available in a variety of flavors for any time of day."),
    ("EGG", "Egg", "FOOD", "pcs", "Farm fresh eggs, high in protein and versatile for breakfast, baking, or cooking."),
    ("CHEESE", "Cheese", "FOOD", "block", "Block of cheddar cheese, aged for a sharp flavor, perfect for slicing, melting, or grating over dishes."),
    ("JUICE", "Juice", "DRINK", "bottle", "Mixed fruit juice, a refreshing blend of natural fruits with no added sugar, great for any occasion."),
    ("RICE", "Rice", "FOOD", "kg", "White rice, a staple grain that is fluffy and light when cooked, suitable for a variety of cuisines."),
    ("PASTA", "Pasta", "FOOD", "pack", "Packaged pasta made from durum wheat, ideal for classic Italian dishes and quick meals."),
    ("SODA", "Soda", "DRINK", "can", "Carbonated soft drink, sweet and fizzy, perfect for parties, gatherings, or a refreshing treat."),
    ("YOGURT", "Yogurt", "FOOD", "cup", "Plain yogurt cup, creamy and tangy, rich in probiotics and great for breakfast or snacks."),
];

// (product code, amount, unit)
const STOCKS: &[(&str, i32, &str)] = &[
    ("APPLE", 100, "pcs"),
    ("WATER", 50, "bottle"),
    ("BANANA", 120, "pcs"),
    ("BREAD", 40, "loaf"),
    ("MILK", 60, "liter"),
    ("ORANGE", 90, "pcs"),
    ("COFFEE", 80, "cup"),
    ("TEA", 70, "cup"),
    ("EGG", 200, "pcs"),
    ("CHEESE", 30, "block"),
    ("JUICE", 55, "bottle"),
    ("RICE", 100, "kg"),
    ("PASTA", 75, "pack"),
    ("SODA", 90, "can"),
    ("YOGURT", 60, "cup"),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let database_url = env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set in .env file");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("failed to connect to PostgreSQL");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    seed(&pool).await.expect("seeding failed");
    log::info!("seeder completed");
}

async fn seed(pool: &PgPool) -> Result<(), sqlx::Error> {
    for &(code, name, description) in CATEGORIES {
        sqlx::query(
            "INSERT INTO categories (code, name, description) VALUES ($1, $2, $3)
             ON CONFLICT (code) DO NOTHING",
        )
        .bind(code)
        .bind(name)
        .bind(description)
        .execute(pool)
        .await?;
    }

    // foreign keys resolved by code look-up after insert
    for &(code, name, category_code, unit, description) in PRODUCTS {
        sqlx::query(
            "INSERT INTO products (code, name, description, unit, in_stock, category_id)
             SELECT $1, $2, $3, $4, TRUE, c.id FROM categories c WHERE c.code = $5
             ON CONFLICT (code) DO NOTHING",
        )
        .bind(code)
        .bind(name)
        .bind(description)
        .bind(unit)
        .bind(category_code)
        .execute(pool)
        .await?;
    }

    for &(product_code, amount, unit) in STOCKS {
        sqlx::query(
            "INSERT INTO stocks (product_id, amount, unit)
             SELECT p.id, $2, $3 FROM products p
             WHERE p.code = $1
               AND NOT EXISTS (SELECT 1 FROM stocks s WHERE s.product_id = p.id)",
        )
        .bind(product_code)
        .bind(amount)
        .bind(unit)
        .execute(pool)
        .await?;
    }

    Ok(())
}
