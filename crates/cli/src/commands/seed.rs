//! Demo catalog seeding.
//!
//! Loads a small set of categories, brands, suppliers, and products so a
//! fresh database has something to render. Idempotent: rows are keyed by
//! name with `ON CONFLICT DO NOTHING`, so re-running is safe.

use sqlx::{Postgres, Transaction};
use tracing::info;

use super::{CommandError, connect};

/// Demo products: name, price, category, brand, supplier.
const DEMO_PRODUCTS: &[(&str, &str, &str, &str, &str)] = &[
    ("Whole Milk", "3.50", "Dairy", "Meadow Farms", "Hudson Valley Dairy Co"),
    ("Large Eggs", "2.00", "Dairy", "Meadow Farms", "Hudson Valley Dairy Co"),
    ("Sourdough Loaf", "4.25", "Bakery", "Stone Oven", "City Bakehouse"),
    ("Strawberry Jam", "4.10", "Pantry", "Orchard Lane", "Preserves United"),
    ("Cheddar Block", "5.75", "Dairy", "Meadow Farms", "Hudson Valley Dairy Co"),
    ("Cold Brew Coffee", "6.00", "Beverages", "Night Owl", "Roasters Guild"),
];

/// Seed the demo catalog.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails; the
/// whole seed is one transaction.
pub async fn demo() -> Result<(), CommandError> {
    info!("Connecting to storefront database...");
    let pool = connect().await?;

    let mut tx = pool.begin().await?;
    for (name, price, category, brand, supplier) in DEMO_PRODUCTS {
        seed_product(&mut tx, name, price, category, brand, supplier).await?;
    }
    tx.commit().await?;

    info!(products = DEMO_PRODUCTS.len(), "Demo catalog seeded");
    Ok(())
}

/// Insert one product and its category/brand/supplier links.
async fn seed_product(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    price: &str,
    category: &str,
    brand: &str,
    supplier: &str,
) -> Result<(), CommandError> {
    let (category_id,): (i32,) = upsert_named(tx, "category", category).await?;
    let (brand_id,): (i32,) = upsert_named(tx, "brand", brand).await?;
    let (supplier_id,): (i32,) = upsert_named(tx, "supplier", supplier).await?;

    // Products have no natural key; skip if a product of this name exists.
    let existing: Option<(i32,)> = sqlx::query_as("SELECT id FROM product WHERE name = $1")
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let (product_id,): (i32,) = sqlx::query_as(
        "INSERT INTO product (name, price) VALUES ($1, $2::NUMERIC) RETURNING id",
    )
    .bind(name)
    .bind(price)
    .fetch_one(&mut **tx)
    .await?;

    sqlx::query("INSERT INTO contains (product_id, category_id) VALUES ($1, $2)")
        .bind(product_id)
        .bind(category_id)
        .execute(&mut **tx)
        .await?;
    sqlx::query("INSERT INTO belongs_to (product_id, brand_id) VALUES ($1, $2)")
        .bind(product_id)
        .bind(brand_id)
        .execute(&mut **tx)
        .await?;
    sqlx::query("INSERT INTO comes_from (product_id, supplier_id) VALUES ($1, $2)")
        .bind(product_id)
        .bind(supplier_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

/// Insert-or-fetch a row in one of the name-keyed lookup tables.
async fn upsert_named(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    name: &str,
) -> Result<(i32,), CommandError> {
    // `table` comes from the compiled-in seed list, never from user input.
    let sql = format!(
        "INSERT INTO {table} (name) VALUES ($1)
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
         RETURNING id"
    );
    Ok(sqlx::query_as(&sql).bind(name).fetch_one(&mut **tx).await?)
}
