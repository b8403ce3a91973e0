//! Demo catalog seeding.
//!
//! Inserts a small gadget catalog for local development. Idempotent: rows
//! are keyed on slug and skipped when they already exist.

use rust_decimal::{Decimal, dec};
use sqlx::PgPool;

use gadgetgrid_core::slug::slugify;

use super::{CommandError, connect};

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price: Decimal,
    sale_price: Option<Decimal>,
    stock: i32,
    subcategory: &'static str,
    featured: bool,
    new_arrival: bool,
}

const CATEGORIES: &[(&str, &[&str])] = &[
    ("Mobiles", &["Smartphones", "Feature Phones"]),
    ("Audio", &["Earbuds", "Headphones", "Speakers"]),
    ("Wearables", &["Smartwatches", "Fitness Bands"]),
];

fn products() -> Vec<SeedProduct> {
    vec![
        SeedProduct {
            name: "Pixelite 9 Pro",
            description: "6.7-inch AMOLED flagship with a 50 MP camera.",
            price: dec!(74999.00),
            sale_price: Some(dec!(69999.00)),
            stock: 25,
            subcategory: "Smartphones",
            featured: true,
            new_arrival: true,
        },
        SeedProduct {
            name: "Zenfone Lite 5G",
            description: "Budget 5G phone with two-day battery life.",
            price: dec!(13999.00),
            sale_price: None,
            stock: 120,
            subcategory: "Smartphones",
            featured: false,
            new_arrival: false,
        },
        SeedProduct {
            name: "Nova Buds ANC",
            description: "True wireless earbuds with active noise cancellation.",
            price: dec!(4999.00),
            sale_price: Some(dec!(3499.00)),
            stock: 200,
            subcategory: "Earbuds",
            featured: true,
            new_arrival: false,
        },
        SeedProduct {
            name: "BassLine Over-Ear",
            description: "Wired studio headphones with a detachable cable.",
            price: dec!(7999.00),
            sale_price: None,
            stock: 45,
            subcategory: "Headphones",
            featured: false,
            new_arrival: false,
        },
        SeedProduct {
            name: "RoomShake Mini",
            description: "Pocket Bluetooth speaker, IPX7 waterproof.",
            price: dec!(2499.00),
            sale_price: None,
            stock: 80,
            subcategory: "Speakers",
            featured: false,
            new_arrival: true,
        },
        SeedProduct {
            name: "Pulse Watch S",
            description: "1.8-inch display, SpO2 and heart-rate tracking.",
            price: dec!(6999.00),
            sale_price: Some(dec!(5499.00)),
            stock: 60,
            subcategory: "Smartwatches",
            featured: true,
            new_arrival: true,
        },
        SeedProduct {
            name: "StrideBand 4",
            description: "Slim fitness band with 14-day battery.",
            price: dec!(2999.00),
            sale_price: None,
            stock: 150,
            subcategory: "Fitness Bands",
            featured: false,
            new_arrival: false,
        },
    ]
}

/// Seed the demo catalog.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    for (category, subcategories) in CATEGORIES {
        let category_id = upsert_category(&pool, category).await?;
        for subcategory in *subcategories {
            upsert_subcategory(&pool, category_id, subcategory).await?;
        }
    }

    let mut inserted = 0;
    for product in products() {
        if insert_product(&pool, &product).await? {
            inserted += 1;
        }
    }

    tracing::info!("Seed complete: {} new products", inserted);
    Ok(())
}

async fn upsert_category(pool: &PgPool, name: &str) -> Result<i32, CommandError> {
    let id = sqlx::query_scalar(
        "INSERT INTO categories (name, slug)
         VALUES ($1, $2)
         ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name
         RETURNING id",
    )
    .bind(name)
    .bind(slugify(name))
    .fetch_one(pool)
    .await?;

    Ok(id)
}

async fn upsert_subcategory(
    pool: &PgPool,
    category_id: i32,
    name: &str,
) -> Result<(), CommandError> {
    sqlx::query(
        "INSERT INTO subcategories (category_id, name, slug)
         VALUES ($1, $2, $3)
         ON CONFLICT (slug) DO NOTHING",
    )
    .bind(category_id)
    .bind(name)
    .bind(slugify(name))
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert one product; returns false when its slug already exists.
async fn insert_product(pool: &PgPool, product: &SeedProduct) -> Result<bool, CommandError> {
    let result = sqlx::query(
        "INSERT INTO products
             (name, slug, description, price, sale_price, stock, subcategory_id,
              images, is_featured, is_new_arrival)
         SELECT $1, $2, $3, $4, $5, $6, s.id, '[]'::jsonb, $8, $9
         FROM subcategories s
         WHERE s.slug = $7
         ON CONFLICT (slug) DO NOTHING",
    )
    .bind(product.name)
    .bind(slugify(product.name))
    .bind(product.description)
    .bind(product.price)
    .bind(product.sale_price)
    .bind(product.stock)
    .bind(slugify(product.subcategory))
    .bind(product.featured)
    .bind(product.new_arrival)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
