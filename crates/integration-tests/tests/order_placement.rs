//! Repository-level order placement tests.
//!
//! These tests require a running `PostgreSQL` database with migrations
//! applied:
//!
//! ```bash
//! cargo run -p corner-market-cli -- migrate
//! cargo test -p corner-market-integration-tests -- --ignored
//! ```

use chrono::Utc;
use corner_market_core::{CustomerId, ProductId};
use rust_decimal::Decimal;
use sqlx::PgPool;

use corner_market_integration_tests::{test_pool, unique_name};
use corner_market_storefront::db::{CustomerRepository, OrderRepository};
use corner_market_storefront::models::{LineDraft, NewAddress};

/// Test helper: create a customer with an address.
async fn create_customer(pool: &PgPool) -> CustomerId {
    let address = NewAddress {
        street: "1 Test Way".to_owned(),
        apt_no: None,
        city: "Testville".to_owned(),
        state: "NY".to_owned(),
        zip: "10001".to_owned(),
    };
    CustomerRepository::new(pool)
        .create_with_address(&unique_name("cust"), "hunter2", "555-0100", &address)
        .await
        .expect("create customer")
        .id
}

/// Test helper: insert a product with a category link so the order-line
/// detail join finds it.
async fn create_product(pool: &PgPool, cents: i64) -> ProductId {
    let (product_id,): (i32,) =
        sqlx::query_as("INSERT INTO product (name, price) VALUES ($1, $2::NUMERIC) RETURNING id")
            .bind(unique_name("prod"))
            .bind(Decimal::new(cents, 2).to_string())
            .fetch_one(pool)
            .await
            .expect("insert product");

    let (category_id,): (i32,) = sqlx::query_as(
        "INSERT INTO category (name) VALUES ($1)
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name RETURNING id",
    )
    .bind("Test Goods")
    .fetch_one(pool)
    .await
    .expect("insert category");

    sqlx::query("INSERT INTO contains (product_id, category_id) VALUES ($1, $2)")
        .bind(product_id)
        .bind(category_id)
        .execute(pool)
        .await
        .expect("link category");

    ProductId::new(product_id)
}

/// Test helper: add a product to one more category.
async fn add_category(pool: &PgPool, product_id: ProductId, category: &str) {
    let (category_id,): (i32,) = sqlx::query_as(
        "INSERT INTO category (name) VALUES ($1)
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name RETURNING id",
    )
    .bind(category)
    .fetch_one(pool)
    .await
    .expect("insert category");

    sqlx::query("INSERT INTO contains (product_id, category_id) VALUES ($1, $2)")
        .bind(product_id)
        .bind(category_id)
        .execute(pool)
        .await
        .expect("link category");
}

async fn count_orders(pool: &PgPool, customer_id: CustomerId) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE customer_id = $1")
        .bind(customer_id)
        .fetch_one(pool)
        .await
        .expect("count orders");
    count
}

async fn count_lines(pool: &PgPool, customer_id: CustomerId) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM order_line WHERE customer_id = $1")
        .bind(customer_id)
        .fetch_one(pool)
        .await
        .expect("count lines");
    count
}

#[tokio::test]
#[ignore = "Requires running Postgres with migrations applied"]
async fn placement_commits_header_and_all_lines() {
    let pool = test_pool().await;
    let customer_id = create_customer(&pool).await;
    let milk = create_product(&pool, 350).await;
    let eggs = create_product(&pool, 200).await;

    let lines = [
        LineDraft {
            product_id: milk,
            quantity: 2,
        },
        LineDraft {
            product_id: eggs,
            quantity: 1,
        },
    ];

    let order_id = OrderRepository::new(&pool)
        .place(customer_id, "card", Utc::now().date_naive(), &lines)
        .await
        .expect("place order");

    let details = OrderRepository::new(&pool)
        .list_order_lines(customer_id, order_id)
        .await
        .expect("read lines");
    assert_eq!(details.len(), 2);
    assert_eq!(count_orders(&pool, customer_id).await, 1);
    assert_eq!(count_lines(&pool, customer_id).await, 2);
}

#[tokio::test]
#[ignore = "Requires running Postgres with migrations applied"]
async fn failed_second_line_leaves_no_rows() {
    let pool = test_pool().await;
    let customer_id = create_customer(&pool).await;
    let milk = create_product(&pool, 350).await;

    // The second line violates the product FK, failing mid-transaction.
    let lines = [
        LineDraft {
            product_id: milk,
            quantity: 2,
        },
        LineDraft {
            product_id: ProductId::new(i32::MAX),
            quantity: 1,
        },
    ];

    let result = OrderRepository::new(&pool)
        .place(customer_id, "card", Utc::now().date_naive(), &lines)
        .await;

    assert!(result.is_err(), "FK violation must fail the placement");
    assert_eq!(count_orders(&pool, customer_id).await, 0, "no header row");
    assert_eq!(count_lines(&pool, customer_id).await, 0, "no line rows");
}

#[tokio::test]
#[ignore = "Requires running Postgres with migrations applied"]
async fn history_is_scoped_to_the_owning_customer() {
    let pool = test_pool().await;
    let alice = create_customer(&pool).await;
    let mallory = create_customer(&pool).await;
    let milk = create_product(&pool, 350).await;

    let order_id = OrderRepository::new(&pool)
        .place(
            alice,
            "cash",
            Utc::now().date_naive(),
            &[LineDraft {
                product_id: milk,
                quantity: 3,
            }],
        )
        .await
        .expect("place order");

    let repo = OrderRepository::new(&pool);
    assert!(repo.list_orders(mallory).await.expect("list").is_empty());

    // A guessed order id belonging to someone else yields zero rows.
    let stolen = repo
        .list_order_lines(mallory, order_id)
        .await
        .expect("query");
    assert!(stolen.is_empty());
}

#[tokio::test]
#[ignore = "Requires running Postgres with migrations applied"]
async fn order_amount_equals_sum_of_line_totals() {
    let pool = test_pool().await;
    let customer_id = create_customer(&pool).await;
    let milk = create_product(&pool, 350).await;
    let eggs = create_product(&pool, 200).await;

    let repo = OrderRepository::new(&pool);
    let order_id = repo
        .place(
            customer_id,
            "card",
            Utc::now().date_naive(),
            &[
                LineDraft {
                    product_id: milk,
                    quantity: 2,
                },
                LineDraft {
                    product_id: eggs,
                    quantity: 4,
                },
            ],
        )
        .await
        .expect("place order");

    let summaries = repo.list_orders(customer_id).await.expect("summaries");
    let summary = summaries
        .iter()
        .find(|s| s.order_id == order_id)
        .expect("order present");

    let lines = repo
        .list_order_lines(customer_id, order_id)
        .await
        .expect("lines");
    let line_sum: Decimal = lines.iter().map(|l| l.line_total).sum();

    assert_eq!(summary.amount, line_sum);
    assert_eq!(summary.item_count, 6);
    assert_eq!(line_sum, Decimal::new(1500, 2)); // 2 * 3.50 + 4 * 2.00
}

#[tokio::test]
#[ignore = "Requires running Postgres with migrations applied"]
async fn multi_category_product_yields_one_detail_row() {
    let pool = test_pool().await;
    let customer_id = create_customer(&pool).await;
    let milk = create_product(&pool, 350).await;

    // A second category membership must not repeat the line in the detail
    // view or inflate its sum past the history aggregate.
    add_category(&pool, milk, "Second Shelf").await;

    let repo = OrderRepository::new(&pool);
    let order_id = repo
        .place(
            customer_id,
            "card",
            Utc::now().date_naive(),
            &[LineDraft {
                product_id: milk,
                quantity: 2,
            }],
        )
        .await
        .expect("place order");

    let lines = repo
        .list_order_lines(customer_id, order_id)
        .await
        .expect("lines");
    assert_eq!(lines.len(), 1);

    let line_sum: Decimal = lines.iter().map(|l| l.line_total).sum();
    let summaries = repo.list_orders(customer_id).await.expect("summaries");
    let summary = summaries
        .iter()
        .find(|s| s.order_id == order_id)
        .expect("order present");

    assert_eq!(summary.amount, line_sum);
    assert_eq!(line_sum, Decimal::new(700, 2)); // 2 * 3.50, counted once
}

#[tokio::test]
#[ignore = "Requires running Postgres with migrations applied"]
async fn duplicate_sign_up_leaves_single_customer() {
    let pool = test_pool().await;
    let name = unique_name("dup");
    let address = NewAddress {
        street: "1 Test Way".to_owned(),
        apt_no: Some("2B".to_owned()),
        city: "Testville".to_owned(),
        state: "NY".to_owned(),
        zip: "10001".to_owned(),
    };

    let repo = CustomerRepository::new(&pool);
    repo.create_with_address(&name, "pw", "555-0100", &address)
        .await
        .expect("first sign-up");

    let second = repo.create_with_address(&name, "pw", "555-0100", &address).await;
    assert!(second.is_err(), "duplicate name must conflict");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customer WHERE name = $1")
        .bind(&name)
        .fetch_one(&pool)
        .await
        .expect("count");
    assert_eq!(count, 1);
}
