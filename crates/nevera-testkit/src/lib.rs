// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Deterministic sample data for tests and `--demo` mode. No randomness:
//! every builder derives its values from the item index so runs, tests, and
//! demos always agree.

use nevera_app::dates;
use nevera_app::model::{InventoryRecord, ItemStatus, ProductCandidate};
use nevera_app::reminder::{RefrigeratorMember, StockContext};
use time::{Date, Duration, Month};

const PRODUCT_NAMES: [&str; 16] = [
    "Whole Milk",
    "Free-Range Eggs",
    "Plain Yogurt",
    "Natto",
    "Tofu",
    "Cheddar Cheese",
    "Sliced Ham",
    "Orange Juice",
    "Soy Sauce",
    "Miso Paste",
    "Butter",
    "Strawberry Jam",
    "牛乳",
    "たまご",
    "食パン",
    "Green Tea",
];

const CATEGORIES: [&str; 6] = [
    "Dairy",
    "Deli",
    "Beverages",
    "Condiments",
    "Bakery",
    "Produce",
];

const MEMBER_NAMES: [&str; 4] = ["Aki", "Ben", "Chika", "Dai"];

/// The fixed "today" all sample dates are spread around.
pub fn sample_today() -> Date {
    Date::from_calendar_date(2024, Month::June, 15).expect("sample date is valid")
}

/// One fully-populated active record; expiry lands `offset_days` from the
/// sample today (negative means already expired).
pub fn record(index: usize, offset_days: i64) -> InventoryRecord {
    let name = PRODUCT_NAMES[index % PRODUCT_NAMES.len()];
    let expiry = sample_today().saturating_add(Duration::days(offset_days));
    let registered = sample_today().saturating_add(Duration::days(-((index % 14) as i64 + 1)));
    InventoryRecord {
        id: format!("rec-{index:04}"),
        name: name.to_owned(),
        image_url: Some(format!("https://img.example/products/{index}.jpg")),
        category: Some(CATEGORIES[index % CATEGORIES.len()].to_owned()),
        expiry_date: dates::to_civil_text(expiry),
        status: ItemStatus::Active,
        created_at: format!("{}T09:00:00Z", dates::to_civil_text(registered)),
    }
}

/// A realistic snapshot: a mix of fresh, expiring, and expired items, one
/// consumed and one discarded row, a record with a malformed expiry, and one
/// with missing display fields.
pub fn sample_inventory() -> Vec<InventoryRecord> {
    let mut records: Vec<InventoryRecord> = (0..10)
        .map(|index| record(index, index as i64 * 3 - 9))
        .collect();

    records[7].status = ItemStatus::Consumed;
    records[8].status = ItemStatus::Discarded;

    let mut degraded = record(10, 5);
    degraded.expiry_date = "no expiry recorded".to_owned();
    records.push(degraded);

    let mut bare = record(11, 2);
    bare.image_url = None;
    bare.category = None;
    bare.created_at = String::new();
    records.push(bare);

    records
}

/// Raw lookup results with deliberate collisions: duplicate codes, duplicate
/// codeless names, and a codeless twin of a code-bearing name.
pub fn sample_search_results() -> Vec<ProductCandidate> {
    vec![
        candidate("Cola 500ml", Some("4901234500017")),
        candidate("Cola 500ml (case of 24)", Some("4901234500017")),
        candidate("Cola 1.5L", Some("4901234500024")),
        candidate("Cola 500ml", None),
        candidate("House Brand Cola", None),
        candidate("House Brand Cola", None),
    ]
}

pub fn candidate(name: &str, code: Option<&str>) -> ProductCandidate {
    ProductCandidate {
        name: name.to_owned(),
        code: code.map(str::to_owned),
        image: Some("https://img.example/candidate.jpg".to_owned()),
        categories: Some("Beverages".to_owned()),
    }
}

/// Reminder-query rows over two shared refrigerators: three items expiring
/// tomorrow relative to [`sample_today`], plus rows the job must skip.
pub fn sample_stocks() -> Vec<StockContext> {
    let kitchen = vec![member(0), member(1)];
    let office = vec![member(1), member(2)];

    let mut skipped_status = record(3, 1);
    skipped_status.status = ItemStatus::Consumed;
    let mut skipped_date = record(4, 1);
    skipped_date.expiry_date = "tomorrow?".to_owned();

    vec![
        StockContext {
            record: record(0, 1),
            refrigerator_name: "Kitchen".to_owned(),
            members: kitchen.clone(),
        },
        StockContext {
            record: record(1, 1),
            refrigerator_name: "Kitchen".to_owned(),
            members: kitchen,
        },
        StockContext {
            record: record(2, 1),
            refrigerator_name: "Office".to_owned(),
            members: office.clone(),
        },
        StockContext {
            record: record(5, 4),
            refrigerator_name: "Office".to_owned(),
            members: office.clone(),
        },
        StockContext {
            record: skipped_status,
            refrigerator_name: "Office".to_owned(),
            members: office.clone(),
        },
        StockContext {
            record: skipped_date,
            refrigerator_name: "Office".to_owned(),
            members: office,
        },
    ]
}

fn member(index: usize) -> RefrigeratorMember {
    RefrigeratorMember {
        user_id: format!("user-{index:02}"),
        display_name: MEMBER_NAMES[index % MEMBER_NAMES.len()].to_owned(),
    }
}
