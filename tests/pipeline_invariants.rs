use standin::pipeline::{QueryEngine, DEFAULT_PAGE_SIZE};
use standin::{FieldValue, Page, Query, Record, SortOrder};

/// 25 products with fully deterministic fields.
///
/// Even indices carry an `alpha` name, odd ones a `beta` name. Prices
/// repeat every five records (five ties per level), and every fourth
/// record starting at 3 has no rating.
fn inventory() -> Vec<Record> {
    (0..25i64)
        .map(|i| {
            let name = if i % 2 == 0 {
                format!("alpha widget {i:02}")
            } else {
                format!("beta widget {i:02}")
            };
            let status = ["active", "inactive", "archived"][(i % 3) as usize];
            let price = (i % 5) * 100 + 50;
            let mut builder = Record::builder(i as u64, FieldValue::from(format!("p-{i:02}")))
                .field("name", name)
                .field("status", status)
                .field("price", price);
            if i % 4 != 3 {
                builder = builder.field("rating", i % 10);
            }
            builder.build()
        })
        .collect()
}

fn engine() -> QueryEngine {
    QueryEngine::new(&["name"])
}

fn ids(page: &Page<Record>) -> Vec<String> {
    page.list
        .iter()
        .filter_map(|r| r.get("id").and_then(FieldValue::as_str).map(str::to_string))
        .collect()
}

#[test]
fn test_pagination_partitions_the_result_set() {
    let records = inventory();
    let engine = engine();

    for page_size in [1u64, 3, 7, 10, 20, 25, 40] {
        let first = engine.run(&records, &Query::new().page(1).page_size(page_size));
        assert_eq!(first.total, 25);
        assert_eq!(first.total_pages, 25u64.div_ceil(page_size));

        let mut seen = Vec::new();
        for page in 1..=first.total_pages {
            let current = engine.run(&records, &Query::new().page(page).page_size(page_size));
            assert_eq!(current.total, 25);
            if page < first.total_pages {
                assert_eq!(current.list.len() as u64, page_size);
            }
            seen.extend(ids(&current));
        }

        let expected: Vec<String> = (0..25).map(|i| format!("p-{i:02}")).collect();
        assert_eq!(seen, expected, "page size {page_size} must partition the set");
    }
}

#[test]
fn test_page_past_the_end_is_empty_but_counted() {
    let records = inventory();
    let page = engine().run(&records, &Query::new().page(99).page_size(10));

    assert!(page.list.is_empty());
    assert_eq!(page.total, 25);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page, 99);
}

#[test]
fn test_zero_page_and_size_fall_back_to_defaults() {
    let records = inventory();
    let page = engine().run(&records, &Query::new().page(0).page_size(0));

    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(page.list.len() as u64, DEFAULT_PAGE_SIZE);
}

#[test]
fn test_each_added_constraint_narrows_the_hits() {
    let records = inventory();
    let engine = engine();

    let all = engine.run(&records, &Query::new()).total;
    let keyword = engine.run(&records, &Query::new().keyword("alpha")).total;
    let filtered = engine
        .run(
            &records,
            &Query::new().keyword("alpha").filter("status", "active"),
        )
        .total;
    let ranged = engine
        .run(
            &records,
            &Query::new()
                .keyword("alpha")
                .filter("status", "active")
                .range("price", 150, 450),
        )
        .total;

    assert_eq!(all, 25);
    assert_eq!(keyword, 13);
    assert_eq!(filtered, 5);
    assert_eq!(ranged, 4);
    assert!(keyword <= all && filtered <= keyword && ranged <= filtered);
}

#[test]
fn test_full_pipeline_yields_the_expected_page() {
    let records = inventory();
    let query = Query::new()
        .keyword("alpha")
        .filter("status", "active")
        .range_from("price", 150)
        .sort("price", SortOrder::Desc)
        .page(2)
        .page_size(2);
    let page = engine().run(&records, &query);

    // hits are p-24 (450), p-18 (350), p-12 (250), p-06 (150)
    assert_eq!(page.total, 4);
    assert_eq!(page.total_pages, 2);
    assert_eq!(ids(&page), vec!["p-12", "p-06"]);
}

#[test]
fn test_sort_orders_hits_and_sinks_missing_values() {
    let records = inventory();
    let engine = engine();

    let asc = engine.run(
        &records,
        &Query::new().sort("rating", SortOrder::Asc).page_size(25),
    );
    let rated: Vec<i64> = asc
        .list
        .iter()
        .filter_map(|r| r.get("rating").and_then(FieldValue::as_i64))
        .collect();
    assert_eq!(rated.len(), 19);
    assert!(rated.windows(2).all(|w| w[0] <= w[1]));

    // records without a rating come last regardless of direction
    let tail = ids(&asc)[19..].to_vec();
    assert_eq!(tail, vec!["p-03", "p-07", "p-11", "p-15", "p-19", "p-23"]);

    let desc = engine.run(
        &records,
        &Query::new().sort("rating", SortOrder::Desc).page_size(25),
    );
    let rated_desc: Vec<i64> = desc
        .list
        .iter()
        .filter_map(|r| r.get("rating").and_then(FieldValue::as_i64))
        .collect();
    assert!(rated_desc.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(ids(&desc)[19..].to_vec(), tail);
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let records = inventory();
    let page = engine().run(
        &records,
        &Query::new().sort("price", SortOrder::Asc).page_size(25),
    );

    // five records share the lowest price; insertion order survives
    assert_eq!(
        ids(&page)[..5].to_vec(),
        vec!["p-00", "p-05", "p-10", "p-15", "p-20"]
    );
}

#[test]
fn test_same_query_twice_returns_identical_pages() {
    let records = inventory();
    let engine = engine();
    let query = Query::new()
        .keyword("widget")
        .sort("price", SortOrder::Desc)
        .page(2)
        .page_size(7);

    let first = engine.run(&records, &query);
    let second = engine.run(&records, &query);
    assert_eq!(first, second);
}

#[test]
fn test_run_leaves_the_source_untouched() {
    let records = inventory();
    let snapshot: Vec<serde_json::Value> = records.iter().map(Record::to_json).collect();

    engine().run(
        &records,
        &Query::new().keyword("beta").sort("price", SortOrder::Desc),
    );

    let after: Vec<serde_json::Value> = records.iter().map(Record::to_json).collect();
    assert_eq!(snapshot, after);
}
