//! Pipeline properties checked over seeded random collections.

use std::collections::HashSet;

use datagrid_lib::QueryAction;
use datagrid_lib::QueryState;
use datagrid_lib::column::Column;
use datagrid_lib::column::ColumnRegistry;
use datagrid_lib::column::RowIdAccessor;
use datagrid_lib::compare::compare;
use datagrid_lib::evaluate;
use datagrid_lib::filter::FilterType;
use datagrid_lib::model::Record;
use datagrid_lib::model::Row;
use datagrid_lib::model::Value;
use datagrid_lib::sort::Direction;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

const CITIES: [&str; 5] = ["Agra", "Delhi", "Goa", "Pune", "Surat"];

fn random_rows(seed: u64, count: usize) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let mut record = Record::new()
                .set("id", i)
                .set("city", CITIES[rng.random_range(0..CITIES.len())])
                .set("active", rng.random_bool(0.5));
            // some ages are missing
            if rng.random_bool(0.8) {
                record.insert("age", rng.random_range(18i64..60));
            }
            record
        })
        .collect()
}

fn columns() -> ColumnRegistry<Record> {
    ColumnRegistry::new([
        Column::new("city").path("city").filter_type(FilterType::Select),
        Column::new("age").path("age").filter_type(FilterType::Number),
        Column::new("active").path("active").filter_type(FilterType::Boolean),
    ])
    .unwrap()
}

fn row_id() -> RowIdAccessor<Record> {
    RowIdAccessor::path("id").unwrap()
}

fn ids(rows: &[&Record]) -> Vec<String> {
    rows.iter().map(|r| r.field("id").to_string()).collect()
}

fn query(actions: Vec<QueryAction>) -> QueryState {
    let columns = columns();
    actions
        .into_iter()
        .fold(QueryState::new(7), |state, action| state.reduce(action, &columns))
}

#[test]
fn test_evaluate_is_idempotent() {
    let rows = random_rows(1, 60);
    let columns = columns();
    let q = query(vec![
        QueryAction::set_filter("active", true),
        QueryAction::toggle_sort("city"),
        QueryAction::toggle_sort("age"),
        QueryAction::SetPage { page: 1 },
    ]);

    let first = evaluate(&rows, &columns, &row_id(), &q);
    let second = evaluate(&rows, &columns, &row_id(), &q);
    assert_eq!(ids(first.filtered_rows()), ids(second.filtered_rows()));
    assert_eq!(first.page_row_ids(), second.page_row_ids());
}

#[test]
fn test_filters_intersect() {
    let columns = columns();
    for seed in 0..20 {
        let rows = random_rows(seed, 80);
        let both = query(vec![
            QueryAction::set_filter("city", "Goa"),
            QueryAction::set_filter("active", "yes"),
        ]);
        let city = query(vec![QueryAction::set_filter("city", "Goa")]);
        let active = query(vec![QueryAction::set_filter("active", "yes")]);

        let both = ids(evaluate(&rows, &columns, &row_id(), &both).filtered_rows());
        let city: HashSet<String> =
            ids(evaluate(&rows, &columns, &row_id(), &city).filtered_rows()).into_iter().collect();
        let active: HashSet<String> =
            ids(evaluate(&rows, &columns, &row_id(), &active).filtered_rows()).into_iter().collect();

        for id in &both {
            assert!(city.contains(id) && active.contains(id), "seed {}: row {}", seed, id);
        }
        assert_eq!(both.len(), city.intersection(&active).count());
    }
}

#[test]
fn test_sort_is_stable() {
    let rows = random_rows(7, 100);
    let columns = columns();
    let q = query(vec![QueryAction::toggle_sort("city")]);
    let view = evaluate(&rows, &columns, &row_id(), &q);

    // within one city, ids keep their input (ascending) order
    for city in CITIES {
        let in_city: Vec<i64> = view
            .filtered_rows()
            .iter()
            .filter(|r| r.field("city") == Value::from(city))
            .filter_map(|r| match r.field("id") {
                Value::Int(i) => Some(i),
                _ => None,
            })
            .collect();
        assert!(in_city.windows(2).all(|w| w[0] < w[1]), "{}: {:?}", city, in_city);
    }
}

#[test]
fn test_numeric_sort_is_non_decreasing() {
    let columns = columns();
    for seed in 0..20 {
        let rows = random_rows(seed, 50);
        let q = query(vec![QueryAction::toggle_sort("age")]);
        let view = evaluate(&rows, &columns, &row_id(), &q);

        let ages: Vec<Value> = view.filtered_rows().iter().map(|r| r.field("age")).collect();
        assert!(
            ages.windows(2)
                .all(|w| compare(&w[0], &w[1], Direction::Asc).is_le()),
            "seed {}: {:?}",
            seed,
            ages
        );
        // missing ages come after every number
        if let Some(first_null) = ages.iter().position(Value::is_null) {
            assert!(ages[first_null..].iter().all(Value::is_null));
        }
    }
}

#[test]
fn test_pages_cover_filtered_rows_exactly_once() {
    let columns = columns();
    for seed in 0..10 {
        let rows = random_rows(seed, 53);
        let base = query(vec![
            QueryAction::set_filter("active", true),
            QueryAction::set_sort("age", Direction::Desc),
        ]);
        let full = evaluate(&rows, &columns, &row_id(), &base);

        let mut paged = Vec::new();
        for page in 0..full.page_count() {
            let q = base
                .with_total(full.total())
                .reduce(QueryAction::SetPage { page }, &columns);
            paged.extend(evaluate(&rows, &columns, &row_id(), &q).page_row_ids().to_vec());
        }

        assert_eq!(paged, ids(full.filtered_rows()), "seed {}", seed);
    }
}

#[test]
fn test_narrowing_filter_clamps_page() {
    let rows = random_rows(3, 200);
    let columns = columns();
    let q = query(vec![]).with_total(rows.len()).reduce(QueryAction::LastPage, &columns);
    assert!(q.pagination().page() > 0);

    let narrowed = q.reduce(QueryAction::set_filter("city", "Agra"), &columns);
    let view = evaluate(&rows, &columns, &row_id(), &narrowed);
    assert!(view.pagination().page() <= view.page_count().saturating_sub(1));

    // a stale page index is clamped by evaluate too
    let stale = narrowed.with_total(rows.len()).reduce(QueryAction::LastPage, &columns);
    let view = evaluate(&rows, &columns, &row_id(), &stale);
    assert_eq!(view.pagination().page(), view.page_count().saturating_sub(1));
}

#[test]
fn test_selection_survives_filtering() {
    let rows = random_rows(11, 40);
    let columns = columns();
    let target = rows
        .iter()
        .find(|r| r.field("city") == Value::from("Pune"))
        .map(|r| r.field("id").to_string())
        .unwrap();

    let q = query(vec![QueryAction::toggle_row(target.clone(), true)]);
    let filtered = q.reduce(QueryAction::set_filter("city", "Pune"), &columns);
    assert!(filtered.selection().is_selected(&target));

    let excluded = filtered.reduce(QueryAction::set_filter("city", "Goa"), &columns);
    assert!(excluded.selection().is_selected(&target));

    let cleared = excluded.reduce(QueryAction::ClearFilters, &columns);
    assert!(cleared.selection().is_selected(&target));
}

#[test]
fn test_select_all_touches_current_page_only() {
    let rows = random_rows(5, 30);
    let columns = columns();
    let q = query(vec![]).with_total(rows.len());

    let first_page = evaluate(&rows, &columns, &row_id(), &q).page_row_ids().to_vec();
    let q = q.reduce(QueryAction::toggle_row(first_page[0].clone(), true), &columns);

    let q = q.reduce(QueryAction::NextPage, &columns);
    let second_page = evaluate(&rows, &columns, &row_id(), &q).page_row_ids().to_vec();
    let q = q.reduce(QueryAction::toggle_all_on_page(true, second_page.clone()), &columns);

    for id in &first_page[1..] {
        assert!(!q.selection().is_selected(id));
    }
    assert!(q.selection().is_selected(&first_page[0]));

    let q = q.reduce(QueryAction::toggle_all_on_page(false, second_page), &columns);
    assert_eq!(q.selection().selected_ids(), vec![first_page[0].clone()]);
}
