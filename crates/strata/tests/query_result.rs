use pretty_assertions::assert_eq;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use strata::{Error, QueryResult, Record, Value};

fn meta(count: i64) -> Record {
    [("count", count)].into_iter().collect()
}

#[test]
fn lazy_meta_is_computed_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let result = QueryResult::new(vec![1, 2, 3]).with_lazy_meta(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(meta(42))
    });

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(result.total().unwrap(), Some(42));
    assert_eq!(result.meta().unwrap(), &meta(42));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn failing_meta_keeps_failing() {
    let result = QueryResult::<Value>::empty()
        .with_lazy_meta(|| Err(Error::unsupported_feature("counting")));

    assert!(result.meta().unwrap_err().is_unsupported_feature());
    assert!(result.total().unwrap_err().is_unsupported_feature());
}

#[test]
fn missing_meta_is_empty() {
    let result = QueryResult::from_vec(vec!["a"]);
    assert!(result.meta().unwrap().is_empty());
    assert_eq!(result.total().unwrap(), None);
}

#[test]
fn adapters_are_lazy_and_keep_meta() {
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();

    let result = QueryResult::new(1..=6)
        .with_meta(meta(6))
        .map(move |n| {
            counter.fetch_add(1, Ordering::SeqCst);
            n * 10
        })
        .filter(|n| n % 20 == 0);

    assert_eq!(seen.load(Ordering::SeqCst), 0);
    assert_eq!(result.total().unwrap(), Some(6));
    assert_eq!(result.into_vec().unwrap(), vec![20, 40, 60]);
    assert_eq!(seen.load(Ordering::SeqCst), 6);
}

#[test]
fn errors_pass_through_adapters() {
    let result = QueryResult::from_results(vec![Ok(1), Err(Error::lookup("gone")), Ok(3)])
        .try_map(|n| Ok(n + 1))
        .filter(|n| *n > 10);

    let items: Vec<_> = result.collect();
    assert_eq!(items.len(), 1);
    assert!(items[0].as_ref().unwrap_err().is_lookup());
}

#[test]
fn first_item() {
    assert_eq!(QueryResult::new(vec!["a", "b"]).first().unwrap(), Some("a"));
    assert_eq!(QueryResult::<Value>::empty().first().unwrap(), None);
}

#[test]
fn collecting_stops_at_error() {
    let result = QueryResult::from_results(vec![Ok(1), Err(Error::lookup("gone"))]);
    assert!(result.into_vec().is_err());
}
