use pretty_assertions::assert_eq;
use strata::{
    query::{
        priority, CustomFilter, CustomOperator, Finalization, FilterParser, Items, Next,
        Preparation,
    },
    record, Compose, Composer, Filter, FilterItem, Opt, Result,
};

type Log = Vec<String>;

/// Logs its name when finalizing.
struct Named {
    name: &'static str,
    priority: i32,
}

impl<T> Compose<T, Log> for Named {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn finalize(&self, acc: &mut Log, _opts: &[Opt]) -> Result<()> {
        acc.push(self.name.to_string());
        Ok(())
    }
}

/// Consumes every filter item, logging it as `field operator value`.
fn consume_all() -> CustomFilter<Log> {
    CustomFilter::when(
        |_| true,
        |acc: &mut Log, item: FilterItem, _: &[Opt], _: &mut Next<FilterItem>| {
            acc.push(format!("{} {} {:?}", item.field(), item.operator(), item.value()));
            Ok(())
        },
    )
    .with_priority(priority::FINALIZE)
}

fn filter(value: strata::Value) -> Filter {
    Filter::try_from(value).unwrap()
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[test]
fn steps_run_in_priority_order() {
    let composer: Composer<FilterItem, Log> = Composer::new()
        .with(Named { name: "map", priority: 300 })
        .with(Named { name: "parse", priority: 100 })
        .with(Named { name: "also map", priority: 300 });

    let mut log = Log::new();
    composer.finalize(&mut log, &[]).unwrap();

    assert_eq!(log, vec!["parse", "map", "also map"]);
}

#[test]
fn merged_composers_keep_priority_order() {
    let first: Composer<FilterItem, Log> = Composer::new()
        .with(Named { name: "a", priority: 200 })
        .with(Named { name: "b", priority: 800 });
    let second: Composer<FilterItem, Log> = Composer::new().with(Named { name: "c", priority: 500 });

    let merged = first.with_composer(&second);
    assert_eq!(merged.len(), 3);

    let mut log = Log::new();
    merged.finalize(&mut log, &[]).unwrap();
    assert_eq!(log, vec!["a", "c", "b"]);
}

// ---------------------------------------------------------------------------
// Composing
// ---------------------------------------------------------------------------

#[test]
fn parsed_items_reach_later_steps() {
    let composer: Composer<FilterItem, Log> = Composer::new().with(FilterParser).with(consume_all());

    let mut log = Log::new();
    let mut opts = vec![];
    composer
        .compose(&mut log, filter(record! { "age (min)" => 18, "name" => "Ann" }), &mut opts)
        .unwrap();

    assert_eq!(
        log,
        vec![
            r#"age min I64(18)"#.to_string(),
            r#"name  String("Ann")"#.to_string(),
        ]
    );
}

#[test]
fn handler_can_pass_rewritten_item_on() {
    let composer: Composer<FilterItem, Log> = Composer::new()
        .with(CustomFilter::field(
            "name",
            |_: &mut Log, item: FilterItem, _: &[Opt], next: &mut Next<FilterItem>| {
                next.push(item.with_field("title"));
                Ok(())
            },
        ))
        .with(consume_all());

    let mut log = Log::new();
    composer
        .compose(&mut log, vec![FilterItem::new("name", "", "x")], &mut vec![])
        .unwrap();

    assert_eq!(log, vec![r#"title  String("x")"#.to_string()]);
}

#[test]
fn handler_can_split_an_item() {
    let composer: Composer<FilterItem, Log> = Composer::new()
        .with(CustomOperator::new(
            "between",
            |_: &mut Log, item: FilterItem, _: &[Opt], next: &mut Next<FilterItem>| {
                let bounds = item.value().as_list().unwrap_or_default();
                next.push(FilterItem::new(item.field(), "min", bounds[0].clone()));
                next.push(FilterItem::new(item.field(), "max", bounds[1].clone()));
                Ok(())
            },
        ))
        .with(consume_all());

    let mut log = Log::new();
    composer
        .compose(&mut log, vec![FilterItem::new("age", "between", vec![18, 65])], &mut vec![])
        .unwrap();

    assert_eq!(
        log,
        vec!["age min I64(18)".to_string(), "age max I64(65)".to_string()]
    );
}

#[test]
fn unhandled_item_is_an_error() {
    let composer: Composer<FilterItem, Log> = Composer::new().with(FilterParser);

    let err = composer
        .compose(&mut Log::new(), vec![FilterItem::new("age", "", 1)], &mut vec![])
        .unwrap_err();

    assert!(err.is_unsupported_feature());
}

#[test]
fn parse_error_stops_composing() {
    let composer: Composer<FilterItem, Log> = Composer::new()
        .with(FilterParser)
        .with(consume_all())
        .with(Finalization::new(|acc: &mut Log, _: &[Opt]| {
            acc.push("finalized".into());
            Ok(())
        }));

    let mut log = Log::new();
    let err = composer
        .compose(&mut log, filter(record! { "age ((min))" => 1 }), &mut vec![])
        .unwrap_err();

    assert!(err.is_invalid_filter());
    assert!(log.is_empty());
}

#[test]
fn preparation_rewrites_stream_and_options() {
    let composer: Composer<FilterItem, Log> = Composer::new()
        .with(Preparation::<FilterItem>::new(|items, opts| {
            opts.push(strata::opt::flag("prepared").into());
            Ok(Box::new(items.filter(|item| {
                !matches!(item, Ok(item) if item.field() == "internal")
            })) as Items<'_, FilterItem>)
        }))
        .with(consume_all())
        .with(Finalization::new(|acc: &mut Log, opts: &[Opt]| {
            if strata::opt::has_flag(opts, "prepared") {
                acc.push("finalized".into());
            }
            Ok(())
        }));

    let mut log = Log::new();
    let mut opts = vec![];
    composer
        .compose(
            &mut log,
            vec![FilterItem::new("internal", "", 1), FilterItem::new("name", "", 2)],
            &mut opts,
        )
        .unwrap();

    assert_eq!(log, vec!["name  I64(2)".to_string(), "finalized".to_string()]);
    assert_eq!(opts.len(), 1);
}

#[test]
fn apply_is_lazy() {
    let composer: Composer<FilterItem, Log> = Composer::new().with(FilterParser);

    let items: Items<'_, FilterItem> = Box::new(
        vec![FilterItem::new("a (max)", "", 1), FilterItem::new("b ((", "", 2)]
            .into_iter()
            .map(Ok),
    );

    let mut log = Log::new();
    let mut opts = vec![];
    let items = composer.prepare(items, &mut opts).unwrap();
    let mut applied = composer.apply(&mut log, items, &opts);

    let first = applied.next().unwrap().unwrap();
    assert_eq!(first, FilterItem::new("a", "max", 1));
    assert!(applied.next().unwrap().is_err());
    assert!(applied.next().is_none());
}
