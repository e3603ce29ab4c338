/// Builds a [`Value::Record`](crate::Value::Record) from `field => value` pairs.
#[macro_export]
macro_rules! record {
    () => {
        $crate::Value::Record($crate::Record::new())
    };
    (
        $( $field:expr => $value:expr ),+ $(,)?
    ) => {
        $crate::Value::Record(
            [ $( ($field, $crate::Value::from($value)), )+ ]
                .into_iter()
                .collect::<$crate::Record>(),
        )
    };
}
