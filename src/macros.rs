/// Builds a [`Value`](crate::Value) tree from JSON-like syntax.
///
/// # Examples
///
/// ```rust
/// use jsonemit::tree;
///
/// let data = tree!({
///     "name": "Alice",
///     "age": 30,
///     "tags": ["rust", "json"],
///     "extra": null
/// });
/// assert!(data.is_object());
/// ```
#[macro_export]
macro_rules! tree {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::tree!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::tree!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Any other expression goes through the From conversions.
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
