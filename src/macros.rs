/// Builds a [`Value`](crate::Value) tree from a JSON-like literal.
///
/// Negative numeric literals may appear anywhere a value is expected. Any
/// other single-token expression is converted with `Value::from`.
///
/// ```rust
/// use tree_coding::{tree, Value};
///
/// let value = tree!({ "name": "Alice", "tags": ["a", "b"], "manager": null });
/// assert!(value.is_map());
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
        $crate::Value::Sequence(vec![])
    };

    ([ $($elems:tt)+ ]) => {
        $crate::tree!(@seq [] $($elems)+)
    };

    ({}) => {
        $crate::Value::Map($crate::Map::new())
    };

    ({ $($entries:tt)+ }) => {{
        let mut map = $crate::Map::new();
        $crate::tree!(@map map $($entries)+);
        $crate::Value::Map(map)
    }};

    // Elements are munched one at a time so `-1` can be taken as one value.
    (@seq [$($out:expr),*]) => {
        $crate::Value::Sequence(vec![$($out),*])
    };

    (@seq [$($out:expr),*] - $n:literal $(, $($rest:tt)*)?) => {
        $crate::tree!(@seq [$($out,)* $crate::Value::from(-$n)] $($($rest)*)?)
    };

    (@seq [$($out:expr),*] $elem:tt $(, $($rest:tt)*)?) => {
        $crate::tree!(@seq [$($out,)* $crate::tree!($elem)] $($($rest)*)?)
    };

    (@map $map:ident) => {};

    (@map $map:ident $key:literal : - $n:literal $(, $($rest:tt)*)?) => {
        $map.insert($key.to_string(), $crate::Value::from(-$n));
        $crate::tree!(@map $map $($($rest)*)?);
    };

    (@map $map:ident $key:literal : $value:tt $(, $($rest:tt)*)?) => {
        $map.insert($key.to_string(), $crate::tree!($value));
        $crate::tree!(@map $map $($($rest)*)?);
    };

    ($s:expr) => {
        $crate::Value::from($s)
    };
}
