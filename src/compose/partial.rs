//! `partial!`: pre-binds some arguments of a two- or three-argument function.
//!
//! Bound positions take a value, open positions take the `__` placeholder.
//! The result is a closure over the open arguments. Bound values are cloned
//! on every call so the closure stays `Fn`.

/// Fixes some arguments of a function, returning a closure over the rest.
///
/// ```
/// use memokit::partial;
///
/// let subtract = |a: i32, b: i32| a - b;
/// let ten_minus = partial!(subtract, 10, __);
/// let minus_ten = partial!(subtract, __, 10);
/// assert_eq!(ten_minus(3), 7);
/// assert_eq!(minus_ten(3), -7);
/// ```
#[macro_export]
macro_rules! partial {
    // Three arguments
    ($function:expr, __, __, __ $(,)?) => {{
        let function = $function;
        move |first, second, third| function(first, second, third)
    }};
    ($function:expr, __, __, $third:expr $(,)?) => {{
        let function = $function;
        let third = $third;
        move |first, second| function(first, second, ::std::clone::Clone::clone(&third))
    }};
    ($function:expr, __, $second:expr, __ $(,)?) => {{
        let function = $function;
        let second = $second;
        move |first, third| function(first, ::std::clone::Clone::clone(&second), third)
    }};
    ($function:expr, $first:expr, __, __ $(,)?) => {{
        let function = $function;
        let first = $first;
        move |second, third| function(::std::clone::Clone::clone(&first), second, third)
    }};
    ($function:expr, __, $second:expr, $third:expr $(,)?) => {{
        let function = $function;
        let second = $second;
        let third = $third;
        move |first| {
            function(
                first,
                ::std::clone::Clone::clone(&second),
                ::std::clone::Clone::clone(&third),
            )
        }
    }};
    ($function:expr, $first:expr, __, $third:expr $(,)?) => {{
        let function = $function;
        let first = $first;
        let third = $third;
        move |second| {
            function(
                ::std::clone::Clone::clone(&first),
                second,
                ::std::clone::Clone::clone(&third),
            )
        }
    }};
    ($function:expr, $first:expr, $second:expr, __ $(,)?) => {{
        let function = $function;
        let first = $first;
        let second = $second;
        move |third| {
            function(
                ::std::clone::Clone::clone(&first),
                ::std::clone::Clone::clone(&second),
                third,
            )
        }
    }};
    ($function:expr, $first:expr, $second:expr, $third:expr $(,)?) => {{
        let function = $function;
        let first = $first;
        let second = $second;
        let third = $third;
        move || {
            function(
                ::std::clone::Clone::clone(&first),
                ::std::clone::Clone::clone(&second),
                ::std::clone::Clone::clone(&third),
            )
        }
    }};

    // Two arguments
    ($function:expr, __, __ $(,)?) => {{
        let function = $function;
        move |first, second| function(first, second)
    }};
    ($function:expr, __, $second:expr $(,)?) => {{
        let function = $function;
        let second = $second;
        move |first| function(first, ::std::clone::Clone::clone(&second))
    }};
    ($function:expr, $first:expr, __ $(,)?) => {{
        let function = $function;
        let first = $first;
        move |second| function(::std::clone::Clone::clone(&first), second)
    }};
    ($function:expr, $first:expr, $second:expr $(,)?) => {{
        let function = $function;
        let first = $first;
        let second = $second;
        move || {
            function(
                ::std::clone::Clone::clone(&first),
                ::std::clone::Clone::clone(&second),
            )
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_partial_two_args() {
        let divide = |a: f64, b: f64| a / b;

        let halve = partial!(divide, __, 2.0);
        let reciprocal = partial!(divide, 1.0, __);
        let thunk = partial!(divide, 9.0, 3.0);
        let same = partial!(divide, __, __);

        assert_eq!(halve(10.0), 5.0);
        assert_eq!(reciprocal(4.0), 0.25);
        assert_eq!(thunk(), 3.0);
        assert_eq!(same(8.0, 2.0), 4.0);
    }

    #[test]
    fn test_partial_three_args() {
        let join = |a: &str, b: &str, c: &str| format!("{a}-{b}-{c}");

        assert_eq!(partial!(join, "x", __, __)("y", "z"), "x-y-z");
        assert_eq!(partial!(join, __, "y", __)("x", "z"), "x-y-z");
        assert_eq!(partial!(join, __, __, "z")("x", "y"), "x-y-z");
        assert_eq!(partial!(join, "x", "y", __)("z"), "x-y-z");
        assert_eq!(partial!(join, "x", __, "z")("y"), "x-y-z");
        assert_eq!(partial!(join, __, "y", "z")("x"), "x-y-z");
        assert_eq!(partial!(join, "x", "y", "z")(), "x-y-z");
    }

    #[test]
    fn test_partial_clones_owned_values() {
        let greet = |greeting: String, name: &str| format!("{greeting}, {name}!");
        let hello = partial!(greet, String::from("Hello"), __);

        assert_eq!(hello("Ada"), "Hello, Ada!");
        assert_eq!(hello("Bob"), "Hello, Bob!");
    }
}
