//! `pipe!` and `compose!`: left-to-right application and right-to-left
//! composition.

/// Applies functions to a value from left to right.
///
/// `pipe!(x, f, g, h)` evaluates to `h(g(f(x)))`.
///
/// ```
/// use memokit::pipe;
///
/// let double = |x: i32| x * 2;
/// let add_one = |x: i32| x + 1;
/// assert_eq!(pipe!(5, double, add_one), 11);
/// ```
#[macro_export]
macro_rules! pipe {
    ($value:expr $(,)?) => {
        $value
    };

    ($value:expr, $function:expr $(, $rest:expr)* $(,)?) => {
        $crate::pipe!($function($value) $(, $rest)*)
    };
}

/// Composes functions from right to left into a single closure.
///
/// `compose!(f, g, h)` is the closure `|x| f(g(h(x)))`.
///
/// ```
/// use memokit::compose;
///
/// let double = |x: i32| x * 2;
/// let add_one = |x: i32| x + 1;
/// let add_then_double = compose!(double, add_one);
/// assert_eq!(add_then_double(5), 12);
/// ```
#[macro_export]
macro_rules! compose {
    ($function:expr $(,)?) => {
        $function
    };

    ($outer:expr, $($inner:expr),+ $(,)?) => {{
        let outer = $outer;
        let inner = $crate::compose!($($inner),+);
        move |input| outer(inner(input))
    }};
}
