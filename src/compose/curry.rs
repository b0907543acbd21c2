//! `curry2!` and `curry3!`: turn a multi-argument function into a chain of
//! single-argument closures.
//!
//! The function is shared through an `Rc` so every stage can be called more
//! than once; arguments captured by an earlier stage must be `Clone`.

/// Curries a two-argument function.
///
/// ```
/// use memokit::curry2;
///
/// let add = curry2!(|a: i32, b: i32| a + b);
/// let add_five = add(5);
/// assert_eq!(add_five(1), 6);
/// assert_eq!(add_five(2), 7);
/// ```
#[macro_export]
macro_rules! curry2 {
    ($function:expr $(,)?) => {{
        let function = ::std::rc::Rc::new($function);
        move |first| {
            let function = ::std::rc::Rc::clone(&function);
            move |second| function(::std::clone::Clone::clone(&first), second)
        }
    }};
}

/// Curries a three-argument function.
#[macro_export]
macro_rules! curry3 {
    ($function:expr $(,)?) => {{
        let function = ::std::rc::Rc::new($function);
        move |first| {
            let function = ::std::rc::Rc::clone(&function);
            move |second| {
                let function = ::std::rc::Rc::clone(&function);
                let first = ::std::clone::Clone::clone(&first);
                move |third| {
                    function(
                        ::std::clone::Clone::clone(&first),
                        ::std::clone::Clone::clone(&second),
                        third,
                    )
                }
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_curry2() {
        let multiply = curry2!(|a: i32, b: i32| a * b);

        let triple = multiply(3);
        assert_eq!(triple(4), 12);
        assert_eq!(triple(5), 15);
        assert_eq!(multiply(2)(21), 42);
    }

    #[test]
    fn test_curry3_stages_are_reusable() {
        let volume = curry3!(|l: u32, w: u32, h: u32| l * w * h);

        let base = volume(2)(3);
        assert_eq!(base(4), 24);
        assert_eq!(base(10), 60);
        assert_eq!(volume(1)(1)(1), 1);
    }

    #[test]
    fn test_curry_with_owned_arguments() {
        let label = curry2!(|prefix: String, n: u32| format!("{prefix}{n}"));

        let item = label("item-".to_string());
        assert_eq!(item(1), "item-1");
        assert_eq!(item(2), "item-2");
    }

    #[test]
    fn test_curry_composes_with_pipe() {
        let add = curry2!(|a: i32, b: i32| a + b);
        assert_eq!(crate::pipe!(1, add(10), add(100)), 111);
    }
}
