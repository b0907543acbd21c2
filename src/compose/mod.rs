//! Compose Module
//!
//! Function combinators. All of them are macros exported at the crate root:
//!
//! - [`pipe!`](crate::pipe): apply functions to a value left to right
//! - [`compose!`](crate::compose): build a closure applying functions right to left
//! - [`partial!`](crate::partial): pre-bind arguments with `__` placeholders
//! - [`curry2!`](crate::curry2), [`curry3!`](crate::curry3): curried closures

mod curry;
mod partial;
mod pipe;
