//! Key Derivation Module
//!
//! Turns call arguments into cache keys.

use anyhow::Context;
use serde::Serialize;

/// Boxed, fallible key function shared by both memoizer flavours.
pub type KeyFn<A> = Box<dyn Fn(&A) -> anyhow::Result<String> + Send + Sync>;

// == Serialized Key ==
/// Default key: the JSON serialization of the argument value.
///
/// Tuples serialize as arrays, so the arguments `(1, "x")` produce `[1,"x"]`.
pub fn serialized_key<A: Serialize + ?Sized>(args: &A) -> anyhow::Result<String> {
    serde_json::to_string(args).context("failed to serialize call arguments")
}

/// Key function using [`serialized_key`].
pub fn default_key_fn<A>() -> KeyFn<A>
where
    A: Serialize + 'static,
{
    Box::new(|args: &A| serialized_key(args))
}

/// Lifts an infallible key function into a [`KeyFn`].
pub fn infallible_key_fn<A, K>(key_fn: K) -> KeyFn<A>
where
    A: 'static,
    K: Fn(&A) -> String + Send + Sync + 'static,
{
    Box::new(move |args: &A| Ok(key_fn(args)))
}
