//! Newtype IDs and unique id generation.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different collections. Every id is an opaque
//! string of [`ID_LENGTH`] alphanumeric characters.

use std::collections::HashSet;

use rand::Rng;
use rand::distr::Alphanumeric;
use thiserror::Error;

/// Length of every generated identifier.
pub const ID_LENGTH: usize = 10;

/// Upper bound on candidates drawn before giving up.
///
/// With 62^10 possible ids a single retry is already vanishingly rare, so
/// hitting this bound means the existing set is pathological.
pub const MAX_ID_ATTEMPTS: usize = 1_000;

/// Errors from unique id generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// Every candidate drawn collided with an existing id.
    #[error("no unique id found after {0} attempts")]
    Exhausted(usize),
}

/// Generate a random alphanumeric id that is not in `existing`.
///
/// Candidates are drawn uniformly from `[a-zA-Z0-9]` and redrawn on
/// collision, at most [`MAX_ID_ATTEMPTS`] times.
///
/// # Errors
///
/// Returns `IdError::Exhausted` if no fresh candidate turned up.
pub fn generate_id(existing: &HashSet<&str>) -> Result<String, IdError> {
    generate_id_with(&mut rand::rng(), existing)
}

/// [`generate_id`] drawing from the given random source.
///
/// # Errors
///
/// Returns `IdError::Exhausted` if no fresh candidate turned up.
pub fn generate_id_with<R>(rng: &mut R, existing: &HashSet<&str>) -> Result<String, IdError>
where
    R: Rng + ?Sized,
{
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate: String = (0..ID_LENGTH)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect();
        if !existing.contains(candidate.as_str()) {
            return Ok(candidate);
        }
    }
    Err(IdError::Exhausted(MAX_ID_ATTEMPTS))
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Display`
/// - Conversion methods: `new()`, `as_str()`
/// - `generate()`, which picks an id unused by a collection snapshot
///
/// # Example
///
/// ```rust
/// # use tienda_core::define_id;
/// define_id!(WishlistId);
///
/// let taken = [WishlistId::new("abc")];
/// let fresh = WishlistId::generate(&taken).unwrap();
/// assert_ne!(fresh, taken[0]);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing id value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Generate an id that collides with none of `existing`.
            ///
            /// # Errors
            ///
            /// Returns `IdError::Exhausted` if the retry bound is hit.
            pub fn generate<'a, I>(existing: I) -> ::core::result::Result<Self, $crate::IdError>
            where
                I: IntoIterator<Item = &'a Self>,
            {
                let taken: ::std::collections::HashSet<&str> =
                    existing.into_iter().map(Self::as_str).collect();
                $crate::generate_id(&taken).map(Self)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(CartId);
