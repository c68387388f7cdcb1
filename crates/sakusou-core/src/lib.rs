#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Core helpers shared across the sakusou crates.
//!
//! This crate holds the pieces that every other sakusou crate leans on:
//!
//! - **Key-case conversion** between `snake_case` and `camelCase` via
//!   [`str_to_camel_case`] and [`str_to_snake_case`], plus the [`KeyCase`]
//!   selector used by API clients when re-keying request bodies
//! - **File persistence** of JSON and YAML documents via the [`io`] module
//!
//! # Examples
//!
//! ```rust
//! use sakusou_core::prelude::*;
//!
//! assert_eq!(str_to_camel_case("user_id"), "userId");
//! assert_eq!(str_to_snake_case("userId"), "user_id");
//! assert_eq!("snake".parse::<KeyCase>().unwrap(), KeyCase::Snake);
//! ```

pub mod case;
pub mod error;
pub mod io;

pub use case::{KeyCase, str_to_camel_case, str_to_snake_case};
pub use error::{CoreError, Result};

/// Convenient re-exports of commonly used items.
///
/// ```rust
/// use sakusou_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::case::{KeyCase, str_to_camel_case, str_to_snake_case};
    pub use crate::error::{CoreError, Result};
    pub use crate::io::{read_json, read_yaml, write_json, write_yaml};
}
