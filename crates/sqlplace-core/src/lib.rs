//! Core library for sqlplace.
//!
//! Builds literal SQL from a template with typed placeholders and an ordered
//! list of arguments, without a server-side prepared statement. Because the
//! result is plain text, identifiers, tuples and `SET` lists can be bound too:
//!
//! ```
//! use sqlplace_core::{args, Binder, Value};
//!
//! let binder = Binder::new();
//! let sql = binder
//!     .bind(
//!         "INSERT INTO ?f SET ?A[\"?s\", ?i]",
//!         args!["test", Value::map([("name", "Joseph"), ("age", "56")])],
//!     )
//!     .unwrap();
//! assert_eq!(sql, "INSERT INTO `test` SET `name` = \"Joseph\",`age` = 56");
//! ```
//!
//! The pipeline per placeholder is [`scanner`] → [`value::classify`] →
//! [`coerce`] → [`escape`] (or the array expander for `?a`/`?A`), spliced back by
//! [`template::Template`]. Connections, character sets and result sets are the
//! driver's business; the driver only lends its escape primitive through
//! [`escape::EscapeString`].

pub mod binder;
pub mod coerce;
pub mod config;
pub mod error;
pub mod escape;
mod expand;
pub mod mode;
pub mod scanner;
pub mod template;
pub mod value;


pub use binder::Binder;
pub use config::BinderConfig;
pub use error::{BindError, Result};
pub use escape::{EscapeString, MysqlEscaper};
pub use mode::Mode;
pub use value::Value;

/// Build a `Vec<Value>` from heterogeneous Rust values.
///
/// ```
/// use sqlplace_core::{args, Value};
///
/// let list = args![1, "two", 3.5, None::<i32>, vec![4, 5]];
/// assert_eq!(list[3], Value::Null);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}
