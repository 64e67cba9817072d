//! # sqlweave - comment-driven dynamic SQL templating
//!
//! Interprets a small directive language embedded in SQL comments and
//! rewrites a raw template plus a parameter map into final, injection-safe
//! SQL with a positional bind list:
//!
//! - `/*BEGIN*/ ... /*END*/` - a conditional block scope
//! - `/*IF condition*/ ... /*END*/` - lines gated by a boolean condition
//! - `/*name*/literal` - a bind marker whose literal is replaced by `?`
//!
//! Parameter values are only ever bound positionally; they never enter the
//! SQL text. All other SQL is treated as opaque.
//!
//! ```
//! use sqlweave::{parse, Params};
//!
//! let sql = "\
//! SELECT * FROM users
//! /*BEGIN*/
//! WHERE 1=1
//! /*IF id != null*/
//! AND id = /*id*/1
//! /*END*/
//! /*END*/
//! ";
//!
//! let parsed = parse(sql, &Params::new().set("id", 42))?;
//! assert_eq!(parsed.sql(), "SELECT * FROM users WHERE 1=1 AND id = ?");
//!
//! let parsed = parse(sql, &Params::new())?;
//! assert_eq!(parsed.sql(), "SELECT * FROM users WHERE 1=1");
//! # Ok::<(), sqlweave::TemplateError>(())
//! ```

pub mod condition;
pub mod engine;
pub mod error;
pub mod loader;
pub mod params;
pub mod parsed;
pub mod processor;
pub mod resolver;
pub mod value;

pub use engine::{parse, parse_file, parse_lenient};
pub use error::{TemplateError, TemplateResult};
pub use params::Params;
pub use parsed::{CommandType, ParsedSql};
pub use value::ParamValue;

pub mod prelude {
    pub use crate::engine::{parse, parse_file, parse_lenient};
    pub use crate::error::{TemplateError, TemplateResult};
    pub use crate::params::Params;
    pub use crate::parsed::{CommandType, ParsedSql};
    pub use crate::resolver::Resolver;
    pub use crate::value::ParamValue;
}
