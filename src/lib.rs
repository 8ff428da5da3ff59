//! loglit - highlight log lines in the terminal
//!
//! Lines are matched against layered rule sets (built-in rules, a
//! lower-cased fallback of their keywords, and user rules) and decorated
//! with the escape sequences of a theme.
//!
//! ```
//! use loglit::config::Config;
//! use loglit::syntax::{builtin, Renderer};
//!
//! let renderer = Renderer::new(Config::default(), builtin::default_theme()).unwrap();
//! let out = renderer.render("INFO started").unwrap();
//! assert!(out.contains("\x1b["));
//! assert_eq!(renderer.render("nothing to see").unwrap(), "nothing to see");
//! ```

pub mod config;
pub mod error;
pub mod syntax;

pub use config::Config;
pub use error::{HighlightError, Result};
pub use syntax::Renderer;
