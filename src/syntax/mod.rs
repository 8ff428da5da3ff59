//! Highlight-layer engine
//!
//! Lines are matched against several rule sets, each producing one layer
//! of styled spans. Layers are stacked in priority order and the result is
//! written out with terminal escape sequences.

mod style;
mod theme;
mod rules;
mod layer;
mod matcher;
mod renderer;
pub mod builtin;

pub use style::{reset_code, Color, ResolvedStyle, Style};
pub use theme::Theme;
pub use rules::{is_valid_keyword, Rule, RuleSet};
pub use layer::{stack, stack_all, Layer, Span};
pub use matcher::Matcher;
pub use renderer::{render_layer, Renderer};
