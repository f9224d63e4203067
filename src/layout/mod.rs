//! Backend-independent layout primitives: greedy line wrapping and the
//! vertical cursor that decides page breaks.

mod cursor;
mod wrap;

pub use cursor::{LayoutCursor, PageBreak};
pub use wrap::{ELLIPSIS, truncate_with_ellipsis, wrap_text};
