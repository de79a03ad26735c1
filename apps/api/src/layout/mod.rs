// Document layout primitives: font metrics, word wrap, colour tables and the
// cursor-driven page composer. Layout is CPU-bound and synchronous; callers
// on the async side run it inside tokio::task::spawn_blocking.

pub mod canvas;
pub mod font_metrics;
pub mod palette;
pub mod wrap;

// Re-export the public API consumed by the renderers.
pub use font_metrics::{default_page_config, PageConfig};
