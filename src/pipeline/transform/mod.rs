//! Email style transforms.
//!
//! Each transform rewrites one kind of element in an owned [`Fragment`].
//! Email clients ignore `<style>` blocks inside content, so every style is
//! written inline.
//!
//! # Modules
//!
//! - `media`: Absolutizes `img` sources and makes images responsive
//! - `block`: Accent borders on `hr` and `blockquote`
//! - `link`: Accent color and underline on `a`
//!
//! [`Fragment`]: crate::vdom::Fragment

mod block;
mod link;
mod media;

pub use block::BlockTransform;
pub use link::LinkTransform;
pub use media::MediaTransform;
