//! PPTX (Office Open XML) writer for markdown-generated slide decks.
//!
//! A [`Deck`] renders parsed slides with fixed layouts built from explicit
//! shapes and packages them as a .pptx ZIP archive.

pub mod deck;
pub mod layout;
pub mod palette;
mod parts;
pub mod shapes;
pub mod slide;
pub mod template;
pub mod units;
mod xml;

pub use deck::Deck;
pub use layout::Layout;
pub use palette::{Palette, Rgb};
pub use slide::Slide;
pub use template::Template;
pub use units::{inches, points, Emu, SlideSize};
