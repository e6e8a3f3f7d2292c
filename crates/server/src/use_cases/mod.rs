//! Use cases orchestrating the icon generation flow.

pub mod generate_icons;

pub use generate_icons::generate_icon_set;
