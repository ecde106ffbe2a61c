//! Items module
//!
//! Item definitions and the merchant catalog.

pub mod item;
pub mod shop;

pub use item::{templates, Item, ItemKind};
pub use shop::{Shop, ShopError};
