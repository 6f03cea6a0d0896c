//! Item listing service: CRUD, search, owner views and comments.

mod service;
mod view;

#[cfg(test)]
mod tests;

pub use service::ItemService;
pub use view::{BookingRef, ItemView};
