#[macro_use]
mod card;

pub use card::*;
