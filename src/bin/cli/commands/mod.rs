pub mod card;
pub mod category;
pub mod data;
pub mod study;
pub mod theme;
