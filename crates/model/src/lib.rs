pub mod events;
pub mod pagination;
pub mod records;
