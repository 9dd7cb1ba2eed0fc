pub mod adapter;
mod row;
