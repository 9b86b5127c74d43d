pub mod filter;
pub mod upsert;
