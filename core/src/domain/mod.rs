pub mod common;
pub mod lactose_analysis;
