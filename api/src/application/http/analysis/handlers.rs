pub mod analyze;
pub mod method_not_allowed;
