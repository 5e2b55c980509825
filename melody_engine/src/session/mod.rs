pub mod coordinator;
pub mod phase;
pub mod result;
