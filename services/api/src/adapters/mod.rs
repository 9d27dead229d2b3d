pub mod email;
pub mod push;
pub mod storage;
