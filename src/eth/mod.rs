pub mod primitives;
pub mod storage;
