// Shared helpers: constants, storage, token decoding

pub mod constants;
pub mod jwt;
pub mod storage;

pub use constants::*;
pub use jwt::{decode_token, TokenClaims};
pub use storage::{KeyValueStore, LocalStorage, MemoryStorage};
