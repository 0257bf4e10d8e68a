pub mod dns;

pub use dns::{ResolveMessageUseCase, STUB_ADDRESS, STUB_TTL};
