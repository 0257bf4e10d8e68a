mod resolve_message;

pub use resolve_message::{ResolveMessageUseCase, STUB_ADDRESS, STUB_TTL};
