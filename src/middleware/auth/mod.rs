pub mod access;
mod bearer;
mod context;
mod error;

pub use context::RequestContext;
