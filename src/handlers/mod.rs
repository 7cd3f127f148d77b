//! Route handlers: one function per route descriptor.

pub mod init;
pub mod schema;
pub mod users;
