//! Backend interfaces.
//!
//! A backend is a type implementing the traits found in this module, giving the frontend types
//! (such as [`Program`]) access to a concrete graphics API. Backends live in their own crates;
//! this module only defines the contract they must satisfy.
//!
//! [`Program`]: crate::shader::Program

pub mod shader;
