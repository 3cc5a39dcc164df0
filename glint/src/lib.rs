//! # A minimal, type-safe shader program building crate
//!
//! glint is a small library that does exactly one thing: it takes a vertex shader source and a
//! fragment shader source, compiles both stages, links them into an executable GPU program and
//! reports full driver diagnostics when anything goes wrong. Everything else — opening windows,
//! decoding images, uploading geometry, issuing draw calls — is deliberately left to the caller.
//!
//! The library is split in two layers:
//!
//! - A _frontend_, living in this crate: the [`Stage`] and [`Program`] types in the
//!   [`shader`] module, along with the error taxonomy. Those types are backend-agnostic and own
//!   their GPU-side objects, releasing them when dropped.
//! - A _backend interface_, the [`Shader`] trait in the [`backend`] module, implemented by
//!   backend crates (e.g. an OpenGL implementation) and by test fakes.
//!
//! Backends are reached through an object implementing [`GraphicsContext`], which wraps whatever
//! resource represents an active graphics context on the current thread.
//!
//! A [`Program`] is either fully linked and usable, or it does not exist: every failure path
//! releases the intermediate stage objects before returning, so a failed build leaks nothing.
//!
//! [`Stage`]: crate::shader::Stage
//! [`Program`]: crate::shader::Program
//! [`Shader`]: crate::backend::shader::Shader
//! [`GraphicsContext`]: crate::context::GraphicsContext

#![deny(missing_docs)]

pub mod backend;
pub mod context;
pub mod shader;
