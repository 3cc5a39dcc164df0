//! OpenGL backend for [glint](https://crates.io/crates/glint).
//!
//! This crate exports an [OpenGL](https://www.khronos.org/opengl/) backend type, [`GL41`], which
//! implements the shader backend interface of glint on top of a core-profile OpenGL 4.1 context.
//! The context itself must be created and made current by something else (a windowing crate, for
//! instance) before the backend is acquired with [`GL41::new`].

#![deny(missing_docs)]

pub mod gl41;

pub use gl41::GL41;
