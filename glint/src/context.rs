//! Graphics context.
//!
//! A graphics context is an object that abstracts all the low-level operations that happen on a
//! graphics device (it can be a GPU or a software implementation, for instance).
//!
//! This crate doesn’t provide you with creating such contexts. Instead, you must do it yourself
//! or rely on crates doing it for you, such as windowing crates.
//!
//! # On contexts and threads
//!
//! This crate is designed to work with the following principles:
//!
//!   - An object which type implements [`GraphicsContext`] must be `!Send` and `!Sync`. This
//!     enforces that it cannot be moved nor shared between threads, because the underlying
//!     graphics context is bound to the thread it was made current on.
//!   - You can only create a single context per thread. Doing otherwise is undefined behavior.
//!   - If you want `n` contexts, you need `n` threads.
//!
//! Compiling and linking shaders through a context are blocking, synchronous operations; a build
//! either completes or fails within the same call and there is nothing to cancel.

/// Class of graphics context.
///
/// Such a context must not be [`Send`] nor [`Sync`], which means that you cannot share it between
/// threads in any way (move / borrow).
///
/// # Safety
///
/// Implementations must guarantee that the wrapped backend refers to a graphics context that is
/// current on the calling thread for the whole lifetime of the value.
pub unsafe trait GraphicsContext {
  /// Backend the context gives access to.
  type Backend: ?Sized;

  /// Access the underlying backend.
  fn backend(&mut self) -> &mut Self::Backend;
}
