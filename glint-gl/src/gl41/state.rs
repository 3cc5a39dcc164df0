//! Graphics state.

use std::cell::RefCell;
use std::error;
use std::fmt;
use std::marker::PhantomData;

// TLS synchronization barrier for `GLState`.
//
// An OpenGL context is bound to the thread it was made current on, so a backend acquired from it
// must never be used from another thread, and two backends on the same thread would invalidate
// each other’s view of the driver. The token below is consumed the first time a [`GLState`] is
// created on a thread; further attempts fail with [`StateQueryError::UnavailableGLState`].
thread_local!(static TLS_ACQUIRE_GFX_STATE: RefCell<Option<()>> = RefCell::new(Some(())));

/// The graphics state.
///
/// This type represents the exclusive right to talk to the OpenGL context current on this
/// thread. It is `!Send` and `!Sync`.
#[derive(Debug)]
pub struct GLState {
  _a: PhantomData<*const ()>, // !Send and !Sync
}

impl GLState {
  /// Create a new [`GLState`], acquiring the thread token.
  pub(crate) fn new() -> Result<Self, StateQueryError> {
    TLS_ACQUIRE_GFX_STATE.with(|rc| {
      let mut inner = rc.borrow_mut();

      match *inner {
        Some(_) => {
          inner.take();
          Ok(GLState { _a: PhantomData })
        }

        None => Err(StateQueryError::UnavailableGLState),
      }
    })
  }
}

/// An error that might happen when the graphics state is queried.
#[non_exhaustive]
#[derive(Debug)]
pub enum StateQueryError {
  /// The [`GLState`] object is unavailable.
  ///
  /// That might occur if the current thread doesn’t support allocating a new graphics state. It
  /// might happen if you try to have more than one context on the same thread, for instance.
  UnavailableGLState,
}

impl fmt::Display for StateQueryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StateQueryError::UnavailableGLState => write!(f, "unavailable graphics state"),
    }
  }
}

impl error::Error for StateQueryError {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn second_acquisition_on_the_same_thread_fails() {
    let first = GLState::new();
    assert!(first.is_ok());

    let second = GLState::new();
    assert!(matches!(second, Err(StateQueryError::UnavailableGLState)));
  }
}
