//! OpenGL 4.1 backend.
//!
//! This module implements an OpenGL 4.1 backend for glint. The backend type is [`GL41`].

mod shader;
mod state;

pub use self::shader::{Program, Stage};
pub use self::state::{GLState, StateQueryError};

use std::cell::RefCell;
use std::rc::Rc;

/// An OpenGL 4.1 backend.
///
/// This type is to be used as a glint backend type. Acquiring it requires an OpenGL context
/// already current on the calling thread, and at most one backend can exist per thread.
#[derive(Debug)]
pub struct GL41 {
  pub(crate) state: Rc<RefCell<GLState>>,
}

impl GL41 {
  /// Create a new OpenGL 4.1 backend.
  pub fn new() -> Result<Self, StateQueryError> {
    GLState::new().map(|state| GL41 {
      state: Rc::new(RefCell::new(state)),
    })
  }

  /// Internal access to the backend state.
  ///
  /// # Unsafety
  ///
  /// This method is **highly unsafe** as it exposes the internals of the backend. Playing with it
  /// should be done with extreme caution.
  pub unsafe fn state(&self) -> &Rc<RefCell<GLState>> {
    &self.state
  }
}
