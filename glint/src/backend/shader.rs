//! Shader backend interface.
//!
//! This interface defines the low-level API shader stages and programs must implement to be
//! usable by the frontend types in [`crate::shader`].

use crate::shader::{ProgramError, StageError, StageType};

/// Shader support.
///
/// # Safety
///
/// Implementations must satisfy the frontend ownership contract: a `StageRepr` returned by
/// [`Shader::new_stage`] stays valid until passed to [`Shader::destroy_stage`], and similarly for
/// programs. [`Shader::new_program`] must never return a partially-linked program: either the
/// returned representation is fully linked and executable, or an error is returned and every
/// driver object allocated for that call has already been released.
pub unsafe trait Shader {
  /// Backend representation of a compiled shader stage.
  type StageRepr;

  /// Backend representation of a linked shader program.
  type ProgramRepr;

  /// Compile a shader stage of type `ty` from its source code.
  ///
  /// On compilation failure, the backend must release the stage object it created and return
  /// [`StageError::CompilationFailed`] carrying the driver diagnostic log.
  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError>;

  /// Release a shader stage.
  unsafe fn destroy_stage(stage: &mut Self::StageRepr);

  /// Link a vertex stage and a fragment stage into a new program.
  ///
  /// On link failure, the backend must release the program object it created and return
  /// [`ProgramError::LinkFailed`] carrying the driver diagnostic log. The input stages are
  /// borrowed: releasing them remains the caller’s responsibility in every case.
  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError>;

  /// Release a shader program.
  unsafe fn destroy_program(program: &mut Self::ProgramRepr);
}
