//! Shader stages and programs.
//!
//! This module contains the whole public shader API: the [`StageType`] tag, the error taxonomy
//! ([`StageError`] and [`ProgramError`]) and the two owning types, [`Stage`] and [`Program`].
//!
//! The typical entry point is [`Program::from_strings`], which compiles a vertex source and a
//! fragment source and links them in one go:
//!
//! ```ignore
//! let program = Program::from_strings(&mut ctx, VS, FS)?;
//! ```
//!
//! Shader source errors are deterministic: a failed build is never retryable with the same
//! sources, so every failure carries the full driver diagnostic log and it is up to the caller
//! to decide whether to fix the sources and rebuild or give up. The library never falls back to
//! a default program and never terminates the process.

use std::error;
use std::fmt;

use crate::backend::shader::Shader;
use crate::context::GraphicsContext;

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Fragment shader.
  FragmentShader,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageError {
  /// Occurs when a shader fails to compile.
  ///
  /// Carries the stage type and the diagnostic log reported by the driver.
  CompilationFailed(StageType, String),
}

impl StageError {
  /// Create a compilation failure error.
  pub fn compilation_failed(ty: StageType, log: impl Into<String>) -> Self {
    StageError::CompilationFailed(ty, log.into())
  }

  /// Stage type the error relates to.
  pub fn stage_type(&self) -> StageType {
    match *self {
      StageError::CompilationFailed(ty, _) => ty,
    }
  }
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageError::CompilationFailed(ref ty, ref log) => {
        write!(f, "{} compilation error: {}", ty, log)
      }
    }
  }
}

impl error::Error for StageError {}

/// Errors that a [`Program`] can generate.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProgramError {
  /// A shader stage failed to compile.
  StageError(StageError),
  /// Program link failed. You can inspect the reason by looking at the contained [`String`],
  /// which is the diagnostic log reported by the driver.
  LinkFailed(String),
}

impl ProgramError {
  /// Create a link failure error.
  pub fn link_failed(log: impl Into<String>) -> Self {
    ProgramError::LinkFailed(log.into())
  }
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ProgramError::StageError(ref e) => write!(f, "shader program has stage error: {}", e),
      ProgramError::LinkFailed(ref log) => write!(f, "shader program failed to link: {}", log),
    }
  }
}

impl error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ProgramError::StageError(e) => Some(e),
      ProgramError::LinkFailed(_) => None,
    }
  }
}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::StageError(e)
  }
}

/// A compiled shader stage.
///
/// A stage owns its backend object and releases it when dropped, whatever happened to the
/// programs it was attached to in between.
pub struct Stage<S>
where
  S: ?Sized + Shader,
{
  repr: S::StageRepr,
}

impl<S> Stage<S>
where
  S: ?Sized + Shader,
{
  /// Compile a new stage of type `ty` from the source code in `src`.
  pub fn new<C, R>(ctx: &mut C, ty: StageType, src: R) -> Result<Self, StageError>
  where
    C: GraphicsContext<Backend = S>,
    R: AsRef<str>,
  {
    unsafe {
      ctx
        .backend()
        .new_stage(ty, src.as_ref())
        .map(|repr| Stage { repr })
    }
  }
}

impl<S> Drop for Stage<S>
where
  S: ?Sized + Shader,
{
  fn drop(&mut self) {
    unsafe { S::destroy_stage(&mut self.repr) }
  }
}

impl<S> fmt::Debug for Stage<S>
where
  S: ?Sized + Shader,
  S::StageRepr: fmt::Debug,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.debug_struct("Stage").field("repr", &self.repr).finish()
  }
}

/// A linked shader program.
///
/// A value of this type is fully linked and executable: there is no such thing as a
/// partially-linked [`Program`]. The backend object is released when the program is dropped.
pub struct Program<S>
where
  S: ?Sized + Shader,
{
  repr: S::ProgramRepr,
}

impl<S> Program<S>
where
  S: ?Sized + Shader,
{
  /// Link already-compiled vertex and fragment stages into a new program.
  ///
  /// The stages are only borrowed; they remain reusable for further programs and are released
  /// when they go out of scope.
  pub fn from_stages<C>(
    ctx: &mut C,
    vertex: &Stage<S>,
    fragment: &Stage<S>,
  ) -> Result<Self, ProgramError>
  where
    C: GraphicsContext<Backend = S>,
  {
    unsafe {
      ctx
        .backend()
        .new_program(&vertex.repr, &fragment.repr)
        .map(|repr| Program { repr })
    }
  }

  /// Compile and link a program from a vertex source and a fragment source.
  ///
  /// The vertex stage is compiled first; a compilation failure there is fatal for the whole
  /// build and the fragment source is not even submitted. Both intermediate stage objects are
  /// released before this function returns, on every exit path, so a failed build leaks no
  /// driver object.
  pub fn from_strings<C, V, F>(ctx: &mut C, vertex: V, fragment: F) -> Result<Self, ProgramError>
  where
    C: GraphicsContext<Backend = S>,
    V: AsRef<str>,
    F: AsRef<str>,
  {
    let vs_stage = Stage::new(ctx, StageType::VertexShader, vertex)?;
    let fs_stage = Stage::new(ctx, StageType::FragmentShader, fragment)?;

    Self::from_stages(ctx, &vs_stage, &fs_stage)
  }

  /// Access the backend representation of the program.
  ///
  /// This is how render loops get at whatever the backend uses to activate the program (an
  /// OpenGL handle, for instance).
  pub fn repr(&self) -> &S::ProgramRepr {
    &self.repr
  }
}

impl<S> Drop for Program<S>
where
  S: ?Sized + Shader,
{
  fn drop(&mut self) {
    unsafe { S::destroy_program(&mut self.repr) }
  }
}

impl<S> fmt::Debug for Program<S>
where
  S: ?Sized + Shader,
  S::ProgramRepr: fmt::Debug,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.debug_struct("Program").field("repr", &self.repr).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stage_type_display() {
    assert_eq!(StageType::VertexShader.to_string(), "vertex shader");
    assert_eq!(StageType::FragmentShader.to_string(), "fragment shader");
  }

  #[test]
  fn stage_error_display() {
    let e = StageError::compilation_failed(StageType::FragmentShader, "0:3: syntax error");
    assert_eq!(
      e.to_string(),
      "fragment shader compilation error: 0:3: syntax error"
    );
  }

  #[test]
  fn program_error_display() {
    let e = ProgramError::link_failed("unresolved varying");
    assert_eq!(
      e.to_string(),
      "shader program failed to link: unresolved varying"
    );

    let e = ProgramError::from(StageError::compilation_failed(
      StageType::VertexShader,
      "bad",
    ));
    assert_eq!(
      e.to_string(),
      "shader program has stage error: vertex shader compilation error: bad"
    );
  }
}
