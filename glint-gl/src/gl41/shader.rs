//! Shader stage and program support.

use crate::gl41::GL41;
use gl::types::*;
use glint::backend::shader::Shader;
use glint::shader::{ProgramError, StageError, StageType};
use std::ffi::CString;
use std::ptr::{null, null_mut};

/// An OpenGL shader stage.
#[derive(Debug)]
pub struct Stage {
  handle: GLuint,
  ty: StageType,
}

impl Stage {
  /// OpenGL name of the stage object.
  pub fn handle(&self) -> GLuint {
    self.handle
  }
}

/// An OpenGL shader program.
#[derive(Debug)]
pub struct Program {
  handle: GLuint,
}

impl Program {
  /// OpenGL name of the program object; pass it to `gl::UseProgram` to activate the program.
  pub fn handle(&self) -> GLuint {
    self.handle
  }
}

unsafe impl Shader for GL41 {
  type StageRepr = Stage;

  type ProgramRepr = Program;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    let handle = gl::CreateShader(opengl_shader_type(ty));

    if handle == 0 {
      return Err(StageError::compilation_failed(
        ty,
        "unable to create shader stage",
      ));
    }

    let c_src = match CString::new(src.as_bytes()) {
      Ok(c_src) => c_src,
      Err(_) => {
        gl::DeleteShader(handle);
        return Err(StageError::compilation_failed(
          ty,
          "shader source contains a nul byte",
        ));
      }
    };

    gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
    gl::CompileShader(handle);

    let mut compiled: GLint = gl::FALSE.into();
    gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

    if compiled == gl::TRUE.into() {
      Ok(Stage { handle, ty })
    } else {
      let mut log_len: GLint = 0;
      gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

      let mut log: Vec<u8> = Vec::with_capacity(log_len as usize);
      gl::GetShaderInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);
      log.set_len(log_len as usize);

      gl::DeleteShader(handle);

      Err(StageError::compilation_failed(ty, log_to_string(log)))
    }
  }

  unsafe fn destroy_stage(stage: &mut Self::StageRepr) {
    gl::DeleteShader(stage.handle);
  }

  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    let handle = gl::CreateProgram();

    gl::AttachShader(handle, vertex.handle);
    gl::AttachShader(handle, fragment.handle);

    gl::LinkProgram(handle);

    let mut linked: GLint = gl::FALSE.into();
    gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked);

    if linked == gl::TRUE.into() {
      Ok(Program { handle })
    } else {
      let mut log_len: GLint = 0;
      gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

      let mut log: Vec<u8> = Vec::with_capacity(log_len as usize);
      gl::GetProgramInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);
      log.set_len(log_len as usize);

      // the program object is unusable after a failed link
      gl::DeleteProgram(handle);

      Err(ProgramError::link_failed(log_to_string(log)))
    }
  }

  unsafe fn destroy_program(program: &mut Self::ProgramRepr) {
    gl::DeleteProgram(program.handle);
  }
}

fn opengl_shader_type(t: StageType) -> GLenum {
  match t {
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}

// Info logs come back with a trailing nul and no encoding guarantee.
fn log_to_string(mut log: Vec<u8>) -> String {
  while log.last() == Some(&0) {
    log.pop();
  }

  String::from_utf8_lossy(&log).into_owned()
}
