//! This program loads an image from the disk and displays it on a full-window quad, drawn with
//! an element buffer (two indexed triangles).
//!
//! The image path is read from the command line interface and is the sole argument. The window
//! is sized to the image.
//!
//! Press <escape> to quit or close the window.

use gl::types::*;
use glfw::{Action, Context as _, Key, WindowEvent};
use glint::shader::Program;
use glint_gl::GL41;
use glint_glfw::{GlfwSurface, GlfwSurfaceError};
use log::info;
use std::error::Error;
use std::ffi::CString;
use std::fmt;
use std::mem;
use std::path::Path;
use std::process::exit;
use std::ptr;

const VS: &str = include_str!("quad-vs.glsl");
const FS: &str = include_str!("quad-fs.glsl");

// A full-window quad, deinterleaved: positions on attribute 0, texture coordinates on
// attribute 1, corners shared through the element buffer.
const POSITIONS: [f32; 8] = [-1., -1., -1., 1., 1., 1., 1., -1.];
const UVS: [f32; 8] = [0., 0., 0., 1., 1., 1., 1., 0.];
const INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

#[derive(Debug)]
enum AppError {
  MissingImagePath,
  InvalidImage,
  CannotOpenWindow,
}

impl fmt::Display for AppError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      AppError::MissingImagePath => f.write_str("missing first argument (path to the image)"),
      AppError::InvalidImage => f.write_str("cannot read or decode the image"),
      AppError::CannotOpenWindow => f.write_str("cannot open window"),
    }
  }
}

impl Error for AppError {}

fn main() {
  env_logger::init();

  if let Err(e) = run() {
    log::error!("{}", e);
    exit(1);
  }
}

fn run() -> Result<(), Box<dyn Error>> {
  let path = std::env::args().nth(1).ok_or(AppError::MissingImagePath)?;
  let img = read_image(Path::new(&path)).ok_or(AppError::InvalidImage)?;
  let (width, height) = img.dimensions();

  let surface = GlfwSurface::new(|glfw| {
    let (mut window, events_rx) = glfw
      .create_window(width, height, "Textured quad", glfw::WindowMode::Windowed)
      .ok_or(GlfwSurfaceError::UserError(AppError::CannotOpenWindow))?;

    window.make_current();
    window.set_key_polling(true);

    Ok((window, events_rx))
  })?;

  let mut context = surface.context;
  let events_rx = surface.events_rx;

  let program: Program<GL41> = Program::from_strings(&mut context, VS, FS)?;

  let texture = unsafe { upload_texture(&img) };
  let vao = unsafe { upload_quad() };

  let texture_location = unsafe {
    let name = CString::new("source_texture").unwrap();
    gl::GetUniformLocation(program.repr().handle(), name.as_ptr())
  };

  info!("displaying {} ({}x{})", path, width, height);

  while !context.window.should_close() {
    context.window.glfw.poll_events();

    for (_, event) in events_rx.try_iter() {
      match event {
        WindowEvent::Close | WindowEvent::Key(Key::Escape, _, Action::Release, _) => {
          context.window.set_should_close(true);
        }

        _ => (),
      }
    }

    unsafe {
      gl::ClearColor(0., 0., 0., 1.);
      gl::Clear(gl::COLOR_BUFFER_BIT);

      gl::UseProgram(program.repr().handle());

      gl::ActiveTexture(gl::TEXTURE0);
      gl::BindTexture(gl::TEXTURE_2D, texture);
      gl::Uniform1i(texture_location, 0);

      gl::BindVertexArray(vao);
      gl::DrawElements(gl::TRIANGLES, 6, gl::UNSIGNED_INT, ptr::null());
      gl::BindVertexArray(0);

      gl::BindTexture(gl::TEXTURE_2D, 0);
      gl::UseProgram(0);
    }

    context.window.swap_buffers();
  }

  Ok(())
}

// Read the texture into memory as a whole bloc, flipped so that v grows upwards like OpenGL
// expects.
fn read_image(path: &Path) -> Option<image::RgbImage> {
  image::open(path).map(|img| img.flipv().to_rgb()).ok()
}

unsafe fn upload_texture(img: &image::RgbImage) -> GLuint {
  let (width, height) = img.dimensions();
  let texels = img.as_raw();

  let mut texture = 0;
  gl::GenTextures(1, &mut texture);
  gl::ActiveTexture(gl::TEXTURE0);
  gl::BindTexture(gl::TEXTURE_2D, texture);

  gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint);
  gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
  gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as GLint);
  gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as GLint);

  // tightly packed RGB rows
  gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
  gl::TexImage2D(
    gl::TEXTURE_2D,
    0,
    gl::RGB as GLint,
    width as GLsizei,
    height as GLsizei,
    0,
    gl::RGB,
    gl::UNSIGNED_BYTE,
    texels.as_ptr() as *const _,
  );

  texture
}

unsafe fn upload_quad() -> GLuint {
  let mut vao = 0;
  gl::GenVertexArrays(1, &mut vao);
  gl::BindVertexArray(vao);

  let mut position_vbo = 0;
  gl::GenBuffers(1, &mut position_vbo);
  gl::BindBuffer(gl::ARRAY_BUFFER, position_vbo);
  gl::BufferData(
    gl::ARRAY_BUFFER,
    mem::size_of_val(&POSITIONS) as GLsizeiptr,
    POSITIONS.as_ptr() as *const _,
    gl::STATIC_DRAW,
  );
  gl::EnableVertexAttribArray(0);
  gl::VertexAttribPointer(0, 2, gl::FLOAT, gl::FALSE, 0, ptr::null());

  let mut uv_vbo = 0;
  gl::GenBuffers(1, &mut uv_vbo);
  gl::BindBuffer(gl::ARRAY_BUFFER, uv_vbo);
  gl::BufferData(
    gl::ARRAY_BUFFER,
    mem::size_of_val(&UVS) as GLsizeiptr,
    UVS.as_ptr() as *const _,
    gl::STATIC_DRAW,
  );
  gl::EnableVertexAttribArray(1);
  gl::VertexAttribPointer(1, 2, gl::FLOAT, gl::FALSE, 0, ptr::null());

  let mut index_vbo = 0;
  gl::GenBuffers(1, &mut index_vbo);
  gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, index_vbo);
  gl::BufferData(
    gl::ELEMENT_ARRAY_BUFFER,
    mem::size_of_val(&INDICES) as GLsizeiptr,
    INDICES.as_ptr() as *const _,
    gl::STATIC_DRAW,
  );

  gl::BindBuffer(gl::ARRAY_BUFFER, 0);
  gl::BindVertexArray(0);

  vao
}
