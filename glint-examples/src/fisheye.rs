//! This program displays an image through a fisheye-distortion fragment shader: the flat image
//! is projected onto a hemisphere and warped with a polynomial radial distortion model.
//!
//! The image path is read from the command line interface and is the sole argument.
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

const VS: &str = include_str!("fisheye-vs.glsl");
const FS: &str = include_str!("fisheye-fs.glsl");

// A full-window quad as two plain (non-indexed) triangles, anti-clockwise.
const POSITIONS: [f32; 12] = [
  -1., -1., // left bottom
  1., -1., // right bottom
  -1., 1., // left top
  -1., 1., // left top
  1., -1., // right bottom
  1., 1., // right top
];

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

  let surface = GlfwSurface::new(|glfw| {
    let (mut window, events_rx) = glfw
      .create_window(512, 512, "Fisheye", glfw::WindowMode::Windowed)
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

  let (texture_location, viewport_location) = unsafe {
    let texture_name = CString::new("source_texture").unwrap();
    let viewport_name = CString::new("viewport_size").unwrap();
    let handle = program.repr().handle();

    (
      gl::GetUniformLocation(handle, texture_name.as_ptr()),
      gl::GetUniformLocation(handle, viewport_name.as_ptr()),
    )
  };

  info!("distorting {}", path);

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

    let (fb_w, fb_h) = context.window.get_framebuffer_size();

    unsafe {
      gl::Viewport(0, 0, fb_w, fb_h);
      gl::ClearColor(0., 0., 0., 1.);
      gl::Clear(gl::COLOR_BUFFER_BIT);

      gl::UseProgram(program.repr().handle());

      gl::ActiveTexture(gl::TEXTURE0);
      gl::BindTexture(gl::TEXTURE_2D, texture);
      gl::Uniform1i(texture_location, 0);
      gl::Uniform2f(viewport_location, fb_w as GLfloat, fb_h as GLfloat);

      gl::BindVertexArray(vao);
      gl::DrawArrays(gl::TRIANGLES, 0, 6);
      gl::BindVertexArray(0);

      gl::BindTexture(gl::TEXTURE_2D, 0);
      gl::UseProgram(0);
    }

    context.window.swap_buffers();
  }

  Ok(())
}

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

  // the distortion samples outside [0; 1]: clamp to a black border instead of repeating
  gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_BORDER as GLint);
  gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_BORDER as GLint);

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

  gl::BindBuffer(gl::ARRAY_BUFFER, 0);
  gl::BindVertexArray(0);

  vao
}
