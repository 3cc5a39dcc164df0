//! This program renders a single colored triangle with a vertex + fragment shader pair and is
//! the hello world of glint: the program is built once at startup and activated every frame.
//!
//! Press <escape> to quit or close the window.

use gl::types::*;
use glfw::{Action, Context as _, Key, WindowEvent};
use glint::shader::Program;
use glint_gl::GL41;
use glint_glfw::{GlfwSurface, GlfwSurfaceError};
use log::info;
use std::error::Error;
use std::ffi::CStr;
use std::fmt;
use std::mem;
use std::process::exit;
use std::ptr;

const VS: &str = include_str!("triangle-vs.glsl");
const FS: &str = include_str!("triangle-fs.glsl");

// One triangle, deinterleaved: positions on attribute 0, colors on attribute 1.
const POSITIONS: [f32; 6] = [-0.5, -0.5, 0.5, -0.5, 0.0, 0.5];
const COLORS: [f32; 9] = [1., 0., 0., 0., 1., 0., 0., 0., 1.];

#[derive(Debug)]
struct CannotOpenWindow;

impl fmt::Display for CannotOpenWindow {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.write_str("cannot open window")
  }
}

impl Error for CannotOpenWindow {}

fn main() {
  env_logger::init();

  if let Err(e) = run() {
    log::error!("{}", e);
    exit(1);
  }
}

fn run() -> Result<(), Box<dyn Error>> {
  let surface = GlfwSurface::new(|glfw| {
    let (mut window, events_rx) = glfw
      .create_window(512, 512, "Hello, triangle!", glfw::WindowMode::Windowed)
      .ok_or(GlfwSurfaceError::UserError(CannotOpenWindow))?;

    window.make_current();
    window.set_key_polling(true);

    Ok((window, events_rx))
  })?;

  let mut context = surface.context;
  let events_rx = surface.events_rx;

  info!("vendor: {}", gl_string(gl::VENDOR));
  info!("renderer: {}", gl_string(gl::RENDERER));
  info!("OpenGL version: {}", gl_string(gl::VERSION));

  let program: Program<GL41> = Program::from_strings(&mut context, VS, FS)?;
  let vao = unsafe { upload_triangle() };

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
      gl::BindVertexArray(vao);
      gl::DrawArrays(gl::TRIANGLES, 0, 3);
      gl::BindVertexArray(0);
      gl::UseProgram(0);
    }

    context.window.swap_buffers();
  }

  Ok(())
}

unsafe fn upload_triangle() -> GLuint {
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

  let mut color_vbo = 0;
  gl::GenBuffers(1, &mut color_vbo);
  gl::BindBuffer(gl::ARRAY_BUFFER, color_vbo);
  gl::BufferData(
    gl::ARRAY_BUFFER,
    mem::size_of_val(&COLORS) as GLsizeiptr,
    COLORS.as_ptr() as *const _,
    gl::STATIC_DRAW,
  );
  gl::EnableVertexAttribArray(1);
  gl::VertexAttribPointer(1, 3, gl::FLOAT, gl::FALSE, 0, ptr::null());

  gl::BindBuffer(gl::ARRAY_BUFFER, 0);
  gl::BindVertexArray(0);

  vao
}

fn gl_string(name: GLenum) -> String {
  unsafe {
    let s = gl::GetString(name);

    if s.is_null() {
      return "<unknown>".to_owned();
    }

    CStr::from_ptr(s as *const _).to_string_lossy().into_owned()
  }
}
