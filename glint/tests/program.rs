//! Program building behavior, checked against a fake in-memory backend.
//!
//! The fake backend implements a toy GLSL front: a stage compiles if its source contains a
//! `void main` entry point, and a program links if every `in` variable declared by the fragment
//! stage is written by an `out` variable of the vertex stage. Every create / destroy call is
//! counted, which lets the tests assert that no driver object outlives a build, whatever the
//! exit path.

use std::cell::RefCell;
use std::rc::Rc;

use glint::backend::shader::Shader;
use glint::context::GraphicsContext;
use glint::shader::{Program, ProgramError, Stage, StageError, StageType};

#[derive(Debug, Default)]
struct Counters {
  next_handle: u32,
  stages_created: u32,
  stages_destroyed: u32,
  programs_created: u32,
  programs_destroyed: u32,
}

impl Counters {
  fn live_stages(&self) -> u32 {
    self.stages_created - self.stages_destroyed
  }

  fn live_programs(&self) -> u32 {
    self.programs_created - self.programs_destroyed
  }
}

#[derive(Debug)]
struct FakeStage {
  ty: StageType,
  outputs: Vec<String>,
  inputs: Vec<String>,
  counters: Rc<RefCell<Counters>>,
}

#[derive(Debug)]
struct FakeProgram {
  handle: u32,
  counters: Rc<RefCell<Counters>>,
}

struct Fake {
  counters: Rc<RefCell<Counters>>,
}

// Extract the names declared with a given qualifier, e.g. `out vec2 v_uv;` -> `v_uv`.
fn declared_names(src: &str, qualifier: &str) -> Vec<String> {
  src
    .lines()
    .filter_map(|line| {
      let mut tokens = line.trim().split_whitespace();

      if tokens.next() != Some(qualifier) {
        return None;
      }

      tokens.last().map(|name| name.trim_end_matches(';').to_owned())
    })
    .collect()
}

unsafe impl Shader for Fake {
  type StageRepr = FakeStage;
  type ProgramRepr = FakeProgram;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    let mut counters = self.counters.borrow_mut();
    counters.stages_created += 1;

    if !src.contains("void main") {
      // mimic a driver: the stage object existed while compiling and is released on failure
      counters.stages_destroyed += 1;
      return Err(StageError::compilation_failed(
        ty,
        "error: no entry point found; expected `void main`",
      ));
    }

    Ok(FakeStage {
      ty,
      outputs: declared_names(src, "out"),
      inputs: declared_names(src, "in"),
      counters: self.counters.clone(),
    })
  }

  unsafe fn destroy_stage(stage: &mut Self::StageRepr) {
    stage.counters.borrow_mut().stages_destroyed += 1;
  }

  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    assert_eq!(vertex.ty, StageType::VertexShader);
    assert_eq!(fragment.ty, StageType::FragmentShader);

    let mut counters = self.counters.borrow_mut();
    counters.programs_created += 1;

    for input in &fragment.inputs {
      if !vertex.outputs.contains(input) {
        counters.programs_destroyed += 1;
        return Err(ProgramError::link_failed(format!(
          "error: fragment shader input `{}` is not written by the vertex shader",
          input
        )));
      }
    }

    counters.next_handle += 1;

    Ok(FakeProgram {
      handle: counters.next_handle,
      counters: self.counters.clone(),
    })
  }

  unsafe fn destroy_program(program: &mut Self::ProgramRepr) {
    program.counters.borrow_mut().programs_destroyed += 1;
  }
}

struct FakeContext {
  backend: Fake,
  counters: Rc<RefCell<Counters>>,
}

impl FakeContext {
  fn new() -> Self {
    let counters = Rc::new(RefCell::new(Counters::default()));
    let backend = Fake {
      counters: counters.clone(),
    };

    FakeContext { backend, counters }
  }
}

unsafe impl GraphicsContext for FakeContext {
  type Backend = Fake;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.backend
  }
}

const VS: &str = "#version 410 core
in vec3 p;
out vec2 v_uv;
void main() { gl_Position = vec4(p, 1.0); }";

const FS: &str = "#version 410 core
in vec2 v_uv;
out vec4 c;
void main() { c = vec4(1.0, 0.0, 0.0, 1.0); }";

// `viod` typo: compiles nowhere
const FS_TYPO: &str = "#version 410 core
out vec4 c;
viod main() { c = vec4(1.0); }";

const FS_MISMATCHED: &str = "#version 410 core
in vec2 v_missing;
out vec4 c;
void main() { c = vec4(v_missing, 0.0, 1.0); }";

#[test]
fn valid_pair_builds_and_leaks_nothing() {
  let mut ctx = FakeContext::new();

  let program = Program::from_strings(&mut ctx, VS, FS).expect("valid sources must link");

  // programs are debuggable through their backend representation
  assert!(format!("{:?}", program).starts_with("Program"));

  {
    let counters = ctx.counters.borrow();
    assert_eq!(counters.stages_created, 2);
    assert_eq!(counters.live_stages(), 0, "stages must not outlive the build");
    assert_eq!(counters.live_programs(), 1);
  }

  drop(program);
  assert_eq!(ctx.counters.borrow().live_programs(), 0);
}

#[test]
fn vertex_syntax_error_is_fatal_and_tagged() {
  let mut ctx = FakeContext::new();

  let err = Program::from_strings(&mut ctx, FS_TYPO, FS).unwrap_err();

  match err {
    ProgramError::StageError(StageError::CompilationFailed(ty, log)) => {
      assert_eq!(ty, StageType::VertexShader);
      assert!(!log.is_empty());
    }
    e => panic!("expected a vertex stage error, got: {}", e),
  }

  let counters = ctx.counters.borrow();
  // the fragment source must not even have been submitted
  assert_eq!(counters.stages_created, 1);
  assert_eq!(counters.live_stages(), 0);
  assert_eq!(counters.programs_created, 0);
}

#[test]
fn fragment_syntax_error_releases_the_vertex_stage() {
  let mut ctx = FakeContext::new();

  let err = Program::from_strings(&mut ctx, VS, FS_TYPO).unwrap_err();

  match err {
    ProgramError::StageError(StageError::CompilationFailed(ty, log)) => {
      assert_eq!(ty, StageType::FragmentShader);
      assert!(!log.is_empty());
    }
    e => panic!("expected a fragment stage error, got: {}", e),
  }

  let counters = ctx.counters.borrow();
  assert_eq!(counters.stages_created, 2);
  assert_eq!(counters.live_stages(), 0);
  assert_eq!(counters.programs_created, 0);
}

#[test]
fn mismatched_interfaces_fail_to_link() {
  let mut ctx = FakeContext::new();

  let err = Program::from_strings(&mut ctx, VS, FS_MISMATCHED).unwrap_err();

  match err {
    ProgramError::LinkFailed(log) => {
      assert!(log.contains("v_missing"));
    }
    e => panic!("expected a link error, got: {}", e),
  }

  let counters = ctx.counters.borrow();
  assert_eq!(counters.live_stages(), 0, "stages leaked on link failure");
  assert_eq!(counters.live_programs(), 0, "dead program object leaked");
}

#[test]
fn builds_are_independent() {
  let mut ctx = FakeContext::new();

  // a failed build must not taint the next one
  Program::from_strings(&mut ctx, VS, FS_TYPO).unwrap_err();

  let first = Program::from_strings(&mut ctx, VS, FS).expect("rebuild after failure");
  let second = Program::from_strings(&mut ctx, VS, FS).expect("second build");

  assert_ne!(first.repr().handle, second.repr().handle);

  drop(first);

  // the second program survives the first one
  assert_eq!(ctx.counters.borrow().live_programs(), 1);
  drop(second);
  assert_eq!(ctx.counters.borrow().live_programs(), 0);
}

#[test]
fn stages_are_reusable_across_programs() {
  let mut ctx = FakeContext::new();

  let vs = Stage::new(&mut ctx, StageType::VertexShader, VS).unwrap();
  let fs = Stage::new(&mut ctx, StageType::FragmentShader, FS).unwrap();

  let first = Program::from_stages(&mut ctx, &vs, &fs).unwrap();
  let second = Program::from_stages(&mut ctx, &vs, &fs).unwrap();

  assert_ne!(first.repr().handle, second.repr().handle);

  drop((first, second));
  drop((vs, fs));

  let counters = ctx.counters.borrow();
  assert_eq!(counters.live_stages(), 0);
  assert_eq!(counters.live_programs(), 0);
}
