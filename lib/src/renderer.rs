use std::ffi::{OsStr, OsString};
use std::process::Command;

use crate::error::{Chainable, Result};
use crate::relink::{RelinkReport, Relinker};

/// The external slide renderer. The real thing shells out to a rendering
/// command; tests substitute an implementation that writes canned files.
pub trait Renderer {
    /// Render the site's pages into the output directory, blocking until
    /// the renderer is done.
    fn render(&self) -> Result<()>;
}

/// One full build: render, then relink. A renderer failure returns before
/// any file is touched.
pub fn build_site<R>(renderer: &R, relinker: &Relinker) -> Result<RelinkReport>
    where R: Renderer + ?Sized
{
    renderer.render()?;
    relinker.run()
}

/// A [`Renderer`] that runs an external command. The child inherits this
/// process's stdio, so whatever the renderer prints streams through live.
#[derive(Debug)]
pub struct CommandRenderer {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandRenderer {
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        CommandRenderer { program: program.as_ref().to_os_string(), args: vec![] }
    }

    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }
}

impl Renderer for CommandRenderer {
    fn render(&self) -> Result<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .chain_with(|| error! {
                "failed to launch the slide renderer",
                "program" => self.program.to_string_lossy(),
            })?;

        if status.success() {
            return Ok(());
        }

        match status.code() {
            Some(code) => err! {
                "the slide renderer exited with a failure",
                "program" => self.program.to_string_lossy(),
                "exit code" => code,
            },
            None => err! {
                "the slide renderer was terminated by a signal",
                "program" => self.program.to_string_lossy(),
            },
        }
    }
}
