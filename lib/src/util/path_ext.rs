use std::fs;
use std::path::Path;

use crate::error::{Chainable, Result};

pub trait PathExt: AsRef<Path> {
    fn read_text(&self) -> Result<String>;
    fn write_text(&self, text: &str) -> Result<()>;
}

impl PathExt for Path {
    fn read_text(&self) -> Result<String> {
        fs::read_to_string(self).chain_with(|| error! {
            "failed to read file",
            "file path" => self.display(),
        })
    }

    fn write_text(&self, text: &str) -> Result<()> {
        fs::write(self, text).chain_with(|| error! {
            "failed to write file",
            "file path" => self.display(),
        })
    }
}
