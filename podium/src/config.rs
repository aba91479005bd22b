use std::path::{Path, PathBuf};

use serde::Deserialize;

use lectern::error;
use lectern::error::{Chainable, Result};
use lectern::relink::Relinker;
use lectern::renderer::CommandRenderer;
use lectern::rewrite::{self, Rule};
use lectern::util::PathExt;

/// One build's settings. Everything has a default; `config.toml` overrides
/// what it names. Extra `[[rules]]` entries run after the built-in ones.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub command: String,
    pub content: PathBuf,
    pub output: PathBuf,
    pub theme: PathBuf,
    pub rules: Vec<Rule>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            command: crate::RENDER_COMMAND.into(),
            content: crate::CONTENT_DIR.into(),
            output: crate::OUTPUT_DIR.into(),
            theme: crate::THEME_FILE.into(),
            rules: vec![],
        }
    }
}

impl Settings {
    /// With no explicit path, a missing `config.toml` simply means
    /// defaults; a path given on the command line must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path, true),
            None => (Path::new(crate::CONFIG_FILE), false),
        };

        if !required && !path.is_file() {
            return Ok(Settings::default());
        }

        let text = path.read_text()?;
        toml::from_str(&text).chain_with(|| error! {
            "failed to read the build configuration",
            "config path" => path.display(),
        })
    }

    pub fn renderer(&self) -> CommandRenderer {
        CommandRenderer::new(&self.command)
            .arg(&self.content)
            .arg("--static")
            .arg(&self.output)
            .arg("--theme")
            .arg(&self.theme)
    }

    pub fn relinker(&self) -> Relinker {
        let mut rules = rewrite::site_relocation().clone();
        for rule in &self.rules {
            rules.push(rule.clone());
        }

        Relinker::with_rules(&self.output, rules)
    }
}
