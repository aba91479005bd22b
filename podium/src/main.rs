use std::process::ExitCode;

use lectern::error::Result;
use lectern::relink::RelinkReport;
use lectern::util::time;

mod config;

pub const RENDER_COMMAND: &str = "reveal-md";
pub const CONTENT_DIR: &str = "content";
pub const OUTPUT_DIR: &str = "build";
pub const THEME_FILE: &str = "theme/slides.css";
pub const CONFIG_FILE: &str = "config.toml";

mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Render the workshop slides and fix up the generated site.
        cmd podium {
            /// Skip the renderer and only relink an existing output directory.
            optional --skip-render
            /// Print how many replacements every rule made.
            optional -v, --verbose
            /// Read settings from this file instead of `config.toml`.
            optional -c, --config path: PathBuf
        }
    }
}

fn main() -> ExitCode {
    let flags = flags::Podium::from_env_or_exit();
    let verbose = flags.verbose;

    match run(flags) {
        Ok(report) => {
            if verbose {
                for (pattern, count) in &report.substitutions {
                    println!("{count:>6}  {pattern}");
                }
            }

            println!("relinked {} pages", report.pages);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(flags: flags::Podium) -> Result<RelinkReport> {
    let settings = config::Settings::load(flags.config.as_deref())?;
    let relinker = settings.relinker();

    if flags.skip_render {
        return time!("relink time" => relinker.run());
    }

    time!("build time" => lectern::build_site(&settings.renderer(), &relinker))
}
