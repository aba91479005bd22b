#![doc = svgbobdoc::transform!(
//! A toolkit for publishing rendered slide decks as relocatable static
//! sites.
//!
//! # Overview
//!
//! Lectern drives an external slide renderer and then normalizes what it
//! wrote, so the finished site can be opened from any base path, including
//! `file://` URLs, without a web server rewriting links for it. One build
//! is one pass through a fixed pipeline:
//!
//! ```svgbob
//!  +----------+     +---------+     +----------+     +---------+
//!  |  render  | --> | promote | --> | discover | --> | rewrite |
//!  | (extern) |     | readme  |     |  pages   |     |  links  |
//!  +----------+     +---------+     +----------+     +---------+
//! ```
//!
//! 1. The external renderer runs to completion; whatever it prints streams
//!    through untouched. See [`renderer::Renderer`].
//! 2. The readme-derived page becomes the site index. See
//!    [`relink::Relinker`].
//! 3. Every page directly inside the output directory is found.
//! 4. Each page's links are rewritten in place by an ordered set of
//!    literal substitutions. See [`rewrite::RuleSet`].
//!
//! The stages are strictly sequential and a failure in any of them aborts
//! the build with that stage's context attached; nothing is retried or
//! rolled back. Page rewriting is embarrassingly parallel and runs on
//! [`rayon`].
)]

#[macro_use]
pub mod error;
pub mod util;
pub mod rewrite;
pub mod renderer;
pub mod relink;

pub use renderer::{build_site, CommandRenderer, Renderer};
pub use relink::{Relinker, RelinkReport};

pub use rayon;
