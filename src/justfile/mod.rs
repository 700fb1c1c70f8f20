//! Recipe introspection.
//!
//! Recipes are read from `just` in one of two ways:
//!
//! - **dump**: `just --dump --dump-format json`, which keeps parameter kinds
//!   and defaults exactly. Failure is fatal at startup.
//! - **list**: `just --list`, parsed line by line. Lossy, and a failure
//!   degrades to an empty recipe set.

mod dump;
mod just;
mod listing;
mod model;

use std::path::Path;

use clap::ValueEnum;

use crate::config::AllowList;

pub use dump::{classify_default, parse_dump};
#[cfg(test)]
pub use just::MockJustOps;
pub use just::{JustError, JustOps, RealJust};
pub use listing::{parse_line, parse_listing, parse_parameter};
pub use model::{DefaultValue, Parameter, ParameterKind, Recipe};

/// Strategy used to obtain recipe definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RecipeSource {
    /// Structured JSON dump
    #[default]
    Dump,
    /// Plain `just --list` output
    List,
}

/// Read the recipes of the justfile in `dir`.
///
/// Errors from the dump strategy are returned to the caller. Errors from the
/// list strategy are logged and yield no recipes.
pub fn read_recipes(
    just: &impl JustOps,
    source: RecipeSource,
    dir: &Path,
) -> Result<Vec<Recipe>, JustError> {
    match source {
        RecipeSource::Dump => {
            let json = just.dump_json(dir)?;
            parse_dump(&json)
        }
        RecipeSource::List => match just.list(dir) {
            Ok(listing) => Ok(parse_listing(&listing)),
            Err(e) => {
                tracing::warn!(error = %e, "could not list recipes, continuing without tools");
                Ok(Vec::new())
            }
        },
    }
}

/// Keep only the recipes named in the allow-list, preserving order.
pub fn filter_recipes(recipes: Vec<Recipe>, allow_list: Option<&AllowList>) -> Vec<Recipe> {
    let Some(allow_list) = allow_list else {
        return recipes;
    };

    for name in allow_list.iter() {
        if !recipes.iter().any(|recipe| recipe.name == name) {
            tracing::warn!(recipe = name, "allow-listed recipe not found in justfile");
        }
    }

    recipes
        .into_iter()
        .filter(|recipe| allow_list.contains(&recipe.name))
        .collect()
}
