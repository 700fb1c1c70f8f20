//! Parsing of the human-readable `just --list` output.
//!
//! The listing is lossy compared to the JSON dump, so parsing is tolerant:
//! anything that does not look like `name [params...] [# doc]` is skipped.

use std::sync::LazyLock;

use regex::Regex;

use super::model::{DefaultValue, Parameter, ParameterKind, Recipe};

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("identifier pattern"));

/// Parse `just --list` output into recipes, in listing order.
pub fn parse_listing(listing: &str) -> Vec<Recipe> {
    listing.lines().filter_map(parse_line).collect()
}

/// Parse a single listing line. Returns `None` for headers, group headings,
/// blank lines and anything that is not a recipe signature.
pub fn parse_line(line: &str) -> Option<Recipe> {
    let trimmed = line.trim();
    let heading = trimmed.ends_with(':') && !trimmed.contains('#');
    if trimmed.is_empty() || trimmed.starts_with('[') || heading {
        return None;
    }

    let (tokens, doc) = tokenize(trimmed);
    let mut tokens = tokens.into_iter();
    let name = tokens.next()?;
    if !IDENTIFIER.is_match(&name) {
        tracing::debug!(line, "skipping unrecognized listing line");
        return None;
    }

    let mut recipe = Recipe::new(name);
    recipe.doc = doc;
    recipe.parameters = tokens
        .filter_map(|token| {
            let parameter = parse_parameter(&token);
            if parameter.is_none() {
                tracing::debug!(token = %token, recipe = %recipe.name, "skipping unrecognized parameter");
            }
            parameter
        })
        .collect();
    Some(recipe)
}

/// Parse one parameter token such as `target`, `$PORT`, `+FILES`,
/// `*$FLAGS` or `mode='debug'`.
pub fn parse_parameter(token: &str) -> Option<Parameter> {
    let mut rest = token;
    let mut kind = ParameterKind::Singular;
    let mut export = false;

    loop {
        if let Some(stripped) = rest.strip_prefix('$') {
            export = true;
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('+') {
            kind = ParameterKind::Plus;
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('*') {
            kind = ParameterKind::Star;
            rest = stripped;
        } else {
            break;
        }
    }

    let (name, default) = match rest.split_once('=') {
        Some((name, value)) => (name, listed_default(value)),
        None => (rest, DefaultValue::Absent),
    };
    if !IDENTIFIER.is_match(name) {
        return None;
    }

    Some(Parameter {
        name: name.to_string(),
        kind,
        default,
        export,
    })
}

/// just prints string literal defaults quoted and expressions verbatim.
fn listed_default(value: &str) -> DefaultValue {
    for quote in ['\'', '"'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return DefaultValue::Literal(value[1..value.len() - 1].to_string());
        }
    }
    DefaultValue::Expression(value.to_string())
}

/// Split a signature into whitespace-separated tokens, honoring quotes, and
/// peel off a trailing `# doc` comment that starts at a token boundary.
fn tokenize(line: &str) -> (Vec<String>, Option<String>) {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for (index, ch) in line.char_indices() {
        match quote {
            Some(open) => {
                current.push(ch);
                if ch == open {
                    quote = None;
                }
            }
            None if ch == '#' && current.is_empty() => {
                let doc = line[index + 1..].trim();
                let doc = (!doc.is_empty()).then(|| doc.to_string());
                return (tokens, doc);
            }
            None if ch.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => {
                if ch == '\'' || ch == '"' {
                    quote = Some(ch);
                }
                current.push(ch);
            }
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    (tokens, None)
}
