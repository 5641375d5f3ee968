//! # tbs-render - JSON and Template-Table Output
//!
//! Every `tbs` command ends the same way: an API payload is handed to a
//! renderer together with a single format string, and text lands on stdout.
//! This crate owns that last step.
//!
//! ## Format Selection
//!
//! The format string picks the renderer:
//! - If its first whitespace-delimited token is `json`, the payload is written
//!   as pretty JSON (4-space indent, trailing newline). Anything after the
//!   token is ignored.
//! - Any other string, including the empty one, is a **row template**.
//!
//! ## Row Templates
//!
//! Row templates use Go-style field placeholders, the same ones users already
//! keep in their `.threeblades.yaml`:
//!
//! ```text
//! {{.name}}\t{{.status}}\t{{.config.type}}
//! ```
//!
//! The renderer derives a header line by stripping `{{`, `}}`, dots and spaces
//! (`name\tstatus\tconfigtype`), writes it, then expands the template once per
//! element of the payload. A payload that is not a sequence is rendered as the
//! only row. Placeholders are translated to [minijinja](https://docs.rs/minijinja)
//! expressions, so the full expression language is available inside an action:
//!
//! ```text
//! {{.name | upper}}\t{{.private}}
//! ```
//!
//! ## Quick Example
//!
//! ```rust
//! use serde::Serialize;
//! use tbs_render::Renderer;
//!
//! #[derive(Serialize)]
//! struct Row {
//!     name: String,
//!     size: u32,
//! }
//!
//! let rows = vec![Row { name: "notebook.ipynb".into(), size: 12 }];
//! let mut out = Vec::new();
//! Renderer::new("{{.name}} {{.size}}", &rows)
//!     .with_color(false)
//!     .render(&mut out)
//!     .unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "namesize\nnotebook.ipynb 12\n");
//! ```
//!
//! ## Terminal Detection
//!
//! When stdout supports colors (checked with the `console` crate) the header
//! line is printed bold. [`Renderer::with_color`] overrides the detection.

use console::{Style, Term};
use minijinja::value::ValueKind;
use minijinja::{context, escape_formatter, Environment, Output, State, Value};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

const TEMPLATE_NAME: &str = "table";
const ROW_VAR: &str = "row";
const JSON_INDENT: &[u8] = b"    ";

static ACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{(-?)(.*?)(-?)\}\}").expect("action pattern is valid"));
static FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|[\s(|,\[])\.([A-Za-z_][A-Za-z0-9_]*)").expect("field pattern is valid")
});
static DOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|[\s(|,\[])\.($|[\s)|,\]])").expect("dot pattern is valid"));

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Output mode chosen from a format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format<'a> {
    Json,
    Table(&'a str),
}

impl<'a> Format<'a> {
    /// Selects JSON when the first whitespace-delimited token is `json`.
    ///
    /// Leading whitespace is not skipped: `" json"` has an empty first token
    /// and therefore selects the table renderer.
    pub fn parse(spec: &'a str) -> Self {
        match spec.split(char::is_whitespace).next() {
            Some("json") => Format::Json,
            _ => Format::Table(spec),
        }
    }
}

/// Renderer for one payload, picked by [`Format::parse`].
pub enum Renderer<'a, T: ?Sized> {
    Json(JsonRenderer<'a, T>),
    Table(TableRenderer<'a, T>),
}

impl<'a, T: Serialize + ?Sized> Renderer<'a, T> {
    pub fn new(format: &'a str, target: &'a T) -> Self {
        match Format::parse(format) {
            Format::Json => Renderer::Json(JsonRenderer { target }),
            Format::Table(template) => Renderer::Table(TableRenderer::new(template, target)),
        }
    }

    /// Forces header styling on or off. JSON output is never styled.
    pub fn with_color(self, use_color: bool) -> Self {
        match self {
            Renderer::Table(table) => Renderer::Table(table.with_color(use_color)),
            json => json,
        }
    }

    pub fn render<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        match self {
            Renderer::Json(json) => json.render(w),
            Renderer::Table(table) => table.render(w),
        }
    }
}

/// Pretty JSON with a 4-space indent and a trailing newline.
pub struct JsonRenderer<'a, T: ?Sized> {
    target: &'a T,
}

impl<'a, T: Serialize + ?Sized> JsonRenderer<'a, T> {
    pub fn new(target: &'a T) -> Self {
        Self { target }
    }

    pub fn render<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        // Encode fully first so a failing payload leaves the stream untouched.
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.target.serialize(&mut ser)?;
        buf.push(b'\n');
        w.write_all(&buf)?;
        Ok(())
    }
}

/// Header line plus one expanded row template per payload element.
pub struct TableRenderer<'a, T: ?Sized> {
    target: &'a T,
    format: &'a str,
    use_color: Option<bool>,
}

impl<'a, T: Serialize + ?Sized> TableRenderer<'a, T> {
    pub fn new(format: &'a str, target: &'a T) -> Self {
        Self {
            target,
            format,
            use_color: None,
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = Some(use_color);
        self
    }

    pub fn render<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        let mut env = Environment::new();
        env.set_formatter(cell_formatter);
        env.add_template_owned(TEMPLATE_NAME, row_loop(self.format))?;
        let tmpl = env.get_template(TEMPLATE_NAME)?;

        let rows = match serde_json::to_value(self.target)? {
            serde_json::Value::Array(items) => items,
            single => vec![single],
        };
        let body = tmpl.render(context! { rows => Value::from_serialize(&rows) })?;

        let use_color = self
            .use_color
            .unwrap_or_else(|| Term::stdout().features().colors_supported());
        let header = header_line(self.format);
        let header = if use_color {
            Style::new()
                .bold()
                .force_styling(true)
                .apply_to(header)
                .to_string()
        } else {
            header
        };

        writeln!(w, "{}", header)?;
        w.write_all(body.as_bytes())?;
        Ok(())
    }
}

/// Derives the column header from a row template by dropping template
/// punctuation: `{{`, `}}`, `.` and spaces.
pub fn header_line(format: &str) -> String {
    format
        .replace("{{", "")
        .replace("}}", "")
        .replace('.', "")
        .replace(' ', "")
}

/// Rewrites Go-style placeholders (`{{.name}}`, `{{.a.b}}`, `{{.}}`) into
/// minijinja expressions over the loop variable.
pub fn translate_row(format: &str) -> String {
    ACTION
        .replace_all(format, |caps: &Captures| {
            let inner = FIELD.replace_all(&caps[2], format!("${{1}}{ROW_VAR}.${{2}}").as_str());
            let inner = DOT.replace_all(&inner, format!("${{1}}{ROW_VAR}${{2}}").as_str());
            format!("{{{{{}{}{}}}}}", &caps[1], inner, &caps[3])
        })
        .into_owned()
}

/// Writes cells the way Go templates print them: `true`/`false` for booleans,
/// nothing for null.
fn cell_formatter(
    out: &mut Output,
    state: &State,
    value: &Value,
) -> std::result::Result<(), minijinja::Error> {
    let cell = match value.kind() {
        ValueKind::Bool if value.is_true() => Value::from("true"),
        ValueKind::Bool => Value::from("false"),
        ValueKind::None => Value::from(""),
        _ => return escape_formatter(out, state, value),
    };
    escape_formatter(out, state, &cell)
}

fn row_loop(format: &str) -> String {
    format!(
        "{{% for {ROW_VAR} in rows %}}{}\n{{% endfor %}}",
        translate_row(format)
    )
}
