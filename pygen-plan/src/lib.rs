//! Declarative plans for generated Python files.
//!
//! A plan is a TOML (or JSON) description of one Python module: imports,
//! globals, functions and classes, with bodies written as lists of
//! statements. Plans are validated on load and lowered onto a
//! [`pygen_codegen::Document`] with [`Plan::apply`].

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod lower;
mod statement;
mod validate;

use std::{collections::HashSet, path::Path, str::FromStr};

use serde::Deserialize;

pub use error::{Error, Result};
pub use file::PlanFile;
pub use pygen_core::{FileRules, Overwrite};
pub use statement::*;
pub use validate::ParseContext;

const MIN_INDENT: u8 = 1;
const MAX_INDENT: u8 = 8;

/// Root schema of a plan file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    /// Output settings
    #[serde(default)]
    pub document: DocumentConfig,

    /// `import <module>` lines
    #[serde(default)]
    pub imports: Vec<String>,

    /// `from <module> import <symbols>` lines
    #[serde(default)]
    pub from_imports: Vec<FromImport>,

    /// Verbatim top-level lines placed after the imports
    #[serde(default)]
    pub expressions: Vec<String>,

    #[serde(default)]
    pub globals: Vec<GlobalDef>,

    #[serde(default)]
    pub functions: Vec<FunctionDef>,

    #[serde(default)]
    pub classes: Vec<ClassDef>,
}

/// The optional `[document]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentConfig {
    /// Spaces per indentation level, 1 to 8 (defaults to 4)
    #[serde(default)]
    pub indent: Option<u8>,

    /// Indent with tabs instead of spaces
    #[serde(default)]
    pub tabs: bool,

    /// What to do when the output file already exists
    #[serde(default)]
    pub overwrite: Overwrite,

    /// Comment placed at the top of the generated file
    #[serde(default)]
    pub header: Option<String>,
}

impl DocumentConfig {
    /// File rules described by this table.
    pub fn rules(&self) -> FileRules {
        FileRules {
            overwrite: self.overwrite,
            header: self.header.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FromImport {
    pub module: String,
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalDef {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionDef {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub params: Vec<ValueDef>,
    #[serde(default)]
    pub returns: Vec<ValueDef>,
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassDef {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub fields: Vec<ValueDef>,
    /// Extra constructor statements, run after the field assignments
    #[serde(default)]
    pub init: Vec<Statement>,
    #[serde(default)]
    pub methods: Vec<FunctionDef>,
}

impl FromStr for Plan {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "pygen.toml")
    }
}

impl Plan {
    /// Parse a plan file, choosing JSON for `.json` paths and TOML otherwise
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        PlanFile::open(path).map(PlanFile::into_plan)
    }

    /// Parse a TOML plan with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let plan: Self = toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        plan.validate(content, filename)?;
        Ok(plan)
    }

    /// Parse a JSON plan with a custom filename for error reporting
    pub fn from_json_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let plan: Self =
            serde_json::from_str(content).map_err(|e| Error::json(e, content, filename))?;
        plan.validate(content, filename)?;
        Ok(plan)
    }

    /// Find a function by name
    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Find a class by name
    pub fn class(&self, name: &str) -> Option<&ClassDef> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Validate the plan after parsing
    fn validate(&self, src: &str, filename: &str) -> Result<()> {
        let ctx = ParseContext::new(src, filename);

        let width = self.document.indent.filter(|_| !self.document.tabs);
        if let Some(width) = width.filter(|w| !(MIN_INDENT..=MAX_INDENT).contains(w)) {
            return Err(ctx.key_error(
                format!("indent width {width} is outside {MIN_INDENT}..={MAX_INDENT}"),
                "indent",
            ));
        }

        for global in &self.globals {
            ctx.validate_name(&global.name, "global")?;
        }

        for function in &self.functions {
            ctx.validate_name(&function.name, "function")?;
            function.validate(&ctx.push(&function.name), false)?;
        }

        let mut class_names = HashSet::new();
        for class in &self.classes {
            ctx.validate_name(&class.name, "class")?;
            if !class_names.insert(class.name.as_str()) {
                return Err(ctx.error(
                    format!("class '{}' is defined more than once", class.name),
                    &class.name,
                ));
            }
            class.validate(&ctx.push(&class.name))?;
        }

        Ok(())
    }
}

impl FunctionDef {
    fn validate(&self, ctx: &ParseContext<'_>, is_method: bool) -> Result<()> {
        let mut seen = HashSet::new();
        for param in &self.params {
            ctx.validate_name(&param.name, "parameter")?;
            if is_method && param.name == "self" {
                return Err(ctx.error(
                    format!(
                        "parameter 'self' in '{}' clashes with the receiver",
                        ctx.path_string()
                    ),
                    &param.name,
                ));
            }
            if !seen.insert(param.name.as_str()) {
                return Err(ctx.error(
                    format!(
                        "parameter '{}' appears more than once in '{}'",
                        param.name,
                        ctx.path_string()
                    ),
                    &param.name,
                ));
            }
        }
        for value in &self.returns {
            ctx.validate_name(&value.name, "return value")?;
        }
        validate_body(ctx, &self.body)
    }
}

impl ClassDef {
    fn validate(&self, ctx: &ParseContext<'_>) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            ctx.validate_name(&field.name, "field")?;
            if field.name == "self" {
                return Err(ctx.error(
                    format!("field 'self' in '{}' clashes with the receiver", ctx.path_string()),
                    &field.name,
                ));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(ctx.error(
                    format!(
                        "field '{}' is declared more than once in '{}'",
                        field.name,
                        ctx.path_string()
                    ),
                    &field.name,
                ));
            }
        }

        validate_body(ctx, &self.init)?;

        for method in &self.methods {
            ctx.validate_name(&method.name, "method")?;
            method.validate(&ctx.push(&method.name), true)?;
        }
        Ok(())
    }
}

fn validate_body(ctx: &ParseContext<'_>, body: &[Statement]) -> Result<()> {
    for statement in body {
        for name in statement.bound_names() {
            ctx.validate_name(name, "variable")?;
        }
        for child in statement.children() {
            validate_body(ctx, child)?;
        }
    }
    Ok(())
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
