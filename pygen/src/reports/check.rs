//! Check command report data structures.

use std::path::PathBuf;

use pygen_codegen::{Function, Value};
use pygen_plan::Plan;

use super::output::{Output, Report};

/// Report data from plan validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the plan file.
    pub plan_path: PathBuf,
    pub imports: usize,
    pub globals: usize,
    /// Function signatures, in declaration order.
    pub functions: Vec<String>,
    pub classes: Vec<ClassSummary>,
}

/// One class of a checked plan.
#[derive(Debug)]
pub struct ClassSummary {
    pub name: String,
    pub fields: usize,
    /// Method signatures, constructor first.
    pub methods: Vec<String>,
}

impl CheckReport {
    /// Summarize a plan that passed validation.
    pub fn new(plan_path: PathBuf, plan: &Plan) -> Self {
        let classes = plan
            .classes
            .iter()
            .map(|class| {
                let constructor = Function::new("__init__")
                    .params(class.fields.iter().map(Value::from));
                let methods = std::iter::once(describe(&constructor, true))
                    .chain(
                        class
                            .methods
                            .iter()
                            .map(|method| describe(&method.to_function(), true)),
                    )
                    .collect();
                ClassSummary {
                    name: class.name.clone(),
                    fields: class.fields.len(),
                    methods,
                }
            })
            .collect();

        Self {
            plan_path,
            imports: plan.imports.len() + plan.from_imports.len(),
            globals: plan.globals.len(),
            functions: plan
                .functions
                .iter()
                .map(|function| describe(&function.to_function(), false))
                .collect(),
            classes,
        }
    }
}

/// `name(params) -> annotation`, with the receiver for methods.
fn describe(function: &Function, method: bool) -> String {
    let params = function.parameter_list();
    let params = match (method, params.is_empty()) {
        (true, true) => "self".to_string(),
        (true, false) => format!("self, {params}"),
        (false, _) => params,
    };
    format!(
        "{}({}) -> {}",
        function.name(),
        params,
        function.return_annotation()
    )
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.success(&format!("{} is valid", self.plan_path.display()));
        out.newline();

        out.key_value("Imports", &self.imports.to_string());
        out.key_value("Globals", &self.globals.to_string());

        if !self.functions.is_empty() {
            out.section(&format!("Functions ({})", self.functions.len()));
            for function in &self.functions {
                out.list_item(function);
            }
        }

        if !self.classes.is_empty() {
            out.section(&format!("Classes ({})", self.classes.len()));
            for class in &self.classes {
                out.list_item(&format!("{} ({})", class.name, plural(class.fields, "field")));
                for method in &class.methods {
                    out.nested_item(method);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::RecordingOutput;

    #[test]
    fn test_check_report() {
        let plan: Plan = r#"
imports = ["os"]

[[from_imports]]
module = "typing"
symbols = ["Any"]

[[functions]]
name = "add"
params = [{ name = "a", type = "int" }, { name = "b", type = "int" }]
returns = [{ name = "s", type = "int" }]

[[classes]]
name = "Dev"
fields = [{ name = "name", type = "str" }]

[[classes.methods]]
name = "reset"
"#
        .parse()
        .unwrap();

        let report = CheckReport::new(PathBuf::from("module.toml"), &plan);
        let mut out = RecordingOutput::default();
        report.render(&mut out);

        insta::assert_snapshot!(out.text(), @r"
        ✓ module.toml is valid

        Imports: 2
        Globals: 0
        Functions (1):
          - add(a:int, b:int) -> int
        Classes (1):
          - Dev (1 field)
              __init__(self, name:str) -> None
              reset(self) -> None
        ");
    }
}
