use serde::Deserialize;

/// A named, optionally typed slot (`{ name = "a", type = "int" }`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueDef {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: String,
}

/// One entry of a body list.
///
/// A plain string is emitted as a single statement line; tables describe
/// nested blocks and are told apart by their leading key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Statement {
    Line(String),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    Enumerate(EnumerateStatement),
    Assign(AssignStatement),
}

/// `{ if = "...", then = [...], elif = [...], else = [...] }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IfStatement {
    #[serde(rename = "if")]
    pub condition: String,
    #[serde(default)]
    pub then: Vec<Statement>,
    #[serde(default)]
    pub elif: Vec<ElifBranch>,
    #[serde(rename = "else", default)]
    pub otherwise: Option<Vec<Statement>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElifBranch {
    #[serde(rename = "if")]
    pub condition: String,
    #[serde(default)]
    pub then: Vec<Statement>,
}

/// `{ while = "...", body = [...] }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WhileStatement {
    #[serde(rename = "while")]
    pub condition: String,
    #[serde(default)]
    pub body: Vec<Statement>,
}

/// `{ for = "i", start = 0, end = 3, body = [...] }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForStatement {
    #[serde(rename = "for")]
    pub var: String,
    pub start: i64,
    pub end: i64,
    #[serde(default)]
    pub body: Vec<Statement>,
}

/// `{ enumerate = "items", index = "i", item = "v", body = [...] }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumerateStatement {
    #[serde(rename = "enumerate")]
    pub iterable: String,
    pub index: String,
    pub item: String,
    #[serde(default)]
    pub body: Vec<Statement>,
}

/// `{ assign = { name = "t", type = "int" }, value = "..." }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssignStatement {
    pub assign: ValueDef,
    pub value: String,
}

impl Statement {
    /// Names this statement binds (loop variables and assignment targets).
    pub fn bound_names(&self) -> Vec<&str> {
        match self {
            Statement::For(stmt) => vec![stmt.var.as_str()],
            Statement::Enumerate(stmt) => vec![stmt.index.as_str(), stmt.item.as_str()],
            Statement::Assign(stmt) => vec![stmt.assign.name.as_str()],
            Statement::Line(_) | Statement::If(_) | Statement::While(_) => Vec::new(),
        }
    }

    /// Nested bodies, in emission order.
    pub fn children(&self) -> Vec<&[Statement]> {
        match self {
            Statement::Line(_) | Statement::Assign(_) => Vec::new(),
            Statement::If(stmt) => {
                let mut bodies = vec![stmt.then.as_slice()];
                bodies.extend(stmt.elif.iter().map(|branch| branch.then.as_slice()));
                bodies.extend(stmt.otherwise.as_deref());
                bodies
            }
            Statement::While(stmt) => vec![stmt.body.as_slice()],
            Statement::For(stmt) => vec![stmt.body.as_slice()],
            Statement::Enumerate(stmt) => vec![stmt.body.as_slice()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        body: Vec<Statement>,
    }

    fn parse(src: &str) -> Vec<Statement> {
        toml::from_str::<Body>(src).unwrap().body
    }

    #[test]
    fn test_line_statement() {
        let body = parse(r#"body = ["x = 1", "print(x)"]"#);
        assert_eq!(
            body,
            vec![
                Statement::Line("x = 1".into()),
                Statement::Line("print(x)".into())
            ]
        );
    }

    #[test]
    fn test_if_statement_with_branches() {
        let body = parse(
            r#"body = [{ if = "x > 0", then = ["a()"], elif = [{ if = "x < 0", then = ["b()"] }], else = ["c()"] }]"#,
        );
        let Statement::If(stmt) = &body[0] else {
            panic!("expected if statement, got {:?}", body[0]);
        };
        assert_eq!(stmt.condition, "x > 0");
        assert_eq!(stmt.elif.len(), 1);
        assert_eq!(stmt.elif[0].condition, "x < 0");
        assert_eq!(stmt.otherwise, Some(vec![Statement::Line("c()".into())]));
        assert_eq!(body[0].children().len(), 3);
    }

    #[test]
    fn test_loops_and_assign() {
        let body = parse(
            r#"body = [
                { while = "n > 0", body = ["n -= 1"] },
                { for = "i", start = 1, end = 10, body = [{ for = "j", start = 0, end = 2 }] },
                { enumerate = "items", index = "i", item = "v" },
                { assign = { name = "t", type = "int" }, value = "0" },
            ]"#,
        );
        assert!(matches!(body[0], Statement::While(_)));
        match &body[1] {
            Statement::For(stmt) => {
                assert_eq!((stmt.start, stmt.end), (1, 10));
                assert!(matches!(stmt.body[0], Statement::For(_)));
            }
            other => panic!("expected for statement, got {other:?}"),
        }
        assert_eq!(body[2].bound_names(), vec!["i", "v"]);
        assert_eq!(body[3].bound_names(), vec!["t"]);
    }

    #[test]
    fn test_unknown_block_is_rejected() {
        let result = toml::from_str::<Body>(r#"body = [{ until = "x", body = [] }]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_statements() {
        let body: Body =
            serde_json::from_str(r#"{"body": ["a()", {"while": "ok", "body": ["b()"]}]}"#).unwrap();
        assert_eq!(body.body.len(), 2);
        assert!(matches!(body.body[1], Statement::While(_)));
    }
}
