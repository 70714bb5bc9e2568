//! Runtime template substitution.

use std::fmt::{Display, Write};

use crate::{Error, Result};

/// Substitute `args` into the `{}` placeholders of `template`, in order.
///
/// `{{` and `}}` produce literal braces. The number of placeholders must
/// match the number of arguments exactly.
///
/// ```
/// use pygen_codegen::interpolate;
///
/// let line = interpolate("{} = {{}}.get({})", &[&"cache", &42])?;
/// assert_eq!(line, "cache = {}.get(42)");
/// # Ok::<(), pygen_codegen::Error>(())
/// ```
pub fn interpolate(template: &str, args: &[&dyn Display]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut placeholders = 0;
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' => match chars.next() {
                Some((_, '{')) => out.push('{'),
                Some((_, '}')) => {
                    if let Some(arg) = args.get(placeholders) {
                        // Writing into a String cannot fail
                        let _ = write!(out, "{arg}");
                    }
                    placeholders += 1;
                }
                Some(_) => return Err(syntax(template, position, "unsupported placeholder")),
                None => return Err(syntax(template, position, "unclosed '{'")),
            },
            '}' => match chars.next() {
                Some((_, '}')) => out.push('}'),
                _ => return Err(syntax(template, position, "unmatched '}'")),
            },
            _ => out.push(c),
        }
    }

    if placeholders != args.len() {
        return Err(Error::FormatArity {
            template: template.to_string(),
            placeholders,
            args: args.len(),
        });
    }

    Ok(out)
}

fn syntax(template: &str, position: usize, reason: &'static str) -> Error {
    Error::FormatSyntax {
        template: template.to_string(),
        position,
        reason,
    }
}
