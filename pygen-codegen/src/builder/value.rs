//! Named, typed slots.

/// A parameter, return value, member field or assignment target.
///
/// The receiver (`self`) is marked by a flag rather than by its name, so a
/// value a caller happens to call `self` is still rendered as an ordinary
/// annotated name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Value {
    name: String,
    ty: String,
    receiver: bool,
}

impl Value {
    /// Name the receiver renders as.
    pub const RECEIVER_NAME: &'static str = "self";

    /// Create a named value with a type annotation (may be empty).
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            receiver: false,
        }
    }

    /// The implicit instance receiver of methods and constructors.
    pub fn receiver() -> Self {
        Self {
            name: Self::RECEIVER_NAME.to_string(),
            ty: String::new(),
            receiver: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn is_receiver(&self) -> bool {
        self.receiver
    }

    /// Render as an entry of a parameter list (`name:type`, or bare).
    pub fn as_param(&self) -> String {
        if self.receiver || self.ty.is_empty() {
            self.name.clone()
        } else {
            format!("{}:{}", self.name, self.ty)
        }
    }

    /// Render as the left-hand side of an annotated assignment.
    pub fn as_target(&self) -> String {
        if self.receiver || self.ty.is_empty() {
            self.name.clone()
        } else {
            format!("{}: {}", self.name, self.ty)
        }
    }
}

impl<N: Into<String>, T: Into<String>> From<(N, T)> for Value {
    fn from((name, ty): (N, T)) -> Self {
        Self::new(name, ty)
    }
}
