//! Indentation configuration for code generation.

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

const SPACES: &str = "        ";

impl Indent {
    /// 4-space indentation (PEP 8).
    pub const PYTHON: Self = Self::Spaces(4);

    /// Convert to the string representation for one indent level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(n @ 1..=8) => &SPACES[..usize::from(*n)],
            // Fallback to 4 whitespaces
            Self::Spaces(_) => &SPACES[..4],
            Self::Tab => "\t",
        }
    }

    /// Leading whitespace for a line at `depth`.
    pub fn prefix(&self, depth: usize) -> String {
        self.as_str().repeat(depth)
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::PYTHON
    }
}
