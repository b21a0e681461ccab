#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Option text without a `key:value` shape, or a known key with an unusable value.
    MalformedOption,
    /// Well-formed option the receiving function does not understand.
    UnknownOption,
    /// `animation:<name>` names no animation function.
    UnresolvedAnimation,
    /// Trigger source function or clock does not exist.
    UnresolvedTrigger,
    /// Art nesting exceeded the configured scan depth; the subtree was skipped.
    DepthLimit,
    /// A crop layer has no visible art, so it cannot size the document.
    EmptyCrop,
}

/// Non-fatal problem found while compiling. Compilation always continues past these.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CompileWarning {
    pub kind: WarningKind,
    /// Function or layer the warning is about, when known.
    pub function: Option<String>,
    pub message: String,
}

impl CompileWarning {
    pub fn new(kind: WarningKind, function: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            kind,
            function: function.map(str::to_owned),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.function {
            Some(function) => write!(f, "{function}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}
