use std::fmt;
use std::path::PathBuf;

/// What kind of file a [`ViewerError::ResourceLoad`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    Shader,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Image => f.write_str("image"),
            ResourceKind::Shader => f.write_str("shader"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStageKind {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStageKind::Vertex => f.write_str("vertex"),
            ShaderStageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// Failures surfaced by the renderer.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// A file could not be read or decoded.
    #[error("failed to load {kind} from {}: {reason}", .path.display())]
    ResourceLoad {
        kind: ResourceKind,
        path: PathBuf,
        reason: String,
    },
    /// A shader module was rejected by the GLSL frontend or validator.
    #[error("{stage} shader '{label}' failed to compile: {message}")]
    Compile {
        stage: ShaderStageKind,
        label: String,
        message: String,
    },
    /// The vertex and fragment stages could not be combined into a pipeline.
    #[error("failed to link render pipeline: {message}")]
    Link { message: String },
    /// Window, event loop or GPU device could not be created.
    #[error("platform initialisation failed: {0}")]
    PlatformInit(String),
}

impl ViewerError {
    pub(crate) fn image(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        ViewerError::ResourceLoad {
            kind: ResourceKind::Image,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn shader(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        ViewerError::ResourceLoad {
            kind: ResourceKind::Shader,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn platform(reason: impl fmt::Display) -> Self {
        ViewerError::PlatformInit(reason.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_errors_mention_kind_and_path() {
        let err = ViewerError::image("/tmp/missing.png", "not found");
        let message = err.to_string();
        assert!(message.contains("image"));
        assert!(message.contains("/tmp/missing.png"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn platform_and_link_errors_carry_their_reason() {
        let platform = ViewerError::platform("no adapter");
        assert!(matches!(platform, ViewerError::PlatformInit(_)));
        assert!(platform.to_string().contains("no adapter"));
        let link = ViewerError::Link {
            message: "mismatched interface".into(),
        };
        assert!(link.to_string().contains("mismatched interface"));
    }
}
