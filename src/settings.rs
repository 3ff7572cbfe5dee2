/// What construction does when the program fails to link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkPolicy {
    /// Log the link log and hand back a program with `is_linked() == false`
    #[default]
    Advisory,
    /// Release the program and return the link error
    Strict,
}

/// Knobs for building a `ShaderProgram`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSettings {
    pub link_policy: LinkPolicy,
    /// Geometry sources are only compiled when this is set
    pub geometry_stage: bool,
}

impl ShaderSettings {
    pub fn new() -> Self {
        Self {
            link_policy: LinkPolicy::Advisory,
            geometry_stage: false,
        }
    }

    pub fn strict() -> Self {
        Self {
            link_policy: LinkPolicy::Strict,
            ..Self::new()
        }
    }
}

impl Default for ShaderSettings {
    fn default() -> Self {
        Self::new()
    }
}
