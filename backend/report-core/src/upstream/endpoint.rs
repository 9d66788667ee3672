//! Endpoint shape selection.
//!
//! The provider accepts two URL layouts and rejects requests that pair a
//! credential with the wrong one:
//!
//! - account-scoped: `<base>/v1/chat/completions`
//! - project-scoped: `<base>/v1/projects/<project-id>/chat/completions`
//!
//! The choice is made here and nowhere else.

use crate::error::ConfigError;

use std::fmt;

use url::Url;

const API_VERSION_SEGMENT: &str = "v1";
const PROJECTS_SEGMENT: &str = "projects";
const CHAT_COMPLETIONS_SEGMENTS: [&str; 2] = ["chat", "completions"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointShape {
    AccountScoped,
    ProjectScoped { project_id: String },
}

impl EndpointShape {
    /// Project-scoped exactly when a non-blank project id is configured.
    pub fn select(project_id: Option<&str>) -> Self {
        match project_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(project_id) => EndpointShape::ProjectScoped {
                project_id: project_id.to_string(),
            },
            None => EndpointShape::AccountScoped,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EndpointShape::AccountScoped => "account-scoped",
            EndpointShape::ProjectScoped { .. } => "project-scoped",
        }
    }

    /// Append this shape's path to `base_url`.
    ///
    /// The project id is pushed as a single percent-encoded segment.
    #[track_caller]
    pub fn resolve(&self, base_url: &Url) -> Result<Url, ConfigError> {
        let mut url = base_url.clone();
        url.set_query(None);
        url.set_fragment(None);

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ConfigError::endpoint(format!("base URL '{base_url}' cannot carry a path"))
            })?;
            segments.pop_if_empty().push(API_VERSION_SEGMENT);
            if let EndpointShape::ProjectScoped { project_id } = self {
                segments.push(PROJECTS_SEGMENT).push(project_id);
            }
            segments.extend(CHAT_COMPLETIONS_SEGMENTS);
        }

        Ok(url)
    }
}

impl fmt::Display for EndpointShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A resolved completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    shape: EndpointShape,
    url: Url,
}

impl Endpoint {
    #[track_caller]
    pub fn resolve(base_url: &Url, project_id: Option<&str>) -> Result<Self, ConfigError> {
        let shape = EndpointShape::select(project_id);
        let url = shape.resolve(base_url)?;
        Ok(Self { shape, url })
    }

    pub fn shape(&self) -> &EndpointShape {
        &self.shape
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}
