//! Page template loading and rendering.
//!
//! # Responsibility
//! - Load the base layout and every page fragment once at startup.
//! - Render a named view with a serializable context.
//!
//! # Invariants
//! - Construction fails unless every required template file exists and parses.
//! - Undefined context fields are render errors, never silently blank.
//! - `.html` templates are HTML auto-escaped.

use log::{debug, info};
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Shared layout every page fragment extends.
pub const BASE_TEMPLATE: &str = "base.html";

/// Registered view names and their fragment files.
pub const VIEWS: [(&str, &str); 3] = [
    ("index", "index.html"),
    ("add", "add.html"),
    ("edit", "edit.html"),
];

/// Startup failure while loading templates.
#[derive(Debug)]
pub enum TemplateLoadError {
    /// A required template file does not exist.
    Missing { name: &'static str, path: PathBuf },
    /// A template file exists but could not be read.
    Io {
        name: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    /// A template file failed to compile.
    Syntax {
        name: &'static str,
        source: minijinja::Error,
    },
}

impl Display for TemplateLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { name, path } => {
                write!(f, "template `{name}` not found at `{}`", path.display())
            }
            Self::Io { name, path, source } => write!(
                f,
                "failed to read template `{name}` at `{}`: {source}",
                path.display()
            ),
            Self::Syntax { name, source } => write!(f, "template `{name}` is invalid: {source}"),
        }
    }
}

impl Error for TemplateLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Missing { .. } => None,
            Self::Io { source, .. } => Some(source),
            Self::Syntax { source, .. } => Some(source),
        }
    }
}

/// Failure while rendering one view.
#[derive(Debug)]
pub enum RenderError {
    /// The view name is not registered.
    ViewNotFound(String),
    /// The template rejected the context or failed mid-render.
    Render(minijinja::Error),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ViewNotFound(name) => write!(f, "view not found: `{name}`"),
            Self::Render(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ViewNotFound(_) => None,
            Self::Render(err) => Some(err),
        }
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(value: minijinja::Error) -> Self {
        Self::Render(value)
    }
}

/// Precompiled page views.
#[derive(Debug)]
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Loads the base layout and all view fragments from `dir`.
    ///
    /// # Errors
    /// Returns the first missing, unreadable, or unparsable template.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, TemplateLoadError> {
        let dir = dir.as_ref();
        let started_at = Instant::now();
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        let files = std::iter::once(BASE_TEMPLATE).chain(VIEWS.iter().map(|(_, file)| *file));
        for name in files {
            let path = dir.join(name);
            let source = std::fs::read_to_string(&path).map_err(|err| {
                if err.kind() == io::ErrorKind::NotFound {
                    TemplateLoadError::Missing { name, path: path.clone() }
                } else {
                    TemplateLoadError::Io {
                        name,
                        path: path.clone(),
                        source: err,
                    }
                }
            })?;
            env.add_template_owned(name, source)
                .map_err(|source| TemplateLoadError::Syntax { name, source })?;
            debug!("event=template_load module=view status=ok name={name}");
        }

        info!(
            "event=templates_load module=view status=ok dir={} views={} duration_ms={}",
            dir.display(),
            VIEWS.len(),
            started_at.elapsed().as_millis()
        );
        Ok(Self { env })
    }

    /// Renders a registered view to an HTML string.
    pub fn render<S: Serialize>(&self, view: &str, context: S) -> Result<String, RenderError> {
        let file = VIEWS
            .iter()
            .find(|(name, _)| *name == view)
            .map(|(_, file)| *file)
            .ok_or_else(|| RenderError::ViewNotFound(view.to_string()))?;
        let template = self.env.get_template(file)?;
        Ok(template.render(context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{RenderError, TemplateLoadError, Views, BASE_TEMPLATE};
    use minijinja::context;
    use std::fs;
    use std::path::Path;

    fn write_templates(dir: &Path) {
        fs::write(
            dir.join(BASE_TEMPLATE),
            "<html><body>{% block content %}{% endblock %}</body></html>",
        )
        .unwrap();
        fs::write(
            dir.join("index.html"),
            "{% extends \"base.html\" %}{% block content %}{% for n in notes %}<p>{{ n }}</p>{% endfor %}{% endblock %}",
        )
        .unwrap();
        fs::write(
            dir.join("add.html"),
            "{% extends \"base.html\" %}{% block content %}<form></form>{% endblock %}",
        )
        .unwrap();
        fs::write(
            dir.join("edit.html"),
            "{% extends \"base.html\" %}{% block content %}{{ note.id }}{% endblock %}",
        )
        .unwrap();
    }

    #[test]
    fn renders_fragment_inside_base_layout() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path());
        let views = Views::load(dir.path()).unwrap();

        let html = views
            .render("index", context! { notes => vec!["<b>x</b>"] })
            .unwrap();
        assert_eq!(
            html,
            "<html><body><p>&lt;b&gt;x&lt;&#x2f;b&gt;</p></body></html>"
        );
    }

    #[test]
    fn missing_template_file_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path());
        fs::remove_file(dir.path().join("edit.html")).unwrap();

        let err = Views::load(dir.path()).unwrap_err();
        assert!(matches!(err, TemplateLoadError::Missing { name: "edit.html", .. }));
    }

    #[test]
    fn malformed_template_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path());
        fs::write(dir.path().join("add.html"), "{% block content %}").unwrap();

        let err = Views::load(dir.path()).unwrap_err();
        assert!(matches!(err, TemplateLoadError::Syntax { name: "add.html", .. }));
    }

    #[test]
    fn unknown_view_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path());
        let views = Views::load(dir.path()).unwrap();

        let err = views.render("settings", context! {}).unwrap_err();
        assert!(matches!(err, RenderError::ViewNotFound(ref name) if name == "settings"));
    }

    #[test]
    fn missing_context_field_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path());
        let views = Views::load(dir.path()).unwrap();

        let err = views.render("edit", context! {}).unwrap_err();
        assert!(matches!(err, RenderError::Render(_)));
    }
}
