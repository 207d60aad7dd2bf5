use crate::blog::{PostFields, Slug};
use serde::{Deserialize, Serialize};

/// The post fields as they arrived, before anything is known about them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub(super) struct Submission {
    pub title: Option<String>,
    pub slug: Option<Slug>,
    pub markdown: Option<String>,
}

/// One message per field, `None` where the field is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub(super) struct ValidationErrors {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub markdown: Option<String>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|it| !it.is_empty())
}

fn required(value: Option<&str>, field: &str) -> Option<String> {
    present(value)
        .is_none()
        .then(|| format!("{field} is required"))
}

impl Submission {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn markdown(&self) -> Option<&str> {
        self.markdown.as_deref()
    }

    /// Presence check only; what the fields contain is up to the store.
    pub fn validate(&self) -> Result<PostFields, ValidationErrors> {
        let errors = ValidationErrors {
            title: required(self.title(), "Title"),
            slug: required(self.slug.as_deref(), "Slug"),
            markdown: required(self.markdown(), "Markdown"),
        };

        match (
            present(self.title()),
            present(self.slug.as_deref()),
            present(self.markdown()),
        ) {
            (Some(title), Some(slug), Some(markdown)) => Ok(PostFields {
                title: title.to_owned(),
                slug: slug.to_owned(),
                markdown: markdown.to_owned(),
            }),
            _ => Err(errors),
        }
    }
}
