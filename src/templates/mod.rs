//! Embedded Tera templates for the listing and post pages
//!
//! All templates are compiled into the binary with `include_str!`, so a
//! deployment is a single executable plus its `_config.yml`.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::PostDocument;
use crate::helpers::date::display_date;
use crate::listing::ViewState;

/// Template renderer with the embedded views
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all views loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("views/layout.html")),
            ("index.html", include_str!("views/index.html")),
            ("post.html", include_str!("views/post.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render the listing page
    ///
    /// `error` carries a transient message for a failed load-more; the
    /// load-more affordance renders only while the state has a token.
    pub fn render_listing(
        &self,
        config: &SiteConfig,
        state: &ViewState,
        preview: bool,
        error: Option<&str>,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(config));
        context.insert("posts", &state.posts);
        context.insert("next_token", &state.continuation_token);
        context.insert("page_index", &state.page_index);
        context.insert("preview", &preview);
        context.insert("error", &error);

        Ok(self.tera.render("index.html", &context)?)
    }

    /// Render an individual post page
    pub fn render_post(
        &self,
        config: &SiteConfig,
        document: &PostDocument,
        preview: bool,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(config));
        context.insert("post", &PostView::from_document(document));
        context.insert("preview", &preview);

        Ok(self.tera.render("post.html", &context)?)
    }
}

/// Site fields exposed to every template
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub language: String,
}

impl SiteData {
    fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            language: config.language.clone(),
        }
    }
}

/// A post document formatted for the post template
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: String,
    pub published_at: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub sections: Vec<SectionView>,
}

/// A body section as rendered
#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub heading: String,
    pub body: String,
}

impl PostView {
    fn from_document(document: &PostDocument) -> Self {
        Self {
            id: document.id.clone(),
            published_at: display_date(document.published_at.as_ref()),
            title: document.title.clone(),
            subtitle: document.subtitle.clone(),
            author: document.author.clone(),
            sections: document
                .sections
                .iter()
                .map(|s| SectionView {
                    heading: s.heading.clone(),
                    body: s.body.clone(),
                })
                .collect(),
        }
    }
}
