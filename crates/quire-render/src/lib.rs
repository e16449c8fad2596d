//! Document render pipeline.
//!
//! A thin seam between resolved documents and the markdown compiler. The
//! pipeline strips front matter and hands the body plus decoded metadata to
//! a [`Compiler`]; what the compiler produces is up to the presentation
//! layer. [`CmarkCompiler`] is the default `pulldown-cmark` implementation.
//!
//! # Example
//!
//! ```
//! use quire_content::Document;
//! use quire_render::RenderPipeline;
//!
//! let doc = Document::new("/content/1.a.md", "---\ntitle: Hello\n---\n**Bold** text");
//! let rendered = RenderPipeline::new().render(&doc);
//! assert_eq!(rendered.title.as_deref(), Some("Hello"));
//! assert!(rendered.html.contains("<strong>Bold</strong>"));
//! ```

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use serde_json::{Map, Value};

use quire_content::Document;

/// Output of a compile pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    /// Compiled markup.
    pub html: String,
    /// Document title (metadata override or first heading).
    pub title: Option<String>,
}

/// Markdown-to-markup compiler seam.
///
/// The engine only requires that a compiler accepts plain body text plus a
/// metadata map; its internals belong to the presentation layer.
pub trait Compiler {
    /// Compile a front-matter-stripped document body.
    fn compile(&self, body: &str, metadata: &Map<String, Value>) -> Rendered;
}

/// Default compiler backed by `pulldown-cmark` (GFM tables and
/// strikethrough enabled). Extracts the first H1 text as the title.
#[derive(Clone, Copy, Debug, Default)]
pub struct CmarkCompiler;

impl CmarkCompiler {
    /// Create the default compiler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Compiler for CmarkCompiler {
    fn compile(&self, body: &str, _metadata: &Map<String, Value>) -> Rendered {
        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
        let events: Vec<Event<'_>> = Parser::new_ext(body, options).collect();

        let mut html_out = String::new();
        html::push_html(&mut html_out, events.iter().cloned());

        Rendered {
            html: html_out,
            title: extract_h1(&events),
        }
    }
}

/// Text content of the first level-1 heading, if any.
fn extract_h1(events: &[Event<'_>]) -> Option<String> {
    let mut title = String::new();
    let mut in_h1 = false;
    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_h1 = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                return Some(title);
            }
            Event::Text(text) | Event::Code(text) if in_h1 => title.push_str(text),
            _ => {}
        }
    }
    None
}

/// Renders documents through a [`Compiler`].
#[derive(Clone, Debug, Default)]
pub struct RenderPipeline<C = CmarkCompiler> {
    compiler: C,
}

impl RenderPipeline {
    /// Pipeline over the default [`CmarkCompiler`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            compiler: CmarkCompiler,
        }
    }
}

impl<C: Compiler> RenderPipeline<C> {
    /// Pipeline over a custom compiler.
    #[must_use]
    pub fn with_compiler(compiler: C) -> Self {
        Self { compiler }
    }

    /// Render a document: front matter stripped, body compiled, metadata
    /// `title` preferred over the extracted heading.
    #[must_use]
    pub fn render(&self, doc: &Document) -> Rendered {
        let mut rendered = self.compiler.compile(doc.body(), doc.metadata());
        if let Some(title) = doc.title() {
            rendered.title = Some(title.to_owned());
        }
        rendered
    }
}
