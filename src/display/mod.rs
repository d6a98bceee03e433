//! Where rendered scenes go. The rover pushes a complete fragment after every
//! render and forgets about it; a sink that fails only gets logged.
use std::io::Write;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};

use crate::errors::Result;

const PAGE_TEMPLATE: &str = "page.html";

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
<style>body { margin: 0; background: #222; } .roverdrive { margin: 1em auto; width: max-content; }</style>
</head>
<body>
{{ fragment | safe }}
</body>
</html>
"#;

pub trait DisplaySink {
    /// Replaces whatever is currently shown with `markup`.
    fn update(&mut self, markup: &str) -> Result<()>;
}

/// Keeps every fragment it is handed. Useful for tests and for replaying a
/// run frame by frame.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    frames: Vec<String>,
}

impl Recorder {
    pub fn new() -> Recorder {
        Recorder::default()
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn last(&self) -> Option<&str> {
        self.frames.last().map(|f| f.as_str())
    }
}

impl DisplaySink for Recorder {
    fn update(&mut self, markup: &str) -> Result<()> {
        self.frames.push(markup.to_string());
        Ok(())
    }
}

/// Prints every fragment to stdout.
#[derive(Debug, Default)]
pub struct Stdout;

impl DisplaySink for Stdout {
    fn update(&mut self, markup: &str) -> Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", markup)?;
        Ok(())
    }
}

/// Rewrites a standalone HTML page in place on every update, so a browser
/// pointed at it always shows the latest frame after a reload.
pub struct HtmlFile {
    path: PathBuf,
    title: String,
    templates: Tera,
}

impl HtmlFile {
    pub fn new<P: AsRef<Path>>(path: P, title: &str) -> Result<HtmlFile> {
        let mut templates = Tera::default();
        templates.add_raw_template(PAGE_TEMPLATE, PAGE)?;
        Ok(HtmlFile {
            path: path.as_ref().to_path_buf(),
            title: title.to_string(),
            templates,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full page around `fragment`.
    pub fn page(&self, fragment: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("title", &self.title);
        context.insert("fragment", fragment);
        Ok(self.templates.render(PAGE_TEMPLATE, &context)?)
    }
}

impl DisplaySink for HtmlFile {
    fn update(&mut self, markup: &str) -> Result<()> {
        let page = self.page(markup)?;
        // Write beside the target and rename so a reload never sees half a page.
        let tmp_path = self
            .path
            .with_extension(format!("tmp-{}", rand::random::<u32>()));
        std::fs::write(&tmp_path, page)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_recorder() {
        let mut sink = Recorder::new();
        assert_eq!(sink.last(), None);
        sink.update("<div>one</div>").unwrap();
        sink.update("<div>two</div>").unwrap();
        assert_eq!(sink.frames().len(), 2);
        assert_eq!(sink.last(), Some("<div>two</div>"));
    }

    #[test]
    fn test_stdout() {
        let mut sink = Stdout;
        sink.update(r#"<div class="roverdrive"><svg/></div>"#).unwrap();
    }

    #[test]
    fn test_html_page() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("rover.html");
        let mut sink = HtmlFile::new(&target, "Mission 4").unwrap();
        sink.update(r#"<div class="roverdrive"><svg/></div>"#).unwrap();
        sink.update(r#"<div class="roverdrive"><svg id="second"/></div>"#)
            .unwrap();
        let page = std::fs::read_to_string(&target).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Mission 4</title>"));
        assert!(page.contains(r#"<svg id="second"/>"#));
        assert!(!page.contains("&lt;"));
        // Only the page itself is left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
