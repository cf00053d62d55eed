//! `issuesync render`: preview a rendered issue without touching GitHub.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use issuesync_renderer::TemplateEngine;
use issuesync_sync::render_file;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Issue file to render.
    pub file: PathBuf,

    /// Print `{"title", "body"}` as JSON.
    #[arg(long)]
    pub json: bool,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let (_host, context) = super::load_host()?;
        let engine = TemplateEngine::new();
        let prepared = render_file(&self.file, &engine, &context)
            .with_context(|| format!("failed to render {}", self.file.display()))?;

        if self.json {
            let json = serde_json::to_string_pretty(&prepared.rendered)?;
            println!("{json}");
            return Ok(());
        }

        let body = &prepared.rendered.body;
        println!("{}", prepared.rendered.title);
        println!();
        print!("{body}");
        if !body.is_empty() && !body.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}
