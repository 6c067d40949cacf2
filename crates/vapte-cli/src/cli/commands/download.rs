//! Download command handler: render the completion page, then fetch the
//! generated file.

use std::path::Path;

use anyhow::{Context, Result};
use vapte_core::client::{self, ApiClient};
use vapte_core::config::Config;
use vapte_core::page;

pub async fn run(config: &Config, filename: &str, out_dir: &Path) -> Result<()> {
    let client = ApiClient::from_config(config)?;

    let page_path = client::download_page_path(filename);
    let html = client
        .get_text(&page_path)
        .await
        .with_context(|| format!("fetch {page_path}"))?;

    let heading = page::page_heading(&html);
    let emphasis = page::completion_emphasis(heading.as_deref(), page::has_download_link(&html));
    if let Some(heading) = &heading {
        if emphasis.highlight_heading {
            println!("✓ {heading}");
        } else {
            println!("{heading}");
        }
    }

    let file_path = client::download_file_path(filename);
    let bytes = client
        .download(&file_path)
        .await
        .with_context(|| format!("fetch {file_path}"))?;

    let target = out_dir.join(filename);
    std::fs::write(&target, &bytes).with_context(|| format!("write {}", target.display()))?;

    // the emboldened-link marker carries over to the saved line
    let marker = if emphasis.embolden_download_link {
        "✓ "
    } else {
        ""
    };
    println!("{marker}Saved {} ({} bytes)", target.display(), bytes.len());
    Ok(())
}
