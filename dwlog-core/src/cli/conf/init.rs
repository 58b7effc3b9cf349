use crate::conf::CONFIG_FILE_NAME;
use anyhow::{Context, Result, bail};
use rust_embed::RustEmbed;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(RustEmbed)]
#[folder = "config-templates/"]
pub struct ConfigTemplates;

/// Directories the template refers to, created next to the config.
const LAYOUT_DIRS: [&str; 4] = ["DW", "web/exports", "web/assets", "backend"];

pub fn init(path: PathBuf) -> Result<()> {
    // Refuse to overwrite an existing non-empty directory
    if path.exists() {
        if path.is_file() {
            bail!("{} exists and is not a directory", path.display());
        }

        let is_empty = fs::read_dir(&path)?.next().is_none();
        if !is_empty {
            bail!(
                "config directory '{}' already exists and is not empty",
                path.display()
            );
        }
    }

    for dir in LAYOUT_DIRS {
        let dir = path.join(dir);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    write_file(&path.join(CONFIG_FILE_NAME), &template(CONFIG_FILE_NAME)?)?;

    println!("✔ Initialized dwlog config in {}", path.display());
    println!("✔ Created:");
    println!("  - {CONFIG_FILE_NAME}");
    for dir in LAYOUT_DIRS {
        println!("  - {dir}/");
    }
    println!();
    println!("Next steps:");
    println!("  copy node logs into {}", path.join("DW").display());
    println!("  dwlog conf check {}", path.display());
    println!("  dwlog run --config {}", path.display());

    Ok(())
}

/// Fetch an embedded config template as UTF-8 text
fn template(path: &str) -> Result<String> {
    let file = ConfigTemplates::get(path)
        .with_context(|| format!("missing embedded config template: {path}"))?;

    let s =
        std::str::from_utf8(file.data.as_ref()).context("config template is not valid UTF-8")?;

    Ok(s.to_owned())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let mut f =
        fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    f.write_all(contents.trim_start().as_bytes())?;
    Ok(())
}
