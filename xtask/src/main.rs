//! Build automation tasks for Star Catcher
//!
//! Usage:
//!   cargo xtask build-web       # Build WASM for web deployment
//!   cargo xtask check-assets    # Verify asset files against the declared sizes

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const BINARY_NAME: &str = "star-catcher";
const MQ_JS_BUNDLE: &str = "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";

/// One asset the game declares in its preload phase.
struct DeclaredAsset {
    key: &'static str,
    file: &'static str,
    width: u32,
    height: u32,
    /// Frame size for spritesheets
    frame: Option<(u32, u32)>,
}

/// Must match the game scene's preload declarations.
const ASSETS: [DeclaredAsset; 5] = [
    DeclaredAsset { key: "sky", file: "sky.png", width: 800, height: 600, frame: None },
    DeclaredAsset { key: "bomb", file: "bomb.png", width: 14, height: 14, frame: None },
    DeclaredAsset { key: "ground", file: "platform.png", width: 400, height: 32, frame: None },
    DeclaredAsset { key: "star", file: "star.png", width: 24, height: 22, frame: None },
    DeclaredAsset { key: "dude", file: "dude.png", width: 288, height: 48, frame: Some((32, 48)) },
];

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for Star Catcher")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build WASM for web deployment
    BuildWeb {
        /// Mark as dev build (adds a DEV tag to index.html)
        #[arg(long)]
        dev: bool,
    },
    /// Check that every declared asset exists and has the declared size
    CheckAssets {
        /// Asset directory (defaults to <root>/assets)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::BuildWeb { dev } => build_web(dev),
        Commands::CheckAssets { dir } => {
            let dir = dir.unwrap_or_else(|| project_root().join("assets"));
            let problems = check_assets(&dir)?;
            if problems.is_empty() {
                println!("All {} assets OK in {}", ASSETS.len(), dir.display());
                Ok(())
            } else {
                for problem in &problems {
                    println!("  {}", problem);
                }
                bail!("{} asset problem(s) found", problems.len())
            }
        }
    }
}

/// Get the project root directory
fn project_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.parent().unwrap_or(manifest).to_path_buf()
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Download a file from URL to destination
fn download_file(url: &str, dest: &Path) -> Result<()> {
    println!("Downloading {}...", url);
    run_cmd(Command::new("curl").args(["-L", "-o"]).arg(dest).arg(url))
}

/// Copy directory recursively
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

fn index_html(dev: bool) -> String {
    let title = if dev { "[DEV] Star Catcher" } else { "Star Catcher" };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
        html, body {{ margin: 0; padding: 0; height: 100%; overflow: hidden; background: #0a0a0d; }}
        canvas {{ display: block; margin: 0 auto; width: 800px; height: 600px; }}
    </style>
</head>
<body>
    <canvas id="glcanvas" tabindex="1"></canvas>
    <script src="mq_js_bundle.js"></script>
    <script>load("{BINARY_NAME}.wasm");</script>
</body>
</html>
"#
    )
}

/// Build WASM for web deployment
fn build_web(dev: bool) -> Result<()> {
    let root = project_root();
    let dist = root.join("dist/web");

    println!("Building WASM...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--target", "wasm32-unknown-unknown"]),
    )?;

    // Clean and create dist folder
    if dist.exists() {
        fs::remove_dir_all(&dist)?;
    }
    fs::create_dir_all(&dist)?;

    println!("Copying files to dist/web...");
    let wasm = format!("{BINARY_NAME}.wasm");
    fs::copy(root.join("target/wasm32-unknown-unknown/release").join(&wasm), dist.join(&wasm))
        .context("WASM binary missing after build")?;
    fs::write(dist.join("index.html"), index_html(dev))?;

    let mq_js = dist.join("mq_js_bundle.js");
    if !mq_js.exists() {
        download_file(MQ_JS_BUNDLE, &mq_js)?;
    }

    let assets = root.join("assets");
    if assets.exists() {
        copy_dir_recursive(&assets, &dist.join("assets"))?;
    } else {
        println!("No assets/ directory, the game will draw placeholders");
    }

    println!("Web build complete: dist/web/");
    Ok(())
}

/// Every problem found with the asset directory; empty when all is well.
fn check_assets(dir: &Path) -> Result<Vec<String>> {
    let mut problems = Vec::new();

    for asset in &ASSETS {
        let path = dir.join(asset.file);
        if !path.exists() {
            problems.push(format!("{}: {} is missing", asset.key, path.display()));
            continue;
        }

        let (width, height) = match image::image_dimensions(&path) {
            Ok(size) => size,
            Err(e) => {
                problems.push(format!("{}: {} is not a PNG ({})", asset.key, path.display(), e));
                continue;
            }
        };

        if (width, height) != (asset.width, asset.height) {
            problems.push(format!(
                "{}: {}x{}, expected {}x{}",
                asset.key, width, height, asset.width, asset.height
            ));
        }
        if let Some((fw, fh)) = asset.frame {
            if width % fw != 0 || height % fh != 0 {
                problems.push(format!(
                    "{}: {}x{} is not a whole number of {}x{} frames",
                    asset.key, width, height, fw, fh
                ));
            }
        }
    }
    Ok(problems)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, width: u32, height: u32) {
        image::RgbaImage::new(width, height).save(path).expect("write png");
    }

    #[test]
    fn test_check_assets() {
        let dir = tempfile::tempdir().expect("tempdir");
        for asset in &ASSETS {
            write_png(&dir.path().join(asset.file), asset.width, asset.height);
        }
        assert!(check_assets(dir.path()).expect("check").is_empty());

        write_png(&dir.path().join("dude.png"), 290, 48);
        fs::remove_file(dir.path().join("sky.png")).expect("remove");
        let problems = check_assets(dir.path()).expect("check");
        assert_eq!(problems.len(), 3, "{problems:?}");
        assert!(problems.iter().any(|p| p.starts_with("sky:") && p.ends_with("is missing")));
        assert!(problems.iter().any(|p| p.contains("290x48, expected 288x48")));
    }

    #[test]
    fn test_non_png_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        for asset in &ASSETS {
            write_png(&dir.path().join(asset.file), asset.width, asset.height);
        }
        fs::write(dir.path().join("star.png"), b"GIF89a").expect("write");

        let problems = check_assets(dir.path()).expect("check");
        assert_eq!(problems.len(), 1, "{problems:?}");
        assert!(problems[0].starts_with("star:") && problems[0].contains("is not a PNG"));
    }

    #[test]
    fn test_shipped_assets_match() {
        let problems = check_assets(&project_root().join("assets")).expect("check");
        assert!(problems.is_empty(), "{problems:?}");
    }

    #[test]
    fn test_index_html_loads_binary() {
        let html = index_html(true);
        assert!(html.contains("load(\"star-catcher.wasm\")"));
        assert!(html.contains("[DEV] Star Catcher"));
    }
}
