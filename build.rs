//! Build script: generates the `cmdkit(1)` man page from the CLI definition.

use clap::CommandFactory;
use clap_mangen::Man;
use std::{env, error::Error, fs, path::Path};

#[path = "src/cli.rs"]
#[expect(
    dead_code,
    reason = "Only type definitions are needed for man page generation"
)]
mod cli;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-env-changed=CARGO_PKG_VERSION");
    println!("cargo:rerun-if-env-changed=CARGO_PKG_DESCRIPTION");

    let package = env::var("CARGO_PKG_NAME")?;
    let out_dir = Path::new(&env::var("OUT_DIR")?).join("man");
    fs::create_dir_all(&out_dir)?;
    let page = render_manual(&package)?;
    fs::write(out_dir.join(format!("{package}.1")), page)?;
    Ok(())
}

/// Render the `cmdkit(1)` page, refusing to emit one under the wrong name.
fn render_manual(package: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    let cmd = cli::Cli::command();
    if cmd.get_name() != package {
        return Err(format!(
            "CLI is named '{}' but the package is '{package}'",
            cmd.get_name()
        )
        .into());
    }
    let mut page = Vec::new();
    Man::new(cmd).render(&mut page)?;
    Ok(page)
}
