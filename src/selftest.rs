//! `--run-tests`: quick checks of the installer in a scratch directory.
//! The real home directory is never touched.

use crate::archive;
use crate::config::Config;
use crate::dialog::Headless;
use crate::installer::{clean_existing, confirm_install};
use anyhow::{ensure, Context, Result};
use std::fs;
use std::path::Path;

type Check = fn(&Path) -> Result<()>;

const CHECKS: &[(&str, Check)] = &[
    ("extract()", check_extract),
    ("confirm_install(assume_yes=true)", check_confirm),
    ("clean_existing()", check_clean),
];

/// Runs every check and returns the process exit status.
pub fn run() -> u8 {
    let tmp = match tempfile::tempdir() {
        Ok(t) => t,
        Err(e) => {
            println!("TESTS: cannot create temporary directory: {}", e);
            return 1;
        }
    };

    let mut failures = 0;
    for (name, check) in CHECKS {
        let scratch = tmp.path().join(name.replace(|c: char| !c.is_alphanumeric(), "_"));
        let result = fs::create_dir_all(&scratch)
            .context("create scratch directory")
            .and_then(|_| check(&scratch));
        if let Err(e) = result {
            println!("TEST: {} - {:#}", name, e);
            failures += 1;
        }
    }

    if failures > 0 {
        println!("\nTESTS: failures: {}", failures);
        return 1;
    }
    println!("\nTESTS: all passed");
    0
}

fn check_extract(root: &Path) -> Result<()> {
    let src = root.join("src/SemabeTest");
    fs::create_dir_all(&src)?;
    fs::write(src.join("dummy.txt"), "ok")?;
    let theme_tar = root.join("theme.tar.xz");
    archive::pack_dir_xz(&src, "SemabeTest", &theme_tar).context("build test archive")?;

    let out = root.join("out_themes");
    archive::extract(&theme_tar, &out)?;
    let body = fs::read_to_string(out.join("SemabeTest/dummy.txt")).context("file not extracted")?;
    ensure!(body == "ok", "extracted content differs: {:?}", body);
    Ok(())
}

fn check_confirm(root: &Path) -> Result<()> {
    ensure!(
        confirm_install(true, &Headless, &Config::from_home(root)),
        "should return true"
    );
    Ok(())
}

fn check_clean(root: &Path) -> Result<()> {
    let themes = root.join("themes");
    let exts = root.join("exts");
    fs::create_dir_all(themes.join("semabe"))?;
    fs::create_dir_all(themes.join("leave-me"))?;
    fs::create_dir_all(exts.join("semabe-theme-selector@sewbej"))?;
    fs::create_dir_all(exts.join("other-ext"))?;

    clean_existing(&themes, &exts);

    ensure!(
        !themes.join("semabe").exists() && !exts.join("semabe-theme-selector@sewbej").exists(),
        "directories were not removed"
    );
    ensure!(
        themes.join("leave-me").exists() && exts.join("other-ext").exists(),
        "too many directories removed"
    );
    Ok(())
}
