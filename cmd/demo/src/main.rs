//! errs tour
//!
//! Builds plain, wrapped and boxed errors and prints their renderings,
//! chains, locations and cause checks.
//!
//! # Environment Variables
//!
//! - `ERRS_LOG=<directive>` - Log filter (default `info`). `ERRS_LOG=errs=trace`
//!   shows every error the library builds.

use std::fmt;
use std::path::Path;

use errs::{Error, Field, ResultExt};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq)]
struct SomethingFailed;

impl fmt::Display for SomethingFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("something failed")
    }
}

impl std::error::Error for SomethingFailed {}

fn do_something() -> Result<(), SomethingFailed> {
    Err(SomethingFailed)
}

fn heat() -> Option<Error> {
    errs::wrap!(
        do_something().err(),
        "error occurred",
        "temperature" => 10,
        "state" => "heating",
    )
}

fn heat_opaque() -> Option<Error> {
    errs::boxed!(
        do_something().err(),
        "error occurred",
        "temperature" => 10,
        "state" => "heating",
    )
}

fn load(path: &Path) -> errs::Result<String> {
    std::fs::read_to_string(path).wrap_err_with("loading settings", vec![Field::debug("path", path.to_path_buf())])
}

fn show(label: &str, err: Option<&Error>) {
    match err {
        Some(err) => println!("{:<14} {}", label, err),
        None => println!("{:<14} <no error>", label),
    }
}

fn main() {
    let filter = EnvFilter::try_from_env("ERRS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();

    println!("=== errs tour ===\n");

    show("new", errs::new!("error occurred").as_ref());
    show(
        "new+fields",
        errs::new!("error occurred", "temperature" => 10, "state" => "heating").as_ref(),
    );
    show("new(empty)", errs::new!("").as_ref());
    show(
        "timestamp",
        errs::new!("lease expired", "at" => chrono::Utc::now()).as_ref(),
    );

    let wrapped = heat();
    let boxed = heat_opaque();
    show("wrap", wrapped.as_ref());
    show("box", boxed.as_ref());
    show("wrap(none)", errs::wrap!(None::<Error>, "error occurred").as_ref());

    println!();
    if let Some(err) = &wrapped {
        println!("wrap is SomethingFailed: {}", errs::is(err, &SomethingFailed));
        info!(location = %err.location(), "wrapped error location");
    }
    if let Some(err) = &boxed {
        println!("box  is SomethingFailed: {}", errs::is(err, &SomethingFailed));
    }

    println!();
    let e1 = errs::new!("error one");
    let e2 = errs::wrap!(e1, "error two");
    let e3 = errs::boxed!(e2, "error three");
    let top = errs::wrap!(e3, "error four", Field::new("depth", 4));
    if let Some(chain) = top.as_ref().and_then(Error::chain) {
        println!("chain ({} links):", chain.len());
        for (idx, link) in chain.iter().enumerate() {
            println!("  [{}] {}", idx, link);
        }
    }

    println!();
    match load(Path::new("/nonexistent/errs-demo.toml")) {
        Ok(text) => println!("loaded {} bytes", text.len()),
        Err(err) => {
            println!("{}", err);
            info!(kind = ?err.kind(), location = %err.location(), "settings not loaded");
        }
    }
}
