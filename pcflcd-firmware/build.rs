//! Build script for pcflcd-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml and writes the postcard board image to OUT_DIR

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    setup_linker(&out_dir);
    build_board_image(&out_dir);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}

/// Parse board.toml and embed it as a postcard image
fn build_board_image(out_dir: &Path) {
    println!("cargo:rerun-if-changed=board.toml");

    let path = Path::new("board.toml");
    let input = match fs::read_to_string(path) {
        Ok(input) => input,
        Err(e) => panic!(
            "\n\
            ERROR: failed to read board.toml: {e}\n\
            The firmware needs a board description next to Cargo.toml.\n"
        ),
    };

    let board = match pcflcd_board::parse_board(&input) {
        Ok(board) => board,
        Err(e) => panic!("\nERROR: invalid board.toml\n  {e}\n"),
    };

    let image = match pcflcd_board::encode_board(&board) {
        Ok(image) => image,
        Err(e) => panic!("\nERROR: {e}\n"),
    };
    fs::write(out_dir.join("board.bin"), &image).expect("write board.bin");

    println!(
        "cargo:warning=board.toml validated: {} number group(s), {} bar(s), {} indicator(s), {} byte image",
        board.numbers.len(),
        board.bars.len(),
        board.indicators.len(),
        image.len()
    );
}
