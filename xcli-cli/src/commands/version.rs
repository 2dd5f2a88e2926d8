//! Version command.

/// Prints the package version.
pub fn run() {
    println!("x-cli {}", env!("CARGO_PKG_VERSION"));
}
