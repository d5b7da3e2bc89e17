//! Reads HTML from stdin and prints the cleaned viewer page to stdout.
//!
//! Usage: `clean_stdin <base-url> < page.html`
//!
//! Runs the same parse/strip/extract/sanitize/render steps as the server,
//! without any network access.

use adfree_reader::{clean_page, url_utils::validate_target};
use std::io::{self, Read};

fn main() {
    let base = std::env::args().nth(1);
    let target = match validate_target(base.as_deref()) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("usage: clean_stdin <base-url> < page.html ({e})");
            std::process::exit(1);
        }
    };

    let mut bytes = Vec::new();
    if io::stdin().read_to_end(&mut bytes).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let html = adfree_reader::encoding::decode_body(&bytes, None);
    println!("{}", clean_page(&html, &target));
}
