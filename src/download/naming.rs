//! Collision-free file naming inside a bucket folder.
//!
//! The first free name among `name.ext`, `name_1.ext`, `name_2.ext`, ... is
//! used. [`create_unique`] claims it with an exclusive create, so the check
//! and the claim cannot be interleaved by another writer.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};

/// Turns `name` into a single path component.
///
/// Separators and characters rejected by common filesystems become `_`, and
/// names made only of dots (`.`, `..`) collapse to `_`.
///
/// ```rust
/// use cdnscrape::download::sanitize_component;
///
/// assert_eq!(sanitize_component("../../etc"), ".._.._etc");
/// assert_eq!(sanitize_component(".."), "_");
/// ```
pub fn sanitize_component(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}

/// The `n`-th candidate for `filename`; `n == 0` is the name itself.
///
/// ```rust
/// use cdnscrape::download::candidate_name;
///
/// assert_eq!(candidate_name("pic.jpg", 0), "pic.jpg");
/// assert_eq!(candidate_name("pic.jpg", 2), "pic_2.jpg");
/// assert_eq!(candidate_name("README", 1), "README_1");
/// ```
pub fn candidate_name(filename: &str, n: usize) -> String {
    if n == 0 {
        return filename.to_string();
    }
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}_{}.{}", stem, n, ext),
        _ => format!("{}_{}", filename, n),
    }
}

/// Creates the first free candidate file in `dir` and returns it opened for writing.
pub async fn create_unique(dir: &Path, filename: &str) -> io::Result<(PathBuf, File)> {
    for n in 0.. {
        let path = dir.join(candidate_name(filename, n));
        match OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }
    Err(io::Error::other(format!(
        "no free file name left for {} in {}",
        filename,
        dir.display()
    )))
}
