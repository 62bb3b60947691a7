use url::Url;

use crate::compat::{String, Vec};
use crate::error::{Error, Result};

/// Append a `/` unless the input already ends with one
pub fn ensure_trailing_slash(url: &str) -> String {
    let mut owned = String::with_capacity(url.len() + 1);
    owned.push_str(url);
    if !url.ends_with('/') {
        owned.push('/');
    }
    owned
}

/// Join path pieces with single slashes, trimming slashes at every seam.
/// Pieces that are empty after trimming are skipped.
pub fn join_url_paths<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for part in parts {
        let trimmed = part.as_ref().trim_matches('/');
        if trimmed.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push('/');
        }
        joined.push_str(trimmed);
    }
    joined
}

/// Split a URL path into its directory segments and its final segment.
/// `/a/b` -> (`[a]`, `b`); `/a/b/` -> (`[a, b]`, ``)
fn split_path(path: &str) -> (Vec<&str>, &str) {
    let mut segments: Vec<&str> = path.split('/').skip(1).collect();
    let last = segments.pop().unwrap_or("");
    segments.retain(|segment| !segment.is_empty());
    (segments, last)
}

/// Relative reference from the document at `from` to the document at `to`.
///
/// The result resolves against `from` to the path of `to`, e.g.
/// `https://x.test/a/b` -> `https://x.test/a/c` gives `c`. Query and fragment
/// of `to` are not included.
///
/// # Errors
///
/// `Error::InvalidUrl` if either input is not an absolute URL,
/// `Error::CrossOrigin` if the two do not share an origin.
pub fn relative_path(from: &str, to: &str) -> Result<String> {
    let from = Url::parse(from)?;
    let to = Url::parse(to)?;
    if from.origin() != to.origin() {
        return Err(Error::CrossOrigin);
    }

    let (from_dirs, _) = split_path(from.path());
    let (to_dirs, to_file) = split_path(to.path());

    let common = from_dirs
        .iter()
        .zip(&to_dirs)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = "../".repeat(from_dirs.len() - common);
    for dir in &to_dirs[common..] {
        relative.push_str(dir);
        relative.push('/');
    }
    relative.push_str(to_file);

    if relative.is_empty() {
        relative.push_str("./");
    }
    Ok(relative)
}
