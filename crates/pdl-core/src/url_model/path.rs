//! Final path segment of a target.

/// Extracts the last non-empty path segment of `target`.
///
/// Targets that parse as URLs use the URL path (query and fragment ignored).
/// Anything else is treated as a plain `/`-separated path. Returns `None` for
/// an empty or root path, or for `.` / `..`.
pub fn final_segment(target: &str) -> Option<String> {
    let segment = match url::Url::parse(target) {
        Ok(parsed) => last_segment(parsed.path())?,
        Err(_) => {
            let path = target.split(['?', '#']).next().unwrap_or(target);
            last_segment(path)?
        }
    };
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment)
}

fn last_segment(path: &str) -> Option<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .last()
        .map(str::to_string)
}
