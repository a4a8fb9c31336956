//! Path arithmetic shared by file discovery and reference resolution.
//!
//! Reference strings use `/` separators regardless of platform, so these
//! helpers work on strings rather than `std::path`.

/// Resolve the file part of an external reference, per the shared rule:
/// a `/`-prefixed reference is joined to the root path prefix, anything else
/// is joined to the directory of the file containing the reference. The
/// result is lexically normalized.
pub fn resolve_ref_path(root_path: &str, containing_file: &str, reference: &str) -> String {
    let joined = if reference.starts_with('/') {
        format!("{root_path}{reference}")
    } else {
        match containing_file.rfind('/') {
            Some(idx) => format!("{}{}", &containing_file[..idx + 1], reference),
            None => reference.to_string(),
        }
    };
    normalize(&joined)
}

/// Lexical normalization: resolves `.` and `..` segments without touching
/// the filesystem, so `/a/b/../common.json` becomes `/a/common.json`.
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }
    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Make a path absolute by joining it to the current working directory,
/// then normalize it.
pub fn absolutize(path: &str) -> String {
    if path.starts_with('/') {
        return normalize(path);
    }
    let cwd = std::env::current_dir()
        .map(|d| d.to_string_lossy().into_owned())
        .unwrap_or_default();
    normalize(&format!("{cwd}/{path}"))
}
