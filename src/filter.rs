/*!
 * Name-based selection of remote files
 */

/// Substring marking NetCDF files, wherever it appears in the name
const NETCDF_MARKER: &str = ".nc";

/// Extension of TAR archives
const TAR_EXTENSION: &str = ".tar";

/// Files containing this substring are model output and never pulled
const EXCLUDED_MARKER: &str = "mod";

/// Final component of a remote path
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Final dot-suffix of a remote path's basename, including the dot
///
/// Leading dots do not start an extension, so `.tar` has none while
/// `a.b.tar` has `.tar`.
pub fn extension(path: &str) -> &str {
    let name = basename(path);
    let stem_start = name.len() - name.trim_start_matches('.').len();

    match name[stem_start..].rfind('.') {
        Some(pos) => &name[stem_start + pos..],
        None => "",
    }
}

/// Whether a remote file should be considered for download
pub fn is_eligible(path: &str) -> bool {
    let name = basename(path);
    (name.contains(NETCDF_MARKER) || extension(path) == TAR_EXTENSION)
        && !name.contains(EXCLUDED_MARKER)
}
