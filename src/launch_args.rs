// src/launch_args.rs
use std::path::Path;

/// True when `arg` has a `.zip` extension, in any letter case.
pub fn is_zip_path(arg: &str) -> bool {
    Path::new(arg)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// First startup argument naming a ZIP archive, if any.
pub fn zip_path_from_args<I, S>(args: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .find(|arg| is_zip_path(arg.as_ref()))
        .map(|arg| arg.as_ref().to_string())
}
