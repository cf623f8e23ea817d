//! Fixtures shared by unit tests.

use std::path::{Path, PathBuf};

/// Write an executable `sh` script into `dir`.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).expect("write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod script");
    path
}

/// A stand-in for ffmpeg that copies its `-i` input to the last argument.
pub fn fake_ffmpeg(dir: &Path) -> PathBuf {
    write_script(
        dir,
        "fake-ffmpeg",
        "for last; do :; done\ncp \"$2\" \"$last\"\n",
    )
}
