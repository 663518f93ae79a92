// src/transfer/platform.rs

//! Local path → scp source path translation.

use crate::types::Platform;

/// Mount prefix under which Cygwin-style shells expose drive letters.
pub const CYGDRIVE_PREFIX: &str = "/cygdrive/";

/// Win32 extended-length prefix, as in `\\?\C:\...`.
const VERBATIM_PREFIX: &str = r"\\?\";

/// Produce the source path string handed to scp.
///
/// On Windows the leading drive designator (`C:`) becomes `/cygdrive/c`; the
/// rest of the string is left alone, separators included. An extended-length
/// `\\?\` prefix in front of the drive is dropped first. Anywhere else this is
/// the identity.
pub fn to_remote_source_path(path: &str, platform: Platform) -> String {
    match platform {
        Platform::Posix => path.to_string(),
        Platform::Windows => match split_drive(strip_verbatim(path)) {
            Some((letter, rest)) => {
                format!("{CYGDRIVE_PREFIX}{}{rest}", letter.to_ascii_lowercase())
            }
            None => path.to_string(),
        },
    }
}

fn strip_verbatim(path: &str) -> &str {
    match path.strip_prefix(VERBATIM_PREFIX) {
        Some(rest) if split_drive(rest).is_some() => rest,
        _ => path,
    }
}

fn split_drive(path: &str) -> Option<(char, &str)> {
    let mut chars = path.chars();
    let letter = chars.next()?;
    if letter.is_ascii_alphabetic() && chars.next() == Some(':') {
        Some((letter, &path[2..]))
    } else {
        None
    }
}
