use crate::error::{CatalogError, Result};
use crate::model::Movie;
use std::io::Write;
use std::process::{Command, Stdio};

/// Puts text on the system clipboard by piping it to the platform tool:
/// `pbcopy` on macOS, `xclip` or `xsel` on Linux, `clip` on Windows.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        pipe_to("pbcopy", &[], text)
    }

    #[cfg(target_os = "linux")]
    {
        pipe_to("xclip", &["-selection", "clipboard"], text)
            .or_else(|_| pipe_to("xsel", &["--clipboard", "--input"], text))
            .map_err(|_| {
                CatalogError::Api("Failed to run xclip or xsel. Install xclip or xsel.".to_string())
            })
    }

    #[cfg(target_os = "windows")]
    {
        pipe_to("clip", &[], text)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = text;
        Err(CatalogError::Api(
            "Clipboard not supported on this platform".to_string(),
        ))
    }
}

#[allow(dead_code)]
fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| CatalogError::Api(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| CatalogError::Api(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| CatalogError::Api(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(CatalogError::Api(format!("{} exited with error", program)))
    }
}

/// What `play --copy` puts on the clipboard: the bare download link.
pub fn format_for_clipboard(movie: &Movie) -> String {
    movie.download_link.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_seed;

    #[test]
    fn test_format_for_clipboard_is_the_link() {
        let movie = &default_seed()[0];
        assert_eq!(format_for_clipboard(movie), movie.download_link);
    }

    #[test]
    fn test_format_for_clipboard_trims() {
        let mut movie = default_seed()[0].clone();
        movie.download_link = "  https://example.com/a.mp4\n".into();
        assert_eq!(format_for_clipboard(&movie), "https://example.com/a.mp4");
    }
}
