use std::io;
use std::path::Path;
use std::process::Command;

use crate::optics::UNREACHABLE;

pub fn format_reachability(value: f32) -> String {
    if value == UNREACHABLE {
        "UNDEFINED".to_owned()
    } else {
        format!("{value:.4}")
    }
}

pub fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// Hands `path` to whatever the desktop uses to open it.
pub fn open_in_default_app(path: &str) -> io::Result<()> {
    let mut command = if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };

    command.arg(path).spawn().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_reads_as_undefined() {
        assert_eq!(format_reachability(-1.0), "UNDEFINED");
        assert_eq!(format_reachability(0.5), "0.5000");
    }

    #[test]
    fn file_name_falls_back_to_whole_path() {
        assert_eq!(file_name("/data/img/cat.png"), "cat.png");
        assert_eq!(file_name("cat.png"), "cat.png");
        assert_eq!(file_name(""), "");
    }
}
