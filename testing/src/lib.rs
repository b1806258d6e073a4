use std::io::{self, Write};
use tempfile::NamedTempFile;

pub use pretty_assertions;

/// The lines of `text`, as a line source would produce them.
pub fn script(text: &str) -> impl Iterator<Item = io::Result<String>> + '_ {
    text.lines().map(|line| Ok(line.to_string()))
}

/// Writes `lines` to a temporary file, removed when the returned handle is dropped.
pub fn write_script(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Could not create temporary script file.");
    for line in lines {
        writeln!(file, "{line}").expect("Could not write temporary script file.");
    }
    file.flush().expect("Could not flush temporary script file.");
    file
}

pub fn bytes_to_string(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).expect("Output was not valid UTF-8.")
}

/// Compares rendered output line by line, showing a diff on failure.
#[macro_export]
macro_rules! assert_rendered {
    ($output:expr, $($line:expr),+ $(,)?) => {{
        let output: &str = &$output;
        let expected: Vec<&str> = vec![$($line),+];
        $crate::pretty_assertions::assert_eq!(expected, output.lines().collect::<Vec<&str>>());
    }};
}

/// Asserts that the rendered output contains `line` as a whole line.
#[macro_export]
macro_rules! assert_renders_line {
    ($output:expr, $line:expr) => {{
        let output: &str = &$output;
        assert!(
            output.lines().any(|rendered| rendered == $line),
            "Expected line {:?} in output:\n{}",
            $line,
            output
        );
    }};
}
