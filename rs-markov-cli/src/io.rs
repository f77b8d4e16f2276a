use std::io;
use std::path::{Path, PathBuf};

/// Builds a sibling path with a new extension.
///
/// Example:
/// `data/corpus.txt` + `"bin"` → `data/corpus.bin`
pub fn build_output_path<P: AsRef<Path>>(
    input_path: P,
    output_extension: &str,
) -> io::Result<PathBuf> {
    let input_path = input_path.as_ref();

    let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
    let file_stem = input_path
        .file_stem()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

    let mut output = PathBuf::from(parent);
    output.push(file_stem);
    output.set_extension(output_extension);

    Ok(output)
}
