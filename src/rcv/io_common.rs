use crate::rcv::*;

/// Formats the winners of one election, one name per line.
///
/// Blocks are separated by a blank line, so every block but the last one ends with an extra newline.
pub fn format_result(names: &[String], is_last_block: bool) -> String {
    let mut res = String::new();
    for name in names.iter() {
        res.push_str(name);
        res.push('\n');
    }
    if !is_last_block {
        res.push('\n');
    }
    res
}

/// Places a relative output path inside the output directory, if any.
pub fn resolve_output(output_directory: Option<&str>, dest: &str) -> String {
    match output_directory {
        Some(dir) if dest != "stdout" && Path::new(dest).is_relative() => {
            Path::new(dir).join(dest).display().to_string()
        }
        _ => dest.to_string(),
    }
}

pub fn write_output(dest: &str, contents: &str) -> RcvResult<()> {
    if dest == "stdout" {
        print!("{}", contents);
        return Ok(());
    }
    info!("Writing {} bytes to {:?}", contents.len(), dest);
    fs::write(dest, contents).context(WritingOutputSnafu { path: dest })
}
