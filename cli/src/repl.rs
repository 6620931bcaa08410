use std::io::Write;

/// Prompt and read one line from stdin. An empty string means EOF.
pub fn readline() -> Result<String, String> {
    write!(std::io::stdout(), "$ ").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;
    let mut buffer = String::new();
    std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    Ok(buffer)
}

/// Split a chat-style command line into arguments.
///
/// The leading `!` of chat verbs is optional, so `!raidStats dps` and
/// `raidStats dps` parse the same.
pub fn split_command(line: &str) -> Option<Vec<String>> {
    let line = line.trim();
    let line = line.strip_prefix('!').unwrap_or(line);
    shlex::split(line)
}
