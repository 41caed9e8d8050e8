use regex::Regex;

/// Cleans extracted text before it reaches the LLM.
/// Strips control characters, collapses runs of spaces and tabs, trims
/// each line and drops blank lines.
pub fn clean_text(raw: &str) -> String {
    let collapse_spaces = Regex::new(r"[ \t]+").unwrap();

    let stripped: String = raw
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .collect();

    stripped
        .lines()
        .map(|line| collapse_spaces.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
