//! Locating `#NAME:value;` directives within the text of a chart

/// One directive as found in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'i> {
    pub name: &'i str,
    /// Payload with surrounding whitespace trimmed. May span lines.
    pub value: &'i str,
    /// Byte position of `value` within the source.
    pub offset: usize,
}

/// Find the first `#NAME:` in the content and return the payload up to the
/// next unescaped `;`. The name has to match exactly up to the colon, so
/// asking for `TITLE` will not find `#TITLETRANSLIT:`. A directive whose
/// payload is never terminated is treated as absent.
pub fn find_directive<'i>(content: &'i str, name: &str) -> Option<Directive<'i>> {
    let marker = format!("#{}:", name);

    let start = content.find(&marker)?;
    let begin = start + marker.len();
    let end = begin + find_terminator(&content[begin..])?;

    let raw = &content[begin..end];
    let value = raw.trim();
    let lead = raw.len() - raw.trim_start().len();

    Some(Directive {
        name: &content[start + 1..start + 1 + name.len()],
        value,
        offset: begin + lead,
    })
}

/// The payload of the named directive, or an empty string if the directive
/// is absent. Absence is not an error at this layer.
pub fn extract_value<'i>(content: &'i str, name: &str) -> &'i str {
    find_directive(content, name)
        .map(|directive| directive.value)
        .unwrap_or("")
}

// Position of the first ';' not preceded by a backslash escape.
fn find_terminator(content: &str) -> Option<usize> {
    let mut escaped = false;

    for (i, b) in content
        .bytes()
        .enumerate()
    {
        if escaped {
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else if b == b';' {
            return Some(i);
        }
    }
    None
}

/// Every line that begins with the directive marker, paired with the name
/// it declares (the text between `#` and the first `:`). Lines are returned
/// verbatim and in file order; only the `\n` separator is removed, so a
/// CRLF line keeps its `\r`.
pub fn directive_lines(content: &str) -> Vec<(&str, &str)> {
    let re = regex!(r"^#([^:]*)");

    content
        .split('\n')
        .filter_map(|line| {
            let cap = re.captures(line)?;
            let name = cap
                .get(1)?
                .as_str();
            Some((name, line))
        })
        .collect()
}
