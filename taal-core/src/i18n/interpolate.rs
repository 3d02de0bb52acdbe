//! `{{name}}` placeholder substitution.
//!
//! Substitution is a single left-to-right pass: inserted values are never
//! scanned for placeholders again. Placeholders without a matching argument
//! and unterminated `{{` are copied through verbatim.

#[derive(Debug, PartialEq)]
pub enum Part<'a> {
    Static(&'a str),
    Placeholder(&'a str),
}

pub fn parse_template(mut input: &str) -> Vec<Part<'_>> {
    let mut parts = Vec::new();
    while let Some(start) = input.find("{{") {
        let Some(len) = input[start + 2..].find("}}") else {
            break;
        };
        if start > 0 {
            parts.push(Part::Static(&input[..start]));
        }
        parts.push(Part::Placeholder(input[start + 2..start + 2 + len].trim()));
        input = &input[start + 2 + len + 2..];
    }
    if !input.is_empty() {
        parts.push(Part::Static(input));
    }
    parts
}

/// Fill `{{name}}` placeholders from `args`, HTML-escaping values when `escape` is set.
pub fn interpolate(template: &str, args: &[(&str, &str)], escape: bool) -> String {
    let mut out = String::with_capacity(template.len());
    for part in parse_template(template) {
        match part {
            Part::Static(s) => out.push_str(s),
            Part::Placeholder(name) => match args.iter().find(|(k, _)| *k == name) {
                Some((_, v)) if escape => out.push_str(&escape_html(v)),
                Some((_, v)) => out.push_str(v),
                None => {
                    out.push_str("{{");
                    out.push_str(name);
                    out.push_str("}}");
                }
            },
        }
    }
    out
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
