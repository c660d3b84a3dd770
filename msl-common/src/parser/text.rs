use regex::Regex;

lazy_static! {
    /// Affiliation tags the site glues onto names, e.g. `Kate Curby [VYS]`
    static ref BRACKET_TAG: Regex = Regex::new(r"\[[^\]]*\]").unwrap();
}

/// Collapses every run of whitespace or control characters (CR/LF inside text nodes, `&nbsp;`)
/// into one space and trims the ends.
pub fn clean(raw: &str) -> String
{
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for ch in raw.chars()
    {
        if ch.is_whitespace() || ch.is_control()
        {
            pending_space = !out.is_empty();
        } else {
            if pending_space
            {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }

    out
}

/// `clean` after removing `[...]` tags.
pub fn strip_tags(raw: &str) -> String
{
    clean(&BRACKET_TAG.replace_all(raw, " "))
}
