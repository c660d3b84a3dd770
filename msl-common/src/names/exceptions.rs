/// How a matched three-token name splits into (first, last).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution
{
    /// `First Middle Final` -> (First, "Middle Final")
    MiddleAndFinal,
    /// `First Middle Final` -> (First, Final), the middle token is a middle name
    FinalOnly,
    /// `First Middle Final` -> ("First Middle", Final)
    FirstAndMiddle,
}

/// One referee whose roster spelling defeats the generic rules. `None` matches any token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameException
{
    pub first: &'static str,
    pub middle: Option<&'static str>,
    pub last: Option<&'static str>,
    pub resolution: Resolution,
}

const fn exception(first: &'static str, middle: Option<&'static str>, last: Option<&'static str>, resolution: Resolution) -> NameException
{
    NameException { first, middle, last, resolution }
}

/// Known three-token names as the site spells them, all lower case.
///
/// New irregular names go here and nowhere else.
pub static EXCEPTIONS: &[NameException] = &[
    exception("alexandre", Some("de"),        None,              Resolution::MiddleAndFinal),
    exception("will",      Some("covey"),     Some("iii"),       Resolution::MiddleAndFinal),
    exception("gabriella", Some("(brie)"),    None,              Resolution::MiddleAndFinal),
    exception("sophie",    None,              Some("hinton"),    Resolution::FinalOnly),
    exception("vivienne",  None,              Some("huang"),     Resolution::FinalOnly),
    exception("andrew",    None,              Some("teale"),     Resolution::FinalOnly),
    exception("gabi",      None,              Some("konde"),     Resolution::FinalOnly),
    exception("james",     None,              Some("horn"),      Resolution::MiddleAndFinal),
    exception("joseph",    None,              Some("sandoval"),  Resolution::MiddleAndFinal),
    exception("joseph",    None,              Some("howe"),      Resolution::MiddleAndFinal),
    exception("mohamed",   Some("nour"),      None,              Resolution::MiddleAndFinal),
    exception("jack",      None,              Some("raaphorst"), Resolution::MiddleAndFinal),
    exception("laith",     None,              Some("habri"),     Resolution::MiddleAndFinal),
    exception("william",   Some("covey,"),    Some("jr"),        Resolution::MiddleAndFinal),
    exception("sofia",     Some("velasquez"), None,              Resolution::MiddleAndFinal),
    exception("martiel",   Some("ruiz"),      None,              Resolution::MiddleAndFinal),
    exception("michael",   Some("aguilera"),  Some("jr"),        Resolution::MiddleAndFinal),
    exception("mary",      Some("kate"),      None,              Resolution::FirstAndMiddle),
];

impl NameException
{
    pub fn matches(&self, tokens: &[&str]) -> bool
    {
        if tokens.len() != 3
        {
            return false;
        }

        tokens[0] == self.first
            && self.middle.map_or(true, |middle| tokens[1] == middle)
            && self.last.map_or(true, |last| tokens[2] == last)
    }

    /// Same first name and some, but not all, of the constrained tokens.
    pub fn partly_matches(&self, tokens: &[&str]) -> bool
    {
        if tokens.len() != 3 || tokens[0] != self.first
        {
            return false;
        }

        match (self.middle, self.last)
        {
            (Some(middle), Some(last)) => (tokens[1] == middle) != (tokens[2] == last),
            _ => false,
        }
    }

    /// Splits a matching name. Stray commas are dropped from the pieces.
    pub fn resolve(&self, tokens: &[&str]) -> (String, String)
    {
        let token = |index: usize| tokens[index].trim_matches(',');

        match self.resolution
        {
            Resolution::MiddleAndFinal => (token(0).to_string(), format!("{} {}", token(1), token(2))),
            Resolution::FinalOnly => (token(0).to_string(), token(2).to_string()),
            Resolution::FirstAndMiddle => (format!("{} {}", token(0), token(1)), token(2).to_string()),
        }
    }
}

/// Outcome of checking a tokenized, lower-cased name against a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup
{
    Resolved(String, String),
    /// Close to a listed spelling without matching it
    Unresolved,
    NotListed,
}

pub fn lookup(table: &[NameException], tokens: &[&str]) -> Lookup
{
    if let Some(entry) = table.iter().find(|entry| entry.matches(tokens))
    {
        let (first, last) = entry.resolve(tokens);
        return Lookup::Resolved(first, last);
    }

    if table.iter().any(|entry| entry.partly_matches(tokens))
    {
        Lookup::Unresolved
    } else {
        Lookup::NotListed
    }
}
