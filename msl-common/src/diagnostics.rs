use chrono::NaiveDate;

/// Something that went wrong without stopping the run.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind")]
pub enum Warning
{
    /// Every attempt at one date failed, the date contributes nothing.
    Fetch { date: NaiveDate, attempts: u32, cause: String },
    /// One table row was skipped.
    Parse { date: Option<NaiveDate>, row: usize, reason: String },
    /// A referee slot was excluded because the name could not be resolved.
    NameAmbiguity { raw: String, context: String },
    /// A season index entry was not a date.
    DateLabel { label: String, reason: String },
}

/// Warnings collected over one run, kept in the order they happened.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RunLog
{
    warnings: Vec<Warning>,
}

impl RunLog
{
    pub fn new() -> RunLog
    {
        RunLog::default()
    }

    pub fn record(&mut self, warning: Warning)
    {
        warn!("{:?}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning]
    {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool
    {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize
    {
        self.warnings.len()
    }

    pub fn extend(&mut self, other: RunLog)
    {
        self.warnings.extend(other.warnings);
    }

    pub fn into_warnings(self) -> Vec<Warning>
    {
        self.warnings
    }
}
