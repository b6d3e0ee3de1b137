use thiserror::Error;

pub type Result<T> = std::result::Result<T, LintlogError>;

#[derive(Error, Debug)]
pub enum LintlogError {
    #[error("History read error: {0}")]
    HistoryRead(String),
    #[error("Materialization error: {0}")]
    Materialization(String),
    #[error("Timestamp parse error: {0}")]
    TimestampParse(String),
    #[error("Analyzer invocation error: {0}")]
    AnalyzerInvocation(String),
    #[error("Normalization error: {0}")]
    Normalization(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::discover::Error> for LintlogError {
    fn from(err: gix::discover::Error) -> Self {
        LintlogError::GitDiscover(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for LintlogError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        LintlogError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for LintlogError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        LintlogError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for LintlogError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        LintlogError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for LintlogError {
    fn from(err: gix::object::commit::Error) -> Self {
        LintlogError::Commit(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for LintlogError {
    fn from(err: gix::objs::decode::Error) -> Self {
        LintlogError::ObjectDecode(Box::new(err))
    }
}
