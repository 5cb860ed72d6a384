use ccheck_types::MessageClass;
use serde_json::Value;

/// Name of a top-level rule. Unique within a policy module, not across modules.
pub type RuleName = String;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PredicateClass {
    Denial,
    Warning,
}

impl PredicateClass {
    /// The report bucket messages of this class land in.
    pub fn message_class(self) -> MessageClass {
        match self {
            PredicateClass::Denial => MessageClass::Failure,
            PredicateClass::Warning => MessageClass::Warning,
        }
    }
}

/// One decoded segment of an input file.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentPart {
    /// Zero-based position of the segment within its file.
    pub index: usize,
    pub value: Value,
}

impl DocumentPart {
    pub fn new(index: usize, value: Value) -> Self {
        Self { index, value }
    }
}
