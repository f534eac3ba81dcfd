#![forbid(unsafe_code)]

//! Check result records and their validated construction
//!
//! A [`CheckRecord`] is the atomic unit of checker output. It can only be obtained
//! through [`RecordBuilder`], which refuses to build a record with a missing required
//! field, so an incomplete record is unrepresentable. The execution engine wraps each
//! record into a [`ResultRecord`], attaching provenance exactly once; checkers never
//! set provenance themselves.

use crate::error::ValidationError;
use crate::types::{CheckStatus, SUMMARY_ELEMENT_TYPE};
use serde::{Deserialize, Serialize};

/// One structured check outcome for a single element (or a summary pseudo-element)
///
/// All nine keys are always present when serialized; optional fields serialize as
/// `null` rather than being omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckRecord {
    /// Stable identity of the checked element (`GlobalId`), absent for summaries
    pub element_id: Option<String>,
    /// Concrete entity type name, or `"Summary"` for per-checker summaries
    pub element_type: String,
    /// Display name of the element or of the check
    pub element_name: String,
    pub element_name_long: Option<String>,
    pub check_status: CheckStatus,
    pub actual_value: String,
    pub required_value: String,
    pub comment: Option<String>,
    pub log: Option<String>,
}

impl CheckRecord {
    /// Start building a record
    pub fn builder() -> RecordBuilder {
        RecordBuilder::default()
    }

    /// Whether this record describes a checker-level summary rather than an element
    pub fn is_summary(&self) -> bool {
        self.element_type == SUMMARY_ELEMENT_TYPE
    }
}

/// Builder enforcing the record contract
///
/// Required: `element_type`, `element_name`, `check_status`, `actual_value`,
/// `required_value`. Optional (serialized as `null` when unset): `element_id`,
/// `element_name_long`, `comment`, `log`.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    element_id: Option<String>,
    element_type: Option<String>,
    element_name: Option<String>,
    element_name_long: Option<String>,
    check_status: Option<CheckStatus>,
    actual_value: Option<String>,
    required_value: Option<String>,
    comment: Option<String>,
    log: Option<String>,
}

impl RecordBuilder {
    pub fn element_id(mut self, id: impl Into<String>) -> Self {
        self.element_id = Some(id.into());
        self
    }

    pub fn element_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self
    }

    /// Mark this record as a per-checker summary
    pub fn summary(mut self) -> Self {
        self.element_type = Some(SUMMARY_ELEMENT_TYPE.to_string());
        self
    }

    pub fn element_name(mut self, name: impl Into<String>) -> Self {
        self.element_name = Some(name.into());
        self
    }

    pub fn element_name_long(mut self, name: impl Into<String>) -> Self {
        self.element_name_long = Some(name.into());
        self
    }

    pub fn check_status(mut self, status: CheckStatus) -> Self {
        self.check_status = Some(status);
        self
    }

    pub fn actual_value(mut self, value: impl Into<String>) -> Self {
        self.actual_value = Some(value.into());
        self
    }

    pub fn required_value(mut self, value: impl Into<String>) -> Self {
        self.required_value = Some(value.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn log(mut self, log: impl Into<String>) -> Self {
        self.log = Some(log.into());
        self
    }

    /// Build the record, failing on the first missing required field
    pub fn build(self) -> Result<CheckRecord, ValidationError> {
        Ok(CheckRecord {
            element_id: self.element_id,
            element_type: self
                .element_type
                .ok_or(ValidationError::MissingField("element_type"))?,
            element_name: self
                .element_name
                .ok_or(ValidationError::MissingField("element_name"))?,
            element_name_long: self.element_name_long,
            check_status: self
                .check_status
                .ok_or(ValidationError::MissingField("check_status"))?,
            actual_value: self
                .actual_value
                .ok_or(ValidationError::MissingField("actual_value"))?,
            required_value: self
                .required_value
                .ok_or(ValidationError::MissingField("required_value"))?,
            comment: self.comment,
            log: self.log,
        })
    }
}

/// A check record tagged with the checker that produced it
///
/// Provenance keys keep the wire names of the original report format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(flatten)]
    pub record: CheckRecord,

    /// Identity of the module the record came from
    #[serde(rename = "_checker_file")]
    pub checker_file: String,

    /// Name of the check function the record came from
    #[serde(rename = "_checker_function")]
    pub checker_function: String,
}

impl ResultRecord {
    /// Tag a record with its provenance
    pub fn tag(record: CheckRecord, module: &str, name: &str) -> Self {
        ResultRecord {
            record,
            checker_file: module.to_string(),
            checker_function: name.to_string(),
        }
    }
}
