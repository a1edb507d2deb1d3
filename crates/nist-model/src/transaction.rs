use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::record::{Record, RecordType};

/// One complete NIST file instance: typed records, keyed by record type.
///
/// At most one type-1 information record exists; every other type may carry
/// zero or more records, normally distinguished by their IDC field.
/// Transactions are immutable once built and safe to share across threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    records: BTreeMap<RecordType, Vec<Record>>,
}

impl Transaction {
    pub(crate) fn new(records: BTreeMap<RecordType, Vec<Record>>) -> Self {
        Self { records }
    }

    /// All record lists, in record-type order.
    pub fn records(&self) -> &BTreeMap<RecordType, Vec<Record>> {
        &self.records
    }

    /// The records of one type, possibly empty.
    pub fn records_of(&self, record_type: RecordType) -> &[Record] {
        self.records
            .get(&record_type)
            .map_or(&[], Vec::as_slice)
    }

    /// The singleton type-1 information record.
    ///
    /// Fails when zero or more than one information record is present.
    pub fn information_record(&self) -> Result<&Record> {
        let records = self.records_of(RecordType::TransactionInformation);
        match records {
            [] => Err(ModelError::MissingInformationRecord),
            [record] => Ok(record),
            _ => Err(ModelError::DuplicateInformationRecord {
                count: records.len(),
            }),
        }
    }

    /// Find a record by type and IDC.
    pub fn record_by_idc(&self, record_type: RecordType, idc: u32) -> Option<&Record> {
        self.records_of(record_type)
            .iter()
            .find(|r| r.idc_equals(idc))
    }

    /// Total number of records of any type.
    pub fn record_count(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    /// True when a record type has at least one record.
    pub fn has_records_of(&self, record_type: RecordType) -> bool {
        !self.records_of(record_type).is_empty()
    }
}
