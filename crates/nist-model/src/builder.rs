//! Mutable staging objects for records and transactions.
//!
//! Builders accumulate fields/records and produce immutable values on
//! `build()`. Each `build()` call runs the ordered pre-build hooks (which
//! receive the mutable builder and may inject calculated fields such as
//! LEN or CNT), deep-copies the staged state into the built value, then
//! runs the post-build hooks against the immutable result. Builders stay
//! usable after `build()`; the built value never aliases builder storage.
//!
//! Builders are single-writer objects. Share built values, not builders.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ModelError, Result};
use crate::field::FieldValue;
use crate::record::{IDC_FIELD, Record, RecordType};
use crate::transaction::Transaction;

/// A pre-build hook: runs before the immutable value is constructed and may
/// mutate the builder. Hook failure aborts the build.
pub type RecordPreBuild = Box<dyn Fn(&mut RecordBuilder) -> Result<()>>;

/// A post-build hook: observes the freshly built immutable record.
pub type RecordPostBuild = Box<dyn Fn(&Record)>;

/// Pre-build hook over a transaction builder.
pub type TransactionPreBuild = Box<dyn Fn(&mut TransactionBuilder) -> Result<()>>;

/// Post-build hook over a built transaction.
pub type TransactionPostBuild = Box<dyn Fn(&Transaction)>;

/// Builder for a single record.
pub struct RecordBuilder {
    record_type: RecordType,
    fields: BTreeMap<u32, FieldValue>,
    pre_build: Vec<RecordPreBuild>,
    post_build: Vec<RecordPostBuild>,
}

impl RecordBuilder {
    /// Create an empty builder for the given record type.
    pub fn new(record_type: RecordType) -> Self {
        Self {
            record_type,
            fields: BTreeMap::new(),
            pre_build: Vec::new(),
            post_build: Vec::new(),
        }
    }

    /// Seed a builder from an existing record (defensive copy).
    ///
    /// The declared type must match the record's own type; a mismatch is a
    /// configuration error, not a validation finding.
    pub fn from_record(record_type: RecordType, record: &Record) -> Result<Self> {
        if record.record_type() != record_type {
            return Err(ModelError::RecordTypeMismatch {
                declared: record_type.number(),
                actual: record.record_type().number(),
            });
        }
        Ok(Self {
            record_type,
            fields: record.fields().clone(),
            pre_build: Vec::new(),
            post_build: Vec::new(),
        })
    }

    /// The builder's declared record type.
    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// The staged fields, in field-number order.
    pub fn fields(&self) -> &BTreeMap<u32, FieldValue> {
        &self.fields
    }

    /// Look up a staged field.
    pub fn field(&self, number: u32) -> Option<&FieldValue> {
        self.fields.get(&number)
    }

    /// Stage a field (chaining form).
    pub fn with_field(mut self, number: u32, value: FieldValue) -> Self {
        self.fields.insert(number, value);
        self
    }

    /// Stage a text field (chaining form).
    pub fn with_text(self, number: u32, value: impl Into<String>) -> Self {
        self.with_field(number, FieldValue::text(value))
    }

    /// Stage an image field (chaining form).
    pub fn with_image(self, number: u32, bytes: impl Into<Vec<u8>>) -> Self {
        self.with_field(number, FieldValue::image(bytes))
    }

    /// Append a pre-build hook (chaining form). Hooks run in append order.
    pub fn with_pre_build(mut self, hook: RecordPreBuild) -> Self {
        self.pre_build.push(hook);
        self
    }

    /// Append a post-build hook (chaining form). Hooks run in append order.
    pub fn with_post_build(mut self, hook: RecordPostBuild) -> Self {
        self.post_build.push(hook);
        self
    }

    /// Stage or overwrite a field in place. Used by pre-build hooks.
    pub fn set_field(&mut self, number: u32, value: FieldValue) {
        self.fields.insert(number, value);
    }

    /// Remove a staged field.
    pub fn remove_field(&mut self, number: u32) -> Option<FieldValue> {
        self.fields.remove(&number)
    }

    /// Replace a staged field, returning the previous value.
    pub fn replace_field(&mut self, number: u32, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(number, value)
    }

    /// Build an immutable record from the staged state.
    ///
    /// Pre-build hooks run exactly once per call, in order; the field map is
    /// deep-copied; post-build hooks observe the result. The builder remains
    /// usable afterwards.
    pub fn build(&mut self) -> Result<Record> {
        let hooks = std::mem::take(&mut self.pre_build);
        let mut hook_result = Ok(());
        for hook in &hooks {
            hook_result = hook(self);
            if hook_result.is_err() {
                break;
            }
        }
        self.pre_build = hooks;
        hook_result?;

        let record = Record::new(self.record_type, self.fields.clone());
        for hook in &self.post_build {
            hook(&record);
        }
        Ok(record)
    }
}

// Hooks are opaque closures; Debug shows the staged state and hook counts.
impl fmt::Debug for RecordBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordBuilder")
            .field("record_type", &self.record_type)
            .field("fields", &self.fields)
            .field("pre_build", &self.pre_build.len())
            .field("post_build", &self.post_build.len())
            .finish()
    }
}

/// Builder for a whole transaction.
pub struct TransactionBuilder {
    records: BTreeMap<RecordType, Vec<Record>>,
    pre_build: Vec<TransactionPreBuild>,
    post_build: Vec<TransactionPostBuild>,
}

impl TransactionBuilder {
    /// Create an empty transaction builder.
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            pre_build: Vec::new(),
            post_build: Vec::new(),
        }
    }

    /// Seed a builder from an existing transaction (defensive copy).
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            records: transaction.records().clone(),
            pre_build: Vec::new(),
            post_build: Vec::new(),
        }
    }

    /// The staged records, in record-type order.
    pub fn records(&self) -> &BTreeMap<RecordType, Vec<Record>> {
        &self.records
    }

    /// Stage a record (chaining form).
    ///
    /// For the singleton type-1 this replaces any staged information record;
    /// for every other type the record is appended.
    pub fn with_record(mut self, record: Record) -> Self {
        self.add_record(record);
        self
    }

    /// Append a pre-build hook (chaining form).
    pub fn with_pre_build(mut self, hook: TransactionPreBuild) -> Self {
        self.pre_build.push(hook);
        self
    }

    /// Append a post-build hook (chaining form).
    pub fn with_post_build(mut self, hook: TransactionPostBuild) -> Self {
        self.post_build.push(hook);
        self
    }

    /// Stage a record in place. Same replace/append semantics as
    /// [`TransactionBuilder::with_record`].
    pub fn add_record(&mut self, record: Record) {
        let record_type = record.record_type();
        let list = self.records.entry(record_type).or_default();
        if record_type.is_information() {
            list.clear();
        }
        list.push(record);
    }

    /// Remove all staged records of a type.
    pub fn remove_records(&mut self, record_type: RecordType) -> Vec<Record> {
        self.records.remove(&record_type).unwrap_or_default()
    }

    /// Remove the one record of `record_type` whose IDC equals `idc`.
    ///
    /// For the singleton type-1 the only staged record is removed regardless
    /// of `idc` (the information record carries no IDC).
    pub fn remove_record(&mut self, record_type: RecordType, idc: u32) -> Result<Record> {
        let list = self
            .records
            .get_mut(&record_type)
            .filter(|l| !l.is_empty())
            .ok_or(ModelError::RecordNotFound {
                record_type: record_type.number(),
                idc,
            })?;

        let index = if record_type.is_information() {
            0
        } else {
            list.iter()
                .position(|r| r.idc_equals(idc))
                .ok_or(ModelError::RecordNotFound {
                    record_type: record_type.number(),
                    idc,
                })?
        };

        let removed = list.remove(index);
        if list.is_empty() {
            self.records.remove(&record_type);
        }
        Ok(removed)
    }

    /// Find a staged record by type and IDC.
    pub fn record_by_idc(&self, record_type: RecordType, idc: u32) -> Option<&Record> {
        self.records
            .get(&record_type)
            .and_then(|list| list.iter().find(|r| r.idc_equals(idc)))
    }

    /// Replace the record addressed by `(record_type, idc)` with `record`.
    ///
    /// Fails when no record with that IDC is staged, when the replacement's
    /// own IDC field differs from `idc`, or when the replacement is of a
    /// different type. This guards against silently staging an inconsistent
    /// transaction.
    pub fn replace_record(
        &mut self,
        record_type: RecordType,
        idc: u32,
        record: Record,
    ) -> Result<()> {
        if record.record_type() != record_type {
            return Err(ModelError::RecordTypeMismatch {
                declared: record_type.number(),
                actual: record.record_type().number(),
            });
        }
        if !record.idc_equals(idc) {
            return Err(ModelError::IdcMismatch {
                expected: idc,
                actual: record.idc().map(str::to_string),
            });
        }

        let list = self
            .records
            .get_mut(&record_type)
            .ok_or(ModelError::RecordNotFound {
                record_type: record_type.number(),
                idc,
            })?;
        let index = list
            .iter()
            .position(|r| r.idc_equals(idc))
            .ok_or(ModelError::RecordNotFound {
                record_type: record_type.number(),
                idc,
            })?;
        list[index] = record;
        Ok(())
    }

    /// Replace the staged type-1 information record.
    ///
    /// Convenience for pre-build hooks that recompute derived fields on the
    /// information record (CNT, LEN).
    pub fn replace_information_record(&mut self, record: Record) -> Result<()> {
        if !record.record_type().is_information() {
            return Err(ModelError::RecordTypeMismatch {
                declared: RecordType::TransactionInformation.number(),
                actual: record.record_type().number(),
            });
        }
        self.records
            .insert(RecordType::TransactionInformation, vec![record]);
        Ok(())
    }

    /// The staged type-1 information record, if exactly one exists.
    pub fn information_record(&self) -> Result<&Record> {
        let records = self
            .records
            .get(&RecordType::TransactionInformation)
            .map_or(&[][..], Vec::as_slice);
        match records {
            [] => Err(ModelError::MissingInformationRecord),
            [record] => Ok(record),
            _ => Err(ModelError::DuplicateInformationRecord {
                count: records.len(),
            }),
        }
    }

    /// Build an immutable transaction from the staged state.
    ///
    /// Same hook and deep-copy semantics as [`RecordBuilder::build`].
    pub fn build(&mut self) -> Result<Transaction> {
        let hooks = std::mem::take(&mut self.pre_build);
        let mut hook_result = Ok(());
        for hook in &hooks {
            hook_result = hook(self);
            if hook_result.is_err() {
                break;
            }
        }
        self.pre_build = hooks;
        hook_result?;

        let transaction = Transaction::new(self.records.clone());
        for hook in &self.post_build {
            hook(&transaction);
        }
        Ok(transaction)
    }
}

impl fmt::Debug for TransactionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionBuilder")
            .field("records", &self.records)
            .field("pre_build", &self.pre_build.len())
            .field("post_build", &self.post_build.len())
            .finish()
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// Integration-style builder tests live in tests/builders.rs; the in-module
// tests cover the hook ordering contract.
#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn pre_build_hooks_run_in_order_each_build() {
        let mut builder = RecordBuilder::new(RecordType::DescriptiveText)
            .with_text(IDC_FIELD, "0")
            .with_pre_build(Box::new(|b| {
                b.set_field(3, FieldValue::text("first"));
                Ok(())
            }))
            .with_pre_build(Box::new(|b| {
                b.set_field(3, FieldValue::text("second"));
                Ok(())
            }));

        let record = builder.build().unwrap();
        assert_eq!(record.field(3).unwrap().as_text().unwrap(), "second");

        // Hooks survive the build and run again.
        let again = builder.build().unwrap();
        assert_eq!(again.field(3).unwrap().as_text().unwrap(), "second");
    }

    #[test]
    fn failing_hook_aborts_build_and_keeps_builder_usable() {
        let mut builder = RecordBuilder::new(RecordType::DescriptiveText)
            .with_pre_build(Box::new(|_| Err(ModelError::hook("nope"))));
        assert!(builder.build().is_err());
        // Hook list was restored; a second attempt fails identically rather
        // than silently succeeding.
        assert!(builder.build().is_err());
    }

    #[test]
    fn builder_debug_shows_state_and_elides_hooks() {
        let builder = RecordBuilder::new(RecordType::DescriptiveText)
            .with_text(IDC_FIELD, "0")
            .with_pre_build(Box::new(|_| Ok(())));
        let debug = format!("{builder:?}");
        assert!(debug.contains("DescriptiveText"));
        assert!(debug.contains("pre_build: 1"));
        assert!(debug.contains("post_build: 0"));
    }

    #[test]
    fn post_build_hooks_observe_the_built_value() {
        let seen: Rc<RefCell<Vec<u32>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let mut builder = RecordBuilder::new(RecordType::DescriptiveText)
            .with_text(IDC_FIELD, "1")
            .with_post_build(Box::new(move |record| {
                sink.borrow_mut().push(record.fields().len() as u32);
            }));

        builder.build().unwrap();
        builder.build().unwrap();
        assert_eq!(*seen.borrow(), vec![1, 1]);
    }
}
