use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;

use super::RecordStore;
use crate::models::{CgpaRecord, SyllabusRecord};

/// In-memory RecordStore for tests and local runs without a database.
///
/// Mirrors the table constraints: `roll_no` is unique in the CGPA table,
/// the syllabus table accepts duplicate `(branch, semester)` pairs.
pub struct MemoryStore {
    cgpa: RwLock<Vec<CgpaRecord>>,
    syllabus: RwLock<Vec<SyllabusRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            cgpa: RwLock::new(Vec::new()),
            syllabus: RwLock::new(Vec::new()),
        }
    }

    pub fn insert_cgpa(&self, record: CgpaRecord) -> Result<()> {
        let mut rows = self.cgpa.write().map_err(|e| anyhow!("Lock: {}", e))?;

        if rows.iter().any(|r| r.id == record.id) {
            return Err(anyhow!("Duplicate cgpa id {}", record.id));
        }
        if record.roll_no.is_some() && rows.iter().any(|r| r.roll_no == record.roll_no) {
            return Err(anyhow!(
                "Duplicate roll_no {:?} violates unique constraint",
                record.roll_no
            ));
        }

        rows.push(record);
        Ok(())
    }

    pub fn insert_syllabus(&self, record: SyllabusRecord) -> Result<()> {
        let mut rows = self.syllabus.write().map_err(|e| anyhow!("Lock: {}", e))?;

        if rows.iter().any(|r| r.id == record.id) {
            return Err(anyhow!("Duplicate syllabus id {}", record.id));
        }

        rows.push(record);
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_cgpa(&self, roll_no: &str) -> Result<Option<Decimal>> {
        let rows = self.cgpa.read().map_err(|e| anyhow!("Lock: {}", e))?;
        Ok(rows
            .iter()
            .find(|r| r.roll_no.as_deref() == Some(roll_no))
            .and_then(|r| r.cgpa))
    }

    async fn find_syllabus(&self, branch: &str, semester: &str) -> Result<Option<String>> {
        let rows = self.syllabus.read().map_err(|e| anyhow!("Lock: {}", e))?;
        Ok(rows
            .iter()
            .filter(|r| r.branch.as_deref() == Some(branch))
            .filter(|r| r.semester.as_deref() == Some(semester))
            .min_by_key(|r| r.id)
            .and_then(|r| r.usable_file())
            .map(str::to_string))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[tokio::test]
    async fn find_cgpa_exact_match_only() {
        let store = MemoryStore::new();
        store
            .insert_cgpa(CgpaRecord::new(1, "21CS001", dec("8.7")))
            .unwrap();

        assert_eq!(store.find_cgpa("21CS001").await.unwrap(), Some(dec("8.7")));
        assert_eq!(store.find_cgpa("21cs001").await.unwrap(), None);
        assert_eq!(store.find_cgpa("21CS00").await.unwrap(), None);
        assert_eq!(store.find_cgpa("").await.unwrap(), None);
    }

    #[tokio::test]
    async fn find_cgpa_null_value_is_absent() {
        let store = MemoryStore::new();
        store
            .insert_cgpa(CgpaRecord {
                id: 1,
                roll_no: Some("21CS002".into()),
                cgpa: None,
            })
            .unwrap();

        assert_eq!(store.find_cgpa("21CS002").await.unwrap(), None);
    }

    #[tokio::test]
    async fn find_cgpa_zero_is_present() {
        let store = MemoryStore::new();
        store
            .insert_cgpa(CgpaRecord::new(1, "21CS003", Decimal::ZERO))
            .unwrap();

        assert_eq!(
            store.find_cgpa("21CS003").await.unwrap(),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn roll_no_is_unique() {
        let store = MemoryStore::new();
        store
            .insert_cgpa(CgpaRecord::new(1, "21CS001", dec("8.7")))
            .unwrap();
        let err = store
            .insert_cgpa(CgpaRecord::new(2, "21CS001", dec("9.1")))
            .unwrap_err();
        assert!(err.to_string().contains("unique"));
    }

    #[tokio::test]
    async fn find_syllabus_requires_both_fields() {
        let store = MemoryStore::new();
        store
            .insert_syllabus(SyllabusRecord::new(1, "CSE", "5", "cse_sem5.pdf"))
            .unwrap();

        assert_eq!(
            store.find_syllabus("CSE", "5").await.unwrap().as_deref(),
            Some("cse_sem5.pdf")
        );
        assert_eq!(store.find_syllabus("CSE", "6").await.unwrap(), None);
        assert_eq!(store.find_syllabus("ECE", "5").await.unwrap(), None);
    }

    #[tokio::test]
    async fn find_syllabus_duplicates_resolve_to_lowest_id() {
        let store = MemoryStore::new();
        store
            .insert_syllabus(SyllabusRecord::new(7, "CSE", "5", "newer.pdf"))
            .unwrap();
        store
            .insert_syllabus(SyllabusRecord::new(3, "CSE", "5", "older.pdf"))
            .unwrap();

        assert_eq!(
            store.find_syllabus("CSE", "5").await.unwrap().as_deref(),
            Some("older.pdf")
        );
    }

    #[tokio::test]
    async fn find_syllabus_empty_file_is_absent() {
        let store = MemoryStore::new();
        store
            .insert_syllabus(SyllabusRecord::new(1, "CSE", "5", ""))
            .unwrap();

        assert_eq!(store.find_syllabus("CSE", "5").await.unwrap(), None);
    }
}
