use rusqlite::Connection;

use super::normalize::{normalize, RiskView};
use crate::db::{self, DatabaseError};
use crate::models::{LifestyleRecord, MedicalRecord};

/// Both assessment tables loaded in full. Aggregates run over this
/// snapshot; a failed read yields no corpus at all.
#[derive(Debug, Clone, Default)]
pub struct RecordCorpus {
    pub lifestyle: Vec<LifestyleRecord>,
    pub medical: Vec<MedicalRecord>,
}

impl RecordCorpus {
    pub fn load(conn: &Connection) -> Result<Self, DatabaseError> {
        let lifestyle = db::get_all_lifestyle_entries(conn)?;
        let medical = db::get_all_medical_predictions(conn)?;
        tracing::debug!(
            lifestyle = lifestyle.len(),
            medical = medical.len(),
            "Loaded record corpus"
        );
        Ok(Self { lifestyle, medical })
    }

    pub fn views(&self) -> Vec<RiskView<'_>> {
        normalize(&self.lifestyle, &self.medical)
    }

    pub fn len(&self) -> usize {
        self.lifestyle.len() + self.medical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
