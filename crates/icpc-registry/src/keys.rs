//! Keys of the fields that identity extraction and derivation rules read or write.

pub const SUBJECT_ID: &str = "Subject_ID";
pub const GENOTYPING: &str = "Genotyping";
pub const PHENOTYPING: &str = "Phenotyping";
pub const SAMPLE_SOURCE: &str = "Sample_Source";
pub const PROJECT: &str = "Project";
pub const GENDER: &str = "Gender";
pub const RACE_SELF: &str = "Race_self";
pub const RACE_OMB: &str = "Race_OMB";
pub const ETHNICITY_REPORTED: &str = "Ethnicity_reported";
pub const ETHNICITY_OMB: &str = "Ethnicity_OMB";
pub const COUNTRY: &str = "Country";
pub const AGE: &str = "Age";

pub const HEIGHT: &str = "Height";
pub const WEIGHT: &str = "Weight";
pub const BMI: &str = "BMI";
pub const EVER_SMOKED: &str = "Ever_Smoked";
pub const CURRENT_SMOKER: &str = "Current_smoker";
pub const CREATININE: &str = "Creatinine";
pub const CREATININE_CATEGORY: &str = "Creatinine_Category";
pub const LVEF_AVAILABLE: &str = "Ejection_fraction";
pub const LVEF: &str = "Left_Ventricle";
pub const STEMI: &str = "STEMI";
pub const NSTEMI: &str = "NSTEMI";
pub const MI_DURING_FOLLOWUP: &str = "mi_during_followup";
pub const FOLLOWUP_DURATION: &str = "Duration_followup_clinical_outcomes";
pub const WHITE_CELL_COUNT: &str = "White_cell_count";
pub const RED_CELL_COUNT: &str = "Red_cell_count";
pub const PLATELET_COUNT: &str = "Platelet_count";
pub const PCI_INFORMATION: &str = "pci_information";

/// Fields promoted to typed attributes of a subject record.
pub const IDENTITY: [&str; 12] = [
    SUBJECT_ID,
    GENOTYPING,
    PHENOTYPING,
    SAMPLE_SOURCE,
    PROJECT,
    GENDER,
    RACE_SELF,
    RACE_OMB,
    ETHNICITY_REPORTED,
    ETHNICITY_OMB,
    COUNTRY,
    AGE,
];

pub fn is_identity(key: &str) -> bool {
    IDENTITY.contains(&key)
}
