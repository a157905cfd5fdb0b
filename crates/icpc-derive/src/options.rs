use std::collections::BTreeSet;

/// Projects known to report creatinine in µmol/L instead of mg/dL.
pub const DEFAULT_BAD_CREATININE_PROJECTS: [u32; 2] = [7, 37];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeriveOptions {
    /// Projects whose creatinine values are converted from µmol/L.
    pub bad_creatinine_projects: BTreeSet<u32>,
}

impl DeriveOptions {
    #[must_use]
    pub fn with_bad_creatinine_projects(mut self, projects: impl IntoIterator<Item = u32>) -> Self {
        self.bad_creatinine_projects = projects.into_iter().collect();
        self
    }
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            bad_creatinine_projects: DEFAULT_BAD_CREATININE_PROJECTS.into_iter().collect(),
        }
    }
}
