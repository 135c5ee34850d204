//! Template selection for the broadcast screen

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::errors::{SenderError, Result};

/// How templates are assigned to recipients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateMode {
    /// One template for every recipient
    #[default]
    Single,
    /// A random template from the set per recipient
    Random,
    /// Templates from the set in rotation
    Alternate,
}

impl fmt::Display for TemplateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemplateMode::Single => "single",
            TemplateMode::Random => "random",
            TemplateMode::Alternate => "alternate",
        };
        f.pad(name)
    }
}

impl FromStr for TemplateMode {
    type Err = SenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(TemplateMode::Single),
            "random" => Ok(TemplateMode::Random),
            "alternate" => Ok(TemplateMode::Alternate),
            other => Err(SenderError::validation(format!("Invalid template mode: {}", other))),
        }
    }
}

/// Selected templates for each mode.
///
/// The single-mode choice and the multi-mode set are kept separately so that
/// switching modes does not lose either selection. The set is toggled by
/// membership, so it never holds duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSelection {
    mode: TemplateMode,
    selected: Option<Uuid>,
    selected_set: BTreeSet<Uuid>,
}

impl TemplateSelection {
    pub fn new(mode: TemplateMode) -> Self {
        Self { mode, ..Self::default() }
    }

    pub fn single(template_id: Option<Uuid>) -> Self {
        Self {
            mode: TemplateMode::Single,
            selected: template_id,
            selected_set: BTreeSet::new(),
        }
    }

    pub fn random(template_ids: impl IntoIterator<Item = Uuid>) -> Self {
        Self::with_set(TemplateMode::Random, template_ids)
    }

    pub fn alternate(template_ids: impl IntoIterator<Item = Uuid>) -> Self {
        Self::with_set(TemplateMode::Alternate, template_ids)
    }

    /// Selection for `mode` from a list of ids, as given on a command line.
    ///
    /// Repeated ids collapse into one. Single mode takes at most one id.
    pub fn from_ids(mode: TemplateMode, template_ids: Vec<Uuid>) -> Result<Self> {
        match mode {
            TemplateMode::Single => match template_ids.as_slice() {
                [] => Ok(Self::single(None)),
                [id] => Ok(Self::single(Some(*id))),
                _ => Err(SenderError::validation(
                    "Single mode takes one template; use random or alternate for several",
                )),
            },
            TemplateMode::Random | TemplateMode::Alternate => Ok(Self::with_set(mode, template_ids)),
        }
    }

    fn with_set(mode: TemplateMode, template_ids: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            mode,
            selected: None,
            selected_set: template_ids.into_iter().collect(),
        }
    }

    pub fn mode(&self) -> TemplateMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TemplateMode) {
        self.mode = mode;
    }

    /// Choose the single-mode template
    pub fn select(&mut self, template_id: Uuid) {
        self.selected = Some(template_id);
    }

    /// Flip membership in the multi-mode set; returns whether it is now selected
    pub fn toggle(&mut self, template_id: Uuid) -> bool {
        if self.selected_set.remove(&template_id) {
            false
        } else {
            self.selected_set.insert(template_id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.selected_set.clear();
    }

    /// Drop selections that no longer exist, e.g. after a template list refresh
    pub fn retain_existing(&mut self, existing: &BTreeSet<Uuid>) {
        if self.selected.is_some_and(|id| !existing.contains(&id)) {
            self.selected = None;
        }
        self.selected_set.retain(|id| existing.contains(id));
    }

    pub fn selected_template(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn selected_templates(&self) -> &BTreeSet<Uuid> {
        &self.selected_set
    }

    /// Templates in effect for the current mode
    pub fn active_ids(&self) -> Vec<Uuid> {
        match self.mode {
            TemplateMode::Single => self.selected.into_iter().collect(),
            TemplateMode::Random | TemplateMode::Alternate => {
                self.selected_set.iter().copied().collect()
            }
        }
    }

    pub fn is_satisfied(&self) -> bool {
        match self.mode {
            TemplateMode::Single => self.selected.is_some(),
            TemplateMode::Random | TemplateMode::Alternate => !self.selected_set.is_empty(),
        }
    }
}
