//! Wizard steps

/// Step labels, in order
pub const STEPS: [&str; 2] = ["Configure Connection", "Upload CSV"];

/// Current step of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    /// Credentials and base URIs are being entered
    #[default]
    Configuring,
    /// Connected; a data extension file can be submitted
    Uploading,
}

impl WizardStep {
    pub fn index(&self) -> usize {
        match self {
            Self::Configuring => 0,
            Self::Uploading => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        STEPS[self.index()]
    }

    /// Completion ratio shown in the progress bar, 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        self.index() as f64 / (STEPS.len() - 1) as f64
    }

    /// Caption of the control that triggers `Next` on this step
    pub fn next_label(&self) -> &'static str {
        match self {
            Self::Configuring => "Next",
            Self::Uploading => "Create Data Extensions",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        assert_eq!(WizardStep::Configuring.progress(), 0.0);
        assert_eq!(WizardStep::Uploading.progress(), 1.0);
        assert_eq!(WizardStep::Uploading.label(), "Upload CSV");
    }
}
