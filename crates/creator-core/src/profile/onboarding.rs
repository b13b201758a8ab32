//! Multi-step onboarding form.
//!
//! The form gates each step the same way `ProfileDraft::validate` gates the
//! whole submission: step one needs name, niche and audience, step three
//! needs at least one platform. Tone always has a value.

use std::collections::BTreeSet;

use crate::catalog::{Platform, Tone};
use crate::error::{CreatorError, Result};
use crate::profile::model::ProfileDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    Details,
    Tone,
    Platforms,
}

impl OnboardingStep {
    /// 1-based position, as shown in "Step N of 3".
    pub fn number(self) -> u8 {
        match self {
            OnboardingStep::Details => 1,
            OnboardingStep::Tone => 2,
            OnboardingStep::Platforms => 3,
        }
    }

    pub const COUNT: u8 = 3;
}

#[derive(Debug, Clone)]
pub struct OnboardingForm {
    step: OnboardingStep,
    name: String,
    niche: String,
    target_audience: String,
    tone: Tone,
    platforms: BTreeSet<Platform>,
}

impl Default for OnboardingForm {
    fn default() -> Self {
        Self {
            step: OnboardingStep::Details,
            name: String::new(),
            niche: String::new(),
            target_audience: String::new(),
            tone: Tone::default(),
            platforms: BTreeSet::new(),
        }
    }
}

impl OnboardingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_niche(&mut self, niche: impl Into<String>) {
        self.niche = niche.into();
    }

    pub fn set_target_audience(&mut self, audience: impl Into<String>) {
        self.target_audience = audience.into();
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.tone = tone;
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    /// Adds the platform if absent, removes it if present.
    pub fn toggle_platform(&mut self, platform: Platform) {
        if !self.platforms.remove(&platform) {
            self.platforms.insert(platform);
        }
    }

    pub fn platforms(&self) -> &BTreeSet<Platform> {
        &self.platforms
    }

    /// Whether the current step's gate is satisfied.
    pub fn can_advance(&self) -> bool {
        match self.step {
            OnboardingStep::Details => {
                !self.name.trim().is_empty()
                    && !self.niche.trim().is_empty()
                    && !self.target_audience.trim().is_empty()
            }
            OnboardingStep::Tone => true,
            OnboardingStep::Platforms => !self.platforms.is_empty(),
        }
    }

    /// Moves to the next step. The last step stays where it is; submitting
    /// goes through [`OnboardingForm::to_draft`].
    pub fn next(&mut self) -> Result<OnboardingStep> {
        if !self.can_advance() {
            return Err(CreatorError::validation(match self.step {
                OnboardingStep::Details => "Name, niche and target audience are required",
                OnboardingStep::Tone => "Choose a tone",
                OnboardingStep::Platforms => "Select at least one platform",
            }));
        }
        self.step = match self.step {
            OnboardingStep::Details => OnboardingStep::Tone,
            OnboardingStep::Tone | OnboardingStep::Platforms => OnboardingStep::Platforms,
        };
        Ok(self.step)
    }

    pub fn back(&mut self) -> OnboardingStep {
        self.step = match self.step {
            OnboardingStep::Details | OnboardingStep::Tone => OnboardingStep::Details,
            OnboardingStep::Platforms => OnboardingStep::Tone,
        };
        self.step
    }

    /// Builds the submission, validating every field regardless of step.
    pub fn to_draft(&self) -> Result<ProfileDraft> {
        let draft = ProfileDraft {
            name: self.name.trim().to_string(),
            niche: self.niche.trim().to_string(),
            tone: self.tone,
            target_audience: self.target_audience.trim().to_string(),
            platforms: self.platforms.clone(),
        };
        draft.validate()?;
        Ok(draft)
    }
}
