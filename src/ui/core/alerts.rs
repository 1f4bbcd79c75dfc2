use crate::model::AlertRequest;

/// In-progress alert edit. Only exists while the form is open.
#[derive(Debug, Clone)]
pub struct AlertDraft {
    /// Product the alert is bound to, captured when the form was opened.
    pub asin: String,
    pub email: String,
    pub target_price: f64,
    /// Target price exactly as typed.
    pub target_text: String,
    pub submitting: bool,
    seq: u64,
}

impl AlertDraft {
    fn new(asin: &str) -> Self {
        Self {
            asin: asin.to_string(),
            email: String::new(),
            target_price: 0.0,
            target_text: "0".to_string(),
            submitting: false,
            seq: 0,
        }
    }

    pub fn has_valid_target(&self) -> bool {
        self.target_price.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    NotEditing,
    InFlight,
    InvalidTarget,
}

#[derive(Debug, Clone, Default)]
pub enum AlertForm {
    #[default]
    Hidden,
    Editing(AlertDraft),
}

impl AlertForm {
    pub fn is_visible(&self) -> bool {
        matches!(self, AlertForm::Editing(_))
    }

    pub fn draft(&self) -> Option<&AlertDraft> {
        match self {
            AlertForm::Editing(draft) => Some(draft),
            AlertForm::Hidden => None,
        }
    }

    fn draft_mut(&mut self) -> Option<&mut AlertDraft> {
        match self {
            AlertForm::Editing(draft) => Some(draft),
            AlertForm::Hidden => None,
        }
    }

    /// Opens the form with an empty email and a zero target. An already open
    /// form keeps its draft.
    pub fn show(&mut self, asin: &str) -> bool {
        if self.is_visible() {
            return false;
        }
        *self = AlertForm::Editing(AlertDraft::new(asin));
        true
    }

    pub fn edit_email(&mut self, email: &str) -> bool {
        match self.draft_mut() {
            Some(draft) => {
                draft.email = email.to_string();
                true
            }
            None => false,
        }
    }

    /// Non-numeric input becomes NaN; the text is kept as typed.
    pub fn edit_target_price(&mut self, input: &str) -> bool {
        match self.draft_mut() {
            Some(draft) => {
                draft.target_text = input.to_string();
                draft.target_price = input.trim().parse::<f64>().unwrap_or(f64::NAN);
                true
            }
            None => false,
        }
    }

    /// Discards the draft. Refused while a submission is in flight.
    pub fn cancel(&mut self) -> bool {
        match self {
            AlertForm::Editing(draft) if !draft.submitting => {
                *self = AlertForm::Hidden;
                true
            }
            _ => false,
        }
    }

    /// Force-closes the form, e.g. when the displayed product changes.
    pub fn close(&mut self) {
        *self = AlertForm::Hidden;
    }

    pub fn begin_submit(&mut self, seq: u64) -> Result<AlertRequest, SubmitBlocked> {
        let draft = self.draft_mut().ok_or(SubmitBlocked::NotEditing)?;
        if draft.submitting {
            return Err(SubmitBlocked::InFlight);
        }
        if !draft.has_valid_target() {
            return Err(SubmitBlocked::InvalidTarget);
        }

        draft.submitting = true;
        draft.seq = seq;

        Ok(AlertRequest {
            asin: draft.asin.clone(),
            target_price: draft.target_price,
            email: draft.email.clone(),
        })
    }

    /// Applies the outcome of submission `seq`. Success hides the form, failure
    /// keeps the draft for another attempt. Returns false when `seq` does not
    /// belong to the open form.
    pub fn finish_submit(&mut self, seq: u64, succeeded: bool) -> bool {
        match self {
            AlertForm::Editing(draft) if draft.submitting && draft.seq == seq => {
                if succeeded {
                    *self = AlertForm::Hidden;
                } else {
                    draft.submitting = false;
                }
                true
            }
            _ => false,
        }
    }
}
