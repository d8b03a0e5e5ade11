//! Backend commands queued from UI to backend worker.

use shared::domain::FormInputs;

#[derive(Debug, Clone)]
pub enum BackendCommand {
    Submit { inputs: FormInputs },
    Cancel,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Submit { .. } => "submit",
            BackendCommand::Cancel => "cancel",
        }
    }
}
