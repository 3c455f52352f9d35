//! Study globals and metadata-version attributes.

use define_model::{Patch, Study};

use crate::action::{Action, StudyAction};
use crate::error::Result;

pub fn reduce(study: &mut Study, action: &Action) -> Result<()> {
    let Action::Study(action) = action else {
        return Ok(());
    };
    match action {
        StudyAction::UpdateGlobalVariables { update } => {
            update.validate()?;
            update.merge_into(&mut study.global_variables);
        }
        StudyAction::UpdateMetadataVersion { update } => {
            update.validate()?;
            update.merge_into(&mut study.metadata_version);
        }
    }
    Ok(())
}
